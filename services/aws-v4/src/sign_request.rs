// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::canonical::{canonical_request, signed_header_names};
use crate::constants::{ALGORITHM, X_AMZ_DATE};
use crate::key::{generate_signing_key, CredentialScope};
use crate::request::RequestDescriptor;
use crate::Credential;
use http::{header, HeaderMap, HeaderValue, Method};
use log::debug;
use secretsign_core::hash::hex_sha256;
use secretsign_core::time::{format_iso8601, parse_iso8601};
use secretsign_core::{Error, Result};
use std::fmt::Write;

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer never reads the clock: the signing time is taken from the
/// `x-amz-date` header carried by the request, so the signed date always
/// matches the transmitted one.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,

    method: Method,
    path: String,
}

/// SignatureResult is the outcome of signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureResult {
    /// Lower-cased signed header names, sorted.
    pub signed_headers: Vec<String>,
    /// Hex encoded signature.
    pub signature: String,
    /// Scope the signature is bound to.
    pub scope: CredentialScope,
}

impl SignatureResult {
    /// Render the `Authorization` header value.
    pub fn to_authorization(&self, access_key: &str) -> String {
        format!(
            "{ALGORITHM} Credential={access_key}/{}, SignedHeaders={}, Signature={}",
            self.scope,
            self.signed_headers.join(";"),
            self.signature
        )
    }
}

impl RequestSigner {
    /// Create a new signer for `service` in `region`.
    ///
    /// [`RequestSigner::compute_signature`] signs `POST /` unless changed by
    /// [`RequestSigner::with_method`] or [`RequestSigner::with_path`].
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            method: Method::POST,
            path: "/".into(),
        }
    }

    /// Set the method used by [`RequestSigner::compute_signature`].
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the path used by [`RequestSigner::compute_signature`].
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Compute the `Authorization` header value for a request.
    ///
    /// Every header in `headers` is signed, `host` included. `query_string` is
    /// the raw `a=b&c=d` query, empty for requests without one.
    pub fn compute_signature(
        &self,
        headers: &HeaderMap,
        query_string: &str,
        body_hash_hex: &str,
        access_key: &str,
        secret_key: &str,
    ) -> Result<String> {
        let cred = Credential::new(access_key, secret_key);
        let req = RequestDescriptor::new(self.method.clone(), "", &self.path)
            .with_query_string(query_string)
            .with_headers(headers.clone())
            .with_body_hash(body_hash_hex);

        Ok(self.sign(&req, &cred)?.to_authorization(access_key))
    }

    /// Sign the request, returning the signature and what it covers.
    pub fn sign(&self, req: &RequestDescriptor, cred: &Credential) -> Result<SignatureResult> {
        if cred.access_key_id.is_empty() {
            return Err(Error::credential_invalid("access key id is empty"));
        }
        if cred.secret_access_key.is_empty() {
            return Err(Error::credential_invalid("secret access key is empty"));
        }

        let headers = req.signing_headers()?;
        let amz_date = headers
            .get(X_AMZ_DATE)
            .ok_or_else(|| Error::header_missing("x-amz-date is required for signing"))?
            .to_str()?;
        let now = parse_iso8601(amz_date.trim())?;

        let signed_headers = signed_header_names(&headers);
        let creq = canonical_request(req, &signed_headers)?;
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.as_bytes());

        let scope = CredentialScope::from_datetime(now, &self.region, &self.service)?;
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{ALGORITHM}")?;
            writeln!(f, "{}", format_iso8601(now))?;
            writeln!(f, "{scope}")?;
            write!(f, "{encoded_req}")?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(&cred.secret_access_key, &scope)?;
        let signature = signing_key.sign(string_to_sign.as_bytes());

        Ok(SignatureResult {
            signed_headers,
            signature,
            scope,
        })
    }

    /// Sign the request and return its headers with `Authorization` added.
    ///
    /// The descriptor is left as is. `host` is part of the returned set when
    /// it was derived from [`RequestDescriptor::host`].
    pub fn signed_headers(&self, req: &RequestDescriptor, cred: &Credential) -> Result<HeaderMap> {
        let result = self.sign(req, cred)?;

        let mut headers = req.signing_headers()?.into_owned();
        let mut authorization =
            HeaderValue::from_str(&result.to_authorization(&cred.access_key_id))?;
        // Set sensitive to avoid leaking in debug output.
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderName;
    use pretty_assertions::assert_eq;
    use secretsign_core::ErrorKind;

    const ACCESS_KEY: &str = "AKIDEXAMPLE";
    const SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";
    const BODY_HASH: &str = "4548fb6ef1e248c3bfe23561cef6d73b2fab72dea7ac7ba13090754a3ac9fefa";
    const SIGNATURE: &str = "009b2961f65d2206335fdfa394c88c734b3a12bbf99b8a551c283e906af80914";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(
                HeaderName::from_bytes(k.as_bytes()).expect("name must be valid"),
                HeaderValue::from_str(v).expect("value must be valid"),
            );
        }
        map
    }

    fn get_secret_value_headers() -> HeaderMap {
        headers(&[
            ("host", "secretsmanager.us-east-1.amazonaws.com"),
            ("content-type", "application/x-amz-json-1.1"),
            ("content-length", "24"),
            ("x-amz-content-sha256", BODY_HASH),
            ("x-amz-date", "20150830T123600Z"),
            ("x-amz-target", "secretsmanager.GetSecretValue"),
        ])
    }

    fn signer() -> RequestSigner {
        RequestSigner::new("secretsmanager", "us-east-1")
    }

    fn signature_of(authorization: &str) -> &str {
        authorization
            .rsplit_once("Signature=")
            .map(|(_, v)| v)
            .expect("authorization must carry a signature")
    }

    fn credential_of(authorization: &str) -> &str {
        authorization
            .split(", ")
            .next()
            .expect("authorization must carry a credential")
    }

    #[test]
    fn test_compute_signature_get_secret_value() {
        init();

        let auth = signer()
            .compute_signature(
                &get_secret_value_headers(),
                "",
                BODY_HASH,
                ACCESS_KEY,
                SECRET_KEY,
            )
            .expect("signing must succeed");

        assert_eq!(
            auth,
            format!("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/secretsmanager/aws4_request, SignedHeaders=content-length;content-type;host;x-amz-content-sha256;x-amz-date;x-amz-target, Signature={SIGNATURE}")
        );
    }

    #[test]
    fn test_compute_signature_is_deterministic() {
        let headers = get_secret_value_headers();
        let first = signer()
            .compute_signature(&headers, "", BODY_HASH, ACCESS_KEY, SECRET_KEY)
            .expect("signing must succeed");
        let second = signer()
            .compute_signature(&headers, "", BODY_HASH, ACCESS_KEY, SECRET_KEY)
            .expect("signing must succeed");

        assert_eq!(first, second);
    }

    #[test]
    fn test_header_name_case_does_not_matter() {
        let mixed = headers(&[
            ("Host", "secretsmanager.us-east-1.amazonaws.com"),
            ("Content-Type", "application/x-amz-json-1.1"),
            ("Content-Length", "24"),
            ("X-Amz-Content-Sha256", BODY_HASH),
            ("X-Amz-Date", "20150830T123600Z"),
            ("X-Amz-Target", "secretsmanager.GetSecretValue"),
        ]);

        let auth = signer()
            .compute_signature(&mixed, "", BODY_HASH, ACCESS_KEY, SECRET_KEY)
            .expect("signing must succeed");
        assert_eq!(signature_of(&auth), SIGNATURE);
    }

    #[test]
    fn test_header_value_whitespace_does_not_matter() {
        let mut padded = get_secret_value_headers();
        padded.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("  application/x-amz-json-1.1  "),
        );

        let auth = signer()
            .compute_signature(&padded, "", BODY_HASH, ACCESS_KEY, SECRET_KEY)
            .expect("signing must succeed");
        assert_eq!(signature_of(&auth), SIGNATURE);
    }

    #[test]
    fn test_body_hash_changes_signature() {
        let other = "16a2211a339bfdee684095670fdaee563d04f248b23f748b6667b85df8aa9979";

        let auth = signer()
            .compute_signature(
                &get_secret_value_headers(),
                "",
                other,
                ACCESS_KEY,
                SECRET_KEY,
            )
            .expect("signing must succeed");
        assert_ne!(signature_of(&auth), SIGNATURE);
    }

    #[test]
    fn test_header_value_changes_signature() {
        let mut changed = get_secret_value_headers();
        changed.insert(
            "x-amz-target",
            HeaderValue::from_static("secretsmanager.DescribeSecret"),
        );

        let auth = signer()
            .compute_signature(&changed, "", BODY_HASH, ACCESS_KEY, SECRET_KEY)
            .expect("signing must succeed");
        assert_ne!(signature_of(&auth), SIGNATURE);
    }

    #[test]
    fn test_secret_key_changes_signature() {
        let auth = signer()
            .compute_signature(
                &get_secret_value_headers(),
                "",
                BODY_HASH,
                ACCESS_KEY,
                "another-secret",
            )
            .expect("signing must succeed");
        assert_ne!(signature_of(&auth), SIGNATURE);
    }

    #[test]
    fn test_access_key_only_changes_credential() {
        let headers = get_secret_value_headers();
        let first = signer()
            .compute_signature(&headers, "", BODY_HASH, ACCESS_KEY, SECRET_KEY)
            .expect("signing must succeed");
        let second = signer()
            .compute_signature(&headers, "", BODY_HASH, "OTHERKEY", SECRET_KEY)
            .expect("signing must succeed");

        assert_eq!(signature_of(&first), signature_of(&second));
        assert_ne!(credential_of(&first), credential_of(&second));
        assert_eq!(
            credential_of(&second),
            "AWS4-HMAC-SHA256 Credential=OTHERKEY/20150830/us-east-1/secretsmanager/aws4_request"
        );
    }

    #[test]
    fn test_session_token_is_signed() {
        let mut headers = get_secret_value_headers();
        headers.insert(
            "x-amz-security-token",
            HeaderValue::from_static("session-token"),
        );

        let auth = signer()
            .compute_signature(&headers, "", BODY_HASH, ACCESS_KEY, SECRET_KEY)
            .expect("signing must succeed");
        assert_eq!(
            auth,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/secretsmanager/aws4_request, SignedHeaders=content-length;content-type;host;x-amz-content-sha256;x-amz-date;x-amz-security-token;x-amz-target, Signature=34dc56403e07674ccc014c84928e1a8c7b2044f0e72b6fbf62e78e540bd0d4e9"
        );
    }

    #[test]
    fn test_missing_date_header() {
        let mut headers = get_secret_value_headers();
        headers.remove(X_AMZ_DATE);

        let err = signer()
            .compute_signature(&headers, "", BODY_HASH, ACCESS_KEY, SECRET_KEY)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HeaderMissing);
    }

    #[test]
    fn test_malformed_date_header() {
        let mut headers = get_secret_value_headers();
        headers.insert(X_AMZ_DATE, HeaderValue::from_static("2015-08-30 12:36:00"));

        let err = signer()
            .compute_signature(&headers, "", BODY_HASH, ACCESS_KEY, SECRET_KEY)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_empty_credentials() {
        let headers = get_secret_value_headers();

        let err = signer()
            .compute_signature(&headers, "", BODY_HASH, "", SECRET_KEY)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);

        let err = signer()
            .compute_signature(&headers, "", BODY_HASH, ACCESS_KEY, "")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[test]
    fn test_credential_checked_before_headers() {
        let err = signer()
            .compute_signature(&HeaderMap::new(), "", BODY_HASH, "", "")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[test]
    fn test_get_vanilla() {
        init();

        let req = RequestDescriptor::new(Method::GET, "example.amazonaws.com", "/")
            .with_headers(headers(&[("x-amz-date", "20150830T123600Z")]));
        let cred = Credential::new(ACCESS_KEY, SECRET_KEY);

        let result = RequestSigner::new("service", "us-east-1")
            .sign(&req, &cred)
            .expect("signing must succeed");
        assert_eq!(result.signed_headers, vec!["host", "x-amz-date"]);
        assert_eq!(
            result.to_authorization(ACCESS_KEY),
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, SignedHeaders=host;x-amz-date, Signature=5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
        );
    }

    #[test]
    fn test_iam_list_users() {
        let auth = RequestSigner::new("iam", "us-east-1")
            .with_method(Method::GET)
            .with_path("/")
            .compute_signature(
                &headers(&[
                    (
                        "Content-Type",
                        "application/x-www-form-urlencoded; charset=utf-8",
                    ),
                    ("Host", "iam.amazonaws.com"),
                    ("X-Amz-Date", "20150830T123600Z"),
                ]),
                "Action=ListUsers&Version=2010-05-08",
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
                ACCESS_KEY,
                SECRET_KEY,
            )
            .expect("signing must succeed");

        assert_eq!(
            auth,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, SignedHeaders=content-type;host;x-amz-date, Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn test_signed_headers_does_not_mutate_request() {
        let req = RequestDescriptor::new(
            Method::POST,
            "secretsmanager.us-east-1.amazonaws.com",
            "/",
        )
        .with_headers(get_secret_value_headers())
        .with_body_hash(BODY_HASH);
        let cred = Credential::new(ACCESS_KEY, SECRET_KEY);

        let signed = signer()
            .signed_headers(&req, &cred)
            .expect("signing must succeed");

        assert!(req.headers.get(header::AUTHORIZATION).is_none());
        let authorization = &signed[header::AUTHORIZATION];
        assert!(authorization.is_sensitive());
        assert_eq!(
            signature_of(authorization.to_str().expect("must be valid")),
            SIGNATURE
        );
        assert_eq!(signed.len(), req.headers.len() + 1);
    }

    #[test]
    fn test_signed_headers_adds_host_from_descriptor() {
        let mut headers = get_secret_value_headers();
        headers.remove(header::HOST);
        let req = RequestDescriptor::new(
            Method::POST,
            "secretsmanager.us-east-1.amazonaws.com",
            "/",
        )
        .with_headers(headers)
        .with_body_hash(BODY_HASH);
        let cred = Credential::new(ACCESS_KEY, SECRET_KEY);

        let signed = signer()
            .signed_headers(&req, &cred)
            .expect("signing must succeed");
        assert_eq!(signed[header::HOST], "secretsmanager.us-east-1.amazonaws.com");
        assert_eq!(
            signature_of(signed[header::AUTHORIZATION].to_str().expect("must be valid")),
            SIGNATURE
        );
    }
}
