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

use crate::constants::SCOPE_TERMINATOR;
use secretsign_core::hash::{hex_hmac_sha256, hmac_sha256};
use secretsign_core::time::{format_date, DateTime};
use secretsign_core::{Error, Result};
use std::fmt::{self, Debug, Display, Formatter};

/// CredentialScope binds a signature to a day, a region and a service.
///
/// Rendered as `20150830/us-east-1/secretsmanager/aws4_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialScope {
    date: String,
    region: String,
    service: String,
}

impl CredentialScope {
    /// Create a scope from a `YYYYMMDD` date.
    pub fn new(date: &str, region: &str, service: &str) -> Result<Self> {
        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::request_invalid(format!(
                "credential scope date must be YYYYMMDD, got {date:?}"
            )));
        }
        if region.is_empty() || service.is_empty() {
            return Err(Error::config_invalid(
                "credential scope requires region and service",
            ));
        }

        Ok(Self {
            date: date.to_string(),
            region: region.to_string(),
            service: service.to_string(),
        })
    }

    /// Create a scope from the signing time.
    pub fn from_datetime(time: DateTime, region: &str, service: &str) -> Result<Self> {
        Self::new(&format_date(time), region, service)
    }

    /// Date part of this scope.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Region part of this scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Service part of this scope.
    pub fn service(&self) -> &str {
        &self.service
    }
}

impl Display for CredentialScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{SCOPE_TERMINATOR}",
            self.date, self.region, self.service
        )
    }
}

/// SigningKey is the key derived for one scope.
///
/// Never printed, never cloned.
pub struct SigningKey([u8; 32]);

impl SigningKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Hex encoded HMAC-SHA256 of `content` under this key.
    pub fn sign(&self, content: &[u8]) -> String {
        hex_hmac_sha256(&self.0, content)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(***)")
    }
}

/// Derive the signing key for `scope` from a secret access key.
///
/// ```text
/// kDate    = HMAC("AWS4" + secret, date)
/// kRegion  = HMAC(kDate, region)
/// kService = HMAC(kRegion, service)
/// kSigning = HMAC(kService, "aws4_request")
/// ```
pub fn generate_signing_key(secret: &str, scope: &CredentialScope) -> Result<SigningKey> {
    if secret.is_empty() {
        return Err(Error::credential_invalid("secret access key is empty"));
    }

    let sign_secret = format!("AWS4{secret}");
    let sign_date = hmac_sha256(sign_secret.as_bytes(), scope.date.as_bytes());
    let sign_region = hmac_sha256(&sign_date, scope.region.as_bytes());
    let sign_service = hmac_sha256(&sign_region, scope.service.as_bytes());
    let sign_request = hmac_sha256(&sign_service, SCOPE_TERMINATOR.as_bytes());

    Ok(SigningKey(sign_request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use secretsign_core::hash::hex_encode;
    use secretsign_core::ErrorKind;
    use test_case::test_case;

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    #[test_case("20120215", "us-east-1", "iam", "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d" ; "iam 20120215")]
    #[test_case("20150830", "us-east-1", "iam", "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9" ; "iam 20150830")]
    fn test_generate_signing_key(date: &str, region: &str, service: &str, expected: &str) {
        let scope = CredentialScope::new(date, region, service).expect("scope must be valid");
        let key = generate_signing_key(SECRET, &scope).expect("key must be derived");
        assert_eq!(hex_encode(key.as_bytes()), expected);
    }

    #[test]
    fn test_generate_signing_key_empty_secret() {
        let scope = CredentialScope::new("20150830", "us-east-1", "iam").expect("scope must be valid");
        let err = generate_signing_key("", &scope).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[test]
    fn test_scope_display() {
        let scope = CredentialScope::new("20150830", "us-east-1", "secretsmanager")
            .expect("scope must be valid");
        assert_eq!(
            scope.to_string(),
            "20150830/us-east-1/secretsmanager/aws4_request"
        );
    }

    #[test]
    fn test_scope_from_datetime() {
        let time = chrono::Utc
            .with_ymd_and_hms(2015, 8, 30, 12, 36, 0)
            .single()
            .expect("time must be valid");
        let scope = CredentialScope::from_datetime(time, "us-east-1", "iam")
            .expect("scope must be valid");
        assert_eq!(scope.date(), "20150830");
        assert_eq!(scope.region(), "us-east-1");
        assert_eq!(scope.service(), "iam");
    }

    #[test_case("2015083" ; "too short")]
    #[test_case("2015-08-30" ; "dashes")]
    #[test_case("20150830T123600Z" ; "full timestamp")]
    fn test_scope_rejects_bad_date(date: &str) {
        let err = CredentialScope::new(date, "us-east-1", "iam").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_scope_rejects_empty_region() {
        let err = CredentialScope::new("20150830", "", "iam").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_signing_key_debug_is_redacted() {
        let scope = CredentialScope::new("20150830", "us-east-1", "iam").expect("scope must be valid");
        let key = generate_signing_key(SECRET, &scope).expect("key must be derived");
        assert_eq!(format!("{key:?}"), "SigningKey(***)");
    }
}
