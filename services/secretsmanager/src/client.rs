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

use crate::constants::*;
use crate::{AwsSecret, GetSecretValueRequest};
use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST};
use http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use log::debug;
use secretsign_aws_v4::{
    Config, Credential, DefaultCredentialProvider, RequestDescriptor, RequestSigner,
    X_AMZ_CONTENT_SHA_256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN, X_AMZ_TARGET,
};
use secretsign_core::hash::hex_sha256;
use secretsign_core::time::{format_iso8601, now, DateTime};
use secretsign_core::{Context, Error, ProvideCredential, Result, SigningCredential};
use serde::Deserialize;

/// SecretsManagerClient reads secrets from AWS Secrets Manager.
///
/// Every call resolves a credential, signs the request with SigV4 and sends it
/// through the [`Context`]'s [`HttpSend`](secretsign_core::HttpSend). Signing
/// problems are reported before anything is sent. Failed calls are not
/// retried.
#[derive(Debug)]
pub struct SecretsManagerClient {
    ctx: Context,
    endpoint: String,
    signer: RequestSigner,
    provider: Box<dyn ProvideCredential<Credential = Credential>>,

    time: Option<DateTime>,
}

impl SecretsManagerClient {
    /// Create a client for `region` loading credentials from `provider`.
    pub fn new(
        ctx: Context,
        region: &str,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        Self {
            ctx,
            endpoint: format!("https://{SERVICE}.{region}.amazonaws.com"),
            signer: RequestSigner::new(SERVICE, region),
            provider: Box::new(provider),

            time: None,
        }
    }

    /// Create a client from [`Config`], completed with values from env.
    ///
    /// `AWS_ENDPOINT_URL_SECRETS_MANAGER` overrides the regional endpoint.
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);
        let region = config
            .region
            .clone()
            .ok_or_else(|| Error::config_invalid("region is required for secrets manager"))?;
        let endpoint = ctx.env_var(AWS_ENDPOINT_URL_SECRETS_MANAGER);

        let mut client = Self::new(ctx, &region, DefaultCredentialProvider::new(config));
        if let Some(endpoint) = endpoint {
            client = client.with_endpoint(&endpoint);
        }
        Ok(client)
    }

    /// Send requests to `endpoint` instead of the regional one.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Sign every request at a fixed time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the current version of a secret.
    pub async fn get_secret(&self, secret_id: &str) -> Result<AwsSecret> {
        self.get_secret_value(GetSecretValueRequest::new(secret_id))
            .await
    }

    /// Call `GetSecretValue`.
    pub async fn get_secret_value(&self, input: GetSecretValueRequest) -> Result<AwsSecret> {
        let req = self.build_request(TARGET_GET_SECRET_VALUE, &input).await?;
        debug!("sending GetSecretValue for secret {}", input.secret_id);

        let resp = self.ctx.http_send(req).await?;
        let (parts, body) = resp.into_parts();
        if !parts.status.is_success() {
            return Err(parse_error(parts.status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| {
            Error::deserialize("failed to parse GetSecretValue response").with_source(e)
        })
    }

    /// Build a signed AWS JSON 1.1 request.
    async fn build_request(
        &self,
        target: &'static str,
        input: &impl serde::Serialize,
    ) -> Result<http::Request<Bytes>> {
        let cred = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| Error::credential_invalid("no credential found"))?;
        if !cred.is_valid() {
            return Err(Error::credential_invalid(
                "credential is empty or about to expire",
            ));
        }

        let body = serde_json::to_vec(input)
            .map_err(|e| Error::unexpected("failed to serialize request").with_source(e))?;
        // Hash the exact bytes that are sent.
        let body_hash = hex_sha256(&body);

        let uri: Uri = self.endpoint.parse()?;
        let host = uri
            .authority()
            .map(|v| v.as_str().to_string())
            .ok_or_else(|| Error::config_invalid(format!("endpoint {} has no host", self.endpoint)))?;

        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_str(&host)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_AMZ_JSON));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        headers.insert(X_AMZ_CONTENT_SHA_256, HeaderValue::from_str(&body_hash)?);
        headers.insert(
            X_AMZ_DATE,
            HeaderValue::from_str(&format_iso8601(self.time.unwrap_or_else(now)))?,
        );
        headers.insert(X_AMZ_TARGET, HeaderValue::from_static(target));
        if let Some(token) = &cred.session_token {
            let mut value = HeaderValue::from_str(token)?;
            // Set token value sensitive to valid leaking.
            value.set_sensitive(true);
            headers.insert(X_AMZ_SECURITY_TOKEN, value);
        }

        let desc = RequestDescriptor::new(Method::POST, &host, uri.path())
            .with_headers(headers)
            .with_body_hash(&body_hash);
        let signed = self.signer.signed_headers(&desc, &cred)?;

        let mut req = http::Request::post(uri).body(Bytes::from(body))?;
        *req.headers_mut() = signed;
        Ok(req)
    }
}

/// Error document of the AWS JSON protocol.
#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

fn parse_error(status: StatusCode, body: &[u8]) -> Error {
    let message = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            kind: Some(kind),
            message,
        }) => {
            // `__type` may be namespaced like `com.amazonaws.secretsmanager#ResourceNotFoundException`.
            let kind = kind.rsplit_once('#').map(|(_, v)| v).unwrap_or(kind.as_str());
            match message {
                Some(message) => format!("{kind}: {message}"),
                None => kind.to_string(),
            }
        }
        _ => format!(
            "service responded with {status}: {}",
            String::from_utf8_lossy(body)
        ),
    };

    Error::transport(Some(status), message)
}
