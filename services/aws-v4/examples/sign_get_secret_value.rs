//! Sign a GetSecretValue request without sending it.

use http::{HeaderMap, HeaderValue, Method};
use secretsign_aws_v4::{
    RequestDescriptor, RequestSigner, StaticCredentialProvider, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE,
    X_AMZ_TARGET,
};
use secretsign_core::hash::hex_sha256;
use secretsign_core::time::{format_iso8601, now};
use secretsign_core::{Context, ProvideCredential};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let region = "us-east-1";
    let host = format!("secretsmanager.{region}.amazonaws.com");
    let body = br#"{"SecretId":"my-secret"}"#;
    let body_hash = hex_sha256(body);

    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static("application/x-amz-json-1.1"),
    );
    headers.insert(http::header::CONTENT_LENGTH, HeaderValue::from(body.len()));
    headers.insert(X_AMZ_CONTENT_SHA_256, HeaderValue::from_str(&body_hash)?);
    headers.insert(X_AMZ_DATE, HeaderValue::from_str(&format_iso8601(now()))?);
    headers.insert(
        X_AMZ_TARGET,
        HeaderValue::from_static("secretsmanager.GetSecretValue"),
    );

    let req = RequestDescriptor::new(Method::POST, &host, "/")
        .with_headers(headers)
        .with_body_hash(&body_hash);

    let provider = StaticCredentialProvider::new(
        "AKIDEXAMPLE",
        "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
    );
    let cred = provider
        .provide_credential(&Context::new())
        .await?
        .ok_or_else(|| anyhow::anyhow!("no credential"))?;

    let signed = RequestSigner::new("secretsmanager", region).signed_headers(&req, &cred)?;
    for (name, value) in &signed {
        println!("{name}: {}", value.to_str()?);
    }

    Ok(())
}
