use super::*;
use pretty_assertions::assert_eq;
use secretsign_aws_v4::RequestSigner;
use secretsign_core::hash::hex_sha256;
use secretsign_core::ErrorKind;

fn secret_headers(body: &[u8]) -> HeaderMap {
    let content_length = body.len().to_string();
    let body_hash = hex_sha256(body);

    headers(&[
        ("Host", "secretsmanager.us-east-1.amazonaws.com"),
        ("Content-Type", "application/x-amz-json-1.1"),
        ("Content-Length", content_length.as_str()),
        ("X-Amz-Content-Sha256", body_hash.as_str()),
        ("X-Amz-Date", "20150830T123600Z"),
        ("X-Amz-Target", "secretsmanager.GetSecretValue"),
    ])
}

fn sign(body: &[u8], access_key: &str, secret_key: &str) -> secretsign_core::Result<String> {
    RequestSigner::new("secretsmanager", "us-east-1").compute_signature(
        &secret_headers(body),
        "",
        &hex_sha256(body),
        access_key,
        secret_key,
    )
}

#[test]
fn test_get_secret_value_authorization() {
    init();

    let auth = sign(br#"{"SecretId":"my-secret"}"#, ACCESS_KEY, SECRET_KEY)
        .expect("signing must succeed");
    assert_eq!(
        auth,
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/secretsmanager/aws4_request, SignedHeaders=content-length;content-type;host;x-amz-content-sha256;x-amz-date;x-amz-target, Signature=009b2961f65d2206335fdfa394c88c734b3a12bbf99b8a551c283e906af80914"
    );
}

#[test]
fn test_single_body_byte_changes_signature() {
    let a = sign(br#"{"SecretId":"my-secret"}"#, ACCESS_KEY, SECRET_KEY)
        .expect("signing must succeed");
    let b = sign(br#"{"SecretId":"my-secreT"}"#, ACCESS_KEY, SECRET_KEY)
        .expect("signing must succeed");

    assert_ne!(signature_of(&a), signature_of(&b));
}

#[test]
fn test_concurrent_signing_is_consistent() {
    let expected = sign(br#"{"SecretId":"my-secret"}"#, ACCESS_KEY, SECRET_KEY)
        .expect("signing must succeed");

    let handles = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                sign(br#"{"SecretId":"my-secret"}"#, ACCESS_KEY, SECRET_KEY)
                    .expect("signing must succeed")
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert_eq!(handle.join().expect("thread must not panic"), expected);
    }
}

#[test]
fn test_signing_errors_carry_no_status() {
    let err = sign(b"{}", "", SECRET_KEY).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    assert!(err.status().is_none());
    assert!(!err.is_retryable());
}
