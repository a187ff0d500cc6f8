//! Worked examples published in the AWS SigV4 documentation and test suite.

use super::*;
use http::Method;
use pretty_assertions::assert_eq;
use secretsign_aws_v4::canonical::{canonical_request, signed_header_names};
use secretsign_aws_v4::{generate_signing_key, CredentialScope, RequestDescriptor, RequestSigner};
use secretsign_core::hash::{hex_encode, hex_sha256};

#[test]
fn test_signing_key_20120215() {
    let scope = CredentialScope::new("20120215", "us-east-1", "iam").expect("scope must be valid");
    let key = generate_signing_key(SECRET_KEY, &scope).expect("key must be derived");

    assert_eq!(
        hex_encode(key.as_bytes()),
        "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
    );
}

#[test]
fn test_iam_list_users() {
    init();

    let req = RequestDescriptor::new(Method::GET, "iam.amazonaws.com", "/")
        .with_query_string("Action=ListUsers&Version=2010-05-08")
        .with_headers(headers(&[
            (
                "Content-Type",
                "application/x-www-form-urlencoded; charset=utf-8",
            ),
            ("X-Amz-Date", "20150830T123600Z"),
        ]))
        .with_body_hash(EMPTY_BODY_HASH);

    let signing_headers = req.signing_headers().expect("headers must be valid");
    let signed = signed_header_names(&signing_headers);
    assert_eq!(signed, vec!["content-type", "host", "x-amz-date"]);

    let creq = canonical_request(&req, &signed).expect("canonical request must build");
    assert_eq!(
        hex_sha256(creq.as_bytes()),
        "f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59"
    );

    let result = RequestSigner::new("iam", "us-east-1")
        .sign(&req, &example_credential())
        .expect("signing must succeed");
    assert_eq!(result.scope.to_string(), "20150830/us-east-1/iam/aws4_request");
    assert_eq!(
        result.signature,
        "5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
    );
}

#[test]
fn test_get_vanilla() {
    init();

    let (parts, _) = http::Request::get("https://example.amazonaws.com/")
        .header("X-Amz-Date", "20150830T123600Z")
        .body(())
        .expect("request must be valid")
        .into_parts();
    let req = RequestDescriptor::from_parts(&parts, EMPTY_BODY_HASH);

    let signed = RequestSigner::new("service", "us-east-1")
        .signed_headers(&req, &example_credential())
        .expect("signing must succeed");

    assert_eq!(
        signed[http::header::AUTHORIZATION],
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, SignedHeaders=host;x-amz-date, Signature=5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
    );
}
