use http::{HeaderMap, HeaderName, HeaderValue};
use secretsign_aws_v4::Credential;

mod properties;
mod vectors;

pub const ACCESS_KEY: &str = "AKIDEXAMPLE";
pub const SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";
pub const EMPTY_BODY_HASH: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (k, v) in pairs {
        map.append(
            HeaderName::from_bytes(k.as_bytes()).expect("header name must be valid"),
            HeaderValue::from_str(v).expect("header value must be valid"),
        );
    }
    map
}

pub fn example_credential() -> Credential {
    Credential::new(ACCESS_KEY, SECRET_KEY)
}

pub fn signature_of(authorization: &str) -> &str {
    authorization
        .rsplit_once("Signature=")
        .map(|(_, v)| v)
        .expect("authorization must carry a signature")
}
