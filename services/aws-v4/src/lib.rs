//! AWS SigV4 request signing.
//!
//! This crate turns a [`RequestDescriptor`] into signed headers following the
//! [Signature Version 4](https://docs.aws.amazon.com/IAM/latest/UserGuide/reference_sigv.html)
//! process.
//!
//! ## Quick Start
//!
//! ```
//! use http::{HeaderMap, HeaderValue};
//! use secretsign_aws_v4::RequestSigner;
//! use secretsign_core::hash::hex_sha256;
//!
//! # fn main() -> secretsign_core::Result<()> {
//! let body = br#"{"SecretId":"my-secret"}"#;
//! let body_hash = hex_sha256(body);
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("host", HeaderValue::from_static("secretsmanager.us-east-1.amazonaws.com"));
//! headers.insert("x-amz-date", HeaderValue::from_static("20150830T123600Z"));
//! headers.insert("x-amz-content-sha256", HeaderValue::from_str(&body_hash)?);
//!
//! let signer = RequestSigner::new("secretsmanager", "us-east-1");
//! let authorization = signer.compute_signature(
//!     &headers,
//!     "",
//!     &body_hash,
//!     "AKIDEXAMPLE",
//!     "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
//! )?;
//! assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential Sources
//!
//! Credentials are loaded by [`DefaultCredentialProvider`]:
//!
//! 1. Keys set on [`Config`]
//! 2. `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `AWS_SESSION_TOKEN`
//!
//! Use [`ProvideCredentialChain`] to build a custom order.

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod request;
pub use request::RequestDescriptor;

pub mod canonical;

mod key;
pub use key::{generate_signing_key, CredentialScope, SigningKey};

mod sign_request;
pub use sign_request::{RequestSigner, SignatureResult};

mod provide_credential;
pub use provide_credential::*;
