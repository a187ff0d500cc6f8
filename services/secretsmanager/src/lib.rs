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

//! AWS Secrets Manager client signed with SigV4.
//!
//! ## Example
//!
//! ```no_run
//! use secretsign_aws_v4::Config;
//! use secretsign_core::{Context, OsEnv};
//! use secretsign_http_send_reqwest::ReqwestHttpSend;
//! use secretsign_secretsmanager::SecretsManagerClient;
//!
//! # async fn example() -> secretsign_core::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//!
//! // Region and keys are read from `AWS_REGION`, `AWS_ACCESS_KEY_ID` and friends.
//! let client = SecretsManagerClient::from_config(ctx, Config::default())?;
//! let secret = client.get_secret("my-secret").await?;
//! println!("{} has stages {:?}", secret.name, secret.version_stages);
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::*;

mod secret;
pub use secret::{AwsSecret, GetSecretValueRequest};

mod client;
pub use client::SecretsManagerClient;
