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

use secretsign_core::time::{from_epoch_seconds, parse_rfc3339, DateTime};
use secretsign_core::utils::Redact;
use secretsign_core::{Error, Result};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Debug, Formatter};

/// AwsSecret is one version of a secret returned by `GetSecretValue`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AwsSecret {
    /// ARN of the secret.
    #[serde(rename = "ARN")]
    pub arn: String,
    /// Time this version was created.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_date: Option<DateTime>,
    /// Friendly name of the secret.
    pub name: String,
    /// Secret value, absent for binary secrets.
    #[serde(default)]
    pub secret_string: Option<String>,
    /// Unique identifier of this version.
    pub version_id: String,
    /// Staging labels attached to this version, e.g. `AWSCURRENT`.
    #[serde(default)]
    pub version_stages: BTreeSet<String>,
}

impl AwsSecret {
    /// Parse `SecretString` as a JSON document.
    ///
    /// Secrets created from the console store key/value pairs this way.
    pub fn secret_json<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self
            .secret_string
            .as_deref()
            .ok_or_else(|| Error::deserialize(format!("secret {} has no SecretString", self.name)))?;

        serde_json::from_str(value).map_err(|e| {
            Error::deserialize(format!("SecretString of {} is not valid JSON", self.name))
                .with_source(e)
        })
    }
}

impl Debug for AwsSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsSecret")
            .field("arn", &self.arn)
            .field("created_date", &self.created_date)
            .field("name", &self.name)
            .field("secret_string", &Redact::from(&self.secret_string))
            .field("version_id", &self.version_id)
            .field("version_stages", &self.version_stages)
            .finish()
    }
}

/// Input of `GetSecretValue`.
///
/// Without version id or stage, the `AWSCURRENT` version is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSecretValueRequest {
    /// Name or ARN of the secret.
    pub secret_id: String,
    /// Unique identifier of the version to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    /// Staging label of the version to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_stage: Option<String>,
}

impl GetSecretValueRequest {
    /// Create a request for the current version of `secret_id`.
    pub fn new(secret_id: &str) -> Self {
        Self {
            secret_id: secret_id.to_string(),
            ..Default::default()
        }
    }

    /// Fetch a specific version.
    pub fn with_version_id(mut self, version_id: &str) -> Self {
        self.version_id = Some(version_id.to_string());
        self
    }

    /// Fetch the version carrying a staging label.
    pub fn with_version_stage(mut self, version_stage: &str) -> Self {
        self.version_stage = Some(version_stage.to_string());
        self
    }
}

/// Timestamps are epoch seconds in AWS JSON 1.1, but RFC 3339 is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Epoch(f64),
    Text(String),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Timestamp>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Timestamp::Epoch(secs)) => from_epoch_seconds(secs)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("timestamp {secs} is out of range"))),
        Some(Timestamp::Text(s)) => parse_rfc3339(&s).map(Some).map_err(D::Error::custom),
    }
}
