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

use http::header::HOST;
use http::{HeaderMap, HeaderValue, Method};
use secretsign_core::hash::hex_sha256;
use secretsign_core::Result;
use std::borrow::Cow;

/// RequestDescriptor is the in-memory description of a request to sign.
///
/// It is never mutated by signing: the signer reads it and hands back a new
/// header set.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Host the request is sent to, e.g. `secretsmanager.us-east-1.amazonaws.com`.
    pub host: String,
    /// Raw request path, may be percent encoded.
    pub path: String,
    /// Decoded query parameters in their original order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Hex encoded SHA-256 of the body bytes as transmitted.
    pub body_hash: String,
}

impl RequestDescriptor {
    /// Create a descriptor without query, headers or body.
    pub fn new(method: Method, host: &str, path: &str) -> Self {
        Self {
            method,
            host: host.to_string(),
            path: path.to_string(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body_hash: hex_sha256(b""),
        }
    }

    /// Replace the query with the pairs parsed from `a=b&c`.
    pub fn with_query_string(mut self, query: &str) -> Self {
        self.query = parse_query(query);
        self
    }

    /// Replace the headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set the hex encoded body hash.
    pub fn with_body_hash(mut self, body_hash: &str) -> Self {
        self.body_hash = body_hash.to_string();
        self
    }

    /// Build a descriptor from http::request::Parts.
    pub fn from_parts(parts: &http::request::Parts, body_hash: &str) -> Self {
        let host = parts
            .uri
            .authority()
            .map(|v| v.as_str().to_string())
            .unwrap_or_default();

        Self {
            method: parts.method.clone(),
            host,
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(parse_query).unwrap_or_default(),
            headers: parts.headers.clone(),
            body_hash: body_hash.to_string(),
        }
    }

    /// Headers that take part in signing.
    ///
    /// `host` is always signed: it's added from [`RequestDescriptor::host`]
    /// when the header map doesn't carry it.
    pub fn signing_headers(&self) -> Result<Cow<'_, HeaderMap>> {
        if self.headers.contains_key(HOST) || self.host.is_empty() {
            return Ok(Cow::Borrowed(&self.headers));
        }

        let mut headers = self.headers.clone();
        headers.insert(HOST, HeaderValue::from_str(&self.host)?);
        Ok(Cow::Owned(headers))
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
