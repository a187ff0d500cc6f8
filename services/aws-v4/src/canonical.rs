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

//! Canonical request construction.
//!
//! ```text
//! METHOD
//! canonical-uri
//! canonical-query-string
//! canonical-headers
//!
//! signed-headers
//! hashed-payload
//! ```
//!
//! Reference: [Create a canonical request](https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html#create-canonical-request)

use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET};
use crate::request::RequestDescriptor;
use http::HeaderMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use secretsign_core::{Error, Result};
use std::fmt::Write;

/// Encode path with the AWS unreserved set, keeping `/` as separator.
///
/// The path is decoded first so already encoded input is not encoded twice.
pub fn canonical_uri(path: &str) -> Result<String> {
    if path.is_empty() {
        return Ok("/".to_string());
    }

    let path = percent_decode_str(path)
        .decode_utf8()
        .map_err(|e| Error::request_invalid("path is not valid utf-8").with_source(e))?;
    Ok(utf8_percent_encode(&path, &AWS_URI_ENCODE_SET).to_string())
}

/// Encode and sort query parameters, joined as `k=v&k=v`.
///
/// Pairs are sorted byte-wise by encoded name and then encoded value. A
/// parameter without value is still emitted as `k=`.
pub fn canonical_query_string(query: &[(String, String)]) -> String {
    let mut pairs = query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Lower-cased header names, sorted.
pub fn signed_header_names(headers: &HeaderMap) -> Vec<String> {
    // HeaderName is always lower-cased.
    let mut names = headers
        .keys()
        .map(|k| k.as_str().to_string())
        .collect::<Vec<_>>();
    names.sort_unstable();
    names
}

/// One `name:value\n` line per signed header.
///
/// Values are trimmed at both ends. Repeated headers are joined with `,`.
pub fn canonical_headers(headers: &HeaderMap, signed: &[String]) -> Result<String> {
    let mut f = String::with_capacity(128);

    for name in signed {
        let mut values = headers.get_all(name.as_str()).iter().peekable();
        if values.peek().is_none() {
            return Err(Error::header_missing(format!(
                "header {name} is signed but not present"
            )));
        }

        let value = values
            .map(|v| v.to_str().map(str::trim))
            .collect::<std::result::Result<Vec<_>, _>>()?
            .join(",");
        writeln!(f, "{name}:{value}")?;
    }

    Ok(f)
}

/// Build the canonical request for `req` with the given signed header names.
pub fn canonical_request(req: &RequestDescriptor, signed: &[String]) -> Result<String> {
    let headers = req.signing_headers()?;

    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);
    writeln!(f, "{}", req.method)?;
    writeln!(f, "{}", canonical_uri(&req.path)?)?;
    writeln!(f, "{}", canonical_query_string(&req.query))?;
    // Header lines already end with a newline, this is the blank separator.
    writeln!(f, "{}", canonical_headers(&headers, signed)?)?;
    writeln!(f, "{}", signed.join(";"))?;
    write!(f, "{}", req.body_hash)?;

    Ok(f)
}
