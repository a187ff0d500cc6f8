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

//! Time related utils.

use chrono::NaiveDateTime;
use chrono::Utc;

use crate::Error;
use crate::Result;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Date format: "20220313"
const DATE: &str = "%Y%m%d";

/// Time format for ISO 8601 basic: "20220313T072004Z"
const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: `20220301`
pub fn format_date(t: DateTime) -> String {
    t.format(DATE).to_string()
}

/// Format time into ISO 8601 basic: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Parse time from ISO 8601 basic: `20220313T072004Z`
pub fn parse_iso8601(s: &str) -> Result<DateTime> {
    NaiveDateTime::parse_from_str(s, ISO8601)
        .map(|t| t.and_utc())
        .map_err(|e| {
            Error::request_invalid(format!("'{s}' is not an ISO 8601 basic timestamp"))
                .with_source(e)
        })
}

/// Parse time from RFC 3339: `2022-03-13T07:20:04Z`
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            Error::deserialize(format!("'{s}' is not an RFC 3339 timestamp")).with_source(e)
        })
}

/// Build time from seconds (with fraction) since unix epoch.
///
/// Returns `None` if the value is out of range.
pub fn from_epoch_seconds(secs: f64) -> Option<DateTime> {
    if !secs.is_finite() {
        return None;
    }

    let millis = (secs * 1000.0).round() as i64;
    chrono::DateTime::from_timestamp_millis(millis)
}
