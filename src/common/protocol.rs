// Copyright 2018 Dmitry Tantsur <divius.inside@gmail.com>
// Copyright 2026 The mos-tests Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Common protocol bits.

#![allow(missing_docs)]

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::de::Error as DeserError;
use serde::Deserializer;

#[derive(Clone, Debug, Deserialize)]
pub struct Ref {
    pub id: String,
}

/// Parse a timestamp with or without a time zone.
///
/// Naive timestamps are assumed to be in UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Deserialize an optional timestamp.
///
/// Some services omit the time zone, which `DateTime` does not accept.
pub fn deser_optional_timestamp<'de, D>(
    des: D,
) -> ::std::result::Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(des)?;
    match value {
        Some(ref s) if s.is_empty() => Ok(None),
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| DeserError::custom(format!("invalid timestamp {}", s))),
        None => Ok(None),
    }
}

/// Current time as a `DateTime` with a fixed offset.
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}
