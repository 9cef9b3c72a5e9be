// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timestamp conventions.
//!
//! All stored timestamps are UTC RFC 3339 strings with exactly six fractional
//! digits, so lexical order equals chronological order. Calendar days are UTC.

use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};

/// Current time truncated to microsecond precision.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

/// Formats a timestamp in the stored representation.
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// The UTC calendar date as `YYYY-MM-DD`.
pub fn date_key(ts: &DateTime<Utc>) -> String {
    ts.date_naive().format("%Y-%m-%d").to_string()
}

/// Midnight UTC of the day containing `ts`.
pub fn start_of_day(ts: &DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Serde adapter writing timestamps in the stored representation.
pub mod micros {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
