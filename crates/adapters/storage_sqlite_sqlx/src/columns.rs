//! Column encodings shared by the repositories.
//!
//! Identifiers are stored as hyphenated UUID text, timestamps as RFC 3339 UTC
//! text with a fixed microsecond precision so that lexical order matches
//! chronological order.

use std::str::FromStr;

use chrono::SecondsFormat;

use airserv_domain::time::Timestamp;

pub(crate) fn encode_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Parse a text column with the type's `FromStr` implementation.
pub(crate) fn decode<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
