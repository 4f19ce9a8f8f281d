//! Serde adapter for record timestamps.
//!
//! Timestamps are stored as RFC 3339 UTC strings with millisecond precision,
//! e.g. `2025-12-01T14:10:00.000Z`. Any RFC 3339 offset is accepted on load.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Render a timestamp the way it is persisted.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use waterpoint_core::format_iso;
///
/// let at = Utc.with_ymd_and_hms(2025, 12, 1, 14, 10, 0).unwrap();
/// assert_eq!(format_iso(&at), "2025-12-01T14:10:00.000Z");
/// ```
#[must_use]
pub fn format_iso(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_iso(value))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
