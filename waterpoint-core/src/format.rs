//! Display helpers for statuses, ratings and timestamps.

use chrono::{DateTime, TimeDelta, Utc};

use crate::WaterPointStatus;

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';
const MAX_STARS: usize = 5;

/// Days after which relative dates give way to a calendar date.
const RELATIVE_DAYS_LIMIT: i64 = 7;

/// Hex colour for a status badge.
#[must_use]
pub const fn status_color(status: WaterPointStatus) -> &'static str {
    match status {
        WaterPointStatus::Functional => "#4CAF50",
        WaterPointStatus::Broken => "#F44336",
        WaterPointStatus::Crowded => "#FF9800",
        WaterPointStatus::Unknown => "#9E9E9E",
    }
}

/// Human-readable status label.
#[must_use]
pub const fn status_label(status: WaterPointStatus) -> &'static str {
    match status {
        WaterPointStatus::Functional => "Functional",
        WaterPointStatus::Broken => "Broken",
        WaterPointStatus::Crowded => "Crowded",
        WaterPointStatus::Unknown => "Unknown",
    }
}

/// Five stars, the first `round(rating)` of them filled.
///
/// Ratings outside `0..=5` are clamped; non-finite ratings show no stars.
///
/// # Examples
/// ```
/// use waterpoint_core::rating_stars;
///
/// assert_eq!(rating_stars(4.2), "★★★★☆");
/// assert_eq!(rating_stars(2.5), "★★★☆☆");
/// assert_eq!(rating_stars(0.0), "☆☆☆☆☆");
/// ```
#[must_use]
pub fn rating_stars(rating: f64) -> String {
    let filled = if rating.is_finite() {
        // Clamped to 0..=5 first, so the cast cannot truncate.
        rating.round().clamp(0.0, 5.0) as usize
    } else {
        0
    };
    std::iter::repeat_n(FILLED_STAR, filled)
        .chain(std::iter::repeat_n(EMPTY_STAR, MAX_STARS - filled))
        .collect()
}

/// Describe how long ago `timestamp` was, relative to `now`.
///
/// Under a minute reads "just now", then minutes, hours and days up to a week.
/// Older timestamps are shown as a calendar date. Timestamps in the future
/// also read "just now".
///
/// # Examples
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use waterpoint_core::format_relative_date;
///
/// let now = Utc.with_ymd_and_hms(2025, 12, 1, 16, 10, 0).unwrap();
/// assert_eq!(format_relative_date(now - TimeDelta::hours(2), now), "2h ago");
/// assert_eq!(format_relative_date(now - TimeDelta::days(30), now), "2025-11-01");
/// ```
#[must_use]
pub fn format_relative_date(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    if elapsed < TimeDelta::minutes(1) {
        "just now".to_owned()
    } else if elapsed < TimeDelta::hours(1) {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed < TimeDelta::days(1) {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed < TimeDelta::days(RELATIVE_DAYS_LIMIT) {
        format!("{}d ago", elapsed.num_days())
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

/// [`format_relative_date`] for a raw RFC 3339 string.
///
/// Unparseable input renders as "unknown date".
#[must_use]
pub fn format_relative_date_str(timestamp: &str, now: DateTime<Utc>) -> String {
    DateTime::parse_from_rfc3339(timestamp).map_or_else(
        |_| "unknown date".to_owned(),
        |parsed| format_relative_date(parsed.with_timezone(&Utc), now),
    )
}
