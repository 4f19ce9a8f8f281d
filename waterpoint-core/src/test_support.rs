//! Fixtures shared by unit, doc and behaviour tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::{Location, Report, ReportKind, WaterPoint, WaterPointId, WaterPointStatus};

/// The instant every fixture is created at: 2025-12-01 14:10:00 UTC.
#[must_use]
pub fn sample_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 1, 14, 10, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// A functional, unrated water point named "Pump 1" at the given position.
#[must_use]
pub fn sample_point_at(id: &str, latitude: f64, longitude: f64) -> WaterPoint {
    WaterPoint::new(
        WaterPointId::from(id),
        "Pump 1",
        "Gounghin",
        25,
        WaterPointStatus::Functional,
        Location::new(latitude, longitude),
        sample_time(),
    )
}

/// [`sample_point_at`] in central Ouagadougou.
#[must_use]
pub fn sample_point(id: &str) -> WaterPoint {
    sample_point_at(id, 12.3, -1.5)
}

/// An outage report with the given description.
#[must_use]
pub fn sample_report(description: &str, date: DateTime<Utc>) -> Report {
    Report {
        kind: ReportKind::Outage,
        description: description.to_owned(),
        date,
    }
}
