//! Client-side views over a snapshot of the collection.
//!
//! Nothing here touches the store: callers pass the points they listed and get
//! a reordered or filtered copy back.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Location, Report, WaterPoint, WaterPointStatus, haversine_distance};

/// Radius within which a water point counts as "near" the user, in kilometres.
pub const NEARBY_THRESHOLD_KM: f64 = 0.2;

/// Number of reports a detail view shows.
pub const RECENT_REPORTS: usize = 3;

/// How a list of water points is narrowed or ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PointFilter {
    /// Storage order, unfiltered.
    #[default]
    All,
    /// Closest first, when the user's location is known.
    Nearby,
    /// Cheapest first.
    Cheap,
    /// Only functional points.
    Functional,
}

impl PointFilter {
    const ALL: [Self; 4] = [Self::All, Self::Nearby, Self::Cheap, Self::Functional];

    const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Nearby => "nearby",
            Self::Cheap => "cheap",
            Self::Functional => "functional",
        }
    }
}

impl fmt::Display for PointFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a [`PointFilter`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown filter {0:?} (expected all, nearby, cheap or functional)")]
pub struct ParseFilterError(String);

impl FromStr for PointFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFilterError(s.to_owned()))
    }
}

/// Apply `filter` to a snapshot of the collection.
///
/// Sorting is stable, so ties keep storage order. [`PointFilter::Nearby`]
/// without a user location leaves the order unchanged.
///
/// # Examples
/// ```
/// use waterpoint_core::{PointFilter, apply_filter, test_support::sample_point_at};
///
/// let far = sample_point_at("far", 12.5, -1.5);
/// let near = sample_point_at("near", 12.31, -1.5);
/// let user = waterpoint_core::Location::new(12.3, -1.5);
///
/// let sorted = apply_filter(&[far, near], PointFilter::Nearby, Some(user));
/// assert_eq!(sorted[0].id.as_str(), "near");
/// ```
#[must_use]
pub fn apply_filter(
    points: &[WaterPoint],
    filter: PointFilter,
    user_location: Option<Location>,
) -> Vec<WaterPoint> {
    let mut view = points.to_vec();
    match (filter, user_location) {
        (PointFilter::All, _) | (PointFilter::Nearby, None) => {}
        (PointFilter::Nearby, Some(user)) => view.sort_by(|a, b| {
            haversine_distance(a.location, user).total_cmp(&haversine_distance(b.location, user))
        }),
        (PointFilter::Cheap, _) => view.sort_by_key(|point| point.price),
        (PointFilter::Functional, _) => {
            view.retain(|point| point.status == WaterPointStatus::Functional);
        }
    }
    view
}

/// Whether `point` lies within [`NEARBY_THRESHOLD_KM`] of the user.
#[must_use]
pub fn is_near(point: &WaterPoint, user_location: Location) -> bool {
    haversine_distance(point.location, user_location) <= NEARBY_THRESHOLD_KM
}

/// The last `count` reports of `point`, oldest first.
///
/// This borrows a suffix of the history; views that want newest first should
/// iterate it in reverse rather than reorder the record.
#[must_use]
pub fn recent_reports(point: &WaterPoint, count: usize) -> &[Report] {
    let start = point.reports.len().saturating_sub(count);
    point.reports.get(start..).unwrap_or_default()
}
