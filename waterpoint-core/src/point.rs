use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use geo::Point;
use thiserror::Error;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::report::Report;
use crate::validation::ValidationError;

/// Opaque identifier of a water point.
///
/// Identifiers are generated once at creation and never change. The store does
/// not check uniqueness; [`WaterPointId::generate`] relies on random UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct WaterPointId(String);

impl WaterPointId {
    /// Generate a fresh random identifier.
    ///
    /// # Examples
    /// ```
    /// use waterpoint_core::WaterPointId;
    ///
    /// assert_ne!(WaterPointId::generate(), WaterPointId::generate());
    /// ```
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WaterPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WaterPointId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for WaterPointId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for WaterPointId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// WGS84 position of a water point, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Degrees north of the equator.
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::finite::serialize"))]
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::finite::serialize"))]
    pub longitude: f64,
}

impl Location {
    /// Construct a location without range checks.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct a location, rejecting coordinates outside the WGS84 ranges.
    ///
    /// # Examples
    /// ```
    /// use waterpoint_core::Location;
    ///
    /// assert!(Location::checked(12.37, -1.53).is_ok());
    /// assert!(Location::checked(95.0, 0.0).is_err());
    /// ```
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self::new(latitude, longitude))
    }
}

// `x = longitude`, `y = latitude`, matching the `geo` convention.
impl From<Location> for Point<f64> {
    fn from(location: Location) -> Self {
        Self::new(location.longitude, location.latitude)
    }
}

impl From<Point<f64>> for Location {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

/// Operational state of a water point.
///
/// Stored as lowercase text. Values this version does not recognise load as
/// [`WaterPointStatus::Unknown`] rather than failing the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum WaterPointStatus {
    /// Water is available.
    Functional,
    /// Out of service.
    Broken,
    /// Working, with a long queue.
    Crowded,
    /// Nobody has said.
    #[default]
    Unknown,
}

impl WaterPointStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [Self::Functional, Self::Broken, Self::Crowded, Self::Unknown];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::Broken => "broken",
            Self::Crowded => "crowded",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WaterPointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for WaterPointStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<WaterPointStatus> for String {
    fn from(status: WaterPointStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// Error returned when text does not name a [`WaterPointStatus`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown water point status {0:?} (expected functional, broken, crowded or unknown)")]
pub struct ParseStatusError(String);

impl FromStr for WaterPointStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseStatusError(s.to_owned()))
    }
}

/// One physical water source and everything reported about it.
///
/// `rating` is the arithmetic mean of `ratings` and is `0.0` while nobody has
/// rated the point. `ratings` and `reports` only ever grow, in submission
/// order.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use waterpoint_core::{Location, WaterPoint, WaterPointId, WaterPointStatus};
///
/// let created = Utc.with_ymd_and_hms(2025, 12, 1, 14, 10, 0).unwrap();
/// let point = WaterPoint::new(
///     WaterPointId::from("1"),
///     "Pump1",
///     "Gounghin",
///     25,
///     WaterPointStatus::Functional,
///     Location::new(12.3, -1.5),
///     created,
/// );
///
/// assert_eq!(point.rating, 0.0);
/// assert!(point.reports.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct WaterPoint {
    /// Immutable identifier.
    pub id: WaterPointId,
    /// Display name.
    pub name: String,
    /// Neighbourhood label.
    pub district: String,
    /// Price of one 20 L container in local currency.
    pub price: u32,
    /// Current operational state.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: WaterPointStatus,
    /// Where the water point is.
    pub location: Location,
    /// Mean of `ratings`.
    #[cfg_attr(
        feature = "serde",
        serde(default, serialize_with = "crate::finite::serialize")
    )]
    pub rating: f64,
    /// Individual 1–5 ratings in submission order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ratings: Vec<u8>,
    /// Incident reports in submission order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reports: Vec<Report>,
    /// Time of the last edit, assigned by the store.
    #[cfg_attr(feature = "serde", serde(with = "crate::timestamp"))]
    pub last_update: DateTime<Utc>,
}

impl WaterPoint {
    /// Construct an unrated water point with no reports.
    #[must_use]
    pub fn new(
        id: WaterPointId,
        name: impl Into<String>,
        district: impl Into<String>,
        price: u32,
        status: WaterPointStatus,
        location: Location,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            district: district.into(),
            price,
            status,
            location,
            rating: 0.0,
            ratings: Vec::new(),
            reports: Vec::new(),
            last_update: created_at,
        }
    }

    /// Append a rating and refresh `rating` to the new mean.
    pub fn push_rating(&mut self, value: u8) {
        self.ratings.push(value);
        self.rating = mean_rating(&self.ratings);
    }
}

/// Arithmetic mean of `ratings`, or `0.0` when empty.
///
/// # Examples
/// ```
/// use waterpoint_core::mean_rating;
///
/// assert_eq!(mean_rating(&[4, 2]), 3.0);
/// assert_eq!(mean_rating(&[]), 0.0);
/// ```
#[must_use]
pub fn mean_rating(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let total: u32 = ratings.iter().copied().map(u32::from).sum();
    f64::from(total) / ratings.len() as f64
}

/// Field-level overwrite applied by [`crate::WaterPointStore::update_by_id`].
///
/// `None` leaves the field untouched. The identifier and `last_update` are not
/// patchable; the store sets `last_update` itself. Nothing here keeps `rating`
/// consistent with `ratings`, so callers patching one should patch both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterPointPatch {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement district.
    pub district: Option<String>,
    /// Replacement price.
    pub price: Option<u32>,
    /// Replacement status.
    pub status: Option<WaterPointStatus>,
    /// Replacement location.
    pub location: Option<Location>,
    /// Replacement mean rating.
    pub rating: Option<f64>,
    /// Replacement rating history.
    pub ratings: Option<Vec<u8>>,
    /// Replacement report history.
    pub reports: Option<Vec<Report>>,
}

impl WaterPointPatch {
    /// A patch that only changes the status.
    #[must_use]
    pub fn status(status: WaterPointStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Whether applying the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.district.is_none()
            && self.price.is_none()
            && self.status.is_none()
            && self.location.is_none()
            && self.rating.is_none()
            && self.ratings.is_none()
            && self.reports.is_none()
    }

    /// Overwrite every field present in the patch.
    pub fn apply_to(self, point: &mut WaterPoint) {
        if let Some(name) = self.name {
            point.name = name;
        }
        if let Some(district) = self.district {
            point.district = district;
        }
        if let Some(price) = self.price {
            point.price = price;
        }
        if let Some(status) = self.status {
            point.status = status;
        }
        if let Some(location) = self.location {
            point.location = location;
        }
        if let Some(rating) = self.rating {
            point.rating = rating;
        }
        if let Some(ratings) = self.ratings {
            point.ratings = ratings;
        }
        if let Some(reports) = self.reports {
            point.reports = reports;
        }
    }
}
