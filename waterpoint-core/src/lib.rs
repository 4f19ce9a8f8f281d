//! Core domain types for the water point registry.
//!
//! A [`WaterPoint`] describes one physical water source: where it is, what a
//! container of water costs there, whether it works, and what people have said
//! about it. The [`store::WaterPointStore`] persists the whole collection as a
//! single blob and implements every mutation as a read-modify-write over it.
//!
//! Everything else in this crate is pure: distance and formatting helpers, list
//! filters, input validation for callers, and map deep links.

#![forbid(unsafe_code)]

pub mod browse;
pub mod clock;
pub mod distance;
#[cfg(feature = "serde")]
mod finite;
pub mod format;
pub mod location;
pub mod map_link;
mod point;
mod report;
#[cfg(feature = "serde")]
pub mod store;
pub mod test_support;
#[cfg(feature = "serde")]
mod timestamp;
pub mod validation;

pub use browse::{ParseFilterError, PointFilter, apply_filter, is_near, recent_reports};
pub use clock::{Clock, FixedClock, SystemClock};
pub use distance::{EARTH_RADIUS_KM, format_distance, haversine_distance};
pub use format::{
    format_relative_date, format_relative_date_str, rating_stars, status_color, status_label,
};
pub use location::{FixedLocation, LocationError, LocationProvider, NoLocation, locate_or_none};
pub use map_link::{MapLink, ParsePlatformError, Platform};
pub use point::{
    Location, ParseStatusError, WaterPoint, WaterPointId, WaterPointPatch, WaterPointStatus,
    mean_rating,
};
pub use report::{NewReport, Report, ReportKind};
#[cfg(feature = "serde")]
pub use store::{MemoryStorage, STORAGE_KEY, Storage, StorageError, StoreError, WaterPointStore};
#[cfg(feature = "store-file")]
pub use store::FileStorage;
#[cfg(feature = "serde")]
pub use timestamp::format_iso;
pub use validation::ValidationError;
