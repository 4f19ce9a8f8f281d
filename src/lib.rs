//! Facade crate for the water point registry.
//!
//! This crate re-exports the core domain types and exposes the persistent
//! store and its storage backends behind feature flags.

#![forbid(unsafe_code)]

pub use waterpoint_core::{
    Clock, FixedClock, FixedLocation, Location, LocationError, LocationProvider, MapLink,
    NewReport, NoLocation, Platform, PointFilter, Report, ReportKind, SystemClock,
    ValidationError, WaterPoint, WaterPointId, WaterPointPatch, WaterPointStatus, apply_filter,
    format_distance, format_relative_date, haversine_distance, is_near, locate_or_none,
    rating_stars, recent_reports, status_color, status_label,
};

#[cfg(feature = "serde")]
pub use waterpoint_core::{
    MemoryStorage, Storage, StorageError, StoreError, WaterPointStore, format_iso,
};

#[cfg(feature = "store-file")]
pub use waterpoint_core::FileStorage;
