//! The device location collaborator.
//!
//! Distance features are optional: when no location can be obtained, callers
//! carry on with `None` instead of failing.

use log::warn;
use thiserror::Error;

use crate::Location;

/// Errors raised by a [`LocationProvider`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    /// The user declined to share their position.
    #[error("location permission was denied")]
    PermissionDenied,
    /// A position could not be determined.
    #[error("location is unavailable: {reason}")]
    Unavailable {
        /// Why the provider gave up.
        reason: String,
    },
}

/// Source of the user's current position.
pub trait LocationProvider {
    /// Return the user's current position.
    fn current_location(&self) -> Result<Location, LocationError>;
}

/// A provider that always reports the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Location);

impl LocationProvider for FixedLocation {
    fn current_location(&self) -> Result<Location, LocationError> {
        Ok(self.0)
    }
}

/// A provider for users who have not shared their position.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn current_location(&self) -> Result<Location, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

/// Ask `provider` for a position, logging and swallowing any failure.
#[must_use]
pub fn locate_or_none(provider: &dyn LocationProvider) -> Option<Location> {
    match provider.current_location() {
        Ok(location) => Some(location),
        Err(err) => {
            warn!("continuing without a user location: {err}");
            None
        }
    }
}
