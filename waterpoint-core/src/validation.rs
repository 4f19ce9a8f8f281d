//! Input checks run by callers before they reach the store.
//!
//! The store accepts whatever it is given. Front ends turn raw user input into
//! domain values here, so a blank name or a zero price never gets persisted.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{Location, NewReport, ReportKind, WaterPoint, WaterPointId, WaterPointStatus};

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// Reasons user input is rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace.
    #[error("{field} is required")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },
    /// The price was not a positive whole number.
    #[error("price {value:?} is not a positive whole number")]
    InvalidPrice {
        /// The rejected input.
        value: String,
    },
    /// No location was available for a new water point.
    #[error("a location is required")]
    MissingLocation,
    /// Coordinates fell outside the WGS84 ranges.
    #[error("coordinates ({latitude}, {longitude}) are out of range")]
    InvalidCoordinate {
        /// Rejected latitude.
        latitude: f64,
        /// Rejected longitude.
        longitude: f64,
    },
    /// A rating fell outside `1..=5`.
    #[error("rating {value} is outside 1..=5")]
    RatingOutOfRange {
        /// The rejected rating.
        value: u8,
    },
}

/// Trim `value` and reject it if nothing is left.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

/// Parse a price typed by a user.
///
/// # Examples
/// ```
/// use waterpoint_core::validation::parse_price;
///
/// assert_eq!(parse_price(" 25 "), Ok(25));
/// assert!(parse_price("0").is_err());
/// assert!(parse_price("cheap").is_err());
/// ```
pub fn parse_price(value: &str) -> Result<u32, ValidationError> {
    match value.trim().parse::<u32>() {
        Ok(price) if price > 0 => Ok(price),
        _ => Err(ValidationError::InvalidPrice {
            value: value.to_owned(),
        }),
    }
}

/// Accept a rating only if it lies in `1..=5`.
pub const fn validate_rating(value: u8) -> Result<u8, ValidationError> {
    if value < MIN_RATING || value > MAX_RATING {
        return Err(ValidationError::RatingOutOfRange { value });
    }
    Ok(value)
}

/// Build a report from user input, requiring a description.
pub fn validate_report(kind: ReportKind, description: &str) -> Result<NewReport, ValidationError> {
    Ok(NewReport {
        kind,
        description: require_text("description", description)?,
    })
}

/// Raw input for a new water point, as a form would collect it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterPointDraft {
    /// Display name.
    pub name: String,
    /// Neighbourhood label.
    pub district: String,
    /// Price as typed.
    pub price: String,
    /// Initial status.
    pub status: WaterPointStatus,
    /// Position, if one could be determined.
    pub location: Option<Location>,
}

impl WaterPointDraft {
    /// Check the draft and mint a new, unrated water point.
    ///
    /// Fields are checked in form order: name, district, price, location.
    pub fn validate(self, now: DateTime<Utc>) -> Result<WaterPoint, ValidationError> {
        let name = require_text("name", &self.name)?;
        let district = require_text("district", &self.district)?;
        require_text("price", &self.price)?;
        let price = parse_price(&self.price)?;
        let location = self.location.ok_or(ValidationError::MissingLocation)?;
        Ok(WaterPoint::new(
            WaterPointId::generate(),
            name,
            district,
            price,
            self.status,
            location,
            now,
        ))
    }
}
