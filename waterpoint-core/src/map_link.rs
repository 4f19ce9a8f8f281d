//! Deep links handing a water point over to an external map application.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::WaterPoint;

/// Platform whose map application should open the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Platform {
    /// Apple Maps via the `maps:` scheme.
    Ios,
    /// Any handler of the `geo:` scheme.
    Android,
    /// A browser.
    #[default]
    Web,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Web => "web",
        })
    }
}

/// Error returned when text does not name a [`Platform`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown platform {0:?} (expected ios, android or web)")]
pub struct ParsePlatformError(String);

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "web" => Ok(Self::Web),
            _ => Err(ParsePlatformError(s.to_owned())),
        }
    }
}

/// A link to open first and the web page to fall back to if nothing handles it.
///
/// Opening the link is the caller's business; nothing waits for a result.
///
/// # Examples
/// ```
/// use waterpoint_core::{MapLink, Platform, test_support::sample_point_at};
///
/// let point = sample_point_at("1", 12.3, -1.5);
/// let link = MapLink::for_point(&point, Platform::Android);
/// assert_eq!(link.primary, "geo:12.3,-1.5?q=12.3,-1.5(Pump%201)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLink {
    /// Platform-specific URI.
    pub primary: String,
    /// Browser URL that works everywhere.
    pub fallback: String,
}

impl MapLink {
    /// Build the links for `point` on `platform`.
    #[must_use]
    pub fn for_point(point: &WaterPoint, platform: Platform) -> Self {
        let latitude = point.location.latitude;
        let longitude = point.location.longitude;
        let label = urlencoding::encode(&point.name);
        let fallback =
            format!("https://www.google.com/maps/search/?api=1&query={latitude},{longitude}");
        let primary = match platform {
            Platform::Ios => format!("maps://app?daddr={latitude},{longitude}&q={label}"),
            Platform::Android => {
                format!("geo:{latitude},{longitude}?q={latitude},{longitude}({label})")
            }
            Platform::Web => fallback.clone(),
        };
        Self { primary, fallback }
    }
}
