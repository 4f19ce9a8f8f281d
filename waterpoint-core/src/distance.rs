//! Great-circle distance between water points and its display form.

use geo::Point;

use crate::Location;

/// Mean Earth radius used for distance calculations, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two locations in kilometres.
///
/// Uses the Haversine formula on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// # Examples
/// ```
/// use waterpoint_core::{Location, haversine_distance};
///
/// let ouaga = Location::new(12.3714, -1.5197);
/// assert_eq!(haversine_distance(ouaga, ouaga), 0.0);
///
/// let bobo = Location::new(11.1771, -4.2979);
/// let km = haversine_distance(ouaga, bobo);
/// assert!((320.0..340.0).contains(&km));
/// ```
#[must_use]
pub fn haversine_distance(a: Location, b: Location) -> f64 {
    let from: Point<f64> = a.into();
    let to: Point<f64> = b.into();

    let lat_from = from.y().to_radians();
    let lat_to = to.y().to_radians();
    let half_dlat = (to.y() - from.y()).to_radians() / 2.0;
    let half_dlon = (to.x() - from.x()).to_radians() / 2.0;

    let h = half_dlon
        .sin()
        .powi(2)
        .mul_add(lat_from.cos() * lat_to.cos(), half_dlat.sin().powi(2))
        .clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Render a distance for people: metres below one kilometre, otherwise
/// kilometres with one decimal.
///
/// # Examples
/// ```
/// use waterpoint_core::format_distance;
///
/// assert_eq!(format_distance(0.54), "540 m");
/// assert_eq!(format_distance(3.26), "3.3 km");
/// ```
#[must_use]
pub fn format_distance(km: f64) -> String {
    let metres = (km * 1000.0).round();
    if metres < 1000.0 {
        format!("{metres:.0} m")
    } else {
        format!("{km:.1} km")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let km = haversine_distance(Location::new(0.0, 0.0), Location::new(1.0, 0.0));
        assert!((km - 111.195).abs() < 0.01, "got {km}");
    }

    #[rstest]
    fn antipodes_are_half_the_circumference_apart() {
        let km = haversine_distance(Location::new(0.0, 0.0), Location::new(0.0, 180.0));
        assert!((km - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[rstest]
    fn distance_is_symmetric() {
        let a = Location::new(12.3, -1.5);
        let b = Location::new(12.4, -1.6);
        assert!((haversine_distance(a, b) - haversine_distance(b, a)).abs() < 1e-12);
    }

    #[rstest]
    #[case(0.0, "0 m")]
    #[case(0.0004, "0 m")]
    #[case(0.2, "200 m")]
    #[case(0.9994, "999 m")]
    #[case(0.9996, "1.0 km")]
    #[case(1.0, "1.0 km")]
    #[case(12.34, "12.3 km")]
    fn formats_distances(#[case] km: f64, #[case] expected: &str) {
        assert_eq!(format_distance(km), expected);
    }
}
