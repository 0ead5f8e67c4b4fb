//! Great-circle distance helpers.

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two latitude/longitude pairs, in kilometers.
///
/// Inputs are degrees. NaN inputs propagate to a NaN result.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Returns whether both coordinates are finite.
pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    lat.is_finite() && lng.is_finite()
}

#[cfg(test)]
mod tests {
    use super::{distance_km, is_valid_coordinate};

    #[test]
    fn same_point_is_zero() {
        assert_eq!(distance_km(45.0, 15.0, 45.0, 15.0), 0.0);
    }

    #[test]
    fn berlin_to_paris_is_about_878_km() {
        let d = distance_km(52.5200, 13.4050, 48.8566, 2.3522);
        assert!((d - 878.0).abs() < 5.0, "unexpected distance {d}");
    }

    #[test]
    fn small_offset_on_equator() {
        let d = distance_km(0.0, 0.0, 0.0, 0.001);
        assert!((d - 0.111).abs() < 0.001, "unexpected distance {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = distance_km(10.0, 10.0, -33.9, 151.2);
        let backward = distance_km(-33.9, 151.2, 10.0, 10.0);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(is_valid_coordinate(0.0, 0.0));
        assert!(!is_valid_coordinate(f64::NAN, 0.0));
        assert!(!is_valid_coordinate(0.0, f64::INFINITY));
    }
}
