//! Great-circle distance.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points given in degrees.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = distance_km(0.0, 0.0, 0.0, 1.0);
        // ~111.19 km, within 0.5%
        assert!((d - 111.19).abs() / 111.19 < 0.005, "got {}", d);
    }

    #[test]
    fn test_zero_distance_for_identical_points() {
        assert_eq!(distance_km(40.7, -74.0, 40.7, -74.0), 0.0);
        assert_eq!(distance_km(-33.86, 151.21, -33.86, 151.21), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let there = distance_km(40.7128, -74.0060, 51.5074, -0.1278);
        let back = distance_km(51.5074, -0.1278, 40.7128, -74.0060);
        assert!((there - back).abs() < 1e-9);
        // New York to London is roughly 5570 km.
        assert!((there - 5570.0).abs() < 30.0, "got {}", there);
    }
}
