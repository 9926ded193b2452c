//! Great-circle distance.

use guide_types::Coordinate;

/// Sphere radius in meters, matching the map library's Earth model.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_zero_distance() {
        let p = Coordinate::new(51.5, -0.12);
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn test_equator_longitude_step() {
        // 0.02 degrees of longitude on the equator is about 2.22 km.
        let d = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.02));
        assert!(close(d, 2223.9, 0.5), "got {d}");
        let d = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.005));
        assert!(close(d, 556.0, 0.5), "got {d}");
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(38.72, -9.14);
        let b = Coordinate::new(38.80, -9.38);
        assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
    }

    #[test]
    fn test_city_pair() {
        // Paris to London, roughly 344 km.
        let paris = Coordinate::new(48.8566, 2.3522);
        let london = Coordinate::new(51.5074, -0.1278);
        let d = haversine_distance(paris, london);
        assert!(close(d, 343_500.0, 1_500.0), "got {d}");
    }

    #[test]
    fn test_not_planar() {
        // One degree of longitude shrinks with latitude.
        let at_equator = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        let at_sixty = haversine_distance(Coordinate::new(60.0, 0.0), Coordinate::new(60.0, 1.0));
        assert!(close(at_sixty, at_equator / 2.0, 50.0));
    }
}
