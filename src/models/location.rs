//! Geographic location type.

use serde::{Deserialize, Serialize};

/// Mean earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
///
/// # Examples
///
/// ```
/// use route_solver::models::Location;
///
/// let a = Location::new(0.0, 0.0);
/// let b = Location::new(0.0, 1.0);
/// // One degree of longitude at the equator is ~111 km.
/// assert_eq!(a.haversine_km(&b).round() as i64, 111);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Location {
    /// Creates a location from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another location, in kilometers.
    ///
    /// Uses the haversine formula with a mean earth radius of 6371 km.
    /// Symmetric: `a.haversine_km(&b) == b.haversine_km(&a)`.
    pub fn haversine_km(&self, other: &Location) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_zero() {
        let a = Location::new(36.1, -115.1);
        assert!(a.haversine_km(&a) < 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // Las Vegas to Los Angeles, ~370 km great-circle.
        let lv = Location::new(36.17, -115.14);
        let la = Location::new(34.05, -118.24);
        let d = lv.haversine_km(&la);
        assert!(d > 350.0 && d < 400.0, "expected ~370 km, got {d}");
    }

    #[test]
    fn test_symmetric() {
        let a = Location::new(52.52, 13.40);
        let b = Location::new(48.86, 2.35);
        assert!((a.haversine_km(&b) - b.haversine_km(&a)).abs() < 1e-9);
    }

    #[test]
    fn test_equator_degree() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(0.0, 2.0);
        // Two degrees of longitude at the equator.
        assert_eq!(a.haversine_km(&b).round() as i64, 222);
    }
}
