//! Geographic helpers for zone recommendation

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres
const EARTH_RADIUS_KM: f64 = 6371.0;

/// WGS84 point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in kilometres
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Haversine distance between two lat/lon pairs in kilometres
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Linear decay: 1 at distance 0, 0 at `reach_km` and beyond
#[inline]
pub fn linear_decay(distance_km: f64, reach_km: f64) -> f64 {
    if reach_km <= 0.0 || distance_km.is_nan() {
        return 0.0;
    }
    (1.0 - distance_km / reach_km).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_haversine_known_distance() {
        // Almaty to Astana, roughly 970 km
        let almaty = Coordinate::new(43.2389, 76.8897);
        let astana = Coordinate::new(51.1694, 71.4491);
        let d = almaty.distance_km(&astana);
        assert!(d > 940.0 && d < 1000.0, "got {d}");
    }

    #[test]
    fn test_zero_distance() {
        let p = Coordinate::new(50.0, 70.0);
        assert_relative_eq!(p.distance_km(&p), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_linear_decay() {
        assert_relative_eq!(linear_decay(0.0, 50.0), 1.0);
        assert_relative_eq!(linear_decay(25.0, 50.0), 0.5);
        assert_relative_eq!(linear_decay(80.0, 50.0), 0.0);
        assert_relative_eq!(linear_decay(10.0, 0.0), 0.0);
    }
}
