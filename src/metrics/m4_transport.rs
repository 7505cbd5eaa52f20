//! METRIC 4: TRANSPORT ACCESSIBILITY
//!
//! Base points scale the raw 0-10 accessibility index; international
//! highways, an airport and dense road networks add on top.

use serde::{Deserialize, Serialize};

use crate::config::TransportConfig;
use crate::profile::RegionProfile;
use crate::utils::non_negative;

/// Result of the transport calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportResult {
    /// Sub-score (0-15)
    pub score: f64,
    pub base_component: f64,
    pub highway_component: f64,
    pub airport_component: f64,
    pub road_density_component: f64,
    /// Railway stations are reported but not scored
    pub railway_stations: f64,
}

/// Calculate the transport sub-score
pub fn calculate_transport(profile: &RegionProfile, config: &TransportConfig) -> TransportResult {
    let t = &profile.transport;

    let index = non_negative(t.accessibility_index).min(config.accessibility_max_index);
    let base_component = index * config.accessibility_scale;

    let highway_component =
        (non_negative(t.international_highways) * config.highway_points).min(config.highway_cap);

    let airport_component = if non_negative(t.airports) >= 1.0 {
        config.airport_points
    } else {
        0.0
    };

    let road_density_component = if t.road_density > config.road_density_threshold {
        config.road_density_points
    } else {
        0.0
    };

    let sum = base_component + highway_component + airport_component + road_density_component;

    TransportResult {
        score: sum.clamp(0.0, config.max_score),
        base_component,
        highway_component,
        airport_component,
        road_density_component,
        railway_stations: non_negative(t.railway_stations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        // index 5, 1 highway, 1 airport, density 150
        let r = calculate_transport(&RegionProfile::defaults("T"), &TransportConfig::default());
        assert_relative_eq!(r.base_component, 5.0);
        assert_relative_eq!(r.highway_component, 0.8);
        assert_relative_eq!(r.airport_component, 1.0);
        assert_relative_eq!(r.road_density_component, 0.0);
        assert_relative_eq!(r.score, 6.8, epsilon = 1e-9);
    }

    #[test]
    fn test_maximum() {
        let mut p = RegionProfile::defaults("T");
        p.transport.accessibility_index = 14.0;
        p.transport.international_highways = 6.0;
        p.transport.airports = 3.0;
        p.transport.road_density = 300.0;
        let r = calculate_transport(&p, &TransportConfig::default());
        assert_relative_eq!(r.highway_component, 3.0);
        assert_relative_eq!(r.score, 15.0);
    }

    #[test]
    fn test_road_density_threshold_is_strict() {
        let mut p = RegionProfile::defaults("T");
        p.transport.road_density = 250.0;
        assert_relative_eq!(
            calculate_transport(&p, &TransportConfig::default()).road_density_component,
            0.0
        );
    }

    #[test]
    fn test_no_airport_negative_index() {
        let mut p = RegionProfile::defaults("T");
        p.transport.accessibility_index = -2.0;
        p.transport.airports = 0.0;
        p.transport.international_highways = 0.0;
        let r = calculate_transport(&p, &TransportConfig::default());
        assert_relative_eq!(r.score, 0.0);
    }
}
