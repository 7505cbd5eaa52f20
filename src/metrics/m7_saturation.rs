//! METRIC 7: SATURATION PENALTY
//!
//! Density of existing facilities per 1000 km², mapped by ascending bands to
//! a non-positive penalty. Zero or negative area yields density 0.

use serde::{Deserialize, Serialize};

use crate::config::SaturationConfig;
use crate::profile::RegionProfile;
use crate::utils::{non_negative, safe_ratio};

/// Result of the saturation calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaturationResult {
    /// Penalty (-15 to 0)
    pub score: f64,
    /// Facilities per `per_area_km2`
    pub density: f64,
    pub facility_count: f64,
    pub band: usize,
}

/// Calculate the saturation penalty
pub fn calculate_saturation(profile: &RegionProfile, config: &SaturationConfig) -> SaturationResult {
    let count = non_negative(profile.facilities.count);
    let density = safe_ratio(count * config.per_area_km2, profile.population.area_km2);

    let penalty = config.bands.lookup(density).clamp(config.min_score, 0.0);

    SaturationResult {
        score: penalty,
        density,
        facility_count: count,
        band: config.bands.band_index(density),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn penalty(count: f64, area: f64, config: &SaturationConfig) -> SaturationResult {
        let mut p = RegionProfile::defaults("S");
        p.facilities.count = count;
        p.population.area_km2 = area;
        calculate_saturation(&p, config)
    }

    #[test]
    fn test_standard_bands() {
        let c = SaturationConfig::default();
        assert_relative_eq!(penalty(0.0, 10_000.0, &c).score, 0.0);
        assert_relative_eq!(penalty(9.0, 10_000.0, &c).score, 0.0);
        assert_relative_eq!(penalty(10.0, 10_000.0, &c).score, -2.0);
        assert_relative_eq!(penalty(25.0, 10_000.0, &c).score, -5.0);
        assert_relative_eq!(penalty(40.0, 10_000.0, &c).score, -10.0);
        assert_relative_eq!(penalty(50.0, 10_000.0, &c).score, -15.0);
    }

    #[test]
    fn test_coarse_bands() {
        let c = SaturationConfig {
            bands: SaturationConfig::coarse_bands(),
            ..Default::default()
        };
        assert_relative_eq!(penalty(15.0, 10_000.0, &c).score, -5.0);
        assert_relative_eq!(penalty(35.0, 10_000.0, &c).score, -15.0);
    }

    #[test]
    fn test_zero_area() {
        let r = penalty(12.0, 0.0, &SaturationConfig::default());
        assert_relative_eq!(r.density, 0.0);
        assert_relative_eq!(r.score, 0.0);
    }
}
