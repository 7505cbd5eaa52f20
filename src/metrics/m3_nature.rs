//! METRIC 3: NATURE (FOREST AND WATER)

use serde::{Deserialize, Serialize};

use crate::config::NatureConfig;
use crate::profile::RegionProfile;
use crate::utils::clamp_pct;

/// Result of the nature calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatureResult {
    /// Sub-score (0-15)
    pub score: f64,
    pub forest_component: f64,
    pub water_component: f64,
    /// Forest coverage after clamping to [0, 100]
    pub forest_coverage_pct: f64,
}

/// Calculate the nature sub-score
pub fn calculate_nature(profile: &RegionProfile, config: &NatureConfig) -> NatureResult {
    let forest_pct = clamp_pct(profile.population.forest_coverage_pct);
    let forest_component = (forest_pct * config.forest_weight).min(config.forest_cap);
    let water_component = if profile.population.has_water_bodies {
        config.water_points
    } else {
        0.0
    };

    NatureResult {
        score: (forest_component + water_component).clamp(0.0, config.max_score),
        forest_component,
        water_component,
        forest_coverage_pct: forest_pct,
    }
}
