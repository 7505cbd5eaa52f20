//! METRIC 2: PROTECTED-AREA ATTRACTION
//!
//! Weighted count of protected natural areas, each category capped so a
//! region with dozens of small refuges cannot outscore one with a national
//! park. A bonus is added when a large share of the region is protected.
//!
//! The configured baseline acts as a floor: a region with no recorded
//! protected objects still receives the baseline attraction.

use serde::{Deserialize, Serialize};

use crate::config::{CategoryWeight, ProtectedAreaConfig};
use crate::profile::RegionProfile;
use crate::utils::{clamp_pct, non_negative};

/// Contribution of each protected-area category after capping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryContributions {
    pub national_parks: f64,
    pub nature_reserves: f64,
    pub landscape_parks: f64,
    pub wildlife_refuges: f64,
    pub nature_monuments: f64,
}

impl CategoryContributions {
    pub fn sum(&self) -> f64 {
        self.national_parks
            + self.nature_reserves
            + self.landscape_parks
            + self.wildlife_refuges
            + self.nature_monuments
    }
}

/// Result of the protected-area calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectedAreaResult {
    /// Sub-score (0-20)
    pub score: f64,
    pub contributions: CategoryContributions,
    /// Bonus for the protected share of regional area
    pub share_bonus: f64,
    /// True when the baseline floor determined the score
    pub baseline_applied: bool,
    pub total_objects: f64,
}

fn contribution(count: f64, weight: &CategoryWeight) -> f64 {
    (non_negative(count) * weight.weight).min(weight.cap)
}

/// Calculate the protected-area attraction sub-score
pub fn calculate_protected_areas(
    profile: &RegionProfile,
    config: &ProtectedAreaConfig,
) -> ProtectedAreaResult {
    let pa = &profile.protected_areas;

    let contributions = CategoryContributions {
        national_parks: contribution(pa.national_parks, &config.national_park),
        nature_reserves: contribution(pa.nature_reserves, &config.nature_reserve),
        landscape_parks: contribution(pa.landscape_parks, &config.landscape_park),
        wildlife_refuges: contribution(pa.wildlife_refuges, &config.wildlife_refuge),
        nature_monuments: contribution(pa.nature_monuments, &config.nature_monument),
    };

    let share = clamp_pct(pa.protected_share_pct);
    let share_bonus = config
        .share_bonuses
        .iter()
        .find(|b| share > b.above)
        .map_or(0.0, |b| b.bonus);

    let weighted = contributions.sum() + share_bonus;
    let baseline_applied = weighted < config.baseline;
    let score = weighted.max(config.baseline).clamp(0.0, config.max_score);

    ProtectedAreaResult {
        score,
        contributions,
        share_bonus,
        baseline_applied,
        total_objects: non_negative(pa.total_objects()),
    }
}
