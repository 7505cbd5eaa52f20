//! METRIC 6: FIRE-PREVENTION BONUS
//!
//! Regions with many human-caused wildfires gain the most from managed sites
//! with designated fire places, so the bonus rises with the human-caused
//! incident count. Natural ignitions do not count.

use serde::{Deserialize, Serialize};

use crate::config::FireConfig;
use crate::profile::RegionProfile;
use crate::utils::non_negative;

/// Result of the fire-prevention calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirePreventionResult {
    /// Sub-score (0-5)
    pub score: f64,
    pub human_caused_incidents: f64,
    pub total_incidents: f64,
    /// Share of incidents caused by people (0-1)
    pub human_share: f64,
    pub incident_density: f64,
}

/// Calculate the fire-prevention bonus
pub fn calculate_fire_bonus(profile: &RegionProfile, config: &FireConfig) -> FirePreventionResult {
    let human = non_negative(profile.fire.human_caused_incidents);
    let total = non_negative(profile.fire.total_incidents);

    let human_share = if total > 0.0 { (human / total).min(1.0) } else { 0.0 };

    FirePreventionResult {
        score: config.human_caused.lookup(human).clamp(0.0, config.max_score),
        human_caused_incidents: human,
        total_incidents: total,
        human_share,
        incident_density: non_negative(profile.fire.incident_density),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bonus(human: f64) -> f64 {
        let mut p = RegionProfile::defaults("F");
        p.fire.human_caused_incidents = human;
        p.fire.total_incidents = human;
        calculate_fire_bonus(&p, &FireConfig::default()).score
    }

    #[test]
    fn test_steps() {
        assert_relative_eq!(bonus(0.0), 0.0);
        assert_relative_eq!(bonus(4.0), 0.0);
        assert_relative_eq!(bonus(5.0), 1.0);
        assert_relative_eq!(bonus(9.0), 1.0);
        assert_relative_eq!(bonus(10.0), 3.0);
        assert_relative_eq!(bonus(14.0), 3.0);
        assert_relative_eq!(bonus(15.0), 5.0);
        assert_relative_eq!(bonus(120.0), 5.0);
    }

    #[test]
    fn test_human_share() {
        let mut p = RegionProfile::defaults("F");
        p.fire.human_caused_incidents = 3.0;
        p.fire.total_incidents = 12.0;
        let r = calculate_fire_bonus(&p, &FireConfig::default());
        assert_relative_eq!(r.human_share, 0.25);
    }
}
