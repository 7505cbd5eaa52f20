//! METRIC 1: DEMAND (SUPPLY/DEMAND GAP)
//!
//! Compares estimated annual camper visits against the seasonal capacity of
//! existing facilities. A lower supply/demand ratio means a bigger deficit
//! and scores higher.
//!
//!   annual_demand = population × visitor_share × visits_per_visitor
//!   annual_supply = total_capacity × season_days × daily_shifts
//!   ratio         = annual_supply / annual_demand   (0 when demand is 0)
//!
//! A region with no population has no demand and scores 0 regardless of ratio.

use serde::{Deserialize, Serialize};

use crate::config::DemandConfig;
use crate::profile::RegionProfile;
use crate::utils::{non_negative, safe_ratio};

/// Result of the demand calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandResult {
    /// Sub-score (0-25)
    pub score: f64,
    /// Estimated visits per year
    pub annual_demand: f64,
    /// Visitor places per year offered by existing facilities
    pub annual_supply: f64,
    /// annual_supply / annual_demand
    pub supply_demand_ratio: f64,
    /// annual_demand - annual_supply (positive = under-supply)
    pub visitor_gap: f64,
    /// New facilities of reference capacity needed to close the gap
    pub facilities_needed: u32,
    /// Index of the matched band (`bands.len()` for the fallback)
    pub band: usize,
}

/// Calculate the demand sub-score
pub fn calculate_demand(profile: &RegionProfile, config: &DemandConfig) -> DemandResult {
    let population = non_negative(profile.population.population);
    let capacity = non_negative(profile.facilities.total_capacity);

    let annual_demand = population * config.visitor_share * config.visits_per_visitor;
    let places_per_year = config.season_days * config.daily_shifts;
    let annual_supply = capacity * places_per_year;
    let ratio = safe_ratio(annual_supply, annual_demand);

    let (score, band) = if annual_demand > 0.0 {
        (config.bands.lookup(ratio), config.bands.band_index(ratio))
    } else {
        (0.0, config.bands.bands.len())
    };

    let visitor_gap = annual_demand - annual_supply;
    let per_facility = config.reference_capacity * places_per_year;
    let facilities_needed = if visitor_gap > 0.0 && per_facility > 0.0 {
        (visitor_gap / per_facility).ceil() as u32
    } else {
        0
    };

    DemandResult {
        score: score.clamp(0.0, config.max_score),
        annual_demand,
        annual_supply,
        supply_demand_ratio: ratio,
        visitor_gap,
        facilities_needed,
        band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn profile(population: f64, capacity: f64) -> RegionProfile {
        let mut p = RegionProfile::defaults("Test");
        p.population.population = population;
        p.facilities.total_capacity = capacity;
        p
    }

    #[test]
    fn test_no_supply_full_score() {
        let r = calculate_demand(&profile(2_000_000.0, 0.0), &DemandConfig::default());
        assert_relative_eq!(r.annual_demand, 900_000.0);
        assert_relative_eq!(r.annual_supply, 0.0);
        assert_relative_eq!(r.supply_demand_ratio, 0.0);
        assert_relative_eq!(r.score, 25.0);
    }

    #[test]
    fn test_ten_facilities_of_fifty() {
        let r = calculate_demand(&profile(2_000_000.0, 500.0), &DemandConfig::default());
        assert_relative_eq!(r.annual_supply, 180_000.0);
        assert_relative_eq!(r.supply_demand_ratio, 0.2);
        assert_relative_eq!(r.score, 25.0);
        // Gap of 720k visits at 18k per reference facility
        assert_eq!(r.facilities_needed, 40);
    }

    #[test]
    fn test_zero_population() {
        let r = calculate_demand(&profile(0.0, 100.0), &DemandConfig::default());
        assert_relative_eq!(r.score, 0.0);
        assert_relative_eq!(r.supply_demand_ratio, 0.0);
        assert_eq!(r.facilities_needed, 0);
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let r = calculate_demand(&profile(-10.0, -50.0), &DemandConfig::default());
        assert_relative_eq!(r.annual_demand, 0.0);
        assert_relative_eq!(r.annual_supply, 0.0);
        assert_relative_eq!(r.score, 0.0);
    }

    #[test]
    fn test_fine_table() {
        let config = DemandConfig {
            bands: DemandConfig::fine_bands(),
            ..Default::default()
        };
        // demand 900k, ratio 0.4 needs supply 360k = capacity 1000
        let r = calculate_demand(&profile(2_000_000.0, 1000.0), &config);
        assert_relative_eq!(r.supply_demand_ratio, 0.4);
        assert_relative_eq!(r.score, 21.0);
    }
}
