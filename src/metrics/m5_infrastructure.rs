//! METRIC 5: ANTHROPOGENIC INFRASTRUCTURE
//!
//! Additive tiers for healthcare, fuel, connectivity, lodging and power.
//! Hospitals, fuel and mobile coverage always contribute at least their
//! lowest tier; internet, hotels and electricity are pure bonuses.

use serde::{Deserialize, Serialize};

use crate::config::InfrastructureConfig;
use crate::profile::{ElectricityReliability, RegionProfile};
use crate::utils::{clamp_pct, non_negative};

/// Result of the infrastructure calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureResult {
    /// Sub-score (0-10)
    pub score: f64,
    pub hospitals: f64,
    pub fuel_stations: f64,
    pub mobile_coverage: f64,
    pub internet_coverage: f64,
    pub hotels: f64,
    pub electricity: f64,
}

/// Calculate the infrastructure sub-score
pub fn calculate_infrastructure(
    profile: &RegionProfile,
    config: &InfrastructureConfig,
) -> InfrastructureResult {
    let i = &profile.infrastructure;

    let hospitals = config.hospitals.lookup(non_negative(i.hospitals_per_100k));
    let fuel_stations = config.fuel_stations.lookup(non_negative(i.fuel_stations_per_100km2));
    let mobile_coverage = config.mobile_coverage.lookup(clamp_pct(i.mobile_coverage_pct));
    let internet_coverage = config.internet_coverage.lookup(clamp_pct(i.internet_coverage_pct));
    let hotels = config.hotels.lookup(non_negative(i.hotels));
    let electricity = match i.electricity {
        ElectricityReliability::High => config.electricity.high,
        ElectricityReliability::Medium => config.electricity.medium,
        ElectricityReliability::Low => config.electricity.low,
    };

    let sum = hospitals + fuel_stations + mobile_coverage + internet_coverage + hotels + electricity;

    InfrastructureResult {
        score: sum.clamp(0.0, config.max_score),
        hospitals,
        fuel_stations,
        mobile_coverage,
        internet_coverage,
        hotels,
        electricity,
    }
}
