//! Facility type, capacity and investment for a recommended zone

use serde::{Deserialize, Serialize};

use super::{Candidate, CandidateOrigin, PriorityBreakdown, PriorityTier, ProtectedCategory};
use crate::config::PlanningConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityType {
    /// Low-impact campsite inside strictly protected land
    EcoCampsite,
    GlampingSite,
    FamilyCampground,
    TransitCampground,
}

impl FacilityType {
    pub fn label(self) -> &'static str {
        match self {
            FacilityType::EcoCampsite => "eco campsite",
            FacilityType::GlampingSite => "glamping site",
            FacilityType::FamilyCampground => "family campground",
            FacilityType::TransitCampground => "transit campground",
        }
    }

    fn base_capacity(self, config: &PlanningConfig) -> u32 {
        match self {
            FacilityType::EcoCampsite => config.eco_campsite_capacity,
            FacilityType::GlampingSite => config.glamping_capacity,
            FacilityType::FamilyCampground => config.family_campground_capacity,
            FacilityType::TransitCampground => config.transit_campground_capacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityPlan {
    pub facility_type: FacilityType,
    /// Places
    pub capacity: u32,
    pub investment: f64,
    pub annual_profit: f64,
    /// None when the plan never pays back
    pub payback_years: Option<f64>,
}

fn facility_type_for(candidate: &Candidate, breakdown: &PriorityBreakdown, config: &PlanningConfig) -> FacilityType {
    match &candidate.origin {
        CandidateOrigin::ProtectedArea { category, .. } => match category {
            ProtectedCategory::NationalPark | ProtectedCategory::NatureReserve => FacilityType::EcoCampsite,
            _ => FacilityType::GlampingSite,
        },
        CandidateOrigin::PopulationCenter { .. } => {
            if breakdown.population_within_reach >= config.family_population_threshold {
                FacilityType::FamilyCampground
            } else {
                FacilityType::TransitCampground
            }
        }
    }
}

/// Choose a facility type and size it
pub fn plan_facility(
    candidate: &Candidate,
    breakdown: &PriorityBreakdown,
    tier: PriorityTier,
    config: &PlanningConfig,
) -> FacilityPlan {
    let facility_type = facility_type_for(candidate, breakdown, config);

    let base = facility_type.base_capacity(config);
    let capacity = if tier == PriorityTier::Critical {
        (base as f64 * config.critical_capacity_multiplier).round().max(0.0) as u32
    } else {
        base
    };

    let places = capacity as f64;
    let investment = places * config.cost_per_place;
    let annual_profit =
        places * config.season_days * config.occupancy * config.nightly_rate * config.margin;
    let payback_years = (annual_profit > 0.0).then(|| investment / annual_profit);

    FacilityPlan {
        facility_type,
        capacity,
        investment,
        annual_profit,
        payback_years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Coordinate;
    use crate::zones::InfrastructureProximity;
    use approx::assert_relative_eq;

    fn breakdown(population_within_reach: f64) -> PriorityBreakdown {
        PriorityBreakdown {
            protected_area_bonus: 0.0,
            best_protected: None,
            nearest_protected: None,
            infrastructure_score: 0.0,
            infrastructure: InfrastructureProximity {
                hospital_km: None,
                fuel_station_km: None,
                shop_km: None,
                mobile_tower_km: None,
            },
            population_score: 0.0,
            nearest_population: None,
            population_within_reach,
            competitors_within_radius: 0,
            competitor_penalty: 0.0,
            priority: 50.0,
        }
    }

    fn protected(category: ProtectedCategory) -> Candidate {
        Candidate {
            id: "R/Park".to_string(),
            coordinate: Coordinate::new(43.0, 77.0),
            origin: CandidateOrigin::ProtectedArea { name: "Park".to_string(), category },
        }
    }

    fn town(population: f64) -> Candidate {
        Candidate {
            id: "R/Town".to_string(),
            coordinate: Coordinate::new(43.0, 77.0),
            origin: CandidateOrigin::PopulationCenter { name: "Town".to_string(), population },
        }
    }

    #[test]
    fn test_facility_types() {
        let c = PlanningConfig::default();
        let tier = PriorityTier::Standard;
        let b = breakdown(0.0);

        assert_eq!(plan_facility(&protected(ProtectedCategory::NationalPark), &b, tier, &c).facility_type, FacilityType::EcoCampsite);
        assert_eq!(plan_facility(&protected(ProtectedCategory::NatureReserve), &b, tier, &c).facility_type, FacilityType::EcoCampsite);
        assert_eq!(plan_facility(&protected(ProtectedCategory::WildlifeRefuge), &b, tier, &c).facility_type, FacilityType::GlampingSite);
        assert_eq!(plan_facility(&town(60_000.0), &breakdown(250_000.0), tier, &c).facility_type, FacilityType::FamilyCampground);
        assert_eq!(plan_facility(&town(60_000.0), &breakdown(60_000.0), tier, &c).facility_type, FacilityType::TransitCampground);
    }

    #[test]
    fn test_critical_tier_enlarges_capacity() {
        let c = PlanningConfig::default();
        let candidate = protected(ProtectedCategory::NationalPark);
        let standard = plan_facility(&candidate, &breakdown(0.0), PriorityTier::High, &c);
        let critical = plan_facility(&candidate, &breakdown(0.0), PriorityTier::Critical, &c);
        assert_eq!(standard.capacity, 40);
        assert_eq!(critical.capacity, 60);
    }

    #[test]
    fn test_investment_and_payback() {
        let c = PlanningConfig::default();
        let plan = plan_facility(&town(60_000.0), &breakdown(0.0), PriorityTier::Standard, &c);
        // 50 places × 15,000
        assert_relative_eq!(plan.investment, 750_000.0);
        // 50 × 180 × 0.6 × 40 × 0.5
        assert_relative_eq!(plan.annual_profit, 108_000.0, epsilon = 1e-6);
        assert_relative_eq!(plan.payback_years.unwrap_or_default(), 750_000.0 / 108_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_revenue_never_pays_back() {
        let c = PlanningConfig { nightly_rate: 0.0, ..Default::default() };
        let plan = plan_facility(&town(60_000.0), &breakdown(0.0), PriorityTier::Standard, &c);
        assert_eq!(plan.payback_years, None);
    }
}
