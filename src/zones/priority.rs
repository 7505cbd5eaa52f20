//! Zone priority scoring
//!
//!   priority = protected-area bonus        (0-30, category weight × distance decay)
//!            + infrastructure adequacy     (0-40, 10 per kind × distance decay)
//!            + population draw             (0-30, size × distance decay)
//!            - competitor penalty          (0-30, per facility within radius)
//!
//! clamped to [0, 100]. When the spatial context has no mobile towers at all,
//! the region's mobile coverage percent stands in for the mobile component.

use serde::{Deserialize, Serialize};

use super::{Candidate, InfrastructureKind, InfrastructureProximity, ProtectedCategory, SpatialContext};
use crate::config::{ProximityWeights, ZoneConfig};
use crate::profile::RegionProfile;
use crate::utils::{clamp_pct, linear_decay};

/// A protected area and its distance from the candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectedSite {
    pub name: String,
    pub category: ProtectedCategory,
    pub distance_km: f64,
}

/// Components of a candidate's priority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub protected_area_bonus: f64,
    /// Object that earned the bonus; None when no object is within reach
    pub best_protected: Option<ProtectedSite>,
    /// Closest object by distance, regardless of reach
    pub nearest_protected: Option<ProtectedSite>,
    pub infrastructure_score: f64,
    pub infrastructure: InfrastructureProximity,
    pub population_score: f64,
    /// Nearest population center (name, km)
    pub nearest_population: Option<(String, f64)>,
    /// Total population of centers within the population reach
    pub population_within_reach: f64,
    pub competitors_within_radius: usize,
    pub competitor_penalty: f64,
    /// Final priority (0-100)
    pub priority: f64,
}

fn category_weight(category: ProtectedCategory, weights: &ProximityWeights) -> f64 {
    match category {
        ProtectedCategory::NationalPark => weights.national_park,
        ProtectedCategory::NatureReserve => weights.nature_reserve,
        ProtectedCategory::LandscapePark => weights.landscape_park,
        ProtectedCategory::WildlifeRefuge => weights.wildlife_refuge,
        ProtectedCategory::NatureMonument => weights.nature_monument,
    }
}

fn reach_for(kind: InfrastructureKind, config: &ZoneConfig) -> f64 {
    let reach = &config.infrastructure_reach;
    match kind {
        InfrastructureKind::Hospital => reach.hospital_km,
        InfrastructureKind::FuelStation => reach.fuel_km,
        InfrastructureKind::Shop => reach.shop_km,
        InfrastructureKind::MobileTower => reach.mobile_km,
    }
}

/// Score one candidate against the region's spatial context
pub fn score_candidate(
    profile: &RegionProfile,
    candidate: &Candidate,
    spatial: &SpatialContext,
    config: &ZoneConfig,
) -> PriorityBreakdown {
    let point = &candidate.coordinate;

    // Protected-area proximity: best weighted, decayed object (first wins ties)
    let mut protected_area_bonus = 0.0;
    let mut best_protected: Option<ProtectedSite> = None;
    let mut nearest_protected: Option<ProtectedSite> = None;
    for pa in &spatial.protected_objects {
        let distance_km = point.distance_km(&pa.location);
        let site = || ProtectedSite {
            name: pa.name.clone(),
            category: pa.category,
            distance_km,
        };

        let bonus = category_weight(pa.category, &config.proximity_weights)
            * linear_decay(distance_km, config.protected_area_reach_km);
        if bonus > protected_area_bonus {
            protected_area_bonus = bonus;
            best_protected = Some(site());
        }

        let closer = nearest_protected
            .as_ref()
            .map_or(true, |n| distance_km.total_cmp(&n.distance_km).is_lt());
        if closer {
            nearest_protected = Some(site());
        }
    }

    // Infrastructure adequacy
    let infrastructure = InfrastructureProximity {
        hospital_km: spatial.nearest_infrastructure_km(point, InfrastructureKind::Hospital),
        fuel_station_km: spatial.nearest_infrastructure_km(point, InfrastructureKind::FuelStation),
        shop_km: spatial.nearest_infrastructure_km(point, InfrastructureKind::Shop),
        mobile_tower_km: spatial.nearest_infrastructure_km(point, InfrastructureKind::MobileTower),
    };
    let per_kind = config.infrastructure_points_per_kind;
    let infrastructure_score: f64 = InfrastructureKind::ALL
        .iter()
        .map(|&kind| match infrastructure.get(kind) {
            Some(d) => per_kind * linear_decay(d, reach_for(kind, config)),
            None if kind == InfrastructureKind::MobileTower => {
                per_kind * clamp_pct(profile.infrastructure.mobile_coverage_pct) / 100.0
            }
            None => 0.0,
        })
        .sum();

    // Population draw: best single center, plus reachable population for planning
    let mut population_score: f64 = 0.0;
    let mut population_within_reach = 0.0;
    for center in &spatial.population_centers {
        let d = point.distance_km(&center.location);
        let size = if config.population_saturation > 0.0 {
            (center.population.max(0.0) / config.population_saturation).min(1.0)
        } else {
            1.0
        };
        let draw = config.population_points * size * linear_decay(d, config.population_reach_km);
        population_score = population_score.max(draw);
        if d <= config.population_reach_km {
            population_within_reach += center.population.max(0.0);
        }
    }
    let nearest_population = spatial
        .nearest_population_center(point)
        .map(|(c, d)| (c.name.clone(), d));

    // Competitors
    let competitors_within_radius = spatial.facilities_within(point, config.competitor_radius_km);
    let competitor_penalty = (competitors_within_radius as f64 * config.competitor_penalty_per_facility)
        .min(config.competitor_penalty_cap);

    let raw = protected_area_bonus + infrastructure_score + population_score - competitor_penalty;
    let priority = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 100.0) };

    PriorityBreakdown {
        protected_area_bonus,
        best_protected,
        nearest_protected,
        infrastructure_score,
        infrastructure,
        population_score,
        nearest_population,
        population_within_reach,
        competitors_within_radius,
        competitor_penalty,
        priority,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{enumerate_candidates, CandidateOrigin};
    use super::*;
    use crate::utils::Coordinate;
    use approx::assert_relative_eq;

    fn candidate_at(lat: f64, lon: f64) -> Candidate {
        Candidate {
            id: "R/site".to_string(),
            coordinate: Coordinate::new(lat, lon),
            origin: CandidateOrigin::PopulationCenter { name: "site".to_string(), population: 0.0 },
        }
    }

    #[test]
    fn test_national_park_site_is_critical() {
        let ctx = mountain_context();
        let config = ZoneConfig::default();
        let profile = RegionProfile::defaults("R");
        let candidates = enumerate_candidates("R", &ctx, &config);
        let b = score_candidate(&profile, &candidates[0], &ctx, &config);

        assert_relative_eq!(b.protected_area_bonus, 30.0);
        assert_eq!(b.best_protected.as_ref().map(|p| p.name.as_str()), Some("Ile-Alatau"));
        assert_eq!(b.nearest_protected.as_ref().map(|p| p.name.as_str()), Some("Ile-Alatau"));
        assert!(b.infrastructure_score > 30.0 && b.infrastructure_score < 40.0);
        assert!(b.population_score > 20.0);
        assert_eq!(b.competitors_within_radius, 0);
        assert!(b.priority >= 85.0, "priority {}", b.priority);
    }

    #[test]
    fn test_competitor_penalty_capped() {
        let mut ctx = SpatialContext::default();
        for i in 0..5 {
            ctx.facilities.push(camp(&format!("camp {i}"), 43.0 + i as f64 * 0.01, 77.0));
        }
        let config = ZoneConfig::default();
        let b = score_candidate(&RegionProfile::defaults("R"), &candidate_at(43.0, 77.0), &ctx, &config);
        assert_eq!(b.competitors_within_radius, 5);
        assert_relative_eq!(b.competitor_penalty, 30.0);
        assert_relative_eq!(b.priority, 0.0);
    }

    #[test]
    fn test_mobile_fallback_uses_region_coverage() {
        let mut profile = RegionProfile::defaults("R");
        profile.infrastructure.mobile_coverage_pct = 60.0;
        let b = score_candidate(&profile, &candidate_at(43.0, 77.0), &SpatialContext::default(), &ZoneConfig::default());
        assert_eq!(b.infrastructure.mobile_tower_km, None);
        assert_relative_eq!(b.infrastructure_score, 6.0);
        assert_relative_eq!(b.priority, 6.0);
    }

    #[test]
    fn test_distance_decay() {
        let mut ctx = SpatialContext::default();
        ctx.protected_objects.push(pa("Park", ProtectedCategory::NationalPark, 43.0, 77.0));
        let config = ZoneConfig::default();
        let profile = RegionProfile::defaults("R");
        let near = score_candidate(&profile, &candidate_at(43.05, 77.0), &ctx, &config);
        let far = score_candidate(&profile, &candidate_at(43.30, 77.0), &ctx, &config);
        assert!(near.protected_area_bonus > far.protected_area_bonus);
        // 0.5° of latitude is ~55 km, beyond the 50 km reach
        let beyond = score_candidate(&profile, &candidate_at(43.5, 77.0), &ctx, &config);
        assert_relative_eq!(beyond.protected_area_bonus, 0.0);
    }

    #[test]
    fn test_nearest_protected_out_of_reach() {
        let mut ctx = SpatialContext::default();
        // Both beyond the 50 km reach, listed far first
        ctx.protected_objects.push(pa("Far", ProtectedCategory::NationalPark, 53.0, 77.0));
        ctx.protected_objects.push(pa("Near", ProtectedCategory::WildlifeRefuge, 43.6, 77.0));
        let b = score_candidate(&RegionProfile::defaults("R"), &candidate_at(43.0, 77.0), &ctx, &ZoneConfig::default());

        assert_relative_eq!(b.protected_area_bonus, 0.0);
        assert_eq!(b.best_protected, None);
        let nearest = b.nearest_protected.as_ref().unwrap();
        assert_eq!(nearest.name, "Near");
        assert!(nearest.distance_km > 60.0 && nearest.distance_km < 75.0);
    }

    #[test]
    fn test_best_protected_prefers_bonus_over_distance() {
        let mut ctx = SpatialContext::default();
        // Monument right next door, national park ~11 km away
        ctx.protected_objects.push(pa("Monument", ProtectedCategory::NatureMonument, 43.0, 77.0));
        ctx.protected_objects.push(pa("Park", ProtectedCategory::NationalPark, 43.1, 77.0));
        let b = score_candidate(&RegionProfile::defaults("R"), &candidate_at(43.0, 77.0), &ctx, &ZoneConfig::default());

        assert_eq!(b.best_protected.as_ref().map(|p| p.name.as_str()), Some("Park"));
        assert_eq!(b.nearest_protected.as_ref().map(|p| p.name.as_str()), Some("Monument"));
    }
}
