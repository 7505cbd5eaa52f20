//! Potential Scorer - Main coordinator for scoring regions
//!
//! Integrates all 7 factor calculators, composes the total and classifies it.
//! Includes both sequential and parallel (Rayon) implementations; both call
//! the same calculator functions and produce identical results.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classification::{BuildDecision, Category};
use crate::config::ScoringConfig;
use crate::metrics::*;
use crate::profile::RegionProfile;
use crate::zones::{recommend_zones, RecommendedZone, SpatialContext};

/// Analysis of one region
///
/// Created once per region per run and never mutated; re-running the
/// pipeline produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub region: String,
    pub scores: FactorScores,
    /// Clamped to [0, 100]
    pub total_score: f64,
    pub category: Category,
    pub recommendation: String,
    pub decision: BuildDecision,
    pub details: FactorDetails,
}

impl AnalysisResult {
    /// Authoritative build gate
    pub fn should_build(&self) -> bool {
        self.decision == BuildDecision::Build
    }
}

/// Main potential scorer
#[derive(Debug, Clone, Default)]
pub struct PotentialScorer {
    config: ScoringConfig,
}

impl PotentialScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Run all 7 calculators sequentially
    pub fn compute_factors(&self, profile: &RegionProfile) -> FactorDetails {
        let c = &self.config;
        FactorDetails {
            demand: calculate_demand(profile, &c.demand),
            protected_areas: calculate_protected_areas(profile, &c.protected_areas),
            nature: calculate_nature(profile, &c.nature),
            transport: calculate_transport(profile, &c.transport),
            infrastructure: calculate_infrastructure(profile, &c.infrastructure),
            fire: calculate_fire_bonus(profile, &c.fire),
            saturation: calculate_saturation(profile, &c.saturation),
        }
    }

    /// Score a region using all 7 factors
    pub fn analyze(&self, profile: &RegionProfile) -> AnalysisResult {
        let details = self.compute_factors(profile);
        self.compose(profile, details)
    }

    /// Score a region with the 7 factors computed IN PARALLEL
    ///
    /// Calculators are pure and share only read-only references, so this
    /// yields exactly the same result as `analyze`.
    pub fn analyze_parallel(&self, profile: &RegionProfile) -> AnalysisResult {
        let c = &self.config;

        let ((demand, (protected_areas, nature)), ((transport, infrastructure), (fire, saturation))) =
            rayon::join(
                || {
                    rayon::join(
                        || calculate_demand(profile, &c.demand),
                        || {
                            rayon::join(
                                || calculate_protected_areas(profile, &c.protected_areas),
                                || calculate_nature(profile, &c.nature),
                            )
                        },
                    )
                },
                || {
                    rayon::join(
                        || {
                            rayon::join(
                                || calculate_transport(profile, &c.transport),
                                || calculate_infrastructure(profile, &c.infrastructure),
                            )
                        },
                        || {
                            rayon::join(
                                || calculate_fire_bonus(profile, &c.fire),
                                || calculate_saturation(profile, &c.saturation),
                            )
                        },
                    )
                },
            );

        let details = FactorDetails {
            demand,
            protected_areas,
            nature,
            transport,
            infrastructure,
            fire,
            saturation,
        };
        self.compose(profile, details)
    }

    /// Score many profiles in parallel, preserving input order
    pub fn analyze_many(&self, profiles: &[RegionProfile]) -> Vec<AnalysisResult> {
        profiles.par_iter().map(|p| self.analyze(p)).collect()
    }

    /// Recommend build zones for a region using this scorer's zone config
    pub fn recommend_zones(
        &self,
        profile: &RegionProfile,
        spatial: &SpatialContext,
    ) -> Vec<RecommendedZone> {
        recommend_zones(profile, spatial, &self.config.zones)
    }

    fn compose(&self, profile: &RegionProfile, details: FactorDetails) -> AnalysisResult {
        let scores = details.scores();
        let sum = scores.sum();
        let total_score = if sum.is_nan() { 0.0 } else { sum.clamp(0.0, 100.0) };

        let classification = &self.config.classification;
        let category = Category::from_score(total_score, classification);
        let decision = BuildDecision::from_score(total_score, classification);

        debug!(
            "Scored {}: {:.1} (demand={:.1}, pa={:.1}, nature={:.1}, transport={:.1}, infra={:.1}, fire={:.1}, saturation={:.1}) → {}",
            profile.name,
            total_score,
            scores.demand,
            scores.protected_areas,
            scores.nature,
            scores.transport,
            scores.infrastructure,
            scores.fire_bonus,
            scores.saturation_penalty,
            category.label()
        );

        AnalysisResult {
            region: profile.name.clone(),
            scores,
            total_score,
            category,
            recommendation: category.recommendation().to_string(),
            decision,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ElectricityReliability;
    use approx::assert_relative_eq;

    fn strong_region() -> RegionProfile {
        let mut p = RegionProfile::defaults("East Kazakhstan");
        p.population.population = 1_400_000.0;
        p.population.area_km2 = 97_800.0;
        p.population.forest_coverage_pct = 45.0;
        p.population.has_water_bodies = true;
        p.protected_areas.national_parks = 3.0;
        p.protected_areas.nature_reserves = 2.0;
        p.protected_areas.landscape_parks = 2.0;
        p.protected_areas.wildlife_refuges = 8.0;
        p.protected_areas.nature_monuments = 12.0;
        p.protected_areas.protected_share_pct = 11.0;
        p.transport.accessibility_index = 8.0;
        p.transport.international_highways = 3.0;
        p.transport.road_density = 260.0;
        p.infrastructure.hospitals_per_100k = 5.5;
        p.infrastructure.fuel_stations_per_100km2 = 1.1;
        p.infrastructure.mobile_coverage_pct = 96.0;
        p.infrastructure.internet_coverage_pct = 82.0;
        p.infrastructure.hotels = 120.0;
        p.infrastructure.electricity = ElectricityReliability::High;
        p.fire.human_caused_incidents = 18.0;
        p.fire.total_incidents = 25.0;
        p.facilities.count = 20.0;
        p.facilities.total_capacity = 900.0;
        p
    }

    #[test]
    fn test_strong_region_breakdown() {
        let scorer = PotentialScorer::default();
        let r = scorer.analyze(&strong_region());

        // demand 630k, supply 324k → ratio ≈ 0.514 → 25
        assert_relative_eq!(r.scores.demand, 25.0);
        // NP 6 + reserves 3 + landscape 2 + refuges 1.6 + monuments 0.6 + share 2
        assert_relative_eq!(r.scores.protected_areas, 15.2, epsilon = 1e-9);
        // forest 12.375 → 11, water 4
        assert_relative_eq!(r.scores.nature, 15.0);
        // 8 + 2.4 + 1 + 1
        assert_relative_eq!(r.scores.transport, 12.4, epsilon = 1e-9);
        assert_relative_eq!(r.scores.infrastructure, 10.0);
        assert_relative_eq!(r.scores.fire_bonus, 5.0);
        // 20 / 97,800 km² ≈ 0.2 per 1000 km²
        assert_relative_eq!(r.scores.saturation_penalty, 0.0);

        assert_relative_eq!(r.total_score, 82.6, epsilon = 1e-9);
        assert_eq!(r.category, Category::VeryHigh);
        assert!(r.should_build());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scorer = PotentialScorer::default();
        let p = strong_region();
        assert_eq!(scorer.analyze(&p), scorer.analyze_parallel(&p));
    }

    #[test]
    fn test_defaults_profile_classification() {
        // demand 25 + pa 2 + nature 2.75 + transport 6.8 + infra 6 = 42.55
        let r = PotentialScorer::default().analyze(&RegionProfile::defaults("Unknown data"));
        assert_relative_eq!(r.total_score, 42.55, epsilon = 1e-9);
        assert_eq!(r.category, Category::Medium);
        assert_eq!(r.decision, BuildDecision::DoNotBuild);
        assert!(!r.should_build());
    }

    #[test]
    fn test_total_never_negative() {
        let mut p = RegionProfile::defaults("Saturated");
        p.population.population = 0.0;
        p.population.forest_coverage_pct = 0.0;
        p.transport.accessibility_index = 0.0;
        p.transport.international_highways = 0.0;
        p.transport.airports = 0.0;
        p.facilities.count = 500.0;
        p.population.area_km2 = 1000.0;
        let r = PotentialScorer::default().analyze(&p);
        assert_relative_eq!(r.scores.saturation_penalty, -15.0);
        assert_relative_eq!(r.total_score, 0.0);
    }

    #[test]
    fn test_nan_inputs_do_not_leak() {
        let mut p = RegionProfile::defaults("NaN");
        p.population.population = f64::NAN;
        p.population.forest_coverage_pct = f64::NAN;
        p.infrastructure.mobile_coverage_pct = f64::NAN;
        p.transport.accessibility_index = f64::NAN;
        let r = PotentialScorer::default().analyze(&p);
        assert!(r.total_score.is_finite());
        assert!((0.0..=100.0).contains(&r.total_score));
    }

    #[test]
    fn test_analyze_many_preserves_order() {
        let profiles: Vec<_> = ["A", "B", "C", "D"].iter().map(|n| RegionProfile::defaults(*n)).collect();
        let results = PotentialScorer::default().analyze_many(&profiles);
        let names: Vec<_> = results.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
    }
}
