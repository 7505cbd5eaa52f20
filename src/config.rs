//! Scoring Configuration
//!
//! Every weighting constant, cap and band table used by the engine lives here.
//! `ScoringConfig::default()` is the canonical methodology; a JSON file can
//! override any subset of it (missing keys keep their defaults).
//!
//! Alternate tables are available as named presets
//! (`DemandConfig::fine_bands`, `SaturationConfig::coarse_bands`).

use crate::error::EngineError;
use crate::utils::{Band, BandTable, Step, StepTable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub demand: DemandConfig,
    pub protected_areas: ProtectedAreaConfig,
    pub nature: NatureConfig,
    pub transport: TransportConfig,
    pub infrastructure: InfrastructureConfig,
    pub fire: FireConfig,
    pub saturation: SaturationConfig,
    pub classification: ClassificationConfig,
    pub zones: ZoneConfig,
}

impl ScoringConfig {
    /// Load configuration overrides from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring config: {:?}", path))?;

        let config: ScoringConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse scoring config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject tables whose ordering would make lookups ambiguous
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.demand.bands.is_ascending() {
            return Err(EngineError::Config("demand bands must be ascending".into()));
        }
        if !self.saturation.bands.is_ascending() {
            return Err(EngineError::Config("saturation bands must be ascending".into()));
        }
        if self.saturation.bands.bands.iter().any(|b| b.score > 0.0) || self.saturation.bands.fallback > 0.0 {
            return Err(EngineError::Config("saturation penalties must be non-positive".into()));
        }

        let steps = [
            ("fire.human_caused", &self.fire.human_caused),
            ("infrastructure.hospitals", &self.infrastructure.hospitals),
            ("infrastructure.fuel_stations", &self.infrastructure.fuel_stations),
            ("infrastructure.mobile_coverage", &self.infrastructure.mobile_coverage),
            ("infrastructure.internet_coverage", &self.infrastructure.internet_coverage),
            ("infrastructure.hotels", &self.infrastructure.hotels),
        ];
        for (name, table) in steps {
            if !table.is_descending() {
                return Err(EngineError::Config(format!("{name} steps must be descending")));
            }
        }
        if self.protected_areas.share_bonuses.windows(2).any(|w| w[0].above < w[1].above) {
            return Err(EngineError::Config("protected_areas.share_bonuses must be descending".into()));
        }

        let c = &self.classification;
        if !(c.exceptional >= c.very_high && c.very_high >= c.high && c.high >= c.medium) {
            return Err(EngineError::Config("category thresholds must be descending".into()));
        }
        if c.caution_gate > c.build_gate {
            return Err(EngineError::Config("caution gate must not exceed build gate".into()));
        }
        Ok(())
    }
}

/// Demand factor (0-25): visitor demand versus existing seasonal capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandConfig {
    /// Share of residents who camp in a year
    pub visitor_share: f64,
    /// Visits per camper per year
    pub visits_per_visitor: f64,
    pub season_days: f64,
    pub daily_shifts: f64,
    /// Capacity of a typical new facility, used for `facilities_needed`
    pub reference_capacity: f64,
    /// Supply/demand ratio bands (lower ratio = bigger deficit = higher score)
    pub bands: BandTable,
    pub max_score: f64,
}

impl DemandConfig {
    /// Canonical table: <0.6 → 25, <0.8 → 20, <1.0 → 15, ≤1.5 → 10, else 0
    pub fn standard_bands() -> BandTable {
        BandTable::new(
            vec![
                Band::below(0.6, 25.0),
                Band::below(0.8, 20.0),
                Band::below(1.0, 15.0),
                Band::up_to(1.5, 10.0),
            ],
            0.0,
        )
    }

    /// Alternate finer table
    pub fn fine_bands() -> BandTable {
        BandTable::new(
            vec![
                Band::below(0.3, 25.0),
                Band::below(0.5, 21.0),
                Band::below(0.7, 17.0),
                Band::below(1.0, 10.0),
                Band::up_to(1.5, 4.0),
            ],
            0.0,
        )
    }
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            visitor_share: 0.15,
            visits_per_visitor: 3.0,
            season_days: 180.0,
            daily_shifts: 2.0,
            reference_capacity: 50.0,
            bands: Self::standard_bands(),
            max_score: 25.0,
        }
    }
}

/// Weight and cap for one protected-area category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub weight: f64,
    pub cap: f64,
}

impl CategoryWeight {
    pub const fn new(weight: f64, cap: f64) -> Self {
        Self { weight, cap }
    }
}

/// Bonus applied when the protected share of a region exceeds `above` percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShareBonus {
    pub above: f64,
    pub bonus: f64,
}

/// Protected-area attraction factor (0-20)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectedAreaConfig {
    pub national_park: CategoryWeight,
    pub nature_reserve: CategoryWeight,
    pub landscape_park: CategoryWeight,
    pub wildlife_refuge: CategoryWeight,
    pub nature_monument: CategoryWeight,
    /// Checked in order, first match wins; `above` must be descending
    pub share_bonuses: Vec<ShareBonus>,
    /// Floor for regions with few or no protected objects
    pub baseline: f64,
    pub max_score: f64,
}

impl Default for ProtectedAreaConfig {
    fn default() -> Self {
        Self {
            national_park: CategoryWeight::new(2.0, 7.0),
            nature_reserve: CategoryWeight::new(1.5, 5.0),
            landscape_park: CategoryWeight::new(1.0, 4.0),
            wildlife_refuge: CategoryWeight::new(0.2, 2.0),
            nature_monument: CategoryWeight::new(0.05, 1.0),
            share_bonuses: vec![
                ShareBonus { above: 10.0, bonus: 2.0 },
                ShareBonus { above: 5.0, bonus: 1.0 },
            ],
            baseline: 2.0,
            max_score: 20.0,
        }
    }
}

/// Nature factor (0-15)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NatureConfig {
    pub forest_weight: f64,
    pub forest_cap: f64,
    pub water_points: f64,
    pub max_score: f64,
}

impl Default for NatureConfig {
    fn default() -> Self {
        Self {
            forest_weight: 0.275,
            forest_cap: 11.0,
            water_points: 4.0,
            max_score: 15.0,
        }
    }
}

/// Transport/accessibility factor (0-15)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Upper end of the raw accessibility index
    pub accessibility_max_index: f64,
    /// Points per accessibility index unit
    pub accessibility_scale: f64,
    pub highway_points: f64,
    pub highway_cap: f64,
    pub airport_points: f64,
    /// km of road per 1000 km²
    pub road_density_threshold: f64,
    pub road_density_points: f64,
    pub max_score: f64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            accessibility_max_index: 10.0,
            accessibility_scale: 1.0,
            highway_points: 0.8,
            highway_cap: 3.0,
            airport_points: 1.0,
            road_density_threshold: 250.0,
            road_density_points: 1.0,
            max_score: 15.0,
        }
    }
}

/// Points per electricity reliability tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricityPoints {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

/// Infrastructure factor (0-10)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfrastructureConfig {
    /// Hospitals per 100k residents
    pub hospitals: StepTable,
    /// Fuel stations per 100 km²
    pub fuel_stations: StepTable,
    /// Mobile coverage percent
    pub mobile_coverage: StepTable,
    pub internet_coverage: StepTable,
    pub hotels: StepTable,
    pub electricity: ElectricityPoints,
    pub max_score: f64,
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            hospitals: StepTable::new(vec![Step::at_least(5.0, 3.0), Step::at_least(4.0, 2.0)], 1.0),
            fuel_stations: StepTable::new(vec![Step::at_least(1.0, 2.0), Step::at_least(0.5, 1.5)], 1.0),
            mobile_coverage: StepTable::new(vec![Step::at_least(95.0, 2.0), Step::at_least(85.0, 1.5)], 1.0),
            internet_coverage: StepTable::new(vec![Step::at_least(80.0, 1.0), Step::at_least(60.0, 0.5)], 0.0),
            hotels: StepTable::new(vec![Step::at_least(100.0, 1.0), Step::at_least(50.0, 0.5)], 0.0),
            electricity: ElectricityPoints { high: 1.0, medium: 0.5, low: 0.0 },
            max_score: 10.0,
        }
    }
}

/// Fire-prevention bonus (0-5)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Human-caused incident count thresholds
    pub human_caused: StepTable,
    pub max_score: f64,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            human_caused: StepTable::new(
                vec![Step::at_least(15.0, 5.0), Step::at_least(10.0, 3.0), Step::at_least(5.0, 1.0)],
                0.0,
            ),
            max_score: 5.0,
        }
    }
}

/// Saturation penalty (-15 to 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationConfig {
    /// Density unit: facilities per this many km²
    pub per_area_km2: f64,
    /// Density bands mapped to non-positive penalties
    pub bands: BandTable,
    pub min_score: f64,
}

impl SaturationConfig {
    /// Canonical 5-band table
    pub fn standard_bands() -> BandTable {
        BandTable::new(
            vec![
                Band::below(1.0, 0.0),
                Band::below(2.0, -2.0),
                Band::below(3.0, -5.0),
                Band::below(5.0, -10.0),
            ],
            -15.0,
        )
    }

    /// Coarser 4-band table used by some report modules
    pub fn coarse_bands() -> BandTable {
        BandTable::new(
            vec![Band::below(1.0, 0.0), Band::below(2.0, -5.0), Band::below(3.0, -10.0)],
            -15.0,
        )
    }
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self {
            per_area_km2: 1000.0,
            bands: Self::standard_bands(),
            min_score: -15.0,
        }
    }
}

/// Category thresholds (inclusive lower bounds) and build gates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub exceptional: f64,
    pub very_high: f64,
    pub high: f64,
    pub medium: f64,
    /// Authoritative build/no-build gate
    pub build_gate: f64,
    /// Softer "proceed with caution" tier
    pub caution_gate: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            exceptional: 85.0,
            very_high: 70.0,
            high: 55.0,
            medium: 40.0,
            build_gate: 70.0,
            caution_gate: 50.0,
        }
    }
}

/// Zone priority bonus per protected-area category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityWeights {
    pub national_park: f64,
    pub nature_reserve: f64,
    pub landscape_park: f64,
    pub wildlife_refuge: f64,
    pub nature_monument: f64,
}

/// Reach (km) at which each infrastructure kind stops contributing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureReach {
    pub hospital_km: f64,
    pub fuel_km: f64,
    pub shop_km: f64,
    pub mobile_km: f64,
}

/// Facility sizing and economics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    pub eco_campsite_capacity: u32,
    pub glamping_capacity: u32,
    pub family_campground_capacity: u32,
    pub transit_campground_capacity: u32,
    pub critical_capacity_multiplier: f64,
    /// Population within the population reach that justifies a family campground
    pub family_population_threshold: f64,
    pub cost_per_place: f64,
    pub season_days: f64,
    pub occupancy: f64,
    pub nightly_rate: f64,
    pub margin: f64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            eco_campsite_capacity: 40,
            glamping_capacity: 30,
            family_campground_capacity: 80,
            transit_campground_capacity: 50,
            critical_capacity_multiplier: 1.5,
            family_population_threshold: 200_000.0,
            cost_per_place: 15_000.0,
            season_days: 180.0,
            occupancy: 0.6,
            nightly_rate: 40.0,
            margin: 0.5,
        }
    }
}

/// Zone recommendation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub proximity_weights: ProximityWeights,
    pub protected_area_reach_km: f64,
    pub infrastructure_reach: InfrastructureReach,
    pub infrastructure_points_per_kind: f64,
    pub population_points: f64,
    /// Population at which the population draw saturates
    pub population_saturation: f64,
    pub population_reach_km: f64,
    pub competitor_radius_km: f64,
    pub competitor_penalty_per_facility: f64,
    pub competitor_penalty_cap: f64,
    /// Smallest population center that becomes a candidate on its own
    pub min_center_population: f64,
    /// Candidates closer than this to an earlier candidate are dropped
    pub dedupe_radius_km: f64,
    pub critical_threshold: f64,
    pub high_threshold: f64,
    /// Radii (km) for the competitor summary, ascending
    pub competitor_rings_km: Vec<f64>,
    pub max_zones: usize,
    pub planning: PlanningConfig,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            proximity_weights: ProximityWeights {
                national_park: 30.0,
                nature_reserve: 25.0,
                landscape_park: 20.0,
                wildlife_refuge: 12.0,
                nature_monument: 8.0,
            },
            protected_area_reach_km: 50.0,
            infrastructure_reach: InfrastructureReach {
                hospital_km: 50.0,
                fuel_km: 30.0,
                shop_km: 20.0,
                mobile_km: 10.0,
            },
            infrastructure_points_per_kind: 10.0,
            population_points: 30.0,
            population_saturation: 500_000.0,
            population_reach_km: 100.0,
            competitor_radius_km: 30.0,
            competitor_penalty_per_facility: 10.0,
            competitor_penalty_cap: 30.0,
            min_center_population: 50_000.0,
            dedupe_radius_km: 5.0,
            critical_threshold: 85.0,
            high_threshold: 70.0,
            competitor_rings_km: vec![10.0, 25.0, 50.0],
            max_zones: 10,
            planning: PlanningConfig::default(),
        }
    }
}
