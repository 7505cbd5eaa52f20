//! Zone Recommender & Ranker
//!
//! Proposes concrete build locations inside a region. Candidates come from
//! protected-area objects and underserved population centers; each is scored
//! by a priority function, given a facility plan and three structured
//! justifications, and the list is ranked deterministically.
//!
//! Zones are derived values: recompute them from the profile and spatial
//! context instead of editing them.

pub mod candidates;
pub mod planning;
pub mod priority;
pub mod ranking;
pub mod reasoning;

pub use candidates::{enumerate_candidates, Candidate, CandidateOrigin};
pub use planning::{plan_facility, FacilityPlan, FacilityType};
pub use priority::{score_candidate, PriorityBreakdown, ProtectedSite};
pub use ranking::{compare_zones, rank_zones};
pub use reasoning::{build_reasoning, Justification, JustificationKind};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ZoneConfig;
use crate::profile::{ExistingFacility, RegionProfile};
use crate::utils::Coordinate;

/// Legal category of a protected natural area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectedCategory {
    NationalPark,
    NatureReserve,
    LandscapePark,
    WildlifeRefuge,
    NatureMonument,
}

impl ProtectedCategory {
    /// Parse an upstream category label
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_lowercase();
        if lower.contains("national") {
            Some(Self::NationalPark)
        } else if lower.contains("reserve") || lower.contains("zapovednik") {
            Some(Self::NatureReserve)
        } else if lower.contains("landscape") || lower.contains("regional") {
            Some(Self::LandscapePark)
        } else if lower.contains("refuge") || lower.contains("zakaznik") || lower.contains("sanctuary") {
            Some(Self::WildlifeRefuge)
        } else if lower.contains("monument") {
            Some(Self::NatureMonument)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectedObject {
    pub name: String,
    pub category: ProtectedCategory,
    pub location: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationCenter {
    pub name: String,
    pub population: f64,
    pub location: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfrastructureKind {
    Hospital,
    FuelStation,
    Shop,
    MobileTower,
}

impl InfrastructureKind {
    pub const ALL: [InfrastructureKind; 4] = [
        InfrastructureKind::Hospital,
        InfrastructureKind::FuelStation,
        InfrastructureKind::Shop,
        InfrastructureKind::MobileTower,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "hospital" | "clinic" | "medical" => Some(Self::Hospital),
            "fuel" | "fuel_station" | "gas_station" | "petrol" => Some(Self::FuelStation),
            "shop" | "store" | "supermarket" => Some(Self::Shop),
            "mobile" | "mobile_tower" | "cell_tower" => Some(Self::MobileTower),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructurePoint {
    pub kind: InfrastructureKind,
    pub location: Coordinate,
}

/// Spatial auxiliary data for one region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialContext {
    pub protected_objects: Vec<ProtectedObject>,
    pub population_centers: Vec<PopulationCenter>,
    pub infrastructure: Vec<InfrastructurePoint>,
    /// Existing facilities; those without a location are ignored spatially
    pub facilities: Vec<ExistingFacility>,
}

impl SpatialContext {
    pub fn facility_locations(&self) -> impl Iterator<Item = &Coordinate> {
        self.facilities.iter().filter_map(|f| f.location.as_ref())
    }

    /// Number of located facilities within `radius_km` of a point
    pub fn facilities_within(&self, point: &Coordinate, radius_km: f64) -> usize {
        self.facility_locations()
            .filter(|loc| point.distance_km(loc) <= radius_km)
            .count()
    }

    /// Distance to the nearest infrastructure point of a kind
    pub fn nearest_infrastructure_km(&self, point: &Coordinate, kind: InfrastructureKind) -> Option<f64> {
        self.infrastructure
            .iter()
            .filter(|p| p.kind == kind)
            .map(|p| point.distance_km(&p.location))
            .min_by(f64::total_cmp)
    }

    /// Nearest population center and its distance
    pub fn nearest_population_center(&self, point: &Coordinate) -> Option<(&PopulationCenter, f64)> {
        self.population_centers
            .iter()
            .map(|c| (c, point.distance_km(&c.location)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Distance to the nearest infrastructure of each kind (None when unknown)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureProximity {
    pub hospital_km: Option<f64>,
    pub fuel_station_km: Option<f64>,
    pub shop_km: Option<f64>,
    pub mobile_tower_km: Option<f64>,
}

impl InfrastructureProximity {
    pub fn get(&self, kind: InfrastructureKind) -> Option<f64> {
        match kind {
            InfrastructureKind::Hospital => self.hospital_km,
            InfrastructureKind::FuelStation => self.fuel_station_km,
            InfrastructureKind::Shop => self.shop_km,
            InfrastructureKind::MobileTower => self.mobile_tower_km,
        }
    }
}

/// Existing facilities counted within one radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRing {
    pub radius_km: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    ProtectedArea,
    PopulationCenter,
}

/// What a zone is positioned relative to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAnchor {
    pub kind: AnchorKind,
    pub name: String,
    pub distance_km: f64,
}

/// Urgency tag driven by priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Standard,
    High,
    Critical,
}

impl PriorityTier {
    pub fn from_priority(priority: f64, config: &ZoneConfig) -> Self {
        if priority >= config.critical_threshold {
            PriorityTier::Critical
        } else if priority >= config.high_threshold {
            PriorityTier::High
        } else {
            PriorityTier::Standard
        }
    }
}

/// A candidate site for a new facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedZone {
    pub id: String,
    pub region: String,
    pub coordinate: Coordinate,
    pub anchor: ZoneAnchor,
    /// 0-100
    pub priority: f64,
    pub tier: PriorityTier,
    pub plan: FacilityPlan,
    pub infrastructure: InfrastructureProximity,
    /// Ascending by radius
    pub competitors: Vec<CompetitorRing>,
    pub nearest_population_km: Option<f64>,
    pub reasoning: [Justification; 3],
}

/// Enumerate, score, plan and rank zones for one region
pub fn recommend_zones(
    profile: &RegionProfile,
    spatial: &SpatialContext,
    config: &ZoneConfig,
) -> Vec<RecommendedZone> {
    let candidates = enumerate_candidates(&profile.name, spatial, config);

    let mut zones: Vec<RecommendedZone> = candidates
        .iter()
        .map(|candidate| build_zone(profile, candidate, spatial, config))
        .collect();

    rank_zones(&mut zones);
    zones.truncate(config.max_zones);

    debug!(
        "{}: {} candidates → {} zones (top priority {:.1})",
        profile.name,
        candidates.len(),
        zones.len(),
        zones.first().map_or(0.0, |z| z.priority)
    );

    zones
}

fn build_zone(
    profile: &RegionProfile,
    candidate: &Candidate,
    spatial: &SpatialContext,
    config: &ZoneConfig,
) -> RecommendedZone {
    let breakdown = score_candidate(profile, candidate, spatial, config);
    let tier = PriorityTier::from_priority(breakdown.priority, config);
    let plan = plan_facility(candidate, &breakdown, tier, &config.planning);
    let anchor = anchor_for(candidate, &breakdown);
    let reasoning = build_reasoning(&breakdown);

    let mut rings: Vec<f64> = config.competitor_rings_km.clone();
    rings.sort_by(f64::total_cmp);
    let competitors = rings
        .into_iter()
        .map(|radius_km| CompetitorRing {
            radius_km,
            count: spatial.facilities_within(&candidate.coordinate, radius_km),
        })
        .collect();

    RecommendedZone {
        id: candidate.id.clone(),
        region: profile.name.clone(),
        coordinate: candidate.coordinate,
        anchor,
        priority: breakdown.priority,
        tier,
        plan,
        infrastructure: breakdown.infrastructure.clone(),
        competitors,
        nearest_population_km: breakdown.nearest_population.as_ref().map(|(_, d)| *d),
        reasoning,
    }
}

fn anchor_for(candidate: &Candidate, breakdown: &PriorityBreakdown) -> ZoneAnchor {
    match &candidate.origin {
        CandidateOrigin::ProtectedArea { name, .. } => ZoneAnchor {
            kind: AnchorKind::ProtectedArea,
            name: name.clone(),
            distance_km: 0.0,
        },
        CandidateOrigin::PopulationCenter { name, .. } => match &breakdown.best_protected {
            Some(pa) => ZoneAnchor {
                kind: AnchorKind::ProtectedArea,
                name: pa.name.clone(),
                distance_km: pa.distance_km,
            },
            _ => ZoneAnchor {
                kind: AnchorKind::PopulationCenter,
                name: name.clone(),
                distance_km: 0.0,
            },
        },
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn pa(name: &str, category: ProtectedCategory, lat: f64, lon: f64) -> ProtectedObject {
        ProtectedObject { name: name.to_string(), category, location: Coordinate::new(lat, lon) }
    }

    pub fn town(name: &str, population: f64, lat: f64, lon: f64) -> PopulationCenter {
        PopulationCenter { name: name.to_string(), population, location: Coordinate::new(lat, lon) }
    }

    pub fn infra(kind: InfrastructureKind, lat: f64, lon: f64) -> InfrastructurePoint {
        InfrastructurePoint { kind, location: Coordinate::new(lat, lon) }
    }

    pub fn camp(name: &str, lat: f64, lon: f64) -> ExistingFacility {
        ExistingFacility {
            name: name.to_string(),
            capacity: 50.0,
            location: Some(Coordinate::new(lat, lon)),
        }
    }

    /// Mountain region: one national park near a large city, one remote refuge
    pub fn mountain_context() -> SpatialContext {
        SpatialContext {
            protected_objects: vec![
                pa("Ile-Alatau", ProtectedCategory::NationalPark, 43.10, 77.00),
                pa("Remote Refuge", ProtectedCategory::WildlifeRefuge, 45.50, 80.50),
            ],
            population_centers: vec![
                town("Almaty", 2_000_000.0, 43.25, 76.90),
                town("Village", 8_000.0, 45.40, 80.40),
            ],
            infrastructure: vec![
                infra(InfrastructureKind::Hospital, 43.20, 76.95),
                infra(InfrastructureKind::FuelStation, 43.15, 76.98),
                infra(InfrastructureKind::Shop, 43.12, 77.01),
                infra(InfrastructureKind::MobileTower, 43.10, 77.01),
            ],
            facilities: vec![camp("Old camp", 43.80, 77.80)],
        }
    }
}
