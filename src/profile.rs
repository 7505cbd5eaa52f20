//! Region Profiles
//!
//! A `RegionProfile` is the typed input to every factor calculator. Profiles
//! are assembled by starting from `RegionProfile::defaults` and merging
//! whatever raw sources exist for the region. Absent datasets never fail the
//! pipeline, and absent fields inside a present dataset keep their default.
//!
//! The loader only shapes data: out-of-domain values (negative counts,
//! percentages above 100) pass through unchanged and are clamped by the
//! calculators at scoring time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::{safe_ratio, Coordinate};

/// Population and nature slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationProfile {
    pub population: f64,
    pub area_km2: f64,
    pub forest_coverage_pct: f64,
    pub has_water_bodies: bool,
}

/// Protected-area counts by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectedAreaProfile {
    pub national_parks: f64,
    pub nature_reserves: f64,
    pub landscape_parks: f64,
    /// Wildlife refuges ("zakazniks")
    pub wildlife_refuges: f64,
    pub nature_monuments: f64,
    /// Percent of regional area under protected status
    pub protected_share_pct: f64,
    pub notable_objects: Vec<String>,
}

impl ProtectedAreaProfile {
    pub fn total_objects(&self) -> f64 {
        self.national_parks
            + self.nature_reserves
            + self.landscape_parks
            + self.wildlife_refuges
            + self.nature_monuments
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportProfile {
    /// Raw accessibility index on a 0-10 scale
    pub accessibility_index: f64,
    /// km of road per 1000 km²
    pub road_density: f64,
    pub international_highways: f64,
    pub railway_stations: f64,
    pub airports: f64,
}

/// Reliability tier of the regional power grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectricityReliability {
    High,
    Medium,
    Low,
}

impl ElectricityReliability {
    /// Parse an upstream tier label; unknown labels yield `None`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" | "reliable" | "3" => Some(Self::High),
            "medium" | "moderate" | "2" => Some(Self::Medium),
            "low" | "unreliable" | "1" => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureProfile {
    pub hospitals_per_100k: f64,
    pub fuel_stations_per_100km2: f64,
    pub mobile_coverage_pct: f64,
    pub internet_coverage_pct: f64,
    pub hotels: f64,
    pub electricity: ElectricityReliability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireProfile {
    pub total_incidents: f64,
    pub human_caused_incidents: f64,
    /// Incidents per 1000 km²
    pub incident_density: f64,
    pub burned_area_ha: f64,
}

/// Aggregate of the existing facilities in a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRoster {
    pub count: f64,
    pub total_capacity: f64,
}

/// Complete typed input for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub name: String,
    pub population: PopulationProfile,
    pub protected_areas: ProtectedAreaProfile,
    pub transport: TransportProfile,
    pub infrastructure: InfrastructureProfile,
    pub fire: FireProfile,
    pub facilities: FacilityRoster,
}

impl RegionProfile {
    /// Neutral defaults used wherever a dataset is absent
    pub fn defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            population: PopulationProfile {
                population: 1_000_000.0,
                area_km2: 20_000.0,
                forest_coverage_pct: 10.0,
                has_water_bodies: false,
            },
            protected_areas: ProtectedAreaProfile {
                national_parks: 0.0,
                nature_reserves: 0.0,
                landscape_parks: 0.0,
                wildlife_refuges: 0.0,
                nature_monuments: 0.0,
                protected_share_pct: 0.0,
                notable_objects: Vec::new(),
            },
            transport: TransportProfile {
                accessibility_index: 5.0,
                road_density: 150.0,
                international_highways: 1.0,
                railway_stations: 5.0,
                airports: 1.0,
            },
            infrastructure: InfrastructureProfile {
                hospitals_per_100k: 4.0,
                fuel_stations_per_100km2: 0.7,
                mobile_coverage_pct: 85.0,
                internet_coverage_pct: 70.0,
                hotels: 30.0,
                electricity: ElectricityReliability::Medium,
            },
            fire: FireProfile {
                total_incidents: 0.0,
                human_caused_incidents: 0.0,
                incident_density: 0.0,
                burned_area_ha: 0.0,
            },
            facilities: FacilityRoster {
                count: 0.0,
                total_capacity: 0.0,
            },
        }
    }

    /// Overlay every present raw source on top of this profile
    pub fn merge(mut self, raw: &RawSources) -> Self {
        if let Some(pop) = &raw.population {
            let p = &mut self.population;
            p.population = pop.population.unwrap_or(p.population);
            p.area_km2 = pop.area_km2.unwrap_or(p.area_km2);
            p.forest_coverage_pct = pop.forest_coverage_pct.unwrap_or(p.forest_coverage_pct);
            p.has_water_bodies = pop.has_water_bodies.unwrap_or(p.has_water_bodies);
        }

        if let Some(pa) = &raw.protected_areas {
            let p = &mut self.protected_areas;
            p.national_parks = pa.national_parks.unwrap_or(p.national_parks);
            p.nature_reserves = pa.nature_reserves.unwrap_or(p.nature_reserves);
            p.landscape_parks = pa.landscape_parks.unwrap_or(p.landscape_parks);
            p.wildlife_refuges = pa.wildlife_refuges.unwrap_or(p.wildlife_refuges);
            p.nature_monuments = pa.nature_monuments.unwrap_or(p.nature_monuments);
            p.protected_share_pct = pa.protected_share_pct.unwrap_or(p.protected_share_pct);
            if !pa.notable_objects.is_empty() {
                p.notable_objects = pa.notable_objects.clone();
            }
        }

        if let Some(tr) = &raw.transport {
            let t = &mut self.transport;
            t.accessibility_index = tr.accessibility_index.unwrap_or(t.accessibility_index);
            t.road_density = tr.road_density.unwrap_or(t.road_density);
            t.international_highways = tr.international_highways.unwrap_or(t.international_highways);
            t.railway_stations = tr.railway_stations.unwrap_or(t.railway_stations);
            t.airports = tr.airports.unwrap_or(t.airports);
        }

        if let Some(inf) = &raw.infrastructure {
            let i = &mut self.infrastructure;
            i.hospitals_per_100k = inf.hospitals_per_100k.unwrap_or(i.hospitals_per_100k);
            i.fuel_stations_per_100km2 = inf.fuel_stations_per_100km2.unwrap_or(i.fuel_stations_per_100km2);
            i.mobile_coverage_pct = inf.mobile_coverage_pct.unwrap_or(i.mobile_coverage_pct);
            i.internet_coverage_pct = inf.internet_coverage_pct.unwrap_or(i.internet_coverage_pct);
            i.hotels = inf.hotels.unwrap_or(i.hotels);
            i.electricity = inf.electricity.unwrap_or(i.electricity);
        }

        // Point collections aggregate after the area is known (density needs it)
        if let Some(fires) = &raw.fires {
            self.fire = aggregate_fires(fires, self.population.area_km2);
        }
        if let Some(facilities) = &raw.facilities {
            self.facilities = aggregate_facilities(facilities);
        }

        self
    }
}

/// Assemble the profile for one region from whatever sources exist
pub fn load(region_name: &str, raw: &RawSources) -> RegionProfile {
    let missing = raw.missing_datasets();
    if !missing.is_empty() {
        debug!("{}: using defaults for {:?}", region_name, missing);
    }
    RegionProfile::defaults(region_name).merge(raw)
}

// ============================================================================
// Raw sources (as delivered by dataset readers)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub population: Option<f64>,
    pub area_km2: Option<f64>,
    pub forest_coverage_pct: Option<f64>,
    pub has_water_bodies: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtectedAreaRecord {
    pub national_parks: Option<f64>,
    pub nature_reserves: Option<f64>,
    pub landscape_parks: Option<f64>,
    pub wildlife_refuges: Option<f64>,
    pub nature_monuments: Option<f64>,
    pub protected_share_pct: Option<f64>,
    #[serde(default)]
    pub notable_objects: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportRecord {
    pub accessibility_index: Option<f64>,
    pub road_density: Option<f64>,
    pub international_highways: Option<f64>,
    pub railway_stations: Option<f64>,
    pub airports: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureRecord {
    pub hospitals_per_100k: Option<f64>,
    pub fuel_stations_per_100km2: Option<f64>,
    pub mobile_coverage_pct: Option<f64>,
    pub internet_coverage_pct: Option<f64>,
    pub hotels: Option<f64>,
    pub electricity: Option<ElectricityReliability>,
}

/// Cause classification of a wildfire incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireCause {
    HumanFactor,
    Natural,
    Unknown,
}

impl FireCause {
    /// Classify an upstream cause label
    ///
    /// Anything mentioning people, negligence or arson counts as human factor.
    pub fn classify(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        if lower.is_empty() {
            return Self::Unknown;
        }
        const HUMAN: [&str; 5] = ["human", "anthropogenic", "negligence", "arson", "campfire"];
        const NATURAL: [&str; 3] = ["natural", "lightning", "spontaneous"];
        if HUMAN.iter().any(|k| lower.contains(k)) {
            Self::HumanFactor
        } else if NATURAL.iter().any(|k| lower.contains(k)) {
            Self::Natural
        } else {
            Self::Unknown
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireIncident {
    pub cause: FireCause,
    pub date: Option<String>,
    pub burned_area_ha: Option<f64>,
    pub location: Option<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingFacility {
    pub name: String,
    pub capacity: f64,
    pub location: Option<Coordinate>,
}

/// Everything the dataset readers found for one region
///
/// `None` means the dataset had no entry for the region. For point
/// collections an empty `Some(vec![])` means "known to be empty", which is
/// different from the dataset being absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSources {
    pub population: Option<PopulationRecord>,
    pub protected_areas: Option<ProtectedAreaRecord>,
    pub transport: Option<TransportRecord>,
    pub infrastructure: Option<InfrastructureRecord>,
    pub fires: Option<Vec<FireIncident>>,
    pub facilities: Option<Vec<ExistingFacility>>,
}

impl RawSources {
    /// Names of datasets that will fall back to defaults
    pub fn missing_datasets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.population.is_none() {
            missing.push("population");
        }
        if self.protected_areas.is_none() {
            missing.push("protected_areas");
        }
        if self.transport.is_none() {
            missing.push("transport");
        }
        if self.infrastructure.is_none() {
            missing.push("infrastructure");
        }
        if self.fires.is_none() {
            missing.push("fires");
        }
        if self.facilities.is_none() {
            missing.push("facilities");
        }
        missing
    }
}

fn aggregate_fires(incidents: &[FireIncident], area_km2: f64) -> FireProfile {
    let total = incidents.len() as f64;
    let human = incidents
        .iter()
        .filter(|i| i.cause == FireCause::HumanFactor)
        .count() as f64;
    let burned_area_ha = incidents.iter().filter_map(|i| i.burned_area_ha).sum();

    FireProfile {
        total_incidents: total,
        human_caused_incidents: human,
        incident_density: safe_ratio(total * 1000.0, area_km2),
        burned_area_ha,
    }
}

fn aggregate_facilities(facilities: &[ExistingFacility]) -> FacilityRoster {
    FacilityRoster {
        count: facilities.len() as f64,
        total_capacity: facilities.iter().map(|f| f.capacity).sum(),
    }
}
