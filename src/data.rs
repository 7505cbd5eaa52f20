//! Data Loading and Management
//!
//! Reads a directory of regional CSV datasets using Polars and indexes them
//! by region name. Every file is optional: a missing file is logged and the
//! affected profile fields fall back to `RegionProfile::defaults`.
//!
//! Files (all keyed by a `region` column):
//! - population.csv, protected_areas.csv, transport.csv, infrastructure.csv
//!   (one row per region)
//! - fires.csv, facilities.csv (one row per incident / facility)
//! - protected_objects.csv, population_centers.csv, infrastructure_points.csv
//!   (located points for zone recommendation)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::profile::{
    self, ElectricityReliability, ExistingFacility, FireCause, FireIncident, InfrastructureRecord,
    PopulationRecord, ProtectedAreaRecord, RawSources, RegionProfile, TransportRecord,
};
use crate::utils::columns::{bool_values, f64_values, region_keys, str_values};
use crate::utils::Coordinate;
use crate::zones::{
    InfrastructureKind, InfrastructurePoint, PopulationCenter, ProtectedCategory, ProtectedObject,
    SpatialContext,
};

/// Per-region datasets, indexed by region name
///
/// Point collections are `None` when their file was absent, so a region with
/// no rows in a present file reads as "known to be empty".
#[derive(Debug, Clone, Default)]
pub struct RegionDatasets {
    /// Union of region names across datasets, first-seen order
    regions: Vec<String>,
    region_index: FxHashMap<String, usize>,

    population: FxHashMap<String, PopulationRecord>,
    protected_areas: FxHashMap<String, ProtectedAreaRecord>,
    transport: FxHashMap<String, TransportRecord>,
    infrastructure: FxHashMap<String, InfrastructureRecord>,
    fires: Option<FxHashMap<String, Vec<FireIncident>>>,
    facilities: Option<FxHashMap<String, Vec<ExistingFacility>>>,

    protected_objects: FxHashMap<String, Vec<ProtectedObject>>,
    population_centers: FxHashMap<String, Vec<PopulationCenter>>,
    infrastructure_points: FxHashMap<String, Vec<InfrastructurePoint>>,
}

impl RegionDatasets {
    /// Load every known dataset file from `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        info!("Loading regional datasets from {}", dir.display());

        let mut data = Self::default();

        if let Some(df) = read_table(dir, "population.csv")? {
            data.read_population(&df, "population.csv")?;
        }
        if let Some(df) = read_table(dir, "protected_areas.csv")? {
            data.read_protected_areas(&df, "protected_areas.csv")?;
        }
        if let Some(df) = read_table(dir, "transport.csv")? {
            data.read_transport(&df, "transport.csv")?;
        }
        if let Some(df) = read_table(dir, "infrastructure.csv")? {
            data.read_infrastructure(&df, "infrastructure.csv")?;
        }
        if let Some(df) = read_table(dir, "fires.csv")? {
            data.read_fires(&df, "fires.csv")?;
        }
        if let Some(df) = read_table(dir, "facilities.csv")? {
            data.read_facilities(&df, "facilities.csv")?;
        }
        if let Some(df) = read_table(dir, "protected_objects.csv")? {
            data.read_protected_objects(&df, "protected_objects.csv")?;
        }
        if let Some(df) = read_table(dir, "population_centers.csv")? {
            data.read_population_centers(&df, "population_centers.csv")?;
        }
        if let Some(df) = read_table(dir, "infrastructure_points.csv")? {
            data.read_infrastructure_points(&df, "infrastructure_points.csv")?;
        }

        info!("  Regions: {}", data.regions.len());
        info!("  Fire incidents: {}", data.fires.as_ref().map_or(0, |m| m.values().map(Vec::len).sum()));
        info!("  Facilities: {}", data.facilities.as_ref().map_or(0, |m| m.values().map(Vec::len).sum()));
        info!("  Protected objects: {}", data.protected_objects.values().map(Vec::len).sum::<usize>());

        Ok(data)
    }

    /// Region names in first-seen order
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn contains(&self, region: &str) -> bool {
        self.region_index.contains_key(region)
    }

    /// Raw sources for a known region
    pub fn raw_sources(&self, region: &str) -> EngineResult<RawSources> {
        if !self.contains(region) {
            return Err(EngineError::RegionNotFound(region.to_string()));
        }

        Ok(RawSources {
            population: self.population.get(region).cloned(),
            protected_areas: self.protected_areas.get(region).cloned(),
            transport: self.transport.get(region).cloned(),
            infrastructure: self.infrastructure.get(region).cloned(),
            fires: self
                .fires
                .as_ref()
                .map(|m| m.get(region).cloned().unwrap_or_default()),
            facilities: self
                .facilities
                .as_ref()
                .map(|m| m.get(region).cloned().unwrap_or_default()),
        })
    }

    /// Defaults merged with whatever the datasets hold for the region
    pub fn profile(&self, region: &str) -> EngineResult<RegionProfile> {
        let raw = self.raw_sources(region)?;
        Ok(profile::load(region, &raw))
    }

    /// Located points for a known region
    pub fn spatial_context(&self, region: &str) -> EngineResult<SpatialContext> {
        if !self.contains(region) {
            return Err(EngineError::RegionNotFound(region.to_string()));
        }

        Ok(SpatialContext {
            protected_objects: self.protected_objects.get(region).cloned().unwrap_or_default(),
            population_centers: self.population_centers.get(region).cloned().unwrap_or_default(),
            infrastructure: self.infrastructure_points.get(region).cloned().unwrap_or_default(),
            facilities: self
                .facilities
                .as_ref()
                .and_then(|m| m.get(region).cloned())
                .unwrap_or_default(),
        })
    }

    // ------------------------------------------------------------------------
    // In-memory construction
    // ------------------------------------------------------------------------

    pub fn insert_population(&mut self, region: &str, record: PopulationRecord) {
        self.register(region);
        self.population.insert(region.to_string(), record);
    }

    pub fn insert_protected_areas(&mut self, region: &str, record: ProtectedAreaRecord) {
        self.register(region);
        self.protected_areas.insert(region.to_string(), record);
    }

    pub fn insert_transport(&mut self, region: &str, record: TransportRecord) {
        self.register(region);
        self.transport.insert(region.to_string(), record);
    }

    pub fn insert_infrastructure(&mut self, region: &str, record: InfrastructureRecord) {
        self.register(region);
        self.infrastructure.insert(region.to_string(), record);
    }

    pub fn push_fire(&mut self, region: &str, incident: FireIncident) {
        self.register(region);
        self.fires
            .get_or_insert_with(FxHashMap::default)
            .entry(region.to_string())
            .or_default()
            .push(incident);
    }

    pub fn push_facility(&mut self, region: &str, facility: ExistingFacility) {
        self.register(region);
        self.facilities
            .get_or_insert_with(FxHashMap::default)
            .entry(region.to_string())
            .or_default()
            .push(facility);
    }

    pub fn push_protected_object(&mut self, region: &str, object: ProtectedObject) {
        self.register(region);
        self.protected_objects.entry(region.to_string()).or_default().push(object);
    }

    pub fn push_population_center(&mut self, region: &str, center: PopulationCenter) {
        self.register(region);
        self.population_centers.entry(region.to_string()).or_default().push(center);
    }

    pub fn push_infrastructure_point(&mut self, region: &str, point: InfrastructurePoint) {
        self.register(region);
        self.infrastructure_points.entry(region.to_string()).or_default().push(point);
    }

    fn register(&mut self, region: &str) {
        if !self.region_index.contains_key(region) {
            self.region_index.insert(region.to_string(), self.regions.len());
            self.regions.push(region.to_string());
        }
    }

    // ------------------------------------------------------------------------
    // Table readers
    // ------------------------------------------------------------------------

    fn read_population(&mut self, df: &DataFrame, ctx: &str) -> Result<()> {
        let regions = keys(df, ctx)?;
        let population = f64_values(df, "population", ctx)?;
        let area = f64_values(df, "area_km2", ctx)?;
        let forest = f64_values(df, "forest_coverage_pct", ctx)?;
        let water = bool_values(df, "has_water_bodies", ctx)?;

        for (i, region) in regions.iter().enumerate() {
            let Some(region) = region else { continue };
            if self.population.contains_key(region) {
                debug!("{}: duplicate row for {} ignored", ctx, region);
                continue;
            }
            self.insert_population(
                region,
                PopulationRecord {
                    population: population[i],
                    area_km2: area[i],
                    forest_coverage_pct: forest[i],
                    has_water_bodies: water[i],
                },
            );
        }
        Ok(())
    }

    fn read_protected_areas(&mut self, df: &DataFrame, ctx: &str) -> Result<()> {
        let regions = keys(df, ctx)?;
        let national_parks = f64_values(df, "national_parks", ctx)?;
        let nature_reserves = f64_values(df, "nature_reserves", ctx)?;
        let landscape_parks = f64_values(df, "landscape_parks", ctx)?;
        let wildlife_refuges = f64_values(df, "wildlife_refuges", ctx)?;
        let nature_monuments = f64_values(df, "nature_monuments", ctx)?;
        let share = f64_values(df, "protected_share_pct", ctx)?;
        let notable = str_values(df, "notable_objects", ctx)?;

        for (i, region) in regions.iter().enumerate() {
            let Some(region) = region else { continue };
            if self.protected_areas.contains_key(region) {
                debug!("{}: duplicate row for {} ignored", ctx, region);
                continue;
            }
            let notable_objects = notable[i]
                .as_deref()
                .map(|s| {
                    s.split('|')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            self.insert_protected_areas(
                region,
                ProtectedAreaRecord {
                    national_parks: national_parks[i],
                    nature_reserves: nature_reserves[i],
                    landscape_parks: landscape_parks[i],
                    wildlife_refuges: wildlife_refuges[i],
                    nature_monuments: nature_monuments[i],
                    protected_share_pct: share[i],
                    notable_objects,
                },
            );
        }
        Ok(())
    }

    fn read_transport(&mut self, df: &DataFrame, ctx: &str) -> Result<()> {
        let regions = keys(df, ctx)?;
        let accessibility = f64_values(df, "accessibility_index", ctx)?;
        let road_density = f64_values(df, "road_density", ctx)?;
        let highways = f64_values(df, "international_highways", ctx)?;
        let stations = f64_values(df, "railway_stations", ctx)?;
        let airports = f64_values(df, "airports", ctx)?;

        for (i, region) in regions.iter().enumerate() {
            let Some(region) = region else { continue };
            if self.transport.contains_key(region) {
                debug!("{}: duplicate row for {} ignored", ctx, region);
                continue;
            }
            self.insert_transport(
                region,
                TransportRecord {
                    accessibility_index: accessibility[i],
                    road_density: road_density[i],
                    international_highways: highways[i],
                    railway_stations: stations[i],
                    airports: airports[i],
                },
            );
        }
        Ok(())
    }

    fn read_infrastructure(&mut self, df: &DataFrame, ctx: &str) -> Result<()> {
        let regions = keys(df, ctx)?;
        let hospitals = f64_values(df, "hospitals_per_100k", ctx)?;
        let fuel = f64_values(df, "fuel_stations_per_100km2", ctx)?;
        let mobile = f64_values(df, "mobile_coverage_pct", ctx)?;
        let internet = f64_values(df, "internet_coverage_pct", ctx)?;
        let hotels = f64_values(df, "hotels", ctx)?;
        let electricity = str_values(df, "electricity", ctx)?;

        for (i, region) in regions.iter().enumerate() {
            let Some(region) = region else { continue };
            if self.infrastructure.contains_key(region) {
                debug!("{}: duplicate row for {} ignored", ctx, region);
                continue;
            }
            self.insert_infrastructure(
                region,
                InfrastructureRecord {
                    hospitals_per_100k: hospitals[i],
                    fuel_stations_per_100km2: fuel[i],
                    mobile_coverage_pct: mobile[i],
                    internet_coverage_pct: internet[i],
                    hotels: hotels[i],
                    electricity: electricity[i].as_deref().and_then(ElectricityReliability::parse),
                },
            );
        }
        Ok(())
    }

    fn read_fires(&mut self, df: &DataFrame, ctx: &str) -> Result<()> {
        let regions = keys(df, ctx)?;
        let cause = str_values(df, "cause", ctx)?;
        let date = str_values(df, "date", ctx)?;
        let burned = f64_values(df, "burned_area_ha", ctx)?;
        let locations = coordinates(df, ctx)?;

        self.fires.get_or_insert_with(FxHashMap::default);
        for (i, region) in regions.iter().enumerate() {
            let Some(region) = region else { continue };
            self.push_fire(
                region,
                FireIncident {
                    cause: cause[i].as_deref().map_or(FireCause::Unknown, FireCause::classify),
                    date: date[i].clone().filter(|s| !s.is_empty()),
                    burned_area_ha: burned[i],
                    location: locations[i],
                },
            );
        }
        Ok(())
    }

    fn read_facilities(&mut self, df: &DataFrame, ctx: &str) -> Result<()> {
        let regions = keys(df, ctx)?;
        let names = str_values(df, "name", ctx)?;
        let capacity = f64_values(df, "capacity", ctx)?;
        let locations = coordinates(df, ctx)?;

        self.facilities.get_or_insert_with(FxHashMap::default);
        for (i, region) in regions.iter().enumerate() {
            let Some(region) = region else { continue };
            self.push_facility(
                region,
                ExistingFacility {
                    name: names[i].clone().unwrap_or_default(),
                    capacity: capacity[i].unwrap_or(0.0),
                    location: locations[i],
                },
            );
        }
        Ok(())
    }

    fn read_protected_objects(&mut self, df: &DataFrame, ctx: &str) -> Result<()> {
        let regions = keys(df, ctx)?;
        let names = str_values(df, "name", ctx)?;
        let categories = str_values(df, "category", ctx)?;
        let locations = coordinates(df, ctx)?;

        for (i, region) in regions.iter().enumerate() {
            let Some(region) = region else { continue };
            let name = names[i].clone().unwrap_or_default();
            let category = categories[i].as_deref().and_then(ProtectedCategory::parse);
            match (category, locations[i]) {
                (Some(category), Some(location)) => {
                    self.push_protected_object(region, ProtectedObject { name, category, location })
                }
                _ => debug!("{}: skipping '{}' in {} (no category or location)", ctx, name, region),
            }
        }
        Ok(())
    }

    fn read_population_centers(&mut self, df: &DataFrame, ctx: &str) -> Result<()> {
        let regions = keys(df, ctx)?;
        let names = str_values(df, "name", ctx)?;
        let population = f64_values(df, "population", ctx)?;
        let locations = coordinates(df, ctx)?;

        for (i, region) in regions.iter().enumerate() {
            let Some(region) = region else { continue };
            let name = names[i].clone().unwrap_or_default();
            match (population[i], locations[i]) {
                (Some(population), Some(location)) => self.push_population_center(
                    region,
                    PopulationCenter { name, population, location },
                ),
                _ => debug!("{}: skipping '{}' in {} (no population or location)", ctx, name, region),
            }
        }
        Ok(())
    }

    fn read_infrastructure_points(&mut self, df: &DataFrame, ctx: &str) -> Result<()> {
        let regions = keys(df, ctx)?;
        let kinds = str_values(df, "kind", ctx)?;
        let locations = coordinates(df, ctx)?;

        let mut skipped = 0usize;
        for (i, region) in regions.iter().enumerate() {
            let Some(region) = region else { continue };
            let kind = kinds[i].as_deref().and_then(InfrastructureKind::parse);
            match (kind, locations[i]) {
                (Some(kind), Some(location)) => {
                    self.push_infrastructure_point(region, InfrastructurePoint { kind, location })
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("{}: skipped {} points with unknown kind or location", ctx, skipped);
        }
        Ok(())
    }
}

/// Read one CSV file; `Ok(None)` when the file does not exist
fn read_table(dir: &Path, file: &str) -> Result<Option<DataFrame>> {
    let path: PathBuf = dir.join(file);
    if !path.exists() {
        warn!("{} not found in {}, affected fields use defaults", file, dir.display());
        return Ok(None);
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.clone()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load {}", file))?;

    debug!("{}: {} rows", file, df.height());
    Ok(Some(df))
}

fn keys(df: &DataFrame, ctx: &str) -> Result<Vec<Option<String>>> {
    region_keys(df, ctx).map_err(|e| {
        EngineError::Dataset {
            name: ctx.to_string(),
            message: format!("{:#}", e),
        }
        .into()
    })
}

/// Optional `lat`/`lon` columns as coordinates (None unless both are finite)
fn coordinates(df: &DataFrame, ctx: &str) -> Result<Vec<Option<Coordinate>>> {
    let lat = f64_values(df, "lat", ctx)?;
    let lon = f64_values(df, "lon", ctx)?;
    Ok(lat
        .into_iter()
        .zip(lon)
        .map(|pair| match pair {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(Coordinate::new(lat, lon))
            }
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn write(dir: &Path, file: &str, contents: &str) {
        std::fs::write(dir.join(file), contents).unwrap();
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("recreation_potential_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_directory() {
        let dir = scratch_dir("load");
        write(
            &dir,
            "population.csv",
            "region,population,area_km2,forest_coverage_pct,has_water_bodies\n\
             Almaty,2000000,224000,12.5,yes\n\
             Mangystau,700000,165600,,no\n",
        );
        write(
            &dir,
            "protected_areas.csv",
            "region,national_parks,nature_reserves,landscape_parks,wildlife_refuges,nature_monuments,protected_share_pct,notable_objects\n\
             Almaty,2,1,0,5,10,8.5,Ile-Alatau|Charyn Canyon\n",
        );
        write(
            &dir,
            "fires.csv",
            "region,cause,date,burned_area_ha,lat,lon\n\
             Almaty,human negligence,2023-07-01,12.5,43.2,76.9\n\
             Almaty,lightning,2023-08-02,3,,\n",
        );
        write(
            &dir,
            "protected_objects.csv",
            "region,name,category,lat,lon\n\
             Almaty,Ile-Alatau,national park,43.1,77.0\n\
             Almaty,Unknown,parking,43.0,77.0\n\
             Turkestan,Aksu-Zhabagly,nature reserve,42.4,70.6\n",
        );

        let data = RegionDatasets::load(&dir).unwrap();
        assert_eq!(data.regions(), ["Almaty", "Mangystau", "Turkestan"]);

        let raw = data.raw_sources("Almaty").unwrap();
        let pop = raw.population.as_ref().unwrap();
        assert_relative_eq!(pop.population.unwrap(), 2_000_000.0);
        assert_eq!(pop.has_water_bodies, Some(true));
        let pa = raw.protected_areas.as_ref().unwrap();
        assert_eq!(pa.notable_objects, vec!["Ile-Alatau", "Charyn Canyon"]);
        let fires = raw.fires.as_ref().unwrap();
        assert_eq!(fires.len(), 2);
        assert_eq!(fires[0].cause, FireCause::HumanFactor);
        assert_eq!(fires[1].location, None);
        // facilities.csv absent
        assert_eq!(raw.facilities, None);

        // Present fires file, no rows for the region: known to be empty
        let raw = data.raw_sources("Mangystau").unwrap();
        assert_eq!(raw.fires, Some(vec![]));
        assert_eq!(raw.population.unwrap().forest_coverage_pct, None);

        let spatial = data.spatial_context("Almaty").unwrap();
        assert_eq!(spatial.protected_objects.len(), 1);
        assert_eq!(spatial.protected_objects[0].category, ProtectedCategory::NationalPark);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_directory_has_no_regions() {
        let dir = scratch_dir("empty");
        let data = RegionDatasets::load(&dir).unwrap();
        assert!(data.regions().is_empty());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_region_column_is_dataset_error() {
        let dir = scratch_dir("bad");
        write(&dir, "transport.csv", "name,airports\nAlmaty,1\n");
        let err = RegionDatasets::load(&dir).unwrap_err();
        let engine = err.downcast_ref::<EngineError>();
        assert!(matches!(engine, Some(EngineError::Dataset { name, .. }) if name == "transport.csv"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unknown_region() {
        let data = RegionDatasets::default();
        assert!(matches!(
            data.raw_sources("Atlantis"),
            Err(EngineError::RegionNotFound(ref n)) if n == "Atlantis"
        ));
        assert!(data.spatial_context("Atlantis").is_err());
    }

    #[test]
    fn test_in_memory_profile() {
        let mut data = RegionDatasets::default();
        data.insert_transport(
            "Abai",
            TransportRecord { airports: Some(0.0), ..Default::default() },
        );
        let profile = data.profile("Abai").unwrap();
        assert_relative_eq!(profile.transport.airports, 0.0);
        // Untouched fields keep defaults
        assert_relative_eq!(profile.transport.accessibility_index, 5.0);
        assert_relative_eq!(profile.population.population, 1_000_000.0);
    }
}
