//! Batch analysis over every known region
//!
//! Regions are scored in parallel with Rayon; results keep the dataset's
//! region order and can also be looked up by name.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::data::RegionDatasets;
use crate::error::EngineResult;
use crate::scorer::{AnalysisResult, PotentialScorer};
use crate::zones::RecommendedZone;

/// Score and zones for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    pub analysis: AnalysisResult,
    pub zones: Vec<RecommendedZone>,
    /// Datasets that had no entry for this region
    pub defaulted: Vec<String>,
}

/// Reports in region order plus a name index
#[derive(Debug, Clone, Default)]
pub struct AnalysisBatch {
    reports: Vec<RegionReport>,
    index: FxHashMap<String, usize>,
}

impl AnalysisBatch {
    fn from_reports(reports: Vec<RegionReport>) -> Self {
        let index = reports
            .iter()
            .enumerate()
            .map(|(i, r)| (r.analysis.region.clone(), i))
            .collect();
        Self { reports, index }
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn get(&self, region: &str) -> Option<&RegionReport> {
        self.index.get(region).map(|&i| &self.reports[i])
    }

    /// Reports in dataset region order
    pub fn iter(&self) -> impl Iterator<Item = &RegionReport> {
        self.reports.iter()
    }

    /// Reports by total score descending; ties keep region order
    pub fn ranked(&self) -> Vec<&RegionReport> {
        let mut ranked: Vec<&RegionReport> = self.reports.iter().collect();
        ranked.sort_by(|a, b| b.analysis.total_score.total_cmp(&a.analysis.total_score));
        ranked
    }

    pub fn into_reports(self) -> Vec<RegionReport> {
        self.reports
    }
}

/// Score one region and recommend its zones
pub fn analyze_region(
    scorer: &PotentialScorer,
    datasets: &RegionDatasets,
    region: &str,
) -> EngineResult<RegionReport> {
    let raw = datasets.raw_sources(region)?;
    let spatial = datasets.spatial_context(region)?;

    let defaulted: Vec<String> = raw.missing_datasets().into_iter().map(String::from).collect();
    if !defaulted.is_empty() {
        warn!("{}: no data in {:?}, defaults used", region, defaulted);
    }

    let profile = crate::profile::load(region, &raw);
    let analysis = scorer.analyze(&profile);
    let zones = scorer.recommend_zones(&profile, &spatial);

    Ok(RegionReport { analysis, zones, defaulted })
}

/// Analyze every region in the datasets in parallel
pub fn run_batch(scorer: &PotentialScorer, datasets: &RegionDatasets) -> EngineResult<AnalysisBatch> {
    let regions = datasets.regions();
    info!("Analyzing {} regions", regions.len());

    let reports = regions
        .par_iter()
        .map(|region| analyze_region(scorer, datasets, region))
        .collect::<EngineResult<Vec<_>>>()?;

    let build = reports.iter().filter(|r| r.analysis.should_build()).count();
    let zones: usize = reports.iter().map(|r| r.zones.len()).sum();
    info!("  Build recommended: {}/{}", build, reports.len());
    info!("  Zones proposed: {}", zones);

    Ok(AnalysisBatch::from_reports(reports))
}
