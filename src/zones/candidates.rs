//! Candidate location enumeration
//!
//! Order is deterministic: protected-area objects first (in dataset order),
//! then qualifying population centers. A candidate within the dedupe radius
//! of an earlier one is dropped, so protected-area sites win over towns.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{ProtectedCategory, SpatialContext};
use crate::config::ZoneConfig;
use crate::utils::Coordinate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateOrigin {
    ProtectedArea { name: String, category: ProtectedCategory },
    PopulationCenter { name: String, population: f64 },
}

impl CandidateOrigin {
    pub fn name(&self) -> &str {
        match self {
            CandidateOrigin::ProtectedArea { name, .. } => name,
            CandidateOrigin::PopulationCenter { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// `<region>/<origin name>`, suffixed `#2`, `#3`, ... when the name repeats
    pub id: String,
    pub coordinate: Coordinate,
    pub origin: CandidateOrigin,
}

/// Enumerate candidate sites for one region
pub fn enumerate_candidates(region: &str, spatial: &SpatialContext, config: &ZoneConfig) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut taken_ids: FxHashSet<String> = FxHashSet::default();

    let from_protected = spatial.protected_objects.iter().map(|pa| Candidate {
        id: format!("{}/{}", region, pa.name),
        coordinate: pa.location,
        origin: CandidateOrigin::ProtectedArea {
            name: pa.name.clone(),
            category: pa.category,
        },
    });

    // Underserved: large enough and no existing facility within the competitor radius
    let from_centers = spatial
        .population_centers
        .iter()
        .filter(|c| c.population >= config.min_center_population)
        .filter(|c| spatial.facilities_within(&c.location, config.competitor_radius_km) == 0)
        .map(|c| Candidate {
            id: format!("{}/{}", region, c.name),
            coordinate: c.location,
            origin: CandidateOrigin::PopulationCenter {
                name: c.name.clone(),
                population: c.population,
            },
        });

    for candidate in from_protected.chain(from_centers) {
        let duplicate = candidates
            .iter()
            .any(|kept| kept.coordinate.distance_km(&candidate.coordinate) < config.dedupe_radius_km);
        if duplicate {
            continue;
        }

        // Same-named objects far apart are distinct sites
        let mut candidate = candidate;
        let mut n = 2;
        while taken_ids.contains(&candidate.id) {
            candidate.id = format!("{}/{}#{}", region, candidate.origin.name(), n);
            n += 1;
        }
        taken_ids.insert(candidate.id.clone());
        candidates.push(candidate);
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_protected_areas_then_centers() {
        let candidates = enumerate_candidates("R", &mountain_context(), &ZoneConfig::default());
        let names: Vec<&str> = candidates.iter().map(|c| c.origin.name()).collect();
        // Village is below the population minimum
        assert_eq!(names, vec!["Ile-Alatau", "Remote Refuge", "Almaty"]);
        assert_eq!(candidates[2].id, "R/Almaty");
    }

    #[test]
    fn test_served_center_excluded() {
        let mut ctx = mountain_context();
        ctx.facilities.push(camp("City camp", 43.26, 76.91));
        let candidates = enumerate_candidates("R", &ctx, &ZoneConfig::default());
        assert!(candidates.iter().all(|c| c.origin.name() != "Almaty"));
    }

    #[test]
    fn test_near_duplicates_dropped() {
        let mut ctx = mountain_context();
        // ~1 km from Ile-Alatau
        ctx.protected_objects.push(pa("Twin Monument", ProtectedCategory::NatureMonument, 43.105, 77.005));
        let candidates = enumerate_candidates("R", &ctx, &ZoneConfig::default());
        assert!(candidates.iter().all(|c| c.origin.name() != "Twin Monument"));
    }

    #[test]
    fn test_same_name_far_apart_gets_distinct_ids() {
        let mut ctx = SpatialContext::default();
        // ~55 km apart, well beyond the dedupe radius
        ctx.protected_objects.push(pa("Lake", ProtectedCategory::NatureMonument, 43.0, 77.0));
        ctx.protected_objects.push(pa("Lake", ProtectedCategory::NatureMonument, 43.5, 77.0));
        ctx.protected_objects.push(pa("Lake", ProtectedCategory::NatureMonument, 44.0, 77.0));
        let candidates = enumerate_candidates("R", &ctx, &ZoneConfig::default());

        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["R/Lake", "R/Lake#2", "R/Lake#3"]);
    }
}
