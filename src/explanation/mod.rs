//! Per-factor explanation notes
//!
//! Notes are structured data; rendering them as text is left to callers.

pub mod types;

pub use types::{FactorNote, RegionExplanation, Strength};

use crate::metrics::{Factor, FactorDetails};
use crate::scorer::AnalysisResult;

/// Explain an analysis result factor by factor
pub fn explain(result: &AnalysisResult) -> RegionExplanation {
    let notes = Factor::ALL
        .iter()
        .map(|&factor| factor_note(factor, &result.details))
        .collect();

    RegionExplanation {
        region: result.region.clone(),
        total_score: result.total_score,
        category: result.category,
        decision: result.decision,
        notes,
    }
}

/// Note for one factor, taking its supporting value from the calculator detail
pub fn factor_note(factor: Factor, details: &FactorDetails) -> FactorNote {
    let (score, supporting_value, supporting_label) = match factor {
        Factor::Demand => (
            details.demand.score,
            details.demand.supply_demand_ratio,
            "supply/demand ratio",
        ),
        Factor::ProtectedAreas => (
            details.protected_areas.score,
            details.protected_areas.total_objects,
            "protected objects",
        ),
        Factor::Nature => (
            details.nature.score,
            details.nature.forest_coverage_pct,
            "forest coverage %",
        ),
        Factor::Transport => (
            details.transport.score,
            details.transport.base_component,
            "accessibility points",
        ),
        Factor::Infrastructure => (
            details.infrastructure.score,
            details.infrastructure.hospitals,
            "hospital points",
        ),
        Factor::FirePrevention => (
            details.fire.score,
            details.fire.human_caused_incidents,
            "human-caused fires",
        ),
        Factor::Saturation => (
            details.saturation.score,
            details.saturation.density,
            "facilities per 1000 km²",
        ),
    };

    let (min, max) = factor.bounds();
    FactorNote {
        factor,
        score,
        max,
        strength: Strength::from_band(score, min, max),
        supporting_value,
        supporting_label: supporting_label.to_string(),
    }
}
