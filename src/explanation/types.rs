use serde::{Deserialize, Serialize};

use crate::classification::{BuildDecision, Category};
use crate::metrics::Factor;

/// Structured explanation of one region's score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionExplanation {
    pub region: String,
    pub total_score: f64,
    pub category: Category,
    pub decision: BuildDecision,
    /// One note per factor, in `Factor::ALL` order
    pub notes: Vec<FactorNote>,
}

impl RegionExplanation {
    pub fn strengths(&self) -> impl Iterator<Item = &FactorNote> {
        self.notes.iter().filter(|n| n.strength == Strength::Strong)
    }

    pub fn weaknesses(&self) -> impl Iterator<Item = &FactorNote> {
        self.notes.iter().filter(|n| n.strength == Strength::Weak)
    }
}

/// Note for a single factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorNote {
    pub factor: Factor,
    pub score: f64,
    /// Best achievable sub-score (0 for the saturation penalty)
    pub max: f64,
    pub strength: Strength,
    /// Intermediate value that drove the score
    pub supporting_value: f64,
    pub supporting_label: String, // "supply/demand ratio", "facilities per 1000 km²"
}

/// How much a factor helped the region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl Strength {
    /// Position of `score` within the factor's band: top 30% strong, bottom 40% weak
    pub fn from_band(score: f64, min: f64, max: f64) -> Self {
        let span = max - min;
        let position = if span > 0.0 { (score - min) / span } else { 0.0 };
        match position {
            p if p >= 0.7 => Strength::Strong,
            p if p >= 0.4 => Strength::Moderate,
            _ => Strength::Weak,
        }
    }
}
