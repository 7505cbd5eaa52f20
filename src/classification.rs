//! Category and build-decision classification of total scores

use serde::{Deserialize, Serialize};

use crate::config::ClassificationConfig;

/// Potential category of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Low,
    Medium,
    High,
    VeryHigh,
    Exceptional,
}

impl Category {
    /// Map a total score to its category (thresholds are inclusive lower bounds)
    pub fn from_score(total: f64, config: &ClassificationConfig) -> Self {
        match total {
            t if t >= config.exceptional => Category::Exceptional,
            t if t >= config.very_high => Category::VeryHigh,
            t if t >= config.high => Category::High,
            t if t >= config.medium => Category::Medium,
            _ => Category::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Exceptional => "exceptional",
            Category::VeryHigh => "very high",
            Category::High => "high",
            Category::Medium => "medium",
            Category::Low => "low",
        }
    }

    /// Fixed recommendation text for the category
    pub fn recommendation(self) -> &'static str {
        match self {
            Category::Exceptional => {
                "Priority region: build new facilities as soon as possible; demand and natural attraction are both strong"
            }
            Category::VeryHigh => {
                "Recommended for development: plan new facilities in the next investment cycle"
            }
            Category::High => {
                "Good potential: develop selectively near the strongest protected areas and population centers"
            }
            Category::Medium => {
                "Moderate potential: consider small facilities after improving infrastructure"
            }
            Category::Low => {
                "Low potential: new facilities are not recommended under current conditions"
            }
        }
    }
}

/// Build/no-build decision derived from the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildDecision {
    Build,
    ProceedWithCaution,
    DoNotBuild,
}

impl BuildDecision {
    pub fn from_score(total: f64, config: &ClassificationConfig) -> Self {
        if total >= config.build_gate {
            BuildDecision::Build
        } else if total >= config.caution_gate {
            BuildDecision::ProceedWithCaution
        } else {
            BuildDecision::DoNotBuild
        }
    }
}
