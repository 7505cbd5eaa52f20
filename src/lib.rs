//! Recreational Potential Scoring
//!
//! Ranks regions by their potential for new recreational facilities
//! (campsites) and proposes concrete build zones inside each region.
//!
//! Structure:
//! - `profile/`, `data/`: typed region profiles and the Polars CSV loader
//! - `metrics/`: the seven factor calculators (M1-M7)
//! - `scorer/`, `classification/`: composition, category and build gate
//! - `zones/`: candidate enumeration, priority, planning, ranking
//! - `explanation/`: structured per-factor notes
//! - `batch/`: parallel analysis over every known region
//! - `config/`, `utils/`: all weights and band tables, shared helpers

pub mod batch;
pub mod classification;
pub mod config;
pub mod data;
pub mod error;
pub mod explanation;
pub mod metrics;
pub mod profile;
pub mod scorer;
pub mod utils;
pub mod zones;

// Re-export commonly used types
pub use batch::{analyze_region, run_batch, AnalysisBatch, RegionReport};
pub use classification::{BuildDecision, Category};
pub use config::ScoringConfig;
pub use data::RegionDatasets;
pub use error::{EngineError, EngineResult};
pub use explanation::{explain, FactorNote, RegionExplanation, Strength};
pub use metrics::{Factor, FactorDetails, FactorScores};
pub use profile::{RawSources, RegionProfile};
pub use scorer::{AnalysisResult, PotentialScorer};
pub use utils::Coordinate;
pub use zones::{recommend_zones, RecommendedZone, SpatialContext};
