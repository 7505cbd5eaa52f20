//! Utility modules shared across calculators and loaders
//!
//! - Bands: threshold tables and input clamping
//! - Geo: coordinates and great-circle distances
//! - Columns: DataFrame column extraction with validation

pub mod bands;
pub mod columns;
pub mod geo;

// Re-export commonly used types
pub use bands::{clamp_pct, non_negative, safe_ratio, Band, BandTable, Step, StepTable};
pub use geo::{haversine_km, linear_decay, Coordinate};
