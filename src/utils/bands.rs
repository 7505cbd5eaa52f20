//! Band Tables
//!
//! Threshold lookups used by the factor calculators. Tables are plain serde
//! structs so an alternative methodology can be swapped in from JSON without
//! touching calculator code.
//!
//! Two shapes are supported:
//! - `BandTable`: ascending upper bounds, first band whose bound admits the value wins
//! - `StepTable`: descending lower bounds, first step the value reaches wins

use serde::{Deserialize, Serialize};

/// One band of an ascending table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Upper bound of the band
    pub upper: f64,
    /// Score assigned when the value falls into this band
    pub score: f64,
    /// When true the band admits `value == upper`
    #[serde(default)]
    pub inclusive: bool,
}

impl Band {
    pub fn below(upper: f64, score: f64) -> Self {
        Self { upper, score, inclusive: false }
    }

    pub fn up_to(upper: f64, score: f64) -> Self {
        Self { upper, score, inclusive: true }
    }

    fn admits(&self, value: f64) -> bool {
        if self.inclusive {
            value <= self.upper
        } else {
            value < self.upper
        }
    }
}

/// Ascending band table with a fallback score above the last band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub bands: Vec<Band>,
    pub fallback: f64,
}

impl BandTable {
    pub fn new(bands: Vec<Band>, fallback: f64) -> Self {
        Self { bands, fallback }
    }

    /// Look up the score for a value
    ///
    /// Bands are scanned in order; NaN never matches a band and maps to the
    /// first band's score so it cannot leak into a total.
    pub fn lookup(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.bands.first().map_or(self.fallback, |b| b.score);
        }
        self.bands
            .iter()
            .find(|band| band.admits(value))
            .map_or(self.fallback, |band| band.score)
    }

    /// Index of the band a value falls into (`bands.len()` for the fallback)
    pub fn band_index(&self, value: f64) -> usize {
        if value.is_nan() {
            return 0;
        }
        self.bands
            .iter()
            .position(|band| band.admits(value))
            .unwrap_or(self.bands.len())
    }

    /// Upper bounds must be non-decreasing for lookups to be meaningful
    pub fn is_ascending(&self) -> bool {
        self.bands.windows(2).all(|w| w[0].upper <= w[1].upper)
    }
}

/// One step of a descending table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Inclusive lower bound
    pub min: f64,
    pub score: f64,
}

impl Step {
    pub fn at_least(min: f64, score: f64) -> Self {
        Self { min, score }
    }
}

/// Descending step table: first step with `value >= min` wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTable {
    pub steps: Vec<Step>,
    pub fallback: f64,
}

impl StepTable {
    pub fn new(steps: Vec<Step>, fallback: f64) -> Self {
        Self { steps, fallback }
    }

    pub fn lookup(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.fallback;
        }
        self.steps
            .iter()
            .find(|step| value >= step.min)
            .map_or(self.fallback, |step| step.score)
    }

    pub fn is_descending(&self) -> bool {
        self.steps.windows(2).all(|w| w[0].min >= w[1].min)
    }
}

/// Clamp a percentage into [0, 100], mapping NaN and infinities to 0
#[inline]
pub fn clamp_pct(value: f64) -> f64 {
    if !value.is_finite() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Clamp a count or magnitude to be non-negative, mapping NaN and infinities to 0
#[inline]
pub fn non_negative(value: f64) -> f64 {
    if !value.is_finite() {
        0.0
    } else {
        value.max(0.0)
    }
}

/// Divide, returning 0 when the denominator is not positive
#[inline]
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 && denominator.is_finite() {
        numerator / denominator
    } else {
        0.0
    }
}
