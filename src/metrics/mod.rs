//! Factor calculators for regional potential scoring
//!
//! Each factor is implemented in its own module as a pure function of a
//! `RegionProfile` and its slice of `ScoringConfig`.

pub mod m1_demand;
pub mod m2_protected_areas;
pub mod m3_nature;
pub mod m4_transport;
pub mod m5_infrastructure;
pub mod m6_fire_prevention;
pub mod m7_saturation;

// Re-export calculator functions
pub use m1_demand::{calculate_demand, DemandResult};
pub use m2_protected_areas::{calculate_protected_areas, CategoryContributions, ProtectedAreaResult};
pub use m3_nature::{calculate_nature, NatureResult};
pub use m4_transport::{calculate_transport, TransportResult};
pub use m5_infrastructure::{calculate_infrastructure, InfrastructureResult};
pub use m6_fire_prevention::{calculate_fire_bonus, FirePreventionResult};
pub use m7_saturation::{calculate_saturation, SaturationResult};

use serde::{Deserialize, Serialize};

/// Identifies one of the seven factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Demand,
    ProtectedAreas,
    Nature,
    Transport,
    Infrastructure,
    FirePrevention,
    Saturation,
}

impl Factor {
    pub const ALL: [Factor; 7] = [
        Factor::Demand,
        Factor::ProtectedAreas,
        Factor::Nature,
        Factor::Transport,
        Factor::Infrastructure,
        Factor::FirePrevention,
        Factor::Saturation,
    ];

    /// Documented band of the sub-score as (min, max)
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Factor::Demand => (0.0, 25.0),
            Factor::ProtectedAreas => (0.0, 20.0),
            Factor::Nature => (0.0, 15.0),
            Factor::Transport => (0.0, 15.0),
            Factor::Infrastructure => (0.0, 10.0),
            Factor::FirePrevention => (0.0, 5.0),
            Factor::Saturation => (-15.0, 0.0),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Factor::Demand => "Supply/demand gap",
            Factor::ProtectedAreas => "Protected-area attraction",
            Factor::Nature => "Forest and water",
            Factor::Transport => "Transport accessibility",
            Factor::Infrastructure => "Infrastructure",
            Factor::FirePrevention => "Fire-prevention bonus",
            Factor::Saturation => "Saturation penalty",
        }
    }
}

/// The seven sub-scores of one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub demand: f64,
    pub protected_areas: f64,
    pub nature: f64,
    pub transport: f64,
    pub infrastructure: f64,
    pub fire_bonus: f64,
    /// Non-positive
    pub saturation_penalty: f64,
}

impl FactorScores {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Demand => self.demand,
            Factor::ProtectedAreas => self.protected_areas,
            Factor::Nature => self.nature,
            Factor::Transport => self.transport,
            Factor::Infrastructure => self.infrastructure,
            Factor::FirePrevention => self.fire_bonus,
            Factor::Saturation => self.saturation_penalty,
        }
    }

    /// Unclamped sum of all sub-scores
    pub fn sum(&self) -> f64 {
        Factor::ALL.iter().map(|&f| self.get(f)).sum()
    }
}

/// Full per-factor detail bundle consumed by report layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorDetails {
    pub demand: DemandResult,
    pub protected_areas: ProtectedAreaResult,
    pub nature: NatureResult,
    pub transport: TransportResult,
    pub infrastructure: InfrastructureResult,
    pub fire: FirePreventionResult,
    pub saturation: SaturationResult,
}

impl FactorDetails {
    pub fn scores(&self) -> FactorScores {
        FactorScores {
            demand: self.demand.score,
            protected_areas: self.protected_areas.score,
            nature: self.nature.score,
            transport: self.transport.score,
            infrastructure: self.infrastructure.score,
            fire_bonus: self.fire.score,
            saturation_penalty: self.saturation.score,
        }
    }
}
