//! Structured justification for a recommended zone
//!
//! Always exactly three entries in fixed order: attraction, infrastructure
//! adequacy, market.

use serde::{Deserialize, Serialize};

use super::PriorityBreakdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JustificationKind {
    /// Protected-area proximity bonus
    Attraction,
    /// Infrastructure adequacy points
    InfrastructureAdequacy,
    /// Existing facilities within the competitor radius
    Market,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Justification {
    pub kind: JustificationKind,
    pub value: f64,
    /// Named object the value refers to, if any
    pub reference: Option<String>,
    pub distance_km: Option<f64>,
}

impl Justification {
    /// One-line rendering for terminal output
    pub fn summary(&self) -> String {
        let place = match (&self.reference, self.distance_km) {
            (Some(name), Some(d)) => format!(" ({} at {:.1} km)", name, d),
            (Some(name), None) => format!(" ({})", name),
            _ => String::new(),
        };
        match self.kind {
            JustificationKind::Attraction => format!("attraction {:.1}{}", self.value, place),
            JustificationKind::InfrastructureAdequacy => format!("infrastructure {:.1}", self.value),
            JustificationKind::Market => format!("{} competitors nearby{}", self.value as u64, place),
        }
    }
}

pub fn build_reasoning(breakdown: &PriorityBreakdown) -> [Justification; 3] {
    let attraction = match &breakdown.best_protected {
        Some(pa) => Justification {
            kind: JustificationKind::Attraction,
            value: breakdown.protected_area_bonus,
            reference: Some(pa.name.clone()),
            distance_km: Some(pa.distance_km),
        },
        None => Justification {
            kind: JustificationKind::Attraction,
            value: 0.0,
            reference: None,
            distance_km: None,
        },
    };

    let infrastructure = Justification {
        kind: JustificationKind::InfrastructureAdequacy,
        value: breakdown.infrastructure_score,
        reference: None,
        distance_km: None,
    };

    let (reference, distance_km) = match &breakdown.nearest_population {
        Some((name, d)) => (Some(name.clone()), Some(*d)),
        None => (None, None),
    };
    let market = Justification {
        kind: JustificationKind::Market,
        value: breakdown.competitors_within_radius as f64,
        reference,
        distance_km,
    };

    [attraction, infrastructure, market]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{enumerate_candidates, score_candidate};
    use super::*;
    use crate::config::ZoneConfig;
    use crate::profile::RegionProfile;

    #[test]
    fn test_three_entries_in_order() {
        let ctx = mountain_context();
        let config = ZoneConfig::default();
        let candidates = enumerate_candidates("R", &ctx, &config);
        let b = score_candidate(&RegionProfile::defaults("R"), &candidates[0], &ctx, &config);
        let reasons = build_reasoning(&b);

        let kinds: Vec<_> = reasons.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                JustificationKind::Attraction,
                JustificationKind::InfrastructureAdequacy,
                JustificationKind::Market
            ]
        );
        assert_eq!(reasons[0].reference.as_deref(), Some("Ile-Alatau"));
        assert_eq!(reasons[2].reference.as_deref(), Some("Almaty"));
        assert_eq!(reasons[2].value, 0.0);
    }

    #[test]
    fn test_no_attraction_without_bonus() {
        let ctx = mountain_context();
        let config = ZoneConfig::default();
        let candidates = enumerate_candidates("R", &ctx, &config);
        // Almaty is ~18 km from the park; move the reach so the bonus vanishes
        let config = ZoneConfig { protected_area_reach_km: 1.0, ..config };
        let almaty = candidates.iter().find(|c| c.origin.name() == "Almaty");
        let b = score_candidate(&RegionProfile::defaults("R"), almaty.unwrap(), &ctx, &config);
        let reasons = build_reasoning(&b);
        assert_eq!(reasons[0].value, 0.0);
        assert_eq!(reasons[0].reference, None);
        assert!(reasons[1].summary().starts_with("infrastructure"));
    }
}
