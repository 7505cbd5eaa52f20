//! Deterministic zone ordering

use std::cmp::Ordering;

use super::RecommendedZone;

/// Priority descending, then nearest population ascending (unknown last), then id
pub fn compare_zones(a: &RecommendedZone, b: &RecommendedZone) -> Ordering {
    b.priority
        .total_cmp(&a.priority)
        .then_with(|| match (a.nearest_population_km, b.nearest_population_km) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort in place; stable and idempotent
pub fn rank_zones(zones: &mut [RecommendedZone]) {
    zones.sort_by(compare_zones);
}
