// ============================================
// Relationship Based Placement
// ============================================
//
// Places assets into hotspots according to the sponsoring vendor's
// partnership tier:
// 1. The first Partner vendor to reach three assets in the result set owns
//    the Showcase (unless an earlier rule already filled it)
// 2. The owner places at most five assets there; the rest go to Top Picks
// 3. Every Partner and Gold asset is eligible for High Value and the Fold
// 4. Every Silver asset is eligible for the Fold
//
// The candidate list is scanned once into `TierPartitions`. The three
// placement steps below only read those partitions, so each can run as its
// own rule without touching the others.

pub mod partitions;

pub use partitions::{ShowcaseClaim, TierPartitions, SHOWCASE_MAX_ASSETS, SHOWCASE_MIN_ASSETS};

use crate::models::{HotspotKey, ResultSet};
use crate::services::pipeline::HotspotRule;
use tracing::debug;

/// Tier based showcase ownership plus the High Value / Fold fan-out
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipRule;

impl RelationshipRule {
    pub fn new() -> Self {
        Self
    }

    /// Run the rule once against `results`, appending to its hotspots in place.
    pub fn optimize(&self, results: &mut ResultSet) {
        // don't touch a showcase built by an earlier rule
        let showcase_owned = !results.hotspot(HotspotKey::Showcase).is_empty();
        let partitions = TierPartitions::scan(results.found(), showcase_owned);

        debug!(
            candidates = results.found().len(),
            partner = partitions.partner.len(),
            gold = partitions.gold.len(),
            silver = partitions.silver.len(),
            showcase_owned,
            showcase_vendor = partitions
                .showcase
                .as_ref()
                .map(|claim| claim.vendor_id.as_str()),
            "Relationship partitions computed"
        );

        claim_showcase(&partitions, results);
        fan_out_high_value(&partitions, results);
        fan_out_fold(&partitions, results);
    }
}

impl HotspotRule for RelationshipRule {
    fn name(&self) -> &'static str {
        "relationship"
    }

    fn optimize(&self, results: &mut ResultSet) {
        RelationshipRule::optimize(self, results)
    }
}

/// Write the winning vendor's assets to Showcase and its overflow to Top Picks.
pub fn claim_showcase(partitions: &TierPartitions, results: &mut ResultSet) {
    let Some(claim) = partitions.showcase.as_ref() else {
        return;
    };

    let top_picks = results.hotspot_mut(HotspotKey::TopPicks);
    for asset in &claim.overflow {
        top_picks.add_member(asset.clone());
    }

    let showcase = results.hotspot_mut(HotspotKey::Showcase);
    for asset in &claim.showcase {
        showcase.add_member(asset.clone());
    }
}

/// Partner assets, then Gold assets, into High Value.
pub fn fan_out_high_value(partitions: &TierPartitions, results: &mut ResultSet) {
    let high_value = results.hotspot_mut(HotspotKey::HighValue);
    for asset in partitions.partner.iter().chain(&partitions.gold) {
        high_value.add_member(asset.clone());
    }
}

/// Partner, Gold and then Silver assets into the Fold.
pub fn fan_out_fold(partitions: &TierPartitions, results: &mut ResultSet) {
    let fold = results.hotspot_mut(HotspotKey::Fold);
    for asset in partitions
        .partner
        .iter()
        .chain(&partitions.gold)
        .chain(&partitions.silver)
    {
        fold.add_member(asset.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, RelationshipLevel, Vendor};
    use std::sync::Arc;

    fn vendor(id: &str, level: RelationshipLevel) -> Arc<Vendor> {
        Arc::new(Vendor::new(id, level))
    }

    fn add(results: &mut ResultSet, id: &str, vendor: &Arc<Vendor>) -> Arc<Asset> {
        let asset = Arc::new(Asset::new(id, vendor.clone()));
        results.add_found(asset.clone());
        asset
    }

    #[test]
    fn test_showcase_claim_and_overflow() {
        let partner = vendor("p", RelationshipLevel::Partner);
        let mut results = ResultSet::new();
        for i in 1..=6 {
            add(&mut results, &format!("a{i}"), &partner);
        }

        RelationshipRule::new().optimize(&mut results);

        assert_eq!(
            results.hotspot(HotspotKey::Showcase).member_ids(),
            vec!["a1", "a2", "a3", "a4", "a5"]
        );
        assert_eq!(results.hotspot(HotspotKey::TopPicks).member_ids(), vec!["a6"]);
    }

    #[test]
    fn test_owned_showcase_left_alone() {
        let partner = vendor("p", RelationshipLevel::Partner);
        let basic = vendor("b", RelationshipLevel::Basic);
        let mut results = ResultSet::new();
        let seeded = add(&mut results, "seed", &basic);
        results.hotspot_mut(HotspotKey::Showcase).add_member(seeded);
        for i in 1..=6 {
            add(&mut results, &format!("a{i}"), &partner);
        }

        RelationshipRule::new().optimize(&mut results);

        assert_eq!(results.hotspot(HotspotKey::Showcase).member_ids(), vec!["seed"]);
        assert!(results.hotspot(HotspotKey::TopPicks).is_empty());
        assert_eq!(results.hotspot(HotspotKey::HighValue).len(), 6);
        assert_eq!(results.hotspot(HotspotKey::Fold).len(), 6);
    }

    #[test]
    fn test_fan_out_order() {
        let partner = vendor("p", RelationshipLevel::Partner);
        let gold = vendor("g", RelationshipLevel::Gold);
        let silver = vendor("s", RelationshipLevel::Silver);
        let basic = vendor("b", RelationshipLevel::Basic);
        let mut results = ResultSet::new();
        add(&mut results, "s1", &silver);
        add(&mut results, "g1", &gold);
        add(&mut results, "b1", &basic);
        add(&mut results, "p1", &partner);
        add(&mut results, "g2", &gold);

        RelationshipRule::new().optimize(&mut results);

        assert_eq!(
            results.hotspot(HotspotKey::HighValue).member_ids(),
            vec!["p1", "g1", "g2"]
        );
        assert_eq!(
            results.hotspot(HotspotKey::Fold).member_ids(),
            vec!["p1", "g1", "g2", "s1"]
        );
        assert!(results.hotspot(HotspotKey::Showcase).is_empty());
        assert!(results.slots_containing("b1").is_empty());
    }

    #[test]
    fn test_sub_steps_compose_independently() {
        let partner = vendor("p", RelationshipLevel::Partner);
        let mut results = ResultSet::new();
        for i in 1..=3 {
            add(&mut results, &format!("a{i}"), &partner);
        }
        let partitions = TierPartitions::scan(results.found(), false);

        fan_out_fold(&partitions, &mut results);

        assert_eq!(results.hotspot(HotspotKey::Fold).len(), 3);
        assert!(results.hotspot(HotspotKey::Showcase).is_empty());
        assert!(results.hotspot(HotspotKey::HighValue).is_empty());
    }

    #[test]
    fn test_empty_result_set_is_noop() {
        let mut results = ResultSet::new();
        RelationshipRule::new().optimize(&mut results);

        for key in HotspotKey::ALL {
            assert!(results.hotspot(key).is_empty());
        }
    }
}
