use crate::models::{Asset, RelationshipLevel};
use std::collections::HashMap;
use std::sync::Arc;

/// Partner assets a vendor needs before it claims the showcase
pub const SHOWCASE_MIN_ASSETS: usize = 3;
/// Most assets one vendor may place in the showcase; the rest overflow to top picks
pub const SHOWCASE_MAX_ASSETS: usize = 5;

/// Showcase outcome of a scan: the first partner vendor to qualify and the
/// assets it places in the showcase and in top picks.
#[derive(Debug, Clone)]
pub struct ShowcaseClaim {
    pub vendor_id: String,
    pub showcase: Vec<Arc<Asset>>,
    pub overflow: Vec<Arc<Asset>>,
}

/// Tier partitions of one candidate list, computed in a single forward pass.
///
/// Every list keeps the candidates' original relevance order.
#[derive(Debug, Clone, Default)]
pub struct TierPartitions {
    pub partner: Vec<Arc<Asset>>,
    pub gold: Vec<Arc<Asset>>,
    pub silver: Vec<Arc<Asset>>,
    pub showcase: Option<ShowcaseClaim>,
}

impl TierPartitions {
    /// Scan `found` once. When `showcase_owned` is set no claim is tracked,
    /// but the tier partitions are still collected.
    pub fn scan(found: &[Arc<Asset>], showcase_owned: bool) -> Self {
        let mut partitions = TierPartitions::default();
        let mut tracker = (!showcase_owned).then(ShowcaseTracker::default);

        for asset in found {
            match asset.relationship_level() {
                RelationshipLevel::Gold => partitions.gold.push(asset.clone()),
                RelationshipLevel::Silver => partitions.silver.push(asset.clone()),
                RelationshipLevel::Basic => {}
                RelationshipLevel::Partner => {
                    partitions.partner.push(asset.clone());
                    if let Some(tracker) = tracker.as_mut() {
                        tracker.observe(asset);
                    }
                }
            }
        }

        partitions.showcase = tracker.and_then(ShowcaseTracker::into_claim);
        partitions
    }
}

/// First-to-qualify bookkeeping for the showcase.
///
/// `winner` is a key into `candidates`, so the winning list is the one the
/// map holds and later appends land in it directly.
#[derive(Debug, Default)]
struct ShowcaseTracker {
    candidates: HashMap<String, Vec<Arc<Asset>>>,
    winner: Option<String>,
    overflow: Vec<Arc<Asset>>,
}

impl ShowcaseTracker {
    fn observe(&mut self, asset: &Arc<Asset>) {
        let vendor_id = asset.vendor_id();

        match self.winner.as_deref().map(|winner| winner == vendor_id) {
            Some(true) => {
                let showcase = self.candidates.entry(vendor_id.to_string()).or_default();
                if showcase.len() >= SHOWCASE_MAX_ASSETS {
                    self.overflow.push(asset.clone());
                } else {
                    showcase.push(asset.clone());
                }
            }
            // Partner assets of other vendors are out once the showcase is taken
            Some(false) => {}
            None => {
                let assets = self.candidates.entry(vendor_id.to_string()).or_default();
                assets.push(asset.clone());
                if assets.len() >= SHOWCASE_MIN_ASSETS {
                    self.winner = Some(vendor_id.to_string());
                }
            }
        }
    }

    fn into_claim(mut self) -> Option<ShowcaseClaim> {
        let vendor_id = self.winner?;
        let showcase = self.candidates.remove(&vendor_id).unwrap_or_default();
        Some(ShowcaseClaim {
            vendor_id,
            showcase,
            overflow: self.overflow,
        })
    }
}
