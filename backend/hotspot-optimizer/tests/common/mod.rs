//! Result set fixtures for integration tests
//!
//! Hands out unique asset and vendor ids so each test can build a result set
//! in relevance order without naming every asset.

#![allow(dead_code)]

use hotspot_optimizer::{Asset, HotspotKey, RelationshipLevel, ResultSet, Vendor};
use std::sync::Arc;

#[derive(Default)]
pub struct Fixture {
    pub results: ResultSet,
    next_id: usize,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    pub fn vendor(&mut self, level: RelationshipLevel) -> Arc<Vendor> {
        let id = self.next_id("vendor-");
        Arc::new(Vendor::new(id, level))
    }

    /// Append one asset from `vendor` to the found list.
    pub fn found(&mut self, vendor: &Arc<Vendor>) -> Arc<Asset> {
        let id = self.next_id("asset-");
        let asset = Arc::new(Asset::new(id, vendor.clone()));
        self.results.add_found(asset.clone());
        asset
    }

    pub fn found_many(&mut self, vendor: &Arc<Vendor>, count: usize) -> Vec<Arc<Asset>> {
        (0..count).map(|_| self.found(vendor)).collect()
    }

    pub fn prefill(&mut self, key: HotspotKey, asset: &Arc<Asset>) {
        self.results.hotspot_mut(key).add_member(asset.clone());
    }

    pub fn members(&self, key: HotspotKey) -> Vec<String> {
        self.results
            .hotspot(key)
            .members()
            .iter()
            .map(|a| a.id.clone())
            .collect()
    }

    /// Times `asset` appears in `key`
    pub fn count_in(&self, key: HotspotKey, asset: &Asset) -> usize {
        self.results
            .hotspot(key)
            .members()
            .iter()
            .filter(|member| member.as_ref() == asset)
            .count()
    }
}

pub fn ids(assets: &[Arc<Asset>]) -> Vec<String> {
    assets.iter().map(|a| a.id.clone()).collect()
}
