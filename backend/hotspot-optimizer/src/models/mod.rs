pub mod document;

pub use document::{DocumentError, ResultSetDocument};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Contractual partnership tier of a vendor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelationshipLevel {
    Partner,
    Gold,
    Silver,
    Basic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub relationship_level: RelationshipLevel,
    #[serde(default)]
    pub royalty_rate: f32,
}

impl Vendor {
    pub fn new(id: impl Into<String>, relationship_level: RelationshipLevel) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            relationship_level,
            royalty_rate: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AssetTopic {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

/// Sales figures over a reporting window (used by sibling rules)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PurchaseInfo {
    pub times_shown: u64,
    pub times_purchased: u64,
    pub total_revenue: f64,
    pub total_royalties_owed: f64,
}

/// A search result candidate. Immutable once produced upstream.
///
/// Two assets are the same asset when their ids match; hotspot membership
/// is decided by this equality, not by pointer identity.
#[derive(Debug, Clone)]
pub struct Asset {
    pub id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub preview_url: Option<String>,
    pub purchase_info_last_30_days: PurchaseInfo,
    pub purchase_info_last_24_hours: PurchaseInfo,
    pub topics: Vec<AssetTopic>,
    pub vendor: Arc<Vendor>,
}

impl Asset {
    pub fn new(id: impl Into<String>, vendor: Arc<Vendor>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            thumbnail_url: None,
            preview_url: None,
            purchase_info_last_30_days: PurchaseInfo::default(),
            purchase_info_last_24_hours: PurchaseInfo::default(),
            topics: Vec::new(),
            vendor,
        }
    }

    pub fn relationship_level(&self) -> RelationshipLevel {
        self.vendor.relationship_level
    }

    pub fn vendor_id(&self) -> &str {
        &self.vendor.id
    }
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Asset {}

/// Named promotional positions on a search results page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HotspotKey {
    Showcase,
    TopPicks,
    HighValue,
    Fold,
    Highlight,
    Deals,
}

impl HotspotKey {
    pub const ALL: [HotspotKey; 6] = [
        HotspotKey::Showcase,
        HotspotKey::TopPicks,
        HotspotKey::HighValue,
        HotspotKey::Fold,
        HotspotKey::Highlight,
        HotspotKey::Deals,
    ];
}

impl fmt::Display for HotspotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Ordered, duplicate-free list of assets placed in one promotional slot.
///
/// Members are only ever appended; nothing here removes or reorders them.
#[derive(Debug, Clone, Default)]
pub struct Hotspot {
    members: Vec<Arc<Asset>>,
}

impl Hotspot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `asset` unless an equal asset is already a member.
    /// Returns `true` when the asset was appended.
    pub fn add_member(&mut self, asset: Arc<Asset>) -> bool {
        if self.contains(&asset) {
            return false;
        }
        self.members.push(asset);
        true
    }

    pub fn contains(&self, asset: &Asset) -> bool {
        self.members.iter().any(|member| **member == *asset)
    }

    pub fn members(&self) -> &[Arc<Asset>] {
        &self.members
    }

    pub fn member_ids(&self) -> Vec<&str> {
        self.members.iter().map(|a| a.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

/// Candidates for one query, in relevance order, plus the hotspots built from them
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    found: Vec<Arc<Asset>>,
    hotspots: BTreeMap<HotspotKey, Hotspot>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_found(&mut self, asset: Arc<Asset>) {
        self.found.push(asset);
    }

    pub fn found(&self) -> &[Arc<Asset>] {
        &self.found
    }

    /// Read access to a hotspot; untouched hotspots read as empty.
    pub fn hotspot(&self, key: HotspotKey) -> &Hotspot {
        static EMPTY: Hotspot = Hotspot {
            members: Vec::new(),
        };
        self.hotspots.get(&key).unwrap_or(&EMPTY)
    }

    /// Mutable access to a hotspot, creating it on first use.
    pub fn hotspot_mut(&mut self, key: HotspotKey) -> &mut Hotspot {
        self.hotspots.entry(key).or_default()
    }

    pub fn hotspots(&self) -> impl Iterator<Item = (HotspotKey, &Hotspot)> {
        self.hotspots.iter().map(|(key, hotspot)| (*key, hotspot))
    }

    /// Keys of every hotspot that currently holds `asset_id`.
    pub fn slots_containing(&self, asset_id: &str) -> Vec<HotspotKey> {
        self.hotspots
            .iter()
            .filter(|(_, hotspot)| hotspot.members.iter().any(|m| m.id == asset_id))
            .map(|(key, _)| *key)
            .collect()
    }
}
