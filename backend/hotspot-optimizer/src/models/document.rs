// ============================================
// Result Set Document (wire format)
// ============================================
//
// JSON form of a result set as handed over by the retrieval stage:
// vendors are listed once and referenced by id from each asset, so the
// in-memory model can share one `Arc<Vendor>` across all of its assets.
//
// All references are resolved before a `ResultSet` is produced. A document
// that fails validation never reaches the rule pipeline.

use super::{Asset, AssetTopic, HotspotKey, PurchaseInfo, ResultSet, Vendor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed result set document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Asset {asset_id} references unknown vendor {vendor_id}")]
    UnknownVendor { asset_id: String, vendor_id: String },

    #[error("Hotspot {hotspot} references asset {asset_id} which is not in the result set")]
    UnknownAsset { hotspot: HotspotKey, asset_id: String },

    #[error("Vendor {0} is listed more than once")]
    DuplicateVendor(String),

    #[error("Asset {0} is listed more than once")]
    DuplicateAsset(String),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub purchase_info_last_30_days: PurchaseInfo,
    #[serde(default)]
    pub purchase_info_last_24_hours: PurchaseInfo,
    #[serde(default)]
    pub topics: Vec<AssetTopic>,
    pub vendor_id: String,
}

impl From<&Asset> for AssetRecord {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            title: asset.title.clone(),
            thumbnail_url: asset.thumbnail_url.clone(),
            preview_url: asset.preview_url.clone(),
            purchase_info_last_30_days: asset.purchase_info_last_30_days.clone(),
            purchase_info_last_24_hours: asset.purchase_info_last_24_hours.clone(),
            topics: asset.topics.clone(),
            vendor_id: asset.vendor.id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSetDocument {
    pub vendors: Vec<Vendor>,
    pub found: Vec<AssetRecord>,
    /// Hotspot members by asset id, in slot order
    #[serde(default)]
    pub hotspots: BTreeMap<HotspotKey, Vec<String>>,
}

impl ResultSetDocument {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Resolve vendor and asset references into a `ResultSet`.
    pub fn into_result_set(self) -> Result<ResultSet> {
        let mut vendors: HashMap<String, Arc<Vendor>> = HashMap::with_capacity(self.vendors.len());
        for vendor in self.vendors {
            if vendors.contains_key(&vendor.id) {
                return Err(DocumentError::DuplicateVendor(vendor.id));
            }
            vendors.insert(vendor.id.clone(), Arc::new(vendor));
        }

        let mut assets: HashMap<String, Arc<Asset>> = HashMap::with_capacity(self.found.len());
        let mut found = Vec::with_capacity(self.found.len());
        for record in self.found {
            let vendor = vendors
                .get(&record.vendor_id)
                .cloned()
                .ok_or_else(|| DocumentError::UnknownVendor {
                    asset_id: record.id.clone(),
                    vendor_id: record.vendor_id.clone(),
                })?;

            if assets.contains_key(&record.id) {
                return Err(DocumentError::DuplicateAsset(record.id));
            }

            let asset = Arc::new(Asset {
                id: record.id,
                title: record.title,
                thumbnail_url: record.thumbnail_url,
                preview_url: record.preview_url,
                purchase_info_last_30_days: record.purchase_info_last_30_days,
                purchase_info_last_24_hours: record.purchase_info_last_24_hours,
                topics: record.topics,
                vendor,
            });
            assets.insert(asset.id.clone(), asset.clone());
            found.push(asset);
        }

        // Resolve every hotspot reference before touching the result set
        let mut prefilled = Vec::new();
        for (key, ids) in self.hotspots {
            for asset_id in ids {
                let asset = assets
                    .get(&asset_id)
                    .cloned()
                    .ok_or(DocumentError::UnknownAsset {
                        hotspot: key,
                        asset_id,
                    })?;
                prefilled.push((key, asset));
            }
        }

        let mut results = ResultSet::new();
        for asset in found {
            results.add_found(asset);
        }
        for (key, asset) in prefilled {
            results.hotspot_mut(key).add_member(asset);
        }

        Ok(results)
    }
}

impl From<&ResultSet> for ResultSetDocument {
    fn from(results: &ResultSet) -> Self {
        let mut vendors: Vec<Vendor> = Vec::new();
        for asset in results.found() {
            if !vendors.iter().any(|v| v.id == asset.vendor.id) {
                vendors.push(asset.vendor.as_ref().clone());
            }
        }

        let hotspots = results
            .hotspots()
            .filter(|(_, hotspot)| !hotspot.is_empty())
            .map(|(key, hotspot)| {
                let ids = hotspot.members().iter().map(|a| a.id.clone()).collect();
                (key, ids)
            })
            .collect();

        Self {
            vendors,
            found: results
                .found()
                .iter()
                .map(|a| AssetRecord::from(a.as_ref()))
                .collect(),
            hotspots,
        }
    }
}
