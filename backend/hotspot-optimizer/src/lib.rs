pub mod config;
pub mod models;
pub mod services;

pub use config::Config;
pub use models::{Asset, Hotspot, HotspotKey, RelationshipLevel, ResultSet, ResultSetDocument, Vendor};
pub use services::{HotspotOptimizer, HotspotRule, RelationshipRule};
