pub mod pipeline;
pub mod relationship;

pub use pipeline::{HotspotOptimizer, HotspotRule};
pub use relationship::RelationshipRule;
