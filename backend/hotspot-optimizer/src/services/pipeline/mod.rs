use crate::models::{HotspotKey, ResultSet};
use crate::services::relationship::RelationshipRule;
use tracing::{debug, info, instrument};

/// A placement rule run against one result set.
///
/// Rules only append to hotspots. The optimizer runs them one at a time, so
/// a rule may rely on everything earlier rules have placed.
#[cfg_attr(test, mockall::automock)]
pub trait HotspotRule: Send + Sync {
    /// Returns a stable name for logging.
    fn name(&self) -> &'static str;

    fn optimize(&self, results: &mut ResultSet);
}

/// Ordered set of placement rules applied to each result set
pub struct HotspotOptimizer {
    rules: Vec<Box<dyn HotspotRule>>,
}

impl Default for HotspotOptimizer {
    fn default() -> Self {
        Self::new().with_rule(RelationshipRule::new())
    }
}

impl HotspotOptimizer {
    /// Optimizer with no rules registered
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: impl HotspotRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Apply every rule, in registration order, exactly once.
    #[instrument(skip_all, fields(candidates = results.found().len()))]
    pub fn optimize(&self, results: &mut ResultSet) {
        for rule in &self.rules {
            let before = slot_sizes(results);
            rule.optimize(results);
            debug!(
                rule = rule.name(),
                before = ?before,
                after = ?slot_sizes(results),
                "Rule applied"
            );
        }

        info!(
            rules = self.rules.len(),
            slots = ?slot_sizes(results),
            "Hotspot optimization complete"
        );
    }
}

fn slot_sizes(results: &ResultSet) -> Vec<(HotspotKey, usize)> {
    results
        .hotspots()
        .filter(|(_, hotspot)| !hotspot.is_empty())
        .map(|(key, hotspot)| (key, hotspot.len()))
        .collect()
}
