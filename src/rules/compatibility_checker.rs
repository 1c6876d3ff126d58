use std::sync::Arc;
use tracing::debug;
use crate::models::Dock;
use crate::rules::{BookingRequirements, CompatibilityRule, DockActiveRule, RuleViolation, TemperatureZoneRule, VehicleSizeRule};

/// Runs a set of compatibility rules against a dock
#[derive(Clone)]
pub struct CompatibilityChecker {
    rules: Vec<Arc<dyn CompatibilityRule>>,
}

impl Default for CompatibilityChecker {
    /// The standard rule set: dock must be active, vehicle must fit, temperature zone must be supported
    fn default() -> Self {
        Self::new(vec![
            Arc::new(DockActiveRule),
            Arc::new(VehicleSizeRule),
            Arc::new(TemperatureZoneRule),
        ])
    }
}

impl CompatibilityChecker {
    pub fn new(rules: Vec<Arc<dyn CompatibilityRule>>) -> Self {
        Self { rules }
    }

    /// Evaluates every rule and collects all violations
    ///
    /// # Arguments
    ///
    /// * `dock`: The dock being considered
    /// * `requirements`: What the booking needs from the dock
    ///
    /// # Returns
    ///
    /// An empty vector when the dock can host the booking, otherwise one entry per failed rule
    pub fn evaluate(&self, dock: &Dock, requirements: &BookingRequirements) -> Vec<RuleViolation> {
        let violations: Vec<RuleViolation> = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(dock, requirements))
            .collect();
        debug!("Compatibility of dock {} with {:?}: {:?}", dock.id, requirements, violations);
        violations
    }

    pub fn is_compatible(&self, dock: &Dock, requirements: &BookingRequirements) -> bool {
        self.evaluate(dock, requirements).is_empty()
    }
}
