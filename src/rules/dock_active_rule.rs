use crate::models::Dock;
use crate::rules::{BookingRequirements, CompatibilityRule, RuleViolation};

/// Only active docks accept bookings; docks in maintenance or blocked reject everything.
pub struct DockActiveRule;

impl CompatibilityRule for DockActiveRule {
    fn name(&self) -> &'static str {
        "DockActiveRule"
    }

    fn check(&self, dock: &Dock, _requirements: &BookingRequirements) -> Option<RuleViolation> {
        if dock.is_active() {
            None
        } else {
            Some(RuleViolation::new(
                self.name(),
                format!("dock {} is {}", dock.id, dock.status),
            ))
        }
    }
}
