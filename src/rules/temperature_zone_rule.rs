use crate::models::Dock;
use crate::rules::{BookingRequirements, CompatibilityRule, RuleViolation};

/// A required temperature zone must be one the dock supports. No requirement means ambient/any.
pub struct TemperatureZoneRule;

impl CompatibilityRule for TemperatureZoneRule {
    fn name(&self) -> &'static str {
        "TemperatureZoneRule"
    }

    fn check(&self, dock: &Dock, requirements: &BookingRequirements) -> Option<RuleViolation> {
        let zone = requirements.temperature?;
        if dock.supports_zone(zone) {
            return None;
        }
        let supported = dock
            .temperature_zones
            .iter()
            .map(|z| z.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Some(RuleViolation::new(
            self.name(),
            format!("dock {} does not support {} (supports: {})", dock.id, zone, supported),
        ))
    }
}
