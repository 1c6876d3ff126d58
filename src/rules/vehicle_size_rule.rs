use crate::models::Dock;
use crate::rules::{BookingRequirements, CompatibilityRule, RuleViolation};

/// The booked vehicle must not be larger than the dock's maximum vehicle size.
pub struct VehicleSizeRule;

impl CompatibilityRule for VehicleSizeRule {
    fn name(&self) -> &'static str {
        "VehicleSizeRule"
    }

    fn check(&self, dock: &Dock, requirements: &BookingRequirements) -> Option<RuleViolation> {
        let vehicle = requirements.vehicle_type?;
        if vehicle.fits_within(dock.max_vehicle_size) {
            return None;
        }
        Some(RuleViolation::new(
            self.name(),
            format!(
                "{} exceeds the maximum vehicle size {} of dock {}",
                vehicle, dock.max_vehicle_size, dock.id
            ),
        ))
    }
}
