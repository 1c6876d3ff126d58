//! # Compatibility Rules
//!
//! Each rule checks one capability of a dock against the requirements of a booking. The
//! `CompatibilityChecker` runs every rule and reports all violations at once, so the booking form can
//! tell the operator everything that is wrong with a dock choice.

pub mod compatibility_checker;
pub mod dock_active_rule;
pub mod vehicle_size_rule;
pub mod temperature_zone_rule;

pub use compatibility_checker::*;
pub use dock_active_rule::DockActiveRule;
pub use vehicle_size_rule::VehicleSizeRule;
pub use temperature_zone_rule::TemperatureZoneRule;

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::models::{Booking, BookingRequest, Dock, TemperatureZone, VehicleType};

/// What a booking asks of the dock hosting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookingRequirements {
    pub vehicle_type: Option<VehicleType>,
    pub temperature: Option<TemperatureZone>,
}

impl From<&BookingRequest> for BookingRequirements {
    fn from(request: &BookingRequest) -> Self {
        Self {
            vehicle_type: request.vehicle_type,
            temperature: request.temperature,
        }
    }
}

impl From<&Booking> for BookingRequirements {
    fn from(booking: &Booking) -> Self {
        Self {
            vehicle_type: booking.vehicle_type,
            temperature: booking.temperature,
        }
    }
}

/// A failed compatibility rule with an operator-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    /// Name of the rule that failed
    pub rule: String,
    /// Why the dock was rejected
    pub reason: String,
}

impl RuleViolation {
    pub fn new(rule: &str, reason: impl Into<String>) -> Self {
        Self { rule: rule.to_string(), reason: reason.into() }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule, self.reason)
    }
}

/// A single dock capability check
pub trait CompatibilityRule: Send + Sync {
    /// Stable rule name reported in violations
    fn name(&self) -> &'static str;

    /// Checks the dock against the requirements
    ///
    /// # Returns
    ///
    /// * `None` if the dock satisfies the rule
    /// * `Some(RuleViolation)` describing the failure otherwise
    fn check(&self, dock: &Dock, requirements: &BookingRequirements) -> Option<RuleViolation>;
}
