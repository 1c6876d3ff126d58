mod common;

use std::sync::Arc;
use iqx_dockbooking::models::{Dock, DockStatus, TemperatureZone, VehicleType};
use iqx_dockbooking::rules::{
    BookingRequirements, CompatibilityChecker, CompatibilityRule, DockActiveRule, RuleViolation,
    TemperatureZoneRule, VehicleSizeRule,
};

use common::{create_mock_dock, create_mock_request};

fn requirements(vehicle_type: Option<VehicleType>, temperature: Option<TemperatureZone>) -> BookingRequirements {
    BookingRequirements { vehicle_type, temperature }
}

fn chilled_trailer_dock() -> Dock {
    create_mock_dock(
        "DOCK-1",
        DockStatus::Active,
        VehicleType::Trailer,
        &[TemperatureZone::Ambient, TemperatureZone::Chilled],
    )
}

#[test]
fn test_dock_active_rule() {
    let rule = DockActiveRule;
    let mut dock = chilled_trailer_dock();
    let needs = requirements(None, None);

    assert!(rule.check(&dock, &needs).is_none());

    dock.status = DockStatus::Maintenance;
    let violation = rule.check(&dock, &needs).expect("maintenance dock should be rejected");
    assert_eq!(violation.rule, "DockActiveRule");
    assert!(violation.reason.contains("DOCK-1"));

    dock.status = DockStatus::Blocked;
    assert!(rule.check(&dock, &needs).is_some());
}

#[test]
fn test_vehicle_size_ordering() {
    use VehicleType::*;
    assert!(Van < Truck && Truck < Container && Container < Trailer && Trailer < Railcar);
    assert!(Van.fits_within(Trailer));
    assert!(Trailer.fits_within(Trailer));
    assert!(!Railcar.fits_within(Trailer));
    assert!(!Container.fits_within(Truck));
}

#[test]
fn test_vehicle_size_rule() {
    let rule = VehicleSizeRule;
    let dock = create_mock_dock("DOCK-3", DockStatus::Active, VehicleType::Truck, &[TemperatureZone::Ambient]);

    assert!(rule.check(&dock, &requirements(Some(VehicleType::Van), None)).is_none());
    assert!(rule.check(&dock, &requirements(Some(VehicleType::Truck), None)).is_none());
    // unspecified vehicle is not constrained
    assert!(rule.check(&dock, &requirements(None, None)).is_none());

    let violation = rule
        .check(&dock, &requirements(Some(VehicleType::Trailer), None))
        .expect("trailer should not fit a truck dock");
    assert_eq!(violation.rule, "VehicleSizeRule");
}

#[test]
fn test_temperature_zone_rule() {
    let rule = TemperatureZoneRule;
    let dock = chilled_trailer_dock();

    assert!(rule.check(&dock, &requirements(None, None)).is_none());
    assert!(rule.check(&dock, &requirements(None, Some(TemperatureZone::Ambient))).is_none());
    assert!(rule.check(&dock, &requirements(None, Some(TemperatureZone::Chilled))).is_none());

    let violation = rule
        .check(&dock, &requirements(None, Some(TemperatureZone::Frozen)))
        .expect("frozen load should not fit a chilled dock");
    assert_eq!(violation.rule, "TemperatureZoneRule");
    assert_eq!(violation.to_string(), format!("TemperatureZoneRule: {}", violation.reason));
}

#[test]
fn test_checker_collects_all_violations() {
    let checker = CompatibilityChecker::default();
    let dock = create_mock_dock("DOCK-M", DockStatus::Maintenance, VehicleType::Truck, &[TemperatureZone::Ambient]);

    let violations = checker.evaluate(&dock, &requirements(Some(VehicleType::Railcar), Some(TemperatureZone::Frozen)));
    let rules: Vec<&str> = violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(rules, vec!["DockActiveRule", "VehicleSizeRule", "TemperatureZoneRule"]);
    assert!(!checker.is_compatible(&dock, &requirements(None, None)));
}

#[test]
fn test_checker_accepts_compatible_request() {
    let checker = CompatibilityChecker::default();
    let dock = chilled_trailer_dock();
    let mut request = create_mock_request("DOCK-1", "09:00", 60);
    request.temperature = Some(TemperatureZone::Chilled);

    assert!(checker.is_compatible(&dock, &BookingRequirements::from(&request)));
    assert!(checker.evaluate(&dock, &BookingRequirements::from(&request)).is_empty());
}

struct EquipmentRule;

impl CompatibilityRule for EquipmentRule {
    fn name(&self) -> &'static str {
        "EquipmentRule"
    }

    fn check(&self, dock: &Dock, _requirements: &BookingRequirements) -> Option<RuleViolation> {
        if dock.equipment.iter().any(|e| e == "forklift") {
            None
        } else {
            Some(RuleViolation::new(self.name(), format!("dock {} has no forklift", dock.id)))
        }
    }
}

#[test]
fn test_checker_with_custom_rule_set() {
    let checker = CompatibilityChecker::new(vec![Arc::new(EquipmentRule)]);
    let mut dock = chilled_trailer_dock();
    dock.status = DockStatus::Blocked;

    let violations = checker.evaluate(&dock, &requirements(Some(VehicleType::Railcar), None));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, "EquipmentRule");

    dock.equipment.push("forklift".to_string());
    assert!(checker.is_compatible(&dock, &requirements(None, None)));
}
