#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;
use chrono::NaiveDate;
use tokio::sync::mpsc::Receiver;
use iqx_dockbooking::config::{DockSettings, LoggingSettings, ScheduleSettings, ServerSettings, Settings};
use iqx_dockbooking::event_handling::BookingEvent;
use iqx_dockbooking::models::{ActivityCategory, BookingRequest, Dock, DockStatus, DockType, Priority, TemperatureZone, VehicleType};
use iqx_dockbooking::repositories::{BookingRepository, DockRegistry, InMemoryBookingRepository};
use iqx_dockbooking::scheduling::DockScheduler;

pub fn booking_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
}

pub fn create_mock_dock_settings(
    id: &str,
    status: DockStatus,
    max_vehicle_size: VehicleType,
    zones: &[TemperatureZone],
) -> DockSettings {
    DockSettings {
        id: id.to_string(),
        name: format!("Dock {}", id),
        dock_type: DockType::Rear,
        status,
        max_vehicle_size,
        temperature_zones: zones.iter().copied().collect::<BTreeSet<_>>(),
        equipment: vec!["leveler".to_string()],
    }
}

pub fn create_mock_dock(id: &str, status: DockStatus, max_vehicle_size: VehicleType, zones: &[TemperatureZone]) -> Dock {
    Dock::from(create_mock_dock_settings(id, status, max_vehicle_size, zones))
}

/// DOCK-1: trailer, ambient+chilled. DOCK-2: trailer, all zones. DOCK-3: truck, ambient.
/// DOCK-M: in maintenance, container, ambient.
pub fn create_mock_docks() -> Vec<DockSettings> {
    use TemperatureZone::*;
    vec![
        create_mock_dock_settings("DOCK-1", DockStatus::Active, VehicleType::Trailer, &[Ambient, Chilled]),
        create_mock_dock_settings("DOCK-2", DockStatus::Active, VehicleType::Trailer, &[Ambient, Chilled, Frozen]),
        create_mock_dock_settings("DOCK-3", DockStatus::Active, VehicleType::Truck, &[Ambient]),
        create_mock_dock_settings("DOCK-M", DockStatus::Maintenance, VehicleType::Container, &[Ambient]),
    ]
}

pub fn create_mock_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        logging: LoggingSettings {
            level: "info".to_string(),
            path: None,
        },
        schedule: ScheduleSettings::default(),
        docks: create_mock_docks(),
    }
}

pub fn create_mock_scheduler() -> (Arc<DockScheduler>, Receiver<BookingEvent>) {
    let settings = create_mock_settings();
    let registry = Arc::new(DockRegistry::from_settings(&settings.docks).unwrap());
    let repository: Arc<dyn BookingRepository> = Arc::new(InMemoryBookingRepository::new());
    let (scheduler, events) = DockScheduler::new(&settings.schedule, registry, repository).unwrap();
    (Arc::new(scheduler), events)
}

pub fn create_mock_request(dock_id: &str, start: &str, duration_minutes: u32) -> BookingRequest {
    BookingRequest {
        dock_id: dock_id.to_string(),
        date: booking_date(),
        start: start.to_string(),
        duration_minutes,
        carrier: "Nordic Freight".to_string(),
        booking_reference: format!("BK-{}-{}", dock_id, start.replace(':', "")),
        vehicle_type: Some(VehicleType::Truck),
        temperature: None,
        category: ActivityCategory::Receiving,
        priority: Priority::Medium,
        contact_person: Some("J. Berg".to_string()),
        phone: Some("+46 31 555 0100".to_string()),
        estimated_pallets: Some(18),
        notes: None,
    }
}
