//! # Dock Representation

//! This module defines the `Dock` struct together with the capability attributes a dock advertises:
//! the largest vehicle it can service, the temperature zones it supports, and its equipment.

use std::collections::BTreeSet;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::models::states::{DockStatus, DockType};

/// Vehicle classes, ordered from smallest to largest.
///
/// A dock whose maximum vehicle size is `Container` can service a `Van`, a `Truck` or a `Container`,
/// but not a `Trailer` or a `Railcar`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Van,
    Truck,
    Container,
    Trailer,
    Railcar,
}

impl VehicleType {
    /// Position of the vehicle class in the size ordering, starting at 1 for `Van`
    pub fn size_rank(self) -> u8 {
        match self {
            VehicleType::Van => 1,
            VehicleType::Truck => 2,
            VehicleType::Container => 3,
            VehicleType::Trailer => 4,
            VehicleType::Railcar => 5,
        }
    }

    /// Checks whether a vehicle of this class fits a dock rated for `max`
    pub fn fits_within(self, max: VehicleType) -> bool {
        self.size_rank() <= max.size_rank()
    }
}

/// Temperature zones a dock can be equipped for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureZone {
    Ambient,
    Chilled,
    Frozen,
}

/// Represents a physical loading dock that hosts one vehicle at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dock {
    /// The unique identifier of the dock (e.g. "DOCK-01")
    pub id: String,
    /// Display name shown to operators
    pub name: String,
    /// Where the dock sits relative to the trailer
    pub dock_type: DockType,
    /// Operational status; only `Active` docks accept bookings
    pub status: DockStatus,
    /// The largest vehicle class the dock can service
    pub max_vehicle_size: VehicleType,
    /// Temperature zones the dock supports
    pub temperature_zones: BTreeSet<TemperatureZone>,
    /// Free-form equipment tags (e.g. "leveler", "forklift")
    #[serde(default)]
    pub equipment: Vec<String>,
}

impl Dock {
    pub fn is_active(&self) -> bool {
        self.status == DockStatus::Active
    }

    pub fn supports_zone(&self, zone: TemperatureZone) -> bool {
        self.temperature_zones.contains(&zone)
    }
}
