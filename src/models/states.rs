//! # Dock Booking State Enums

//! This module defines the closed enumerations used by docks and bookings.
//! Dock operational status and booking lifecycle status are deliberately separate types and never share values.

use serde::{Deserialize, Serialize};
use derive_more::Display;

/// Represents the operational status of a dock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DockStatus {
    /// The dock accepts new bookings.
    Active,
    /// The dock is out of service for maintenance.
    Maintenance,
    /// The dock is blocked by operations (e.g. damaged leveler, yard closure).
    Blocked,
}

/// Represents the lifecycle status of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// The visit is booked but the carrier has not arrived.
    Scheduled,
    /// The carrier checked in at the gate.
    Arrived,
    /// Loading or unloading is in progress.
    Loading,
    /// The visit finished.
    Completed,
    /// Loading was interrupted and is running late.
    Delayed,
    /// The carrier never showed up.
    NoShow,
    /// The booking was cancelled and no longer claims its slot.
    Cancelled,
}

impl BookingStatus {
    /// Returns the statuses reachable from `self` in one step
    pub fn allowed_transitions(self) -> &'static [BookingStatus] {
        use BookingStatus::*;
        match self {
            Scheduled => &[Arrived, NoShow, Cancelled],
            Arrived => &[Loading, Cancelled],
            Loading => &[Completed, Delayed],
            Delayed => &[Loading, Completed, Cancelled],
            Completed | NoShow | Cancelled => &[],
        }
    }

    /// Checks whether the lifecycle allows moving from `self` to `next`
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// A terminal status has no outgoing transitions
    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Cancelled bookings release their slot; every other status keeps claiming it.
    pub fn claims_slot(self) -> bool {
        self != BookingStatus::Cancelled
    }
}

/// Represents the priority of a carrier visit. Ordered from most to least urgent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy, PartialOrd, Ord, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Represents what the visit does at the dock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    /// Inbound goods.
    #[default]
    Receiving,
    /// Outbound goods.
    Dispatch,
    /// A placeholder that blocks the dock without a carrier visit.
    Blocked,
}

/// Represents where a dock sits relative to the trailer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DockType {
    Rear,
    Side,
}
