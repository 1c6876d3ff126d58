//! # Booking Events

//! Events emitted by the scheduler after every successful mutation. Consumers (notification feeds, audit
//! logs) receive them through the `EventDispatcher` channel; they describe what happened, never what was attempted.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::{Booking, BookingStatus, ClockTime, DockStatus};

/// Represents a change to the booking schedule or to a dock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookingEvent {
    /// A booking was accepted.
    Created(Booking),
    /// A booking's details were replaced.
    Updated(Booking),
    /// A booking was reassigned to another dock and/or start time.
    Moved(BookingMovedEvent),
    /// A booking advanced through its lifecycle.
    StatusChanged(BookingStatusChangedEvent),
    /// A booking was deleted.
    Deleted(BookingDeletedEvent),
    /// A dock's operational status changed.
    DockStatusChanged(DockStatusChangedEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingMovedEvent {
    pub booking_id: Uuid,
    pub booking_reference: String,
    pub date: NaiveDate,
    pub from_dock: String,
    pub to_dock: String,
    pub from_start: ClockTime,
    pub to_start: ClockTime,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingStatusChangedEvent {
    pub booking_id: Uuid,
    pub booking_reference: String,
    pub dock_id: String,
    pub old_status: BookingStatus,
    pub new_status: BookingStatus,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDeletedEvent {
    pub booking_id: Uuid,
    pub booking_reference: String,
    pub dock_id: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockStatusChangedEvent {
    pub dock_id: String,
    pub old_status: DockStatus,
    pub new_status: DockStatus,
    pub timestamp: NaiveDateTime,
}

impl BookingEvent {
    /// Short operator-facing message, the text a notification toast would show
    pub fn message(&self) -> String {
        match self {
            BookingEvent::Created(b) => format!(
                "Booking {} for {} created on {} at {} {}",
                b.booking_reference, b.carrier, b.dock_id, b.date, b.start
            ),
            BookingEvent::Updated(b) => format!("Booking {} updated", b.booking_reference),
            BookingEvent::Moved(e) => format!(
                "Booking {} moved from {} {} to {} {}",
                e.booking_reference, e.from_dock, e.from_start, e.to_dock, e.to_start
            ),
            BookingEvent::StatusChanged(e) => format!(
                "Booking {} is now {} (was {})",
                e.booking_reference, e.new_status, e.old_status
            ),
            BookingEvent::Deleted(e) => format!("Booking {} deleted from {}", e.booking_reference, e.dock_id),
            BookingEvent::DockStatusChanged(e) => format!(
                "Dock {} is now {} (was {})",
                e.dock_id, e.new_status, e.old_status
            ),
        }
    }
}
