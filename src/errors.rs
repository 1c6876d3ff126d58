/// # Dock Booking Errors
/// This module defines the `DockBookingError` enum, which encapsulates every failure the IQX Dock Booking service can report.
/// All scheduling failures are detected before any mutation, so a returned error always means the booking store is unchanged.


use thiserror::Error;
use std::io;
use uuid::Uuid;
use crate::models::{BookingStatus, BookingSummary};
use crate::rules::RuleViolation;

#[derive(Error, Debug)]
pub enum DockBookingError {
    /// A time label did not match `HH:MM` or was outside the 24 hour clock.
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// The requested dock is not registered.
    #[error("Dock not found: {0}")]
    DockNotFound(String),

    /// The requested booking does not exist.
    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    /// The candidate interval overlaps one or more live bookings on the same dock.
    #[error("Slot conflict on dock {dock_id}: overlaps {}", describe_conflicts(.conflicts))]
    SlotConflict {
        dock_id: String,
        conflicts: Vec<BookingSummary>,
    },

    /// The dock cannot service the booking; every failed rule is listed.
    #[error("Dock {dock_id} cannot host this booking: {}", describe_violations(.violations))]
    IncompatibleDock {
        dock_id: String,
        violations: Vec<RuleViolation>,
    },

    /// The booking lifecycle does not allow the requested status change.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// The submitted booking form failed validation.
    #[error("Invalid booking: {}", .0.join("; "))]
    InvalidBooking(Vec<String>),

    /// The dock is still referenced by bookings and cannot be removed.
    #[error("Dock {dock_id} is referenced by {bookings} booking(s)")]
    DockInUse {
        dock_id: String,
        bookings: usize,
    },

    /// A dock with the same id is already registered.
    #[error("Dock already registered: {0}")]
    DuplicateDock(String),

    /// Represents errors arising from misconfigurations or invalid settings.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Represents errors during the initialization of the logging system.
    #[error("Logging initialization error: {0}")]
    LoggingError(String),
}

impl DockBookingError {
    /// Machine-readable kind, stable across releases and used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            DockBookingError::InvalidTimeFormat(_) => "INVALID_TIME_FORMAT",
            DockBookingError::DockNotFound(_) => "DOCK_NOT_FOUND",
            DockBookingError::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            DockBookingError::SlotConflict { .. } => "SLOT_CONFLICT",
            DockBookingError::IncompatibleDock { .. } => "INCOMPATIBLE_DOCK",
            DockBookingError::InvalidTransition { .. } => "INVALID_TRANSITION",
            DockBookingError::InvalidBooking(_) => "INVALID_BOOKING",
            DockBookingError::DockInUse { .. } => "DOCK_IN_USE",
            DockBookingError::DuplicateDock(_) => "DUPLICATE_DOCK",
            DockBookingError::ConfigError(_) => "CONFIG_ERROR",
            DockBookingError::IoError(_) => "IO_ERROR",
            DockBookingError::LoggingError(_) => "LOGGING_ERROR",
        }
    }
}

fn describe_conflicts(conflicts: &[BookingSummary]) -> String {
    conflicts
        .iter()
        .map(|c| format!("{} ({}-{})", c.booking_reference, c.start, c.end))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_violations(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<config::ConfigError> for DockBookingError {
    fn from(err: config::ConfigError) -> Self {
        DockBookingError::ConfigError(err.to_string())
    }
}

pub type DockBookingResult<T> = Result<T, DockBookingError>;
