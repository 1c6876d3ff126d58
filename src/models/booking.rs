//! # Booking Data Structures

//! This module defines the `Booking` record held by the booking store, the `BookingRequest` submitted by the
//! booking form, and the compact `BookingSummary` used in conflict reports and occupancy views.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::errors::{DockBookingError, DockBookingResult};
use crate::models::clock_time::ClockTime;
use crate::models::dock::{TemperatureZone, VehicleType};
use crate::models::states::{ActivityCategory, BookingStatus, Priority};

/// A time-bounded claim on one dock by one carrier visit.
///
/// `end` always equals `start + duration_minutes`; the only way to change the interval is through
/// [`Booking::reschedule`], which keeps the two in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier assigned by the store on insertion
    pub id: Uuid,
    /// The dock this booking claims
    pub dock_id: String,
    /// Calendar date of the visit
    pub date: NaiveDate,
    /// Start of the claimed interval (inclusive)
    pub start: ClockTime,
    /// End of the claimed interval (exclusive)
    pub end: ClockTime,
    /// Length of the visit in minutes, always positive
    pub duration_minutes: u32,
    /// Name of the carrier
    pub carrier: String,
    /// External, human-facing booking reference
    pub booking_reference: String,
    /// Vehicle class the carrier arrives with, if known
    pub vehicle_type: Option<VehicleType>,
    /// Required temperature zone; `None` means any zone will do
    pub temperature: Option<TemperatureZone>,
    pub category: ActivityCategory,
    pub status: BookingStatus,
    pub priority: Priority,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub estimated_pallets: Option<u32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    /// Builds a new `Scheduled` booking from a validated request
    ///
    /// The id is a placeholder; the booking store assigns the real one on insertion.
    pub fn from_request(request: &BookingRequest, start: ClockTime, end: ClockTime, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::nil(),
            dock_id: request.dock_id.clone(),
            date: request.date,
            start,
            end,
            duration_minutes: request.duration_minutes,
            carrier: request.carrier.trim().to_string(),
            booking_reference: request.booking_reference.trim().to_string(),
            vehicle_type: request.vehicle_type,
            temperature: request.temperature,
            category: request.category,
            status: BookingStatus::Scheduled,
            priority: request.priority,
            contact_person: request.contact_person.clone(),
            phone: request.phone.clone(),
            estimated_pallets: request.estimated_pallets,
            notes: request.notes.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every editable field with the request's values, keeping id, status and creation time
    pub fn apply_request(&self, request: &BookingRequest, start: ClockTime, end: ClockTime, now: NaiveDateTime) -> Self {
        Self {
            id: self.id,
            status: self.status,
            created_at: self.created_at,
            ..Booking::from_request(request, start, end, now)
        }
    }

    /// Moves the booking to another dock and start time, keeping its duration
    ///
    /// # Returns
    ///
    /// * `Ok(Booking)`: the rescheduled copy; `self` is left untouched
    /// * `Err(DockBookingError::InvalidBooking)`: if the visit would run past midnight
    pub fn reschedule(&self, dock_id: &str, start: ClockTime, now: NaiveDateTime) -> DockBookingResult<Self> {
        let end = start.checked_add(self.duration_minutes).ok_or_else(|| {
            DockBookingError::InvalidBooking(vec![format!(
                "a {} minute visit starting at {} runs past midnight",
                self.duration_minutes, start
            )])
        })?;
        Ok(Self {
            dock_id: dock_id.to_string(),
            start,
            end,
            updated_at: now,
            ..self.clone()
        })
    }

    /// Half-open interval `[start, end)` in minutes since midnight
    pub fn interval(&self) -> (u32, u32) {
        (self.start.minutes(), self.end.minutes())
    }

    pub fn summary(&self) -> BookingSummary {
        BookingSummary::from(self)
    }
}

/// The booking form payload, used for both creation and full updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(alias = "resourceId")]
    pub dock_id: String,
    pub date: NaiveDate,
    /// Start time as an `HH:MM` label
    pub start: String,
    pub duration_minutes: u32,
    pub carrier: String,
    pub booking_reference: String,
    #[serde(default)]
    pub vehicle_type: Option<VehicleType>,
    #[serde(default)]
    pub temperature: Option<TemperatureZone>,
    #[serde(default)]
    pub category: ActivityCategory,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub estimated_pallets: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Validates the form and derives the booked interval
    ///
    /// A malformed start label is reported on its own as `InvalidTimeFormat`. All other problems are
    /// collected and reported together as `InvalidBooking`.
    ///
    /// # Returns
    ///
    /// * `Ok((start, end))`: the interval with `end = start + duration_minutes`
    /// * `Err(DockBookingError)`: describing what the form got wrong
    pub fn validate(&self) -> DockBookingResult<(ClockTime, ClockTime)> {
        let start: ClockTime = self.start.parse()?;
        let mut problems = Vec::new();

        if self.dock_id.trim().is_empty() {
            problems.push("dock id is required".to_string());
        }
        if self.carrier.trim().is_empty() {
            problems.push("carrier is required".to_string());
        }
        if self.booking_reference.trim().is_empty() {
            problems.push("booking reference is required".to_string());
        }
        if let Some(phone) = &self.phone {
            if !phone.chars().all(|c| c.is_ascii_digit() || " +-()".contains(c)) {
                problems.push(format!("phone number {:?} contains invalid characters", phone));
            }
        }

        let end = if self.duration_minutes == 0 {
            problems.push("duration must be greater than zero".to_string());
            None
        } else {
            let end = start.checked_add(self.duration_minutes);
            if end.is_none() {
                problems.push(format!(
                    "a {} minute visit starting at {} runs past midnight",
                    self.duration_minutes, start
                ));
            }
            end
        };

        match end {
            Some(end) if problems.is_empty() => Ok((start, end)),
            _ => Err(DockBookingError::InvalidBooking(problems)),
        }
    }
}

/// A compact view of a booking, used where the full record would be noise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub id: Uuid,
    pub booking_reference: String,
    pub carrier: String,
    pub start: ClockTime,
    pub end: ClockTime,
    pub status: BookingStatus,
    pub priority: Priority,
}

impl From<&Booking> for BookingSummary {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            booking_reference: booking.booking_reference.clone(),
            carrier: booking.carrier.clone(),
            start: booking.start,
            end: booking.end,
            status: booking.status,
            priority: booking.priority,
        }
    }
}
