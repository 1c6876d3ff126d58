//! # Time Grid
//!
//! Conversion between `HH:MM` labels and minute offsets from midnight, and generation of the
//! fixed set of bookable slots for a day. Slots are never stored; they are recomputed from the
//! grid configuration whenever a view needs them.

use serde::{Deserialize, Serialize};
use crate::errors::{DockBookingError, DockBookingResult};
use crate::models::ClockTime;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parses a strict 24 hour `HH:MM` label into minutes since midnight.
///
/// Both fields must be exactly two digits, hours in `[0, 23]` and minutes in `[0, 59]`.
///
/// # Returns
///
/// * `Ok(u32)`: minutes since midnight
/// * `Err(DockBookingError::InvalidTimeFormat)`: if the label does not match the pattern or is out of range
pub fn to_minutes(label: &str) -> DockBookingResult<u32> {
    let invalid = || DockBookingError::InvalidTimeFormat(format!("expected HH:MM, got {:?}", label));

    let (hours, minutes) = label.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as an `HH:MM` label.
///
/// Fails with `InvalidTimeFormat` for values outside `[0, 1439]` instead of clamping.
pub fn from_minutes(minutes: u32) -> DockBookingResult<String> {
    if minutes >= MINUTES_PER_DAY {
        return Err(DockBookingError::InvalidTimeFormat(format!(
            "{} minutes is outside [0, {}]",
            minutes,
            MINUTES_PER_DAY - 1
        )));
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Generates `count` slot labels starting at `start_minute`, `step_minutes` apart.
///
/// The sequence is finite and restartable: cloning the iterator restarts it. Slots that would fall
/// past `23:59` are not produced, so the sequence may be shorter than `count`.
pub fn generate_slots(
    start_minute: u32,
    step_minutes: u32,
    count: usize,
) -> impl Iterator<Item = String> + Clone {
    slot_minutes(start_minute, step_minutes, count).filter_map(|m| from_minutes(m).ok())
}

/// Minute offsets of the slots that fall within the day; stops at the first one that does not
fn slot_minutes(start_minute: u32, step_minutes: u32, count: usize) -> impl Iterator<Item = u32> + Clone {
    (0..count)
        .map_while(move |i| {
            u32::try_from(i)
                .ok()?
                .checked_mul(step_minutes)?
                .checked_add(start_minute)
        })
        .take_while(|m| *m < MINUTES_PER_DAY)
}

/// The grid configuration of one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// First slot of the day
    pub start: ClockTime,
    /// Width of a slot in minutes
    pub step_minutes: u32,
    /// Number of slots in a day
    pub slot_count: usize,
}

impl TimeGrid {
    pub fn new(start: ClockTime, step_minutes: u32, slot_count: usize) -> DockBookingResult<Self> {
        if step_minutes == 0 || step_minutes >= MINUTES_PER_DAY {
            return Err(DockBookingError::ConfigError(format!(
                "grid step must be between 1 and {} minutes, got {}",
                MINUTES_PER_DAY - 1,
                step_minutes
            )));
        }
        Ok(Self { start, step_minutes, slot_count })
    }

    /// Slot labels of the day in order
    pub fn slots(&self) -> impl Iterator<Item = String> + Clone {
        generate_slots(self.start.minutes(), self.step_minutes, self.slot_count)
    }

    /// Slot start times as `ClockTime`, in order
    pub fn slot_times(&self) -> Vec<ClockTime> {
        slot_minutes(self.start.minutes(), self.step_minutes, self.slot_count)
            .filter_map(|m| ClockTime::from_minutes(m).ok())
            .collect()
    }
}

/// The daily window during which docks are operated; the denominator of utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl OperatingWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> DockBookingResult<Self> {
        if end <= start {
            return Err(DockBookingError::ConfigError(format!(
                "operating window end {} must be after start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn minutes(&self) -> u32 {
        self.end.minutes() - self.start.minutes()
    }

    /// Checks whether the half-open interval `[start, end)` lies inside the window
    pub fn contains(&self, start: ClockTime, end: ClockTime) -> bool {
        start >= self.start && end <= self.end
    }
}
