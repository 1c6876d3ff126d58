//! # Conflict Detection
//!
//! Two intervals `[a_start, a_end)` and `[b_start, b_end)` overlap iff `a_start < b_end && a_end > b_start`.
//! A booking ending at 10:00 and another starting at 10:00 do not conflict. Cancelled bookings never conflict.
//!
//! The scan is linear over the bookings of one dock on one date, which stays small for a single site.

use chrono::NaiveDate;
use uuid::Uuid;
use crate::models::{Booking, BookingSummary, ClockTime};
use crate::repositories::BookingRepository;

/// Half-open interval overlap test on minute offsets
pub fn overlaps(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

/// A prospective claim on a dock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSlot {
    pub dock_id: String,
    pub date: NaiveDate,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl CandidateSlot {
    pub fn new(dock_id: impl Into<String>, date: NaiveDate, start: ClockTime, end: ClockTime) -> Self {
        Self { dock_id: dock_id.into(), date, start, end }
    }

    pub fn interval(&self) -> (u32, u32) {
        (self.start.minutes(), self.end.minutes())
    }
}

/// Returns the live bookings among `existing` that the candidate would overlap.
///
/// # Arguments
///
/// * `existing`: bookings to scan; entries on other docks or dates are ignored
/// * `candidate`: the interval being claimed
/// * `exclude`: the id of the booking being edited or moved, which never conflicts with itself
pub fn find_conflicts<'a>(
    existing: &'a [Booking],
    candidate: &CandidateSlot,
    exclude: Option<Uuid>,
) -> Vec<&'a Booking> {
    existing
        .iter()
        .filter(|b| b.dock_id == candidate.dock_id && b.date == candidate.date)
        .filter(|b| b.status.claims_slot())
        .filter(|b| Some(b.id) != exclude)
        .filter(|b| overlaps(candidate.interval(), b.interval()))
        .collect()
}

/// Checks candidates against the bookings held in a repository
pub struct ConflictDetector<'a> {
    repository: &'a dyn BookingRepository,
}

impl<'a> ConflictDetector<'a> {
    pub fn new(repository: &'a dyn BookingRepository) -> Self {
        Self { repository }
    }

    /// Summaries of every live booking the candidate overlaps, in start order
    pub fn conflicts(&self, candidate: &CandidateSlot, exclude: Option<Uuid>) -> Vec<BookingSummary> {
        let existing = self.repository.bookings_on(&candidate.dock_id, candidate.date);
        find_conflicts(&existing, candidate, exclude)
            .into_iter()
            .map(BookingSummary::from)
            .collect()
    }

    pub fn has_conflict(&self, candidate: &CandidateSlot, exclude: Option<Uuid>) -> bool {
        !self.conflicts(candidate, exclude).is_empty()
    }
}
