use chrono::NaiveDate;
use uuid::Uuid;
use crate::errors::DockBookingResult;
use crate::models::{Booking, BookingFilter};

/// Defines the storage interface for bookings
///
/// Implementations only store and retrieve; overlap and compatibility checks belong to the scheduler,
/// which is the only component allowed to call the mutating methods.
pub trait BookingRepository: Send + Sync {
    /// Stores a new booking under a freshly assigned id
    ///
    /// Any id already set on `booking` is replaced.
    ///
    /// # Returns
    ///
    /// The stored booking carrying its assigned id
    fn insert(&self, booking: Booking) -> Booking;

    /// Replaces the full record stored under `id`
    ///
    /// # Returns
    ///
    /// * `Ok(Booking)`: the stored record
    /// * `Err(DockBookingError::BookingNotFound)` if no booking has this id
    fn update(&self, id: Uuid, booking: Booking) -> DockBookingResult<Booking>;

    /// Deletes a booking. Removing an absent id is not an error.
    ///
    /// # Returns
    ///
    /// The removed booking, or `None` if it was already gone
    fn remove(&self, id: Uuid) -> Option<Booking>;

    /// Fetches a booking by id, failing with `BookingNotFound`
    fn get(&self, id: Uuid) -> DockBookingResult<Booking>;

    /// Returns the bookings matching every predicate of the filter,
    /// ordered by date, start time, priority (high first) and booking reference
    fn query(&self, filter: &BookingFilter) -> Vec<Booking>;

    /// Returns every booking, any status, held by the dock on the given date
    fn bookings_on(&self, dock_id: &str, date: NaiveDate) -> Vec<Booking>;

    /// Counts the bookings on any date that reference the dock
    fn count_for_dock(&self, dock_id: &str) -> usize;
}
