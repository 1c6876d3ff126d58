use std::collections::HashMap;
use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;
use crate::errors::{DockBookingError, DockBookingResult};
use crate::models::{Booking, BookingFilter};
use crate::repositories::repository_trait::BookingRepository;

/// An in-process booking store guarded by a read/write lock
#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<Uuid, Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.read().is_empty()
    }
}

fn sort_bookings(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.start.cmp(&b.start))
            .then(a.priority.cmp(&b.priority))
            .then_with(|| a.booking_reference.cmp(&b.booking_reference))
    });
}

impl BookingRepository for InMemoryBookingRepository {
    fn insert(&self, mut booking: Booking) -> Booking {
        booking.id = Uuid::new_v4();
        debug!("Storing booking {} on dock {}", booking.id, booking.dock_id);
        self.bookings.write().insert(booking.id, booking.clone());
        booking
    }

    fn update(&self, id: Uuid, mut booking: Booking) -> DockBookingResult<Booking> {
        let mut bookings = self.bookings.write();
        let slot = bookings.get_mut(&id).ok_or(DockBookingError::BookingNotFound(id))?;
        booking.id = id;
        *slot = booking.clone();
        Ok(booking)
    }

    fn remove(&self, id: Uuid) -> Option<Booking> {
        self.bookings.write().remove(&id)
    }

    fn get(&self, id: Uuid) -> DockBookingResult<Booking> {
        self.bookings
            .read()
            .get(&id)
            .cloned()
            .ok_or(DockBookingError::BookingNotFound(id))
    }

    fn query(&self, filter: &BookingFilter) -> Vec<Booking> {
        let mut matches: Vec<Booking> = self
            .bookings
            .read()
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        sort_bookings(&mut matches);
        matches
    }

    fn bookings_on(&self, dock_id: &str, date: NaiveDate) -> Vec<Booking> {
        let mut matches: Vec<Booking> = self
            .bookings
            .read()
            .values()
            .filter(|b| b.dock_id == dock_id && b.date == date)
            .cloned()
            .collect();
        sort_bookings(&mut matches);
        matches
    }

    fn count_for_dock(&self, dock_id: &str) -> usize {
        self.bookings
            .read()
            .values()
            .filter(|b| b.dock_id == dock_id)
            .count()
    }
}
