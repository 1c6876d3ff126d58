use std::sync::Arc;
use chrono::NaiveDate;
use tokio::sync::mpsc::Receiver;
use tracing::{info, warn};
use uuid::Uuid;
use crate::config::ScheduleSettings;
use crate::errors::{DockBookingError, DockBookingResult};
use crate::event_handling::{BookingDeletedEvent, BookingEvent, BookingMovedEvent, BookingStatusChangedEvent, DockStatusChangedEvent, EventDispatcher};
use crate::models::{local_now, Booking, BookingFilter, BookingRequest, BookingStatus, ClockTime, Dock, DockStatus};
use crate::repositories::{BookingRepository, DockRegistry};
use crate::rules::{BookingRequirements, CompatibilityChecker};
use crate::scheduling::conflict::{CandidateSlot, ConflictDetector};
use crate::scheduling::dock_locks::{DockGuard, DockLocks};
use crate::scheduling::occupancy::OccupancyView;
use crate::scheduling::time_grid::{OperatingWindow, TimeGrid};
use crate::scheduling::utilization::{self, UtilizationReport};

/// Orchestrates every change to the booking schedule.
///
/// The scheduler is the only component that mutates the booking repository. Each mutation runs its
/// compatibility and conflict checks and its write while holding the locks of every dock it touches,
/// so two concurrent requests can never both pass the overlap check and then both insert.
pub struct DockScheduler {
    registry: Arc<DockRegistry>,
    repository: Arc<dyn BookingRepository>,
    checker: CompatibilityChecker,
    locks: DockLocks,
    grid: TimeGrid,
    window: OperatingWindow,
    dispatcher: EventDispatcher,
}

impl DockScheduler {
    /// Creates a new `DockScheduler`.
    ///
    /// # Arguments
    ///
    /// * `settings` - The schedule settings providing the time grid and the operating window.
    /// * `registry` - The dock registry.
    /// * `repository` - The booking store.
    ///
    /// # Returns
    ///
    /// The scheduler and the receiving end of its booking event channel.
    pub fn new(
        settings: &ScheduleSettings,
        registry: Arc<DockRegistry>,
        repository: Arc<dyn BookingRepository>,
    ) -> DockBookingResult<(Self, Receiver<BookingEvent>)> {
        let (dispatcher, receiver) = EventDispatcher::channel(settings.event_buffer);
        let scheduler = Self {
            registry,
            repository,
            checker: CompatibilityChecker::default(),
            locks: DockLocks::new(),
            grid: settings.time_grid()?,
            window: settings.operating_window()?,
            dispatcher,
        };
        Ok((scheduler, receiver))
    }

    /// Replaces the compatibility rule set
    pub fn with_checker(mut self, checker: CompatibilityChecker) -> Self {
        self.checker = checker;
        self
    }

    pub fn dock_locks(&self) -> &DockLocks {
        &self.locks
    }

    pub fn time_grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn operating_window(&self) -> &OperatingWindow {
        &self.window
    }

    /// Creates a booking from a submitted form
    ///
    /// # Returns
    ///
    /// * `Ok(Booking)`: the stored booking with its assigned id
    /// * `Err(DockBookingError)`: `InvalidTimeFormat`/`InvalidBooking` for a bad form, `DockNotFound`,
    ///   `IncompatibleDock`, or `SlotConflict`. Nothing is written on failure.
    pub fn create(&self, request: &BookingRequest) -> DockBookingResult<Booking> {
        let (start, end) = request.validate()?;
        self.ensure_dock(&request.dock_id)?;
        let _guard = self.locks.lock(&[request.dock_id.as_str()]);

        // re-read under the lock, the dock may have been removed or changed status meanwhile
        let dock = self.registry.get(&request.dock_id)?;
        let candidate = CandidateSlot::new(&request.dock_id, request.date, start, end);
        self.check_placement(&dock, &BookingRequirements::from(request), &candidate, None)
            .inspect_err(|e| warn!("Rejected booking {} on {}: {}", request.booking_reference, dock.id, e))?;

        let stored = self.repository.insert(Booking::from_request(request, start, end, local_now()));
        info!("Created booking {} ({}) on {} {} {}-{}", stored.id, stored.booking_reference, stored.dock_id, stored.date, stored.start, stored.end);
        self.dispatcher.dispatch(BookingEvent::Created(stored.clone()));
        Ok(stored)
    }

    /// Replaces the details of an existing booking, keeping its id and lifecycle status
    ///
    /// Runs the same checks as `create`, except that the booking never conflicts with itself.
    pub fn update(&self, id: Uuid, request: &BookingRequest) -> DockBookingResult<Booking> {
        let (start, end) = request.validate()?;
        self.ensure_dock(&request.dock_id)?;
        let (current, _guard) = self.lock_booking(id, Some(&request.dock_id))?;

        let dock = self.registry.get(&request.dock_id)?;
        let candidate = CandidateSlot::new(&request.dock_id, request.date, start, end);
        self.check_placement(&dock, &BookingRequirements::from(request), &candidate, Some(id))
            .inspect_err(|e| warn!("Rejected update of booking {}: {}", id, e))?;

        let updated = self.repository.update(id, current.apply_request(request, start, end, local_now()))?;
        info!("Updated booking {} ({}) on {} {} {}-{}", updated.id, updated.booking_reference, updated.dock_id, updated.date, updated.start, updated.end);
        self.dispatcher.dispatch(BookingEvent::Updated(updated.clone()));
        Ok(updated)
    }

    /// Reassigns a booking to another dock and/or start time on the same date, keeping its duration
    ///
    /// On any failure the stored booking is left exactly as it was. An overlap is reported as
    /// `SlotConflict`; a target dock failing a compatibility rule is reported as `IncompatibleDock`,
    /// the same mapping `create` and `update` use.
    ///
    /// # Arguments
    ///
    /// * `id` - The booking to move.
    /// * `dock_id` - The target dock, which may be the current one.
    /// * `start` - The new start time as an `HH:MM` label.
    pub fn move_booking(&self, id: Uuid, dock_id: &str, start: &str) -> DockBookingResult<Booking> {
        let start: ClockTime = start.parse()?;
        self.ensure_dock(dock_id)?;
        let (current, _guard) = self.lock_booking(id, Some(dock_id))?;

        let dock = self.registry.get(dock_id)?;
        let moved = current.reschedule(dock_id, start, local_now())?;
        let candidate = CandidateSlot::new(dock_id, moved.date, moved.start, moved.end);
        self.check_placement(&dock, &BookingRequirements::from(&current), &candidate, Some(id))
            .inspect_err(|e| warn!("Rejected move of booking {} to {} {}: {}", id, dock_id, start, e))?;

        let stored = self.repository.update(id, moved)?;
        info!("Moved booking {} from {} {} to {} {}", id, current.dock_id, current.start, stored.dock_id, stored.start);
        self.dispatcher.dispatch(BookingEvent::Moved(BookingMovedEvent {
            booking_id: id,
            booking_reference: stored.booking_reference.clone(),
            date: stored.date,
            from_dock: current.dock_id,
            to_dock: stored.dock_id.clone(),
            from_start: current.start,
            to_start: stored.start,
            timestamp: stored.updated_at,
        }));
        Ok(stored)
    }

    /// Advances a booking through its lifecycle
    ///
    /// # Returns
    ///
    /// * `Ok(Booking)` with the new status
    /// * `Err(DockBookingError::InvalidTransition)` if the lifecycle forbids the change; the booking is unchanged
    pub fn transition(&self, id: Uuid, status: BookingStatus) -> DockBookingResult<Booking> {
        let (current, _guard) = self.lock_booking(id, None)?;
        if !current.status.can_transition_to(status) {
            warn!("Rejected transition of booking {} from {} to {}", id, current.status, status);
            return Err(DockBookingError::InvalidTransition { from: current.status, to: status });
        }

        let now = local_now();
        let updated = self.repository.update(id, Booking { status, updated_at: now, ..current.clone() })?;
        info!("Booking {} transitioned from {} to {}", id, current.status, status);
        self.dispatcher.dispatch(BookingEvent::StatusChanged(BookingStatusChangedEvent {
            booking_id: id,
            booking_reference: updated.booking_reference.clone(),
            dock_id: updated.dock_id.clone(),
            old_status: current.status,
            new_status: status,
            timestamp: now,
        }));
        Ok(updated)
    }

    /// Deletes a booking. Deleting an unknown or already deleted booking succeeds.
    pub fn delete(&self, id: Uuid) {
        let Ok((_, _guard)) = self.lock_booking(id, None) else {
            info!("Booking {} already absent, nothing to delete", id);
            return;
        };
        if let Some(removed) = self.repository.remove(id) {
            info!("Deleted booking {} ({}) from {}", id, removed.booking_reference, removed.dock_id);
            self.dispatcher.dispatch(BookingEvent::Deleted(BookingDeletedEvent {
                booking_id: id,
                booking_reference: removed.booking_reference,
                dock_id: removed.dock_id,
                timestamp: local_now(),
            }));
        }
    }

    pub fn get(&self, id: Uuid) -> DockBookingResult<Booking> {
        self.repository.get(id)
    }

    /// The bookings visible under a filter
    pub fn query(&self, filter: &BookingFilter) -> Vec<Booking> {
        self.repository.query(filter)
    }

    pub fn list_docks(&self) -> Vec<Dock> {
        self.registry.list()
    }

    pub fn get_dock(&self, id: &str) -> DockBookingResult<Dock> {
        self.registry.get(id)
    }

    /// Adds a dock to the registry
    pub fn register_dock(&self, dock: Dock) -> DockBookingResult<Dock> {
        let _guard = self.locks.lock(&[dock.id.as_str()]);
        self.registry.register(dock.clone())?;
        info!("Registered dock {} ({})", dock.id, dock.name);
        Ok(dock)
    }

    /// Changes a dock's operational status without touching its bookings
    ///
    /// Bookings already on a dock put into maintenance stay in place; the status only gates new
    /// bookings and moves onto the dock.
    pub fn set_dock_status(&self, id: &str, status: DockStatus) -> DockBookingResult<Dock> {
        self.ensure_dock(id)?;
        let _guard = self.locks.lock(&[id]);
        let old_status = self.registry.set_status(id, status)?;
        info!("Dock {} status changed from {} to {}", id, old_status, status);
        self.dispatcher.dispatch(BookingEvent::DockStatusChanged(DockStatusChangedEvent {
            dock_id: id.to_string(),
            old_status,
            new_status: status,
            timestamp: local_now(),
        }));
        self.registry.get(id)
    }

    /// Removes a dock that no booking references
    ///
    /// # Returns
    ///
    /// * `Ok(Dock)`: the removed dock
    /// * `Err(DockBookingError::DockInUse)` if any booking, on any date and in any status, references it
    pub fn remove_dock(&self, id: &str) -> DockBookingResult<Dock> {
        self.ensure_dock(id)?;
        let _guard = self.locks.lock(&[id]);
        self.registry.get(id)?;
        let bookings = self.repository.count_for_dock(id);
        if bookings > 0 {
            warn!("Refusing to remove dock {} referenced by {} bookings", id, bookings);
            return Err(DockBookingError::DockInUse { dock_id: id.to_string(), bookings });
        }
        let removed = self.registry.remove(id)?;
        self.locks.forget(id);
        info!("Removed dock {}", id);
        Ok(removed)
    }

    /// Grid slots at which a visit of `duration_minutes` could start on the dock
    ///
    /// A slot qualifies when the whole visit fits inside the operating window and overlaps no live
    /// booking other than `exclude`. Docks that are not active offer no slots.
    pub fn available_slots(
        &self,
        dock_id: &str,
        date: NaiveDate,
        duration_minutes: u32,
        exclude: Option<Uuid>,
    ) -> DockBookingResult<Vec<ClockTime>> {
        let dock = self.registry.get(dock_id)?;
        if !dock.is_active() || duration_minutes == 0 {
            return Ok(Vec::new());
        }

        let detector = ConflictDetector::new(self.repository.as_ref());
        let slots = self
            .grid
            .slot_times()
            .into_iter()
            .filter_map(|start| start.checked_add(duration_minutes).map(|end| (start, end)))
            .filter(|(start, end)| self.window.contains(*start, *end))
            .filter(|(start, end)| {
                !detector.has_conflict(&CandidateSlot::new(dock_id, date, *start, *end), exclude)
            })
            .map(|(start, _)| start)
            .collect();
        Ok(slots)
    }

    /// Utilization of one dock on one date
    pub fn utilization(&self, dock_id: &str, date: NaiveDate) -> DockBookingResult<u32> {
        self.registry.get(dock_id)?;
        let bookings = self.repository.bookings_on(dock_id, date);
        Ok(utilization::utilization(dock_id, &bookings, self.window.minutes()))
    }

    /// Utilization of every dock on one date, in registry order
    pub fn daily_utilization(&self, date: NaiveDate) -> UtilizationReport {
        let bookings = self.repository.query(&BookingFilter::for_date(date));
        UtilizationReport::build(date, &self.registry.list(), &bookings, self.window.minutes())
    }

    /// The occupancy grid of a day
    pub fn occupancy(&self, date: NaiveDate) -> OccupancyView {
        let bookings = self.repository.query(&BookingFilter::for_date(date));
        OccupancyView::build(
            date,
            &self.registry.list(),
            &bookings,
            &self.grid.slot_times(),
            self.window.minutes(),
        )
    }

    /// Fails with `DockNotFound` before any lock is allocated for an unknown id
    fn ensure_dock(&self, dock_id: &str) -> DockBookingResult<()> {
        if self.registry.contains(dock_id) {
            Ok(())
        } else {
            Err(DockBookingError::DockNotFound(dock_id.to_string()))
        }
    }

    /// Runs compatibility first, then the overlap check
    fn check_placement(
        &self,
        dock: &Dock,
        requirements: &BookingRequirements,
        candidate: &CandidateSlot,
        exclude: Option<Uuid>,
    ) -> DockBookingResult<()> {
        let violations = self.checker.evaluate(dock, requirements);
        if !violations.is_empty() {
            return Err(DockBookingError::IncompatibleDock { dock_id: dock.id.clone(), violations });
        }

        let conflicts = ConflictDetector::new(self.repository.as_ref()).conflicts(candidate, exclude);
        if !conflicts.is_empty() {
            return Err(DockBookingError::SlotConflict { dock_id: candidate.dock_id.clone(), conflicts });
        }
        Ok(())
    }

    /// Locks the dock currently holding a booking, plus an optional target dock
    ///
    /// The booking is re-read under the lock; if a concurrent move changed its dock in between, the
    /// locks are released and the sequence retried.
    fn lock_booking(&self, id: Uuid, target_dock: Option<&str>) -> DockBookingResult<(Booking, DockGuard)> {
        loop {
            let seen = self.repository.get(id)?;
            let mut dock_ids = vec![seen.dock_id.as_str()];
            dock_ids.extend(target_dock);
            let guard = self.locks.lock(&dock_ids);

            let current = self.repository.get(id)?;
            if current.dock_id == seen.dock_id {
                return Ok((current, guard));
            }
        }
    }
}
