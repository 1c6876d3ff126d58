use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::info;
use crate::event_handling::events::BookingEvent;

/// Drains the booking event channel and publishes each event to the notification log.
#[derive(Clone)]
pub struct EventHandler {
    /// A queue for receiving `BookingEvent`s.
    event_queue: Arc<Mutex<mpsc::Receiver<BookingEvent>>>,
}

impl EventHandler {
    /// Creates a new `EventHandler`.
    ///
    /// # Arguments
    ///
    /// * `event_queue` - The receiver end of a channel to receive `BookingEvent`s.
    pub fn new(event_queue: mpsc::Receiver<BookingEvent>) -> Self {
        Self {
            event_queue: Arc::new(Mutex::new(event_queue)),
        }
    }

    /// Runs the event handler until every sender is dropped.
    ///
    /// # Returns
    ///
    /// The number of events handled.
    pub async fn run(&self) -> usize {
        info!("EventHandler started");
        let mut handled = 0;
        let mut queue = self.event_queue.lock().await;
        while let Some(event) = queue.recv().await {
            self.process_event(&event);
            handled += 1;
        }
        info!("EventHandler stopped after {} events", handled);
        handled
    }

    fn process_event(&self, event: &BookingEvent) {
        match event {
            BookingEvent::Created(b) | BookingEvent::Updated(b) => {
                info!(booking_id = %b.id, dock_id = %b.dock_id, "{}", event.message());
            }
            BookingEvent::Moved(e) => {
                info!(booking_id = %e.booking_id, dock_id = %e.to_dock, "{}", event.message());
            }
            BookingEvent::StatusChanged(e) => {
                info!(booking_id = %e.booking_id, dock_id = %e.dock_id, "{}", event.message());
            }
            BookingEvent::Deleted(e) => {
                info!(booking_id = %e.booking_id, dock_id = %e.dock_id, "{}", event.message());
            }
            BookingEvent::DockStatusChanged(e) => {
                info!(dock_id = %e.dock_id, "{}", event.message());
            }
        }
    }
}
