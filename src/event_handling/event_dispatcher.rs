use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};
use crate::event_handling::events::BookingEvent;

/// Publishes booking events to the event channel.
///
/// Dispatch is fire-and-forget: a full or closed channel drops the event with a warning, so a slow
/// or absent consumer can never fail a scheduling operation.
#[derive(Clone)]
pub struct EventDispatcher {
    /// The sender end of a channel for dispatching events.
    event_sender: mpsc::Sender<BookingEvent>,
}

impl EventDispatcher {
    /// Creates a new `EventDispatcher`.
    ///
    /// # Arguments
    ///
    /// * `event_sender` - The sender end of a channel for dispatching events.
    pub fn new(event_sender: mpsc::Sender<BookingEvent>) -> Self {
        Self { event_sender }
    }

    /// Creates a dispatcher together with the receiving end of a new channel
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<BookingEvent>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (Self::new(sender), receiver)
    }

    /// Dispatches an event without blocking.
    pub fn dispatch(&self, event: BookingEvent) {
        debug!("Dispatching event: {:?}", event);
        match self.event_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!("Event channel full, dropping event: {}", event.message());
            }
            Err(TrySendError::Closed(event)) => {
                debug!("Event channel closed, dropping event: {}", event.message());
            }
        }
    }
}
