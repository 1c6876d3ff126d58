use std::sync::Arc;
use anyhow::Result;
use tracing::info;
use crate::config::Settings;
use crate::controllers::AppState;
use crate::event_handling::EventHandler;
use crate::repositories::{BookingRepository, DockRegistry, InMemoryBookingRepository};
use crate::scheduling::DockScheduler;


pub struct AppContext {
    pub settings: Arc<Settings>,
    pub registry: Arc<DockRegistry>,
    pub repository: Arc<dyn BookingRepository>,
    pub scheduler: Arc<DockScheduler>,
    pub event_handler: EventHandler,
}

impl AppContext {
    pub fn app_state(&self) -> AppState {
        AppState::new(Arc::clone(&self.scheduler))
    }
}

/// Wires the registry, the booking store, the scheduler and the event handler from settings
pub fn initialize(settings: Settings) -> Result<AppContext> {
    let settings = Arc::new(settings);

    let registry = Arc::new(DockRegistry::from_settings(&settings.docks)?);
    let repository: Arc<dyn BookingRepository> = Arc::new(InMemoryBookingRepository::new());

    let (scheduler, event_receiver) = DockScheduler::new(
        &settings.schedule,
        Arc::clone(&registry),
        Arc::clone(&repository),
    )?;
    let scheduler = Arc::new(scheduler);
    let event_handler = EventHandler::new(event_receiver);

    info!(
        "Scheduler ready: {} docks, grid starts {} every {} minutes, operating window {}-{}",
        registry.list().len(),
        settings.schedule.grid_start,
        settings.schedule.grid_step_minutes,
        settings.schedule.operating_window_start,
        settings.schedule.operating_window_end,
    );

    Ok(AppContext {
        settings,
        registry,
        repository,
        scheduler,
        event_handler,
    })
}
