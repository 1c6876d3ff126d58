//! # HTTP API
//!
//! Axum routers exposing the dock scheduler. Handlers hold no business logic: they decode the request,
//! call the scheduler, and map its errors through `ApiError`.

pub mod api_error;
pub mod bookings;
pub mod docks;
pub mod schedule;

use std::sync::Arc;
use axum::Router;
use tower_http::trace::TraceLayer;
use crate::scheduling::DockScheduler;

pub use api_error::ApiError;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<DockScheduler>,
}

impl AppState {
    pub fn new(scheduler: Arc<DockScheduler>) -> Self {
        Self { scheduler }
    }
}

/// Assembles the full API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(docks::routes())
        .merge(bookings::routes())
        .merge(schedule::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
