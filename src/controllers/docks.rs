//! Dock routes:
//! - GET    /docks: List docks in registry order
//! - POST   /docks: Register a dock
//! - GET    /docks/:id: Get a dock
//! - DELETE /docks/:id: Remove an unreferenced dock
//! - PATCH  /docks/:id/status: Change operational status
//! - GET    /docks/:id/available-slots?date=&duration=: Free start slots for a visit

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::controllers::api_error::ApiError;
use crate::controllers::AppState;
use crate::models::{ClockTime, Dock, DockStatus};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/docks", get(list_docks).post(register_dock))
        .route("/docks/:id", get(get_dock).delete(remove_dock))
        .route("/docks/:id/status", patch(set_dock_status))
        .route("/docks/:id/available-slots", get(available_slots))
}

#[derive(Debug, Deserialize)]
pub struct DockStatusBody {
    pub status: DockStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsQuery {
    pub date: NaiveDate,
    pub duration: u32,
    /// Booking being rescheduled, ignored by the overlap check
    pub exclude: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsResponse {
    pub dock_id: String,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    pub slots: Vec<ClockTime>,
}

async fn list_docks(State(state): State<AppState>) -> Json<Vec<Dock>> {
    Json(state.scheduler.list_docks())
}

async fn get_dock(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Dock>, ApiError> {
    Ok(Json(state.scheduler.get_dock(&id)?))
}

async fn register_dock(
    State(state): State<AppState>,
    body: Result<Json<Dock>, JsonRejection>,
) -> Result<(StatusCode, Json<Dock>), ApiError> {
    let Json(dock) = body?;
    let dock = state.scheduler.register_dock(dock)?;
    Ok((StatusCode::CREATED, Json(dock)))
}

async fn remove_dock(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    state.scheduler.remove_dock(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_dock_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DockStatusBody>, JsonRejection>,
) -> Result<Json<Dock>, ApiError> {
    let Json(body) = body?;
    Ok(Json(state.scheduler.set_dock_status(&id, body.status)?))
}

async fn available_slots(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<AvailableSlotsQuery>, QueryRejection>,
) -> Result<Json<AvailableSlotsResponse>, ApiError> {
    let Query(query) = query?;
    let slots = state
        .scheduler
        .available_slots(&id, query.date, query.duration, query.exclude)?;
    Ok(Json(AvailableSlotsResponse {
        dock_id: id,
        date: query.date,
        duration_minutes: query.duration,
        slots,
    }))
}
