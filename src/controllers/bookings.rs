//! Booking routes:
//! - GET    /bookings?date=&resource=&carrier=&status=: Filtered booking list
//! - POST   /bookings: Create a booking
//! - GET    /bookings/:id: Get a booking
//! - PUT    /bookings/:id: Replace a booking's details
//! - DELETE /bookings/:id: Delete a booking (always 204)
//! - PATCH  /bookings/:id/move: Reassign dock and start time
//! - PATCH  /bookings/:id/status: Lifecycle transition

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use crate::controllers::api_error::ApiError;
use crate::controllers::AppState;
use crate::models::{Booking, BookingFilter, BookingRequest, BookingStatus, DockSelector};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/:id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/bookings/:id/move", patch(move_booking))
        .route("/bookings/:id/status", patch(transition_booking))
}

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub date: NaiveDate,
    /// Dock id or "all"
    #[serde(default, alias = "dock")]
    pub resource: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

impl From<BookingQuery> for BookingFilter {
    fn from(query: BookingQuery) -> Self {
        BookingFilter {
            date: query.date,
            dock: query.resource.map(DockSelector::from).unwrap_or_default(),
            carrier: query.carrier.filter(|c| !c.is_empty()),
            status: query.status,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveBody {
    #[serde(alias = "resourceId")]
    pub dock_id: String,
    #[serde(alias = "startSlot")]
    pub start: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: BookingStatus,
}

async fn list_bookings(
    State(state): State<AppState>,
    query: Result<Query<BookingQuery>, QueryRejection>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.scheduler.query(&BookingFilter::from(query))))
}

async fn create_booking(
    State(state): State<AppState>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let Json(request) = body?;
    let booking = state.scheduler.create(&request)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn get_booking(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Booking>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.scheduler.get(id)?))
}

async fn update_booking(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<Booking>, ApiError> {
    let Path(id) = path?;
    let Json(request) = body?;
    Ok(Json(state.scheduler.update(id, &request)?))
}

async fn delete_booking(State(state): State<AppState>, path: Result<Path<Uuid>, PathRejection>) -> StatusCode {
    // an id that does not parse names no booking, so there is nothing to delete
    if let Ok(Path(id)) = path {
        state.scheduler.delete(id);
    }
    StatusCode::NO_CONTENT
}

async fn move_booking(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<MoveBody>, JsonRejection>,
) -> Result<Json<Booking>, ApiError> {
    let Path(id) = path?;
    let Json(body) = body?;
    Ok(Json(state.scheduler.move_booking(id, &body.dock_id, &body.start)?))
}

async fn transition_booking(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<Booking>, ApiError> {
    let Path(id) = path?;
    let Json(body) = body?;
    Ok(Json(state.scheduler.transition(id, body.status)?))
}
