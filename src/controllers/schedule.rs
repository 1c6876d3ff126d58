//! Schedule view routes:
//! - GET /schedule/slots: Grid slot labels of a day
//! - GET /schedule/occupancy?date=: Dock by slot occupancy grid
//! - GET /schedule/utilization?date=: Utilization per dock
//! - GET /health: Liveness check

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use crate::controllers::api_error::ApiError;
use crate::controllers::AppState;
use crate::scheduling::occupancy::OccupancyView;
use crate::scheduling::utilization::UtilizationReport;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/schedule/slots", get(list_slots))
        .route("/schedule/occupancy", get(occupancy))
        .route("/schedule/utilization", get(utilization))
        .route("/health", get(health))
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

async fn list_slots(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.scheduler.time_grid().slots().collect())
}

async fn occupancy(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<OccupancyView>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.scheduler.occupancy(query.date)))
}

async fn utilization(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<UtilizationReport>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.scheduler.daily_utilization(query.date)))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
