//! # API Error
//!
//! Maps scheduler errors to structured HTTP responses with proper status codes and error bodies.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use crate::errors::DockBookingError;

/// Structured JSON error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "SLOT_CONFLICT")
    pub code: String,
    /// Human-readable reason
    pub message: String,
    /// Conflicting bookings or violated rules, when there are any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type implementing [`IntoResponse`]
#[derive(Debug)]
pub enum ApiError {
    Domain(DockBookingError),
    /// The request could not be decoded (bad path parameter, JSON body or query string)
    BadRequest(String),
}

impl From<DockBookingError> for ApiError {
    fn from(err: DockBookingError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn status_of(err: &DockBookingError) -> StatusCode {
    match err {
        DockBookingError::DockNotFound(_) | DockBookingError::BookingNotFound(_) => StatusCode::NOT_FOUND,
        DockBookingError::SlotConflict { .. }
        | DockBookingError::InvalidTransition { .. }
        | DockBookingError::DockInUse { .. }
        | DockBookingError::DuplicateDock(_) => StatusCode::CONFLICT,
        DockBookingError::IncompatibleDock { .. }
        | DockBookingError::InvalidBooking(_)
        | DockBookingError::InvalidTimeFormat(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DockBookingError::ConfigError(_)
        | DockBookingError::IoError(_)
        | DockBookingError::LoggingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn details_of(err: &DockBookingError) -> Option<serde_json::Value> {
    match err {
        DockBookingError::SlotConflict { conflicts, .. } => serde_json::to_value(conflicts).ok(),
        DockBookingError::IncompatibleDock { violations, .. } => serde_json::to_value(violations).ok(),
        DockBookingError::InvalidBooking(problems) => serde_json::to_value(problems).ok(),
        _ => None,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Domain(err) => {
                let status = status_of(err);
                let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    error!("Internal error: {}", err);
                    "internal error".to_string()
                } else {
                    err.to_string()
                };
                (status, ErrorDetail { code: err.kind().to_string(), message, details: details_of(err) })
            }
            ApiError::BadRequest(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail { code: "BAD_REQUEST".to_string(), message: message.clone(), details: None },
            ),
        };
        (status, Json(ErrorBody { error: detail })).into_response()
    }
}
