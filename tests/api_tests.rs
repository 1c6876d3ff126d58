//! Integration tests for the booking HTTP API.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use iqx_dockbooking::controllers;
use iqx_dockbooking::init;

use common::create_mock_settings;

fn test_router() -> Router {
    let context = init::initialize(create_mock_settings()).unwrap();
    controllers::router(context.app_state())
}

async fn api_request(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value), String> {
    let mut builder = Request::builder().method(method).uri(uri);

    let req = if let Some(payload) = body {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        let bytes = serde_json::to_vec(&payload).map_err(|err| format!("serialize request body: {err}"))?;
        builder
            .body(Body::from(bytes))
            .map_err(|err| format!("build request: {err}"))?
    } else {
        builder
            .body(Body::empty())
            .map_err(|err| format!("build request: {err}"))?
    };

    let response = router
        .clone()
        .oneshot(req)
        .await
        .map_err(|err| format!("route request: {err}"))?;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .map_err(|err| format!("read response body: {err}"))?;

    let parsed = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|err| format!("parse response body: {err}"))?
    };
    Ok((status, parsed))
}

fn booking_body(dock_id: &str, start: &str, duration: u32) -> Value {
    json!({
        "dockId": dock_id,
        "date": "2024-05-14",
        "start": start,
        "durationMinutes": duration,
        "carrier": "Nordic Freight",
        "bookingReference": format!("BK-{}-{}", dock_id, start),
        "vehicleType": "truck",
        "priority": "high"
    })
}

fn error_code(body: &Value) -> Option<&str> {
    body.pointer("/error/code").and_then(Value::as_str)
}

#[tokio::test]
async fn create_conflict_move_and_delete() -> Result<(), String> {
    let router = test_router();

    let (status, created) = api_request(&router, Method::POST, "/bookings", Some(booking_body("DOCK-1", "09:00", 60))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.get("end").and_then(Value::as_str), Some("10:00"));
    assert_eq!(created.get("status").and_then(Value::as_str), Some("scheduled"));
    let id = created.get("id").and_then(Value::as_str).ok_or("missing id")?.to_string();

    let (status, conflict) = api_request(&router, Method::POST, "/bookings", Some(booking_body("DOCK-1", "09:30", 60))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&conflict), Some("SLOT_CONFLICT"));
    assert_eq!(
        conflict.pointer("/error/details/0/id").and_then(Value::as_str),
        Some(id.as_str())
    );

    let (status, moved) = api_request(
        &router,
        Method::PATCH,
        &format!("/bookings/{id}/move"),
        Some(json!({ "resourceId": "DOCK-2", "startSlot": "09:30" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved.get("dockId").and_then(Value::as_str), Some("DOCK-2"));
    assert_eq!(moved.get("end").and_then(Value::as_str), Some("10:30"));

    let (status, _) = api_request(&router, Method::DELETE, &format!("/bookings/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = api_request(&router, Method::DELETE, &format!("/bookings/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, missing) = api_request(&router, Method::GET, &format!("/bookings/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&missing), Some("BOOKING_NOT_FOUND"));

    let (status, listed) = api_request(&router, Method::GET, "/bookings?date=2024-05-14&resource=all", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn rejected_bookings_map_to_unprocessable_entity() -> Result<(), String> {
    let router = test_router();

    let mut frozen = booking_body("DOCK-3", "09:00", 60);
    frozen["temperature"] = json!("frozen");
    let (status, body) = api_request(&router, Method::POST, "/bookings", Some(frozen)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), Some("INCOMPATIBLE_DOCK"));
    assert_eq!(
        body.pointer("/error/details/0/rule").and_then(Value::as_str),
        Some("TemperatureZoneRule")
    );

    let (status, body) = api_request(&router, Method::POST, "/bookings", Some(booking_body("DOCK-1", "9:00", 60))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), Some("INVALID_TIME_FORMAT"));

    let mut blank = booking_body("DOCK-1", "09:00", 60);
    blank["carrier"] = json!("");
    let (status, body) = api_request(&router, Method::POST, "/bookings", Some(blank)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), Some("INVALID_BOOKING"));

    let (status, body) = api_request(&router, Method::POST, "/bookings", Some(json!({ "dockId": "DOCK-1" }))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), Some("BAD_REQUEST"));

    let (status, body) = api_request(&router, Method::POST, "/bookings", Some(booking_body("DOCK-9", "09:00", 60))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), Some("DOCK_NOT_FOUND"));
    Ok(())
}

#[tokio::test]
async fn malformed_booking_ids() -> Result<(), String> {
    let router = test_router();
    let (_, created) = api_request(&router, Method::POST, "/bookings", Some(booking_body("DOCK-1", "09:00", 60))).await?;

    let (status, body) = api_request(&router, Method::DELETE, "/bookings/not-a-uuid", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = api_request(&router, Method::GET, "/bookings/not-a-uuid", None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), Some("BAD_REQUEST"));

    let (status, body) = api_request(&router, Method::PUT, "/bookings/42", Some(booking_body("DOCK-1", "11:00", 60))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), Some("BAD_REQUEST"));

    let (status, body) = api_request(&router, Method::PATCH, "/bookings/42/move", Some(json!({ "resourceId": "DOCK-2", "startSlot": "09:00" }))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), Some("BAD_REQUEST"));

    let (status, body) = api_request(&router, Method::PATCH, "/bookings/42/status", Some(json!({ "status": "arrived" }))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), Some("BAD_REQUEST"));

    // the stored booking is untouched by any of the above
    let (status, listed) = api_request(&router, Method::GET, "/bookings?date=2024-05-14", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed.pointer("/0/id"), created.get("id"));
    assert_eq!(listed.pointer("/0/status").and_then(Value::as_str), Some("scheduled"));
    Ok(())
}

#[tokio::test]
async fn status_transitions_over_http() -> Result<(), String> {
    let router = test_router();
    let (_, created) = api_request(&router, Method::POST, "/bookings", Some(booking_body("DOCK-1", "09:00", 60))).await?;
    let id = created.get("id").and_then(Value::as_str).ok_or("missing id")?.to_string();
    let uri = format!("/bookings/{id}/status");

    let (status, body) = api_request(&router, Method::PATCH, &uri, Some(json!({ "status": "completed" }))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), Some("INVALID_TRANSITION"));

    let (status, body) = api_request(&router, Method::PATCH, &uri, Some(json!({ "status": "no_show" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("status").and_then(Value::as_str), Some("no_show"));

    let (status, listed) = api_request(&router, Method::GET, "/bookings?date=2024-05-14&status=no_show", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn list_bookings_applies_query_filters() -> Result<(), String> {
    let router = test_router();
    api_request(&router, Method::POST, "/bookings", Some(booking_body("DOCK-1", "09:00", 60))).await?;
    let mut baltic = booking_body("DOCK-2", "07:00", 60);
    baltic["carrier"] = json!("Baltic Haulage");
    api_request(&router, Method::POST, "/bookings", Some(baltic)).await?;

    let (_, all) = api_request(&router, Method::GET, "/bookings?date=2024-05-14", None).await?;
    let starts: Vec<&str> = all
        .as_array()
        .ok_or("expected array")?
        .iter()
        .filter_map(|b| b.get("start").and_then(Value::as_str))
        .collect();
    assert_eq!(starts, vec!["07:00", "09:00"]);

    let (_, dock1) = api_request(&router, Method::GET, "/bookings?date=2024-05-14&resource=DOCK-1", None).await?;
    assert_eq!(dock1.as_array().map(Vec::len), Some(1));

    let (_, baltic) = api_request(&router, Method::GET, "/bookings?date=2024-05-14&carrier=baltic", None).await?;
    assert_eq!(baltic.as_array().map(Vec::len), Some(1));

    let (_, other_day) = api_request(&router, Method::GET, "/bookings?date=2024-05-15", None).await?;
    assert_eq!(other_day.as_array().map(Vec::len), Some(0));

    let (status, body) = api_request(&router, Method::GET, "/bookings?date=tomorrow", None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), Some("BAD_REQUEST"));
    Ok(())
}

#[tokio::test]
async fn dock_routes() -> Result<(), String> {
    let router = test_router();

    let (status, docks) = api_request(&router, Method::GET, "/docks", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(docks.as_array().map(Vec::len), Some(4));

    let new_dock = json!({
        "id": "DOCK-9",
        "name": "Overflow",
        "dockType": "side",
        "status": "active",
        "maxVehicleSize": "van",
        "temperatureZones": ["ambient"]
    });
    let (status, _) = api_request(&router, Method::POST, "/docks", Some(new_dock.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = api_request(&router, Method::POST, "/docks", Some(new_dock)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), Some("DUPLICATE_DOCK"));

    let (status, dock) = api_request(
        &router,
        Method::PATCH,
        "/docks/DOCK-9/status",
        Some(json!({ "status": "maintenance" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dock.get("status").and_then(Value::as_str), Some("maintenance"));

    let (status, _) = api_request(&router, Method::DELETE, "/docks/DOCK-9", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = api_request(&router, Method::GET, "/docks/DOCK-9", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    api_request(&router, Method::POST, "/bookings", Some(booking_body("DOCK-1", "09:00", 60))).await?;
    let (status, body) = api_request(&router, Method::DELETE, "/docks/DOCK-1", None).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), Some("DOCK_IN_USE"));
    Ok(())
}

#[tokio::test]
async fn schedule_views() -> Result<(), String> {
    let router = test_router();
    api_request(&router, Method::POST, "/bookings", Some(booking_body("DOCK-1", "08:00", 60))).await?;
    api_request(&router, Method::POST, "/bookings", Some(booking_body("DOCK-1", "13:00", 60))).await?;

    let (status, slots) = api_request(&router, Method::GET, "/schedule/slots", None).await?;
    assert_eq!(status, StatusCode::OK);
    let slots = slots.as_array().ok_or("expected array")?;
    assert_eq!(slots.len(), 22);
    assert_eq!(slots.first().and_then(Value::as_str), Some("06:00"));
    assert_eq!(slots.last().and_then(Value::as_str), Some("21:45"));

    let (status, report) = api_request(&router, Method::GET, "/schedule/utilization?date=2024-05-14", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report.get("operatingWindowMinutes").and_then(Value::as_u64), Some(960));
    assert_eq!(report.pointer("/docks/0/utilization").and_then(Value::as_u64), Some(13));

    let (status, view) = api_request(&router, Method::GET, "/schedule/occupancy?date=2024-05-14", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view.pointer("/docks/0/dockId").and_then(Value::as_str), Some("DOCK-1"));

    let (status, available) = api_request(
        &router,
        Method::GET,
        "/docks/DOCK-1/available-slots?date=2024-05-14&duration=60",
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let times: Vec<&str> = available
        .get("slots")
        .and_then(Value::as_array)
        .ok_or("expected slots")?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(times.contains(&"06:45"));
    assert!(!times.contains(&"07:30"));
    assert!(!times.contains(&"21:45"));

    let (status, health) = api_request(&router, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health.get("status").and_then(Value::as_str), Some("ok"));
    Ok(())
}
