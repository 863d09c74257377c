//! End-to-end smoke tests for the full minibookd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! repos, real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use minibook_adapter_http_axum::router;
use minibook_adapter_http_axum::state::AppState;
use minibook_adapter_storage_sqlite_sqlx::{
    Config, SqliteAreaRepository, SqliteBookingRepository, SqliteServiceRepository,
};
use minibook_app::services::availability_service::AvailabilityService;
use minibook_app::services::booking_service::BookingService;
use minibook_app::services::catalog_service::CatalogService;
use minibook_domain::slot::SlotCatalog;
use tower::ServiceExt;

const CLIENT_1: &str = "11111111-1111-1111-1111-111111111111";
const CLIENT_2: &str = "22222222-2222-2222-2222-222222222222";
const DAY: &str = "2099-06-10";

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();
    let catalog = SlotCatalog::default();

    let state = AppState::new(
        BookingService::new(
            SqliteBookingRepository::new(pool.clone()),
            SqliteServiceRepository::new(pool.clone()),
            catalog.clone(),
        ),
        AvailabilityService::new(SqliteBookingRepository::new(pool.clone()), catalog),
        CatalogService::new(
            SqliteAreaRepository::new(pool.clone()),
            SqliteServiceRepository::new(pool),
        ),
    );

    router::build(state)
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: impl AsRef<str>) -> Request<Body> {
    Request::builder()
        .uri(uri.as_ref())
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: impl AsRef<str>, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri.as_ref())
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn put_json(uri: impl AsRef<str>, body: String) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri.as_ref())
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn delete(uri: impl AsRef<str>) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri.as_ref())
        .body(Body::empty())
        .unwrap()
}

/// Create an area and a service in it; returns `(area_id, service_id)`.
async fn seed_catalog(app: &axum::Router) -> (String, String) {
    let (status, area) = send(
        app,
        post_json("/api/areas", r#"{"name":"Peluqueria"}"#.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let area_id = area["id"].as_str().unwrap().to_string();

    let (status, service) = send(
        app,
        post_json(
            "/api/services",
            format!(
                r#"{{"area_id":"{area_id}","title":"Corte de pelo","price_cents":1500}}"#
            ),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let service_id = service["id"].as_str().unwrap().to_string();

    (area_id, service_id)
}

async fn occupied(app: &axum::Router, area_id: &str, day: &str) -> Vec<String> {
    let (status, body) = send(
        app,
        get(format!("/api/areas/{area_id}/availability?date={day}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["occupied"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

async fn book(
    app: &axum::Router,
    client: &str,
    service_id: &str,
    day: &str,
    slot: &str,
) -> (StatusCode, serde_json::Value) {
    send(
        app,
        post_json(
            "/api/bookings",
            format!(
                r#"{{"client_id":"{client}","service_id":"{service_id}","date":"{day}","slot":"{slot}"}}"#
            ),
        ),
    )
    .await
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(get("/health"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Catalog endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_areas_and_services_after_creation() {
    let app = app().await;
    let (area_id, service_id) = seed_catalog(&app).await;

    let (status, areas) = send(&app, get("/api/areas")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(areas.as_array().unwrap().len(), 1);
    assert_eq!(areas[0]["name"], "Peluqueria");

    let (status, services) = send(&app, get(format!("/api/services?area={area_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(services.as_array().unwrap().len(), 1);
    assert_eq!(services[0]["id"], service_id.as_str());
    assert_eq!(services[0]["title"], "Corte de pelo");
}

#[tokio::test]
async fn should_list_catalog_slots_for_area() {
    let app = app().await;
    let (area_id, _) = seed_catalog(&app).await;

    let (status, slots) = send(&app, get(format!("/api/areas/{area_id}/slots"))).await;
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = slots
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(labels.len(), 8);
    assert_eq!(labels[0], "09:00-10:00");
    assert_eq!(labels[7], "19:00-20:00");
}

#[tokio::test]
async fn should_reject_service_in_unknown_area() {
    let app = app().await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/services",
            format!(r#"{{"area_id":"{CLIENT_1}","title":"Corte de pelo"}}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

// ---------------------------------------------------------------------------
// Availability and booking lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_start_with_empty_occupancy_and_fill_on_booking() {
    let app = app().await;
    let (area_id, service_id) = seed_catalog(&app).await;

    assert!(occupied(&app, &area_id, DAY).await.is_empty());

    let (status, booking) = book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["slot_label"], "09:00-10:00");
    assert_eq!(booking["state"], "active");
    assert_eq!(booking["area_id"], area_id.as_str());

    assert_eq!(occupied(&app, &area_id, DAY).await, vec!["09:00-10:00"]);
}

#[tokio::test]
async fn should_reject_second_client_for_taken_slot() {
    let app = app().await;
    let (_, service_id) = seed_catalog(&app).await;
    book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;

    let (status, body) = book(&app, CLIENT_2, &service_id, DAY, "09:00-10:00").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");
}

#[tokio::test]
async fn should_reject_double_submission_of_same_booking() {
    let app = app().await;
    let (_, service_id) = seed_catalog(&app).await;
    book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;

    let (status, body) = book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");
}

#[tokio::test]
async fn should_detect_conflict_for_unpadded_slot_label() {
    let app = app().await;
    let (_, service_id) = seed_catalog(&app).await;
    book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;

    let (status, _) = book(&app, CLIENT_2, &service_id, DAY, "9:00-10:00").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn should_move_occupancy_on_reschedule() {
    let app = app().await;
    let (area_id, service_id) = seed_catalog(&app).await;
    let (_, booking) = book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;
    let booking_id = booking["id"].as_str().unwrap();

    let (status, moved) = send(
        &app,
        put_json(
            format!("/api/bookings/{booking_id}"),
            r#"{"slot":"10:00-11:00"}"#.to_string(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["slot_label"], "10:00-11:00");

    assert_eq!(occupied(&app, &area_id, DAY).await, vec!["10:00-11:00"]);
}

#[tokio::test]
async fn should_keep_slot_when_rescheduling_to_same_slot() {
    let app = app().await;
    let (_, service_id) = seed_catalog(&app).await;
    let (_, booking) = book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;
    let booking_id = booking["id"].as_str().unwrap();

    let (status, kept) = send(
        &app,
        put_json(
            format!("/api/bookings/{booking_id}"),
            r#"{"slot":"09:00-10:00"}"#.to_string(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kept["slot_label"], "09:00-10:00");
}

#[tokio::test]
async fn should_free_slot_on_cancellation() {
    let app = app().await;
    let (area_id, service_id) = seed_catalog(&app).await;
    let (_, booking) = book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;
    let booking_id = booking["id"].as_str().unwrap();

    let (status, _) = send(&app, delete(format!("/api/bookings/{booking_id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(occupied(&app, &area_id, DAY).await.is_empty());

    // The record survives as history.
    let (status, body) = send(&app, get(format!("/api/bookings/{booking_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "cancelled");
}

#[tokio::test]
async fn should_treat_repeated_cancellation_as_success() {
    let app = app().await;
    let (_, service_id) = seed_catalog(&app).await;
    let (_, booking) = book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;
    let booking_id = booking["id"].as_str().unwrap();

    let (first, _) = send(&app, delete(format!("/api/bookings/{booking_id}"))).await;
    let (second, _) = send(&app, delete(format!("/api/bookings/{booking_id}"))).await;
    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn should_allow_rebooking_freed_slot() {
    let app = app().await;
    let (_, service_id) = seed_catalog(&app).await;
    let (_, booking) = book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;
    let booking_id = booking["id"].as_str().unwrap();
    send(&app, delete(format!("/api/bookings/{booking_id}"))).await;

    let (status, _) = book(&app, CLIENT_2, &service_id, DAY, "09:00-10:00").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn should_reject_reschedule_of_cancelled_booking() {
    let app = app().await;
    let (_, service_id) = seed_catalog(&app).await;
    let (_, booking) = book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;
    let booking_id = booking["id"].as_str().unwrap();
    send(&app, delete(format!("/api/bookings/{booking_id}"))).await;

    let (status, body) = send(
        &app,
        put_json(
            format!("/api/bookings/{booking_id}"),
            r#"{"slot":"10:00-11:00"}"#.to_string(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_reject_impossible_calendar_date() {
    let app = app().await;
    let (_, service_id) = seed_catalog(&app).await;

    let (status, body) = book(&app, CLIENT_1, &service_id, "2025-13-40", "09:00-10:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");
}

#[tokio::test]
async fn should_reject_slot_outside_catalog() {
    let app = app().await;
    let (_, service_id) = seed_catalog(&app).await;

    let (status, body) = book(&app, CLIENT_1, &service_id, DAY, "21:00-22:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");
}

#[tokio::test]
async fn should_reject_malformed_availability_date() {
    let app = app().await;
    let (area_id, _) = seed_catalog(&app).await;

    let (status, body) = send(
        &app,
        get(format!("/api/areas/{area_id}/availability?date=soon")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_service() {
    let app = app().await;
    seed_catalog(&app).await;

    let (status, body) = book(&app, CLIENT_1, CLIENT_2, DAY, "09:00-10:00").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_area_availability() {
    let app = app().await;

    let (status, body) = send(
        &app,
        get(format!("/api/areas/{CLIENT_1}/availability?date={DAY}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_booking() {
    let app = app().await;

    let (status, _) = send(&app, get(format!("/api/bookings/{CLIENT_1}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, delete(format!("/api/bookings/{CLIENT_1}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Single-slot availability check and admin day view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_answer_single_slot_availability() {
    let app = app().await;
    let (area_id, service_id) = seed_catalog(&app).await;
    book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;

    let (status, body) = send(
        &app,
        get(format!(
            "/api/areas/{area_id}/availability?date={DAY}&slot=09:00-10:00"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);

    let (status, body) = send(
        &app,
        get(format!(
            "/api/areas/{area_id}/availability?date={DAY}&slot=10:00-11:00"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
}

#[tokio::test]
async fn should_list_active_bookings_in_day_view() {
    let app = app().await;
    let (area_id, service_id) = seed_catalog(&app).await;
    book(&app, CLIENT_1, &service_id, DAY, "09:00-10:00").await;
    let (_, second) = book(&app, CLIENT_2, &service_id, DAY, "10:00-11:00").await;
    let second_id = second["id"].as_str().unwrap();
    send(&app, delete(format!("/api/bookings/{second_id}"))).await;

    let (status, body) = send(
        &app,
        get(format!("/api/areas/{area_id}/bookings?date={DAY}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let day = body.as_array().unwrap();
    assert_eq!(day.len(), 1);
    assert_eq!(day[0]["slot_label"], "09:00-10:00");
    assert_eq!(day[0]["client_id"], CLIENT_1);
}
