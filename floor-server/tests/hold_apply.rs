//! End-to-end hold application through the HTTP surface
//!
//! Drives the full router with an in-memory store: role extraction,
//! capability gating, the hold applier and the fallback-write pipeline.

use axum::body::Body;
use floor_server::{Config, DocumentStore, MemoryStore, ServerState, api};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn seeded_state() -> ServerState {
    let store = MemoryStore::new();
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();

    store
        .seed(
            "reservations",
            json!({
                "id": "r1",
                "reservation_date": today,
                // Always inside the default 120-minute window around "now"
                "start_time": chrono::Local::now().format("%H:%M").to_string(),
                "status": "booked",
                "party_size": 4,
                "table_id": "t1",
                "customer_name": "Walsh"
            }),
        )
        .await;
    store
        .seed(
            "tables",
            json!({
                "id": "t1",
                "table_name": "T1",
                "capacity": 4,
                "status": "available",
                "current_party_size": 0
            }),
        )
        .await;

    // Config::from_env picks up defaults when nothing is set
    ServerState::in_memory(Config::from_env(), store)
}

fn apply_request(uri: &str, role: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-staff-role", role)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn apply_endpoint_reserves_the_table() {
    let app = api::build_app(seeded_state().await);

    let response = app
        .oneshot(apply_request("/api/holds/apply", "manager"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["applied"], 1);
    assert!(body.get("results").is_none());
}

#[tokio::test]
async fn debug_flag_includes_attempt_chains() {
    let app = api::build_app(seeded_state().await);

    let response = app
        .oneshot(apply_request("/api/holds/apply?debug=1", "manager"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], "r1");
    assert_eq!(results[0]["updated"], true);
    assert_eq!(results[0]["attempts"][0]["collection"], "tables");
}

#[tokio::test]
async fn missing_role_header_is_unauthorized() {
    let app = api::build_app(seeded_state().await);

    let request = Request::builder()
        .method("POST")
        .uri("/api/holds/apply")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn chef_lacks_the_tables_capability() {
    let app = api::build_app(seeded_state().await);

    let response = app
        .oneshot(apply_request("/api/holds/apply", "chef"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["code"], "E2001");
}

#[tokio::test]
async fn chef_can_move_a_ticket_through_the_kitchen() {
    let state = seeded_state().await;
    state
        .store
        .create(
            "tickets",
            json!({
                "id": "tk1",
                "ticket_number": "T-000001",
                "table_id": "t1",
                "server_id": "s1",
                "customer_count": 2,
                "status": "sent_to_kitchen",
                "created": "2026-08-31 12:00:00.000",
                "updated": "2026-08-31 12:00:00.000"
            }),
        )
        .await
        .unwrap();
    let app = api::build_app(state);

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/tickets/tk1/status")
        .header("x-staff-role", "chef")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"status":"preparing"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "preparing");
    assert!(body["kitchen_start_time"].as_str().is_some());
}

#[tokio::test]
async fn host_cannot_touch_ticket_status() {
    let app = api::build_app(seeded_state().await);

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/tickets/tk1/status")
        .header("x-staff-role", "host")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"status":"preparing"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn manager_only_prefixes_stay_closed() {
    let app = api::build_app(seeded_state().await);

    let request = Request::builder()
        .method("GET")
        .uri("/api/reports/daily")
        .header("x-staff-role", "chef")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn health_needs_no_role() {
    let app = api::build_app(seeded_state().await);

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
