//! HTTP-level tests for the reservation and table APIs.
//!
//! Each test builds the full router over a fresh migrated database in a
//! temp directory and drives it with `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use foh_server::core::{Config, ServerState};
use foh_server::db::DbService;

async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(db_path.to_str().expect("utf8 path"))
        .await
        .expect("open db");
    let state = ServerState {
        config: Config::with_overrides(dir.path().to_string_lossy(), 0),
        db,
    };
    (foh_server::api::router().with_state(state), dir)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn ada() -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "mobile_number": "123-456-7890",
        "reservation_date": "2999-01-03",
        "reservation_time": "18:00",
        "people": 2
    })
}

async fn create_reservation(app: &Router, payload: Value) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/reservations",
        Some(json!({ "data": payload })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn create_table(app: &Router, name: &str, capacity: i64) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/tables",
        Some(json!({ "data": { "table_name": name, "capacity": capacity } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn create_reservation_returns_201_and_booked() {
    let (app, _dir) = test_app().await;
    let body = create_reservation(&app, ada()).await;
    assert_eq!(body["status"], "booked");
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["reservation_date"], "2999-01-03");
}

#[tokio::test]
async fn create_with_booked_status_is_accepted_any_other_rejected() {
    let (app, _dir) = test_app().await;

    let mut payload = ada();
    payload["status"] = json!("booked");
    let body = create_reservation(&app, payload).await;
    assert_eq!(body["status"], "booked");

    let mut payload = ada();
    payload["status"] = json!("seated");
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reservations",
        Some(json!({ "data": payload })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("seated"));
}

#[tokio::test]
async fn create_without_data_object_is_rejected() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(&app, Method::POST, "/api/reservations", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0006");
}

#[tokio::test]
async fn create_on_a_tuesday_names_the_closed_day() {
    let (app, _dir) = test_app().await;
    let mut payload = ada();
    // 2999-01-01 falls on a Tuesday.
    payload["reservation_date"] = json!("2999-01-01");
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reservations",
        Some(json!({ "data": payload })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Tuesday"), "{body}");
}

#[tokio::test]
async fn create_before_opening_is_rejected() {
    let (app, _dir) = test_app().await;
    let mut payload = ada();
    payload["reservation_time"] = json!("09:00");
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reservations",
        Some(json!({ "data": payload })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("10:30"), "{body}");
}

#[tokio::test]
async fn create_with_empty_draft_aggregates_violations_in_check_order() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reservations",
        Some(json!({ "data": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
    let errors: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(errors.len(), 6);
    assert!(errors[0].contains("first_name"));
    assert!(errors[1].contains("last_name"));
    assert!(errors[2].contains("mobile_number"));
    assert!(errors[3].contains("reservation_date"));
    assert!(errors[4].contains("reservation_time"));
    assert!(errors[5].contains("people"));
}

#[tokio::test]
async fn unknown_reservation_is_404_naming_the_id() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/reservations/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
    assert!(body["message"].as_str().unwrap().contains("9999"));
}

#[tokio::test]
async fn status_lifecycle_over_http() {
    let (app, _dir) = test_app().await;
    let reservation = create_reservation(&app, ada()).await;
    let id = reservation["id"].as_i64().unwrap();
    let uri = format!("/api/reservations/{id}/status");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "data": { "status": "seated" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "seated");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "data": { "status": "finished" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "finished");

    // Finished reservations are immutable.
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "data": { "status": "seated" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("finished"));

    let (_, body) = send(&app, Method::GET, &format!("/api/reservations/{id}"), None).await;
    assert_eq!(body["status"], "finished");
}

#[tokio::test]
async fn unknown_status_is_rejected_naming_it() {
    let (app, _dir) = test_app().await;
    let reservation = create_reservation(&app, ada()).await;
    let id = reservation["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/reservations/{id}/status"),
        Some(json!({ "data": { "status": "tableside" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("tableside"));
}

#[tokio::test]
async fn cancel_goes_through_the_generic_status_path() {
    let (app, _dir) = test_app().await;
    let reservation = create_reservation(&app, ada()).await;
    let id = reservation["id"].as_i64().unwrap();
    let uri = format!("/api/reservations/{id}/status");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "data": { "status": "cancelled" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "cancelled");

    // Cancelled is terminal.
    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "data": { "status": "seated" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn seat_and_release_flow() {
    let (app, _dir) = test_app().await;
    let reservation = create_reservation(&app, ada()).await;
    let rid = reservation["id"].as_i64().unwrap();
    let table = create_table(&app, "Bar 1", 4).await;
    let tid = table["id"].as_i64().unwrap();
    assert_eq!(table["reservation_id"], Value::Null);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/tables/{tid}/seat"),
        Some(json!({ "data": { "reservation_id": rid } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["reservation_id"].as_i64(), Some(rid));

    let (_, body) = send(&app, Method::GET, &format!("/api/reservations/{rid}"), None).await;
    assert_eq!(body["status"], "seated");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/tables/{tid}/seat"), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["reservation_id"], Value::Null);

    let (_, body) = send(&app, Method::GET, &format!("/api/reservations/{rid}"), None).await;
    assert_eq!(body["status"], "finished");
}

#[tokio::test]
async fn seating_an_occupied_table_is_a_conflict_with_no_partial_effect() {
    let (app, _dir) = test_app().await;
    let first = create_reservation(&app, ada()).await;
    let mut other = ada();
    other["mobile_number"] = json!("123-456-7891");
    let second = create_reservation(&app, other).await;
    let table = create_table(&app, "Bar 1", 4).await;
    let tid = table["id"].as_i64().unwrap();

    let uri = format!("/api/tables/{tid}/seat");
    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "data": { "reservation_id": first["id"] } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "data": { "reservation_id": second["id"] } })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    // The loser's reservation is untouched and the table still belongs to
    // the winner.
    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/reservations/{}", second["id"]),
        None,
    )
    .await;
    assert_eq!(body["status"], "booked");
    let (_, body) = send(&app, Method::GET, &format!("/api/tables/{tid}"), None).await;
    assert_eq!(body["reservation_id"], first["id"]);
}

#[tokio::test]
async fn releasing_a_free_table_is_rejected() {
    let (app, _dir) = test_app().await;
    let table = create_table(&app, "Bar 1", 4).await;
    let tid = table["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/tables/{tid}/seat"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("not occupied"));
}

#[tokio::test]
async fn table_create_validates_name_and_capacity() {
    let (app, _dir) = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/tables",
        Some(json!({ "data": { "capacity": 4 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tables",
        Some(json!({ "data": { "table_name": "Bar 1", "capacity": 0 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("capacity"));
}

#[tokio::test]
async fn list_by_date_orders_by_time_and_excludes_finished() {
    let (app, _dir) = test_app().await;

    let mut late = ada();
    late["reservation_time"] = json!("19:00");
    let mut early = ada();
    early["reservation_time"] = json!("11:00");
    early["mobile_number"] = json!("123-456-7891");
    let mut done = ada();
    done["reservation_time"] = json!("13:00");
    done["mobile_number"] = json!("123-456-7892");

    let late = create_reservation(&app, late).await;
    let early = create_reservation(&app, early).await;
    let done = create_reservation(&app, done).await;

    // Seat and release the third so it ends up finished.
    let table = create_table(&app, "Bar 1", 4).await;
    let tid = table["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/tables/{tid}/seat"),
        Some(json!({ "data": { "reservation_id": done["id"] } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &format!("/api/tables/{tid}/seat"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reservations?date=2999-01-03",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .expect("list")
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![early["id"].as_i64().unwrap(), late["id"].as_i64().unwrap()]);
}

#[tokio::test]
async fn search_by_phone_fragment() {
    let (app, _dir) = test_app().await;
    let hit = create_reservation(&app, ada()).await;
    let mut other = ada();
    other["mobile_number"] = json!("999-888-7777");
    create_reservation(&app, other).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reservations?mobile_number=456",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().expect("list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], hit["id"]);
}

#[tokio::test]
async fn list_requires_exactly_one_filter() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/reservations", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0006");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/reservations?date=2999-01-03&mobile_number=456",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
