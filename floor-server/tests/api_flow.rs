//! HTTP 流程测试 - 通过 Router oneshot 调用, 不绑定端口

use axum::Router;
use axum::body::Body;
use floor_server::core::build_router;
use floor_server::{Config, ServerState};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let config = Config::default();
    build_router(ServerState::initialize(&config))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn admit(app: &Router, kind: &str, party_size: u32) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        "/api/patrons",
        Some(json!({ "service_kind": kind, "party_size": party_size })),
    )
    .await
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["waiters"], 4);
    assert_eq!(body["tables"], 16);
}

#[tokio::test]
async fn test_dine_in_round_trip() {
    let app = app();

    let (status, body) = admit(&app, "DINE_IN", 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    let patron = &body["data"];
    assert_eq!(patron["state"], "FULLY_ASSIGNED");
    assert_eq!(patron["waiter_staff_id"], "STF001");
    assert_eq!(patron["waiter_name"], "Thandi Mthembu");
    assert_eq!(patron["table_number"], 1);
    let patron_id = patron["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "patron_id": patron_id, "total": 120.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = call(
        &app,
        "POST",
        &format!("/api/orders/{}/amounts", order_id),
        Some(json!({ "amount": 29.5 })),
    )
    .await;
    assert_eq!(body["data"]["total"], 150.0);

    let (_, body) = call(&app, "GET", "/api/patrons/with-orders/dine-in", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    let (_, body) = call(&app, "GET", "/api/patrons/pending-counts", None).await;
    assert_eq!(body["data"]["dine_in_pending"], 1);

    let (status, body) = call(&app, "POST", &format!("/api/orders/{}/pay", order_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order"]["paid"], true);
    assert_eq!(body["data"]["release"]["table_number"], 1);

    let (_, body) = call(&app, "GET", "/api/waiters/STF001", None).await;
    assert_eq!(body["data"]["total_sales"], 150.0);
    assert_eq!(body["data"]["total_commission"], 22.5);
    assert_eq!(body["data"]["dine_in_load"], 0);

    let (status, body) = call(&app, "GET", &format!("/api/patrons/{}", patron_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    // Second payment is refused
    let (status, body) = call(&app, "POST", &format!("/api/orders/{}/pay", order_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn test_oversized_party_is_refused() {
    let app = app();
    let (status, body) = admit(&app, "DINE_IN", 9).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1002);
    assert_eq!(body["details"]["party_size"], 9);
    assert_eq!(body["details"]["largest_table"], 8);

    let (_, body) = call(&app, "GET", "/api/patrons/dine-in-availability?party_size=9", None).await;
    assert_eq!(body["data"]["can_accept"], false);
    assert_eq!(body["data"]["waiters_available"], true);
    assert!(body["data"]["table_capacity"].is_null());

    let (_, body) = call(&app, "GET", "/api/patrons/dine-in-availability?party_size=3", None).await;
    assert_eq!(body["data"]["table_capacity"], 4);
}

#[tokio::test]
async fn test_waiters_full_then_takeout() {
    let app = app();
    for _ in 0..16 {
        let (status, _) = admit(&app, "DINE_IN", 1).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = admit(&app, "DINE_IN", 1).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1001);

    let (status, body) = admit(&app, "TAKEOUT", 4).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["party_size"], 1);

    let (_, body) = call(&app, "GET", "/api/patrons/queue-counts", None).await;
    assert_eq!(body["data"]["dine_in_queued"], 16);
    assert_eq!(body["data"]["takeout_queued"], 1);

    let (_, body) = call(&app, "GET", "/api/tables/status", None).await;
    assert_eq!(body["data"]["occupied_tables"], 16);
    assert_eq!(body["data"]["available_tables"], 0);
}

#[tokio::test]
async fn test_order_requires_known_patron() {
    let app = app();
    let (status, body) = call(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "patron_id": 404, "total": 10.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    let (status, body) = call(&app, "GET", "/api/orders/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (status, _) = call(&app, "GET", "/api/tables/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listings() {
    let app = app();
    admit(&app, "TAKEOUT", 1).await;
    admit(&app, "DINE_IN", 4).await;

    let (_, body) = call(&app, "GET", "/api/patrons", None).await;
    let patrons = body["data"].as_array().unwrap();
    // Dine-in queue is listed first
    assert_eq!(patrons[0]["service_kind"], "DINE_IN");
    assert_eq!(patrons[1]["service_kind"], "TAKEOUT");

    let (_, body) = call(&app, "GET", "/api/patrons/without-orders", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = call(&app, "GET", "/api/tables", None).await;
    let tables = body["data"].as_array().unwrap();
    assert_eq!(tables.len(), 16);
    // First 4-seat table in layout order
    assert_eq!(tables[4]["occupied"], true);

    // Free tables per class, keyed by capacity
    let (_, body) = call(&app, "GET", "/api/tables/available", None).await;
    assert_eq!(body["data"]["2"], 4);
    assert_eq!(body["data"]["4"], 5);
    assert_eq!(body["data"]["8"], 2);

    let (_, body) = call(&app, "GET", "/api/waiters", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
    assert_eq!(body["data"][1]["staff_id"], "STF002");
}
