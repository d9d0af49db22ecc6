//! Item API tests through the full middleware stack.

use std::collections::HashSet;
use std::sync::atomic::Ordering;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{json_request, send, test_app, test_app_with, test_settings};

fn ids(items: &Value) -> Vec<u64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_item() {
    let app = test_app();
    let payload = json!({
        "name": "Test Item",
        "description": "A test item",
        "price": 29.99,
        "quantity": 5
    });

    let (status, body) = json_request(&app.router, "POST", "/items", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Test Item");
    assert_eq!(body["description"], "A test item");
    assert_eq!(body["price"], 29.99);
    assert_eq!(body["quantity"], 5);
    assert_eq!(body["total_value"], 29.99 * 5.0);
}

#[tokio::test]
async fn test_create_item_defaults() {
    let app = test_app();
    let (status, body) = json_request(
        &app.router,
        "POST",
        "/items",
        Some(json!({"name": "Minimal", "price": 5.00})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["description"].is_null());
    assert_eq!(body["quantity"], 1);
    assert_eq!(body["total_value"], 5.0);
}

#[tokio::test]
async fn test_total_value_calculation() {
    let app = test_app();
    let cases = [(10.00, 1, 10.00), (25.50, 4, 102.00), (0.01, 100, 1.00)];

    for (price, quantity, expected) in cases {
        let (status, body) = json_request(
            &app.router,
            "POST",
            "/items",
            Some(json!({"name": "Test", "price": price, "quantity": quantity})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["total_value"], expected, "price={price} quantity={quantity}");

        let uri = format!("/items/{}", body["id"]);
        let (_, fetched) = json_request(&app.router, "GET", &uri, None).await;
        assert_eq!(fetched["total_value"], expected);
    }
}

#[tokio::test]
async fn test_validation_errors_leave_store_unchanged() {
    let app = test_app();
    let long_name = "x".repeat(101);
    let long_description = "d".repeat(501);
    let invalid = [
        json!({"price": 10.0}),
        json!({"name": "", "price": 10.0}),
        json!({"name": "Test", "price": -1}),
        json!({"name": "Test", "price": 0}),
        json!({"name": "Test", "price": 10.0, "quantity": -5}),
        json!({"name": "Test", "price": 10.0, "quantity": 1.5}),
        json!({"name": long_name, "price": 10.0}),
        json!({"name": "Test", "price": 10.0, "description": long_description}),
        json!({"name": "", "price": -10}),
    ];

    for payload in invalid {
        let (status, body) = json_request(&app.router, "POST", "/items", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "expected 422 for {payload}");
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].is_string());
    }

    assert!(app.state.store.is_empty());
    assert_eq!(app.telemetry.created.load(Ordering::SeqCst), 0);

    // No id was consumed by the failed attempts.
    let (_, body) = json_request(
        &app.router,
        "POST",
        "/items",
        Some(json!({"name": "First", "price": 1.0})),
    )
    .await;
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_all_field_errors_reported() {
    let app = test_app();
    let (status, body) = json_request(
        &app.router,
        "POST",
        "/items",
        Some(json!({"name": "", "price": -10, "quantity": -1})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("name"));
    assert!(detail.contains("price"));
    assert!(detail.contains("quantity"));
}

#[tokio::test]
async fn test_malformed_body_is_422() {
    let app = test_app();
    let (status, _, bytes) = send(&app.router, "POST", "/items", Some("{not json")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "validation_error");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut settings = test_settings();
    settings.limits.max_body_bytes = 64;
    let app = test_app_with(settings);

    let payload = json!({"name": "x".repeat(90), "price": 1.0}).to_string();
    let (status, _, bytes) = send(&app.router, "POST", "/items", Some(&payload)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "payload_too_large");
    assert!(app.state.store.is_empty());
}

#[tokio::test]
async fn test_oversized_body_with_content_length_is_structured() {
    let mut settings = test_settings();
    settings.limits.max_body_bytes = 64;
    let app = test_app_with(settings);

    let payload = json!({"name": "x".repeat(90), "price": 1.0}).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/items")
        .header("content-type", "application/json")
        .header("content-length", payload.len())
        .body(Body::from(payload))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "payload_too_large");
    assert!(body["message"].is_string());
    assert!(app.state.store.is_empty());
}

#[tokio::test]
async fn test_configured_body_limit_replaces_framework_default() {
    let mut settings = test_settings();
    settings.limits.max_body_bytes = 4 * 1024 * 1024;
    let app = test_app_with(settings);

    // 3 MiB is over axum's built-in 2 MiB cap but under the configured one,
    // so the request reaches field validation.
    let payload = json!({
        "name": "Big",
        "price": 1.0,
        "description": "d".repeat(3 * 1024 * 1024)
    });
    let (status, body) = json_request(&app.router, "POST", "/items", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("description"));
}

#[tokio::test]
async fn test_list_items_empty() {
    let app = test_app();
    let (status, body) = json_request(&app.router, "GET", "/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_default_limit_is_ten() {
    let app = test_app();
    for i in 0..12 {
        json_request(
            &app.router,
            "POST",
            "/items",
            Some(json!({"name": format!("Item {i}"), "price": 10.0})),
        )
        .await;
    }

    let (status, body) = json_request(&app.router, "GET", "/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_pagination_workflow() {
    let app = test_app();
    for i in 0..10 {
        let (status, _) = json_request(
            &app.router,
            "POST",
            "/items",
            Some(json!({"name": format!("Item {i:02}"), "price": 10.0 + i as f64})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, page1) = json_request(&app.router, "GET", "/items?skip=0&limit=5", None).await;
    let (_, page2) = json_request(&app.router, "GET", "/items?skip=5&limit=5", None).await;
    let (status, page3) = json_request(&app.router, "GET", "/items?skip=10&limit=5", None).await;

    assert_eq!(ids(&page1), vec![1, 2, 3, 4, 5]);
    assert_eq!(ids(&page2), vec![6, 7, 8, 9, 10]);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page3, json!([]));

    let first: HashSet<u64> = ids(&page1).into_iter().collect();
    let second: HashSet<u64> = ids(&page2).into_iter().collect();
    assert!(first.is_disjoint(&second));
    assert_eq!(first.len() + second.len(), 10);
}

#[tokio::test]
async fn test_list_invalid_pagination() {
    let app = test_app();
    for uri in [
        "/items?skip=-1",
        "/items?limit=0",
        "/items?limit=101",
        "/items?skip=abc",
        "/items?limit=2.5",
    ] {
        let (status, body) = json_request(&app.router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "expected 422 for {uri}");
        assert_eq!(body["error"], "validation_error");
    }

    let (status, _) = json_request(&app.router, "GET", "/items?skip=0&limit=100", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_item() {
    let app = test_app();
    let (_, created) = json_request(
        &app.router,
        "POST",
        "/items",
        Some(json!({"name": "Test Item", "price": 15.0})),
    )
    .await;

    let uri = format!("/items/{}", created["id"]);
    let (status, body) = json_request(&app.router, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_get_item_not_found() {
    let app = test_app();
    let (status, body) = json_request(&app.router, "GET", "/items/99999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["detail"], "Item with ID 99999 not found");
}

#[tokio::test]
async fn test_invalid_item_id_is_422() {
    let app = test_app();
    for uri in ["/items/0", "/items/abc", "/items/-3"] {
        let (status, body) = json_request(&app.router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "expected 422 for {uri}");
        assert_eq!(body["error"], "validation_error");

        let (status, _) = json_request(&app.router, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_complete_item_lifecycle() {
    let app = test_app();
    let payload = json!({
        "name": "Lifecycle Test Item",
        "description": "Testing the full item lifecycle",
        "price": 49.99,
        "quantity": 5
    });

    let (status, created) = json_request(&app.router, "POST", "/items", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/items/{}", created["id"]);

    let (_, listed) = json_request(&app.router, "GET", "/items", None).await;
    assert!(ids(&listed).contains(&created["id"].as_u64().unwrap()));

    let (status, body) = json_request(&app.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = json_request(&app.router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = json_request(&app.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_item_not_found() {
    let app = test_app();
    let (status, body) = json_request(&app.router, "DELETE", "/items/99999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let app = test_app();
    let mut seen = HashSet::new();

    for round in 0..3 {
        let (_, body) = json_request(
            &app.router,
            "POST",
            "/items",
            Some(json!({"name": format!("round {round}"), "price": 1.0})),
        )
        .await;
        let id = body["id"].as_u64().unwrap();
        assert!(seen.insert(id), "duplicate id {id}");

        let (status, _) = json_request(&app.router, "DELETE", &format!("/items/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    assert_eq!(seen, HashSet::from([1, 2, 3]));
}

#[tokio::test]
async fn test_telemetry_tracks_successful_mutations() {
    let app = test_app();

    json_request(&app.router, "POST", "/items", Some(json!({"name": "abc", "price": 1.0}))).await;
    json_request(&app.router, "POST", "/items", Some(json!({"name": "héllo", "price": 1.0}))).await;
    json_request(&app.router, "POST", "/items", Some(json!({"name": "", "price": 1.0}))).await;
    json_request(&app.router, "DELETE", "/items/1", None).await;
    json_request(&app.router, "DELETE", "/items/1", None).await;

    let telemetry = &app.telemetry;
    assert_eq!(telemetry.created.load(Ordering::SeqCst), 2);
    assert_eq!(telemetry.deleted.load(Ordering::SeqCst), 1);
    assert_eq!(telemetry.item_count.load(Ordering::SeqCst), 1);
    assert_eq!(*telemetry.name_lengths.lock().unwrap(), vec![3, 5]);
}

#[tokio::test]
async fn test_unknown_route_and_method() {
    let app = test_app();

    let (status, body) = json_request(&app.router, "GET", "/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _, _) = send(&app.router, "PUT", "/", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
