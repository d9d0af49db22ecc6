//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use item_service::observability::Telemetry;
use item_service::{AppState, HttpServer, Settings, Shutdown};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Telemetry double that remembers every call.
#[derive(Default)]
pub struct RecordingTelemetry {
    pub created: AtomicU64,
    pub deleted: AtomicU64,
    pub item_count: AtomicI64,
    pub name_lengths: Mutex<Vec<usize>>,
}

impl Telemetry for RecordingTelemetry {
    fn record_item_created(&self) {
        self.created.fetch_add(1, Ordering::SeqCst);
    }

    fn record_item_deleted(&self) {
        self.deleted.fetch_add(1, Ordering::SeqCst);
    }

    fn record_name_length(&self, chars: usize) {
        self.name_lengths.lock().unwrap().push(chars);
    }

    fn adjust_item_count(&self, delta: i64) {
        self.item_count.fetch_add(delta, Ordering::SeqCst);
    }

    fn is_exporting(&self) -> bool {
        false
    }
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.app_name = "Item Service - Test".into();
    settings.environment = "test".into();
    settings.shutdown_drain_secs = 0;
    settings
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub telemetry: Arc<RecordingTelemetry>,
}

pub fn test_app_with(settings: Settings) -> TestApp {
    let telemetry = Arc::new(RecordingTelemetry::default());
    let state = AppState::new(Arc::new(settings), telemetry.clone(), Shutdown::new());
    let server = HttpServer::new(state.clone());
    TestApp {
        router: server.router(),
        state,
        telemetry,
    }
}

pub fn test_app() -> TestApp {
    test_app_with(test_settings())
}

/// Send a request through the router without a socket.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, HeaderMap, Bytes) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(text) => builder
            .header("content-type", "application/json")
            .body(Body::from(text.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, bytes)
}

/// Send a JSON request and decode the JSON response (`Null` when empty).
pub async fn json_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let text = body.map(|v| v.to_string());
    let (status, _, bytes) = send(app, method, uri, text.as_deref()).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Serve `state` on an ephemeral local port.
pub async fn spawn_server(state: AppState) -> (SocketAddr, JoinHandle<std::io::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = state.shutdown.subscribe();
    let server = HttpServer::new(state);
    let handle = tokio::spawn(async move { server.run(listener, shutdown).await });
    (addr, handle)
}
