//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request id, tracing, timeout, body limit, CORS)
//! - Keep layer rejections (413, 408) in the JSON error format
//! - Serve on a bound listener until the shutdown signal, then drain

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::error::ApiError;
use crate::health::{info, probes};
use crate::http::request::UuidRequestId;
use crate::http::{docs, items};
use crate::lifecycle::Shutdown;
use crate::observability::tracing::make_request_span;
use crate::observability::Telemetry;
use crate::store::ItemStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<ItemStore>,
    pub telemetry: Arc<dyn Telemetry>,
    pub shutdown: Shutdown,
}

impl AppState {
    /// State with a fresh, empty store.
    pub fn new(settings: Arc<Settings>, telemetry: Arc<dyn Telemetry>, shutdown: Shutdown) -> Self {
        Self {
            settings,
            store: Arc::new(ItemStore::new()),
            telemetry,
            shutdown,
        }
    }
}

/// HTTP server for the item service.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are drained before returning.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            app = %self.state.settings.app_name,
            environment = %self.state.settings.environment,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Stopping listener, draining in-flight requests");
            })
            .await?;

        tracing::info!(items = self.state.store.len(), "HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState) -> Router {
    let limits = state.settings.limits.clone();

    Router::new()
        .route("/", get(info::root))
        .route("/info", get(info::get_info))
        .route("/health", get(probes::health_check))
        .route("/health/ready", get(probes::readiness_check))
        .route("/health/live", get(probes::liveness_check))
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/{item_id}",
            get(items::get_item).delete(items::delete_item),
        )
        .route(docs::OPENAPI_PATH, get(docs::openapi_json))
        .route("/docs", get(docs::swagger_ui))
        .route("/redoc", get(docs::redoc))
        .fallback(route_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(limits.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(limits.request_timeout_secs)))
        .layer(middleware::map_response(structure_layer_rejection))
        .layer(CorsLayer::very_permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        message: "Not Found".into(),
        detail: Some(format!("No route for {}", uri.path())),
    }
}

/// Give the bare 413/408 responses produced by the limit and timeout layers
/// the same JSON error body as every other failure.
async fn structure_layer_rejection(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if is_json {
        return response;
    }

    match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => {
            ApiError::PayloadTooLarge("Request body exceeds the configured limit".into())
                .into_response()
        }
        StatusCode::REQUEST_TIMEOUT => {
            ApiError::RequestTimeout("Request did not complete in time".into()).into_response()
        }
        _ => response,
    }
}
