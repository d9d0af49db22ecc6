//! Service metadata endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub app_name: String,
    pub version: String,
    pub environment: String,
    pub hostname: Option<String>,
    pub container_app_name: Option<String>,
    pub container_app_revision: Option<String>,
    pub replica_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub docs_url: &'static str,
}

/// GET /info
pub async fn get_info(State(state): State<AppState>) -> Json<InfoResponse> {
    let settings = &state.settings;
    Json(InfoResponse {
        app_name: settings.app_name.clone(),
        version: settings.app_version.clone(),
        environment: settings.environment.clone(),
        hostname: hostname::get()
            .ok()
            .map(|h| h.to_string_lossy().into_owned()),
        container_app_name: settings.container.app_name.clone(),
        container_app_revision: settings.container.revision.clone(),
        replica_name: settings.container.replica_name.clone(),
    })
}

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: format!("Welcome to {}!", state.settings.app_name),
        docs_url: "/docs",
    })
}
