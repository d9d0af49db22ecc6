//! API documentation endpoints.
//!
//! `/openapi.json` describes the public routes; `/docs` and `/redoc` are
//! static pages that render it with Swagger UI and ReDoc from a CDN.

use axum::{extract::State, response::Html, Json};
use serde_json::{json, Value};

use crate::config::Settings;
use crate::http::server::AppState;

pub const OPENAPI_PATH: &str = "/openapi.json";

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
    })
}

fn json_response(description: &str, schema: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": format!("#/components/schemas/{schema}") } } }
    })
}

fn item_id_param() -> Value {
    json!({
        "name": "item_id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "minimum": 1 }
    })
}

fn component_schemas() -> Value {
    json!({
        "HealthResponse": {
            "type": "object",
            "required": ["status", "timestamp"],
            "properties": {
                "status": { "type": "string" },
                "timestamp": { "type": "string", "format": "date-time" }
            }
        },
        "InfoResponse": {
            "type": "object",
            "required": ["app_name", "version", "environment"],
            "properties": {
                "app_name": { "type": "string" },
                "version": { "type": "string" },
                "environment": { "type": "string" },
                "hostname": { "type": ["string", "null"] },
                "container_app_name": { "type": ["string", "null"] },
                "container_app_revision": { "type": ["string", "null"] },
                "replica_name": { "type": ["string", "null"] }
            }
        },
        "WelcomeResponse": {
            "type": "object",
            "required": ["message", "docs_url"],
            "properties": {
                "message": { "type": "string" },
                "docs_url": { "type": "string" }
            }
        },
        "ItemCreate": {
            "type": "object",
            "required": ["name", "price"],
            "properties": {
                "name": { "type": "string", "minLength": 1, "maxLength": 100 },
                "description": { "type": ["string", "null"], "maxLength": 500 },
                "price": { "type": "number", "exclusiveMinimum": 0 },
                "quantity": { "type": "integer", "minimum": 0, "default": 1 }
            }
        },
        "ItemResponse": {
            "type": "object",
            "required": ["id", "name", "description", "price", "quantity", "total_value"],
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "string" },
                "description": { "type": ["string", "null"] },
                "price": { "type": "number" },
                "quantity": { "type": "integer" },
                "total_value": { "type": "number" }
            }
        },
        "ErrorResponse": {
            "type": "object",
            "required": ["error", "message"],
            "properties": {
                "error": { "type": "string" },
                "message": { "type": "string" },
                "detail": { "type": "string" }
            }
        }
    })
}

/// Build the OpenAPI document for this service.
pub fn openapi_document(settings: &Settings) -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": settings.app_name,
            "version": settings.app_version,
            "description": "Health probes, service metadata and an in-memory item store."
        },
        "paths": {
            "/": {
                "get": {
                    "tags": ["Root"],
                    "summary": "Welcome message and documentation link",
                    "responses": { "200": json_response("Welcome", "WelcomeResponse") }
                }
            },
            "/health": {
                "get": {
                    "tags": ["Health"],
                    "summary": "Health check",
                    "responses": { "200": json_response("Healthy", "HealthResponse") }
                }
            },
            "/health/ready": {
                "get": {
                    "tags": ["Health"],
                    "summary": "Readiness probe",
                    "responses": {
                        "200": json_response("Ready", "HealthResponse"),
                        "503": error_response("Shutting down")
                    }
                }
            },
            "/health/live": {
                "get": {
                    "tags": ["Health"],
                    "summary": "Liveness probe",
                    "responses": { "200": json_response("Alive", "HealthResponse") }
                }
            },
            "/info": {
                "get": {
                    "tags": ["Info"],
                    "summary": "Application and runtime metadata",
                    "responses": { "200": json_response("Metadata", "InfoResponse") }
                }
            },
            "/items": {
                "get": {
                    "tags": ["Items"],
                    "summary": "List items",
                    "parameters": [
                        { "name": "skip", "in": "query", "schema": { "type": "integer", "minimum": 0, "default": 0 } },
                        { "name": "limit", "in": "query", "schema": { "type": "integer", "minimum": 1, "maximum": 100, "default": 10 } }
                    ],
                    "responses": {
                        "200": {
                            "description": "Items in insertion order",
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/ItemResponse" }
                            } } }
                        },
                        "422": error_response("Invalid pagination")
                    }
                },
                "post": {
                    "tags": ["Items"],
                    "summary": "Create an item",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ItemCreate" } } }
                    },
                    "responses": {
                        "201": json_response("Item created", "ItemResponse"),
                        "422": error_response("Validation error")
                    }
                }
            },
            "/items/{item_id}": {
                "get": {
                    "tags": ["Items"],
                    "summary": "Get an item by id",
                    "parameters": [item_id_param()],
                    "responses": {
                        "200": json_response("Item found", "ItemResponse"),
                        "404": error_response("Item not found")
                    }
                },
                "delete": {
                    "tags": ["Items"],
                    "summary": "Delete an item",
                    "parameters": [item_id_param()],
                    "responses": {
                        "204": { "description": "Item deleted" },
                        "404": error_response("Item not found")
                    }
                }
            }
        },
        "components": { "schemas": component_schemas() }
    })
}

/// GET /openapi.json
pub async fn openapi_json(State(state): State<AppState>) -> Json<Value> {
    Json(openapi_document(&state.settings))
}

/// Swagger UI page pointing at the OpenAPI document.
fn swagger_page(settings: &Settings) -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
<head>
<title>{title} - Swagger UI</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>SwaggerUIBundle({{ url: "{openapi}", dom_id: "#swagger-ui" }});</script>
</body>
</html>"##,
        title = settings.app_name,
        openapi = OPENAPI_PATH,
    )
}

fn redoc_page(settings: &Settings) -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
<head>
<title>{title} - ReDoc</title>
</head>
<body>
<redoc spec-url="{openapi}"></redoc>
<script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"></script>
</body>
</html>"##,
        title = settings.app_name,
        openapi = OPENAPI_PATH,
    )
}

/// GET /docs
pub async fn swagger_ui(State(state): State<AppState>) -> Html<String> {
    Html(swagger_page(&state.settings))
}

/// GET /redoc
pub async fn redoc(State(state): State<AppState>) -> Html<String> {
    Html(redoc_page(&state.settings))
}
