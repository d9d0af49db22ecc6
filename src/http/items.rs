//! Item CRUD handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::http::extract::{ItemId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::store::pagination::DEFAULT_LIMIT;
use crate::store::{Item, NewItem, Page};

/// An item as returned to clients, with its derived total value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemResponse {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: u64,
    pub total_value: f64,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        let total_value = item.total_value();
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            quantity: item.quantity,
            total_value,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn create_item(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewItem>,
) -> Result<(StatusCode, Json<ItemResponse>)> {
    let item = state.store.create(payload)?;

    state.telemetry.record_item_created();
    state.telemetry.record_name_length(item.name.chars().count());
    state.telemetry.adjust_item_count(1);

    tracing::info!(item_id = item.id, total_value = item.total_value(), "Item created");
    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn list_items(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> Result<Json<Vec<ItemResponse>>> {
    let page = Page::new(
        params.skip.unwrap_or(0),
        params.limit.unwrap_or(DEFAULT_LIMIT),
    )
    .map_err(|errors| ApiError::invalid_fields(&errors))?;

    let items = state.store.list(page);
    tracing::debug!(skip = page.skip(), limit = page.limit(), returned = items.len(), "Listed items");
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

pub async fn get_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<ItemResponse>> {
    let item = state.store.get(id)?;
    Ok(Json(item.into()))
}

pub async fn delete_item(State(state): State<AppState>, ItemId(id): ItemId) -> Result<StatusCode> {
    state.store.delete(id)?;

    state.telemetry.record_item_deleted();
    state.telemetry.adjust_item_count(-1);

    tracing::info!(item_id = id, "Item deleted");
    Ok(StatusCode::NO_CONTENT)
}
