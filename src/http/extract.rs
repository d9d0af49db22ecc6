//! Extractors whose rejections use the service error body.

use axum::{
    extract::{FromRequest, FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::ApiError;

/// `Json<T>` that rejects with a 422 `ApiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);

/// `Query<T>` that rejects with a 422 `ApiError`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ValidQuery<T>(pub T);

/// The `{item_id}` path segment. Ids start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub u64);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<u64>::from_request_parts(parts, state).await?;
        if id == 0 {
            return Err(ApiError::validation(
                "Invalid path parameter",
                Some("item_id: must be greater than or equal to 1".into()),
            ));
        }
        Ok(ItemId(id))
    }
}
