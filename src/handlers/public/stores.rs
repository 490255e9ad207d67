// handlers/public/stores.rs - read-only store routes

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::Store;

/// GET /api/stores
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Store>>, ApiError> {
    Ok(Json(state.catalog().list_stores().await?))
}

/// GET /api/stores/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Store>, ApiError> {
    Ok(Json(state.catalog().get_store(&id).await?))
}
