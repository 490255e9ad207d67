// handlers/protected/stores.rs - store writes for any authenticated user

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::{body, JsonBody};
use crate::models::Store;
use crate::validation::validate_store;

/// POST /api/stores
pub async fn create(State(state): State<AppState>, payload: JsonBody) -> Result<Json<Store>, ApiError> {
    let fields = validate_store(&body(payload)?)?;
    Ok(Json(state.catalog().create_store(fields).await?))
}

/// PUT /api/stores/:id - name and type only; `malls` is maintained elsewhere
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: JsonBody,
) -> Result<Json<Store>, ApiError> {
    let fields = validate_store(&body(payload)?)?;
    Ok(Json(state.catalog().update_store(&id, fields).await?))
}
