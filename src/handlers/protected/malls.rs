// handlers/protected/malls.rs - mall writes for any authenticated user

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::{body, JsonBody};
use crate::models::Mall;
use crate::validation::validate_mall;

/// POST /api/malls - new malls start with empty `stores` and `employees`
pub async fn create(State(state): State<AppState>, payload: JsonBody) -> Result<Json<Mall>, ApiError> {
    let fields = validate_mall(&body(payload)?)?;
    Ok(Json(state.catalog().create_mall(fields).await?))
}

/// PUT /api/malls/:id - full-field replacement, relationship lists kept
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: JsonBody,
) -> Result<Json<Mall>, ApiError> {
    let fields = validate_mall(&body(payload)?)?;
    Ok(Json(state.catalog().update_mall(&id, fields).await?))
}

/// POST /api/malls/:id/:storeId - associate a store; no body is read
pub async fn add_store(
    State(state): State<AppState>,
    Path((id, store_id)): Path<(String, String)>,
) -> Result<Json<Mall>, ApiError> {
    Ok(Json(state.relationships().add_store_to_mall(&id, &store_id).await?))
}
