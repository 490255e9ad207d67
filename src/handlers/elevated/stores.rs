// handlers/elevated/stores.rs - admin-only store delete

use axum::{
    extract::{Extension, Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::Store;

/// DELETE /api/stores/:id - also detaches the store from every mall
pub async fn delete(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Store>, ApiError> {
    let store = state.relationships().remove_store(&id).await?;
    tracing::info!("Admin {} deleted store {}", admin.id, store.id);
    Ok(Json(store))
}
