// handlers/elevated/malls.rs - admin-only mall and employee deletes

use axum::{
    extract::{Extension, Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Employee, Mall};

/// DELETE /api/malls/:id - returns the mall as it was before deletion
pub async fn delete(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Mall>, ApiError> {
    let mall = state.relationships().remove_mall(&id).await?;
    tracing::info!("Admin {} deleted mall {}", admin.id, mall.id);
    Ok(Json(mall))
}

/// DELETE /api/malls/:id/:employeeId
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthUser>,
    Path((id, employee_id)): Path<(String, String)>,
) -> Result<Json<Employee>, ApiError> {
    let employee = state.relationships().remove_employee(&id, &employee_id).await?;
    tracing::info!("Admin {} deleted employee {}", admin.id, employee.id);
    Ok(Json(employee))
}
