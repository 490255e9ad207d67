// handlers/protected/employees.rs - employee writes scoped to a mall

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::{body, JsonBody};
use crate::models::Employee;
use crate::validation::validate_employee;

/// POST /api/malls/:id/:storeId/employees
pub async fn create(
    State(state): State<AppState>,
    Path((id, store_id)): Path<(String, String)>,
    payload: JsonBody,
) -> Result<Json<Employee>, ApiError> {
    let fields = validate_employee(&body(payload)?)?;
    Ok(Json(state.relationships().add_employee(&id, &store_id, fields).await?))
}

/// PUT /api/malls/:id/:employeeId - `store` and `mall` are never changed
pub async fn update(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(String, String)>,
    payload: JsonBody,
) -> Result<Json<Employee>, ApiError> {
    let fields = validate_employee(&body(payload)?)?;
    Ok(Json(state.relationships().update_employee(&id, &employee_id, fields).await?))
}
