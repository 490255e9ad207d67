// handlers/public/malls.rs - read-only mall routes

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::{Employee, Mall, Store};

/// GET /api/malls
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Mall>>, ApiError> {
    Ok(Json(state.catalog().list_malls().await?))
}

/// GET /api/malls/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Mall>, ApiError> {
    Ok(Json(state.catalog().get_mall(&id).await?))
}

/// GET /api/malls/:id/stores
pub async fn stores(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Vec<Store>>, ApiError> {
    Ok(Json(state.catalog().mall_stores(&id).await?))
}

/// GET /api/malls/:id/employees
pub async fn employees(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.catalog().mall_employees(&id).await?))
}

/// GET /api/malls/:id/:employeeId
pub async fn employee(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(String, String)>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(state.catalog().mall_employee(&id, &employee_id).await?))
}
