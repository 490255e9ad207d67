// handlers/public/home.rs - GET / and GET /health

use axum::{extract::State, http::HeaderMap, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET / - service description with the environment and requested host
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| state.config.bind_address());

    Json(json!({
        "name": state.config.app_name,
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment.as_str(),
        "host": host,
        "endpoints": {
            "users": "/api/users (register), /api/users/me (token)",
            "auth": "/api/auth (login, returns x-auth-token)",
            "malls": "/api/malls[/:id] plus /:id/stores, /:id/employees, /:id/:storeId, /:id/:storeId/employees, /:id/:employeeId",
            "stores": "/api/stores[/:id]",
        }
    }))
}

/// GET /health - 503 when the document store does not answer
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.store.health_check().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::service_unavailable("Database unavailable")
    })?;

    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": "ok"
    })))
}
