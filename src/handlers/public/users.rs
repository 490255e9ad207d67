// handlers/public/users.rs - POST /api/users and POST /api/auth

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Json},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::{body, JsonBody};
use crate::middleware::AUTH_TOKEN_HEADER;
use crate::models::UserProfile;
use crate::validation::{validate_credentials, validate_registration};

/// POST /api/users - register; responds with `{_id, name, email}`
pub async fn register(State(state): State<AppState>, payload: JsonBody) -> Result<Json<UserProfile>, ApiError> {
    let registration = validate_registration(&body(payload)?)?;
    let user = state.users().register(registration).await?;
    Ok(Json(user.summary()))
}

/// POST /api/auth - login; the token travels in the `x-auth-token` header
pub async fn login(State(state): State<AppState>, payload: JsonBody) -> Result<impl IntoResponse, ApiError> {
    let credentials = validate_credentials(&body(payload)?)?;
    let (token, user) = state.users().authenticate(credentials).await?;

    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&token)
        .map_err(|_| ApiError::internal_server_error("Could not encode token header"))?;
    headers.insert(AUTH_TOKEN_HEADER, value);

    tracing::info!("User {} logged in", user.id);
    Ok((headers, Json(user.summary())))
}
