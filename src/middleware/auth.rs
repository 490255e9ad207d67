use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Header carrying the session token, both on login responses and requests
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated caller extracted from a verified token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id,
            is_admin: claims.is_admin,
        }
    }
}

/// Token gate: 401 when no token is sent, 400 when it fails verification.
/// On success the caller is attached to the request as an `AuthUser`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Access Denied. No token provided"))?;

    let claims = auth::verify_token(token, &state.config.security).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ApiError::bad_request("Invalid token.")
    })?;

    let auth_user = AuthUser::from(claims);
    tracing::debug!("Authenticated user {} (admin: {})", auth_user.id, auth_user.is_admin);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// An empty header counts as no token
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
