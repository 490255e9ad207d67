use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;

use super::auth::AuthUser;

/// Admin gate. Runs after `require_auth`, so a request without a token has
/// already been turned away with 401 before reaching this check.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .copied()
        .ok_or_else(|| ApiError::unauthorized("Access Denied. No token provided"))?;

    if !auth_user.is_admin {
        tracing::debug!("User {} denied admin route {}", auth_user.id, request.uri());
        return Err(ApiError::forbidden("Access denied. You must be an admin"));
    }

    Ok(next.run(request).await)
}
