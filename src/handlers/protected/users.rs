// handlers/protected/users.rs - GET /api/users/me

use axum::{
    extract::{Extension, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::UserProfile;

/// GET /api/users/me - the caller's profile without the password hash
pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state.users().profile(auth_user.id).await?;
    Ok(Json(user.profile()))
}
