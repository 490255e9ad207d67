pub mod admin;
pub mod auth;

pub use admin::require_admin;
pub use auth::{require_auth, AuthUser, AUTH_TOKEN_HEADER};
