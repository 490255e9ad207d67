// handlers/protected/mod.rs - Protected handlers (token required)
//
// Creation and full-field updates. Handlers receive the caller as an
// `AuthUser` extension set by `middleware::require_auth`.

pub mod employees;
pub mod malls;
pub mod stores;
pub mod users;
