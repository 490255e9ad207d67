// handlers/mod.rs - 3-tier handler layout
//
// Public (no token) → Protected (token required) → Elevated (token + admin).
// The tier a handler lives in decides which gates `app::app` wraps it in.

pub mod elevated;
pub mod protected;
pub mod public;

use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;

use crate::error::ApiError;

/// JSON body whose parse failure is reported as `INVALID_JSON`
pub type JsonBody = Result<Json<Value>, JsonRejection>;

pub(crate) fn body(payload: JsonBody) -> Result<Value, ApiError> {
    let Json(value) = payload?;
    Ok(value)
}
