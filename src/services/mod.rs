pub mod catalog_service;
pub mod relationship_service;
pub mod user_service;

pub use catalog_service::CatalogService;
pub use relationship_service::RelationshipService;
pub use user_service::UserService;

use thiserror::Error;
use uuid::Uuid;

use crate::auth::{PasswordError, TokenError};
use crate::database::{DatabaseError, Repository};
use crate::models::{parse_id, Document};
use crate::validation::ValidationError;

/// Business-rule failures raised by the services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    DuplicateAssociation(String),

    #[error("Store name '{0}' is already taken")]
    NameTaken(String),

    #[error("User is already registered")]
    AlreadyRegistered,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid password")]
    InvalidPassword,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Map a unique-key collision on write to the caller's business error
pub(crate) fn on_conflict(err: DatabaseError, conflict: impl FnOnce() -> ServiceError) -> ServiceError {
    match err {
        DatabaseError::Conflict { .. } => conflict(),
        other => other.into(),
    }
}

/// Parse a path id, mapping malformed input to a not-found error
pub(crate) fn require_id(raw: &str, label: &str) -> Result<Uuid, ServiceError> {
    parse_id(raw).ok_or_else(|| ServiceError::NotFound(format!("{} id is not valid", label)))
}

/// Resolve a parsed id or fail with `<label> not found`
pub(crate) async fn find_or_404<T: Document>(
    repo: &Repository<T>,
    id: Uuid,
    label: &str,
) -> Result<T, ServiceError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("{} not found", label)))
}
