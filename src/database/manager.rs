use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::models::Collection;

use super::memory::MemoryStore;
use super::postgres::PostgresStore;
use super::store::DocumentStore;

/// Errors from the document store backends
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid filter field: {0}")]
    InvalidField(String),

    #[error("Document {id} already exists in {collection}")]
    DuplicateId { collection: Collection, id: Uuid },

    #[error("A document in {collection} already has this {field}")]
    Conflict {
        collection: Collection,
        field: &'static str,
    },

    #[error("Document {id} not found in {collection}")]
    NotFound { collection: Collection, id: Uuid },

    #[error("Malformed document in {collection}: {source}")]
    Malformed {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Open the configured store: Postgres when a URL is set, memory otherwise
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, DatabaseError> {
    match config.url.as_deref() {
        Some(url) => Ok(Arc::new(connect_postgres(url, config).await?)),
        None => {
            warn!("DATABASE_URL not set, using the in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Connect to Postgres and make sure the collection tables exist
pub async fn connect_postgres(url: &str, config: &DatabaseConfig) -> Result<PostgresStore, DatabaseError> {
    let redacted = redacted_url(url)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect(url)
        .await?;

    let store = PostgresStore::new(pool);
    store.ensure_schema().await?;

    info!("Connected to document store at {}", redacted);
    Ok(store)
}

/// Connection string with the password stripped, for logging
fn redacted_url(url: &str) -> Result<String, DatabaseError> {
    let mut parsed = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
    if parsed.password().is_some() {
        parsed
            .set_password(Some("****"))
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
    }
    Ok(parsed.into())
}
