use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::models::Collection;

use super::filter::Filter;
use super::manager::DatabaseError;

/// Document-oriented storage accessed by id or by filter.
///
/// Every call is a single-document write or a read; callers that touch
/// several documents sequence the calls themselves.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<Value>, DatabaseError>;

    /// Matching documents in insertion order
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>, DatabaseError>;

    /// Fails with `DuplicateId` when the id is taken
    async fn insert(&self, collection: Collection, id: Uuid, document: Value) -> Result<(), DatabaseError>;

    /// Fails with `NotFound` when there is nothing to replace
    async fn replace(&self, collection: Collection, id: Uuid, document: Value) -> Result<(), DatabaseError>;

    /// Returns the removed document, if any
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<Option<Value>, DatabaseError>;

    /// Bulk removal; returns the number of removed documents
    async fn delete_all(&self, collection: Collection, filter: &Filter) -> Result<u64, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
