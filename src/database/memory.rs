use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Collection;

use super::filter::Filter;
use super::manager::DatabaseError;
use super::store::DocumentStore;

#[derive(Debug, Default)]
struct Table {
    next_seq: u64,
    rows: HashMap<Uuid, Row>,
}

impl Table {
    /// Unique key of `document` already held by another row
    fn taken_key(&self, collection: Collection, id: Uuid, document: &Value) -> Option<&'static str> {
        let field = collection.unique_field()?;
        let value = document.get(field)?;
        self.rows
            .iter()
            .any(|(other, row)| *other != id && row.document.get(field) == Some(value))
            .then_some(field)
    }
}

#[derive(Debug)]
struct Row {
    seq: u64,
    document: Value,
}

/// In-process document store for development and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Collection, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<Value>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&collection)
            .and_then(|table| table.rows.get(&id))
            .map(|row| row.document.clone()))
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>, DatabaseError> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<&Row> = table
            .rows
            .values()
            .filter(|row| filter.matches(&row.document))
            .collect();
        rows.sort_by_key(|row| row.seq);

        Ok(rows.into_iter().map(|row| row.document.clone()).collect())
    }

    async fn insert(&self, collection: Collection, id: Uuid, document: Value) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(collection).or_default();

        if table.rows.contains_key(&id) {
            return Err(DatabaseError::DuplicateId { collection, id });
        }
        if let Some(field) = table.taken_key(collection, id, &document) {
            return Err(DatabaseError::Conflict { collection, field });
        }

        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.insert(id, Row { seq, document });
        Ok(())
    }

    async fn replace(&self, collection: Collection, id: Uuid, document: Value) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(&collection)
            .filter(|table| table.rows.contains_key(&id))
            .ok_or(DatabaseError::NotFound { collection, id })?;

        if let Some(field) = table.taken_key(collection, id, &document) {
            return Err(DatabaseError::Conflict { collection, field });
        }
        if let Some(row) = table.rows.get_mut(&id) {
            row.document = document;
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<Option<Value>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .get_mut(&collection)
            .and_then(|table| table.rows.remove(&id))
            .map(|row| row.document))
    }

    async fn delete_all(&self, collection: Collection, filter: &Filter) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(table) = tables.get_mut(&collection) else {
            return Ok(0);
        };

        let before = table.rows.len();
        table.rows.retain(|_, row| !filter.matches(&row.document));
        Ok((before - table.rows.len()) as u64)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
