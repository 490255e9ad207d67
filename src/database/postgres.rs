use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, PgPool, Postgres, QueryBuilder, Row};
use tracing::debug;
use uuid::Uuid;

use crate::models::Collection;

use super::filter::Filter;
use super::manager::DatabaseError;
use super::store::DocumentStore;

/// Document store over one JSONB table per collection
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for collection in Collection::ALL {
            let ddl = format!(
                "CREATE TABLE IF NOT EXISTS \"{}\" (
                    id UUID PRIMARY KEY,
                    seq BIGSERIAL NOT NULL,
                    document JSONB NOT NULL
                )",
                collection.table_name()
            );
            sqlx::query(&ddl).execute(&self.pool).await?;

            if let Some(field) = collection.unique_field() {
                let ddl = format!(
                    "CREATE UNIQUE INDEX IF NOT EXISTS \"{}\" ON \"{}\" ((document ->> '{}'))",
                    unique_index_name(collection, field),
                    collection.table_name(),
                    field
                );
                sqlx::query(&ddl).execute(&self.pool).await?;
            }
        }
        Ok(())
    }
}

fn unique_index_name(collection: Collection, field: &str) -> String {
    format!("{}_{}_key", collection.table_name(), field)
}

/// Translate unique violations on the id or the collection's unique key
fn write_error(err: sqlx::Error, collection: Collection, id: Uuid) -> DatabaseError {
    let constraint = match err.as_database_error() {
        Some(db) if db.code().as_deref() == Some("23505") => db.constraint().unwrap_or_default().to_owned(),
        _ => return DatabaseError::Sqlx(err),
    };

    match collection.unique_field() {
        Some(field) if constraint == unique_index_name(collection, field) => {
            DatabaseError::Conflict { collection, field }
        }
        _ => DatabaseError::DuplicateId { collection, id },
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<Value>, DatabaseError> {
        let sql = format!("SELECT document FROM \"{}\" WHERE id = $1", collection.table_name());
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.map(|r| r.get::<Json<Value>, _>("document").0))
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT document FROM \"{}\" WHERE ",
            collection.table_name()
        ));
        filter.push_sql(&mut builder)?;
        builder.push(" ORDER BY seq");

        debug!("find {}: {}", collection, builder.sql());
        let rows = builder.build().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|r| r.get::<Json<Value>, _>("document").0)
            .collect())
    }

    async fn insert(&self, collection: Collection, id: Uuid, document: Value) -> Result<(), DatabaseError> {
        let sql = format!(
            "INSERT INTO \"{}\" (id, document) VALUES ($1, $2)",
            collection.table_name()
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, collection, id))?;
        Ok(())
    }

    async fn replace(&self, collection: Collection, id: Uuid, document: Value) -> Result<(), DatabaseError> {
        let sql = format!(
            "UPDATE \"{}\" SET document = $2 WHERE id = $1",
            collection.table_name()
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, collection, id))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound { collection, id });
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<Option<Value>, DatabaseError> {
        let sql = format!(
            "DELETE FROM \"{}\" WHERE id = $1 RETURNING document",
            collection.table_name()
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.map(|r| r.get::<Json<Value>, _>("document").0))
    }

    async fn delete_all(&self, collection: Collection, filter: &Filter) -> Result<u64, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "DELETE FROM \"{}\" WHERE ",
            collection.table_name()
        ));
        filter.push_sql(&mut builder)?;

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
