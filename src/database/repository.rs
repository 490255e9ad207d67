use std::sync::Arc;

use uuid::Uuid;

use crate::models::Document;

use super::filter::Filter;
use super::manager::DatabaseError;
use super::store::DocumentStore;

/// Typed view over one collection of a `DocumentStore`
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Document> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.store))
    }
}

impl<T: Document> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _phantom: std::marker::PhantomData,
        }
    }

    fn decode(value: serde_json::Value) -> Result<T, DatabaseError> {
        serde_json::from_value(value).map_err(|source| DatabaseError::Malformed {
            collection: T::COLLECTION,
            source,
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, DatabaseError> {
        self.store
            .find_by_id(T::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn find(&self, filter: &Filter) -> Result<Vec<T>, DatabaseError> {
        self.store
            .find(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<T>, DatabaseError> {
        Ok(self.find(filter).await?.into_iter().next())
    }

    pub async fn insert(&self, record: &T) -> Result<(), DatabaseError> {
        let document = serde_json::to_value(record)?;
        self.store.insert(T::COLLECTION, record.id(), document).await
    }

    pub async fn save(&self, record: &T) -> Result<(), DatabaseError> {
        let document = serde_json::to_value(record)?;
        self.store.replace(T::COLLECTION, record.id(), document).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<T>, DatabaseError> {
        self.store
            .delete(T::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn delete_all(&self, filter: &Filter) -> Result<u64, DatabaseError> {
        self.store.delete_all(T::COLLECTION, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::store::{Store, StoreFields};
    use serde_json::json;

    fn repo() -> (Arc<dyn DocumentStore>, Repository<Store>) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        (Arc::clone(&store), Repository::new(store))
    }

    #[tokio::test]
    async fn typed_round_trip_through_store() {
        let (_, stores) = repo();
        let mut zara = Store::new(StoreFields {
            name: "Zara Fashion".to_string(),
            store_type: "Clothing".to_string(),
        });
        stores.insert(&zara).await.unwrap();

        zara.malls.push(Uuid::new_v4());
        stores.save(&zara).await.unwrap();

        assert_eq!(stores.find_by_id(zara.id).await.unwrap(), Some(zara.clone()));
        assert_eq!(
            stores.find_one(&Filter::eq("name", "Zara Fashion")).await.unwrap(),
            Some(zara.clone())
        );
        assert_eq!(stores.delete(zara.id).await.unwrap(), Some(zara));
    }

    #[tokio::test]
    async fn malformed_documents_surface_as_errors() {
        let (raw, stores) = repo();
        let id = Uuid::new_v4();
        raw.insert(crate::models::Collection::Stores, id, json!({ "_id": id }))
            .await
            .unwrap();

        let err = stores.find_by_id(id).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Malformed { .. }));
    }
}
