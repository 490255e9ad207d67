use std::sync::Arc;

use tracing::debug;

use crate::database::{DocumentStore, Filter, Repository};
use crate::models::employee::Employee;
use crate::models::mall::{Mall, MallFields};
use crate::models::store::{Store, StoreFields};

use super::{find_or_404, on_conflict, require_id, ServiceError};

/// Plain reads and writes of malls and stores that touch no relationship
pub struct CatalogService {
    malls: Repository<Mall>,
    stores: Repository<Store>,
    employees: Repository<Employee>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            malls: Repository::new(Arc::clone(&store)),
            stores: Repository::new(Arc::clone(&store)),
            employees: Repository::new(store),
        }
    }

    pub async fn list_malls(&self) -> Result<Vec<Mall>, ServiceError> {
        Ok(self.malls.find(&Filter::All).await?)
    }

    pub async fn get_mall(&self, mall_id: &str) -> Result<Mall, ServiceError> {
        find_or_404(&self.malls, require_id(mall_id, "Mall")?, "Mall").await
    }

    pub async fn create_mall(&self, fields: MallFields) -> Result<Mall, ServiceError> {
        let mall = Mall::new(fields);
        self.malls.insert(&mall).await?;

        debug!("Created mall {} ({})", mall.id, mall.name);
        Ok(mall)
    }

    pub async fn update_mall(&self, mall_id: &str, fields: MallFields) -> Result<Mall, ServiceError> {
        let mut mall = self.get_mall(mall_id).await?;
        mall.apply(fields);
        self.malls.save(&mall).await?;
        Ok(mall)
    }

    /// Stores whose `malls` list carries the mall
    pub async fn mall_stores(&self, mall_id: &str) -> Result<Vec<Store>, ServiceError> {
        let mall = self.get_mall(mall_id).await?;
        Ok(self
            .stores
            .find(&Filter::contains("malls", mall.id.to_string()))
            .await?)
    }

    /// Employees are listed through their own `mall` back-reference
    pub async fn mall_employees(&self, mall_id: &str) -> Result<Vec<Employee>, ServiceError> {
        let mall = self.get_mall(mall_id).await?;
        Ok(self
            .employees
            .find(&Filter::eq("mall", mall.id.to_string()))
            .await?)
    }

    pub async fn mall_employee(&self, mall_id: &str, employee_id: &str) -> Result<Employee, ServiceError> {
        let mall = self.get_mall(mall_id).await?;
        let employee_id = require_id(employee_id, "Employee")?;

        self.employees
            .find_one(&Filter::And(vec![
                Filter::eq("_id", employee_id.to_string()),
                Filter::eq("mall", mall.id.to_string()),
            ]))
            .await?
            .ok_or_else(|| ServiceError::NotFound("Employee not found".to_string()))
    }

    pub async fn list_stores(&self) -> Result<Vec<Store>, ServiceError> {
        Ok(self.stores.find(&Filter::All).await?)
    }

    pub async fn get_store(&self, store_id: &str) -> Result<Store, ServiceError> {
        find_or_404(&self.stores, require_id(store_id, "Store")?, "Store").await
    }

    pub async fn create_store(&self, fields: StoreFields) -> Result<Store, ServiceError> {
        if self.store_named(&fields.name).await?.is_some() {
            return Err(ServiceError::NameTaken(fields.name));
        }

        let store = Store::new(fields);
        self.stores
            .insert(&store)
            .await
            .map_err(|e| on_conflict(e, || ServiceError::NameTaken(store.name.clone())))?;

        debug!("Created store {} ({})", store.id, store.name);
        Ok(store)
    }

    pub async fn update_store(&self, store_id: &str, fields: StoreFields) -> Result<Store, ServiceError> {
        let mut store = self.get_store(store_id).await?;

        if let Some(other) = self.store_named(&fields.name).await? {
            if other.id != store.id {
                return Err(ServiceError::NameTaken(fields.name));
            }
        }

        store.apply(fields);
        self.stores
            .save(&store)
            .await
            .map_err(|e| on_conflict(e, || ServiceError::NameTaken(store.name.clone())))?;
        Ok(store)
    }

    async fn store_named(&self, name: &str) -> Result<Option<Store>, ServiceError> {
        Ok(self.stores.find_one(&Filter::eq("name", name)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::Province;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryStore::new()))
    }

    fn mall_fields(name: &str) -> MallFields {
        MallFields {
            name: name.to_string(),
            address: "Krekelstraat 35".to_string(),
            city: "Izegem".to_string(),
            province: Province::WestVlaanderen,
            postal_code: "8870".to_string(),
        }
    }

    fn store_fields(name: &str) -> StoreFields {
        StoreFields {
            name: name.to_string(),
            store_type: "Fast Food".to_string(),
        }
    }

    #[tokio::test]
    async fn malformed_and_unknown_ids_are_not_found() {
        let service = service();

        let err = service.get_mall("wrongId").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Mall id is not valid"));

        let err = service.get_mall(&uuid::Uuid::new_v4().to_string()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Mall not found"));
    }

    #[tokio::test]
    async fn update_mall_keeps_relationships() {
        let service = service();
        let mall = service.create_mall(mall_fields("FrunPark")).await.unwrap();

        let mut stored = mall.clone();
        stored.stores.push(uuid::Uuid::new_v4());
        service.malls.save(&stored).await.unwrap();

        let updated = service
            .update_mall(&mall.id.to_string(), mall_fields("FrunPark Izegem"))
            .await
            .unwrap();
        assert_eq!(updated.name, "FrunPark Izegem");
        assert_eq!(updated.stores, stored.stores);
    }

    #[tokio::test]
    async fn store_names_are_unique() {
        let service = service();
        let mcdonalds = service.create_store(store_fields("McDonalds")).await.unwrap();
        let burger_king = service.create_store(store_fields("Burger King")).await.unwrap();

        let err = service.create_store(store_fields("McDonalds")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NameTaken(_)));

        let err = service
            .update_store(&burger_king.id.to_string(), store_fields("McDonalds"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NameTaken(_)));

        // renaming to its own name is fine
        let same = service
            .update_store(&mcdonalds.id.to_string(), store_fields("McDonalds"))
            .await
            .unwrap();
        assert_eq!(same.id, mcdonalds.id);
    }

    #[tokio::test]
    async fn racing_creates_keep_one_store_per_name() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let a = CatalogService::new(Arc::clone(&store));
        let b = CatalogService::new(store);

        let (first, second) = tokio::join!(
            a.create_store(store_fields("Zara Fashion")),
            b.create_store(store_fields("Zara Fashion"))
        );

        assert!(first.is_ok() != second.is_ok());
        assert!(matches!(first.err().or(second.err()), Some(ServiceError::NameTaken(_))));
        assert_eq!(a.list_stores().await.unwrap().len(), 1);
    }
}
