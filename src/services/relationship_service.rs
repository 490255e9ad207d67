//! Bookkeeping between malls, stores and employees.
//!
//! The store backends only write one document at a time, so every operation
//! here that touches two documents orders its writes and undoes the first one
//! when the second fails. Between the two writes another request can observe
//! the one-sided state; there is no cross-document transaction.

use std::sync::Arc;

use futures::future::try_join;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::database::{DocumentStore, Filter, Repository};
use crate::models::employee::{Employee, EmployeeFields};
use crate::models::mall::Mall;
use crate::models::store::Store;

use super::{find_or_404, require_id, ServiceError};

pub struct RelationshipService {
    malls: Repository<Mall>,
    stores: Repository<Store>,
    employees: Repository<Employee>,
}

impl RelationshipService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            malls: Repository::new(Arc::clone(&store)),
            stores: Repository::new(Arc::clone(&store)),
            employees: Repository::new(store),
        }
    }

    async fn resolve_pair(&self, mall_id: &str, store_id: &str) -> Result<(Mall, Store), ServiceError> {
        let mall_id = require_id(mall_id, "Mall")?;
        let store_id = require_id(store_id, "Store")?;

        try_join(
            find_or_404(&self.malls, mall_id, "Mall"),
            find_or_404(&self.stores, store_id, "Store"),
        )
        .await
    }

    /// Link a store to a mall on both sides.
    ///
    /// The store side is written first; if the mall write fails the store is
    /// restored to its previous state before the error is returned.
    pub async fn add_store_to_mall(&self, mall_id: &str, store_id: &str) -> Result<Mall, ServiceError> {
        let (mut mall, mut store) = self.resolve_pair(mall_id, store_id).await?;

        if mall.has_store(store.id) {
            return Err(ServiceError::DuplicateAssociation(
                "Store already exists in mall".to_string(),
            ));
        }

        let previous = store.clone();
        if !store.malls.contains(&mall.id) {
            store.malls.push(mall.id);
        }
        self.stores.save(&store).await?;

        mall.stores.push(store.id);
        if let Err(err) = self.malls.save(&mall).await {
            warn!("Mall {} write failed, reverting store {}: {}", mall.id, store.id, err);
            if let Err(rollback) = self.stores.save(&previous).await {
                error!("Could not revert store {}: {}", store.id, rollback);
            }
            return Err(err.into());
        }

        debug!("Store {} added to mall {}", store.id, mall.id);
        Ok(mall)
    }

    /// Delete a store and sweep its id out of every mall carrying it
    pub async fn remove_store(&self, store_id: &str) -> Result<Store, ServiceError> {
        let id = require_id(store_id, "Store")?;
        find_or_404(&self.stores, id, "Store").await?;

        let removed = self
            .stores
            .delete(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Store not found".to_string()))?;

        let detached = self.detach_store_from_malls(id).await?;
        debug!("Store {} deleted, detached from {} mall(s)", id, detached);

        Ok(removed)
    }

    /// Batch pass over the malls whose `stores` list holds the id.
    /// Returns the number of malls rewritten.
    pub async fn detach_store_from_malls(&self, store_id: Uuid) -> Result<usize, ServiceError> {
        let carrying = self
            .malls
            .find(&Filter::contains("stores", store_id.to_string()))
            .await?;

        let count = carrying.len();
        for mut mall in carrying {
            mall.stores.retain(|id| *id != store_id);
            self.malls.save(&mall).await?;
        }

        Ok(count)
    }

    /// Delete a mall, detach it from its stores and delete its employees.
    /// Stores themselves survive.
    pub async fn remove_mall(&self, mall_id: &str) -> Result<Mall, ServiceError> {
        let id = require_id(mall_id, "Mall")?;
        find_or_404(&self.malls, id, "Mall").await?;

        let removed = self
            .malls
            .delete(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Mall not found".to_string()))?;

        let stores = self.stores.find(&Filter::contains("malls", id.to_string())).await?;
        for mut store in stores {
            store.malls.retain(|mall| *mall != id);
            self.stores.save(&store).await?;
        }

        let employees = self.employees.delete_all(&Filter::eq("mall", id.to_string())).await?;
        debug!("Mall {} deleted with {} employee(s)", id, employees);

        Ok(removed)
    }

    /// Create an employee bound to an existing mall and store.
    ///
    /// The employee is inserted first and deleted again when the mall's
    /// `employees` list cannot be updated.
    pub async fn add_employee(
        &self,
        mall_id: &str,
        store_id: &str,
        fields: EmployeeFields,
    ) -> Result<Employee, ServiceError> {
        let (mut mall, store) = self.resolve_pair(mall_id, store_id).await?;

        let employee = Employee::new(fields, store.id, mall.id);
        self.employees.insert(&employee).await?;

        mall.employees.push(employee.id);
        if let Err(err) = self.malls.save(&mall).await {
            warn!("Mall {} write failed, removing employee {}: {}", mall.id, employee.id, err);
            if let Err(rollback) = self.employees.delete(employee.id).await {
                error!("Could not remove employee {}: {}", employee.id, rollback);
            }
            return Err(err.into());
        }

        debug!("Employee {} hired at store {} in mall {}", employee.id, store.id, mall.id);
        Ok(employee)
    }

    async fn resolve_employee(&self, mall_id: &str, employee_id: &str) -> Result<(Mall, Employee), ServiceError> {
        let mall_id = require_id(mall_id, "Mall")?;
        let employee_id = require_id(employee_id, "Employee")?;

        let (mall, employee) = try_join(
            find_or_404(&self.malls, mall_id, "Mall"),
            find_or_404(&self.employees, employee_id, "Employee"),
        )
        .await?;

        if employee.mall != mall.id {
            return Err(ServiceError::NotFound("Employee not found in mall".to_string()));
        }

        Ok((mall, employee))
    }

    /// Delete an employee and unlink it from its mall; returns its state
    /// before deletion.
    ///
    /// The employee goes first and is inserted again when the mall's
    /// `employees` list cannot be updated.
    pub async fn remove_employee(&self, mall_id: &str, employee_id: &str) -> Result<Employee, ServiceError> {
        let (mut mall, employee) = self.resolve_employee(mall_id, employee_id).await?;

        self.employees.delete(employee.id).await?;

        mall.employees.retain(|id| *id != employee.id);
        if let Err(err) = self.malls.save(&mall).await {
            warn!("Mall {} write failed, restoring employee {}: {}", mall.id, employee.id, err);
            if let Err(rollback) = self.employees.insert(&employee).await {
                error!("Could not restore employee {}: {}", employee.id, rollback);
            }
            return Err(err.into());
        }

        debug!("Employee {} removed from mall {}", employee.id, mall.id);
        Ok(employee)
    }

    /// Full-field replacement; `store` and `mall` stay as they were
    pub async fn update_employee(
        &self,
        mall_id: &str,
        employee_id: &str,
        fields: EmployeeFields,
    ) -> Result<Employee, ServiceError> {
        let (_, mut employee) = self.resolve_employee(mall_id, employee_id).await?;

        employee.apply(fields);
        self.employees.save(&employee).await?;
        Ok(employee)
    }
}
