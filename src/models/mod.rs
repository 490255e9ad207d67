pub mod employee;
pub mod mall;
pub mod store;
pub mod user;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

pub use employee::{Employee, EmployeeType};
pub use mall::{Mall, Province};
pub use store::Store;
pub use user::{User, UserProfile};

/// The four document collections managed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Malls,
    Stores,
    Employees,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Malls,
        Collection::Stores,
        Collection::Employees,
        Collection::Users,
    ];

    /// Table name in the Postgres backend
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Malls => "malls",
            Collection::Stores => "stores",
            Collection::Employees => "employees",
            Collection::Users => "users",
        }
    }

    /// Top-level field that no two documents of the collection may share
    pub fn unique_field(&self) -> Option<&'static str> {
        match self {
            Collection::Stores => Some("name"),
            Collection::Users => Some("email"),
            Collection::Malls | Collection::Employees => None,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.table_name() == name)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A record stored as a JSON document under its `_id`
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> Uuid;
}

/// Parse a path identifier. Malformed ids resolve to nothing.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(Collection::parse(collection.table_name()), Some(collection));
        }
        assert_eq!(Collection::parse("tenants"), None);
    }

    #[test]
    fn only_users_and_stores_carry_a_unique_key() {
        assert_eq!(Collection::Users.unique_field(), Some("email"));
        assert_eq!(Collection::Stores.unique_field(), Some("name"));
        assert_eq!(Collection::Malls.unique_field(), None);
        assert_eq!(Collection::Employees.unique_field(), None);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id("wrongId").is_none());
        assert!(parse_id("").is_none());
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()), Some(id));
    }
}
