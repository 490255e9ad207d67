use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Document};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// bcrypt hash, never the plain password
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// User as returned to clients, without the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl User {
    /// `{_id, name, email}` as returned by registration and login
    pub fn summary(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            is_admin: None,
        }
    }

    /// Everything except the password, as returned by `/api/users/me`
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            is_admin: Some(self.is_admin),
            ..self.summary()
        }
    }
}

impl Document for User {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> Uuid {
        self.id
    }
}
