use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Document};

/// Store document. `malls` mirrors the `stores` list of every mall carrying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub store_type: String,
    #[serde(default)]
    pub malls: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreFields {
    pub name: String,
    pub store_type: String,
}

impl Store {
    pub fn new(fields: StoreFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            store_type: fields.store_type,
            malls: Vec::new(),
        }
    }

    pub fn apply(&mut self, fields: StoreFields) {
        self.name = fields.name;
        self.store_type = fields.store_type;
    }
}

impl Document for Store {
    const COLLECTION: Collection = Collection::Stores;

    fn id(&self) -> Uuid {
        self.id
    }
}
