use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Document};

/// The ten Belgian provinces a mall can be located in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Province {
    #[serde(rename = "West-Vlaanderen")]
    WestVlaanderen,
    #[serde(rename = "Oost-Vlaanderen")]
    OostVlaanderen,
    #[serde(rename = "Antwerpen")]
    Antwerpen,
    #[serde(rename = "Limburg")]
    Limburg,
    #[serde(rename = "Vlaams-Brabant")]
    VlaamsBrabant,
    #[serde(rename = "Waals-Brabant")]
    WaalsBrabant,
    #[serde(rename = "Luik")]
    Luik,
    #[serde(rename = "Namen")]
    Namen,
    #[serde(rename = "Henegouwen")]
    Henegouwen,
    #[serde(rename = "Luxemburg")]
    Luxemburg,
}

impl Province {
    pub const ALL: [Province; 10] = [
        Province::WestVlaanderen,
        Province::OostVlaanderen,
        Province::Antwerpen,
        Province::Limburg,
        Province::VlaamsBrabant,
        Province::WaalsBrabant,
        Province::Luik,
        Province::Namen,
        Province::Henegouwen,
        Province::Luxemburg,
    ];

    pub const NAMES: [&'static str; 10] = [
        "West-Vlaanderen",
        "Oost-Vlaanderen",
        "Antwerpen",
        "Limburg",
        "Vlaams-Brabant",
        "Waals-Brabant",
        "Luik",
        "Namen",
        "Henegouwen",
        "Luxemburg",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Province::WestVlaanderen => "West-Vlaanderen",
            Province::OostVlaanderen => "Oost-Vlaanderen",
            Province::Antwerpen => "Antwerpen",
            Province::Limburg => "Limburg",
            Province::VlaamsBrabant => "Vlaams-Brabant",
            Province::WaalsBrabant => "Waals-Brabant",
            Province::Luik => "Luik",
            Province::Namen => "Namen",
            Province::Henegouwen => "Henegouwen",
            Province::Luxemburg => "Luxemburg",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

/// Mall document. `stores` mirrors every store's `malls` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mall {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub province: Province,
    pub postal_code: String,
    #[serde(default)]
    pub stores: Vec<Uuid>,
    #[serde(default)]
    pub employees: Vec<Uuid>,
}

/// Replaceable fields of a mall, as produced by validation
#[derive(Debug, Clone, PartialEq)]
pub struct MallFields {
    pub name: String,
    pub address: String,
    pub city: String,
    pub province: Province,
    pub postal_code: String,
}

impl Mall {
    pub fn new(fields: MallFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            address: fields.address,
            city: fields.city,
            province: fields.province,
            postal_code: fields.postal_code,
            stores: Vec::new(),
            employees: Vec::new(),
        }
    }

    /// Full-field replacement; relationship lists are untouched.
    pub fn apply(&mut self, fields: MallFields) {
        self.name = fields.name;
        self.address = fields.address;
        self.city = fields.city;
        self.province = fields.province;
        self.postal_code = fields.postal_code;
    }

    pub fn has_store(&self, store_id: Uuid) -> bool {
        self.stores.contains(&store_id)
    }
}

impl Document for Mall {
    const COLLECTION: Collection = Collection::Malls;

    fn id(&self) -> Uuid {
        self.id
    }
}
