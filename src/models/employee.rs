use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeType {
    Manager,
    Employee,
    Intern,
}

impl EmployeeType {
    pub const NAMES: [&'static str; 3] = ["Manager", "Employee", "Intern"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Manager" => Some(EmployeeType::Manager),
            "Employee" => Some(EmployeeType::Employee),
            "Intern" => Some(EmployeeType::Intern),
            _ => None,
        }
    }
}

/// Employee document, owned by exactly one store and one mall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "type")]
    pub employee_type: EmployeeType,
    pub salary: f64,
    pub hire_date: DateTime<Utc>,
    pub store: Uuid,
    pub mall: Uuid,
}

/// Personal fields of an employee; ownership is never part of it
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub employee_type: EmployeeType,
    pub salary: f64,
    pub hire_date: DateTime<Utc>,
}

impl Employee {
    pub fn new(fields: EmployeeFields, store: Uuid, mall: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            employee_type: fields.employee_type,
            salary: fields.salary,
            hire_date: fields.hire_date,
            store,
            mall,
        }
    }

    /// Full-field replacement that keeps `store` and `mall`.
    pub fn apply(&mut self, fields: EmployeeFields) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.employee_type = fields.employee_type;
        self.salary = fields.salary;
        self.hire_date = fields.hire_date;
    }
}

impl Document for Employee {
    const COLLECTION: Collection = Collection::Employees;

    fn id(&self) -> Uuid {
        self.id
    }
}
