//! Request body validation.
//!
//! Each `validate_*` function takes the raw JSON body and either returns the
//! normalized fields for the entity or the first failing field. Nothing here
//! touches storage.

pub mod rules;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::employee::EmployeeFields;
use crate::models::mall::MallFields;
use crate::models::store::StoreFields;
use crate::models::{EmployeeType, Province};

use rules::{check, choice, date, number, FieldRule};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub field: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: field.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

const USER_RULES: &[FieldRule] = &[
    FieldRule::text("name", 5, Some(50)),
    FieldRule::email("email", 5, 255),
    FieldRule::text("password", 5, Some(255)),
];

const CREDENTIAL_RULES: &[FieldRule] = &[
    FieldRule::email("email", 5, 255),
    FieldRule::text("password", 5, Some(255)),
];

const MALL_RULES: &[FieldRule] = &[
    FieldRule::text("name", 2, Some(100)),
    FieldRule::text("address", 10, None),
    FieldRule::text("city", 3, None),
    FieldRule::one_of("province", &Province::NAMES),
    FieldRule::text("postalCode", 4, Some(4)),
];

const STORE_RULES: &[FieldRule] = &[
    FieldRule::text("name", 5, Some(75)),
    FieldRule::text("type", 5, None),
];

const EMPLOYEE_RULES: &[FieldRule] = &[
    FieldRule::text("firstName", 5, Some(75)),
    FieldRule::text("lastName", 5, Some(50)),
    FieldRule::one_of("type", &EmployeeType::NAMES),
    FieldRule::number("salary"),
    FieldRule::date("hireDate"),
];

fn text(bag: &Map<String, Value>, field: &str) -> String {
    bag.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub fn validate_registration(body: &Value) -> Result<Registration, ValidationError> {
    let bag = check(body, USER_RULES)?;
    Ok(Registration {
        name: text(bag, "name"),
        email: text(bag, "email"),
        password: text(bag, "password"),
    })
}

pub fn validate_credentials(body: &Value) -> Result<Credentials, ValidationError> {
    let bag = check(body, CREDENTIAL_RULES)?;
    Ok(Credentials {
        email: text(bag, "email"),
        password: text(bag, "password"),
    })
}

pub fn validate_mall(body: &Value) -> Result<MallFields, ValidationError> {
    let bag = check(body, MALL_RULES)?;
    Ok(MallFields {
        name: text(bag, "name"),
        address: text(bag, "address"),
        city: text(bag, "city"),
        province: choice(bag, "province", &Province::NAMES, Province::from_name)?,
        postal_code: text(bag, "postalCode"),
    })
}

pub fn validate_store(body: &Value) -> Result<StoreFields, ValidationError> {
    let bag = check(body, STORE_RULES)?;
    Ok(StoreFields {
        name: text(bag, "name"),
        store_type: text(bag, "type"),
    })
}

pub fn validate_employee(body: &Value) -> Result<EmployeeFields, ValidationError> {
    let bag = check(body, EMPLOYEE_RULES)?;
    Ok(EmployeeFields {
        first_name: text(bag, "firstName"),
        last_name: text(bag, "lastName"),
        employee_type: choice(bag, "type", &EmployeeType::NAMES, EmployeeType::from_name)?,
        salary: number(bag, "salary")?,
        hire_date: date(bag, "hireDate")?,
    })
}
