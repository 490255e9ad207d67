use serde_json::Value;
use sqlx::{types::Json, Postgres, QueryBuilder};

use super::manager::DatabaseError;

/// Document predicate understood by every store backend
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document
    All,
    /// Top-level field equals the value
    Eq(&'static str, Value),
    /// Top-level array field contains the value
    Contains(&'static str, Value),
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Filter::Eq(field, value.into())
    }

    pub fn contains(field: &'static str, value: impl Into<Value>) -> Self {
        Filter::Contains(field, value.into())
    }

    /// Evaluate against an in-memory document
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, value) => document.get(field) == Some(value),
            Filter::Contains(field, value) => document
                .get(field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.contains(value)),
            Filter::And(filters) => filters.iter().all(|f| f.matches(document)),
        }
    }

    /// Append the SQL predicate over the `document` JSONB column
    pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) -> Result<(), DatabaseError> {
        match self {
            Filter::All => {
                builder.push("TRUE");
            }
            Filter::Eq(field, value) => {
                builder.push(format!("document -> {} = ", quote_field(field)?));
                builder.push_bind(Json(value.clone()));
            }
            Filter::Contains(field, value) => {
                builder.push(format!("document -> {} @> ", quote_field(field)?));
                builder.push_bind(Json(Value::Array(vec![value.clone()])));
            }
            Filter::And(filters) if filters.is_empty() => {
                builder.push("TRUE");
            }
            Filter::And(filters) => {
                builder.push("(");
                for (i, filter) in filters.iter().enumerate() {
                    if i > 0 {
                        builder.push(" AND ");
                    }
                    filter.push_sql(builder)?;
                }
                builder.push(")");
            }
        }
        Ok(())
    }
}

/// Field names become SQL string literals, so only plain identifiers pass.
fn quote_field(field: &str) -> Result<String, DatabaseError> {
    let valid = !field.is_empty()
        && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(DatabaseError::InvalidField(field.to_string()));
    }
    Ok(format!("'{}'", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_equality_and_membership() {
        let doc = json!({ "mall": "m1", "malls": ["m1", "m2"], "name": "Zara" });

        assert!(Filter::All.matches(&doc));
        assert!(Filter::eq("mall", "m1").matches(&doc));
        assert!(!Filter::eq("mall", "m2").matches(&doc));
        assert!(Filter::contains("malls", "m2").matches(&doc));
        assert!(!Filter::contains("malls", "m3").matches(&doc));
        // membership on a non-array field never matches
        assert!(!Filter::contains("name", "Zara").matches(&doc));
        assert!(Filter::And(vec![Filter::eq("name", "Zara"), Filter::contains("malls", "m1")]).matches(&doc));
        assert!(!Filter::And(vec![Filter::eq("name", "Zara"), Filter::eq("mall", "m9")]).matches(&doc));
    }

    #[test]
    fn renders_sql_with_bound_values() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT document FROM malls WHERE ");
        Filter::And(vec![Filter::eq("city", "Izegem"), Filter::contains("stores", "s1")])
            .push_sql(&mut builder)
            .unwrap();
        assert_eq!(
            builder.sql(),
            "SELECT document FROM malls WHERE (document -> 'city' = $1 AND document -> 'stores' @> $2)"
        );
    }

    #[test]
    fn rejects_unsafe_field_names() {
        let mut builder = QueryBuilder::<Postgres>::new("");
        let err = Filter::eq("name'; DROP TABLE users; --", "x").push_sql(&mut builder);
        assert!(matches!(err, Err(DatabaseError::InvalidField(_))));
    }
}
