use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{Map, Value};

use super::ValidationError;

/// Shape of one body field
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text { min: usize, max: Option<usize> },
    Email { min: usize, max: usize },
    OneOf(&'static [&'static str]),
    Number,
    Date,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn text(name: &'static str, min: usize, max: Option<usize>) -> Self {
        Self { name, kind: FieldKind::Text { min, max } }
    }

    pub const fn email(name: &'static str, min: usize, max: usize) -> Self {
        Self { name, kind: FieldKind::Email { min, max } }
    }

    pub const fn one_of(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self { name, kind: FieldKind::OneOf(allowed) }
    }

    pub const fn number(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Number }
    }

    pub const fn date(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Date }
    }
}

/// Checks the bag against the rules in order, then rejects unknown keys.
/// Every rule is a required field.
pub fn check<'a>(body: &'a Value, rules: &[FieldRule]) -> Result<&'a Map<String, Value>, ValidationError> {
    let bag = body
        .as_object()
        .ok_or_else(|| ValidationError::new("value", "\"value\" must be of type object"))?;

    for rule in rules {
        let value = match bag.get(rule.name) {
            None | Some(Value::Null) => {
                return Err(ValidationError::new(rule.name, format!("\"{}\" is required", rule.name)))
            }
            Some(v) => v,
        };
        check_field(rule, value)?;
    }

    if let Some(unknown) = bag.keys().find(|key| !rules.iter().any(|r| r.name == key.as_str())) {
        return Err(ValidationError::new(
            unknown.clone(),
            format!("\"{}\" is not allowed", unknown),
        ));
    }

    Ok(bag)
}

fn check_field(rule: &FieldRule, value: &Value) -> Result<(), ValidationError> {
    let name = rule.name;
    match rule.kind {
        FieldKind::Text { min, max } => {
            let text = expect_string(name, value)?;
            check_length(name, text, min, max)
        }
        FieldKind::Email { min, max } => {
            let text = expect_string(name, value)?;
            check_length(name, text, min, Some(max))?;
            if !is_valid_email(text) {
                return Err(ValidationError::new(name, format!("\"{}\" must be a valid email", name)));
            }
            Ok(())
        }
        FieldKind::OneOf(allowed) => {
            let text = expect_string(name, value)?;
            if !allowed.contains(&text) {
                return Err(not_one_of(name, allowed));
            }
            Ok(())
        }
        FieldKind::Number => parse_number(value).map(|_| ()).ok_or_else(|| not_a_number(name)),
        FieldKind::Date => parse_date(value).map(|_| ()).ok_or_else(|| not_a_date(name)),
    }
}

fn not_one_of(name: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::new(name, format!("\"{}\" must be one of [{}]", name, allowed.join(", ")))
}

fn not_a_number(name: &str) -> ValidationError {
    ValidationError::new(name, format!("\"{}\" must be a number", name))
}

fn not_a_date(name: &str) -> ValidationError {
    ValidationError::new(name, format!("\"{}\" must be a valid date", name))
}

/// Typed read of a `one_of` field from a checked bag
pub fn choice<T>(
    bag: &Map<String, Value>,
    name: &str,
    allowed: &[&str],
    from_name: impl Fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    bag.get(name)
        .and_then(Value::as_str)
        .and_then(from_name)
        .ok_or_else(|| not_one_of(name, allowed))
}

/// Typed read of a `number` field from a checked bag
pub fn number(bag: &Map<String, Value>, name: &str) -> Result<f64, ValidationError> {
    bag.get(name).and_then(parse_number).ok_or_else(|| not_a_number(name))
}

/// Typed read of a `date` field from a checked bag
pub fn date(bag: &Map<String, Value>, name: &str) -> Result<DateTime<Utc>, ValidationError> {
    bag.get(name).and_then(parse_date).ok_or_else(|| not_a_date(name))
}

fn expect_string<'a>(name: &str, value: &'a Value) -> Result<&'a str, ValidationError> {
    let text = value
        .as_str()
        .ok_or_else(|| ValidationError::new(name, format!("\"{}\" must be a string", name)))?;
    if text.is_empty() {
        return Err(ValidationError::new(name, format!("\"{}\" is not allowed to be empty", name)));
    }
    Ok(text)
}

fn check_length(name: &str, text: &str, min: usize, max: Option<usize>) -> Result<(), ValidationError> {
    let len = text.chars().count();
    if len < min {
        return Err(ValidationError::new(
            name,
            format!("\"{}\" length must be at least {} characters long", name, min),
        ));
    }
    if let Some(max) = max {
        if len > max {
            return Err(ValidationError::new(
                name,
                format!("\"{}\" length must be less than or equal to {} characters long", name, max),
            ));
        }
    }
    Ok(())
}

/// One `@`, a non-empty local part, and a dotted domain without blanks
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// JSON numbers and numeric strings; never NaN or infinite
pub fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// RFC 3339 timestamps, `YYYY-MM-DD` dates, or epoch milliseconds
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}
