//! Strict validity and hydration coercion per property kind.
//!
//! Validity decides whether a value is accepted. Coercion only runs on
//! accepted values (and defaults) to produce the hydration-ready form; it
//! never decides validity.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Number, Value};

use super::{Property, PropertyKind};
use crate::constraint::{literal, type_name};

/// A value that cannot be brought into the hydration form of its kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoerceError {
    #[error("{given} is not an ISO-8601 date-time")]
    InvalidDateTime { given: String },
}

/// Parses RFC 3339 text, a naive `YYYY-MM-DDTHH:MM:SS[.f]` timestamp (read
/// as UTC) or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

impl Property {
    /// Strict validity check.
    ///
    /// `null` is accepted only for nullable and mixed properties.
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_null() {
            return self.nullable || matches!(self.kind, PropertyKind::Mixed);
        }
        match &self.kind {
            PropertyKind::String => value.is_string(),
            PropertyKind::Integer => value.is_i64() || value.is_u64(),
            PropertyKind::Float => value.is_number(),
            PropertyKind::Boolean => value.is_boolean(),
            PropertyKind::Array { .. }
            | PropertyKind::Object { .. }
            | PropertyKind::Class(_)
            | PropertyKind::Interface(_) => value.is_array() || value.is_object(),
            PropertyKind::Mixed => true,
            PropertyKind::DateTime => value.as_str().and_then(parse_datetime).is_some(),
        }
    }

    /// Converts a value into the hydration form of this property's kind.
    ///
    /// Total for every kind but `DateTime`, which fails on text that does
    /// not parse.
    pub fn coerce(&self, value: Value) -> Result<Value, CoerceError> {
        let coerced = match &self.kind {
            PropertyKind::String => Value::String(to_string(value)),
            PropertyKind::Integer => to_integer(&value),
            PropertyKind::Float => float_value(to_float(&value)),
            PropertyKind::Boolean => Value::Bool(to_bool(&value)),
            PropertyKind::Array { .. } => match value {
                Value::Array(_) | Value::Object(_) => value,
                _ => Value::Array(Vec::new()),
            },
            PropertyKind::Object { .. } => match value {
                Value::Object(_) => value,
                Value::Array(items) => Value::Object(keyed(items)),
                _ => Value::Object(Map::new()),
            },
            PropertyKind::Mixed | PropertyKind::Class(_) | PropertyKind::Interface(_) => value,
            PropertyKind::DateTime => {
                let parsed = value.as_str().and_then(parse_datetime);
                match parsed {
                    Some(instant) => {
                        Value::String(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
                    }
                    None => {
                        let given = if value.is_string() {
                            literal(&value)
                        } else {
                            type_name(&value).to_string()
                        };
                        return Err(CoerceError::InvalidDateTime { given });
                    }
                }
            }
        };
        Ok(coerced)
    }
}

/// Turns a sequential array into an object keyed `"0"`, `"1"`, ...
pub(crate) fn keyed(items: Vec<Value>) -> Map<String, Value> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| (i.to_string(), item))
        .collect()
}

fn to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn to_integer(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Value::Number(n.clone()),
        Value::Number(n) => json!(truncate(n.as_f64().unwrap_or(0.0))),
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(n) => json!(n),
                Err(_) => json!(truncate(s.parse::<f64>().unwrap_or(0.0))),
            }
        }
        Value::Bool(b) => json!(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => json!(0),
    }
}

fn truncate(value: f64) -> i64 {
    if value.is_finite() {
        // Saturates at the i64 bounds.
        value.trunc() as i64
    } else {
        0
    }
}

fn to_float(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if number.is_finite() {
        number
    } else {
        0.0
    }
}

fn float_value(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or_else(|| json!(0.0))
}

fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => s.trim() == "1",
        _ => false,
    }
}
