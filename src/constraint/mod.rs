//! Value-level validation rules.
//!
//! A [`Constraint`] tests a single JSON value and, when the value is
//! rejected, explains why in one deterministic sentence. Rules are strictly
//! typed: a number rule rejects every non-number and a string rule rejects
//! every non-string, without coercion. An explanation starts with the path
//! and ends with the rejected value, or with its type name when the type is
//! wrong (`array given`).
//!
//! # Example
//!
//! ```rust
//! use transposer::constraint::{Constraint, NumberGreaterThanOrEqual};
//! use transposer::JsonPath;
//! use serde_json::json;
//!
//! let rule = NumberGreaterThanOrEqual::new(10);
//! assert!(rule.matches(&json!(10.0)));
//! assert!(!rule.matches(&json!("12")));
//!
//! let path = JsonPath::root().with_object_key("limit");
//! assert_eq!(
//!     rule.explain(&path, &json!(7)),
//!     "$.limit must be a number greater than or equal to 10 but 7 given"
//! );
//! ```

mod numeric;
mod string;

use std::fmt::Debug;

use serde_json::Value;

use crate::path::JsonPath;

pub use numeric::{
    NumberGreaterThan, NumberGreaterThanOrEqual, NumberInList, NumberLessThan,
    NumberLessThanOrEqual, Numeric,
};
pub use string::{StringInList, StringIsEmail, StringIsUuid, StringMatchesRegex};

/// A value-level rule with a deterministic mismatch explanation.
///
/// Implementations must never panic on values of the wrong type; such
/// values simply do not match.
pub trait Constraint: Send + Sync + Debug {
    /// Returns true if `value` satisfies the rule.
    fn matches(&self, value: &Value) -> bool;

    /// Explains why `value` at `path` does not satisfy the rule.
    fn explain(&self, path: &JsonPath, value: &Value) -> String;

    /// Machine-readable code attached to the resulting validation error.
    fn code(&self) -> &'static str {
        "constraint"
    }
}

/// Errors raised while building a constraint.
#[derive(Debug, thiserror::Error)]
pub enum ConstraintError {
    /// An in-list rule was built without any values.
    #[error("in-list constraint requires at least one value")]
    EmptyList,

    /// A pattern failed to compile.
    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Returns the type name used in explanations (`int`, `float`, `string`,
/// `bool`, `array`, `object`, `null`).
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders a scalar as it appears in explanations: strings quoted with
/// single quotes, numbers, booleans and null verbatim, containers by type.
pub fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => type_name(value).to_string(),
    }
}
