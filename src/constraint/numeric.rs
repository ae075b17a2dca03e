//! Numeric rules.

use std::cmp::Ordering;
use std::fmt::{self, Display};

use serde_json::{Number, Value};

use super::{literal, type_name, Constraint, ConstraintError};
use crate::path::JsonPath;

/// A rule operand: an integer or a float.
///
/// Comparisons against JSON numbers are exact between integers and go
/// through `f64` otherwise, so `10` and `10.0` are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    fn compare(self, number: &Number) -> Option<Ordering> {
        match self {
            Numeric::Int(limit) => {
                if let Some(n) = number.as_i64() {
                    Some(n.cmp(&limit))
                } else if number.is_u64() {
                    // Only u64 values above i64::MAX reach this branch.
                    Some(Ordering::Greater)
                } else {
                    number.as_f64()?.partial_cmp(&(limit as f64))
                }
            }
            Numeric::Float(limit) => number.as_f64()?.partial_cmp(&limit),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Int(value)
    }
}

impl From<i32> for Numeric {
    fn from(value: i32) -> Self {
        Numeric::Int(value.into())
    }
}

impl From<u32> for Numeric {
    fn from(value: u32) -> Self {
        Numeric::Int(value.into())
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Float(value)
    }
}

impl Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(n) => write!(f, "{}", n),
            Numeric::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{:.1}", n),
            Numeric::Float(n) => write!(f, "{}", n),
        }
    }
}

fn compare(value: &Value, limit: Numeric) -> Option<Ordering> {
    match value {
        Value::Number(number) => limit.compare(number),
        _ => None,
    }
}

fn given(value: &Value) -> String {
    if value.is_number() {
        literal(value)
    } else {
        type_name(value).to_string()
    }
}

/// The value must be a number equal to one of a fixed set.
#[derive(Debug, Clone)]
pub struct NumberInList {
    values: Vec<Numeric>,
}

impl NumberInList {
    /// Builds the rule; an empty set is rejected.
    ///
    /// ```rust
    /// use transposer::constraint::{Constraint, NumberInList};
    /// use serde_json::json;
    ///
    /// let rule = NumberInList::new([10, 20]).unwrap();
    /// assert!(rule.matches(&json!(10)));
    /// assert!(rule.matches(&json!(10.0)));
    /// assert!(!rule.matches(&json!("10")));
    /// ```
    pub fn new<I, N>(values: I) -> Result<Self, ConstraintError>
    where
        I: IntoIterator<Item = N>,
        N: Into<Numeric>,
    {
        let values: Vec<Numeric> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(ConstraintError::EmptyList);
        }
        Ok(Self { values })
    }

    /// Returns the accepted values.
    pub fn values(&self) -> &[Numeric] {
        &self.values
    }
}

impl Constraint for NumberInList {
    fn matches(&self, value: &Value) -> bool {
        self.values
            .iter()
            .any(|candidate| compare(value, *candidate) == Some(Ordering::Equal))
    }

    fn explain(&self, path: &JsonPath, value: &Value) -> String {
        let list: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        format!(
            "{} must be one of [{}] but {} given",
            path,
            list.join(", "),
            given(value)
        )
    }

    fn code(&self) -> &'static str {
        "in_list"
    }
}

/// The value must be a number strictly greater than the limit.
#[derive(Debug, Clone, Copy)]
pub struct NumberGreaterThan {
    limit: Numeric,
}

impl NumberGreaterThan {
    pub fn new(limit: impl Into<Numeric>) -> Self {
        Self {
            limit: limit.into(),
        }
    }
}

impl Constraint for NumberGreaterThan {
    fn matches(&self, value: &Value) -> bool {
        compare(value, self.limit) == Some(Ordering::Greater)
    }

    fn explain(&self, path: &JsonPath, value: &Value) -> String {
        format!(
            "{} must be a number greater than {} but {} given",
            path,
            self.limit,
            given(value)
        )
    }

    fn code(&self) -> &'static str {
        "greater_than"
    }
}

/// The value must be a number greater than or equal to the limit.
#[derive(Debug, Clone, Copy)]
pub struct NumberGreaterThanOrEqual {
    limit: Numeric,
}

impl NumberGreaterThanOrEqual {
    pub fn new(limit: impl Into<Numeric>) -> Self {
        Self {
            limit: limit.into(),
        }
    }
}

impl Constraint for NumberGreaterThanOrEqual {
    fn matches(&self, value: &Value) -> bool {
        matches!(
            compare(value, self.limit),
            Some(Ordering::Greater | Ordering::Equal)
        )
    }

    fn explain(&self, path: &JsonPath, value: &Value) -> String {
        format!(
            "{} must be a number greater than or equal to {} but {} given",
            path,
            self.limit,
            given(value)
        )
    }

    fn code(&self) -> &'static str {
        "greater_than_or_equal"
    }
}

/// The value must be a number strictly less than the limit.
#[derive(Debug, Clone, Copy)]
pub struct NumberLessThan {
    limit: Numeric,
}

impl NumberLessThan {
    pub fn new(limit: impl Into<Numeric>) -> Self {
        Self {
            limit: limit.into(),
        }
    }
}

impl Constraint for NumberLessThan {
    fn matches(&self, value: &Value) -> bool {
        compare(value, self.limit) == Some(Ordering::Less)
    }

    fn explain(&self, path: &JsonPath, value: &Value) -> String {
        format!(
            "{} must be a number less than {} but {} given",
            path,
            self.limit,
            given(value)
        )
    }

    fn code(&self) -> &'static str {
        "less_than"
    }
}

/// The value must be a number less than or equal to the limit.
#[derive(Debug, Clone, Copy)]
pub struct NumberLessThanOrEqual {
    limit: Numeric,
}

impl NumberLessThanOrEqual {
    pub fn new(limit: impl Into<Numeric>) -> Self {
        Self {
            limit: limit.into(),
        }
    }
}

impl Constraint for NumberLessThanOrEqual {
    fn matches(&self, value: &Value) -> bool {
        matches!(
            compare(value, self.limit),
            Some(Ordering::Less | Ordering::Equal)
        )
    }

    fn explain(&self, path: &JsonPath, value: &Value) -> String {
        format!(
            "{} must be a number less than or equal to {} but {} given",
            path,
            self.limit,
            given(value)
        )
    }

    fn code(&self) -> &'static str {
        "less_than_or_equal"
    }
}
