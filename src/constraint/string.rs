//! String rules.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::error;
use uuid::Uuid;

use super::{literal, type_name, Constraint, ConstraintError};
use crate::path::JsonPath;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";

/// Compiled once. A compile failure is logged and rejects every address.
fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| match Regex::new(EMAIL_PATTERN) {
            Ok(re) => Some(re),
            Err(err) => {
                error!(%err, "email pattern failed to compile, every address will be rejected");
                None
            }
        })
        .as_ref()
}

fn given(value: &Value) -> String {
    if value.is_string() {
        literal(value)
    } else {
        type_name(value).to_string()
    }
}

/// The value must be a string equal to one of a fixed set.
#[derive(Debug, Clone)]
pub struct StringInList {
    values: Vec<String>,
}

impl StringInList {
    /// Builds the rule; an empty set is rejected.
    ///
    /// ```rust
    /// use transposer::constraint::{Constraint, StringInList};
    /// use transposer::JsonPath;
    /// use serde_json::json;
    ///
    /// let rule = StringInList::new(["red", "blue"]).unwrap();
    /// let path = JsonPath::root().with_object_key("colour");
    /// assert_eq!(
    ///     rule.explain(&path, &json!("green")),
    ///     "$.colour must be one of ['red', 'blue'] but 'green' given"
    /// );
    /// ```
    pub fn new<I, S>(values: I) -> Result<Self, ConstraintError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(ConstraintError::EmptyList);
        }
        Ok(Self { values })
    }

    /// Returns the accepted values.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Constraint for StringInList {
    fn matches(&self, value: &Value) -> bool {
        value
            .as_str()
            .is_some_and(|s| self.values.iter().any(|candidate| candidate == s))
    }

    fn explain(&self, path: &JsonPath, value: &Value) -> String {
        let list: Vec<String> = self.values.iter().map(|v| format!("'{}'", v)).collect();
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

/// The value must be a string matching a regular expression.
///
/// The pattern is compiled when the rule is built.
#[derive(Debug, Clone)]
pub struct StringMatchesRegex {
    regex: Regex,
    pattern: String,
}

impl StringMatchesRegex {
    pub fn new(pattern: &str) -> Result<Self, ConstraintError> {
        let regex = Regex::new(pattern).map_err(|source| ConstraintError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            pattern: pattern.to_string(),
        })
    }

    /// Returns the source pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Constraint for StringMatchesRegex {
    fn matches(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| self.regex.is_match(s))
    }

    fn explain(&self, path: &JsonPath, value: &Value) -> String {
        format!(
            "{} must match pattern '{}' but {} given",
            path,
            self.pattern,
            given(value)
        )
    }

    fn code(&self) -> &'static str {
        "pattern"
    }
}

/// The value must be a string shaped like an email address.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringIsEmail;

impl Constraint for StringIsEmail {
    fn matches(&self, value: &Value) -> bool {
        let Some(s) = value.as_str() else {
            return false;
        };
        s.len() <= 254 && email_regex().is_some_and(|re| re.is_match(s))
    }

    fn explain(&self, path: &JsonPath, value: &Value) -> String {
        format!(
            "{} must be a valid email address but {} given",
            path,
            given(value)
        )
    }

    fn code(&self) -> &'static str {
        "email"
    }
}

/// The value must be a UUID in the 36-character hyphenated form.
///
/// Letter case is not significant. Braced, URN and unhyphenated spellings
/// are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringIsUuid;

impl StringIsUuid {
    fn is_hyphenated(s: &str) -> bool {
        s.len() == 36
            && s.char_indices().all(|(i, c)| match i {
                8 | 13 | 18 | 23 => c == '-',
                _ => c.is_ascii_hexdigit(),
            })
    }
}

impl Constraint for StringIsUuid {
    fn matches(&self, value: &Value) -> bool {
        value
            .as_str()
            .is_some_and(|s| Self::is_hyphenated(s) && Uuid::parse_str(s).is_ok())
    }

    fn explain(&self, path: &JsonPath, value: &Value) -> String {
        format!("{} must be a valid UUID but {} given", path, given(value))
    }

    fn code(&self) -> &'static str {
        "uuid"
    }
}
