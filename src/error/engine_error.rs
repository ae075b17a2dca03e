//! Non-recoverable engine failures.

use crate::collection::CollectionError;
use crate::constraint::ConstraintError;
use crate::error::SchemaErrors;
use crate::hydrate::HydrateError;
use crate::registry::RegistryError;

/// Failures that abort an operation instead of being accumulated.
///
/// Construction-time problems (bad patterns, empty lists, bad identifiers)
/// and fatal runtime conditions (depth limit, malformed input, non-object
/// roots, unknown types) end up here.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The nesting depth limit was reached while descending into a nested
    /// resource.
    #[error("too much recursion: depth limit of {max_depth} exceeded at {path}")]
    TooMuchRecursion {
        /// The configured limit.
        max_depth: usize,
        /// Rendered path of the property that would have exceeded it.
        path: String,
    },

    /// The document root was not an object.
    #[error("value must be object, {given} given")]
    ValueMustBeObject {
        /// Type name of the rejected root.
        given: &'static str,
    },

    /// Input text was not valid JSON.
    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// No resource is known for the requested target type.
    #[error("unknown target type '{0}'")]
    UnknownType(String),

    /// A property identifier was empty or made only of separators.
    #[error("invalid property identifier '{0}'")]
    InvalidIdentifier(String),

    /// Two properties of one resource read the same input key.
    #[error("properties '{first}' and '{second}' both read input key '{key}'")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Hydration(#[from] HydrateError),

    /// Validation failed; hydration was not attempted.
    #[error("{0}")]
    Invalid(SchemaErrors),
}
