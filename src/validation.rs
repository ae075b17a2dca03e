//! Per-call validation state and results.
//!
//! [`ValidationContext`] carries the schema factory and the nesting depth
//! through a walk. It is cloned one level deeper on every descent, so the
//! depth is never shared between calls and concurrent validations cannot
//! interfere with each other. [`ValidationResult`] accumulates the errors.

use std::sync::Arc;

use crate::error::{EngineError, SchemaError, SchemaErrors};
use crate::path::JsonPath;
use crate::registry::{ResourceRegistry, SchemaFactory};

/// Default maximum number of nested resources entered in one call.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Validation context carrying the factory and depth tracking.
#[derive(Clone)]
pub struct ValidationContext {
    factory: Arc<dyn SchemaFactory>,
    depth: usize,
    max_depth: usize,
}

impl ValidationContext {
    /// Creates a root context with the default depth limit.
    pub fn new(factory: Arc<dyn SchemaFactory>) -> Self {
        Self {
            factory,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns a context one level deeper.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::TooMuchRecursion` when the limit is reached.
    /// The whole operation must then be abandoned.
    pub fn descend(&self, path: &JsonPath) -> Result<Self, EngineError> {
        if self.depth >= self.max_depth {
            tracing::warn!(
                max_depth = self.max_depth,
                path = %path,
                "nesting depth limit reached, aborting"
            );
            return Err(EngineError::TooMuchRecursion {
                max_depth: self.max_depth,
                path: path.to_string(),
            });
        }
        Ok(Self {
            factory: Arc::clone(&self.factory),
            depth: self.depth + 1,
            max_depth: self.max_depth,
        })
    }

    /// Returns the current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the maximum allowed depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the factory used to resolve nested resources.
    pub fn factory(&self) -> &dyn SchemaFactory {
        &*self.factory
    }
}

impl Default for ValidationContext {
    /// A context backed by an empty registry: only bound class references
    /// can be followed.
    fn default() -> Self {
        Self::new(Arc::new(ResourceRegistry::new()))
    }
}

/// Errors accumulated while validating one value against one resource.
///
/// `is_valid()` holds exactly when no error was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    type_name: String,
    errors: Vec<SchemaError>,
}

impl ValidationResult {
    /// Creates an empty (valid) result for `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            errors: Vec::new(),
        }
    }

    /// The target type this result hydrates into.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    /// Returns the error messages in the order they were recorded.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    pub fn push(&mut self, error: SchemaError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = SchemaError>) {
        self.errors.extend(errors);
    }

    /// Appends the errors of a nested result.
    pub fn merge(&mut self, nested: ValidationResult) {
        self.errors.extend(nested.errors);
    }

    /// Returns the errors as a non-empty set, or `None` when valid.
    pub fn into_errors(self) -> Option<SchemaErrors> {
        SchemaErrors::from_vec(self.errors)
    }
}
