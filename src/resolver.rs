//! Runtime resolution of interface properties.
//!
//! An interface property does not know its nested resource up front. A
//! [`Resolver`] inspects each JSON fragment and picks the concrete resource
//! to validate it against, like a discriminated union.

use std::fmt::Debug;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::constraint::type_name;
use crate::registry::SchemaFactory;
use crate::resource::Resource;

/// Picks the resource for a fragment.
pub trait Resolver: Send + Sync + Debug {
    /// Returns the resource `fragment` must be validated against.
    fn resolve(
        &self,
        fragment: &Value,
        factory: &dyn SchemaFactory,
    ) -> Result<Arc<Resource>, ResolveError>;

    /// Type names this resolver can produce, for reference checks.
    fn type_names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Why a fragment could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("discriminator '{field}' is missing")]
    MissingDiscriminator { field: String },

    #[error("discriminator '{field}' must be a string but {given} given")]
    InvalidDiscriminator { field: String, given: &'static str },

    #[error("'{value}' is not a known variant of '{field}'")]
    UnknownVariant { field: String, value: String },

    #[error("no resource is registered for type '{type_name}'")]
    UnknownType { type_name: String },
}

/// Resolves by reading a string tag field and mapping it to a type name.
///
/// # Example
///
/// ```rust
/// use transposer::{DiscriminatorResolver, Property};
///
/// let shape = Property::interface(
///     "shape",
///     DiscriminatorResolver::new("type")
///         .variant("circle", "Circle")
///         .variant("rectangle", "Rectangle"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DiscriminatorResolver {
    field: String,
    variants: IndexMap<String, String>,
}

impl DiscriminatorResolver {
    /// Creates a resolver reading the tag from `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            variants: IndexMap::new(),
        }
    }

    /// Maps tag value `tag` to the resource named `type_name`.
    pub fn variant(mut self, tag: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.variants.insert(tag.into(), type_name.into());
        self
    }

    /// Returns the discriminator field.
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Resolver for DiscriminatorResolver {
    fn resolve(
        &self,
        fragment: &Value,
        factory: &dyn SchemaFactory,
    ) -> Result<Arc<Resource>, ResolveError> {
        let tag = match fragment.get(&self.field) {
            None => {
                return Err(ResolveError::MissingDiscriminator {
                    field: self.field.clone(),
                })
            }
            Some(Value::String(tag)) => tag,
            Some(other) => {
                return Err(ResolveError::InvalidDiscriminator {
                    field: self.field.clone(),
                    given: type_name(other),
                })
            }
        };

        let type_name = self
            .variants
            .get(tag)
            .ok_or_else(|| ResolveError::UnknownVariant {
                field: self.field.clone(),
                value: tag.clone(),
            })?;

        factory
            .create_resource_for_class(type_name)
            .map_err(|_| ResolveError::UnknownType {
                type_name: type_name.clone(),
            })
    }

    fn type_names(&self) -> Vec<String> {
        self.variants.values().cloned().collect()
    }
}
