//! Schema factory and the registry-backed implementation.
//!
//! Nested class properties may refer to their resource by type name; the
//! [`SchemaFactory`] turns that name into a [`Resource`] while validating.
//! [`ResourceRegistry`] is the in-crate factory: build each resource once,
//! register it, and share the registry between threads.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::EngineError;
use crate::resource::Resource;

/// Produces the resource describing a target type.
pub trait SchemaFactory: Send + Sync {
    /// Returns the resource for `type_name`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownType` when no resource is known.
    fn create_resource_for_class(&self, type_name: &str) -> Result<Arc<Resource>, EngineError>;
}

type ResourceMap = Arc<RwLock<HashMap<String, Arc<Resource>>>>;

/// A thread-safe cache of resources keyed by type name.
///
/// Cloning is cheap and clones share the same storage.
///
/// # Example
///
/// ```rust
/// use transposer::{Property, Resource, ResourceRegistry, SchemaFactory};
///
/// let registry = ResourceRegistry::new();
/// registry
///     .register(Resource::new("Tag", vec![Property::string("label")]).unwrap())
///     .unwrap();
///
/// assert!(registry.create_resource_for_class("Tag").is_ok());
/// assert!(registry.create_resource_for_class("Missing").is_err());
/// ```
#[derive(Clone, Default)]
pub struct ResourceRegistry {
    resources: ResourceMap,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource under its type name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is taken.
    pub fn register(&self, resource: Resource) -> Result<Arc<Resource>, RegistryError> {
        self.register_shared(Arc::new(resource))
    }

    /// Registers an already shared resource under its type name.
    pub fn register_shared(&self, resource: Arc<Resource>) -> Result<Arc<Resource>, RegistryError> {
        let mut resources = self.resources.write();
        let name = resource.type_name().to_string();
        if resources.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        tracing::debug!(type_name = %name, "registered resource");
        resources.insert(name, Arc::clone(&resource));
        Ok(resource)
    }

    /// Retrieves a resource by type name.
    pub fn get(&self, type_name: &str) -> Option<Arc<Resource>> {
        self.resources.read().get(type_name).cloned()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.resources.read().contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.resources.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.read().is_empty()
    }

    /// Returns the type names referenced by registered resources that are
    /// not registered themselves, sorted and deduplicated.
    ///
    /// Call it once every resource is registered to catch dangling class
    /// references before the first validation.
    pub fn unresolved_types(&self) -> Vec<String> {
        let resources = self.resources.read();
        let mut refs = Vec::new();
        for resource in resources.values() {
            resource.collect_refs(&mut refs);
        }

        let mut unresolved: Vec<String> = refs
            .into_iter()
            .filter(|name| !resources.contains_key(name))
            .collect();
        unresolved.sort();
        unresolved.dedup();
        unresolved
    }
}

impl SchemaFactory for ResourceRegistry {
    fn create_resource_for_class(&self, type_name: &str) -> Result<Arc<Resource>, EngineError> {
        self.get(type_name)
            .ok_or_else(|| EngineError::UnknownType(type_name.to_string()))
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a resource with a name that already exists.
    #[error("resource '{0}' already registered")]
    DuplicateName(String),
}
