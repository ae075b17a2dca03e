//! # Transposer
//!
//! A schema-driven engine that validates decoded JSON against a declared
//! resource, rewrites it into a hydration-ready form and reports ALL
//! violations, each located by a JSON path such as `$.items[2].sku`.
//!
//! ## Overview
//!
//! Validation never stops at the first failure: every property is checked
//! and every error is collected, so callers get complete feedback in one
//! pass. While validating, the document is transposed: input keys are
//! mapped to declared names through a naming strategy, absent properties
//! receive their defaults, scalars are coerced and nested resources are
//! transposed recursively.
//!
//! ## Core Types
//!
//! - [`Property`]: one declared field, its kind and its constraints
//! - [`Resource`]: the schema of a target type, a sealed [`Collection`] of properties
//! - [`ResourceRegistry`]: the [`SchemaFactory`] resolving nested types by name
//! - [`Unserializer`]: decodes, validates and hydrates documents
//! - [`SchemaError`] / [`SchemaErrors`]: accumulated validation failures
//! - [`EngineError`]: failures that abort an operation
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use transposer::constraint::NumberGreaterThanOrEqual;
//! use transposer::naming::CamelCase;
//! use transposer::{Property, Resource, ResourceRegistry, Unserializer};
//!
//! let registry = ResourceRegistry::new();
//! registry
//!     .register(
//!         Resource::builder("Query")
//!             .property(Property::integer("page_size").with_constraint(NumberGreaterThanOrEqual::new(10)))
//!             .property(Property::string("sort").with_default(json!("asc")))
//!             .naming(CamelCase)
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let unserializer = Unserializer::new(Arc::new(registry));
//!
//! let transposed = unserializer.unserialize("Query", r#"{"pageSize": 25}"#).unwrap();
//! assert!(transposed.is_valid());
//! assert_eq!(transposed.data(), &json!({"page_size": 25, "sort": "asc"}));
//!
//! let transposed = unserializer.unserialize("Query", r#"{"pageSize": 7}"#).unwrap();
//! assert_eq!(
//!     transposed.result().messages(),
//!     vec!["$.pageSize must be a number greater than or equal to 10 but 7 given"]
//! );
//! ```

pub mod collection;
pub mod constraint;
pub mod error;
pub mod hydrate;
pub mod naming;
pub mod path;
pub mod property;
pub mod registry;
pub mod resolver;
pub mod resource;
pub mod unserializer;
pub mod validation;

pub use collection::{Collection, CollectionError};
pub use constraint::{Constraint, ConstraintError};
pub use error::{EngineError, SchemaError, SchemaErrors};
pub use hydrate::{HydrateError, Hydrator, SerdeHydrator};
pub use naming::{CachingNamingStrategy, NamingStrategy};
pub use path::{JsonPath, PathSegment};
pub use property::{ClassRef, CoerceError, Property, PropertyKind, Visibility};
pub use registry::{RegistryError, ResourceRegistry, SchemaFactory};
pub use resolver::{DiscriminatorResolver, ResolveError, Resolver};
pub use resource::{Resource, ResourceBuilder, ResourceOptions, VisibilityFilter};
pub use unserializer::{Input, Transposed, Unserializer};
pub use validation::{ValidationContext, ValidationResult, DEFAULT_MAX_DEPTH};
