//! Schema nodes.
//!
//! A [`Property`] describes one field of a target type: its kind, whether
//! it may be null or absent, its default, and the constraints its value
//! must satisfy. Properties are immutable values; every builder method
//! consumes the receiver and returns a new property, so a clone taken
//! beforehand is never affected.
//!
//! # Example
//!
//! ```rust
//! use transposer::constraint::{NumberGreaterThan, StringInList};
//! use transposer::Property;
//! use serde_json::json;
//!
//! let age = Property::integer("age").with_constraint(NumberGreaterThan::new(0));
//! let colour = Property::string("colour")
//!     .with_default(json!("red"))
//!     .with_constraint(StringInList::new(["red", "blue"]).unwrap());
//!
//! assert!(age.accepts(&json!(42)));
//! assert!(!age.accepts(&json!("42")));
//! assert_eq!(colour.default_value(), Some(&json!("red")));
//! ```

mod coerce;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::constraint::{literal, type_name, Constraint};
use crate::error::{EngineError, SchemaError};
use crate::path::JsonPath;
use crate::registry::SchemaFactory;
use crate::resolver::Resolver;
use crate::resource::Resource;

pub use coerce::{parse_datetime, CoerceError};
pub(crate) use coerce::keyed;

/// Which declared members a resource exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// Reference from a class property to its nested resource.
#[derive(Debug, Clone)]
pub enum ClassRef {
    /// Looked up through the schema factory when first needed, which
    /// allows self-referencing and mutually recursive schemas.
    Named(String),
    /// Already built.
    Bound(Arc<Resource>),
}

impl ClassRef {
    /// Returns the target type name.
    pub fn type_name(&self) -> &str {
        match self {
            ClassRef::Named(name) => name,
            ClassRef::Bound(resource) => resource.type_name(),
        }
    }

    pub(crate) fn resolve(&self, factory: &dyn SchemaFactory) -> Result<Arc<Resource>, EngineError> {
        match self {
            ClassRef::Named(name) => factory.create_resource_for_class(name),
            ClassRef::Bound(resource) => Ok(Arc::clone(resource)),
        }
    }
}

impl From<&str> for ClassRef {
    fn from(name: &str) -> Self {
        ClassRef::Named(name.to_string())
    }
}

impl From<String> for ClassRef {
    fn from(name: String) -> Self {
        ClassRef::Named(name)
    }
}

impl From<Arc<Resource>> for ClassRef {
    fn from(resource: Arc<Resource>) -> Self {
        ClassRef::Bound(resource)
    }
}

impl From<Resource> for ClassRef {
    fn from(resource: Resource) -> Self {
        ClassRef::Bound(Arc::new(resource))
    }
}

/// The closed set of schema node kinds.
#[derive(Clone)]
pub enum PropertyKind {
    String,
    Integer,
    Float,
    Boolean,
    /// Sequential or keyed elements, optionally typed by an element property.
    Array { items: Option<Box<Property>> },
    /// Arbitrary key/value map, optionally typed by a value property.
    Object { values: Option<Box<Property>> },
    Mixed,
    /// Nested resource of a fixed type.
    Class(ClassRef),
    /// Nested resource picked per fragment by a resolver.
    Interface(Arc<dyn Resolver>),
    DateTime,
}

impl PropertyKind {
    /// Name of the expected type, as used in mismatch messages.
    pub fn expected(&self) -> &'static str {
        match self {
            PropertyKind::String => "string",
            PropertyKind::Integer => "int",
            PropertyKind::Float => "float",
            PropertyKind::Boolean => "bool",
            PropertyKind::Array { .. } => "array",
            PropertyKind::Object { .. } => "object",
            PropertyKind::Mixed => "mixed",
            PropertyKind::Class(_) | PropertyKind::Interface(_) => "object",
            PropertyKind::DateTime => "date-time",
        }
    }
}

impl fmt::Debug for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Array { items } => f.debug_struct("Array").field("items", items).finish(),
            PropertyKind::Object { values } => {
                f.debug_struct("Object").field("values", values).finish()
            }
            PropertyKind::Class(class) => f.debug_tuple("Class").field(&class.type_name()).finish(),
            PropertyKind::Interface(resolver) => f.debug_tuple("Interface").field(resolver).finish(),
            other => f.write_str(other.expected()),
        }
    }
}

/// One field of a resource.
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    kind: PropertyKind,
    nullable: bool,
    default: Option<Value>,
    visibility: Visibility,
    constraints: Vec<Arc<dyn Constraint>>,
    key_constraints: Vec<Arc<dyn Constraint>>,
}

impl Property {
    /// Creates a property of the given kind with no constraints.
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: false,
            default: None,
            visibility: Visibility::Public,
            constraints: Vec::new(),
            key_constraints: Vec::new(),
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Boolean)
    }

    pub fn mixed(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Mixed)
    }

    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::DateTime)
    }

    /// An array with untyped elements.
    pub fn array(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Array { items: None })
    }

    /// An array whose elements are validated and transposed as `items`.
    ///
    /// The element property's name is not used.
    pub fn array_of(name: impl Into<String>, items: Property) -> Self {
        Self::new(
            name,
            PropertyKind::Array {
                items: Some(Box::new(items)),
            },
        )
    }

    /// A key/value map with untyped values.
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Object { values: None })
    }

    /// A key/value map whose values are validated and transposed as `values`.
    pub fn object_of(name: impl Into<String>, values: Property) -> Self {
        Self::new(
            name,
            PropertyKind::Object {
                values: Some(Box::new(values)),
            },
        )
    }

    /// A nested resource of a fixed type.
    pub fn class(name: impl Into<String>, class: impl Into<ClassRef>) -> Self {
        Self::new(name, PropertyKind::Class(class.into()))
    }

    /// A nested resource chosen per value by `resolver`.
    pub fn interface(name: impl Into<String>, resolver: impl Resolver + 'static) -> Self {
        Self::new(name, PropertyKind::Interface(Arc::new(resolver)))
    }

    /// Allows `null` and absence (absence writes `null`).
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Value written when the property is absent.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Attaches a value constraint.
    ///
    /// Scalars are checked once. Arrays are checked per element and objects
    /// per value.
    pub fn with_constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Arc::new(constraint));
        self
    }

    /// Attaches a constraint checked against every key of a keyed value.
    pub fn with_key_constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.key_constraints.push(Arc::new(constraint));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn constraints(&self) -> &[Arc<dyn Constraint>] {
        &self.constraints
    }

    pub fn key_constraints(&self) -> &[Arc<dyn Constraint>] {
        &self.key_constraints
    }

    /// Returns true for properties that hold a nested resource.
    pub fn is_structured(&self) -> bool {
        matches!(self.kind, PropertyKind::Class(_) | PropertyKind::Interface(_))
    }

    /// Builds the error reported when a value is rejected by [`accepts`].
    ///
    /// [`accepts`]: Property::accepts
    pub fn mismatch(&self, path: &JsonPath, value: &Value) -> SchemaError {
        let message = match (&self.kind, value) {
            (_, Value::Null) => format!("{} must not be null", path),
            (PropertyKind::DateTime, Value::String(_)) => format!(
                "{} must be an ISO-8601 date-time but {} given",
                path,
                literal(value)
            ),
            (kind, _) => format!(
                "{} must be of type {} but {} given",
                path,
                kind.expected(),
                type_name(value)
            ),
        };
        SchemaError::new(path.clone(), message).with_code("invalid_type")
    }

    /// Evaluates every attached constraint against an accepted, coerced
    /// value and returns one error per failure.
    pub fn check_constraints(&self, path: &JsonPath, value: &Value) -> Vec<SchemaError> {
        let mut errors = Vec::new();
        match (&self.kind, value) {
            (PropertyKind::Array { .. } | PropertyKind::Object { .. }, Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    check_all(&self.constraints, &path.with_array_key(i), item, &mut errors);
                }
            }
            (PropertyKind::Array { .. } | PropertyKind::Object { .. }, Value::Object(map)) => {
                for (key, item) in map {
                    let entry_path = path.with_object_key(key.as_str());
                    check_all(
                        &self.key_constraints,
                        &entry_path,
                        &Value::String(key.clone()),
                        &mut errors,
                    );
                    check_all(&self.constraints, &entry_path, item, &mut errors);
                }
            }
            _ => check_all(&self.constraints, path, value, &mut errors),
        }
        errors
    }
}

fn check_all(
    constraints: &[Arc<dyn Constraint>],
    path: &JsonPath,
    value: &Value,
    errors: &mut Vec<SchemaError>,
) {
    for constraint in constraints {
        if !constraint.matches(value) {
            errors.push(
                SchemaError::new(path.clone(), constraint.explain(path, value))
                    .with_code(constraint.code()),
            );
        }
    }
}
