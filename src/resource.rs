//! Resources and the validate-and-transpose walk.
//!
//! A [`Resource`] is the schema of one target type. Validating a value
//! against it checks every declared property, rewrites the value into its
//! hydration form (declared names as keys, defaults filled in, nulls
//! written for absent nullable properties, scalars coerced) and collects
//! every violation on the way.
//!
//! # Example
//!
//! ```rust
//! use transposer::naming::CamelCase;
//! use transposer::{JsonPath, Property, Resource, ValidationContext};
//! use serde_json::json;
//!
//! let resource = Resource::builder("User")
//!     .property(Property::string("first_name"))
//!     .property(Property::string("role").with_default(json!("member")))
//!     .naming(CamelCase)
//!     .build()
//!     .unwrap();
//!
//! let mut value = json!({"firstName": "Ada"});
//! let result = resource
//!     .validate_and_transpose(&JsonPath::root(), &mut value, &ValidationContext::default())
//!     .unwrap();
//!
//! assert!(result.is_valid());
//! assert_eq!(value, json!({"first_name": "Ada", "role": "member"}));
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::collection::Collection;
use crate::constraint::type_name;
use crate::error::{EngineError, SchemaError};
use crate::naming::{CachingNamingStrategy, Identity, NamingStrategy};
use crate::path::JsonPath;
use crate::property::{keyed, Property, PropertyKind, Visibility};
use crate::validation::{ValidationContext, ValidationResult};

/// Which property visibilities take part in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityFilter {
    public: bool,
    protected: bool,
    private: bool,
}

impl VisibilityFilter {
    /// Every property takes part.
    pub fn all() -> Self {
        Self {
            public: true,
            protected: true,
            private: true,
        }
    }

    /// Only public properties take part.
    pub fn public_only() -> Self {
        Self::only(&[Visibility::Public])
    }

    /// Only the listed visibilities take part.
    pub fn only(visibilities: &[Visibility]) -> Self {
        Self {
            public: visibilities.contains(&Visibility::Public),
            protected: visibilities.contains(&Visibility::Protected),
            private: visibilities.contains(&Visibility::Private),
        }
    }

    pub fn admits(&self, visibility: Visibility) -> bool {
        match visibility {
            Visibility::Public => self.public,
            Visibility::Protected => self.protected,
            Visibility::Private => self.private,
        }
    }
}

impl Default for VisibilityFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// Serialization options of a resource.
#[derive(Clone)]
pub struct ResourceOptions {
    /// Keep undeclared input keys in the transposed output.
    pub auto_serialize: bool,
    pub visibility: VisibilityFilter,
    /// Maps declared names to the keys expected in input.
    pub naming: Arc<dyn NamingStrategy>,
}

impl ResourceOptions {
    pub fn with_naming(mut self, naming: impl NamingStrategy + 'static) -> Self {
        self.naming = Arc::new(naming);
        self
    }

    pub fn with_auto_serialize(mut self, auto_serialize: bool) -> Self {
        self.auto_serialize = auto_serialize;
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityFilter) -> Self {
        self.visibility = visibility;
        self
    }
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            auto_serialize: true,
            visibility: VisibilityFilter::all(),
            naming: Arc::new(CachingNamingStrategy::new(Identity)),
        }
    }
}

impl fmt::Debug for ResourceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceOptions")
            .field("auto_serialize", &self.auto_serialize)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

/// The schema for one target type.
#[derive(Debug, Clone)]
pub struct Resource {
    type_name: String,
    properties: Collection,
    options: ResourceOptions,
}

impl Resource {
    /// Creates a resource with default options.
    ///
    /// # Errors
    ///
    /// Fails when a property identifier is invalid or two properties read
    /// the same input key.
    pub fn new(
        type_name: impl Into<String>,
        properties: impl IntoIterator<Item = Property>,
    ) -> Result<Self, EngineError> {
        let resource = Self {
            type_name: type_name.into(),
            properties: Collection::new(properties)?,
            options: ResourceOptions::default(),
        };
        resource.check_external_keys()?;
        Ok(resource)
    }

    /// Starts a builder for `type_name`.
    pub fn builder(type_name: impl Into<String>) -> ResourceBuilder {
        ResourceBuilder::new(type_name)
    }

    /// Returns a copy using `options`.
    ///
    /// # Errors
    ///
    /// `EngineError::DuplicateKey` when the naming strategy maps two
    /// properties to the same input key.
    pub fn with_options(mut self, options: ResourceOptions) -> Result<Self, EngineError> {
        self.options = options;
        self.check_external_keys()?;
        Ok(self)
    }

    fn check_external_keys(&self) -> Result<(), EngineError> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for (name, property) in &self.properties {
            let key = self.external_key(property);
            if let Some(first) = seen.insert(key.clone(), name) {
                return Err(EngineError::DuplicateKey {
                    key,
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn properties(&self) -> &Collection {
        &self.properties
    }

    pub fn options(&self) -> &ResourceOptions {
        &self.options
    }

    /// Returns the input key under which `property` is expected.
    pub fn external_key(&self, property: &Property) -> String {
        self.options.naming.format(property.name())
    }

    /// Validates `value` and rewrites it in place into its hydration form.
    ///
    /// Properties are processed in declaration order; errors of nested
    /// resources are recorded before the parent moves to its next property.
    ///
    /// # Errors
    ///
    /// Only fatal conditions are returned as `Err`: the depth limit, and
    /// class references the factory cannot resolve. Everything else is
    /// recorded in the returned [`ValidationResult`]. On `Err`, `value`
    /// holds the input as it was before the call.
    pub fn validate_and_transpose(
        &self,
        path: &JsonPath,
        value: &mut Value,
        context: &ValidationContext,
    ) -> Result<ValidationResult, EngineError> {
        let original = value.clone();
        let result = self.transpose_in_place(path, value, context);
        if result.is_err() {
            *value = original;
        }
        result
    }

    /// Like [`validate_and_transpose`](Self::validate_and_transpose), but
    /// leaves `value` partially rewritten on `Err`.
    pub(crate) fn transpose_in_place(
        &self,
        path: &JsonPath,
        value: &mut Value,
        context: &ValidationContext,
    ) -> Result<ValidationResult, EngineError> {
        debug!(
            type_name = %self.type_name,
            path = %path,
            depth = context.depth(),
            "validating resource"
        );
        let mut result = ValidationResult::new(self.type_name.as_str());

        let mut input = match std::mem::take(value) {
            Value::Object(map) => map,
            Value::Array(items) => keyed(items),
            other => {
                result.push(
                    SchemaError::new(
                        path.clone(),
                        format!(
                            "{} must be of type object but {} given",
                            path,
                            type_name(&other)
                        ),
                    )
                    .with_code("invalid_type"),
                );
                *value = other;
                return Ok(result);
            }
        };

        let mut output = Map::new();
        let mut claimed = HashSet::new();

        for (name, property) in &self.properties {
            if !self.options.visibility.admits(property.visibility()) {
                // filtered properties never reach the output, not even as extras
                claimed.insert(self.external_key(property));
                continue;
            }
            let key = self.external_key(property);
            let field_path = path.with_object_key(key.as_str());
            trace!(property = name, key = %key, "transposing property");

            match input.get_mut(&key) {
                Some(field) => {
                    let mut field = std::mem::take(field);
                    claimed.insert(key);
                    transpose_field(property, &field_path, &mut field, context, &mut result)?;
                    output.insert(name.to_string(), field);
                }
                None => fill_absent(property, &field_path, &mut output, &mut result),
            }
        }

        if self.options.auto_serialize {
            for (key, extra) in input {
                if !claimed.contains(&key) && !output.contains_key(&key) {
                    output.insert(key, extra);
                }
            }
        }

        *value = Value::Object(output);
        Ok(result)
    }

    /// Appends the type names this resource refers to by name.
    pub fn collect_refs(&self, refs: &mut Vec<String>) {
        for (_, property) in &self.properties {
            collect_property_refs(property, refs);
        }
    }
}

fn collect_property_refs(property: &Property, refs: &mut Vec<String>) {
    match property.kind() {
        PropertyKind::Class(class) => refs.push(class.type_name().to_string()),
        PropertyKind::Interface(resolver) => refs.extend(resolver.type_names()),
        PropertyKind::Array { items: Some(inner) }
        | PropertyKind::Object {
            values: Some(inner),
        } => collect_property_refs(inner, refs),
        _ => {}
    }
}

fn fill_absent(
    property: &Property,
    path: &JsonPath,
    output: &mut Map<String, Value>,
    result: &mut ValidationResult,
) {
    if let Some(default) = property.default_value() {
        match property.coerce(default.clone()) {
            Ok(value) => {
                output.insert(property.name().to_string(), value);
            }
            Err(err) => result.push(
                SchemaError::new(
                    path.clone(),
                    format!("{} has an invalid default: {}", path, err),
                )
                .with_code("invalid_default"),
            ),
        }
    } else if property.is_nullable() {
        output.insert(property.name().to_string(), Value::Null);
    } else {
        result.push(SchemaError::new(path.clone(), format!("{} is required", path)).with_code("required"));
    }
}

fn transpose_field(
    property: &Property,
    path: &JsonPath,
    field: &mut Value,
    context: &ValidationContext,
    result: &mut ValidationResult,
) -> Result<(), EngineError> {
    if field.is_null() {
        if let PropertyKind::Mixed = property.kind() {
            if let Some(default) = property.default_value() {
                *field = default.clone();
            }
        } else if !property.is_nullable() {
            result.push(property.mismatch(path, field));
        }
        return Ok(());
    }

    if !property.accepts(field) {
        result.push(property.mismatch(path, field));
        return Ok(());
    }

    match property.kind() {
        PropertyKind::Class(class) => {
            let resource = class.resolve(context.factory())?;
            descend_into(&resource, path, field, context, result)
        }
        PropertyKind::Interface(resolver) => match resolver.resolve(field, context.factory()) {
            Ok(resource) => descend_into(&resource, path, field, context, result),
            Err(err) => {
                result.push(
                    SchemaError::new(path.clone(), format!("{} could not be resolved: {}", path, err))
                        .with_code("unresolved"),
                );
                Ok(())
            }
        },
        _ => {
            match property.coerce(std::mem::take(field)) {
                Ok(coerced) => *field = coerced,
                Err(err) => {
                    result.push(
                        SchemaError::new(path.clone(), format!("{} {}", path, err))
                            .with_code("invalid_type"),
                    );
                    return Ok(());
                }
            }
            transpose_elements(property, path, field, context, result)?;
            result.extend(property.check_constraints(path, field));
            Ok(())
        }
    }
}

fn transpose_elements(
    property: &Property,
    path: &JsonPath,
    field: &mut Value,
    context: &ValidationContext,
    result: &mut ValidationResult,
) -> Result<(), EngineError> {
    let element = match property.kind() {
        PropertyKind::Array { items: Some(items) } => items,
        PropertyKind::Object {
            values: Some(values),
        } => values,
        _ => return Ok(()),
    };

    match field {
        Value::Array(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                transpose_field(element, &path.with_array_key(i), item, context, result)?;
            }
        }
        Value::Object(map) => {
            for (key, item) in map.iter_mut() {
                transpose_field(
                    element,
                    &path.with_object_key(key.as_str()),
                    item,
                    context,
                    result,
                )?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn descend_into(
    resource: &Resource,
    path: &JsonPath,
    field: &mut Value,
    context: &ValidationContext,
    result: &mut ValidationResult,
) -> Result<(), EngineError> {
    let nested = context.descend(path)?;
    let nested_result = resource.transpose_in_place(path, field, &nested)?;
    result.merge(nested_result);
    Ok(())
}

/// Builder for [`Resource`].
#[derive(Debug)]
pub struct ResourceBuilder {
    type_name: String,
    properties: Vec<Property>,
    options: ResourceOptions,
}

impl ResourceBuilder {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: Vec::new(),
            options: ResourceOptions::default(),
        }
    }

    /// Declares the next property.
    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Uses `naming` (wrapped in a cache) to derive input keys.
    pub fn naming<N: NamingStrategy + 'static>(mut self, naming: N) -> Self {
        self.options.naming = Arc::new(CachingNamingStrategy::new(naming));
        self
    }

    pub fn auto_serialize(mut self, auto_serialize: bool) -> Self {
        self.options.auto_serialize = auto_serialize;
        self
    }

    pub fn visibility(mut self, visibility: VisibilityFilter) -> Self {
        self.options.visibility = visibility;
        self
    }

    pub fn options(mut self, options: ResourceOptions) -> Self {
        self.options = options;
        self
    }

    /// Seals the properties into a resource.
    pub fn build(self) -> Result<Resource, EngineError> {
        Resource::new(self.type_name, self.properties)?.with_options(self.options)
    }
}
