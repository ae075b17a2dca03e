//! Entry point: decode, validate, transpose and optionally hydrate.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use transposer::{Property, Resource, ResourceRegistry, Unserializer};
//!
//! let registry = ResourceRegistry::new();
//! registry
//!     .register(Resource::new("Tag", vec![Property::string("label")]).unwrap())
//!     .unwrap();
//!
//! let unserializer = Unserializer::new(Arc::new(registry));
//! let transposed = unserializer.unserialize("Tag", r#"{"label": "rust"}"#).unwrap();
//! assert!(transposed.is_valid());
//! assert_eq!(transposed.data(), &json!({"label": "rust"}));
//!
//! let transposed = unserializer.unserialize("Tag", r#"{"label": 42}"#).unwrap();
//! assert_eq!(
//!     transposed.result().messages(),
//!     vec!["$.label must be of type string but int given"]
//! );
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use stillwater::Validation;
use tracing::debug;

use crate::constraint::type_name as value_type;
use crate::error::{EngineError, SchemaErrors};
use crate::hydrate::{Hydrator, SerdeHydrator};
use crate::path::JsonPath;
use crate::registry::SchemaFactory;
use crate::validation::{ValidationContext, ValidationResult, DEFAULT_MAX_DEPTH};

/// Raw input accepted by [`Unserializer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// JSON text, decoded before validation.
    Text(String),
    /// An already decoded document.
    Value(Value),
}

impl Input {
    fn decode(self) -> Result<Value, EngineError> {
        match self {
            Input::Text(text) => Ok(serde_json::from_str(&text)?),
            Input::Value(value) => Ok(value),
        }
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::Value(value)
    }
}

impl From<Map<String, Value>> for Input {
    fn from(map: Map<String, Value>) -> Self {
        Input::Value(Value::Object(map))
    }
}

/// The transposed document together with its validation outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Transposed {
    data: Value,
    result: ValidationResult,
}

impl Transposed {
    /// The rewritten document. Partially transposed when invalid.
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }

    pub fn into_parts(self) -> (Value, ValidationResult) {
        (self.data, self.result)
    }

    /// Converts into a `Validation`, dropping the data when invalid.
    pub fn into_validation(self) -> Validation<Value, SchemaErrors> {
        match self.result.into_errors() {
            None => Validation::Success(self.data),
            Some(errors) => Validation::Failure(errors),
        }
    }

    /// Hydrates the data when valid.
    ///
    /// # Errors
    ///
    /// `EngineError::Invalid` carrying every validation error, or
    /// `EngineError::Hydration` when the hydrator fails.
    pub fn hydrate<H: Hydrator>(self, hydrator: &H) -> Result<H::Output, EngineError> {
        let type_name = self.result.type_name().to_string();
        match self.into_validation() {
            Validation::Success(data) => Ok(hydrator.hydrate(&type_name, data)?),
            Validation::Failure(errors) => Err(EngineError::Invalid(errors)),
        }
    }
}

/// Validates and transposes documents against resources from a factory.
#[derive(Clone)]
pub struct Unserializer {
    factory: Arc<dyn SchemaFactory>,
    max_depth: usize,
}

impl Unserializer {
    pub fn new(factory: Arc<dyn SchemaFactory>) -> Self {
        Self {
            factory,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how many nested resources one call may enter.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validates `input` against the resource for `type_name` and returns
    /// the transposed document.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, a non-object root (checked before the
    /// factory is consulted), an unknown type and the depth limit.
    /// Validation errors are reported through [`Transposed::result`].
    pub fn unserialize(
        &self,
        type_name: &str,
        input: impl Into<Input>,
    ) -> Result<Transposed, EngineError> {
        let mut data = input.into().decode()?;
        if !data.is_object() {
            return Err(EngineError::ValueMustBeObject {
                given: value_type(&data),
            });
        }

        let resource = self.factory.create_resource_for_class(type_name)?;
        let context = ValidationContext::new(Arc::clone(&self.factory)).with_max_depth(self.max_depth);
        let result = resource.transpose_in_place(&JsonPath::root(), &mut data, &context)?;
        debug!(
            type_name,
            valid = result.is_valid(),
            errors = result.errors().len(),
            "unserialized document"
        );
        Ok(Transposed { data, result })
    }

    /// Validates and deserializes `input` into `T`.
    pub fn unserialize_into<T: DeserializeOwned>(
        &self,
        type_name: &str,
        input: impl Into<Input>,
    ) -> Result<T, EngineError> {
        self.unserialize(type_name, input)?
            .hydrate(&SerdeHydrator::<T>::new())
    }

    /// Validates a batch of documents in parallel, keeping input order.
    pub fn unserialize_many<I>(
        &self,
        type_name: &str,
        inputs: Vec<I>,
    ) -> Vec<Result<Transposed, EngineError>>
    where
        I: Into<Input> + Send,
    {
        inputs
            .into_par_iter()
            .map(|input| self.unserialize(type_name, input))
            .collect()
    }
}
