//! Turning transposed data into typed values.

use std::error::Error;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Builds a typed value from transposed data.
///
/// Only called with data whose validation succeeded.
pub trait Hydrator {
    type Output;

    fn hydrate(&self, type_name: &str, data: Value) -> Result<Self::Output, HydrateError>;
}

/// A hydrator that could not build its output.
#[derive(Debug, thiserror::Error)]
#[error("cannot hydrate '{type_name}': {source}")]
pub struct HydrateError {
    pub type_name: String,
    #[source]
    pub source: Box<dyn Error + Send + Sync>,
}

impl HydrateError {
    pub fn new(type_name: impl Into<String>, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// Hydrates through `serde`: the transposed object is deserialized into `T`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use serde_json::json;
/// use transposer::{Hydrator, SerdeHydrator};
///
/// #[derive(Deserialize)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// let point = SerdeHydrator::<Point>::new()
///     .hydrate("Point", json!({"x": 1, "y": 2}))
///     .unwrap();
/// assert_eq!(point.x + point.y, 3);
/// ```
pub struct SerdeHydrator<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> SerdeHydrator<T> {
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for SerdeHydrator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeHydrator<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for SerdeHydrator<T> {}

impl<T> fmt::Debug for SerdeHydrator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeHydrator<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> Hydrator for SerdeHydrator<T> {
    type Output = T;

    fn hydrate(&self, type_name: &str, data: Value) -> Result<T, HydrateError> {
        serde_json::from_value(data).map_err(|e| HydrateError::new(type_name, e))
    }
}
