//! Error types.
//!
//! Validation failures are accumulated as [`SchemaError`] values and never
//! abort a walk. Construction-time and fatal runtime failures are
//! [`EngineError`] values returned through `Result`.

mod engine_error;
mod schema_error;

pub use engine_error::EngineError;
pub use schema_error::{SchemaError, SchemaErrors};
