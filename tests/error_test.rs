//! Tests for error types and their conversions.

use serde_json::json;
use stillwater::prelude::*;
use stillwater::Validation;
use transposer::constraint::StringMatchesRegex;
use transposer::{
    EngineError, JsonPath, Property, RegistryError, Resource, ResourceRegistry, SchemaError,
    SchemaErrors,
};

fn error(key: &str, message: &str, code: &str) -> SchemaError {
    let path = JsonPath::root().with_object_key(key);
    SchemaError::new(path.clone(), format!("{} {}", path, message)).with_code(code)
}

#[test]
fn test_schema_errors_accumulate() {
    let errors = SchemaErrors::single(error("a", "is required", "required"))
        .combine(SchemaErrors::single(error("b", "must not be null", "invalid_type")))
        .combine(SchemaErrors::single(error("a", "is odd", "custom")));

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.first().message, "$.a is required");
    assert_eq!(errors.at_path(&JsonPath::root().with_object_key("a")).len(), 2);
    assert_eq!(errors.with_code("invalid_type").len(), 1);
    assert_eq!(
        errors.to_string(),
        "Validation failed with 3 error(s):\n  1. $.a is required\n  2. $.b must not be null\n  3. $.a is odd\n"
    );
}

#[test]
fn test_from_vec() {
    assert!(SchemaErrors::from_vec(Vec::new()).is_none());
    let errors = SchemaErrors::from_vec(vec![error("x", "is required", "required")]).unwrap();
    assert_eq!(errors.into_vec().len(), 1);
}

#[test]
fn test_invalid_carries_validation_errors() {
    let errors = SchemaErrors::single(error("name", "is required", "required"));
    let err = EngineError::Invalid(errors.clone());
    assert_eq!(err.to_string(), errors.to_string());

    let validation: Validation<(), SchemaErrors> = Validation::Failure(errors);
    assert!(matches!(validation, Validation::Failure(ref e) if e.len() == 1));
}

#[test]
fn test_construction_errors_convert() {
    let err: EngineError = StringMatchesRegex::new("[").unwrap_err().into();
    assert!(matches!(err, EngineError::Constraint(_)));

    let registry = ResourceRegistry::new();
    registry.register(Resource::new("T", vec![]).unwrap()).unwrap();
    let err: EngineError = registry
        .register(Resource::new("T", vec![]).unwrap())
        .unwrap_err()
        .into();
    assert!(matches!(
        err,
        EngineError::Registry(RegistryError::DuplicateName(ref name)) if name == "T"
    ));
    assert_eq!(err.to_string(), "resource 'T' already registered");
}

#[test]
fn test_errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EngineError>();
    assert_send_sync::<SchemaErrors>();
    assert_send_sync::<Resource>();
    assert_send_sync::<Property>();
}

#[test]
fn test_validation_errors_keep_paths() {
    let resource = Resource::new(
        "Order",
        vec![Property::array_of("lines", Property::integer("qty"))],
    )
    .unwrap();
    let mut value = json!({"lines": [1, "two", 3, null]});
    let result = resource
        .validate_and_transpose(&JsonPath::root(), &mut value, &Default::default())
        .unwrap();

    let errors = result.into_errors().unwrap();
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["$.lines[1]", "$.lines[3]"]);
    assert_eq!(
        errors.messages(),
        vec![
            "$.lines[1] must be of type int but string given",
            "$.lines[3] must not be null",
        ]
    );
}
