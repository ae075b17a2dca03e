//! Tests for the sealed property collection.

use transposer::{Collection, CollectionError, EngineError, Property, PropertyKind};

fn names(collection: &Collection) -> Vec<&str> {
    collection.iter().map(|(name, _)| name).collect()
}

#[test]
fn test_iteration_order_survives_lookups() {
    let collection = Collection::new(vec![
        Property::string("Alpha"),
        Property::string("Beta"),
        Property::string("Gamma"),
    ])
    .unwrap();

    for spelling in ["gamma", "BETA", "al_pha", "Gam-ma", " alpha "] {
        assert!(collection.exists(spelling), "{}", spelling);
        assert_eq!(names(&collection), vec!["Alpha", "Beta", "Gamma"]);
    }
}

#[test]
fn test_lookup_ignores_spelling() {
    let collection = Collection::new(vec![
        Property::string("first_name"),
        Property::integer("zipCode"),
    ])
    .unwrap();

    assert_eq!(collection.get("First Name").unwrap().name(), "first_name");
    assert_eq!(collection.get("ZIP_CODE").unwrap().name(), "zipCode");
    assert!(collection.get("zip").is_none());
    assert!(!collection.exists("code"));
}

#[test]
fn test_collision_tie_break() {
    let collection = Collection::new(vec![
        Property::string("zip_code"),
        Property::boolean("active"),
        Property::integer("ZipCode"),
    ])
    .unwrap();

    assert_eq!(collection.len(), 2);
    let winner = collection.get("zip-code").unwrap();
    assert_eq!(winner.name(), "ZipCode");
    assert!(matches!(winner.kind(), PropertyKind::Integer));
    assert_eq!(names(&collection), vec!["ZipCode", "active"]);
}

#[test]
fn test_sealed_after_construction() {
    let collection = Collection::new(vec![Property::string("name")]).unwrap();

    assert!(matches!(
        collection.set("name", Property::integer("name")),
        Err(CollectionError::Sealed { .. })
    ));
    assert!(matches!(
        collection.unset("name"),
        Err(CollectionError::SealedUnset { .. })
    ));
    assert!(matches!(collection.get("name").unwrap().kind(), PropertyKind::String));
}

#[test]
fn test_sealed_error_converts_into_engine_error() {
    let collection = Collection::new(Vec::new()).unwrap();
    let err: EngineError = collection.unset("ghost").unwrap_err().into();
    assert_eq!(
        err.to_string(),
        "cannot unset 'ghost': property collection is sealed"
    );
}

#[test]
fn test_empty_identifier_rejected() {
    let err = Collection::new(vec![Property::string("--")]).unwrap_err();
    assert_eq!(err.to_string(), "invalid property identifier '--'");
}
