//! Tests for concurrent use of shared resources, registries and caches.

use std::sync::Arc;
use std::thread;

use serde_json::json;
use transposer::constraint::NumberGreaterThanOrEqual;
use transposer::naming::CamelCase;
use transposer::{
    CachingNamingStrategy, EngineError, NamingStrategy, Property, Resource, ResourceRegistry,
    Unserializer,
};

fn registry() -> ResourceRegistry {
    let registry = ResourceRegistry::new();
    registry
        .register(
            Resource::builder("User")
                .property(Property::string("user_name"))
                .property(Property::integer("age").with_constraint(NumberGreaterThanOrEqual::new(18)))
                .property(Property::class("manager", "User").nullable())
                .naming(CamelCase)
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
}

#[test]
fn test_concurrent_validation() {
    let unserializer = Arc::new(Unserializer::new(Arc::new(registry())));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let unserializer = Arc::clone(&unserializer);
            thread::spawn(move || {
                let transposed = unserializer
                    .unserialize("User", json!({"userName": format!("user{}", i), "age": 10 + i * 2}))
                    .unwrap();
                assert_eq!(transposed.is_valid(), 10 + i * 2 >= 18);
                assert_eq!(transposed.data()["user_name"], json!(format!("user{}", i)));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_depth_limit_is_not_shared_between_threads() {
    let unserializer = Arc::new(Unserializer::new(Arc::new(registry())).with_max_depth(3));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let unserializer = Arc::clone(&unserializer);
            thread::spawn(move || {
                let levels = if i % 2 == 0 { 3 } else { 4 };
                let mut value = json!({"userName": "leaf", "age": 30});
                for _ in 0..levels {
                    value = json!({"userName": "boss", "age": 40, "manager": value});
                }
                for _ in 0..50 {
                    let outcome = unserializer.unserialize("User", value.clone());
                    if levels == 3 {
                        assert!(outcome.unwrap().is_valid());
                    } else {
                        assert!(matches!(outcome, Err(EngineError::TooMuchRecursion { .. })));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_registration_while_validating() {
    let registry = registry();
    let unserializer = Arc::new(Unserializer::new(Arc::new(registry.clone())));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let unserializer = Arc::clone(&unserializer);
            thread::spawn(move || {
                for _ in 0..100 {
                    let transposed = unserializer
                        .unserialize("User", json!({"userName": "a", "age": 20}))
                        .unwrap();
                    assert!(transposed.is_valid());
                }
            })
        })
        .collect();

    let writer = thread::spawn(move || {
        for i in 0..20 {
            registry
                .register(Resource::new(format!("Extra{}", i), vec![Property::mixed("any")]).unwrap())
                .unwrap();
        }
        registry.len()
    });

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(writer.join().unwrap(), 21);
    assert!(unserializer.unserialize("Extra19", json!({})).is_ok());
}

#[test]
fn test_shared_naming_cache() {
    let naming = Arc::new(CachingNamingStrategy::new(CamelCase));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let naming = Arc::clone(&naming);
            thread::spawn(move || {
                for i in 0..20 {
                    assert_eq!(naming.format(&format!("field_{}_name", i)), format!("field{}Name", i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(naming.cached_len(), 20);
}
