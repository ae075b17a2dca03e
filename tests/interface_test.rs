//! Tests for interface properties resolved per fragment.

use std::sync::Arc;

use serde_json::{json, Value};
use transposer::constraint::NumberGreaterThan;
use transposer::{
    DiscriminatorResolver, Property, ResolveError, Resolver, Resource, ResourceRegistry,
    SchemaFactory, Unserializer,
};

fn registry() -> ResourceRegistry {
    let registry = ResourceRegistry::new();
    registry
        .register(
            Resource::new(
                "Circle",
                vec![Property::float("radius").with_constraint(NumberGreaterThan::new(0))],
            )
            .unwrap(),
        )
        .unwrap();
    registry
        .register(
            Resource::new(
                "Rectangle",
                vec![Property::float("width"), Property::float("height")],
            )
            .unwrap(),
        )
        .unwrap();
    registry
        .register(
            Resource::new(
                "Drawing",
                vec![Property::array_of(
                    "shapes",
                    Property::interface(
                        "shape",
                        DiscriminatorResolver::new("type")
                            .variant("circle", "Circle")
                            .variant("rectangle", "Rectangle")
                            .variant("triangle", "Triangle"),
                    ),
                )],
            )
            .unwrap(),
        )
        .unwrap();
    registry
}

fn unserializer() -> Unserializer {
    Unserializer::new(Arc::new(registry()))
}

#[test]
fn test_each_fragment_picks_its_resource() {
    let transposed = unserializer()
        .unserialize(
            "Drawing",
            json!({"shapes": [
                {"type": "circle", "radius": 2},
                {"type": "rectangle", "width": 1, "height": 3}
            ]}),
        )
        .unwrap();

    assert!(transposed.is_valid(), "{:?}", transposed.result().messages());
    assert_eq!(
        transposed.data(),
        &json!({"shapes": [
            {"radius": 2.0, "type": "circle"},
            {"width": 1.0, "height": 3.0, "type": "rectangle"}
        ]})
    );
}

#[test]
fn test_resolved_resource_errors() {
    let transposed = unserializer()
        .unserialize(
            "Drawing",
            json!({"shapes": [{"type": "circle", "radius": -1}, {"type": "rectangle"}]}),
        )
        .unwrap();

    assert_eq!(
        transposed.result().messages(),
        vec![
            "$.shapes[0].radius must be a number greater than 0 but -1.0 given",
            "$.shapes[1].width is required",
            "$.shapes[1].height is required",
        ]
    );
}

#[test]
fn test_resolution_failures_are_validation_errors() {
    let transposed = unserializer()
        .unserialize(
            "Drawing",
            json!({"shapes": [
                {"radius": 1},
                {"type": "hexagon"},
                {"type": "triangle"},
                {"type": "circle", "radius": 1}
            ]}),
        )
        .unwrap();

    assert_eq!(
        transposed.result().messages(),
        vec![
            "$.shapes[0] could not be resolved: discriminator 'type' is missing",
            "$.shapes[1] could not be resolved: 'hexagon' is not a known variant of 'type'",
            "$.shapes[2] could not be resolved: no resource is registered for type 'Triangle'",
        ]
    );
    assert!(transposed
        .result()
        .errors()
        .iter()
        .all(|e| e.code == "unresolved"));
}

#[test]
fn test_registry_reports_missing_variant_types() {
    assert_eq!(registry().unresolved_types(), vec!["Triangle"]);
}

/// Picks a resource from the shape of the fragment instead of a tag.
#[derive(Debug)]
struct ShapeSniffer;

impl Resolver for ShapeSniffer {
    fn resolve(
        &self,
        fragment: &Value,
        factory: &dyn SchemaFactory,
    ) -> Result<Arc<Resource>, ResolveError> {
        let type_name = if fragment.get("radius").is_some() {
            "Circle"
        } else {
            "Rectangle"
        };
        factory
            .create_resource_for_class(type_name)
            .map_err(|_| ResolveError::UnknownType {
                type_name: type_name.to_string(),
            })
    }
}

#[test]
fn test_custom_resolver() {
    let registry = registry();
    registry
        .register(
            Resource::new("Slot", vec![Property::interface("shape", ShapeSniffer)]).unwrap(),
        )
        .unwrap();
    let unserializer = Unserializer::new(Arc::new(registry));

    let transposed = unserializer
        .unserialize("Slot", json!({"shape": {"radius": "big"}}))
        .unwrap();
    assert_eq!(
        transposed.result().messages(),
        vec!["$.shape.radius must be of type float but string given"]
    );

    let transposed = unserializer
        .unserialize("Slot", json!({"shape": {"width": 2}}))
        .unwrap();
    assert_eq!(
        transposed.result().messages(),
        vec!["$.shape.height is required"]
    );
}

#[test]
fn test_interface_rejects_scalars() {
    let registry = registry();
    registry
        .register(
            Resource::new("Slot", vec![Property::interface("shape", ShapeSniffer)]).unwrap(),
        )
        .unwrap();
    let transposed = Unserializer::new(Arc::new(registry))
        .unserialize("Slot", json!({"shape": 3}))
        .unwrap();
    assert_eq!(
        transposed.result().messages(),
        vec!["$.shape must be of type object but int given"]
    );
}
