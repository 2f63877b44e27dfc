//! Model loading, saving and query tests

use odata_link_sdk::model::{ModelLoadError, ModelLoader, ModelSaver};
use odata_link_sdk::models::{
    BoundOperation, EntityModel, EntityType, NavigationProperty, NavigationSource, TypeReference,
};

fn sample_model() -> EntityModel {
    let mut model = EntityModel::new("NS");
    model.add_entity_type(
        EntityType::new("NS", "Customer")
            .with_key("ID")
            .with_navigation(NavigationProperty::new("Orders", "NS.Order")),
    );
    model.add_entity_type(EntityType::new("NS", "SpecialCustomer").with_base("NS.Customer"));
    model.add_entity_type(EntityType::new("NS", "Order").with_key("ID"));
    model.add_navigation_source(NavigationSource::entity_set("Customers", "NS.Customer"));
    model.add_operation(
        BoundOperation::function("NS", "IsUpgraded")
            .bound_to(TypeReference::entity("NS.Customer")),
    );
    model
}

#[test]
fn test_saved_model_loads_back_with_same_semantics() {
    let model = sample_model();
    let json = ModelSaver::new().to_json(&model).unwrap();
    let loaded = ModelLoader::new().from_json(&json).unwrap();

    assert_eq!(loaded.namespace, "NS");
    assert!(loaded.entity_type("NS.SpecialCustomer").is_some());
    assert!(loaded.is_subtype_of("NS.SpecialCustomer", "NS.Customer"));
    assert_eq!(loaded.key_properties("NS.SpecialCustomer"), ["ID".to_string()]);
    assert!(loaded.navigation_source("Customers").is_some());
    assert!(loaded.operation("NS.IsUpgraded").is_some());
}

#[test]
fn test_yaml_load_resolves_queries() {
    let model = sample_model();
    let yaml = ModelSaver::new().to_yaml(&model).unwrap();
    let loaded = ModelLoader::new().from_yaml(&yaml).unwrap();

    let customer = loaded.entity_type("NS.Customer").unwrap();
    assert_eq!(customer.navigation_properties.len(), 1);
    assert!(customer.navigation_property("Orders").is_some());
}

#[test]
fn test_loader_rejects_model_with_unknown_base_type() {
    let mut model = sample_model();
    model.add_entity_type(EntityType::new("NS", "Vip").with_base("NS.Ghost"));
    let json = ModelSaver::new().to_json(&model).unwrap();

    match ModelLoader::new().from_json(&json) {
        Err(ModelLoadError::Invalid { findings, result }) => {
            assert!(findings >= 1);
            assert!(
                result
                    .unknown_references
                    .iter()
                    .any(|r| r.reference == "NS.Ghost")
            );
        }
        other => panic!("expected validation rejection, got {other:?}"),
    }
}

#[test]
fn test_loader_rejects_model_with_inheritance_cycle() {
    let mut model = EntityModel::new("NS");
    model.add_entity_type(EntityType::new("NS", "A").with_base("NS.B"));
    model.add_entity_type(EntityType::new("NS", "B").with_base("NS.A"));
    let json = ModelSaver::new().to_json(&model).unwrap();

    assert!(matches!(
        ModelLoader::new().from_json(&json),
        Err(ModelLoadError::Invalid { .. })
    ));
}

#[test]
fn test_loader_rejects_malformed_json() {
    assert!(matches!(
        ModelLoader::new().from_json("{ not json"),
        Err(ModelLoadError::Parse(_))
    ));
}

#[test]
fn test_loader_accepts_handwritten_document() {
    let yaml = r#"
namespace: NS
entity_types:
  - id: 00000000-0000-0000-0000-000000000001
    name: Customer
    namespace: NS
    key_properties: [ID]
  - id: 00000000-0000-0000-0000-000000000002
    name: SpecialCustomer
    namespace: NS
    base_type: NS.Customer
navigation_sources:
  - id: 00000000-0000-0000-0000-000000000003
    name: Customers
    kind: EntitySet
    entity_type: NS.Customer
created_at: 2024-01-01T00:00:00Z
updated_at: 2024-01-01T00:00:00Z
"#;
    let loaded = ModelLoader::new().from_yaml(yaml).unwrap();
    assert!(loaded.is_strict_subtype_of("NS.SpecialCustomer", "NS.Customer"));
    assert_eq!(loaded.navigation_source("Customers").unwrap().entity_type, "NS.Customer");
}
