//! Integration test: the logistics model queried through the introspection
//! projection. Covers type enumeration, per-kind listing, relation
//! traversal from both sides, namespaces and enum values.

use serde_json::json;
use tgm_core::TypeKind;
use tgm_model::{Introspection, Model, ModelConfig};

fn logistics() -> Model {
    let config: ModelConfig = serde_json::from_value(json!({
        "types": [
            {"kind": "VALUE_OBJECT", "name": "Address",
             "fields": [{"name": "name", "typeName": "String"}]},
            {"kind": "ROOT_ENTITY", "name": "Country", "keyFieldName": "isoCode",
             "namespacePath": ["generic"],
             "fields": [{"name": "isoCode", "typeName": "String"}]},
            {"kind": "ROOT_ENTITY", "name": "Shipment",
             "namespacePath": ["logistics", "shipments"],
             "fields": [
                {"name": "deliveries", "typeName": "Delivery", "isList": true, "isRelation": true},
                {"name": "delivery", "typeName": "Delivery", "isRelation": true},
                {"name": "deliveryNonRelation", "typeName": "Delivery"},
                {"name": "deliveryWithInverseOf", "typeName": "Delivery", "isRelation": true,
                 "inverseOfFieldName": "shipment"},
                {"name": "handlingUnits", "typeName": "HandlingUnit", "isRelation": true, "isList": true},
                {"name": "transportKind", "typeName": "TransportKind"}
             ]},
            {"kind": "ROOT_ENTITY", "name": "Delivery", "namespacePath": ["logistics"],
             "fields": [{"name": "shipment", "typeName": "Shipment", "isRelation": true}]},
            {"kind": "ROOT_ENTITY", "name": "HandlingUnit", "fields": []},
            {"kind": "CHILD_ENTITY", "name": "Item", "fields": []},
            {"kind": "ENTITY_EXTENSION", "name": "DangerousGoodsInfo", "fields": []},
            {"kind": "ENUM", "name": "TransportKind",
             "values": [{"value": "AIR"}, {"value": "ROAD"}, {"value": "SEA"}]}
        ],
        "permissionProfiles": {
            "default": {"permissions": [{"roles": ["accounting"], "access": "readWrite"}]},
            "accounting": {"permissions": [{"roles": ["accounting"], "access": "readWrite"}]}
        }
    }))
    .unwrap();
    Model::new(config)
}

fn names(views: &[tgm_model::TypeView]) -> Vec<&str> {
    views.iter().map(|v| v.name()).collect()
}

#[test]
fn test_all_types_in_order() {
    let model = logistics();
    let types = Introspection::new(&model).types();
    assert_eq!(
        names(&types),
        vec![
            "ID", "String", "Boolean", "Int", "Float", "JSON", "DateTime", "Address", "Country",
            "Shipment", "Delivery", "HandlingUnit", "Item", "DangerousGoodsInfo", "TransportKind",
        ]
    );
    let kinds: Vec<TypeKind> = types.iter().map(|t| t.kind()).collect();
    assert_eq!(&kinds[..7], &[TypeKind::Scalar; 7]);
    assert_eq!(kinds[7], TypeKind::ValueObject);
    assert_eq!(kinds[14], TypeKind::Enum);
}

#[test]
fn test_shipment_fields() {
    let model = logistics();
    let value = serde_json::to_value(Introspection::new(&model).type_by_name("Shipment").unwrap()).unwrap();
    assert_eq!(value["keyField"], serde_json::Value::Null);

    let fields = value["fields"].as_array().unwrap();
    let summary: Vec<(String, bool, bool, String)> = fields
        .iter()
        .map(|f| {
            (
                f["name"].as_str().unwrap().to_string(),
                f["isList"].as_bool().unwrap(),
                f["isRelation"].as_bool().unwrap(),
                f["typeKind"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    let expected = [
        ("id", false, false, "SCALAR"),
        ("createdAt", false, false, "SCALAR"),
        ("updatedAt", false, false, "SCALAR"),
        ("deliveries", true, true, "ROOT_ENTITY"),
        ("delivery", false, true, "ROOT_ENTITY"),
        ("deliveryNonRelation", false, false, "ROOT_ENTITY"),
        ("deliveryWithInverseOf", false, true, "ROOT_ENTITY"),
        ("handlingUnits", true, true, "ROOT_ENTITY"),
        ("transportKind", false, false, "ENUM"),
    ];
    let expected: Vec<(String, bool, bool, String)> = expected
        .iter()
        .map(|(n, l, r, k)| (n.to_string(), *l, *r, k.to_string()))
        .collect();
    assert_eq!(summary, expected);
}

#[test]
fn test_key_field_only_on_root_entities() {
    let model = logistics();
    let intro = Introspection::new(&model);
    let country = serde_json::to_value(intro.type_by_name("Country").unwrap()).unwrap();
    assert_eq!(country["keyField"], "isoCode");
    let item = serde_json::to_value(intro.type_by_name("Item").unwrap()).unwrap();
    assert!(item.get("keyField").is_none());
}

#[test]
fn test_system_fields_by_kind() {
    let model = logistics();
    let intro = Introspection::new(&model);
    let field_names = |name: &str| -> Vec<String> {
        intro
            .type_by_name(name)
            .unwrap()
            .as_object()
            .unwrap()
            .fields
            .iter()
            .map(|f| f.name.clone())
            .collect()
    };
    assert_eq!(field_names("HandlingUnit"), vec!["id", "createdAt", "updatedAt"]);
    assert_eq!(field_names("Item"), vec!["id", "createdAt", "updatedAt"]);
    assert!(field_names("DangerousGoodsInfo").is_empty());
    assert_eq!(field_names("Address"), vec!["name"]);
}

#[test]
fn test_types_per_kind() {
    let model = logistics();
    let intro = Introspection::new(&model);
    assert_eq!(
        names(&intro.root_entity_types()),
        vec!["Country", "Shipment", "Delivery", "HandlingUnit"]
    );
    assert_eq!(names(&intro.child_entity_types()), vec!["Item"]);
    assert_eq!(names(&intro.entity_extension_types()), vec!["DangerousGoodsInfo"]);
    assert_eq!(names(&intro.value_object_types()), vec!["Address"]);
    assert_eq!(
        names(&intro.scalar_types()),
        vec!["ID", "String", "Boolean", "Int", "Float", "JSON", "DateTime"]
    );
    assert_eq!(names(&intro.enum_types()), vec!["TransportKind"]);
}

#[test]
fn test_delivery_relations() {
    let model = logistics();
    let relations = Introspection::new(&model).relations("Delivery").unwrap();
    assert_eq!(
        serde_json::to_value(relations).unwrap(),
        json!([
            {"fromField": "deliveries", "fromType": "Shipment", "toField": null, "toType": "Delivery"},
            {"fromField": "delivery", "fromType": "Shipment", "toField": null, "toType": "Delivery"},
            {"fromField": "shipment", "fromType": "Delivery", "toField": "deliveryWithInverseOf", "toType": "Shipment"}
        ])
    );
}

#[test]
fn test_inverse_pair_visible_from_both_sides() {
    let model = logistics();
    let intro = Introspection::new(&model);
    let pair = |type_name: &str| {
        intro
            .relations(type_name)
            .unwrap()
            .into_iter()
            .filter(|r| r.to_field.is_some())
            .collect::<Vec<_>>()
    };
    assert_eq!(pair("Delivery"), pair("Shipment"));
    assert_eq!(pair("Delivery").len(), 1);
}

#[test]
fn test_non_relation_field_has_no_relation() {
    let model = logistics();
    assert!(model
        .relations()
        .iter()
        .all(|r| r.from_field_name() != "deliveryNonRelation"
            && r.to_field_name() != Some("deliveryNonRelation")));
    assert_eq!(model.relations().len(), 4);
    assert_eq!(model.relations_from("Shipment").count(), 3);
}

#[test]
fn test_relation_endpoints_resolve() {
    let model = logistics();
    let pair = model
        .relations()
        .iter()
        .find(|r| r.is_bidirectional())
        .unwrap();
    assert_eq!(pair.from_field(&model).qualified_name(), "Delivery.shipment");
    assert_eq!(
        pair.to_field(&model).unwrap().inverse_of_field_name(),
        Some("shipment")
    );
}

#[test]
fn test_namespaces() {
    let model = logistics();
    let intro = Introspection::new(&model);
    assert_eq!(
        serde_json::to_value(intro.namespaces()).unwrap(),
        json!([
            {"name": null, "path": [], "isRoot": true},
            {"name": "generic", "path": ["generic"], "isRoot": false},
            {"name": "logistics", "path": ["logistics"], "isRoot": false},
            {"name": "shipments", "path": ["logistics", "shipments"], "isRoot": false}
        ])
    );
}

#[test]
fn test_namespace_by_path() {
    let model = logistics();
    let intro = Introspection::new(&model);
    let logistics = intro.namespace(&["logistics"]).unwrap();
    assert_eq!(logistics.name.as_deref(), Some("logistics"));
    assert_eq!(logistics.path, vec!["logistics"]);
    let root = intro.namespace::<&str>(&[]).unwrap();
    assert_eq!(root.name, None);
    assert!(root.is_root);
    assert!(intro.namespace(&["nowhere"]).is_none());
}

#[test]
fn test_enum_values() {
    let model = logistics();
    let e = Introspection::new(&model).enum_type("TransportKind").unwrap();
    let values: Vec<&str> = e.values.iter().map(|v| v.value.as_str()).collect();
    assert_eq!(values, vec!["AIR", "ROAD", "SEA"]);
    assert!(Introspection::new(&model).enum_type("Shipment").is_none());
}

#[test]
fn test_permission_profiles_pass_through() {
    let model = logistics();
    let shipment = model.get_root_entity_type("Shipment").unwrap();
    assert_eq!(shipment.permission_profile_name(), None);
    assert_eq!(shipment.permission_profile(&model).unwrap().name(), "default");
    assert_eq!(model.permission_profiles().count(), 2);
}

#[test]
fn test_model_shared_across_threads() {
    let model = std::sync::Arc::new(logistics());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let model = std::sync::Arc::clone(&model);
            std::thread::spawn(move || Introspection::new(&model).snapshot())
        })
        .collect();
    let snapshots: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(snapshots.windows(2).all(|w| w[0] == w[1]));
}
