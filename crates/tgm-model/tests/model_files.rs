//! Integration test: the model documents under `models/` at the repository
//! root load, merge and validate without errors.

use std::path::{Path, PathBuf};

use tgm_model::{Introspection, Model};

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

/// All `.yaml`, `.yml` and `.json` files in `dir`, sorted.
fn find_model_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| {
                    p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| matches!(e, "yaml" | "yml" | "json"))
                })
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

fn load_repo_models() -> Model {
    let files = find_model_files(&repo_root().join("models"));
    assert!(
        !files.is_empty(),
        "Expected model documents under {}",
        repo_root().join("models").display()
    );
    match Model::load(&files) {
        Ok(model) => model,
        Err(e) => panic!("repository models failed to build:\n{e}"),
    }
}

#[test]
fn test_repository_models_build() {
    let model = load_repo_models();
    let result = model.validate();
    assert!(result.is_valid(), "validation errors:\n{result}");
    assert_eq!(result.warning_count(), 0, "unexpected warnings:\n{result}");
}

#[test]
fn test_repository_model_shape() {
    let model = load_repo_models();
    let intro = Introspection::new(&model);

    let namespaces: Vec<String> = intro
        .namespaces()
        .into_iter()
        .map(|n| n.path.join("."))
        .collect();
    assert_eq!(namespaces, vec!["", "generic", "logistics", "logistics.shipments"]);

    let relations = intro.relations("Shipment").unwrap();
    assert_eq!(relations.len(), 2);
    assert!(relations.iter().all(|r| r.from_type == "Shipment" && r.to_field.is_some()));

    let rail = model
        .get_enum_type("TransportKind")
        .and_then(|e| e.value("RAIL"))
        .unwrap();
    assert!(rail.is_deprecated());
}

#[test]
fn test_repository_model_localization() {
    let model = load_repo_models();
    let label = model.type_localization("Shipment", &["de", "en"]);
    assert_eq!(label.label.as_deref(), Some("Sendung"));

    let deliveries = model.expect_object_type("Shipment").expect_field("deliveries");
    assert_eq!(
        deliveries.localization(&model, &["de", "en"]).label.as_deref(),
        Some("Deliveries")
    );
    assert_eq!(
        model
            .localizations()
            .enum_value_localization("TransportKind", "AIR", &["en"])
            .label
            .as_deref(),
        Some("Air freight")
    );
}
