//! # Model
//!
//! The immutable container tying everything together. A `Model` owns every
//! type, the derived relations and namespace tree, the permission profiles
//! and the localization bundles. Types refer to each other by name and the
//! model is the arena those names are resolved in.
//!
//! ## Construction
//!
//! `Model::new` never fails. Problems found while assembling the type set
//! (a name reserved by a built-in scalar, a duplicate type name) are kept
//! and surface as the first messages of `validate()`. For duplicate names
//! the first declaration wins and later ones are dropped.
//!
//! `Model::build` is the accepting path: it validates and rejects the model
//! if any error-severity message was produced.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use thiserror::Error;
use tgm_core::TypeKind;

use crate::config::ModelConfig;
use crate::i18n::{Localizations, TypeLocalization};
use crate::loader::ConfigError;
use crate::namespace::{Namespace, NamespaceTree};
use crate::object_type::ObjectTypeBase;
use crate::permission::PermissionProfile;
use crate::relation::{resolve_relations, Relation};
use crate::types::{
    is_builtin_scalar, ChildEntityType, EntityExtensionType, EnumType, RootEntityType, ScalarType,
    Type, ValueObjectType, BUILTIN_SCALARS,
};
use crate::validation::{ValidationContext, ValidationMessage, ValidationResult};

/// Error building an accepted model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Declarations could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation produced at least one error.
    #[error("model is invalid ({count} error(s)):\n{0}", count = .0.error_count())]
    Invalid(ValidationResult),
}

/// A fully constructed, immutable type graph.
#[derive(Debug, Clone)]
pub struct Model {
    types: Vec<Type>,
    index: HashMap<String, usize>,
    relations: Vec<Relation>,
    namespaces: NamespaceTree,
    permission_profiles: BTreeMap<String, PermissionProfile>,
    localizations: Localizations,
    construction_messages: Vec<ValidationMessage>,
}

impl Model {
    /// Construct a model from declarations. Never fails; see `validate`.
    pub fn new(config: ModelConfig) -> Self {
        let mut types: Vec<Type> = BUILTIN_SCALARS
            .iter()
            .map(|name| Type::Scalar(ScalarType::built_in(name)))
            .collect();
        let mut index: HashMap<String, usize> = types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name().to_string(), i))
            .collect();
        let mut construction_messages = Vec::new();

        for declaration in config.types {
            let name = declaration.name().to_string();
            if is_builtin_scalar(&name) {
                construction_messages.push(ValidationMessage::error(
                    format!("Type name \"{name}\" is reserved by a built-in type."),
                    declaration.location().cloned(),
                ));
                continue;
            }
            if index.contains_key(&name) {
                construction_messages.push(ValidationMessage::error(
                    format!("Duplicate type name: \"{name}\"."),
                    declaration.location().cloned(),
                ));
                continue;
            }
            index.insert(name, types.len());
            types.push(Type::from_config(declaration));
        }

        let relations = resolve_relations(&types, |name| index.get(name).map(|&i| &types[i]));
        let namespaces = NamespaceTree::build(
            types
                .iter()
                .filter_map(Type::as_object)
                .map(ObjectTypeBase::namespace_path),
        );
        let permission_profiles = config
            .permission_profiles
            .into_iter()
            .map(|(name, profile)| {
                let profile = PermissionProfile::from_config(&name, profile);
                (name, profile)
            })
            .collect();

        tracing::debug!(
            types = types.len(),
            relations = relations.len(),
            namespaces = namespaces.node_count(),
            dropped = construction_messages.len(),
            "model constructed"
        );

        Self {
            types,
            index,
            relations,
            namespaces,
            permission_profiles,
            localizations: Localizations::new(config.localizations),
            construction_messages,
        }
    }

    /// Construct, validate, and reject on errors. Warnings are logged.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Invalid` carrying the full result when any
    /// error-severity message is produced.
    pub fn build(config: ModelConfig) -> Result<Self, ModelError> {
        let model = Self::new(config);
        let result = model.validate();
        if result.has_errors() {
            return Err(ModelError::Invalid(result));
        }
        for warning in result.warnings() {
            match &warning.location {
                Some(location) => tracing::warn!(%location, "{}", warning.message),
                None => tracing::warn!("{}", warning.message),
            }
        }
        Ok(model)
    }

    /// Load, merge and build declaration files.
    pub fn load<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self, ModelError> {
        let config = ModelConfig::load_all(paths)?;
        Self::build(config)
    }

    /// Run a full, exhaustive validation pass.
    ///
    /// Order: construction messages, then every type in enumeration order,
    /// then permission profiles, then localizations.
    pub fn validate(&self) -> ValidationResult {
        let mut ctx = ValidationContext::new();
        for message in &self.construction_messages {
            ctx.add_message(message.clone());
        }
        for ty in &self.types {
            ty.validate(self, &mut ctx);
        }
        for profile in self.permission_profiles.values() {
            profile.validate(&mut ctx);
        }
        self.localizations.validate(self, &mut ctx);

        let result = ctx.into_result();
        tracing::info!(
            errors = result.error_count(),
            warnings = result.warning_count(),
            "model validated"
        );
        result
    }

    // ─── Types ───────────────────────────────────────────────────────

    /// All types: built-in scalars first, then declarations in order.
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    /// # Panics
    ///
    /// Panics if no type named `name` exists.
    pub fn expect_type(&self, name: &str) -> &Type {
        match self.get_type(name) {
            Some(ty) => ty,
            None => panic!("type \"{name}\" is not declared"),
        }
    }

    pub fn get_object_type(&self, name: &str) -> Option<&ObjectTypeBase> {
        self.get_type(name).and_then(Type::as_object)
    }

    /// # Panics
    ///
    /// Panics if no object type named `name` exists.
    pub fn expect_object_type(&self, name: &str) -> &ObjectTypeBase {
        match self.get_object_type(name) {
            Some(ty) => ty,
            None => panic!("object type \"{name}\" is not declared"),
        }
    }

    pub fn get_root_entity_type(&self, name: &str) -> Option<&RootEntityType> {
        self.get_type(name).and_then(Type::as_root_entity)
    }

    pub fn get_enum_type(&self, name: &str) -> Option<&EnumType> {
        self.get_type(name).and_then(Type::as_enum)
    }

    pub fn types_of_kind(&self, kind: TypeKind) -> impl Iterator<Item = &Type> {
        self.types.iter().filter(move |t| t.kind() == kind)
    }

    pub fn object_types(&self) -> impl Iterator<Item = &ObjectTypeBase> {
        self.types.iter().filter_map(Type::as_object)
    }

    pub fn root_entity_types(&self) -> impl Iterator<Item = &RootEntityType> {
        self.types.iter().filter_map(Type::as_root_entity)
    }

    pub fn child_entity_types(&self) -> impl Iterator<Item = &ChildEntityType> {
        self.types.iter().filter_map(Type::as_child_entity)
    }

    pub fn entity_extension_types(&self) -> impl Iterator<Item = &EntityExtensionType> {
        self.types.iter().filter_map(Type::as_entity_extension)
    }

    pub fn value_object_types(&self) -> impl Iterator<Item = &ValueObjectType> {
        self.types.iter().filter_map(Type::as_value_object)
    }

    pub fn scalar_types(&self) -> impl Iterator<Item = &ScalarType> {
        self.types.iter().filter_map(Type::as_scalar)
    }

    pub fn enum_types(&self) -> impl Iterator<Item = &EnumType> {
        self.types.iter().filter_map(Type::as_enum)
    }

    // ─── Relations ───────────────────────────────────────────────────

    /// Every relation, in order of first encounter.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Relations whose `from` side is `type_name`.
    pub fn relations_from<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations
            .iter()
            .filter(move |r| r.from_type_name() == type_name)
    }

    /// Relations with `type_name` on either side.
    pub fn relations_of<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations.iter().filter(move |r| r.involves(type_name))
    }

    // ─── Namespaces ──────────────────────────────────────────────────

    pub fn namespaces(&self) -> &NamespaceTree {
        &self.namespaces
    }

    pub fn root_namespace(&self) -> &Namespace {
        self.namespaces.root()
    }

    pub fn get_namespace<S: AsRef<str>>(&self, path: &[S]) -> Option<&Namespace> {
        self.namespaces.get(path)
    }

    pub fn child_namespaces<'a>(
        &'a self,
        namespace: &'a Namespace,
    ) -> impl Iterator<Item = &'a Namespace> + 'a {
        self.namespaces.children(namespace)
    }

    /// Object types declared directly in `namespace`.
    pub fn types_in_namespace<'a>(
        &'a self,
        namespace: &'a Namespace,
    ) -> impl Iterator<Item = &'a ObjectTypeBase> + 'a {
        self.object_types()
            .filter(move |t| t.namespace_path() == namespace.path())
    }

    /// Object types declared in `namespace` or any namespace below it.
    pub fn types_in_namespace_recursive<'a>(
        &'a self,
        namespace: &'a Namespace,
    ) -> impl Iterator<Item = &'a ObjectTypeBase> + 'a {
        self.object_types()
            .filter(move |t| t.namespace_path().starts_with(namespace.path()))
    }

    // ─── Permissions & Localization ──────────────────────────────────

    pub fn permission_profiles(&self) -> impl Iterator<Item = &PermissionProfile> {
        self.permission_profiles.values()
    }

    pub fn get_permission_profile(&self, name: &str) -> Option<&PermissionProfile> {
        self.permission_profiles.get(name)
    }

    pub fn localizations(&self) -> &Localizations {
        &self.localizations
    }

    pub fn type_localization(&self, type_name: &str, resolution_order: &[&str]) -> TypeLocalization {
        self.localizations
            .type_localization(type_name, resolution_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnumTypeConfig, FieldConfig, ObjectTypeConfig, TypeConfig};

    fn config(types: Vec<TypeConfig>) -> ModelConfig {
        ModelConfig {
            types,
            ..ModelConfig::default()
        }
    }

    fn country() -> TypeConfig {
        TypeConfig::RootEntity(
            ObjectTypeConfig::new("Country", vec![FieldConfig::new("isoCode", "String")])
                .with_key_field("isoCode")
                .in_namespace(["generic"]),
        )
    }

    #[test]
    fn test_builtins_precede_user_types() {
        let model = Model::new(config(vec![country()]));
        let names: Vec<&str> = model.types().iter().map(Type::name).collect();
        assert_eq!(
            names,
            vec!["ID", "String", "Boolean", "Int", "Float", "JSON", "DateTime", "Country"]
        );
    }

    #[test]
    fn test_empty_model_is_valid() {
        let model = Model::new(ModelConfig::default());
        assert!(model.validate().is_empty());
        assert_eq!(model.namespaces().node_count(), 1);
        assert!(model.relations().is_empty());
    }

    #[test]
    fn test_duplicate_type_first_wins() {
        let model = Model::new(config(vec![
            country(),
            TypeConfig::Enum(EnumTypeConfig::new("Country", ["A"])),
        ]));
        assert_eq!(model.expect_type("Country").kind(), TypeKind::RootEntity);
        let result = model.validate();
        assert_eq!(result.messages()[0].message, "Duplicate type name: \"Country\".");
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_builtin_name_is_reserved() {
        let model = Model::new(config(vec![TypeConfig::Enum(EnumTypeConfig::new("String", ["A"]))]));
        assert!(model.get_type("String").unwrap().is_built_in());
        let result = model.validate();
        assert_eq!(
            result.messages()[0].message,
            "Type name \"String\" is reserved by a built-in type."
        );
    }

    #[test]
    fn test_build_rejects_errors() {
        let bad = config(vec![TypeConfig::ValueObject(ObjectTypeConfig::new(
            "Address",
            vec![FieldConfig::new("street", "Nope")],
        ))]);
        match Model::build(bad) {
            Err(ModelError::Invalid(result)) => {
                assert_eq!(result.errors().next().unwrap().message, "Type \"Nope\" not found.");
            }
            other => panic!("expected invalid model, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_model_error_display() {
        let bad = config(vec![TypeConfig::ValueObject(ObjectTypeConfig::new(
            "Address",
            vec![FieldConfig::new("street", "Nope")],
        ))]);
        let err = Model::build(bad).unwrap_err();
        assert_eq!(
            err.to_string(),
            "model is invalid (1 error(s)):\n  error: Type \"Nope\" not found."
        );
    }

    #[test]
    fn test_build_accepts_warnings() {
        let ok = config(vec![TypeConfig::Enum(EnumTypeConfig::new("Mode", ["lowercase"]))]);
        let model = Model::build(ok).unwrap();
        assert!(model.get_enum_type("Mode").is_some());
    }

    #[test]
    fn test_lookup_by_kind() {
        let model = Model::new(config(vec![
            country(),
            TypeConfig::Enum(EnumTypeConfig::new("TransportKind", ["AIR"])),
        ]));
        assert_eq!(model.root_entity_types().count(), 1);
        assert_eq!(model.enum_types().count(), 1);
        assert_eq!(model.scalar_types().count(), 7);
        assert_eq!(model.types_of_kind(TypeKind::Enum).count(), 1);
        assert!(model.get_root_entity_type("TransportKind").is_none());
    }

    #[test]
    #[should_panic(expected = "type \"Nope\" is not declared")]
    fn test_expect_type_panics() {
        let model = Model::new(ModelConfig::default());
        let _ = model.expect_type("Nope");
    }

    #[test]
    fn test_types_in_namespace() {
        let model = Model::new(config(vec![
            country(),
            TypeConfig::ValueObject(
                ObjectTypeConfig::new("Address", vec![FieldConfig::new("street", "String")])
                    .in_namespace(["generic", "postal"]),
            ),
        ]));
        let generic = model.get_namespace(&["generic"]).unwrap();
        let direct: Vec<&str> = model.types_in_namespace(generic).map(ObjectTypeBase::name).collect();
        assert_eq!(direct, vec!["Country"]);
        let all: Vec<&str> = model
            .types_in_namespace_recursive(generic)
            .map(ObjectTypeBase::name)
            .collect();
        assert_eq!(all, vec!["Country", "Address"]);
        assert_eq!(model.child_namespaces(generic).count(), 1);
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Model>();
    }
}
