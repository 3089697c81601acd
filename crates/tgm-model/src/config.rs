//! # Declaration Input
//!
//! The declarative description a `Model` is built from. This is the
//! contract with external loaders: a list of kind-tagged type declarations,
//! a map of permission profiles, and optional localizations.
//!
//! ```yaml
//! types:
//!   - kind: ROOT_ENTITY
//!     name: Country
//!     keyFieldName: isoCode
//!     namespacePath: [generic]
//!     fields:
//!       - name: isoCode
//!         typeName: String
//!   - kind: ENUM
//!     name: TransportKind
//!     values: [AIR, ROAD, SEA]
//! permissionProfiles:
//!   default:
//!     permissions:
//!       - roles: [accounting]
//!         access: readWrite
//! ```
//!
//! Keys are camelCase, boolean flags default to `false`, and enum values may
//! be given either as bare literals or as objects with metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tgm_core::{SourceLocation, TypeKind};

use crate::permission::AccessKind;

/// Complete declarative input for one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// Type declarations, in declaration order.
    #[serde(default)]
    pub types: Vec<TypeConfig>,
    /// Named permission profiles, passed through opaquely.
    #[serde(default)]
    pub permission_profiles: BTreeMap<String, PermissionProfileConfig>,
    /// Localization bundles, one per language (several may share a language).
    #[serde(default)]
    pub localizations: Vec<LocalizationConfig>,
}

/// One type declaration, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeConfig {
    RootEntity(ObjectTypeConfig),
    ChildEntity(ObjectTypeConfig),
    EntityExtension(ObjectTypeConfig),
    ValueObject(ObjectTypeConfig),
    Enum(EnumTypeConfig),
    Scalar(ScalarTypeConfig),
}

impl TypeConfig {
    /// The declared type name.
    pub fn name(&self) -> &str {
        match self {
            Self::RootEntity(c)
            | Self::ChildEntity(c)
            | Self::EntityExtension(c)
            | Self::ValueObject(c) => &c.name,
            Self::Enum(c) => &c.name,
            Self::Scalar(c) => &c.name,
        }
    }

    /// The declared kind.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::RootEntity(_) => TypeKind::RootEntity,
            Self::ChildEntity(_) => TypeKind::ChildEntity,
            Self::EntityExtension(_) => TypeKind::EntityExtension,
            Self::ValueObject(_) => TypeKind::ValueObject,
            Self::Enum(_) => TypeKind::Enum,
            Self::Scalar(_) => TypeKind::Scalar,
        }
    }

    /// Where the declaration came from, if known.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::RootEntity(c)
            | Self::ChildEntity(c)
            | Self::EntityExtension(c)
            | Self::ValueObject(c) => c.location.as_ref(),
            Self::Enum(c) => c.location.as_ref(),
            Self::Scalar(c) => c.location.as_ref(),
        }
    }

    /// The object payload, for the four object kinds.
    pub fn as_object(&self) -> Option<&ObjectTypeConfig> {
        match self {
            Self::RootEntity(c)
            | Self::ChildEntity(c)
            | Self::EntityExtension(c)
            | Self::ValueObject(c) => Some(c),
            Self::Enum(_) | Self::Scalar(_) => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectTypeConfig> {
        match self {
            Self::RootEntity(c)
            | Self::ChildEntity(c)
            | Self::EntityExtension(c)
            | Self::ValueObject(c) => Some(c),
            Self::Enum(_) | Self::Scalar(_) => None,
        }
    }

    pub(crate) fn location_mut(&mut self) -> &mut Option<SourceLocation> {
        match self {
            Self::RootEntity(c)
            | Self::ChildEntity(c)
            | Self::EntityExtension(c)
            | Self::ValueObject(c) => &mut c.location,
            Self::Enum(c) => &mut c.location,
            Self::Scalar(c) => &mut c.location,
        }
    }
}

/// Payload shared by the four object kinds.
///
/// `key_field_name` and `permission_profile` are only meaningful on root
/// entities; declaring them elsewhere is reported during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Namespace path segments; empty means the root namespace.
    #[serde(default)]
    pub namespace_path: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl ObjectTypeConfig {
    /// An object payload with the given name and fields.
    pub fn new(name: impl Into<String>, fields: Vec<FieldConfig>) -> Self {
        Self {
            name: name.into(),
            fields,
            ..Self::default()
        }
    }

    /// Set the namespace path.
    pub fn in_namespace<S: Into<String>>(mut self, path: impl IntoIterator<Item = S>) -> Self {
        self.namespace_path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Set the key field name.
    pub fn with_key_field(mut self, name: impl Into<String>) -> Self {
        self.key_field_name = Some(name.into());
        self
    }
}

/// One declared field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_reference: bool,
    #[serde(default)]
    pub is_relation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_of_field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl FieldConfig {
    /// A plain single-valued field.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Mark as a list.
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Mark as a relation.
    pub fn relation(mut self) -> Self {
        self.is_relation = true;
        self
    }

    /// Mark as a reference.
    pub fn reference(mut self) -> Self {
        self.is_reference = true;
        self
    }

    /// Declare this relation as the inverse of `field` on the target type.
    pub fn inverse_of(mut self, field: impl Into<String>) -> Self {
        self.inverse_of_field_name = Some(field.into());
        self
    }
}

/// Enum declaration payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumTypeConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub values: Vec<EnumValueConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl EnumTypeConfig {
    /// An enum with bare literal values.
    pub fn new<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(EnumValueConfig::new).collect(),
            ..Self::default()
        }
    }
}

/// One enum value. Deserializes from a bare string or a detailed object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "EnumValueInput")]
pub struct EnumValueConfig {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl EnumValueConfig {
    /// A value with no metadata.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnumValueInput {
    Literal(String),
    #[serde(rename_all = "camelCase")]
    Detailed {
        value: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        deprecation_reason: Option<String>,
        #[serde(default)]
        location: Option<SourceLocation>,
    },
}

impl From<EnumValueInput> for EnumValueConfig {
    fn from(input: EnumValueInput) -> Self {
        match input {
            EnumValueInput::Literal(value) => Self::new(value),
            EnumValueInput::Detailed {
                value,
                description,
                deprecation_reason,
                location,
            } => Self {
                value,
                description,
                deprecation_reason,
                location,
            },
        }
    }
}

/// Custom scalar declaration payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarTypeConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

/// A named permission profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionProfileConfig {
    #[serde(default)]
    pub permissions: Vec<PermissionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

/// One `{roles, access}` rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionConfig {
    #[serde(default)]
    pub roles: Vec<String>,
    pub access: AccessKind,
}

/// Localized labels for one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationConfig {
    pub language: String,
    #[serde(default)]
    pub types: BTreeMap<String, TypeLocalizationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

/// Localized labels for one type, its fields, and (for enums) its values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeLocalizationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, LabelConfig>,
    #[serde(default)]
    pub values: BTreeMap<String, LabelConfig>,
}

/// Label and hint for a field or enum value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ModelConfig {
    /// Append another source to this one.
    ///
    /// Types and localizations are concatenated in source order. Permission
    /// profiles are merged by name; a later source replaces an earlier
    /// profile of the same name.
    pub fn merge(mut self, other: ModelConfig) -> Self {
        self.types.extend(other.types);
        for (name, profile) in other.permission_profiles {
            if self.permission_profiles.insert(name.clone(), profile).is_some() {
                tracing::debug!(profile = %name, "permission profile replaced by later source");
            }
        }
        self.localizations.extend(other.localizations);
        self
    }

    /// Merge several sources in order.
    pub fn merge_all(configs: impl IntoIterator<Item = ModelConfig>) -> Self {
        configs
            .into_iter()
            .fold(ModelConfig::default(), ModelConfig::merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_kind_tagged_types() {
        let json = serde_json::json!({
            "types": [
                {"kind": "ROOT_ENTITY", "name": "Country", "keyFieldName": "isoCode",
                 "fields": [{"name": "isoCode", "typeName": "String"}]},
                {"kind": "VALUE_OBJECT", "name": "Address",
                 "fields": [{"name": "street", "typeName": "String"}]},
                {"kind": "ENUM", "name": "TransportKind", "values": ["AIR", "ROAD"]},
                {"kind": "SCALAR", "name": "Decimal"}
            ]
        });
        let config: ModelConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.types.len(), 4);
        assert_eq!(config.types[0].kind(), TypeKind::RootEntity);
        assert_eq!(config.types[1].kind(), TypeKind::ValueObject);
        assert_eq!(config.types[2].name(), "TransportKind");
        assert_eq!(config.types[3].kind(), TypeKind::Scalar);

        let country = config.types[0].as_object().unwrap();
        assert_eq!(country.key_field_name.as_deref(), Some("isoCode"));
        assert!(!country.fields[0].is_list);
        assert!(!country.fields[0].is_relation);
    }

    #[test]
    fn test_enum_values_accept_literals_and_objects() {
        let json = serde_json::json!({
            "kind": "ENUM",
            "name": "Status",
            "values": [
                "OPEN",
                {"value": "CLOSED", "description": "Done", "deprecationReason": "use DONE"}
            ]
        });
        let config: TypeConfig = serde_json::from_value(json).unwrap();
        let TypeConfig::Enum(e) = config else {
            panic!("expected enum declaration");
        };
        assert_eq!(e.values[0], EnumValueConfig::new("OPEN"));
        assert_eq!(e.values[1].value, "CLOSED");
        assert_eq!(e.values[1].description.as_deref(), Some("Done"));
        assert_eq!(e.values[1].deprecation_reason.as_deref(), Some("use DONE"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = serde_json::json!({"kind": "OBJECT", "name": "X"});
        assert!(serde_json::from_value::<TypeConfig>(json).is_err());
    }

    #[test]
    fn test_permission_profiles_deserialize() {
        let json = serde_json::json!({
            "permissionProfiles": {
                "default": {"permissions": [{"roles": ["accounting"], "access": "readWrite"}]}
            }
        });
        let config: ModelConfig = serde_json::from_value(json).unwrap();
        let profile = &config.permission_profiles["default"];
        assert_eq!(profile.permissions[0].access, AccessKind::ReadWrite);
        assert_eq!(profile.permissions[0].roles, vec!["accounting".to_string()]);
    }

    #[test]
    fn test_merge_concatenates_and_overrides_profiles() {
        let mut a = ModelConfig::default();
        a.types
            .push(TypeConfig::ValueObject(ObjectTypeConfig::new("A", vec![])));
        a.permission_profiles.insert(
            "default".to_string(),
            PermissionProfileConfig::default(),
        );

        let mut b = ModelConfig::default();
        b.types
            .push(TypeConfig::ValueObject(ObjectTypeConfig::new("B", vec![])));
        b.permission_profiles.insert(
            "default".to_string(),
            PermissionProfileConfig {
                permissions: vec![PermissionConfig {
                    roles: vec!["admin".to_string()],
                    access: AccessKind::Read,
                }],
                location: None,
            },
        );

        let merged = ModelConfig::merge_all([a, b]);
        let names: Vec<&str> = merged.types.iter().map(TypeConfig::name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(merged.permission_profiles["default"].permissions.len(), 1);
    }

    #[test]
    fn test_field_builders() {
        let f = FieldConfig::new("shipment", "Shipment")
            .relation()
            .list()
            .inverse_of("deliveries");
        assert!(f.is_relation && f.is_list && !f.is_reference);
        assert_eq!(f.inverse_of_field_name.as_deref(), Some("deliveries"));
    }
}
