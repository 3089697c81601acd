//! # Types
//!
//! `Type` is the closed set of type variants a model can hold. Scalars and
//! enums are leaves; the four object kinds each wrap an `ObjectTypeBase`
//! and dereference to it, so shared behavior is reached uniformly.
//!
//! ## Built-in Scalars
//!
//! `ID`, `String`, `Boolean`, `Int`, `Float`, `JSON`, `DateTime` exist in
//! every model, in this order, ahead of all user declarations.

use std::collections::HashSet;
use std::ops::Deref;

use tgm_core::{ident, SourceLocation, TypeKind};

use crate::config::{EnumTypeConfig, EnumValueConfig, ObjectTypeConfig, ScalarTypeConfig, TypeConfig};
use crate::field::{Field, ENTITY_SYSTEM_FIELDS};
use crate::i18n::EnumValueLocalization;
use crate::model::Model;
use crate::object_type::ObjectTypeBase;
use crate::permission::{PermissionProfile, DEFAULT_PERMISSION_PROFILE};
use crate::validation::ValidationContext;

/// Names of the built-in scalars, in enumeration order.
pub const BUILTIN_SCALARS: [&str; 7] = ["ID", "String", "Boolean", "Int", "Float", "JSON", "DateTime"];

/// Whether `name` is one of the built-in scalars.
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

pub(crate) fn validate_type_name(name: &str, loc: Option<&SourceLocation>, ctx: &mut ValidationContext) {
    if name.is_empty() {
        ctx.error("Type name is empty.", loc);
    } else if !ident::is_valid_identifier(name) {
        ctx.error(format!("Type name \"{name}\" is not a valid identifier."), loc);
    } else if !ident::starts_uppercase(name) {
        ctx.warn("Type names should start with an uppercase character.", loc);
    }
}

// ─── Scalars ─────────────────────────────────────────────────────────

/// A leaf type holding an atomic value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarType {
    name: String,
    description: Option<String>,
    is_built_in: bool,
    location: Option<SourceLocation>,
}

impl ScalarType {
    pub(crate) fn built_in(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            is_built_in: true,
            location: None,
        }
    }

    pub(crate) fn from_config(config: ScalarTypeConfig) -> Self {
        Self {
            name: config.name,
            description: config.description,
            is_built_in: false,
            location: config.location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_built_in(&self) -> bool {
        self.is_built_in
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    fn validate(&self, ctx: &mut ValidationContext) {
        if !self.is_built_in {
            validate_type_name(&self.name, self.location.as_ref(), ctx);
        }
    }
}

// ─── Enums ───────────────────────────────────────────────────────────

/// A leaf type with a closed, ordered set of literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    description: Option<String>,
    values: Vec<EnumValue>,
    location: Option<SourceLocation>,
}

impl EnumType {
    pub(crate) fn from_config(config: EnumTypeConfig) -> Self {
        let name = config.name;
        let values = config
            .values
            .into_iter()
            .map(|v| EnumValue::from_config(v, &name))
            .collect();
        Self {
            name,
            description: config.description,
            values,
            location: config.location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Values in declaration order.
    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    pub fn value(&self, literal: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.value == literal)
    }

    fn validate(&self, ctx: &mut ValidationContext) {
        let loc = self.location.as_ref();
        validate_type_name(&self.name, loc, ctx);

        if self.values.is_empty() {
            ctx.error(
                format!("Enum type \"{}\" does not declare any values.", self.name),
                loc,
            );
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for value in &self.values {
            if !seen.insert(&value.value) {
                ctx.error(
                    format!("Duplicate enum value: \"{}\".", value.value),
                    value.location.as_ref().or(loc),
                );
                continue;
            }
            value.validate(ctx);
        }
    }
}

/// One literal of an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    value: String,
    declaring_type: String,
    description: Option<String>,
    deprecation_reason: Option<String>,
    location: Option<SourceLocation>,
}

impl EnumValue {
    fn from_config(config: EnumValueConfig, declaring_type: &str) -> Self {
        Self {
            value: config.value,
            declaring_type: declaring_type.to_string(),
            description: config.description,
            deprecation_reason: config.deprecation_reason,
            location: config.location,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn declaring_type_name(&self) -> &str {
        &self.declaring_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation_reason.as_deref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason.is_some()
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Localized label and hint, resolved through `resolution_order`.
    pub fn localization(&self, model: &Model, resolution_order: &[&str]) -> EnumValueLocalization {
        model
            .localizations()
            .enum_value_localization(&self.declaring_type, &self.value, resolution_order)
    }

    fn validate(&self, ctx: &mut ValidationContext) {
        let loc = self.location.as_ref();
        if ident::is_reserved_enum_literal(&self.value) {
            ctx.error(format!("Enums cannot define value \"{}\".", self.value), loc);
            return;
        }
        if !ident::is_valid_identifier(&self.value) {
            ctx.error(
                format!("Enum value \"{}\" is not a valid identifier.", self.value),
                loc,
            );
            return;
        }
        if !ident::is_upper_case(&self.value) {
            ctx.warn("Enum values should be UPPER_CASE.", loc);
        }
    }
}

// ─── Object Kinds ────────────────────────────────────────────────────

macro_rules! object_kind {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            base: ObjectTypeBase,
        }

        impl Deref for $name {
            type Target = ObjectTypeBase;

            fn deref(&self) -> &ObjectTypeBase {
                &self.base
            }
        }

        impl AsRef<ObjectTypeBase> for $name {
            fn as_ref(&self) -> &ObjectTypeBase {
                &self.base
            }
        }
    };
}

object_kind!(
    /// A top-level, independently addressable object type.
    RootEntityType
);
object_kind!(
    /// An object type embedded in lists of a parent, with its own identity.
    ChildEntityType
);
object_kind!(
    /// An object type embedded single-valued, extending its parent.
    EntityExtensionType
);
object_kind!(
    /// An identity-less, structurally compared object type.
    ValueObjectType
);

impl RootEntityType {
    fn new(config: ObjectTypeConfig) -> Self {
        Self {
            base: ObjectTypeBase::new(TypeKind::RootEntity, config, &ENTITY_SYSTEM_FIELDS),
        }
    }

    pub fn key_field_name(&self) -> Option<&str> {
        self.base.declared_key_field_name()
    }

    /// The key field, if declared and present.
    pub fn key_field(&self) -> Option<&Field> {
        self.key_field_name().and_then(|name| self.base.field(name))
    }

    /// The explicitly named permission profile, if any.
    pub fn permission_profile_name(&self) -> Option<&str> {
        self.base.declared_permission_profile()
    }

    /// The effective permission profile: the named one, else `default`.
    pub fn permission_profile<'m>(&self, model: &'m Model) -> Option<&'m PermissionProfile> {
        let name = self
            .permission_profile_name()
            .unwrap_or(DEFAULT_PERMISSION_PROFILE);
        model.get_permission_profile(name)
    }

    fn validate(&self, model: &Model, ctx: &mut ValidationContext) {
        self.base.validate(model, ctx);
        let loc = self.base.location();

        if let Some(key) = self.key_field_name() {
            match self.base.field(key) {
                None => ctx.error(
                    format!(
                        "Field \"{key}\" does not exist on type \"{}\" and cannot be used as key field.",
                        self.name()
                    ),
                    loc,
                ),
                Some(field) => {
                    if field.is_list() {
                        ctx.error(
                            format!(
                                "List field \"{}\" cannot be used as key field.",
                                field.qualified_name()
                            ),
                            loc,
                        );
                    }
                    // An unresolved type is already reported by the field itself.
                    if let Some(ty) = field.resolve_type(model) {
                        if !ty.kind().is_leaf_kind() {
                            ctx.error(
                                format!(
                                    "Field \"{}\" has type \"{}\" and cannot be used as key field; only scalar and enum fields can be keys.",
                                    field.qualified_name(),
                                    ty.name()
                                ),
                                loc,
                            );
                        }
                    }
                }
            }
        }

        if let Some(profile) = self.permission_profile_name() {
            if model.get_permission_profile(profile).is_none() {
                ctx.error(format!("Permission profile \"{profile}\" not found."), loc);
            }
        }
    }
}

impl ChildEntityType {
    fn new(config: ObjectTypeConfig) -> Self {
        Self {
            base: ObjectTypeBase::new(TypeKind::ChildEntity, config, &ENTITY_SYSTEM_FIELDS),
        }
    }
}

impl EntityExtensionType {
    fn new(config: ObjectTypeConfig) -> Self {
        Self {
            base: ObjectTypeBase::new(TypeKind::EntityExtension, config, &[]),
        }
    }
}

impl ValueObjectType {
    fn new(config: ObjectTypeConfig) -> Self {
        Self {
            base: ObjectTypeBase::new(TypeKind::ValueObject, config, &[]),
        }
    }
}

// ─── Type ────────────────────────────────────────────────────────────

/// Any type of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Scalar(ScalarType),
    Enum(EnumType),
    RootEntity(RootEntityType),
    ChildEntity(ChildEntityType),
    EntityExtension(EntityExtensionType),
    ValueObject(ValueObjectType),
}

impl Type {
    pub(crate) fn from_config(config: TypeConfig) -> Self {
        match config {
            TypeConfig::RootEntity(c) => Self::RootEntity(RootEntityType::new(c)),
            TypeConfig::ChildEntity(c) => Self::ChildEntity(ChildEntityType::new(c)),
            TypeConfig::EntityExtension(c) => Self::EntityExtension(EntityExtensionType::new(c)),
            TypeConfig::ValueObject(c) => Self::ValueObject(ValueObjectType::new(c)),
            TypeConfig::Enum(c) => Self::Enum(EnumType::from_config(c)),
            TypeConfig::Scalar(c) => Self::Scalar(ScalarType::from_config(c)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(t) => t.name(),
            Self::Enum(t) => t.name(),
            Self::RootEntity(t) => t.name(),
            Self::ChildEntity(t) => t.name(),
            Self::EntityExtension(t) => t.name(),
            Self::ValueObject(t) => t.name(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Enum(_) => TypeKind::Enum,
            Self::RootEntity(_) => TypeKind::RootEntity,
            Self::ChildEntity(_) => TypeKind::ChildEntity,
            Self::EntityExtension(_) => TypeKind::EntityExtension,
            Self::ValueObject(_) => TypeKind::ValueObject,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(t) => t.description(),
            Self::Enum(t) => t.description(),
            _ => self.as_object().and_then(ObjectTypeBase::description),
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Scalar(t) => t.location(),
            Self::Enum(t) => t.location(),
            _ => self.as_object().and_then(ObjectTypeBase::location),
        }
    }

    pub fn is_object_type(&self) -> bool {
        self.kind().is_object_kind()
    }

    /// True only for the framework-provided scalars.
    pub fn is_built_in(&self) -> bool {
        matches!(self, Self::Scalar(s) if s.is_built_in())
    }

    /// The shared object base, for the four object kinds.
    pub fn as_object(&self) -> Option<&ObjectTypeBase> {
        match self {
            Self::RootEntity(t) => Some(&t.base),
            Self::ChildEntity(t) => Some(&t.base),
            Self::EntityExtension(t) => Some(&t.base),
            Self::ValueObject(t) => Some(&t.base),
            Self::Scalar(_) | Self::Enum(_) => None,
        }
    }

    pub fn as_root_entity(&self) -> Option<&RootEntityType> {
        match self {
            Self::RootEntity(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_child_entity(&self) -> Option<&ChildEntityType> {
        match self {
            Self::ChildEntity(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_entity_extension(&self) -> Option<&EntityExtensionType> {
        match self {
            Self::EntityExtension(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_value_object(&self) -> Option<&ValueObjectType> {
        match self {
            Self::ValueObject(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            Self::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match self {
            Self::Scalar(t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn validate(&self, model: &Model, ctx: &mut ValidationContext) {
        match self {
            Self::Scalar(t) => t.validate(ctx),
            Self::Enum(t) => t.validate(ctx),
            Self::RootEntity(t) => t.validate(model, ctx),
            Self::ChildEntity(t) => t.base.validate(model, ctx),
            Self::EntityExtension(t) => t.base.validate(model, ctx),
            Self::ValueObject(t) => t.base.validate(model, ctx),
        }
    }
}
