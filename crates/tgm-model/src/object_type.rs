//! # Object Type Family
//!
//! `ObjectTypeBase` holds everything the four object kinds (root entity,
//! child entity, entity extension, value object) have in common: the
//! authoritative field list, the namespace path, and the per-type structural
//! rules. Each kind composes one and adds its own extras.
//!
//! ## Field Order
//!
//! `fields()` is system fields first, in the fixed blueprint order, then
//! user fields in declaration order. Consumers rely on this order.

use std::collections::HashMap;

use tgm_core::{ident, SourceLocation, TypeKind};

use crate::config::ObjectTypeConfig;
use crate::field::{Field, SystemFieldSpec};
use crate::model::Model;
use crate::types::validate_type_name;
use crate::validation::ValidationContext;

/// Shared state and behavior of object types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTypeBase {
    name: String,
    kind: TypeKind,
    description: Option<String>,
    namespace_path: Vec<String>,
    fields: Vec<Field>,
    declared_key_field_name: Option<String>,
    declared_permission_profile: Option<String>,
    location: Option<SourceLocation>,
}

impl ObjectTypeBase {
    pub(crate) fn new(
        kind: TypeKind,
        config: ObjectTypeConfig,
        system_fields: &[SystemFieldSpec],
    ) -> Self {
        let name = config.name;
        let fields = system_fields
            .iter()
            .map(|spec| Field::system(*spec, &name))
            .chain(
                config
                    .fields
                    .into_iter()
                    .map(|field| Field::from_config(field, &name)),
            )
            .collect();

        Self {
            name,
            kind,
            description: config.description,
            namespace_path: config.namespace_path,
            fields,
            declared_key_field_name: config.key_field_name,
            declared_permission_profile: config.permission_profile,
            location: config.location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Namespace path segments; empty for the root namespace.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace_path
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// System fields then user fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn system_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_system_field())
    }

    pub fn user_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_system_field())
    }

    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    /// Look up a field by name. With duplicate names the first one in
    /// `fields()` order wins, so system fields shadow user fields.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Look up a field that the caller knows exists.
    ///
    /// # Panics
    ///
    /// Panics if the field is not declared. Only call this with names taken
    /// from the model itself (relations, validated key fields).
    pub fn expect_field(&self, name: &str) -> &Field {
        match self.field(name) {
            Some(field) => field,
            None => panic!("field \"{}.{name}\" is not declared", self.name),
        }
    }

    pub(crate) fn declared_key_field_name(&self) -> Option<&str> {
        self.declared_key_field_name.as_deref()
    }

    pub(crate) fn declared_permission_profile(&self) -> Option<&str> {
        self.declared_permission_profile.as_deref()
    }

    pub(crate) fn validate(&self, model: &Model, ctx: &mut ValidationContext) {
        let loc = self.location.as_ref();
        validate_type_name(&self.name, loc, ctx);

        for segment in &self.namespace_path {
            if !ident::is_valid_identifier(segment) {
                ctx.error(
                    format!(
                        "Namespace segment \"{segment}\" of type \"{}\" is not a valid identifier.",
                        self.name
                    ),
                    loc,
                );
            }
        }

        if self.kind != TypeKind::RootEntity {
            if self.declared_key_field_name.is_some() {
                ctx.error(
                    format!(
                        "Type \"{}\" declares a key field, but key fields can only be declared on root entity types.",
                        self.name
                    ),
                    loc,
                );
            }
            if self.declared_permission_profile.is_some() {
                ctx.error(
                    format!(
                        "Type \"{}\" declares a permission profile, but permissions can only be declared on root entity types.",
                        self.name
                    ),
                    loc,
                );
            }
        }

        if self.user_fields().next().is_none() {
            ctx.error(
                format!("Object type \"{}\" does not declare any fields.", self.name),
                loc,
            );
        }

        self.validate_duplicate_fields(ctx);

        for field in &self.fields {
            field.validate(model, ctx);
        }
    }

    fn validate_duplicate_fields(&self, ctx: &mut ValidationContext) {
        // Groups in order of first appearance.
        let mut groups: Vec<Vec<&Field>> = Vec::new();
        let mut group_of: HashMap<&str, usize> = HashMap::new();
        for field in &self.fields {
            match group_of.get(field.name()) {
                Some(&index) => groups[index].push(field),
                None => {
                    group_of.insert(field.name(), groups.len());
                    groups.push(vec![field]);
                }
            }
        }

        for group in groups.iter().filter(|g| g.len() > 1) {
            let system_collision = group.iter().any(|f| f.is_system_field());
            for field in group {
                // The user never wrote system fields, so they are never the offender.
                if field.is_system_field() {
                    continue;
                }
                if system_collision {
                    ctx.error(
                        format!(
                            "Field name \"{}\" is reserved by a system field.",
                            field.name()
                        ),
                        field.location(),
                    );
                } else {
                    ctx.error(
                        format!("Duplicate field name: \"{}\".", field.name()),
                        field.location(),
                    );
                }
            }
        }
    }
}
