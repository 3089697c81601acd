//! # Fields
//!
//! A `Field` is one attribute of an object type, either declared by the
//! user or synthesized by the framework (`id`, `createdAt`, `updatedAt`).
//!
//! Fields never hold references to other types. The declared type name is
//! resolved against the owning `Model` on demand, so an unresolvable name
//! is a validation message rather than a construction failure.

use tgm_core::{ident, SourceLocation, TypeKind};

use crate::config::FieldConfig;
use crate::i18n::FieldLocalization;
use crate::model::Model;
use crate::object_type::ObjectTypeBase;
use crate::types::Type;
use crate::validation::ValidationContext;

/// Blueprint of a framework-synthesized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemFieldSpec {
    pub name: &'static str,
    pub type_name: &'static str,
}

/// System fields of root and child entities, in their fixed order.
pub const ENTITY_SYSTEM_FIELDS: [SystemFieldSpec; 3] = [
    SystemFieldSpec {
        name: "id",
        type_name: "ID",
    },
    SystemFieldSpec {
        name: "createdAt",
        type_name: "DateTime",
    },
    SystemFieldSpec {
        name: "updatedAt",
        type_name: "DateTime",
    },
];

/// One attribute of an object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    type_name: String,
    declaring_type: String,
    is_list: bool,
    is_reference: bool,
    is_relation: bool,
    inverse_of_field_name: Option<String>,
    is_system_field: bool,
    description: Option<String>,
    location: Option<SourceLocation>,
}

impl Field {
    pub(crate) fn from_config(config: FieldConfig, declaring_type: &str) -> Self {
        Self {
            name: config.name,
            type_name: config.type_name,
            declaring_type: declaring_type.to_string(),
            is_list: config.is_list,
            is_reference: config.is_reference,
            is_relation: config.is_relation,
            inverse_of_field_name: config.inverse_of_field_name,
            is_system_field: false,
            description: config.description,
            location: config.location,
        }
    }

    pub(crate) fn system(spec: SystemFieldSpec, declaring_type: &str) -> Self {
        Self {
            name: spec.name.to_string(),
            type_name: spec.type_name.to_string(),
            declaring_type: declaring_type.to_string(),
            is_list: false,
            is_reference: false,
            is_relation: false,
            inverse_of_field_name: None,
            is_system_field: true,
            description: None,
            location: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared (unresolved) type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Name of the object type that owns this field.
    pub fn declaring_type_name(&self) -> &str {
        &self.declaring_type
    }

    /// `Type.field`, as used in diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring_type, self.name)
    }

    pub fn is_list(&self) -> bool {
        self.is_list
    }

    pub fn is_reference(&self) -> bool {
        self.is_reference
    }

    pub fn is_relation(&self) -> bool {
        self.is_relation
    }

    pub fn inverse_of_field_name(&self) -> Option<&str> {
        self.inverse_of_field_name.as_deref()
    }

    pub fn is_system_field(&self) -> bool {
        self.is_system_field
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Resolve the declared type name against `model`.
    pub fn resolve_type<'m>(&self, model: &'m Model) -> Option<&'m Type> {
        model.get_type(&self.type_name)
    }

    /// Localized label and hint, resolved through `resolution_order`.
    pub fn localization(&self, model: &Model, resolution_order: &[&str]) -> FieldLocalization {
        model
            .localizations()
            .field_localization(&self.declaring_type, &self.name, resolution_order)
    }

    /// Relation fields on `target` that declare themselves the inverse of
    /// this field and point back at this field's declaring type.
    pub(crate) fn inverse_fields_on<'a>(
        &'a self,
        target: &'a ObjectTypeBase,
    ) -> impl Iterator<Item = &'a Field> + 'a {
        target.fields().iter().filter(move |candidate| {
            candidate.is_relation
                && candidate.inverse_of_field_name.as_deref() == Some(self.name.as_str())
                && candidate.type_name == self.declaring_type
                && !(candidate.declaring_type == self.declaring_type
                    && candidate.name == self.name)
        })
    }

    pub(crate) fn validate(&self, model: &Model, ctx: &mut ValidationContext) {
        // System fields are synthesized from fixed blueprints.
        if self.is_system_field {
            return;
        }
        let loc = self.location.as_ref();

        if !ident::is_valid_identifier(&self.name) {
            ctx.error(
                format!("Field name \"{}\" is not a valid identifier.", self.name),
                loc,
            );
        } else if !ident::starts_lowercase(&self.name) {
            ctx.warn("Field names should start with a lowercase character.", loc);
        }

        let target = self.resolve_type(model);
        if target.is_none() {
            ctx.error(format!("Type \"{}\" not found.", self.type_name), loc);
        }

        if self.is_relation && self.is_reference {
            ctx.error(
                format!(
                    "Field \"{}\" cannot be both a relation and a reference.",
                    self.qualified_name()
                ),
                loc,
            );
        }
        if self.inverse_of_field_name.is_some() && !self.is_relation {
            ctx.error(
                "inverseOfFieldName can only be used on relation fields.",
                loc,
            );
        }

        // Everything below depends on the resolved type.
        let Some(target) = target else {
            return;
        };

        if self.is_relation {
            self.validate_relation(model, target, ctx);
        } else if self.is_reference {
            self.validate_reference(target, ctx);
        } else {
            self.validate_embedded(target, ctx);
        }
    }

    fn validate_relation(&self, model: &Model, target: &Type, ctx: &mut ValidationContext) {
        let loc = self.location.as_ref();

        let declared_on_root = model
            .get_type(&self.declaring_type)
            .is_some_and(|t| t.kind() == TypeKind::RootEntity);
        if !declared_on_root {
            ctx.error(
                "Relations can only be defined on root entity types. Consider using a reference instead.",
                loc,
            );
        }

        let Some(target_root) = target.as_root_entity() else {
            ctx.error(
                format!(
                    "Type \"{}\" cannot be used as a relation target because it is not a root entity type.",
                    target.name()
                ),
                loc,
            );
            return;
        };

        match &self.inverse_of_field_name {
            Some(inverse) => self.validate_inverse(target_root, inverse, ctx),
            None => self.validate_forward(target_root, ctx),
        }
    }

    fn validate_inverse(&self, target: &ObjectTypeBase, inverse: &str, ctx: &mut ValidationContext) {
        let loc = self.location.as_ref();
        let inverse_name = format!("{}.{}", target.name(), inverse);
        let this = self.qualified_name();

        let Some(other) = target.field(inverse) else {
            ctx.error(
                format!("Field \"{inverse_name}\" used as inverse field of \"{this}\" does not exist."),
                loc,
            );
            return;
        };
        if !other.is_relation {
            ctx.error(
                format!(
                    "Field \"{inverse_name}\" used as inverse field of \"{this}\" is not a relation field."
                ),
                loc,
            );
            return;
        }
        if other.type_name != self.declaring_type {
            ctx.error(
                format!(
                    "Field \"{inverse_name}\" used as inverse field of \"{this}\" has type \"{}\" but should be of type \"{}\".",
                    other.type_name, self.declaring_type
                ),
                loc,
            );
            return;
        }
        if other.inverse_of_field_name.is_some() {
            ctx.error(
                format!(
                    "Field \"{inverse_name}\" used as inverse field of \"{this}\" is itself declared as an inverse field."
                ),
                loc,
            );
        }
    }

    fn validate_forward(&self, target: &ObjectTypeBase, ctx: &mut ValidationContext) {
        let inverses: Vec<&Field> = self.inverse_fields_on(target).collect();
        if inverses.len() > 1 {
            let names = inverses
                .iter()
                .map(|f| format!("\"{}\"", f.qualified_name()))
                .collect::<Vec<_>>()
                .join(", ");
            ctx.error(
                format!(
                    "Multiple fields ({names}) declare inverseOfFieldName \"{}\" for field \"{}\".",
                    self.name,
                    self.qualified_name()
                ),
                self.location.as_ref(),
            );
        }
    }

    fn validate_reference(&self, target: &Type, ctx: &mut ValidationContext) {
        let loc = self.location.as_ref();
        let Some(root) = target.as_root_entity() else {
            ctx.error(
                format!(
                    "Type \"{}\" cannot be used as a reference target because it is not a root entity type.",
                    target.name()
                ),
                loc,
            );
            return;
        };
        if root.key_field_name().is_none() {
            ctx.warn(
                format!(
                    "Type \"{}\" does not declare a key field; references to it use the \"id\" field.",
                    root.name()
                ),
                loc,
            );
        }
    }

    fn validate_embedded(&self, target: &Type, ctx: &mut ValidationContext) {
        let loc = self.location.as_ref();
        match target.kind() {
            TypeKind::RootEntity => ctx.error(
                format!(
                    "Type \"{}\" is a root entity type and cannot be embedded. Declare the field as a relation or a reference.",
                    target.name()
                ),
                loc,
            ),
            TypeKind::ChildEntity if !self.is_list => ctx.error(
                format!(
                    "Type \"{}\" is a child entity type and can only be used in lists.",
                    target.name()
                ),
                loc,
            ),
            TypeKind::EntityExtension if self.is_list => ctx.error(
                format!(
                    "Type \"{}\" is an entity extension type and cannot be used in lists.",
                    target.name()
                ),
                loc,
            ),
            _ => {}
        }
    }
}
