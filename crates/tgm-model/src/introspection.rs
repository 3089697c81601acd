//! # Introspection Projection
//!
//! A read-only, serializable view of a finished `Model` for external
//! tooling (schema generators, admin UIs, the `tgm inspect` command).
//! Views are owned values independent of the internal types; every query
//! is pure, so asking twice yields structurally equal results.
//!
//! JSON keys are camelCase. Types are tagged by `kind`:
//!
//! ```json
//! {"kind": "ROOT_ENTITY", "name": "Country", "keyField": "isoCode",
//!  "namespacePath": ["generic"], "fields": [ ... ]}
//! ```

use serde::{Deserialize, Serialize};
use tgm_core::TypeKind;

use crate::field::Field;
use crate::model::Model;
use crate::namespace::Namespace;
use crate::object_type::ObjectTypeBase;
use crate::relation::Relation;
use crate::types::{EnumType, RootEntityType, ScalarType, Type};

// ─── Views ───────────────────────────────────────────────────────────

/// Any type, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeView {
    Scalar(ScalarTypeView),
    Enum(EnumTypeView),
    RootEntity(RootEntityTypeView),
    ChildEntity(ObjectTypeView),
    EntityExtension(ObjectTypeView),
    ValueObject(ObjectTypeView),
}

impl TypeView {
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(v) => &v.name,
            Self::Enum(v) => &v.name,
            Self::RootEntity(v) => &v.object.name,
            Self::ChildEntity(v) | Self::EntityExtension(v) | Self::ValueObject(v) => &v.name,
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

    /// The object part, for the four object kinds.
    pub fn as_object(&self) -> Option<&ObjectTypeView> {
        match self {
            Self::RootEntity(v) => Some(&v.object),
            Self::ChildEntity(v) | Self::EntityExtension(v) | Self::ValueObject(v) => Some(v),
            Self::Scalar(_) | Self::Enum(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarTypeView {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_built_in: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumTypeView {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub values: Vec<EnumValueView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueView {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

/// Fields shared by every object kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeView {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub namespace_path: Vec<String>,
    pub fields: Vec<FieldView>,
}

/// A root entity: the object part plus its key field (`null` when none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootEntityTypeView {
    #[serde(flatten)]
    pub object: ObjectTypeView,
    pub key_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub name: String,
    pub type_name: String,
    /// Kind of the resolved type; `None` when the type name is unresolved.
    pub type_kind: Option<TypeKind>,
    pub is_list: bool,
    pub is_reference: bool,
    pub is_relation: bool,
    pub is_system_field: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_of_field_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationView {
    pub from_type: String,
    pub from_field: String,
    pub to_type: String,
    pub to_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceView {
    pub name: Option<String>,
    pub path: Vec<String>,
    pub is_root: bool,
}

/// Everything at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSnapshot {
    pub types: Vec<TypeView>,
    pub relations: Vec<RelationView>,
    pub namespaces: Vec<NamespaceView>,
}

// ─── Queries ─────────────────────────────────────────────────────────

/// Query surface over one model.
#[derive(Debug, Clone, Copy)]
pub struct Introspection<'m> {
    model: &'m Model,
}

impl<'m> Introspection<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self { model }
    }

    /// All types in model order.
    pub fn types(&self) -> Vec<TypeView> {
        self.model.types().iter().map(|t| self.type_view(t)).collect()
    }

    pub fn types_of_kind(&self, kind: TypeKind) -> Vec<TypeView> {
        self.model
            .types_of_kind(kind)
            .map(|t| self.type_view(t))
            .collect()
    }

    pub fn root_entity_types(&self) -> Vec<TypeView> {
        self.types_of_kind(TypeKind::RootEntity)
    }

    pub fn child_entity_types(&self) -> Vec<TypeView> {
        self.types_of_kind(TypeKind::ChildEntity)
    }

    pub fn entity_extension_types(&self) -> Vec<TypeView> {
        self.types_of_kind(TypeKind::EntityExtension)
    }

    pub fn value_object_types(&self) -> Vec<TypeView> {
        self.types_of_kind(TypeKind::ValueObject)
    }

    pub fn scalar_types(&self) -> Vec<TypeView> {
        self.types_of_kind(TypeKind::Scalar)
    }

    pub fn enum_types(&self) -> Vec<TypeView> {
        self.types_of_kind(TypeKind::Enum)
    }

    pub fn type_by_name(&self, name: &str) -> Option<TypeView> {
        self.model.get_type(name).map(|t| self.type_view(t))
    }

    /// Relations touching `type_name` on either side. `None` for unknown
    /// names and for scalar or enum types.
    pub fn relations(&self, type_name: &str) -> Option<Vec<RelationView>> {
        self.model.get_object_type(type_name)?;
        Some(
            self.model
                .relations_of(type_name)
                .map(relation_view)
                .collect(),
        )
    }

    /// All relations of the model.
    pub fn all_relations(&self) -> Vec<RelationView> {
        self.model.relations().iter().map(relation_view).collect()
    }

    /// All namespaces, root first.
    pub fn namespaces(&self) -> Vec<NamespaceView> {
        self.model
            .namespaces()
            .namespaces()
            .map(namespace_view)
            .collect()
    }

    /// Exact-path lookup; `None` for unknown paths.
    pub fn namespace<S: AsRef<str>>(&self, path: &[S]) -> Option<NamespaceView> {
        self.model.get_namespace(path).map(namespace_view)
    }

    pub fn enum_type(&self, name: &str) -> Option<EnumTypeView> {
        self.model.get_enum_type(name).map(enum_view)
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            types: self.types(),
            relations: self.all_relations(),
            namespaces: self.namespaces(),
        }
    }

    fn type_view(&self, ty: &Type) -> TypeView {
        match ty {
            Type::Scalar(s) => TypeView::Scalar(scalar_view(s)),
            Type::Enum(e) => TypeView::Enum(enum_view(e)),
            Type::RootEntity(r) => TypeView::RootEntity(self.root_entity_view(r)),
            Type::ChildEntity(c) => TypeView::ChildEntity(self.object_view(c)),
            Type::EntityExtension(e) => TypeView::EntityExtension(self.object_view(e)),
            Type::ValueObject(v) => TypeView::ValueObject(self.object_view(v)),
        }
    }

    fn root_entity_view(&self, root: &RootEntityType) -> RootEntityTypeView {
        RootEntityTypeView {
            object: self.object_view(root),
            key_field: root.key_field().map(|f| f.name().to_string()),
        }
    }

    fn object_view(&self, object: &ObjectTypeBase) -> ObjectTypeView {
        ObjectTypeView {
            name: object.name().to_string(),
            description: object.description().map(str::to_string),
            namespace_path: object.namespace_path().to_vec(),
            fields: object.fields().iter().map(|f| self.field_view(f)).collect(),
        }
    }

    fn field_view(&self, field: &Field) -> FieldView {
        FieldView {
            name: field.name().to_string(),
            type_name: field.type_name().to_string(),
            type_kind: field.resolve_type(self.model).map(Type::kind),
            is_list: field.is_list(),
            is_reference: field.is_reference(),
            is_relation: field.is_relation(),
            is_system_field: field.is_system_field(),
            inverse_of_field_name: field.inverse_of_field_name().map(str::to_string),
        }
    }
}

fn scalar_view(scalar: &ScalarType) -> ScalarTypeView {
    ScalarTypeView {
        name: scalar.name().to_string(),
        description: scalar.description().map(str::to_string),
        is_built_in: scalar.is_built_in(),
    }
}

fn enum_view(e: &EnumType) -> EnumTypeView {
    EnumTypeView {
        name: e.name().to_string(),
        description: e.description().map(str::to_string),
        values: e
            .values()
            .iter()
            .map(|v| EnumValueView {
                value: v.value().to_string(),
                description: v.description().map(str::to_string),
                deprecation_reason: v.deprecation_reason().map(str::to_string),
            })
            .collect(),
    }
}

fn relation_view(relation: &Relation) -> RelationView {
    RelationView {
        from_type: relation.from_type_name().to_string(),
        from_field: relation.from_field_name().to_string(),
        to_type: relation.to_type_name().to_string(),
        to_field: relation.to_field_name().map(str::to_string),
    }
}

fn namespace_view(namespace: &Namespace) -> NamespaceView {
    NamespaceView {
        name: namespace.name().map(str::to_string),
        path: namespace.path().to_vec(),
        is_root: namespace.is_root(),
    }
}
