//! # tgm-model — Type Graph Model Engine
//!
//! Turns a declarative description of a data domain into a resolved,
//! cross-referenced and validated `Model`, and exposes it through a
//! read-only introspection projection.
//!
//! ## Pipeline
//!
//! 1. **Declarations** (`config`, `loader`): `ModelConfig` from YAML/JSON,
//!    with source locations stamped on every declaration.
//! 2. **Construction** (`model`): built-in scalars, then every declared
//!    type with its fields and enum values. Relations (`relation`) and the
//!    namespace tree (`namespace`) are derived once from the full type set.
//! 3. **Validation** (`validation`): one exhaustive pass producing ordered
//!    `ValidationMessage`s. Errors reject the model; warnings do not.
//! 4. **Introspection** (`introspection`): owned, serializable views.
//!
//! ## Crate Policy
//!
//! - Depends only on `tgm-core` internally.
//! - User mistakes are validation messages, never panics or `Err`s.
//!   `expect_*` accessors panic on programmer misuse only.
//! - A constructed `Model` is immutable and `Send + Sync`.

pub mod config;
pub mod field;
pub mod i18n;
pub mod introspection;
pub mod loader;
pub mod model;
pub mod namespace;
pub mod object_type;
pub mod permission;
pub mod relation;
pub mod types;
pub mod validation;

pub use config::{
    EnumTypeConfig, EnumValueConfig, FieldConfig, LocalizationConfig, ModelConfig, ObjectTypeConfig,
    PermissionProfileConfig, ScalarTypeConfig, TypeConfig,
};
pub use field::{Field, ENTITY_SYSTEM_FIELDS};
pub use i18n::{EnumValueLocalization, FieldLocalization, Localizations, TypeLocalization};
pub use introspection::{Introspection, ModelSnapshot, TypeView};
pub use loader::ConfigError;
pub use model::{Model, ModelError};
pub use namespace::{Namespace, NamespaceTree};
pub use object_type::ObjectTypeBase;
pub use permission::{AccessKind, Permission, PermissionProfile};
pub use relation::Relation;
pub use types::{
    ChildEntityType, EntityExtensionType, EnumType, EnumValue, RootEntityType, ScalarType, Type,
    ValueObjectType, BUILTIN_SCALARS,
};
pub use validation::{Severity, ValidationContext, ValidationMessage, ValidationResult};
