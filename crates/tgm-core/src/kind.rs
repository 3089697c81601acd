//! # Type Kind — Single Source of Truth
//!
//! Defines the `TypeKind` discriminant carried by every declared type.
//! This is the ONE definition used by configuration input, the model, and
//! the introspection projection. Every `match` on `TypeKind` must be
//! exhaustive; adding a kind forces every consumer to handle it at compile
//! time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TgmError;

/// The kind of a declared type.
///
/// | Kind | Has fields | System fields | Description |
/// |------|-----------|---------------|-------------|
/// | Scalar | no | — | Leaf value (built-in or custom) |
/// | Enum | no | — | Closed set of string literals |
/// | RootEntity | yes | `id`, `createdAt`, `updatedAt` | Independently addressable entity |
/// | ChildEntity | yes | `id`, `createdAt`, `updatedAt` | Entity embedded in lists of a parent |
/// | EntityExtension | yes | none | Embedded extension of an entity |
/// | ValueObject | yes | none | Immutable embedded value |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    /// Leaf scalar type.
    Scalar,
    /// Enumeration of string literals.
    Enum,
    /// Top-level entity, optionally with a key field.
    RootEntity,
    /// Entity owned by a root entity, used in lists.
    ChildEntity,
    /// Extension embedded into an entity.
    EntityExtension,
    /// Value object embedded by value.
    ValueObject,
}

/// Total number of type kinds.
pub const TYPE_KIND_COUNT: usize = 6;

impl TypeKind {
    /// Returns all kinds, in declaration order.
    pub fn all() -> &'static [TypeKind; TYPE_KIND_COUNT] {
        &[
            Self::Scalar,
            Self::Enum,
            Self::RootEntity,
            Self::ChildEntity,
            Self::EntityExtension,
            Self::ValueObject,
        ]
    }

    /// Returns the wire identifier for this kind.
    ///
    /// This must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Enum => "ENUM",
            Self::RootEntity => "ROOT_ENTITY",
            Self::ChildEntity => "CHILD_ENTITY",
            Self::EntityExtension => "ENTITY_EXTENSION",
            Self::ValueObject => "VALUE_OBJECT",
        }
    }

    /// Whether types of this kind own a field list.
    pub fn is_object_kind(&self) -> bool {
        matches!(
            self,
            Self::RootEntity | Self::ChildEntity | Self::EntityExtension | Self::ValueObject
        )
    }

    /// Whether types of this kind are leaves (scalars and enums).
    pub fn is_leaf_kind(&self) -> bool {
        !self.is_object_kind()
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeKind {
    type Err = TgmError;

    /// Parse a kind from its wire identifier. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCALAR" => Ok(Self::Scalar),
            "ENUM" => Ok(Self::Enum),
            "ROOT_ENTITY" => Ok(Self::RootEntity),
            "CHILD_ENTITY" => Ok(Self::ChildEntity),
            "ENTITY_EXTENSION" => Ok(Self::EntityExtension),
            "VALUE_OBJECT" => Ok(Self::ValueObject),
            other => Err(TgmError::UnknownTypeKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_count() {
        assert_eq!(TypeKind::all().len(), TYPE_KIND_COUNT);
    }

    #[test]
    fn test_as_str_parses_back() {
        for kind in TypeKind::all() {
            let parsed: TypeKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("root_entity".parse::<TypeKind>().is_err()); // case-sensitive
        assert!("OBJECT".parse::<TypeKind>().is_err());
        assert!("".parse::<TypeKind>().is_err());
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for kind in TypeKind::all() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_object_kinds() {
        let object: Vec<_> = TypeKind::all()
            .iter()
            .filter(|k| k.is_object_kind())
            .collect();
        assert_eq!(object.len(), 4);
        assert!(TypeKind::Scalar.is_leaf_kind());
        assert!(TypeKind::Enum.is_leaf_kind());
        assert!(!TypeKind::ValueObject.is_leaf_kind());
    }
}
