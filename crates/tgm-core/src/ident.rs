//! # Identifier Rules
//!
//! Naming checks shared by type, field, namespace and enum validation.
//! Hard rules (`is_valid_identifier`, `is_reserved_enum_literal`) produce
//! errors; casing conventions produce warnings.

/// Literals that cannot be used as enum values.
pub const RESERVED_ENUM_LITERALS: [&str; 3] = ["true", "false", "null"];

/// Whether `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether the first character is an ASCII upper-case letter.
pub fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Whether the first character is an ASCII lower-case letter.
pub fn starts_lowercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

/// Whether the value is unchanged by upper-casing (`AIR`, `IN_TRANSIT`, `V2`).
pub fn is_upper_case(value: &str) -> bool {
    value.to_uppercase() == value
}

/// Whether `value` is one of [`RESERVED_ENUM_LITERALS`].
pub fn is_reserved_enum_literal(value: &str) -> bool {
    RESERVED_ENUM_LITERALS.contains(&value)
}
