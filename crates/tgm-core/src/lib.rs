//! # tgm-core — Foundational Types for the Type Graph Model
//!
//! This crate is the leaf of the workspace. It defines the small set of
//! primitives every other crate agrees on: the discriminant that tags each
//! declared type, the source location attached to diagnostics, and the
//! identifier rules used by validation.
//!
//! ## Key Design Principles
//!
//! 1. **Single `TypeKind` enum.** One definition, six variants, exhaustive
//!    `match` everywhere. The wire strings (`ROOT_ENTITY`, `ENUM`, ...) are
//!    shared by configuration input and introspection output.
//!
//! 2. **Locations are data, not strings.** `SourceLocation` keeps the file,
//!    the JSON pointer into the declaration document, and an optional
//!    line/column so tooling can jump to the declaration.
//!
//! 3. **Naming rules live in one place.** `ident` is consulted by type,
//!    field, namespace and enum validation alike.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tgm-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod ident;
pub mod kind;
pub mod location;

// Re-export primary types for ergonomic imports.
pub use error::TgmError;
pub use kind::{TypeKind, TYPE_KIND_COUNT};
pub use location::SourceLocation;
