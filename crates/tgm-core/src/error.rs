//! # Error Types
//!
//! Errors shared across the workspace. Structural problems in a model
//! declaration are never reported through these types; they are collected
//! as validation messages by `tgm-model`, and document loading has its own
//! `ConfigError` there. What remains here is input that cannot be
//! interpreted at all.

use thiserror::Error;

/// Top-level error type for the type graph model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TgmError {
    /// A type kind string did not match any known discriminant.
    #[error("unknown type kind: {0:?}")]
    UnknownTypeKind(String),
}
