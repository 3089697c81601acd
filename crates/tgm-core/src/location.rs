//! # Source Locations
//!
//! A `SourceLocation` points back at the declaration a diagnostic is about.
//! Loaders fill in `source` and `pointer` (a JSON pointer into the
//! declaration document, e.g. `/types/2/fields/0`); callers that parse
//! their own formats may also supply line and column.

use serde::{Deserialize, Serialize};

/// Where a declaration came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    /// File name or other source identifier.
    pub source: String,
    /// JSON pointer into the source document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// One-based line number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// One-based column number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl SourceLocation {
    /// A location naming only the source.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Attach a JSON pointer.
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    /// Attach a line and column.
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column, &self.pointer) {
            (Some(line), Some(column), _) => write!(f, "{}:{line}:{column}", self.source),
            (Some(line), None, _) => write!(f, "{}:{line}", self.source),
            (None, _, Some(pointer)) => write!(f, "{}#{pointer}", self.source),
            (None, _, None) => f.write_str(&self.source),
        }
    }
}
