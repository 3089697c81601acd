//! # Validation Messages
//!
//! The single channel for reporting structural problems in a model.
//!
//! A `ValidationContext` is created per validation pass and passed
//! explicitly down the call chain. It only appends; nothing in a pass can
//! fail early, so one pass surfaces every problem in the model. The pass
//! ends by turning the context into a `ValidationResult`.
//!
//! Severity semantics: any `Error` makes the model unacceptable to
//! downstream consumers; `Warning`s never block acceptance.

use std::fmt;

use serde::{Deserialize, Serialize};
use tgm_core::SourceLocation;

/// How serious a validation message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The model must be rejected.
    Error,
    /// The model is acceptable but violates a convention.
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl ValidationMessage {
    /// An error-severity message.
    pub fn error(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            location,
        }
    }

    /// A warning-severity message.
    pub fn warn(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            location,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (at {location})")?;
        }
        Ok(())
    }
}

/// Append-only accumulator for one validation pass.
#[derive(Debug, Default)]
pub struct ValidationContext {
    messages: Vec<ValidationMessage>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Never fails.
    pub fn add_message(&mut self, message: ValidationMessage) {
        self.messages.push(message);
    }

    /// Append an error.
    pub fn error(&mut self, message: impl Into<String>, location: Option<&SourceLocation>) {
        self.add_message(ValidationMessage::error(message, location.cloned()));
    }

    /// Append a warning.
    pub fn warn(&mut self, message: impl Into<String>, location: Option<&SourceLocation>) {
        self.add_message(ValidationMessage::warn(message, location.cloned()));
    }

    /// Messages collected so far, in traversal order.
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// Finish the pass.
    pub fn into_result(self) -> ValidationResult {
        ValidationResult {
            messages: self.messages,
        }
    }
}

/// The ordered outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    /// All messages, in traversal order.
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// Error-severity messages.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(|m| m.severity == Severity::Error)
    }

    /// Warning-severity messages.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(ValidationMessage::is_error)
    }

    /// True when there are no errors. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// True when there are no messages at all.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<ValidationMessage> {
        self.messages
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {m}")?;
        }
        Ok(())
    }
}
