//! Error types for task identifier parsing and field validation.

use thiserror::Error;

/// Text that is not a syntactically valid task identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task identifier '{0}', expected 24 hexadecimal characters")]
pub struct InvalidIdentifier(pub String);

impl InvalidIdentifier {
    /// Records the rejected identifier text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the rejected identifier text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }
}

/// Errors returned while constructing task fields from an untyped mapping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// A required field is absent or `null`.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A field holds a value of the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    WrongType {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the accepted type.
        expected: &'static str,
    },

    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyName,
}
