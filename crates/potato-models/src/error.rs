//! Error types for the `potato-models` crate.
//!
//! All fallible constructors in this crate return variants of [`ModelError`].

/// Errors produced when validating user input into model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A template name was empty once surrounding whitespace was removed.
    #[error("invalid template name \"{value}\": {reason}")]
    InvalidTemplateName {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A chat message was empty once surrounding whitespace was removed.
    #[error("chat message must not be empty")]
    EmptyMessage,
}
