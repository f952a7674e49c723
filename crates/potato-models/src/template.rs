//! Template identifiers.
//!
//! A template is a named snapshot of the bot's state stored on the server.
//! The client never owns template contents; it only lists names and asks the
//! server to save, load or delete by name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Name of a server-side template.
///
/// Names typed by the user go through [`TemplateName::parse`], which trims
/// surrounding whitespace and rejects blank input. Names received from the
/// server are taken verbatim.
///
/// # Examples
///
/// ```
/// use potato_models::TemplateName;
///
/// let name = TemplateName::parse("  early-game ").unwrap();
/// assert_eq!(name.as_str(), "early-game");
///
/// assert!(TemplateName::parse("   ").is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    /// Validate a user-supplied name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidTemplateName`] when `raw` is empty or
    /// whitespace only.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidTemplateName {
                value: raw.to_string(),
                reason: "must not be blank".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TemplateName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TemplateName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
