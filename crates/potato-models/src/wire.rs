//! Request and response bodies exchanged with the bot server.
//!
//! Every endpoint gets an explicit schema so that a malformed payload fails
//! at decode time instead of surfacing as missing values in the view.
//!
//! | Endpoint | Request | Success | Failure |
//! |----------|---------|---------|---------|
//! | `POST /chat` | [`ChatRequest`] | [`ChatReply`] | [`ErrorBody`] |
//! | `GET /templates` | — | `Vec<TemplateName>` | — |
//! | `POST /templates/{save,load,delete}` | [`TemplateRequest`] | [`TemplateAck`] | [`ErrorBody`] |

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::chat::DebugLog;
use crate::error::ModelError;
use crate::template::TemplateName;

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Body of `POST /chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's message, trimmed.
    pub message: String,
}

impl ChatRequest {
    /// Build a request from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyMessage`] when the input is blank.
    ///
    /// ```
    /// use potato_models::ChatRequest;
    ///
    /// assert_eq!(ChatRequest::new("  hi ").unwrap().message, "hi");
    /// assert!(ChatRequest::new("\n").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, ModelError> {
        let message = raw.trim();
        if message.is_empty() {
            return Err(ModelError::EmptyMessage);
        }
        Ok(Self {
            message: message.to_string(),
        })
    }
}

/// Successful response of `POST /chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// The bot's answer.
    pub response: String,
    /// Diagnostic lines for this turn. Absent or non-array values decode to
    /// an empty log.
    #[serde(default, deserialize_with = "lenient_debug_log")]
    pub debug_log: DebugLog,
}

fn lenient_debug_log<'de, D>(deserializer: D) -> Result<DebugLog, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(DebugLog::from_value(value))
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Body shared by the save, load and delete template endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TemplateRequest {
    /// Template the operation applies to.
    pub name: TemplateName,
}

impl TemplateRequest {
    /// Wrap a template name.
    pub fn new(name: TemplateName) -> Self {
        Self { name }
    }
}

/// Successful response of a template mutation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TemplateAck {
    /// Human-readable confirmation supplied by the server.
    pub success: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Body of a non-2xx response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable failure reason supplied by the server.
    pub error: String,
}
