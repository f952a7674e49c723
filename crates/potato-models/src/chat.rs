//! Conversation turns and the debug log.
//!
//! A conversation is an append-only sequence of [`ChatTurn`]s rendered in
//! arrival order. The [`DebugLog`] is different: every chat response carries
//! a fresh one which replaces whatever was displayed before.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Who produced a [`ChatTurn`].
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Text typed by the local user.
    User,
    /// A reply produced by the bot server.
    Bot,
    /// A message generated by the client itself (e.g. a failed request).
    System,
}

// ---------------------------------------------------------------------------
// ChatTurn
// ---------------------------------------------------------------------------

/// One entry of the conversation view.
///
/// `sender` is the display label ("You", "Potato", …) chosen by the
/// presentation layer for the active locale; `role` is what the label stands
/// for and drives styling.
///
/// # Examples
///
/// ```
/// use potato_models::{ChatTurn, Role};
///
/// let turn = ChatTurn::new(Role::User, "You", "hello");
/// assert_eq!(turn.role, Role::User);
/// assert_eq!(turn.text, "hello");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Display label of the author.
    pub sender: String,
    /// Message body.
    pub text: String,
    /// Author category.
    pub role: Role,
    /// When the turn was appended to the view.
    pub at: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a turn stamped with the current time.
    pub fn new(role: Role, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            role,
            at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// DebugLog
// ---------------------------------------------------------------------------

/// Ordered diagnostic lines returned alongside a chat response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct DebugLog(Vec<String>);

impl DebugLog {
    /// Build a log from its lines.
    pub fn new(entries: Vec<String>) -> Self {
        Self(entries)
    }

    /// Interpret an arbitrary JSON value as a debug log.
    ///
    /// Only an array yields entries; anything else (string, object, null)
    /// gives an empty log. Non-string array items are kept in their JSON
    /// text form.
    ///
    /// ```
    /// use potato_models::DebugLog;
    /// use serde_json::json;
    ///
    /// let log = DebugLog::from_value(json!(["a", 2]));
    /// assert_eq!(log.entries(), ["a", "2"]);
    ///
    /// assert!(DebugLog::from_value(json!("not a list")).is_empty());
    /// ```
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            _ => Self::default(),
        }
    }

    /// The log lines, in server order.
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_round_trips_as_lowercase() {
        assert_eq!(Role::Bot.to_string(), "bot");
        assert_eq!("system".parse::<Role>().unwrap(), Role::System);
        assert_eq!(serde_json::to_value(Role::User).unwrap(), json!("user"));
    }

    #[test]
    fn debug_log_from_array() {
        let log = DebugLog::from_value(json!(["--- turn 1 ---", "calling LLM"]));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1], "calling LLM");
    }

    #[test]
    fn debug_log_from_non_array_is_empty() {
        assert!(DebugLog::from_value(json!({"x": 1})).is_empty());
        assert!(DebugLog::from_value(Value::Null).is_empty());
        assert!(DebugLog::from_value(json!(42)).is_empty());
    }

    #[test]
    fn debug_log_stringifies_non_string_items() {
        let log = DebugLog::from_value(json!([true, null, {"k": "v"}]));
        assert_eq!(log.entries(), ["true", "null", "{\"k\":\"v\"}"]);
    }

    #[test]
    fn clear_empties_log() {
        let mut log = DebugLog::new(vec!["a".into()]);
        log.clear();
        assert!(log.is_empty());
    }
}
