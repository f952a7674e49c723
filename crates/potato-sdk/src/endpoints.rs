//! Canonical endpoint paths of the bot server.
//!
//! All request paths used by the client **must** come from [`Endpoints`] so
//! that the SDK and its tests agree on a single layout.
//!
//! ```text
//! POST /chat               ← send a message, get reply + debug log
//! GET  /templates          ← list template names
//! POST /templates/save     ← snapshot current bot state under a name
//! POST /templates/load     ← restore a snapshot (also used for "reset")
//! POST /templates/delete   ← remove a snapshot
//! ```

/// Central authority for endpoint paths.
///
/// # Examples
///
/// ```
/// use potato_sdk::Endpoints;
///
/// assert_eq!(Endpoints::CHAT, "/chat");
/// assert_eq!(
///     Endpoints::url("http://localhost:5000/", Endpoints::TEMPLATES_SAVE),
///     "http://localhost:5000/templates/save",
/// );
/// ```
pub struct Endpoints;

impl Endpoints {
    /// Chat turn.
    pub const CHAT: &'static str = "/chat";
    /// Template listing.
    pub const TEMPLATES: &'static str = "/templates";
    /// Template save.
    pub const TEMPLATES_SAVE: &'static str = "/templates/save";
    /// Template load. Reset goes through the same endpoint.
    pub const TEMPLATES_LOAD: &'static str = "/templates/load";
    /// Template delete.
    pub const TEMPLATES_DELETE: &'static str = "/templates/delete";

    /// Join a path onto a base URL, tolerating a trailing slash on the base.
    pub fn url(base_url: &str, path: &str) -> String {
        format!("{}{path}", base_url.trim_end_matches('/'))
    }
}
