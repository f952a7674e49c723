#![deny(missing_docs)]

//! # Potato Models
//!
//! Core data types for the Potato chat client.
//!
//! Nothing in this crate is persisted by the client: conversation turns and
//! debug logs are transient view models, and template names are handles to
//! state the bot server owns.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`chat`] | Conversation turns (`ChatTurn`, `Role`) and the per-response `DebugLog` |
//! | [`template`] | `TemplateName`, the identifier of a server-side template |
//! | [`wire`] | Request / response bodies for every HTTP endpoint |
//! | [`error`] | `ModelError` for input validation |

pub mod chat;
pub mod error;
pub mod template;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use chat::*;
pub use error::*;
pub use template::*;
pub use wire::*;
