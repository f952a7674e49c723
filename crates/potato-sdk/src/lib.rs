//! # Potato SDK
//!
//! HTTP client for the **Potato** chat bot server.
//!
//! The SDK provides:
//!
//! * [`PotatoClient`] — `reqwest`-based client for the chat and template
//!   endpoints.
//! * [`BotApi`] — the trait the chat controller is written against, so that
//!   front-ends can be tested without a live server.
//! * [`Endpoints`] — canonical endpoint paths shared by every caller.
//! * [`SdkError`] — unified error type for all SDK operations.
//!
//! Model types from [`potato_models`] are re-exported for convenience.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use potato_sdk::{BotApi, PotatoClient};
//!
//! # async fn run() -> Result<(), potato_sdk::SdkError> {
//! let client = PotatoClient::new("http://127.0.0.1:5000")?;
//!
//! let reply = client.send_chat("hello potato").await?;
//! println!("{}", reply.response);
//!
//! for name in client.list_templates().await? {
//!     println!("template: {name}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod endpoints;
pub mod error;

pub use api::BotApi;
pub use client::PotatoClient;
pub use endpoints::Endpoints;
pub use error::SdkError;

// Re-export model types for ergonomic usage.
pub use potato_models::{ChatReply, ChatRequest, DebugLog, TemplateAck, TemplateName, TemplateRequest};
