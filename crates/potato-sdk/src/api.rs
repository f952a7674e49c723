//! The remote operations the chat controller depends on.
//!
//! [`BotApi`] is the seam between the controller and the network: the
//! production implementation is [`PotatoClient`](crate::PotatoClient), tests
//! substitute an in-memory double.

use async_trait::async_trait;
use potato_models::{ChatReply, TemplateAck, TemplateName};

use crate::error::SdkError;

/// The five server operations of the chat client.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// `POST /chat` with `{message}`.
    async fn send_chat(&self, message: &str) -> Result<ChatReply, SdkError>;

    /// `GET /templates`.
    async fn list_templates(&self) -> Result<Vec<TemplateName>, SdkError>;

    /// `POST /templates/save` with `{name}`.
    async fn save_template(&self, name: &TemplateName) -> Result<TemplateAck, SdkError>;

    /// `POST /templates/load` with `{name}`.
    async fn load_template(&self, name: &TemplateName) -> Result<TemplateAck, SdkError>;

    /// `POST /templates/delete` with `{name}`.
    async fn delete_template(&self, name: &TemplateName) -> Result<TemplateAck, SdkError>;
}
