//! HTTP client for the bot server.
//!
//! [`PotatoClient`] issues one request per call, decodes the typed body on
//! success and turns every non-2xx answer into [`SdkError::Server`].
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use potato_sdk::{BotApi, PotatoClient, TemplateName};
//!
//! # async fn run() -> Result<(), potato_sdk::SdkError> {
//! let client = PotatoClient::new("http://127.0.0.1:5000")?;
//! let ack = client.save_template(&TemplateName::from("before-puzzle")).await?;
//! println!("{}", ack.success);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use potato_models::{ChatReply, ChatRequest, ErrorBody, TemplateAck, TemplateName, TemplateRequest};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::BotApi;
use crate::endpoints::Endpoints;
use crate::error::SdkError;

/// A client bound to one bot server.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct PotatoClient {
    http: reqwest::Client,
    base_url: String,
}

impl PotatoClient {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a client without a request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] when `base_url` is not an `http://` or
    /// `https://` URL.
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client whose requests fail after `timeout`.
    ///
    /// `None` waits indefinitely, which is what the web front-end does.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] for an unusable base URL and
    /// [`SdkError::Http`] when the HTTP stack cannot be initialised.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, SdkError> {
        let base_url = base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SdkError::Config(format!(
                "base URL must start with http:// or https://, got \"{base_url}\""
            )));
        }
        if base_url.trim_end_matches('/').ends_with(':') {
            return Err(SdkError::Config(format!("base URL has no host: \"{base_url}\"")));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The server this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, SdkError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = Endpoints::url(&self.base_url, path);
        debug!(%url, "POST");
        let res = self.http.post(&url).json(body).send().await?;
        Self::handle_response(res).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SdkError> {
        let url = Endpoints::url(&self.base_url, path);
        debug!(%url, "GET");
        let res = self.http.get(&url).send().await?;
        Self::handle_response(res).await
    }

    async fn handle_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, SdkError> {
        let status = res.status();
        let body = res.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(server_error(status, &body))
        }
    }
}

/// Build [`SdkError::Server`] from a rejected response.
///
/// Prefers the structured `{"error": …}` message, then the raw body, then
/// the status line.
fn server_error(status: StatusCode, body: &str) -> SdkError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status.to_string(),
    };
    SdkError::Server {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl BotApi for PotatoClient {
    async fn send_chat(&self, message: &str) -> Result<ChatReply, SdkError> {
        let req = ChatRequest {
            message: message.to_string(),
        };
        self.post(Endpoints::CHAT, &req).await
    }

    async fn list_templates(&self) -> Result<Vec<TemplateName>, SdkError> {
        self.get(Endpoints::TEMPLATES).await
    }

    async fn save_template(&self, name: &TemplateName) -> Result<TemplateAck, SdkError> {
        self.post(Endpoints::TEMPLATES_SAVE, &TemplateRequest::new(name.clone()))
            .await
    }

    async fn load_template(&self, name: &TemplateName) -> Result<TemplateAck, SdkError> {
        self.post(Endpoints::TEMPLATES_LOAD, &TemplateRequest::new(name.clone()))
            .await
    }

    async fn delete_template(&self, name: &TemplateName) -> Result<TemplateAck, SdkError> {
        self.post(Endpoints::TEMPLATES_DELETE, &TemplateRequest::new(name.clone()))
            .await
    }
}
