//! In-memory doubles shared by the controller and front-end tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use potato_models::{ChatReply, DebugLog, TemplateAck, TemplateName};
use potato_sdk::{BotApi, SdkError};
use tokio::sync::Notify;

use crate::prompt::Prompter;

/// One request as the API double saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Chat(String),
    List,
    Save(String),
    Load(String),
    Delete(String),
}

/// How the API double answers the next request of a kind.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Ok(&'static str),
    Reject(u16, &'static str),
    Garbled,
}

impl Reply {
    fn into_result<T>(self, ok: impl FnOnce(&'static str) -> T) -> Result<T, SdkError> {
        match self {
            Reply::Ok(text) => Ok(ok(text)),
            Reply::Reject(status, message) => Err(SdkError::Server {
                status,
                message: message.into(),
            }),
            Reply::Garbled => Err(serde_json::from_str::<serde_json::Value>("{")
                .unwrap_err()
                .into()),
        }
    }
}

/// Scriptable [`BotApi`] that records every call.
///
/// `templates: None` makes the list request fail; `chat_gate` holds chat
/// replies until notified.
pub struct MockApi {
    pub calls: Mutex<Vec<Call>>,
    pub templates: Mutex<Option<Vec<&'static str>>>,
    pub chat: Mutex<Reply>,
    pub debug_log: Vec<String>,
    pub mutation: Mutex<Reply>,
    pub chat_gate: Option<Arc<Notify>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Mutex::default(),
            templates: Mutex::new(Some(Vec::new())),
            chat: Mutex::new(Reply::Ok("hello from potato")),
            debug_log: vec!["--- turn 1 ---".into(), "guardrail ok".into()],
            mutation: Mutex::new(Reply::Ok("done.")),
            chat_gate: None,
        }
    }
}

impl MockApi {
    pub fn with_templates(names: &[&'static str]) -> Self {
        Self {
            templates: Mutex::new(Some(names.to_vec())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn set_templates(&self, names: Option<Vec<&'static str>>) {
        *self.templates.lock().unwrap() = names;
    }

    pub fn set_mutation(&self, reply: Reply) {
        *self.mutation.lock().unwrap() = reply;
    }

    fn mutate(&self, call: Call) -> Result<TemplateAck, SdkError> {
        self.calls.lock().unwrap().push(call);
        let reply = *self.mutation.lock().unwrap();
        reply.into_result(|s| TemplateAck { success: s.into() })
    }
}

#[async_trait]
impl BotApi for MockApi {
    async fn send_chat(&self, message: &str) -> Result<ChatReply, SdkError> {
        self.calls.lock().unwrap().push(Call::Chat(message.into()));
        if let Some(gate) = &self.chat_gate {
            gate.notified().await;
        }
        let reply = *self.chat.lock().unwrap();
        reply.into_result(|s| ChatReply {
            response: s.into(),
            debug_log: DebugLog::new(self.debug_log.clone()),
        })
    }

    async fn list_templates(&self) -> Result<Vec<TemplateName>, SdkError> {
        self.calls.lock().unwrap().push(Call::List);
        let names = self.templates.lock().unwrap().clone();
        match names {
            Some(names) => Ok(names.into_iter().map(TemplateName::from).collect()),
            None => Err(SdkError::Server {
                status: 503,
                message: "unavailable".into(),
            }),
        }
    }

    async fn save_template(&self, name: &TemplateName) -> Result<TemplateAck, SdkError> {
        self.mutate(Call::Save(name.to_string()))
    }

    async fn load_template(&self, name: &TemplateName) -> Result<TemplateAck, SdkError> {
        self.mutate(Call::Load(name.to_string()))
    }

    async fn delete_template(&self, name: &TemplateName) -> Result<TemplateAck, SdkError> {
        self.mutate(Call::Delete(name.to_string()))
    }
}

type ConfirmHook = Box<dyn Fn() + Send + Sync>;

/// Records every prompt and gives a fixed answer to confirmations.
pub struct ScriptedPrompter {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
    on_confirm: Option<ConfirmHook>,
}

impl ScriptedPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            alerts: Mutex::default(),
            confirms: Mutex::default(),
            on_confirm: None,
        }
    }

    /// Run `hook` while the confirmation is open, before it is answered.
    pub fn on_confirm(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_confirm = Some(Box::new(hook));
        self
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.into());
    }

    async fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.into());
        if let Some(hook) = &self.on_confirm {
            hook();
        }
        self.answer
    }
}
