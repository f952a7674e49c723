//! The chat client controller.
//!
//! [`ChatController`] binds the view to the five remote operations. Every
//! front-end goes through [`ChatController::dispatch`], which maps a
//! [`Command`] to its handler; the handlers can also be called directly.
//!
//! Handlers never hold the view lock across an `.await`, so several actions
//! can be in flight at once. When two of them touch the same state the last
//! one to finish wins.

use std::sync::Arc;

use potato_models::{ChatRequest, ChatTurn, Role, TemplateName};
use potato_sdk::{BotApi, SdkError};
use tracing::{debug, info, warn};

use crate::app_state::SharedView;
use crate::i18n::{t, with_name, Locale, T};
use crate::prompt::Prompter;

/// User-triggerable actions, identified by their kebab-case name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Command {
    SendMessage,
    RefreshTemplates,
    SaveTemplate,
    LoadTemplate,
    ResetTemplate,
    DeleteTemplate,
}

/// What a handler ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ActionOutcome {
    /// Nothing to do (blank chat input).
    Skipped,
    /// Required input missing; the user was told, nothing was sent.
    Invalid,
    /// A chat request is already in flight.
    Busy,
    /// The user declined the confirmation.
    Cancelled,
    Completed,
    Failed,
}

pub struct ChatController<A, P> {
    api: Arc<A>,
    prompter: Arc<P>,
    view: SharedView,
    locale: Locale,
}

impl<A, P> Clone for ChatController<A, P> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            prompter: Arc::clone(&self.prompter),
            view: self.view.clone(),
            locale: self.locale,
        }
    }
}

impl<A: BotApi, P: Prompter> ChatController<A, P> {
    pub fn new(api: Arc<A>, prompter: Arc<P>, view: SharedView, locale: Locale) -> Self {
        Self {
            api,
            prompter,
            view,
            locale,
        }
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn strings(&self) -> T {
        t(self.locale)
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Run the handler bound to `command`, reading its input from the view.
    pub async fn dispatch(&self, command: Command) -> ActionOutcome {
        debug!(%command, "dispatch");
        match command {
            Command::SendMessage => {
                let taken = self.view.update(|v| {
                    if v.chat_pending {
                        return Err(ActionOutcome::Busy);
                    }
                    if v.message_input.trim().is_empty() {
                        return Err(ActionOutcome::Skipped);
                    }
                    Ok(std::mem::take(&mut v.message_input))
                });
                match taken {
                    Ok(text) => self.send_message(&text).await,
                    Err(outcome) => outcome,
                }
            }
            Command::RefreshTemplates => self.refresh_templates().await,
            Command::SaveTemplate => {
                let raw = self.view.read(|v| v.template_name_input.clone());
                self.save_template(&raw).await
            }
            Command::LoadTemplate => self.load_template().await,
            Command::ResetTemplate => self.reset_template().await,
            Command::DeleteTemplate => self.delete_template().await,
        }
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    /// Send one chat message.
    ///
    /// The user's turn is shown before the request is awaited; exactly one
    /// bot or system turn follows once it resolves.
    pub async fn send_message(&self, text: &str) -> ActionOutcome {
        let Ok(request) = ChatRequest::new(text) else {
            return ActionOutcome::Skipped;
        };
        let strings = self.strings();

        let started = self.view.update(|v| {
            if v.chat_pending {
                return false;
            }
            v.chat_pending = true;
            v.push_turn(ChatTurn::new(Role::User, strings.sender_user, &request.message));
            true
        });
        if !started {
            debug!("chat request already in flight");
            return ActionOutcome::Busy;
        }

        info!(chars = request.message.chars().count(), "sending chat message");
        match self.api.send_chat(&request.message).await {
            Ok(reply) => {
                info!(debug_lines = reply.debug_log.len(), "chat reply received");
                self.view.update(|v| {
                    v.chat_pending = false;
                    v.push_turn(ChatTurn::new(Role::Bot, strings.sender_bot, reply.response));
                    v.replace_debug_log(reply.debug_log);
                });
                ActionOutcome::Completed
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                self.view.update(|v| {
                    v.chat_pending = false;
                    v.push_turn(ChatTurn::new(
                        Role::System,
                        strings.sender_system,
                        strings.chat_error,
                    ));
                });
                ActionOutcome::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    /// Refetch template names. Failures only reach the log.
    pub async fn refresh_templates(&self) -> ActionOutcome {
        match self.api.list_templates().await {
            Ok(names) => {
                let count = names.len();
                let placeholder = self.strings().no_templates;
                self.view.update(|v| v.templates.replace(names, placeholder));
                info!(count, "template list refreshed");
                ActionOutcome::Completed
            }
            Err(e) => {
                warn!(error = %e, "failed to refresh template list");
                ActionOutcome::Failed
            }
        }
    }

    pub async fn save_template(&self, raw_name: &str) -> ActionOutcome {
        let strings = self.strings();
        let name = match TemplateName::parse(raw_name) {
            Ok(name) => name,
            Err(e) => {
                debug!(error = %e, "save rejected");
                self.prompter.alert(strings.enter_template_name).await;
                return ActionOutcome::Invalid;
            }
        };

        match self.api.save_template(&name).await {
            Ok(ack) => {
                info!(name = %name, "template saved");
                self.prompter.alert(&ack.success).await;
                self.view.update(|v| v.template_name_input.clear());
                self.refresh_templates().await;
                ActionOutcome::Completed
            }
            Err(e) => {
                self.report_failure("save", &name, &e).await;
                ActionOutcome::Failed
            }
        }
    }

    pub async fn load_template(&self) -> ActionOutcome {
        self.load_selected(Command::LoadTemplate, self.strings().confirm_load)
            .await
    }

    /// Same request as [`load_template`](Self::load_template); only the
    /// confirmation wording differs.
    pub async fn reset_template(&self) -> ActionOutcome {
        self.load_selected(Command::ResetTemplate, self.strings().confirm_reset)
            .await
    }

    pub async fn delete_template(&self) -> ActionOutcome {
        let name = match self.confirmed_selection(self.strings().confirm_delete).await {
            Ok(name) => name,
            Err(outcome) => return outcome,
        };

        match self.api.delete_template(&name).await {
            Ok(ack) => {
                info!(name = %name, "template deleted");
                self.prompter.alert(&ack.success).await;
                self.refresh_templates().await;
                ActionOutcome::Completed
            }
            Err(e) => {
                self.report_failure("delete", &name, &e).await;
                ActionOutcome::Failed
            }
        }
    }

    async fn load_selected(&self, command: Command, question: &str) -> ActionOutcome {
        let name = match self.confirmed_selection(question).await {
            Ok(name) => name,
            Err(outcome) => return outcome,
        };

        match self.api.load_template(&name).await {
            Ok(ack) => {
                info!(name = %name, %command, "template loaded");
                self.prompter.alert(&ack.success).await;
                self.view.update(|v| v.clear_conversation());
                ActionOutcome::Completed
            }
            Err(e) => {
                self.report_failure("load", &name, &e).await;
                ActionOutcome::Failed
            }
        }
    }

    /// Resolve the selected template and ask for confirmation.
    ///
    /// Fails with `Invalid` after telling the user when nothing usable is
    /// selected, and with `Cancelled` when the user declines.
    async fn confirmed_selection(&self, question: &str) -> Result<TemplateName, ActionOutcome> {
        let Some(name) = self.view.read(|v| v.templates.selected_name().cloned()) else {
            self.prompter.alert(self.strings().select_template).await;
            return Err(ActionOutcome::Invalid);
        };
        if self.prompter.confirm(&with_name(question, name.as_str())).await {
            Ok(name)
        } else {
            info!(name = %name, "action cancelled by user");
            Err(ActionOutcome::Cancelled)
        }
    }

    async fn report_failure(&self, action: &str, name: &TemplateName, e: &SdkError) {
        warn!(action, name = %name, error = %e, "template request failed");
        let strings = self.strings();
        self.prompter
            .alert(&format!("{}{}", strings.error_prefix, e.user_message()))
            .await;
    }
}
