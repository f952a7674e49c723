use std::sync::{Arc, Mutex, PoisonError};

use potato_models::{ChatTurn, DebugLog, TemplateName};

use crate::tui::Action;

// ── Template selector ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOption {
    pub label: String,
    /// `None` for the placeholder entry.
    pub value: Option<TemplateName>,
    pub disabled: bool,
}

/// Client-side copy of the server's template names.
///
/// Replaced wholesale on every successful refresh; never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSelector {
    options: Vec<TemplateOption>,
    selected: Option<usize>,
    disabled: bool,
}

impl TemplateSelector {
    /// Swap in a freshly fetched list.
    ///
    /// An empty list becomes a single disabled placeholder and disables the
    /// selector; otherwise the first name is selected.
    pub fn replace(&mut self, names: Vec<TemplateName>, placeholder: &str) {
        if names.is_empty() {
            self.options = vec![TemplateOption {
                label: placeholder.to_string(),
                value: None,
                disabled: true,
            }];
            self.selected = None;
            self.disabled = true;
            return;
        }

        self.options = names
            .into_iter()
            .map(|name| TemplateOption {
                label: name.to_string(),
                value: Some(name),
                disabled: false,
            })
            .collect();
        self.selected = Some(0);
        self.disabled = false;
    }

    pub fn options(&self) -> &[TemplateOption] {
        &self.options
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The name an action should apply to, if any.
    pub fn selected_name(&self) -> Option<&TemplateName> {
        if self.disabled {
            return None;
        }
        let option = self.options.get(self.selected?)?;
        if option.disabled {
            return None;
        }
        option.value.as_ref()
    }

    pub fn select_next(&mut self) {
        if self.disabled || self.options.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) if i + 1 < self.options.len() => i + 1,
            _ => 0,
        };
        self.selected = Some(i);
    }

    pub fn select_previous(&mut self) {
        if self.disabled || self.options.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(0) | None => self.options.len() - 1,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Select the option whose value is `name`. Returns `false` if absent.
    pub fn select_name(&mut self, name: &TemplateName) -> bool {
        if self.disabled {
            return false;
        }
        match self
            .options
            .iter()
            .position(|o| o.value.as_ref() == Some(name))
        {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }
}

// ── Chat view ─────────────────────────────────────────────────────────

/// Everything the front-end displays, and the inputs the user types into.
#[derive(Debug, Clone, Default)]
pub struct ChatView {
    pub turns: Vec<ChatTurn>,
    pub debug_log: DebugLog,
    pub templates: TemplateSelector,
    pub message_input: String,
    pub template_name_input: String,
    /// A chat request is in flight.
    pub chat_pending: bool,
}

impl ChatView {
    pub fn push_turn(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn replace_debug_log(&mut self, log: DebugLog) {
        self.debug_log = log;
    }

    /// Drop the conversation and the debug log, keep inputs and templates.
    pub fn clear_conversation(&mut self) {
        self.turns.clear();
        self.debug_log.clear();
    }
}

/// Handle to the view shared by the render loop and in-flight actions.
///
/// The lock is only ever held inside `read` / `update`, never across an
/// `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedView(Arc<Mutex<ChatView>>);

impl SharedView {
    pub fn read<R>(&self, f: impl FnOnce(&ChatView) -> R) -> R {
        let guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut ChatView) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn snapshot(&self) -> ChatView {
        self.read(Clone::clone)
    }
}

pub trait AppController {
    fn update(&mut self, action: Action);
    fn render(&mut self, f: &mut ratatui::Frame);
    fn should_quit(&self) -> bool;
}
