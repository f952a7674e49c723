use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use potato_models::Role;
use potato_sdk::BotApi;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tokio::sync::{mpsc::UnboundedSender, oneshot};
use tracing::debug;

use crate::app_state::{AppController, ChatView};
use crate::controller::{ActionOutcome, ChatController, Command};
use crate::i18n::{t, T};
use crate::prompt::Prompter;
use crate::tui::Action;
use crate::ui::centered_rect;

/// Global key bindings, active whatever panel has focus.
const KEY_BINDINGS: &[(KeyCode, Command)] = &[
    (KeyCode::F(3), Command::LoadTemplate),
    (KeyCode::F(4), Command::ResetTemplate),
    (KeyCode::F(5), Command::RefreshTemplates),
    (KeyCode::F(8), Command::DeleteTemplate),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Message,
    Templates,
    TemplateName,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Message => Focus::Templates,
            Focus::Templates => Focus::TemplateName,
            Focus::TemplateName => Focus::Message,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Message => Focus::TemplateName,
            Focus::Templates => Focus::Message,
            Focus::TemplateName => Focus::Templates,
        }
    }

    /// Command bound to Enter in this panel.
    fn submit_command(self) -> Command {
        match self {
            Focus::Message => Command::SendMessage,
            Focus::Templates => Command::LoadTemplate,
            Focus::TemplateName => Command::SaveTemplate,
        }
    }
}

#[derive(Debug)]
enum Modal {
    Alert(String, oneshot::Sender<()>),
    Confirm(String, oneshot::Sender<bool>),
}

pub struct ChatApp<A, P> {
    controller: ChatController<A, P>,
    server_url: String,
    should_quit: bool,

    // UI State
    focus: Focus,
    modals: VecDeque<Modal>,
    last_outcome: Option<(Command, ActionOutcome)>,
}

impl<A, P> ChatApp<A, P>
where
    A: BotApi + 'static,
    P: Prompter + 'static,
{
    pub fn new(controller: ChatController<A, P>, server_url: String) -> Self {
        Self {
            controller,
            server_url,
            should_quit: false,
            focus: Focus::Message,
            modals: VecDeque::new(),
            last_outcome: None,
        }
    }

    /// Run `command` on its own task; the outcome comes back as
    /// [`Action::Finished`].
    pub fn spawn_command(&self, command: Command, tx: UnboundedSender<Action>) {
        let controller = self.controller.clone();
        tokio::spawn(async move {
            let outcome = controller.dispatch(command).await;
            let _ = tx.send(Action::Finished(command, outcome));
        });
    }

    fn strings(&self) -> T {
        t(self.controller.locale())
    }

    /// Translate a key into a command, applying text edits along the way.
    fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if let Some(modal) = self.modals.pop_front() {
            if let Some(modal) = Self::answer_modal(modal, key.code) {
                self.modals.push_front(modal);
            }
            return None;
        }

        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return None;
        }

        if let Some((_, command)) = KEY_BINDINGS.iter().find(|(code, _)| *code == key.code) {
            return Some(*command);
        }

        let view = self.controller.view();
        match (self.focus, key.code) {
            (_, KeyCode::Tab) => self.focus = self.focus.next(),
            (_, KeyCode::BackTab) => self.focus = self.focus.previous(),
            (focus, KeyCode::Enter) => return Some(focus.submit_command()),
            (Focus::Templates, KeyCode::Down) => view.update(|v| v.templates.select_next()),
            (Focus::Templates, KeyCode::Up) => view.update(|v| v.templates.select_previous()),
            (Focus::Message, KeyCode::Char(c)) => view.update(|v| v.message_input.push(c)),
            (Focus::Message, KeyCode::Backspace) => {
                view.update(|v| v.message_input.pop());
            }
            (Focus::TemplateName, KeyCode::Char(c)) => {
                view.update(|v| v.template_name_input.push(c));
            }
            (Focus::TemplateName, KeyCode::Backspace) => {
                view.update(|v| v.template_name_input.pop());
            }
            _ => {}
        }
        None
    }

    /// Resolve a modal if `code` answers it; otherwise hand it back.
    fn answer_modal(modal: Modal, code: KeyCode) -> Option<Modal> {
        match (modal, code) {
            (Modal::Alert(_, ack), KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => {
                let _ = ack.send(());
                None
            }
            (Modal::Confirm(_, answer), KeyCode::Char('y' | 'Y')) => {
                let _ = answer.send(true);
                None
            }
            (Modal::Confirm(_, answer), KeyCode::Char('n' | 'N') | KeyCode::Esc) => {
                let _ = answer.send(false);
                None
            }
            (modal, _) => Some(modal),
        }
    }

    fn render_chat(&self, f: &mut Frame, area: Rect, view: &ChatView, strings: &T) {
        let lines: Vec<Line> = view
            .turns
            .iter()
            .map(|turn| {
                let color = match turn.role {
                    Role::User => Color::Green,
                    Role::Bot => Color::Cyan,
                    Role::System => Color::Red,
                };
                Line::from(vec![
                    Span::styled(
                        format!("{} ", turn.at.with_timezone(&chrono::Local).format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{}: ", turn.sender),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(turn.text.clone()),
                ])
            })
            .collect();

        // Rows after word wrapping; the last one sits on the bottom border.
        let chat = Paragraph::new(lines).wrap(Wrap { trim: false });
        let rows = chat.line_count(area.width.saturating_sub(2));
        let inner_height = usize::from(area.height.saturating_sub(2));
        let scroll = u16::try_from(rows.saturating_sub(inner_height)).unwrap_or(u16::MAX);

        let mut title = format!(
            "{} [{}] - {}",
            strings.chat_title,
            self.controller.locale().label(),
            self.server_url
        );
        if view.chat_pending {
            title.push_str(" - ");
            title.push_str(strings.waiting_reply);
        }

        let chat = chat
            .scroll((scroll, 0))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(chat, area);
    }

    fn render_templates(&self, f: &mut Frame, area: Rect, view: &ChatView, strings: &T) {
        let items: Vec<ListItem> = view
            .templates
            .options()
            .iter()
            .map(|o| {
                let style = if o.disabled {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
                } else {
                    Style::default()
                };
                ListItem::new(o.label.as_str()).style(style)
            })
            .collect();

        let mut list = List::new(items)
            .block(self.panel(strings.templates_title, Focus::Templates))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow))
            .highlight_symbol(">> ");
        if view.templates.is_disabled() {
            list = list.style(Style::default().fg(Color::DarkGray));
        }

        let mut state = ListState::default();
        state.select(view.templates.selected_index());
        f.render_stateful_widget(list, area, &mut state);
    }

    fn render_debug_log(f: &mut Frame, area: Rect, view: &ChatView, strings: &T) {
        let lines: Vec<Line> = view
            .debug_log
            .entries()
            .iter()
            .map(|entry| Line::from(Span::styled(entry.as_str(), Style::default().fg(Color::Gray))))
            .collect();
        let log = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(strings.debug_log_title));
        f.render_widget(log, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect, text: &str, title: &str, focus: Focus) {
        let input = Paragraph::new(text).block(self.panel(title, focus));
        f.render_widget(input, area);

        if self.focus == focus && self.modals.is_empty() {
            let offset = u16::try_from(Line::from(text).width()).unwrap_or(u16::MAX);
            let x = area.x.saturating_add(1).saturating_add(offset);
            let max_x = area.x + area.width.saturating_sub(2);
            f.set_cursor_position((x.min(max_x), area.y + 1));
        }
    }

    fn render_modal(&self, f: &mut Frame, strings: &T) {
        let Some(modal) = self.modals.front() else {
            return;
        };
        let (title, message, hint, color) = match modal {
            Modal::Alert(message, _) => (strings.alert_title, message, strings.alert_hint, Color::Blue),
            Modal::Confirm(message, _) => {
                (strings.confirm_title, message, strings.confirm_hint, Color::Magenta)
            }
        };

        let area = centered_rect(60, 30, f.area());
        let body = Paragraph::new(vec![
            Line::from(message.as_str()),
            Line::from(""),
            Line::from(Span::styled(hint, Style::default().add_modifier(Modifier::BOLD))),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().bg(color).fg(Color::White)),
        );
        f.render_widget(Clear, area);
        f.render_widget(body, area);
    }

    fn panel<'a>(&self, title: &'a str, focus: Focus) -> Block<'a> {
        let border = if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Block::default().borders(Borders::ALL).title(title).border_style(border)
    }
}

impl<A, P> ChatApp<A, P>
where
    A: BotApi + 'static,
    P: Prompter + 'static,
{
    /// Feed one action in, spawning whatever command it triggers.
    pub fn handle(&mut self, action: Action, tx: &UnboundedSender<Action>) {
        match action {
            Action::Key(key) => {
                if let Some(command) = self.handle_key(key) {
                    self.spawn_command(command, tx.clone());
                }
            }
            other => self.update(other),
        }
    }
}

impl<A, P> AppController for ChatApp<A, P>
where
    A: BotApi + 'static,
    P: Prompter + 'static,
{
    fn update(&mut self, action: Action) {
        match action {
            Action::Alert(message, ack) => self.modals.push_back(Modal::Alert(message, ack)),
            Action::Confirm(message, answer) => {
                self.modals.push_back(Modal::Confirm(message, answer));
            }
            Action::Finished(command, outcome) => {
                debug!(%command, ?outcome, "command finished");
                self.last_outcome = Some((command, outcome));
            }
            Action::Key(key) => {
                // Without a sender, commands cannot be spawned; edits still apply.
                let _ = self.handle_key(key);
            }
            Action::Resize(width, height) => debug!(width, height, "terminal resized"),
            Action::Tick => {}
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let strings = self.strings();
        let view = self.controller.view().snapshot();

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(outer[0]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(columns[0]);

        let list_height = u16::try_from(view.templates.options().len())
            .unwrap_or(u16::MAX)
            .clamp(1, 8)
            + 2;
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(list_height),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(columns[1]);

        self.render_chat(f, left[0], &view, &strings);
        self.render_input(f, left[1], &view.message_input, strings.input_title, Focus::Message);
        self.render_templates(f, right[0], &view, &strings);
        self.render_input(
            f,
            right[1],
            &view.template_name_input,
            strings.template_name_title,
            Focus::TemplateName,
        );
        Self::render_debug_log(f, right[2], &view, &strings);

        let status = self
            .last_outcome
            .map(|(command, outcome)| format!("{command}: {outcome}"))
            .unwrap_or_default();
        let footer = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(u16::try_from(status.len()).unwrap_or(u16::MAX)),
            ])
            .split(outer[1]);
        let help = Paragraph::new(strings.help).style(Style::default().fg(Color::DarkGray));
        f.render_widget(help, footer[0]);
        f.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::Yellow)),
            footer[1],
        );

        self.render_modal(f, &strings);
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}
