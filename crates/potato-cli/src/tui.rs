use async_trait::async_trait;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

use crate::controller::{ActionOutcome, Command};
use crate::prompt::Prompter;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub fn init() -> io::Result<Tui> {
    execute!(io::stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

pub fn restore() -> io::Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

#[derive(Debug)]
pub enum Action {
    Tick,
    Resize(u16, u16),
    Key(event::KeyEvent),
    /// Show a message; reply once the user dismissed it.
    Alert(String, oneshot::Sender<()>),
    /// Ask yes/no; reply with the answer.
    Confirm(String, oneshot::Sender<bool>),
    Finished(Command, ActionOutcome),
}

pub struct EventHandler {
    sender: mpsc::UnboundedSender<Action>,
    receiver: mpsc::UnboundedReceiver<Action>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        // 1. Tick Loop (Async)
        let tick_sender = sender.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(tick_rate));
            loop {
                interval.tick().await;
                if tick_sender.send(Action::Tick).is_err() {
                    break;
                }
            }
        });

        // 2. Input Loop (Blocking Thread)
        let event_sender = sender.clone();
        std::thread::spawn(move || loop {
            // Blocks until event available
            match event::read() {
                Ok(Event::Key(key)) => {
                    if key.kind == KeyEventKind::Press && event_sender.send(Action::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(Event::Resize(w, h)) => {
                    if event_sender.send(Action::Resize(w, h)).is_err() {
                        break;
                    }
                }
                // On error, we exit the input loop
                Err(_) => break,
                _ => {}
            }
        });

        Self { sender, receiver }
    }

    pub async fn next_async(&mut self) -> Option<Action> {
        self.receiver.recv().await
    }

    pub fn get_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.sender.clone()
    }
}

/// Routes controller prompts to the render loop as modal dialogs.
pub struct TuiPrompter {
    tx: mpsc::UnboundedSender<Action>,
}

impl TuiPrompter {
    pub fn new(tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Prompter for TuiPrompter {
    async fn alert(&self, message: &str) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Action::Alert(message.to_string(), ack)).is_ok() {
            // The loop is gone when this errors; nothing left to wait for.
            let _ = done.await;
        }
    }

    async fn confirm(&self, message: &str) -> bool {
        let (answer, reply) = oneshot::channel();
        if self.tx.send(Action::Confirm(message.to_string(), answer)).is_err() {
            return false;
        }
        reply.await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn confirm_resolves_with_loop_answer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let prompter = TuiPrompter::new(tx);

        let answered = tokio::spawn(async move { prompter.confirm("sure?").await });
        match rx.recv().await {
            Some(Action::Confirm(question, answer)) => {
                assert_eq!(question, "sure?");
                answer.send(true).unwrap();
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert!(answered.await.unwrap());
    }

    #[tokio::test]
    async fn confirm_is_no_when_dialog_is_dropped() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let prompter = TuiPrompter::new(tx);

        let answered = tokio::spawn(async move { prompter.confirm("sure?").await });
        drop(rx.recv().await);
        assert!(!answered.await.unwrap());
    }

    #[tokio::test]
    async fn alert_waits_for_acknowledgement() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let prompter = TuiPrompter::new(tx);

        let shown = tokio::spawn(async move { prompter.alert("saved").await });
        let Some(Action::Alert(message, ack)) = rx.recv().await else {
            panic!("expected alert");
        };
        assert_eq!(message, "saved");
        assert!(!shown.is_finished());
        ack.send(()).unwrap();
        shown.await.unwrap();
    }

    #[tokio::test]
    async fn prompts_without_a_loop_do_not_hang() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let prompter = TuiPrompter::new(tx);
        prompter.alert("nobody listens").await;
        assert!(!prompter.confirm("anyone?").await);
    }
}
