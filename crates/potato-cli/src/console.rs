//! One-shot command mode.
//!
//! Each subcommand fills the relevant view input, runs a single controller
//! action and prints what changed. Alerts go to stdout; confirmations are
//! read from stdin unless `--yes` was given.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use clap::Subcommand;
use potato_models::{ChatTurn, TemplateName};
use potato_sdk::BotApi;
use tracing::debug;

use crate::app_state::ChatView;
use crate::controller::{ActionOutcome, ChatController, Command};
use crate::i18n::{t, Locale};
use crate::prompt::Prompter;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Send one chat message and print the reply
    Send {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// List saved templates
    Templates,
    /// Save the current bot state under a name
    Save { name: String },
    /// Load a saved template
    Load {
        name: String,
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Reset the bot to a saved template
    Reset {
        name: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete a saved template
    Delete {
        name: String,
        #[arg(long)]
        yes: bool,
    },
}

impl ConsoleCommand {
    /// Whether confirmations are answered without asking.
    pub fn assume_yes(&self) -> bool {
        match self {
            ConsoleCommand::Load { yes, .. }
            | ConsoleCommand::Reset { yes, .. }
            | ConsoleCommand::Delete { yes, .. } => *yes,
            _ => false,
        }
    }
}

/// Prompter for a plain terminal.
pub struct ConsolePrompter {
    assume_yes: bool,
    locale: Locale,
}

impl ConsolePrompter {
    pub fn new(assume_yes: bool, locale: Locale) -> Self {
        Self { assume_yes, locale }
    }
}

/// `y` or `yes`, any case. Everything else, including EOF, is a no.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl Prompter for ConsolePrompter {
    async fn alert(&self, message: &str) {
        println!("{message}");
    }

    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            debug!(message, "confirmation assumed");
            return true;
        }

        print!("{message}{}", t(self.locale).confirm_stdin_suffix);
        if io::stdout().flush().is_err() {
            return false;
        }

        let answer = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_yes(&line),
            _ => false,
        }
    }
}

/// Run `command` against `controller`, writing the result to `out`.
pub async fn run<A, P, W>(
    controller: &ChatController<A, P>,
    command: ConsoleCommand,
    out: &mut W,
) -> io::Result<ActionOutcome>
where
    A: BotApi,
    P: Prompter,
    W: Write,
{
    let view = controller.view();
    match command {
        ConsoleCommand::Send { message } => {
            let seen = view.read(|v| v.turns.len());
            view.update(|v| v.message_input = message.join(" "));
            let outcome = controller.dispatch(Command::SendMessage).await;

            let snapshot = view.snapshot();
            write_turns(out, &snapshot.turns[seen..])?;
            write_debug_log(out, &snapshot, controller.locale())?;
            Ok(outcome)
        }
        ConsoleCommand::Templates => {
            let outcome = controller.refresh_templates().await;
            if outcome == ActionOutcome::Completed {
                let snapshot = view.snapshot();
                for option in snapshot.templates.options() {
                    writeln!(out, "{}", option.label)?;
                }
            }
            Ok(outcome)
        }
        ConsoleCommand::Save { name } => {
            view.update(|v| v.template_name_input = name);
            Ok(controller.dispatch(Command::SaveTemplate).await)
        }
        ConsoleCommand::Load { name, .. } => {
            run_on_named(controller, Command::LoadTemplate, &name).await
        }
        ConsoleCommand::Reset { name, .. } => {
            run_on_named(controller, Command::ResetTemplate, &name).await
        }
        ConsoleCommand::Delete { name, .. } => {
            run_on_named(controller, Command::DeleteTemplate, &name).await
        }
    }
}

/// Refresh, select `name`, then dispatch `command` against the selection.
async fn run_on_named<A: BotApi, P: Prompter>(
    controller: &ChatController<A, P>,
    command: Command,
    name: &str,
) -> io::Result<ActionOutcome> {
    let refreshed = controller.refresh_templates().await;
    if refreshed != ActionOutcome::Completed {
        return Ok(refreshed);
    }

    let found = controller
        .view()
        .update(|v| v.templates.select_name(&TemplateName::from(name.trim())));
    if !found {
        debug!(name, %command, "template not in list");
        // The handler reports the missing selection itself.
        controller.view().update(|v| v.templates.deselect());
    }
    Ok(controller.dispatch(command).await)
}

fn write_turns<W: Write>(out: &mut W, turns: &[ChatTurn]) -> io::Result<()> {
    for turn in turns {
        writeln!(out, "{}: {}", turn.sender, turn.text)?;
    }
    Ok(())
}

fn write_debug_log<W: Write>(out: &mut W, view: &ChatView, locale: Locale) -> io::Result<()> {
    if view.debug_log.is_empty() {
        return Ok(());
    }
    writeln!(out, "--- {} ---", t(locale).debug_log_title)?;
    for entry in view.debug_log.entries() {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use clap::Parser;

    use crate::app_state::SharedView;
    use crate::test_support::{Call, MockApi, Reply, ScriptedPrompter};

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: ConsoleCommand,
    }

    fn parse(args: &[&str]) -> ConsoleCommand {
        Harness::parse_from(std::iter::once("potato-chat").chain(args.iter().copied())).command
    }

    fn setup(
        templates: &[&'static str],
        answer: bool,
    ) -> (ChatController<MockApi, ScriptedPrompter>, Arc<MockApi>, Arc<ScriptedPrompter>) {
        let api = Arc::new(MockApi::with_templates(templates));
        let prompter = Arc::new(ScriptedPrompter::answering(answer));
        let controller = ChatController::new(
            Arc::clone(&api),
            Arc::clone(&prompter),
            SharedView::default(),
            Locale::En,
        );
        (controller, api, prompter)
    }

    async fn run_to_string(
        controller: &ChatController<MockApi, ScriptedPrompter>,
        command: ConsoleCommand,
    ) -> (ActionOutcome, String) {
        let mut out = Vec::new();
        let outcome = run(controller, command, &mut out).await.unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn subcommands_parse() {
        assert_eq!(
            parse(&["send", "hello", "potato"]),
            ConsoleCommand::Send {
                message: vec!["hello".into(), "potato".into()]
            }
        );
        assert_eq!(parse(&["templates"]), ConsoleCommand::Templates);
        assert!(parse(&["delete", "old", "--yes"]).assume_yes());
        assert!(!parse(&["load", "old"]).assume_yes());
        assert!(!parse(&["save", "new"]).assume_yes());
    }

    #[tokio::test]
    async fn send_prints_new_turns_and_debug_log() {
        let (controller, api, _) = setup(&[], true);
        let (outcome, out) = run_to_string(
            &controller,
            ConsoleCommand::Send {
                message: vec!["hi".into(), "there".into()],
            },
        )
        .await;

        assert_eq!(outcome, ActionOutcome::Completed);
        assert_eq!(api.calls(), vec![Call::Chat("hi there".into())]);
        assert_eq!(
            out,
            "You: hi there\nPotato: hello from potato\n--- Debug log ---\n--- turn 1 ---\nguardrail ok\n"
        );
    }

    #[tokio::test]
    async fn templates_lists_names_or_placeholder() {
        let (controller, _, _) = setup(&["alpha", "beta"], true);
        let (_, out) = run_to_string(&controller, ConsoleCommand::Templates).await;
        assert_eq!(out, "alpha\nbeta\n");

        let (controller, _, _) = setup(&[], true);
        let (_, out) = run_to_string(&controller, ConsoleCommand::Templates).await;
        assert_eq!(out, "No templates saved\n");
    }

    #[tokio::test]
    async fn delete_targets_named_template() {
        let (controller, api, prompter) = setup(&["alpha", "beta"], true);
        api.set_mutation(Reply::Ok("Template 'beta' deleted."));
        let (outcome, _) = run_to_string(
            &controller,
            ConsoleCommand::Delete {
                name: "beta".into(),
                yes: true,
            },
        )
        .await;

        assert_eq!(outcome, ActionOutcome::Completed);
        assert_eq!(api.calls(), vec![Call::List, Call::Delete("beta".into()), Call::List]);
        assert_eq!(prompter.alerts(), ["Template 'beta' deleted."]);
    }

    #[tokio::test]
    async fn unknown_name_is_rejected_without_request() {
        let (controller, api, prompter) = setup(&["alpha"], true);
        let (outcome, _) = run_to_string(
            &controller,
            ConsoleCommand::Load {
                name: "ghost".into(),
                yes: true,
            },
        )
        .await;

        assert_eq!(outcome, ActionOutcome::Invalid);
        assert_eq!(api.calls(), vec![Call::List]);
        assert_eq!(prompter.alerts(), ["Please select a template."]);
    }

    #[tokio::test]
    async fn declined_reset_sends_nothing() {
        let (controller, api, _) = setup(&["alpha"], false);
        let (outcome, _) = run_to_string(
            &controller,
            ConsoleCommand::Reset {
                name: "alpha".into(),
                yes: false,
            },
        )
        .await;

        assert_eq!(outcome, ActionOutcome::Cancelled);
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn save_uses_given_name() {
        let (controller, api, _) = setup(&["fresh"], true);
        let (outcome, _) = run_to_string(&controller, ConsoleCommand::Save { name: "fresh".into() }).await;
        assert_eq!(outcome, ActionOutcome::Completed);
        assert_eq!(api.calls(), vec![Call::Save("fresh".into()), Call::List]);
    }
}
