mod app_state;
mod config;
mod console;
mod controller;
mod i18n;
mod prompt;
mod tui;
mod ui;

#[cfg(test)]
mod test_support;

use std::fs::{self, OpenOptions};
use std::io;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use potato_sdk::PotatoClient;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::app_state::{AppController, SharedView};
use crate::config::{ClientConfig, ConfigArgs};
use crate::console::{ConsoleCommand, ConsolePrompter};
use crate::controller::{ActionOutcome, ChatController, Command};
use crate::tui::{Action, EventHandler, Tui, TuiPrompter};
use crate::ui::chat::ChatApp;

const TICK_RATE_MS: u64 = 250;

#[derive(Parser, Debug)]
#[command(name = "potato-chat")]
#[command(about = "Terminal client for the Potato chat bot")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Run a single command instead of the interactive UI
    #[command(subcommand)]
    command: Option<ConsoleCommand>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let file = config::default_config_path()
        .map(|path| config::load_file_config(&path))
        .unwrap_or_default();
    let config = ClientConfig::resolve(&cli.config, file);
    info!(server = %config.server_url, locale = %config.locale, "starting");

    let api = PotatoClient::with_timeout(&config.server_url, config.timeout)
        .context("invalid server configuration")?;

    match cli.command {
        None => {
            run_tui(api, &config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(command) => run_console(api, &config, command).await,
    }
}

/// The TUI owns the terminal, so its log goes to a file; command mode logs
/// to stderr.
fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if cli.command.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return Ok(());
    }

    let path = config::log_path(&cli.config);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

async fn run_tui(api: PotatoClient, config: &ClientConfig) -> anyhow::Result<()> {
    let mut events = EventHandler::new(TICK_RATE_MS);
    let tx = events.get_sender();

    let controller = ChatController::new(
        Arc::new(api),
        Arc::new(TuiPrompter::new(tx.clone())),
        SharedView::default(),
        config.locale,
    );
    let mut app = ChatApp::new(controller, config.server_url.clone());
    app.spawn_command(Command::RefreshTemplates, tx.clone());

    let mut terminal = tui::init().context("failed to initialise terminal")?;
    let result = event_loop(&mut terminal, &mut app, &mut events, &tx).await;
    tui::restore().context("failed to restore terminal")?;
    info!("bye");
    result
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut ChatApp<PotatoClient, TuiPrompter>,
    events: &mut EventHandler,
    tx: &UnboundedSender<Action>,
) -> anyhow::Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| app.render(f))?;
        let Some(action) = events.next_async().await else {
            break;
        };
        app.handle(action, tx);
    }
    Ok(())
}

async fn run_console(
    api: PotatoClient,
    config: &ClientConfig,
    command: ConsoleCommand,
) -> anyhow::Result<ExitCode> {
    let prompter = ConsolePrompter::new(command.assume_yes(), config.locale);
    let controller = ChatController::new(
        Arc::new(api),
        Arc::new(prompter),
        SharedView::default(),
        config.locale,
    );

    let outcome = console::run(&controller, command, &mut io::stdout()).await?;
    info!(?outcome, "command done");
    Ok(match outcome {
        ActionOutcome::Completed | ActionOutcome::Skipped | ActionOutcome::Cancelled => {
            ExitCode::SUCCESS
        }
        ActionOutcome::Invalid | ActionOutcome::Busy | ActionOutcome::Failed => ExitCode::FAILURE,
    })
}
