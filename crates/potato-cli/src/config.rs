//! Client configuration.
//!
//! Settings come from three layers, highest first: command-line flags (or
//! their environment variables), the optional JSON file at
//! `<config dir>/potato-chat/config.json`, and built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::i18n::Locale;

const APP_DIR: &str = "potato-chat";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "client.log";

/// Server address used when neither flag, environment nor file sets one.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Base URL of the Potato server
    #[arg(long, global = true, env = "POTATO_SERVER_URL")]
    pub server: Option<String>,

    /// Interface language
    #[arg(long, global = true, value_enum, env = "POTATO_LANG")]
    pub lang: Option<Locale>,

    /// Per-request timeout in seconds (none by default)
    #[arg(long, global = true, env = "POTATO_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Where the TUI writes its log
    #[arg(long, global = true, env = "POTATO_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Contents of the optional config file. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub locale: Option<Locale>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    pub locale: Locale,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Merge flags over the file over defaults.
    pub fn resolve(args: &ConfigArgs, file: FileConfig) -> Self {
        Self {
            server_url: args
                .server
                .clone()
                .or(file.server_url)
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            locale: args.lang.or(file.locale).unwrap_or_default(),
            timeout: args.timeout.map(Duration::from_secs),
        }
    }
}

/// `<config dir>/potato-chat/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_DIR).join(CONFIG_FILE))
}

/// Log file location: the flag, else `<data dir>/potato-chat/client.log`,
/// else `client.log` in the working directory.
pub fn log_path(args: &ConfigArgs) -> PathBuf {
    args.log_file.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR).join(LOG_FILE))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE))
    })
}

/// Read the config file. A missing file is the empty config; an unreadable
/// or malformed one is logged and treated the same way.
pub fn load_file_config(path: &Path) -> FileConfig {
    if !path.exists() {
        debug!(path = %path.display(), "no config file");
        return FileConfig::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config file, ignoring");
            return FileConfig::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => {
            debug!(path = %path.display(), "loaded config file");
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed config file, ignoring");
            FileConfig::default()
        }
    }
}
