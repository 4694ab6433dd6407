//! Subcommand handlers

pub mod config;
pub mod cues;
pub mod open;
pub mod play;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{bail, Result};
use subplay::Config;

/// Load the config from `--config` or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Install file logging. A log file that cannot be opened only costs the
/// logs, so the failure is printed and the command continues.
pub fn init_logging(config: &Config, level_override: Option<&str>) {
    let level = level_override.unwrap_or_else(|| config.log_level());
    let result = config
        .log_file()
        .and_then(|path| subplay::logging::init_tracing(level, &path));
    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
}

/// The player draws in raw mode; refuse to start without a terminal.
pub fn require_terminal() -> Result<()> {
    if !std::io::stdout().is_terminal() {
        bail!("The player needs an interactive terminal");
    }
    Ok(())
}
