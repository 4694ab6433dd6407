//! subplay command line entry point

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use subplay::cli::{Cli, Commands, ConfigCommands};
use subplay::theme::current_theme;

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Play { url, backend } => {
            let config = commands::load_config(config_path)?;
            commands::init_logging(&config, cli.log_level.as_deref());
            commands::play::handle(&url, backend.as_deref(), &config)
        }
        Commands::Open { file, audio, title } => {
            let config = commands::load_config(config_path)?;
            commands::init_logging(&config, cli.log_level.as_deref());
            commands::open::handle(&file, audio, title, &config)
        }
        Commands::Cues { file } => commands::cues::handle(&file),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_path),
            ConfigCommands::Path => commands::config::handle_path(config_path),
            ConfigCommands::Init => commands::config::handle_init(config_path),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let theme = current_theme();
            eprintln!("{}", theme.error_text(&format!("Error: {:#}", e)));
            ExitCode::FAILURE
        }
    }
}
