//! Command line definitions
//!
//! Lives in the library so `xtask` can render man pages from it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// `--version` text: package version plus the commit and build date from
/// `build.rs` (release builds leave the commit out).
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("SUBPLAY_BUILD_DATE"),
    ")"
);
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SUBPLAY_BUILD_DATE"),
    ")"
);

/// Subtitle player - play a video's audio with its subtitles in sync
#[derive(Debug, Parser)]
#[command(name = "subplay", version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/subplay/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (overrides the config file)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Submit a video URL to the backend and play the result
    Play {
        /// Video URL to process
        url: String,

        /// Backend base URL (overrides the config file)
        #[arg(long, value_name = "URL")]
        backend: Option<String>,
    },

    /// Open a saved backend response (.json) or a subtitle file (.srt)
    Open {
        /// Session file
        file: PathBuf,

        /// Audio URL or path (required for .srt files)
        #[arg(long, value_name = "LOCATOR")]
        audio: Option<String>,

        /// Title to display
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the transcript of a session file
    Cues {
        /// Session file (.json or .srt)
        file: PathBuf,
    },

    /// Show or initialize configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a default config file if none exists
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn play_parses_backend_override() {
        let cli = Cli::parse_from(["subplay", "play", "https://v/1", "--backend", "http://b"]);
        match cli.command {
            Commands::Play { url, backend } => {
                assert_eq!(url, "https://v/1");
                assert_eq!(backend.as_deref(), Some("http://b"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn version_carries_build_date() {
        assert!(VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(VERSION.contains(env!("SUBPLAY_BUILD_DATE")));
        assert_eq!(Cli::command().get_version(), Some(VERSION));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["subplay", "cues", "a.json", "--log-level", "debug"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
