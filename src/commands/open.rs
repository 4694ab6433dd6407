//! Open command handler

use std::path::Path;

use anyhow::{Context, Result};

use subplay::player::{run_player, StartWith};
use subplay::theme::current_theme;
use subplay::{Config, FileBackend, HttpBackend, ProcessingBackend};

/// Open a saved session file in the player.
///
/// Audio served by the backend and URLs submitted from inside the player
/// both go to the configured backend.
pub fn handle(
    file: &Path,
    audio: Option<String>,
    title: Option<String>,
    config: &Config,
) -> Result<()> {
    let session = FileBackend::new(audio, title)
        .with_base_url(config.backend.url.as_str())
        .submit(&file.to_string_lossy())
        .with_context(|| format!("Failed to open {}", file.display()))?;
    tracing::info!(
        file = %file.display(),
        cues = session.transcript.len(),
        "opened session file"
    );

    let backend = HttpBackend::new(&config.backend.url, config.backend.timeout())?;
    super::require_terminal()?;

    let exit = run_player(StartWith::Session(session), Box::new(backend), &config.player)?;

    if let Some(title) = exit.last_title {
        let theme = current_theme();
        println!("{}", theme.primary_text(&format!("Finished: {}", title)));
    }
    Ok(())
}
