//! Play command handler

use anyhow::{Context, Result};

use subplay::player::{run_player, StartWith};
use subplay::theme::current_theme;
use subplay::{Config, HttpBackend};

/// Submit `url` to the backend and open the player.
///
/// The submission runs in the background, so the player is up (and can
/// be quit) while the backend is still processing.
#[cfg(not(tarpaulin_include))]
pub fn handle(url: &str, backend_url: Option<&str>, config: &Config) -> Result<()> {
    let base = backend_url.unwrap_or(config.backend.url.as_str());
    let backend = HttpBackend::new(base, config.backend.timeout())
        .with_context(|| format!("Failed to set up backend client for {}", base))?;
    super::require_terminal()?;

    let exit = run_player(
        StartWith::Url(url.to_string()),
        Box::new(backend),
        &config.player,
    )?;

    if let Some(title) = exit.last_title {
        let theme = current_theme();
        println!("{}", theme.primary_text(&format!("Finished: {}", title)));
    }
    Ok(())
}
