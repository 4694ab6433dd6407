//! Cues command handler

use std::path::Path;

use anyhow::{Context, Result};

use subplay::backend::file::load_transcript;
use subplay::player::render::{format_duration, single_line};
use subplay::theme::{current_theme, Theme};
use subplay::SubtitleCue;

/// Print every cue of a session file, one per line.
pub fn handle(file: &Path) -> Result<()> {
    let transcript =
        load_transcript(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let theme = current_theme();

    if transcript.is_empty() {
        println!(
            "{}",
            theme.secondary_text(&format!("No subtitles in {}", file.display()))
        );
        return Ok(());
    }

    for cue in transcript.cues() {
        println!("{}", format_cue(cue, &theme));
    }
    Ok(())
}

/// `[id] MM:SS - MM:SS  text`
fn format_cue(cue: &SubtitleCue, theme: &Theme) -> String {
    format!(
        "{} {}  {}",
        theme.accent_text(&format!("[{}]", cue.id)),
        theme.secondary_text(&format!(
            "{} - {}",
            format_duration(cue.start),
            format_duration(cue.end)
        )),
        theme.primary_text(&single_line(&cue.text))
    )
}
