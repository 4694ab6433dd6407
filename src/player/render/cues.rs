//! Cue list rendering for the native player.
//!
//! Each row shows the cue's start time and its text. The active cue is
//! highlighted; the selected row is drawn in reverse video.

use std::io::Write;

use anyhow::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::progress::format_duration;
use crate::session::SubtitleCue;

const GREEN: &str = "\x1b[32m";
const BOLD: &str = "\x1b[1m";
const DARK_GREY: &str = "\x1b[90m";
const GREY: &str = "\x1b[37m";
const REVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

/// Truncate `text` to at most `max_width` display columns, marking the cut
/// with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Collapse line breaks so a cue fits on one row.
pub fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Build the visible text of one cue row.
///
/// # Arguments
/// * `cue` - The cue to show
/// * `width` - Terminal width
/// * `active` - Whether this is the active cue
///
/// # Returns
/// Plain text exactly `width` columns wide
pub fn build_cue_line(cue: &SubtitleCue, width: u16, active: bool) -> String {
    let width = width as usize;
    let marker = if active { '▸' } else { ' ' };
    let prefix = format!("{} {} ", marker, format_duration(cue.start));
    let room = width.saturating_sub(prefix.width());
    let text = truncate_to_width(&single_line(&cue.text), room);

    let mut line = String::with_capacity(width + 8);
    line.push_str(&prefix);
    line.push_str(&text);
    let used = line.width();
    if used > width {
        return truncate_to_width(&line, width);
    }
    line.push_str(&" ".repeat(width - used));
    line
}

/// Render the cue list between `first_row` and `first_row + rows`.
///
/// # Arguments
/// * `out` - Writer to render to
/// * `width` - Terminal width
/// * `first_row` - Row of the first list line (0-indexed)
/// * `rows` - Number of list rows available
/// * `cues` - The transcript
/// * `offset` - Index of the first cue shown
/// * `active` - Active cue index
/// * `selected` - Selected cue index
#[allow(clippy::too_many_arguments)]
pub fn render_cue_list<W: Write>(
    out: &mut W,
    width: u16,
    first_row: u16,
    rows: usize,
    cues: &[SubtitleCue],
    offset: usize,
    active: Option<usize>,
    selected: usize,
) -> Result<()> {
    let mut output = String::with_capacity(rows * (width as usize + 16));

    for i in 0..rows {
        let row = first_row + i as u16;
        output.push_str(&format!("\x1b[{};1H", row + 1));

        let idx = offset + i;
        let Some(cue) = cues.get(idx) else {
            output.push_str("\x1b[2K");
            continue;
        };

        let is_active = active == Some(idx);
        if idx == selected {
            output.push_str(REVERSE);
        }
        if is_active {
            output.push_str(BOLD);
            output.push_str(GREEN);
        } else if active.is_some_and(|a| idx < a) {
            output.push_str(DARK_GREY);
        } else {
            output.push_str(GREY);
        }
        output.push_str(&build_cue_line(cue, width, is_active));
        output.push_str(RESET);
    }

    write!(out, "{}", output)?;
    Ok(())
}

/// Render the placeholder shown when a session has no cues.
pub fn render_empty_list<W: Write>(
    out: &mut W,
    width: u16,
    first_row: u16,
    rows: usize,
    text: &str,
) -> Result<()> {
    let mut output = String::new();
    for i in 0..rows {
        output.push_str(&format!("\x1b[{};1H\x1b[2K", first_row + i as u16 + 1));
    }
    if rows > 0 {
        let shown = truncate_to_width(text, width.saturating_sub(2) as usize);
        output.push_str(&format!(
            "\x1b[{};1H{}  {}{}",
            first_row + 1,
            DARK_GREY,
            shown,
            RESET
        ));
    }
    write!(out, "{}", output)?;
    Ok(())
}
