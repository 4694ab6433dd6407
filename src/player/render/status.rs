//! Header and status bar rendering for the native player.
//!
//! Displays the session title, playback state, messages and keyboard
//! shortcuts.

use std::io::Write;

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use super::cues::truncate_to_width;
use crate::player::state::PlaybackPhase;

const WHITE: &str = "\x1b[97m";
const GREEN: &str = "\x1b[32m";
const DARK_GREY: &str = "\x1b[90m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Count digits in a number (for width calculation).
///
/// # Arguments
/// * `n` - The number to count digits of
///
/// # Returns
/// The number of digits in the base-10 representation
#[inline]
pub fn count_digits(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        (n as f64).log10().floor() as usize + 1
    }
}

/// Render a separator line.
///
/// # Arguments
/// * `out` - Writer to render to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
pub fn render_separator_line<W: Write>(out: &mut W, width: u16, row: u16) -> Result<()> {
    let mut output = String::with_capacity(width as usize * 3 + 20);
    output.push_str(&format!("\x1b[{};1H{}", row + 1, DARK_GREY));
    for _ in 0..width {
        output.push('─');
    }
    output.push_str(RESET);
    write!(out, "{}", output)?;
    Ok(())
}

/// Short label for a phase, shown in the header.
pub fn phase_label(phase: PlaybackPhase) -> &'static str {
    match phase {
        PlaybackPhase::Idle => "no session",
        PlaybackPhase::Ready => "ready",
        PlaybackPhase::Playing => "playing",
        PlaybackPhase::Seeking => "seeking",
    }
}

/// Build the header text: title on the left, cue position on the right.
///
/// # Arguments
/// * `width` - Terminal width
/// * `title` - Session title, `None` before anything is loaded
/// * `active` - Active cue index
/// * `cue_count` - Number of cues in the transcript
/// * `phase` - Controller phase
///
/// # Returns
/// Plain text padded to exactly `width` columns
pub fn build_header_text(
    width: u16,
    title: Option<&str>,
    active: Option<usize>,
    cue_count: usize,
    phase: PlaybackPhase,
) -> String {
    let width = width as usize;
    let right = match (title, cue_count, active) {
        (None, _, _) => format!("{} ", phase_label(phase)),
        (_, 0, _) => format!("no subtitles · {} ", phase_label(phase)),
        (_, n, Some(i)) => format!("cue {}/{} · {} ", i + 1, n, phase_label(phase)),
        (_, n, None) => format!("-/{} · {} ", n, phase_label(phase)),
    };
    let right_width = right.width();

    let left = format!(" {}", title.unwrap_or("subplay"));
    let left_room = width.saturating_sub(right_width + 1);
    let left = truncate_to_width(&left, left_room);
    let gap = width.saturating_sub(left.width() + right_width);

    let mut text = String::with_capacity(width + 8);
    text.push_str(&left);
    text.push_str(&" ".repeat(gap));
    if left.width() + gap + right_width <= width {
        text.push_str(&right);
    }
    text
}

/// Render the header line.
pub fn render_header<W: Write>(
    out: &mut W,
    width: u16,
    title: Option<&str>,
    active: Option<usize>,
    cue_count: usize,
    phase: PlaybackPhase,
) -> Result<()> {
    let text = build_header_text(width, title, active, cue_count, phase);
    write!(out, "\x1b[1;1H\x1b[1m{}{}{}", WHITE, text, RESET)?;
    Ok(())
}

/// Render the status/controls bar.
///
/// Shows the URL prompt while it is open, otherwise the play state
/// followed by either the current message or the key hints.
///
/// # Arguments
/// * `out` - Writer to render to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `playing` - Whether the clock confirmed playback
/// * `prompt` - URL being typed, if the prompt is open
/// * `message` - Status message (errors, submission progress)
/// * `is_error` - Render the message in the error color
pub fn render_status_bar<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    playing: bool,
    prompt: Option<&str>,
    message: Option<&str>,
    is_error: bool,
) -> Result<()> {
    let mut output = String::with_capacity(256);
    let mut visible_len: usize = 0;
    let width = width as usize;

    output.push_str(&format!("\x1b[{};1H", row + 1));

    if let Some(input) = prompt {
        output.push_str(YELLOW);
        output.push_str(" URL: ");
        visible_len += 6;
        output.push_str(WHITE);
        // Keep the tail visible while typing long URLs
        let room = width.saturating_sub(visible_len + 1);
        let shown = tail_to_width(input, room);
        visible_len += shown.width();
        output.push_str(shown);
        output.push('█');
        visible_len += 1;
    } else {
        output.push_str(WHITE);
        output.push(' ');
        visible_len += 1;

        // ▶ and ⏸ are double-width
        let state = if playing { "⏸  " } else { "▶  " };
        output.push_str(state);
        visible_len += 4;

        if let Some(text) = message {
            output.push_str(if is_error { RED } else { GREEN });
            let room = width.saturating_sub(visible_len);
            let shown = truncate_to_width(text, room);
            visible_len += shown.width();
            output.push_str(&shown);
        } else {
            let play_action = if playing { ":pause " } else { ":play " };
            let hints: [(&str, &str); 6] = [
                ("space", play_action),
                ("←→", ":seek "),
                ("n/p", ":cue "),
                ("u", ":url "),
                ("?", ":hlp "),
                ("q", ":quit"),
            ];
            for (key, label) in hints {
                let needed = key.width() + label.len();
                if visible_len + needed > width {
                    break;
                }
                output.push_str(CYAN);
                output.push_str(key);
                output.push_str(DARK_GREY);
                output.push_str(label);
                visible_len += needed;
            }
        }
    }

    // Pad to full width to overwrite any leftover content
    let padding = width.saturating_sub(visible_len);
    output.push_str(&" ".repeat(padding));

    output.push_str(RESET);
    write!(out, "{}", output)?;

    Ok(())
}

/// Longest suffix of `text` fitting in `max_width` columns.
fn tail_to_width(text: &str, max_width: usize) -> &str {
    let mut start = text.len();
    let mut used = 0;
    for (idx, ch) in text.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}
