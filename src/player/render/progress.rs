//! Progress bar rendering for the native player.
//!
//! Displays playback progress with the active cue's start marked.

use std::io::Write;

use anyhow::Result;

/// Columns taken by padding and the time display around the bar.
const BAR_CHROME_COLS: usize = 14;

/// First column of the bar.
pub const BAR_START_COL: u16 = 1;

/// Format a duration in seconds to MM:SS format.
///
/// # Arguments
/// * `seconds` - Duration in seconds
///
/// # Returns
/// A string in MM:SS format
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Width of the bar for a terminal `term_cols` wide.
pub fn bar_width(term_cols: u16) -> usize {
    (term_cols as usize).saturating_sub(BAR_CHROME_COLS)
}

/// Map a clicked column to a fraction of the media.
///
/// Returns `None` when the column is outside the bar.
pub fn fraction_at_column(column: u16, term_cols: u16) -> Option<f64> {
    let width = bar_width(term_cols);
    if width == 0 || column < BAR_START_COL {
        return None;
    }
    let offset = (column - BAR_START_COL) as usize;
    if offset >= width {
        return None;
    }
    Some(offset as f64 / width as f64)
}

/// Build the progress bar character array.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `current_time` - Current playback time
/// * `total_duration` - Total duration of the media
/// * `cue_start` - Start of the active cue, marked with `◆`
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where bar_chars contains the visual
/// representation and filled_count is the number of filled positions.
pub fn build_progress_bar_chars(
    bar_width: usize,
    current_time: f64,
    total_duration: f64,
    cue_start: Option<f64>,
) -> (Vec<char>, usize) {
    let progress = if total_duration > 0.0 {
        (current_time / total_duration).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec!['─'; bar_width];

    if filled < bar_width {
        bar[filled] = '⏺';
    }

    if let Some(start) = cue_start {
        if total_duration > 0.0 {
            let pos = ((start / total_duration) * bar_width as f64) as usize;
            if pos < bar_width && bar[pos] != '⏺' {
                bar[pos] = '◆';
            }
        }
    }

    (bar, filled)
}

/// Render the progress bar.
///
/// # Arguments
/// * `out` - Writer to render to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `current_time` - Current playback time
/// * `total_duration` - Total duration of the media
/// * `cue_start` - Start of the active cue, if any
pub fn render_progress_bar<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    current_time: f64,
    total_duration: f64,
    cue_start: Option<f64>,
) -> Result<()> {
    let bar_width = bar_width(width);
    let (bar, filled) = build_progress_bar_chars(bar_width, current_time, total_duration, cue_start);

    let time_display = format!(
        " {}/{}",
        format_duration(current_time),
        format_duration(total_duration)
    );

    let mut output = String::with_capacity(width as usize * 4);
    output.push_str(&format!("\x1b[{};1H", row + 1));
    output.push_str("\x1b[48;5;236m ");

    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const GREY: &str = "\x1b[37m";

    output.push_str(GREEN);
    for (i, &c) in bar.iter().enumerate() {
        if i < filled {
            if c == '◆' {
                output.push_str(YELLOW);
                output.push(c);
                output.push_str(GREEN);
            } else {
                output.push('━');
            }
        } else if i == filled {
            output.push_str(WHITE);
            output.push(c);
        } else if c == '◆' {
            output.push_str(YELLOW);
            output.push(c);
        } else {
            output.push_str(DARK_GREY);
            output.push(c);
        }
    }

    output.push_str(GREY);
    output.push_str(&time_display);

    let used_width = 1 + bar_width + time_display.len();
    let remaining = (width as usize).saturating_sub(used_width);
    output.push_str(&" ".repeat(remaining));

    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;

    Ok(())
}
