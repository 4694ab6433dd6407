//! Rendering components for the native player.
//!
//! This module contains all the UI rendering functions for the player,
//! including the header, cue list, progress bar, status bar and help overlay.
//!
//! Screen layout (rows, 0-indexed):
//! - `0`: header
//! - `1..rows-3`: cue list
//! - `rows-3`: separator
//! - `rows-2`: progress bar
//! - `rows-1`: status bar

mod cues;
mod help;
mod progress;
mod status;

pub use cues::{build_cue_line, render_cue_list, render_empty_list, single_line, truncate_to_width};
pub use help::{calc_help_start_col, calc_help_start_row, render_help, HELP_BOX_WIDTH, HELP_LINES};
pub use progress::{
    bar_width, build_progress_bar_chars, format_duration, fraction_at_column, render_progress_bar,
};
pub use status::{
    build_header_text, count_digits, phase_label, render_header, render_separator_line,
    render_status_bar,
};

use std::io::Write;

use anyhow::Result;

use crate::player::clock::MediaClock;
use crate::player::controller::PlaybackController;
use crate::player::state::ViewState;

/// First row of the cue list.
pub const LIST_FIRST_ROW: u16 = 1;

/// Row of the progress bar for a terminal `term_rows` high.
pub fn progress_row(term_rows: u16) -> u16 {
    term_rows.saturating_sub(2)
}

/// Draw one full frame.
///
/// # Arguments
/// * `out` - Writer to render to
/// * `controller` - Source of playback state and the transcript
/// * `view` - Layout, selection and overlays
pub fn render_frame<W: Write, C: MediaClock>(
    out: &mut W,
    controller: &PlaybackController<C>,
    view: &ViewState,
) -> Result<()> {
    let cols = view.term_cols;
    let rows = view.term_rows;

    if view.show_help {
        render_help(out, cols, rows)?;
        out.flush()?;
        return Ok(());
    }

    let state = controller.state();
    let session = controller.session();
    let cues = controller.cues();

    write!(out, "\x1b[?25l")?;
    render_header(
        out,
        cols,
        session.map(|s| s.title.as_str()),
        state.active_cue_index,
        cues.len(),
        controller.phase(),
    )?;

    let list_rows = view.list_rows();
    if cues.is_empty() {
        let placeholder = match session {
            None => "Press u to open a video URL",
            Some(_) => "This video has no subtitles",
        };
        render_empty_list(out, cols, LIST_FIRST_ROW, list_rows, placeholder)?;
    } else {
        render_cue_list(
            out,
            cols,
            LIST_FIRST_ROW,
            list_rows,
            cues,
            view.list_offset,
            state.active_cue_index,
            view.selected,
        )?;
    }

    render_separator_line(out, cols, rows.saturating_sub(3))?;
    render_progress_bar(
        out,
        cols,
        progress_row(rows),
        state.current_time,
        state.duration,
        controller.active_cue().map(|c| c.start),
    )?;

    // A source error outranks other messages until playback recovers
    let source_error = controller.last_error().map(|e| e.to_string());
    let (message, is_error) = match (&source_error, &view.message) {
        (Some(err), _) => (Some(err.as_str()), true),
        (None, Some(msg)) => (Some(msg.as_str()), view.message_is_error),
        (None, None) => (None, false),
    };
    render_status_bar(
        out,
        cols,
        rows.saturating_sub(1),
        state.is_playing,
        view.prompt.as_deref(),
        message,
        is_error,
    )?;

    out.flush()?;
    Ok(())
}
