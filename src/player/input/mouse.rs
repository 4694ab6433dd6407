//! Mouse input handling for the native player.
//!
//! Left click on the progress bar seeks to that position, left click on a
//! cue row jumps to that cue, and the wheel moves the selection.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::report;
use crate::player::clock::MediaClock;
use crate::player::controller::PlaybackController;
use crate::player::render::{fraction_at_column, progress_row, LIST_FIRST_ROW};
use crate::player::state::{InputResult, ViewState};

/// Handle a mouse event.
pub fn handle_mouse_event<C: MediaClock>(
    mouse: MouseEvent,
    controller: &mut PlaybackController<C>,
    view: &mut ViewState,
) -> InputResult {
    if view.show_help || view.prompt.is_some() {
        return InputResult::Continue;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == progress_row(view.term_rows) {
                if let Some(fraction) = fraction_at_column(mouse.column, view.term_cols) {
                    report(view, controller.seek_by_fraction(fraction));
                }
            } else if let Some(idx) = cue_at_row(view, mouse.row, controller.cues().len()) {
                let id = controller.cues()[idx].id.clone();
                view.selected = idx;
                view.selection_pinned = false;
                report(view, controller.jump_to_cue(&id));
            }
        }
        MouseEventKind::ScrollUp => view.move_selection(-1, controller.cues().len()),
        MouseEventKind::ScrollDown => view.move_selection(1, controller.cues().len()),
        _ => {}
    }

    InputResult::Continue
}

/// Index of the cue drawn on screen row `row`, if any.
fn cue_at_row(view: &ViewState, row: u16, cue_count: usize) -> Option<usize> {
    if row < LIST_FIRST_ROW {
        return None;
    }
    let line = (row - LIST_FIRST_ROW) as usize;
    if line >= view.list_rows() {
        return None;
    }
    let idx = view.list_offset + line;
    (idx < cue_count).then_some(idx)
}
