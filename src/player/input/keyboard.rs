//! Keyboard input handling for the native player.
//!
//! Handles all keyboard shortcuts including playback controls, cue
//! navigation, seeking and the URL prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::report;
use crate::player::clock::MediaClock;
use crate::player::controller::PlaybackController;
use crate::player::state::{InputResult, ViewState};

/// Fraction of the duration skipped by Shift+arrow.
const LARGE_SEEK_FRACTION: f64 = 0.05;

/// Handle a keyboard event.
///
/// This is the main keyboard input handler that processes all key events
/// and updates state or returns control flow signals.
///
/// # Arguments
/// * `key` - The key event
/// * `controller` - Playback controller receiving the intents
/// * `view` - View state (selection, overlays, prompt)
/// * `seek_step` - Arrow-key seek step in seconds
pub fn handle_key_event<C: MediaClock>(
    key: KeyEvent,
    controller: &mut PlaybackController<C>,
    view: &mut ViewState,
    seek_step: f64,
) -> InputResult {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Quit;
    }

    // If help is showing, any key closes it
    if view.show_help {
        view.show_help = false;
        view.needs_render = true;
        return InputResult::Continue;
    }

    if view.prompt.is_some() {
        return handle_prompt_key(key, view);
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,

        // === Overlays ===
        KeyCode::Char('?') => {
            view.toggle_help();
            InputResult::Continue
        }
        KeyCode::Char('u') => {
            view.prompt = Some(String::new());
            view.needs_render = true;
            InputResult::Continue
        }

        // === Playback controls ===
        KeyCode::Char(' ') => {
            report(view, controller.toggle_playback());
            InputResult::Continue
        }

        // === Seeking ===
        KeyCode::Left => {
            let delta = seek_delta(controller, key.modifiers, seek_step);
            report(view, controller.seek_relative(-delta));
            InputResult::Continue
        }
        KeyCode::Right => {
            let delta = seek_delta(controller, key.modifiers, seek_step);
            report(view, controller.seek_relative(delta));
            InputResult::Continue
        }
        KeyCode::Home => {
            report(view, controller.seek(0.0));
            InputResult::Continue
        }
        KeyCode::End => {
            report(view, controller.seek_by_fraction(1.0));
            InputResult::Continue
        }

        // === Cue navigation ===
        KeyCode::Char('n') => {
            view.selection_pinned = false;
            report(view, controller.next_cue().map(|_| ()));
            InputResult::Continue
        }
        KeyCode::Char('p') => {
            view.selection_pinned = false;
            report(view, controller.previous_cue().map(|_| ()));
            InputResult::Continue
        }
        KeyCode::Up => {
            view.move_selection(-1, controller.cues().len());
            InputResult::Continue
        }
        KeyCode::Down => {
            view.move_selection(1, controller.cues().len());
            InputResult::Continue
        }
        KeyCode::PageUp => {
            let page = view.list_rows().max(1) as isize;
            view.move_selection(-page, controller.cues().len());
            InputResult::Continue
        }
        KeyCode::PageDown => {
            let page = view.list_rows().max(1) as isize;
            view.move_selection(page, controller.cues().len());
            InputResult::Continue
        }
        KeyCode::Enter => {
            jump_to_selected(controller, view);
            InputResult::Continue
        }

        _ => InputResult::Continue,
    }
}

/// Seek distance for an arrow key: the configured step, or a share of the
/// duration with Shift held.
fn seek_delta<C: MediaClock>(
    controller: &PlaybackController<C>,
    modifiers: KeyModifiers,
    seek_step: f64,
) -> f64 {
    let duration = controller.state().duration;
    if modifiers.contains(KeyModifiers::SHIFT) && duration > 0.0 {
        duration * LARGE_SEEK_FRACTION
    } else {
        seek_step
    }
}

/// Seek to the selected cue and let the list follow playback again.
fn jump_to_selected<C: MediaClock>(controller: &mut PlaybackController<C>, view: &mut ViewState) {
    let Some(id) = controller.cues().get(view.selected).map(|c| c.id.clone()) else {
        return;
    };
    view.selection_pinned = false;
    report(view, controller.jump_to_cue(&id));
}

/// Keys while the URL prompt is open.
fn handle_prompt_key(key: KeyEvent, view: &mut ViewState) -> InputResult {
    let Some(input) = view.prompt.as_mut() else {
        return InputResult::Continue;
    };
    view.needs_render = true;

    match key.code {
        KeyCode::Esc => {
            view.prompt = None;
            InputResult::Continue
        }
        KeyCode::Enter => {
            let url = input.trim().to_string();
            view.prompt = None;
            InputResult::Submit(url)
        }
        KeyCode::Backspace => {
            input.pop();
            InputResult::Continue
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.push(c);
            InputResult::Continue
        }
        _ => InputResult::Continue,
    }
}
