//! Input handling for the native player.
//!
//! This module handles keyboard and mouse input events, dispatching
//! them to the appropriate handlers and returning control flow signals.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;

use crossterm::event::{Event, KeyEventKind};

use crate::player::clock::MediaClock;
use crate::player::controller::PlaybackController;
use crate::player::error::PlaybackError;
use crate::player::state::{InputResult, ViewState};

/// Handle any input event, dispatching to the appropriate handler.
///
/// # Arguments
/// * `event` - The crossterm event to handle
/// * `controller` - Playback controller receiving the intents
/// * `view` - Mutable reference to view state
/// * `seek_step` - Arrow-key seek step in seconds
///
/// # Returns
/// `InputResult` indicating whether to continue, submit a URL, or quit
pub fn handle_event<C: MediaClock>(
    event: Event,
    controller: &mut PlaybackController<C>,
    view: &mut ViewState,
    seek_step: f64,
) -> InputResult {
    match event {
        // Windows reports releases too
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            handle_key_event(key, controller, view, seek_step)
        }
        Event::Mouse(mouse) => handle_mouse_event(mouse, controller, view),
        Event::Resize(new_cols, new_rows) => {
            view.handle_resize(new_cols, new_rows);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus events, etc.
    }
}

/// Surface the outcome of a controller intent in the status area.
///
/// Source failures are already kept by the controller and shown from there;
/// unknown cue ids are only logged.
pub(crate) fn report(view: &mut ViewState, result: Result<(), PlaybackError>) {
    view.needs_render = true;
    match result {
        Ok(()) => {
            if view.message_is_error {
                view.clear_message();
            }
        }
        Err(PlaybackError::NoSession) => {
            view.set_message("No video loaded - press u to open one");
        }
        Err(PlaybackError::UnknownCue(id)) => {
            tracing::debug!(%id, "ignoring jump to unknown cue");
        }
        Err(PlaybackError::PlaybackSource { .. }) => {}
        Err(e) => view.set_error(e.to_string()),
    }
}
