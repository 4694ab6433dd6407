//! Player state management
//!
//! Contains the `PlaybackState` value object owned by the controller, the
//! controller phase, and the view-only `ViewState` used by the terminal
//! player for layout, selection and overlays.

/// Result of processing an input event.
///
/// This enum is returned by input handlers to signal control flow
/// decisions to the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Submit a new URL to the backend
    Submit(String),
    /// Exit the player
    Quit,
}

/// Lifecycle phase of the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// No session loaded
    #[default]
    Idle,
    /// Session loaded, clock stopped
    Ready,
    /// Clock advancing
    Playing,
    /// A reposition was issued and not yet confirmed by the clock
    Seeking,
}

/// Observable playback state.
///
/// Only the controller mutates this; views read it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    /// Current position in seconds
    pub current_time: f64,
    /// Media duration in seconds (0 until metadata is known)
    pub duration: f64,
    /// Whether the clock confirmed it is playing
    pub is_playing: bool,
    /// Index of the cue containing `current_time`, if any
    pub active_cue_index: Option<usize>,
}

impl PlaybackState {
    /// Fraction of the media played, in `0.0..=1.0` (0 when duration unknown).
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Terminal view state for the native player.
///
/// Everything here is presentation: none of it is consulted by the
/// controller.
#[derive(Debug)]
pub struct ViewState {
    // === Terminal ===
    /// Current terminal width
    pub term_cols: u16,
    /// Current terminal height
    pub term_rows: u16,

    // === Cue list ===
    /// Highlighted row in the cue list (follows the active cue unless pinned)
    pub selected: usize,
    /// True once the user moved the selection by hand
    pub selection_pinned: bool,
    /// First cue index shown in the list viewport
    pub list_offset: usize,

    // === Overlays and prompt ===
    /// Whether help overlay is visible
    pub show_help: bool,
    /// URL being typed, when the submit prompt is open
    pub prompt: Option<String>,
    /// One-line message for the status area (errors, submission progress)
    pub message: Option<String>,
    /// Whether `message` reports a failure
    pub message_is_error: bool,

    // === Rendering flags ===
    /// True when screen needs to be redrawn
    pub needs_render: bool,
}

impl ViewState {
    /// Rows used by chrome: header + separator + progress + status
    pub const CHROME_LINES: u16 = 4;

    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            term_cols,
            term_rows,
            selected: 0,
            selection_pinned: false,
            list_offset: 0,
            show_help: false,
            prompt: None,
            message: None,
            message_is_error: false,
            needs_render: true,
        }
    }

    /// Number of cue rows that fit between the header and the footer.
    pub fn list_rows(&self) -> usize {
        self.term_rows.saturating_sub(Self::CHROME_LINES) as usize
    }

    /// Handle terminal resize event, keeping the selection visible.
    pub fn handle_resize(&mut self, new_cols: u16, new_rows: u16) {
        self.term_cols = new_cols;
        self.term_rows = new_rows;
        self.scroll_to_selection();
        self.needs_render = true;
    }

    /// Reset selection and scrolling for a newly loaded transcript.
    pub fn reset_for_session(&mut self) {
        self.selected = 0;
        self.selection_pinned = false;
        self.list_offset = 0;
        self.needs_render = true;
    }

    /// Follow the active cue unless the user pinned the selection.
    pub fn follow_active(&mut self, active: Option<usize>) {
        if self.selection_pinned {
            return;
        }
        if let Some(idx) = active {
            if idx != self.selected {
                self.selected = idx;
                self.scroll_to_selection();
                self.needs_render = true;
            }
        }
    }

    /// Move the selection by `delta` rows within `cue_count` cues.
    pub fn move_selection(&mut self, delta: isize, cue_count: usize) {
        if cue_count == 0 {
            return;
        }
        let max = cue_count - 1;
        self.selected = if delta < 0 {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            (self.selected + delta as usize).min(max)
        };
        self.selection_pinned = true;
        self.scroll_to_selection();
        self.needs_render = true;
    }

    /// Adjust `list_offset` so the selected row is on screen.
    pub fn scroll_to_selection(&mut self) {
        let rows = self.list_rows().max(1);
        if self.selected < self.list_offset {
            self.list_offset = self.selected;
        } else if self.selected >= self.list_offset + rows {
            self.list_offset = self.selected + 1 - rows;
        }
    }

    /// Toggle help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    /// Show a status message until replaced.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.message_is_error = false;
        self.needs_render = true;
    }

    /// Show an error in the status area until replaced.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.message_is_error = true;
        self.needs_render = true;
    }

    pub fn clear_message(&mut self) {
        if self.message.take().is_some() {
            self.needs_render = true;
        }
        self.message_is_error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_playback_state_is_idle_like() {
        let state = PlaybackState::default();
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.duration, 0.0);
        assert!(!state.is_playing);
        assert_eq!(state.active_cue_index, None);
    }

    #[test]
    fn progress_is_zero_without_duration() {
        let state = PlaybackState {
            current_time: 5.0,
            ..Default::default()
        };
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn progress_is_clamped() {
        let state = PlaybackState {
            current_time: 15.0,
            duration: 10.0,
            ..Default::default()
        };
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn list_rows_excludes_chrome() {
        let view = ViewState::new(80, 24);
        assert_eq!(view.list_rows(), 20);
    }

    #[test]
    fn follow_active_scrolls_down() {
        let mut view = ViewState::new(80, 10); // 6 list rows
        view.follow_active(Some(8));
        assert_eq!(view.selected, 8);
        assert_eq!(view.list_offset, 3);
    }

    #[test]
    fn follow_active_ignores_none() {
        let mut view = ViewState::new(80, 10);
        view.selected = 2;
        view.follow_active(None);
        assert_eq!(view.selected, 2);
    }

    #[test]
    fn pinned_selection_is_not_moved_by_playback() {
        let mut view = ViewState::new(80, 10);
        view.move_selection(1, 5);
        view.follow_active(Some(4));
        assert_eq!(view.selected, 1);
    }

    #[test]
    fn move_selection_clamps() {
        let mut view = ViewState::new(80, 10);
        view.move_selection(-3, 5);
        assert_eq!(view.selected, 0);
        view.move_selection(10, 5);
        assert_eq!(view.selected, 4);
    }

    #[test]
    fn move_selection_with_no_cues_is_noop() {
        let mut view = ViewState::new(80, 10);
        view.move_selection(1, 0);
        assert_eq!(view.selected, 0);
        assert!(!view.selection_pinned);
    }

    #[test]
    fn scroll_up_to_selection() {
        let mut view = ViewState::new(80, 10);
        view.list_offset = 5;
        view.selected = 2;
        view.scroll_to_selection();
        assert_eq!(view.list_offset, 2);
    }

    #[test]
    fn reset_for_session_clears_selection() {
        let mut view = ViewState::new(80, 10);
        view.move_selection(3, 5);
        view.reset_for_session();
        assert_eq!(view.selected, 0);
        assert!(!view.selection_pinned);
        assert_eq!(view.list_offset, 0);
    }

    #[test]
    fn error_message_is_flagged_until_replaced() {
        let mut view = ViewState::new(80, 10);
        view.set_error("Video not found");
        assert!(view.message_is_error);
        view.set_message("Processing...");
        assert!(!view.message_is_error);
        view.clear_message();
        assert_eq!(view.message, None);
    }

    #[test]
    fn input_result_variants() {
        assert_eq!(InputResult::Continue, InputResult::Continue);
        assert_ne!(InputResult::Quit, InputResult::Continue);
        assert_eq!(
            InputResult::Submit("u".to_string()),
            InputResult::Submit("u".to_string())
        );
    }
}
