//! Subplay - synchronized subtitle playback
//!
//! Plays a processed video's audio while keeping the matching subtitle cue
//! highlighted. A processing backend turns a video URL into a title, an
//! audio locator and a transcript; the player keeps position, play state
//! and the active cue consistent while the user plays, pauses, seeks and
//! jumps between cues.

pub mod backend;
pub mod cli;
pub mod config;
pub mod logging;
pub mod player;
pub mod session;
pub mod theme;

pub use backend::{BackendError, FileBackend, HttpBackend, ProcessingBackend};
pub use config::Config;
pub use player::{PlaybackController, PlaybackError, PlaybackState};
pub use session::{CueId, MediaSession, SubtitleCue, Transcript};
