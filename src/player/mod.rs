//! Synchronized subtitle player
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `time_index`: time-to-cue lookup
//! - `clock`: the `MediaClock` contract and the wall-time clock
//! - `audio`: rodio-backed clock (`audio` feature)
//! - `controller`: `PlaybackController`, the only writer of `PlaybackState`
//! - `state`: `PlaybackState`, the controller phase and terminal `ViewState`
//! - `error`: `PlaybackError`
//! - `input/`: keyboard and mouse handling
//! - `render/`: header, cue list, progress bar, status bar, help overlay
//!
//! # Usage
//!
//! ```
//! use std::sync::mpsc;
//! use subplay::player::{PlaybackController, WallClock};
//! use subplay::session::SubtitleCue;
//!
//! let (tx, _rx) = mpsc::channel();
//! let mut controller = PlaybackController::new(WallClock::new(tx));
//! controller
//!     .load_cues("Demo", 10.0, "https://example.com/a.m4a", vec![
//!         SubtitleCue::new(0u64, 0.0, 2.0, "Hi"),
//!         SubtitleCue::new(1u64, 2.0, 5.0, "Bye"),
//!     ])
//!     .unwrap();
//! controller.seek(3.0).unwrap();
//! assert_eq!(controller.state().active_cue_index, Some(1));
//! ```

#[cfg(feature = "audio")]
pub mod audio;
pub mod clock;
pub mod controller;
pub mod error;
pub(crate) mod input;
mod native;
pub mod render;
pub mod state;
pub mod time_index;

#[cfg(feature = "audio")]
pub use audio::AudioClock;
pub use clock::{ClockError, ClockEvent, ClockNotification, MediaClock, WallClock};
pub use controller::PlaybackController;
pub use error::PlaybackError;
pub use native::{run_player, PlayerExit, StartWith};
pub use state::{InputResult, PlaybackPhase, PlaybackState, ViewState};
pub use time_index::TimeIndex;
