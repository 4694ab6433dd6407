//! Playback controller errors.

use crate::session::CueId;

/// Errors returned synchronously by controller operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaybackError {
    #[error("Invalid session: {reason}")]
    InvalidSession { reason: String },

    #[error("Unknown cue id: {0}")]
    UnknownCue(CueId),

    #[error("Cannot play '{locator}': {message}")]
    PlaybackSource { locator: String, message: String },

    #[error("No session loaded")]
    NoSession,
}

impl PlaybackError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        PlaybackError::InvalidSession {
            reason: reason.into(),
        }
    }
}
