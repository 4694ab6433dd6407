//! Media session data model
//!
//! A session is one processed video: its title, where the audio lives,
//! the backend-reported duration and the transcript of subtitle cues.
//!
//! - `srt`: SubRip parsing for locally supplied subtitle files

pub mod srt;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::error::PlaybackError;

/// Stable identifier of a cue within one transcript.
///
/// Backends may send either a numeric index or an explicit string key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CueId {
    Index(u64),
    Key(String),
}

impl fmt::Display for CueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueId::Index(i) => write!(f, "{}", i),
            CueId::Key(k) => write!(f, "{}", k),
        }
    }
}

impl From<u64> for CueId {
    fn from(value: u64) -> Self {
        CueId::Index(value)
    }
}

impl From<&str> for CueId {
    fn from(value: &str) -> Self {
        CueId::Key(value.to_string())
    }
}

/// One subtitle line with its time window in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleCue {
    pub id: CueId,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl SubtitleCue {
    pub fn new(id: impl Into<CueId>, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            text: text.into(),
        }
    }

    /// Whether `t` falls inside this cue (both bounds inclusive).
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Validated, start-ordered sequence of cues.
///
/// Construction is the only place cues are checked; afterwards the
/// transcript is immutable for the lifetime of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    cues: Vec<SubtitleCue>,
}

impl Transcript {
    /// Validate and normalize a list of cues.
    ///
    /// Cues out of start order are stably sorted, so overlapping cues keep
    /// their received relative order. Nothing is ever dropped: a bad
    /// interval or a repeated id rejects the whole transcript.
    pub fn new(mut cues: Vec<SubtitleCue>) -> Result<Self, PlaybackError> {
        let mut seen = HashSet::with_capacity(cues.len());
        for (pos, cue) in cues.iter().enumerate() {
            if !cue.start.is_finite() || !cue.end.is_finite() {
                return Err(PlaybackError::invalid(format!(
                    "cue {} (position {}) has a non-finite time bound",
                    cue.id, pos
                )));
            }
            if cue.start < 0.0 {
                return Err(PlaybackError::invalid(format!(
                    "cue {} starts at negative time {}",
                    cue.id, cue.start
                )));
            }
            if cue.end <= cue.start {
                return Err(PlaybackError::invalid(format!(
                    "cue {} has empty or inverted interval {}..{}",
                    cue.id, cue.start, cue.end
                )));
            }
            if !seen.insert(cue.id.clone()) {
                return Err(PlaybackError::invalid(format!(
                    "duplicate cue id {}",
                    cue.id
                )));
            }
        }

        let sorted = cues.windows(2).all(|w| w[0].start <= w[1].start);
        if !sorted {
            tracing::debug!(count = cues.len(), "normalizing unsorted transcript");
            // sort_by is stable
            cues.sort_by(|a, b| a.start.total_cmp(&b.start));
        }

        Ok(Self { cues })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[SubtitleCue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SubtitleCue> {
        self.cues.get(index)
    }

    /// Position of the cue with the given id.
    pub fn position_of(&self, id: &CueId) -> Option<usize> {
        self.cues.iter().position(|c| &c.id == id)
    }

    /// End of the last-ending cue, or 0 for an empty transcript.
    pub fn span_end(&self) -> f64 {
        self.cues.iter().map(|c| c.end).fold(0.0, f64::max)
    }
}

/// One loaded video: everything the player needs to play it.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSession {
    pub title: String,
    /// Duration reported by the backend (seconds, 0 if unknown)
    pub duration: f64,
    /// URL or filesystem path of the audio track
    pub audio_locator: String,
    pub transcript: Transcript,
    pub has_subtitles: bool,
}

impl MediaSession {
    pub fn new(
        title: impl Into<String>,
        duration: f64,
        audio_locator: impl Into<String>,
        transcript: Transcript,
    ) -> Self {
        let has_subtitles = !transcript.is_empty();
        Self {
            title: title.into(),
            duration: if duration.is_finite() && duration > 0.0 {
                duration
            } else {
                0.0
            },
            audio_locator: audio_locator.into(),
            transcript,
            has_subtitles,
        }
    }
}
