//! Processing backend client
//!
//! The backend turns a video URL into a title, an audio locator and a
//! transcript. This module defines the wire format, the `ProcessingBackend`
//! trait, and the conversion of a response into a validated `MediaSession`.
//!
//! - `http`: the HTTP service client
//! - `file`: saved responses and SRT files on disk
//! - `worker`: background submission so the player never blocks

pub mod file;
pub mod http;
pub mod worker;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::player::error::PlaybackError;
use crate::session::{CueId, MediaSession, SubtitleCue, Transcript};

pub use file::FileBackend;
pub use http::HttpBackend;
pub use worker::{SubmitResult, SubmitWorker};

/// Errors from a submission. None of them create or alter a session.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Please enter a video URL")]
    EmptyUrl,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Error text reported by the service, passed through unchanged
    #[error("{0}")]
    Service(String),

    #[error("Unreadable backend response: {0}")]
    Decode(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Session(#[from] PlaybackError),
}

/// A cue as sent on the wire; `id` is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCue {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CueId>,
}

/// Successful backend response.
///
/// Accepts both the `/api/download` shape (`download_id` + `audio_file`,
/// `subtitles`) and the direct shape (`audio_url`/`audio_locator`,
/// `transcript`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, alias = "audio_url", skip_serializing_if = "Option::is_none")]
    pub audio_locator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
    #[serde(default, alias = "subtitles")]
    pub transcript: Vec<WireCue>,
    #[serde(default)]
    pub has_subtitles: bool,
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ProcessResponse {
    /// Audio locator as sent, before joining with a base URL.
    pub fn raw_locator(&self) -> Option<String> {
        if let Some(loc) = self.audio_locator.as_deref().filter(|l| !l.trim().is_empty()) {
            return Some(loc.to_string());
        }
        match (&self.download_id, &self.audio_file) {
            (Some(id), Some(file)) => Some(format!("/api/audio/{}/{}", id, file)),
            _ => None,
        }
    }

    /// Validate the response into a session.
    ///
    /// `base` resolves relative locators (e.g. `/api/audio/...`).
    pub fn into_session(self, base: Option<&str>) -> Result<MediaSession, BackendError> {
        let locator = self
            .raw_locator()
            .ok_or_else(|| BackendError::Decode("response has no audio locator".to_string()))?;
        let locator = match base {
            Some(base) => resolve_locator(base, &locator)?,
            None => locator,
        };

        let transcript = transcript_from_wire(self.transcript)?;

        let title = if self.title.trim().is_empty() {
            "Unknown".to_string()
        } else {
            self.title
        };
        if self.has_subtitles && transcript.is_empty() {
            tracing::warn!("backend reported subtitles but sent none");
        }
        Ok(MediaSession::new(
            title,
            self.duration.unwrap_or(0.0),
            locator,
            transcript,
        ))
    }
}

/// Validate wire cues into a transcript.
///
/// A cue without an id gets its position, or the next free number when an
/// explicit numeric id already holds that position.
pub fn transcript_from_wire(cues: Vec<WireCue>) -> Result<Transcript, PlaybackError> {
    let mut used: HashSet<u64> = cues
        .iter()
        .filter_map(|c| match c.id {
            Some(CueId::Index(i)) => Some(i),
            _ => None,
        })
        .collect();
    let mut next_free = 0u64;

    let cues = cues
        .into_iter()
        .enumerate()
        .map(|(pos, c)| {
            let id = match c.id {
                Some(id) => id,
                None => {
                    let mut n = pos as u64;
                    if used.contains(&n) {
                        while used.contains(&next_free) {
                            next_free += 1;
                        }
                        n = next_free;
                    }
                    used.insert(n);
                    CueId::Index(n)
                }
            };
            SubtitleCue {
                id,
                start: c.start,
                end: c.end,
                text: c.text,
            }
        })
        .collect();
    Transcript::new(cues)
}

/// Whether `locator` is a route served by the backend (`/api/...`).
pub fn is_service_route(locator: &str) -> bool {
    locator.starts_with("/api/")
}

/// Join a possibly relative locator onto a base URL or directory.
///
/// URL bases follow RFC 3986 reference resolution, so `/api/...` replaces
/// the base path and `//host/...` keeps only the scheme.
pub fn resolve_locator(base: &str, locator: &str) -> Result<String, BackendError> {
    if crate::player::clock::is_remote(locator) || base.is_empty() {
        return Ok(locator.to_string());
    }
    if crate::player::clock::is_remote(base) {
        let base = Url::parse(base.trim())
            .map_err(|e| BackendError::Decode(format!("Invalid backend URL {}: {}", base, e)))?;
        let joined = base.join(locator).map_err(|e| {
            BackendError::Decode(format!("Invalid audio locator {}: {}", locator, e))
        })?;
        return Ok(joined.into());
    }
    if Path::new(locator).is_absolute() {
        Ok(locator.to_string())
    } else {
        Ok(Path::new(base).join(locator).to_string_lossy().into_owned())
    }
}

/// Something that can turn a video URL into a session.
pub trait ProcessingBackend: Send {
    /// Submit `url` for processing and wait for the result.
    fn submit(&self, url: &str) -> Result<MediaSession, BackendError>;
}
