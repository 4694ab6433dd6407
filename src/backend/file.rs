//! Sessions loaded from disk.
//!
//! A saved backend response (`.json`) opens as-is. Audio routes served by
//! the backend (`download_id` + `audio_file`, or any `/api/...` locator)
//! resolve against the backend base URL; plain relative file names resolve
//! against the file's directory. A SubRip file (`.srt`) needs the audio
//! locator supplied separately.

use std::fs;
use std::path::Path;

use super::{
    is_service_route, resolve_locator, transcript_from_wire, BackendError, ProcessResponse,
    ProcessingBackend,
};
use crate::session::srt::parse_srt;
use crate::session::{MediaSession, Transcript};

#[derive(Debug, Clone, Default)]
pub struct FileBackend {
    /// Audio locator for SRT input (ignored for JSON)
    pub audio: Option<String>,
    /// Title override
    pub title: Option<String>,
    /// Backend base URL for `/api/...` audio routes
    pub base_url: Option<String>,
}

impl FileBackend {
    pub fn new(audio: Option<String>, title: Option<String>) -> Self {
        Self {
            audio,
            title,
            base_url: None,
        }
    }

    /// Resolve backend audio routes against `url`.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    fn load_srt(&self, path: &Path, content: &str) -> Result<MediaSession, BackendError> {
        let audio = self.audio.as_deref().ok_or_else(|| {
            BackendError::Decode(format!(
                "{} is a subtitle file; pass the audio with --audio",
                path.display()
            ))
        })?;
        let transcript = Transcript::new(parse_srt(content))?;
        let title = self.title.clone().unwrap_or_else(|| file_title(path));
        let duration = transcript.span_end();
        Ok(MediaSession::new(title, duration, audio, transcript))
    }

    fn load_json(&self, path: &Path, content: &str) -> Result<MediaSession, BackendError> {
        let response: ProcessResponse =
            serde_json::from_str(content).map_err(|e| BackendError::Decode(e.to_string()))?;
        let dir = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let served = response
            .raw_locator()
            .map(|loc| is_service_route(&loc))
            .unwrap_or(false);
        let base = if served && self.audio.is_none() {
            self.base_url.clone().ok_or_else(|| {
                BackendError::Decode(format!(
                    "{} refers to audio on the backend; no backend URL configured",
                    path.display()
                ))
            })?
        } else {
            dir.clone()
        };
        let mut session = response.into_session(Some(&base))?;
        if let Some(audio) = &self.audio {
            session.audio_locator = resolve_locator(&dir, audio)?;
        }
        if let Some(title) = &self.title {
            session.title = title.clone();
        }
        Ok(session)
    }
}

/// Read only the transcript of a session file, `.srt` or `.json`.
///
/// Unlike opening the file for playback, no audio locator is needed.
pub fn load_transcript(path: &Path) -> Result<Transcript, BackendError> {
    let content = fs::read_to_string(path)?;
    if is_srt(path) {
        return Ok(Transcript::new(parse_srt(&content))?);
    }
    let response: ProcessResponse =
        serde_json::from_str(&content).map_err(|e| BackendError::Decode(e.to_string()))?;
    Ok(transcript_from_wire(response.transcript)?)
}

fn is_srt(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("srt"))
        .unwrap_or(false)
}

fn file_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

impl ProcessingBackend for FileBackend {
    fn submit(&self, url: &str) -> Result<MediaSession, BackendError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(BackendError::EmptyUrl);
        }
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        let content = fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "loading session file");

        if is_srt(path) {
            self.load_srt(path, &content)
        } else {
            self.load_json(path, &content)
        }
    }
}
