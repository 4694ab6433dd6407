//! HTTP client for the processing service.
//!
//! `POST {base}/api/download` with `{"url": ...}`. Success bodies are
//! `ProcessResponse`; failures carry `{"error": ...}`, which is surfaced
//! verbatim. No retries.

use std::time::Duration;

use serde::Serialize;

use super::{BackendError, ErrorBody, ProcessResponse, ProcessingBackend};
use crate::session::MediaSession;

/// Route that processes a video URL.
pub const PROCESS_ROUTE: &str = "/api/download";

#[derive(Serialize)]
struct SubmitRequest<'a> {
    url: &'a str,
}

pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, PROCESS_ROUTE)
    }
}

/// Interpret a response body given its HTTP status.
pub fn parse_response(
    success: bool,
    status: &str,
    body: &str,
) -> Result<ProcessResponse, BackendError> {
    if !success {
        return Err(match serde_json::from_str::<ErrorBody>(body) {
            Ok(e) => BackendError::Service(e.error),
            Err(_) => BackendError::Service(format!("Failed to process video ({})", status)),
        });
    }
    // A 200 can still carry an error body
    if let Ok(e) = serde_json::from_str::<ErrorBody>(body) {
        return Err(BackendError::Service(e.error));
    }
    serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))
}

impl ProcessingBackend for HttpBackend {
    fn submit(&self, url: &str) -> Result<MediaSession, BackendError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(BackendError::EmptyUrl);
        }

        tracing::info!(endpoint = %self.endpoint(), %url, "submitting video");
        let response = self
            .client
            .post(self.endpoint())
            .json(&SubmitRequest { url })
            .send()?;
        let status = response.status();
        let body = response.text()?;

        let parsed = parse_response(status.is_success(), status.as_str(), &body);
        if let Err(e) = &parsed {
            tracing::warn!(%status, error = %e, "submission failed");
        }
        parsed?.into_session(Some(&self.base_url))
    }
}
