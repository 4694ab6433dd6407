//! Background worker for backend submissions
//!
//! Submissions run on a dedicated thread and results come back over a
//! channel. Each request carries an id; only the result for the newest id
//! is handed out, so a slow earlier submission can never replace a session
//! the user asked for later.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use super::{BackendError, ProcessingBackend};
use crate::session::MediaSession;

/// Result of a background submission
pub struct SubmitResult {
    /// Id of the request this answers
    pub request_id: u64,
    /// The URL that was submitted
    pub url: String,
    /// The processed session, or why it failed
    pub outcome: Result<MediaSession, BackendError>,
}

/// Background worker loop that processes submission requests.
///
/// Receives `(id, url)` pairs from `request_rx`, submits each to `backend`,
/// and sends `SubmitResult` back via `result_tx`. Exits when the request
/// channel is closed (all senders dropped).
pub fn worker_loop(
    request_rx: Receiver<(u64, String)>,
    result_tx: Sender<SubmitResult>,
    backend: Box<dyn ProcessingBackend>,
) {
    while let Ok((request_id, url)) = request_rx.recv() {
        let outcome = backend.submit(&url);
        // Ignore send errors (main thread may have exited)
        let _ = result_tx.send(SubmitResult {
            request_id,
            url,
            outcome,
        });
    }
}

/// Handle to the submission thread.
///
/// Dropping the handle closes the request channel, which ends the loop
/// after the current job. The thread is never joined, so quitting does not
/// wait on a slow backend.
pub struct SubmitWorker {
    request_tx: Sender<(u64, String)>,
    result_rx: Receiver<SubmitResult>,
    latest: u64,
}

impl SubmitWorker {
    /// Start the submission thread.
    ///
    /// # Errors
    /// Returns the OS error when the thread cannot be created.
    pub fn spawn(backend: Box<dyn ProcessingBackend>) -> io::Result<Self> {
        Self::spawn_on(
            thread::Builder::new().name("subplay-submit".to_string()),
            backend,
        )
    }

    fn spawn_on(builder: thread::Builder, backend: Box<dyn ProcessingBackend>) -> io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        builder.spawn(move || worker_loop(request_rx, result_tx, backend))?;
        Ok(Self {
            request_tx,
            result_rx,
            latest: 0,
        })
    }

    /// Queue `url` for processing, superseding any earlier submission.
    pub fn submit(&mut self, url: &str) -> u64 {
        self.latest += 1;
        if self.request_tx.send((self.latest, url.to_string())).is_err() {
            tracing::warn!("submission thread is gone");
        }
        self.latest
    }

    /// Fetch the result of the newest submission, if it has arrived.
    ///
    /// Results of superseded submissions are dropped.
    pub fn poll(&mut self) -> Option<SubmitResult> {
        let mut newest = None;
        for result in self.result_rx.try_iter() {
            if result.request_id == self.latest {
                newest = Some(result);
            } else {
                tracing::debug!(
                    request_id = result.request_id,
                    latest = self.latest,
                    "dropping superseded submission result"
                );
            }
        }
        newest
    }
}
