//! Playback controller.
//!
//! Single owner of `PlaybackState`. User intents come in as method calls,
//! clock reports come in as `ClockNotification`s, and every position change
//! goes through the time index so the active cue is never stale.
//!
//! `is_playing` only changes when the clock confirms it. A `play()` the clock
//! accepts does nothing visible until the `Play` notification arrives.

use crate::player::clock::{ClockEvent, ClockNotification, MediaClock};
use crate::player::error::PlaybackError;
use crate::player::state::{PlaybackPhase, PlaybackState};
use crate::player::time_index::TimeIndex;
use crate::session::{CueId, MediaSession, SubtitleCue, Transcript};

/// Minimum distance past a cue start for "previous cue" to restart the
/// current cue instead of stepping back.
const RESTART_THRESHOLD_SECS: f64 = 1.0;

/// Tolerance when comparing positions against cue starts.
const CUE_EPSILON: f64 = 1e-3;

pub struct PlaybackController<C: MediaClock> {
    clock: C,
    session: Option<MediaSession>,
    index: TimeIndex,
    state: PlaybackState,
    phase: PlaybackPhase,
    generation: u64,
    /// Time of the last index lookup; `None` forces the next update through
    last_lookup: Option<f64>,
    last_error: Option<PlaybackError>,
}

impl<C: MediaClock> PlaybackController<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            session: None,
            index: TimeIndex::default(),
            state: PlaybackState::default(),
            phase: PlaybackPhase::Idle,
            generation: 0,
            last_lookup: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Generation of the current session; bumped by every load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn session(&self) -> Option<&MediaSession> {
        self.session.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Most recent source failure, cleared when playback starts.
    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    pub fn cues(&self) -> &[SubtitleCue] {
        self.session
            .as_ref()
            .map(|s| s.transcript.cues())
            .unwrap_or(&[])
    }

    pub fn active_cue(&self) -> Option<&SubtitleCue> {
        self.state
            .active_cue_index
            .and_then(|i| self.session.as_ref()?.transcript.get(i))
    }

    /// Replace the current session.
    ///
    /// Everything from the previous session is dropped, including its
    /// in-flight clock notifications, which stop matching the generation.
    /// On error nothing changes.
    pub fn load_session(&mut self, session: MediaSession) -> Result<u64, PlaybackError> {
        if session.audio_locator.trim().is_empty() {
            return Err(PlaybackError::invalid("session has no audio locator"));
        }

        self.generation += 1;
        self.index = TimeIndex::new(session.transcript.cues());
        self.state = PlaybackState::default();
        self.phase = PlaybackPhase::Ready;
        self.last_lookup = None;
        self.last_error = None;

        tracing::info!(
            generation = self.generation,
            title = %session.title,
            cues = session.transcript.len(),
            locator = %session.audio_locator,
            "session loaded"
        );

        self.clock
            .load(&session.audio_locator, self.generation, session.duration);
        self.session = Some(session);
        Ok(self.generation)
    }

    /// Build and load a session from raw cues.
    pub fn load_cues(
        &mut self,
        title: &str,
        duration: f64,
        audio_locator: &str,
        cues: Vec<SubtitleCue>,
    ) -> Result<u64, PlaybackError> {
        let transcript = Transcript::new(cues)?;
        self.load_session(MediaSession::new(title, duration, audio_locator, transcript))
    }

    /// Apply one clock notification.
    ///
    /// Returns false when the notification was discarded (no session, or it
    /// belongs to a superseded generation).
    pub fn handle_notification(&mut self, notification: ClockNotification) -> bool {
        if self.session.is_none() || notification.generation != self.generation {
            tracing::debug!(
                got = notification.generation,
                current = self.generation,
                event = ?notification.event,
                "discarding stale clock notification"
            );
            return false;
        }

        match notification.event {
            ClockEvent::TimeUpdate(t) => {
                self.on_time_advance(t);
                self.finish_seek();
            }
            ClockEvent::Seeked(t) => {
                self.on_time_advance(t);
                self.finish_seek();
            }
            ClockEvent::Play => {
                self.state.is_playing = true;
                self.last_error = None;
                if self.phase != PlaybackPhase::Seeking {
                    self.phase = PlaybackPhase::Playing;
                }
            }
            ClockEvent::Pause | ClockEvent::Ended => {
                self.state.is_playing = false;
                if self.phase != PlaybackPhase::Seeking {
                    self.phase = PlaybackPhase::Ready;
                }
            }
            ClockEvent::LoadedMetadata(d) => self.on_duration_known(d),
            ClockEvent::Error(message) => {
                let locator = self
                    .session
                    .as_ref()
                    .map(|s| s.audio_locator.clone())
                    .unwrap_or_default();
                tracing::warn!(%locator, %message, "media source error");
                self.state.is_playing = false;
                self.phase = PlaybackPhase::Ready;
                self.last_error = Some(PlaybackError::PlaybackSource { locator, message });
            }
        }
        true
    }

    /// Position report from the clock.
    ///
    /// No-op when `t` matches the last looked-up time.
    pub fn on_time_advance(&mut self, t: f64) {
        if self.session.is_none() || !t.is_finite() {
            return;
        }
        let t = self.clamp_time(t);
        if self.last_lookup == Some(t) {
            return;
        }
        self.apply_position(t);
    }

    /// Duration from media metadata; non-positive values are ignored.
    pub fn on_duration_known(&mut self, d: f64) {
        if self.session.is_none() || !d.is_finite() || d <= 0.0 {
            tracing::debug!(duration = d, "ignoring unusable duration");
            return;
        }
        self.state.duration = d;
        if self.state.current_time > d {
            self.apply_position(d);
        }
    }

    /// Ask the clock to start playing.
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        let locator = match &self.session {
            Some(s) => s.audio_locator.clone(),
            None => return Err(PlaybackError::NoSession),
        };
        if let Err(e) = self.clock.play() {
            let err = PlaybackError::PlaybackSource {
                locator,
                message: e.0,
            };
            tracing::warn!(error = %err, "clock refused to play");
            self.state.is_playing = false;
            self.phase = PlaybackPhase::Ready;
            self.last_error = Some(err.clone());
            return Err(err);
        }
        Ok(())
    }

    /// Ask the clock to stop.
    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        if self.session.is_none() {
            return Err(PlaybackError::NoSession);
        }
        self.clock.pause();
        Ok(())
    }

    /// Play when paused, pause when playing.
    pub fn toggle_playback(&mut self) -> Result<(), PlaybackError> {
        if self.state.is_playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Reposition to `t` seconds, clamped to the media.
    ///
    /// State updates immediately; the clock confirms later.
    pub fn seek(&mut self, t: f64) -> Result<(), PlaybackError> {
        if self.session.is_none() {
            return Err(PlaybackError::NoSession);
        }
        if !t.is_finite() {
            tracing::debug!(t, "ignoring non-finite seek target");
            return Ok(());
        }
        let t = self.clamp_time(t);
        self.clock.set_current_time(t);
        self.apply_position(t);
        self.phase = PlaybackPhase::Seeking;
        Ok(())
    }

    /// Seek to a fraction of the duration (scrubbing).
    pub fn seek_by_fraction(&mut self, fraction: f64) -> Result<(), PlaybackError> {
        if self.session.is_none() {
            return Err(PlaybackError::NoSession);
        }
        if fraction.is_nan() {
            return Ok(());
        }
        let t = fraction.clamp(0.0, 1.0) * self.effective_duration();
        self.seek(t)
    }

    /// Seek relative to the current position.
    pub fn seek_relative(&mut self, delta: f64) -> Result<(), PlaybackError> {
        self.seek(self.state.current_time + delta)
    }

    /// Seek to the start of the cue with `id`.
    pub fn jump_to_cue(&mut self, id: &CueId) -> Result<(), PlaybackError> {
        let session = self.session.as_ref().ok_or(PlaybackError::NoSession)?;
        let start = match session.transcript.position_of(id) {
            Some(pos) => session.transcript.cues()[pos].start,
            None => {
                tracing::debug!(%id, "jump to unknown cue ignored");
                return Err(PlaybackError::UnknownCue(id.clone()));
            }
        };
        self.seek(start)
    }

    /// Seek to the first cue starting after the current position.
    ///
    /// Returns the index jumped to, or `None` when already past the last cue.
    pub fn next_cue(&mut self) -> Result<Option<usize>, PlaybackError> {
        if self.session.is_none() {
            return Err(PlaybackError::NoSession);
        }
        let now = self.state.current_time;
        let target = self
            .cues()
            .iter()
            .position(|c| c.start > now + CUE_EPSILON);
        if let Some(idx) = target {
            let start = self.cues()[idx].start;
            self.seek(start)?;
        }
        Ok(target)
    }

    /// Restart the active cue, or step back to the one before it when
    /// already near its start.
    pub fn previous_cue(&mut self) -> Result<Option<usize>, PlaybackError> {
        if self.session.is_none() {
            return Err(PlaybackError::NoSession);
        }
        let now = self.state.current_time;
        let target = self
            .cues()
            .iter()
            .rposition(|c| c.start < now - RESTART_THRESHOLD_SECS)
            .or_else(|| (!self.cues().is_empty()).then_some(0));
        if let Some(idx) = target {
            let start = self.cues()[idx].start;
            self.seek(start)?;
        }
        Ok(target)
    }

    fn apply_position(&mut self, t: f64) {
        self.state.current_time = t;
        self.state.active_cue_index = self.index.lookup(t);
        self.last_lookup = Some(t);
    }

    fn finish_seek(&mut self) {
        if self.phase == PlaybackPhase::Seeking {
            self.phase = if self.state.is_playing {
                PlaybackPhase::Playing
            } else {
                PlaybackPhase::Ready
            };
        }
    }

    /// Metadata duration if known, else the backend-reported one (may be 0).
    fn effective_duration(&self) -> f64 {
        if self.state.duration > 0.0 {
            self.state.duration
        } else {
            self.session.as_ref().map(|s| s.duration).unwrap_or(0.0)
        }
    }

    fn clamp_time(&self, t: f64) -> f64 {
        let upper = self.effective_duration();
        if upper > 0.0 {
            t.clamp(0.0, upper)
        } else {
            t.max(0.0)
        }
    }
}
