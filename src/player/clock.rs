//! Media clock abstraction and a wall-time implementation.
//!
//! The controller never reads time on its own. A `MediaClock` owns the
//! playback position and reports what actually happened through
//! generation-tagged `ClockNotification`s, the same way an audio element
//! reports `timeupdate`/`play`/`pause`/`ended`/`loadedmetadata`.

use std::path::Path;
use std::sync::mpsc::Sender;
use std::time::Instant;

/// Something the clock observed.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockEvent {
    /// Position changed during playback
    TimeUpdate(f64),
    /// Playback actually started
    Play,
    /// Playback actually stopped
    Pause,
    /// Position reached the end of the media
    Ended,
    /// Media duration became known
    LoadedMetadata(f64),
    /// A reposition finished at the given time
    Seeked(f64),
    /// The source failed after loading
    Error(String),
}

/// A clock event tagged with the session generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockNotification {
    pub generation: u64,
    pub event: ClockEvent,
}

impl ClockNotification {
    pub fn new(generation: u64, event: ClockEvent) -> Self {
        Self { generation, event }
    }
}

/// Error from a clock command.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ClockError(pub String);

/// Host playback primitive driven by the controller.
///
/// Commands may complete asynchronously; the resulting state changes are
/// only trusted once they come back as notifications.
pub trait MediaClock {
    /// Point the clock at a new source. Later notifications carry `generation`.
    fn load(&mut self, locator: &str, generation: u64, duration_hint: f64);

    /// Ask the clock to start. An error means the source cannot be played.
    fn play(&mut self) -> Result<(), ClockError>;

    /// Ask the clock to stop.
    fn pause(&mut self);

    /// Reposition to `t` seconds.
    fn set_current_time(&mut self, t: f64);

    /// Current position as the clock sees it.
    fn current_time(&self) -> f64;

    /// Media duration, 0 when not known.
    fn duration(&self) -> f64;

    /// Advance the clock; called once per frame.
    ///
    /// Clocks that report position on their own can leave this empty.
    fn tick(&mut self) {}
}

/// Simulated clock advancing with wall time.
///
/// Position is `offset + elapsed` while running. Locators that look like
/// local paths must exist for `play` to succeed; URLs are trusted.
pub struct WallClock {
    tx: Sender<ClockNotification>,
    generation: u64,
    locator: String,
    duration: f64,
    running: bool,
    started_at: Instant,
    time_offset: f64,
}

impl WallClock {
    pub fn new(tx: Sender<ClockNotification>) -> Self {
        Self {
            tx,
            generation: 0,
            locator: String::new(),
            duration: 0.0,
            running: false,
            started_at: Instant::now(),
            time_offset: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn emit(&self, event: ClockEvent) {
        // Receiver gone means the player is shutting down
        let _ = self.tx.send(ClockNotification::new(self.generation, event));
    }

    fn check_source(&self) -> Result<(), ClockError> {
        if self.locator.trim().is_empty() {
            return Err(ClockError("no audio source loaded".to_string()));
        }
        if is_remote(&self.locator) {
            return Ok(());
        }
        let path = self.locator.strip_prefix("file://").unwrap_or(&self.locator);
        if Path::new(path).exists() {
            Ok(())
        } else {
            Err(ClockError(format!("audio file not found: {}", path)))
        }
    }
}

impl MediaClock for WallClock {
    fn load(&mut self, locator: &str, generation: u64, duration_hint: f64) {
        self.generation = generation;
        self.locator = locator.to_string();
        self.running = false;
        self.time_offset = 0.0;
        self.started_at = Instant::now();
        self.duration = if duration_hint.is_finite() && duration_hint > 0.0 {
            duration_hint
        } else {
            0.0
        };
        if self.duration > 0.0 {
            self.emit(ClockEvent::LoadedMetadata(self.duration));
        }
    }

    fn play(&mut self) -> Result<(), ClockError> {
        self.check_source()?;
        if self.running {
            return Ok(());
        }
        if self.duration > 0.0 && self.time_offset >= self.duration {
            // Replaying from the end restarts, like an audio element
            self.time_offset = 0.0;
        }
        self.started_at = Instant::now();
        self.running = true;
        self.emit(ClockEvent::Play);
        Ok(())
    }

    fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.time_offset = self.current_time();
        self.running = false;
        self.emit(ClockEvent::Pause);
    }

    fn set_current_time(&mut self, t: f64) {
        let t = if self.duration > 0.0 {
            t.clamp(0.0, self.duration)
        } else {
            t.max(0.0)
        };
        self.time_offset = t;
        self.started_at = Instant::now();
        self.emit(ClockEvent::Seeked(t));
    }

    fn current_time(&self) -> f64 {
        if !self.running {
            return self.time_offset;
        }
        let t = self.time_offset + self.started_at.elapsed().as_secs_f64();
        if self.duration > 0.0 {
            t.min(self.duration)
        } else {
            t
        }
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    /// Emits `TimeUpdate` while running and `Ended` (after a final update)
    /// once the duration is reached.
    fn tick(&mut self) {
        if !self.running {
            return;
        }
        let now = self.current_time();
        if self.duration > 0.0 && now >= self.duration {
            self.running = false;
            self.time_offset = self.duration;
            self.emit(ClockEvent::TimeUpdate(self.duration));
            self.emit(ClockEvent::Ended);
        } else {
            self.emit(ClockEvent::TimeUpdate(now));
        }
    }
}

/// Whether a locator points at a network resource.
pub fn is_remote(locator: &str) -> bool {
    let lower = locator.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn drain(rx: &mpsc::Receiver<ClockNotification>) -> Vec<ClockNotification> {
        rx.try_iter().collect()
    }

    #[test]
    fn load_emits_metadata_when_duration_known() {
        let (tx, rx) = mpsc::channel();
        let mut clock = WallClock::new(tx);
        clock.load("https://example.com/a.m4a", 3, 42.0);
        assert_eq!(
            drain(&rx),
            vec![ClockNotification::new(3, ClockEvent::LoadedMetadata(42.0))]
        );
        assert_eq!(clock.duration(), 42.0);
    }

    #[test]
    fn load_without_duration_is_silent() {
        let (tx, rx) = mpsc::channel();
        let mut clock = WallClock::new(tx);
        clock.load("https://example.com/a.m4a", 1, 0.0);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn play_fails_for_missing_local_file() {
        let (tx, rx) = mpsc::channel();
        let mut clock = WallClock::new(tx);
        clock.load("/definitely/not/here.m4a", 1, 10.0);
        drain(&rx);
        let err = clock.play().unwrap_err();
        assert!(err.0.contains("not found"));
        assert!(!clock.is_running());
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn play_fails_without_source() {
        let (tx, _rx) = mpsc::channel();
        let mut clock = WallClock::new(tx);
        assert!(clock.play().is_err());
    }

    #[test]
    fn play_and_pause_emit_confirmations() {
        let (tx, rx) = mpsc::channel();
        let mut clock = WallClock::new(tx);
        clock.load("https://example.com/a.m4a", 2, 10.0);
        drain(&rx);

        clock.play().unwrap();
        clock.pause();
        let events: Vec<_> = drain(&rx).into_iter().map(|n| n.event).collect();
        assert_eq!(events, vec![ClockEvent::Play, ClockEvent::Pause]);
    }

    #[test]
    fn set_current_time_clamps_and_reports() {
        let (tx, rx) = mpsc::channel();
        let mut clock = WallClock::new(tx);
        clock.load("https://example.com/a.m4a", 1, 10.0);
        drain(&rx);

        clock.set_current_time(25.0);
        assert_eq!(clock.current_time(), 10.0);
        clock.set_current_time(-3.0);
        assert_eq!(clock.current_time(), 0.0);
        let events: Vec<_> = drain(&rx).into_iter().map(|n| n.event).collect();
        assert_eq!(
            events,
            vec![ClockEvent::Seeked(10.0), ClockEvent::Seeked(0.0)]
        );
    }

    #[test]
    fn tick_at_end_emits_ended() {
        let (tx, rx) = mpsc::channel();
        let mut clock = WallClock::new(tx);
        clock.load("https://example.com/a.m4a", 1, 0.001);
        clock.play().unwrap();
        drain(&rx);

        std::thread::sleep(std::time::Duration::from_millis(10));
        clock.tick();
        let events: Vec<_> = drain(&rx).into_iter().map(|n| n.event).collect();
        assert_eq!(
            events,
            vec![ClockEvent::TimeUpdate(0.001), ClockEvent::Ended]
        );
        assert!(!clock.is_running());
    }

    #[test]
    fn play_after_end_restarts_from_zero() {
        let (tx, rx) = mpsc::channel();
        let mut clock = WallClock::new(tx);
        clock.load("https://example.com/a.m4a", 1, 5.0);
        clock.set_current_time(5.0);
        clock.play().unwrap();
        drain(&rx);

        assert!(clock.current_time() < 1.0);
        assert!(clock.is_running());
    }

    #[test]
    fn tick_when_paused_is_silent() {
        let (tx, rx) = mpsc::channel();
        let mut clock = WallClock::new(tx);
        clock.load("https://example.com/a.m4a", 1, 5.0);
        drain(&rx);
        clock.tick();
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn is_remote_detects_urls() {
        assert!(is_remote("http://host/a"));
        assert!(is_remote("HTTPS://host/a"));
        assert!(!is_remote("/tmp/a.m4a"));
        assert!(!is_remote("file:///tmp/a.m4a"));
    }
}
