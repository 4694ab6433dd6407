//! Audio output through rodio.
//!
//! Local files play directly. Remote locators are downloaded into the cache
//! directory on a background thread first; a `play` issued while the
//! download runs starts playback once it lands. Position comes from the
//! sink, so subtitles follow what is actually heard.

use std::collections::hash_map::DefaultHasher;
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use url::Url;

use super::clock::{is_remote, ClockError, ClockEvent, ClockNotification, MediaClock};

/// Where the audio for the current session comes from.
enum AudioSource {
    Empty,
    Fetching,
    Ready(PathBuf),
    Failed(String),
}

/// Download outcome tagged with the generation that asked for it.
type Fetched = (u64, Result<PathBuf, String>);

/// Default directory for downloaded audio.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("subplay")
        .join("audio")
}

/// `MediaClock` that plays through the default output device.
pub struct AudioClock {
    tx: Sender<ClockNotification>,
    generation: u64,
    // Dropping the stream silences every sink
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    source: AudioSource,
    cache_dir: PathBuf,
    fetch_tx: Sender<Fetched>,
    fetch_rx: Receiver<Fetched>,
    duration: f64,
    position: f64,
    running: bool,
    play_requested: bool,
}

impl AudioClock {
    /// Open the default output device.
    ///
    /// # Errors
    /// Fails when no output device is available.
    pub fn try_new(tx: Sender<ClockNotification>, cache_dir: PathBuf) -> Result<Self, ClockError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| ClockError(format!("no audio output: {}", e)))?;
        let (fetch_tx, fetch_rx) = mpsc::channel();
        Ok(Self {
            tx,
            generation: 0,
            _stream: stream,
            handle,
            sink: None,
            source: AudioSource::Empty,
            cache_dir,
            fetch_tx,
            fetch_rx,
            duration: 0.0,
            position: 0.0,
            running: false,
            play_requested: false,
        })
    }

    fn emit(&self, event: ClockEvent) {
        let _ = self.tx.send(ClockNotification::new(self.generation, event));
    }

    /// Decode `path` into a paused sink positioned at `at`.
    fn open_sink(&self, path: &Path, at: f64) -> Result<(Sink, Option<f64>), ClockError> {
        let file = File::open(path)
            .map_err(|e| ClockError(format!("cannot open {}: {}", path.display(), e)))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| ClockError(format!("cannot decode {}: {}", path.display(), e)))?;
        let total = decoder.total_duration().map(|d| d.as_secs_f64());

        let sink = Sink::try_new(&self.handle)
            .map_err(|e| ClockError(format!("audio output failed: {}", e)))?;
        sink.pause();
        sink.append(decoder);
        if at > 0.0 {
            if let Err(e) = sink.try_seek(Duration::from_secs_f64(at)) {
                tracing::warn!(error = %e, at, "initial seek failed");
            }
        }
        Ok((sink, total))
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    /// Rebuild the sink at the stored position.
    fn reopen(&mut self) -> Result<(), ClockError> {
        let path = match &self.source {
            AudioSource::Ready(path) => path.clone(),
            _ => return Ok(()),
        };
        self.stop_sink();
        let (sink, _) = self.open_sink(&path, self.position)?;
        self.sink = Some(sink);
        Ok(())
    }

    fn source_ready(&mut self, path: PathBuf) {
        match self.open_sink(&path, self.position) {
            Ok((sink, total)) => {
                self.sink = Some(sink);
                self.source = AudioSource::Ready(path);
                if let Some(d) = total.filter(|d| d.is_finite() && *d > 0.0) {
                    if d != self.duration {
                        self.duration = d;
                        self.emit(ClockEvent::LoadedMetadata(d));
                    }
                }
            }
            Err(e) => self.source = AudioSource::Failed(e.0),
        }
    }

    fn spawn_fetch(&self, url: String) {
        let tx = self.fetch_tx.clone();
        let dir = self.cache_dir.clone();
        let generation = self.generation;
        let spawned = thread::Builder::new()
            .name("subplay-audio-fetch".to_string())
            .spawn(move || {
                let _ = tx.send((generation, fetch_audio(&url, &dir)));
            });
        if let Err(e) = spawned {
            let _ = self
                .fetch_tx
                .send((generation, Err(format!("cannot start download: {}", e))));
        }
    }

    fn apply_fetch(&mut self, result: Result<PathBuf, String>) {
        match result {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "audio ready");
                self.source_ready(path);
            }
            Err(message) => {
                tracing::warn!(error = %message, "audio download failed");
                self.source = AudioSource::Failed(message);
            }
        }
        if std::mem::take(&mut self.play_requested) {
            if let Err(e) = self.play() {
                self.emit(ClockEvent::Error(e.0));
            }
        }
    }
}

impl MediaClock for AudioClock {
    fn load(&mut self, locator: &str, generation: u64, duration_hint: f64) {
        self.stop_sink();
        self.generation = generation;
        self.running = false;
        self.play_requested = false;
        self.position = 0.0;
        self.duration = if duration_hint.is_finite() && duration_hint > 0.0 {
            duration_hint
        } else {
            0.0
        };
        if self.duration > 0.0 {
            self.emit(ClockEvent::LoadedMetadata(self.duration));
        }

        let locator = locator.trim();
        if locator.is_empty() {
            self.source = AudioSource::Empty;
        } else if is_remote(locator) {
            self.source = AudioSource::Fetching;
            self.spawn_fetch(locator.to_string());
        } else {
            let path = PathBuf::from(locator.strip_prefix("file://").unwrap_or(locator));
            if path.exists() {
                self.source_ready(path);
            } else {
                self.source =
                    AudioSource::Failed(format!("audio file not found: {}", path.display()));
            }
        }
    }

    fn play(&mut self) -> Result<(), ClockError> {
        match &self.source {
            AudioSource::Empty => return Err(ClockError("no audio source loaded".to_string())),
            AudioSource::Failed(message) => return Err(ClockError(message.clone())),
            AudioSource::Fetching => {
                self.play_requested = true;
                return Ok(());
            }
            AudioSource::Ready(_) => {}
        }
        if self.running {
            return Ok(());
        }
        if self.duration > 0.0 && self.position >= self.duration {
            self.position = 0.0;
        }
        if self.sink.as_ref().map(|s| s.empty()).unwrap_or(true) {
            self.reopen()?;
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
        self.running = true;
        self.emit(ClockEvent::Play);
        Ok(())
    }

    fn pause(&mut self) {
        self.play_requested = false;
        if !self.running {
            return;
        }
        self.position = self.current_time();
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.running = false;
        self.emit(ClockEvent::Pause);
    }

    fn set_current_time(&mut self, t: f64) {
        let t = if self.duration > 0.0 {
            t.clamp(0.0, self.duration)
        } else {
            t.max(0.0)
        };
        self.position = t;

        let stuck = match &self.sink {
            Some(sink) => sink.empty() || sink.try_seek(Duration::from_secs_f64(t)).is_err(),
            None => false,
        };
        if stuck {
            match self.reopen() {
                Ok(()) if self.running => {
                    if let Some(sink) = &self.sink {
                        sink.play();
                    }
                }
                Ok(()) => {}
                Err(e) => {
                    self.running = false;
                    self.emit(ClockEvent::Error(e.0));
                }
            }
        }
        self.emit(ClockEvent::Seeked(t));
    }

    fn current_time(&self) -> f64 {
        let t = match &self.sink {
            Some(sink) if self.running => sink.get_pos().as_secs_f64(),
            _ => self.position,
        };
        if self.duration > 0.0 {
            t.min(self.duration)
        } else {
            t
        }
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    /// Applies finished downloads, then reports position or the end.
    fn tick(&mut self) {
        let landed: Vec<Fetched> = self.fetch_rx.try_iter().collect();
        for (generation, result) in landed {
            if generation == self.generation {
                self.apply_fetch(result);
            } else {
                tracing::debug!(generation, current = self.generation, "stale download ignored");
            }
        }

        if !self.running {
            return;
        }
        let finished = self.sink.as_ref().map(|s| s.empty()).unwrap_or(true);
        if finished {
            let end = if self.duration > 0.0 {
                self.duration
            } else {
                self.current_time()
            };
            self.running = false;
            self.position = end;
            self.emit(ClockEvent::TimeUpdate(end));
            self.emit(ClockEvent::Ended);
        } else {
            self.emit(ClockEvent::TimeUpdate(self.current_time()));
        }
    }
}

/// Cache file name for `url`: a hash of the URL plus its last path segment,
/// so the extension survives for format probing.
pub fn cache_file_name(url: &str) -> String {
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);

    let name = Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .map(|s| {
            s.chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
                .collect::<String>()
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "audio".to_string());

    format!("{:016x}-{}", hasher.finish(), name)
}

/// Download `url` into `dir`, reusing an earlier download of the same URL.
pub fn fetch_audio(url: &str, dir: &Path) -> Result<PathBuf, String> {
    let path = dir.join(cache_file_name(url));
    if path.exists() {
        return Ok(path);
    }
    fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {}", dir.display(), e))?;

    tracing::info!(%url, "downloading audio");
    let bytes = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(|e| format!("audio download failed: {}", e))?;

    let partial = path.with_extension("part");
    fs::write(&partial, &bytes)
        .map_err(|e| format!("cannot write {}: {}", partial.display(), e))?;
    fs::rename(&partial, &path).map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
    Ok(path)
}
