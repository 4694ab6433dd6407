//! Native terminal player
//!
//! Owns the terminal for the lifetime of a run. Each frame advances the
//! clock, applies its notifications, collects finished submissions,
//! handles at most one input event and redraws when something changed.

use std::io;
use std::sync::mpsc::{self, Receiver};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::clock::{ClockNotification, MediaClock, WallClock};
use super::controller::PlaybackController;
use super::input::{self, report};
use super::render::render_frame;
use super::state::{InputResult, ViewState};
use crate::backend::{BackendError, ProcessingBackend, SubmitResult, SubmitWorker};
use crate::config::PlayerConfig;
use crate::session::MediaSession;

/// What the player starts with.
pub enum StartWith {
    /// Submit this URL to the backend once the player is up
    Url(String),
    /// Play an already processed session
    Session(MediaSession),
}

/// Summary of a player run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerExit {
    /// Title of the last session that was loaded
    pub last_title: Option<String>,
    /// Number of sessions loaded during the run
    pub sessions_loaded: usize,
}

/// Restores the terminal on drop, including on early returns and panics
/// unwinding through the loop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)
            .context("Failed to set up terminal")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the interactive player until the user quits.
///
/// Audio plays through the output device when built with the `audio`
/// feature and enabled in the config; otherwise a silent wall-time clock
/// drives the subtitles.
///
/// # Arguments
/// * `start` - Initial session or URL
/// * `backend` - Backend used for URL submissions
/// * `config` - Player settings
pub fn run_player(
    start: StartWith,
    backend: Box<dyn ProcessingBackend>,
    config: &PlayerConfig,
) -> Result<PlayerExit> {
    let (tx, rx) = mpsc::channel();

    #[cfg(feature = "audio")]
    {
        use super::audio::{default_cache_dir, AudioClock};
        if config.audio {
            match AudioClock::try_new(tx.clone(), default_cache_dir()) {
                Ok(clock) => return run_with_clock(clock, rx, start, backend, config),
                Err(e) => tracing::warn!(error = %e, "audio output unavailable, playing silently"),
            }
        }
    }

    run_with_clock(WallClock::new(tx), rx, start, backend, config)
}

fn run_with_clock<C: MediaClock>(
    clock: C,
    rx: Receiver<ClockNotification>,
    start: StartWith,
    backend: Box<dyn ProcessingBackend>,
    config: &PlayerConfig,
) -> Result<PlayerExit> {
    let mut controller = PlaybackController::new(clock);
    let mut worker =
        SubmitWorker::spawn(backend).context("Failed to start submission thread")?;
    let mut exit = PlayerExit::default();

    let (cols, rows) = terminal::size().context("Failed to get terminal size")?;
    let mut view = ViewState::new(cols, rows);

    match start {
        StartWith::Session(session) => {
            controller.load_session(session)?;
            on_session_loaded(&mut controller, &mut view, &mut exit, config.auto_play);
        }
        StartWith::Url(url) => submit(&mut worker, &mut view, &url),
    }

    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    let tick = config.tick();

    loop {
        controller.clock_mut().tick();
        for notification in rx.try_iter() {
            if controller.handle_notification(notification) {
                view.needs_render = true;
            }
        }

        if let Some(result) = worker.poll() {
            apply_submit_result(&mut controller, &mut view, &mut exit, result, config.auto_play);
        }

        if event::poll(tick)? {
            let ev = event::read()?;
            match input::handle_event(ev, &mut controller, &mut view, config.seek_step_secs) {
                InputResult::Continue => {}
                InputResult::Submit(url) => submit(&mut worker, &mut view, &url),
                InputResult::Quit => break,
            }
        }

        view.follow_active(controller.state().active_cue_index);

        if view.needs_render || controller.state().is_playing {
            render_frame(&mut stdout, &controller, &view)?;
            view.needs_render = false;
        }
    }

    controller.clock_mut().pause();
    tracing::info!(sessions = exit.sessions_loaded, "player closed");
    Ok(exit)
}

/// Hand `url` to the worker. Blank input is rejected without a request.
fn submit(worker: &mut SubmitWorker, view: &mut ViewState, url: &str) {
    let url = url.trim();
    if url.is_empty() {
        view.set_error(BackendError::EmptyUrl.to_string());
        return;
    }
    let id = worker.submit(url);
    tracing::info!(request_id = id, %url, "submitted");
    view.set_message(format!("Processing {} ...", url));
}

/// Load a finished submission, or report why it failed.
///
/// A failure leaves the current session untouched.
fn apply_submit_result<C: MediaClock>(
    controller: &mut PlaybackController<C>,
    view: &mut ViewState,
    exit: &mut PlayerExit,
    result: SubmitResult,
    auto_play: bool,
) {
    let loaded = result
        .outcome
        .and_then(|session| controller.load_session(session).map_err(BackendError::from));
    match loaded {
        Ok(_) => on_session_loaded(controller, view, exit, auto_play),
        Err(e) => {
            tracing::warn!(url = %result.url, error = %e, "submission failed");
            view.set_error(e.to_string());
        }
    }
}

fn on_session_loaded<C: MediaClock>(
    controller: &mut PlaybackController<C>,
    view: &mut ViewState,
    exit: &mut PlayerExit,
    auto_play: bool,
) {
    view.reset_for_session();
    view.clear_message();
    let Some(session) = controller.session() else {
        return;
    };
    exit.last_title = Some(session.title.clone());
    exit.sessions_loaded += 1;
    if !session.has_subtitles {
        view.set_message("No subtitles available for this video");
    }
    if auto_play {
        report(view, controller.play());
    }
}
