//! Playback controller scenarios driven through the public API

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use subplay::player::{
    ClockError, ClockEvent, ClockNotification, MediaClock, PlaybackController, PlaybackError,
    PlaybackPhase, WallClock,
};
use subplay::session::{CueId, SubtitleCue};

/// Clock whose notifications are delivered by hand.
#[derive(Default)]
struct ManualClock {
    generation: u64,
    position: f64,
    locators: Vec<String>,
    refuse: Option<String>,
}

impl ManualClock {
    fn event(&self, event: ClockEvent) -> ClockNotification {
        ClockNotification::new(self.generation, event)
    }
}

impl MediaClock for ManualClock {
    fn load(&mut self, locator: &str, generation: u64, _duration_hint: f64) {
        self.generation = generation;
        self.position = 0.0;
        self.locators.push(locator.to_string());
    }

    fn play(&mut self) -> Result<(), ClockError> {
        match &self.refuse {
            Some(reason) => Err(ClockError(reason.clone())),
            None => Ok(()),
        }
    }

    fn pause(&mut self) {}

    fn set_current_time(&mut self, t: f64) {
        self.position = t;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        0.0
    }
}

fn hi_bye() -> Vec<SubtitleCue> {
    vec![
        SubtitleCue::new(0u64, 0.0, 2.0, "Hi"),
        SubtitleCue::new(1u64, 2.0, 5.0, "Bye"),
    ]
}

fn loaded(duration: f64) -> PlaybackController<ManualClock> {
    let mut c = PlaybackController::new(ManualClock::default());
    c.load_cues("Talk", duration, "https://media.example/a.m4a", hi_bye())
        .unwrap();
    c
}

fn deliver(c: &mut PlaybackController<ManualClock>, event: ClockEvent) -> bool {
    let n = c.clock().event(event);
    c.handle_notification(n)
}

#[test]
fn shared_boundary_belongs_to_earlier_cue() {
    let mut c = loaded(120.0);

    deliver(&mut c, ClockEvent::TimeUpdate(2.0));
    assert_eq!(c.state().active_cue_index, Some(0));

    deliver(&mut c, ClockEvent::TimeUpdate(2.01));
    assert_eq!(c.state().active_cue_index, Some(1));
    assert_eq!(c.active_cue().map(|cue| cue.text.as_str()), Some("Bye"));

    deliver(&mut c, ClockEvent::TimeUpdate(5.5));
    assert_eq!(c.state().active_cue_index, None);
}

#[test]
fn repeated_time_update_is_idempotent() {
    let mut c = loaded(120.0);
    c.on_time_advance(3.0);
    let once = c.state().clone();
    c.on_time_advance(3.0);
    assert_eq!(c.state(), &once);
}

#[test]
fn seeks_are_clamped_to_media() {
    let mut c = loaded(120.0);
    c.seek(-5.0).unwrap();
    assert_eq!(c.state().current_time, 0.0);
    c.seek(500.0).unwrap();
    assert_eq!(c.state().current_time, 120.0);
    assert_eq!(c.clock().current_time(), 120.0);
}

#[test]
fn seek_resolves_on_clock_confirmation() {
    let mut c = loaded(120.0);
    deliver(&mut c, ClockEvent::Play);
    assert_eq!(c.phase(), PlaybackPhase::Playing);

    c.seek(3.0).unwrap();
    assert_eq!(c.phase(), PlaybackPhase::Seeking);
    assert_eq!(c.state().active_cue_index, Some(1));

    deliver(&mut c, ClockEvent::Seeked(3.0));
    assert_eq!(c.phase(), PlaybackPhase::Playing);
}

#[test]
fn old_session_notifications_never_touch_new_session() {
    let mut c = loaded(120.0);
    let stale = c.clock().event(ClockEvent::TimeUpdate(4.0));
    let stale_play = c.clock().event(ClockEvent::Play);

    c.load_cues(
        "Second",
        60.0,
        "https://media.example/b.m4a",
        vec![SubtitleCue::new("x", 10.0, 20.0, "later")],
    )
    .unwrap();

    assert!(!c.handle_notification(stale));
    assert!(!c.handle_notification(stale_play));
    assert_eq!(c.state().current_time, 0.0);
    assert!(!c.state().is_playing);
    assert_eq!(c.state().active_cue_index, None);
    assert_eq!(c.clock().locators.len(), 2);
}

#[test]
fn unknown_cue_jump_changes_nothing() {
    let mut c = loaded(120.0);
    c.seek(1.0).unwrap();
    let before = c.state().clone();

    let err = c.jump_to_cue(&CueId::from("nope")).unwrap_err();
    assert_eq!(err, PlaybackError::UnknownCue(CueId::from("nope")));
    assert_eq!(c.state(), &before);
}

#[test]
fn jump_to_cue_seeks_to_its_start() {
    let mut c = loaded(120.0);
    c.jump_to_cue(&CueId::from(1u64)).unwrap();
    assert_eq!(c.state().current_time, 2.0);
    // 2.0 is shared; the earlier cue wins
    assert_eq!(c.state().active_cue_index, Some(0));
}

#[test]
fn unsorted_cues_are_normalized() {
    let mut c = PlaybackController::new(ManualClock::default());
    c.load_cues(
        "Shuffled",
        30.0,
        "https://media.example/s.m4a",
        vec![
            SubtitleCue::new(2u64, 20.0, 22.0, "c"),
            SubtitleCue::new(0u64, 0.0, 2.0, "a"),
            SubtitleCue::new(1u64, 10.0, 12.0, "b"),
        ],
    )
    .unwrap();

    let texts: Vec<&str> = c.cues().iter().map(|cue| cue.text.as_str()).collect();
    assert_eq!(texts, ["a", "b", "c"]);
    c.seek(11.0).unwrap();
    assert_eq!(c.active_cue().map(|cue| cue.text.as_str()), Some("b"));
}

#[test]
fn invalid_transcript_keeps_previous_session() {
    let mut c = loaded(120.0);
    c.seek(3.0).unwrap();
    let generation = c.generation();

    let err = c
        .load_cues(
            "Bad",
            10.0,
            "https://media.example/bad.m4a",
            vec![SubtitleCue::new(0u64, -1.0, 2.0, "negative")],
        )
        .unwrap_err();

    assert!(matches!(err, PlaybackError::InvalidSession { .. }));
    assert_eq!(c.generation(), generation);
    assert_eq!(c.state().current_time, 3.0);
    assert_eq!(c.session().map(|s| s.title.as_str()), Some("Talk"));
}

#[test]
fn refused_play_reports_source_error() {
    let mut c = PlaybackController::new(ManualClock {
        refuse: Some("unsupported format".to_string()),
        ..Default::default()
    });
    c.load_cues("Talk", 10.0, "https://media.example/a.xyz", hi_bye())
        .unwrap();

    let err = c.play().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot play 'https://media.example/a.xyz': unsupported format"
    );
    assert_eq!(c.phase(), PlaybackPhase::Ready);
    assert!(!c.state().is_playing);
    assert!(c.session().is_some());
}

#[test]
fn intents_without_session_fail() {
    let mut c = PlaybackController::new(ManualClock::default());
    assert_eq!(c.play(), Err(PlaybackError::NoSession));
    assert_eq!(c.seek(1.0), Err(PlaybackError::NoSession));
    assert_eq!(c.seek_by_fraction(0.5), Err(PlaybackError::NoSession));
}

#[test]
fn wall_clock_drives_active_cue() {
    let (tx, rx) = mpsc::channel();
    let mut c = PlaybackController::new(WallClock::new(tx));
    c.load_cues(
        "Live",
        10.0,
        "https://media.example/live.m4a",
        vec![
            SubtitleCue::new(0u64, 0.0, 0.05, "first"),
            SubtitleCue::new(1u64, 0.05, 10.0, "second"),
        ],
    )
    .unwrap();
    c.play().unwrap();
    for n in rx.try_iter() {
        c.handle_notification(n);
    }
    assert!(c.state().is_playing);
    assert_eq!(c.state().duration, 10.0);

    thread::sleep(Duration::from_millis(80));
    c.clock_mut().tick();
    for n in rx.try_iter() {
        c.handle_notification(n);
    }

    assert!(c.state().current_time >= 0.08);
    assert_eq!(c.state().active_cue_index, Some(1));
}

#[test]
fn ended_stops_playback() {
    let mut c = loaded(5.0);
    deliver(&mut c, ClockEvent::Play);
    deliver(&mut c, ClockEvent::TimeUpdate(5.0));
    deliver(&mut c, ClockEvent::Ended);

    assert!(!c.state().is_playing);
    assert_eq!(c.phase(), PlaybackPhase::Ready);
    assert_eq!(c.state().current_time, 5.0);
}
