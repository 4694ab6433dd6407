//! Session files and backend responses

use subplay::backend::{FileBackend, ProcessResponse, ProcessingBackend};
use subplay::session::srt::parse_srt;
use subplay::session::{CueId, Transcript};

use crate::helpers::{fixture, fixtures_dir};

#[test]
fn saved_download_response_opens() {
    let session = FileBackend::default()
        .with_base_url("http://localhost:5000")
        .submit(&fixture("talk.json"))
        .unwrap();

    assert_eq!(session.title, "Conference Talk");
    assert_eq!(session.duration, 120.0);
    assert_eq!(
        session.audio_locator,
        "http://localhost:5000/api/audio/3f2a9c/talk.m4a"
    );
    assert!(session.has_subtitles);
    assert_eq!(session.transcript.len(), 3);
}

#[test]
fn saved_download_response_follows_backend_path_prefix() {
    let session = FileBackend::default()
        .with_base_url("https://media.example/subplay/")
        .submit(&fixture("talk.json"))
        .unwrap();

    assert_eq!(
        session.audio_locator,
        "https://media.example/api/audio/3f2a9c/talk.m4a"
    );
}

#[test]
fn audio_override_resolves_next_to_file() {
    let backend = FileBackend::new(Some("talk.m4a".to_string()), Some("Renamed".to_string()));
    let session = backend.submit(&fixture("talk.json")).unwrap();

    assert_eq!(session.title, "Renamed");
    assert_eq!(
        session.audio_locator,
        fixtures_dir().join("talk.m4a").to_string_lossy()
    );
}

#[test]
fn srt_file_with_audio_opens() {
    let backend = FileBackend::new(Some("https://cdn.example/talk.mp3".to_string()), None);
    let session = backend.submit(&fixture("talk.srt")).unwrap();

    assert_eq!(session.title, "talk");
    assert_eq!(session.transcript.len(), 2 + 1);
    assert_eq!(session.transcript.cues()[1].text, "Bye\nfor now");
    assert_eq!(session.duration, 69.0);
}

#[test]
fn explicit_ids_survive_sorting() {
    let session = FileBackend::default()
        .submit(&fixture("unsorted.json"))
        .unwrap();

    let ids: Vec<CueId> = session.transcript.cues().iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, [CueId::from("a"), CueId::from("b"), CueId::from("c")]);
    assert_eq!(session.transcript.position_of(&CueId::from("c")), Some(2));
}

#[test]
fn response_served_by_backend_resolves_against_base() {
    let body = std::fs::read_to_string(fixtures_dir().join("talk.json")).unwrap();
    let response: ProcessResponse = serde_json::from_str(&body).unwrap();
    let session = response
        .into_session(Some("http://localhost:5000"))
        .unwrap();

    assert_eq!(
        session.audio_locator,
        "http://localhost:5000/api/audio/3f2a9c/talk.m4a"
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut cues = parse_srt(&std::fs::read_to_string(fixtures_dir().join("talk.srt")).unwrap());
    cues[1].id = cues[0].id.clone();
    let err = Transcript::new(cues).unwrap_err();
    assert!(err.to_string().contains("Invalid session"));
}
