// tests/store.rs
//
// Loading the static data files the site serves.
//
use std::fs;
use std::path::PathBuf;

use clubfeed::data::{Cohort, Event, EventsFile};
use clubfeed::file;
use clubfeed::store;

fn tmp_file(name: &str, body: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("clubfeed_store_{}_{}", std::process::id(), name));
    fs::write(&p, body).unwrap();
    p
}

#[test]
fn non_array_collection_is_empty() {
    let p = tmp_file("events_obj.json", r#"{"events":{"title":"not a list"}}"#);
    assert!(store::load_events(&p).unwrap().is_empty());

    let p = tmp_file("events_none.json", "{}");
    assert!(store::load_events(&p).unwrap().is_empty());
}

#[test]
fn malformed_records_are_skipped() {
    let p = tmp_file(
        "events_mixed.json",
        r#"{"events":[{"title":"Good","date":"2025-03-01"}, 42, {"title":["bad"]}, {}]}"#,
    );
    let events = store::load_events(&p).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "Good");
    assert_eq!(events[1], Event::default());
}

#[test]
fn missing_or_broken_file_is_an_error() {
    let missing = std::env::temp_dir().join("clubfeed_store_definitely_missing.json");
    assert!(store::load_events(&missing).is_err());

    let p = tmp_file("events_broken.json", "{ not json");
    let err = store::load_posts(&p).unwrap_err();
    assert!(err.to_string().starts_with("Could not parse"));
}

#[test]
fn board_cohorts_load_independently() {
    let p = tmp_file(
        "board.json",
        r#"{
            "current": [{"name":"Ada Lovelace","initials":"AL","role":"President","linkedin":"https://linkedin.com/in/ada"}],
            "faculty": [{"name":"Prof. Kant","initials":"IK","role":"Advisor"}],
            "distinguished": "n/a"
        }"#,
    );
    let board = store::load_board(&p).unwrap();
    assert_eq!(board.cohort(Cohort::Current)[0].role, "President");
    assert_eq!(board.current[0].linkedin.as_deref(), Some("https://linkedin.com/in/ada"));
    assert!(board.cohort(Cohort::Distinguished).is_empty());
    assert_eq!(board.cohort(Cohort::Faculty)[0].initials, "IK");
}

#[test]
fn written_events_load_back() {
    let dir = std::env::temp_dir().join(format!("clubfeed_store_rw_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let path = dir.join("nested").join("events.json");

    let events = vec![
        Event { title: "Stoa Walk".into(), date: "2025-04-02".into(), ..Event::default() },
        Event { title: "Ethics".into(), image: Some("https://cdn/x.png".into()), ..Event::default() },
    ];
    file::write_events(&path, &events).unwrap();

    assert_eq!(store::load_events(&path).unwrap(), events);
    assert!(!dir.join("nested").join(".events.json.tmp").exists());

    let text = fs::read_to_string(&path).unwrap();
    let doc: EventsFile = serde_json::from_str(&text).unwrap();
    assert_eq!(doc.events, events);
    // No image key when there's no image
    assert_eq!(text.matches("\"image\"").count(), 1);
}
