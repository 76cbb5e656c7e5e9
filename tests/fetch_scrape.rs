// tests/fetch_scrape.rs
//
// Scrape mode: blob extraction from a rendered page, failure dumps,
// and the guarantee that a failed run never touches the target.
//
mod common;

use std::fs;

use clubfeed::config::options::FetchMode;
use clubfeed::error::FetchError;
use clubfeed::progress::Progress;
use clubfeed::scrape::{collect_page, refresh};
use clubfeed::store;
use common::*;

const OLD: &str = "{\n  \"events\": [\n    {\"title\": \"Keep me\"}\n  ]\n}\n";

fn seed_target(opts: &clubfeed::config::options::FetchOptions) {
    fs::create_dir_all(opts.target.parent().unwrap()).unwrap();
    fs::write(&opts.target, OLD).unwrap();
}

#[test]
fn page_without_events_key_leaves_target_byte_identical() {
    let dir = tmp_dir("scrape_nokey");
    let opts = options(&dir, FetchMode::Scrape);
    seed_target(&opts);

    let html = "<html><body><script>window.__data = {\"club\":\"philosophy\"}</script></body></html>";
    let t = Scripted::new(vec![ok(html)]);

    let err = refresh(&t, &opts, None).unwrap_err();
    assert!(matches!(err, FetchError::BlobNotFound(ref k) if k == "events"));
    assert_eq!(fs::read(&opts.target).unwrap(), OLD.as_bytes());
    assert_eq!(fs::read_to_string(&opts.dump_path).unwrap(), html);
    assert_eq!(t.call_count(), 1);
}

#[test]
fn escaped_blob_in_script_string() {
    let dir = tmp_dir("scrape_escaped");
    let opts = options(&dir, FetchMode::Scrape);
    seed_target(&opts);

    let html = r#"<script>self.__next_f.push([1,"{\"club\":{\"events\":[{\"title\":\"Ethics Night\",\"startDate\":\"2025-03-01T18:30:00\",\"slug\":\"ethics-night\"}],\"tiers\":[]}}"])</script>"#;
    let t = Scripted::new(vec![ok(html)]);

    let report = refresh(&t, &opts, None).unwrap();
    assert_eq!(report.count, 1);
    assert_eq!(t.url(0), "https://uniclubs.ch/hsg/clubs/philosophy-club");

    let events = store::load_events(&opts.target).unwrap();
    assert_eq!(events[0].title, "Ethics Night");
    assert_eq!(events[0].time, "18:30");
    assert_eq!(events[0].url, "https://uniclubs.ch/hsg/clubs/philosophy-club/events/ethics-night");
    assert!(!opts.dump_path.exists());
}

#[test]
fn undecodable_blob_is_dumped() {
    let dir = tmp_dir("scrape_undecodable");
    let opts = options(&dir, FetchMode::Scrape);
    seed_target(&opts);

    let html = r#"<script>var d = {"events":[{title: 'unquoted'}]};</script>"#;
    let t = Scripted::new(vec![ok(html)]);

    let err = refresh(&t, &opts, None).unwrap_err();
    match &err {
        FetchError::Decode(d) => assert_eq!(d.attempts.len(), 4),
        other => panic!("expected a decode error, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&opts.dump_path).unwrap(), "[{title: 'unquoted'}]");
    assert_eq!(fs::read(&opts.target).unwrap(), OLD.as_bytes());
}

#[test]
fn bracket_in_title_falls_back_to_sibling_key() {
    let dir = tmp_dir("scrape_tiers");
    let opts = options(&dir, FetchMode::Scrape);

    let html = r#"<script>{"events":[{"title":"Reading [Kant] Night"},{"title":"Close ] early"}],"tiers":[]}</script>"#;
    let t = Scripted::new(vec![ok(html)]);

    let events = collect_page(&t, &opts, None).unwrap();
    let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Reading [Kant] Night", "Close ] early"]);
}

#[test]
fn scrape_is_a_single_attempt() {
    let dir = tmp_dir("scrape_500");
    let opts = options(&dir, FetchMode::Scrape);
    seed_target(&opts);

    let t = Scripted::new(vec![status(500, "")]);
    let err = refresh(&t, &opts, None).unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 500, .. }));
    assert_eq!(t.call_count(), 1);
    assert_eq!(fs::read(&opts.target).unwrap(), OLD.as_bytes());
}

#[test]
fn dump_is_truncated_with_a_note() {
    let dir = tmp_dir("scrape_truncate");
    let mut opts = options(&dir, FetchMode::Scrape);
    opts.dump_limit = 10;

    let html = "x".repeat(50);
    let t = Scripted::new(vec![ok(&html)]);
    assert!(collect_page(&t, &opts, None).is_err());

    let dump = fs::read_to_string(&opts.dump_path).unwrap();
    assert!(dump.starts_with("xxxxxxxxxx\n[truncated: 10 of 50 bytes kept]"));
}

#[derive(Default)]
struct Recorder {
    began: Option<Option<usize>>,
    pages: Vec<(u32, usize)>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: Option<usize>) {
        self.began = Some(total);
    }
    fn item_done(&mut self, page: u32, events: usize) {
        self.pages.push((page, events));
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn progress_sees_the_page() {
    let dir = tmp_dir("scrape_progress");
    let opts = options(&dir, FetchMode::Scrape);
    let t = Scripted::new(vec![ok(r#"{"events":[{"title":"A"},{"title":"B"}]}"#)]);

    let mut rec = Recorder::default();
    collect_page(&t, &opts, Some(&mut rec)).unwrap();

    assert_eq!(rec.began, Some(Some(1)));
    assert_eq!(rec.pages, vec![(1, 2)]);
    assert!(rec.finished);
}
