// tests/mapper.rs
//
// Raw upstream records → canonical events.
//
use clubfeed::config::options::FetchOptions;
use clubfeed::specs::events::{map_event, map_events, MapContext};
use serde_json::json;

fn ctx() -> MapContext {
    MapContext::from_options(&FetchOptions::default())
}

#[test]
fn api_record_prefers_first_alias() {
    let raw = json!({
        "title": "Ethics Night",
        "startDate": "2025-03-01T18:30:00",
        "date": "2024-01-01",
        "location": "",
        "locationDetails": "Room 01-013",
        "venueName": "Main building",
        "externalRegistrationUrl": "https://forms.example/ethics",
        "longDescription": "<p>Long</p>",
        "description": "Short",
        "featuredImage": "https://img.example/ethics.jpg"
    });
    let ev = map_event(&raw, &ctx());
    assert_eq!(ev.title, "Ethics Night");
    assert_eq!(ev.date, "2025-03-01T18:30:00");
    assert_eq!(ev.time, "18:30");
    assert_eq!(ev.location, "Room 01-013");
    assert_eq!(ev.url, "https://forms.example/ethics");
    assert_eq!(ev.description, "<p>Long</p>");
    assert_eq!(ev.image.as_deref(), Some("https://img.example/ethics.jpg"));
}

#[test]
fn url_falls_back_through_slug_image_and_page() {
    let c = ctx();

    let slugged = map_event(&json!({ "title": "A", "slug": "stoa-walk" }), &c);
    assert_eq!(slugged.url, "https://uniclubs.ch/hsg/clubs/philosophy-club/events/stoa-walk");

    let handled = map_event(&json!({ "title": "A", "handle": "h1" }), &c);
    assert!(handled.url.ends_with("/events/h1"));

    let imaged = map_event(&json!({ "title": "A", "featuredImage": "https://img/x.png" }), &c);
    assert_eq!(imaged.url, "https://img/x.png");

    let bare = map_event(&json!({ "title": "A" }), &c);
    assert_eq!(bare.url, "https://uniclubs.ch/hsg/clubs/philosophy-club");
}

#[test]
fn image_from_storage_key() {
    let raw = json!({ "title": "A", "image": { "s3Key": "clubs/phil/poster.webp" } });
    let ev = map_event(&raw, &ctx());
    assert_eq!(
        ev.image.as_deref(),
        Some("https://d396kn70sxtfio.cloudfront.net/clubs/phil/poster.webp")
    );

    let none = map_event(&json!({ "title": "A" }), &ctx());
    assert_eq!(none.image, None);
}

#[test]
fn explicit_time_and_venue_fallbacks() {
    let raw = json!({ "name": "Reading group", "date": "2025-04-02", "time": "19:00", "venue": "Café" });
    let ev = map_event(&raw, &ctx());
    assert_eq!(ev.title, "Reading group");
    assert_eq!(ev.time, "19:00");
    assert_eq!(ev.location, "Café");
}

#[test]
fn bare_date_derives_no_time() {
    let ev = map_event(&json!({ "title": "A", "date": "2025-04-02" }), &ctx());
    assert_eq!(ev.time, "");
    let ev = map_event(&json!({ "title": "A", "date": "next week" }), &ctx());
    assert_eq!(ev.time, "");
}

#[test]
fn non_objects_are_skipped() {
    let raws = vec![json!({ "title": "A" }), json!("stray"), json!(null), json!({ "title": "B" })];
    let events = map_events(&raws, &ctx());
    let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
}
