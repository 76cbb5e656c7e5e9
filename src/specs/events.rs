// src/specs/events.rs
//! Raw upstream event → canonical `Event`.
//!
//! The upstream has renamed fields across versions, so each canonical field is
//! the first non-empty value among a list of aliases.

use serde_json::Value;

use crate::config::options::FetchOptions;
use crate::core::dates;
use crate::data::Event;

const TITLE: &[&str] = &["title", "name"];
const DATE: &[&str] = &["startDate", "date", "start"];
const TIME: &[&str] = &["time", "startTime"];
const LOCATION: &[&str] = &["location", "locationDetails", "venueName", "venue"];
const REGISTRATION: &[&str] = &["eventUrl", "externalRegistrationUrl"];
const SLUG: &[&str] = &["slug", "handle"];
const DESCRIPTION: &[&str] = &["longDescription", "description"];

/// Where constructed URLs point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapContext {
    pub site_base: String,
    pub club_slug: String,
    pub cdn_base: String,
    /// Last-resort link when an event has nothing better.
    pub source_url: String,
}

impl MapContext {
    pub fn from_options(opts: &FetchOptions) -> Self {
        Self {
            site_base: opts.site_base.clone(),
            club_slug: opts.club_slug.clone(),
            cdn_base: opts.cdn_base.clone(),
            source_url: opts.club_page_url(),
        }
    }
}

/// Strings (non-blank, trimmed) and numbers count as text; everything else is empty.
pub fn text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn first_of(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| raw.get(*k).and_then(text))
}

pub fn map_event(raw: &Value, ctx: &MapContext) -> Event {
    let date = first_of(raw, DATE).unwrap_or_default();

    let time = match first_of(raw, TIME) {
        // A full timestamp in a time field still only contributes HH:MM
        Some(t) if dates::parse_datetime(&t).is_some() => dates::format_time(&t),
        Some(t) => t,
        None => dates::format_time(&date),
    };

    let slug_url = first_of(raw, SLUG).map(|slug| {
        format!(
            "{}/hsg/clubs/{}/events/{}",
            ctx.site_base.trim_end_matches('/'),
            ctx.club_slug,
            slug
        )
    });
    let url = first_of(raw, REGISTRATION)
        .or(slug_url)
        .or_else(|| first_of(raw, &["featuredImage"]))
        .unwrap_or_else(|| ctx.source_url.clone());

    let image = first_of(raw, &["featuredImage"])
        .or_else(|| {
            raw.pointer("/image/s3Key").and_then(text).map(|key| {
                join!(ctx.cdn_base.trim_end_matches('/'), "/", key.trim_start_matches('/'))
            })
        })
        .or_else(|| raw.get("image").and_then(text));

    Event {
        title: first_of(raw, TITLE).unwrap_or_default(),
        date,
        time,
        location: first_of(raw, LOCATION).unwrap_or_default(),
        url,
        description: first_of(raw, DESCRIPTION).unwrap_or_default(),
        image,
    }
}

/// Map every object record; anything else in the array is skipped.
pub fn map_events(raws: &[Value], ctx: &MapContext) -> Vec<Event> {
    let events: Vec<Event> = raws
        .iter()
        .filter(|r| r.is_object())
        .map(|r| map_event(r, ctx))
        .collect();
    if events.len() != raws.len() {
        logw!("Skipped {} non-object event records", raws.len() - events.len());
    }
    events
}
