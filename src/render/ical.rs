// src/render/ical.rs
// Minimal RFC 5545 output: one VEVENT per calendar, UTC times, CRLF lines.

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::consts::{ICS_DEFAULT_HOURS, ICS_PRODID, ICS_UID_DOMAIN};
use crate::core::sanitize::slug_filename;
use crate::data::Event;
use super::events::event_start;

fn ics_stamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// `None` without a title or a parseable start. Events only know their start,
/// so DTEND is always start + 2h.
pub fn generate_ics(ev: &Event, now: DateTime<Utc>) -> Option<String> {
    let title = ev.title.trim();
    if title.is_empty() {
        return None;
    }
    let start = event_start(ev)?.with_timezone(&Utc);
    let end = start + TimeDelta::hours(ICS_DEFAULT_HOURS);

    let slug = slug_filename(title);
    let mut lines = vec![
        s!("BEGIN:VCALENDAR"),
        s!("VERSION:2.0"),
        format!("PRODID:{ICS_PRODID}"),
        s!("BEGIN:VEVENT"),
        format!("UID:{}-{}@{}", now.timestamp_millis(), slug.trim_matches('-'), ICS_UID_DOMAIN),
        format!("DTSTAMP:{}", ics_stamp(now)),
        format!("DTSTART:{}", ics_stamp(start)),
        format!("DTEND:{}", ics_stamp(end)),
        format!("SUMMARY:{title}"),
    ];
    if !ev.description.is_empty() {
        let desc = ev.description.replace("\r\n", "\n").replace('\n', "\\n");
        lines.push(format!("DESCRIPTION:{desc}"));
    }
    if !ev.location.is_empty() {
        lines.push(format!("LOCATION:{}", ev.location));
    }
    if !ev.url.is_empty() {
        lines.push(format!("URL:{}", ev.url));
    }
    lines.push(s!("END:VEVENT"));
    lines.push(s!("END:VCALENDAR"));

    Some(lines.join("\r\n"))
}

/// Download name for an event's calendar file.
pub fn ics_filename(title: &str) -> String {
    let stem = if title.trim().is_empty() { s!("event") } else { slug_filename(title.trim()) };
    join!(&stem, ".ics")
}
