// src/render/events.rs
use std::cmp::Reverse;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

use crate::core::dates::{self, local_day, parse_date_only};
use crate::core::sanitize::contains_ci;
use crate::data::Event;
use super::format::format_event_date;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitEvents {
    /// Today and later, soonest first; undated events at the end.
    pub upcoming: Vec<Event>,
    /// Before today, most recent first.
    pub past: Vec<Event>,
}

impl SplitEvents {
    pub fn filter(&self, term: &str) -> SplitEvents {
        SplitEvents {
            upcoming: filter_events(&self.upcoming, term),
            past: filter_events(&self.past, term),
        }
    }
}

/// Start instant of an event. A bare `date` picks up an `HH:MM` `time`.
pub fn event_start(ev: &Event) -> Option<DateTime<FixedOffset>> {
    if let Some(day) = parse_date_only(&ev.date) {
        if let Ok(t) = NaiveTime::parse_from_str(ev.time.trim(), "%H:%M") {
            return dates::from_local(day.and_time(t));
        }
    }
    dates::parse_datetime(&ev.date)
}

/// Partition around `today` (time of day ignored). Missing or unparseable
/// dates count as upcoming.
pub fn split_events(events: &[Event], today: NaiveDate) -> SplitEvents {
    let mut upcoming = Vec::new();
    let mut past = Vec::new();

    for ev in events {
        match event_start(ev) {
            Some(start) if local_day(&start) < today => past.push(ev.clone()),
            _ => upcoming.push(ev.clone()),
        }
    }

    upcoming.sort_by_cached_key(|e| {
        let start = event_start(e);
        (start.is_none(), start)
    });
    past.sort_by_cached_key(|e| Reverse(event_start(e)));

    SplitEvents { upcoming, past }
}

/// Case-insensitive substring match over title, description and location.
/// Only the empty term keeps everything; whitespace is matched literally.
pub fn filter_events(events: &[Event], term: &str) -> Vec<Event> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return events.to_vec();
    }
    events
        .iter()
        .filter(|e| {
            contains_ci(&e.title, &needle)
                || contains_ci(&e.description, &needle)
                || contains_ci(&e.location, &needle)
        })
        .cloned()
        .collect()
}

/// "1st of March 2025 · 18:30 · Room 01-013", skipping blanks.
pub fn meta_line(ev: &Event) -> String {
    [format_event_date(&ev.date), ev.time.clone(), ev.location.clone()]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
}
