// src/core/dates.rs
// Upstream dates are "ISO-ish": RFC 3339 with offset, naive date-times, or bare dates.
// Naive values are read as local time.

use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn parse_datetime(value: &str) -> Option<DateTime<FixedOffset>> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(v) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(v) {
        return Some(dt);
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(n) = NaiveDateTime::parse_from_str(v, fmt) {
            return from_local(n);
        }
    }
    from_local(parse_date_only(v)?.and_hms_opt(0, 0, 0)?)
}

/// `YYYY-MM-DD` with nothing else.
pub fn parse_date_only(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Read `n` as local wall-clock time. A time skipped by a spring-forward jump
/// moves one hour later, the way browsers resolve it.
pub fn from_local(n: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    match Local.from_local_datetime(&n) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.fixed_offset()),
        LocalResult::None => {
            let later = n.checked_add_signed(TimeDelta::hours(1))?;
            Local.from_local_datetime(&later).earliest().map(|dt| dt.fixed_offset())
        }
    }
}

/// Calendar day of `dt` in local time.
pub fn local_day(dt: &DateTime<FixedOffset>) -> NaiveDate {
    dt.with_timezone(&Local).date_naive()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `HH:MM` in local time. Empty for bare dates and unparseable input,
/// since neither says anything about the time of day.
pub fn format_time(value: &str) -> String {
    if parse_date_only(value).is_some() {
        return s!();
    }
    match parse_datetime(value) {
        Some(dt) => dt.with_timezone(&Local).format("%H:%M").to_string(),
        None => s!(),
    }
}
