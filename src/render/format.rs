// src/render/format.rs
use chrono::Datelike;

use crate::config::consts::EXCERPT_CHARS;
use crate::core::dates::{local_day, parse_datetime};
use crate::core::sanitize::truncate_chars;
use crate::data::Post;

pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// "1st of March 2025". Blank stays blank; unparseable comes back verbatim.
pub fn format_event_date(value: &str) -> String {
    if value.trim().is_empty() {
        return s!();
    }
    match parse_datetime(value) {
        Some(dt) => {
            let d = local_day(&dt);
            format!("{}{} of {} {}", d.day(), ordinal_suffix(d.day()), d.format("%B"), d.year())
        }
        None => s!(value),
    }
}

/// "Mar 1, 2025", same fallbacks as `format_event_date`.
pub fn format_post_date(value: &str) -> String {
    if value.trim().is_empty() {
        return s!();
    }
    match parse_datetime(value) {
        Some(dt) => local_day(&dt).format("%b %-d, %Y").to_string(),
        None => s!(value),
    }
}

/// Summary when present, else the head of the content with "...".
pub fn post_excerpt(post: &Post) -> String {
    if !post.summary.trim().is_empty() {
        return post.summary.clone();
    }
    match post.content.as_deref() {
        Some(c) if !c.trim().is_empty() => join!(truncate_chars(c, EXCERPT_CHARS), "..."),
        _ => s!(),
    }
}
