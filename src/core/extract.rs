// src/core/extract.rs
//! Locate a JSON array embedded as text inside a larger HTML/JS payload.
//!
//! Pages rendered by the upstream framework carry their data either as plain
//! JSON (`"events":[...]`) or inside a JS string literal, where every quote is
//! escaped (`\"events\":[...]`). Both forms are handled; decoding the escaped
//! text is `core::decode`'s job.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::{EVENTS_KEY, EVENTS_SIBLING_KEY};

/// Return the first balanced `[...]` following the first `"key":` (plain or
/// backslash-escaped, whichever comes first in the document).
///
/// Depth counting is bracket-only: it does not track string literals, so a
/// string value containing an unmatched `[` or `]` will throw it off.
pub fn extract_array<'a>(html: &'a str, key: &str) -> Option<&'a str> {
    let at = find_key(html, key)?;
    let open = html[at..].find('[')? + at;
    let close = balanced_close(html.as_bytes(), open)?;
    Some(&html[open..=close])
}

/// Byte offset of the first occurrence of `"key":` or `\"key\":`.
pub fn find_key(html: &str, key: &str) -> Option<usize> {
    let plain = format!("\"{key}\":");
    let escaped = format!("\\\"{key}\\\":");
    match (html.find(&plain), html.find(&escaped)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn balanced_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

static EVENTS_TIERS_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| delimited_regex(EVENTS_KEY, EVENTS_SIBLING_KEY));

fn delimited_regex(key: &str, next_key: &str) -> Option<Regex> {
    let pattern = format!(
        r#"(?s)\\?"{}\\?":\s*(\[.*?\])\s*,\s*\\?"{}\\?""#,
        regex::escape(key),
        regex::escape(next_key),
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            logw!("Could not build the \"{key}\"/\"{next_key}\" pattern: {e}");
            None
        }
    }
}

/// Older page layout: the array is immediately followed by a known sibling key,
/// e.g. `"events": [...] , "tiers"`. Returns the shortest such array.
/// The events/tiers pair is compiled once; other pairs are built per call.
pub fn extract_delimited<'a>(html: &'a str, key: &str, next_key: &str) -> Option<&'a str> {
    let built;
    let re = if (key, next_key) == (EVENTS_KEY, EVENTS_SIBLING_KEY) {
        EVENTS_TIERS_RE.as_ref()?
    } else {
        built = delimited_regex(key, next_key)?;
        &built
    };
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
