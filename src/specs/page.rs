// src/specs/page.rs
//! Club page spec: the server-rendered page embeds the event list as a JSON
//! array under `"events"`, either plain or inside an escaped JS string.
//! Older layouts are recognised by the `"tiers"` key right after the array;
//! that reading is the fallback when the bracket-counted blob won't decode
//! (a `]` inside a title is enough to cut it short).

use serde_json::Value;

use crate::config::consts::{EVENTS_KEY, EVENTS_SIBLING_KEY};
use crate::core::decode::{decode, DecodeError};
use crate::core::extract::{extract_array, extract_delimited};
use crate::error::FetchError;

/// Candidate blobs, most likely first, without repeats.
pub fn event_blobs(html: &str) -> Vec<&str> {
    let mut blobs: Vec<&str> = extract_array(html, EVENTS_KEY).into_iter().collect();
    if let Some(legacy) = extract_delimited(html, EVENTS_KEY, EVENTS_SIBLING_KEY) {
        if !blobs.contains(&legacy) {
            blobs.push(legacy);
        }
    }
    blobs
}

/// Raw event records from a club page.
pub fn parse_doc(html: &str) -> Result<Vec<Value>, FetchError> {
    let mut first_err: Option<DecodeError> = None;

    for blob in event_blobs(html) {
        logd!("Events blob candidate: {} bytes", blob.len());
        match decode(blob) {
            Ok(decoded) => {
                return match decoded.value {
                    Value::Array(items) => Ok(items),
                    _ => Err(FetchError::Payload(s!("events blob decoded to an object, not an array"))),
                };
            }
            Err(e) => {
                logd!("{e}");
                first_err.get_or_insert(e);
            }
        }
    }

    Err(match first_err {
        Some(e) => e.into(),
        None => FetchError::BlobNotFound(s!(EVENTS_KEY)),
    })
}
