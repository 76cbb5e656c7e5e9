// src/store.rs
//
// Read side of the static data files the site serves (events, posts, board).
// Same tolerance as the page scripts: a missing or non-array collection is
// treated as empty, and records that don't fit the shape are skipped.

use std::{error::Error, fs, path::Path};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::data::{Board, BoardMember, Event, Post};

fn read_json(path: &Path) -> Result<Value, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Could not read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| format!("Could not parse {}: {e}", path.display()))?;
    Ok(value)
}

/// Records under `key`, skipping entries that don't deserialize.
fn collection<T: DeserializeOwned>(doc: &Value, key: &str) -> Vec<T> {
    let Some(items) = doc.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                logd!("Skipping malformed \"{key}\" record: {e}");
                None
            }
        })
        .collect()
}

pub fn load_events(path: &Path) -> Result<Vec<Event>, Box<dyn Error>> {
    Ok(collection(&read_json(path)?, "events"))
}

pub fn load_posts(path: &Path) -> Result<Vec<Post>, Box<dyn Error>> {
    Ok(collection(&read_json(path)?, "posts"))
}

pub fn load_board(path: &Path) -> Result<Board, Box<dyn Error>> {
    let doc = read_json(path)?;
    let cohort = |key: &str| -> Vec<BoardMember> { collection(&doc, key) };
    Ok(Board {
        current: cohort("current"),
        distinguished: cohort("distinguished"),
        faculty: cohort("faculty"),
    })
}
