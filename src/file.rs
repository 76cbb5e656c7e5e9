// src/file.rs

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::core::sanitize::truncate_chars;
use crate::data::Event;

#[derive(Serialize)]
struct EventsDoc<'a> {
    events: &'a [Event],
}

/// `{ "events": [...] }`, two-space indented, trailing newline.
pub fn events_json(events: &[Event]) -> io::Result<String> {
    let mut body = serde_json::to_string_pretty(&EventsDoc { events })?;
    body.push('\n');
    Ok(body)
}

/// Replace `path` with the serialized events. Returns the path written.
pub fn write_events(path: &Path, events: &[Event]) -> io::Result<PathBuf> {
    let body = events_json(events)?;
    write_atomic(path, body.as_bytes())?;
    Ok(path.to_path_buf())
}

/// Write to a sibling temp file, then rename over `path`. Readers see either
/// the old content or the new, never a half-written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = parent {
        ensure_directory(dir)?;
    }

    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("Not a file path: {}", path.display())))?;
    let tmp_name = join!(".", &name.to_string_lossy(), ".tmp");
    let tmp = match parent {
        Some(dir) => dir.join(tmp_name),
        None => PathBuf::from(tmp_name),
    };

    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

/// Save the first `limit` chars of `raw` for offline diagnosis.
pub fn write_dump(path: &Path, raw: &str, limit: usize) -> io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let head = truncate_chars(raw, limit);
    let mut contents = s!(head);
    if head.len() < raw.len() {
        contents.push_str(&format!("\n[truncated: {} of {} bytes kept]\n", head.len(), raw.len()));
    }
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
