// src/scrape/refresh.rs
use std::path::PathBuf;

use crate::{
    config::options::{FetchMode, FetchOptions},
    core::net::Transport,
    data::Event,
    error::FetchError,
    file,
    progress::Progress,
};

#[derive(Debug)]
pub struct RefreshReport {
    pub path: PathBuf,
    pub count: usize,
}

pub fn collect_events(
    transport: &dyn Transport,
    opts: &FetchOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<Vec<Event>, FetchError> {
    match opts.mode {
        FetchMode::Api => super::api::collect(transport, opts, progress),
        FetchMode::Scrape => super::page::collect(transport, opts, progress),
    }
}

/// Collect, then replace `opts.target` in one step. On any failure the
/// previous file is left exactly as it was.
pub fn refresh(
    transport: &dyn Transport,
    opts: &FetchOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RefreshReport, FetchError> {
    let events = collect_events(transport, opts, progress)?;
    let path = file::write_events(&opts.target, &events)?;
    logf!("Saved {} events to {}", events.len(), path.display());
    Ok(RefreshReport { path, count: events.len() })
}
