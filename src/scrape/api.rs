// src/scrape/api.rs
use std::thread;

use crate::{
    config::consts::API_KEY_HEADER,
    config::options::{FetchOptions, RetryPolicy},
    core::net::Transport,
    data::Event,
    error::FetchError,
    progress::Progress,
    specs::api::{self, ApiPage},
    specs::events::{map_events, MapContext},
};

/// Page through the external API and map everything collected.
/// Strictly sequential: one page in flight at a time.
pub fn collect(
    transport: &dyn Transport,
    opts: &FetchOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<Event>, FetchError> {
    let key = opts.require_api_key()?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(None);
        p.log("Fetching events from the API…");
    }
    // Shorter object lifetime, so `finish` can reborrow afterwards
    let pages_progress = progress.as_mut().map(|p| &mut **p as &mut dyn Progress);
    let result = collect_pages(transport, opts, key, pages_progress);
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let raws = result?;
    Ok(map_events(&raws, &MapContext::from_options(opts)))
}

fn collect_pages(
    transport: &dyn Transport,
    opts: &FetchOptions,
    key: &str,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<serde_json::Value>, FetchError> {
    let mut collected = Vec::new();
    let mut page = 1u32;

    loop {
        let ApiPage { events, pagination } = fetch_page(transport, opts, key, page)?;
        let count = events.len();
        collected.extend(events);
        logd!("Page {page}: {count} events");

        if let Some(p) = progress.as_deref_mut() {
            p.item_done(page, count);
        }

        if !pagination.has_more_after(page) {
            break;
        }
        if page >= opts.max_pages {
            logw!("Stopping at the {}-page cap; upstream still reports more", opts.max_pages);
            break;
        }
        page += 1;
    }

    Ok(collected)
}

/// One API page, retried per `opts.retry`.
pub fn fetch_page(
    transport: &dyn Transport,
    opts: &FetchOptions,
    key: &str,
    page: u32,
) -> Result<ApiPage, FetchError> {
    let url = api::page_url(opts, page)?;
    with_retry(&opts.retry, || {
        let resp = transport.get(&url, &[(API_KEY_HEADER, key)])?;
        if !resp.is_success() {
            let detail = api::error_detail(&resp.body)
                .map(|d| join!(": ", &d))
                .unwrap_or_default();
            return Err(FetchError::Status { status: resp.status, reason: resp.reason, detail });
        }
        api::parse_page(&resp.body)
    })
}

/// Run `op`, retrying retryable failures after 1x, 2x, 4x... the base delay.
pub fn with_retry<T>(
    policy: &RetryPolicy,
    mut op: impl FnMut() -> Result<T, FetchError>,
) -> Result<T, FetchError> {
    let mut retry = 0u32;
    loop {
        match op() {
            Ok(v) => return Ok(v),
            Err(e) if e.is_retryable() && retry < policy.max_retries => {
                retry += 1;
                let delay = policy.delay_for(retry);
                logw!("{e}; retry {retry}/{} in {delay:?}", policy.max_retries);
                thread::sleep(delay);
            }
            Err(e) => return Err(e),
        }
    }
}
