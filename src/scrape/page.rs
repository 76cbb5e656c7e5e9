// src/scrape/page.rs
use crate::{
    config::options::FetchOptions,
    core::net::Transport,
    data::Event,
    error::FetchError,
    file,
    progress::Progress,
    specs::events::{map_events, MapContext},
    specs::page::parse_doc,
};

/// Single attempt against the club page. On a parse failure the raw text is
/// dumped for offline diagnosis; nothing else is written.
pub fn collect(
    transport: &dyn Transport,
    opts: &FetchOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<Event>, FetchError> {
    let url = opts.club_page_url();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(Some(1));
        p.log(&format!("Scraping {url}…"));
    }
    let result = scrape_once(transport, opts, &url);
    if let Some(p) = progress.as_deref_mut() {
        if let Ok(events) = &result {
            p.item_done(1, events.len());
        }
        p.finish();
    }
    result
}

fn scrape_once(transport: &dyn Transport, opts: &FetchOptions, url: &str) -> Result<Vec<Event>, FetchError> {
    let resp = transport.get(url, &[])?;
    if !resp.is_success() {
        return Err(FetchError::Status { status: resp.status, reason: resp.reason, detail: s!() });
    }

    match parse_doc(&resp.body) {
        Ok(raws) => Ok(map_events(&raws, &MapContext::from_options(opts))),
        Err(e) => {
            dump_failure(opts, &e, &resp.body);
            Err(e)
        }
    }
}

fn dump_failure(opts: &FetchOptions, err: &FetchError, html: &str) {
    // The failing blob is the useful part when we got that far; else the page itself
    let raw = match err {
        FetchError::Decode(d) => d.raw.as_str(),
        _ => html,
    };
    match file::write_dump(&opts.dump_path, raw, opts.dump_limit) {
        Ok(path) => logf!("Wrote raw dump to {}", path.display()),
        Err(e) => logw!("Could not write raw dump: {e}"),
    }
}
