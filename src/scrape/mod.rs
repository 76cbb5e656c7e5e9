// src/scrape/mod.rs
mod api;
mod page;
mod refresh;

pub use api::{collect as collect_api, fetch_page, with_retry};
pub use page::collect as collect_page;
pub use refresh::{collect_events, refresh, RefreshReport};
