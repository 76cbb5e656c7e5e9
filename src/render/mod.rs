// src/render/mod.rs
//! Pure transforms behind the site's listings: no I/O, no clocks read
//! implicitly (callers pass `today` / `now`).

pub mod events;
pub mod format;
pub mod ical;

pub use events::{event_start, filter_events, meta_line, split_events, SplitEvents};
pub use format::{format_event_date, format_post_date, ordinal_suffix, post_excerpt};
pub use ical::{generate_ics, ics_filename};
