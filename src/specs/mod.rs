// src/specs/mod.rs
//! # Upstream reading specs
//!
//! Each spec knows how to read one upstream surface and nothing else:
//!
//! - `api`    – the external REST API: query shape, envelope, pagination.
//! - `page`   – the rendered club page: where the events blob sits and how to decode it.
//! - `events` – mapping raw upstream records onto the canonical `data::Event`.
//!
//! Networking, retries and persistence live in `scrape` and `file`. Specs are
//! pure so they can be tested offline against captured payloads.
pub mod api;
pub mod events;
pub mod page;
