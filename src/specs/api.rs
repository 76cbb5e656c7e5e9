// src/specs/api.rs
//! External API spec: `GET {api_base}/events` with page/limit and fixed filters,
//! authenticated with `X-API-Key`.
//!
//! Response envelope:
//! ```text
//! { success, error?, message?, data: { events | items: [...], pagination: { hasMore, totalPages } } }
//! ```

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use crate::config::options::FetchOptions;
use crate::error::FetchError;
use crate::specs::events::text;

#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub data: Option<Payload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Payload {
    pub events: Option<Vec<Value>>,
    pub items: Option<Vec<Value>>,
    pub pagination: Pagination,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub has_more: Option<bool>,
    pub total_pages: Option<u32>,
}

impl Pagination {
    /// An explicit `hasMore` wins; otherwise compare against `totalPages`
    /// (absent means this was the last page).
    pub fn has_more_after(&self, page: u32) -> bool {
        match self.has_more {
            Some(more) => more,
            None => page < self.total_pages.unwrap_or(page),
        }
    }
}

#[derive(Debug)]
pub struct ApiPage {
    pub events: Vec<Value>,
    pub pagination: Pagination,
}

pub fn query(opts: &FetchOptions, page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.to_string()),
        ("limit", opts.page_limit.to_string()),
        ("includePast", s!("true")),
        ("includeDetails", s!("true")),
        ("onlyPublished", s!("true")),
        ("excludeStaffOnly", s!("true")),
        ("excludeDrafts", s!("true")),
        ("sort", s!("date")),
    ]
}

pub fn page_url(opts: &FetchOptions, page: u32) -> Result<String, FetchError> {
    let endpoint = opts.events_endpoint();
    Url::parse_with_params(&endpoint, query(opts, page))
        .map(String::from)
        .map_err(|e| FetchError::InvalidUrl(format!("{endpoint}: {e}")))
}

/// `error` or `message` from a JSON error body, if any.
pub fn error_detail(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.get("error")
        .and_then(text)
        .or_else(|| v.get("message").and_then(text))
}

pub fn parse_page(body: &str) -> Result<ApiPage, FetchError> {
    let env: Envelope = serde_json::from_str(body)
        .map_err(|e| FetchError::Payload(format!("API body is not a valid envelope: {e}")))?;

    if !env.success {
        let why = env.error.as_ref().and_then(text)
            .or_else(|| env.message.as_ref().and_then(text))
            .unwrap_or_else(|| s!("unknown error"));
        return Err(FetchError::Api(why));
    }

    let data = env.data.unwrap_or_default();
    Ok(ApiPage {
        events: data.events.or(data.items).unwrap_or_default(),
        pagination: data.pagination,
    })
}
