// src/config/options.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::error::FetchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchMode {
    /// Paginated, authenticated external API.
    Api,
    /// Single scrape of the rendered club page.
    Scrape,
}

/// What to do when a refresh fails. The target file is untouched either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Exit non-zero so CI notices.
    Fail,
    /// Log and return normally.
    LogAndReturn,
}

impl FailurePolicy {
    /// `Fail` when the `CI` env var is set to anything but "false"/"0".
    pub fn from_ci_var(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() && v != "false" && v != "0" => FailurePolicy::Fail,
            _ => FailurePolicy::LogAndReturn,
        }
    }

    /// API refreshes always fail loudly. Only a scrape run by hand, outside
    /// CI, may log and return.
    pub fn for_mode(mode: FetchMode, ci_flag: bool, ci_env: Option<&str>) -> Self {
        match mode {
            FetchMode::Api => FailurePolicy::Fail,
            FetchMode::Scrape if ci_flag => FailurePolicy::Fail,
            FetchMode::Scrape => Self::from_ci_var(ci_env),
        }
    }

    /// Whether `err` should end the process with a non-zero status.
    /// Missing configuration is fatal under every policy.
    pub fn is_fatal(self, err: &FetchError) -> bool {
        matches!(err, FetchError::MissingApiKey(_)) || self == FailurePolicy::Fail
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): base, 2*base, 4*base, ...
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(retry.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            base_delay: Duration::from_millis(RETRY_BASE_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub mode: FetchMode,
    pub api_base: String,
    pub api_key: Option<String>,
    pub site_base: String,
    pub cdn_base: String,
    pub club_slug: String,
    pub page_limit: u32,
    pub max_pages: u32,
    pub retry: RetryPolicy,
    pub timeout: Duration,
    pub target: PathBuf,
    pub dump_path: PathBuf,
    pub dump_limit: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            mode: FetchMode::Api,
            api_base: s!(API_BASE),
            api_key: None,
            site_base: s!(SITE_BASE),
            cdn_base: s!(CDN_BASE),
            club_slug: s!(CLUB_SLUG),
            page_limit: PAGE_LIMIT,
            max_pages: MAX_PAGES,
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            target: PathBuf::from(DEFAULT_TARGET),
            dump_path: PathBuf::from(STORE_DIR).join(DUMP_FILE),
            dump_limit: DUMP_LIMIT_CHARS,
        }
    }
}

impl FetchOptions {
    /// Defaults plus the API key from the environment (blank counts as missing).
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self { api_key, ..Self::default() }
    }

    pub fn require_api_key(&self) -> Result<&str, FetchError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(FetchError::MissingApiKey(API_KEY_ENV))
    }

    /// The club page that embeds the events blob.
    pub fn club_page_url(&self) -> String {
        format!("{}/hsg/clubs/{}", self.site_base.trim_end_matches('/'), self.club_slug)
    }

    pub fn events_endpoint(&self) -> String {
        join!(self.api_base.trim_end_matches('/'), "/events")
    }
}
