// src/core/net.rs
// Blocking HTTP GET behind a small trait so the fetch pipeline can be scripted in tests.

use std::error::Error;
use std::time::Duration;

use thiserror::Error;

use crate::config::consts::USER_AGENT;

/// Transport-level failure (DNS, TLS, timeout, connection reset, unreadable body).
/// HTTP statuses are not errors at this layer.
#[derive(Debug, Error)]
#[error("request to {url} failed: {message}")]
pub struct NetError {
    pub url: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    /// GET `url` with extra request headers. Any status comes back as `Ok`.
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response, NetError>;
}

/// `err` followed by each of its sources, joined with ": ".
/// reqwest's own Display stops at "error sending request".
pub fn describe(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if !out.ends_with(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        source = cause.source();
    }
    out
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, NetError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| NetError { url: s!(), message: describe(&e) })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response, NetError> {
        let fail = |e: reqwest::Error| NetError { url: s!(url), message: describe(&e) };

        let mut req = self.client.get(url);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        let resp = req.send().map_err(fail)?;

        let status = resp.status();
        let reason = s!(status.canonical_reason().unwrap_or(""));
        let body = resp.text().map_err(fail)?;
        logd!("GET {url} -> {} ({} bytes)", status.as_u16(), body.len());

        Ok(Response { status: status.as_u16(), reason, body })
    }
}
