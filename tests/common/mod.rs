// tests/common/mod.rs
//
// Scripted transport and temp-dir helpers shared by the fetch tests.
//
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use clubfeed::config::options::{FetchMode, FetchOptions, RetryPolicy};
use clubfeed::core::net::{NetError, Response, Transport};

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("clubfeed_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

pub fn ok(body: &str) -> Result<Response, NetError> {
    status(200, body)
}

pub fn status(code: u16, body: &str) -> Result<Response, NetError> {
    Ok(Response { status: code, reason: "Scripted".into(), body: body.into() })
}

pub fn net_down(url: &str) -> Result<Response, NetError> {
    Err(NetError { url: url.into(), message: "connection reset".into() })
}

/// Replays canned responses in order and records every request.
pub struct Scripted {
    responses: RefCell<VecDeque<Result<Response, NetError>>>,
    pub calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl Scripted {
    pub fn new(responses: Vec<Result<Response, NetError>>) -> Self {
        Self { responses: RefCell::new(responses.into()), calls: RefCell::new(Vec::new()) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn url(&self, i: usize) -> String {
        self.calls.borrow()[i].0.clone()
    }

    pub fn header(&self, i: usize, name: &str) -> Option<String> {
        self.calls.borrow()[i].1.iter().find(|(n, _)| n == name).map(|(_, v)| v.clone())
    }
}

impl Transport for Scripted {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response, NetError> {
        let hs = headers.iter().map(|(n, v)| (n.to_string(), v.to_string())).collect();
        self.calls.borrow_mut().push((url.to_string(), hs));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {url}"))
    }
}

pub fn options(dir: &PathBuf, mode: FetchMode) -> FetchOptions {
    FetchOptions {
        mode,
        api_key: Some("test-key".into()),
        retry: RetryPolicy { base_delay: std::time::Duration::ZERO, ..RetryPolicy::default() },
        target: dir.join("data").join("events.json"),
        dump_path: dir.join(".store").join("events-raw.txt"),
        ..FetchOptions::default()
    }
}
