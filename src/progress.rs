// src/progress.rs
/// Lightweight progress reporting for a refresh run.
/// The CLI implements this to surface status; tests pass nothing.
pub trait Progress {
    /// Called at the start with the total number of items, when known.
    fn begin(&mut self, _total: Option<usize>) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One logical unit finished (an API page, the scraped page).
    fn item_done(&mut self, _page: u32, _events: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
