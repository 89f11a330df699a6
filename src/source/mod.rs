//! Raw log text acquisition.
//!
//! This module provides a trait-based abstraction for fetching the full
//! current text of the telemetry log, either the date-keyed daily file
//! the sampler appends to or an arbitrary user-supplied file.

mod daily;
mod file;

pub use daily::{log_file_name, DailyLogSource};
pub use file::FileLogSource;

use std::fmt::Debug;

/// Trait for fetching the complete current contents of the log.
///
/// Each fetch must reflect the latest on-disk state; implementations
/// read the file fresh every time rather than caching. The store layer
/// only ever sees "text" or "no text"; I/O error detail stays here.
pub trait LogSource: Send + Debug {
    /// Fetch the full current log text.
    ///
    /// Returns `None` on failure (file missing, unreadable); the error
    /// message is then available via [`error`](Self::error).
    fn fetch(&mut self) -> Option<String>;

    /// Human-readable description of the source, for the status bar.
    /// May change between fetches (the daily source rolls over at local
    /// date boundaries).
    fn description(&self) -> String;

    /// The error message from the last failed fetch, if any.
    fn error(&self) -> Option<&str>;
}
