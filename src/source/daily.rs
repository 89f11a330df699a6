//! Daily log source.
//!
//! Reads the sampler's date-keyed log file, recomputing the file name
//! on every fetch so the dashboard rolls over transparently at local
//! date boundaries.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::LogSource;

/// File name for the log of a given calendar date.
pub fn log_file_name(date: NaiveDate) -> String {
    format!("system-monitor-{}.json", date.format("%Y-%m-%d"))
}

/// A log source that reads today's log file from the sampler's log
/// directory.
#[derive(Debug)]
pub struct DailyLogSource {
    log_dir: PathBuf,
    last_error: Option<String>,
}

impl DailyLogSource {
    /// Create a source for the given log directory.
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Self {
        Self {
            log_dir: log_dir.as_ref().to_path_buf(),
            last_error: None,
        }
    }

    /// The path this source would read right now.
    pub fn current_path(&self) -> PathBuf {
        self.log_dir.join(log_file_name(Local::now().date_naive()))
    }
}

impl LogSource for DailyLogSource {
    fn fetch(&mut self) -> Option<String> {
        let path = self.current_path();
        match fs::read_to_string(&path) {
            Ok(text) => {
                self.last_error = None;
                Some(text)
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "log fetch failed");
                self.last_error = Some(format!("{}: {}", path.display(), e));
                None
            }
        }
    }

    fn description(&self) -> String {
        format!("today: {}", self.current_path().display())
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
