//! User-supplied log file source.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::LogSource;

/// A log source that reads a fixed, user-chosen file.
///
/// Unlike [`DailyLogSource`](super::DailyLogSource) the path never
/// changes. The first load goes through `LogStore::replace_all`, and a
/// read failure is surfaced immediately: an explicit user action
/// deserves explicit feedback rather than the silent retry the daily
/// tail gets.
#[derive(Debug)]
pub struct FileLogSource {
    path: PathBuf,
    last_error: Option<String>,
}

impl FileLogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            last_error: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for FileLogSource {
    fn fetch(&mut self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                self.last_error = None;
                Some(text)
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "file read failed");
                self.last_error = Some(format!("{}: {}", self.path.display(), e));
                None
            }
        }
    }

    fn description(&self) -> String {
        format!("file: {}", self.path.display())
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_fetch_returns_full_text() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"timestamp":"2024-01-01T00:00:00Z"}}"#).unwrap();

        let mut source = FileLogSource::new(file.path());
        assert_eq!(source.description(), format!("file: {}", file.path().display()));
        assert!(source.fetch().unwrap().contains("timestamp"));
        assert!(source.error().is_none());
    }

    #[test]
    fn test_fetch_unreadable_file_reports_error() {
        let mut source = FileLogSource::new("/nonexistent/path/telemetry.json");
        assert!(source.fetch().is_none());
        assert!(source.error().is_some());
    }
}
