//! In-memory log store with incremental ingestion.
//!
//! The sampler appends one JSON object per line to the log file; the
//! viewer re-fetches the whole file each refresh cycle. [`LogStore`]
//! reconciles that full text against what it has already parsed so each
//! cycle costs O(new lines), not O(file size), and detects external
//! rotation or truncation of the file.

use tracing::{debug, warn};

use super::sample::Sample;

/// Owns the ordered sequence of parsed samples for the currently loaded
/// log file.
///
/// The file itself is the persistence layer and is owned externally;
/// this store only ever receives text it is handed.
#[derive(Debug, Default)]
pub struct LogStore {
    samples: Vec<Sample>,
    /// Non-blank lines consumed so far, including malformed ones.
    /// Tracked separately from `samples.len()` so skipped lines are
    /// never re-parsed on the next cycle.
    lines_consumed: usize,
}

impl LogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the full current contents of the log file against the
    /// already-parsed sequence.
    ///
    /// If the file shrank (rotation or truncation), the in-memory
    /// sequence is discarded and re-parsed from scratch. Otherwise only
    /// the lines beyond those already consumed are parsed. Lines that
    /// fail to parse are skipped individually.
    ///
    /// Returns the number of samples appended by this call.
    pub fn ingest(&mut self, raw: &str) -> usize {
        let lines: Vec<&str> = raw.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

        if lines.len() < self.lines_consumed {
            debug!(
                previous = self.lines_consumed,
                current = lines.len(),
                "log rotation detected, reparsing from scratch"
            );
            self.samples.clear();
            self.lines_consumed = 0;
        }

        let mut appended = 0;
        for line in &lines[self.lines_consumed..] {
            match serde_json::from_str::<Sample>(line) {
                Ok(sample) => {
                    self.samples.push(sample);
                    appended += 1;
                }
                Err(e) => {
                    warn!(error = %e, "skipping malformed log line");
                }
            }
        }
        self.lines_consumed = lines.len();

        appended
    }

    /// Full re-parse, ignoring the rotation heuristic.
    ///
    /// Used for user-supplied file loads, where the view must update
    /// regardless of how the new content relates to the old.
    pub fn replace_all(&mut self, raw: &str) -> usize {
        self.samples.clear();
        self.lines_consumed = 0;
        self.ingest(raw)
    }

    /// The current parsed sequence, oldest first.
    pub fn snapshot(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
