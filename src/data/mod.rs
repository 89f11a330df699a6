//! Data models and processing for telemetry logs.
//!
//! This module handles the transformation of raw log text into parsed
//! samples and the projections the UI consumes.
//!
//! ## Submodules
//!
//! - [`sample`]: Telemetry sample data model, one JSON object per log line
//! - [`store`]: Incremental log ingestion with rotation detection
//! - [`series`]: Pure chart/summary projections over the store snapshot
//! - [`health`]: Rolling-window health tiers for the tracked application
//!
//! ## Data Flow
//!
//! ```text
//! raw log text (NDJSON)
//!        │
//!        ▼
//! LogStore::ingest()  ──▶ new-sample count (0 means no view update)
//!        │
//!        ├──▶ series::visible_window() / series() / aggregate()
//!        │
//!        └──▶ RollingHealthEvaluator::evaluate()
//! ```

pub mod health;
pub mod sample;
pub mod series;
pub mod store;

pub use health::{HealthReport, HealthThresholds, MetricHealth, RollingHealthEvaluator, Tier};
pub use sample::{MemoryInfo, NetDiskInfo, ProcessEntry, ProcessGroup, Sample, SocMetrics};
pub use series::{AggregateStats, Metric, ProcessRow, MAX_DATA_POINTS};
pub use store::LogStore;
