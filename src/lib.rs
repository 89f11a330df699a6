// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # sysmon-viewer
//!
//! A live terminal dashboard for the newline-delimited JSON telemetry
//! logs written by the system-monitor sampler.
//!
//! The sampler is a black box that appends one JSON object per line to
//! a date-keyed log file once per sampling interval. This crate tails
//! that file, keeps a bounded in-memory time series consistent with the
//! file's growth (including rotation and truncation), and renders
//! charts, scalar readouts, rolling health indicators, and a ranked
//! process table in an interactive terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(ingest + │    │(render) │    │         │  │
//! │  └────┬────┘    │ project) │    └─────────┘    └─────────┘  │
//! │       │         └──────────┘                                 │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── DailyLogSource | FileLogSource               │
//! │  │ (fetch) │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, the refresh cycle, and view navigation
//! - **[`source`]**: Log text acquisition ([`LogSource`] trait) for the
//!   date-keyed daily file or a user-supplied file
//! - **[`data`]**: Sample model, incremental [`LogStore`] ingestion with
//!   rotation detection, pure chart/statistics projections, and rolling
//!   health classification
//! - **[`scheduler`]**: Cooperative refresh timing with a reentrancy guard
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ```bash
//! # Tail today's log in the default log directory
//! sysmon-viewer --log-dir logs
//!
//! # Inspect a specific log file
//! sysmon-viewer --file logs/system-monitor-2024-01-01.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use sysmon_viewer::{App, DailyLogSource, HealthThresholds};
//!
//! let source = Box::new(DailyLogSource::new("logs"));
//! let app = App::new(source, HealthThresholds::default(), false);
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod scheduler;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Dashboard, View};
pub use data::{
    AggregateStats, HealthReport, HealthThresholds, LogStore, Metric, RollingHealthEvaluator,
    Sample, Tier,
};
pub use scheduler::RefreshScheduler;
pub use source::{log_file_name, DailyLogSource, FileLogSource, LogSource};
