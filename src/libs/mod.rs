//! Core library modules for linerate.
//!
//! The engine is a set of pure functions over a read-only [`model::LineSnapshot`];
//! the remaining modules load snapshots, hold configuration and render results.
//!
//! ## Features
//!
//! - **Time Primitives**: Clock parsing, midnight splitting, interval merging
//! - **Shift Coverage**: Attributing events to the Day and Night shift windows
//! - **Enrichment**: Derived durations, apportioned downtime and run rates
//! - **Aggregation**: Stage and line metrics, multi-period trends, downtime reasons
//! - **User Interface**: Configuration wizard, messages, tables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use linerate::libs::context::EngineContext;
//! use linerate::libs::enrich::enrich;
//! use linerate::libs::metrics::{compute_line_metrics, MetricsQuery};
//! use linerate::libs::model::ShiftSelection;
//! use linerate::libs::snapshot::load_snapshot;
//! use std::path::Path;
//!
//! let snapshot = load_snapshot(Path::new("line2.json"))?;
//! let log = enrich(&snapshot, &EngineContext::default());
//! let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
//! let metrics = compute_line_metrics(&snapshot.stages, &log, MetricsQuery::new(date, ShiftSelection::Day));
//! println!("{:.1}% line utilisation", metrics.line_util);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod context;
pub mod coverage;
pub mod data_storage;
pub mod enrich;
pub mod formatter;
pub mod interval;
pub mod messages;
pub mod metrics;
pub mod model;
pub mod numeric;
pub mod reason;
pub mod snapshot;
pub mod trend;
pub mod view;
