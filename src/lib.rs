//! # Linerate - Production Line Metrics
//!
//! A command-line utility and library that turns a production line's shift,
//! run and downtime logs into shift-attributed metrics.
//!
//! ## Features
//!
//! - **Shift Coverage**: Splits events across midnight and attributes minutes to Day and Night shifts
//! - **Row Enrichment**: Derives production time, apportions downtime to runs, computes run rates
//! - **Line Metrics**: Stage utilisation, bottleneck detection and staffing callouts
//! - **Trends**: Daily, weekly, monthly and quarterly buckets with top downtime reasons
//!
//! ## Usage
//!
//! ```rust,no_run
//! use linerate::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod libs;
