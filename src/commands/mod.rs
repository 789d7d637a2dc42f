//! Command-line interface for linerate.
//!
//! Every subcommand follows the same flow: read the configuration for
//! defaults, load a snapshot, enrich it once, then hand the enriched log to
//! the engine function it reports on.

pub mod coverage;
pub mod init;
pub mod metrics;
pub mod trend;

use crate::libs::config::{Config, EngineConfig};
use crate::libs::messages::Message;
use crate::libs::model::LineSnapshot;
use crate::libs::snapshot::load_snapshot;
use crate::{msg_bail_anyhow, msg_debug, msg_error_anyhow, msg_warning};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::Path;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Line and stage metrics for a date and shift")]
    Metrics(metrics::MetricsArgs),
    #[command(about = "Trend buckets and top downtime reasons")]
    Trend(trend::TrendArgs),
    #[command(about = "Shift attribution of runs and downtime for a date")]
    Coverage(coverage::CoverageArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Metrics(args) => metrics::cmd(args),
            Commands::Trend(args) => trend::cmd(args),
            Commands::Coverage(args) => coverage::cmd(args),
        }
    }
}

/// Parses `today` (any case) or a `YYYY-MM-DD` date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => msg_bail_anyhow!(Message::InvalidDate(date_str.to_string())),
    }
}

/// Engine defaults from the config file; an unreadable file falls back to defaults.
fn engine_config() -> EngineConfig {
    match Config::read() {
        Ok(config) => config.engine_or_default(),
        Err(e) => {
            msg_warning!(Message::ConfigReadFailed(e.to_string()));
            EngineConfig::default()
        }
    }
}

fn load_line(path: &Path) -> Result<LineSnapshot> {
    let snapshot = load_snapshot(path).map_err(|e| msg_error_anyhow!(Message::SnapshotLoadFailed(e.to_string())))?;
    let rows = snapshot.shifts.len() + snapshot.breaks.len() + snapshot.runs.len() + snapshot.downtime.len();
    msg_debug!("{}", Message::SnapshotLoaded(snapshot.line.clone(), rows));
    Ok(snapshot)
}
