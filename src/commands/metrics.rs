//! Line metrics command.
//!
//! Prints the line summary for one date and shift selection, followed by the
//! per-stage breakdown with the bottleneck marked.

use super::{engine_config, load_line, parse_date};
use crate::libs::enrich::enrich;
use crate::libs::messages::Message;
use crate::libs::metrics::{compute_line_metrics, MetricsQuery};
use crate::libs::model::ShiftSelection;
use crate::libs::view::View;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Snapshot JSON file with the line's stages and log rows
    #[arg(long, short)]
    snapshot: PathBuf,

    #[arg(long, short, default_value = "today", help = "Date to report on (YYYY-MM-DD or 'today')")]
    date: String,

    /// Shift selection; defaults to the configured `default_shift`
    #[arg(long, value_enum)]
    shift: Option<ShiftSelection>,
}

/// # Examples
///
/// ```bash
/// linerate metrics --snapshot line2.json --date 2025-03-04 --shift day
/// ```
pub fn cmd(args: MetricsArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let config = engine_config();
    let shift = args.shift.unwrap_or(config.default_shift);

    let snapshot = load_line(&args.snapshot)?;
    let log = enrich(&snapshot, &config.context(Local::now().naive_local()));
    let metrics = compute_line_metrics(&snapshot.stages, &log, MetricsQuery::new(date, shift));

    msg_print!(
        Message::MetricsHeader(snapshot.line.clone(), date.format("%Y-%m-%d").to_string(), shift.to_string()),
        true
    );
    if !metrics.has_activity {
        msg_warning!(Message::NoActivityForDate(date.format("%Y-%m-%d").to_string()));
    }
    View::metrics(&metrics)?;

    if metrics.stages.is_empty() {
        msg_warning!(Message::NoStagesConfigured);
        return Ok(());
    }
    msg_print!(Message::StagesHeader, true);
    View::stages(&metrics)?;

    Ok(())
}
