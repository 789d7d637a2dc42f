//! Coverage command: lists a date's runs and downtime with their shift
//! attribution and enriched durations.

use super::{engine_config, load_line, parse_date};
use crate::libs::enrich::enrich;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Snapshot JSON file with the line's stages and log rows
    #[arg(long, short)]
    snapshot: PathBuf,

    #[arg(long, short, default_value = "today", help = "Date to inspect (YYYY-MM-DD or 'today')")]
    date: String,
}

pub fn cmd(args: CoverageArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let config = engine_config();

    let snapshot = load_line(&args.snapshot)?;
    let log = enrich(&snapshot, &config.context(Local::now().naive_local()));
    let day = date.format("%Y-%m-%d").to_string();

    msg_print!(Message::CoverageHeader(snapshot.line.clone(), day.clone()), true);

    let runs: Vec<_> = log.runs_on(date).collect();
    let downtime: Vec<_> = log.downtime_on(date).collect();
    if runs.is_empty() && downtime.is_empty() {
        msg_info!(Message::NoRowsForDate(day));
        return Ok(());
    }

    if !runs.is_empty() {
        msg_print!(Message::RunsHeader);
        View::runs(&runs)?;
    }
    if !downtime.is_empty() {
        msg_print!(Message::DowntimeHeader, true);
        View::downtime(&downtime, &snapshot.stages)?;
    }

    Ok(())
}
