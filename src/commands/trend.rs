//! Trend command: bucketed line metrics plus the top downtime reasons
//! across the same window.

use super::{engine_config, load_line, parse_date};
use crate::libs::enrich::enrich;
use crate::libs::messages::Message;
use crate::libs::model::ShiftSelection;
use crate::libs::trend::{build_buckets, summarize_bucket, top_downtime_reasons, TrendRange};
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TrendArgs {
    /// Snapshot JSON file with the line's stages and log rows
    #[arg(long, short)]
    snapshot: PathBuf,

    /// Anchor date; the newest bucket contains it
    #[arg(long, short, default_value = "today")]
    date: String,

    #[arg(long, short, value_enum, help = "Bucket size; defaults to the configured range")]
    range: Option<TrendRange>,

    #[arg(long, value_enum)]
    shift: Option<ShiftSelection>,

    /// Number of downtime reasons to list
    #[arg(long, short)]
    top: Option<usize>,
}

pub fn cmd(args: TrendArgs) -> Result<()> {
    let anchor = parse_date(&args.date)?;
    let config = engine_config();
    let range = args.range.unwrap_or(config.default_range);
    let shift = args.shift.unwrap_or(config.default_shift);
    let top = args.top.unwrap_or(config.top_reasons);

    let snapshot = load_line(&args.snapshot)?;
    let log = enrich(&snapshot, &config.context(Local::now().naive_local()));

    let buckets = build_buckets(anchor, range);
    let points: Vec<_> = buckets
        .iter()
        .map(|bucket| summarize_bucket(&snapshot.stages, &log, bucket, shift))
        .collect();

    msg_print!(Message::TrendHeader(snapshot.line.clone(), range.to_string(), shift.to_string()), true);
    View::trend(&points)?;

    let reasons = top_downtime_reasons(&snapshot.stages, &log, &buckets, shift, top);
    if reasons.is_empty() {
        msg_info!(Message::NoDowntimeReasons, true);
        return Ok(());
    }
    msg_print!(Message::TopReasonsHeader(reasons.len()), true);
    View::reasons(&reasons)?;

    Ok(())
}
