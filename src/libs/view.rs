use crate::libs::enrich::{DowntimeRow, RunRow};
use crate::libs::formatter::{format_count, format_minutes, format_percent, format_rate};
use crate::libs::interval::{format_clock, to_minutes};
use crate::libs::metrics::LineMetrics;
use crate::libs::model::Stage;
use crate::libs::trend::{downtime_reason_label, ReasonTotal, TrendPoint};
use anyhow::Result;
use prettytable::{row, Table};

/// Normalised `HH:MM` for a logged clock value; unparseable text is shown as entered.
fn clock(time: &str) -> String {
    to_minutes(time).map(format_clock).unwrap_or_else(|| time.to_string())
}

pub struct View {}

impl View {
    pub fn metrics(metrics: &LineMetrics) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["UNITS", "DOWNTIME", "NET RATE", "LINE UTIL", "BOTTLENECK", "CREW", "REQUIRED", "STAFFING"]);
        table.add_row(row![
            format_count(metrics.units),
            format_minutes(metrics.total_downtime),
            format_rate(metrics.net_run_rate),
            format_percent(metrics.line_util),
            metrics.bottleneck_stage_name.as_deref().unwrap_or("-"),
            format_count(metrics.crew_on_shift),
            format_count(metrics.required_crew),
            metrics.staffing_callout
        ]);
        table.printstd();

        Ok(())
    }

    pub fn stages(metrics: &LineMetrics) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["STAGE", "DOWNTIME", "UPTIME", "THROUGHPUT", "CAPACITY", "UTIL"]);
        for stage in &metrics.stages {
            let marker = if metrics.bottleneck_stage_name.as_deref() == Some(stage.stage_name.as_str()) {
                " *"
            } else {
                ""
            };
            table.add_row(row![
                format!("{}{}", stage.stage_name, marker),
                format_minutes(stage.downtime),
                format_percent(stage.uptime_ratio * 100.0),
                format_rate(stage.throughput),
                format_rate(stage.capacity),
                format_percent(stage.utilisation)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn trend(points: &[TrendPoint]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["PERIOD", "DAYS", "UNITS", "DOWNTIME", "AVG RATE", "AVG UTIL", "BOTTLENECK"]);
        for point in points {
            table.add_row(row![
                point.label,
                point.active_days,
                format_count(point.units),
                format_minutes(point.total_downtime),
                format_rate(point.avg_net_run_rate),
                format_percent(point.avg_line_util),
                point.top_bottleneck.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn reasons(reasons: &[ReasonTotal]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["REASON", "EVENTS", "MINUTES"]);
        for reason in reasons {
            table.add_row(row![reason.label, reason.occurrences, format_minutes(reason.minutes)]);
        }
        table.printstd();

        Ok(())
    }

    pub fn runs(runs: &[&RunRow]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["PRODUCT", "START", "FINISH", "UNITS", "GROSS", "DOWNTIME", "NET", "NET RATE", "COVERAGE"]);
        for run in runs {
            table.add_row(row![
                run.entry.product,
                clock(&run.entry.start),
                clock(&run.entry.finish),
                format_count(run.entry.units),
                format_minutes(run.gross_production_time),
                format_minutes(run.associated_down_time),
                format_minutes(run.net_production_time),
                format_rate(run.net_run_rate),
                run.coverage.label
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn downtime(rows: &[&DowntimeRow], stages: &[Stage]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["REASON", "START", "FINISH", "MINUTES", "COVERAGE"]);
        for row in rows {
            table.add_row(row![
                downtime_reason_label(row, stages),
                clock(&row.entry.start),
                clock(&row.entry.finish),
                format_minutes(row.downtime_mins),
                row.coverage.label
            ]);
        }
        table.printstd();

        Ok(())
    }
}
