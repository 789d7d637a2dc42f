//! Multi-period trends built on top of the daily metrics.
//!
//! A trend is a run of calendar buckets ending at an anchor date. Each bucket
//! re-runs [`compute_line_metrics`] for every one of its dates, sums the
//! additive figures (units, downtime) and averages the ratios (utilisation,
//! net run rate) over the days that actually had activity.
//!
//! | Range     | Buckets | Bucket span                          |
//! |-----------|---------|--------------------------------------|
//! | `day`     | 14      | one date                             |
//! | `week`    | 12      | Monday to Sunday                     |
//! | `month`   | 12      | first to last day of a calendar month |
//! | `quarter` | 8       | three full calendar months           |

use crate::libs::coverage::shift_weight;
use crate::libs::enrich::{DowntimeRow, EnrichedLog};
use crate::libs::metrics::{compute_line_metrics, MetricsQuery};
use crate::libs::model::{stage_display_name, ShiftSelection, Stage};
use crate::libs::numeric::mean;
use crate::libs::reason::{EQUIPMENT_CATEGORY, REASON_SEPARATOR};
use chrono::{Datelike, Duration, Months, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const UNSPECIFIED_REASON: &str = "Unspecified";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendRange {
    Day,
    #[default]
    Week,
    Month,
    Quarter,
}

impl TrendRange {
    pub fn bucket_count(&self) -> usize {
        match self {
            TrendRange::Day => 14,
            TrendRange::Week | TrendRange::Month => 12,
            TrendRange::Quarter => 8,
        }
    }
}

impl fmt::Display for TrendRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TrendRange::Day => "day",
            TrendRange::Week => "week",
            TrendRange::Month => "month",
            TrendRange::Quarter => "quarter",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendBucket {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub dates: Vec<NaiveDate>,
}

impl TrendBucket {
    fn spanning(label: String, start: NaiveDate, end: NaiveDate) -> Self {
        let dates = start.iter_days().take_while(|date| *date <= end).collect();
        Self { label, start, end, dates }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub units: f64,
    pub total_downtime: f64,
    pub avg_line_util: f64,
    pub avg_net_run_rate: f64,
    /// Days in the bucket with any matching activity.
    pub active_days: usize,
    /// Stage named bottleneck on the most active days; earliest wins ties.
    pub top_bottleneck: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonTotal {
    pub label: String,
    pub minutes: f64,
    pub occurrences: usize,
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first - Months::new(date.month0() % 3)
}

fn months_bucket(start: NaiveDate, months: u32, label: String) -> Option<TrendBucket> {
    let end = start.checked_add_months(Months::new(months))? - Duration::days(1);
    Some(TrendBucket::spanning(label, start, end))
}

/// Calendar buckets ending with the one that contains `anchor`, oldest first.
pub fn build_buckets(anchor: NaiveDate, range: TrendRange) -> Vec<TrendBucket> {
    let count = range.bucket_count() as u32;

    let buckets: Vec<TrendBucket> = (0..count)
        .rev()
        .filter_map(|offset| match range {
            TrendRange::Day => {
                let date = anchor.checked_sub_signed(Duration::days(i64::from(offset)))?;
                Some(TrendBucket::spanning(date.format("%Y-%m-%d").to_string(), date, date))
            }
            TrendRange::Week => {
                let start = week_start(anchor).checked_sub_signed(Duration::weeks(i64::from(offset)))?;
                let week = start.iso_week();
                let label = format!("{}-W{:02}", week.year(), week.week());
                Some(TrendBucket::spanning(label, start, start + Duration::days(6)))
            }
            TrendRange::Month => {
                let start = month_start(anchor).checked_sub_months(Months::new(offset))?;
                months_bucket(start, 1, start.format("%b %Y").to_string())
            }
            TrendRange::Quarter => {
                let start = quarter_start(anchor).checked_sub_months(Months::new(offset * 3))?;
                let label = format!("Q{} {}", start.month0() / 3 + 1, start.year());
                months_bucket(start, 3, label)
            }
        })
        .collect();

    tracing::debug!(%anchor, %range, buckets = buckets.len(), "built trend buckets");
    buckets
}

/// Most frequent name, earliest first-seen name on ties.
fn most_frequent(names: &[String]) -> Option<String> {
    let mut counts: Vec<(&String, usize)> = vec![];
    for name in names {
        match counts.iter_mut().find(|(seen, _)| *seen == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }
    let mut best: Option<(&String, usize)> = None;
    for (name, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.clone())
}

/// Aggregates the daily metrics of one bucket.
pub fn summarize_bucket(stages: &[Stage], log: &EnrichedLog, bucket: &TrendBucket, shift: ShiftSelection) -> TrendPoint {
    let daily: Vec<_> = bucket
        .dates
        .iter()
        .map(|date| compute_line_metrics(stages, log, MetricsQuery::new(*date, shift)))
        .collect();
    let active: Vec<_> = daily.iter().filter(|metrics| metrics.has_activity).collect();

    let utils: Vec<f64> = active.iter().map(|metrics| metrics.line_util).collect();
    let rates: Vec<f64> = active.iter().map(|metrics| metrics.net_run_rate).collect();
    let bottlenecks: Vec<String> = active
        .iter()
        .filter_map(|metrics| metrics.bottleneck_stage_name.clone())
        .collect();

    TrendPoint {
        label: bucket.label.clone(),
        start: bucket.start,
        end: bucket.end,
        units: daily.iter().map(|metrics| metrics.units).sum(),
        total_downtime: daily.iter().map(|metrics| metrics.total_downtime).sum(),
        avg_line_util: mean(&utils),
        avg_net_run_rate: mean(&rates),
        active_days: active.len(),
        top_bottleneck: most_frequent(&bottlenecks),
    }
}

/// Trend points for the buckets ending at `anchor`.
pub fn build_trend(
    stages: &[Stage],
    log: &EnrichedLog,
    anchor: NaiveDate,
    range: TrendRange,
    shift: ShiftSelection,
) -> Vec<TrendPoint> {
    build_buckets(anchor, range)
        .iter()
        .map(|bucket| summarize_bucket(stages, log, bucket, shift))
        .collect()
}

/// Grouping label for a downtime row.
///
/// An explicit equipment reference reads `Equipment > <stage name>`; otherwise
/// the encoded reason's `Category > Detail`, with `Equipment` details mapped to
/// stage names. Rows with neither are `Unspecified`.
pub fn downtime_reason_label(row: &DowntimeRow, stages: &[Stage]) -> String {
    if let Some(equipment) = row.entry.equipment.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        return format!("{}{}{}", EQUIPMENT_CATEGORY, REASON_SEPARATOR, stage_display_name(stages, equipment));
    }

    let parts = row.entry.reason_parts();
    if parts.category.is_empty() {
        return UNSPECIFIED_REASON.to_string();
    }
    if parts.detail.is_empty() {
        return parts.category;
    }
    let detail = if parts.is_equipment() {
        stage_display_name(stages, &parts.detail)
    } else {
        parts.detail.clone()
    };
    format!("{}{}{}", parts.category, REASON_SEPARATOR, detail)
}

/// Ranks downtime causes across the buckets' dates by weighted minutes.
pub fn top_downtime_reasons(
    stages: &[Stage],
    log: &EnrichedLog,
    buckets: &[TrendBucket],
    shift: ShiftSelection,
    max_items: usize,
) -> Vec<ReasonTotal> {
    let dates: HashSet<NaiveDate> = buckets.iter().flat_map(|bucket| bucket.dates.iter().copied()).collect();

    let mut totals: Vec<ReasonTotal> = vec![];
    for row in log.downtime.iter().filter(|row| dates.contains(&row.entry.date)) {
        let weight = shift_weight(&row.coverage, shift);
        if weight <= 0.0 {
            continue;
        }
        let label = downtime_reason_label(row, stages);
        let minutes = weight * row.downtime_mins;
        match totals.iter_mut().find(|total| total.label == label) {
            Some(total) => {
                total.minutes += minutes;
                total.occurrences += 1;
            }
            None => totals.push(ReasonTotal {
                label,
                minutes,
                occurrences: 1,
            }),
        }
    }

    totals.sort_by(|a, b| b.minutes.total_cmp(&a.minutes).then_with(|| a.label.cmp(&b.label)));
    totals.truncate(max_items);
    totals
}
