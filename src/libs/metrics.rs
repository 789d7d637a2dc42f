//! Stage and line metrics for one date and shift selection.
//!
//! ## Metric Formulas
//!
//! ```text
//! weight(row)        = shift_weight(row.coverage, selection)
//! units              = sum(weight * units_produced)
//! total_downtime     = sum(weight * downtime_mins)
//! net_run_rate       = units / sum(weight * net_production_time)
//!
//! uptime_ratio       = max(0, (shift_mins - stage_downtime) / shift_mins)
//! stage_throughput   = net_run_rate * uptime_ratio
//! stage_capacity     = max_throughput * crew_for_shift(stage, selection)
//! utilisation        = 100 * stage_throughput / stage_capacity
//! ```
//!
//! Every division with a non-positive denominator yields zero. The bottleneck
//! is the stage with the strictly greatest utilisation in declaration order,
//! so ties keep the earlier stage.
//!
//! `Full Day` is its own aggregation mode: every row counts in full, so its
//! figures are not the sum of the `Day` and `Night` figures when a row only
//! partly overlaps one shift.

use crate::libs::coverage::shift_weight;
use crate::libs::enrich::{EnrichedLog, ShiftRow};
use crate::libs::formatter::format_count;
use crate::libs::model::{ShiftName, ShiftSelection, Stage};
use crate::libs::numeric::{mean, non_negative, ratio};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricsQuery {
    pub date: NaiveDate,
    pub shift: ShiftSelection,
}

impl MetricsQuery {
    pub fn new(date: NaiveDate, shift: ShiftSelection) -> Self {
        Self { date, shift }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum StaffingCallout {
    NoShiftData,
    Understaffed(f64),
    FullyStaffed,
}

impl fmt::Display for StaffingCallout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StaffingCallout::NoShiftData => f.write_str("No shift data"),
            StaffingCallout::Understaffed(by) => write!(f, "Understaffed by {}", format_count(*by)),
            StaffingCallout::FullyStaffed => f.write_str("Fully staffed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageMetrics {
    pub stage_id: String,
    pub stage_name: String,
    pub downtime: f64,
    pub uptime_ratio: f64,
    pub throughput: f64,
    pub capacity: f64,
    pub utilisation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineMetrics {
    pub date: NaiveDate,
    pub shift: ShiftSelection,
    pub shift_mins: f64,
    pub units: f64,
    pub total_downtime: f64,
    pub line_util: f64,
    pub net_run_rate: f64,
    pub bottleneck_stage_name: Option<String>,
    pub crew_on_shift: f64,
    pub required_crew: f64,
    pub understaffed_by: f64,
    pub staffing_callout: StaffingCallout,
    pub stages: Vec<StageMetrics>,
    /// Whether any shift, run or downtime row matched the query.
    pub has_activity: bool,
}

/// Crew used for a stage's capacity under a selection.
///
/// `Full Day` averages the two shifts because run rates are per minute
/// across the whole day.
pub fn crew_for_shift(stage: &Stage, selection: ShiftSelection) -> f64 {
    match selection.single() {
        Some(shift) => stage.effective_crew(shift),
        None => mean(
            &ShiftName::ALL
                .iter()
                .map(|shift| stage.effective_crew(*shift))
                .collect::<Vec<_>>(),
        ),
    }
}

/// Headcount the stages call for under a selection; `Full Day` sums both shifts.
pub fn required_crew(stages: &[Stage], selection: ShiftSelection) -> f64 {
    let shifts = selection.shifts();
    stages
        .iter()
        .flat_map(|stage| shifts.iter().map(move |shift| stage.configured_crew(*shift)))
        .sum()
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether a downtime equipment reference points at a stage.
///
/// Matches on the stage id, the stage name (case-insensitive), or any match
/// term whose tokens all appear in the reference.
pub fn stage_matches_equipment(stage: &Stage, reference: &str) -> bool {
    let reference = reference.trim();
    if reference.is_empty() {
        return false;
    }
    if reference == stage.id || reference.eq_ignore_ascii_case(stage.name.trim()) {
        return true;
    }

    let reference_tokens = tokens(reference);
    stage.match_terms.iter().any(|term| {
        let term_tokens = tokens(term);
        !term_tokens.is_empty() && term_tokens.iter().all(|token| reference_tokens.contains(token))
    })
}

/// Most recently submitted row of a shift. Unstamped rows rank below stamped
/// ones and ties go to the row logged last.
fn latest_shift_row<'a>(rows: &[&'a ShiftRow], shift: ShiftName) -> Option<&'a ShiftRow> {
    rows.iter()
        .copied()
        .filter(|row| row.entry.shift == shift)
        .enumerate()
        .max_by_key(|(index, row)| (row.entry.submitted_at, *index))
        .map(|(_, row)| row)
}

/// Index of the strictly greatest positive utilisation; ties keep the earliest.
pub fn bottleneck_index(utilisations: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, utilisation) in utilisations.iter().copied().enumerate() {
        if utilisation <= 0.0 {
            continue;
        }
        match best {
            Some((_, best_util)) if utilisation <= best_util => {}
            _ => best = Some((index, utilisation)),
        }
    }
    best.map(|(index, _)| index)
}

/// Computes the metrics record for one date and shift selection.
pub fn compute_line_metrics(stages: &[Stage], log: &EnrichedLog, query: MetricsQuery) -> LineMetrics {
    let selection = query.shift;

    let shift_rows: Vec<&ShiftRow> = log
        .shifts_on(query.date)
        .filter(|row| selection.includes(row.entry.shift))
        .collect();
    let shift_mins: f64 = shift_rows.iter().map(|row| row.total_shift_time).sum();

    let runs: Vec<(f64, _)> = log
        .runs_on(query.date)
        .map(|row| (shift_weight(&row.coverage, selection), row))
        .filter(|(weight, _)| *weight > 0.0)
        .collect();
    let downtime: Vec<(f64, _)> = log
        .downtime_on(query.date)
        .map(|row| (shift_weight(&row.coverage, selection), row))
        .filter(|(weight, _)| *weight > 0.0)
        .collect();

    let units: f64 = runs.iter().map(|(weight, row)| weight * non_negative(row.entry.units)).sum();
    let net_time: f64 = runs.iter().map(|(weight, row)| weight * row.net_production_time).sum();
    let net_run_rate = ratio(units, net_time);
    let total_downtime: f64 = downtime.iter().map(|(weight, row)| weight * row.downtime_mins).sum();

    let stage_metrics: Vec<StageMetrics> = stages
        .iter()
        .map(|stage| {
            let stage_downtime: f64 = downtime
                .iter()
                .filter(|(_, row)| {
                    row.entry
                        .equipment_ref()
                        .is_some_and(|reference| stage_matches_equipment(stage, &reference))
                })
                .map(|(weight, row)| weight * row.downtime_mins)
                .sum();
            let uptime_ratio = if shift_mins > 0.0 {
                ((shift_mins - stage_downtime) / shift_mins).max(0.0)
            } else {
                0.0
            };
            let throughput = net_run_rate * uptime_ratio;
            let capacity = non_negative(stage.max_throughput) * crew_for_shift(stage, selection);
            StageMetrics {
                stage_id: stage.id.clone(),
                stage_name: stage.name.clone(),
                downtime: stage_downtime,
                uptime_ratio,
                throughput,
                capacity,
                utilisation: 100.0 * ratio(throughput, capacity),
            }
        })
        .collect();

    let utilisations: Vec<f64> = stage_metrics.iter().map(|stage| stage.utilisation.max(0.0)).collect();
    let bottleneck_stage_name = bottleneck_index(&utilisations).map(|index| stage_metrics[index].stage_name.clone());
    let line_util = mean(&utilisations);

    let required = required_crew(stages, selection);
    let crew_on_shift: f64 = selection
        .shifts()
        .into_iter()
        .filter_map(|shift| latest_shift_row(&shift_rows, shift))
        .map(|row| non_negative(row.entry.crew))
        .sum();
    let understaffed_by = (required - crew_on_shift).max(0.0);
    let staffing_callout = if shift_rows.is_empty() {
        StaffingCallout::NoShiftData
    } else if understaffed_by > 0.0 {
        StaffingCallout::Understaffed(understaffed_by)
    } else {
        StaffingCallout::FullyStaffed
    };

    tracing::debug!(
        date = %query.date,
        shift = %selection,
        units,
        net_run_rate,
        line_util,
        bottleneck = bottleneck_stage_name.as_deref().unwrap_or("-"),
        "computed line metrics"
    );

    LineMetrics {
        date: query.date,
        shift: selection,
        shift_mins,
        units,
        total_downtime,
        line_util,
        net_run_rate,
        bottleneck_stage_name,
        crew_on_shift,
        required_crew: required,
        understaffed_by,
        staffing_callout,
        stages: stage_metrics,
        has_activity: !shift_rows.is_empty() || !runs.is_empty() || !downtime.is_empty(),
    }
}
