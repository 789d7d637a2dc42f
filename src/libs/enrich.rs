//! Row enrichment: fills in the derived numbers on raw log rows.
//!
//! Every row kind gets its duration recomputed from its clock times. When the
//! times are missing, open or unparseable the recomputation yields nothing and
//! the value stored by the logging layer is kept (see
//! [`resolve_minutes`](crate::libs::numeric::resolve_minutes)).
//!
//! Runs additionally receive the downtime that fell inside their shifts:
//!
//! ```text
//! downtime[(date, shift)]  = sum of downtime minutes attributed to that shift
//! associated_down_time     = sum over shifts of
//!                            run_minutes[shift] / run_covered_minutes * downtime[(date, shift)]
//! net_production_time      = max(0, gross - associated_down_time)
//! ```
//!
//! The enricher never mutates its input; it returns new rows that carry the
//! original entry alongside the derived fields.

use crate::libs::context::EngineContext;
use crate::libs::coverage::{resolve_coverage, Coverage, ShiftWindows};
use crate::libs::interval::{span_minutes, to_minutes};
use crate::libs::model::{BreakEntry, DowntimeEntry, LineSnapshot, RunEntry, ShiftName, ShiftWindowEntry};
use crate::libs::numeric::{non_negative, ratio, resolve_minutes, stored};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Downtime minutes per `(date, shift)`.
pub type DowntimeBuckets = HashMap<(NaiveDate, ShiftName), f64>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftRow {
    pub entry: ShiftWindowEntry,
    pub total_shift_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakRow {
    pub entry: BreakEntry,
    pub break_mins: f64,
    /// Date and shift of the linked shift entry, when it can be found.
    pub date: Option<NaiveDate>,
    pub shift: Option<ShiftName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DowntimeRow {
    pub entry: DowntimeEntry,
    pub downtime_mins: f64,
    pub coverage: Coverage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRow {
    pub entry: RunEntry,
    pub coverage: Coverage,
    pub gross_production_time: f64,
    pub associated_down_time: f64,
    pub net_production_time: f64,
    pub gross_run_rate: f64,
    pub net_run_rate: f64,
}

/// A line snapshot with every row enriched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichedLog {
    pub line: String,
    pub shifts: Vec<ShiftRow>,
    pub breaks: Vec<BreakRow>,
    pub runs: Vec<RunRow>,
    pub downtime: Vec<DowntimeRow>,
}

impl EnrichedLog {
    pub fn shifts_on(&self, date: NaiveDate) -> impl Iterator<Item = &ShiftRow> {
        self.shifts.iter().filter(move |row| row.entry.date == date)
    }

    pub fn runs_on(&self, date: NaiveDate) -> impl Iterator<Item = &RunRow> {
        self.runs.iter().filter(move |row| row.entry.date == date)
    }

    pub fn downtime_on(&self, date: NaiveDate) -> impl Iterator<Item = &DowntimeRow> {
        self.downtime.iter().filter(move |row| row.entry.date == date)
    }
}

/// Lazily built shift windows, one set per date.
struct WindowCache<'a> {
    entries: &'a [ShiftWindowEntry],
    ctx: &'a EngineContext,
    cache: HashMap<NaiveDate, ShiftWindows>,
}

impl<'a> WindowCache<'a> {
    fn new(entries: &'a [ShiftWindowEntry], ctx: &'a EngineContext) -> Self {
        Self {
            entries,
            ctx,
            cache: HashMap::new(),
        }
    }

    fn get(&mut self, date: NaiveDate) -> &ShiftWindows {
        let entries = self.entries;
        let ctx = self.ctx;
        self.cache
            .entry(date)
            .or_insert_with(|| ShiftWindows::for_date(entries, date, ctx))
    }
}

/// Enriches every row of a snapshot.
pub fn enrich(snapshot: &LineSnapshot, ctx: &EngineContext) -> EnrichedLog {
    let mut windows = WindowCache::new(&snapshot.shifts, ctx);

    let shifts: Vec<ShiftRow> = snapshot.shifts.iter().map(enrich_shift).collect();
    let breaks: Vec<BreakRow> = snapshot
        .breaks
        .iter()
        .map(|entry| enrich_break(entry, &snapshot.shifts))
        .collect();

    let mut downtime = Vec::with_capacity(snapshot.downtime.len());
    for entry in &snapshot.downtime {
        downtime.push(enrich_downtime(entry, windows.get(entry.date)));
    }

    let buckets = bucket_downtime(&downtime);

    let mut runs = Vec::with_capacity(snapshot.runs.len());
    for entry in &snapshot.runs {
        runs.push(enrich_run(entry, windows.get(entry.date), &buckets));
    }

    tracing::debug!(
        line = %snapshot.line,
        shifts = shifts.len(),
        breaks = breaks.len(),
        runs = runs.len(),
        downtime = downtime.len(),
        "enriched line snapshot"
    );

    EnrichedLog {
        line: snapshot.line.clone(),
        shifts,
        breaks,
        runs,
        downtime,
    }
}

fn clock_span(start: &str, finish: &str) -> f64 {
    span_minutes(to_minutes(start), to_minutes(finish)) as f64
}

pub fn enrich_shift(entry: &ShiftWindowEntry) -> ShiftRow {
    ShiftRow {
        entry: entry.clone(),
        total_shift_time: resolve_minutes(clock_span(&entry.start, &entry.finish), entry.total_shift_time),
    }
}

pub fn enrich_break(entry: &BreakEntry, shifts: &[ShiftWindowEntry]) -> BreakRow {
    let derived = match entry.finish.as_deref() {
        Some(finish) if !entry.is_open() => clock_span(&entry.start, finish),
        _ => 0.0,
    };
    let parent = shifts.iter().find(|shift| shift.id == entry.shift_id);
    BreakRow {
        entry: entry.clone(),
        break_mins: resolve_minutes(derived, entry.break_mins),
        date: parent.map(|shift| shift.date),
        shift: parent.map(|shift| shift.shift),
    }
}

pub fn enrich_downtime(entry: &DowntimeEntry, windows: &ShiftWindows) -> DowntimeRow {
    DowntimeRow {
        entry: entry.clone(),
        downtime_mins: resolve_minutes(clock_span(&entry.start, &entry.finish), entry.downtime_mins),
        coverage: resolve_coverage(windows, &entry.start, &entry.finish),
    }
}

/// Sums downtime per `(date, shift)` following each row's coverage.
///
/// A duration row spreads its minutes in proportion to its overlap with each
/// shift; the unassigned remainder belongs to no shift. A point row matched to
/// shifts splits its stored minutes evenly between them.
pub fn bucket_downtime(rows: &[DowntimeRow]) -> DowntimeBuckets {
    let mut buckets = DowntimeBuckets::new();
    for row in rows.iter().filter(|row| row.downtime_mins > 0.0) {
        let coverage = &row.coverage;
        if coverage.total_minutes > 0 {
            let scale = ratio(row.downtime_mins, coverage.total_minutes as f64);
            for (shift, minutes) in &coverage.shift_minutes {
                *buckets.entry((row.entry.date, *shift)).or_default() += *minutes as f64 * scale;
            }
        } else if !coverage.shift_matches.is_empty() {
            let share = row.downtime_mins / coverage.shift_matches.len() as f64;
            for shift in &coverage.shift_matches {
                *buckets.entry((row.entry.date, *shift)).or_default() += share;
            }
        }
    }
    buckets
}

/// Downtime attributable to a run, weighted by how its minutes split across shifts.
pub fn apportion_downtime(coverage: &Coverage, date: NaiveDate, buckets: &DowntimeBuckets) -> f64 {
    let covered = coverage.covered_minutes() as f64;
    if covered <= 0.0 {
        return 0.0;
    }
    coverage
        .shift_minutes
        .iter()
        .map(|(shift, minutes)| {
            let downtime = buckets.get(&(date, *shift)).copied().unwrap_or(0.0);
            *minutes as f64 / covered * downtime
        })
        .sum()
}

pub fn enrich_run(entry: &RunEntry, windows: &ShiftWindows, buckets: &DowntimeBuckets) -> RunRow {
    let coverage = resolve_coverage(windows, &entry.start, &entry.finish);
    let derived_gross = clock_span(&entry.start, &entry.finish);
    let gross = resolve_minutes(derived_gross, entry.gross_production_time);

    // Without usable clock times the run cannot be placed in a shift, so the
    // stored downtime and net figures stand in for the derived ones.
    let (associated, net) = if derived_gross > 0.0 {
        let associated = apportion_downtime(&coverage, entry.date, buckets);
        (associated, non_negative(gross - associated))
    } else {
        let associated = stored(entry.associated_down_time);
        (associated, resolve_minutes(gross - associated, entry.net_production_time))
    };

    let units = non_negative(entry.units);
    RunRow {
        entry: entry.clone(),
        coverage,
        gross_production_time: gross,
        associated_down_time: associated,
        net_production_time: net,
        gross_run_rate: ratio(units, gross),
        net_run_rate: ratio(units, net),
    }
}
