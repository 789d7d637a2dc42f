//! Shift coverage resolution.
//!
//! Attributes a timed event to the operating shifts logged for its date. Each
//! shift's logged entries are merged into one coverage window; an event is
//! then measured against every window.
//!
//! ## Attribution Rules
//!
//! ```text
//! duration event   split at midnight, overlap minutes per shift window
//! point event      start == finish (or unparseable finish): containment test
//! unassigned       total minutes - matched minutes, never negative
//! ```
//!
//! A shift matches a duration event when it overlaps by at least one minute,
//! and a point event when the instant falls inside its window, edges included.
//! Minutes inside two overlapping windows, such as a handover, count once and
//! go to the earlier shift in `Day`, `Night` order.

use crate::libs::context::EngineContext;
use crate::libs::interval::{
    merge_intervals, split_across_midnight, subtract_intervals, to_minutes, total_overlap, Interval,
};
use crate::libs::model::{ShiftName, ShiftSelection, ShiftWindowEntry};
use crate::libs::numeric::ratio;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

pub const UNASSIGNED_LABEL: &str = "Unassigned";
const LABEL_SEPARATOR: &str = " + ";

/// Merged coverage windows per shift for a single date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftWindows {
    windows: BTreeMap<ShiftName, Vec<Interval>>,
}

impl ShiftWindows {
    /// Builds the windows for `date` from a line's logged shift entries.
    ///
    /// Open entries (start equal to finish) are extrapolated to the context's
    /// "now", or to one minute past their start when "now" is unknown or falls
    /// before the shift began, so events logged during a running shift still
    /// land in it.
    pub fn for_date(entries: &[ShiftWindowEntry], date: NaiveDate, ctx: &EngineContext) -> Self {
        let mut raw: BTreeMap<ShiftName, Vec<Interval>> = BTreeMap::new();

        for entry in entries.iter().filter(|entry| entry.date == date) {
            let start = to_minutes(&entry.start);
            let finish = if entry.is_open() {
                if !ctx.extrapolate_open_shifts {
                    continue;
                }
                let Some(start) = start else { continue };
                Some(ctx.open_end_for(date, start).unwrap_or(start + 1))
            } else {
                to_minutes(&entry.finish)
            };
            raw.entry(entry.shift)
                .or_default()
                .extend(split_across_midnight(start, finish));
        }

        let windows = raw
            .into_iter()
            .map(|(shift, intervals)| (shift, merge_intervals(&intervals)))
            .filter(|(_, intervals)| !intervals.is_empty())
            .collect();
        Self { windows }
    }

    pub fn window(&self, shift: ShiftName) -> &[Interval] {
        self.windows.get(&shift).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// Result of resolving one event against one date's shift windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    /// Matched shifts, in `Day`, `Night` order.
    pub shift_matches: Vec<ShiftName>,
    /// Overlap minutes per matched shift; zero for point events.
    pub shift_minutes: BTreeMap<ShiftName, i64>,
    pub total_minutes: i64,
    pub unassigned_minutes: i64,
    pub label: String,
}

impl Coverage {
    pub fn unassigned() -> Self {
        Self {
            shift_matches: vec![],
            shift_minutes: BTreeMap::new(),
            total_minutes: 0,
            unassigned_minutes: 0,
            label: UNASSIGNED_LABEL.to_string(),
        }
    }

    pub fn minutes_for(&self, shift: ShiftName) -> i64 {
        self.shift_minutes.get(&shift).copied().unwrap_or(0)
    }

    /// Minutes attributed to any shift.
    pub fn covered_minutes(&self) -> i64 {
        self.shift_minutes.values().sum()
    }

    pub fn matches(&self, shift: ShiftName) -> bool {
        self.shift_matches.contains(&shift)
    }

    pub fn is_point(&self) -> bool {
        self.total_minutes == 0
    }
}

/// Resolves an event's clock times against prepared shift windows.
pub fn resolve_coverage(windows: &ShiftWindows, start: &str, finish: &str) -> Coverage {
    let start_min = to_minutes(start);
    let segments = split_across_midnight(start_min, to_minutes(finish));

    if segments.is_empty() {
        let Some(instant) = start_min else {
            return Coverage::unassigned();
        };
        let shift_matches: Vec<ShiftName> = ShiftName::ALL
            .into_iter()
            .filter(|shift| windows.window(*shift).iter().any(|window| window.contains(instant)))
            .collect();
        let shift_minutes = shift_matches.iter().map(|shift| (*shift, 0)).collect();
        let label = coverage_label(&shift_matches, 0);
        return Coverage {
            shift_matches,
            shift_minutes,
            total_minutes: 0,
            unassigned_minutes: 0,
            label,
        };
    }

    let total_minutes: i64 = segments.iter().map(Interval::len).sum();
    let mut claimed: Vec<Interval> = Vec::new();
    let mut shift_minutes: BTreeMap<ShiftName, i64> = BTreeMap::new();
    for shift in ShiftName::ALL {
        let window = windows.window(shift);
        let minutes = total_overlap(&segments, &subtract_intervals(window, &claimed));
        if minutes > 0 {
            shift_minutes.insert(shift, minutes);
        }
        claimed.extend_from_slice(window);
    }
    let shift_matches: Vec<ShiftName> = shift_minutes.keys().copied().collect();
    let covered: i64 = shift_minutes.values().sum();
    let unassigned_minutes = (total_minutes - covered).max(0);
    let label = coverage_label(&shift_matches, unassigned_minutes);

    tracing::trace!(start, finish, total_minutes, unassigned_minutes, label = %label, "resolved coverage");

    Coverage {
        shift_matches,
        shift_minutes,
        total_minutes,
        unassigned_minutes,
        label,
    }
}

/// Convenience wrapper building the date's windows before resolving.
pub fn resolve_event_coverage(
    entries: &[ShiftWindowEntry],
    date: NaiveDate,
    start: &str,
    finish: &str,
    ctx: &EngineContext,
) -> Coverage {
    resolve_coverage(&ShiftWindows::for_date(entries, date, ctx), start, finish)
}

fn coverage_label(matches: &[ShiftName], unassigned_minutes: i64) -> String {
    if matches.is_empty() {
        return UNASSIGNED_LABEL.to_string();
    }
    let mut names: Vec<&str> = matches.iter().map(ShiftName::as_str).collect();
    if unassigned_minutes > 0 {
        names.push(UNASSIGNED_LABEL);
    }
    names.join(LABEL_SEPARATOR)
}

/// Share of an event attributable to a shift selection, always within `[0, 1]`.
///
/// A single shift gets its proportional share of the event's minutes, or a
/// plain membership test for point events. `Full Day` counts everything.
pub fn shift_weight(coverage: &Coverage, selection: ShiftSelection) -> f64 {
    let Some(shift) = selection.single() else {
        return 1.0;
    };
    if coverage.total_minutes > 0 {
        ratio(coverage.minutes_for(shift) as f64, coverage.total_minutes as f64).clamp(0.0, 1.0)
    } else if coverage.matches(shift) {
        1.0
    } else {
        0.0
    }
}
