//! Minute-of-day interval arithmetic.
//!
//! Every timed log row on a production line is stored as a pair of wall-clock
//! times without a date component. This module turns those times into
//! minute-of-day offsets and provides the small set of interval operations the
//! coverage and metrics layers are built on.
//!
//! ## Key Concepts
//!
//! - **Minute of day**: an integer in `0..1440`, where `0` is midnight
//! - **Interval**: a half-open range `[start, end)` with `0 <= start < end <= 1440`
//! - **Midnight wraparound**: a finish time numerically earlier than its start
//!   means the event crossed midnight and is represented as two intervals
//! - **Point event**: start equal to finish; it has no duration and produces
//!   no intervals
//!
//! ## Examples
//!
//! ```rust
//! use linerate::libs::interval::{split_across_midnight, to_minutes, Interval};
//!
//! let start = to_minutes("23:00");
//! let finish = to_minutes("00:30");
//! let parts = split_across_midnight(start, finish);
//! assert_eq!(parts, vec![Interval::new(1380, 1440), Interval::new(0, 30)]);
//! ```

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// A half-open `[start, end)` range of minutes within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// First minute covered by the interval.
    pub start: i64,
    /// First minute after the interval.
    pub end: i64,
}

impl Interval {
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Length of the interval in minutes, zero for empty or inverted ranges.
    pub fn len(&self) -> i64 {
        (self.end - self.start).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Closed containment test used for point events: both edges count.
    pub fn contains(&self, minute: i64) -> bool {
        self.start <= minute && minute <= self.end
    }

    /// Clips the interval to a single day, returning `None` if nothing remains.
    fn clipped(&self) -> Option<Self> {
        let start = self.start.clamp(0, MINUTES_PER_DAY);
        let end = self.end.clamp(0, MINUTES_PER_DAY);
        (end > start).then_some(Self { start, end })
    }
}

/// Parses a time of day into a minute-of-day offset.
///
/// Accepts 24-hour `HH:MM` (zero padding optional), `HH:MM:SS`, or a
/// day-fraction numeric in `[0, 1)` such as `"0.25"` for 06:00. Seconds are
/// truncated. Anything else, including an empty string, yields `None`.
///
/// # Examples
///
/// ```rust
/// use linerate::libs::interval::to_minutes;
///
/// assert_eq!(to_minutes("06:10"), Some(370));
/// assert_eq!(to_minutes("0.5"), Some(720));
/// assert_eq!(to_minutes("25:00"), None);
/// ```
pub fn to_minutes(time: &str) -> Option<i64> {
    let trimmed = time.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains(':') {
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .ok()?;
        return Some(i64::from(parsed.hour() * 60 + parsed.minute()));
    }

    let fraction: f64 = trimmed.parse().ok()?;
    if !fraction.is_finite() || !(0.0..1.0).contains(&fraction) {
        return None;
    }
    let minutes = (fraction * MINUTES_PER_DAY as f64).round() as i64;
    Some(minutes.min(MINUTES_PER_DAY - 1))
}

/// Renders a minute-of-day offset as zero-padded `HH:MM`.
///
/// Values outside a single day wrap around, so `1440` renders as `00:00`.
pub fn format_clock(minutes: i64) -> String {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Splits an event into same-day intervals.
///
/// - either endpoint missing, or both equal: no intervals (point event)
/// - finish after start: one interval
/// - finish before start: the event wrapped past midnight and yields
///   `[start, 1440)` followed by `[0, finish)`
pub fn split_across_midnight(start: Option<i64>, finish: Option<i64>) -> Vec<Interval> {
    let (Some(start), Some(finish)) = (start, finish) else {
        return vec![];
    };
    if !(0..MINUTES_PER_DAY).contains(&start) || !(0..=MINUTES_PER_DAY).contains(&finish) {
        return vec![];
    }

    if finish == start {
        vec![]
    } else if finish > start {
        vec![Interval::new(start, finish)]
    } else {
        let mut parts = vec![Interval::new(start, MINUTES_PER_DAY)];
        if finish > 0 {
            parts.push(Interval::new(0, finish));
        }
        parts
    }
}

/// Wraparound-aware duration between two clock readings in minutes.
///
/// Returns `0` for point events and for unparseable endpoints.
pub fn span_minutes(start: Option<i64>, finish: Option<i64>) -> i64 {
    split_across_midnight(start, finish).iter().map(Interval::len).sum()
}

/// Normalises a list of intervals into sorted, disjoint, non-touching ranges.
///
/// Each interval is clipped to the day, empty ranges are dropped, and any
/// overlapping or adjacent pair is merged. Merging an already merged list
/// returns it unchanged.
pub fn merge_intervals(list: &[Interval]) -> Vec<Interval> {
    let mut clipped: Vec<Interval> = list.iter().filter_map(Interval::clipped).collect();
    clipped.sort_by_key(|interval| (interval.start, interval.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(clipped.len());
    for interval in clipped {
        match merged.last_mut() {
            Some(current) if interval.start <= current.end => {
                current.end = current.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Minutes shared by two intervals.
pub fn overlap_minutes(a: &Interval, b: &Interval) -> i64 {
    (a.end.min(b.end) - a.start.max(b.start)).max(0)
}

/// Total minutes shared between two interval sets.
///
/// The second set is expected to be merged so that overlapping windows are not
/// counted twice.
pub fn total_overlap(segments: &[Interval], windows: &[Interval]) -> i64 {
    segments
        .iter()
        .flat_map(|segment| windows.iter().map(move |window| overlap_minutes(segment, window)))
        .sum()
}

/// Parts of `list` not covered by `remove`, merged.
pub fn subtract_intervals(list: &[Interval], remove: &[Interval]) -> Vec<Interval> {
    let remove = merge_intervals(remove);
    let mut remaining = Vec::new();
    for interval in merge_intervals(list) {
        let mut cursor = interval.start;
        for cut in remove.iter().filter(|cut| cut.end > interval.start && cut.start < interval.end) {
            if cut.start > cursor {
                remaining.push(Interval::new(cursor, cut.start));
            }
            cursor = cursor.max(cut.end);
        }
        if cursor < interval.end {
            remaining.push(Interval::new(cursor, interval.end));
        }
    }
    remaining
}
