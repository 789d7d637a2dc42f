//! Explicit evaluation context.
//!
//! The engine reads no clock and no global selection. Anything that depends
//! on "now" is taken from an [`EngineContext`] supplied by the caller, which
//! keeps every computation reproducible: the same snapshot and the same
//! context always yield the same metrics.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineContext {
    /// Reference instant used to extrapolate shifts that are still open.
    pub now: Option<NaiveDateTime>,
    /// When false, open shift entries offer no coverage window at all.
    pub extrapolate_open_shifts: bool,
}

impl Default for EngineContext {
    fn default() -> Self {
        Self {
            now: None,
            extrapolate_open_shifts: true,
        }
    }
}

impl EngineContext {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now: Some(now),
            ..Self::default()
        }
    }

    pub fn without_extrapolation(mut self) -> Self {
        self.extrapolate_open_shifts = false;
        self
    }

    /// Minute of day that an entry opened on `date` at `start` has run up to.
    ///
    /// Later on the entry's own date, or earlier on the following day for a
    /// shift that ran past midnight. Any other "now" means the entry has not
    /// started yet or cannot still be running, and yields `None`.
    pub fn open_end_for(&self, date: NaiveDate, start: i64) -> Option<i64> {
        let now = self.now?;
        let today = now.date();
        let minute = i64::from(now.hour() * 60 + now.minute());
        if (today == date && minute > start) || (today == date + Duration::days(1) && minute < start) {
            Some(minute)
        } else {
            None
        }
    }
}
