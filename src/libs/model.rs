//! Typed log records consumed by the engine.
//!
//! Rows arrive from the logging layer as loosely shaped records. They are
//! decoded once, at the boundary, into one variant per row kind with explicit
//! optionality; nothing downstream checks for missing fields.
//!
//! Clock fields stay as the raw `HH:MM` text the operator entered. An open
//! (in-progress) row is recognised by start and finish being the exact same
//! text, so parsing is deferred to [`crate::libs::interval::to_minutes`].

use crate::libs::numeric::non_negative;
use crate::libs::reason::{parse_downtime_reason_parts, DowntimeReasonParts, EQUIPMENT_CATEGORY};
use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A stored operating shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftName {
    Day,
    Night,
}

impl ShiftName {
    /// Recognised shifts in label order.
    pub const ALL: [ShiftName; 2] = [ShiftName::Day, ShiftName::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftName::Day => "Day",
            ShiftName::Night => "Night",
        }
    }
}

impl fmt::Display for ShiftName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ShiftName::Day),
            "night" => Ok(ShiftName::Night),
            other => Err(format!("unknown shift '{}'", other)),
        }
    }
}

/// Shift filter used by queries. `FullDay` is never stored on a row.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShiftSelection {
    Day,
    Night,
    #[default]
    #[serde(rename = "Full Day")]
    #[value(name = "full-day")]
    FullDay,
}

impl ShiftSelection {
    /// The stored shift behind a single-shift selection.
    pub fn single(&self) -> Option<ShiftName> {
        match self {
            ShiftSelection::Day => Some(ShiftName::Day),
            ShiftSelection::Night => Some(ShiftName::Night),
            ShiftSelection::FullDay => None,
        }
    }

    /// Stored shifts covered by the selection.
    pub fn shifts(&self) -> Vec<ShiftName> {
        match self.single() {
            Some(shift) => vec![shift],
            None => ShiftName::ALL.to_vec(),
        }
    }

    pub fn includes(&self, shift: ShiftName) -> bool {
        self.single().map_or(true, |selected| selected == shift)
    }
}

impl From<ShiftName> for ShiftSelection {
    fn from(shift: ShiftName) -> Self {
        match shift {
            ShiftName::Day => ShiftSelection::Day,
            ShiftName::Night => ShiftSelection::Night,
        }
    }
}

impl fmt::Display for ShiftSelection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShiftSelection::Day => f.write_str("Day"),
            ShiftSelection::Night => f.write_str("Night"),
            ShiftSelection::FullDay => f.write_str("Full Day"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    #[default]
    Standard,
    /// Pass-through stage (conveyor, transfer table) that always runs with at
    /// least one crew unit's worth of capacity.
    Transfer,
}

/// Configured headcount per shift.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StageCrew {
    #[serde(default)]
    pub day: f64,
    #[serde(default)]
    pub night: f64,
}

/// A production step on the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: StageKind,
    #[serde(default)]
    pub crew: StageCrew,
    /// Maximum units per minute one crew unit can push through the stage.
    #[serde(default)]
    pub max_throughput: f64,
    /// Extra keywords that identify this stage in free-text equipment references.
    #[serde(default)]
    pub match_terms: Vec<String>,
}

impl Stage {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: StageKind::Standard,
            crew: StageCrew::default(),
            max_throughput: 0.0,
            match_terms: vec![],
        }
    }

    pub fn kind(mut self, kind: StageKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn crew(mut self, day: f64, night: f64) -> Self {
        self.crew = StageCrew { day, night };
        self
    }

    pub fn max_throughput(mut self, per_crew: f64) -> Self {
        self.max_throughput = per_crew;
        self
    }

    pub fn match_term(mut self, term: impl Into<String>) -> Self {
        self.match_terms.push(term.into());
        self
    }

    /// Headcount configured for a stored shift.
    pub fn configured_crew(&self, shift: ShiftName) -> f64 {
        match shift {
            ShiftName::Day => non_negative(self.crew.day),
            ShiftName::Night => non_negative(self.crew.night),
        }
    }

    /// Headcount used for capacity math; transfer stages never drop below one.
    pub fn effective_crew(&self, shift: ShiftName) -> f64 {
        let configured = self.configured_crew(shift);
        if self.kind == StageKind::Transfer && configured <= 0.0 {
            1.0
        } else {
            configured
        }
    }
}

/// One logged shift on a date. Open while start equals finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftWindowEntry {
    #[serde(default)]
    pub id: String,
    pub date: NaiveDate,
    pub shift: ShiftName,
    #[serde(default)]
    pub crew: f64,
    pub start: String,
    pub finish: String,
    #[serde(default)]
    pub total_shift_time: Option<f64>,
    #[serde(default)]
    pub submitted_at: Option<NaiveDateTime>,
}

impl ShiftWindowEntry {
    pub fn new(date: NaiveDate, shift: ShiftName, start: &str, finish: &str) -> Self {
        Self {
            id: String::new(),
            date,
            shift,
            crew: 0.0,
            start: start.to_string(),
            finish: finish.to_string(),
            total_shift_time: None,
            submitted_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.start == self.finish
    }
}

/// A break taken during a specific logged shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEntry {
    #[serde(default)]
    pub id: String,
    pub shift_id: String,
    pub start: String,
    #[serde(default)]
    pub finish: Option<String>,
    #[serde(default)]
    pub break_mins: Option<f64>,
}

impl BreakEntry {
    pub fn is_open(&self) -> bool {
        self.finish.as_deref().map_or(true, |finish| finish.trim().is_empty())
    }
}

/// A production run of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEntry {
    #[serde(default)]
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub product: String,
    pub start: String,
    pub finish: String,
    #[serde(default)]
    pub units: f64,
    /// Stage id to crew count, kept for audit and trend context.
    #[serde(default)]
    pub crew_pattern: BTreeMap<String, f64>,
    #[serde(default)]
    pub gross_production_time: Option<f64>,
    #[serde(default)]
    pub associated_down_time: Option<f64>,
    #[serde(default)]
    pub net_production_time: Option<f64>,
}

impl RunEntry {
    pub fn new(date: NaiveDate, product: &str, start: &str, finish: &str, units: f64) -> Self {
        Self {
            id: String::new(),
            date,
            product: product.to_string(),
            start: start.to_string(),
            finish: finish.to_string(),
            units,
            crew_pattern: BTreeMap::new(),
            gross_production_time: None,
            associated_down_time: None,
            net_production_time: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.start == self.finish
    }
}

/// A stoppage, attributed either to a stage or to a free-form reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowntimeEntry {
    #[serde(default)]
    pub id: String,
    pub date: NaiveDate,
    pub start: String,
    pub finish: String,
    /// Stage id or name the stoppage was logged against.
    #[serde(default)]
    pub equipment: Option<String>,
    /// Encoded `Category > Detail > Note` text.
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub downtime_mins: Option<f64>,
}

impl DowntimeEntry {
    pub fn new(date: NaiveDate, start: &str, finish: &str) -> Self {
        Self {
            id: String::new(),
            date,
            start: start.to_string(),
            finish: finish.to_string(),
            equipment: None,
            reason: None,
            downtime_mins: None,
        }
    }

    pub fn equipment(mut self, stage: &str) -> Self {
        self.equipment = Some(stage.to_string());
        self
    }

    pub fn reason(mut self, text: &str) -> Self {
        self.reason = Some(text.to_string());
        self
    }

    pub fn is_open(&self) -> bool {
        self.start == self.finish
    }

    pub fn reason_parts(&self) -> DowntimeReasonParts {
        parse_downtime_reason_parts(self.reason.as_deref().unwrap_or_default())
    }

    /// Stage reference, from the explicit field or an `Equipment > <stage>` reason.
    pub fn equipment_ref(&self) -> Option<String> {
        if let Some(equipment) = self.equipment.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            return Some(equipment.to_string());
        }
        let parts = self.reason_parts();
        (parts.category == EQUIPMENT_CATEGORY && !parts.detail.is_empty()).then_some(parts.detail)
    }
}

/// A single row as decoded from a snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogRecord {
    Shift(ShiftWindowEntry),
    Break(BreakEntry),
    Run(RunEntry),
    Downtime(DowntimeEntry),
}

/// Read-only view of one line's configuration and logs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSnapshot {
    pub line: String,
    pub stages: Vec<Stage>,
    pub shifts: Vec<ShiftWindowEntry>,
    pub breaks: Vec<BreakEntry>,
    pub runs: Vec<RunEntry>,
    pub downtime: Vec<DowntimeEntry>,
}

impl LineSnapshot {
    pub fn new(line: impl Into<String>, stages: Vec<Stage>) -> Self {
        Self {
            line: line.into(),
            stages,
            ..Self::default()
        }
    }

    /// Partitions decoded rows by kind, preserving their logged order.
    pub fn from_records(line: impl Into<String>, stages: Vec<Stage>, records: Vec<LogRecord>) -> Self {
        let mut snapshot = Self::new(line, stages);
        for record in records {
            snapshot.push(record);
        }
        snapshot
    }

    pub fn push(&mut self, record: LogRecord) {
        match record {
            LogRecord::Shift(entry) => self.shifts.push(entry),
            LogRecord::Break(entry) => self.breaks.push(entry),
            LogRecord::Run(entry) => self.runs.push(entry),
            LogRecord::Downtime(entry) => self.downtime.push(entry),
        }
    }

    /// Display name for a stage id or name, falling back to the raw reference.
    pub fn stage_display_name(&self, reference: &str) -> String {
        stage_display_name(&self.stages, reference)
    }
}

/// Looks a stage up by id, then by exact name; misses return the reference itself.
pub fn stage_display_name(stages: &[Stage], reference: &str) -> String {
    stages
        .iter()
        .find(|stage| stage.id == reference)
        .or_else(|| stages.iter().find(|stage| stage.name == reference))
        .map(|stage| stage.name.clone())
        .unwrap_or_else(|| reference.to_string())
}
