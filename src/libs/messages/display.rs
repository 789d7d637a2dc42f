//! Display implementation for linerate messages.
//!
//! All message text is defined here, in one match, so wording stays
//! consistent across commands and every new variant needs an explicit
//! formatting decision.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleEngine => "Engine defaults".to_string(),
            Message::ConfigReadFailed(error) => format!("Failed to read config, using defaults: {}", error),

            // === PROMPTS ===
            Message::PromptDefaultShift => "Default shift selection".to_string(),
            Message::PromptDefaultRange => "Default trend range".to_string(),
            Message::PromptExtrapolateOpenShifts => "Extend shifts still in progress up to the current time?".to_string(),
            Message::PromptTopReasons => "Number of downtime reasons to list".to_string(),

            // === SNAPSHOT MESSAGES ===
            Message::SnapshotLoadFailed(error) => format!("Failed to load snapshot: {}", error),
            Message::SnapshotLoaded(line, rows) => format!("Loaded {} rows for {}", rows, line),
            Message::InvalidDate(date) => format!("Invalid date '{}', expected YYYY-MM-DD", date),

            // === METRICS MESSAGES ===
            Message::MetricsHeader(line, date, shift) => format!("{} metrics for {} ({})", line, date, shift),
            Message::StagesHeader => "Stages:".to_string(),
            Message::NoStagesConfigured => "No stages configured for this line.".to_string(),
            Message::NoActivityForDate(date) => format!("No shift, run or downtime rows match {}.", date),

            // === TREND MESSAGES ===
            Message::TrendHeader(line, range, shift) => format!("{} trend by {} ({})", line, range, shift),
            Message::TopReasonsHeader(count) => format!("Top {} downtime reasons:", count),
            Message::NoDowntimeReasons => "No downtime logged in this window.".to_string(),

            // === COVERAGE MESSAGES ===
            Message::CoverageHeader(line, date) => format!("{} shift coverage for {}", line, date),
            Message::RunsHeader => "Runs:".to_string(),
            Message::DowntimeHeader => "Downtime:".to_string(),
            Message::NoRowsForDate(date) => format!("No runs or downtime logged for {}.", date),
        };
        write!(f, "{}", text)
    }
}
