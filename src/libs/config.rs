//! Configuration management for linerate.
//!
//! Settings live in a JSON file in the platform data directory and only
//! supply defaults: every value can be overridden per invocation from the
//! command line.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\linerate\config.json`
//! - **macOS**: `~/Library/Application Support/linerate/config.json`
//! - **Linux**: `~/.local/share/linerate/config.json`
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use linerate::libs::config::Config;
//!
//! let config = Config::read()?;
//! let engine = config.engine_or_default();
//! println!("Top reasons shown: {}", engine.top_reasons);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::context::EngineContext;
use crate::libs::messages::Message;
use crate::libs::model::ShiftSelection;
use crate::libs::trend::TrendRange;
use crate::msg_print;
use anyhow::Result;
use chrono::NaiveDateTime;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Engine defaults applied when a command does not override them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Whether shifts still in progress offer a coverage window up to "now".
    ///
    /// Disabling this makes events logged during an open shift show as
    /// unassigned until the shift is finalised.
    pub extrapolate_open_shifts: bool,

    /// Shift selection used when `--shift` is not given.
    pub default_shift: ShiftSelection,

    /// Trend range used when `--range` is not given.
    pub default_range: TrendRange,

    /// Number of downtime reasons listed under a trend.
    pub top_reasons: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            extrapolate_open_shifts: true,
            default_shift: ShiftSelection::FullDay,
            default_range: TrendRange::Week,
            top_reasons: 5,
        }
    }
}

impl EngineConfig {
    /// Builds the evaluation context for a reference instant.
    pub fn context(&self, now: NaiveDateTime) -> EngineContext {
        EngineContext {
            now: Some(now),
            extrapolate_open_shifts: self.extrapolate_open_shifts,
        }
    }
}

/// Root configuration document. Unconfigured sections are omitted from the JSON.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineConfig>,
}

impl Config {
    /// Reads the configuration file, returning defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn engine_or_default(&self) -> EngineConfig {
        self.engine.clone().unwrap_or_default()
    }

    /// Interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.engine_or_default();
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigModuleEngine);

        let shifts = [ShiftSelection::Day, ShiftSelection::Night, ShiftSelection::FullDay];
        let shift_index = Select::with_theme(&theme)
            .with_prompt(Message::PromptDefaultShift.to_string())
            .items(&shifts.iter().map(ToString::to_string).collect::<Vec<_>>())
            .default(shifts.iter().position(|s| *s == default.default_shift).unwrap_or(2))
            .interact()?;

        let ranges = [TrendRange::Day, TrendRange::Week, TrendRange::Month, TrendRange::Quarter];
        let range_index = Select::with_theme(&theme)
            .with_prompt(Message::PromptDefaultRange.to_string())
            .items(&ranges.iter().map(ToString::to_string).collect::<Vec<_>>())
            .default(ranges.iter().position(|r| *r == default.default_range).unwrap_or(1))
            .interact()?;

        config.engine = Some(EngineConfig {
            extrapolate_open_shifts: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptExtrapolateOpenShifts.to_string())
                .default(default.extrapolate_open_shifts)
                .interact()?,
            default_shift: shifts[shift_index],
            default_range: ranges[range_index],
            top_reasons: Input::with_theme(&theme)
                .with_prompt(Message::PromptTopReasons.to_string())
                .default(default.top_reasons)
                .interact_text()?,
        });

        Ok(config)
    }
}
