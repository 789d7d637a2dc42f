//! Snapshot files: the JSON form in which line logs reach the engine.
//!
//! ```json
//! {
//!   "line": "Line 2",
//!   "stages": [{ "id": "filler", "name": "Filler", "crew": { "day": 2, "night": 1 }, "max_throughput": 6.0 }],
//!   "rows": [
//!     { "kind": "shift", "id": "s1", "date": "2025-03-04", "shift": "Day", "crew": 6, "start": "06:00", "finish": "14:00" },
//!     { "kind": "run", "date": "2025-03-04", "product": "500ml", "start": "06:10", "finish": "10:35", "units": 2850 }
//!   ]
//! }
//! ```
//!
//! Rows are decoded once into [`LogRecord`] variants and partitioned into a
//! [`LineSnapshot`]; nothing past this point deals with raw JSON.

use crate::libs::model::{LineSnapshot, LogRecord, Stage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot has no line name")]
    MissingLine,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub line: String,
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub rows: Vec<LogRecord>,
}

impl SnapshotFile {
    pub fn into_snapshot(self) -> Result<LineSnapshot, SnapshotError> {
        if self.line.trim().is_empty() {
            return Err(SnapshotError::MissingLine);
        }
        Ok(LineSnapshot::from_records(self.line, self.stages, self.rows))
    }
}

pub fn parse_snapshot(json: &str) -> Result<LineSnapshot, SnapshotError> {
    let file: SnapshotFile = serde_json::from_str(json)?;
    file.into_snapshot()
}

pub fn load_snapshot(path: &Path) -> Result<LineSnapshot, SnapshotError> {
    let json = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let snapshot = parse_snapshot(&json)?;
    tracing::debug!(path = %path.display(), line = %snapshot.line, "loaded snapshot");
    Ok(snapshot)
}
