//! Downtime reason encoding.
//!
//! Reasons travel as one display string, `Category`, `Category > Detail` or
//! `Category > Detail > Note`. The `Equipment` category is special: its detail
//! is a stage identifier rather than free text.

use serde::{Deserialize, Serialize};

pub const EQUIPMENT_CATEGORY: &str = "Equipment";
pub const REASON_SEPARATOR: &str = " > ";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DowntimeReasonParts {
    pub category: String,
    pub detail: String,
    pub note: String,
}

impl DowntimeReasonParts {
    pub fn is_equipment(&self) -> bool {
        self.category == EQUIPMENT_CATEGORY
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.detail.is_empty() && self.note.is_empty()
    }
}

/// Encodes a reason triple into its display string.
///
/// An empty category degrades to the raw note text. An empty detail keeps its
/// slot when a note follows so the note is not read back as the detail.
pub fn build_downtime_reason_text(category: &str, detail: &str, note: &str) -> String {
    let category = category.trim();
    let detail = detail.trim();
    let note = note.trim();

    if category.is_empty() {
        return note.to_string();
    }

    let mut text = category.to_string();
    if !detail.is_empty() || !note.is_empty() {
        text.push_str(REASON_SEPARATOR);
        text.push_str(detail);
    }
    if !note.is_empty() {
        text.push_str(REASON_SEPARATOR);
        text.push_str(note);
    }
    text
}

/// Splits an encoded reason back into category, detail and note.
///
/// Only the first two separators are significant; anything after them belongs
/// to the note.
pub fn parse_downtime_reason_parts(text: &str) -> DowntimeReasonParts {
    let mut parts = text.trim().splitn(3, REASON_SEPARATOR).map(str::trim);
    DowntimeReasonParts {
        category: parts.next().unwrap_or_default().to_string(),
        detail: parts.next().unwrap_or_default().to_string(),
        note: parts.next().unwrap_or_default().to_string(),
    }
}
