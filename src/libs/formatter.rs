//! Number formatting for terminal output.
//!
//! Only the CLI uses these helpers; engine records stay numeric so other
//! front ends can format them their own way.
//!
//! ## Format Specifications
//!
//! - Minutes render as `HH:MM`, rounded to the nearest minute; negatives and
//!   non-finite values render as `00:00`
//! - Rates render with two decimals (`10.75`)
//! - Percentages render with one decimal and a percent sign (`87.5%`)
//!
//! ```rust
//! use linerate::libs::formatter::{format_minutes, format_percent};
//!
//! assert_eq!(format_minutes(265.0), "04:25");
//! assert_eq!(format_percent(87.54), "87.5%");
//! ```

use crate::libs::numeric::non_negative;

/// Formats a minute count as zero-padded `HH:MM`. Hours may exceed two digits.
pub fn format_minutes(minutes: f64) -> String {
    let total = non_negative(minutes).round() as i64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.2}", non_negative(rate))
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", non_negative(value))
}

/// Headcount with a decimal only when it is fractional.
pub fn format_count(value: f64) -> String {
    let value = (non_negative(value) * 10.0).round() / 10.0;
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
