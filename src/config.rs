//! View configuration.
//!
//! Passed explicitly into the APIs that need it rather than read from any
//! ambient/global settings object, so callers can render two views with
//! different settings side by side.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Hour display format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HourFormat {
    #[serde(rename = "12")]
    H12,
    #[serde(rename = "24")]
    H24,
}

/// User-facing view settings that affect window computation and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    /// First day of a week row in the month grid.
    pub week_starts_on: Weekday,
    pub hour_format: HourFormat,
    /// Date display pattern, e.g. `MM/DD/YY`.
    pub date_format: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            week_starts_on: Weekday::Sun,
            hour_format: HourFormat::H24,
            date_format: "MM/DD/YY".to_string(),
        }
    }
}
