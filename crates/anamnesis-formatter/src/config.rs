use serde::{Deserialize, Serialize};

use anamnesis_core::models::section::SCHEMA_VERSION;

/// Sections scoring at least this percentage count as completed.
pub const DEFAULT_COMPLETION_THRESHOLD: u8 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub completion_threshold: u8,
    /// Stamped on every section record.
    pub schema_version: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }
}
