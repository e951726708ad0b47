use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Completion percentages (0–100) overall and per section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompletionStats {
    pub total: u8,
    pub by_section: BTreeMap<String, u8>,
}

impl CompletionStats {
    /// Score for a section; sections without an entry score 0.
    pub fn score(&self, section_id: &str) -> u8 {
        self.by_section.get(section_id).copied().unwrap_or(0)
    }

    /// Ids of the sections whose score meets or exceeds `threshold`.
    pub fn sections_at_or_above(&self, threshold: u8) -> BTreeSet<String> {
        self.by_section
            .iter()
            .filter(|(_, score)| **score >= threshold)
            .map(|(id, _)| id.clone())
            .collect()
    }
}
