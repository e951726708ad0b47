use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Schema version stamped on every section produced by the formatter.
pub const SCHEMA_VERSION: &str = "1.0";

/// Catch-all section for fields that match no classification rule.
pub const OTHER_SECTION_ID: &str = "otros";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SectionMetadata {
    pub section_id: String,
    pub schema_version: String,
    pub last_updated: jiff::Timestamp,
}

/// One clinical section of an anamnesis document, holding only sanitized,
/// non-empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SectionRecord {
    pub metadata: SectionMetadata,
    pub data: BTreeMap<String, serde_json::Value>,
}

impl SectionRecord {
    pub fn new(
        section_id: &str,
        schema_version: &str,
        data: BTreeMap<String, serde_json::Value>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            metadata: SectionMetadata {
                section_id: section_id.to_string(),
                schema_version: schema_version.to_string(),
                last_updated: now,
            },
            data,
        }
    }

    pub fn id(&self) -> &str {
        &self.metadata.section_id
    }

    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.get(name)
    }
}
