use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::section::SectionRecord;
use crate::error::CoreError;

/// The top-level persisted unit: one per patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AnamnesisDocument {
    pub metadata: DocumentMetadata,
    pub sections: BTreeMap<String, SectionRecord>,
    pub searchable_data: SearchableData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DocumentMetadata {
    pub id: Uuid,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
    /// Starts at 1 and grows by exactly 1 on every successful save.
    #[ts(type = "number")]
    pub version: u64,
    pub patient_id: String,
    pub last_updated_by: String,
    pub status: DocumentStatus,
    pub completion_percentage: u8,
    pub section_completion: BTreeMap<String, u8>,
    pub completed_sections: BTreeSet<String>,
}

/// Whether the required fields were all present when the document was saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DocumentStatus {
    /// Saved with missing required fields.
    Draft,
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SearchableData {
    pub search_terms: BTreeSet<String>,
}

impl AnamnesisDocument {
    /// Decode a document read back from storage.
    ///
    /// The version counter is checked before anything else: a stored document
    /// without a non-negative integer `metadata.version` cannot be versioned
    /// forward and is reported as [`CoreError::MalformedDocument`].
    pub fn from_stored(value: serde_json::Value) -> Result<Self, CoreError> {
        match value.get("metadata").and_then(|m| m.get("version")) {
            None => {
                return Err(CoreError::MalformedDocument(
                    "metadata.version is missing".to_string(),
                ));
            }
            Some(version) if version.as_u64().is_none() => {
                return Err(CoreError::MalformedDocument(format!(
                    "metadata.version is not a non-negative integer: {version}"
                )));
            }
            Some(_) => {}
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        Self::from_stored(value)
    }

    pub fn version(&self) -> u64 {
        self.metadata.version
    }

    pub fn patient_id(&self) -> &str {
        &self.metadata.patient_id
    }

    pub fn section(&self, section_id: &str) -> Option<&SectionRecord> {
        self.sections.get(section_id)
    }

    pub fn is_draft(&self) -> bool {
        self.metadata.status == DocumentStatus::Draft
    }
}
