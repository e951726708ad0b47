//! Critical-Field Validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use anamnesis_core::models::section::SectionRecord;
use anamnesis_sections::catalog::SectionCatalog;

use crate::sanitize::is_empty_value;

/// A required field that is absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MissingField {
    pub section: String,
    pub field: String,
}

/// Every required field missing from a submission, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("missing required fields: {}", describe(.missing))]
pub struct ValidationError {
    pub missing: Vec<MissingField>,
}

fn describe(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(|m| format!("{}.{}", m.section, m.field))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn contains(&self, section: &str, field: &str) -> bool {
        self.missing
            .iter()
            .any(|m| m.section == section && m.field == field)
    }
}

/// All required fields missing from `sections`. A section that is absent
/// altogether is missing every one of its required fields.
pub fn missing_fields(
    sections: &BTreeMap<String, SectionRecord>,
    catalog: &SectionCatalog,
) -> Vec<MissingField> {
    catalog
        .iter()
        .flat_map(|def| {
            let record = sections.get(&def.id);
            def.required_fields
                .iter()
                .filter(move |field| {
                    record
                        .and_then(|r| r.field(field))
                        .is_none_or(is_empty_value)
                })
                .map(move |field| MissingField {
                    section: def.id.clone(),
                    field: field.clone(),
                })
        })
        .collect()
}

pub fn validate(
    sections: &BTreeMap<String, SectionRecord>,
    catalog: &SectionCatalog,
) -> Result<(), ValidationError> {
    let missing = missing_fields(sections, catalog);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}
