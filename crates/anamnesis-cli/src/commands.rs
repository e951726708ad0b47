use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;

use anamnesis_core::models::document::AnamnesisDocument;
use anamnesis_formatter::search_terms;
use anamnesis_formatter::validate::missing_fields;
use anamnesis_formatter::{FormatOutcome, FormatRequest, Formatter, SaveMode};

pub fn read_json(path: &Path) -> eyre::Result<Value> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("{} is not valid JSON: {e}", path.display()))?;
    Ok(value)
}

pub fn read_document(path: &Path) -> eyre::Result<AnamnesisDocument> {
    let bytes = std::fs::read(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    let document = AnamnesisDocument::from_slice(&bytes)
        .map_err(|e| eyre::eyre!("{} is not a stored anamnesis: {e}", path.display()))?;
    Ok(document)
}

pub fn mode(draft: bool) -> SaveMode {
    if draft { SaveMode::Draft } else { SaveMode::Strict }
}

pub fn format(
    formatter: &Formatter,
    payload: &Value,
    prior: Option<&AnamnesisDocument>,
    author_id: &str,
    patient_id: &str,
    mode: SaveMode,
) -> eyre::Result<FormatOutcome> {
    let outcome = formatter.format_and_assemble(
        FormatRequest {
            payload,
            prior,
            author_id,
            patient_id,
            mode,
        },
        jiff::Timestamp::now(),
    )?;
    Ok(outcome)
}

/// Missing required fields as `section.field`, in catalog order.
pub fn missing(formatter: &Formatter, payload: &Value) -> Vec<String> {
    let sections = formatter.structure(payload, jiff::Timestamp::now());
    missing_fields(&sections, formatter.catalog())
        .into_iter()
        .map(|m| format!("{}.{}", m.section, m.field))
        .collect()
}

pub fn terms(formatter: &Formatter, payload: &Value) -> BTreeSet<String> {
    let sections = formatter.structure(payload, jiff::Timestamp::now());
    search_terms::extract(&sections)
}
