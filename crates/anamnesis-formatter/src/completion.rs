//! Completion Calculator.
//!
//! A section scores the share of its required and optional fields that are
//! filled in, as a rounded percentage. The overall score is the average of
//! the section scores weighted by [`SectionDefinition::weight`].

use std::collections::{BTreeMap, BTreeSet};

use anamnesis_core::models::completion::CompletionStats;
use anamnesis_core::models::section::SectionRecord;
use anamnesis_sections::catalog::{SectionCatalog, SectionDefinition};

use crate::sanitize::is_empty_value;

/// Score one section. An absent section, or one that defines no fields,
/// scores 0.
pub fn section_score(definition: &SectionDefinition, record: Option<&SectionRecord>) -> u8 {
    let Some(record) = record else {
        return 0;
    };
    let total = definition.field_count();
    if total == 0 {
        return 0;
    }
    let filled = definition
        .all_fields()
        .filter(|field| record.field(field).is_some_and(|v| !is_empty_value(v)))
        .count();
    percentage(filled as f64, total as f64)
}

pub fn calculate(
    sections: &BTreeMap<String, SectionRecord>,
    catalog: &SectionCatalog,
) -> CompletionStats {
    let by_section: BTreeMap<String, u8> = catalog
        .iter()
        .map(|def| (def.id.clone(), section_score(def, sections.get(&def.id))))
        .collect();

    let total_weight = catalog.total_weight();
    let total = if total_weight == 0 {
        0
    } else {
        let weighted: f64 = catalog
            .iter()
            .map(|def| f64::from(by_section[&def.id]) * f64::from(def.weight))
            .sum();
        percentage(weighted, 100.0 * f64::from(total_weight))
    };

    CompletionStats { total, by_section }
}

/// Sections whose score meets or exceeds `threshold`.
pub fn completed_sections(stats: &CompletionStats, threshold: u8) -> BTreeSet<String> {
    stats.sections_at_or_above(threshold)
}

fn percentage(part: f64, whole: f64) -> u8 {
    (100.0 * part / whole).round().clamp(0.0, 100.0) as u8
}
