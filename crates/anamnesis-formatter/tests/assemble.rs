use std::collections::{BTreeMap, BTreeSet};

use anamnesis_core::models::completion::CompletionStats;
use anamnesis_core::models::document::{AnamnesisDocument, DocumentStatus};
use anamnesis_formatter::assemble::{Authorship, DocumentParts, assemble, next_version};
use anamnesis_formatter::error::FormatError;

fn ts(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

fn parts(by_section: &[(&str, u8)], total: u8) -> DocumentParts {
    DocumentParts {
        sections: BTreeMap::new(),
        stats: CompletionStats {
            total,
            by_section: by_section
                .iter()
                .map(|(id, score)| (id.to_string(), *score))
                .collect(),
        },
        search_terms: BTreeSet::from(["tos".to_string()]),
        status: DocumentStatus::Complete,
    }
}

const WHO: Authorship<'static> = Authorship {
    author_id: "u1",
    patient_id: "p1",
};

#[test]
fn first_save_is_version_one() {
    let now = ts("2026-03-01T10:00:00Z");
    let doc = assemble(parts(&[], 0), None, WHO, 30, now).unwrap();
    assert_eq!(doc.metadata.version, 1);
    assert_eq!(doc.metadata.created_at, now);
    assert_eq!(doc.metadata.updated_at, now);
    assert_eq!(doc.metadata.patient_id, "p1");
    assert_eq!(doc.metadata.last_updated_by, "u1");
    assert!(doc.searchable_data.search_terms.contains("tos"));
}

#[test]
fn later_saves_increment_and_keep_identity() {
    let first = assemble(parts(&[], 0), None, WHO, 30, ts("2026-03-01T10:00:00Z")).unwrap();
    let later = ts("2026-03-02T08:30:00Z");
    let second = assemble(
        parts(&[], 0),
        Some(&first),
        Authorship {
            author_id: "u2",
            patient_id: "p1",
        },
        30,
        later,
    )
    .unwrap();
    assert_eq!(second.metadata.version, 2);
    assert_eq!(second.metadata.id, first.metadata.id);
    assert_eq!(second.metadata.created_at, first.metadata.created_at);
    assert_eq!(second.metadata.updated_at, later);
    assert_eq!(second.metadata.last_updated_by, "u2");
}

#[test]
fn completion_metadata_comes_from_stats() {
    let doc = assemble(
        parts(&[("habitos", 50), ("datos-personales", 30), ("motivo-consulta", 29)], 40),
        None,
        WHO,
        30,
        ts("2026-03-01T10:00:00Z"),
    )
    .unwrap();
    assert_eq!(doc.metadata.completion_percentage, 40);
    assert_eq!(doc.metadata.section_completion["motivo-consulta"], 29);
    assert_eq!(
        doc.metadata.completed_sections,
        BTreeSet::from(["datos-personales".to_string(), "habitos".to_string()])
    );
}

#[test]
fn version_overflow_is_malformed_input() {
    let mut prior: AnamnesisDocument =
        assemble(parts(&[], 0), None, WHO, 30, ts("2026-03-01T10:00:00Z")).unwrap();
    prior.metadata.version = u64::MAX;
    assert!(matches!(
        next_version(Some(&prior)),
        Err(FormatError::MalformedInput(_))
    ));
    assert_eq!(next_version(None).unwrap(), 1);
}
