use serde_json::json;

use anamnesis_core::error::CoreError;
use anamnesis_core::models::document::{AnamnesisDocument, DocumentStatus};
use anamnesis_formatter::config::FormatterConfig;
use anamnesis_formatter::error::FormatError;
use anamnesis_formatter::{FormatRequest, Formatter, SaveMode, format_and_assemble};

fn ts(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

fn request<'a>(
    payload: &'a serde_json::Value,
    prior: Option<&'a AnamnesisDocument>,
    mode: SaveMode,
) -> FormatRequest<'a> {
    FormatRequest {
        payload,
        prior,
        author_id: "u1",
        patient_id: "p1",
        mode,
    }
}

fn complete_payload() -> serde_json::Value {
    json!({
        "datos_personales": { "nombre_completo": "Ana Pérez", "fecha_nacimiento": "1990-01-01" },
        "motivo_consulta": { "motivo_principal": "Dolor de cabeza intenso" },
        "habitos": { "tabaco": "no fuma", "ejercicio": "camina a diario" },
    })
}

#[test]
fn first_save_of_personal_data() {
    let payload = json!({
        "datos_personales": { "nombre_completo": "Ana Pérez", "fecha_nacimiento": "1990-01-01" },
    });
    let doc = format_and_assemble(&payload, None, "u1", "p1").unwrap();

    assert_eq!(doc.metadata.version, 1);
    let data = serde_json::to_value(&doc.sections["datos-personales"].data).unwrap();
    assert_eq!(
        data,
        json!({ "nombre_completo": "Ana Pérez", "fecha_nacimiento": "1990-01-01" })
    );
    assert!(doc.metadata.completed_sections.contains("datos-personales"));
    // motivo_principal is required but was not sent.
    assert_eq!(doc.metadata.status, DocumentStatus::Draft);
}

#[test]
fn strict_mode_rejects_missing_required_fields() {
    let payload = json!({ "habitos": { "tabaco": "no" } });
    let err = Formatter::default()
        .format_and_assemble(request(&payload, None, SaveMode::Strict), ts("2026-03-01T10:00:00Z"))
        .unwrap_err();
    match err {
        FormatError::Validation(v) => {
            assert_eq!(v.missing.len(), 3);
            assert!(v.contains("motivo-consulta", "motivo_principal"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn draft_mode_returns_the_validation_error_alongside() {
    let payload = json!({ "habitos": { "tabaco": "no" } });
    let outcome = Formatter::default()
        .format_and_assemble(request(&payload, None, SaveMode::Draft), ts("2026-03-01T10:00:00Z"))
        .unwrap();
    assert!(outcome.document.is_draft());
    assert_eq!(outcome.validation.unwrap().missing.len(), 3);
}

#[test]
fn complete_submission_is_marked_complete() {
    let payload = complete_payload();
    let outcome = Formatter::default()
        .format_and_assemble(request(&payload, None, SaveMode::Strict), ts("2026-03-01T10:00:00Z"))
        .unwrap();
    let doc = outcome.document;
    assert!(outcome.validation.is_none());
    assert_eq!(doc.metadata.status, DocumentStatus::Complete);
    assert!(doc.searchable_data.search_terms.contains("dolor cabeza"));
    assert!(doc.searchable_data.search_terms.contains("fuma"));
    // datos 33 * 15 + motivo 33 * 20 + habitos 33 * 10 over 100.
    assert_eq!(doc.metadata.completion_percentage, 15);
    assert_eq!(
        doc.metadata.completed_sections.iter().collect::<Vec<_>>(),
        vec!["datos-personales", "habitos", "motivo-consulta"]
    );
}

#[test]
fn emptied_section_is_dropped_from_next_version() {
    let formatter = Formatter::default();
    let first = formatter
        .format_and_assemble(
            request(&complete_payload(), None, SaveMode::Strict),
            ts("2026-03-01T10:00:00Z"),
        )
        .unwrap()
        .document;
    assert!(first.sections.contains_key("habitos"));

    let mut payload = complete_payload();
    payload["habitos"] = json!({ "tabaco": "", "ejercicio": "" });
    let second = formatter
        .format_and_assemble(
            request(&payload, Some(&first), SaveMode::Strict),
            ts("2026-03-02T10:00:00Z"),
        )
        .unwrap()
        .document;

    assert_eq!(second.metadata.version, 2);
    assert!(!second.sections.contains_key("habitos"));
    assert!(!second.metadata.completed_sections.contains("habitos"));
    assert_eq!(second.metadata.created_at, first.metadata.created_at);
}

#[test]
fn update_section_replaces_only_that_section() {
    let formatter = Formatter::default();
    let first = formatter
        .format_and_assemble(
            request(&complete_payload(), None, SaveMode::Strict),
            ts("2026-03-01T10:00:00Z"),
        )
        .unwrap()
        .document;

    let later = ts("2026-03-05T09:00:00Z");
    let updated = formatter
        .update_section(
            &first,
            "habitos",
            &json!({ "alcohol": "fines de semana", "sueno": "7 horas" }),
            "u9",
            SaveMode::Strict,
            later,
        )
        .unwrap()
        .document;

    assert_eq!(updated.metadata.version, 2);
    assert_eq!(updated.metadata.last_updated_by, "u9");
    assert_eq!(updated.metadata.patient_id, "p1");
    assert_eq!(updated.sections["datos-personales"], first.sections["datos-personales"]);
    let habits = &updated.sections["habitos"];
    assert!(habits.field("tabaco").is_none());
    assert_eq!(habits.metadata.last_updated, later);
    assert!(updated.searchable_data.search_terms.contains("fines semana"));
    assert!(!updated.searchable_data.search_terms.contains("fuma"));
}

#[test]
fn update_section_with_empty_payload_removes_it() {
    let formatter = Formatter::default();
    let first = formatter
        .format_and_assemble(
            request(&complete_payload(), None, SaveMode::Strict),
            ts("2026-03-01T10:00:00Z"),
        )
        .unwrap()
        .document;
    let updated = formatter
        .update_section(&first, "habitos", &json!({ "tabaco": " " }), "u1", SaveMode::Strict, ts("2026-03-02T00:00:00Z"))
        .unwrap()
        .document;
    assert!(!updated.sections.contains_key("habitos"));
}

#[test]
fn update_section_rejects_unknown_sections() {
    let formatter = Formatter::default();
    let first = formatter
        .format_and_assemble(
            request(&complete_payload(), None, SaveMode::Strict),
            ts("2026-03-01T10:00:00Z"),
        )
        .unwrap()
        .document;
    let err = formatter
        .update_section(&first, "cardiologia", &json!({ "x": 1 }), "u1", SaveMode::Draft, ts("2026-03-02T00:00:00Z"))
        .unwrap_err();
    assert!(matches!(err, FormatError::UnknownSection(id) if id == "cardiologia"));
}

#[test]
fn update_section_can_fail_validation() {
    let formatter = Formatter::default();
    let first = formatter
        .format_and_assemble(
            request(&complete_payload(), None, SaveMode::Strict),
            ts("2026-03-01T10:00:00Z"),
        )
        .unwrap()
        .document;
    let err = formatter
        .update_section(
            &first,
            "motivo-consulta",
            &json!({ "descripcion": "sin motivo" }),
            "u1",
            SaveMode::Strict,
            ts("2026-03-02T00:00:00Z"),
        )
        .unwrap_err();
    assert!(matches!(err, FormatError::Validation(_)));
}

#[test]
fn threshold_is_configurable() {
    let formatter = Formatter::with_config(FormatterConfig {
        completion_threshold: 50,
        ..FormatterConfig::default()
    });
    let outcome = formatter
        .format_and_assemble(
            request(&complete_payload(), None, SaveMode::Strict),
            ts("2026-03-01T10:00:00Z"),
        )
        .unwrap();
    assert!(outcome.document.metadata.completed_sections.is_empty());
}

#[test]
fn stored_document_without_version_is_malformed() {
    let payload = complete_payload();
    let doc = format_and_assemble(&payload, None, "u1", "p1").unwrap();
    let mut stored = serde_json::to_value(&doc).unwrap();

    stored["metadata"]["version"] = json!("3");
    let err = AnamnesisDocument::from_stored(stored.clone()).unwrap_err();
    assert!(matches!(err, CoreError::MalformedDocument(_)));

    stored["metadata"].as_object_mut().unwrap().remove("version");
    let err: FormatError = AnamnesisDocument::from_stored(stored).unwrap_err().into();
    assert!(matches!(err, FormatError::Core(CoreError::MalformedDocument(_))));
}

#[test]
fn stored_documents_round_trip_with_camel_case_keys() {
    let doc = format_and_assemble(&complete_payload(), None, "u1", "p1").unwrap();
    let stored = serde_json::to_value(&doc).unwrap();
    assert!(stored["metadata"]["completedSections"].is_array());
    assert!(stored["searchableData"]["searchTerms"].is_array());
    assert_eq!(stored["sections"]["habitos"]["metadata"]["schemaVersion"], json!("1.0"));
    assert_eq!(AnamnesisDocument::from_stored(stored).unwrap(), doc);
}

#[test]
fn accented_and_flat_catalog_fields_count_toward_completion() {
    let payload = json!({
        "Sueño": "6 horas",
        "otros_familiares": "tio diabetico",
    });
    let outcome = Formatter::default()
        .format_and_assemble(request(&payload, None, SaveMode::Draft), ts("2026-03-01T10:00:00Z"))
        .unwrap();

    let completion = &outcome.document.metadata.section_completion;
    // One of six optional fields, one of five.
    assert_eq!(completion["habitos"], 17);
    assert_eq!(completion["antecedentes-familiares"], 20);
    assert!(outcome.document.section("otros").is_none());
}

#[test]
fn update_section_normalizes_field_names() {
    let payload = complete_payload();
    let formatter = Formatter::default();
    let prior = formatter
        .format_and_assemble(request(&payload, None, SaveMode::Strict), ts("2026-03-01T10:00:00Z"))
        .unwrap()
        .document;

    let outcome = formatter
        .update_section(
            &prior,
            "habitos",
            &json!({ "Sueño": "mal", "Tabaco": "no" }),
            "u2",
            SaveMode::Strict,
            ts("2026-03-02T10:00:00Z"),
        )
        .unwrap();

    let habits = outcome.document.section("habitos").unwrap();
    assert_eq!(habits.field("sueno"), Some(&json!("mal")));
    assert_eq!(habits.field("tabaco"), Some(&json!("no")));
    assert_eq!(outcome.document.metadata.section_completion["habitos"], 33);
}
