use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use serde_json::json;

use anamnesis_core::models::document::{AnamnesisDocument, DocumentStatus};
use anamnesis_formatter::error::FormatError;
use anamnesis_formatter::{Formatter, SaveMode, format_and_assemble};
use anamnesis_storage::error::{SaveError, StorageError};
use anamnesis_storage::memory::MemoryDocumentStore;
use anamnesis_storage::save::{
    DEFAULT_MAX_ATTEMPTS, SaveRequest, SectionUpdate, save_anamnesis, save_section,
};
use anamnesis_storage::store::DocumentStore;

/// Lets another writer slip in a version before each of the first
/// `races` saves.
struct RacingStore {
    inner: MemoryDocumentStore,
    races: AtomicU32,
}

impl RacingStore {
    fn new(races: u32) -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            races: AtomicU32::new(races),
        }
    }
}

#[async_trait]
impl DocumentStore for RacingStore {
    async fn load(&self, patient_id: &str) -> Result<Option<AnamnesisDocument>, StorageError> {
        self.inner.load(patient_id).await
    }

    async fn save(
        &self,
        document: &AnamnesisDocument,
        expected_version: Option<u64>,
    ) -> Result<(), StorageError> {
        let remaining = self.races.load(Ordering::SeqCst);
        if remaining > 0 {
            self.races.store(remaining - 1, Ordering::SeqCst);
            let current = self.inner.load(document.patient_id()).await?;
            let competing = format_and_assemble(
                &json!({ "habitos": { "tabaco": "fuma ocasionalmente" } }),
                current.as_ref(),
                "other-writer",
                document.patient_id(),
            )
            .unwrap();
            self.inner
                .save(&competing, current.as_ref().map(AnamnesisDocument::version))
                .await?;
        }
        self.inner.save(document, expected_version).await
    }
}

fn complete_payload() -> serde_json::Value {
    json!({
        "datos_personales": { "nombre_completo": "Ana Pérez", "fecha_nacimiento": "1990-01-01" },
        "motivo_consulta": { "motivo_principal": "Dolor de cabeza" },
    })
}

fn request<'a>(payload: &'a serde_json::Value, mode: SaveMode) -> SaveRequest<'a> {
    SaveRequest {
        patient_id: "p1",
        author_id: "u1",
        payload,
        mode,
    }
}

#[tokio::test]
async fn saves_increment_the_version() {
    let store = MemoryDocumentStore::new();
    let formatter = Formatter::default();
    let payload = complete_payload();

    let first = save_anamnesis(&store, &formatter, request(&payload, SaveMode::Strict), 3)
        .await
        .unwrap();
    let second = save_anamnesis(&store, &formatter, request(&payload, SaveMode::Strict), 3)
        .await
        .unwrap();

    assert_eq!(first.document.version(), 1);
    assert_eq!(second.document.version(), 2);
    assert_eq!(second.document.metadata.id, first.document.metadata.id);
    assert_eq!(second.document.metadata.created_at, first.document.metadata.created_at);
    assert_eq!(store.load("p1").await.unwrap().unwrap(), second.document);
}

#[tokio::test]
async fn conflict_is_retried_on_top_of_the_other_write() {
    let store = RacingStore::new(1);
    let formatter = Formatter::default();
    let payload = complete_payload();

    let outcome = save_anamnesis(
        &store,
        &formatter,
        request(&payload, SaveMode::Strict),
        DEFAULT_MAX_ATTEMPTS,
    )
    .await
    .unwrap();

    // The competing writer stored version 1; ours lands as version 2.
    assert_eq!(outcome.document.version(), 2);
    let stored = store.load("p1").await.unwrap().unwrap();
    assert_eq!(stored.version(), 2);
    assert_eq!(stored.metadata.last_updated_by, "u1");
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    let store = RacingStore::new(5);
    let formatter = Formatter::default();
    let payload = complete_payload();

    let err = save_anamnesis(&store, &formatter, request(&payload, SaveMode::Strict), 2)
        .await
        .unwrap_err();

    match err {
        SaveError::RetriesExhausted {
            patient_id,
            attempts,
        } => {
            assert_eq!(patient_id, "p1");
            assert_eq!(attempts, 2);
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    // Only the competing writes landed.
    let stored = store.load("p1").await.unwrap().unwrap();
    assert_eq!(stored.version(), 2);
    assert_eq!(stored.metadata.last_updated_by, "other-writer");
}

#[tokio::test]
async fn zero_max_attempts_still_tries_once() {
    let store = MemoryDocumentStore::new();
    let formatter = Formatter::default();
    let payload = complete_payload();

    let outcome = save_anamnesis(&store, &formatter, request(&payload, SaveMode::Strict), 0)
        .await
        .unwrap();
    assert_eq!(outcome.document.version(), 1);
}

#[tokio::test]
async fn empty_identity_is_rejected_before_touching_the_store() {
    let store = MemoryDocumentStore::new();
    let formatter = Formatter::default();
    let payload = complete_payload();

    let err = save_anamnesis(
        &store,
        &formatter,
        SaveRequest {
            patient_id: "  ",
            ..request(&payload, SaveMode::Draft)
        },
        3,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, SaveError::MissingIdentity("patient_id")));

    let err = save_anamnesis(
        &store,
        &formatter,
        SaveRequest {
            author_id: "",
            ..request(&payload, SaveMode::Draft)
        },
        3,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, SaveError::MissingIdentity("author_id")));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn strict_validation_failure_stores_nothing() {
    let store = MemoryDocumentStore::new();
    let formatter = Formatter::default();
    let payload = json!({ "habitos": { "tabaco": "no" } });

    let err = save_anamnesis(&store, &formatter, request(&payload, SaveMode::Strict), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, SaveError::Format(FormatError::Validation(_))));
    assert!(store.is_empty().await);

    let outcome = save_anamnesis(&store, &formatter, request(&payload, SaveMode::Draft), 3)
        .await
        .unwrap();
    assert_eq!(outcome.document.metadata.status, DocumentStatus::Draft);
    assert!(outcome.validation.is_some());
}

#[tokio::test]
async fn section_update_replaces_one_section() {
    let store = MemoryDocumentStore::new();
    let formatter = Formatter::default();
    let payload = complete_payload();
    save_anamnesis(&store, &formatter, request(&payload, SaveMode::Strict), 3)
        .await
        .unwrap();

    let section = json!({ "tabaco": "no fuma", "alcohol": "" });
    let outcome = save_section(
        &store,
        &formatter,
        SectionUpdate {
            patient_id: "p1",
            author_id: "u2",
            section_id: "habitos",
            payload: &section,
            mode: SaveMode::Strict,
        },
        3,
    )
    .await
    .unwrap();

    let doc = &outcome.document;
    assert_eq!(doc.version(), 2);
    assert_eq!(doc.metadata.last_updated_by, "u2");
    assert!(doc.section("datos-personales").is_some());
    let habitos = doc.section("habitos").unwrap();
    assert_eq!(habitos.data.len(), 1);
    assert_eq!(habitos.field("tabaco"), Some(&json!("no fuma")));
}

#[tokio::test]
async fn section_update_needs_a_stored_document() {
    let store = MemoryDocumentStore::new();
    let formatter = Formatter::default();
    let section = json!({ "tabaco": "no" });

    let err = save_section(
        &store,
        &formatter,
        SectionUpdate {
            patient_id: "p1",
            author_id: "u1",
            section_id: "habitos",
            payload: &section,
            mode: SaveMode::Draft,
        },
        3,
    )
    .await
    .unwrap_err();
    match err {
        SaveError::Storage(StorageError::NotFound { key }) => assert_eq!(key, "anamnesis/p1.json"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}
