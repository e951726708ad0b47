use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use anamnesis_core::models::document::AnamnesisDocument;

use crate::error::StorageError;
use crate::store::{DocumentStore, check_next_version, check_stored_version};

/// A process-local store. The version check and the write happen under one
/// lock.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<String, AnamnesisDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.lock().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn load(&self, patient_id: &str) -> Result<Option<AnamnesisDocument>, StorageError> {
        Ok(self.documents.lock().await.get(patient_id).cloned())
    }

    async fn save(
        &self,
        document: &AnamnesisDocument,
        expected_version: Option<u64>,
    ) -> Result<(), StorageError> {
        check_next_version(document, expected_version)?;

        let mut documents = self.documents.lock().await;
        let patient_id = document.patient_id();
        let stored = documents.get(patient_id).map(AnamnesisDocument::version);
        check_stored_version(patient_id, stored, expected_version)?;

        documents.insert(patient_id.to_string(), document.clone());
        Ok(())
    }
}
