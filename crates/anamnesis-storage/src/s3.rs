use async_trait::async_trait;
use aws_sdk_s3::Client;
use tracing::debug;

use anamnesis_core::models::document::AnamnesisDocument;
use anamnesis_core::store_keys;

use crate::error::StorageError;
use crate::objects::{self, PutCondition};
use crate::store::{DocumentStore, check_next_version, check_stored_version};

/// One JSON object per patient under `anamnesis/`, guarded by S3
/// conditional writes.
#[derive(Debug, Clone)]
pub struct S3DocumentStore {
    client: Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Patient ids that have a stored document, sorted.
    pub async fn patient_ids(&self) -> Result<Vec<String>, StorageError> {
        let keys =
            objects::list_keys(&self.client, &self.bucket, store_keys::ANAMNESIS_PREFIX).await?;
        let mut ids: Vec<String> = keys
            .iter()
            .filter_map(|key| store_keys::patient_id_from_key(key))
            .map(str::to_string)
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn fetch(
        &self,
        patient_id: &str,
    ) -> Result<Option<(AnamnesisDocument, Option<String>)>, StorageError> {
        let key = store_keys::anamnesis(patient_id);
        match objects::get_object(&self.client, &self.bucket, &key).await {
            Ok(object) => {
                let document = AnamnesisDocument::from_slice(&object.body)?;
                Ok(Some((document, object.etag)))
            }
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn load(&self, patient_id: &str) -> Result<Option<AnamnesisDocument>, StorageError> {
        Ok(self.fetch(patient_id).await?.map(|(document, _)| document))
    }

    async fn save(
        &self,
        document: &AnamnesisDocument,
        expected_version: Option<u64>,
    ) -> Result<(), StorageError> {
        check_next_version(document, expected_version)?;

        let patient_id = document.patient_id();
        let current = self.fetch(patient_id).await?;
        let stored = current.as_ref().map(|(doc, _)| doc.version());
        check_stored_version(patient_id, stored, expected_version)?;

        let key = store_keys::anamnesis(patient_id);
        let body = serde_json::to_vec(document)?;
        let etag = current.and_then(|(_, etag)| etag);
        let condition = match etag.as_deref() {
            Some(etag) => PutCondition::Matches(etag),
            None => PutCondition::Absent,
        };

        let new_etag =
            objects::put_json_conditional(&self.client, &self.bucket, &key, body, condition)
                .await?;
        debug!(%key, version = document.version(), etag = %new_etag, "wrote anamnesis object");
        Ok(())
    }
}
