use aws_sdk_s3::Client;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Body and ETag of a fetched object.
pub struct FetchedObject {
    pub body: Vec<u8>,
    pub etag: Option<String>,
}

pub async fn get_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<FetchedObject, StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let etag = resp.e_tag().map(|s| s.to_string());
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(FetchedObject { body, etag })
}

/// Which precondition a conditional put carries.
#[derive(Debug, Clone, Copy)]
pub enum PutCondition<'a> {
    /// `If-Match: <etag>`: the object must still be the one we read.
    Matches(&'a str),
    /// `If-None-Match: *`: the object must not exist yet.
    Absent,
}

/// Put a JSON object under a precondition. Returns the new ETag, or
/// [`StorageError::PreconditionFailed`] if the object changed underneath us.
pub async fn put_json_conditional(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    condition: PutCondition<'_>,
) -> Result<String, StorageError> {
    let req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type(JSON_CONTENT_TYPE)
        .body(ByteStream::from(body));

    let req = match condition {
        PutCondition::Matches(etag) => req.if_match(etag),
        PutCondition::Absent => req.if_none_match("*"),
    };

    let resp = req.send().await.map_err(|e| {
        let err = e.into_service_error();
        // 412 on a failed precondition, 409 when a concurrent conditional
        // write to the same key is in flight.
        match err.code() {
            Some("PreconditionFailed") | Some("ConditionalRequestConflict") => {
                StorageError::PreconditionFailed {
                    key: key.to_string(),
                }
            }
            _ => StorageError::PutObject(err.to_string()),
        }
    })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// List all keys under a prefix, following continuation tokens.
pub async fn list_keys(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<String>, StorageError> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let mut req = client.list_objects_v2().bucket(bucket).prefix(prefix);

        if let Some(token) = &continuation_token {
            req = req.continuation_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

        keys.extend(
            resp.contents()
                .iter()
                .filter_map(|obj| obj.key().map(str::to_string)),
        );

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(|s| s.to_string());
        } else {
            break;
        }
    }

    Ok(keys)
}
