//! Where finished PDFs are delivered.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// Handle to a delivered export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileHandle {
    pub key: String,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: usize,
}

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError>;
}

/// Object key of an export. Re-exporting the same title overwrites the object.
pub fn export_key(owner_id: Uuid, document_id: Uuid, filename: &str) -> String {
    format!("exports/{owner_id}/{document_id}/{filename}")
}

pub struct S3FileStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3FileStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl FileStore for S3FileStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded export to s3://{}/{}", self.bucket, key);
        Ok(())
    }
}

#[cfg(test)]
pub use memory::InMemoryFileStore;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_key_layout() {
        let owner = Uuid::nil();
        let doc = Uuid::from_u128(1);
        assert_eq!(
            export_key(owner, doc, "CV_resume.pdf"),
            format!("exports/{owner}/{doc}/CV_resume.pdf")
        );
    }

    #[tokio::test]
    async fn test_in_memory_store_overwrites_same_key() {
        let store = InMemoryFileStore::default();
        store
            .put("k", Bytes::from_static(b"one"), "application/pdf")
            .await
            .unwrap();
        store
            .put("k", Bytes::from_static(b"two"), "application/pdf")
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("k").await.unwrap().1, Bytes::from_static(b"two"));
    }
}
