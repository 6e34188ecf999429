//! In-memory storage backend.
//!
//! Backs tests and throwaway local runs. Tracks call counts and supports
//! one-shot failure injection so callers can assert on interaction with the
//! storage collaborator without a filesystem or network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::traits::{validate_location, ObjectStorage, StorageError, StorageResult, UploadOptions};
use atelier_core::StorageBackend;

#[derive(Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
}

/// In-memory object storage
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    upload_calls: AtomicUsize,
    /// Error returned by the next upload, if set. Consumed on use.
    next_upload_error: Mutex<Option<StorageError>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of upload calls made against this store, including failed ones.
    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    /// Make the next upload fail with the given error.
    pub fn fail_next_upload(&self, error: StorageError) {
        *self.next_upload_error.lock().unwrap() = Some(error);
    }

    /// Number of objects currently stored.
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Content type recorded for a stored object.
    pub fn content_type(&self, bucket: &str, path: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), path.to_string()))
            .map(|o| o.content_type.clone())
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: &str,
        options: UploadOptions,
    ) -> StorageResult<String> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        validate_location(bucket, path)?;

        if let Some(error) = self.next_upload_error.lock().unwrap().take() {
            return Err(error);
        }

        let key = (bucket.to_string(), path.to_string());
        let mut objects = self.objects.lock().unwrap();
        if !options.upsert && objects.contains_key(&key) {
            return Err(StorageError::UploadFailed(format!(
                "Object already exists: {}/{}",
                bucket, path
            )));
        }

        tracing::debug!(
            bucket = %bucket,
            path = %path,
            size_bytes = data.len(),
            "Memory storage upload"
        );

        objects.insert(
            key,
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );

        Ok(path.to_string())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{}/{}", bucket, path)
    }

    async fn download(&self, bucket: &str, path: &str) -> StorageResult<Vec<u8>> {
        validate_location(bucket, path)?;
        let objects = self.objects.lock().unwrap();
        objects
            .get(&(bucket.to_string(), path.to_string()))
            .map(|o| o.data.to_vec())
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", bucket, path)))
    }

    async fn exists(&self, bucket: &str, path: &str) -> StorageResult<bool> {
        validate_location(bucket, path)?;
        let objects = self.objects.lock().unwrap();
        Ok(objects.contains_key(&(bucket.to_string(), path.to_string())))
    }

    async fn delete(&self, bucket: &str, path: &str) -> StorageResult<()> {
        validate_location(bucket, path)?;
        self.objects
            .lock()
            .unwrap()
            .remove(&(bucket.to_string(), path.to_string()));
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_call_count() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.upload_calls(), 0);

        storage
            .upload(
                "portfolio",
                "uploads/a.png",
                Bytes::from_static(b"png"),
                "image/png",
                UploadOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(storage.upload_calls(), 1);
        assert_eq!(storage.object_count(), 1);
        assert_eq!(
            storage.download("portfolio", "uploads/a.png").await.unwrap(),
            b"png"
        );
        assert_eq!(
            storage.content_type("portfolio", "uploads/a.png").as_deref(),
            Some("image/png")
        );
        assert_eq!(storage.content_type("portfolio", "missing.png"), None);
    }

    #[tokio::test]
    async fn test_failure_injection_is_one_shot() {
        let storage = MemoryStorage::new();
        storage.fail_next_upload(StorageError::QuotaExceeded("bucket full".to_string()));

        let result = storage
            .upload(
                "portfolio",
                "uploads/a.png",
                Bytes::from_static(b"png"),
                "image/png",
                UploadOptions::default(),
            )
            .await;
        assert!(matches!(result, Err(StorageError::QuotaExceeded(_))));
        assert_eq!(storage.object_count(), 0);

        // Next upload succeeds.
        storage
            .upload(
                "portfolio",
                "uploads/a.png",
                Bytes::from_static(b"png"),
                "image/png",
                UploadOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(storage.upload_calls(), 2);
    }

    #[tokio::test]
    async fn test_public_url_is_stable() {
        let storage = MemoryStorage::new();
        assert_eq!(
            storage.public_url("portfolio", "uploads/a.png"),
            "memory://portfolio/uploads/a.png"
        );
    }
}
