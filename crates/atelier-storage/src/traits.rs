//! Storage abstraction trait
//!
//! This module defines the `ObjectStorage` trait that all storage backends
//! must implement, so the upload coordinator can work with any backend
//! without coupling to implementation details.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use atelier_core::StorageBackend;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Options for a single upload.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Cache-Control max-age in seconds, if the backend serves HTTP headers.
    pub cache_control_secs: Option<u32>,
    /// Overwrite an existing object at the same path instead of failing.
    pub upsert: bool,
}

/// Object storage abstraction
///
/// Backends are injected as `Arc<dyn ObjectStorage>` wherever the pipeline
/// needs storage; nothing holds an ambient module-level client.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload an object and return the stored path.
    ///
    /// Fails with `UploadFailed` if the object exists and `upsert` is false.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: &str,
        options: UploadOptions,
    ) -> StorageResult<String>;

    /// Public URL for an object. Purely derived from (bucket, path); does
    /// not check existence.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Download an object's bytes.
    async fn download(&self, bucket: &str, path: &str) -> StorageResult<Vec<u8>>;

    /// Check whether an object exists.
    async fn exists(&self, bucket: &str, path: &str) -> StorageResult<bool>;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, bucket: &str, path: &str) -> StorageResult<()>;

    /// Which backend this is.
    fn backend_type(&self) -> StorageBackend;
}

/// Validate a (bucket, path) pair against traversal and absolute paths.
///
/// Centralized so all backends stay consistent.
pub(crate) fn validate_location(bucket: &str, path: &str) -> StorageResult<()> {
    if bucket.is_empty()
        || !bucket
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StorageError::InvalidPath(format!(
            "Invalid bucket name: {bucket}"
        )));
    }
    if path.is_empty() || path.contains("..") || path.starts_with('/') {
        return Err(StorageError::InvalidPath(
            "Object path contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_location() {
        assert!(validate_location("portfolio", "uploads/a.webp").is_ok());
        assert!(validate_location("portfolio", "../etc/passwd").is_err());
        assert!(validate_location("portfolio", "/etc/passwd").is_err());
        assert!(validate_location("portfolio", "").is_err());
        assert!(validate_location("", "a.webp").is_err());
        assert!(validate_location("my bucket", "a.webp").is_err());
    }
}
