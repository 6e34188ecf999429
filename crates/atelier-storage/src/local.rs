use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{validate_location, ObjectStorage, StorageError, StorageResult, UploadOptions};
use atelier_core::StorageBackend;

/// Local filesystem storage implementation
///
/// Objects live under `{base_path}/{bucket}/{path}` and are served from
/// `{base_url}/{bucket}/{path}` by whatever static file server fronts the
/// directory.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for object storage (e.g. "/var/lib/atelier/media")
    /// * `base_url` - Base URL the directory is served from (e.g. "http://localhost:3000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert (bucket, path) to a filesystem path with traversal validation.
    fn object_path(&self, bucket: &str, path: &str) -> StorageResult<PathBuf> {
        validate_location(bucket, path)?;

        let full = self.base_path.join(bucket).join(path);

        // Keys are validated above, but canonicalize what exists on disk as a
        // second check that the resolved path stays under the base directory.
        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;
        if let Ok(canonical) = full.canonicalize() {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidPath(
                    "Object path resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(full)
    }

    fn generate_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), bucket, path)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: &str,
        options: UploadOptions,
    ) -> StorageResult<String> {
        let fs_path = self.object_path(bucket, path)?;
        let size = data.len();

        if !options.upsert && fs::try_exists(&fs_path).await.unwrap_or(false) {
            return Err(StorageError::UploadFailed(format!(
                "Object already exists: {}/{}",
                bucket, path
            )));
        }

        self.ensure_parent_dir(&fs_path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&fs_path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", fs_path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", fs_path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", fs_path.display(), e))
        })?;

        tracing::info!(
            bucket = %bucket,
            path = %path,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(path.to_string())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.generate_url(bucket, path)
    }

    async fn download(&self, bucket: &str, path: &str) -> StorageResult<Vec<u8>> {
        let fs_path = self.object_path(bucket, path)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&fs_path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(format!("{}/{}", bucket, path)));
        }

        let data = fs::read(&fs_path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", fs_path.display(), e))
        })?;

        tracing::debug!(
            bucket = %bucket,
            path = %path,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(data)
    }

    async fn exists(&self, bucket: &str, path: &str) -> StorageResult<bool> {
        let fs_path = self.object_path(bucket, path)?;
        Ok(fs::try_exists(&fs_path).await.unwrap_or(false))
    }

    async fn delete(&self, bucket: &str, path: &str) -> StorageResult<()> {
        let fs_path = self.object_path(bucket, path)?;

        if !fs::try_exists(&fs_path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&fs_path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", fs_path.display(), e))
        })?;

        tracing::info!(bucket = %bucket, path = %path, "Local storage delete successful");

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "http://localhost:3000/media".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_download_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let data = Bytes::from_static(b"fake image bytes");
        let path = storage
            .upload(
                "portfolio",
                "uploads/a.webp",
                data.clone(),
                "image/webp",
                UploadOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(path, "uploads/a.webp");
        let downloaded = storage.download("portfolio", &path).await.unwrap();
        assert_eq!(&downloaded[..], &data[..]);
    }

    #[tokio::test]
    async fn test_public_url_format() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;
        assert_eq!(
            storage.public_url("portfolio", "uploads/a.webp"),
            "http://localhost:3000/media/portfolio/uploads/a.webp"
        );
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let result = storage.download("portfolio", "../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));

        let result = storage.delete("portfolio", "/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));

        let result = storage.exists("..", "passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_no_upsert_rejects_existing_object() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let data = Bytes::from_static(b"first");
        storage
            .upload(
                "portfolio",
                "uploads/a.webp",
                data,
                "image/webp",
                UploadOptions::default(),
            )
            .await
            .unwrap();

        let result = storage
            .upload(
                "portfolio",
                "uploads/a.webp",
                Bytes::from_static(b"second"),
                "image/webp",
                UploadOptions::default(),
            )
            .await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));

        // With upsert the overwrite succeeds.
        storage
            .upload(
                "portfolio",
                "uploads/a.webp",
                Bytes::from_static(b"second"),
                "image/webp",
                UploadOptions {
                    upsert: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let downloaded = storage.download("portfolio", "uploads/a.webp").await.unwrap();
        assert_eq!(&downloaded[..], b"second");
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_ok() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;
        assert!(storage.delete("portfolio", "missing.webp").await.is_ok());
    }
}
