//! Upload coordinator.
//!
//! Takes a rendered asset, generates a collision-free object path and hands
//! it to the injected storage client. The storage client is always an
//! explicitly constructed collaborator; nothing here holds module-level
//! state.

use std::sync::Arc;

use rand::distr::Alphanumeric;
use rand::Rng;

use crate::error::StudioResult;
use atelier_processing::{OutputAsset, OutputFormat};
use atelier_storage::{ObjectStorage, UploadOptions};

const PATH_TOKEN_LEN: usize = 12;

/// A stored object and where to find it publicly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObjectReference {
    pub bucket: String,
    pub path: String,
    pub public_url: String,
}

/// Coordinates asset uploads against an injected storage backend.
pub struct Uploader {
    storage: Arc<dyn ObjectStorage>,
    bucket: String,
    cache_control_secs: Option<u32>,
}

impl Uploader {
    pub fn new(storage: Arc<dyn ObjectStorage>, bucket: impl Into<String>) -> Self {
        Uploader {
            storage,
            bucket: bucket.into(),
            cache_control_secs: Some(atelier_core::constants::DEFAULT_CACHE_CONTROL_SECS),
        }
    }

    pub fn with_cache_control(mut self, secs: Option<u32>) -> Self {
        self.cache_control_secs = secs;
        self
    }

    /// Generate an object path under `folder`.
    ///
    /// `{folder}/{unix_millis}-{token}.{ext}`. The extension comes from the
    /// asset format, never from a user-supplied filename, and the random
    /// token keeps same-millisecond uploads from colliding.
    pub fn generate_object_path(folder: &str, format: OutputFormat) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(PATH_TOKEN_LEN)
            .map(char::from)
            .collect();

        format!(
            "{}/{}-{}.{}",
            folder.trim_matches('/'),
            millis,
            token,
            format.extension()
        )
    }

    /// Upload a rendered asset and return its stored reference.
    ///
    /// No retries; storage failures map straight onto the studio error
    /// taxonomy for the caller to surface.
    pub async fn upload(
        &self,
        asset: &OutputAsset,
        folder: &str,
    ) -> StudioResult<StoredObjectReference> {
        let path = Self::generate_object_path(folder, asset.format);

        self.storage
            .upload(
                &self.bucket,
                &path,
                asset.data.clone(),
                asset.content_type(),
                UploadOptions {
                    cache_control_secs: self.cache_control_secs,
                    upsert: false,
                },
            )
            .await?;

        let public_url = self.storage.public_url(&self.bucket, &path);

        tracing::info!(
            bucket = %self.bucket,
            path = %path,
            content_type = asset.content_type(),
            size_bytes = asset.data.len(),
            "Asset uploaded"
        );

        Ok(StoredObjectReference {
            bucket: self.bucket.clone(),
            path,
            public_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_paths_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let path = Uploader::generate_object_path("uploads", OutputFormat::WebP);
            assert!(seen.insert(path), "generated a duplicate object path");
        }
    }

    #[test]
    fn test_path_shape() {
        let path = Uploader::generate_object_path("uploads", OutputFormat::Jpeg);
        assert!(path.starts_with("uploads/"));
        assert!(path.ends_with(".jpg"));

        let name = path.strip_prefix("uploads/").unwrap();
        let (stamp, rest) = name.split_once('-').unwrap();
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));

        let token = rest.strip_suffix(".jpg").unwrap();
        assert_eq!(token.len(), PATH_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_folder_slashes_trimmed() {
        let path = Uploader::generate_object_path("/uploads/", OutputFormat::Png);
        assert!(path.starts_with("uploads/"));
        assert!(!path.contains("//"));
    }
}
