//! Configuration module
//!
//! Environment-based configuration for the media pipeline: storage backend
//! selection, bucket and folder defaults, upload limits, and output defaults.
//! The configured values feed the injectable storage client and the image
//! field defaults; nothing reads the environment after startup.

use std::env;

use crate::constants;
use crate::storage_types::StorageBackend;

/// Application configuration for the studio media pipeline.
#[derive(Clone, Debug)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub bucket: String,
    pub upload_folder: String,
    pub max_upload_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
    /// Default output format for confirmed crops ("webp", "jpeg", or "png").
    pub output_format: String,
    /// Optional fixed output width; height follows the crop aspect ratio.
    pub output_width: Option<u32>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|s| StorageBackend::parse(&s))
            .unwrap_or(StorageBackend::Local);

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| constants::DEFAULT_MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(constants::DEFAULT_MAX_UPLOAD_SIZE_MB);

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| constants::DEFAULT_ALLOWED_CONTENT_TYPES.join(","))
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok().filter(|s| !s.is_empty()),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            bucket: env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| constants::DEFAULT_BUCKET.to_string()),
            upload_folder: env::var("UPLOAD_FOLDER")
                .unwrap_or_else(|_| constants::DEFAULT_UPLOAD_FOLDER.to_string()),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            allowed_content_types,
            output_format: env::var("OUTPUT_FORMAT")
                .unwrap_or_else(|_| "webp".to_string())
                .to_lowercase(),
            output_width: env::var("OUTPUT_WIDTH").ok().and_then(|s| s.parse().ok()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.storage_backend {
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using the local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using the local storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {}
        }

        if self.bucket.is_empty() {
            return Err(anyhow::anyhow!("STORAGE_BUCKET cannot be empty"));
        }

        if !matches!(self.output_format.as_str(), "webp" | "jpeg" | "jpg" | "png") {
            return Err(anyhow::anyhow!(
                "OUTPUT_FORMAT must be one of webp, jpeg, png (got {})",
                self.output_format
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for Config {
    /// In-memory configuration with library defaults; used by tests and
    /// embedders that construct the pipeline without an environment.
    fn default() -> Self {
        Config {
            storage_backend: StorageBackend::Memory,
            local_storage_path: None,
            local_storage_base_url: None,
            bucket: constants::DEFAULT_BUCKET.to_string(),
            upload_folder: constants::DEFAULT_UPLOAD_FOLDER.to_string(),
            max_upload_size_bytes: constants::DEFAULT_MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            allowed_content_types: constants::DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            output_format: "webp".to_string(),
            output_width: None,
        }
    }
}
