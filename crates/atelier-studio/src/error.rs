use thiserror::Error;

use atelier_core::ValidationError;
use atelier_processing::RenderError;
use atelier_storage::StorageError;

/// Errors surfaced by the capture session and upload coordinator.
///
/// Everything is reported synchronously to the immediate caller; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("A crop session is already active for this field")]
    SessionActive,

    #[error("No active crop session for this field")]
    NoSession,

    #[error("An upload is already in progress for this field")]
    Busy,
}

impl From<StorageError> for StudioError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unauthorized(msg) => StudioError::Unauthorized(msg),
            StorageError::QuotaExceeded(msg) => StudioError::QuotaExceeded(msg),
            other => StudioError::Upload(other.to_string()),
        }
    }
}

/// Result type for studio operations
pub type StudioResult<T> = Result<T, StudioError>;
