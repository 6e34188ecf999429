//! Image form-field boundary.
//!
//! An `ImageField` stands in for one image-bearing column on a studio
//! form. It holds the current public URL, guards against double submits
//! with a busy flag, and owns at most one crop session. Fields are fully
//! independent of each other.

use crate::error::{StudioError, StudioResult};
use crate::session::CropSession;
use crate::uploader::Uploader;
use atelier_core::MediaValidator;
use atelier_processing::OutputFormat;

/// One image slot on a form.
pub struct ImageField {
    name: String,
    value: Option<String>,
    busy: bool,
    session: Option<CropSession>,
}

impl ImageField {
    pub fn new(name: impl Into<String>) -> Self {
        ImageField {
            name: name.into(),
            value: None,
            busy: false,
            session: None,
        }
    }

    /// Field with an existing stored URL, as when editing a saved row.
    pub fn with_value(name: impl Into<String>, value: String) -> Self {
        ImageField {
            name: name.into(),
            value: Some(value),
            busy: false,
            session: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current public URL, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Validate an incoming file and open a crop session over it.
    ///
    /// The allowlist and size ceiling run before any decode work. A field
    /// holds one session at a time; attach while one is open is an error.
    pub fn attach(
        &mut self,
        bytes: &[u8],
        content_type: &str,
        target_ratio: f64,
        validator: &MediaValidator,
    ) -> StudioResult<&mut CropSession> {
        if self.session.is_some() {
            return Err(StudioError::SessionActive);
        }

        validator.validate_all(content_type, bytes.len())?;

        let session = CropSession::open(bytes, target_ratio)?;
        tracing::debug!(field = %self.name, content_type, "Crop session opened");

        Ok(self.session.insert(session))
    }

    /// Access the open session for adjustments.
    pub fn session_mut(&mut self) -> StudioResult<&mut CropSession> {
        self.session.as_mut().ok_or(StudioError::NoSession)
    }

    /// Discard the open session, leaving the value untouched.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel();
        }
    }

    /// Confirm the session, upload the rendered asset and store its public
    /// URL as the field value.
    ///
    /// The exclusive borrow already rules out two saves polling at once;
    /// the busy flag covers the abandonment case. A save future dropped
    /// mid-flight leaves the field busy, since the upload may or may not
    /// have reached storage and a retry could double-store the asset.
    /// Any failure leaves the previous value untouched.
    pub async fn save(
        &mut self,
        uploader: &Uploader,
        folder: &str,
        output_width: Option<u32>,
        format: OutputFormat,
    ) -> StudioResult<String> {
        if self.busy {
            return Err(StudioError::Busy);
        }
        let session = self.session.take().ok_or(StudioError::NoSession)?;

        self.busy = true;
        let result = async {
            let asset = session.confirm(output_width, format)?;
            let stored = uploader.upload(&asset, folder).await?;
            Ok(stored.public_url)
        }
        .await;
        self.busy = false;

        match result {
            Ok(url) => {
                tracing::info!(field = %self.name, url = %url, "Field value updated");
                self.value = Some(url.clone());
                Ok(url)
            }
            Err(e) => {
                tracing::warn!(field = %self.name, error = %e, "Field save failed");
                Err(e)
            }
        }
    }

    /// Reset the field to empty.
    pub fn clear(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_empty_and_idle() {
        let field = ImageField::new("thumbnail_image");
        assert_eq!(field.value(), None);
        assert!(!field.is_busy());
        assert!(!field.has_session());
    }

    #[test]
    fn test_clear_resets_value() {
        let mut field =
            ImageField::with_value("logo", "http://localhost:3000/media/a.webp".to_string());
        assert!(field.value().is_some());
        field.clear();
        assert_eq!(field.value(), None);
    }

    #[test]
    fn test_session_mut_without_session() {
        let mut field = ImageField::new("banner_image");
        assert!(matches!(field.session_mut(), Err(StudioError::NoSession)));
    }
}
