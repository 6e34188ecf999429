use image::DynamicImage;

use crate::error::{RenderError, RenderResult};

/// A decoded source image ready for the raster pipeline.
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    pub fn from_dynamic(image: DynamicImage) -> Self {
        SourceImage { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    pub(crate) fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

/// Decode uploaded bytes into a source image.
///
/// Format is sniffed from the bytes, never from a filename. Anything the
/// decoder rejects surfaces as `RenderError::Decode` before any further
/// work happens.
pub fn decode_source(data: &[u8]) -> RenderResult<SourceImage> {
    let image = image::load_from_memory(data).map_err(|e| RenderError::Decode(e.to_string()))?;

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        "Decoded source image"
    );

    Ok(SourceImage::from_dynamic(image))
}
