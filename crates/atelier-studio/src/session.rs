//! Capture session.
//!
//! A `CropSession` owns a decoded source image for the duration of one
//! crop interaction. The field boundary holds at most one session at a
//! time: no session means the field is closed, a held session is
//! previewing, and the field's busy flag marks the saving phase. The crop
//! window keeps the caller's target aspect ratio through every zoom and
//! rotation change.

use crate::error::{StudioError, StudioResult};
use atelier_processing::{
    decode_source, render_crop, CropRegion, Flip, OutputAsset, OutputFormat, RenderError,
    RotatedBounds, SourceImage,
};

/// An active crop interaction over one decoded source image.
pub struct CropSession {
    source: SourceImage,
    target_ratio: f64,
    zoom: f64,
    rotation: f64,
    flip: Flip,
    origin: (u32, u32),
}

impl CropSession {
    /// Decode `bytes` and open a session with a crop window of
    /// `target_ratio` (width / height), centered and as large as fits.
    pub fn open(bytes: &[u8], target_ratio: f64) -> StudioResult<Self> {
        if !target_ratio.is_finite() || target_ratio <= 0.0 {
            return Err(StudioError::Render(RenderError::InvalidRegion(format!(
                "Aspect ratio must be positive, got {target_ratio}"
            ))));
        }

        let source = decode_source(bytes)?;
        let mut session = CropSession {
            source,
            target_ratio,
            zoom: 1.0,
            rotation: 0.0,
            flip: Flip::none(),
            origin: (0, 0),
        };
        session.center_window();
        Ok(session)
    }

    /// Safe-area bounds under the current zoom and rotation.
    pub fn safe_bounds(&self) -> RotatedBounds {
        let w = (self.source.width() as f64 * self.zoom).round().max(1.0) as u32;
        let h = (self.source.height() as f64 * self.zoom).round().max(1.0) as u32;
        RotatedBounds::for_rotation(w, h, self.rotation)
    }

    /// Largest window of the target ratio that fits the safe area.
    fn fitted_window(&self) -> (u32, u32) {
        let bounds = self.safe_bounds();
        let bw = bounds.width as f64;
        let bh = bounds.height as f64;

        let (w, h) = if bw / bh > self.target_ratio {
            (bh * self.target_ratio, bh)
        } else {
            (bw, bw / self.target_ratio)
        };
        (w.floor().max(1.0) as u32, h.floor().max(1.0) as u32)
    }

    fn center_window(&mut self) {
        let bounds = self.safe_bounds();
        let (w, h) = self.fitted_window();
        self.origin = ((bounds.width - w) / 2, (bounds.height - h) / 2);
    }

    /// The crop region as it currently stands.
    pub fn region(&self) -> CropRegion {
        let (w, h) = self.fitted_window();
        CropRegion::new(self.origin.0, self.origin.1, w, h)
            .with_zoom(self.zoom)
            .with_rotation(self.rotation)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn flip(&self) -> Flip {
        self.flip
    }

    /// Set the zoom factor. The window re-centers because the safe area
    /// changed size underneath it.
    pub fn set_zoom(&mut self, zoom: f64) -> StudioResult<()> {
        if !zoom.is_finite() || zoom < 1.0 {
            return Err(StudioError::Render(RenderError::InvalidRegion(format!(
                "Zoom must be at least 1.0, got {zoom}"
            ))));
        }
        self.zoom = zoom;
        self.center_window();
        Ok(())
    }

    /// Set an absolute rotation in degrees, wrapped to `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: f64) -> StudioResult<()> {
        if !degrees.is_finite() {
            return Err(StudioError::Render(RenderError::InvalidRegion(
                "Rotation must be finite".to_string(),
            )));
        }
        self.rotation = atelier_processing::normalize_rotation(degrees);
        self.center_window();
        Ok(())
    }

    /// Advance rotation by 90 degrees.
    pub fn rotate_quarter_turn(&mut self) {
        self.rotation = atelier_processing::normalize_rotation(self.rotation + 90.0);
        self.center_window();
    }

    pub fn set_flip(&mut self, flip: Flip) {
        self.flip = flip;
    }

    /// Move the crop window's top-left corner in safe-area coordinates.
    ///
    /// The origin is accepted as-is; a window pushed past the safe area
    /// fails at render time rather than being silently clamped.
    pub fn set_crop_origin(&mut self, x: u32, y: u32) {
        self.origin = (x, y);
    }

    /// Render the current state at full fidelity. Same engine as the final
    /// render, so what the caller previews is what gets stored.
    pub fn preview(
        &self,
        output_width: Option<u32>,
        format: OutputFormat,
    ) -> StudioResult<OutputAsset> {
        let asset = render_crop(&self.source, &self.region(), self.flip, output_width, format)?;
        Ok(asset)
    }

    /// Render the final asset and close the session.
    pub fn confirm(
        self,
        output_width: Option<u32>,
        format: OutputFormat,
    ) -> StudioResult<OutputAsset> {
        let asset = render_crop(&self.source, &self.region(), self.flip, output_width, format)?;

        tracing::debug!(
            width = asset.width,
            height = asset.height,
            format = %format,
            "Crop session confirmed"
        );

        Ok(asset)
    }

    /// Discard the session without emitting an asset.
    pub fn cancel(self) {}
}
