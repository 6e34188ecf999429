//! Crop geometry.
//!
//! All crop coordinates are expressed in the "safe area": the axis-aligned
//! bounding box of the source image after zoom and rotation have been
//! applied. Rotating never clips pixels; the safe area grows instead, and
//! the crop window addresses that grown canvas.

use crate::error::{RenderError, RenderResult};

/// Normalize a rotation in degrees to `[0, 360)`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    let r = degrees % 360.0;
    if r < 0.0 {
        r + 360.0
    } else {
        r
    }
}

/// Axis-aligned bounding box of a rotated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatedBounds {
    pub width: u32,
    pub height: u32,
}

impl RotatedBounds {
    /// Bounding box of a `width` x `height` image rotated by `degrees`
    /// around its center.
    ///
    /// `w' = |w cos t| + |h sin t|`, `h' = |w sin t| + |h cos t|`, rounded
    /// to the nearest pixel. Exact at quarter turns.
    pub fn for_rotation(width: u32, height: u32, degrees: f64) -> Self {
        let theta = normalize_rotation(degrees).to_radians();
        let (sin, cos) = theta.sin_cos();
        let w = width as f64;
        let h = height as f64;

        let bound_w = (w * cos).abs() + (h * sin).abs();
        let bound_h = (w * sin).abs() + (h * cos).abs();

        RotatedBounds {
            width: bound_w.round().max(1.0) as u32,
            height: bound_h.round().max(1.0) as u32,
        }
    }
}

/// Mirroring applied after rotation, in safe-area space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Flip {
    pub fn none() -> Self {
        Self::default()
    }
}

/// A crop request against a source image.
///
/// `x`, `y`, `width` and `height` address the safe area produced by first
/// scaling the source by `zoom`, then rotating it by `rotation` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub zoom: f64,
    pub rotation: f64,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        CropRegion {
            x,
            y,
            width,
            height,
            zoom: 1.0,
            rotation: 0.0,
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Dimensions of the source after the zoom scale is applied.
    pub fn scaled_dimensions(&self, source_width: u32, source_height: u32) -> (u32, u32) {
        let w = (source_width as f64 * self.zoom).round().max(1.0) as u32;
        let h = (source_height as f64 * self.zoom).round().max(1.0) as u32;
        (w, h)
    }

    /// Safe-area bounds for this region against a source of the given size.
    pub fn rotated_bounds(&self, source_width: u32, source_height: u32) -> RotatedBounds {
        let (w, h) = self.scaled_dimensions(source_width, source_height);
        RotatedBounds::for_rotation(w, h, self.rotation)
    }

    /// Check the region against a source image.
    ///
    /// A region that extends past the safe area is rejected, not clamped;
    /// clamping would silently change the aspect ratio the caller selected.
    pub fn validate(&self, source_width: u32, source_height: u32) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidRegion(format!(
                "Region must have positive area, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.zoom.is_finite() || self.zoom < 1.0 {
            return Err(RenderError::InvalidRegion(format!(
                "Zoom must be at least 1.0, got {}",
                self.zoom
            )));
        }
        if !self.rotation.is_finite() {
            return Err(RenderError::InvalidRegion(
                "Rotation must be finite".to_string(),
            ));
        }

        let bounds = self.rotated_bounds(source_width, source_height);
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        let in_bounds = matches!((right, bottom), (Some(r), Some(b))
            if r <= bounds.width && b <= bounds.height);

        if !in_bounds {
            return Err(RenderError::RegionOutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                bounds_width: bounds.width,
                bounds_height: bounds.height,
            });
        }

        Ok(())
    }
}
