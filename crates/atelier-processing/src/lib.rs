//! Raster pipeline: decode, crop geometry, rendering and encoding.

pub mod decode;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod render;

pub use decode::{decode_source, SourceImage};
pub use encode::{OutputAsset, OutputFormat, LOSSY_QUALITY};
pub use error::{RenderError, RenderResult};
pub use geometry::{normalize_rotation, CropRegion, Flip, RotatedBounds};
pub use render::render_crop;
