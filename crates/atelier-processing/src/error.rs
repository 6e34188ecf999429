use thiserror::Error;

/// Raster pipeline errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Invalid crop region: {0}")]
    InvalidRegion(String),

    #[error(
        "Crop region {x},{y} {width}x{height} exceeds rotated bounds {bounds_width}x{bounds_height}"
    )]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        bounds_width: u32,
        bounds_height: u32,
    },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;
