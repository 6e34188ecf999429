use std::fmt;
use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};

use crate::error::{RenderError, RenderResult};

/// Quality for lossy encodes. Visually lossless for photographic content.
pub const LOSSY_QUALITY: f32 = 90.0;

/// Output encodings the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    WebP,
    Png,
}

impl OutputFormat {
    pub fn parse(s: &str) -> RenderResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "webp" => Ok(OutputFormat::WebP),
            "png" => Ok(OutputFormat::Png),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_mime(mime: &str) -> RenderResult<Self> {
        match mime {
            "image/jpeg" | "image/jpg" => Ok(OutputFormat::Jpeg),
            "image/webp" => Ok(OutputFormat::WebP),
            "image/png" => Ok(OutputFormat::Png),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::WebP => "image/webp",
            OutputFormat::Png => "image/png",
        }
    }

    /// File extension, derived from the format and never from any
    /// user-supplied filename.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
            OutputFormat::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Jpeg => write!(f, "jpeg"),
            OutputFormat::WebP => write!(f, "webp"),
            OutputFormat::Png => write!(f, "png"),
        }
    }
}

/// A rendered, encoded asset ready for storage.
#[derive(Debug, Clone)]
pub struct OutputAsset {
    pub data: Bytes,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

impl OutputAsset {
    pub fn content_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Encode an image in the requested format.
pub fn encode(img: &DynamicImage, format: OutputFormat) -> RenderResult<Bytes> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(img),
        OutputFormat::WebP => encode_webp(img),
        OutputFormat::Png => encode_png(img),
    }
}

fn encode_jpeg(img: &DynamicImage) -> RenderResult<Bytes> {
    let rgb_img = img.to_rgb8();
    let (width, height) = rgb_img.dimensions();

    let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
    comp.set_size(width as usize, height as usize);
    comp.set_quality(LOSSY_QUALITY);
    comp.set_progressive_mode();
    comp.set_optimize_coding(true);

    let mut comp = comp
        .start_compress(Vec::new())
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    comp.write_scanlines(&rgb_img)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    let jpeg_data = comp
        .finish()
        .map_err(|e| RenderError::Encode(e.to_string()))?;

    Ok(Bytes::from(jpeg_data))
}

fn encode_webp(img: &DynamicImage) -> RenderResult<Bytes> {
    let (width, height) = (img.width(), img.height());
    let rgba_img = img.to_rgba8();

    let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
    let webp_data = encoder.encode(LOSSY_QUALITY);

    Ok(Bytes::copy_from_slice(&webp_data))
}

fn encode_png(img: &DynamicImage) -> RenderResult<Bytes> {
    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);

    img.write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))?;

    Ok(Bytes::from(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(OutputFormat::parse("jpg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("JPEG").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("webp").unwrap(), OutputFormat::WebP);
        assert_eq!(OutputFormat::parse("png").unwrap(), OutputFormat::Png);
        assert!(matches!(
            OutputFormat::parse("avif"),
            Err(RenderError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_from_mime() {
        assert_eq!(
            OutputFormat::from_mime("image/jpeg").unwrap(),
            OutputFormat::Jpeg
        );
        assert!(OutputFormat::from_mime("image/gif").is_err());
        assert!(OutputFormat::from_mime("text/html").is_err());
    }

    #[test]
    fn test_extension_never_from_filename() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::WebP.extension(), "webp");
        assert_eq!(OutputFormat::Png.extension(), "png");
    }

    #[test]
    fn test_encoded_formats_are_sniffable() {
        let img = gradient(32, 32);

        let jpeg = encode(&img, OutputFormat::Jpeg).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);

        let webp = encode(&img, OutputFormat::WebP).unwrap();
        assert_eq!(image::guess_format(&webp).unwrap(), ImageFormat::WebP);

        let png = encode(&img, OutputFormat::Png).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let img = gradient(16, 16);
        let png = encode(&img, OutputFormat::Png).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.to_rgb8().as_raw(), img.to_rgb8().as_raw());
    }
}
