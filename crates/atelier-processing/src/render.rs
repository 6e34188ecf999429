//! Crop rendering.
//!
//! Applies a crop region to a decoded source image in a fixed order: zoom
//! scale, rotation into the safe area, mirroring, window extraction,
//! optional output resample, encode. The same inputs always produce
//! byte-identical output.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{rotate, Interpolation};

use crate::decode::SourceImage;
use crate::encode::{encode, OutputAsset, OutputFormat};
use crate::error::RenderResult;
use crate::geometry::{normalize_rotation, CropRegion, Flip, RotatedBounds};

const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// Render a crop region of a source image into an encoded asset.
///
/// `output_width` resamples the cropped window to that width, preserving
/// the region's aspect ratio. `None` keeps the window at its native size.
pub fn render_crop(
    source: &SourceImage,
    region: &CropRegion,
    flip: Flip,
    output_width: Option<u32>,
    format: OutputFormat,
) -> RenderResult<OutputAsset> {
    region.validate(source.width(), source.height())?;

    let start = std::time::Instant::now();
    let img = source.as_dynamic();

    let scaled = if (region.zoom - 1.0).abs() > f64::EPSILON {
        let (w, h) = region.scaled_dimensions(img.width(), img.height());
        img.resize_exact(w, h, RESAMPLE_FILTER)
    } else {
        img.clone()
    };

    let rotation = normalize_rotation(region.rotation);
    let canvas = if rotation == 0.0 {
        scaled
    } else if rotation == 90.0 {
        scaled.rotate90()
    } else if rotation == 180.0 {
        scaled.rotate180()
    } else if rotation == 270.0 {
        scaled.rotate270()
    } else {
        rotate_into_safe_area(&scaled, rotation)
    };

    let canvas = if flip.horizontal { canvas.fliph() } else { canvas };
    let canvas = if flip.vertical { canvas.flipv() } else { canvas };

    let cropped = canvas.crop_imm(region.x, region.y, region.width, region.height);

    let out = match output_width {
        Some(w) if w != cropped.width() => {
            let h = (w as f64 * region.height as f64 / region.width as f64)
                .round()
                .max(1.0) as u32;
            cropped.resize_exact(w, h, RESAMPLE_FILTER)
        }
        _ => cropped,
    };

    let (width, height) = (out.width(), out.height());
    let data = encode(&out, format)?;

    tracing::debug!(
        source_width = source.width(),
        source_height = source.height(),
        output_width = width,
        output_height = height,
        format = %format,
        size_bytes = data.len(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Rendered crop"
    );

    Ok(OutputAsset {
        data,
        format,
        width,
        height,
    })
}

/// Rotate an image by an arbitrary angle onto a canvas the size of its
/// rotated bounding box, with transparent fill in the corners.
///
/// The image rotates in place inside a scratch canvas large enough to hold
/// both the original and the rotated extents, so no source pixel is clipped
/// before rotation. The centered safe-area window is then cut out.
fn rotate_into_safe_area(img: &DynamicImage, degrees: f64) -> DynamicImage {
    let bounds = RotatedBounds::for_rotation(img.width(), img.height(), degrees);
    let scratch_w = bounds.width.max(img.width());
    let scratch_h = bounds.height.max(img.height());

    let transparent = Rgba([0u8, 0, 0, 0]);
    let mut scratch = RgbaImage::from_pixel(scratch_w, scratch_h, transparent);
    image::imageops::overlay(
        &mut scratch,
        &img.to_rgba8(),
        ((scratch_w - img.width()) / 2) as i64,
        ((scratch_h - img.height()) / 2) as i64,
    );

    let rotated = rotate(
        &scratch,
        (scratch_w as f32 / 2.0, scratch_h as f32 / 2.0),
        degrees.to_radians() as f32,
        Interpolation::Bilinear,
        transparent,
    );

    DynamicImage::ImageRgba8(rotated).crop_imm(
        (scratch_w - bounds.width) / 2,
        (scratch_h - bounds.height) / 2,
        bounds.width,
        bounds.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_source;
    use crate::error::RenderError;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn gradient_source(width: u32, height: u32) -> SourceImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
        });
        SourceImage::from_dynamic(DynamicImage::ImageRgb8(img))
    }

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_square_region_to_webp_thumbnail() {
        // 1000x1000 source, 500x500 window at the origin, resampled to 250.
        let source = gradient_source(1000, 1000);
        let region = CropRegion::new(0, 0, 500, 500);

        let asset =
            render_crop(&source, &region, Flip::none(), Some(250), OutputFormat::WebP).unwrap();

        assert_eq!((asset.width, asset.height), (250, 250));
        assert_eq!(asset.content_type(), "image/webp");
        assert_eq!(
            image::guess_format(&asset.data).unwrap(),
            ImageFormat::WebP
        );
    }

    #[test]
    fn test_centered_region_valid_after_quarter_turn() {
        // 800x600 source turned 90 degrees gives a 600x800 safe area; a
        // centered 400x400 window fits.
        let source = gradient_source(800, 600);
        let region = CropRegion::new(100, 200, 400, 400).with_rotation(90.0);

        let asset =
            render_crop(&source, &region, Flip::none(), None, OutputFormat::Png).unwrap();
        assert_eq!((asset.width, asset.height), (400, 400));
    }

    #[test]
    fn test_identical_inputs_produce_identical_bytes() {
        let source = gradient_source(320, 240);
        let region = CropRegion::new(10, 20, 200, 150)
            .with_zoom(1.5)
            .with_rotation(30.0);
        let flip = Flip {
            horizontal: true,
            vertical: false,
        };

        let a = render_crop(&source, &region, flip, Some(100), OutputFormat::WebP).unwrap();
        let b = render_crop(&source, &region, flip, Some(100), OutputFormat::WebP).unwrap();
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn test_output_preserves_region_aspect_ratio() {
        let source = gradient_source(1280, 720);
        let cases = [
            (300u32, 300u32), // 1:1
            (400, 300),       // 4:3
            (640, 360),       // 16:9
        ];

        for (w, h) in cases {
            let region = CropRegion::new(0, 0, w, h);
            let asset =
                render_crop(&source, &region, Flip::none(), Some(120), OutputFormat::Png)
                    .unwrap();

            let want = w as f64 / h as f64;
            let got = asset.width as f64 / asset.height as f64;
            assert!(
                (got - want).abs() / want < 0.01,
                "aspect drifted for {w}x{h}: want {want}, got {got}"
            );
        }
    }

    #[test]
    fn test_zero_area_region_rejected() {
        let source = gradient_source(100, 100);
        let region = CropRegion::new(0, 0, 100, 0);
        let result = render_crop(&source, &region, Flip::none(), None, OutputFormat::Png);
        assert!(matches!(result, Err(RenderError::InvalidRegion(_))));
    }

    #[test]
    fn test_out_of_bounds_region_rejected_not_clamped() {
        let source = gradient_source(100, 100);
        let region = CropRegion::new(60, 60, 50, 50);
        let result = render_crop(&source, &region, Flip::none(), None, OutputFormat::Png);
        assert!(matches!(
            result,
            Err(RenderError::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_horizontal_flip_mirrors_pixels() {
        // Left half red, right half blue. After a horizontal flip the left
        // edge of the full-frame crop must be blue.
        let img = RgbImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        });
        let source = SourceImage::from_dynamic(DynamicImage::ImageRgb8(img));
        let region = CropRegion::new(0, 0, 8, 4);
        let flip = Flip {
            horizontal: true,
            vertical: false,
        };

        let asset = render_crop(&source, &region, flip, None, OutputFormat::Png).unwrap();
        let decoded = image::load_from_memory(&asset.data).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(0, 0), &image::Rgb([0, 0, 255]));
        assert_eq!(decoded.get_pixel(7, 0), &image::Rgb([255, 0, 0]));
    }

    #[test]
    fn test_zoom_expands_addressable_area() {
        // At zoom 2 a 1000x1000 window fits a 600x400 source.
        let source = gradient_source(600, 400);
        let region = CropRegion::new(100, 0, 1000, 700).with_zoom(2.0);

        let asset =
            render_crop(&source, &region, Flip::none(), Some(200), OutputFormat::Jpeg).unwrap();
        assert_eq!(asset.width, 200);
        assert_eq!(asset.height, 140);
    }

    #[test]
    fn test_render_from_decoded_bytes() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, image::Rgb([40, 80, 120])));
        let source = decode_source(&png_bytes(&img)).unwrap();
        let region = CropRegion::new(16, 16, 32, 32);

        let asset =
            render_crop(&source, &region, Flip::none(), None, OutputFormat::Jpeg).unwrap();
        assert_eq!((asset.width, asset.height), (32, 32));
        assert_eq!(
            image::guess_format(&asset.data).unwrap(),
            ImageFormat::Jpeg
        );
    }
}
