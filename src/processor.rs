//! End-to-end watermarking pipeline.
//!
//! Decodes background and overlay, resolves the overlay anchor and
//! gradient band, synthesizes the gradient (if enabled), scales the
//! overlay, composes the layers, and encodes the result. Each call is a
//! self-contained unit of work
//! with no cross-call state; the only shared resource is the read-only
//! gradient asset.

use bytes::Bytes;
use image::io::Reader as ImageReader;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

use crate::compositor::compose;
use crate::encoder::{encode_png, OutputFormat};
use crate::error::{AquamarkError, ImageInput};
use crate::gradient::synthesize;
use crate::options::{GradientConfig, WatermarkOptions};
use crate::position::Dimensions;
use crate::scaler::scale_to_fit;

/// Result of a watermarking call: one encoded image buffer plus its format.
#[derive(Debug, Clone)]
pub struct WatermarkedImage {
    /// The encoded image data.
    pub data: Vec<u8>,
    /// The output format (always PNG).
    pub format: OutputFormat,
    /// Content-Type header value for the service layer.
    pub content_type: &'static str,
}

/// Composite the overlay (and optional gradient band) onto the background.
///
/// Inputs are raw image bytes in any format the decoder understands plus a
/// validated options record; ranges are trusted, not re-checked. On any
/// failure the whole call fails; no partial image is ever returned.
pub fn watermark(
    background: &[u8],
    overlay: &[u8],
    options: &WatermarkOptions,
) -> Result<WatermarkedImage, AquamarkError> {
    let background_image = decode_image(background, ImageInput::Background)?;
    let overlay_image = decode_image(overlay, ImageInput::Overlay)?;

    let canvas_dims = usable_dimensions(&background_image, ImageInput::Background)?;
    usable_dimensions(&overlay_image, ImageInput::Overlay)?;

    let band = options.gravity.band();

    let gradient = match options.gradient {
        GradientConfig::Disabled => None,
        GradientConfig::Enabled {
            height_percent,
            light,
        } => {
            let band_image = synthesize(canvas_dims, height_percent, light, band)?;
            debug!(
                band = ?band,
                width = band_image.width(),
                height = band_image.height(),
                light,
                "synthesized gradient band"
            );
            Some((band_image, band))
        }
    };

    let scaled_overlay = scale_to_fit(
        &overlay_image,
        canvas_dims,
        options.overlay_width_percent,
        options.overlay_height_percent,
    )?;
    debug!(
        width = scaled_overlay.width(),
        height = scaled_overlay.height(),
        gravity = options.gravity.as_str(),
        "scaled overlay"
    );

    let canvas = compose(
        background_image.to_rgba8(),
        gradient,
        scaled_overlay,
        options.gravity,
    );

    let data = encode_png(&canvas, options.quality)?;
    debug!(bytes = data.len(), quality = options.quality, "encoded composite");

    Ok(WatermarkedImage {
        data,
        format: OutputFormat::Png,
        content_type: OutputFormat::Png.content_type(),
    })
}

/// Async wrapper for the CPU-bound pipeline.
///
/// Runs the composition on the blocking pool so an async host can await it
/// per call. Abandoning the future simply discards the in-progress result;
/// there is no shared mutable state to corrupt.
pub async fn watermark_async(
    background: Bytes,
    overlay: Bytes,
    options: WatermarkOptions,
) -> Result<WatermarkedImage, AquamarkError> {
    tokio::task::spawn_blocking(move || watermark(&background, &overlay, &options))
        .await
        .map_err(|e| AquamarkError::internal(format!("watermark task failed: {}", e)))?
}

fn decode_image(data: &[u8], input: ImageInput) -> Result<DynamicImage, AquamarkError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| AquamarkError::decode_failure(input, e.to_string()))?
        .decode()
        .map_err(|e| AquamarkError::decode_failure(input, e.to_string()))
}

fn usable_dimensions(
    image: &DynamicImage,
    input: ImageInput,
) -> Result<Dimensions, AquamarkError> {
    let dims = Dimensions::new(image.width(), image.height());
    if dims.width == 0 || dims.height == 0 {
        return Err(AquamarkError::DimensionUnavailable { input });
    }
    Ok(dims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Gravity;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, color);
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, image::ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn default_options() -> WatermarkOptions {
        WatermarkOptions {
            gravity: Gravity::SouthEast,
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_image_valid() {
        let data = png_bytes(4, 4, Rgba([255, 0, 0, 255]));
        let img = decode_image(&data, ImageInput::Background).unwrap();
        assert_eq!((img.width(), img.height()), (4, 4));
    }

    #[test]
    fn test_decode_image_garbage_fails() {
        let err = decode_image(&[0, 1, 2, 3, 4, 5], ImageInput::Overlay).unwrap_err();
        assert!(matches!(
            err,
            AquamarkError::DecodeFailure {
                input: ImageInput::Overlay,
                ..
            }
        ));
    }

    #[test]
    fn test_watermark_basic() {
        let background = png_bytes(200, 200, Rgba([255, 255, 255, 255]));
        let overlay = png_bytes(400, 400, Rgba([255, 0, 0, 255]));

        let result = watermark(&background, &overlay, &default_options()).unwrap();
        assert_eq!(result.format, OutputFormat::Png);
        assert_eq!(result.content_type, "image/png");
        assert_eq!(&result.data[0..4], &[0x89, 0x50, 0x4E, 0x47]);

        // Output canvas keeps the background dimensions.
        let decoded = image::load_from_memory(&result.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 200));
    }

    #[test]
    fn test_watermark_overlay_at_southeast() {
        let background = png_bytes(200, 200, Rgba([255, 255, 255, 255]));
        let overlay = png_bytes(400, 400, Rgba([255, 0, 0, 255]));

        let result = watermark(&background, &overlay, &default_options()).unwrap();
        let decoded = image::load_from_memory(&result.data).unwrap().to_rgba8();

        // Overlay box is 40x40, pinned to the bottom-right corner.
        assert_eq!(*decoded.get_pixel(199, 199), Rgba([255, 0, 0, 255]));
        assert_eq!(*decoded.get_pixel(100, 100), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_watermark_bad_background_is_decode_failure() {
        let overlay = png_bytes(10, 10, Rgba([0, 0, 0, 255]));
        let err = watermark(b"not an image", &overlay, &default_options()).unwrap_err();
        assert!(matches!(
            err,
            AquamarkError::DecodeFailure {
                input: ImageInput::Background,
                ..
            }
        ));
    }

    #[test]
    fn test_watermark_bad_overlay_is_decode_failure() {
        let background = png_bytes(10, 10, Rgba([0, 0, 0, 255]));
        let err = watermark(&background, b"junk", &default_options()).unwrap_err();
        assert!(matches!(
            err,
            AquamarkError::DecodeFailure {
                input: ImageInput::Overlay,
                ..
            }
        ));
    }

    #[test]
    fn test_watermark_with_gradient() {
        let background = png_bytes(100, 100, Rgba([200, 200, 200, 255]));
        let overlay = png_bytes(50, 50, Rgba([255, 0, 0, 255]));
        let options = WatermarkOptions {
            gravity: Gravity::South,
            gradient: GradientConfig::enabled(),
            ..Default::default()
        };

        let result = watermark(&background, &overlay, &options).unwrap();
        let decoded = image::load_from_memory(&result.data).unwrap().to_rgba8();

        // South band darkens the bottom edge away from the overlay.
        let bottom_left = decoded.get_pixel(2, 98);
        let top_left = decoded.get_pixel(2, 2);
        assert!(bottom_left[0] < top_left[0]);
    }

    #[test]
    fn test_jpeg_input_accepted() {
        let img = RgbaImage::from_pixel(32, 32, Rgba([0, 128, 255, 255]));
        let mut buffer = Cursor::new(Vec::new());
        // JPEG has no alpha channel; encode from RGB.
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8())
            .write_to(&mut buffer, image::ImageFormat::Jpeg)
            .unwrap();
        let background = buffer.into_inner();
        let overlay = png_bytes(16, 16, Rgba([255, 0, 0, 255]));

        let result = watermark(&background, &overlay, &default_options()).unwrap();
        // Output is PNG regardless of the input formats.
        assert_eq!(result.format.as_str(), "png");
    }

    #[tokio::test]
    async fn test_watermark_async_matches_sync() {
        let background = png_bytes(64, 64, Rgba([255, 255, 255, 255]));
        let overlay = png_bytes(32, 32, Rgba([255, 0, 0, 255]));
        let options = default_options();

        let sync_result = watermark(&background, &overlay, &options).unwrap();
        let async_result = watermark_async(
            Bytes::from(background),
            Bytes::from(overlay),
            options,
        )
        .await
        .unwrap();

        assert_eq!(sync_result.data, async_result.data);
    }
}
