//! Gradient band synthesis.
//!
//! Builds the translucent contrast band composited behind the overlay. The
//! source is a bundled directional gradient asset (transparent at its top
//! edge, opaque dark at its bottom edge) decoded exactly once per process
//! and shared read-only across calls; per call it is fill-resized to the
//! band dimensions, rotated so the dark edge faces the band, and optionally
//! color-inverted for light backgrounds.

use fast_image_resize::{FilterType, Image, PixelType, ResizeAlg, Resizer};
use image::{imageops, ImageFormat, RgbaImage};
use std::num::NonZeroU32;
use std::sync::OnceLock;

use crate::error::AquamarkError;
use crate::position::{Band, Dimensions};

static GRADIENT_ASSET: &[u8] = include_bytes!("../assets/gradient.png");

static GRADIENT_SOURCE: OnceLock<Result<RgbaImage, AquamarkError>> = OnceLock::new();

/// The shared gradient source image, decoded on first use.
///
/// The asset is compiled into the binary, so absence is impossible at
/// runtime; a decode failure here means the build shipped a corrupt asset
/// and is surfaced as a fatal error on every call.
fn gradient_source() -> Result<&'static RgbaImage, AquamarkError> {
    GRADIENT_SOURCE
        .get_or_init(|| {
            image::load_from_memory_with_format(GRADIENT_ASSET, ImageFormat::Png)
                .map(|img| img.to_rgba8())
                .map_err(|e| AquamarkError::AssetUnavailable {
                    message: e.to_string(),
                })
        })
        .as_ref()
        .map_err(|e| e.clone())
}

/// Rotation applied to the source so its dark edge faces the band.
///
/// The band is indexed into the four cardinal directions even though only
/// north and south are reachable through [`crate::options::Gravity::band`];
/// the geometry itself supports all four rotations.
fn rotation_degrees(band: Band) -> u32 {
    let index = match band {
        Band::North => 0,
        Band::South => 2,
    };
    (index * 90 + 180) % 360
}

/// Synthesize the gradient band for a background of the given size.
///
/// The band spans the full background width; its height is
/// `height_percent` of the background height, floored. A zero-area band
/// (unknown or zero background dimensions) is an error, never a silent
/// empty layer.
pub fn synthesize(
    background: Dimensions,
    height_percent: u8,
    light: bool,
    band: Band,
) -> Result<RgbaImage, AquamarkError> {
    let band_width = background.width;
    let band_height = (background.height as u64 * height_percent as u64 / 100) as u32;

    if band_width == 0 || band_height == 0 {
        return Err(AquamarkError::degenerate_size(
            "gradient band",
            band_width,
            band_height,
        ));
    }

    let source = gradient_source()?;
    let resized = fill_resize(source, band_width, band_height)?;

    let mut rotated = match rotation_degrees(band) {
        90 => imageops::rotate90(&resized),
        180 => imageops::rotate180(&resized),
        270 => imageops::rotate270(&resized),
        _ => resized,
    };

    if light {
        invert_colors(&mut rotated);
    }

    Ok(rotated)
}

/// Resize to exact dimensions, ignoring aspect ratio.
fn fill_resize(source: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage, AquamarkError> {
    let src_width = NonZeroU32::new(source.width())
        .ok_or_else(|| AquamarkError::degenerate_size("gradient source", 0, source.height()))?;
    let src_height = NonZeroU32::new(source.height())
        .ok_or_else(|| AquamarkError::degenerate_size("gradient source", source.width(), 0))?;
    let dst_width = NonZeroU32::new(width)
        .ok_or_else(|| AquamarkError::degenerate_size("gradient band", width, height))?;
    let dst_height = NonZeroU32::new(height)
        .ok_or_else(|| AquamarkError::degenerate_size("gradient band", width, height))?;

    let src = Image::from_vec_u8(
        src_width,
        src_height,
        source.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| AquamarkError::internal(format!("gradient resize setup: {:?}", e)))?;

    let mut dst = Image::new(dst_width, dst_height, PixelType::U8x4);

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));
    resizer
        .resize(&src.view(), &mut dst.view_mut())
        .map_err(|e| AquamarkError::internal(format!("gradient resize: {:?}", e)))?;

    RgbaImage::from_raw(width, height, dst.into_vec())
        .ok_or_else(|| AquamarkError::internal("gradient resize produced a bad buffer"))
}

/// Invert the color channels in place, leaving alpha untouched.
fn invert_colors(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        pixel[0] = 255 - pixel[0];
        pixel[1] = 255 - pixel[1];
        pixel[2] = 255 - pixel[2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_asset_decodes() {
        let source = gradient_source().unwrap();
        assert!(source.width() > 0);
        assert!(source.height() > 0);
    }

    #[test]
    fn test_source_is_vertical_alpha_ramp() {
        let source = gradient_source().unwrap();
        let x = source.width() / 2;
        let top = source.get_pixel(x, 0);
        let bottom = source.get_pixel(x, source.height() - 1);
        // Transparent at the top, opaque dark at the bottom.
        assert!(top[3] < 8);
        assert!(bottom[3] > 247);
    }

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(rotation_degrees(Band::North), 180);
        assert_eq!(rotation_degrees(Band::South), 0);
    }

    #[test]
    fn test_synthesize_dimensions() {
        // 30% of 800 = 240.
        let band = synthesize(Dimensions::new(1000, 800), 30, false, Band::South).unwrap();
        assert_eq!((band.width(), band.height()), (1000, 240));
    }

    #[test]
    fn test_synthesize_floors_band_height() {
        // 33% of 100 = 33.
        let band = synthesize(Dimensions::new(50, 100), 33, false, Band::South).unwrap();
        assert_eq!((band.width(), band.height()), (50, 33));
    }

    #[test]
    fn test_synthesize_zero_height_fails() {
        // 1% of 50 floors to 0.
        let err = synthesize(Dimensions::new(100, 50), 1, false, Band::South).unwrap_err();
        assert!(matches!(err, AquamarkError::DegenerateSize { .. }));
    }

    #[test]
    fn test_synthesize_zero_background_fails() {
        let err = synthesize(Dimensions::new(0, 0), 30, false, Band::South).unwrap_err();
        assert!(matches!(err, AquamarkError::DegenerateSize { .. }));
    }

    #[test]
    fn test_south_band_dark_edge_down() {
        let band = synthesize(Dimensions::new(200, 100), 50, false, Band::South).unwrap();
        let top = band.get_pixel(100, 0);
        let bottom = band.get_pixel(100, band.height() - 1);
        assert!(bottom[3] > top[3], "dark edge must face the bottom");
    }

    #[test]
    fn test_north_band_dark_edge_up() {
        let band = synthesize(Dimensions::new(200, 100), 50, false, Band::North).unwrap();
        let top = band.get_pixel(100, 0);
        let bottom = band.get_pixel(100, band.height() - 1);
        assert!(top[3] > bottom[3], "dark edge must face the top");
    }

    #[test]
    fn test_light_inverts_colors_not_alpha() {
        let dark = synthesize(Dimensions::new(100, 100), 50, false, Band::South).unwrap();
        let light = synthesize(Dimensions::new(100, 100), 50, true, Band::South).unwrap();
        assert_eq!(dark.dimensions(), light.dimensions());

        for (d, l) in dark.pixels().zip(light.pixels()) {
            assert_eq!(d[0], 255 - l[0]);
            assert_eq!(d[1], 255 - l[1]);
            assert_eq!(d[2], 255 - l[2]);
            assert_eq!(d[3], l[3], "alpha channel must be identical");
        }
    }

    #[test]
    fn test_invert_colors_direct() {
        let mut img = RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 40]));
        invert_colors(&mut img);
        assert_eq!(*img.get_pixel(0, 0), image::Rgba([245, 235, 225, 40]));
    }
}
