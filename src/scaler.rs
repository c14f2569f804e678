//! Proportional overlay scaling.
//!
//! The overlay is scaled down to fit inside a target box expressed as
//! percentages of the background dimensions. Aspect ratio is preserved and
//! the overlay is never enlarged; when it already fits, it is passed
//! through untouched.

use image::{imageops::FilterType, DynamicImage, RgbaImage};

use crate::error::{AquamarkError, ImageInput};
use crate::position::Dimensions;

/// Compute the overlay target box from background dimensions and percents.
///
/// Fails with a degenerate-size error when either side resolves to zero
/// pixels (including the upstream-decode-failure case where the background
/// reports 0x0), rather than letting a zero-area layer through silently.
pub fn target_box(
    background: Dimensions,
    width_percent: u8,
    height_percent: u8,
) -> Result<Dimensions, AquamarkError> {
    let width = (background.width as u64 * width_percent as u64 / 100) as u32;
    let height = (background.height as u64 * height_percent as u64 / 100) as u32;

    if width == 0 || height == 0 {
        return Err(AquamarkError::degenerate_size("overlay box", width, height));
    }

    Ok(Dimensions::new(width, height))
}

/// Scale the overlay to fit inside the target box, preserving aspect ratio.
///
/// The result never exceeds the box in either dimension and, whenever any
/// scaling happens, matches the box exactly in at least one of them. An
/// overlay already inside the box is returned as-is (downscale only).
pub fn scale_to_fit(
    overlay: &DynamicImage,
    background: Dimensions,
    width_percent: u8,
    height_percent: u8,
) -> Result<RgbaImage, AquamarkError> {
    let box_dims = target_box(background, width_percent, height_percent)?;

    let src_w = overlay.width();
    let src_h = overlay.height();
    if src_w == 0 || src_h == 0 {
        return Err(AquamarkError::DimensionUnavailable {
            input: ImageInput::Overlay,
        });
    }

    let ratio = (box_dims.width as f64 / src_w as f64)
        .min(box_dims.height as f64 / src_h as f64);

    if ratio >= 1.0 {
        // Already fits; never enlarge.
        return Ok(overlay.to_rgba8());
    }

    let target_w = ((src_w as f64 * ratio).round() as u32).max(1);
    let target_h = ((src_h as f64 * ratio).round() as u32).max(1);

    let resized = overlay.resize_exact(target_w, target_h, FilterType::Lanczos3);
    Ok(resized.to_rgba8())
}
