//! Final-composite encoding.
//!
//! The pipeline always emits PNG: it is lossless-capable, keeps the
//! overlay's alpha intact, and its `quality` knob maps to compression
//! effort rather than visual degradation. Pixel content is identical at
//! every quality; only the byte size and encode time vary.

use image::codecs::png::{CompressionType, FilterType, PngEncoder as ImagePngEncoder};
use image::{ImageEncoder as _, RgbaImage};
use std::io::Cursor;

use crate::error::AquamarkError;

/// The single deterministic output format of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
}

impl OutputFormat {
    /// Lowercase format name, usable to derive a content type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
        }
    }
}

/// Map the 1-100 quality knob onto PNG compression effort.
///
/// Low quality favors encode speed, high quality favors smaller output.
fn compression_for(quality: u8) -> CompressionType {
    match quality {
        0..=40 => CompressionType::Fast,
        41..=85 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encode the composed canvas as PNG.
pub fn encode_png(canvas: &RgbaImage, quality: u8) -> Result<Vec<u8>, AquamarkError> {
    let mut output = Cursor::new(Vec::new());
    let encoder = ImagePngEncoder::new_with_quality(
        &mut output,
        compression_for(quality),
        FilterType::Adaptive,
    );

    encoder
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            image::ColorType::Rgba8,
        )
        .map_err(|e| AquamarkError::encode_failure(e.to_string()))?;

    Ok(output.into_inner())
}
