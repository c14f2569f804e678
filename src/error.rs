//! Watermarking error types.
//!
//! Every failure aborts the whole composition: no partial image is ever
//! returned. The `to_http_status` mapping is provided for the surrounding
//! service layer; the library itself never speaks HTTP.

use std::fmt;

/// Errors that can occur while composing a watermarked image.
#[derive(Debug, Clone)]
pub enum AquamarkError {
    /// Background or overlay bytes could not be parsed as an image.
    DecodeFailure { input: ImageInput, message: String },

    /// A decoded image has no usable width/height, so percentage-based
    /// sizing cannot proceed.
    DimensionUnavailable { input: ImageInput },

    /// A computed target dimension resolved to zero pixels.
    DegenerateSize {
        what: &'static str,
        width: u32,
        height: u32,
    },

    /// The final composite could not be serialized.
    EncodeFailure { message: String },

    /// An option field failed validation before reaching the core.
    InvalidOption { field: &'static str, message: String },

    /// The bundled gradient asset could not be decoded. This is a build
    /// defect, not a per-call condition.
    AssetUnavailable { message: String },

    /// Unexpected internal failure (resampler buffer plumbing and the like).
    Internal { message: String },
}

/// Which of the two input images an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageInput {
    Background,
    Overlay,
}

impl ImageInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Overlay => "overlay",
        }
    }
}

impl fmt::Display for AquamarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeFailure { input, message } => {
                write!(f, "Failed to decode {} image: {}", input.as_str(), message)
            }
            Self::DimensionUnavailable { input } => {
                write!(f, "No usable dimensions for {} image", input.as_str())
            }
            Self::DegenerateSize {
                what,
                width,
                height,
            } => {
                write!(f, "Computed {} size {}x{} is degenerate", what, width, height)
            }
            Self::EncodeFailure { message } => {
                write!(f, "Failed to encode composite image: {}", message)
            }
            Self::InvalidOption { field, message } => {
                write!(f, "Invalid option '{}': {}", field, message)
            }
            Self::AssetUnavailable { message } => {
                write!(f, "Gradient asset unavailable: {}", message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for AquamarkError {}

impl AquamarkError {
    /// Maps composition errors to HTTP status codes for the service layer.
    ///
    /// DecodeFailure and InvalidOption are 400; DimensionUnavailable and
    /// DegenerateSize are 422; everything else is 500.
    pub fn to_http_status(&self) -> u16 {
        match self {
            Self::DecodeFailure { .. } | Self::InvalidOption { .. } => 400,
            Self::DimensionUnavailable { .. } | Self::DegenerateSize { .. } => 422,
            Self::EncodeFailure { .. } | Self::AssetUnavailable { .. } | Self::Internal { .. } => {
                500
            }
        }
    }

    pub fn decode_failure(input: ImageInput, message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            input,
            message: message.into(),
        }
    }

    pub fn degenerate_size(what: &'static str, width: u32, height: u32) -> Self {
        Self::DegenerateSize {
            what,
            width,
            height,
        }
    }

    pub fn encode_failure(message: impl Into<String>) -> Self {
        Self::EncodeFailure {
            message: message.into(),
        }
    }

    pub fn invalid_option(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            field,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
