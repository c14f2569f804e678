//! Watermark option types and the validation step that produces them.
//!
//! The core pipeline only ever sees [`WatermarkOptions`], a strongly-typed,
//! already-validated record. Untyped input (query strings, JSON bodies)
//! goes through [`RawWatermarkOptions::validate`] at the service boundary;
//! the core never re-derives types or re-checks ranges.

use serde::Deserialize;
use std::str::FromStr;

use crate::error::AquamarkError;

/// Default output quality when the caller does not specify one.
pub const DEFAULT_QUALITY: u8 = 90;

/// Default gradient band height as a percentage of the background height.
///
/// This is the single source of truth for the gradient height default;
/// there is deliberately no second internal default for the core to fall
/// back to.
pub const DEFAULT_GRADIENT_HEIGHT_PERCENT: u8 = 30;

/// Default overlay box size as a percentage of the background dimensions.
pub const DEFAULT_OVERLAY_PERCENT: u8 = 20;

/// Compass-direction anchor used to place the overlay on the background.
///
/// The accepted set has seven values: `northwest` is not among them, even
/// though the internal gradient geometry supports all four cardinal
/// rotations. The asymmetry is inherited from the public request surface
/// and is kept as-is rather than widened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl Gravity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::NorthEast => "northeast",
            Self::East => "east",
            Self::SouthEast => "southeast",
            Self::South => "south",
            Self::SouthWest => "southwest",
            Self::West => "west",
        }
    }
}

impl FromStr for Gravity {
    type Err = AquamarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "north" => Ok(Gravity::North),
            "northeast" => Ok(Gravity::NorthEast),
            "east" => Ok(Gravity::East),
            "southeast" => Ok(Gravity::SouthEast),
            "south" => Ok(Gravity::South),
            "southwest" => Ok(Gravity::SouthWest),
            "west" => Ok(Gravity::West),
            _ => Err(AquamarkError::invalid_option(
                "gravity",
                format!(
                    "must be one of north, northeast, east, southeast, south, southwest, west; got '{}'",
                    s
                ),
            )),
        }
    }
}

/// Gradient band configuration.
///
/// A tagged variant rather than a bool plus loose fields, so the band
/// parameters only exist when the band itself does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientConfig {
    /// No gradient layer is composited.
    Disabled,
    /// A translucent band is composited behind the overlay.
    Enabled {
        /// Band height as a percentage of the background height (1-100).
        height_percent: u8,
        /// Invert the gradient's color channels (alpha untouched) to get a
        /// lightening band instead of a darkening one.
        light: bool,
    },
}

impl GradientConfig {
    /// Enabled with the default band height and a dark gradient.
    pub fn enabled() -> Self {
        Self::Enabled {
            height_percent: DEFAULT_GRADIENT_HEIGHT_PERCENT,
            light: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

/// Validated per-call composition options.
///
/// All percentage fields and `quality` are within 1-100 by construction;
/// build this through [`RawWatermarkOptions::validate`] or the field
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkOptions {
    /// Where the overlay is anchored on the background.
    pub gravity: Gravity,
    /// Output compression effort knob (1-100).
    pub quality: u8,
    /// Gradient band behind the overlay.
    pub gradient: GradientConfig,
    /// Overlay target box width as a percentage of the background width.
    pub overlay_width_percent: u8,
    /// Overlay target box height as a percentage of the background height.
    pub overlay_height_percent: u8,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            gravity: Gravity::SouthEast,
            quality: DEFAULT_QUALITY,
            gradient: GradientConfig::Disabled,
            overlay_width_percent: DEFAULT_OVERLAY_PERCENT,
            overlay_height_percent: DEFAULT_OVERLAY_PERCENT,
        }
    }
}

/// Untyped options record as received from a request body.
///
/// Field shapes match the public surface: `gradient` toggles the band,
/// `gradient_height` and `light` refine it. Missing numeric fields take
/// the documented defaults during validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawWatermarkOptions {
    pub gravity: String,
    pub quality: Option<u16>,
    #[serde(default)]
    pub gradient: bool,
    pub gradient_height: Option<u16>,
    #[serde(default)]
    pub light: bool,
    pub overlay_width: Option<u16>,
    pub overlay_height: Option<u16>,
}

impl RawWatermarkOptions {
    /// Validate and convert into a typed [`WatermarkOptions`].
    ///
    /// Rejects gravities outside the seven-value set and any percentage or
    /// quality value outside 1-100. This is the only place ranges are
    /// enforced; downstream code trusts the result.
    pub fn validate(&self) -> Result<WatermarkOptions, AquamarkError> {
        let gravity = Gravity::from_str(&self.gravity)?;

        let quality = check_range_1_100("quality", self.quality, DEFAULT_QUALITY)?;
        let overlay_width_percent =
            check_range_1_100("overlay_width", self.overlay_width, DEFAULT_OVERLAY_PERCENT)?;
        let overlay_height_percent = check_range_1_100(
            "overlay_height",
            self.overlay_height,
            DEFAULT_OVERLAY_PERCENT,
        )?;

        let gradient = if self.gradient {
            GradientConfig::Enabled {
                height_percent: check_range_1_100(
                    "gradient_height",
                    self.gradient_height,
                    DEFAULT_GRADIENT_HEIGHT_PERCENT,
                )?,
                light: self.light,
            }
        } else {
            GradientConfig::Disabled
        };

        Ok(WatermarkOptions {
            gravity,
            quality,
            gradient,
            overlay_width_percent,
            overlay_height_percent,
        })
    }
}

fn check_range_1_100(
    field: &'static str,
    value: Option<u16>,
    default: u8,
) -> Result<u8, AquamarkError> {
    match value {
        None => Ok(default),
        Some(v @ 1..=100) => Ok(v as u8),
        Some(v) => Err(AquamarkError::invalid_option(
            field,
            format!("must be between 1 and 100, got {}", v),
        )),
    }
}
