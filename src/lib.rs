//! Aquamark image watermarking library.
//!
//! Given a background photo and a foreground overlay (a logo, typically),
//! produces a single composite image with the overlay placed at a compass
//! gravity and, optionally, a translucent gradient band behind it for
//! contrast. The caller hands in validated bytes and options and gets back
//! one encoded PNG buffer; file I/O, HTTP, and request validation live in
//! the surrounding layer.
//!
//! # Example
//!
//! ```no_run
//! use aquamark::{watermark, GradientConfig, Gravity, WatermarkOptions};
//!
//! let background = std::fs::read("photo.jpg").unwrap();
//! let overlay = std::fs::read("logo.png").unwrap();
//!
//! let options = WatermarkOptions {
//!     gravity: Gravity::SouthEast,
//!     gradient: GradientConfig::enabled(),
//!     ..Default::default()
//! };
//!
//! let result = watermark(&background, &overlay, &options).unwrap();
//! std::fs::write("marked.png", &result.data).unwrap();
//! ```

pub mod compositor;
pub mod encoder;
pub mod error;
pub mod gradient;
pub mod logging;
pub mod options;
pub mod position;
pub mod processor;
pub mod scaler;

// Re-export the library boundary for convenience
pub use encoder::OutputFormat;
pub use error::{AquamarkError, ImageInput};
pub use options::{
    GradientConfig, Gravity, RawWatermarkOptions, WatermarkOptions, DEFAULT_GRADIENT_HEIGHT_PERCENT,
    DEFAULT_OVERLAY_PERCENT, DEFAULT_QUALITY,
};
pub use position::{Band, Dimensions, PlacementPosition};
pub use processor::{watermark, watermark_async, WatermarkedImage};
