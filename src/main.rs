use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use aquamark::{watermark, RawWatermarkOptions};

/// Aquamark - composite a logo overlay (and optional contrast gradient) onto an image
#[derive(Parser, Debug)]
#[command(name = "aquamark")]
#[command(version, about, long_about = None)]
struct Args {
    /// Background image file
    background: PathBuf,

    /// Overlay image file (the mark)
    overlay: PathBuf,

    /// Output file for the composite PNG
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Overlay anchor: north, northeast, east, southeast, south, southwest, west
    #[arg(short, long, default_value = "southeast")]
    gravity: String,

    /// Output compression effort (1-100)
    #[arg(short, long)]
    quality: Option<u16>,

    /// Composite a translucent gradient band behind the overlay
    #[arg(long)]
    gradient: bool,

    /// Gradient band height as a percentage of the background height (1-100)
    #[arg(long)]
    gradient_height: Option<u16>,

    /// Invert the gradient for light backgrounds
    #[arg(long)]
    light: bool,

    /// Overlay box width as a percentage of the background width (1-100)
    #[arg(long)]
    overlay_width: Option<u16>,

    /// Overlay box height as a percentage of the background height (1-100)
    #[arg(long)]
    overlay_height: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    aquamark::logging::init_subscriber()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize logging")?;

    let args = Args::parse();

    // The binary is the validation boundary: untyped flags become a typed,
    // range-checked options record before the core sees them.
    let raw = RawWatermarkOptions {
        gravity: args.gravity,
        quality: args.quality,
        gradient: args.gradient,
        gradient_height: args.gradient_height,
        light: args.light,
        overlay_width: args.overlay_width,
        overlay_height: args.overlay_height,
    };
    let options = raw.validate()?;

    let background = std::fs::read(&args.background)
        .with_context(|| format!("failed to read {}", args.background.display()))?;
    let overlay = std::fs::read(&args.overlay)
        .with_context(|| format!("failed to read {}", args.overlay.display()))?;

    let result = watermark(&background, &overlay, &options)?;

    std::fs::write(&args.output, &result.data)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    tracing::info!(
        output = %args.output.display(),
        format = result.format.as_str(),
        bytes = result.data.len(),
        "composite written"
    );

    Ok(())
}
