//! Layered composition of background, gradient, and overlay.
//!
//! Stacking order is fixed and load-bearing: background (z=0), gradient
//! band (z=1, optional), overlay (z=2). The overlay always sits above the
//! gradient so the mark is never obscured by the band. Blending is
//! Porter-Duff "over" using each layer's own alpha channel, with layers
//! clipped to the canvas bounds.

use image::{Rgba, RgbaImage};

use crate::options::Gravity;
use crate::position::{Band, Dimensions, PlacementPosition};

/// A layer waiting to be blended onto the canvas.
#[derive(Clone)]
pub struct Layer {
    pub image: RgbaImage,
    pub position: PlacementPosition,
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("dimensions", &(self.image.width(), self.image.height()))
            .field("position", &self.position)
            .finish()
    }
}

/// Compose the watermark layers onto the background canvas.
///
/// The background is consumed and becomes the canvas; the gradient (when
/// present) is anchored at its band edge spanning the full width, then the
/// overlay is anchored at its gravity. Identical inputs always produce an
/// identical canvas.
pub fn compose(
    background: RgbaImage,
    gradient: Option<(RgbaImage, Band)>,
    overlay: RgbaImage,
    gravity: Gravity,
) -> RgbaImage {
    let canvas_dims = Dimensions::new(background.width(), background.height());
    let mut canvas = background;

    if let Some((gradient_image, band)) = gradient {
        let position = band.anchor(
            canvas_dims,
            Dimensions::new(gradient_image.width(), gradient_image.height()),
        );
        blend_layer(
            &mut canvas,
            &Layer {
                image: gradient_image,
                position,
            },
        );
    }

    let position = gravity.anchor(
        canvas_dims,
        Dimensions::new(overlay.width(), overlay.height()),
    );
    blend_layer(
        &mut canvas,
        &Layer {
            image: overlay,
            position,
        },
    );

    canvas
}

/// Blend a single layer onto the canvas, clipped to the visible region.
fn blend_layer(canvas: &mut RgbaImage, layer: &Layer) {
    let canvas_width = canvas.width() as i32;
    let canvas_height = canvas.height() as i32;

    let layer_width = layer.image.width() as i32;
    let layer_height = layer.image.height() as i32;

    let x_start = layer.position.x.max(0);
    let y_start = layer.position.y.max(0);
    let x_end = (layer.position.x + layer_width).min(canvas_width);
    let y_end = (layer.position.y + layer_height).min(canvas_height);

    for cy in y_start..y_end {
        for cx in x_start..x_end {
            let lx = (cx - layer.position.x) as u32;
            let ly = (cy - layer.position.y) as u32;

            let fg = layer.image.get_pixel(lx, ly);
            let bg = canvas.get_pixel(cx as u32, cy as u32);

            let blended = blend_pixels(*bg, *fg);
            canvas.put_pixel(cx as u32, cy as u32, blended);
        }
    }
}

/// Porter-Duff "over": result = foreground + background * (1 - fg alpha).
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0) as u8,
    ])
}
