//! Anchor resolution for overlay and gradient placement.
//!
//! Two separate questions are answered here:
//!
//! - where the overlay's top-left corner lands for a given [`Gravity`]
//!   (precise, one of seven edge/corner anchors), and
//! - which coarse vertical [`Band`] the gradient occupies (always north or
//!   south, regardless of whether the overlay sits at a corner or an edge).
//!
//! The decoupling is deliberate: the gradient only ever spans the full
//! width along the top or bottom edge.

use crate::options::Gravity;

/// Width/height of a canvas or layer, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Top-left corner where a layer is blended onto the canvas.
///
/// Coordinates may be negative when a layer is larger than the canvas;
/// the compositor clips to the visible region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Coarse vertical band used only to orient and place the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    North,
    South,
}

impl Gravity {
    /// Classify this gravity into the gradient band.
    ///
    /// Gravities carrying the "north" token map to [`Band::North`]; every
    /// other accepted value maps to [`Band::South`].
    pub fn band(&self) -> Band {
        match self {
            Gravity::North | Gravity::NorthEast => Band::North,
            _ => Band::South,
        }
    }

    /// Anchor for a layer of the given size placed on the canvas.
    ///
    /// Edge gravities center the layer along the other axis; corner
    /// gravities pin both axes. Layers sit flush against the canvas edge,
    /// with no margin.
    pub fn anchor(&self, canvas: Dimensions, layer: Dimensions) -> PlacementPosition {
        let cw = canvas.width as i32;
        let ch = canvas.height as i32;
        let lw = layer.width as i32;
        let lh = layer.height as i32;

        match self {
            Gravity::North => PlacementPosition::new((cw - lw) / 2, 0),
            Gravity::NorthEast => PlacementPosition::new(cw - lw, 0),
            Gravity::East => PlacementPosition::new(cw - lw, (ch - lh) / 2),
            Gravity::SouthEast => PlacementPosition::new(cw - lw, ch - lh),
            Gravity::South => PlacementPosition::new((cw - lw) / 2, ch - lh),
            Gravity::SouthWest => PlacementPosition::new(0, ch - lh),
            Gravity::West => PlacementPosition::new(0, (ch - lh) / 2),
        }
    }
}

impl Band {
    /// Anchor for the gradient layer: flush against the top or bottom edge,
    /// starting at the left edge (the gradient spans the full width).
    pub fn anchor(&self, canvas: Dimensions, layer: Dimensions) -> PlacementPosition {
        match self {
            Band::North => PlacementPosition::new(0, 0),
            Band::South => {
                PlacementPosition::new(0, canvas.height as i32 - layer.height as i32)
            }
        }
    }
}
