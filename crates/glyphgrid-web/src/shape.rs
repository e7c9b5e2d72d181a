#![forbid(unsafe_code)]

//! Cell shapes and paint-op emission.
//!
//! One display-state core serves several tessellations; the shape decides
//! what painting a cell means. Emission produces [`PaintOp`] data rather
//! than canvas calls, so every variant's geometry is exercised by native
//! tests and the wasm layer stays a dumb translator.
//!
//! - [`CellShape::Rect`]: background fill plus a centered glyph (skipped for
//!   the blank glyph).
//! - [`CellShape::Hex`]: flat-top hexagon tessellation, odd columns dropped
//!   half a row; outline stroked, no glyph.
//! - [`CellShape::Tri`]: alternating up/down triangles per row; outline
//!   stroked, no glyph.
//! - [`CellShape::Atlas`]: background fill plus a sprite blit resolved
//!   through a [`TileAtlas`].

use crate::atlas::{TileAtlas, TileRect};
use crate::layout::GridLayout;
use glyphgrid_core::{Cell, Rgba};
use std::f64::consts::FRAC_PI_3;

/// Outline color for hex/tri tile borders.
const TILE_OUTLINE: Rgba = Rgba::WHITE;

/// How a surface paints one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellShape {
    /// Classic terminal: rectangle + centered text glyph.
    Rect,
    /// Hexagonal tiles (background only).
    Hex,
    /// Triangular tiles (background only).
    Tri,
    /// Bitmap terminal: rectangle + sprite blit from a tile atlas.
    Atlas(TileAtlas),
}

/// A single draw instruction, in device pixels.
///
/// The wasm layer maps these 1:1 onto `CanvasRenderingContext2d` calls;
/// tests assert on them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// Fill an axis-aligned rectangle.
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    /// Draw a glyph centered at `(x, y)` in the surface font.
    Glyph { glyph: char, x: f64, y: f64, color: Rgba },
    /// Fill (and optionally outline) a closed polygon.
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Rgba,
        stroke: Option<Rgba>,
    },
    /// Blit a tile from the atlas image into a destination rect.
    Tile {
        src: TileRect,
        dst_x: f64,
        dst_y: f64,
        dst_width: f64,
        dst_height: f64,
    },
}

impl CellShape {
    /// Emit the paint ops for one cell into `out`.
    ///
    /// `(x, y)` are grid coordinates already validated by the sweep. `out`
    /// is a caller-owned scratch buffer so a full-grid repaint does not
    /// allocate per cell.
    pub fn emit(&self, layout: &GridLayout, x: u16, y: u16, cell: Cell, out: &mut Vec<PaintOp>) {
        match self {
            Self::Rect => emit_rect(layout, x, y, cell, out),
            Self::Hex => emit_hex(layout, x, y, cell, out),
            Self::Tri => emit_tri(layout, x, y, cell, out),
            Self::Atlas(atlas) => emit_atlas(atlas, layout, x, y, cell, out),
        }
    }
}

fn emit_rect(layout: &GridLayout, x: u16, y: u16, cell: Cell, out: &mut Vec<PaintOp>) {
    let (px, py) = layout.cell_origin(x, y);
    let w = f64::from(layout.cell_width);
    let h = f64::from(layout.cell_height);

    out.push(PaintOp::FillRect {
        x: px,
        y: py,
        width: w,
        height: h,
        color: cell.bg,
    });

    // The blank glyph gets a background fill only.
    if !cell.is_blank_glyph() {
        out.push(PaintOp::Glyph {
            glyph: cell.glyph,
            x: px + w / 2.0,
            y: py + h / 2.0,
            color: cell.fg,
        });
    }
}

fn emit_hex(layout: &GridLayout, x: u16, y: u16, cell: Cell, out: &mut Vec<PaintOp>) {
    out.push(PaintOp::Polygon {
        points: hex_outline(layout, x, y).to_vec(),
        fill: cell.bg,
        stroke: Some(TILE_OUTLINE),
    });
}

fn emit_tri(layout: &GridLayout, x: u16, y: u16, cell: Cell, out: &mut Vec<PaintOp>) {
    out.push(PaintOp::Polygon {
        points: tri_outline(layout, x, y).to_vec(),
        fill: cell.bg,
        stroke: Some(TILE_OUTLINE),
    });
}

fn emit_atlas(
    atlas: &TileAtlas,
    layout: &GridLayout,
    x: u16,
    y: u16,
    cell: Cell,
    out: &mut Vec<PaintOp>,
) {
    let (px, py) = layout.cell_origin(x, y);
    let w = f64::from(layout.cell_width);
    let h = f64::from(layout.cell_height);

    out.push(PaintOp::FillRect {
        x: px,
        y: py,
        width: w,
        height: h,
        color: cell.bg,
    });

    if !cell.is_blank_glyph() {
        out.push(PaintOp::Tile {
            src: atlas.source_rect(cell.glyph),
            dst_x: px,
            dst_y: py,
            dst_width: w,
            dst_height: h,
        });
    }
}

/// Side length shared by the hex and tri tessellations: the larger cell
/// dimension, so tiles never underfill their slot.
#[inline]
fn side_length(layout: &GridLayout) -> f64 {
    f64::from(layout.cell_width.max(layout.cell_height))
}

/// Vertices of the hexagon tile at grid position `(x, y)`, clockwise from
/// the top-left vertex.
///
/// Flat-top hexagons packed column-wise: each column advances by
/// `s/2 + width_radius`, odd columns drop one height radius.
#[must_use]
pub fn hex_outline(layout: &GridLayout, x: u16, y: u16) -> [(f64, f64); 6] {
    let s = side_length(layout);
    let width_radius = s * FRAC_PI_3.cos() + s * 0.5;
    let height_radius = s * FRAC_PI_3.sin();
    let half = s * 0.5;

    let cx = f64::from(x) * (s * 0.5 + width_radius) + width_radius;
    let cy = f64::from(y) * height_radius * 2.0
        + height_radius * if x % 2 == 1 { 2.0 } else { 1.0 };

    [
        (cx - half, cy - height_radius),
        (cx + half, cy - height_radius),
        (cx + width_radius, cy),
        (cx + half, cy + height_radius),
        (cx - half, cy + height_radius),
        (cx - width_radius, cy),
    ]
}

/// Vertices of the triangle tile at grid position `(x, y)`, starting at the
/// tip.
///
/// Even rows point up with the tip shifted right by half a side; odd rows
/// point down. Adjacent triangles share edges, tiling the strip.
#[must_use]
pub fn tri_outline(layout: &GridLayout, x: u16, y: u16) -> [(f64, f64); 3] {
    let s = side_length(layout);
    let half = s * 0.5;
    let points_up = y % 2 == 0;

    let tip_x = f64::from(x) * s + if points_up { half } else { 0.0 };
    let tip_y = f64::from(y) * s;

    if points_up {
        [
            (tip_x, tip_y),
            (tip_x + half, tip_y + s),
            (tip_x - half, tip_y + s),
        ]
    } else {
        [(tip_x, tip_y), (tip_x + s, tip_y), (tip_x + half, tip_y + s)]
    }
}
