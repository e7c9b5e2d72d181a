#![forbid(unsafe_code)]

//! Cell pixel layout and hit-testing.
//!
//! [`GridOptions`] is the immutable per-instance configuration: each surface
//! gets its own value, constructed once and never mutated (there is no shared
//! defaults object to leak state across instances). [`GridLayout`] is the
//! derived physical geometry: canvas size, cell pixel size, and font size,
//! all in device pixels.
//!
//! Two sizing modes:
//! - **Responsive**: the host element's logical size is given (default
//!   640×480 CSS px); cell size is the element size scaled by the device
//!   pixel ratio and divided by the grid dimensions.
//! - **Fixed**: the logical cell size is given; the canvas is sized to
//!   grid × cell.

use crate::font::Font;
use serde::Deserialize;

/// Default logical element size for responsive sizing, in CSS pixels.
pub const DEFAULT_ELEMENT_WIDTH: u32 = 640;
pub const DEFAULT_ELEMENT_HEIGHT: u32 = 480;

/// How the surface derives cell pixel sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum SizingMode {
    /// Divide the host element's size across the grid.
    #[serde(rename_all = "camelCase")]
    Responsive {
        #[serde(default = "default_element_width")]
        element_width: u32,
        #[serde(default = "default_element_height")]
        element_height: u32,
    },
    /// Use an explicit logical cell size; the canvas grows to fit the grid.
    #[serde(rename_all = "camelCase")]
    Fixed { cell_width: u32, cell_height: u32 },
}

fn default_element_width() -> u32 {
    DEFAULT_ELEMENT_WIDTH
}

fn default_element_height() -> u32 {
    DEFAULT_ELEMENT_HEIGHT
}

impl Default for SizingMode {
    fn default() -> Self {
        Self::Responsive {
            element_width: DEFAULT_ELEMENT_WIDTH,
            element_height: DEFAULT_ELEMENT_HEIGHT,
        }
    }
}

/// Immutable per-surface configuration.
///
/// Only `width` and `height` are required in JSON; everything else has the
/// defaults of the classic canvas terminal (responsive 640×480, inconsolata,
/// DPR supplied by the host).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    /// Grid width in cells.
    pub width: u16,
    /// Grid height in cells.
    pub height: u16,
    #[serde(default)]
    pub font: Font,
    /// Device pixel ratio. `None` means "ask the host"; the wasm constructor
    /// substitutes `window.devicePixelRatio`, native callers get 1.0.
    #[serde(default)]
    pub device_pixel_ratio: Option<f64>,
    #[serde(default)]
    pub sizing: SizingMode,
    /// Force square cells: both dimensions clamp to the smaller one.
    #[serde(default)]
    pub force_square: bool,
}

impl GridOptions {
    /// Options with the given grid dimensions and all defaults.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            font: Font::default(),
            device_pixel_ratio: None,
            sizing: SizingMode::default(),
            force_square: false,
        }
    }

    /// Builder-style sizing-mode override.
    #[must_use]
    pub fn with_sizing(mut self, sizing: SizingMode) -> Self {
        self.sizing = sizing;
        self
    }

    /// Builder-style DPR override.
    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = Some(ratio);
        self
    }

    /// Builder-style font override.
    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Builder-style force-square override.
    #[must_use]
    pub fn with_force_square(mut self, force_square: bool) -> Self {
        self.force_square = force_square;
        self
    }
}

/// Derived physical geometry, all in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Physical canvas backing-store size.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Physical cell size. Never zero; grids wider than the element floor
    /// at 1px cells.
    pub cell_width: u32,
    pub cell_height: u32,
    /// Font pixel size: a glyph is sized to its cell width.
    pub font_px: u32,
    /// The ratio layout was computed with (used by hit-testing).
    pub device_pixel_ratio: f64,
}

impl GridLayout {
    /// Compute the layout for the given options.
    ///
    /// The DPR fallback when options carry none is 1.0 — the wasm constructor
    /// resolves the real value before calling this.
    #[must_use]
    pub fn compute(options: &GridOptions) -> Self {
        let ratio = options.device_pixel_ratio.unwrap_or(1.0);

        let (mut cell_width, mut cell_height) = match options.sizing {
            SizingMode::Responsive {
                element_width,
                element_height,
            } => {
                let physical_w = (f64::from(element_width) * ratio).floor() as u32;
                let physical_h = (f64::from(element_height) * ratio).floor() as u32;
                (
                    (physical_w / u32::from(options.width.max(1))).max(1),
                    (physical_h / u32::from(options.height.max(1))).max(1),
                )
            }
            SizingMode::Fixed {
                cell_width,
                cell_height,
            } => (
                ((f64::from(cell_width) * ratio).round() as u32).max(1),
                ((f64::from(cell_height) * ratio).round() as u32).max(1),
            ),
        };

        if options.force_square {
            let side = cell_width.min(cell_height);
            cell_width = side;
            cell_height = side;
        }

        let (canvas_width, canvas_height) = match options.sizing {
            SizingMode::Responsive {
                element_width,
                element_height,
            } => (
                (f64::from(element_width) * ratio).floor() as u32,
                (f64::from(element_height) * ratio).floor() as u32,
            ),
            SizingMode::Fixed { .. } => (
                cell_width * u32::from(options.width),
                cell_height * u32::from(options.height),
            ),
        };

        Self {
            canvas_width,
            canvas_height,
            cell_width,
            cell_height,
            font_px: cell_width,
            device_pixel_ratio: ratio,
        }
    }

    /// Convert a pointer position in CSS pixels (relative to the canvas
    /// origin) into grid coordinates.
    ///
    /// Pure integer-division conversion with no error cases: positions
    /// outside the canvas yield out-of-range coordinates, which callers
    /// bounds-check — or hand straight to the display state, which ignores
    /// out-of-bounds writes.
    #[must_use]
    pub fn cell_at(&self, css_x: f64, css_y: f64) -> (i32, i32) {
        let x = (css_x * self.device_pixel_ratio / f64::from(self.cell_width)).floor();
        let y = (css_y * self.device_pixel_ratio / f64::from(self.cell_height)).floor();
        (x as i32, y as i32)
    }

    /// Top-left corner of a cell in device pixels.
    #[must_use]
    pub fn cell_origin(&self, x: u16, y: u16) -> (f64, f64) {
        (
            f64::from(x) * f64::from(self.cell_width),
            f64::from(y) * f64::from(self.cell_height),
        )
    }
}
