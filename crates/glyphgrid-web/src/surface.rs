#![forbid(unsafe_code)]

//! The terminal grid surface.
//!
//! [`TermGrid`] owns one [`DisplayState`] plus the layout and cell shape,
//! and exposes the write API hosts use: `clear`/`fill`, `write_cell`,
//! `write_char`, `write_text`, and the render entry points. It is pure —
//! rendering emits [`PaintOp`]s through a sink callback — so the full
//! surface contract runs under native tests; the wasm bindings bolt a
//! canvas onto exactly this type.

use crate::layout::{GridLayout, GridOptions, SizingMode};
use crate::shape::{CellShape, PaintOp};
use glyphgrid_core::{Cell, DisplayState};
use std::fmt;

/// Surface construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Grid width or height was zero.
    EmptyGrid,
    /// Fixed sizing mode with a zero cell dimension.
    EmptyCell,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid dimensions must be non-zero"),
            Self::EmptyCell => write!(f, "fixed cell dimensions must be non-zero"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A character-grid surface bound to one shape and one immutable config.
#[derive(Debug, Clone)]
pub struct TermGrid {
    options: GridOptions,
    layout: GridLayout,
    shape: CellShape,
    display: DisplayState,
    blank: Cell,
}

impl TermGrid {
    /// Create a surface with the default blank cell.
    pub fn new(options: GridOptions, shape: CellShape) -> Result<Self, SurfaceError> {
        Self::with_blank(options, shape, Cell::BLANK)
    }

    /// Create a surface whose never-written slots read as `blank`.
    pub fn with_blank(
        options: GridOptions,
        shape: CellShape,
        blank: Cell,
    ) -> Result<Self, SurfaceError> {
        if options.width == 0 || options.height == 0 {
            return Err(SurfaceError::EmptyGrid);
        }
        if let SizingMode::Fixed {
            cell_width,
            cell_height,
        } = options.sizing
            && (cell_width == 0 || cell_height == 0)
        {
            return Err(SurfaceError::EmptyCell);
        }

        let layout = GridLayout::compute(&options);
        let display = DisplayState::with_blank(options.width, options.height, blank);
        Ok(Self {
            options,
            layout,
            shape,
            display,
            blank,
        })
    }

    /// Grid width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.options.width
    }

    /// Grid height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.options.height
    }

    /// The immutable configuration this surface was built with.
    #[inline]
    pub const fn options(&self) -> &GridOptions {
        &self.options
    }

    /// The derived pixel geometry.
    #[inline]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// The cell shape painting this surface.
    #[inline]
    pub const fn shape(&self) -> &CellShape {
        &self.shape
    }

    /// True if any cell awaits repaint.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.display.is_dirty()
    }

    /// Write the blank cell into every slot.
    pub fn clear(&mut self) {
        self.fill(self.blank);
    }

    /// Write `cell` into every slot.
    ///
    /// A plain double loop over `write_cell`: cost is O(W·H) writes into the
    /// display state regardless of how many cells actually change, but the
    /// next sweep still paints only real changes.
    pub fn fill(&mut self, cell: Cell) {
        for x in 0..i32::from(self.options.width) {
            for y in 0..i32::from(self.options.height) {
                self.display.set_cell(x, y, cell);
            }
        }
    }

    /// Write one cell. Out-of-bounds writes are silently ignored.
    #[inline]
    pub fn write_cell(&mut self, x: i32, y: i32, cell: Cell) {
        self.display.set_cell(x, y, cell);
    }

    /// Replace the glyph at `(x, y)`, preserving the colors of whatever the
    /// slot logically holds (pending if present, else rendered).
    pub fn write_char(&mut self, x: i32, y: i32, glyph: char) {
        let Some(current) = self.display.get_cell(x, y) else {
            return;
        };
        self.display.set_cell(x, y, current.with_glyph(glyph));
    }

    /// Write a run of single-character cells starting at column `x`, in the
    /// blank cell's colors.
    ///
    /// Characters past the right edge are dropped — the run truncates, it
    /// never wraps. A negative starting column clips on the left the same
    /// way (those writes land out of bounds and are ignored).
    pub fn write_text(&mut self, x: i32, y: i32, text: &str) {
        let width = i32::from(self.options.width);
        for (i, ch) in text.chars().enumerate() {
            let col = x.saturating_add(i as i32);
            if col >= width {
                break;
            }
            self.display.set_cell(col, y, self.blank.with_glyph(ch));
        }
    }

    /// What the grid logically contains at `(x, y)`; `None` out of bounds.
    #[inline]
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.display.get_cell(x, y)
    }

    /// Convert a pointer position in CSS pixels to grid coordinates.
    ///
    /// May return out-of-range coordinates; see [`GridLayout::cell_at`].
    #[inline]
    #[must_use]
    pub fn cell_at(&self, css_x: f64, css_y: f64) -> (i32, i32) {
        self.layout.cell_at(css_x, css_y)
    }

    /// Sweep changed cells and hand their paint ops to `sink`.
    pub fn render_with(&mut self, mut sink: impl FnMut(&PaintOp)) {
        match self.try_render_with(|op| -> Result<(), core::convert::Infallible> {
            sink(op);
            Ok(())
        }) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`render_with`](Self::render_with).
    ///
    /// A sink error aborts the sweep mid-frame; per-cell commit in the
    /// display state means already-painted cells stay committed and the
    /// rest stay pending, so the next render resumes where this one failed.
    pub fn try_render_with<E>(
        &mut self,
        mut sink: impl FnMut(&PaintOp) -> Result<(), E>,
    ) -> Result<(), E> {
        let layout = self.layout;
        let shape = &self.shape;
        let mut ops = Vec::new();

        self.display.try_render(|x, y, cell| {
            ops.clear();
            shape.emit(&layout, x, y, cell, &mut ops);
            for op in &ops {
                sink(op)?;
            }
            Ok(())
        })
    }
}
