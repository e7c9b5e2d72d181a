#![forbid(unsafe_code)]

//! Canvas surface layer for glyphgrid.
//!
//! This crate wraps the [`glyphgrid_core`] display state with everything a
//! browser host needs: cell pixel layout (DPI-aware, responsive or fixed),
//! font CSS construction, pixel→cell hit-testing, and a polymorphic cell
//! painter with rectangular, hexagonal, triangular, and tile-atlas variants.
//!
//! The crate is intentionally split along the wasm boundary:
//! - [`surface::TermGrid`] and the layout/shape/atlas modules are pure and
//!   compile on every target, so the whole surface contract is covered by
//!   native `cargo test`. Rendering produces [`shape::PaintOp`] values, not
//!   draw calls.
//! - The `wasm32`-only [`GlyphTerminal`] binds a `TermGrid` to an actual
//!   `<canvas>` 2D context and translates paint ops into canvas calls.

pub mod atlas;
pub mod font;
pub mod layout;
pub mod shape;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod draw;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::GlyphTerminal;

pub use atlas::{TileAtlas, TileRect};
pub use font::{Font, FontWeight};
pub use layout::{GridLayout, GridOptions, SizingMode};
pub use shape::{CellShape, PaintOp};
pub use surface::{SurfaceError, TermGrid};

/// Native builds compile this crate without the canvas bindings so
/// `cargo check --workspace` stays green; [`TermGrid`] is the full API there.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct GlyphTerminal;
