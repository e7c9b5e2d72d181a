#![forbid(unsafe_code)]

//! `glyphgrid-core` is the display-state engine behind glyphgrid: a fixed-size
//! grid of styled character cells that knows which cells changed since the
//! last frame and hands only those to a paint callback.
//!
//! The crate is host-agnostic. It never draws anything itself; the owning
//! surface (see `glyphgrid-web`) supplies a `paint(x, y, cell)` closure and
//! issues the actual draw calls. This keeps the diff engine testable off any
//! rendering backend.
//!
//! # Model
//!
//! - [`Cell`]: a display symbol plus foreground/background [`Rgba`] colors.
//! - [`DisplayState`]: two parallel W×H slot arrays — `rendered` (what was
//!   last painted) and `pending` (writes awaiting the next sweep) — plus the
//!   sweep itself ([`DisplayState::render`] / [`DisplayState::try_render`]).
//!
//! Writes that match the already-rendered value are suppressed, so a frame
//! that writes the whole grid but changes nothing costs zero paint calls.

pub mod cell;
pub mod display;

pub use cell::{Cell, Rgba, chars};
pub use display::DisplayState;
