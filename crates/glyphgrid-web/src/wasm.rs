#![forbid(unsafe_code)]

//! `wasm-bindgen` bindings: a [`TermGrid`] bound to a `<canvas>`.
//!
//! The JS-facing surface mirrors the classic canvas-terminal API: construct
//! with a canvas element plus a JSON options object, mutate cells, call
//! `render()` once per animation frame. Colors cross the boundary as packed
//! `0xRRGGBBAA` numbers.

use crate::atlas::TileAtlas;
use crate::draw;
use crate::layout::{GridLayout, GridOptions};
use crate::shape::CellShape;
use crate::surface::TermGrid;
use glyphgrid_core::{Cell, Rgba};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// Web terminal surface: display state + layout + canvas 2D painting.
#[wasm_bindgen]
pub struct GlyphTerminal {
    grid: TermGrid,
    ctx: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
    atlas_image: Option<HtmlImageElement>,
}

#[wasm_bindgen]
impl GlyphTerminal {
    /// Classic text terminal on the given canvas.
    ///
    /// `options` is a JSON-compatible object; `width` and `height` (cells)
    /// are required, everything else defaults (see `GridOptions`).
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, options: JsValue) -> Result<GlyphTerminal, JsValue> {
        Self::with_shape(canvas, options, CellShape::Rect, None)
    }

    /// Hex-tile surface (background tiles only, no glyph drawing).
    pub fn hex(canvas: HtmlCanvasElement, options: JsValue) -> Result<GlyphTerminal, JsValue> {
        Self::with_shape(canvas, options, CellShape::Hex, None)
    }

    /// Triangle-tile surface (background tiles only, no glyph drawing).
    pub fn tri(canvas: HtmlCanvasElement, options: JsValue) -> Result<GlyphTerminal, JsValue> {
        Self::with_shape(canvas, options, CellShape::Tri, None)
    }

    /// Bitmap terminal: cells resolve through a tile atlas and paint as
    /// sprite blits from `image`.
    ///
    /// `atlas` is a JSON object: `{tileWidth, tileHeight, columns, mapping?}`.
    #[wasm_bindgen(js_name = withAtlas)]
    pub fn with_atlas(
        canvas: HtmlCanvasElement,
        options: JsValue,
        image: HtmlImageElement,
        atlas: JsValue,
    ) -> Result<GlyphTerminal, JsValue> {
        let atlas: TileAtlas = from_js(&atlas)?;
        Self::with_shape(canvas, options, CellShape::Atlas(atlas), Some(image))
    }

    /// The canvas this surface draws to.
    #[wasm_bindgen(getter)]
    pub fn canvas(&self) -> HtmlCanvasElement {
        self.canvas.clone()
    }

    /// Grid width in cells.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    /// Grid height in cells.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    /// Write the blank cell into every slot.
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Write the same cell into every slot.
    pub fn fill(&mut self, glyph: char, fg: u32, bg: u32) {
        self.grid.fill(Cell::new(glyph, Rgba(fg), Rgba(bg)));
    }

    /// Write one cell. Out-of-bounds writes are silently ignored.
    #[wasm_bindgen(js_name = writeCell)]
    pub fn write_cell(&mut self, x: i32, y: i32, glyph: char, fg: u32, bg: u32) {
        self.grid.write_cell(x, y, Cell::new(glyph, Rgba(fg), Rgba(bg)));
    }

    /// Replace a slot's glyph, keeping its current colors.
    #[wasm_bindgen(js_name = writeChar)]
    pub fn write_char(&mut self, x: i32, y: i32, glyph: char) {
        self.grid.write_char(x, y, glyph);
    }

    /// Write a text run starting at column `x`; truncates at the right edge.
    #[wasm_bindgen(js_name = writeText)]
    pub fn write_text(&mut self, x: i32, y: i32, text: &str) {
        self.grid.write_text(x, y, text);
    }

    /// Paint every cell that changed since the last render.
    ///
    /// On error (e.g. a lost context) painted cells stay committed and the
    /// rest stay pending; calling `render()` again resumes.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let ctx = self.ctx.clone();
        let atlas_image = self.atlas_image.clone();
        self.grid
            .try_render_with(|op| draw::apply(&ctx, atlas_image.as_ref(), op))
    }

    /// Convert a pointer position (CSS pixels relative to the canvas origin)
    /// to `[cellX, cellY]`. May return out-of-range coordinates.
    #[wasm_bindgen(js_name = cellAt)]
    pub fn cell_at(&self, css_x: f64, css_y: f64) -> js_sys::Array {
        let (x, y) = self.grid.cell_at(css_x, css_y);
        js_sys::Array::of2(&JsValue::from(x), &JsValue::from(y))
    }

    /// Release the canvas references.
    pub fn destroy(self) {
        drop(self);
    }

    fn with_shape(
        canvas: HtmlCanvasElement,
        options: JsValue,
        shape: CellShape,
        atlas_image: Option<HtmlImageElement>,
    ) -> Result<GlyphTerminal, JsValue> {
        let mut options: GridOptions = from_js(&options)?;
        if options.device_pixel_ratio.is_none() {
            options.device_pixel_ratio = Some(host_device_pixel_ratio());
        }

        let grid =
            TermGrid::new(options, shape).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        apply_layout(&canvas, &ctx, grid.layout(), grid.options());

        Ok(GlyphTerminal {
            grid,
            ctx,
            canvas,
            atlas_image,
        })
    }
}

/// Size the canvas backing store and configure text drawing.
fn apply_layout(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    layout: &GridLayout,
    options: &GridOptions,
) {
    canvas.set_width(layout.canvas_width);
    canvas.set_height(layout.canvas_height);

    ctx.set_font(&options.font.to_css(layout.font_px));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
}

fn host_device_pixel_ratio() -> f64 {
    web_sys::window().map_or(1.0, |w| w.device_pixel_ratio())
}

/// Deserialize a JSON-compatible JS object through its JSON text.
fn from_js<T: serde::de::DeserializeOwned>(value: &JsValue) -> Result<T, JsValue> {
    let json = js_sys::JSON::stringify(value)
        .map_err(|_| JsValue::from_str("options must be a JSON-compatible object"))?;
    let json: String = json.into();
    serde_json::from_str(&json)
        .map_err(|e| JsValue::from_str(&format!("invalid options: {e}")))
}
