#![forbid(unsafe_code)]

//! Canvas 2D translation of paint ops.
//!
//! Kept deliberately mechanical: one [`PaintOp`] maps to one small group of
//! `CanvasRenderingContext2d` calls. All geometry and color decisions were
//! already made by the shape emitter.

use crate::shape::PaintOp;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Apply one paint op to the context.
///
/// `atlas_image` is the sprite sheet for [`PaintOp::Tile`] ops; surfaces
/// without an atlas never emit them, so hitting a tile op with no image is
/// reported as an error rather than skipped.
pub(crate) fn apply(
    ctx: &CanvasRenderingContext2d,
    atlas_image: Option<&HtmlImageElement>,
    op: &PaintOp,
) -> Result<(), JsValue> {
    match op {
        PaintOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => {
            ctx.set_fill_style_str(&color.to_css());
            ctx.fill_rect(*x, *y, *width, *height);
        }
        PaintOp::Glyph { glyph, x, y, color } => {
            ctx.set_fill_style_str(&color.to_css());
            let mut buf = [0u8; 4];
            ctx.fill_text(glyph.encode_utf8(&mut buf), *x, *y)?;
        }
        PaintOp::Polygon {
            points,
            fill,
            stroke,
        } => {
            let Some((first, rest)) = points.split_first() else {
                return Ok(());
            };
            ctx.begin_path();
            ctx.move_to(first.0, first.1);
            for p in rest {
                ctx.line_to(p.0, p.1);
            }
            ctx.close_path();
            ctx.set_fill_style_str(&fill.to_css());
            ctx.fill();
            if let Some(stroke) = stroke {
                ctx.set_stroke_style_str(&stroke.to_css());
                ctx.stroke();
            }
        }
        PaintOp::Tile {
            src,
            dst_x,
            dst_y,
            dst_width,
            dst_height,
        } => {
            let image = atlas_image
                .ok_or_else(|| JsValue::from_str("tile op emitted with no atlas image"))?;
            ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                f64::from(src.x),
                f64::from(src.y),
                f64::from(src.width),
                f64::from(src.height),
                *dst_x,
                *dst_y,
                *dst_width,
                *dst_height,
            )?;
        }
    }
    Ok(())
}
