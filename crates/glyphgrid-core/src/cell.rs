#![forbid(unsafe_code)]

//! Cell and color value types.
//!
//! A [`Cell`] is a grid slot's content: one display symbol plus foreground
//! and background [`Rgba`] colors. Cells are small `Copy` values and compare
//! structurally — the diff engine repaints a slot iff the new value differs
//! field-for-field from what was last painted, so constructing a fresh but
//! identical cell is a no-op write.

/// Packed RGBA color: `0xRRGGBBAA` (R in the high byte, A in the low byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel (255 = opaque).
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Format as a CSS color string for a canvas `fillStyle`/`strokeStyle`.
    ///
    /// Opaque colors become `#rrggbb`; anything else becomes `rgba(...)`
    /// with the alpha scaled to `0.0..=1.0`.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a() == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r(),
                self.g(),
                self.b(),
                f64::from(self.a()) / 255.0
            )
        }
    }
}

/// Named glyph characters.
///
/// Convenience table for roguelike-style callers that address glyphs by name
/// rather than by literal. `NULL` is the blank glyph: cells holding it get a
/// background fill but no glyph draw.
pub mod chars {
    pub const NULL: char = ' ';
    pub const SPACE: char = ' ';
    pub const AMPERSAND: char = '&';
    pub const FULL_STOP: char = '.';
    pub const PLUS: char = '+';
    pub const MINUS: char = '-';
    pub const HASH: char = '#';
    pub const DOLLAR: char = '$';
    pub const PERCENT: char = '%';
    pub const CARET: char = '^';
    pub const ASTERISK: char = '*';
    pub const TILDE: char = '~';
    pub const LEFT_PARENS: char = '(';
    pub const RIGHT_PARENS: char = ')';
    pub const LEFT_BRACKET: char = '[';
    pub const RIGHT_BRACKET: char = ']';
    pub const AT: char = '@';
}

/// One grid slot's content: a display symbol plus fg/bg colors.
///
/// For the tile-atlas surface the symbol doubles as the sprite key; the atlas
/// maps it to a source rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Display symbol (or sprite key for atlas surfaces).
    pub glyph: char,
    /// Foreground (glyph) color.
    pub fg: Rgba,
    /// Background (cell fill) color.
    pub bg: Rgba,
}

impl Cell {
    /// The blank cell: null glyph, white on black.
    pub const BLANK: Self = Self {
        glyph: chars::NULL,
        fg: Rgba::WHITE,
        bg: Rgba::BLACK,
    };

    /// Create a cell with explicit glyph and colors.
    #[inline]
    pub const fn new(glyph: char, fg: Rgba, bg: Rgba) -> Self {
        Self { glyph, fg, bg }
    }

    /// Create a cell from a glyph with the default white-on-black colors.
    #[inline]
    pub const fn from_glyph(glyph: char) -> Self {
        Self {
            glyph,
            fg: Rgba::WHITE,
            bg: Rgba::BLACK,
        }
    }

    /// Replace the glyph, keeping both colors.
    #[inline]
    pub const fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    /// Replace the foreground color.
    #[inline]
    pub const fn with_fg(mut self, fg: Rgba) -> Self {
        self.fg = fg;
        self
    }

    /// Replace the background color.
    #[inline]
    pub const fn with_bg(mut self, bg: Rgba) -> Self {
        self.bg = bg;
        self
    }

    /// True when the glyph is the null glyph (nothing to draw over the
    /// background).
    #[inline]
    pub const fn is_blank_glyph(&self) -> bool {
        self.glyph == chars::NULL
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_blank() {
        let cell = Cell::default();
        assert_eq!(cell, Cell::BLANK);
        assert_eq!(cell.glyph, ' ');
        assert_eq!(cell.fg, Rgba::WHITE);
        assert_eq!(cell.bg, Rgba::BLACK);
        assert!(cell.is_blank_glyph());
    }

    #[test]
    fn rgba_channel_roundtrip() {
        let c = Rgba::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.r(), 0x12);
        assert_eq!(c.g(), 0x34);
        assert_eq!(c.b(), 0x56);
        assert_eq!(c.a(), 0x78);
        assert_eq!(c.0, 0x1234_5678);
    }

    #[test]
    fn css_opaque_uses_hex() {
        assert_eq!(Rgba::WHITE.to_css(), "#ffffff");
        assert_eq!(Rgba::BLACK.to_css(), "#000000");
        assert_eq!(Rgba::rgb(255, 0, 128).to_css(), "#ff0080");
    }

    #[test]
    fn css_translucent_uses_rgba() {
        assert_eq!(Rgba::rgba(255, 0, 0, 0).to_css(), "rgba(255, 0, 0, 0.000)");
        assert_eq!(
            Rgba::rgba(10, 20, 30, 51).to_css(),
            "rgba(10, 20, 30, 0.200)"
        );
    }

    #[test]
    fn structural_equality_drives_diffing() {
        let a = Cell::new('@', Rgba::rgb(255, 0, 0), Rgba::BLACK);
        let b = Cell::new('@', Rgba::rgb(255, 0, 0), Rgba::BLACK);
        assert_eq!(a, b);
        assert_ne!(a, a.with_glyph('#'));
        assert_ne!(a, a.with_fg(Rgba::WHITE));
        assert_ne!(a, a.with_bg(Rgba::WHITE));
    }

    #[test]
    fn builder_helpers_preserve_other_fields() {
        let c = Cell::from_glyph('@')
            .with_fg(Rgba::rgb(1, 2, 3))
            .with_bg(Rgba::rgb(4, 5, 6));
        assert_eq!(c.glyph, '@');
        let d = c.with_glyph('%');
        assert_eq!(d.fg, Rgba::rgb(1, 2, 3));
        assert_eq!(d.bg, Rgba::rgb(4, 5, 6));
    }
}
