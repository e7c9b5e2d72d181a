#![forbid(unsafe_code)]

//! Font configuration and CSS shorthand construction.
//!
//! The surface sets the canvas font once per layout pass using the CSS
//! shorthand `"{weight} {size}px {family}"`. The pixel size is not stored
//! here — it is derived from the cell width by the layout (a glyph is sized
//! to its cell), so [`Font::to_css`] takes it as a parameter.

use serde::Deserialize;
use std::fmt;

/// CSS font weight.
///
/// Deserializes from either a keyword string (`"bold"`) or a bare number
/// (`700`), matching what hosts put in JSON options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Lighter,
    Bolder,
    #[serde(untagged)]
    Numeric(u16),
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Bold => f.write_str("bold"),
            Self::Lighter => f.write_str("lighter"),
            Self::Bolder => f.write_str("bolder"),
            Self::Numeric(n) => write!(f, "{n}"),
        }
    }
}

/// Font family + weight for the terminal surface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    #[serde(default = "default_family")]
    pub family: String,
    #[serde(default)]
    pub weight: FontWeight,
}

fn default_family() -> String {
    "inconsolata".to_string()
}

impl Font {
    /// Create a font with explicit family and weight.
    #[must_use]
    pub fn new(family: impl Into<String>, weight: FontWeight) -> Self {
        Self {
            family: family.into(),
            weight,
        }
    }

    /// CSS font shorthand at the given pixel size, suitable for assigning to
    /// a canvas context's `font` property.
    #[must_use]
    pub fn to_css(&self, size_px: u32) -> String {
        format!("{} {}px {}", self.weight, size_px, self.family)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: default_family(),
            weight: FontWeight::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_font_css() {
        assert_eq!(Font::default().to_css(16), "normal 16px inconsolata");
    }

    #[test]
    fn bold_named_family() {
        let font = Font::new("IBM Plex Mono", FontWeight::Bold);
        assert_eq!(font.to_css(24), "bold 24px IBM Plex Mono");
    }

    #[test]
    fn numeric_weight() {
        let font = Font::new("monospace", FontWeight::Numeric(600));
        assert_eq!(font.to_css(12), "600 12px monospace");
    }

    #[test]
    fn deserializes_keyword_and_numeric_weights() {
        let font: Font = serde_json::from_str(r#"{"family":"courier","weight":"bold"}"#).unwrap();
        assert_eq!(font.weight, FontWeight::Bold);

        let font: Font = serde_json::from_str(r#"{"family":"courier","weight":700}"#).unwrap();
        assert_eq!(font.weight, FontWeight::Numeric(700));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let font: Font = serde_json::from_str("{}").unwrap();
        assert_eq!(font, Font::default());
    }
}
