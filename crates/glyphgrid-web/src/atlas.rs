#![forbid(unsafe_code)]

//! Tile atlas: maps cell glyphs to sprite regions in an atlas image.
//!
//! The bitmap surface draws cells by blitting a tile from a single source
//! image instead of drawing text. Tiles are laid out in a fixed grid; a
//! glyph resolves to a tile index either through an explicit mapping entry
//! or, failing that, its Unicode code point. Index→rect math is pure and
//! host-independent; only the final `drawImage` lives behind the wasm gate.

use serde::Deserialize;
use std::collections::HashMap;

/// Source rect within the atlas image, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Fixed-grid sprite atlas geometry plus the glyph→tile mapping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileAtlas {
    /// Tile size in image pixels.
    pub tile_width: u32,
    pub tile_height: u32,
    /// Tiles per atlas row.
    pub columns: u32,
    /// Explicit glyph → tile-index entries. Glyphs absent here fall back to
    /// their code point, which suits atlases laid out in codepage order.
    #[serde(default)]
    pub mapping: HashMap<char, u32>,
}

impl TileAtlas {
    /// Create an atlas with codepoint-order mapping only.
    ///
    /// # Panics
    ///
    /// Panics if any dimension or `columns` is 0.
    #[must_use]
    pub fn new(tile_width: u32, tile_height: u32, columns: u32) -> Self {
        assert!(tile_width > 0 && tile_height > 0, "tile size must be > 0");
        assert!(columns > 0, "atlas must have at least one column");
        Self {
            tile_width,
            tile_height,
            columns,
            mapping: HashMap::new(),
        }
    }

    /// Add an explicit glyph → tile-index entry.
    #[must_use]
    pub fn with_mapping(mut self, glyph: char, index: u32) -> Self {
        self.mapping.insert(glyph, index);
        self
    }

    /// Resolve a glyph to its tile index.
    #[inline]
    #[must_use]
    pub fn tile_index(&self, glyph: char) -> u32 {
        self.mapping.get(&glyph).copied().unwrap_or(glyph as u32)
    }

    /// Source rect of the tile at `index`.
    #[inline]
    #[must_use]
    pub fn tile_rect(&self, index: u32) -> TileRect {
        TileRect {
            x: (index % self.columns) * self.tile_width,
            y: (index / self.columns) * self.tile_height,
            width: self.tile_width,
            height: self.tile_height,
        }
    }

    /// Source rect for a glyph: mapping lookup plus rect math in one step.
    #[inline]
    #[must_use]
    pub fn source_rect(&self, glyph: char) -> TileRect {
        self.tile_rect(self.tile_index(glyph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codepoint_fallback_walks_the_grid() {
        let atlas = TileAtlas::new(8, 8, 16);
        // '@' is 0x40 = 64 = row 4, column 0 in a 16-wide atlas.
        assert_eq!(
            atlas.source_rect('@'),
            TileRect {
                x: 0,
                y: 32,
                width: 8,
                height: 8
            }
        );
        // 'A' is the next tile over.
        assert_eq!(atlas.source_rect('A').x, 8);
        assert_eq!(atlas.source_rect('A').y, 32);
    }

    #[test]
    fn explicit_mapping_wins_over_codepoint() {
        let atlas = TileAtlas::new(16, 16, 8).with_mapping('@', 3);
        assert_eq!(atlas.tile_index('@'), 3);
        assert_eq!(
            atlas.source_rect('@'),
            TileRect {
                x: 48,
                y: 0,
                width: 16,
                height: 16
            }
        );
        // Unmapped glyphs still fall back.
        assert_eq!(atlas.tile_index('A'), 'A' as u32);
    }

    #[test]
    fn deserializes_with_mapping() {
        let atlas: TileAtlas = serde_json::from_str(
            r##"{"tileWidth": 8, "tileHeight": 10, "columns": 32, "mapping": {"@": 0, "#": 1}}"##,
        )
        .unwrap();
        assert_eq!(atlas.tile_index('@'), 0);
        assert_eq!(atlas.tile_index('#'), 1);
        assert_eq!(atlas.tile_rect(33).y, 10);
    }

    #[test]
    #[should_panic(expected = "at least one column")]
    fn zero_columns_panics() {
        let _ = TileAtlas::new(8, 8, 0);
    }
}
