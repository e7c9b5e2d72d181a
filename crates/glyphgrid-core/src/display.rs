#![forbid(unsafe_code)]

//! Display state: dirty-cell tracking and the render sweep.
//!
//! [`DisplayState`] owns two parallel W×H slot arrays stored row-major in
//! flat vectors (`index = y * width + x`):
//!
//! - `rendered`: the cell last handed to the paint callback for each slot
//!   (initially the blank cell).
//! - `pending`: `Some(cell)` for slots written since the last sweep whose
//!   value differs from `rendered`, `None` otherwise.
//!
//! # Invariants
//!
//! 1. Dimensions never change after creation.
//! 2. `pending_count` equals the number of `Some` entries in `pending`.
//! 3. After [`render`](DisplayState::render) returns, every pending slot is
//!    `None` and every rendered slot holds the last non-suppressed write.
//! 4. A write equal to the currently rendered value leaves the slot with no
//!    pending entry — including clearing a stale one, so writing A then the
//!    original back within one frame costs zero paint calls.
//!
//! The sweep commits per cell: `rendered` is updated immediately after each
//! successful paint call, never batched at the end. An error from a fallible
//! callback ([`try_render`](DisplayState::try_render)) therefore leaves
//! already-painted slots committed and the rest still pending, ready to be
//! retried on the next call.

use crate::cell::Cell;

/// A fixed-size grid of cells with incremental repaint tracking.
///
/// # Example
///
/// ```
/// use glyphgrid_core::{Cell, DisplayState, Rgba};
///
/// let mut display = DisplayState::new(80, 24);
/// display.set_cell(1, 1, Cell::new('@', Rgba::rgb(255, 0, 0), Rgba::BLACK));
///
/// let mut painted = Vec::new();
/// display.render(|x, y, cell| painted.push((x, y, cell)));
/// assert_eq!(painted.len(), 1);
///
/// // Nothing changed since, so the next sweep is a no-op.
/// display.render(|_, _, _| unreachable!());
/// ```
#[derive(Debug, Clone)]
pub struct DisplayState {
    width: u16,
    height: u16,
    rendered: Vec<Cell>,
    pending: Vec<Option<Cell>>,
    /// Number of `Some` entries in `pending`. Lets `render` short-circuit
    /// without a W×H scan, and stays exact across same-frame cancellation.
    pending_count: usize,
}

impl DisplayState {
    /// Create a display with every slot rendered as [`Cell::BLANK`].
    ///
    /// # Panics
    ///
    /// Panics if width or height is 0.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_blank(width, height, Cell::BLANK)
    }

    /// Create a display with every slot initially rendered as `blank`.
    ///
    /// The blank cell is what [`get_cell`](Self::get_cell) reports for
    /// never-written slots; it is considered already painted, so filling the
    /// grid with it produces no paint calls.
    ///
    /// # Panics
    ///
    /// Panics if width or height is 0.
    #[must_use]
    pub fn with_blank(width: u16, height: u16, blank: Cell) -> Self {
        assert!(width > 0, "display width must be > 0");
        assert!(height > 0, "display height must be > 0");

        let size = width as usize * height as usize;
        Self {
            width,
            height,
            rendered: vec![blank; size],
            pending: vec![None; size],
            pending_count: 0,
        }
    }

    /// Grid width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// True if any slot has a pending change awaiting the next sweep.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.pending_count > 0
    }

    /// Number of slots awaiting repaint.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending_count
    }

    /// Convert signed coordinates to a linear index.
    ///
    /// Returns `None` for anything outside the grid, negatives included.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < i32::from(self.width) && y >= 0 && y < i32::from(self.height) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Write a cell at `(x, y)`.
    ///
    /// Out-of-bounds coordinates are silently ignored — text routines may
    /// overrun the right edge and rely on this. Writes never fail.
    ///
    /// If `cell` differs from what was last painted at the slot it becomes
    /// the pending value; if it matches, any stale pending entry is cleared
    /// so a write-then-revert within one frame cancels to zero cost.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        let Some(idx) = self.index(x, y) else { return };

        if self.rendered[idx] != cell {
            if self.pending[idx].is_none() {
                self.pending_count += 1;
            }
            self.pending[idx] = Some(cell);
        } else if self.pending[idx].take().is_some() {
            self.pending_count -= 1;
        }
    }

    /// What the grid logically contains at `(x, y)` right now: the pending
    /// value if one exists, otherwise the rendered value.
    ///
    /// Returns `None` out of bounds rather than fabricating a default.
    #[inline]
    #[must_use]
    pub fn get_cell(&self, x: i32, y: i32) -> Option<Cell> {
        let idx = self.index(x, y)?;
        Some(self.pending[idx].unwrap_or(self.rendered[idx]))
    }

    /// Sweep the grid and invoke `paint` once for every slot whose content
    /// changed since the previous sweep.
    ///
    /// Callback coordinates are always in bounds. When nothing is pending
    /// the call returns without scanning. Slots written and then reverted to
    /// their rendered value since the last sweep are never painted.
    pub fn render(&mut self, mut paint: impl FnMut(u16, u16, Cell)) {
        match self.try_render(|x, y, cell| -> Result<(), core::convert::Infallible> {
            paint(x, y, cell);
            Ok(())
        }) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`render`](Self::render).
    ///
    /// Stops at the first callback error and returns it. Commit order is per
    /// cell: paint, then copy into `rendered`, then clear `pending` — so on
    /// error every already-painted slot is committed and the failing slot
    /// (plus any unvisited ones) remains pending for the next call.
    pub fn try_render<E>(
        &mut self,
        mut paint: impl FnMut(u16, u16, Cell) -> Result<(), E>,
    ) -> Result<(), E> {
        if self.pending_count == 0 {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "render_sweep",
            width = self.width,
            height = self.height,
            pending = self.pending_count
        );
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        // Row-major scan; cells are stored row-by-row so access is sequential.
        for y in 0..self.height {
            let row = y as usize * self.width as usize;
            for x in 0..self.width {
                let idx = row + x as usize;
                let Some(cell) = self.pending[idx] else {
                    continue;
                };

                paint(x, y, cell)?;
                self.rendered[idx] = cell;
                self.pending[idx] = None;
                self.pending_count -= 1;

                if self.pending_count == 0 {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("sweep complete");
                    return Ok(());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Rgba;

    fn red_at() -> Cell {
        Cell::new('@', Rgba::rgb(255, 0, 0), Rgba::BLACK)
    }

    fn collect_paints(display: &mut DisplayState) -> Vec<(u16, u16, Cell)> {
        let mut paints = Vec::new();
        display.render(|x, y, cell| paints.push((x, y, cell)));
        paints
    }

    #[test]
    fn fresh_display_renders_nothing() {
        let mut display = DisplayState::new(3, 2);
        assert!(!display.is_dirty());
        assert!(collect_paints(&mut display).is_empty());
    }

    #[test]
    fn write_then_render_paints_exactly_once() {
        let mut display = DisplayState::new(3, 2);
        display.set_cell(1, 1, red_at());
        assert!(display.is_dirty());

        let paints = collect_paints(&mut display);
        assert_eq!(paints, vec![(1, 1, red_at())]);
        assert!(!display.is_dirty());
        assert_eq!(display.get_cell(1, 1), Some(red_at()));
    }

    #[test]
    fn noop_write_paints_nothing() {
        let mut display = DisplayState::new(3, 2);
        display.set_cell(0, 0, Cell::BLANK);
        assert!(!display.is_dirty());
        assert!(collect_paints(&mut display).is_empty());
    }

    #[test]
    fn same_frame_revert_cancels() {
        let mut display = DisplayState::new(3, 2);
        display.set_cell(1, 1, red_at());
        display.set_cell(1, 1, Cell::BLANK);
        assert!(!display.is_dirty());
        assert!(collect_paints(&mut display).is_empty());
    }

    #[test]
    fn revert_after_commit_repaints() {
        // Contrast with same_frame_revert_cancels: once the '@' was painted,
        // writing the blank back is a real change.
        let mut display = DisplayState::new(3, 2);
        display.set_cell(1, 1, red_at());
        assert_eq!(collect_paints(&mut display), vec![(1, 1, red_at())]);

        display.set_cell(1, 1, Cell::BLANK);
        assert_eq!(collect_paints(&mut display), vec![(1, 1, Cell::BLANK)]);
    }

    #[test]
    fn out_of_bounds_writes_ignored() {
        let mut display = DisplayState::new(3, 2);
        display.set_cell(-1, 0, red_at());
        display.set_cell(3, 0, red_at());
        display.set_cell(0, -1, red_at());
        display.set_cell(0, 2, red_at());
        assert!(!display.is_dirty());
        assert!(collect_paints(&mut display).is_empty());
    }

    #[test]
    fn get_cell_out_of_bounds_is_none() {
        let display = DisplayState::new(3, 2);
        assert_eq!(display.get_cell(-1, 0), None);
        assert_eq!(display.get_cell(3, 0), None);
        assert_eq!(display.get_cell(0, 2), None);
        assert_eq!(display.get_cell(2, 1), Some(Cell::BLANK));
    }

    #[test]
    fn get_cell_prefers_pending_over_rendered() {
        let mut display = DisplayState::new(3, 2);
        assert_eq!(display.get_cell(1, 1), Some(Cell::BLANK));
        display.set_cell(1, 1, red_at());
        assert_eq!(display.get_cell(1, 1), Some(red_at()));
    }

    #[test]
    fn second_write_same_frame_keeps_latest() {
        let mut display = DisplayState::new(3, 2);
        display.set_cell(0, 0, red_at());
        display.set_cell(0, 0, Cell::from_glyph('#'));
        assert_eq!(display.pending_len(), 1);
        assert_eq!(
            collect_paints(&mut display),
            vec![(0, 0, Cell::from_glyph('#'))]
        );
    }

    #[test]
    fn sweep_is_row_major() {
        let mut display = DisplayState::new(3, 2);
        display.set_cell(2, 1, Cell::from_glyph('b'));
        display.set_cell(1, 0, Cell::from_glyph('a'));
        let paints = collect_paints(&mut display);
        assert_eq!(
            paints,
            vec![
                (1, 0, Cell::from_glyph('a')),
                (2, 1, Cell::from_glyph('b'))
            ]
        );
    }

    #[test]
    fn custom_blank_suppresses_matching_writes() {
        let blank = Cell::new('.', Rgba::WHITE, Rgba::rgb(16, 16, 16));
        let mut display = DisplayState::with_blank(4, 4, blank);
        display.set_cell(2, 2, blank);
        assert!(!display.is_dirty());
        assert_eq!(display.get_cell(2, 2), Some(blank));
    }

    #[test]
    fn try_render_commits_painted_prefix_only() {
        let mut display = DisplayState::new(3, 1);
        display.set_cell(0, 0, Cell::from_glyph('a'));
        display.set_cell(1, 0, Cell::from_glyph('b'));
        display.set_cell(2, 0, Cell::from_glyph('c'));

        let mut calls = 0;
        let result = display.try_render(|_, _, _| {
            calls += 1;
            if calls == 2 { Err("surface lost") } else { Ok(()) }
        });
        assert_eq!(result, Err("surface lost"));
        assert_eq!(calls, 2);

        // First slot committed, failing and unvisited slots still pending.
        assert_eq!(display.pending_len(), 2);
        assert_eq!(display.get_cell(0, 0), Some(Cell::from_glyph('a')));

        // Retry paints only what is still pending.
        let paints = collect_paints(&mut display);
        assert_eq!(
            paints,
            vec![
                (1, 0, Cell::from_glyph('b')),
                (2, 0, Cell::from_glyph('c'))
            ]
        );
        assert!(!display.is_dirty());
    }

    #[test]
    #[should_panic(expected = "display width must be > 0")]
    fn zero_width_panics() {
        let _ = DisplayState::new(0, 5);
    }
}
