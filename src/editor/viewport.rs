//! Viewport management for the editable surface.
//!
//! The [`Viewport`] is the single source of truth for the surface's
//! vertical scroll offset.

use std::ops::Range;

/// The visible window over the editor's lines.
///
/// # Example
///
/// ```
/// use mde::editor::Viewport;
///
/// let mut vp = Viewport::new(80, 24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Lines currently on screen, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    /// Scroll the minimum amount needed to put `line` on screen.
    pub fn ensure_visible(&mut self, line: usize) {
        if line < self.offset {
            self.offset = line;
        } else if self.height > 0 && line >= self.offset + self.height as usize {
            self.offset = line + 1 - self.height as usize;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the total number of lines (e.g., after an edit).
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_down_clamps_to_max() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(1000);
        assert_eq!(vp.offset(), 76);
    }

    #[test]
    fn test_scroll_up_clamps_to_zero() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(10);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_page_down_and_up() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 24);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_visible_range_with_short_content() {
        let vp = Viewport::new(80, 24, 10);
        assert_eq!(vp.visible_range(), 0..10);
    }

    #[test]
    fn test_ensure_visible_scrolls_down_minimally() {
        let mut vp = Viewport::new(80, 10, 100);
        vp.ensure_visible(15);
        assert_eq!(vp.offset(), 6);
        assert!(vp.visible_range().contains(&15));
    }

    #[test]
    fn test_ensure_visible_scrolls_up() {
        let mut vp = Viewport::new(80, 10, 100);
        vp.scroll_down(50);
        vp.ensure_visible(20);
        assert_eq!(vp.offset(), 20);
    }

    #[test]
    fn test_ensure_visible_noop_when_on_screen() {
        let mut vp = Viewport::new(80, 10, 100);
        vp.scroll_down(5);
        vp.ensure_visible(9);
        assert_eq!(vp.offset(), 5);
    }

    #[test]
    fn test_set_total_lines_adjusts_offset() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(80);
        vp.set_total_lines(50);
        assert_eq!(vp.offset(), 26);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scroll_never_exceeds_bounds(
                total_lines in 1..10000usize,
                height in 1..100u16,
                scroll_amount in 0..10000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                vp.scroll_down(scroll_amount);
                prop_assert!(vp.offset() <= total_lines.saturating_sub(height as usize));
            }

            #[test]
            fn ensure_visible_puts_line_on_screen(
                total_lines in 1..5000usize,
                height in 1..100u16,
                line_seed in 0..5000usize,
            ) {
                let line = line_seed % total_lines;
                let mut vp = Viewport::new(80, height, total_lines);
                vp.ensure_visible(line);
                prop_assert!(vp.visible_range().contains(&line));
            }
        }
    }
}
