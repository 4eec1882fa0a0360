//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: Tabs header, write and preview panes
//! - [`style`]: Highlight colours

pub mod style;

mod overlays;
mod render;
mod status;

pub use overlays::suggestion_popup_rect;
pub use render::{render, tab_at_column};

use unicode_width::UnicodeWidthChar;

pub const EDITOR_LEFT_PADDING: u16 = 1;
/// Rows taken by the tabs header and the status bar.
pub const CHROME_ROWS: u16 = 2;

/// Rows available to the write or preview pane for a terminal height.
pub const fn body_height(terminal_height: u16) -> u16 {
    let rows = terminal_height.saturating_sub(CHROME_ROWS);
    if rows == 0 { 1 } else { rows }
}

/// Byte column in `line` under a display column, clamped to the line end.
pub fn byte_col_for_display_col(line: &str, display_col: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in line.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > display_col {
            return idx;
        }
        width += w;
    }
    line.len()
}

/// Display width of `line[..byte_col]`.
pub fn display_width_to(line: &str, byte_col: usize) -> usize {
    line.get(..byte_col)
        .map_or(0, unicode_width::UnicodeWidthStr::width)
}
