//! The editable text surface.
//!
//! A rope-backed buffer with cursor management and a viewport. The
//! surface reports [`ChangeEvent`]s and [`ScrollEvent`]s; the host
//! forwards them to the highlight backdrop.

mod buffer;
mod surface;
mod viewport;

pub use buffer::{Cursor, Direction, EditorBuffer};
pub use surface::{EditorSurface, SurfaceEvents};
pub use viewport::Viewport;

/// The surface's value changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub value: String,
}

impl ChangeEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// The surface scrolled vertically to `scroll_top` (in lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollEvent {
    pub scroll_top: usize,
}

impl ScrollEvent {
    pub const fn new(scroll_top: usize) -> Self {
        Self { scroll_top }
    }
}
