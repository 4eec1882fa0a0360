use super::buffer::EditorBuffer;
use super::viewport::Viewport;
use super::{ChangeEvent, ScrollEvent};

/// Events emitted by one surface operation, in order: change first,
/// then scroll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceEvents {
    pub change: Option<ChangeEvent>,
    pub scroll: Option<ScrollEvent>,
}

impl SurfaceEvents {
    pub const fn is_empty(&self) -> bool {
        self.change.is_none() && self.scroll.is_none()
    }
}

impl From<Option<ScrollEvent>> for SurfaceEvents {
    fn from(scroll: Option<ScrollEvent>) -> Self {
        Self {
            change: None,
            scroll,
        }
    }
}

/// The editable text surface: a buffer plus its scroll position.
///
/// Operations report what changed as [`SurfaceEvents`] so the host can
/// route them; the surface itself knows nothing about the backdrop.
#[derive(Debug)]
pub struct EditorSurface {
    buffer: EditorBuffer,
    viewport: Viewport,
}

impl EditorSurface {
    pub fn new(text: &str, width: u16, height: u16) -> Self {
        let buffer = EditorBuffer::from_text(text);
        let viewport = Viewport::new(width, height, buffer.line_count());
        Self { buffer, viewport }
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn scroll_top(&self) -> usize {
        self.viewport.offset()
    }

    pub fn value(&self) -> String {
        self.buffer.text()
    }

    /// Record that the current value has been persisted.
    pub const fn mark_clean(&mut self) {
        self.buffer.mark_clean();
    }

    /// Run an edit or cursor movement, then keep the cursor on screen.
    pub fn apply(&mut self, op: impl FnOnce(&mut EditorBuffer)) -> SurfaceEvents {
        let revision = self.buffer.revision();
        let scroll_top = self.viewport.offset();
        op(&mut self.buffer);

        let change = (self.buffer.revision() != revision).then(|| {
            self.viewport.set_total_lines(self.buffer.line_count());
            ChangeEvent::new(self.buffer.text())
        });
        self.viewport.ensure_visible(self.buffer.cursor().line);
        SurfaceEvents {
            change,
            scroll: self.scroll_event_since(scroll_top),
        }
    }

    /// Replace the value from outside the surface (e.g. a file reload).
    pub fn set_value(&mut self, text: &str) -> SurfaceEvents {
        if self.buffer.text() == text {
            return SurfaceEvents::default();
        }
        self.apply(|buffer| buffer.set_text(text))
    }

    pub fn scroll_up(&mut self, n: usize) -> Option<ScrollEvent> {
        let before = self.viewport.offset();
        self.viewport.scroll_up(n);
        self.scroll_event_since(before)
    }

    pub fn scroll_down(&mut self, n: usize) -> Option<ScrollEvent> {
        let before = self.viewport.offset();
        self.viewport.scroll_down(n);
        self.scroll_event_since(before)
    }

    pub fn page_up(&mut self) -> Option<ScrollEvent> {
        let before = self.viewport.offset();
        self.viewport.page_up();
        self.scroll_event_since(before)
    }

    pub fn page_down(&mut self) -> Option<ScrollEvent> {
        let before = self.viewport.offset();
        self.viewport.page_down();
        self.scroll_event_since(before)
    }

    pub fn resize(&mut self, width: u16, height: u16) -> Option<ScrollEvent> {
        let before = self.viewport.offset();
        self.viewport.resize(width, height);
        self.viewport.ensure_visible(self.buffer.cursor().line);
        self.scroll_event_since(before)
    }

    fn scroll_event_since(&self, before: usize) -> Option<ScrollEvent> {
        let now = self.viewport.offset();
        (now != before).then_some(ScrollEvent::new(now))
    }
}
