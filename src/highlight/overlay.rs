//! The highlight backdrop drawn beneath the editable surface.
//!
//! The overlay owns a [`Highlighter`] and the last successfully rendered
//! [`Backdrop`]. Each change event triggers one render pass; a pass that
//! fails leaves the previous backdrop untouched. Scroll events copy the
//! surface's offset onto the backdrop and nothing flows the other way.

use std::fmt::Write;

use super::markup::{CLOSE_MARK, OPEN_MARK, escape_html, mark_pattern};
use super::ranges::merge;
use super::segment::{Segment, SegmentKind, partition};
use super::spec::{HighlightSpec, Highlighter};
use super::HighlightError;
use crate::editor::{ChangeEvent, ScrollEvent};

/// Rendered backdrop content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackdropContent {
    /// Plain and highlighted runs from an explicit range list.
    Segments(Vec<Segment>),
    /// Escaped text with `<mark>` wrapped pattern matches, plus the
    /// pattern's matches over the raw text for drawing.
    Markup {
        markup: String,
        segments: Vec<Segment>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backdrop {
    content: BackdropContent,
    trailing_blank_line: bool,
    scroll_top: usize,
}

impl Backdrop {
    pub const fn empty() -> Self {
        Self {
            content: BackdropContent::Segments(Vec::new()),
            trailing_blank_line: false,
            scroll_top: 0,
        }
    }

    /// Render `text` according to `spec`.
    pub fn render(text: &str, spec: HighlightSpec) -> Self {
        let content = match spec {
            HighlightSpec::Ranges(ranges) => {
                let merged = merge(ranges);
                BackdropContent::Segments(partition(text, &merged))
            }
            HighlightSpec::Pattern(pattern) => BackdropContent::Markup {
                markup: mark_pattern(text, &pattern),
                segments: partition(text, &merge(pattern.intervals(text))),
            },
        };
        Self {
            content,
            trailing_blank_line: text.ends_with('\n'),
            scroll_top: 0,
        }
    }

    pub const fn content(&self) -> &BackdropContent {
        &self.content
    }

    /// Whether the text ended in a newline, so one blank line must be
    /// reserved after the last rendered line.
    pub const fn trailing_blank_line(&self) -> bool {
        self.trailing_blank_line
    }

    pub const fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub const fn set_scroll_top(&mut self, scroll_top: usize) {
        self.scroll_top = scroll_top;
    }

    /// Segments for drawing; they always concatenate to the rendered text.
    pub fn segments(&self) -> &[Segment] {
        match &self.content {
            BackdropContent::Segments(segments) | BackdropContent::Markup { segments, .. } => {
                segments
            }
        }
    }

    /// The backdrop as HTML: escaped text with highlights wrapped in
    /// `<mark>`, classed highlights carrying a `class` attribute.
    pub fn to_markup(&self) -> String {
        match &self.content {
            BackdropContent::Markup { markup, .. } => markup.clone(),
            BackdropContent::Segments(segments) => {
                let mut out = String::with_capacity(segments.len() * 8);
                for segment in segments {
                    let text = escape_html(&segment.text);
                    match &segment.kind {
                        SegmentKind::Plain => out.push_str(&text),
                        SegmentKind::Highlighted { class: None } => {
                            out.push_str(OPEN_MARK);
                            out.push_str(&text);
                            out.push_str(CLOSE_MARK);
                        }
                        SegmentKind::Highlighted { class: Some(class) } => {
                            let _ = write!(out, "<mark class=\"{}\">", escape_html(class));
                            out.push_str(&text);
                            out.push_str(CLOSE_MARK);
                        }
                    }
                }
                out
            }
        }
    }

    /// Segments grouped by line, newlines removed.
    ///
    /// A backdrop for text ending in `\n` yields a final empty line.
    pub fn lines(&self) -> Vec<Vec<Segment>> {
        let mut lines: Vec<Vec<Segment>> = vec![Vec::new()];
        for segment in self.segments() {
            let mut parts = segment.text.split('\n');
            if let Some(first) = parts.next() {
                push_part(&mut lines, first, segment);
            }
            for part in parts {
                lines.push(Vec::new());
                push_part(&mut lines, part, segment);
            }
        }
        if self.trailing_blank_line && lines.last().is_some_and(|line| !line.is_empty()) {
            lines.push(Vec::new());
        }
        lines
    }

    /// Number of lines the backdrop occupies, including the reserved
    /// trailing blank line.
    pub fn line_count(&self) -> usize {
        self.lines().len()
    }
}

fn push_part(lines: &mut [Vec<Segment>], part: &str, like: &Segment) {
    if part.is_empty() {
        return;
    }
    if let Some(line) = lines.last_mut() {
        line.push(Segment {
            text: part.to_string(),
            kind: like.kind.clone(),
        });
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::empty()
    }
}

/// Keeps a [`Backdrop`] in step with the editable surface.
pub struct HighlightOverlay {
    highlighter: Box<dyn Highlighter>,
    text: String,
    backdrop: Backdrop,
}

impl std::fmt::Debug for HighlightOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightOverlay")
            .field("text_len", &self.text.len())
            .field("backdrop", &self.backdrop)
            .finish_non_exhaustive()
    }
}

impl HighlightOverlay {
    pub fn new(highlighter: impl Highlighter + 'static) -> Self {
        Self {
            highlighter: Box::new(highlighter),
            text: String::new(),
            backdrop: Backdrop::empty(),
        }
    }

    pub const fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// The text the current backdrop was rendered from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Swap the highlighter and re-render the current text.
    ///
    /// # Errors
    /// Propagates the render error; the old backdrop is kept on failure.
    pub fn set_highlighter(
        &mut self,
        highlighter: impl Highlighter + 'static,
    ) -> Result<(), HighlightError> {
        self.highlighter = Box::new(highlighter);
        let text = std::mem::take(&mut self.text);
        let result = self.refresh(&text).map(|_| ());
        if result.is_err() {
            self.text = text;
        }
        result
    }

    /// Run one render pass for `text` and commit it.
    ///
    /// # Errors
    /// Returns the highlighter's error; nothing is committed in that case.
    pub fn refresh(&mut self, text: &str) -> Result<&Backdrop, HighlightError> {
        let _scope = crate::perf::scope("overlay.refresh").bytes(text.len());
        let spec = self.highlighter.highlight(text).inspect_err(|err| {
            tracing::warn!(%err, text_len = text.len(), "highlight pass rejected");
        })?;
        let mut backdrop = Backdrop::render(text, spec);
        backdrop.set_scroll_top(self.backdrop.scroll_top());
        crate::perf::log_event(
            "overlay.render",
            format!(
                "text_len={} lines={} trailing_blank={}",
                text.len(),
                backdrop.line_count(),
                backdrop.trailing_blank_line()
            ),
        );
        self.text.clear();
        self.text.push_str(text);
        self.backdrop = backdrop;
        Ok(&self.backdrop)
    }

    /// Re-render for a change event and hand the event back unmodified.
    ///
    /// # Errors
    /// Returns the render error; the previous backdrop stays committed.
    pub fn handle_change(&mut self, event: ChangeEvent) -> Result<ChangeEvent, HighlightError> {
        self.refresh(&event.value)?;
        Ok(event)
    }

    /// Mirror the surface's scroll offset and hand the event back.
    pub fn handle_scroll(&mut self, event: ScrollEvent) -> ScrollEvent {
        tracing::trace!(scroll_top = event.scroll_top, "backdrop scroll");
        self.backdrop.set_scroll_top(event.scroll_top);
        event
    }
}
