//! Partitioning text into plain and highlighted segments.

use super::ranges::Interval;

/// Whether a segment is drawn plain or marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    Plain,
    Highlighted { class: Option<String> },
}

/// A contiguous slice of the text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SegmentKind::Plain,
        }
    }

    pub fn highlighted(text: impl Into<String>, class: Option<String>) -> Self {
        Self {
            text: text.into(),
            kind: SegmentKind::Highlighted { class },
        }
    }

    pub const fn is_highlighted(&self) -> bool {
        matches!(self.kind, SegmentKind::Highlighted { .. })
    }

    pub fn class(&self) -> Option<&str> {
        match &self.kind {
            SegmentKind::Highlighted { class } => class.as_deref(),
            SegmentKind::Plain => None,
        }
    }
}

/// Split `text` into alternating plain/highlighted segments.
///
/// `merged` is expected to be the output of [`super::merge`]. Ranges are
/// clipped to the text and snapped down to char boundaries; anything
/// that ends up empty is skipped, so the segments always concatenate
/// back to `text`.
pub fn partition(text: &str, merged: &[Interval]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(merged.len() * 2 + 1);
    let mut offset = 0;

    for range in merged {
        let start = floor_char_boundary(text, range.start).max(offset);
        let end = floor_char_boundary(text, range.end);
        if end <= start {
            continue;
        }
        if start > offset {
            segments.push(Segment::plain(&text[offset..start]));
        }
        segments.push(Segment::highlighted(&text[start..end], range.class.clone()));
        offset = end;
    }

    if offset < text.len() {
        segments.push(Segment::plain(&text[offset..]));
    }
    segments
}

/// Largest char boundary `<= index`, clamped to the text length.
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
