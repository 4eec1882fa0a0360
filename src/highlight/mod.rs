//! Highlight backdrop for the editable surface.
//!
//! - [`ranges`]: interval merging
//! - [`segment`]: plain/highlighted partitioning
//! - [`markup`]: pattern matches wrapped in `<mark>`
//! - [`spec`]: highlight specifications and highlighters
//! - [`overlay`]: the backdrop and its scroll synchronization

pub mod markup;
pub mod overlay;
pub mod ranges;
pub mod segment;
pub mod spec;

pub use markup::{Pattern, escape_html, mark_pattern};
pub use overlay::{Backdrop, BackdropContent, HighlightOverlay};
pub use ranges::{Interval, merge};
pub use segment::{Segment, SegmentKind, partition};
pub use spec::{
    HighlightSpec, Highlighter, NeedleHighlighter, PatternHighlighter, PayloadHighlighter,
    find_indices,
};

/// Errors raised by a highlight render pass.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The highlighter returned something that is neither a range list
    /// nor a pattern.
    #[error("unrecognized highlight payload: expected a range list or a pattern, got {shape}")]
    Misuse { shape: String },
    #[error("invalid highlight pattern `{source_text}`: {err}")]
    InvalidPattern {
        source_text: String,
        #[source]
        err: regex::Error,
    },
}

impl HighlightError {
    pub(crate) fn misuse(shape: impl Into<String>) -> Self {
        Self::Misuse {
            shape: shape.into(),
        }
    }
}
