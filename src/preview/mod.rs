//! Markdown preview.
//!
//! Markdown is converted to HTML with comrak; the preview tab shows that
//! HTML source with syntax highlighting.

mod syntax;

pub use syntax::{HighlightBackground, highlight_source, set_background_mode};

use comrak::{Options, markdown_to_html};
use ratatui::text::Line;

/// Convert markdown to HTML.
///
/// Tables, autolinks, strikethrough and task lists are enabled.
///
/// ```
/// let html = mde::preview::render_html("**Hello world!!!**");
/// assert_eq!(html, "<p><strong>Hello world!!!</strong></p>\n");
/// ```
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    markdown_to_html(markdown, &options)
}

/// The rendered preview for one editor revision.
#[derive(Debug, Clone)]
pub struct Preview {
    revision: u64,
    html: String,
    lines: Vec<Line<'static>>,
}

impl Preview {
    pub fn generate(markdown: &str, revision: u64) -> Self {
        let _scope = crate::perf::scope("preview.generate").bytes(markdown.len());
        let html = render_html(markdown);
        let lines = highlight_source(Some("html"), &html);
        tracing::debug!(revision, html_len = html.len(), "preview generated");
        Self {
            revision,
            html,
            lines,
        }
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }
}
