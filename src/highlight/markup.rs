//! Pattern-based highlighting rendered as `<mark>` markup.

use std::borrow::Cow;

use regex::Regex;

use super::HighlightError;
use super::ranges::Interval;

pub const OPEN_MARK: &str = "<mark>";
pub const CLOSE_MARK: &str = "</mark>";

/// A compiled search expression used in place of explicit ranges.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern from regex source.
    ///
    /// # Errors
    /// Returns [`HighlightError::InvalidPattern`] if the source does not compile.
    pub fn new(source: &str) -> Result<Self, HighlightError> {
        let regex = Regex::new(source).map_err(|err| HighlightError::InvalidPattern {
            source_text: source.to_string(),
            err,
        })?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Non-empty matches of the pattern as intervals over the raw text.
    pub fn intervals(&self, text: &str) -> Vec<Interval> {
        self.regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| Interval::new(m.start(), m.end()))
            .collect()
    }
}

/// Escape characters that would otherwise be read as HTML markup.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Escape `text`, then wrap every match of `pattern` in the escaped text
/// with `<mark>`/`</mark>`.
///
/// Substitution runs on the escaped text, so a pattern aimed at a raw
/// `<` has to be written against `&lt;`.
///
/// ```
/// use mde::highlight::{mark_pattern, Pattern};
///
/// let pattern = Pattern::new("Hello").unwrap();
/// assert_eq!(
///     mark_pattern("<b>Hello</b>", &pattern),
///     "&lt;b&gt;<mark>Hello</mark>&lt;/b&gt;"
/// );
/// ```
pub fn mark_pattern(text: &str, pattern: &Pattern) -> String {
    let escaped = escape_html(text);
    let mut out = String::with_capacity(escaped.len());
    let mut last = 0;
    for m in pattern.regex.find_iter(&escaped) {
        if m.is_empty() {
            continue;
        }
        out.push_str(&escaped[last..m.start()]);
        out.push_str(OPEN_MARK);
        out.push_str(m.as_str());
        out.push_str(CLOSE_MARK);
        last = m.end();
    }
    out.push_str(&escaped[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervals_match_raw_text() {
        let pattern = Pattern::new("&").unwrap();
        assert_eq!(pattern.intervals("a&b"), vec![Interval::new(1, 2)]);
        assert_eq!(mark_pattern("a&b", &pattern), "a<mark>&</mark>amp;b");
    }

    #[test]
    fn test_escape_html_leaves_plain_text_borrowed() {
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_escape_html_escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_mark_pattern_wraps_every_match() {
        let pattern = Pattern::new("o").unwrap();
        assert_eq!(
            mark_pattern("foo", &pattern),
            "f<mark>o</mark><mark>o</mark>"
        );
    }

    #[test]
    fn test_mark_pattern_does_not_mark_raw_markup() {
        let pattern = Pattern::new("<b>").unwrap();
        assert_eq!(mark_pattern("<b>x</b>", &pattern), "&lt;b&gt;x&lt;/b&gt;");
    }

    #[test]
    fn test_mark_pattern_skips_empty_matches() {
        let pattern = Pattern::new("x*").unwrap();
        assert_eq!(mark_pattern("axb", &pattern), "a<mark>x</mark>b");
    }

    #[test]
    fn test_invalid_pattern_reports_source() {
        let err = Pattern::new("(unclosed").unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
