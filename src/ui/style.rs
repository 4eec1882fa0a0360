use std::collections::BTreeMap;

use ratatui::style::{Color, Modifier, Style};

/// How highlighted segments are drawn.
///
/// Unclassed highlights use the background colour, keeping the
/// text's own foreground unless one is set. Classed highlights (from
/// range payloads) can be given their own style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    pub background: Color,
    /// `None` inherits the text colour.
    pub foreground: Option<Color>,
    classes: BTreeMap<String, Style>,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            background: Color::Yellow,
            foreground: None,
            classes: BTreeMap::new(),
        }
    }
}

impl HighlightStyle {
    #[must_use]
    pub const fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub const fn with_foreground(mut self, foreground: Option<Color>) -> Self {
        self.foreground = foreground;
        self
    }

    /// Style used for highlights carrying `class`.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>, style: Style) -> Self {
        self.classes.insert(class.into(), style);
        self
    }

    /// Style for a highlighted segment, falling back to the default
    /// highlight for unknown classes.
    pub fn style_for(&self, class: Option<&str>) -> Style {
        if let Some(style) = class.and_then(|c| self.classes.get(c)) {
            return *style;
        }
        let style = Style::default().bg(self.background);
        match self.foreground {
            Some(fg) => style.fg(fg),
            None => style,
        }
    }
}

/// Parse a colour name or `#rrggbb` hex value.
pub fn parse_color(s: &str) -> Option<Color> {
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    s.parse().ok()
}

pub const CURSOR: Style = Style::new().bg(Color::White).fg(Color::Black);
pub const TAB_ACTIVE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);
pub const TAB_INACTIVE: Style = Style::new().fg(Color::Indexed(245));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_highlight_is_yellow_and_inherits_foreground() {
        let style = HighlightStyle::default().style_for(None);
        assert_eq!(style.bg, Some(Color::Yellow));
        assert_eq!(style.fg, None);
    }

    #[test]
    fn test_class_style_overrides_default() {
        let style = HighlightStyle::default()
            .with_class("error", Style::default().bg(Color::Red));
        assert_eq!(style.style_for(Some("error")).bg, Some(Color::Red));
        assert_eq!(style.style_for(Some("other")).bg, Some(Color::Yellow));
    }

    #[test]
    fn test_foreground_override_applies() {
        let style = HighlightStyle::default()
            .with_background(Color::Blue)
            .with_foreground(Some(Color::White))
            .style_for(None);
        assert_eq!(style.bg, Some(Color::Blue));
        assert_eq!(style.fg, Some(Color::White));
    }

    #[test]
    fn test_parse_color_names_and_hex() {
        assert_eq!(parse_color("yellow"), Some(Color::Yellow));
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color("#ff80"), None);
        assert_eq!(parse_color("#gg0000"), None);
    }
}
