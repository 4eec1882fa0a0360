//! Syntax highlighting for the preview pane.
//!
//! Uses syntect with Sublime Text syntax definitions.

use std::sync::{Mutex, OnceLock};

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

/// Highlight `code` line by line as the language named by `language`.
///
/// Unknown languages fall back to unstyled lines.
pub fn highlight_source(language: Option<&str>, code: &str) -> Vec<Line<'static>> {
    let syntax_set = syntax_set();
    let syntax = language.and_then(|lang| {
        syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| syntax_set.find_syntax_by_name(lang))
    });

    let Some(syntax) = syntax else {
        return code.lines().map(|line| Line::raw(line.to_string())).collect();
    };

    let mode = background_mode();
    let mut highlighter = HighlightLines::new(syntax, theme());
    code.lines()
        .map(|line| {
            let ranges = highlighter
                .highlight_line(line, syntax_set)
                .unwrap_or_default();
            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .map(|(style, text)| {
                    let fg = adjust_fg_for_background(
                        (style.foreground.r, style.foreground.g, style.foreground.b),
                        mode,
                    );
                    Span::styled(
                        text.to_string(),
                        Style::default().fg(Color::Rgb(fg.0, fg.1, fg.2)),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("preview.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let _scope = crate::perf::scope("preview.theme.load_defaults");
        let theme_set = ThemeSet::load_defaults();
        let preferred = match background_mode() {
            BackgroundMode::Dark => ["base16-ocean.dark", "Solarized (dark)"].as_slice(),
            BackgroundMode::Light => ["InspiredGitHub", "Solarized (light)"].as_slice(),
        };

        preferred
            .iter()
            .find_map(|name| theme_set.themes.get(*name).cloned())
            .or_else(|| theme_set.themes.values().next().cloned())
            .unwrap_or_default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackgroundMode {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBackground {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: Mutex<Option<HighlightBackground>> = Mutex::new(None);

/// Force the background used to pick a theme; `None` detects it.
pub fn set_background_mode(mode: Option<HighlightBackground>) {
    if let Ok(mut guard) = BACKGROUND_OVERRIDE.lock() {
        *guard = mode;
    }
}

fn background_mode() -> BackgroundMode {
    let forced = BACKGROUND_OVERRIDE.lock().ok().and_then(|guard| *guard);
    match forced {
        Some(HighlightBackground::Light) => BackgroundMode::Light,
        Some(HighlightBackground::Dark) => BackgroundMode::Dark,
        None => background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()),
    }
}

fn background_mode_from_colorfgbg(colorfgbg: Option<&str>) -> BackgroundMode {
    let Some(value) = colorfgbg else {
        return BackgroundMode::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    match bg_str.parse::<u8>() {
        Ok(bg) if bg >= 7 => BackgroundMode::Light,
        _ => BackgroundMode::Dark,
    }
}

/// Darken bright foregrounds so they stay readable on light terminals.
fn adjust_fg_for_background((r, g, b): (u8, u8, u8), mode: BackgroundMode) -> (u8, u8, u8) {
    if mode == BackgroundMode::Dark {
        return (r, g, b);
    }
    let luma = 0.0722f32.mul_add(
        f32::from(b),
        0.2126f32.mul_add(f32::from(r), 0.7152 * f32::from(g)),
    );
    if luma < 155.0 {
        return (r, g, b);
    }
    // Result is always within 0..=255
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scale = |c: u8| (f32::from(c) * 0.42).round() as u8;
    (scale(r), scale(g), scale(b))
}
