use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::config::Tab;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .file_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map_or_else(
            || "untitled".to_string(),
            |s| s.to_string_lossy().to_string(),
        );
    let dirty_indicator = if model.is_dirty() { " [modified]" } else { "" };
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };

    let status = match model.tab {
        Tab::Write => {
            let cursor = model.surface.buffer().cursor();
            let marks = model
                .overlay
                .backdrop()
                .segments()
                .iter()
                .filter(|s| s.is_highlighted())
                .count();
            format!(
                " WRITE  {filename}{dirty_indicator}{watch_indicator}  Ln {}, Col {}  marks:{marks}  Ctrl+P:preview  F1:help",
                cursor.line + 1,
                cursor.col + 1
            )
        }
        Tab::Preview => {
            let total = model.preview().map_or(0, |p| p.lines().len());
            format!(
                " PREVIEW  {filename}{dirty_indicator}{watch_indicator}  Line {}/{}  Ctrl+P:write  F1:help",
                (model.preview_scroll + 1).min(total.max(1)),
                total
            )
        }
    };

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
