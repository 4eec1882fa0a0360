use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::suggest::Suggestion;

use super::{EDITOR_LEFT_PADDING, display_width_to};

const MAX_VISIBLE_SUGGESTIONS: usize = 6;

/// Where the dropdown goes for a mention anchored at (`x`, `y`).
///
/// Opens below the anchor row, or above it when the body has no room.
pub fn suggestion_popup_rect(area: Rect, x: u16, y: u16, items: &[Suggestion]) -> Rect {
    let widest = items
        .iter()
        .map(|item| item.preview.width())
        .max()
        .unwrap_or(0);
    let width = u16::try_from(widest)
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(area.width);
    #[allow(clippy::cast_possible_truncation)]
    let height = (items.len().min(MAX_VISIBLE_SUGGESTIONS) as u16 + 2).min(area.height);

    let below = y + 1;
    let popup_y = if below + height <= area.y + area.height {
        below
    } else {
        y.saturating_sub(height).max(area.y)
    };
    let max_x = (area.x + area.width).saturating_sub(width);
    Rect::new(x.min(max_x), popup_y, width, height)
}

pub fn render_suggestions(model: &Model, frame: &mut Frame, body: Rect) {
    let Some(state) = model.suggestions.as_ref() else {
        return;
    };
    let buffer = model.surface.buffer();
    let cursor = buffer.cursor();
    let Some(row) = cursor.line.checked_sub(model.surface.scroll_top()) else {
        return;
    };
    if row >= body.height as usize {
        return;
    }
    let line = buffer.line_at(cursor.line).unwrap_or_default();
    let trigger_col = cursor
        .col
        .saturating_sub(buffer.offset().saturating_sub(state.mention.start));
    #[allow(clippy::cast_possible_truncation)]
    let x = body.x + EDITOR_LEFT_PADDING + display_width_to(&line, trigger_col) as u16;
    #[allow(clippy::cast_possible_truncation)]
    let y = body.y + row as u16;
    let popup = suggestion_popup_rect(body, x, y, &state.items);

    let visible_rows = popup.height.saturating_sub(2) as usize;
    let first = (state.selected + 1).saturating_sub(visible_rows);
    let lines: Vec<Line> = state
        .items
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_rows)
        .map(|(idx, item)| {
            let style = if idx == state.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::styled(format!(" {} ", item.preview), style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::styled("Tabs", section_style),
        Line::raw("  Ctrl-p / F2         Write / preview"),
        Line::raw("  Tab                 Switch tab (no dropdown open)"),
        Line::raw(""),
        Line::styled("Write", section_style),
        Line::raw("  Arrows, Home/End    Move cursor"),
        Line::raw("  Ctrl+Left/Right     Word movement"),
        Line::raw("  Ctrl+Home/End       Value start / end"),
        Line::raw("  PageUp/PageDown     Scroll"),
        Line::raw("  Ctrl-s              Save file"),
        Line::raw(""),
        Line::styled("Mentions", section_style),
        Line::raw("  @name               Open suggestions"),
        Line::raw("  Up/Down             Choose"),
        Line::raw("  Enter / Tab         Insert"),
        Line::raw("  Esc                 Dismiss"),
        Line::raw(""),
        Line::styled("Other", section_style),
        Line::raw("  Ctrl-q / Ctrl-c     Quit"),
        Line::raw("  F1                  Toggle help"),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
