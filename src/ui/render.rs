use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::config::Tab;
use crate::highlight::Segment;
use crate::highlight::segment::floor_char_boundary;

use super::style::{self, HighlightStyle};
use super::{EDITOR_LEFT_PADDING, body_height, overlays, status};

const TAB_LABELS: [(Tab, &str); 2] = [(Tab::Write, " Write "), (Tab::Preview, " Preview ")];
const TAB_GAP: u16 = 1;

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let body = Rect {
        y: area.y + 1,
        height: body_height(area.height).min(area.height.saturating_sub(1)),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    render_tabs(model.tab, frame, Rect { height: 1, ..area });
    frame.render_widget(Clear, body);
    match model.tab {
        Tab::Write => render_write(model, frame, body),
        Tab::Preview => render_preview(model, frame, body),
    }
    status::render_status_bar(model, frame, status_area);

    if model.active_toast().is_some() && body.height > 0 {
        let toast_area = Rect {
            y: body.y + body.height - 1,
            height: 1,
            ..body
        };
        status::render_toast_bar(model, frame, toast_area);
    }

    if model.help_visible {
        overlays::render_help_overlay(frame, area);
    } else if model.tab == Tab::Write {
        overlays::render_suggestions(model, frame, body);
    }
}

/// Tab under a header column, if any.
pub fn tab_at_column(column: u16) -> Option<Tab> {
    let mut x = 0u16;
    for (tab, label) in TAB_LABELS {
        #[allow(clippy::cast_possible_truncation)]
        let width = label.len() as u16;
        if column >= x && column < x + width {
            return Some(tab);
        }
        x += width + TAB_GAP;
    }
    None
}

fn render_tabs(active: Tab, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::with_capacity(TAB_LABELS.len() * 2);
    for (tab, label) in TAB_LABELS {
        let style = if tab == active {
            style::TAB_ACTIVE
        } else {
            style::TAB_INACTIVE
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" ".repeat(TAB_GAP as usize)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_write(model: &Model, frame: &mut Frame, area: Rect) {
    let buffer = model.surface.buffer();
    let backdrop = model.overlay.backdrop();
    let backdrop_lines = backdrop.lines();
    let cursor = buffer.cursor();
    let text_top = model.surface.scroll_top();
    let backdrop_top = backdrop.scroll_top();

    let rows = area.height as usize;
    let total = buffer.line_count();
    let mut content = Vec::with_capacity(rows);
    for row in 0..rows {
        let line_idx = text_top + row;
        if line_idx >= total {
            break;
        }
        let text = buffer.line_at(line_idx).unwrap_or_default();
        let marks = backdrop_lines
            .get(backdrop_top + row)
            .map(|line| highlight_ranges(line))
            .unwrap_or_default();
        let cursor_col = (line_idx == cursor.line).then_some(cursor.col);
        content.push(compose_line(
            &text,
            &marks,
            cursor_col,
            &model.highlight_style,
        ));
    }

    let inner = Rect {
        x: area.x + EDITOR_LEFT_PADDING,
        width: area.width.saturating_sub(EDITOR_LEFT_PADDING),
        ..area
    };
    frame.render_widget(Paragraph::new(content), inner);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(preview) = model.preview() else {
        return;
    };
    let visible: Vec<Line> = preview
        .lines()
        .iter()
        .skip(model.preview_scroll)
        .take(area.height as usize)
        .cloned()
        .collect();
    let inner = Rect {
        x: area.x + EDITOR_LEFT_PADDING,
        width: area.width.saturating_sub(EDITOR_LEFT_PADDING),
        ..area
    };
    frame.render_widget(Paragraph::new(visible), inner);
}

/// Byte ranges of the highlighted segments on one backdrop line.
pub(super) fn highlight_ranges(line: &[Segment]) -> Vec<(Range<usize>, Option<&str>)> {
    let mut offset = 0;
    let mut ranges = Vec::new();
    for segment in line {
        let end = offset + segment.text.len();
        if segment.is_highlighted() {
            ranges.push((offset..end, segment.class()));
        }
        offset = end;
    }
    ranges
}

/// Draw one line of text with the backdrop's marks under it.
pub(super) fn compose_line(
    text: &str,
    marks: &[(Range<usize>, Option<&str>)],
    cursor_col: Option<usize>,
    highlight: &HighlightStyle,
) -> Line<'static> {
    let cursor = cursor_col.map(|col| {
        let start = floor_char_boundary(text, col);
        let len = text[start..].chars().next().map_or(0, char::len_utf8);
        start..start + len
    });

    let mut cuts = vec![0, text.len()];
    for (range, _) in marks {
        cuts.push(floor_char_boundary(text, range.start));
        cuts.push(floor_char_boundary(text, range.end));
    }
    if let Some(cursor) = &cursor {
        cuts.push(cursor.start);
        cuts.push(cursor.end);
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut spans = Vec::with_capacity(cuts.len());
    for pair in cuts.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if start >= end {
            continue;
        }
        let mut span_style = marks
            .iter()
            .find(|(range, _)| range.start <= start && end <= range.end)
            .map_or_else(Style::default, |(_, class)| highlight.style_for(*class));
        if cursor.as_ref().is_some_and(|c| c.start == start) {
            span_style = style::CURSOR;
        }
        spans.push(Span::styled(text[start..end].to_string(), span_style));
    }
    if cursor.is_some_and(|c| c.is_empty()) {
        spans.push(Span::styled(" ", style::CURSOR));
    }
    Line::from(spans)
}
