use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Message, Model};
use crate::config::Tab;
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != event::KeyEventKind::Release => {
                Self::handle_key(*key, model)
            }
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) if model.tab == Tab::Write => {
                Some(Message::InsertText(text.replace("\r\n", "\n")))
            }
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_LINES)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_LINES)),
            MouseEventKind::Down(MouseButton::Left) => {
                if mouse.row == 0 {
                    return crate::ui::tab_at_column(mouse.column).map(Message::SelectTab);
                }
                if model.tab != Tab::Write {
                    return None;
                }
                let body_row = usize::from(mouse.row - 1);
                if body_row >= model.surface.viewport().height() as usize {
                    return None;
                }
                let line = model.surface.scroll_top() + body_row;
                let text = model.surface.buffer().line_at(line).unwrap_or_default();
                let display_col =
                    usize::from(mouse.column.saturating_sub(crate::ui::EDITOR_LEFT_PADDING));
                Some(Message::MoveTo(
                    line,
                    crate::ui::byte_col_for_display_col(&text, display_col),
                ))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global keys
        match key.code {
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::Char('s') if ctrl => return Some(Message::Save),
            KeyCode::Char('p') if ctrl => return Some(Message::ToggleTab),
            KeyCode::F(2) => return Some(Message::ToggleTab),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            _ => {}
        }

        // Open suggestion dropdown takes navigation keys
        if model.suggestions.is_some() {
            match key.code {
                KeyCode::Up => return Some(Message::SuggestionPrev),
                KeyCode::Down => return Some(Message::SuggestionNext),
                KeyCode::Enter | KeyCode::Tab => return Some(Message::AcceptSuggestion),
                KeyCode::Esc => return Some(Message::CloseSuggestions),
                _ => {}
            }
        }

        match model.tab {
            Tab::Write => Self::handle_write_key(key, ctrl),
            Tab::Preview => Self::handle_preview_key(key),
        }
    }

    fn handle_write_key(key: event::KeyEvent, ctrl: bool) -> Option<Message> {
        match key.code {
            KeyCode::Tab => Some(Message::ToggleTab),
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }
            _ => None,
        }
    }

    fn handle_preview_key(key: event::KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Tab | KeyCode::Esc => Some(Message::SelectTab(Tab::Write)),
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('?') => Some(Message::ToggleHelp),
            _ => None,
        }
    }
}
