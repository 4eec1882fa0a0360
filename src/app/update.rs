use crate::app::{Model, ToastLevel};
use crate::config::Tab;
use crate::editor::{Direction, EditorBuffer};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert pasted text at the cursor
    InsertText(String),
    /// Split line at cursor (Enter)
    SplitLine,
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,

    // Cursor
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    MoveWordRight,
    /// Move cursor to start of value (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of value (Ctrl+End)
    MoveToEnd,
    /// Move cursor to absolute position (line, col), e.g. from a mouse click
    MoveTo(usize, usize),

    // Scrolling
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,

    // Tabs
    /// Switch between write and preview
    ToggleTab,
    /// Show a specific tab
    SelectTab(Tab),

    // Suggestions
    /// Highlight the next suggestion
    SuggestionNext,
    /// Highlight the previous suggestion
    SuggestionPrev,
    /// Insert the highlighted suggestion
    AcceptSuggestion,
    /// Dismiss the dropdown
    CloseSuggestions,

    // External
    /// Value replaced from outside the editor (file changed on disk)
    SetValue(String),
    /// Write the value to the file
    Save,

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Save preserves the flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        // Editing
        Message::InsertChar(ch) => model.edit(|b| b.insert_char(ch)),
        Message::InsertText(text) => model.edit(|b| b.insert_str(&text)),
        Message::SplitLine => model.edit(EditorBuffer::split_line),
        Message::DeleteBack => model.edit(|b| {
            b.delete_back();
        }),
        Message::DeleteForward => model.edit(|b| {
            b.delete_forward();
        }),

        // Cursor
        Message::MoveCursor(direction) => model.edit(|b| b.move_cursor(direction)),
        Message::MoveHome => model.edit(EditorBuffer::move_home),
        Message::MoveEnd => model.edit(EditorBuffer::move_end),
        Message::MoveWordLeft => model.edit(EditorBuffer::move_word_left),
        Message::MoveWordRight => model.edit(EditorBuffer::move_word_right),
        Message::MoveToStart => model.edit(EditorBuffer::move_to_start),
        Message::MoveToEnd => model.edit(EditorBuffer::move_to_end),
        Message::MoveTo(line, col) => model.edit(|b| b.move_to(line, col)),

        // Scrolling
        Message::ScrollUp(n) => match model.tab {
            Tab::Write => {
                let scroll = model.surface.scroll_up(n);
                model.dispatch(scroll.into());
            }
            Tab::Preview => model.preview_scroll = model.preview_scroll.saturating_sub(n),
        },
        Message::ScrollDown(n) => match model.tab {
            Tab::Write => {
                let scroll = model.surface.scroll_down(n);
                model.dispatch(scroll.into());
            }
            Tab::Preview => {
                model.preview_scroll = (model.preview_scroll + n).min(model.preview_max_scroll());
            }
        },
        Message::PageUp => match model.tab {
            Tab::Write => {
                let scroll = model.surface.page_up();
                model.dispatch(scroll.into());
            }
            Tab::Preview => {
                let page = model.surface.viewport().height() as usize;
                model.preview_scroll = model.preview_scroll.saturating_sub(page);
            }
        },
        Message::PageDown => match model.tab {
            Tab::Write => {
                let scroll = model.surface.page_down();
                model.dispatch(scroll.into());
            }
            Tab::Preview => {
                let page = model.surface.viewport().height() as usize;
                model.preview_scroll =
                    (model.preview_scroll + page).min(model.preview_max_scroll());
            }
        },

        // Tabs
        Message::ToggleTab => {
            let tab = model.tab.toggled();
            select_tab(&mut model, tab);
        }
        Message::SelectTab(tab) => select_tab(&mut model, tab),

        // Suggestions
        Message::SuggestionNext => {
            if let Some(state) = model.suggestions.as_mut() {
                state.select_next();
            }
        }
        Message::SuggestionPrev => {
            if let Some(state) = model.suggestions.as_mut() {
                state.select_prev();
            }
        }
        Message::AcceptSuggestion => {
            model.accept_suggestion();
        }
        Message::CloseSuggestions => model.suggestions = None,

        // External
        Message::SetValue(value) => {
            model.reload_value(&value);
        }
        // Writing happens in the side-effect handler.
        Message::Save => {}

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        // Window
        Message::Resize(width, height) => {
            let scroll = model
                .surface
                .resize(width, crate::ui::body_height(height));
            model.dispatch(scroll.into());
        }

        // Application
        Message::Quit => {
            if model.is_dirty() && model.file_path.is_some() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

fn select_tab(model: &mut Model, tab: Tab) {
    if model.tab == tab {
        return;
    }
    tracing::debug!(tab = tab.as_str(), "tab selected");
    model.tab = tab;
    model.ensure_preview();
    model.refresh_suggestions();
}
