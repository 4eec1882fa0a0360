//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{DEFAULT_VALUE, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::Tab;
use crate::highlight::HighlightOverlay;
use crate::suggest::StaticSuggestions;
use crate::ui::style::HighlightStyle;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    initial_value: String,
    overlay: Option<HighlightOverlay>,
    highlight_style: HighlightStyle,
    suggestions: StaticSuggestions,
    triggers: Vec<char>,
    tab: Tab,
    watch_enabled: bool,
}

impl App {
    /// Create an application editing `initial_value` with the given overlay.
    pub fn new(initial_value: impl Into<String>, overlay: HighlightOverlay) -> Self {
        Self {
            file_path: None,
            initial_value: initial_value.into(),
            overlay: Some(overlay),
            highlight_style: HighlightStyle::default(),
            suggestions: StaticSuggestions::default(),
            triggers: vec!['@'],
            tab: Tab::Write,
            watch_enabled: false,
        }
    }

    /// File the value is saved to (and watched, if enabled).
    #[must_use]
    pub fn with_file_path(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }

    /// Enable or disable file watching.
    #[must_use]
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Set the tab shown at startup.
    #[must_use]
    pub const fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// Set the mention suggestion list.
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: StaticSuggestions) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Set the background colour of unclassed highlights.
    #[must_use]
    pub fn with_highlight_color(mut self, color: ratatui::style::Color) -> Self {
        self.highlight_style = self.highlight_style.with_background(color);
        self
    }

    /// Set the characters that open the suggestion dropdown.
    #[must_use]
    pub fn with_triggers(mut self, triggers: Vec<char>) -> Self {
        self.triggers = triggers;
        self
    }
}
