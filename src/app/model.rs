use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Tab;
use crate::editor::{EditorBuffer, EditorSurface, SurfaceEvents};
use crate::highlight::{HighlightOverlay, HighlightSpec};
use crate::preview::Preview;
use crate::suggest::{SuggestionSource, SuggestionState, StaticSuggestions, active_mention};
use crate::ui::style::HighlightStyle;

pub const DEFAULT_VALUE: &str = "**Hello world!!!**";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The editable surface (buffer + scroll position)
    pub surface: EditorSurface,
    /// Highlight backdrop kept in step with the surface
    pub overlay: HighlightOverlay,
    /// Style used to draw highlighted segments
    pub highlight_style: HighlightStyle,
    /// Selected tab
    pub tab: Tab,
    /// Rendered preview, regenerated when the value has moved on
    pub(super) preview: Option<Preview>,
    /// Scroll offset of the preview pane
    pub preview_scroll: usize,
    /// Open suggestion dropdown
    pub suggestions: Option<SuggestionState>,
    suggestion_source: Box<dyn SuggestionSource>,
    /// Characters that open the suggestion dropdown
    pub triggers: Vec<char>,
    /// File being edited, if any
    pub file_path: Option<PathBuf>,
    /// Whether file watching is enabled
    pub watch_enabled: bool,
    /// Value last loaded from or written to the file
    saved_value: String,
    /// Whether help overlay is visible
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Number of change events forwarded to the host
    pub changes_forwarded: u64,
    /// Set after the first quit attempt with unsaved changes
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("tab", &self.tab)
            .field("scroll_top", &self.surface.scroll_top())
            .field("suggestions_open", &self.suggestions.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(
            "",
            HighlightOverlay::new(|_: &str| HighlightSpec::none()),
            (80, 24),
        )
    }
}

impl Model {
    /// Create a model editing `value`, rendering the first backdrop.
    pub fn new(value: &str, overlay: HighlightOverlay, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            surface: EditorSurface::new(
                value,
                terminal_size.0,
                crate::ui::body_height(terminal_size.1),
            ),
            overlay,
            highlight_style: HighlightStyle::default(),
            tab: Tab::Write,
            preview: None,
            preview_scroll: 0,
            suggestions: None,
            suggestion_source: Box::new(StaticSuggestions::default()),
            triggers: vec!['@'],
            file_path: None,
            watch_enabled: false,
            saved_value: value.to_string(),
            help_visible: false,
            toast: None,
            changes_forwarded: 0,
            quit_confirmed: false,
            should_quit: false,
        };
        if let Err(err) = model.overlay.refresh(value) {
            model.show_toast(ToastLevel::Error, format!("Highlight failed: {err}"));
        }
        model
    }

    #[must_use]
    pub fn with_suggestion_source(mut self, source: impl SuggestionSource + 'static) -> Self {
        self.suggestion_source = Box::new(source);
        self
    }

    #[must_use]
    pub fn with_triggers(mut self, triggers: Vec<char>) -> Self {
        self.triggers = triggers;
        self
    }

    #[must_use]
    pub fn with_file_path(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }

    #[must_use]
    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self.ensure_preview();
        self
    }

    pub fn value(&self) -> String {
        self.surface.value()
    }

    /// Run a buffer operation on the surface and route its events.
    pub(super) fn edit(&mut self, op: impl FnOnce(&mut EditorBuffer)) {
        let events = self.surface.apply(op);
        self.dispatch(events);
        self.refresh_suggestions();
    }

    /// Route surface events: changes re-render the backdrop, scrolls are
    /// mirrored onto it.
    pub(super) fn dispatch(&mut self, events: SurfaceEvents) {
        if let Some(change) = events.change {
            match self.overlay.handle_change(change) {
                Ok(_forwarded) => self.changes_forwarded += 1,
                Err(err) => {
                    tracing::warn!(%err, "backdrop not updated");
                    self.show_toast(ToastLevel::Error, format!("Highlight failed: {err}"));
                }
            }
        }
        if let Some(scroll) = events.scroll {
            self.overlay.handle_scroll(scroll);
        }
    }

    /// Open, update or close the suggestion dropdown for the cursor.
    pub(super) fn refresh_suggestions(&mut self) {
        if self.tab != Tab::Write {
            self.suggestions = None;
            return;
        }
        let buffer = self.surface.buffer();
        let text = buffer.text();
        let Some(mention) = active_mention(&text, buffer.offset(), &self.triggers) else {
            self.suggestions = None;
            return;
        };
        let items = self.suggestion_source.suggestions(&mention.query);
        if items.is_empty() {
            self.suggestions = None;
            return;
        }
        let previous = self.suggestions.take();
        let mut state = SuggestionState::new(mention, items);
        if let Some(prev) = previous
            && prev.mention.start == state.mention.start
            && let Some(current) = prev.current()
            && let Some(idx) = state.items.iter().position(|s| s == current)
        {
            state.selected = idx;
        }
        self.suggestions = Some(state);
    }

    /// Replace the mention with the selected suggestion's value.
    pub(super) fn accept_suggestion(&mut self) -> bool {
        let Some(state) = self.suggestions.take() else {
            return false;
        };
        let Some(choice) = state.current().cloned() else {
            return false;
        };
        tracing::debug!(value = %choice.value, "suggestion accepted");
        let cursor = self.surface.buffer().offset();
        let range = state.mention.replace_range(cursor);
        let events = self
            .surface
            .apply(|buffer| buffer.replace_range(range, &choice.value));
        self.dispatch(events);
        true
    }

    /// Generate the preview if the tab shows it and it is stale.
    pub(super) fn ensure_preview(&mut self) {
        if self.tab != Tab::Preview {
            return;
        }
        let revision = self.surface.buffer().revision();
        if self.preview.as_ref().is_some_and(|p| p.revision() == revision) {
            return;
        }
        self.preview = Some(Preview::generate(&self.surface.value(), revision));
        self.preview_scroll = 0;
    }

    pub const fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub(super) fn preview_max_scroll(&self) -> usize {
        let lines = self.preview.as_ref().map_or(0, |p| p.lines().len());
        lines.saturating_sub(self.surface.viewport().height() as usize)
    }

    /// Replace the value from outside the editor (file reload).
    pub(super) fn set_value(&mut self, value: &str) {
        let events = self.surface.set_value(value);
        self.dispatch(events);
        self.surface_value_settled();
    }

    /// Take a value read back from the file unless it would discard
    /// unsaved edits.
    ///
    /// The echo of our own save (the last saved value) is ignored.
    pub(super) fn reload_value(&mut self, value: &str) {
        if value == self.value() {
            self.record_saved(value);
            return;
        }
        if value == self.saved_value {
            return;
        }
        if self.is_dirty() {
            tracing::warn!(len = value.len(), "external change ignored; buffer has unsaved edits");
            self.show_toast(
                ToastLevel::Warning,
                "File changed on disk; unsaved edits kept (Ctrl+S overwrites)",
            );
            return;
        }
        self.set_value(value);
        self.record_saved(value);
    }

    /// Note that `value` is what the file now holds.
    pub(super) fn record_saved(&mut self, value: &str) {
        value.clone_into(&mut self.saved_value);
        if value == self.value() {
            self.surface.mark_clean();
        }
    }

    fn surface_value_settled(&mut self) {
        self.refresh_suggestions();
        self.ensure_preview();
    }

    pub fn is_dirty(&self) -> bool {
        self.surface.buffer().is_dirty()
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
