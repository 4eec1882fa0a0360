// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. highlight::HighlightError)
    clippy::module_name_repetitions
)]

//! # mde
//!
//! A terminal markdown editor with a highlight backdrop.
//!
//! The write tab draws the text over a backdrop that marks highlighted
//! ranges or pattern matches, kept in step with every edit and scroll.
//! The preview tab shows the markdown rendered to HTML. Typing `@`
//! opens mention suggestions.
//!
//! ## Architecture
//!
//! mde uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Text buffer and scrollable editing surface
//! - [`highlight`]: Range merging, segments, `<mark>` markup, the overlay
//! - [`preview`]: Markdown to HTML
//! - [`suggest`]: Mention suggestions
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: File watching

pub mod app;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod perf;
pub mod preview;
pub mod suggest;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{ChangeEvent, EditorSurface, ScrollEvent};
    pub use crate::highlight::{HighlightError, HighlightOverlay, HighlightSpec, Interval};
}
