use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::app::{App, Message, Model, ToastLevel};
use crate::watcher::FileWatcher;

impl App {
    pub(super) fn make_file_watcher(path: &Path) -> notify::Result<FileWatcher> {
        FileWatcher::new(path, Duration::from_millis(200))
    }

    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if let Message::Save = msg {
            Self::save(model);
        }
    }

    /// Pull new contents from the watcher, if a change has settled.
    pub(super) fn poll_watcher(watcher: &mut FileWatcher, model: &mut Model) -> Option<Message> {
        match watcher.poll_contents()? {
            Ok(contents) => Some(Message::SetValue(contents)),
            Err(err) => {
                tracing::warn!(path = %watcher.target_path().display(), %err, "reload failed");
                model.show_toast(ToastLevel::Error, format!("Reload failed: {err}"));
                None
            }
        }
    }

    fn save(model: &mut Model) {
        let Some(path) = model.file_path.clone() else {
            model.show_toast(ToastLevel::Warning, "No file to save to");
            return;
        };
        let value = model.value();
        match write_value(&path, &value) {
            Ok(()) => {
                model.record_saved(&value);
                model.show_toast(ToastLevel::Info, "Saved");
                crate::perf::log_event("save", format!("path={}", path.display()));
                if model.quit_confirmed {
                    model.should_quit = true;
                }
            }
            Err(err) => {
                tracing::error!(path = %path.display(), err = %format!("{err:#}"), "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
            }
        }
    }
}

fn write_value(path: &Path, value: &str) -> Result<()> {
    std::fs::write(path, value).with_context(|| format!("Failed to write {}", path.display()))
}
