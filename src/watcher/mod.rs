//! File watching for external value updates.
//!
//! When the edited file changes on disk, the new contents become the
//! editor's value. Uses notify for cross-platform file system events.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches a single file and emits debounced change notifications.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl FileWatcher {
    /// Create a watcher for `path`.
    ///
    /// # Errors
    /// Returns an error if the file watcher cannot be created or the path cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths from the OS are canonical.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(target = %target_path.display(), root = %watch_root.display(), "watching");

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debounce,
            pending_since: None,
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Returns true once a debounced file change is ready.
    pub fn take_change_ready(&mut self) -> bool {
        let mut saw_relevant_event = false;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => saw_relevant_event = true,
                Ok(ev) => tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "irrelevant fs event"),
                Err(err) => tracing::warn!(%err, "watcher error"),
            }
        }

        if saw_relevant_event {
            self.pending_since = Some(Instant::now());
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    /// Read the file's new contents once a debounced change is ready.
    pub fn poll_contents(&mut self) -> Option<std::io::Result<String>> {
        self.take_change_ready()
            .then(|| std::fs::read_to_string(&self.target_path))
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    #[test]
    fn test_event_for_sibling_file_is_irrelevant() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("notes.md");
        std::fs::write(&path, "hi").expect("write");
        let watcher = FileWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        let event = Event {
            kind: EventKind::Any,
            paths: vec![canonical_dir.join("other.md")],
            attrs: notify::event::EventAttributes::new(),
        };
        assert!(!watcher.is_relevant(&event));
    }

    #[test]
    fn test_directory_level_event_is_relevant() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("notes.md");
        std::fs::write(&path, "hi").expect("write");
        let watcher = FileWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        let event = Event {
            kind: EventKind::Any,
            paths: vec![canonical_dir],
            attrs: notify::event::EventAttributes::new(),
        };
        assert!(watcher.is_relevant(&event));
    }

    #[test]
    fn test_watch_root_for_relative_file_is_dot() {
        assert_eq!(watch_root_for(Path::new("notes.md")), PathBuf::from("."));
    }

    #[test]
    fn test_real_modification_yields_new_contents() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("watched.md");
        std::fs::write(&path, "original").expect("write");

        let mut watcher = FileWatcher::new(&path, Duration::from_millis(50)).expect("watcher");
        std::thread::sleep(Duration::from_millis(500));
        std::fs::write(&path, "**Hello world!!!**").expect("write");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut contents = None;
        while Instant::now() < deadline {
            if let Some(read) = watcher.poll_contents() {
                contents = Some(read.expect("read"));
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        assert_eq!(contents.as_deref(), Some("**Hello world!!!**"));
    }
}
