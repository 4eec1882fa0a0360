//! Lightweight performance instrumentation.
//!
//! Timing scopes aggregate per name (count, total, slowest, bytes
//! processed) while enabled, so the editor can report how its highlight
//! and preview passes behaved over a session. Render events can also be
//! appended to a debug log file.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static DEBUG_LOG: LazyLock<Mutex<Option<DebugLog>>> = LazyLock::new(|| Mutex::new(None));
static STATS: LazyLock<Mutex<BTreeMap<&'static str, ScopeStats>>> =
    LazyLock::new(|| Mutex::new(BTreeMap::new()));

/// Aggregated timings for one scope name.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScopeStats {
    pub count: u64,
    pub total_ms: f64,
    pub max_ms: f64,
    /// Bytes of text handled across all passes, when the scope reports it.
    pub bytes: u64,
}

impl ScopeStats {
    pub fn mean_ms(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.count as f64;
        self.total_ms / count
    }

    fn record(&mut self, elapsed_ms: f64, bytes: usize) {
        self.count += 1;
        self.total_ms += elapsed_ms;
        self.max_ms = self.max_ms.max(elapsed_ms);
        self.bytes += u64::try_from(bytes).unwrap_or(u64::MAX);
    }
}

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
    bytes: usize,
}

impl Scope {
    /// Attribute `bytes` of processed text to this pass.
    #[must_use]
    pub const fn bytes(mut self, bytes: usize) -> Self {
        self.bytes = bytes;
        self
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(target: "mde::perf", scope = self.name, elapsed_ms, bytes = self.bytes);
        if let Ok(mut stats) = STATS.lock() {
            stats
                .entry(self.name)
                .or_default()
                .record(elapsed_ms, self.bytes);
        }
    }
}

#[derive(Debug)]
struct DebugLog {
    start: Instant,
    writer: BufWriter<File>,
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
        bytes: 0,
    }
}

/// Snapshot of the aggregated scope timings, sorted by name.
pub fn stats() -> Vec<(&'static str, ScopeStats)> {
    STATS
        .lock()
        .map(|stats| stats.iter().map(|(name, s)| (*name, *s)).collect())
        .unwrap_or_default()
}

pub fn reset_stats() {
    if let Ok(mut stats) = STATS.lock() {
        stats.clear();
    }
}

/// Emit the session's scope timings through `tracing` and the debug log.
pub fn report() {
    if !is_enabled() {
        return;
    }
    for (name, s) in stats() {
        tracing::info!(
            target: "mde::perf",
            scope = name,
            count = s.count,
            mean_ms = s.mean_ms(),
            max_ms = s.max_ms,
            bytes = s.bytes,
            "perf summary"
        );
        log_event(
            "perf.summary",
            format!(
                "{name} count={} mean_ms={:.3} max_ms={:.3} bytes={}",
                s.count,
                s.mean_ms(),
                s.max_ms,
                s.bytes
            ),
        );
    }
}

/// Start (or stop, with `None`) writing render events to `path`.
///
/// # Errors
/// Returns an error if the log file cannot be created or written.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let Ok(mut log) = DEBUG_LOG.lock() else {
        return Ok(());
    };
    *log = None;
    let Some(path) = path else {
        return Ok(());
    };
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "mde render debug log start (perf={})", is_enabled())?;
    writer.flush()?;
    *log = Some(DebugLog {
        start: Instant::now(),
        writer,
    });
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    DEBUG_LOG.lock().is_ok_and(|log| log.is_some())
}

pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let Ok(mut guard) = DEBUG_LOG.lock() else {
        return;
    };
    let Some(log) = guard.as_mut() else {
        return;
    };
    let elapsed_ms = log.start.elapsed().as_secs_f64() * 1000.0;
    let _ = writeln!(
        log.writer,
        "[{elapsed_ms:>10.3} ms] {name}: {}",
        detail.as_ref()
    );
    let _ = log.writer.flush();
}
