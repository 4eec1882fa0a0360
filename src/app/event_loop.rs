use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::{DefaultTerminal, Frame};

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::highlight::{HighlightOverlay, HighlightSpec};
use crate::watcher::FileWatcher;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Build the initial model for a terminal of `size`.
    pub fn build_model(&mut self, size: (u16, u16)) -> Model {
        let overlay = self
            .overlay
            .take()
            .unwrap_or_else(|| HighlightOverlay::new(|_: &str| HighlightSpec::none()));
        let mut model = Model::new(&self.initial_value, overlay, size)
            .with_suggestion_source(self.suggestions.clone())
            .with_triggers(self.triggers.clone())
            .with_file_path(self.file_path.clone())
            .with_tab(self.tab);
        model.watch_enabled = self.watch_enabled && self.file_path.is_some();
        model.highlight_style = self.highlight_style.clone();
        model
    }

    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; mde requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let mut model = self.build_model((size.width, size.height));
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;

        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();
        crate::perf::report();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut file_watcher = Self::start_watcher(model);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if let Some(watcher) = file_watcher.as_mut()
                && let Some(msg) = Self::poll_watcher(watcher, model)
            {
                *model = update(std::mem::take(model), msg);
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() || file_watcher.is_some() {
                50
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Coalesce key repeat bursts into a single render.
                let mut handled = 0_u32;
                loop {
                    let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg =
                        Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        handled += 1;
                        tracing::trace!(?msg, "message");
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &side_msg);
                        needs_render = true;
                    }
                    if model.should_quit || !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
                if handled > 1 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={handled}"),
                    );
                }
            }

            if needs_render {
                frame_idx += 1;
                model.ensure_preview();
                let draw_start = Instant::now();
                terminal.draw(|frame| Self::view(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn start_watcher(model: &mut Model) -> Option<FileWatcher> {
        if !model.watch_enabled {
            return None;
        }
        let path = model.file_path.clone()?;
        match Self::make_file_watcher(&path) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                model.watch_enabled = false;
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                tracing::warn!(path = %path.display(), %err, "watcher unavailable");
                None
            }
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
