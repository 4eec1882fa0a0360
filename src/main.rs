//! mde - A terminal markdown editor with a highlight backdrop.
//!
//! # Usage
//!
//! ```bash
//! mde NOTES.md
//! mde --needle TODO --watch NOTES.md
//! mde --pattern 'H(e|a)llo'
//! mde --payload '[[0, 5], {"start": 8, "end": 12, "class": "warn"}]'
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use serde_json::Value;

use mde::app::{App, DEFAULT_VALUE};
use mde::config::{
    ConfigFlags, Tab, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use mde::highlight::{
    HighlightOverlay, NeedleHighlighter, Pattern, PatternHighlighter, PayloadHighlighter,
};
use mde::perf;
use mde::preview::{HighlightBackground, render_html, set_background_mode};
use mde::suggest::StaticSuggestions;

const DEFAULT_NEEDLE: &str = "Hello";

/// A terminal markdown editor with a highlight backdrop
#[derive(Parser, Debug)]
#[command(name = "mde", version, about, long_about = None)]
struct Cli {
    /// Markdown file to edit (created on first save)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Highlight every occurrence of this text
    #[arg(long, value_name = "TEXT")]
    needle: Option<String>,

    /// Highlight every match of this regex (wins over --needle)
    #[arg(long, value_name = "REGEX")]
    pattern: Option<String>,

    /// Highlight with a fixed JSON payload: a range list or a pattern
    #[arg(long, value_name = "JSON")]
    payload: Option<String>,

    /// Characters that open mention suggestions
    #[arg(long = "trigger", value_name = "CHARS")]
    triggers: Option<String>,

    /// JSON file of {"preview", "value"} mention suggestions
    #[arg(long, value_name = "PATH")]
    suggestions: Option<PathBuf>,

    /// Tab to open on
    #[arg(long, value_enum)]
    tab: Option<Tab>,

    /// Highlight colour (name or #rrggbb)
    #[arg(long, value_name = "COLOR")]
    highlight_color: Option<String>,

    /// Watch the file and take external changes as the new value
    #[arg(short, long)]
    watch: bool,

    /// Force syntax highlight theme background (light or dark)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,

    /// Write render debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Print the value rendered to HTML and exit
    #[arg(long)]
    print_html: bool,

    /// Print the highlight backdrop markup and exit
    #[arg(long)]
    print_backdrop: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

// OSC 11 background query, answered on /dev/tty so it works with stdout piped.
#[cfg(not(unix))]
fn query_terminal_background() -> std::io::Result<Option<(u8, u8, u8)>> {
    Ok(None)
}

#[cfg(unix)]
fn query_terminal_background() -> std::io::Result<Option<(u8, u8, u8)>> {
    use std::io::{Read, Write};
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel();
    let mut tty = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open("/dev/tty")?;
    let mut reader = tty.try_clone()?;

    tty.write_all(b"\x1b]11;?\x07")?;
    tty.flush()?;

    std::thread::spawn(move || {
        let mut buf = [0u8; 256];
        let mut reply: Vec<u8> = Vec::new();
        while let Ok(n) = reader.read(&mut buf) {
            reply.extend_from_slice(&buf[..n]);
            if reply.contains(&b'\x07') || reply.windows(2).any(|w| w == b"\x1b\\") {
                let _ = tx.send(reply);
                break;
            }
        }
    });

    Ok(rx
        .recv_timeout(Duration::from_millis(75))
        .ok()
        .and_then(|bytes| parse_osc11_reply(&String::from_utf8_lossy(&bytes))))
}

fn parse_osc11_reply(reply: &str) -> Option<(u8, u8, u8)> {
    // ESC ] 11 ; rgb:RRRR/GGGG/BBBB (BEL | ST)
    let data = &reply[reply.find("rgb:")? + 4..];
    let mut parts = data.split(['/', '\x07', '\x1b']);
    Some((
        parse_osc_component(parts.next()?)?,
        parse_osc_component(parts.next()?)?,
        parse_osc_component(parts.next()?)?,
    ))
}

fn parse_osc_component(s: &str) -> Option<u8> {
    let hex = s.trim();
    match hex.len() {
        2 => u8::from_str_radix(hex, 16).ok(),
        n if n >= 4 => u16::from_str_radix(&hex[..4], 16)
            .ok()
            .and_then(|v| u8::try_from(v >> 8).ok()),
        _ => None,
    }
}

fn background_from_rgb(r: u8, g: u8, b: u8) -> HighlightBackground {
    let luma = 0.0722f32.mul_add(
        f32::from(b),
        0.2126f32.mul_add(f32::from(r), 0.7152 * f32::from(g)),
    );
    if luma >= 140.0 {
        HighlightBackground::Light
    } else {
        HighlightBackground::Dark
    }
}

fn detect_background() -> Option<HighlightBackground> {
    let _raw = enable_raw_mode();
    let result = query_terminal_background();
    let _ = disable_raw_mode();
    result
        .ok()
        .flatten()
        .map(|(r, g, b)| background_from_rgb(r, g, b))
}

fn build_overlay(flags: &ConfigFlags, payload: Option<&str>) -> Result<HighlightOverlay> {
    if let Some(payload) = payload {
        let value: Value =
            serde_json::from_str(payload).context("--payload is not valid JSON")?;
        return Ok(HighlightOverlay::new(PayloadHighlighter::new(
            move |_: &str| value.clone(),
        )));
    }
    if let Some(source) = &flags.pattern {
        let pattern = Pattern::new(source)?;
        tracing::debug!(pattern = pattern.as_str(), "highlighting pattern matches");
        return Ok(HighlightOverlay::new(PatternHighlighter::new(pattern)));
    }
    let needle = flags.needle.as_deref().unwrap_or(DEFAULT_NEEDLE);
    Ok(HighlightOverlay::new(NeedleHighlighter::new(needle)))
}

fn read_initial_value(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path.exists() => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        Some(_) => Ok(String::new()),
        None => Ok(DEFAULT_VALUE.to_string()),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("MDE_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            path = ?render_debug_log_path,
            %err,
            "failed to initialize render debug log"
        );
    }
    if perf::is_debug_log_enabled() {
        tracing::debug!(path = ?render_debug_log_path, "render debug log enabled");
    }

    let value = read_initial_value(cli.file.as_deref())?;
    let mut overlay = build_overlay(&effective, cli.payload.as_deref())?;

    if cli.print_html {
        print!("{}", render_html(&value));
        return Ok(());
    }
    if cli.print_backdrop {
        overlay.refresh(&value).context("Highlight failed")?;
        println!("{}", overlay.backdrop().to_markup());
        return Ok(());
    }

    match effective.theme.unwrap_or(cli.theme) {
        ThemeMode::Auto => set_background_mode(detect_background()),
        ThemeMode::Light => set_background_mode(Some(HighlightBackground::Light)),
        ThemeMode::Dark => set_background_mode(Some(HighlightBackground::Dark)),
    }

    let suggestions = match &effective.suggestions {
        Some(path) => StaticSuggestions::load(path)?,
        None => StaticSuggestions::default(),
    };
    let triggers = effective
        .triggers
        .as_deref()
        .map_or_else(|| vec!['@'], |t| t.chars().collect());

    let mut app = App::new(value, overlay)
        .with_file_path(cli.file)
        .with_watch(effective.watch)
        .with_tab(effective.tab.unwrap_or_default())
        .with_suggestions(suggestions)
        .with_triggers(triggers);
    if let Some(color) = cli.highlight_color.as_deref() {
        let color = mde::ui::style::parse_color(color)
            .with_context(|| format!("Unknown highlight colour {color}"))?;
        app = app.with_highlight_color(color);
    }

    app.run().context("Application error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_osc11_reply_reads_16_bit_channels() {
        let reply = "\x1b]11;rgb:ffff/8000/0000\x07";
        assert_eq!(parse_osc11_reply(reply), Some((255, 128, 0)));
    }

    #[test]
    fn test_parse_osc11_reply_without_rgb_is_none() {
        assert_eq!(parse_osc11_reply("\x1b]11;?\x07"), None);
    }

    #[test]
    fn test_background_from_rgb() {
        assert_eq!(background_from_rgb(250, 250, 250), HighlightBackground::Light);
        assert_eq!(background_from_rgb(20, 20, 30), HighlightBackground::Dark);
    }

    #[test]
    fn test_overlay_defaults_to_hello_needle() {
        let mut overlay = build_overlay(&ConfigFlags::default(), None).unwrap();
        overlay.refresh(DEFAULT_VALUE).unwrap();
        assert_eq!(
            overlay.backdrop().to_markup(),
            "**<mark>Hello</mark> world!!!**"
        );
    }

    #[test]
    fn test_overlay_rejects_bad_payload_json() {
        let err = build_overlay(&ConfigFlags::default(), Some("[1,")).unwrap_err();
        assert!(err.to_string().contains("--payload"));
    }
}
