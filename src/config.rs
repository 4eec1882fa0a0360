use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

/// Which tab the editor opens on.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Write,
    Preview,
}

impl Tab {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Write => Self::Preview,
            Self::Preview => Self::Write,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Preview => "preview",
        }
    }
}

/// Defaults persisted in rc files and overridable from the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub perf: bool,
    pub theme: Option<ThemeMode>,
    pub tab: Option<Tab>,
    /// Literal to highlight.
    pub needle: Option<String>,
    /// Regex to highlight; wins over `needle`.
    pub pattern: Option<String>,
    /// Mention trigger characters.
    pub triggers: Option<String>,
    pub suggestions: Option<PathBuf>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Combine two flag sets; `other` wins for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            perf: self.perf || other.perf,
            theme: other.theme.or(self.theme),
            tab: other.tab.or(self.tab),
            needle: other.needle.clone().or_else(|| self.needle.clone()),
            pattern: other.pattern.clone().or_else(|| self.pattern.clone()),
            triggers: other.triggers.clone().or_else(|| self.triggers.clone()),
            suggestions: other
                .suggestions
                .clone()
                .or_else(|| self.suggestions.clone()),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mde").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mde")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("mde").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("mde").join("config");
        }
    }

    PathBuf::from(".mderc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mderc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    let flags = parse_flag_tokens(&tokens);
    tracing::debug!(path = %path.display(), ?flags, "loaded config");
    Ok(flags)
}

/// One flag per line; everything after the flag name is its value, so
/// needles and patterns may contain spaces.
fn line_tokens(line: &str) -> Vec<String> {
    match line.split_once(char::is_whitespace) {
        Some((flag, value)) if !flag.contains('=') => {
            vec![flag.to_owned(), value.trim_start().to_owned()]
        }
        _ => vec![line.to_owned()],
    }
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# mde defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeMode::Auto => "auto",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        lines.push(format!("--theme {theme_str}"));
    }
    if let Some(tab) = flags.tab {
        lines.push(format!("--tab {}", tab.as_str()));
    }
    if let Some(needle) = &flags.needle {
        lines.push(format!("--needle {needle}"));
    }
    if let Some(pattern) = &flags.pattern {
        lines.push(format!("--pattern {pattern}"));
    }
    if let Some(triggers) = &flags.triggers {
        lines.push(format!("--trigger {triggers}"));
    }
    if let Some(path) = &flags.suggestions {
        lines.push(format!("--suggestions {}", path.display()));
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list, ignoring everything else.
///
/// Valued flags accept both `--flag value` and `--flag=value`.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--watch" | "-w" => flags.watch = true,
            "--perf" => flags.perf = true,
            _ => {
                let (name, inline) = match token.split_once('=') {
                    Some((name, value)) => (name, Some(value.to_string())),
                    None => (token, None),
                };
                if VALUED_FLAGS.contains(&name) {
                    let value = inline.or_else(|| {
                        let next = tokens.get(i + 1).cloned();
                        if next.is_some() {
                            i += 1;
                        }
                        next
                    });
                    if let Some(value) = value {
                        apply_valued(&mut flags, name, value);
                    }
                }
            }
        }
        i += 1;
    }
    flags
}

const VALUED_FLAGS: [&str; 7] = [
    "--theme",
    "--tab",
    "--needle",
    "--pattern",
    "--trigger",
    "--suggestions",
    "--render-debug-log",
];

fn apply_valued(flags: &mut ConfigFlags, name: &str, value: String) {
    match name {
        "--theme" => flags.theme = parse_theme(&value),
        "--tab" => flags.tab = parse_tab(&value),
        "--needle" => flags.needle = Some(value),
        "--pattern" => flags.pattern = Some(value),
        "--trigger" => flags.triggers = Some(value),
        "--suggestions" => flags.suggestions = Some(PathBuf::from(value)),
        "--render-debug-log" => flags.render_debug_log = Some(PathBuf::from(value)),
        _ => {}
    }
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

fn parse_tab(s: &str) -> Option<Tab> {
    match s {
        "write" => Some(Tab::Write),
        "preview" => Some(Tab::Preview),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "mde",
            "--watch",
            "--tab",
            "preview",
            "--needle=Hello",
            "--trigger",
            "@#",
            "--render-debug-log=render.log",
            "NOTES.md",
        ]));
        assert!(flags.watch);
        assert_eq!(flags.tab, Some(Tab::Preview));
        assert_eq!(flags.needle.as_deref(), Some("Hello"));
        assert_eq!(flags.triggers.as_deref(), Some("@#"));
        assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_unknown_values() {
        let flags = parse_flag_tokens(&tokens(&["--theme", "purple", "--tab=sideways"]));
        assert_eq!(flags.theme, None);
        assert_eq!(flags.tab, None);
    }

    #[test]
    fn test_pattern_value_may_contain_equals() {
        let flags = parse_flag_tokens(&tokens(&["--pattern=a=b"]));
        assert_eq!(flags.pattern.as_deref(), Some("a=b"));
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            watch: true,
            needle: Some("file".to_string()),
            theme: Some(ThemeMode::Light),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            perf: true,
            needle: Some("cli".to_string()),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.watch);
        assert!(merged.perf);
        assert_eq!(merged.needle.as_deref(), Some("cli"));
        assert_eq!(merged.theme, Some(ThemeMode::Light));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mderc");
        let flags = ConfigFlags {
            watch: true,
            perf: true,
            theme: Some(ThemeMode::Dark),
            tab: Some(Tab::Preview),
            needle: Some("Hello world".to_string()),
            pattern: Some("a b|c=d".to_string()),
            triggers: Some("@".to_string()),
            suggestions: Some(PathBuf::from("people.json")),
            render_debug_log: Some(PathBuf::from("render.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_config_values_keep_inner_spaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mderc");
        fs::write(&path, "--needle Hello  world\n--pattern=a b\n--watch\n").unwrap();

        let flags = load_config_flags(&path).unwrap();
        assert_eq!(flags.needle.as_deref(), Some("Hello  world"));
        assert_eq!(flags.pattern.as_deref(), Some("a b"));
        assert!(flags.watch);
    }

    #[test]
    fn test_tab_toggles() {
        assert_eq!(Tab::Write.toggled(), Tab::Preview);
        assert_eq!(Tab::Preview.toggled(), Tab::Write);
    }
}
