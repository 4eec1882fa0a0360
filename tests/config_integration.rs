use std::path::PathBuf;

use mde::config::{ConfigFlags, Tab, ThemeMode, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mderc");
    let content = r"
# comment
--watch

--tab preview

--render-debug-log=render.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert_eq!(flags.tab, Some(Tab::Preview));
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mderc");
    let content = "--watch\n--needle TODO\n--theme light\n--suggestions people.json\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "mde".to_string(),
        "--needle".to_string(),
        "FIXME".to_string(),
        "--perf".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(effective.needle.as_deref(), Some("FIXME"));
    assert_eq!(effective.theme, Some(ThemeMode::Light));
    assert_eq!(
        effective.suggestions,
        Some(PathBuf::from("people.json")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_missing_config_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_positional_file_is_not_taken_as_a_flag() {
    let args = vec![
        "mde".to_string(),
        "NOTES.md".to_string(),
        "--trigger=@#".to_string(),
        "-w".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert!(flags.watch);
    assert_eq!(flags.triggers.as_deref(), Some("@#"));
    assert_eq!(flags.needle, None);
}
