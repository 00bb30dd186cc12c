use std::path::PathBuf;

use panelmark::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use panelmark::document::InputFormat;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".panelmarkrc");
    let content = r#"
# comment
--panel

--input-format json

--render-debug-log=render.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.panel);
    assert_eq!(flags.input_format, Some(InputFormat::Json));
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".panelmarkrc");
    let content = "--panel\n--input-format markdown\n--render-debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "panelmark".to_string(),
        "--input-format".to_string(),
        "json".to_string(),
        "--merge-lists".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.panel, "file flags should remain enabled");
    assert!(effective.merge_lists, "cli flags should be applied");
    assert_eq!(
        effective.input_format,
        Some(InputFormat::Json),
        "cli should override input format"
    );
    assert_eq!(
        effective.render_debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "panelmark".to_string(),
        "--input-format=markdown".to_string(),
        "--render-debug-log=render.log".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.input_format, Some(InputFormat::Markdown));
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_config_union_merges_booleans() {
    let global = ConfigFlags {
        watch: true,
        perf: true,
        ..ConfigFlags::default()
    };
    let local = ConfigFlags {
        panel: true,
        merge_lists: true,
        ..ConfigFlags::default()
    };
    let merged = global.union(&local);
    assert!(merged.watch);
    assert!(merged.perf);
    assert!(merged.panel);
    assert!(merged.merge_lists);
}
