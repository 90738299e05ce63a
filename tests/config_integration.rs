use std::path::PathBuf;

use hexlens::config::{ConfigFlags, StartView, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".hexlensrc");
    let content = r"
# comment
--writable

--view text

--log-file=session.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.writable);
    assert_eq!(flags.view, Some(StartView::Text));
    assert_eq!(flags.log_file, Some(PathBuf::from("session.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".hexlensrc");
    let content = "--writable\n--view text\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "hexlens".to_string(),
        "--view".to_string(),
        "hex".to_string(),
        "dump.bin".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.writable, "file flags should remain enabled");
    assert_eq!(effective.view, Some(StartView::Hex), "cli should override view");
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_flags_layer_over_global() {
    let global = ConfigFlags {
        log_file: Some(PathBuf::from("global.log")),
        ..ConfigFlags::default()
    };
    let local = ConfigFlags {
        writable: true,
        log_file: Some(PathBuf::from("local.log")),
        ..ConfigFlags::default()
    };
    let merged = global.union(&local);
    assert!(merged.writable);
    assert_eq!(merged.log_file, Some(PathBuf::from("local.log")));
    assert_eq!(merged.view, None);
}
