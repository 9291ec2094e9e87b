//! Tests for loading driver configuration from disk.

use rewind_games::{AppConfig, OutputFormat};
use std::io::Write;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file");
    writeln!(file, "format = \"json\"\nshow_history = false\nlog_filter = \"debug\"")
        .expect("Write config");

    let config = AppConfig::load(Some(file.path())).expect("Valid config");
    assert_eq!(*config.format(), OutputFormat::Json);
    assert!(!*config.show_history());
    assert_eq!(config.log_filter(), "debug");
}

#[test]
fn test_missing_path_uses_defaults() {
    assert_eq!(AppConfig::load(None).expect("Defaults"), AppConfig::default());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let err = AppConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}
