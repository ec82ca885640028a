//! Unit tests for logging helpers

use ioc_infrastructure::logging::{LoggingConfig, file_appender, init_logging, parse_log_level};
use std::fs;
use std::io::Write;
use tempfile::TempDir;
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").expect("trace"), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").expect("debug"), Level::DEBUG);
    assert_eq!(parse_log_level("warning").expect("warning"), Level::WARN);
    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_init_logging_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_file_appender_absent_without_file_output() {
    let appender = file_appender(&LoggingConfig::default()).expect("no file output");
    assert!(appender.is_none());
}

#[test]
fn test_file_appender_writes_dated_file() {
    let dir = TempDir::new().expect("temp dir");
    let config = LoggingConfig {
        file_output: Some(dir.path().join("registry.log")),
        max_files: 2,
        ..LoggingConfig::default()
    };

    let mut appender = file_appender(&config)
        .expect("appender")
        .expect("file output configured");
    appender.write_all(b"line\n").expect("write");
    appender.flush().expect("flush");

    let names: Vec<String> = fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("registry."));
    assert!(names[0].ends_with(".log"));
}
