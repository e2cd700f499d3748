use std::path::PathBuf;
use std::time::Duration;

use steptrace::config::Config;

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(config.output.directory, PathBuf::from("target/steptrace"));
    assert_eq!(config.steps.delay_ms, 0);
    assert_eq!(config.step_delay(), Duration::ZERO);
    assert_eq!(config.reports.formats, vec!["json"]);
    assert!(config.reports.qualifier.is_none());
}

#[test]
fn test_load_from_file() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(".steptracerc.toml");
    std::fs::write(&path, "[output]\ndirectory = \"out\"\n").expect("Failed to write config");

    let config = Config::load_from_file(&path).expect("Failed to load config");

    assert_eq!(config.output.directory, PathBuf::from("out"));
    assert_eq!(config.reports.formats, vec!["json"]);
}

#[test]
fn test_load_from_missing_file() {
    let error = Config::load_from_file(std::path::Path::new("/nonexistent/.steptracerc.toml"))
        .unwrap_err();
    assert!(error.to_string().contains("Failed to read configuration"));
}
