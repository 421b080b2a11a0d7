//! Integration tests for `depsentry config` command.
//!
//! Tests config validation and display functionality with real TOML files.

use std::fs;
use std::path::Path;

use depsentry_cli::commands::config::{show_report, validate_report};
use depsentry_core::config::DepsentryConfig;
use tempfile::TempDir;

#[tokio::test]
async fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("depsentry.toml");

    let valid_config = r#"
[general]
log_level = "debug"
log_format = "json"

[extractor]
max_content_size = 1048576
modern_resolution_fallback = true
"#;
    fs::write(&config_path, valid_config).expect("should write config");

    // When
    let report = validate_report(&config_path).await;

    // Then
    assert!(report.valid, "valid config should pass: {:?}", report.errors);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn test_config_validate_malformed_toml() {
    // Given: A malformed TOML file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[general\nlog_level = \"info\"\n").expect("should write config");

    // When
    let report = validate_report(&config_path).await;

    // Then
    assert!(!report.valid, "malformed TOML should be invalid");
    assert!(report.errors[0].contains("failed to parse config"));
}

#[tokio::test]
async fn test_config_validate_out_of_range_limit() {
    // Given: a content limit above the hard cap
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("depsentry.toml");
    fs::write(&config_path, "[extractor]\nmax_content_size = 999999999999\n")
        .expect("should write config");

    // When
    let report = validate_report(&config_path).await;

    // Then
    assert!(!report.valid);
    assert!(report.errors[0].contains("extractor.max_content_size"));
}

#[tokio::test]
async fn test_config_validate_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("empty.toml");
    fs::write(&config_path, "").expect("should write empty file");

    let report = validate_report(&config_path).await;
    assert!(report.valid, "empty config should use defaults");
}

#[tokio::test]
async fn test_config_show_reflects_file_values() {
    // Given
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("depsentry.toml");
    fs::write(&config_path, "[extractor]\nmax_content_size = 4096\n")
        .expect("should write config");
    let config = DepsentryConfig::from_file(&config_path)
        .await
        .expect("config should load");

    // When
    let report = show_report(&config_path, &config, Some("extractor")).expect("should render");

    // Then
    assert!(report.config_toml.contains("max_content_size = 4096"));
}

#[tokio::test]
async fn test_config_show_without_file_uses_defaults() {
    // Given: no config file at the path
    let config_path = Path::new("/nonexistent/depsentry.toml");

    // When
    let config = DepsentryConfig::load_or_default(config_path)
        .await
        .expect("missing file should fall back to defaults");
    let report = show_report(config_path, &config, Some("general")).expect("should render");

    // Then
    assert!(report.config_toml.contains("log_format"));
}
