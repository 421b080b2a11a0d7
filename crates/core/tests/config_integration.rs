//! depsentry.toml 통합 설정 테스트
//!
//! - depsentry.toml.example 파싱 테스트
//! - 부분 설정 (일부 섹션만) 로딩 테스트
//! - 환경변수 우선순위 테스트
//! - 빈 파일 / 잘못된 형식 에러 테스트

use std::io::Write;

use depsentry_core::config::{DEFAULT_MAX_CONTENT_SIZE, DepsentryConfig};
use depsentry_core::error::{ConfigError, DepsentryError};

const EXAMPLE: &str = include_str!("../../../depsentry.toml.example");

/// 환경변수를 설정한 채로 클로저를 실행하고 원래 값으로 되돌립니다.
fn with_env<T>(key: &str, value: &str, f: impl FnOnce() -> T) -> T {
    let original = std::env::var(key).ok();
    // SAFETY: 테스트는 serial_test로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var(key, value);
    }

    let result = f();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var(key, val),
            None => std::env::remove_var(key),
        }
    }
    result
}

// =============================================================================
// depsentry.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let config = DepsentryConfig::parse(EXAMPLE).expect("example config should parse");
    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "pretty");
}

#[test]
fn example_config_passes_validation() {
    let config = DepsentryConfig::parse(EXAMPLE).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_matches_code_defaults() {
    let from_file = DepsentryConfig::parse(EXAMPLE).expect("should parse");
    let from_code = DepsentryConfig::default();

    assert_eq!(from_file.general.log_level, from_code.general.log_level);
    assert_eq!(from_file.general.log_format, from_code.general.log_format);
    assert_eq!(
        from_file.extractor.max_content_size,
        from_code.extractor.max_content_size
    );
    assert_eq!(
        from_file.extractor.modern_resolution_fallback,
        from_code.extractor.modern_resolution_fallback
    );
}

// =============================================================================
// 부분 설정 테스트
// =============================================================================

#[test]
fn partial_config_general_only() {
    let toml = r#"
[general]
log_level = "debug"
log_format = "json"
"#;
    let config = DepsentryConfig::parse(toml).expect("should parse");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.general.log_format, "json");
    assert_eq!(config.extractor.max_content_size, DEFAULT_MAX_CONTENT_SIZE);
}

#[test]
fn partial_config_extractor_only() {
    let toml = r#"
[extractor]
max_content_size = 2048
"#;
    let config = DepsentryConfig::parse(toml).expect("should parse");
    assert_eq!(config.extractor.max_content_size, 2048);
    assert!(!config.extractor.modern_resolution_fallback);
    assert_eq!(config.general.log_level, "info");
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_toml() {
    let toml = r#"
[general]
log_level = "info"
"#;
    let level = with_env("DEPSENTRY_GENERAL_LOG_LEVEL", "error", || {
        let mut config = DepsentryConfig::parse(toml).expect("should parse");
        config.apply_env_overrides();
        config.general.log_level
    });
    assert_eq!(level, "error");
}

#[test]
#[serial_test::serial]
fn env_override_numeric_field() {
    let size = with_env("DEPSENTRY_EXTRACTOR_MAX_CONTENT_SIZE", "4096", || {
        let mut config = DepsentryConfig::default();
        config.apply_env_overrides();
        config.extractor.max_content_size
    });
    assert_eq!(size, 4096);
}

#[test]
#[serial_test::serial]
fn env_override_bool_field() {
    let enabled = with_env(
        "DEPSENTRY_EXTRACTOR_MODERN_RESOLUTION_FALLBACK",
        "true",
        || {
            let mut config = DepsentryConfig::default();
            config.apply_env_overrides();
            config.extractor.modern_resolution_fallback
        },
    );
    assert!(enabled);
}

#[test]
#[serial_test::serial]
fn env_override_invalid_number_keeps_toml_value() {
    let toml = r#"
[extractor]
max_content_size = 1234
"#;
    let size = with_env("DEPSENTRY_EXTRACTOR_MAX_CONTENT_SIZE", "lots", || {
        let mut config = DepsentryConfig::parse(toml).expect("should parse");
        config.apply_env_overrides();
        config.extractor.max_content_size
    });
    assert_eq!(size, 1234);
}

// =============================================================================
// 에러 케이스 테스트
// =============================================================================

#[test]
fn empty_string_parses_with_defaults() {
    let config = DepsentryConfig::parse("").expect("should parse");
    assert_eq!(config.general.log_level, "info");
}

#[test]
fn comments_only_parses_with_defaults() {
    let config = DepsentryConfig::parse("# nothing here\n# at all\n").expect("should parse");
    assert_eq!(config.extractor.max_content_size, DEFAULT_MAX_CONTENT_SIZE);
}

#[test]
fn malformed_toml_returns_parse_error() {
    let result = DepsentryConfig::parse("[general\nlog_level = ");
    assert!(matches!(
        result,
        Err(DepsentryError::Config(ConfigError::ParseFailed { .. }))
    ));
}

#[test]
fn wrong_type_for_numeric_field() {
    let toml = r#"
[extractor]
max_content_size = "ten megabytes"
"#;
    assert!(matches!(
        DepsentryConfig::parse(toml),
        Err(DepsentryError::Config(ConfigError::ParseFailed { .. }))
    ));
}

#[test]
fn unknown_section_is_ignored() {
    let toml = r#"
[general]
log_level = "warn"

[telemetry]
endpoint = "http://localhost:4317"
"#;
    let config = DepsentryConfig::parse(toml).expect("unknown sections should be ignored");
    assert_eq!(config.general.log_level, "warn");
}

#[tokio::test]
async fn from_file_nonexistent_returns_file_not_found() {
    let result = DepsentryConfig::from_file("/tmp/depsentry_test_nonexistent_12345.toml").await;
    assert!(matches!(
        result,
        Err(DepsentryError::Config(ConfigError::FileNotFound { .. }))
    ));
}

#[tokio::test]
async fn from_file_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "[extractor]\nmax_content_size = 0").expect("write");

    let result = DepsentryConfig::from_file(file.path()).await;
    assert!(matches!(
        result,
        Err(DepsentryError::Config(ConfigError::InvalidValue { .. }))
    ));
}

#[tokio::test]
#[serial_test::serial]
async fn load_example_config_from_disk() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let example_path = format!("{}/../../depsentry.toml.example", manifest_dir);

    let config = DepsentryConfig::load(&example_path)
        .await
        .expect("example config should load");
    assert_eq!(config.extractor.max_content_size, DEFAULT_MAX_CONTENT_SIZE);
}

// =============================================================================
// 직렬화 라운드트립 테스트
// =============================================================================

#[test]
fn serialize_and_reparse_roundtrip() {
    let mut original = DepsentryConfig::default();
    original.general.log_level = "trace".to_owned();
    original.extractor.modern_resolution_fallback = true;

    let toml_str = toml::to_string_pretty(&original).expect("should serialize");
    let reparsed = DepsentryConfig::parse(&toml_str).expect("should reparse");

    assert_eq!(reparsed.general.log_level, "trace");
    assert!(reparsed.extractor.modern_resolution_fallback);
}
