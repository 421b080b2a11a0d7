//! 설정 관리 -- depsentry.toml 파싱 및 런타임 설정
//!
//! [`DepsentryConfig`]는 모든 크레이트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`DEPSENTRY_EXTRACTOR_MAX_CONTENT_SIZE=1048576` 형식)
//! 3. 설정 파일 (`depsentry.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), depsentry_core::error::DepsentryError> {
//! use depsentry_core::config::DepsentryConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = DepsentryConfig::load("depsentry.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = DepsentryConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, DepsentryError};

/// 매니페스트 본문 크기 기본 상한 (10 MiB)
pub const DEFAULT_MAX_CONTENT_SIZE: usize = 10 * 1024 * 1024;

/// 매니페스트 본문 크기 설정 상한 (100 MiB)
pub const MAX_CONTENT_SIZE_LIMIT: usize = 100 * 1024 * 1024;

/// Depsentry 통합 설정
///
/// `depsentry.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepsentryConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 추출기 설정
    #[serde(default)]
    pub extractor: ExtractorSection,
}

impl DepsentryConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DepsentryError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, DepsentryError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DepsentryError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                DepsentryError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 파일이 있으면 [`load`](Self::load), 없으면 기본값에 환경변수만 적용합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, DepsentryError> {
        match Self::load(path.as_ref()).await {
            Err(DepsentryError::Config(ConfigError::FileNotFound { .. })) => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, DepsentryError> {
        toml::from_str(toml_str).map_err(|e| {
            DepsentryError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `DEPSENTRY_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "DEPSENTRY_GENERAL_LOG_LEVEL");
        override_string(
            &mut self.general.log_format,
            "DEPSENTRY_GENERAL_LOG_FORMAT",
        );

        // Extractor
        override_usize(
            &mut self.extractor.max_content_size,
            "DEPSENTRY_EXTRACTOR_MAX_CONTENT_SIZE",
        );
        override_bool(
            &mut self.extractor.modern_resolution_fallback,
            "DEPSENTRY_EXTRACTOR_MODERN_RESOLUTION_FALLBACK",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), DepsentryError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.extractor.max_content_size == 0
            || self.extractor.max_content_size > MAX_CONTENT_SIZE_LIMIT
        {
            return Err(ConfigError::InvalidValue {
                field: "extractor.max_content_size".to_owned(),
                reason: format!("must be between 1 and {MAX_CONTENT_SIZE_LIMIT}"),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 추출기 설정 (`[extractor]` 섹션)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSection {
    /// 매니페스트 본문 최대 크기 (바이트)
    pub max_content_size: usize,
    /// Yarn v2+ 항목에 `name`이 없을 때 `resolution`에서 이름을 유도할지 여부
    pub modern_resolution_fallback: bool,
}

impl Default for ExtractorSection {
    fn default() -> Self {
        Self {
            max_content_size: DEFAULT_MAX_CONTENT_SIZE,
            modern_resolution_fallback: false,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
