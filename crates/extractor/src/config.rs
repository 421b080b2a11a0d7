//! 추출기 설정
//!
//! [`ExtractorConfig`]는 core의 [`ExtractorSection`](depsentry_core::config::ExtractorSection)에서
//! 파생되며, 본문 크기 상한과 Yarn modern 이름 유도 옵션을 담습니다.
//!
//! # 사용 예시
//!
//! ```
//! use depsentry_extractor::{ExtractorConfig, ExtractorConfigBuilder};
//!
//! let config = ExtractorConfig::default();
//! config.validate().unwrap();
//!
//! let config = ExtractorConfigBuilder::new()
//!     .max_content_size(1024 * 1024)
//!     .modern_resolution_fallback(true)
//!     .build()
//!     .unwrap();
//! assert!(config.modern_resolution_fallback);
//! ```

use serde::{Deserialize, Serialize};

use depsentry_core::config::{DEFAULT_MAX_CONTENT_SIZE, MAX_CONTENT_SIZE_LIMIT};

use crate::error::ExtractorError;

/// 추출기 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// 매니페스트 본문 최대 크기 (바이트)
    pub max_content_size: usize,
    /// Yarn v2+ 항목에 `name`이 없으면 `resolution`에서 이름을 유도
    pub modern_resolution_fallback: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_content_size: DEFAULT_MAX_CONTENT_SIZE,
            modern_resolution_fallback: false,
        }
    }
}

impl ExtractorConfig {
    /// core의 `[extractor]` 섹션에서 설정을 생성합니다.
    pub fn from_core(core: &depsentry_core::config::ExtractorSection) -> Self {
        Self {
            max_content_size: core.max_content_size,
            modern_resolution_fallback: core.modern_resolution_fallback,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// - `max_content_size`: 1-104857600 (100MB)
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_content_size == 0 || self.max_content_size > MAX_CONTENT_SIZE_LIMIT {
            return Err(ExtractorError::Config {
                field: "max_content_size".to_owned(),
                reason: format!("must be 1-{MAX_CONTENT_SIZE_LIMIT}"),
            });
        }
        Ok(())
    }
}

/// [`ExtractorConfig`] 빌더
#[derive(Default)]
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 본문 최대 크기(바이트)를 설정합니다.
    pub fn max_content_size(mut self, size: usize) -> Self {
        self.config.max_content_size = size;
        self
    }

    /// Yarn modern `resolution` 기반 이름 유도 여부를 설정합니다.
    pub fn modern_resolution_fallback(mut self, enabled: bool) -> Self {
        self.config.modern_resolution_fallback = enabled;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ExtractorError::Config` 반환
    pub fn build(self) -> Result<ExtractorConfig, ExtractorError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
