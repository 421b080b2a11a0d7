//! 추출기 에러 타입
//!
//! [`ExtractorError`]는 매니페스트 추출 과정에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<ExtractorError> for DepsentryError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **형식 선택**: `UnsupportedFormat`
//! - **파싱**: `ParseFailure`
//! - **결과**: `EmptyResult`
//! - **입력 제한**: `ContentTooLarge`
//! - **좌표 문자열**: `InvalidCoordinate`
//! - **설정**: `Config`
//!
//! 모든 에러는 재시도 대상이 아닙니다. yarn.lock의 classic → modern 전환만이
//! 내부에서 복구되는 유일한 경로입니다.

use depsentry_core::error::{DepsentryError, ExtractError};

/// 매니페스트 추출 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    /// 파일 이름이 알려진 매니페스트 접미사와 일치하지 않음
    #[error(
        "unsupported file type: {filename} (expected package-lock.json, requirements.txt, or yarn.lock)"
    )]
    UnsupportedFormat {
        /// 입력 파일 이름
        filename: String,
    },

    /// 매니페스트 문법/JSON 파싱 실패
    ///
    /// yarn.lock의 경우 `reason`에 classic 파서와 modern 파서의 메시지가 모두 들어갑니다.
    #[error("failed to parse {format}: {reason}")]
    ParseFailure {
        /// 파싱을 시도한 형식 이름
        format: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 파싱은 성공했지만 좌표가 하나도 나오지 않음
    #[error("could not parse any packages from {filename}")]
    EmptyResult {
        /// 입력 파일 이름
        filename: String,
    },

    /// 본문 크기 초과
    #[error("manifest too large: {size} bytes (max: {max})")]
    ContentTooLarge {
        /// 실제 본문 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// 좌표 문자열 파싱 실패
    #[error("invalid package coordinate '{input}': {reason}")]
    InvalidCoordinate {
        /// 입력 문자열
        input: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<ExtractorError> for DepsentryError {
    fn from(err: ExtractorError) -> Self {
        match err {
            ExtractorError::UnsupportedFormat { filename } => {
                DepsentryError::Extract(ExtractError::UnsupportedFormat(filename))
            }
            ExtractorError::ParseFailure { format, reason } => {
                DepsentryError::Extract(ExtractError::ParseFailed(format!("{format}: {reason}")))
            }
            ExtractorError::EmptyResult { filename } => {
                DepsentryError::Extract(ExtractError::EmptyResult(filename))
            }
            ExtractorError::ContentTooLarge { size, max } => {
                DepsentryError::Extract(ExtractError::TooLarge { size, max })
            }
            ExtractorError::InvalidCoordinate { input, reason } => DepsentryError::Extract(
                ExtractError::InvalidCoordinate(format!("'{input}': {reason}")),
            ),
            ExtractorError::Config { field, reason } => {
                DepsentryError::Config(depsentry_core::error::ConfigError::InvalidValue {
                    field,
                    reason,
                })
            }
        }
    }
}
