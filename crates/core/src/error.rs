//! 에러 타입 -- 도메인별 에러 정의

/// Depsentry 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum DepsentryError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 매니페스트 추출 에러
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 매니페스트 추출 에러
///
/// 추출기 크레이트의 세부 에러가 변환되어 들어오는 공통 분류입니다.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// 인식할 수 없는 파일 이름
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// 문법/JSON 파싱 실패
    #[error("parse failed: {0}")]
    ParseFailed(String),

    /// 파싱은 성공했으나 좌표가 하나도 없음
    #[error("no packages found: {0}")]
    EmptyResult(String),

    /// 입력 데이터 초과
    #[error("input too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },

    /// 잘못된 패키지 좌표 문자열
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}
