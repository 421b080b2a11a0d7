//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 추출기는 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 레코더가 설치되지 않은 경우 호출은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `depsentry_`
//! - 모듈명: `extractor_`
//! - 접미어: `_total` (counter), `_bytes` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(depsentry_core::metrics::EXTRACTOR_YARN_FALLBACKS_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 매니페스트 형식 레이블 키 (package-lock.json, requirements.txt, yarn.lock)
pub const LABEL_FORMAT: &str = "format";

/// 에코시스템 레이블 키 (npm, pypi)
pub const LABEL_ECOSYSTEM: &str = "ecosystem";

/// 결과 레이블 키 (success, unsupported, parse_failure, empty, too_large)
pub const LABEL_RESULT: &str = "result";

// ─── Extractor 메트릭 ────────────────────────────────────────────

/// Extractor: 처리한 매니페스트 수 (counter, labels: format, result)
pub const EXTRACTOR_MANIFESTS_TOTAL: &str = "depsentry_extractor_manifests_total";

/// Extractor: 추출된 좌표 수 (counter, labels: format, ecosystem)
pub const EXTRACTOR_COORDINATES_TOTAL: &str = "depsentry_extractor_coordinates_total";

/// Extractor: yarn.lock classic 파싱 실패 후 modern 파서로 넘어간 횟수 (counter)
pub const EXTRACTOR_YARN_FALLBACKS_TOTAL: &str = "depsentry_extractor_yarn_fallbacks_total";

/// Extractor: 입력 매니페스트 크기 (histogram, 바이트)
pub const EXTRACTOR_CONTENT_SIZE_BYTES: &str = "depsentry_extractor_content_size_bytes";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더가 설치되어 있지 않으면 아무 동작도 하지 않습니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        EXTRACTOR_MANIFESTS_TOTAL,
        "Total number of manifests submitted for extraction, by format and result"
    );
    describe_counter!(
        EXTRACTOR_COORDINATES_TOTAL,
        "Total number of package coordinates extracted"
    );
    describe_counter!(
        EXTRACTOR_YARN_FALLBACKS_TOTAL,
        "Total number of yarn.lock files that fell back from the classic to the modern parser"
    );
    describe_histogram!(
        EXTRACTOR_CONTENT_SIZE_BYTES,
        "Size of manifest content submitted for extraction in bytes"
    );
}
