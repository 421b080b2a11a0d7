//! 매니페스트 파서 -- package-lock.json, requirements.txt, yarn.lock
//!
//! [`ManifestExtractor`] trait은 각 매니페스트 형식의 추출기가 구현해야 하는 인터페이스입니다.
//! [`ManifestDetector`]는 파일 이름 접미사로 형식을 판별합니다.
//!
//! # 지원 형식
//!
//! - `package-lock.json` (JSON, v1/v2/v3) -- [`NpmLockExtractor`](npm::NpmLockExtractor)
//! - `requirements.txt` (줄 단위) -- [`RequirementsExtractor`](requirements::RequirementsExtractor)
//! - `yarn.lock` v1 -- [`YarnClassicExtractor`](yarn_classic::YarnClassicExtractor)
//! - `yarn.lock` v2+ (YAML) -- [`YarnModernExtractor`](yarn_modern::YarnModernExtractor)
//!
//! 형식 집합은 닫혀 있으며 플러그인으로 확장하지 않습니다.

pub mod npm;
pub mod requirements;
pub mod syml;
pub mod yarn_classic;
pub mod yarn_modern;

use std::path::Path;

use crate::error::ExtractorError;
use crate::types::{CoordinateSet, Ecosystem, ManifestFormat, ParsedPackageEntry};

/// 매니페스트 추출기 trait
///
/// 형식별 파서는 중간 항목([`ParsedPackageEntry`]) 목록만 만들고,
/// 좌표 변환과 중복 제거는 기본 구현 [`extract`](Self::extract)가 담당합니다.
pub trait ManifestExtractor: Send + Sync {
    /// 로그와 에러 메시지에 쓰이는 형식 이름 (예: "yarn.lock (classic)")
    fn name(&self) -> &'static str;

    /// 이 추출기가 생성하는 좌표의 생태계
    fn ecosystem(&self) -> Ecosystem;

    /// 매니페스트 내용을 파싱하여 중간 항목 목록을 반환합니다.
    ///
    /// 문법 오류는 `ExtractorError::ParseFailure`로 보고합니다.
    /// 버전이 없는 항목도 그대로 포함될 수 있습니다.
    fn parse_entries(&self, content: &str) -> Result<Vec<ParsedPackageEntry>, ExtractorError>;

    /// 매니페스트 내용에서 좌표 집합을 추출합니다.
    ///
    /// 버전을 해석할 수 없는 항목은 건너뜁니다. 결과가 비어 있어도 에러가 아닙니다.
    fn extract(&self, content: &str) -> Result<CoordinateSet, ExtractorError> {
        let ecosystem = self.ecosystem();
        Ok(self
            .parse_entries(content)?
            .into_iter()
            .filter_map(|entry| entry.into_coordinate(ecosystem))
            .collect())
    }
}

/// `ParseFailure` 에러를 만드는 헬퍼
pub(crate) fn parse_failure(format: &str, reason: impl ToString) -> ExtractorError {
    ExtractorError::ParseFailure {
        format: format.to_owned(),
        reason: reason.to_string(),
    }
}

/// 매니페스트 형식 탐지기
///
/// 파일 이름의 접미사를 우선순위 순서대로 비교하여 처음 일치하는 형식을 선택합니다.
pub struct ManifestDetector {
    /// 우선순위 순서의 (접미사, 형식) 목록
    known_suffixes: Vec<(String, ManifestFormat)>,
}

impl ManifestDetector {
    /// 기본 접미사 목록으로 탐지기를 생성합니다.
    pub fn new() -> Self {
        Self {
            known_suffixes: ManifestFormat::ALL
                .iter()
                .map(|format| (format.suffix().to_owned(), *format))
                .collect(),
        }
    }

    /// 알려진 접미사 목록을 반환합니다.
    pub fn known_suffixes(&self) -> &[(String, ManifestFormat)] {
        &self.known_suffixes
    }

    /// 파일 이름에서 형식을 판별합니다.
    pub fn detect(&self, filename: &str) -> Option<ManifestFormat> {
        self.known_suffixes
            .iter()
            .find(|(suffix, _)| filename.ends_with(suffix.as_str()))
            .map(|(_, format)| *format)
    }

    /// 주어진 경로의 파일 이름이 알려진 매니페스트인지 확인합니다.
    pub fn is_manifest(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.detect(name).is_some())
    }
}

impl Default for ManifestDetector {
    fn default() -> Self {
        Self::new()
    }
}
