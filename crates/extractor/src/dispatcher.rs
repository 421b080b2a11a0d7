//! 형식 디스패처 -- 파일 이름으로 추출기를 고르고 결과를 검증
//!
//! [`FormatDispatcher`]는 파일 이름 접미사로 형식을 고른 뒤 해당 추출기를 실행합니다.
//!
//! # 선택 규칙 (처음 일치하는 접미사)
//!
//! 1. `package-lock.json` → [`NpmLockExtractor`]
//! 2. `requirements.txt` → [`RequirementsExtractor`]
//! 3. `yarn.lock` → [`YarnClassicExtractor`], 실패 시 [`YarnModernExtractor`]
//!
//! 두 yarn 추출기가 모두 실패하면 두 메시지를 모두 담은 `ParseFailure`를 반환합니다.
//! 추출 결과가 비어 있으면 `EmptyResult`입니다.
//!
//! 디스패처는 상태가 없으며 `Send + Sync`이므로 `Arc`로 공유할 수 있습니다.

use metrics::{counter, histogram};
use serde::Serialize;
use tracing::{debug, info, warn};

use depsentry_core::metrics as m;

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::npm::NpmLockExtractor;
use crate::parser::requirements::RequirementsExtractor;
use crate::parser::yarn_classic::YarnClassicExtractor;
use crate::parser::yarn_modern::YarnModernExtractor;
use crate::parser::{ManifestDetector, ManifestExtractor};
use crate::types::{CoordinateSet, ManifestDocument, ManifestFormat};

/// 한 번의 추출 결과와 실제로 사용된 파서 정보
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    /// 파일 이름으로 선택된 형식
    pub format: ManifestFormat,
    /// 실제로 성공한 추출기 이름 (예: "yarn.lock (modern)")
    pub parsed_as: &'static str,
    /// 추출된 좌표
    pub coordinates: CoordinateSet,
}

/// 매니페스트 형식 디스패처
pub struct FormatDispatcher {
    config: ExtractorConfig,
    detector: ManifestDetector,
    modern: YarnModernExtractor,
}

impl FormatDispatcher {
    /// 기본 설정으로 디스패처를 생성합니다.
    pub fn new() -> Self {
        Self::from_valid_config(ExtractorConfig::default())
    }

    /// 주어진 설정을 검증하고 디스패처를 생성합니다.
    pub fn with_config(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ExtractorConfig) -> Self {
        let modern =
            YarnModernExtractor::new().with_resolution_fallback(config.modern_resolution_fallback);
        Self {
            config,
            detector: ManifestDetector::new(),
            modern,
        }
    }

    /// 현재 설정
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// 파일 이름에서 형식을 판별합니다.
    pub fn detect(&self, filename: &str) -> Option<ManifestFormat> {
        self.detector.detect(filename)
    }

    /// 인식하는 파일 이름 접미사 목록 (우선순위 순서)
    pub fn supported_suffixes(&self) -> Vec<&'static str> {
        ManifestFormat::ALL.iter().map(|f| f.suffix()).collect()
    }

    /// 파일 이름과 내용으로 좌표 집합을 추출합니다.
    pub fn extract(&self, filename: &str, content: &str) -> Result<CoordinateSet, ExtractorError> {
        self.extract_detailed(filename, content)
            .map(|extraction| extraction.coordinates)
    }

    /// [`ManifestDocument`]에서 좌표 집합을 추출합니다.
    pub fn extract_document(
        &self,
        document: &ManifestDocument,
    ) -> Result<CoordinateSet, ExtractorError> {
        self.extract(&document.filename, &document.content)
    }

    /// 좌표와 함께 선택된 형식, 성공한 추출기 이름을 반환합니다.
    pub fn extract_detailed(
        &self,
        filename: &str,
        content: &str,
    ) -> Result<Extraction, ExtractorError> {
        debug!(filename, size = content.len(), "received manifest");

        let Some(format) = self.detect(filename) else {
            record_result("unknown", "unsupported");
            return Err(ExtractorError::UnsupportedFormat {
                filename: filename.to_owned(),
            });
        };
        let format_label = format.suffix();

        if content.len() > self.config.max_content_size {
            record_result(format_label, "too_large");
            return Err(ExtractorError::ContentTooLarge {
                size: content.len(),
                max: self.config.max_content_size,
            });
        }
        histogram!(m::EXTRACTOR_CONTENT_SIZE_BYTES, m::LABEL_FORMAT => format_label)
            .record(content.len() as f64);

        let (parsed_as, coordinates) = match self.run(format, content) {
            Ok(result) => result,
            Err(e) => {
                record_result(format_label, "parse_failure");
                return Err(e);
            }
        };

        if coordinates.is_empty() {
            record_result(format_label, "empty");
            return Err(ExtractorError::EmptyResult {
                filename: filename.to_owned(),
            });
        }

        record_result(format_label, "success");
        counter!(
            m::EXTRACTOR_COORDINATES_TOTAL,
            m::LABEL_FORMAT => format_label,
            m::LABEL_ECOSYSTEM => format.ecosystem().purl_type()
        )
        .increment(coordinates.len() as u64);
        info!(
            filename,
            parsed_as,
            coordinates = coordinates.len(),
            "parsed coordinates"
        );

        Ok(Extraction {
            format,
            parsed_as,
            coordinates,
        })
    }

    fn run(
        &self,
        format: ManifestFormat,
        content: &str,
    ) -> Result<(&'static str, CoordinateSet), ExtractorError> {
        match format {
            ManifestFormat::NpmLock => run_one(&NpmLockExtractor, content),
            ManifestFormat::Requirements => run_one(&RequirementsExtractor, content),
            ManifestFormat::YarnLock => self.run_yarn(content),
        }
    }

    /// classic을 먼저 시도하고, 실패하면 modern으로 넘어갑니다.
    fn run_yarn(&self, content: &str) -> Result<(&'static str, CoordinateSet), ExtractorError> {
        let classic_error = match run_one(&YarnClassicExtractor, content) {
            Ok(result) => {
                info!("parsed yarn.lock as v1 (classic)");
                return Ok(result);
            }
            Err(e) => e,
        };

        counter!(m::EXTRACTOR_YARN_FALLBACKS_TOTAL).increment(1);
        warn!(error = %classic_error, "yarn.lock is not v1, trying v2+ parser");

        match run_one(&self.modern, content) {
            Ok(result) => {
                info!("parsed yarn.lock as v2+ (modern)");
                Ok(result)
            }
            Err(modern_error) => {
                warn!(error = %modern_error, "failed to parse yarn.lock as v1 or v2+");
                Err(ExtractorError::ParseFailure {
                    format: ManifestFormat::YarnLock.suffix().to_owned(),
                    reason: format!(
                        "file may be corrupt or an unsupported version; {classic_error}; {modern_error}"
                    ),
                })
            }
        }
    }
}

impl Default for FormatDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn run_one(
    extractor: &dyn ManifestExtractor,
    content: &str,
) -> Result<(&'static str, CoordinateSet), ExtractorError> {
    extractor
        .extract(content)
        .map(|coordinates| (extractor.name(), coordinates))
}

fn record_result(format: &'static str, result: &'static str) {
    counter!(
        m::EXTRACTOR_MANIFESTS_TOTAL,
        m::LABEL_FORMAT => format,
        m::LABEL_RESULT => result
    )
    .increment(1);
}

/// 기본 설정의 디스패처로 좌표 집합을 추출합니다.
///
/// ```
/// let set = depsentry_extractor::extract("requirements.txt", "flask==2.0.1\n").unwrap();
/// assert_eq!(set.into_vec(), vec!["pkg:pypi/flask@2.0.1"]);
/// ```
pub fn extract(filename: &str, content: &str) -> Result<CoordinateSet, ExtractorError> {
    FormatDispatcher::new().extract(filename, content)
}
