//! 도메인 타입 -- 매니페스트 추출 전용 데이터 구조
//!
//! 생태계, 패키지 좌표, 좌표 집합, 매니페스트 형식 등 추출 결과의 핵심 타입을 정의합니다.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ExtractorError;

/// 패키지 생태계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// JavaScript/TypeScript (package-lock.json, yarn.lock)
    Npm,
    /// Python (requirements.txt)
    Pypi,
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.purl_type())
    }
}

impl Ecosystem {
    /// 생태계에 대응하는 Package URL 타입을 반환합니다.
    ///
    /// 예: Npm -> "npm", Pypi -> "pypi"
    pub fn purl_type(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pypi => "pypi",
        }
    }

    /// Package URL 타입 문자열에서 생태계를 찾습니다 (정확히 일치).
    pub fn from_purl_type(s: &str) -> Option<Self> {
        match s {
            "npm" => Some(Self::Npm),
            "pypi" => Some(Self::Pypi),
            _ => None,
        }
    }
}

/// 정규화된 패키지 좌표
///
/// `pkg:<ecosystem>/<name>@<version>` 문자열로 표현됩니다.
/// 이름은 scoped npm 패키지처럼 `@`로 시작할 수 있지만 그 외 위치에는 `@`를 포함하지 않으며,
/// 버전은 npm alias(`npm:foo@1.0.0`)처럼 `@`를 포함할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageCoordinate {
    ecosystem: Ecosystem,
    name: String,
    version: String,
}

impl PackageCoordinate {
    /// 생태계, 이름, 버전으로 좌표를 생성합니다.
    pub fn new(ecosystem: Ecosystem, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            ecosystem,
            name: name.into(),
            version: version.into(),
        }
    }

    /// 생태계
    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    /// 패키지 이름
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 해석된 버전
    pub fn version(&self) -> &str {
        &self.version
    }

    /// 정규 Package URL 문자열을 반환합니다.
    pub fn purl(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PackageCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pkg:{}/{}@{}",
            self.ecosystem.purl_type(),
            self.name,
            self.version
        )
    }
}

impl FromStr for PackageCoordinate {
    type Err = ExtractorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ExtractorError::InvalidCoordinate {
            input: s.to_owned(),
            reason: reason.to_owned(),
        };

        let rest = s
            .strip_prefix("pkg:")
            .ok_or_else(|| invalid("missing 'pkg:' prefix"))?;
        let (purl_type, name_version) = rest
            .split_once('/')
            .ok_or_else(|| invalid("missing '/' after package type"))?;
        let ecosystem =
            Ecosystem::from_purl_type(purl_type).ok_or_else(|| invalid("unknown package type"))?;
        let (name, version) =
            split_name_version(name_version).ok_or_else(|| invalid("missing '@' before version"))?;

        if name.is_empty() {
            return Err(invalid("empty package name"));
        }
        if version.is_empty() {
            return Err(invalid("empty package version"));
        }

        Ok(Self::new(ecosystem, name, version))
    }
}

impl Serialize for PackageCoordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `name@range` 형태의 문자열을 위치 0이 아닌 첫 번째 `@`에서 나눕니다.
///
/// `@scope/name@^1.0.0` -> `("@scope/name", "^1.0.0")`
pub(crate) fn split_name_version(key: &str) -> Option<(&str, &str)> {
    let first = key.chars().next()?.len_utf8();
    let at = key[first..].find('@')? + first;
    Some((&key[..at], &key[at + 1..]))
}

/// 한 번의 추출 결과인 좌표 집합
///
/// 좌표 문자열 자체를 키로 중복을 제거하며, 순회 순서는 좌표 문자열의 사전순입니다.
/// JSON으로는 좌표 문자열 배열로 직렬화됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateSet {
    coordinates: BTreeMap<String, PackageCoordinate>,
}

impl CoordinateSet {
    /// 빈 집합을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 좌표를 추가합니다. 새로 추가되었으면 `true`를 반환합니다.
    pub fn insert(&mut self, coordinate: PackageCoordinate) -> bool {
        let key = coordinate.purl();
        if self.coordinates.contains_key(&key) {
            return false;
        }
        self.coordinates.insert(key, coordinate);
        true
    }

    /// 좌표 개수
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// 비어있는지 여부
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// 좌표 문자열이 집합에 있는지 확인합니다.
    pub fn contains(&self, purl: &str) -> bool {
        self.coordinates.contains_key(purl)
    }

    /// 좌표를 사전순으로 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = &PackageCoordinate> {
        self.coordinates.values()
    }

    /// 좌표 문자열 목록을 사전순으로 반환합니다.
    pub fn to_purls(&self) -> Vec<String> {
        self.coordinates.keys().cloned().collect()
    }

    /// 집합을 소비하여 좌표 문자열 목록으로 변환합니다.
    pub fn into_vec(self) -> Vec<String> {
        self.coordinates.into_keys().collect()
    }
}

impl FromIterator<PackageCoordinate> for CoordinateSet {
    fn from_iter<I: IntoIterator<Item = PackageCoordinate>>(iter: I) -> Self {
        let mut set = Self::new();
        for coordinate in iter {
            set.insert(coordinate);
        }
        set
    }
}

impl Serialize for CoordinateSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.coordinates.keys())
    }
}

impl fmt::Display for CoordinateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoordinateSet({} coordinates)", self.coordinates.len())
    }
}

/// 추출 입력 문서
///
/// 파일 이름은 형식 선택에만 사용됩니다.
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    /// 파일 이름 (경로 포함 가능)
    pub filename: String,
    /// 파일 전체 내용
    pub content: String,
}

impl ManifestDocument {
    /// 새 문서를 생성합니다.
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// 인식하는 매니페스트 형식 (닫힌 집합)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestFormat {
    /// npm `package-lock.json`
    NpmLock,
    /// pip `requirements.txt`
    Requirements,
    /// Yarn `yarn.lock` (classic 또는 modern)
    YarnLock,
}

impl ManifestFormat {
    /// 선택 우선순위 순서의 전체 형식 목록
    pub const ALL: [ManifestFormat; 3] = [Self::NpmLock, Self::Requirements, Self::YarnLock];

    /// 이 형식을 선택하는 파일 이름 접미사
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::NpmLock => "package-lock.json",
            Self::Requirements => "requirements.txt",
            Self::YarnLock => "yarn.lock",
        }
    }

    /// 이 형식이 생성하는 좌표의 생태계
    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            Self::NpmLock | Self::YarnLock => Ecosystem::Npm,
            Self::Requirements => Ecosystem::Pypi,
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// 형식별 파서가 만들어내는 중간 항목
///
/// 버전을 해석할 수 없는 항목은 좌표를 만들지 않고 조용히 건너뜁니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPackageEntry {
    /// 패키지 이름
    pub name: String,
    /// 해석된 버전
    pub version: Option<String>,
    /// npm v2/v3 `packages` 맵의 의존성 트리 경로 (이름 유도에 사용)
    pub path: Option<String>,
}

impl ParsedPackageEntry {
    /// 이름과 (선택적) 버전으로 항목을 생성합니다.
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
            path: None,
        }
    }

    /// 트리 경로를 기록합니다.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// 좌표로 변환합니다. 이름이나 버전이 비어 있으면 `None`.
    pub fn into_coordinate(self, ecosystem: Ecosystem) -> Option<PackageCoordinate> {
        let version = self.version.filter(|v| !v.is_empty())?;
        if self.name.is_empty() {
            return None;
        }
        Some(PackageCoordinate::new(ecosystem, self.name, version))
    }
}
