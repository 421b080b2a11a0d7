//! yarn.lock v2+ (modern, Berry) 추출기
//!
//! Berry lockfile은 YAML 문서이며 최상위 키는 descriptor, 값은 항목 블록입니다.
//! 예약 키 `__metadata`는 건너뜁니다.
//!
//! ```yaml
//! __metadata:
//!   version: 6
//!
//! "lodash@npm:^4.17.21":
//!   name: lodash
//!   version: 4.17.21
//!   resolution: "lodash@npm:4.17.21"
//! ```
//!
//! 스칼라 값은 문자열로 그대로 읽으므로 `version: 1.10`은 `1.10`으로 유지됩니다.
//! `__metadata` 값은 모양을 보지 않고 버리므로, 숫자나 중첩 블록이어도 실패하지 않습니다.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::ExtractorError;
use crate::parser::{ManifestExtractor, parse_failure};
use crate::types::{Ecosystem, ParsedPackageEntry, split_name_version};

const METADATA_KEY: &str = "__metadata";

/// yarn.lock v2+ 추출기
#[derive(Debug, Clone, Copy, Default)]
pub struct YarnModernExtractor {
    resolution_fallback: bool,
}

/// Berry lockfile 항목 (파싱용)
#[derive(Deserialize)]
struct ModernEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    resolution: Option<String>,
}

/// `__metadata`를 제외한 최상위 항목들
struct Lockfile {
    entries: Vec<ModernEntry>,
}

impl<'de> Deserialize<'de> for Lockfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(LockfileVisitor)
    }
}

struct LockfileVisitor;

impl<'de> Visitor<'de> for LockfileVisitor {
    type Value = Lockfile;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of descriptors to package entries")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Lockfile, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            if key == METADATA_KEY {
                map.next_value::<IgnoredAny>()?;
            } else {
                entries.push(map.next_value::<ModernEntry>()?);
            }
        }
        Ok(Lockfile { entries })
    }
}

impl YarnModernExtractor {
    /// `name` 필드가 있는 항목만 받아들이는 추출기를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// `name`이 없을 때 `resolution`(`lodash@npm:4.17.21`)에서 이름을 유도할지 설정합니다.
    pub fn with_resolution_fallback(mut self, enabled: bool) -> Self {
        self.resolution_fallback = enabled;
        self
    }

    fn entry_name(&self, entry: &ModernEntry) -> Option<String> {
        if let Some(name) = &entry.name {
            return Some(name.clone());
        }
        if !self.resolution_fallback {
            return None;
        }
        entry
            .resolution
            .as_deref()
            .and_then(split_name_version)
            .map(|(name, _)| name.to_owned())
    }
}

impl ManifestExtractor for YarnModernExtractor {
    fn name(&self) -> &'static str {
        "yarn.lock (modern)"
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn parse_entries(&self, content: &str) -> Result<Vec<ParsedPackageEntry>, ExtractorError> {
        if is_blank_document(content) {
            return Ok(Vec::new());
        }

        let lockfile: Lockfile =
            serde_yaml::from_str(content).map_err(|e| parse_failure(self.name(), e))?;

        Ok(lockfile
            .entries
            .iter()
            .filter_map(|entry| {
                let name = self.entry_name(entry)?;
                Some(ParsedPackageEntry::new(name, entry.version.clone()))
            })
            .collect())
    }
}

fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}
