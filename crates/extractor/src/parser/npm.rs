//! package-lock.json 추출기
//!
//! [`NpmLockExtractor`]는 npm lockfile의 세 가지 버전을 모두 처리합니다.
//!
//! - v2/v3: 최상위 `packages` 맵 (키는 `node_modules/` 트리 경로)
//! - v1: 최상위 `dependencies` 맵 (키는 패키지 이름)
//!
//! `packages`가 있으면 `dependencies`는 보지 않습니다.
//!
//! # package-lock.json v3 형식 예시
//!
//! ```json
//! {
//!   "name": "my-app",
//!   "lockfileVersion": 3,
//!   "packages": {
//!     "": { "name": "my-app", "version": "1.0.0" },
//!     "node_modules/lodash": { "version": "4.17.21" },
//!     "node_modules/a/node_modules/@scope/b": { "version": "2.0.0" }
//!   }
//! }
//! ```

use serde_json::{Map, Value};

use crate::error::ExtractorError;
use crate::parser::{ManifestExtractor, parse_failure};
use crate::types::{Ecosystem, ParsedPackageEntry};

const NODE_MODULES: &str = "node_modules/";

/// package-lock.json 추출기
pub struct NpmLockExtractor;

impl ManifestExtractor for NpmLockExtractor {
    fn name(&self) -> &'static str {
        "package-lock.json"
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn parse_entries(&self, content: &str) -> Result<Vec<ParsedPackageEntry>, ExtractorError> {
        let lockfile: Value =
            serde_json::from_str(content).map_err(|e| parse_failure(self.name(), e))?;

        if let Some(packages) = lockfile.get("packages").and_then(Value::as_object) {
            return Ok(tree_entries(packages));
        }

        if let Some(dependencies) = lockfile.get("dependencies").and_then(Value::as_object) {
            return Ok(dependencies
                .iter()
                .map(|(name, dep)| ParsedPackageEntry::new(name.as_str(), version_of(dep)))
                .collect());
        }

        Ok(Vec::new())
    }
}

/// v2/v3 `packages` 맵에서 항목을 만듭니다.
///
/// 루트(빈 키)와 `node_modules/`를 포함하지 않는 경로(workspace 링크 등)는 건너뜁니다.
fn tree_entries(packages: &Map<String, Value>) -> Vec<ParsedPackageEntry> {
    packages
        .iter()
        .filter(|(path, _)| !path.is_empty() && path.contains(NODE_MODULES))
        .map(|(path, entry)| {
            ParsedPackageEntry::new(extract_package_name(path), version_of(entry))
                .with_path(path.as_str())
        })
        .collect()
}

fn version_of(entry: &Value) -> Option<String> {
    entry
        .get("version")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// "node_modules/a/node_modules/@scope/b" 에서 마지막 `node_modules/` 이후를 패키지명으로 사용
fn extract_package_name(path: &str) -> &str {
    match path.rfind(NODE_MODULES) {
        Some(pos) => &path[pos + NODE_MODULES.len()..],
        None => path,
    }
}
