//! yarn.lock v1 (classic) 추출기
//!
//! [`syml`](crate::parser::syml) 파서가 성공을 돌려준 경우에만 항목을 만듭니다.
//! 성공이 아니면 `ParseFailure`를 반환하고, 디스패처는 이를 "v1이 아님" 신호로 받아
//! modern 추출기로 넘어갑니다.
//!
//! 키 `"@scope/name@^1.0.0"`의 이름은 위치 0이 아닌 첫 번째 `@` 앞부분(`@scope/name`)입니다.

use crate::error::ExtractorError;
use crate::parser::syml::{self, Node, ParseOutcome};
use crate::parser::{ManifestExtractor, parse_failure};
use crate::types::{Ecosystem, ParsedPackageEntry, split_name_version};

/// yarn.lock v1 추출기
pub struct YarnClassicExtractor;

impl ManifestExtractor for YarnClassicExtractor {
    fn name(&self) -> &'static str {
        "yarn.lock (classic)"
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn parse_entries(&self, content: &str) -> Result<Vec<ParsedPackageEntry>, ExtractorError> {
        let mapping = match syml::parse(content) {
            ParseOutcome::Success(mapping) => mapping,
            ParseOutcome::Conflict { line } => {
                return Err(parse_failure(
                    self.name(),
                    format!("line {line}: unresolved merge conflict markers"),
                ));
            }
            ParseOutcome::Failure { line, reason } => {
                return Err(parse_failure(self.name(), format!("line {line}: {reason}")));
            }
        };

        Ok(mapping
            .iter()
            .map(|(key, block)| {
                let version = block
                    .get("version")
                    .and_then(Node::as_scalar)
                    .map(str::to_owned);
                ParsedPackageEntry::new(name_from_key(key), version)
            })
            .collect())
    }
}

fn name_from_key(key: &str) -> &str {
    split_name_version(key).map_or(key, |(name, _)| name)
}
