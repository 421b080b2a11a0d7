//! requirements.txt 추출기
//!
//! `name==version` 형태로 정확히 고정된 줄만 좌표로 만듭니다.
//! `>=`, `~=`, 버전 없는 이름, `;` 환경 마커가 붙은 줄 등은 조용히 건너뜁니다.

use crate::error::ExtractorError;
use crate::parser::ManifestExtractor;
use crate::types::{Ecosystem, ParsedPackageEntry};

/// requirements.txt 추출기
pub struct RequirementsExtractor;

impl ManifestExtractor for RequirementsExtractor {
    fn name(&self) -> &'static str {
        "requirements.txt"
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pypi
    }

    fn parse_entries(&self, content: &str) -> Result<Vec<ParsedPackageEntry>, ExtractorError> {
        Ok(content.split('\n').filter_map(parse_pinned_line).collect())
    }
}

/// 한 줄을 해석합니다. 고정 버전 줄이 아니면 `None`.
fn parse_pinned_line(line: &str) -> Option<ParsedPackageEntry> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    // 환경 마커가 붙은 줄은 조건부 의존성
    if line.contains(';') {
        return None;
    }

    let mut parts = line.split("==");
    let (name, version) = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(version), None) => (name.trim(), version.trim()),
        _ => return None,
    };

    Some(ParsedPackageEntry::new(name, Some(version.to_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_line_becomes_coordinate() {
        let set = RequirementsExtractor.extract("flask==2.0.1").unwrap();
        assert_eq!(set.into_vec(), vec!["pkg:pypi/flask@2.0.1"]);
    }

    #[test]
    fn unpinned_comment_and_blank_lines_are_skipped() {
        let content = "\n# web stack\nflask>=2.0.1\nrequests\n   \nDjango~=4.2\n";
        let set = RequirementsExtractor.extract(content).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let content = "  requests == 2.31.0  \r\nnumpy==1.26.0\r\n";
        let set = RequirementsExtractor.extract(content).unwrap();
        assert_eq!(
            set.into_vec(),
            vec!["pkg:pypi/numpy@1.26.0", "pkg:pypi/requests@2.31.0"]
        );
    }

    #[test]
    fn double_pin_is_not_a_pinned_line() {
        let set = RequirementsExtractor.extract("weird==1.0==2.0").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn empty_name_or_version_is_skipped() {
        let set = RequirementsExtractor
            .extract("==1.0.0\nflask==\n")
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn environment_marker_line_is_skipped() {
        let set = RequirementsExtractor
            .extract("pandas==2.1.1 ; python_version >= \"3.9\"\n")
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn duplicate_pins_collapse() {
        let set = RequirementsExtractor
            .extract("flask==2.0.1\nflask == 2.0.1\n")
            .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn inline_comment_line_is_skipped_only_when_leading() {
        let set = RequirementsExtractor
            .extract("#flask==2.0.1\nclick==8.1.7\n")
            .unwrap();
        assert_eq!(set.into_vec(), vec!["pkg:pypi/click@8.1.7"]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pinned_lines_always_extract(
                name in "[A-Za-z][A-Za-z0-9_.-]{0,20}",
                version in "[0-9][0-9a-z.]{0,10}",
                pad in " {0,3}",
            ) {
                let content = format!("{pad}{name}{pad}=={pad}{version}{pad}\n");
                let set = RequirementsExtractor.extract(&content).unwrap();
                let expected = format!("pkg:pypi/{name}@{version}");
                prop_assert_eq!(set.into_vec(), vec![expected]);
            }

            #[test]
            fn range_specifiers_never_extract(
                name in "[A-Za-z][A-Za-z0-9_-]{0,20}",
                op in prop::sample::select(vec![">=", "<=", "~=", "!=", ">", "<"]),
                version in "[0-9][0-9.]{0,8}",
            ) {
                let content = format!("{name}{op}{version}\n");
                let set = RequirementsExtractor.extract(&content).unwrap();
                prop_assert!(set.is_empty());
            }
        }
    }
}
