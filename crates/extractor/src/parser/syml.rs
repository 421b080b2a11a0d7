//! Yarn v1 lockfile 문법 파서
//!
//! Yarn classic이 쓰는 들여쓰기 기반 형식을 [`Node`] 트리로 읽습니다.
//! 결과는 성공/충돌/실패를 구분하는 [`ParseOutcome`] 태그로 반환되며,
//! 추출기는 성공 외의 결과를 "v1 형식이 아님"으로 해석합니다.
//!
//! # 문법
//!
//! ```text
//! # yarn lockfile v1
//!
//! "@babel/core@^7.0.0", "@babel/core@^7.22.0":
//!   version "7.22.5"
//!   resolved "https://registry.yarnpkg.com/@babel/core/-/core-7.22.5.tgz"
//!   dependencies:
//!     "@babel/parser" "^7.22.5"
//! ```
//!
//! - `#` 주석과 빈 줄은 무시
//! - 최상위 줄은 반드시 `key[, key...]:` 헤더 (키는 큰따옴표로 감쌀 수 있음)
//! - 들여쓴 줄은 `key:` (중첩 블록) 또는 `key value` (공백 구분 쌍)
//! - 들여쓰기는 두 칸 단위 공백만 허용
//!
//! 다음은 거부합니다: `key: value` 쌍(YAML 형식), 헤더가 아닌 최상위 줄,
//! 탭 들여쓰기, 닫히지 않은 따옴표, git 병합 충돌 표식.
//!
//! 줄 모양은 `grammars/yarn_lock.pest` 문법이 분류하고, 이 모듈은 들여쓰기 깊이로
//! 블록 트리를 조립합니다.

use std::collections::BTreeMap;

use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "src/parser/grammars/yarn_lock.pest"]
struct YarnLockGrammar;

/// 키 → 노드 매핑
pub type Mapping = BTreeMap<String, Node>;

/// 중첩 블록의 최대 깊이
const MAX_DEPTH: usize = 32;

const CONFLICT_MARKERS: [&str; 3] = ["<<<<<<<", "=======", ">>>>>>>"];

/// lockfile 트리 노드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `key value`의 값
    Scalar(String),
    /// `key:` 아래의 중첩 블록
    Map(Mapping),
}

impl Node {
    /// 스칼라 값이면 문자열을 반환합니다.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Map(_) => None,
        }
    }

    /// 블록이면 매핑을 반환합니다.
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(map) => Some(map),
            Self::Scalar(_) => None,
        }
    }

    /// 블록의 하위 키를 조회합니다.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map().and_then(|map| map.get(key))
    }
}

/// 파싱 결과 태그
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// 문법에 맞는 lockfile
    Success(Mapping),
    /// 해결되지 않은 git 병합 충돌 표식이 있음
    Conflict {
        /// 첫 표식이 있는 줄 번호 (1부터)
        line: usize,
    },
    /// 문법 오류
    Failure {
        /// 오류가 난 줄 번호 (1부터)
        line: usize,
        /// 오류 사유
        reason: String,
    },
}

#[derive(Debug)]
enum LineKind {
    Header(Vec<String>),
    Pair(String, String),
}

#[derive(Debug)]
struct SourceLine {
    number: usize,
    depth: usize,
    kind: LineKind,
}

#[derive(Debug)]
struct SyntaxError {
    line: usize,
    reason: String,
}

impl SyntaxError {
    fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }

    fn at(line: &SourceLine, reason: impl Into<String>) -> Self {
        Self::new(line.number, reason)
    }
}

/// Yarn v1 lockfile 텍스트를 파싱합니다.
pub fn parse(content: &str) -> ParseOutcome {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    if let Some(line) = find_conflict_marker(content) {
        return ParseOutcome::Conflict { line };
    }

    let result = read_lines(content).and_then(|lines| {
        let mut pos = 0;
        let mapping = parse_block(&lines, &mut pos, 0)?;
        match lines.get(pos) {
            Some(line) => Err(SyntaxError::at(line, "unexpected indentation")),
            None => Ok(mapping),
        }
    });

    match result {
        Ok(mapping) => ParseOutcome::Success(mapping),
        Err(e) => ParseOutcome::Failure {
            line: e.line,
            reason: e.reason,
        },
    }
}

fn find_conflict_marker(content: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| CONFLICT_MARKERS.iter().any(|m| line.starts_with(m)))
        .map(|idx| idx + 1)
}

/// 문법으로 의미 있는 줄을 분류합니다. 주석과 빈 줄은 문법 단계에서 빠집니다.
fn read_lines(content: &str) -> Result<Vec<SourceLine>, SyntaxError> {
    let pairs = YarnLockGrammar::parse(Rule::file, content).map_err(|e| {
        let (line, col) = match e.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };
        SyntaxError::new(line, format!("unrecognized syntax at column {col}"))
    })?;

    pairs
        .flatten()
        .filter(|pair| pair.as_rule() == Rule::entry_line)
        .map(classify_line)
        .collect()
}

fn classify_line(entry: Pair<'_, Rule>) -> Result<SourceLine, SyntaxError> {
    let number = entry.as_span().start_pos().line_col().0;
    let fail = |reason: String| SyntaxError::new(number, reason);

    let mut inner = entry.into_inner();
    let (Some(indent), Some(body)) = (inner.next(), inner.next()) else {
        return Err(fail("malformed line".to_owned()));
    };
    let depth = indent_depth(indent.as_str()).map_err(|r| fail(r.to_owned()))?;

    let kind = match body.as_rule() {
        Rule::header => {
            let keys = header_keys(body);
            if keys.iter().any(String::is_empty) {
                return Err(fail("empty key in entry header".to_owned()));
            }
            LineKind::Header(keys)
        }
        Rule::pair => {
            let mut tokens = body.into_inner().map(token_text);
            match (tokens.next(), tokens.next()) {
                (Some(key), _) if key.is_empty() => return Err(fail("empty key".to_owned())),
                (Some(key), Some(value)) => LineKind::Pair(key, value),
                _ => return Err(fail("malformed line".to_owned())),
            }
        }
        Rule::yaml_pair => {
            return Err(fail(format!("unexpected ':' after key '{}'", first_token(body))));
        }
        Rule::missing_value => {
            return Err(fail(format!("missing value for key '{}'", first_token(body))));
        }
        Rule::trailing_content => {
            return Err(fail(format!(
                "unexpected trailing content after value of '{}'",
                first_token(body)
            )));
        }
        Rule::unterminated_quote => return Err(fail("unterminated quoted string".to_owned())),
        _ => return Err(fail("malformed line".to_owned())),
    };

    Ok(SourceLine {
        number,
        depth,
        kind,
    })
}

fn indent_depth(indent: &str) -> Result<usize, &'static str> {
    if indent.chars().any(|c| c != ' ') {
        return Err("indentation must use spaces");
    }
    if indent.len() % 2 != 0 {
        return Err("indentation must be a multiple of two spaces");
    }
    Ok(indent.len() / 2)
}

fn parse_block(
    lines: &[SourceLine],
    pos: &mut usize,
    depth: usize,
) -> Result<Mapping, SyntaxError> {
    let mut mapping = Mapping::new();

    while let Some(line) = lines.get(*pos) {
        if line.depth < depth {
            break;
        }
        if line.depth > depth {
            return Err(SyntaxError::at(line, "unexpected indentation"));
        }
        *pos += 1;

        match &line.kind {
            LineKind::Header(keys) => {
                if depth >= MAX_DEPTH {
                    return Err(SyntaxError::at(line, "blocks nested too deeply"));
                }
                let block = parse_block(lines, pos, depth + 1)?;
                for key in keys {
                    mapping.insert(key.clone(), Node::Map(block.clone()));
                }
            }
            LineKind::Pair(..) if depth == 0 => {
                return Err(SyntaxError::at(line, "expected an entry header ending with ':'"));
            }
            LineKind::Pair(key, value) => {
                mapping.insert(key.clone(), Node::Scalar(value.clone()));
            }
        }
    }

    Ok(mapping)
}

/// `header` → `key_list` → 키 토큰들
fn header_keys(header: Pair<'_, Rule>) -> Vec<String> {
    header
        .into_inner()
        .flat_map(|list| list.into_inner())
        .map(token_text)
        .collect()
}

fn first_token(body: Pair<'_, Rule>) -> String {
    body.into_inner().next().map(token_text).unwrap_or_default()
}

/// 따옴표 문자열은 이스케이프를 해석하고, bare 토큰은 그대로 씁니다.
fn token_text(token: Pair<'_, Rule>) -> String {
    match token.as_rule() {
        Rule::quoted_string => token
            .into_inner()
            .next()
            .map(|inner| unescape(inner.as_str()))
            .unwrap_or_default(),
        _ => token.as_str().to_owned(),
    }
}

fn unescape(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some(other) => value.push(other),
            None => {}
        }
    }

    value
}
