//! 템플릿 파라미터: 렌더링 입력 데이터, slug 규칙, 플레이스홀더 치환
//!
//! [`TemplateParams`]는 템플릿 엔진에 `--data key=value` 로 전달되는 값의 집합입니다.
//! `project_slug`는 생성되는 패키지/모듈 이름이 되므로 식별자 규칙을 만족해야 합니다.
//!
//! # 사용 예시
//! ```
//! use scaffold_verify_core::params::TemplateParams;
//!
//! let params = TemplateParams::from_pairs([("project_name", "Test Project")])
//!     .normalize()
//!     .unwrap();
//! assert_eq!(params.get("project_slug"), Some("test_project"));
//! assert_eq!(
//!     params.interpolate("tests/test_{project_slug}.py").unwrap(),
//!     "tests/test_test_project.py"
//! );
//! ```

use std::collections::BTreeMap;

use heck::ToSnakeCase;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// 패키지 이름으로 쓰이는 slug 키
pub const SLUG_KEY: &str = "project_slug";
/// 사람이 읽는 프로젝트 이름 키 (slug 파생 원본)
pub const NAME_KEY: &str = "project_name";
/// 프로젝트 버전 키
pub const VERSION_KEY: &str = "version";

// 생성 프로젝트가 Python 패키지이므로 예약어는 모듈 이름이 될 수 없음
const RESERVED_SLUGS: &[&str] = &[
    "false", "none", "true", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// 템플릿 파라미터 매핑
///
/// 키 순서가 결정적이도록 `BTreeMap`을 사용합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateParams {
    values: BTreeMap<String, String>,
}

impl TemplateParams {
    /// 빈 파라미터 집합
    pub fn new() -> Self {
        Self::default()
    }

    /// `(key, value)` 쌍으로부터 생성합니다.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// `key=value` 문자열 목록으로부터 생성합니다 (CLI `--data` 인자).
    pub fn from_assignments<S: AsRef<str>>(items: &[S]) -> Result<Self, ParamError> {
        let mut params = Self::new();
        for item in items {
            let (key, value) = parse_assignment(item.as_ref())?;
            params.insert(key, value);
        }
        Ok(params)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `other`의 값으로 덮어씁니다.
    pub fn merge(&mut self, other: TemplateParams) {
        self.values.extend(other.values);
    }

    /// slug 를 반환합니다. 명시되지 않았다면 `project_name`에서 파생합니다.
    pub fn slug(&self) -> Result<String, ParamError> {
        if let Some(slug) = self.get(SLUG_KEY) {
            return Ok(slug.to_owned());
        }
        match self.get(NAME_KEY) {
            Some(name) => Ok(slugify(name)),
            None => Err(ParamError::Missing {
                name: SLUG_KEY.to_owned(),
            }),
        }
    }

    /// slug 를 채우고 전체 불변식을 검증한 파라미터를 반환합니다.
    pub fn normalize(mut self) -> Result<Self, ParamError> {
        let slug = self.slug()?;
        self.insert(SLUG_KEY, slug);
        self.validate()?;
        Ok(self)
    }

    /// 파라미터 불변식 검증
    ///
    /// - 키는 비어 있을 수 없음
    /// - `project_slug`(또는 파생 slug)는 식별자여야 함
    /// - `version`이 있으면 semver 여야 함
    pub fn validate(&self) -> Result<(), ParamError> {
        if let Some((key, value)) = self.values.iter().find(|(k, _)| k.trim().is_empty()) {
            return Err(ParamError::InvalidAssignment {
                input: format!("{key}={value}"),
            });
        }

        validate_slug(&self.slug()?)?;

        if let Some(version) = self.get(VERSION_KEY) {
            semver::Version::parse(version).map_err(|e| ParamError::InvalidVersion {
                value: version.to_owned(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// `{name}` 플레이스홀더를 파라미터 값으로 치환합니다.
    ///
    /// `{{` 와 `}}` 는 각각 리터럴 중괄호입니다.
    pub fn interpolate(&self, pattern: &str) -> Result<String, ParamError> {
        let mut out = String::with_capacity(pattern.len());
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(ParamError::MalformedPattern {
                            pattern: pattern.to_owned(),
                            reason: "unterminated '{'".to_owned(),
                        });
                    }
                    let value = self.get(name.trim()).ok_or_else(|| {
                        ParamError::UnknownPlaceholder {
                            name: name.clone(),
                            pattern: pattern.to_owned(),
                        }
                    })?;
                    out.push_str(value);
                }
                '}' => {
                    return Err(ParamError::MalformedPattern {
                        pattern: pattern.to_owned(),
                        reason: "unmatched '}'".to_owned(),
                    });
                }
                other => out.push(other),
            }
        }

        Ok(out)
    }

    /// 명령 벡터의 각 인자를 치환합니다.
    pub fn interpolate_all(&self, items: &[String]) -> Result<Vec<String>, ParamError> {
        items.iter().map(|item| self.interpolate(item)).collect()
    }
}

/// `key=value` 한 개를 파싱합니다. 값에는 `=`가 포함될 수 있습니다.
pub fn parse_assignment(input: &str) -> Result<(String, String), ParamError> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(ParamError::InvalidAssignment {
            input: input.to_owned(),
        }),
    }
}

/// 프로젝트 이름을 식별자 형태로 정규화합니다.
///
/// snake_case 변환 후 ASCII 영숫자와 `_` 외의 문자는 제거합니다.
pub fn slugify(name: &str) -> String {
    name.to_snake_case()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// slug 가 패키지/모듈 이름으로 유효한지 검사합니다.
pub fn validate_slug(slug: &str) -> Result<(), ParamError> {
    let invalid = |reason: &str| ParamError::InvalidSlug {
        slug: slug.to_owned(),
        reason: reason.to_owned(),
    };

    let Some(first) = slug.chars().next() else {
        return Err(invalid("must not be empty"));
    };
    if first.is_ascii_digit() {
        return Err(invalid("must not start with a digit"));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(invalid(
            "must contain only lowercase ASCII letters, digits and '_'",
        ));
    }
    if RESERVED_SLUGS.contains(&slug) {
        return Err(invalid("is a reserved keyword"));
    }
    Ok(())
}
