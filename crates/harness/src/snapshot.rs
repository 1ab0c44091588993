//! 렌더링 결과 트리 스냅샷: 멱등성 비교용
//!
//! 같은 파라미터로 두 번 렌더링한 결과가 구조적으로 같은지 비교합니다.
//! 파일 내용은 비교하지 않고 상대 경로와 종류만 봅니다.

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

use scaffold_verify_core::types::PathKind;

// VCS 메타데이터는 커밋 해시/시간이 달라지므로 제외
const IGNORED_DIRS: &[&str] = &[".git"];

/// 프로젝트 루트 기준 상대 경로와 종류의 집합
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    entries: BTreeSet<(String, PathKind)>,
}

/// 두 스냅샷의 차이
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    pub only_left: Vec<String>,
    pub only_right: Vec<String>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty()
    }
}

impl TreeSnapshot {
    /// `root` 아래 트리를 읽습니다. 경로 구분자는 `/`로 통일합니다.
    pub fn capture(root: &Path) -> std::io::Result<Self> {
        let mut entries = BTreeSet::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !(e.file_type().is_dir()
                    && IGNORED_DIRS.iter().any(|d| e.file_name() == *d))
            });

        for entry in walker {
            let entry = entry.map_err(std::io::Error::other)?;
            let kind = if entry.file_type().is_dir() {
                PathKind::Directory
            } else {
                PathKind::File
            };
            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(std::io::Error::other)?;
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            entries.insert((rel, kind));
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str, kind: PathKind) -> bool {
        self.entries.contains(&(path.to_owned(), kind))
    }

    /// 한쪽에만 있는 항목을 `path (kind)` 형식으로 반환합니다.
    pub fn diff(&self, other: &TreeSnapshot) -> SnapshotDiff {
        let describe = |(path, kind): &(String, PathKind)| format!("{path} ({kind})");
        SnapshotDiff {
            only_left: self.entries.difference(&other.entries).map(describe).collect(),
            only_right: other.entries.difference(&self.entries).map(describe).collect(),
        }
    }
}
