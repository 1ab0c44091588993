//! 생성된 프로젝트 구조 검사
//!
//! 존재 여부와 종류(파일/디렉토리)만 확인합니다. 내용은 검사하지 않습니다.

use std::path::Path;

use tracing::debug;

use scaffold_verify_core::error::StructureError;
use scaffold_verify_core::types::{ExpectedPath, PathKind};

/// 기대 경로가 모두 존재하는지 확인합니다.
///
/// 누락되었거나 종류가 다른 경로를 모두 모아 하나의 에러로 반환합니다.
pub fn assert_structure(project_dir: &Path, expected: &[ExpectedPath]) -> Result<(), StructureError> {
    let missing: Vec<String> = expected
        .iter()
        .filter(|e| !exists_as(&project_dir.join(&e.path), e.kind))
        .map(|e| format!("{} ({})", e.path, e.kind))
        .collect();

    debug!(
        checked = expected.len(),
        missing = missing.len(),
        "structure check finished"
    );

    if missing.is_empty() {
        Ok(())
    } else {
        Err(StructureError::Missing { missing })
    }
}

fn exists_as(path: &Path, kind: PathKind) -> bool {
    match kind {
        PathKind::File => path.is_file(),
        PathKind::Directory => path.is_dir(),
    }
}
