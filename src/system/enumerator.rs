use crate::utils::error::{GalleryError, Result};
use std::fs;
use std::path::Path;

/// 스캔 디렉토리에서 제외되는 기본 예약 이름
pub const DEFAULT_RESERVED_NAME: &str = "Select";

/// 스캔 디렉토리 파일 열거기
#[derive(Debug, Clone)]
pub struct FileEnumerator {
    /// 목록에서 제외할 예약 이름
    reserved_name: String,
}

impl FileEnumerator {
    /// 새 열거기 생성
    pub fn new(reserved_name: impl Into<String>) -> Self {
        Self {
            reserved_name: reserved_name.into(),
        }
    }

    /// 디렉토리의 파일명 목록
    ///
    /// 숨김 파일('.'으로 시작)과 예약 이름은 제외하고, 이름순으로 정렬합니다.
    pub fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let read_dir = fs::read_dir(dir).map_err(|source| GalleryError::EnumerationFailed {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in read_dir {
            // 에러 발생 시 해당 엔트리는 스킵
            let Ok(entry) = entry else { continue };
            let name = entry.file_name().to_string_lossy().to_string();
            if self.is_visible(&name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Source 목록 초기 내용
    ///
    /// 열거 실패는 로그만 남기고 빈 목록으로 처리합니다.
    pub fn scan_source_items(&self, dir: &Path) -> Vec<String> {
        match self.list_files(dir) {
            Ok(names) => {
                tracing::info!(dir = %dir.display(), count = names.len(), "scan directory enumerated");
                names
            }
            Err(err) => {
                tracing::warn!(error = %err, "scan directory enumeration failed");
                Vec::new()
            }
        }
    }

    fn is_visible(&self, name: &str) -> bool {
        !name.starts_with('.') && name != self.reserved_name
    }
}

impl Default for FileEnumerator {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_NAME)
    }
}
