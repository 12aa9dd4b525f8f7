//! 사용자 설정 (settings.toml)

use crate::system::DEFAULT_RESERVED_NAME;
use crate::utils::error::{GalleryError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_ENV: &str = "SCANGALLERY_SETTINGS_FILE";
const SCAN_DIR_ENV: &str = "SCANGALLERY_SCAN_DIR";

/// 애플리케이션 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 스캔 이미지 디렉토리
    pub scan_dir: PathBuf,
    /// 목록에서 제외할 예약 이름
    pub reserved_name: String,
    /// 테마 이름 (dark / light / high_contrast)
    pub theme: String,
    /// 언어 코드 (en / ko)
    pub language: String,
    /// Destination → Source 드롭 허용
    pub allow_drop_into_source: bool,
    /// 로그 레벨 (RUST_LOG 미설정 시)
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_dir: default_scan_dir(),
            reserved_name: DEFAULT_RESERVED_NAME.to_string(),
            theme: "dark".to_string(),
            language: "en".to_string(),
            allow_drop_into_source: false,
            log_level: "info".to_string(),
        }
    }
}

/// 기본 스캔 디렉토리: <data_dir>/scangallery/Scan
fn default_scan_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scangallery")
        .join("Scan")
}

impl Settings {
    /// 설정 파일 경로
    pub fn store_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(SETTINGS_FILE_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir().map(|dir| dir.join("scangallery").join("settings.toml"))
    }

    /// TOML 문자열에서 파싱
    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| GalleryError::Config(e.to_string()))
    }

    /// 파일에서 로드 (파일이 없으면 기본값)
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml(&data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(GalleryError::Io(e)),
        }
    }

    /// 설정 로드 후 환경변수/인자 오버라이드 적용
    ///
    /// 우선순위: 설정 파일 < `SCANGALLERY_SCAN_DIR` < 명령행 인자.
    /// 설정 파일이 잘못된 경우 기본값을 쓰고 오류를 함께 돌려줍니다.
    /// 로깅 초기화 전에 호출되므로 오류 기록은 호출자가 맡습니다.
    pub fn load(scan_dir_arg: Option<PathBuf>) -> (Self, Option<GalleryError>) {
        let (mut settings, error) = match Self::store_path() {
            Some(path) => match Self::load_from(&path) {
                Ok(settings) => (settings, None),
                Err(err) => (Self::default(), Some(err)),
            },
            None => (Self::default(), None),
        };

        if let Ok(dir) = env::var(SCAN_DIR_ENV) {
            if !dir.trim().is_empty() {
                settings.scan_dir = PathBuf::from(dir.trim());
            }
        }
        if let Some(dir) = scan_dir_arg {
            settings.scan_dir = dir;
        }
        (settings, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.reserved_name, "Select");
        assert_eq!(settings.theme, "dark");
        assert!(!settings.allow_drop_into_source);
        assert!(settings.scan_dir.ends_with("scangallery/Scan"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
scan_dir = "/tmp/scans"
allow_drop_into_source = true
"#,
        )
        .unwrap();

        assert_eq!(settings.scan_dir, PathBuf::from("/tmp/scans"));
        assert!(settings.allow_drop_into_source);
        assert_eq!(settings.language, "en");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Settings::from_toml("scan_dir = [").unwrap_err();
        assert!(matches!(err, GalleryError::Config(_)));
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "theme = \"light\"\nlanguage = \"ko\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.language, "ko");
    }

    // 환경변수를 건드리는 검사는 경합을 피하려고 한 테스트에 모음
    #[test]
    fn test_load_override_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "scan_dir = \"/from/file\"\n").unwrap();
        env::set_var(SETTINGS_FILE_ENV, &path);
        env::remove_var(SCAN_DIR_ENV);

        let (settings, error) = Settings::load(None);
        assert!(error.is_none());
        assert_eq!(settings.scan_dir, PathBuf::from("/from/file"));

        env::set_var(SCAN_DIR_ENV, "/from/env");
        let (settings, _) = Settings::load(None);
        assert_eq!(settings.scan_dir, PathBuf::from("/from/env"));

        let (settings, _) = Settings::load(Some(PathBuf::from("/from/arg")));
        assert_eq!(settings.scan_dir, PathBuf::from("/from/arg"));

        // 공백뿐인 환경변수는 무시
        env::set_var(SCAN_DIR_ENV, "   ");
        let (settings, _) = Settings::load(None);
        assert_eq!(settings.scan_dir, PathBuf::from("/from/file"));

        // 잘못된 파일은 기본값과 함께 오류 반환
        env::remove_var(SCAN_DIR_ENV);
        fs::write(&path, "scan_dir = [").unwrap();
        let (settings, error) = Settings::load(None);
        assert!(matches!(error, Some(GalleryError::Config(_))));
        assert_eq!(settings, Settings::default());

        env::remove_var(SETTINGS_FILE_ENV);
    }
}
