//! 로깅 초기화
//!
//! TUI가 터미널을 점유하므로 로그는 실행마다 새로 만드는 파일에만 기록합니다.
//! 오래된 로그 파일은 최대 개수만 남기고 정리합니다.

use crate::utils::error::{GalleryError, Result};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// 보관할 최대 로그 파일 수
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "scangallery";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// 파일 로깅 초기화 (두 번째 호출부터는 아무것도 하지 않음)
///
/// 로그 파일 경로를 반환합니다.
pub fn init(default_level: &str) -> Result<Option<PathBuf>> {
    if LOG_GUARD.get().is_some() {
        return Ok(None);
    }

    let log_dir = log_directory()?;
    fs::create_dir_all(&log_dir)?;
    let file_name = format_log_file_name(Local::now());
    let log_path = log_dir.join(&file_name);
    OpenOptions::new().create(true).append(true).open(&log_path)?;
    prune_old_logs(&log_dir, MAX_LOG_FILES)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

    let subscriber = Registry::default().with(env_filter).with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GalleryError::Logging(e.to_string()))?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("logging initialized at {}", log_path.display());
    Ok(Some(log_path))
}

/// 로그 디렉토리: <data_dir>/scangallery/logs
fn log_directory() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("scangallery").join("logs"))
        .ok_or_else(|| GalleryError::Logging("no data directory available".to_string()))
}

fn format_log_file_name(now: DateTime<Local>) -> String {
    format!("{}-{}.log", LOG_FILE_PREFIX, now.format("%Y%m%d-%H%M%S"))
}

/// 수정 시간이 오래된 .log 파일부터 삭제
fn prune_old_logs(dir: &Path, max_files: usize) -> Result<()> {
    let mut entries: Vec<(SystemTime, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("log"))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect();

    entries.sort_by_key(|(modified, _)| *modified);
    let excess = entries.len().saturating_sub(max_files);
    for (_, path) in entries.into_iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_name_has_prefix_and_timestamp() {
        let fixed = Local.with_ymd_and_hms(2026, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(
            format_log_file_name(fixed),
            "scangallery-20260301-090507.log"
        );
    }

    #[test]
    fn test_prune_removes_oldest_files() {
        let temp = TempDir::new().unwrap();
        for idx in 0..12 {
            fs::write(temp.path().join(format!("scangallery-{idx}.log")), b"").unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        fs::write(temp.path().join("notes.txt"), b"").unwrap();

        prune_old_logs(temp.path(), 10).unwrap();

        let logs = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("log"))
            .count();
        assert_eq!(logs, 10);
        assert!(!temp.path().join("scangallery-0.log").exists());
        assert!(temp.path().join("notes.txt").exists());
    }
}
