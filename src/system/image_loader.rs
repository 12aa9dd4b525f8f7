//! 백그라운드 이미지 메타데이터 로더
//!
//! 셀 렌더링 중 파일 I/O가 UI 스레드를 막지 않도록 워커 스레드에서
//! 이미지 크기를 읽고 mpsc 채널로 결과를 돌려줍니다.

use crate::models::{ImageInfo, ImageStatus};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

/// 로드 결과
#[derive(Debug)]
pub struct ImageLoadResult {
    /// 요청한 파일명
    pub name: String,
    pub status: ImageStatus,
}

struct ImageLoadRequest {
    name: String,
    path: PathBuf,
}

/// 이미지 메타데이터 로더
pub struct ImageLoader {
    request_tx: Sender<ImageLoadRequest>,
    result_rx: Receiver<ImageLoadResult>,
    _worker: JoinHandle<()>,
    /// 로딩 중인 파일명 (중복 요청 방지)
    pending: HashSet<String>,
}

impl ImageLoader {
    /// 워커 스레드와 함께 로더 생성
    pub fn new() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<ImageLoadRequest>();
        let (result_tx, result_rx) = mpsc::channel::<ImageLoadResult>();

        let worker = thread::spawn(move || Self::worker_loop(request_rx, result_tx));

        Self {
            request_tx,
            result_rx,
            _worker: worker,
            pending: HashSet::new(),
        }
    }

    fn worker_loop(request_rx: Receiver<ImageLoadRequest>, result_tx: Sender<ImageLoadResult>) {
        while let Ok(request) = request_rx.recv() {
            let status = probe_image(&request.path);
            let result = ImageLoadResult {
                name: request.name,
                status,
            };
            // 메인 스레드가 종료되면 워커도 종료
            if result_tx.send(result).is_err() {
                break;
            }
        }
    }

    /// 로드 요청
    ///
    /// 이미 로딩 중인 파일명이면 무시하고 false를 반환합니다.
    pub fn request(&mut self, name: &str, path: PathBuf) -> bool {
        if self.pending.contains(name) {
            return false;
        }
        self.pending.insert(name.to_string());
        if self
            .request_tx
            .send(ImageLoadRequest {
                name: name.to_string(),
                path,
            })
            .is_err()
        {
            tracing::warn!(name, "image loader worker is gone");
            self.pending.remove(name);
            return false;
        }
        true
    }

    /// 완료된 결과 하나 수신 (없으면 None)
    pub fn try_recv(&mut self) -> Option<ImageLoadResult> {
        match self.result_rx.try_recv() {
            Ok(result) => {
                self.pending.remove(&result.name);
                Some(result)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// 대기 목록 초기화 (재스캔 시 이전 요청 결과는 새 캐시에 다시 채워짐)
    pub fn forget_pending(&mut self) {
        self.pending.clear();
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// 파일 하나의 이미지 상태 판별
pub fn probe_image(path: &Path) -> ImageStatus {
    let metadata = match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return ImageStatus::Corrupt,
        Err(e) if e.kind() == ErrorKind::NotFound => return ImageStatus::Missing,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "image metadata unavailable");
            return ImageStatus::Missing;
        }
    };

    match image::image_dimensions(path) {
        Ok((width, height)) => {
            let modified = metadata
                .modified()
                .unwrap_or_else(|_| std::time::SystemTime::now());
            ImageStatus::Ready(ImageInfo::new(width, height, metadata.len(), modified))
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "image decode failed");
            ImageStatus::Corrupt
        }
    }
}
