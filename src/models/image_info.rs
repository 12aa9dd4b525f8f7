use std::time::SystemTime;

/// 이미지 메타데이터
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// 가로 픽셀
    pub width: u32,
    /// 세로 픽셀
    pub height: u32,
    /// 바이트 단위 크기
    pub size: u64,
    /// 수정 시간
    pub modified: SystemTime,
}

impl ImageInfo {
    pub fn new(width: u32, height: u32, size: u64, modified: SystemTime) -> Self {
        Self {
            width,
            height,
            size,
            modified,
        }
    }

    /// "가로x세로" 표시 문자열
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// 셀에 표시할 이미지 상태
///
/// Missing/Corrupt는 에러가 아니라 빈 셀(플레이스홀더)로 표시됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    /// 백그라운드 로딩 중
    Loading,
    /// 로드 완료
    Ready(ImageInfo),
    /// 파일 없음
    Missing,
    /// 디코딩 불가
    Corrupt,
}

impl ImageStatus {
    pub fn info(&self) -> Option<&ImageInfo> {
        match self {
            ImageStatus::Ready(info) => Some(info),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_info_dimensions() {
        let info = ImageInfo::new(1240, 1754, 2048, SystemTime::now());
        assert_eq!(info.dimensions(), "1240x1754");
    }

    #[test]
    fn test_info_only_when_ready() {
        assert!(ImageStatus::Missing.info().is_none());
        assert!(ImageStatus::Loading.info().is_none());

        let ready = ImageStatus::Ready(ImageInfo::new(1, 1, 10, SystemTime::now()));
        assert_eq!(ready.info().map(|i| i.size), Some(10));
    }
}
