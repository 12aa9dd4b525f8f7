#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Korean,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Korean => "ko",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "ko" => Language::Korean,
            _ => Language::English,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Title,
    Source,
    Destination,
    Cancel,
    Save,
    Empty,
    Loading,
    Missing,
    Corrupt,
    Dragging,
    DropHere,
    WarnTitle,
    WarnCurrent,
    WarnRequired,
    WarnHint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    ItemCount,
    MarkedCount,
    DragStatus,
    Rescanned,
    SaveNotImplemented,
    DropRejected,
    NothingToDrag,
    ThemeChanged,
}

#[derive(Debug, Clone, Copy)]
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn tr(self, key: TextKey) -> &'static str {
        match (self.language, key) {
            (Language::English, TextKey::Title) => "Scanned images",
            (Language::Korean, TextKey::Title) => "스캔한 이미지",
            (Language::English, TextKey::Source) => "Source",
            (Language::Korean, TextKey::Source) => "원본",
            (Language::English, TextKey::Destination) => "Destination",
            (Language::Korean, TextKey::Destination) => "대상",
            (Language::English, TextKey::Cancel) => "Cancel",
            (Language::Korean, TextKey::Cancel) => "취소",
            (Language::English, TextKey::Save) => "Save",
            (Language::Korean, TextKey::Save) => "저장",
            (Language::English, TextKey::Empty) => "(empty)",
            (Language::Korean, TextKey::Empty) => "(비어 있음)",
            (Language::English, TextKey::Loading) => "loading…",
            (Language::Korean, TextKey::Loading) => "읽는 중…",
            (Language::English, TextKey::Missing) => "missing",
            (Language::Korean, TextKey::Missing) => "없음",
            (Language::English, TextKey::Corrupt) => "unreadable",
            (Language::Korean, TextKey::Corrupt) => "읽을 수 없음",
            (Language::English, TextKey::Dragging) => "DRAG",
            (Language::Korean, TextKey::Dragging) => "드래그",
            (Language::English, TextKey::DropHere) => "drop at end",
            (Language::Korean, TextKey::DropHere) => "끝에 놓기",
            (Language::English, TextKey::WarnTitle) => "Terminal Too Small",
            (Language::Korean, TextKey::WarnTitle) => "터미널 크기가 너무 작습니다",
            (Language::English, TextKey::WarnCurrent) => "Current:",
            (Language::Korean, TextKey::WarnCurrent) => "현재:",
            (Language::English, TextKey::WarnRequired) => "Required:",
            (Language::Korean, TextKey::WarnRequired) => "필요:",
            (Language::English, TextKey::WarnHint) => "Please resize your terminal",
            (Language::Korean, TextKey::WarnHint) => "터미널 크기를 늘려주세요",
        }
    }

    pub fn msg(self, key: MessageKey) -> &'static str {
        match (self.language, key) {
            (Language::English, MessageKey::ItemCount) => "{name}: {count}",
            (Language::Korean, MessageKey::ItemCount) => "{name}: {count}개",
            (Language::English, MessageKey::MarkedCount) => "{count} marked",
            (Language::Korean, MessageKey::MarkedCount) => "{count}개 선택",
            (Language::English, MessageKey::DragStatus) => "Dragging {count} from {origin}",
            (Language::Korean, MessageKey::DragStatus) => "{origin}에서 {count}개 드래그 중",
            (Language::English, MessageKey::Rescanned) => "Rescanned: {count} images",
            (Language::Korean, MessageKey::Rescanned) => "다시 스캔: {count}개 이미지",
            (Language::English, MessageKey::SaveNotImplemented) => "Save is not available yet",
            (Language::Korean, MessageKey::SaveNotImplemented) => "저장은 아직 지원하지 않습니다",
            (Language::English, MessageKey::DropRejected) => "Drop rejected: {reason}",
            (Language::Korean, MessageKey::DropRejected) => "드롭 거부: {reason}",
            (Language::English, MessageKey::NothingToDrag) => "Nothing to drag",
            (Language::Korean, MessageKey::NothingToDrag) => "드래그할 항목이 없습니다",
            (Language::English, MessageKey::ThemeChanged) => "Theme: {name}",
            (Language::Korean, MessageKey::ThemeChanged) => "테마: {name}",
        }
    }

    pub fn fmt(self, key: MessageKey, args: &[(&str, String)]) -> String {
        let mut out = self.msg(key).to_string();
        for (name, value) in args {
            let needle = format!("{{{}}}", name);
            out = out.replace(&needle, value);
        }
        out
    }

    /// 커맨드바 레이블 (영어는 ACTION_DEFS의 레이블 사용)
    pub fn action_label(self, id: &str, fallback: &'static str) -> &'static str {
        match (self.language, id) {
            (Language::English, _) => fallback,
            (Language::Korean, "begin_drag") => "드래그",
            (Language::Korean, "drop") => "놓기",
            (Language::Korean, "drop_move") => "이동",
            (Language::Korean, "drop_copy") => "복사",
            (Language::Korean, "cancel_drag") => "드래그 취소",
            (Language::Korean, "toggle_mark") => "선택",
            (Language::Korean, "clear_marks") => "선택 해제",
            (Language::Korean, "toggle_panel") => "패널",
            (Language::Korean, "move_up") => "위/아래",
            (Language::Korean, "refresh") => "다시 스캔",
            (Language::Korean, "save") => "저장",
            (Language::Korean, "cycle_theme") => "테마",
            (Language::Korean, "cancel") => "취소",
            _ => fallback,
        }
    }
}
