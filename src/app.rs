use crate::core::{DragPayload, DualListDragController, ListId};
use crate::models::{ImageStatus, PaneState};
use crate::system::{FileEnumerator, ImageLoader};
use crate::ui::{ActivePanel, GalleryPanel, I18n, Language, LayoutManager, MessageKey, ThemeManager};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

mod drag;
mod navigation;
pub mod settings;

pub use settings::Settings;

/// 토스트 메시지 표시 시간 (초)
const TOAST_SECS: u64 = 3;

/// 앱 상태
///
/// 목록 내용은 `DualListDragController`가 소유하고, 여기서는 화면 상태
/// (커서, 스크롤, 드래그, 이미지 캐시)와 컨트롤러 호출을 연결합니다.
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    pub layout: LayoutManager,
    pub theme_manager: ThemeManager,
    pub settings: Settings,
    pub language: Language,
    controller: DualListDragController,
    enumerator: FileEnumerator,
    image_loader: ImageLoader,
    /// 파일명별 이미지 상태 캐시 (재스캔 시 비움)
    images: HashMap<String, ImageStatus>,
    source_pane: PaneState,
    destination_pane: PaneState,
    /// 진행 중인 드래그
    drag: Option<DragPayload>,
    /// 마우스 누름 위치 (드래그 시작 전)
    mouse_press: Option<(ListId, usize)>,
    /// 대기 중인 키 (예: 'g' for 'gg')
    pub pending_key: Option<char>,
    pub pending_key_time: Option<Instant>,
    /// 토스트 메시지 (3초 후 자동 소멸)
    pub toast_message: Option<(String, Instant)>,
}

impl App {
    /// 설정으로 앱 생성 (사용자 테마 디렉토리 포함)
    pub fn new(settings: Settings) -> Self {
        let mut theme_manager = ThemeManager::new();
        if let Err(e) = theme_manager.load_themes_from_config_dir() {
            tracing::warn!(error = %e, "failed to load custom themes");
        }
        Self::with_settings(settings, theme_manager)
    }

    /// 협력 객체를 주입해 앱 생성
    pub fn with_settings(settings: Settings, mut theme_manager: ThemeManager) -> Self {
        if let Err(e) = theme_manager.switch_theme(&settings.theme) {
            tracing::warn!(theme = %settings.theme, "{}", e);
        }

        let mut app = Self {
            should_quit: false,
            layout: LayoutManager::new(),
            theme_manager,
            language: Language::from_code(&settings.language),
            controller: DualListDragController::with_policy(settings.allow_drop_into_source),
            enumerator: FileEnumerator::new(settings.reserved_name.clone()),
            image_loader: ImageLoader::new(),
            images: HashMap::new(),
            source_pane: PaneState::new(ListId::Source),
            destination_pane: PaneState::new(ListId::Destination),
            drag: None,
            mouse_press: None,
            pending_key: None,
            pending_key_time: None,
            toast_message: None,
            settings,
        };
        tracing::info!(
            theme = app.theme_manager.current_name(),
            language = app.language.code(),
            allow_drop_into_source = app.settings.allow_drop_into_source,
            "gallery opened"
        );
        app.on_appear();
        app
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(scan_dir: &std::path::Path) -> Self {
        let settings = Settings {
            scan_dir: scan_dir.to_path_buf(),
            ..Settings::default()
        };
        Self::with_settings(settings, ThemeManager::new())
    }

    /// 화면 표시 시 Source 재스캔
    ///
    /// Source는 디렉토리 내용으로 전체 교체되고 Destination은 유지됩니다.
    pub fn on_appear(&mut self) {
        if let Some(payload) = self.drag.take() {
            self.controller.cancel(payload);
        }
        self.mouse_press = None;

        let items = self.enumerator.scan_source_items(&self.settings.scan_dir);
        self.controller.replace_source(items);
        self.images.clear();
        self.image_loader.forget_pending();

        self.source_pane.clear_marks();
        self.clamp_panes();
    }

    /// 재스캔 (r)
    pub fn refresh(&mut self) {
        self.on_appear();
        let count = self.controller.len(ListId::Source);
        let message = self
            .i18n()
            .fmt(MessageKey::Rescanned, &[("count", count.to_string())]);
        self.set_toast(&message);
    }

    pub fn i18n(&self) -> I18n {
        I18n::new(self.language)
    }

    /// 종료 상태 확인
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Cancel: 저장 없이 화면 닫기
    pub fn cancel(&mut self) {
        tracing::info!(
            destination = self.controller.len(ListId::Destination),
            "gallery closed without saving"
        );
        self.should_quit = true;
    }

    /// Save: 아직 저장 대상이 없어 로그와 토스트만 남김
    pub fn save(&mut self) {
        tracing::info!(
            items = ?self.controller.items(ListId::Destination),
            "save requested"
        );
        let message = self.i18n().msg(MessageKey::SaveNotImplemented);
        self.set_toast(message);
    }

    /// 테마 순환 (t)
    pub fn cycle_theme(&mut self) {
        self.theme_manager.cycle_theme();
        let name = self.theme_manager.current_name().to_string();
        self.settings.theme = name.clone();
        let message = self.i18n().fmt(MessageKey::ThemeChanged, &[("name", name)]);
        self.set_toast(&message);
    }

    // === 목록/패인 조회 ===

    pub fn items(&self, list: ListId) -> &[String] {
        self.controller.items(list)
    }

    pub fn pane(&self, list: ListId) -> &PaneState {
        match list {
            ListId::Source => &self.source_pane,
            ListId::Destination => &self.destination_pane,
        }
    }

    pub(crate) fn pane_mut(&mut self, list: ListId) -> &mut PaneState {
        match list {
            ListId::Source => &mut self.source_pane,
            ListId::Destination => &mut self.destination_pane,
        }
    }

    /// 활성 패널의 목록
    pub fn active_list(&self) -> ListId {
        self.layout.active_panel().list()
    }

    pub fn focus_list(&mut self, list: ListId) {
        self.layout.set_active_panel(ActivePanel::for_list(list));
    }

    pub fn images(&self) -> &HashMap<String, ImageStatus> {
        &self.images
    }

    /// 활성 패널 커서 항목의 이미지 상태
    pub fn focused_image(&self) -> Option<&ImageStatus> {
        let list = self.active_list();
        let name = self.items(list).get(self.pane(list).selected_index)?;
        self.images.get(name)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_payload(&self) -> Option<&DragPayload> {
        self.drag.as_ref()
    }

    /// 목록에서 드래그 중인 인덱스 (렌더링용)
    pub fn dragged_indices(&self, list: ListId) -> HashSet<usize> {
        match &self.drag {
            Some(payload) if payload.origin() == list => {
                payload.entries().iter().map(|e| e.index).collect()
            }
            _ => HashSet::new(),
        }
    }

    /// 목록 길이에 맞게 양쪽 패인 보정
    ///
    /// 드래그 중에는 끝에 놓기 칸(인덱스 = 길이)에 있는 커서를 유지합니다.
    pub(crate) fn clamp_panes(&mut self) {
        let dragging = self.drag.is_some();
        for list in [ListId::Source, ListId::Destination] {
            let len = self.controller.len(list);
            let visible = self.visible_rows(list);
            let pane = self.pane_mut(list);
            let on_end_slot = dragging && pane.selected_index == len;
            pane.clamp(len);
            if on_end_slot {
                pane.selected_index = len;
            }
            pane.adjust_scroll(visible);
        }
    }

    pub(crate) fn visible_rows(&self, list: ListId) -> usize {
        GalleryPanel::visible_rows(self.layout.panel_area(list))
    }

    // === 이미지 메타데이터 ===

    /// 보이는 셀 중 캐시에 없는 이미지 로드 요청
    pub fn request_visible_images(&mut self) {
        for list in [ListId::Source, ListId::Destination] {
            let rows = self.visible_rows(list);
            let start = self.pane(list).scroll_offset;
            let names: Vec<String> = self
                .controller
                .items(list)
                .iter()
                .skip(start)
                .take(rows)
                .filter(|name| !self.images.contains_key(name.as_str()))
                .cloned()
                .collect();

            for name in names {
                let path = self.settings.scan_dir.join(&name);
                if self.image_loader.request(&name, path) {
                    self.images.insert(name, ImageStatus::Loading);
                }
            }
        }
    }

    /// 완료된 로드 결과 반영. 변경이 있으면 true
    pub fn poll_image_loader(&mut self) -> bool {
        let mut changed = false;
        while let Some(result) = self.image_loader.try_recv() {
            self.images.insert(result.name, result.status);
            changed = true;
        }
        changed
    }

    pub fn is_loading_images(&self) -> bool {
        self.image_loader.is_loading()
    }

    // === 토스트 ===

    /// 토스트 메시지 설정 (3초 후 자동 소멸)
    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    /// 만료된 토스트 제거
    pub fn clear_expired_toast(&mut self) {
        if let Some((_, time)) = &self.toast_message {
            if time.elapsed().as_secs() >= TOAST_SECS {
                self.toast_message = None;
            }
        }
    }

    /// 토스트 메시지 가져오기 (만료 안 된 경우만)
    pub fn toast_display(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, time)| {
            (time.elapsed().as_secs() < TOAST_SECS).then_some(msg.as_str())
        })
    }
}

#[cfg(test)]
mod tests;
