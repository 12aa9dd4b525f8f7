use super::App;
use crate::core::actions::Action;
use crate::core::{DropIntent, ListId};
use std::time::Instant;

impl App {
    /// 액션 실행 (단일 진실 원천)
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.move_selection_up(),
            Action::MoveDown => self.move_selection_down(),
            Action::GoToTop => self.go_to_top(),
            Action::GoToBottom => self.go_to_bottom(),
            Action::PageUp => self.move_selection_page_up(),
            Action::PageDown => self.move_selection_page_down(),
            Action::TogglePanel => self.toggle_panel(),
            Action::ToggleMark => self.toggle_mark(),
            Action::ClearMarks => {
                let list = self.active_list();
                self.pane_mut(list).clear_marks();
            }
            Action::BeginDrag => self.begin_drag_from_active(),
            Action::Drop => self.drop_on_active(None),
            Action::DropMove => self.drop_on_active(Some(DropIntent::Move)),
            Action::DropCopy => self.drop_on_active(Some(DropIntent::Copy)),
            Action::CancelDrag => self.cancel_drag(),
            Action::Refresh => self.refresh(),
            Action::Save => self.save(),
            Action::CycleTheme => self.cycle_theme(),
            Action::Cancel => self.cancel(),
        }
    }

    /// 패널 전환 (Tab)
    pub fn toggle_panel(&mut self) {
        self.layout.toggle_panel();
        self.clamp_panes();
    }

    /// 커서 최대 위치
    ///
    /// 드래그 중에는 목록 끝 다음 칸(끝에 놓기)까지 갈 수 있습니다.
    pub(crate) fn max_cursor(&self, list: ListId) -> usize {
        let len = self.items(list).len();
        if self.is_dragging() {
            len
        } else {
            len.saturating_sub(1)
        }
    }

    fn set_cursor(&mut self, index: usize) {
        let list = self.active_list();
        let index = index.min(self.max_cursor(list));
        let visible = self.visible_rows(list);
        let pane = self.pane_mut(list);
        pane.selected_index = index;
        pane.adjust_scroll(visible);
    }

    fn cursor(&self) -> usize {
        self.pane(self.active_list()).selected_index
    }

    fn page_size(&self) -> usize {
        self.visible_rows(self.active_list()).max(1)
    }

    /// 선택을 위로 이동
    pub fn move_selection_up(&mut self) {
        self.set_cursor(self.cursor().saturating_sub(1));
    }

    /// 선택을 아래로 이동
    pub fn move_selection_down(&mut self) {
        self.set_cursor(self.cursor() + 1);
    }

    /// 페이지 위로 이동
    pub fn move_selection_page_up(&mut self) {
        self.set_cursor(self.cursor().saturating_sub(self.page_size()));
    }

    /// 페이지 아래로 이동
    pub fn move_selection_page_down(&mut self) {
        self.set_cursor(self.cursor() + self.page_size());
    }

    /// 맨 위로 이동 (Home / gg)
    pub fn go_to_top(&mut self) {
        self.set_cursor(0);
    }

    /// 맨 아래로 이동 (End / G)
    pub fn go_to_bottom(&mut self) {
        self.set_cursor(usize::MAX);
    }

    /// 마킹 토글 후 아래로 이동
    ///
    /// 같은 목록에서 드래그 중이면 커서 항목을 드래그에 추가합니다.
    pub fn toggle_mark(&mut self) {
        let list = self.active_list();
        let index = self.cursor();
        if index >= self.items(list).len() {
            return;
        }
        if self.drag_payload().is_some_and(|p| p.origin() == list) {
            self.extend_drag_with(index);
        } else {
            self.pane_mut(list).toggle_mark(index);
        }
        self.move_selection_down();
    }

    // === pending_key 시스템 ===

    /// 대기 키 설정
    pub fn set_pending_key(&mut self, key: char) {
        self.pending_key = Some(key);
        self.pending_key_time = Some(Instant::now());
    }

    /// 대기 키 초기화
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
        self.pending_key_time = None;
    }

    /// 대기 키 만료 여부 (800ms)
    pub fn is_pending_key_expired(&self) -> bool {
        self.pending_key_time
            .is_some_and(|t| t.elapsed().as_millis() > 800)
    }
}
