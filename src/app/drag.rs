//! 드래그 앤 드롭 어댑터
//!
//! 키보드/마우스 입력을 컨트롤러 호출로 바꾸고, 반환된 배치 변경을
//! 패인 상태(커서, 마킹, 스크롤)에 한 번에 반영합니다.

use super::App;
use crate::core::{BatchUpdate, DragPayload, DropIntent, ListId};
use crate::ui::{GalleryPanel, MessageKey, TitleBar, TitleButton};
use crate::utils::error::Result;
use crossterm::event::{MouseButton, MouseEventKind};

impl App {
    /// 활성 패널의 마킹(없으면 커서) 항목으로 드래그 시작
    pub fn begin_drag_from_active(&mut self) {
        let list = self.active_list();
        let len = self.items(list).len();
        let indices = self.pane(list).drag_indices(len);
        if indices.is_empty() {
            let message = self.i18n().msg(MessageKey::NothingToDrag);
            self.set_toast(message);
            return;
        }
        self.start_drag(list, &indices);
    }

    fn start_drag(&mut self, list: ListId, indices: &[usize]) {
        let Some((&first, rest)) = indices.split_first() else {
            return;
        };
        if let Some(previous) = self.drag.take() {
            self.controller.cancel(previous);
        }
        match self.build_payload(list, first, rest) {
            Ok(payload) => {
                self.pane_mut(list).clear_marks();
                self.drag = Some(payload);
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to start drag");
                self.toast_drop_error(&err.to_string());
            }
        }
    }

    fn build_payload(&self, list: ListId, first: usize, rest: &[usize]) -> Result<DragPayload> {
        let mut payload = self.controller.begin_drag(list, first)?;
        for &index in rest {
            self.controller.extend_drag(&mut payload, index)?;
        }
        Ok(payload)
    }

    /// 진행 중인 드래그에 항목 추가
    pub(crate) fn extend_drag_with(&mut self, index: usize) {
        let Some(mut payload) = self.drag.take() else {
            return;
        };
        if let Err(err) = self.controller.extend_drag(&mut payload, index) {
            tracing::debug!(error = %err, "extend drag ignored");
        }
        self.drag = Some(payload);
    }

    /// 드래그 취소 (Esc, 패널 밖에서 놓기)
    pub fn cancel_drag(&mut self) {
        self.mouse_press = None;
        if let Some(payload) = self.drag.take() {
            self.controller.cancel(payload);
        }
        self.clamp_panes();
    }

    /// 활성 패널의 커서 위치에 놓기
    ///
    /// `requested`가 없으면 기본 의도를 사용합니다. 금지된 방향은 요청과 무관하게 금지입니다.
    pub fn drop_on_active(&mut self, requested: Option<DropIntent>) {
        let Some(payload) = self.drag.take() else {
            let message = self.i18n().msg(MessageKey::NothingToDrag);
            self.set_toast(message);
            return;
        };
        let target = self.active_list();
        let intent = match (self.controller.propose(payload.origin(), target), requested) {
            (DropIntent::Forbidden, _) => DropIntent::Forbidden,
            (_, Some(intent)) => intent,
            (proposed, None) => proposed,
        };
        let cursor = self.pane(target).selected_index;
        let destination = (cursor < self.items(target).len()).then_some(cursor);
        self.drop_at(payload, target, destination, intent);
    }

    /// 드롭 해결 후 화면 상태 반영
    pub fn drop_at(
        &mut self,
        payload: DragPayload,
        target: ListId,
        destination: Option<usize>,
        intent: DropIntent,
    ) -> Option<BatchUpdate> {
        let origin = payload.origin();
        let result = self
            .controller
            .resolve_drop(payload, target, destination, intent);

        let batch = match result {
            Ok(Some(batch)) => batch,
            Ok(None) => {
                if intent == DropIntent::Forbidden {
                    let reason = format!("{} → {}", origin, target);
                    self.toast_drop_error(&reason);
                }
                self.clamp_panes();
                return None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "drop failed");
                self.toast_drop_error(&err.to_string());
                self.clamp_panes();
                return None;
            }
        };

        self.apply_batch(&batch);
        self.focus_list(target);
        Some(batch)
    }

    /// 배치 변경을 패인 상태에 반영
    fn apply_batch(&mut self, batch: &BatchUpdate) {
        if batch.is_empty() {
            return;
        }
        for changes in batch.changes() {
            let len = self.items(changes.list).len();
            let visible = self.visible_rows(changes.list);
            let pane = self.pane_mut(changes.list);
            pane.apply_changes(changes, len);
            pane.adjust_scroll(visible);
        }
        self.clamp_panes();
    }

    fn toast_drop_error(&mut self, reason: &str) {
        let message = self
            .i18n()
            .fmt(MessageKey::DropRejected, &[("reason", reason.to_string())]);
        self.set_toast(&message);
    }

    // === 마우스 ===

    /// 마우스 이벤트 처리
    pub fn handle_mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => self.mouse_down(column, row),
            MouseEventKind::Drag(MouseButton::Left) => self.mouse_drag(),
            MouseEventKind::Up(MouseButton::Left) => self.mouse_up(column, row),
            MouseEventKind::ScrollDown => self.scroll_at(column, row, true),
            MouseEventKind::ScrollUp => self.scroll_at(column, row, false),
            _ => {}
        }
    }

    /// 좌표 아래의 목록과 드롭 위치 (`None`이면 목록 끝)
    fn hit_test(&self, column: u16, row: u16) -> Option<(ListId, Option<usize>)> {
        let list = self.layout.list_at(column, row)?;
        let area = self.layout.panel_area(list);
        let index = GalleryPanel::row_at(
            area,
            self.pane(list).scroll_offset,
            self.items(list).len(),
            column,
            row,
        )?;
        Some((list, index))
    }

    fn mouse_down(&mut self, column: u16, row: u16) {
        let title_area = self.layout.areas().title_bar;
        match TitleBar::button_at(title_area, self.i18n(), column, row) {
            Some(TitleButton::Cancel) => return self.cancel(),
            Some(TitleButton::Save) => return self.save(),
            None => {}
        }

        let Some((list, index)) = self.hit_test(column, row) else {
            return;
        };
        self.focus_list(list);
        if let Some(index) = index {
            self.pane_mut(list).selected_index = index;
            if self.drag.is_none() {
                self.mouse_press = Some((list, index));
            }
        }
    }

    fn mouse_drag(&mut self) {
        if self.drag.is_some() {
            return;
        }
        let Some((list, index)) = self.mouse_press.take() else {
            return;
        };
        // 마킹된 항목을 잡으면 마킹 전체, 아니면 잡은 항목만
        let pane = self.pane(list);
        let indices = if pane.marked.contains(&index) {
            pane.drag_indices(self.items(list).len())
        } else {
            vec![index]
        };
        self.start_drag(list, &indices);
    }

    fn mouse_up(&mut self, column: u16, row: u16) {
        self.mouse_press = None;
        let Some(payload) = self.drag.take() else {
            return;
        };
        match self.hit_test(column, row) {
            Some((target, destination)) => {
                let intent = self.controller.propose(payload.origin(), target);
                self.drop_at(payload, target, destination, intent);
            }
            None => {
                self.controller.cancel(payload);
                self.clamp_panes();
            }
        }
    }

    fn scroll_at(&mut self, column: u16, row: u16, down: bool) {
        let Some(list) = self.layout.list_at(column, row) else {
            return;
        };
        self.focus_list(list);
        if down {
            self.move_selection_down();
        } else {
            self.move_selection_up();
        }
    }
}
