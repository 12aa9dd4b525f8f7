use crate::core::drag_drop::{ListId, RowChanges};
use std::collections::HashSet;

/// 패인(화면의 한쪽 목록) 표시 상태
///
/// 목록 내용은 컨트롤러가 소유하고, 여기서는 커서/스크롤/마킹만 관리합니다.
#[derive(Debug, Clone)]
pub struct PaneState {
    /// 표시 중인 목록
    pub list: ListId,
    /// 커서 위치
    pub selected_index: usize,
    /// 스크롤 오프셋
    pub scroll_offset: usize,
    /// 다중 선택된 항목 인덱스
    pub marked: HashSet<usize>,
}

impl PaneState {
    /// 새 패인 상태 생성
    pub fn new(list: ListId) -> Self {
        Self {
            list,
            selected_index: 0,
            scroll_offset: 0,
            marked: HashSet::new(),
        }
    }

    /// 마킹 토글
    pub fn toggle_mark(&mut self, index: usize) {
        if !self.marked.remove(&index) {
            self.marked.insert(index);
        }
    }

    pub fn clear_marks(&mut self) {
        self.marked.clear();
    }

    /// 마킹된 인덱스 (오름차순)
    pub fn marked_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.marked.iter().copied().collect();
        indices.sort_unstable();
        indices
    }

    /// 드래그 대상 인덱스: 마킹이 있으면 마킹된 항목, 없으면 커서 항목
    pub fn drag_indices(&self, len: usize) -> Vec<usize> {
        let marked: Vec<usize> = self
            .marked_indices()
            .into_iter()
            .filter(|&i| i < len)
            .collect();
        if !marked.is_empty() {
            marked
        } else if self.selected_index < len {
            vec![self.selected_index]
        } else {
            Vec::new()
        }
    }

    /// 목록 길이에 맞게 커서/마킹 보정
    pub fn clamp(&mut self, len: usize) {
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
        self.marked.retain(|&i| i < len);
        if self.scroll_offset > self.selected_index {
            self.scroll_offset = self.selected_index;
        }
    }

    /// 배치 변경 반영
    ///
    /// 마킹은 인덱스가 바뀌므로 모두 해제하고, 삽입이 있으면 첫 삽입 위치로 커서를 옮깁니다.
    pub fn apply_changes(&mut self, changes: &RowChanges, len: usize) {
        self.marked.clear();
        if let Some(&first) = changes.inserts.first() {
            self.selected_index = first;
        } else if let Some(&first) = changes.deletes.first() {
            self.selected_index = first;
        }
        self.clamp(len);
    }

    /// 커서가 보이도록 스크롤 조정
    pub fn adjust_scroll(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.selected_index + 1 - visible_rows;
        }
    }
}
