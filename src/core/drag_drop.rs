//! 드래그 앤 드롭 상태 머신
//!
//! Source/Destination 두 개의 순서 있는 목록을 소유하고, 드롭 시점에
//! 재정렬/복사/이동 중 하나를 적용합니다. UI 이벤트 시스템과 분리되어 있으며
//! 모든 변경은 렌더링 계층이 그대로 반영할 수 있는 `BatchUpdate`로 보고됩니다.

use crate::utils::error::{GalleryError, Result};
use std::fmt;

/// 목록 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListId {
    /// 스캔 디렉토리에서 읽어온 목록
    #[default]
    Source,
    /// 드롭으로만 채워지는 목록
    Destination,
}

impl ListId {
    pub fn name(self) -> &'static str {
        match self {
            ListId::Source => "source",
            ListId::Destination => "destination",
        }
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 드래그 중인 단일 항목 (드래그 시작 시점의 인덱스와 파일명)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEntry {
    pub index: usize,
    pub item: String,
}

/// 드래그 페이로드
///
/// 드래그 시작 시 생성되고 드롭 해결 시 정확히 한 번 소비됩니다.
/// 모든 드롭 연산이 값으로 받기 때문에 두 번 적용될 수 없습니다.
#[derive(Debug, PartialEq, Eq)]
pub struct DragPayload {
    origin: ListId,
    entries: Vec<DragEntry>,
}

impl DragPayload {
    /// 출발 목록
    pub fn origin(&self) -> ListId {
        self.origin
    }

    /// 페이로드 항목 (추가된 순서)
    pub fn entries(&self) -> &[DragEntry] {
        &self.entries
    }

    /// 항목 수 (항상 1 이상)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        self.entries.iter().any(|e| e.index == index)
    }

    /// 파일명 목록
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.item.as_str())
    }
}

/// 드롭 의도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIntent {
    /// 같은 목록이면 재정렬, 다른 목록이면 이동
    Move,
    /// 다른 목록으로 복사 (출발 목록 유지)
    Copy,
    /// 드롭 불가
    Forbidden,
}

/// 한 목록에 대한 행 변경 내역
///
/// `deletes`는 배치 이전 인덱스, `inserts`는 배치 이후 인덱스입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowChanges {
    pub list: ListId,
    pub deletes: Vec<usize>,
    pub inserts: Vec<usize>,
}

/// 한 번의 드롭 해결로 발생한 전체 행 변경 (원자적으로 반영)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchUpdate {
    changes: Vec<RowChanges>,
}

impl BatchUpdate {
    fn push(&mut self, list: ListId, deletes: Vec<usize>, inserts: Vec<usize>) {
        self.changes.push(RowChanges {
            list,
            deletes,
            inserts,
        });
    }

    pub fn changes(&self) -> &[RowChanges] {
        &self.changes
    }

    /// 특정 목록의 변경 내역
    pub fn for_list(&self, list: ListId) -> Option<&RowChanges> {
        self.changes.iter().find(|c| c.list == list)
    }

    pub fn is_empty(&self) -> bool {
        self.changes
            .iter()
            .all(|c| c.deletes.is_empty() && c.inserts.is_empty())
    }
}

/// 두 목록과 드롭 연산을 관리하는 컨트롤러
#[derive(Debug, Clone, Default)]
pub struct DualListDragController {
    source: Vec<String>,
    destination: Vec<String>,
    /// Destination → Source 드롭 허용 여부
    allow_drop_into_source: bool,
}

impl DualListDragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 드롭 정책을 지정하여 생성
    pub fn with_policy(allow_drop_into_source: bool) -> Self {
        Self {
            allow_drop_into_source,
            ..Self::default()
        }
    }

    /// 목록 내용
    pub fn items(&self, list: ListId) -> &[String] {
        match list {
            ListId::Source => &self.source,
            ListId::Destination => &self.destination,
        }
    }

    /// 목록 길이
    pub fn len(&self, list: ListId) -> usize {
        self.items(list).len()
    }

    pub fn item(&self, list: ListId, index: usize) -> Option<&str> {
        self.items(list).get(index).map(String::as_str)
    }

    fn list_mut(&mut self, list: ListId) -> &mut Vec<String> {
        match list {
            ListId::Source => &mut self.source,
            ListId::Destination => &mut self.destination,
        }
    }

    /// Source 목록 전체 교체 (화면 표시 시마다 재스캔 결과로)
    pub fn replace_source(&mut self, items: Vec<String>) {
        self.source = items;
    }

    /// 드래그 시작
    ///
    /// 목록은 변경하지 않습니다. 인덱스가 범위를 벗어나면 에러입니다.
    pub fn begin_drag(&self, list: ListId, index: usize) -> Result<DragPayload> {
        let item = self.checked_item(list, index)?;
        tracing::debug!(%list, index, item, "drag started");
        Ok(DragPayload {
            origin: list,
            entries: vec![DragEntry {
                index,
                item: item.to_string(),
            }],
        })
    }

    /// 진행 중인 드래그에 같은 목록의 항목 추가 (이미 포함된 인덱스는 무시)
    pub fn extend_drag(&self, payload: &mut DragPayload, index: usize) -> Result<()> {
        let item = self.checked_item(payload.origin, index)?;
        if payload.contains_index(index) {
            return Ok(());
        }
        payload.entries.push(DragEntry {
            index,
            item: item.to_string(),
        });
        Ok(())
    }

    /// 드래그 취소 (변경 없음)
    pub fn cancel(&self, payload: DragPayload) {
        tracing::debug!(origin = %payload.origin, count = payload.len(), "drag cancelled");
    }

    fn checked_item(&self, list: ListId, index: usize) -> Result<&str> {
        self.item(list, index).ok_or(GalleryError::InvalidIndex {
            list,
            index,
            len: self.len(list),
        })
    }

    /// 포인터 드롭의 기본 의도
    pub fn propose(&self, origin: ListId, target: ListId) -> DropIntent {
        match (origin, target) {
            (o, t) if o == t => DropIntent::Move,
            (ListId::Source, ListId::Destination) => DropIntent::Copy,
            _ if self.allow_drop_into_source => DropIntent::Move,
            _ => DropIntent::Forbidden,
        }
    }

    /// 드롭 해결
    ///
    /// `destination`이 `None`이면 (마지막 행 아래에 드롭) 대상 목록의 끝으로 간주합니다.
    /// 적용되지 않은 드롭은 `Ok(None)`을 반환합니다.
    pub fn resolve_drop(
        &mut self,
        payload: DragPayload,
        target: ListId,
        destination: Option<usize>,
        intent: DropIntent,
    ) -> Result<Option<BatchUpdate>> {
        let destination_index = destination.unwrap_or_else(|| self.len(target));
        let same_list = payload.origin == target;

        match (same_list, intent) {
            (true, DropIntent::Move) => self.reorder(payload, target, destination_index),
            (false, DropIntent::Copy) => self.copy(payload, target, destination_index),
            (false, DropIntent::Move) => self.move_items(payload, target, destination_index),
            (_, DropIntent::Forbidden) | (true, DropIntent::Copy) => {
                tracing::debug!(origin = %payload.origin, %target, ?intent, "drop ignored");
                Ok(None)
            }
        }
    }

    /// 같은 목록 내 단일 항목 재정렬
    ///
    /// 여러 항목이면 아무것도 하지 않습니다.
    pub fn reorder(
        &mut self,
        payload: DragPayload,
        list: ListId,
        destination_index: usize,
    ) -> Result<Option<BatchUpdate>> {
        if payload.origin != list || payload.len() != 1 {
            tracing::debug!(count = payload.len(), %list, "reorder ignored");
            return Ok(None);
        }
        self.validate(&payload)?;

        let Some(entry) = payload.entries.into_iter().next() else {
            return Ok(None);
        };
        let items = self.list_mut(list);
        // 제거 후 끝을 넘지 않도록 count - 1 로 제한
        let clamped = destination_index.min(items.len() - 1);
        let item = items.remove(entry.index);
        items.insert(clamped, item);

        let mut batch = BatchUpdate::default();
        batch.push(list, vec![entry.index], vec![clamped]);
        tracing::debug!(%list, from = entry.index, to = clamped, "reordered");
        Ok(Some(batch))
    }

    /// 다른 목록으로 복사 (출발 목록은 유지)
    pub fn copy(
        &mut self,
        payload: DragPayload,
        list: ListId,
        destination_index: usize,
    ) -> Result<Option<BatchUpdate>> {
        if payload.origin == list {
            return Ok(None);
        }
        self.validate(&payload)?;

        let inserts = self.insert_entries(list, destination_index, payload.entries);
        tracing::debug!(%list, count = inserts.len(), "copied");

        let mut batch = BatchUpdate::default();
        batch.push(list, Vec::new(), inserts);
        Ok(Some(batch))
    }

    /// 다른 목록으로 이동 (출발 목록에서 제거 후 삽입)
    pub fn move_items(
        &mut self,
        payload: DragPayload,
        list: ListId,
        destination_index: usize,
    ) -> Result<Option<BatchUpdate>> {
        let origin = payload.origin;
        if origin == list {
            return Ok(None);
        }
        self.validate(&payload)?;

        let mut deletes: Vec<usize> = payload.entries.iter().map(|e| e.index).collect();
        deletes.sort_unstable();
        let origin_items = self.list_mut(origin);
        for &index in deletes.iter().rev() {
            origin_items.remove(index);
        }

        let inserts = self.insert_entries(list, destination_index, payload.entries);
        tracing::debug!(%origin, %list, count = inserts.len(), "moved");

        let mut batch = BatchUpdate::default();
        batch.push(origin, deletes, Vec::new());
        batch.push(list, Vec::new(), inserts);
        Ok(Some(batch))
    }

    /// `min(destination_index, len) + offset` 위치에 페이로드 순서대로 삽입
    fn insert_entries(
        &mut self,
        list: ListId,
        destination_index: usize,
        entries: Vec<DragEntry>,
    ) -> Vec<usize> {
        let items = self.list_mut(list);
        let base = destination_index.min(items.len());
        entries
            .into_iter()
            .enumerate()
            .map(|(offset, entry)| {
                let index = base + offset;
                items.insert(index, entry.item);
                index
            })
            .collect()
    }

    /// 페이로드가 여전히 현재 목록과 일치하는지 확인
    fn validate(&self, payload: &DragPayload) -> Result<()> {
        let items = self.items(payload.origin);
        for entry in &payload.entries {
            if items.get(entry.index) != Some(&entry.item) {
                return Err(GalleryError::StalePayload {
                    list: payload.origin,
                    index: entry.index,
                });
            }
        }
        Ok(())
    }
}
