// Layout system - 반응형 레이아웃 시스템
//
// 터미널 크기에 따른 레이아웃 모드:
// - 80+ cols: 듀얼 패널 모드 (Source | Destination)
// - 40-79 cols: 싱글 패널 모드 (Tab으로 전환)
// - <40 cols: 경고 메시지 표시

use crate::core::ListId;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// 최소 터미널 크기 상수
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;
pub const DUAL_PANEL_MIN_WIDTH: u16 = 80;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// 듀얼 패널 모드 (80+ cols)
    DualPanel,
    /// 싱글 패널 모드 (40-79 cols)
    SinglePanel,
    /// 경고 모드 (터미널이 너무 작음)
    TooSmall,
}

/// 활성 패널
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    Left,
    Right,
}

impl ActivePanel {
    /// 패널 전환
    pub fn toggle(&mut self) {
        *self = match self {
            ActivePanel::Left => ActivePanel::Right,
            ActivePanel::Right => ActivePanel::Left,
        };
    }

    /// 패널에 표시되는 목록 (왼쪽 Source, 오른쪽 Destination)
    pub fn list(self) -> ListId {
        match self {
            ActivePanel::Left => ListId::Source,
            ActivePanel::Right => ListId::Destination,
        }
    }

    pub fn for_list(list: ListId) -> Self {
        match list {
            ListId::Source => ActivePanel::Left,
            ListId::Destination => ActivePanel::Right,
        }
    }
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default)]
pub struct LayoutAreas {
    /// 상단 제목 표시줄
    pub title_bar: Rect,
    /// 좌측 패널 영역 (Source)
    pub left_panel: Rect,
    /// 우측 패널 영역 (Destination)
    pub right_panel: Rect,
    pub status_bar: Rect,
    pub command_bar: Rect,
}

/// 레이아웃 상태
#[derive(Debug, Clone)]
pub struct LayoutState {
    pub mode: LayoutMode,
    pub active_panel: ActivePanel,
    pub terminal_size: (u16, u16),
    pub areas: LayoutAreas,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            mode: LayoutMode::DualPanel,
            active_panel: ActivePanel::default(),
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
        }
    }
}

/// 레이아웃 매니저
#[derive(Debug, Default)]
pub struct LayoutManager {
    state: LayoutState,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 터미널 크기에 따라 레이아웃 모드 결정
    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else if width < DUAL_PANEL_MIN_WIDTH {
            LayoutMode::SinglePanel
        } else {
            LayoutMode::DualPanel
        }
    }

    /// 터미널 크기 업데이트 및 레이아웃 재계산
    pub fn update(&mut self, area: Rect) {
        self.state.terminal_size = (area.width, area.height);
        self.state.mode = Self::determine_mode(area.width, area.height);
        self.state.areas = self.calculate_areas(area);
    }

    fn calculate_areas(&self, area: Rect) -> LayoutAreas {
        if self.state.mode == LayoutMode::TooSmall {
            return LayoutAreas::default();
        }

        // 메인 수직 레이아웃: 제목 | 패널 | 상태바 | 커맨드바
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);
        let panel_area = vertical_chunks[1];

        let (left_panel, right_panel) = match self.state.mode {
            LayoutMode::DualPanel => {
                let panel_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(panel_area);
                (panel_chunks[0], panel_chunks[1])
            }
            // 싱글 패널 모드에서는 활성 패널만 전체 너비 사용
            _ => match self.state.active_panel {
                ActivePanel::Left => (panel_area, Rect::default()),
                ActivePanel::Right => (Rect::default(), panel_area),
            },
        };

        LayoutAreas {
            title_bar: vertical_chunks[0],
            left_panel,
            right_panel,
            status_bar: vertical_chunks[2],
            command_bar: vertical_chunks[3],
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.state.mode
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.state.areas
    }

    pub fn active_panel(&self) -> ActivePanel {
        self.state.active_panel
    }

    /// 패널 전환 (싱글 패널 모드에서는 영역도 다시 계산)
    pub fn toggle_panel(&mut self) {
        self.state.active_panel.toggle();
        self.recalculate();
    }

    pub fn set_active_panel(&mut self, panel: ActivePanel) {
        if self.state.active_panel != panel {
            self.state.active_panel = panel;
            self.recalculate();
        }
    }

    fn recalculate(&mut self) {
        let (width, height) = self.state.terminal_size;
        self.state.areas = self.calculate_areas(Rect::new(0, 0, width, height));
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.state.terminal_size
    }

    /// 목록이 그려지는 패널 영역 (숨겨진 패널이면 빈 영역)
    pub fn panel_area(&self, list: ListId) -> Rect {
        match ActivePanel::for_list(list) {
            ActivePanel::Left => self.state.areas.left_panel,
            ActivePanel::Right => self.state.areas.right_panel,
        }
    }

    /// 좌표 아래의 목록
    pub fn list_at(&self, column: u16, row: u16) -> Option<ListId> {
        let position = Position::new(column, row);
        [ListId::Source, ListId::Destination]
            .into_iter()
            .find(|&list| self.panel_area(list).contains(position))
    }
}
