// Gallery panel component - 이미지 목록 패널 컴포넌트
//
// 이미지 셀 표시, 커서/마킹/드래그 상태, 테두리 렌더링, 마우스 행 판별

use crate::models::ImageStatus;
use crate::ui::i18n::{I18n, TextKey};
use crate::ui::theme::desaturate;
use crate::ui::Theme;
use crate::utils::formatter::{capitalize_label, format_file_size};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use std::collections::{HashMap, HashSet};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 테두리 안쪽에서 헤더+구분선이 차지하는 줄 수
const HEADER_LINES: u16 = 2;
/// 메타 컬럼(크기, 용량) 너비
const META_WIDTH: usize = 20;
/// 메타 컬럼을 표시할 최소 패널 안쪽 너비
const META_MIN_INNER_WIDTH: usize = 40;
const ICON: &str = "▣ ";

/// 컬럼 레이아웃 정보
struct ColumnLayout {
    show_meta: bool,
    name_width: usize,
}

/// 패널 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Inactive,
    Active,
}

static EMPTY_SELECTION: std::sync::LazyLock<HashSet<usize>> =
    std::sync::LazyLock::new(HashSet::new);
static EMPTY_IMAGES: std::sync::LazyLock<HashMap<String, ImageStatus>> =
    std::sync::LazyLock::new(HashMap::new);

/// 이미지 목록 패널
pub struct GalleryPanel<'a> {
    title: &'a str,
    status: PanelStatus,
    /// 파일명 목록
    items: &'a [String],
    /// 파일명별 이미지 상태
    images: &'a HashMap<String, ImageStatus>,
    selected_index: usize,
    scroll_offset: usize,
    marked: &'a HashSet<usize>,
    /// 드래그 중인 원본 인덱스
    dragged: &'a HashSet<usize>,
    /// 무채색 표시 (Destination)
    monochrome: bool,
    /// 목록 끝 다음 칸(끝에 놓기) 표시
    drop_slot: bool,
    i18n: I18n,

    active_border_color: Color,
    inactive_border_color: Color,
    bg_color: Color,
    item_color: Color,
    selected_color: Color,
    selected_bg_color: Color,
    marked_color: Color,
    drag_bg_color: Color,
    destination_item_color: Color,
    destination_selected_bg_color: Color,
    placeholder_color: Color,
    meta_color: Color,
}

impl<'a> Default for GalleryPanel<'a> {
    fn default() -> Self {
        Self {
            title: "",
            status: PanelStatus::default(),
            items: &[],
            images: &EMPTY_IMAGES,
            selected_index: 0,
            scroll_offset: 0,
            marked: &EMPTY_SELECTION,
            dragged: &EMPTY_SELECTION,
            monochrome: false,
            drop_slot: false,
            i18n: I18n::new(Default::default()),
            active_border_color: Color::Rgb(0, 120, 212),
            inactive_border_color: Color::Rgb(60, 60, 60),
            bg_color: Color::Rgb(30, 30, 30),
            item_color: Color::Rgb(212, 212, 212),
            selected_color: Color::Rgb(255, 255, 255),
            selected_bg_color: Color::Rgb(0, 120, 212),
            marked_color: Color::Rgb(220, 220, 170),
            drag_bg_color: Color::Rgb(75, 59, 26),
            destination_item_color: Color::Rgb(189, 189, 189),
            destination_selected_bg_color: Color::Rgb(90, 90, 90),
            placeholder_color: Color::Rgb(128, 128, 128),
            meta_color: Color::Rgb(158, 158, 158),
        }
    }
}

impl<'a> GalleryPanel<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn status(mut self, status: PanelStatus) -> Self {
        self.status = status;
        self
    }

    pub fn items(mut self, items: &'a [String]) -> Self {
        self.items = items;
        self
    }

    pub fn images(mut self, images: &'a HashMap<String, ImageStatus>) -> Self {
        self.images = images;
        self
    }

    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn marked(mut self, marked: &'a HashSet<usize>) -> Self {
        self.marked = marked;
        self
    }

    pub fn dragged(mut self, dragged: &'a HashSet<usize>) -> Self {
        self.dragged = dragged;
        self
    }

    pub fn monochrome(mut self, monochrome: bool) -> Self {
        self.monochrome = monochrome;
        self
    }

    pub fn drop_slot(mut self, drop_slot: bool) -> Self {
        self.drop_slot = drop_slot;
        self
    }

    pub fn i18n(mut self, i18n: I18n) -> Self {
        self.i18n = i18n;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.active_border_color = theme.panel_active_border.to_color();
        self.inactive_border_color = theme.panel_inactive_border.to_color();
        self.bg_color = theme.panel_bg.to_color();
        self.item_color = theme.item_normal.to_color();
        self.selected_color = theme.item_selected.to_color();
        self.selected_bg_color = theme.item_selected_bg.to_color();
        self.marked_color = theme.item_marked.to_color();
        self.drag_bg_color = theme.drag_origin_bg.to_color();
        self.destination_item_color = theme.destination_item.to_color();
        self.destination_selected_bg_color = theme.destination_selected_bg.to_color();
        self.placeholder_color = theme.placeholder.to_color();
        self.meta_color = theme.item_meta.to_color();
        self
    }

    /// 패널 영역에서 항목이 그려지는 줄 수
    pub fn visible_rows(area: Rect) -> usize {
        area.height.saturating_sub(2 + HEADER_LINES) as usize
    }

    /// 마우스 좌표를 드롭 위치로 변환
    ///
    /// - 패널 밖: `None`
    /// - 항목 행: `Some(Some(index))`
    /// - 마지막 항목 아래: `Some(None)` (목록 끝)
    /// - 위쪽 테두리/헤더: 보이는 첫 항목 위치
    /// - 아래쪽 테두리: 보이는 마지막 행 위치
    pub fn row_at(
        area: Rect,
        scroll_offset: usize,
        len: usize,
        column: u16,
        row: u16,
    ) -> Option<Option<usize>> {
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let first_row = area.y + 1 + HEADER_LINES;
        if row < first_row {
            return Some((scroll_offset < len).then_some(scroll_offset));
        }
        let last_visible = scroll_offset + Self::visible_rows(area).saturating_sub(1);
        let index = (scroll_offset + (row - first_row) as usize).min(last_visible);
        Some((index < len).then_some(index))
    }

    fn tone(&self, color: Color) -> Color {
        if self.monochrome {
            desaturate(color)
        } else {
            color
        }
    }

    fn border_color(&self) -> Color {
        match self.status {
            PanelStatus::Active => self.tone(self.active_border_color),
            PanelStatus::Inactive => self.inactive_border_color,
        }
    }

    fn title_style(&self) -> Style {
        let base = Style::default().fg(self.item_color);
        match self.status {
            PanelStatus::Active => base.add_modifier(Modifier::BOLD),
            PanelStatus::Inactive => base,
        }
    }

    fn normal_color(&self) -> Color {
        if self.monochrome {
            self.destination_item_color
        } else {
            self.item_color
        }
    }

    fn cursor_bg_color(&self) -> Color {
        if self.monochrome {
            self.destination_selected_bg_color
        } else {
            self.selected_bg_color
        }
    }

    /// 메타 컬럼 텍스트와 자리표시 여부
    fn meta_text(&self, name: &str) -> (String, bool) {
        match self.images.get(name) {
            Some(ImageStatus::Ready(info)) => (
                format!("{:>10} {:>9}", info.dimensions(), format_file_size(info.size)),
                false,
            ),
            Some(ImageStatus::Missing) => (self.i18n.tr(TextKey::Missing).to_string(), true),
            Some(ImageStatus::Corrupt) => (self.i18n.tr(TextKey::Corrupt).to_string(), true),
            Some(ImageStatus::Loading) | None => {
                (self.i18n.tr(TextKey::Loading).to_string(), true)
            }
        }
    }

    fn render_header(&self, inner: Rect, buf: &mut Buffer, layout: &ColumnLayout) {
        let header_style = Style::default()
            .fg(self.tone(Color::Rgb(150, 150, 150)))
            .add_modifier(Modifier::BOLD);

        let count = format!("{}", self.items.len());
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                format!("{:<width$}", count, width = layout.name_width),
                header_style,
            ),
        ];
        if layout.show_meta {
            spans.push(Span::styled(
                format!("{:>width$}", "", width = META_WIDTH),
                header_style,
            ));
        }
        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);

        let separator = "─".repeat(inner.width as usize);
        buf.set_string(
            inner.x,
            inner.y + 1,
            separator,
            Style::default().fg(Color::Rgb(60, 60, 60)),
        );
    }

    fn render_item(
        &self,
        index: usize,
        name: &str,
        inner: Rect,
        buf: &mut Buffer,
        y: u16,
        layout: &ColumnLayout,
    ) {
        let is_cursor = index == self.selected_index && self.status == PanelStatus::Active;
        let is_marked = self.marked.contains(&index);
        let is_dragged = self.dragged.contains(&index);

        let bg = if is_dragged {
            Some(self.tone(self.drag_bg_color))
        } else if is_cursor {
            Some(self.cursor_bg_color())
        } else {
            None
        };
        let fg = match (is_cursor, is_marked) {
            (_, true) => self.tone(self.marked_color),
            (true, false) => self.tone(self.selected_color),
            (false, false) => self.normal_color(),
        };

        let with_bg = |style: Style| match bg {
            Some(color) => style.bg(color),
            None => style,
        };
        let style = with_bg(Style::default().fg(fg));

        let marker = if is_dragged {
            "»"
        } else if is_marked {
            "*"
        } else {
            " "
        };

        let label = truncate_name(
            &capitalize_label(name),
            layout.name_width.saturating_sub(ICON.width() + 1),
        );
        let used = 1 + ICON.width() + label.width();
        let mut spans = vec![
            Span::styled(marker, with_bg(Style::default().fg(self.tone(self.marked_color)))),
            Span::styled(ICON, style),
            Span::styled(label, style),
            Span::styled(" ".repeat(layout.name_width.saturating_sub(used) + 1), style),
        ];

        if layout.show_meta {
            let (meta, placeholder) = self.meta_text(name);
            let meta_color = if placeholder {
                self.placeholder_color
            } else {
                self.tone(self.meta_color)
            };
            let mut meta_style = with_bg(Style::default().fg(meta_color));
            if placeholder {
                meta_style = meta_style.add_modifier(Modifier::ITALIC);
            }
            spans.push(Span::styled(
                format!("{:>width$}", meta, width = META_WIDTH),
                meta_style,
            ));
        }

        buf.set_line(inner.x, inner.y + y, &Line::from(spans), inner.width);
    }

    /// 끝에 놓기 칸 (커서가 마지막 항목 다음에 있을 때만)
    fn render_drop_slot(&self, inner: Rect, buf: &mut Buffer, rows: usize) {
        let len = self.items.len();
        if !self.drop_slot || self.status != PanelStatus::Active || self.selected_index != len {
            return;
        }
        let Some(offset) = len.checked_sub(self.scroll_offset).filter(|&o| o < rows) else {
            return;
        };
        let style = Style::default()
            .fg(self.tone(self.selected_color))
            .bg(self.cursor_bg_color())
            .add_modifier(Modifier::ITALIC);
        let text = format!(" ↳ {}", self.i18n.tr(TextKey::DropHere));
        let y = inner.y + HEADER_LINES + offset as u16;
        buf.set_string(inner.x, y, " ".repeat(inner.width as usize), style);
        buf.set_string(inner.x, y, text, style);
    }

    fn render_scrollbar(&self, inner: Rect, buf: &mut Buffer, track_height: usize) {
        let total_items = self.items.len();
        if track_height == 0 || total_items == 0 {
            return;
        }
        let thumb_height = (track_height * track_height / total_items).max(1);
        let max_scroll = total_items.saturating_sub(track_height);
        let thumb_pos = if max_scroll == 0 {
            0
        } else {
            self.scroll_offset * track_height.saturating_sub(thumb_height) / max_scroll
        };

        let scrollbar_x = inner.x + inner.width - 1;
        let track_start_y = inner.y + HEADER_LINES;
        let track_style = Style::default().fg(Color::Rgb(60, 60, 60));
        let thumb_style = Style::default().fg(Color::Rgb(150, 150, 150));

        for i in 0..track_height {
            let (symbol, style) = if i >= thumb_pos && i < thumb_pos + thumb_height {
                ("┃", thumb_style)
            } else {
                ("│", track_style)
            };
            buf.set_string(scrollbar_x, track_start_y + i as u16, symbol, style);
        }
    }
}

impl Widget for GalleryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color()))
            .title(Span::styled(format!(" {} ", self.title), self.title_style()))
            .style(Style::default().bg(self.bg_color));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height <= HEADER_LINES {
            return;
        }

        let rows = (inner.height - HEADER_LINES) as usize;
        let has_scrollbar = self.items.len() > rows;
        let content_width = (inner.width as usize).saturating_sub(usize::from(has_scrollbar));
        let show_meta = content_width >= META_MIN_INNER_WIDTH;
        let layout = ColumnLayout {
            show_meta,
            name_width: if show_meta {
                content_width.saturating_sub(META_WIDTH + 1)
            } else {
                content_width.saturating_sub(1)
            },
        };

        self.render_header(inner, buf, &layout);

        if self.items.is_empty() {
            let empty = Line::from(Span::styled(
                format!(" {}", self.i18n.tr(TextKey::Empty)),
                Style::default().fg(self.placeholder_color),
            ));
            buf.set_line(inner.x, inner.y + HEADER_LINES, &empty, inner.width);
            self.render_drop_slot(inner, buf, rows);
            return;
        }

        let start = self.scroll_offset.min(self.items.len());
        let end = (start + rows).min(self.items.len());
        for (offset, name) in self.items[start..end].iter().enumerate() {
            let y = HEADER_LINES + offset as u16;
            self.render_item(start + offset, name, inner, buf, y, &layout);
        }
        self.render_drop_slot(inner, buf, rows);

        if has_scrollbar {
            self.render_scrollbar(inner, buf, rows);
        }
    }
}

/// 파일명을 최대 너비로 잘라냄 (확장자 보존)
///
/// 중간 생략 방식: "Very_long_fi...Jpg" (확장자 유지)
fn truncate_name(name: &str, max_width: usize) -> String {
    if name.width() <= max_width {
        return name.to_string();
    }

    let ellipsis = "...";
    let ellipsis_width = 3;

    let (stem, ext) = match name.rfind('.') {
        Some(dot_pos) if dot_pos > 0 => (&name[..dot_pos], &name[dot_pos..]),
        _ => (name, ""),
    };
    let ext_width = ext.width();

    // 확장자 + "..." 만으로 넘치면 끝에서 자르기
    if ellipsis_width + ext_width >= max_width || ext.is_empty() {
        let mut truncated = String::new();
        let mut current_width = 0;
        for ch in name.chars() {
            let ch_width = ch.width().unwrap_or(1);
            if current_width + ch_width + ellipsis_width > max_width {
                truncated.push_str(ellipsis);
                break;
            }
            truncated.push(ch);
            current_width += ch_width;
        }
        return truncated;
    }

    let available_stem_width = max_width - ellipsis_width - ext_width;
    let mut truncated = String::new();
    let mut current_width = 0;
    for ch in stem.chars() {
        let ch_width = ch.width().unwrap_or(1);
        if current_width + ch_width > available_stem_width {
            break;
        }
        truncated.push(ch);
        current_width += ch_width;
    }
    truncated.push_str(ellipsis);
    truncated.push_str(ext);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageInfo;
    use std::time::SystemTime;

    fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_row_at_maps_rows_to_indices() {
        let area = Rect::new(10, 5, 40, 10);
        // 테두리 1줄 + 헤더 2줄 이후 첫 항목
        assert_eq!(GalleryPanel::row_at(area, 0, 3, 12, 8), Some(Some(0)));
        assert_eq!(GalleryPanel::row_at(area, 0, 3, 12, 10), Some(Some(2)));
        assert_eq!(GalleryPanel::row_at(area, 4, 10, 12, 9), Some(Some(5)));
    }

    #[test]
    fn test_row_at_below_last_row_is_end() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(GalleryPanel::row_at(area, 0, 2, 5, 6), Some(None));
        assert_eq!(GalleryPanel::row_at(area, 0, 0, 5, 3), Some(None));
    }

    #[test]
    fn test_row_at_bottom_border_targets_last_visible() {
        // 6줄이 보이고 아래쪽 테두리는 9번째 줄
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(GalleryPanel::row_at(area, 1, 60, 5, 9), Some(Some(6)));
        assert_eq!(GalleryPanel::row_at(area, 0, 60, 5, 9), Some(Some(5)));
        // 보이는 행이 목록보다 많으면 여전히 목록 끝
        assert_eq!(GalleryPanel::row_at(area, 0, 2, 5, 9), Some(None));
    }

    #[test]
    fn test_row_at_header_targets_first_visible() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(GalleryPanel::row_at(area, 2, 5, 5, 1), Some(Some(2)));
        assert_eq!(GalleryPanel::row_at(area, 0, 0, 5, 0), Some(None));
    }

    #[test]
    fn test_row_at_outside_panel() {
        let area = Rect::new(10, 5, 40, 10);
        assert_eq!(GalleryPanel::row_at(area, 0, 3, 9, 8), None);
        assert_eq!(GalleryPanel::row_at(area, 0, 3, 12, 15), None);
    }

    #[test]
    fn test_visible_rows() {
        assert_eq!(GalleryPanel::visible_rows(Rect::new(0, 0, 40, 10)), 6);
        assert_eq!(GalleryPanel::visible_rows(Rect::new(0, 0, 40, 2)), 0);
    }

    #[test]
    fn test_render_capitalised_labels_and_meta() {
        let items = vec!["receipt.jpg".to_string(), "gone.png".to_string()];
        let mut images = HashMap::new();
        images.insert(
            "receipt.jpg".to_string(),
            ImageStatus::Ready(ImageInfo::new(1200, 800, 2048, SystemTime::now())),
        );
        images.insert("gone.png".to_string(), ImageStatus::Missing);

        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        GalleryPanel::new()
            .title("Source")
            .items(&items)
            .images(&images)
            .render(area, &mut buf);

        let first = row_text(&buf, 3);
        assert!(first.contains("Receipt.Jpg"));
        assert!(first.contains("1200x800"));
        assert!(first.contains("2.0 KB"));
        let second = row_text(&buf, 4);
        assert!(second.contains("Gone.Png"));
        assert!(second.contains("missing"));
    }

    #[test]
    fn test_render_empty_list() {
        let items: Vec<String> = Vec::new();
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        GalleryPanel::new()
            .title("Destination")
            .items(&items)
            .render(area, &mut buf);

        assert!(row_text(&buf, 3).contains("(empty)"));
        assert!(row_text(&buf, 0).contains("Destination"));
    }

    #[test]
    fn test_monochrome_cursor_is_gray() {
        let items = vec!["a.jpg".to_string()];
        let area = Rect::new(0, 0, 50, 6);
        let mut buf = Buffer::empty(area);
        GalleryPanel::new()
            .items(&items)
            .status(PanelStatus::Active)
            .monochrome(true)
            .theme(&Theme::dark())
            .render(area, &mut buf);

        let bg = buf[(3, 3)].bg;
        assert_eq!(desaturate(bg), bg);
    }

    #[test]
    fn test_dragged_rows_get_marker() {
        let items = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        let dragged: HashSet<usize> = [1].into_iter().collect();
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        GalleryPanel::new()
            .items(&items)
            .dragged(&dragged)
            .render(area, &mut buf);

        assert_eq!(buf[(1, 4)].symbol(), "»");
        assert_eq!(buf[(1, 3)].symbol(), " ");
    }

    #[test]
    fn test_drop_slot_after_last_item() {
        let items = vec!["a.jpg".to_string()];
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        GalleryPanel::new()
            .items(&items)
            .status(PanelStatus::Active)
            .selected_index(1)
            .drop_slot(true)
            .render(area, &mut buf);

        assert!(row_text(&buf, 4).contains("drop at end"));
    }

    #[test]
    fn test_drop_slot_hidden_when_not_dragging() {
        let items = vec!["a.jpg".to_string()];
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        GalleryPanel::new()
            .items(&items)
            .status(PanelStatus::Active)
            .selected_index(1)
            .render(area, &mut buf);

        assert!(!row_text(&buf, 4).contains("drop at end"));
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Test.Jpg", 20), "Test.Jpg");

        let truncated = truncate_name("Very_long_filename_that_should_be_truncated.Jpg", 20);
        assert!(truncated.contains("..."));
        assert!(truncated.ends_with(".Jpg"));
        assert!(truncated.width() <= 20);

        let truncated = truncate_name("Very_long_filename_without_extension", 15);
        assert!(truncated.ends_with("..."));
    }
}
