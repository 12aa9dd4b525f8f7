// Status bar component - 상태바 컴포넌트
//
// 목록별 항목 수, 선택/드래그 상태, 토스트 메시지 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    /// 왼쪽 정보 (목록별 개수)
    counts: &'a str,
    /// 선택 정보
    marked: Option<&'a str>,
    /// 드래그 상태
    drag: Option<&'a str>,
    /// 토스트 메시지 (있으면 선택 정보 대신 표시)
    toast: Option<&'a str>,
    /// 오른쪽 표시 (테마 이름)
    right: &'a str,
    bg_color: Color,
    fg_color: Color,
    highlight_color: Color,
    dim_color: Color,
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        Self {
            counts: "",
            marked: None,
            drag: None,
            toast: None,
            right: "",
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            highlight_color: Color::Yellow,
            dim_color: Color::Rgb(100, 100, 100),
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(mut self, counts: &'a str) -> Self {
        self.counts = counts;
        self
    }

    pub fn marked(mut self, marked: Option<&'a str>) -> Self {
        self.marked = marked;
        self
    }

    pub fn drag(mut self, drag: Option<&'a str>) -> Self {
        self.drag = drag;
        self
    }

    pub fn toast(mut self, toast: Option<&'a str>) -> Self {
        self.toast = toast;
        self
    }

    pub fn right(mut self, right: &'a str) -> Self {
        self.right = right;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.highlight_color = theme.warning.to_color();
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let left_info = format!(" {}", self.counts);
        let middle = match (self.drag, self.toast, self.marked) {
            (Some(drag), _, _) => format!(" | {}", drag),
            (None, Some(toast), _) => format!(" | {}", toast),
            (None, None, Some(marked)) => format!(" | {}", marked),
            (None, None, None) => String::new(),
        };
        let right_info = format!("[{}] ", self.right);

        let used = left_info.width() + middle.width() + right_info.width();
        let padding = " ".repeat((area.width as usize).saturating_sub(used));

        let middle_style = if self.drag.is_some() {
            Style::default()
                .fg(self.highlight_color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.highlight_color)
        };

        let spans = vec![
            Span::styled(left_info, Style::default().fg(self.fg_color)),
            Span::styled(middle, middle_style),
            Span::raw(padding),
            Span::styled(right_info, Style::default().fg(self.dim_color)),
        ];

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
