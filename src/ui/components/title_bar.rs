// Title bar component - 상단 제목 표시줄 컴포넌트
//
// 왼쪽 Cancel 버튼, 가운데 제목, 오른쪽 Save 버튼

use crate::ui::i18n::{I18n, TextKey};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// 제목 표시줄 버튼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleButton {
    Cancel,
    Save,
}

/// 제목 표시줄
pub struct TitleBar {
    i18n: I18n,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
}

impl Default for TitleBar {
    fn default() -> Self {
        Self {
            i18n: I18n::new(Default::default()),
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::White,
            accent_color: Color::Rgb(0, 120, 212),
        }
    }
}

impl TitleBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn i18n(mut self, i18n: I18n) -> Self {
        self.i18n = i18n;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.title_bar_bg.to_color();
        self.fg_color = theme.title_bar_fg.to_color();
        self.accent_color = theme.accent.to_color();
        self
    }

    fn button_label(i18n: I18n, button: TitleButton) -> String {
        let key = match button {
            TitleButton::Cancel => TextKey::Cancel,
            TitleButton::Save => TextKey::Save,
        };
        format!(" {} ", i18n.tr(key))
    }

    /// 버튼의 x 범위 [start, end)
    fn button_span(area: Rect, i18n: I18n, button: TitleButton) -> (u16, u16) {
        let width = (Self::button_label(i18n, button).width() as u16).min(area.width);
        match button {
            TitleButton::Cancel => (area.x, area.x + width),
            TitleButton::Save => (area.x + area.width - width, area.x + area.width),
        }
    }

    /// 클릭 위치의 버튼
    pub fn button_at(area: Rect, i18n: I18n, column: u16, row: u16) -> Option<TitleButton> {
        if row != area.y || area.width == 0 {
            return None;
        }
        [TitleButton::Cancel, TitleButton::Save]
            .into_iter()
            .find(|&button| {
                let (start, end) = Self::button_span(area, i18n, button);
                column >= start && column < end
            })
    }
}

impl Widget for TitleBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(self.bg_color));

        let title = self.i18n.tr(TextKey::Title);
        let title_x = area.x + area.width.saturating_sub(title.width() as u16) / 2;
        buf.set_string(
            title_x,
            area.y,
            title,
            Style::default()
                .fg(self.fg_color)
                .add_modifier(Modifier::BOLD),
        );

        let button_style = Style::default()
            .fg(self.accent_color)
            .add_modifier(Modifier::BOLD);
        for button in [TitleButton::Cancel, TitleButton::Save] {
            let (start, end) = Self::button_span(area, self.i18n, button);
            buf.set_stringn(
                start,
                area.y,
                Self::button_label(self.i18n, button),
                (end - start) as usize,
                button_style,
            );
        }
    }
}
