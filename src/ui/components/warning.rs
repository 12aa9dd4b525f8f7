// Warning screen component - 경고 화면 컴포넌트
//
// 터미널이 너무 작을 때 표시되는 경고 화면

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::ui::i18n::{I18n, TextKey};
use crate::ui::layout::{MIN_HEIGHT, MIN_WIDTH};
use crate::ui::Theme;

/// 경고 화면 컴포넌트
pub struct WarningScreen {
    /// 현재 터미널 크기
    current_size: (u16, u16),
    i18n: I18n,
    warning_color: Color,
    bg_color: Color,
    fg_color: Color,
    /// 현재 크기 표시 색상
    error_color: Color,
    /// 요구 크기 표시 색상
    success_color: Color,
}

impl Default for WarningScreen {
    fn default() -> Self {
        Self {
            current_size: (0, 0),
            i18n: I18n::new(Default::default()),
            warning_color: Color::Yellow,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            error_color: Color::Red,
            success_color: Color::Green,
        }
    }
}

impl WarningScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 터미널 크기 설정
    pub fn current_size(mut self, width: u16, height: u16) -> Self {
        self.current_size = (width, height);
        self
    }

    pub fn i18n(mut self, i18n: I18n) -> Self {
        self.i18n = i18n;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.warning_color = theme.warning.to_color();
        self.bg_color = theme.bg_primary.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.error_color = theme.error.to_color();
        self.success_color = theme.success.to_color();
        self
    }
}

impl Widget for WarningScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(Span::styled("⚠", bold(self.warning_color))),
            Line::from(""),
            Line::from(Span::styled(
                self.i18n.tr(TextKey::WarnTitle),
                bold(self.warning_color),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("{} ", self.i18n.tr(TextKey::WarnCurrent)),
                    Style::default().fg(self.fg_color),
                ),
                Span::styled(
                    format!("{}x{}", self.current_size.0, self.current_size.1),
                    bold(self.error_color),
                ),
            ]),
            Line::from(vec![
                Span::styled(
                    format!("{} ", self.i18n.tr(TextKey::WarnRequired)),
                    Style::default().fg(self.fg_color),
                ),
                Span::styled(
                    format!("{}x{}", MIN_WIDTH, MIN_HEIGHT),
                    bold(self.success_color),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                self.i18n.tr(TextKey::WarnHint),
                Style::default()
                    .fg(self.fg_color)
                    .add_modifier(Modifier::DIM),
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.warning_color))
            .style(Style::default().bg(self.bg_color));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::i18n::Language;

    #[test]
    fn test_warning_screen_creation() {
        let screen = WarningScreen::new().current_size(30, 10);
        assert_eq!(screen.current_size, (30, 10));
    }

    #[test]
    fn test_warning_screen_renders_localised_title() {
        let area = Rect::new(0, 0, 38, 11);
        let mut buf = Buffer::empty(area);
        WarningScreen::new()
            .current_size(38, 11)
            .i18n(I18n::new(Language::English))
            .render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Terminal Too Small"));
        assert!(text.contains("38x11"));
    }
}
