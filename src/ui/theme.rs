use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 색상 테마
///
/// 갤러리 화면 전체의 색상을 정의합니다.
/// 미리 정의된 테마 외에 `<config_dir>/scangallery/themes/*.toml`에서 추가 테마를 읽습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: ColorDef,
    pub fg_primary: ColorDef,

    // 패널
    pub panel_active_border: ColorDef,
    pub panel_inactive_border: ColorDef,
    pub panel_bg: ColorDef,

    // 이미지 셀
    pub item_normal: ColorDef,
    pub item_selected: ColorDef,
    pub item_selected_bg: ColorDef,
    pub item_marked: ColorDef,
    /// 드래그 중인 원본 셀 배경
    pub drag_origin_bg: ColorDef,
    /// Destination 셀 (무채색)
    pub destination_item: ColorDef,
    pub destination_selected_bg: ColorDef,
    /// 누락/손상 이미지 자리표시
    pub placeholder: ColorDef,
    pub item_meta: ColorDef,

    // UI 컴포넌트
    pub title_bar_bg: ColorDef,
    pub title_bar_fg: ColorDef,
    pub status_bar_bg: ColorDef,
    pub status_bar_fg: ColorDef,
    pub command_bar_bg: ColorDef,
    pub command_bar_fg: ColorDef,

    // 강조
    pub accent: ColorDef,
    pub warning: ColorDef,
    pub error: ColorDef,
    pub success: ColorDef,
}

/// 색상 정의 (TOML 직렬화/역직렬화 지원)
///
/// Hex 문자열("#1e1e1e") 또는 색상 이름("Red")을 지원합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Hex(String),
    Named(String),
}

impl ColorDef {
    /// ColorDef를 ratatui의 Color로 변환
    pub fn to_color(&self) -> Color {
        match self {
            ColorDef::Hex(hex) => parse_hex_color(hex),
            ColorDef::Named(name) => parse_named_color(name),
        }
    }
}

impl From<&str> for ColorDef {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            ColorDef::Hex(s.to_string())
        } else {
            ColorDef::Named(s.to_string())
        }
    }
}

/// Hex 색상 문자열을 Color로 파싱
fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color::Rgb(r, g, b)
    } else {
        Color::Reset
    }
}

/// 색상 이름을 Color로 파싱
fn parse_named_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

/// RGB 색상을 휘도 기준 회색으로 변환
///
/// Rgb가 아닌 색상은 그대로 반환합니다.
pub fn desaturate(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let luma = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8;
            Color::Rgb(luma, luma, luma)
        }
        other => other,
    }
}

impl Theme {
    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            bg_primary: "#1e1e1e".into(),
            fg_primary: "#d4d4d4".into(),

            panel_active_border: "#0078d4".into(),
            panel_inactive_border: "#3c3c3c".into(),
            panel_bg: "#1e1e1e".into(),

            item_normal: "#d4d4d4".into(),
            item_selected: "#ffffff".into(),
            item_selected_bg: "#0078d4".into(),
            item_marked: "#dcdcaa".into(),
            drag_origin_bg: "#4b3b1a".into(),
            destination_item: "#bdbdbd".into(),
            destination_selected_bg: "#5a5a5a".into(),
            placeholder: "#808080".into(),
            item_meta: "#9e9e9e".into(),

            title_bar_bg: "#2d2d30".into(),
            title_bar_fg: "#ffffff".into(),
            status_bar_bg: "#007acc".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#2d2d30".into(),
            command_bar_fg: "#cccccc".into(),

            accent: "#0078d4".into(),
            warning: "#ffa500".into(),
            error: "#f44747".into(),
            success: "#4ec9b0".into(),
        }
    }

    /// Light 테마
    pub fn light() -> Self {
        Theme {
            bg_primary: "#ffffff".into(),
            fg_primary: "#1e1e1e".into(),

            panel_active_border: "#0078d4".into(),
            panel_inactive_border: "#cccccc".into(),
            panel_bg: "#ffffff".into(),

            item_normal: "#1e1e1e".into(),
            item_selected: "#000000".into(),
            item_selected_bg: "#add6ff".into(),
            item_marked: "#795e26".into(),
            drag_origin_bg: "#fff2cc".into(),
            destination_item: "#3a3a3a".into(),
            destination_selected_bg: "#d0d0d0".into(),
            placeholder: "#8a8a8a".into(),
            item_meta: "#6e6e6e".into(),

            title_bar_bg: "#0078d4".into(),
            title_bar_fg: "#ffffff".into(),
            status_bar_bg: "#0078d4".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#f3f3f3".into(),
            command_bar_fg: "#1e1e1e".into(),

            accent: "#0078d4".into(),
            warning: "#ff8c00".into(),
            error: "#e51400".into(),
            success: "#107c10".into(),
        }
    }

    /// High Contrast 테마
    pub fn high_contrast() -> Self {
        Theme {
            bg_primary: "#000000".into(),
            fg_primary: "#ffffff".into(),

            panel_active_border: "#00ff00".into(),
            panel_inactive_border: "#808080".into(),
            panel_bg: "#000000".into(),

            item_normal: "#ffffff".into(),
            item_selected: "#000000".into(),
            item_selected_bg: "#00ff00".into(),
            item_marked: "#ffff00".into(),
            drag_origin_bg: "#804000".into(),
            destination_item: "#e0e0e0".into(),
            destination_selected_bg: "#ffffff".into(),
            placeholder: "#808080".into(),
            item_meta: "#c0c0c0".into(),

            title_bar_bg: "#000000".into(),
            title_bar_fg: "#00ff00".into(),
            status_bar_bg: "#000000".into(),
            status_bar_fg: "#00ff00".into(),
            command_bar_bg: "#000000".into(),
            command_bar_fg: "#ffffff".into(),

            accent: "#00ff00".into(),
            warning: "#ffff00".into(),
            error: "#ff0000".into(),
            success: "#00ff00".into(),
        }
    }

    /// TOML 파일에서 테마 로드
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let theme: Theme = toml::from_str(&content)?;
        Ok(theme)
    }
}

/// 테마 관리자
///
/// 현재 활성 테마를 관리하고 런타임에 테마를 전환합니다.
pub struct ThemeManager {
    current_index: usize,
    available_themes: Vec<(String, Theme)>,
}

impl ThemeManager {
    /// 기본 테마 관리자 생성 (Dark 테마)
    pub fn new() -> Self {
        Self {
            current_index: 0,
            available_themes: vec![
                ("dark".to_string(), Theme::dark()),
                ("light".to_string(), Theme::light()),
                ("high_contrast".to_string(), Theme::high_contrast()),
            ],
        }
    }

    /// 현재 테마 반환
    pub fn current(&self) -> &Theme {
        &self.available_themes[self.current_index].1
    }

    /// 현재 테마 이름
    pub fn current_name(&self) -> &str {
        &self.available_themes[self.current_index].0
    }

    /// 테마 전환 (이름으로)
    pub fn switch_theme(&mut self, name: &str) -> Result<(), String> {
        match self.available_themes.iter().position(|(n, _)| n == name) {
            Some(index) => {
                self.current_index = index;
                Ok(())
            }
            None => Err(format!("테마를 찾을 수 없습니다: {}", name)),
        }
    }

    /// 다음 테마로 순환
    pub fn cycle_theme(&mut self) {
        self.current_index = (self.current_index + 1) % self.available_themes.len();
    }

    /// 사용 가능한 테마 목록 반환
    pub fn available_themes(&self) -> Vec<String> {
        self.available_themes
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// 커스텀 테마 추가 (같은 이름이면 교체)
    pub fn add_theme(&mut self, name: String, theme: Theme) {
        if let Some(slot) = self.available_themes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = theme;
        } else {
            self.available_themes.push((name, theme));
        }
    }

    /// 설정 디렉토리에서 테마 파일 로드
    pub fn load_themes_from_config_dir(&mut self) -> Result<(), anyhow::Error> {
        if let Some(config_dir) = dirs::config_dir() {
            self.load_themes_from(&config_dir.join("scangallery").join("themes"))?;
        }
        Ok(())
    }

    /// 디렉토리의 *.toml 테마 로드 (파싱 실패 파일은 건너뜀)
    pub fn load_themes_from(&mut self, themes_dir: &Path) -> Result<(), anyhow::Error> {
        if !themes_dir.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(themes_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }
            match Theme::from_file(&path) {
                Ok(theme) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("custom")
                        .to_string();
                    tracing::debug!(theme = %name, "custom theme loaded");
                    self.add_theme(name, theme);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping invalid theme file");
                }
            }
        }
        Ok(())
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}
