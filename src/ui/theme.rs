use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 색상 테마
///
/// 미리 정의된 테마(dark/light/high_contrast)를 쓰거나
/// `<config dir>/excel-loader/themes/*.toml`에서 추가 테마를 읽는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: ColorDef,
    pub fg_primary: ColorDef,

    // 패널
    pub panel_active_border: ColorDef,
    pub panel_inactive_border: ColorDef,
    pub panel_bg: ColorDef,

    // 데이터 테이블
    pub table_header: ColorDef,
    pub row_number: ColorDef,
    pub cell_normal: ColorDef,
    pub cell_empty: ColorDef,
    pub cursor_fg: ColorDef,
    pub cursor_bg: ColorDef,
    pub row_highlight_bg: ColorDef,

    // 시트 탭
    pub tab_active_fg: ColorDef,
    pub tab_active_bg: ColorDef,
    pub tab_inactive: ColorDef,

    // 차트
    pub chart_bar: ColorDef,

    // UI 컴포넌트
    pub header_bg: ColorDef,
    pub header_fg: ColorDef,
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
            ColorDef::Hex(value) | ColorDef::Named(value) if value.starts_with('#') => {
                parse_hex_color(value)
            }
            ColorDef::Hex(value) | ColorDef::Named(value) => parse_named_color(value),
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

    if hex.len() == 6 && hex.is_ascii() {
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
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

impl Theme {
    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            bg_primary: "#1e1e1e".into(),
            fg_primary: "#d4d4d4".into(),

            panel_active_border: "#217346".into(),
            panel_inactive_border: "#3c3c3c".into(),
            panel_bg: "#1e1e1e".into(),

            table_header: "#9cdcfe".into(),
            row_number: "#6a6a6a".into(),
            cell_normal: "#d4d4d4".into(),
            cell_empty: "#5a5a5a".into(),
            cursor_fg: "#ffffff".into(),
            cursor_bg: "#217346".into(),
            row_highlight_bg: "#2a2d2e".into(),

            tab_active_fg: "#ffffff".into(),
            tab_active_bg: "#217346".into(),
            tab_inactive: "#9d9d9d".into(),

            chart_bar: "#33a06f".into(),

            header_bg: "#2d2d30".into(),
            header_fg: "#ffffff".into(),
            status_bar_bg: "#217346".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#2d2d30".into(),
            command_bar_fg: "#cccccc".into(),

            accent: "#33a06f".into(),
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

            panel_active_border: "#217346".into(),
            panel_inactive_border: "#cccccc".into(),
            panel_bg: "#ffffff".into(),

            table_header: "#0b5394".into(),
            row_number: "#8a8a8a".into(),
            cell_normal: "#1e1e1e".into(),
            cell_empty: "#b0b0b0".into(),
            cursor_fg: "#000000".into(),
            cursor_bg: "#c6efce".into(),
            row_highlight_bg: "#f2f2f2".into(),

            tab_active_fg: "#ffffff".into(),
            tab_active_bg: "#217346".into(),
            tab_inactive: "#5a5a5a".into(),

            chart_bar: "#217346".into(),

            header_bg: "#217346".into(),
            header_fg: "#ffffff".into(),
            status_bar_bg: "#217346".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#f3f3f3".into(),
            command_bar_fg: "#1e1e1e".into(),

            accent: "#217346".into(),
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

            table_header: "#ffff00".into(),
            row_number: "#c0c0c0".into(),
            cell_normal: "#ffffff".into(),
            cell_empty: "#808080".into(),
            cursor_fg: "#000000".into(),
            cursor_bg: "#00ff00".into(),
            row_highlight_bg: "#1a1a1a".into(),

            tab_active_fg: "#000000".into(),
            tab_active_bg: "#00ffff".into(),
            tab_inactive: "#ffffff".into(),

            chart_bar: "#00ffff".into(),

            header_bg: "#000000".into(),
            header_fg: "#00ff00".into(),
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
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let theme: Theme = toml::from_str(&content)?;
        Ok(theme)
    }
}

/// 테마 관리자
///
/// 현재 활성 테마를 이름으로 추적하고 런타임 전환을 담당한다.
pub struct ThemeManager {
    current_name: String,
    current_theme: Theme,
    available_themes: Vec<(String, Theme)>,
}

impl ThemeManager {
    /// 기본 테마 관리자 생성 (Dark 테마)
    pub fn new() -> Self {
        Self {
            current_name: "dark".to_string(),
            current_theme: Theme::dark(),
            available_themes: vec![
                ("dark".to_string(), Theme::dark()),
                ("light".to_string(), Theme::light()),
                ("high_contrast".to_string(), Theme::high_contrast()),
            ],
        }
    }

    /// 현재 테마 반환
    pub fn current(&self) -> &Theme {
        &self.current_theme
    }

    /// 현재 테마 이름
    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    /// 테마 전환 (이름으로)
    pub fn switch_theme(&mut self, name: &str) -> Result<(), String> {
        if let Some((found, theme)) = self.available_themes.iter().find(|(n, _)| n == name) {
            self.current_name = found.clone();
            self.current_theme = theme.clone();
            Ok(())
        } else {
            Err(format!("Theme not found: {}", name))
        }
    }

    /// 다음 테마로 순환
    pub fn cycle_theme(&mut self) {
        let current_index = self
            .available_themes
            .iter()
            .position(|(name, _)| *name == self.current_name)
            .unwrap_or(0);

        let next_index = (current_index + 1) % self.available_themes.len();
        let (name, theme) = &self.available_themes[next_index];
        self.current_name = name.clone();
        self.current_theme = theme.clone();
    }

    /// 사용 가능한 테마 목록 반환
    pub fn available_themes(&self) -> Vec<String> {
        self.available_themes
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// 커스텀 테마 추가 (같은 이름은 교체)
    pub fn add_theme(&mut self, name: String, theme: Theme) {
        if let Some(slot) = self.available_themes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = theme;
        } else {
            self.available_themes.push((name, theme));
        }
    }

    /// 디렉토리의 `*.toml` 테마 파일 로드
    ///
    /// 읽지 못한 파일은 건너뛰고, 추가된 테마 개수를 반환한다.
    pub fn load_themes_from_dir(&mut self, themes_dir: &Path) -> anyhow::Result<usize> {
        if !themes_dir.is_dir() {
            return Ok(0);
        }

        let mut loaded = 0;
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
                    self.add_theme(name, theme);
                    loaded += 1;
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping theme file");
                }
            }
        }

        Ok(loaded)
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let theme = Theme::dark();
        assert_eq!(theme.bg_primary.to_color(), Color::Rgb(30, 30, 30));
    }

    #[test]
    fn test_high_contrast_theme_creation() {
        let theme = Theme::high_contrast();
        assert_eq!(theme.bg_primary.to_color(), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(parse_hex_color("#217346"), Color::Rgb(33, 115, 70));
        assert_eq!(parse_hex_color("#12"), Color::Reset);
        assert_eq!(parse_named_color("Red"), Color::Red);
        assert_eq!(ColorDef::from("#ffffff").to_color(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_theme_switching_tracks_name() {
        let mut manager = ThemeManager::new();
        assert_eq!(manager.current_name(), "dark");
        assert!(manager.switch_theme("light").is_ok());
        assert_eq!(manager.current_name(), "light");
        assert_eq!(
            manager.current().bg_primary.to_color(),
            Color::Rgb(255, 255, 255)
        );
        assert!(manager.switch_theme("neon").is_err());
        assert_eq!(manager.current_name(), "light");
    }

    #[test]
    fn test_theme_cycling_wraps() {
        let mut manager = ThemeManager::new();
        manager.cycle_theme();
        assert_eq!(manager.current_name(), "light");
        manager.cycle_theme();
        assert_eq!(manager.current_name(), "high_contrast");
        manager.cycle_theme();
        assert_eq!(manager.current_name(), "dark");
    }

    #[test]
    fn test_load_themes_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let custom = toml::to_string_pretty(&Theme::light()).unwrap();
        fs::write(dir.path().join("office.toml"), custom).unwrap();
        fs::write(dir.path().join("broken.toml"), "not = = toml").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let mut manager = ThemeManager::new();
        assert_eq!(manager.load_themes_from_dir(dir.path()).unwrap(), 1);
        assert!(manager.switch_theme("office").is_ok());
        assert_eq!(manager.available_themes().len(), 4);
    }
}
