// Header bar component - 상단 앱 이름 / 선택 파일 / 서버 주소

use crate::ui::{I18n, Language, TextKey, Theme};
use crate::utils::formatter::truncate_to_width;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub struct HeaderBar<'a> {
    file_name: Option<&'a str>,
    /// 파일 크기 (포맷된 문자열)
    file_size: Option<&'a str>,
    server_url: &'a str,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
    dim_color: Color,
    language: Language,
}

impl<'a> Default for HeaderBar<'a> {
    fn default() -> Self {
        Self {
            file_name: None,
            file_size: None,
            server_url: "",
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            accent_color: Color::Rgb(0, 120, 212),
            dim_color: Color::Rgb(100, 100, 100),
            language: Language::English,
        }
    }
}

impl<'a> HeaderBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: Option<&'a str>, size: Option<&'a str>) -> Self {
        self.file_name = name;
        self.file_size = size;
        self
    }

    pub fn server_url(mut self, url: &'a str) -> Self {
        self.server_url = url;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.header_bg.to_color();
        self.fg_color = theme.header_fg.to_color();
        self.accent_color = theme.accent.to_color();
        self.dim_color = theme.cell_empty.to_color();
        self
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));
        let i18n = I18n::new(self.language);

        let app_name = format!("[{}] ", i18n.tr(TextKey::AppTitle));
        let right = format!("{} ", self.server_url);
        let room = (area.width as usize)
            .saturating_sub(app_name.width() + right.width() + 1);

        let (file_text, file_style) = match self.file_name {
            Some(name) => {
                let text = match self.file_size {
                    Some(size) => format!("{} ({})", name, size),
                    None => name.to_string(),
                };
                (
                    truncate_to_width(&text, room),
                    Style::default().fg(self.fg_color),
                )
            }
            None => (
                truncate_to_width(i18n.tr(TextKey::HeaderNoFile), room),
                Style::default().fg(self.dim_color),
            ),
        };
        let padding = (area.width as usize)
            .saturating_sub(app_name.width() + file_text.width() + right.width());

        let spans = vec![
            Span::styled(
                app_name,
                Style::default()
                    .fg(self.accent_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(file_text, file_style),
            Span::raw(" ".repeat(padding)),
            Span::styled(right, Style::default().fg(self.dim_color)),
        ];
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
