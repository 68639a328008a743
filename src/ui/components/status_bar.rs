// Status bar component - 상태바
//
// 왼쪽: 시트/행/컬럼 정보 또는 토스트 메시지
// 오른쪽: 흐름 단계, 서버 상태

use crate::ui::{I18n, Language, MessageKey, TextKey, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 상태바에 표시할 서버 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerIndicator {
    /// 아직 확인하지 않음
    #[default]
    Unknown,
    Up,
    Down,
}

pub struct StatusBar<'a> {
    sheet_name: Option<&'a str>,
    rows: usize,
    columns: usize,
    phase_label: &'a str,
    server: ServerIndicator,
    toast: Option<&'a str>,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
    success_color: Color,
    error_color: Color,
    dim_color: Color,
    language: Language,
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        Self {
            sheet_name: None,
            rows: 0,
            columns: 0,
            phase_label: "",
            server: ServerIndicator::Unknown,
            toast: None,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            accent_color: Color::Rgb(0, 120, 212),
            success_color: Color::Green,
            error_color: Color::Red,
            dim_color: Color::Rgb(100, 100, 100),
            language: Language::English,
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 테이블 정보 (미리보기 전이면 None)
    pub fn table_info(mut self, sheet_name: Option<&'a str>, rows: usize, columns: usize) -> Self {
        self.sheet_name = sheet_name;
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn phase_label(mut self, label: &'a str) -> Self {
        self.phase_label = label;
        self
    }

    pub fn server(mut self, server: ServerIndicator) -> Self {
        self.server = server;
        self
    }

    /// 토스트가 있으면 테이블 정보 대신 표시
    pub fn toast(mut self, toast: Option<&'a str>) -> Self {
        self.toast = toast;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.accent_color = theme.accent.to_color();
        self.success_color = theme.success.to_color();
        self.error_color = theme.error.to_color();
        self.dim_color = theme.cell_empty.to_color();
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));
        let i18n = I18n::new(self.language);

        let (left, left_style) = if let Some(toast) = self.toast {
            (
                format!(" {}", toast),
                Style::default()
                    .fg(self.accent_color)
                    .add_modifier(Modifier::BOLD),
            )
        } else if let Some(sheet) = self.sheet_name {
            (
                i18n.fmt(
                    MessageKey::StatusTable,
                    &[
                        ("sheet", sheet.to_string()),
                        ("rows", self.rows.to_string()),
                        ("columns", self.columns.to_string()),
                    ],
                ),
                Style::default().fg(self.fg_color),
            )
        } else {
            (String::new(), Style::default().fg(self.fg_color))
        };

        let (server_text, server_color) = match self.server {
            ServerIndicator::Unknown => (i18n.tr(TextKey::ServerUnknown), self.dim_color),
            ServerIndicator::Up => (i18n.tr(TextKey::ServerUp), self.success_color),
            ServerIndicator::Down => (i18n.tr(TextKey::ServerDown), self.error_color),
        };
        let phase = format!("[{}] ", self.phase_label);
        let server = format!("● {} ", server_text);

        let right_width = phase.width() + server.width();
        let padding = (area.width as usize).saturating_sub(left.width() + right_width);

        let spans = vec![
            Span::styled(left, left_style),
            Span::raw(" ".repeat(padding)),
            Span::styled(phase, Style::default().fg(self.dim_color)),
            Span::styled(server, Style::default().fg(server_color)),
        ];
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
