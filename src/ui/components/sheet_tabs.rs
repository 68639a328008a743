// Sheet tabs component - 시트 탭 줄
//
// 현재 시트 강조, 행 수와 빈 시트 표시, 넘치면 현재 탭이 보이도록 앞쪽을 생략

use crate::ui::{I18n, Language, TextKey, Theme};
use crate::utils::formatter::format_number_with_commas;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 탭 하나의 표시 정보
#[derive(Debug, Clone)]
pub struct SheetTab<'a> {
    pub name: &'a str,
    /// 시트 전체 행 수 (0이면 표시 생략)
    pub rows: usize,
    pub is_empty: bool,
}

pub struct SheetTabs<'a> {
    tabs: Vec<SheetTab<'a>>,
    active: usize,
    bg_color: Color,
    active_fg: Color,
    active_bg: Color,
    inactive_fg: Color,
    empty_fg: Color,
    language: Language,
}

impl<'a> Default for SheetTabs<'a> {
    fn default() -> Self {
        Self {
            tabs: Vec::new(),
            active: 0,
            bg_color: Color::Rgb(30, 30, 30),
            active_fg: Color::White,
            active_bg: Color::Rgb(0, 120, 212),
            inactive_fg: Color::Rgb(150, 150, 150),
            empty_fg: Color::Rgb(90, 90, 90),
            language: Language::English,
        }
    }
}

impl<'a> SheetTabs<'a> {
    pub fn new(tabs: Vec<SheetTab<'a>>, active: usize) -> Self {
        Self {
            tabs,
            active,
            ..Self::default()
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.bg_primary.to_color();
        self.active_fg = theme.tab_active_fg.to_color();
        self.active_bg = theme.tab_active_bg.to_color();
        self.inactive_fg = theme.tab_inactive.to_color();
        self.empty_fg = theme.cell_empty.to_color();
        self
    }

    fn label(&self, tab: &SheetTab, i18n: I18n) -> String {
        if tab.is_empty {
            format!(" {} ({}) ", tab.name, i18n.tr(TextKey::TabEmptyMarker))
        } else if tab.rows > 0 {
            format!(" {} ({}) ", tab.name, format_number_with_commas(tab.rows as u64))
        } else {
            format!(" {} ", tab.name)
        }
    }

    /// 현재 탭이 화면에 들어오도록 하는 첫 탭 인덱스
    fn first_visible(&self, labels: &[String], width: usize) -> usize {
        let mut first = 0;
        loop {
            let used: usize = labels[first..=self.active.min(labels.len() - 1)]
                .iter()
                .map(|l| l.width() + 1)
                .sum();
            if used <= width || first >= self.active {
                return first;
            }
            first += 1;
        }
    }
}

impl Widget for SheetTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));
        if self.tabs.is_empty() {
            return;
        }
        let i18n = I18n::new(self.language);
        let labels: Vec<String> = self.tabs.iter().map(|t| self.label(t, i18n)).collect();
        let first = self.first_visible(&labels, area.width as usize);

        let mut spans = Vec::new();
        if first > 0 {
            spans.push(Span::styled("‹", Style::default().fg(self.inactive_fg)));
        }
        for (i, (tab, label)) in self.tabs.iter().zip(labels).enumerate().skip(first) {
            let style = if i == self.active {
                Style::default()
                    .fg(self.active_fg)
                    .bg(self.active_bg)
                    .add_modifier(Modifier::BOLD)
            } else if tab.is_empty {
                Style::default().fg(self.empty_fg)
            } else {
                Style::default().fg(self.inactive_fg)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
