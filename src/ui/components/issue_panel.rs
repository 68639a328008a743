// Issue panel component - 경고/오류/검증 메시지 목록

use crate::models::{Issue, IssueSource};
use crate::ui::{localize_runtime_text, I18n, Language, TextKey, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct IssuePanel<'a> {
    issues: &'a [Issue],
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    warning_color: Color,
    error_color: Color,
    validation_color: Color,
    language: Language,
}

impl<'a> Default for IssuePanel<'a> {
    fn default() -> Self {
        Self {
            issues: &[],
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(60, 60, 60),
            warning_color: Color::Yellow,
            error_color: Color::Red,
            validation_color: Color::Rgb(206, 145, 120),
            language: Language::English,
        }
    }
}

impl<'a> IssuePanel<'a> {
    pub fn new(issues: &'a [Issue]) -> Self {
        Self {
            issues,
            ..Self::default()
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.panel_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.warning_color = theme.warning.to_color();
        self.error_color = theme.error.to_color();
        self.validation_color = theme.accent.to_color();
        self.border_color = if self.issues.iter().any(|i| i.source == IssueSource::System) {
            self.error_color
        } else {
            self.warning_color
        };
        self
    }

    fn label(&self, i18n: I18n, source: IssueSource) -> (&'static str, Color) {
        match source {
            IssueSource::Warning => (i18n.tr(TextKey::IssueWarning), self.warning_color),
            IssueSource::System => (i18n.tr(TextKey::IssueSystem), self.error_color),
            IssueSource::Validation => (i18n.tr(TextKey::IssueValidation), self.validation_color),
        }
    }
}

impl Widget for IssuePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let i18n = I18n::new(self.language);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .title(Span::styled(
                format!(" {} ({}) ", i18n.tr(TextKey::PanelMessages), self.issues.len()),
                Style::default().fg(self.fg_color),
            ))
            .style(Style::default().bg(self.bg_color));

        let lines: Vec<Line> = if self.issues.is_empty() {
            vec![Line::from(Span::styled(
                format!(" {}", i18n.tr(TextKey::IssuesNone)),
                Style::default().fg(self.border_color),
            ))]
        } else {
            self.issues
                .iter()
                .map(|issue| {
                    let (label, color) = self.label(i18n, issue.source);
                    Line::from(vec![
                        Span::styled(
                            format!(" [{}] ", label),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            localize_runtime_text(self.language, &issue.message),
                            Style::default().fg(self.fg_color),
                        ),
                    ])
                })
                .collect()
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_localized_issue_with_label() {
        let issues = vec![Issue::warning("Some sheets in the workbook are empty")];
        let area = Rect::new(0, 0, 70, 3);
        let mut buf = Buffer::empty(area);
        IssuePanel::new(&issues)
            .language(Language::Spanish)
            .render(area, &mut buf);
        let line: String = (0..70).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(line.contains("[Aviso]"));
        assert!(line.contains("Algunas hojas del libro están vacías"));
    }

    #[test]
    fn test_system_issue_switches_border_to_error_color() {
        let theme = Theme::dark();
        let issues = vec![Issue::system("Error contacting server")];
        let panel = IssuePanel::new(&issues).theme(&theme);
        assert_eq!(panel.border_color, theme.error.to_color());
    }
}
