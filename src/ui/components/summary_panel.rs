// Summary panel component - 요약 / 컬럼 검증 / 컬럼 차트
//
// 상단: 행/컬럼/셀 수, 적재 결과
// 중간: 기대 컬럼 검증 상태
// 하단: 선택 컬럼 값 분포 막대

use crate::core::chart::ColumnChart;
use crate::core::validation::ColumnCheck;
use crate::models::{InsertResponse, TableState};
use crate::ui::{I18n, Language, MessageKey, TextKey, Theme};
use crate::utils::formatter::{format_decimal, format_number_with_commas, truncate_to_width};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 막대 라벨 최대 너비
const BAR_LABEL_WIDTH: usize = 10;

pub struct SummaryPanel<'a> {
    table: Option<&'a TableState>,
    sheet_total_rows: Option<usize>,
    check: Option<&'a ColumnCheck>,
    chart: Option<&'a ColumnChart>,
    result: Option<&'a InsertResponse>,
    border_color: Color,
    bg_color: Color,
    fg_color: Color,
    label_color: Color,
    bar_color: Color,
    warning_color: Color,
    error_color: Color,
    success_color: Color,
    language: Language,
}

impl<'a> Default for SummaryPanel<'a> {
    fn default() -> Self {
        Self {
            table: None,
            sheet_total_rows: None,
            check: None,
            chart: None,
            result: None,
            border_color: Color::Rgb(60, 60, 60),
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            label_color: Color::Rgb(150, 150, 150),
            bar_color: Color::Rgb(0, 120, 212),
            warning_color: Color::Yellow,
            error_color: Color::Red,
            success_color: Color::Green,
            language: Language::English,
        }
    }
}

impl<'a> SummaryPanel<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table: Option<&'a TableState>) -> Self {
        self.table = table;
        self
    }

    /// 서버가 보고한 시트 전체 행 수
    pub fn sheet_total_rows(mut self, total: Option<usize>) -> Self {
        self.sheet_total_rows = total;
        self
    }

    pub fn check(mut self, check: Option<&'a ColumnCheck>) -> Self {
        self.check = check;
        self
    }

    pub fn chart(mut self, chart: Option<&'a ColumnChart>) -> Self {
        self.chart = chart;
        self
    }

    pub fn result(mut self, result: Option<&'a InsertResponse>) -> Self {
        self.result = result;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.border_color = theme.panel_inactive_border.to_color();
        self.bg_color = theme.panel_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.label_color = theme.table_header.to_color();
        self.bar_color = theme.chart_bar.to_color();
        self.warning_color = theme.warning.to_color();
        self.error_color = theme.error.to_color();
        self.success_color = theme.success.to_color();
        self
    }

    fn stat_line(&self, label: &str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!(" {}: ", label), Style::default().fg(self.label_color)),
            Span::styled(
                value,
                Style::default()
                    .fg(self.fg_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    }

    fn summary_lines(&self, i18n: I18n) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if let Some(table) = self.table {
            lines.push(self.stat_line(
                i18n.tr(TextKey::SummaryRows),
                format_number_with_commas(table.row_count() as u64),
            ));
            lines.push(self.stat_line(
                i18n.tr(TextKey::SummaryColumns),
                table.column_count().to_string(),
            ));
            lines.push(self.stat_line(
                i18n.tr(TextKey::SummaryCells),
                format_number_with_commas(table.cell_count()),
            ));
        }
        if let Some(total) = self.sheet_total_rows {
            lines.push(self.stat_line(
                i18n.tr(TextKey::SummarySheetRows),
                format_number_with_commas(total as u64),
            ));
        }
        if let Some(result) = self.result {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {}: ", i18n.tr(TextKey::SummaryInserted)),
                    Style::default().fg(self.label_color),
                ),
                Span::styled(
                    format_number_with_commas(result.rows_inserted as u64),
                    Style::default()
                        .fg(self.success_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(self.stat_line(
                i18n.tr(TextKey::SummaryBatch),
                result.batch_id.clone(),
            ));
        }
        lines
    }

    fn validation_lines(&self, i18n: I18n) -> Vec<Line<'static>> {
        let Some(check) = self.check else {
            return Vec::new();
        };
        let (text, color) = match check {
            ColumnCheck::Skipped => (i18n.tr(TextKey::ValidationSkipped), self.label_color),
            ColumnCheck::Passed { .. } => (i18n.tr(TextKey::ValidationPassed), self.success_color),
            ColumnCheck::Warning { .. } => {
                (i18n.tr(TextKey::ValidationWarning), self.warning_color)
            }
            ColumnCheck::Blocking { .. } => {
                (i18n.tr(TextKey::ValidationBlocking), self.error_color)
            }
        };
        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!(" {}: ", i18n.tr(TextKey::ValidationLabel)),
                Style::default().fg(self.label_color),
            ),
            Span::styled(text.to_string(), Style::default().fg(color)),
        ])];

        let (missing, unexpected): (&[String], &[String]) = match check {
            ColumnCheck::Warning {
                missing,
                unexpected,
                ..
            } => (missing, unexpected),
            ColumnCheck::Blocking { missing } => (missing, &[]),
            ColumnCheck::Passed { unexpected } => (&[], unexpected),
            ColumnCheck::Skipped => (&[], &[]),
        };
        if !missing.is_empty() {
            lines.push(Line::from(Span::styled(
                format!(
                    "   {}",
                    i18n.fmt(
                        MessageKey::ValidationMissing,
                        &[("columns", missing.join(", "))]
                    )
                ),
                Style::default().fg(color),
            )));
        }
        if !unexpected.is_empty() {
            lines.push(Line::from(Span::styled(
                format!(
                    "   {}",
                    i18n.fmt(
                        MessageKey::ValidationUnexpected,
                        &[("columns", unexpected.join(", "))]
                    )
                ),
                Style::default().fg(self.label_color),
            )));
        }
        lines
    }

    fn chart_lines(&self, i18n: I18n, width: usize) -> Vec<Line<'static>> {
        let Some(chart) = self.chart else {
            return Vec::new();
        };
        let mut lines = vec![Line::from(Span::styled(
            format!(
                " {}",
                i18n.fmt(MessageKey::ChartTitle, &[("column", chart.column.clone())])
            ),
            Style::default()
                .fg(self.fg_color)
                .add_modifier(Modifier::BOLD),
        ))];

        if chart.buckets.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("   {}", i18n.tr(TextKey::ChartNoData)),
                Style::default().fg(self.label_color),
            )));
        }

        let max_count = chart.max_count().max(1);
        let count_width = max_count.to_string().len();
        // " " + 라벨 + " " + 막대 + " " + 개수
        let bar_space = width.saturating_sub(BAR_LABEL_WIDTH + count_width + 4).max(1);
        for bucket in &chart.buckets {
            let label = truncate_to_width(&bucket.label, BAR_LABEL_WIDTH);
            let pad = BAR_LABEL_WIDTH.saturating_sub(label.width());
            let bar_len = (bucket.count * bar_space).div_ceil(max_count).max(1);
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {}{} ", label, " ".repeat(pad)),
                    Style::default().fg(self.label_color),
                ),
                Span::styled("█".repeat(bar_len), Style::default().fg(self.bar_color)),
                Span::styled(
                    format!(" {}", bucket.count),
                    Style::default().fg(self.fg_color),
                ),
            ]));
        }

        if chart.empty_count > 0 {
            lines.push(self.stat_line(
                i18n.tr(TextKey::ChartEmptyCells),
                chart.empty_count.to_string(),
            ));
        }
        if chart.distinct_count > 0 {
            lines.push(Line::from(Span::styled(
                format!(
                    " {}",
                    i18n.fmt(
                        MessageKey::ChartDistinct,
                        &[("count", chart.distinct_count.to_string())]
                    )
                ),
                Style::default().fg(self.label_color),
            )));
        }
        if let Some(numeric) = &chart.numeric {
            lines.push(Line::from(Span::styled(
                format!(
                    " {} {}  {} {}",
                    i18n.tr(TextKey::ChartSum),
                    format_decimal(numeric.sum),
                    i18n.tr(TextKey::ChartMean),
                    format_decimal(numeric.mean)
                ),
                Style::default().fg(self.fg_color),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    " {} {}  {} {}",
                    i18n.tr(TextKey::ChartMin),
                    format_decimal(numeric.min),
                    i18n.tr(TextKey::ChartMax),
                    format_decimal(numeric.max)
                ),
                Style::default().fg(self.fg_color),
            )));
        }
        lines
    }
}

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let i18n = I18n::new(self.language);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .title(Span::styled(
                format!(" {} ", i18n.tr(TextKey::PanelSummary)),
                Style::default().fg(self.fg_color),
            ))
            .style(Style::default().bg(self.bg_color));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = self.summary_lines(i18n);
        let validation = self.validation_lines(i18n);
        if !validation.is_empty() {
            lines.push(Line::from(""));
            lines.extend(validation);
        }
        let chart = self.chart_lines(i18n, inner.width as usize);
        if !chart.is_empty() {
            lines.push(Line::from(""));
            lines.extend(chart);
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
