// Data table component - 미리보기 테이블
//
// 행 번호 + 컬럼 헤더 + 셀, 커서 셀 강조, 세로 스크롤바

use crate::models::TableState;
use crate::ui::{I18n, Language, TextKey, Theme};
use crate::utils::formatter::truncate_to_width;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 컬럼 최대 표시 너비
const MAX_COLUMN_WIDTH: usize = 24;
const MIN_COLUMN_WIDTH: usize = 4;
/// 컬럼 사이 간격
const COLUMN_GAP: usize = 1;
/// 너비 계산에 사용하는 최대 샘플 행 수
const WIDTH_SAMPLE_ROWS: usize = 200;

/// 컬럼 표시 너비 (헤더와 셀 샘플 중 가장 넓은 값, 상한 적용)
pub fn column_width(table: &TableState, col: usize) -> usize {
    let header = table.columns.get(col).map(|c| c.width()).unwrap_or(0);
    let widest_cell = (0..table.row_count().min(WIDTH_SAMPLE_ROWS))
        .map(|row| table.cell_text(row, col).width())
        .max()
        .unwrap_or(0);
    header.max(widest_cell).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

fn row_number_width(table: &TableState) -> usize {
    table.row_count().max(1).to_string().len().max(2)
}

/// `column_offset`부터 주어진 너비에 들어가는 컬럼 수 (최소 1)
pub fn fit_columns(table: &TableState, column_offset: usize, inner_width: u16) -> usize {
    // 행 번호 + 간격 + 스크롤바
    let mut remaining = (inner_width as usize).saturating_sub(row_number_width(table) + 2);
    let mut count = 0;
    for col in column_offset..table.column_count() {
        let needed = column_width(table, col) + COLUMN_GAP;
        if needed > remaining {
            break;
        }
        remaining -= needed;
        count += 1;
    }
    count.max(1)
}

pub struct DataTable<'a> {
    title: &'a str,
    table: Option<&'a TableState>,
    focused: bool,
    border_color: Color,
    inactive_border_color: Color,
    bg_color: Color,
    header_color: Color,
    row_number_color: Color,
    cell_color: Color,
    empty_color: Color,
    cursor_fg: Color,
    cursor_bg: Color,
    row_highlight_bg: Color,
    language: Language,
}

impl<'a> Default for DataTable<'a> {
    fn default() -> Self {
        Self {
            title: "",
            table: None,
            focused: true,
            border_color: Color::Rgb(0, 120, 212),
            inactive_border_color: Color::Rgb(60, 60, 60),
            bg_color: Color::Rgb(30, 30, 30),
            header_color: Color::Rgb(150, 150, 150),
            row_number_color: Color::Rgb(100, 100, 100),
            cell_color: Color::Rgb(212, 212, 212),
            empty_color: Color::Rgb(90, 90, 90),
            cursor_fg: Color::White,
            cursor_bg: Color::Rgb(0, 120, 212),
            row_highlight_bg: Color::Rgb(45, 45, 48),
            language: Language::English,
        }
    }
}

impl<'a> DataTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// 미리보기 전이면 None
    pub fn table(mut self, table: Option<&'a TableState>) -> Self {
        self.table = table;
        self
    }

    /// 다이얼로그가 떠 있으면 false
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.border_color = theme.panel_active_border.to_color();
        self.inactive_border_color = theme.panel_inactive_border.to_color();
        self.bg_color = theme.panel_bg.to_color();
        self.header_color = theme.table_header.to_color();
        self.row_number_color = theme.row_number.to_color();
        self.cell_color = theme.cell_normal.to_color();
        self.empty_color = theme.cell_empty.to_color();
        self.cursor_fg = theme.cursor_fg.to_color();
        self.cursor_bg = theme.cursor_bg.to_color();
        self.row_highlight_bg = theme.row_highlight_bg.to_color();
        self
    }

    fn render_placeholder(&self, inner: Rect, buf: &mut Buffer, text: &str) {
        let line = Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(self.empty_color),
        ));
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }

    fn render_scrollbar(&self, inner: Rect, buf: &mut Buffer, table: &TableState, track: usize) {
        let total = table.row_count();
        if track == 0 || total <= track {
            return;
        }
        let thumb_height = (track * track / total).max(1);
        let max_scroll = total.saturating_sub(track);
        let thumb_pos = table.scroll_offset.min(max_scroll) * track.saturating_sub(thumb_height)
            / max_scroll.max(1);

        let x = inner.x + inner.width - 1;
        let top = inner.y + 2;
        let track_style = Style::default().fg(self.inactive_border_color);
        let thumb_style = Style::default().fg(self.header_color);
        for i in 0..track {
            let (symbol, style) = if i >= thumb_pos && i < thumb_pos + thumb_height {
                ("┃", thumb_style)
            } else {
                ("│", track_style)
            };
            buf.set_string(x, top + i as u16, symbol, style);
        }
    }
}

impl Widget for DataTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let i18n = I18n::new(self.language);

        let border = if self.focused {
            self.border_color
        } else {
            self.inactive_border_color
        };
        let title = truncate_to_width(self.title, (area.width as usize).saturating_sub(4));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" {} ", title),
                Style::default()
                    .fg(self.cell_color)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.bg_color));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 8 {
            return;
        }

        let Some(table) = self.table else {
            self.render_placeholder(inner, buf, i18n.tr(TextKey::TableNoPreview));
            return;
        };
        if table.column_count() == 0 {
            self.render_placeholder(inner, buf, i18n.tr(TextKey::TableNoColumns));
            return;
        }

        let num_width = row_number_width(table);
        let visible_cols = fit_columns(table, table.column_offset, inner.width);
        let col_end = (table.column_offset + visible_cols).min(table.column_count());
        let widths: Vec<usize> = (table.column_offset..col_end)
            .map(|col| column_width(table, col))
            .collect();

        // 헤더
        let header_style = Style::default()
            .fg(self.header_color)
            .add_modifier(Modifier::BOLD);
        let mut spans = vec![Span::raw(" ".repeat(num_width + 1))];
        for (i, col) in (table.column_offset..col_end).enumerate() {
            let name = truncate_to_width(&table.columns[col], widths[i]);
            let pad = widths[i].saturating_sub(name.width());
            let style = if col == table.cursor_col {
                header_style.fg(self.cursor_bg)
            } else {
                header_style
            };
            spans.push(Span::styled(format!("{}{} ", name, " ".repeat(pad)), style));
        }
        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);
        buf.set_string(
            inner.x,
            inner.y + 1,
            "─".repeat(inner.width as usize),
            Style::default().fg(self.inactive_border_color),
        );

        let track = (inner.height as usize).saturating_sub(2);
        if table.row_count() == 0 {
            let line = Line::from(Span::styled(
                format!(" {}", i18n.tr(TextKey::TableNoRows)),
                Style::default().fg(self.empty_color),
            ));
            buf.set_line(inner.x, inner.y + 2, &line, inner.width);
            return;
        }

        let start = table.scroll_offset.min(table.row_count());
        let end = (start + track).min(table.row_count());
        for (line_idx, row) in (start..end).enumerate() {
            let y = inner.y + 2 + line_idx as u16;
            let is_cursor_row = row == table.cursor_row;
            let row_bg = if is_cursor_row {
                self.row_highlight_bg
            } else {
                self.bg_color
            };

            let mut spans = vec![Span::styled(
                format!("{:>width$} ", row + 1, width = num_width),
                Style::default().fg(self.row_number_color).bg(row_bg),
            )];
            for (i, col) in (table.column_offset..col_end).enumerate() {
                let raw = table.cell_text(row, col);
                let text = truncate_to_width(&raw, widths[i]);
                let pad = widths[i].saturating_sub(text.width());
                let style = if is_cursor_row && col == table.cursor_col {
                    Style::default()
                        .fg(self.cursor_fg)
                        .bg(self.cursor_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.cell_color).bg(row_bg)
                };
                spans.push(Span::styled(format!("{}{}", text, " ".repeat(pad)), style));
                spans.push(Span::styled(" ", Style::default().bg(row_bg)));
            }
            buf.set_line(inner.x, y, &Line::from(spans), inner.width);
        }

        self.render_scrollbar(inner, buf, table, track);
    }
}
