use super::{DialogKind, InputPurpose, ListKind, ProgressStage};
use crate::core::actions::generate_help_entries;
use crate::models::{InsertProgress, ServerStats};
use crate::ui::{localize_runtime_text, I18n, Language, MessageKey, TextKey, Theme};
use crate::utils::formatter::format_number_with_commas;
use crate::utils::path_display;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;

pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    button_bg: Color,
    button_fg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
    input_bg: Color,
    progress_filled: Color,
    progress_unfilled: Color,
    error_color: Color,
    success_color: Color,
    muted_color: Color,
    language: Language,
}

impl<'a> Default for Dialog<'a> {
    fn default() -> Self {
        static DEFAULT_KIND: DialogKind = DialogKind::Message {
            title: String::new(),
            message: String::new(),
        };
        Self {
            kind: &DEFAULT_KIND,
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(0, 120, 212),
            title_color: Color::Rgb(0, 120, 212),
            button_bg: Color::Rgb(60, 60, 60),
            button_fg: Color::Rgb(212, 212, 212),
            button_selected_bg: Color::Rgb(0, 120, 212),
            button_selected_fg: Color::White,
            input_bg: Color::Rgb(30, 30, 30),
            progress_filled: Color::Rgb(0, 120, 212),
            progress_unfilled: Color::Rgb(60, 60, 60),
            error_color: Color::Rgb(244, 71, 71),
            success_color: Color::Rgb(100, 180, 100),
            muted_color: Color::Rgb(128, 128, 128),
            language: Language::English,
        }
    }
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.panel_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.border_color = theme.panel_active_border.to_color();
        self.title_color = theme.accent.to_color();
        self.button_bg = theme.command_bar_bg.to_color();
        self.button_fg = theme.fg_primary.to_color();
        self.button_selected_bg = theme.cursor_bg.to_color();
        self.button_selected_fg = theme.cursor_fg.to_color();
        self.input_bg = theme.bg_primary.to_color();
        self.progress_filled = theme.chart_bar.to_color();
        self.progress_unfilled = theme.panel_inactive_border.to_color();
        self.error_color = theme.error.to_color();
        self.success_color = theme.success.to_color();
        self.muted_color = theme.cell_empty.to_color();
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    fn i18n(&self) -> I18n {
        I18n::new(self.language)
    }

    /// 다이얼로그 영역 계산 (화면 중앙, 반응형)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            DialogKind::Input { purpose, .. } => match purpose {
                InputPurpose::SourceFile => {
                    let w = ((sw as f32 * 0.72) as u16).clamp(56, 110);
                    (w, 14u16)
                }
                InputPurpose::CellEdit { .. } => (56u16.min(sw.saturating_sub(4)).max(30), 7u16),
            },
            DialogKind::Progress { .. } => (56u16.min(sw.saturating_sub(4)).max(36), 9u16),
            DialogKind::Confirm { message, .. }
            | DialogKind::Error { message, .. }
            | DialogKind::Message { message, .. } => {
                let lines: usize = message
                    .lines()
                    .map(|l| l.width() / 46 + 1)
                    .sum::<usize>()
                    .max(1);
                let w = 50u16.min(sw.saturating_sub(4)).max(30);
                let h = (6 + lines as u16).min(sh.saturating_sub(4)).max(6);
                (w, h)
            }
            DialogKind::Stats { .. } => (46u16.min(sw.saturating_sub(4)).max(30), 10u16),
            DialogKind::List { items, .. } => {
                let list_lines = items.len().clamp(1, 14) as u16;
                let w = 90u16.min(sw.saturating_sub(4)).max(48);
                let h = (4 + list_lines).min(sh.saturating_sub(4)).max(6);
                (w, h)
            }
            DialogKind::Help { .. } => {
                let w = 64u16.min(sw.saturating_sub(4)).max(40);
                let h = sh.saturating_sub(6).max(15);
                (w, h)
            }
        };

        let width = width.min(sw.saturating_sub(4));
        let height = height.min(sh.saturating_sub(4));

        let x = screen.x + (sw.saturating_sub(width)) / 2;
        let y = screen.y + (sh.saturating_sub(height)) / 2;

        Rect {
            x,
            y,
            width,
            height,
        }
    }

    fn frame(&self, buf: &mut Buffer, area: Rect, title: &str, accent: Color) -> Rect {
        Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);

        Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(DIALOG_V_PADDING * 2),
        }
    }

    /// 버튼 렌더링 헬퍼
    fn render_button(
        &self,
        buf: &mut Buffer,
        x: u16,
        y: u16,
        label: &str,
        is_selected: bool,
    ) -> u16 {
        let (bg, fg) = if is_selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.button_fg)
        };

        let padded_label = format!(" {} ", label);
        let width = padded_label.width() as u16;
        let style = Style::default().fg(fg).bg(bg);

        buf.set_string(x, y, &padded_label, style);

        // Wide character continuation cell의 배경색 보정
        for i in 0..width {
            if let Some(cell) = buf.cell_mut((x + i, y)) {
                cell.set_bg(bg);
            }
        }

        width
    }

    /// OK / Cancel 버튼 (하단 중앙)
    fn render_ok_cancel(&self, buf: &mut Buffer, area: Rect, selected_button: usize) {
        let button_y = area.y + area.height.saturating_sub(2);
        let ok_label = self.i18n().tr(TextKey::Ok);
        let cancel_label = self.i18n().tr(TextKey::Cancel);
        let buttons_width =
            (format!(" {} ", ok_label).width() + 2 + format!(" {} ", cancel_label).width()) as u16;
        let button_x = area.x + (area.width.saturating_sub(buttons_width)) / 2;

        let ok_width = self.render_button(buf, button_x, button_y, ok_label, selected_button == 0);
        self.render_button(
            buf,
            button_x + ok_width + 2,
            button_y,
            cancel_label,
            selected_button == 1,
        );
    }

    /// 입력 다이얼로그 렌더링
    #[allow(clippy::too_many_arguments)]
    fn render_input(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        prompt: &str,
        value: &str,
        purpose: InputPurpose,
        completion_candidates: &[String],
        completion_index: Option<usize>,
        cursor_pos: usize,
        selected_button: usize,
    ) {
        let inner = self.frame(buf, area, title, self.title_color);

        buf.set_string(inner.x, inner.y, prompt, Style::default().fg(self.fg_color));

        // 입력 필드 배경
        let input_y = inner.y + 1;
        let input_width = inner.width;
        for x in inner.x..inner.x + input_width {
            if let Some(cell) = buf.cell_mut((x, input_y)) {
                cell.set_bg(self.input_bg);
            }
        }

        // cursor_pos는 바이트 인덱스, 화면 표시는 display width 기반
        let max_display = (input_width as usize).saturating_sub(2).max(1);
        let cursor_pos = cursor_pos.min(value.len());
        let cursor_col_from_start: usize = value[..cursor_pos]
            .chars()
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .sum();
        let (display_value, cursor_display_col) = if cursor_col_from_start < max_display {
            (value, cursor_col_from_start)
        } else {
            // 커서가 오른쪽 끝에 오도록 스크롤
            let target_start_width = cursor_col_from_start.saturating_sub(max_display - 1);
            let mut start_byte = value.len();
            let mut width_sum = 0;
            for (i, c) in value.char_indices() {
                if width_sum >= target_start_width {
                    start_byte = i;
                    break;
                }
                width_sum += UnicodeWidthChar::width(c).unwrap_or(0);
            }
            (&value[start_byte..], cursor_col_from_start - width_sum)
        };
        let shown = path_display::truncate_middle(display_value, max_display);
        let shown = if display_value.width() > max_display && cursor_pos < value.len() {
            // 커서 뒤쪽이 넘치면 앞에서부터 잘라 커서 위치를 유지
            display_value
                .chars()
                .scan(0usize, |w, c| {
                    *w += UnicodeWidthChar::width(c).unwrap_or(0);
                    (*w <= max_display).then_some(c)
                })
                .collect()
        } else {
            shown
        };
        let value_style = Style::default().fg(self.fg_color).bg(self.input_bg);
        buf.set_string(inner.x + 1, input_y, &shown, value_style);

        // 커서 표시
        let cursor_x = inner.x + 1 + cursor_display_col as u16;
        if cursor_x < inner.x + input_width.saturating_sub(1) {
            if let Some(cell) = buf.cell_mut((cursor_x, input_y)) {
                if cursor_pos < value.len() {
                    cell.set_style(Style::default().fg(self.input_bg).bg(self.fg_color));
                } else {
                    cell.set_char('▏');
                    cell.set_style(Style::default().fg(self.fg_color).bg(self.input_bg));
                }
            }
        }

        if purpose == InputPurpose::SourceFile && inner.height >= 6 {
            self.render_suggestions(buf, area, inner, completion_candidates, completion_index);
        }

        self.render_ok_cancel(buf, area, selected_button);
    }

    /// 자동완성 목록 (표시 가능한 높이만 렌더, 선택 항목 기준 스크롤)
    fn render_suggestions(
        &self,
        buf: &mut Buffer,
        area: Rect,
        inner: Rect,
        candidates: &[String],
        completion_index: Option<usize>,
    ) {
        let title_y = inner.y + 2;
        let list_y = inner.y + 3;
        let button_y = area.y + area.height.saturating_sub(2);
        let hint_y = button_y.saturating_sub(1);
        let visible_rows = hint_y.saturating_sub(list_y) as usize;
        let dim = Style::default()
            .fg(self.muted_color)
            .bg(self.bg_color)
            .add_modifier(Modifier::DIM);

        if !candidates.is_empty() {
            let selected = completion_index.unwrap_or(0).min(candidates.len() - 1);
            let title = format!(
                "{} ({}/{})",
                self.i18n().tr(TextKey::DialogSuggestions),
                if completion_index.is_some() {
                    selected + 1
                } else {
                    0
                },
                candidates.len()
            );
            buf.set_string(inner.x, title_y, title, dim);

            let scroll = (selected + 1).saturating_sub(visible_rows);
            for (row, candidate) in candidates
                .iter()
                .enumerate()
                .skip(scroll)
                .take(visible_rows)
            {
                let y = list_y + (row - scroll) as u16;
                let is_selected = completion_index == Some(row);
                let marker = if is_selected { "> " } else { "  " };
                let content_width = inner.width.saturating_sub(2) as usize;
                let text = path_display::truncate_middle(candidate, content_width);
                let style = if is_selected {
                    Style::default()
                        .fg(self.button_selected_fg)
                        .bg(self.button_selected_bg)
                } else {
                    Style::default().fg(self.fg_color).bg(self.bg_color)
                };
                buf.set_string(inner.x, y, format!("{}{}", marker, text), style);
            }
        }

        let hint = self.i18n().tr(TextKey::DialogSuggestionHint);
        let hint_x = inner.x + (inner.width.saturating_sub(hint.width() as u16)) / 2;
        buf.set_string(hint_x, hint_y, hint, dim);
    }

    /// 확인 다이얼로그 렌더링
    fn render_confirm(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        message: &str,
        selected_button: usize,
    ) {
        let inner = self.frame(buf, area, title, self.title_color);

        let msg_area = Rect {
            height: inner.height.saturating_sub(2),
            ..inner
        };
        Paragraph::new(localize_runtime_text(self.language, message))
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(msg_area, buf);

        self.render_ok_cancel(buf, area, selected_button);
    }

    /// 진행률 다이얼로그 렌더링
    fn render_progress(
        &self,
        buf: &mut Buffer,
        area: Rect,
        stage: ProgressStage,
        subject: &str,
        progress: &InsertProgress,
    ) {
        let title = match stage {
            ProgressStage::Previewing => self.i18n().tr(TextKey::DialogPreviewingTitle),
            ProgressStage::Inserting => self.i18n().tr(TextKey::DialogInsertingTitle),
        };
        let inner = self.frame(buf, area, title, self.title_color);
        let text_style = Style::default().fg(self.fg_color);

        let subject = path_display::truncate_middle(subject, inner.width as usize);
        buf.set_string(inner.x, inner.y, &subject, text_style);

        let gauge_area = Rect {
            x: inner.x,
            y: inner.y + 2,
            width: inner.width,
            height: 1,
        };
        let percent = match stage {
            ProgressStage::Previewing => 0,
            ProgressStage::Inserting => progress.percentage.min(100),
        };
        Gauge::default()
            .ratio(percent as f64 / 100.0)
            .gauge_style(
                Style::default()
                    .fg(self.progress_filled)
                    .bg(self.progress_unfilled),
            )
            .label(format!("{}%", percent))
            .render(gauge_area, buf);

        let status = if stage == ProgressStage::Inserting && percent > 0 {
            let done = progress
                .rows_done
                .unwrap_or(progress.total_rows * percent as usize / 100);
            self.i18n().fmt(
                MessageKey::ProgressRows,
                &[
                    ("done", format_number_with_commas(done as u64)),
                    ("total", format_number_with_commas(progress.total_rows as u64)),
                ],
            )
        } else {
            self.i18n().tr(TextKey::DialogPleaseWait).to_string()
        };
        buf.set_string(
            inner.x,
            inner.y + 4,
            status,
            Style::default().fg(self.success_color),
        );
    }

    /// 에러/메시지 다이얼로그 렌더링
    fn render_message(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        message: &str,
        is_error: bool,
    ) {
        let accent = if is_error {
            self.error_color
        } else {
            self.title_color
        };
        let inner = self.frame(
            buf,
            area,
            &localize_runtime_text(self.language, title),
            accent,
        );

        let msg_area = Rect {
            height: area.height.saturating_sub(DIALOG_V_PADDING + 3),
            ..inner
        };
        Paragraph::new(localize_runtime_text(self.language, message))
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(msg_area, buf);

        // OK 버튼
        let button_y = area.y + area.height.saturating_sub(2);
        let ok_label = self.i18n().tr(TextKey::Ok);
        let button_width = format!(" {} ", ok_label).width() as u16;
        let button_x = area.x + (area.width.saturating_sub(button_width)) / 2;
        self.render_button(buf, button_x, button_y, ok_label, true);
    }

    /// 서버 통계 렌더링
    fn render_stats(&self, buf: &mut Buffer, area: Rect, stats: &ServerStats) {
        let i18n = self.i18n();
        let inner = self.frame(buf, area, i18n.tr(TextKey::DialogStatsTitle), self.title_color);

        let rows = [
            (
                i18n.tr(TextKey::StatsTotalRecords),
                format_number_with_commas(stats.total_records_stored),
            ),
            (
                i18n.tr(TextKey::StatsTotalUploads),
                format_number_with_commas(stats.total_uploads),
            ),
            (
                i18n.tr(TextKey::StatsSuccessful),
                format_number_with_commas(stats.successful_uploads),
            ),
            (
                i18n.tr(TextKey::StatsFailed),
                format_number_with_commas(stats.failed_uploads),
            ),
            (
                i18n.tr(TextKey::StatsApiVersion),
                stats.api_version.clone().unwrap_or_else(|| "-".to_string()),
            ),
        ];
        let label_width = rows.iter().map(|(l, _)| l.width()).max().unwrap_or(0) + 2;
        let label_style = Style::default().fg(self.muted_color);
        for (i, (label, value)) in rows.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            buf.set_string(inner.x, y, format!("{}:", label), label_style);
            let value_style = if i == 3 && stats.failed_uploads > 0 {
                Style::default().fg(self.error_color)
            } else {
                Style::default()
                    .fg(self.fg_color)
                    .add_modifier(Modifier::BOLD)
            };
            buf.set_string(inner.x + label_width as u16, y, value, value_style);
        }

        let hint = i18n.tr(TextKey::DialogListHint);
        let hint_x = area.x + (area.width.saturating_sub(hint.width() as u16)) / 2;
        buf.set_string(
            hint_x,
            area.y + area.height.saturating_sub(1),
            hint,
            label_style,
        );
    }

    /// 업로드 이력 / 레코드 목록 렌더링
    fn render_list(
        &self,
        buf: &mut Buffer,
        area: Rect,
        kind: ListKind,
        items: &[String],
        selected_index: usize,
    ) {
        let i18n = self.i18n();
        let base_title = match kind {
            ListKind::UploadLogs => i18n.tr(TextKey::DialogLogsTitle),
            ListKind::Records => i18n.tr(TextKey::DialogRecordsTitle),
        };
        let title = format!(
            "{} - {}",
            base_title,
            i18n.fmt(MessageKey::ListCount, &[("count", items.len().to_string())])
        );
        let inner = self.frame(buf, area, &title, self.title_color);
        let inner = Rect {
            height: area.height.saturating_sub(3),
            ..inner
        };

        if items.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                i18n.tr(TextKey::DialogListEmpty),
                Style::default().fg(self.muted_color),
            );
        }

        let normal_style = Style::default().fg(self.fg_color);
        let selected_style = Style::default()
            .fg(self.button_selected_fg)
            .bg(self.button_selected_bg);

        let visible_height = inner.height as usize;
        let scroll = (selected_index + 1).saturating_sub(visible_height);
        for (i, item) in items.iter().skip(scroll).take(visible_height).enumerate() {
            let actual_index = scroll + i;
            let style = if actual_index == selected_index {
                selected_style
            } else {
                normal_style
            };
            let text = crate::utils::formatter::truncate_to_width(item, inner.width as usize);
            let display = format!("{:<width$}", text, width = inner.width as usize);
            buf.set_string(inner.x, inner.y + i as u16, &display, style);
        }

        let hint = i18n.tr(TextKey::DialogListHint);
        let hint_x = area.x + (area.width.saturating_sub(hint.width() as u16)) / 2;
        buf.set_string(
            hint_x,
            area.y + area.height.saturating_sub(1),
            hint,
            Style::default().fg(self.muted_color),
        );
    }

    /// 단축키 도움말 렌더링
    fn render_help(&self, buf: &mut Buffer, area: Rect, scroll_offset: usize) {
        let i18n = self.i18n();
        Block::default()
            .title(i18n.tr(TextKey::DialogKeyboardShortcutsTitle))
            .title_style(
                Style::default()
                    .fg(self.title_color)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);

        let inner = Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(4), // 총 개수 줄 + 하단 힌트
        };

        let header_style = Style::default()
            .fg(self.title_color)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default().fg(self.title_color);
        let desc_style = Style::default().fg(self.fg_color);

        // (is_header, col1, col2)
        let mut all_rows: Vec<(bool, &str, &str)> = Vec::new();
        for (category, items) in generate_help_entries(self.language) {
            all_rows.push((true, category, ""));
            for (key, desc) in items {
                all_rows.push((false, key, desc));
            }
            all_rows.push((false, "", ""));
        }
        while all_rows
            .last()
            .is_some_and(|r| !r.0 && r.1.is_empty() && r.2.is_empty())
        {
            all_rows.pop();
        }

        let count = all_rows.iter().filter(|r| !r.0 && !r.1.is_empty()).count();
        let total_text = i18n.fmt(MessageKey::HelpTotal, &[("count", count.to_string())]);
        let total_x = area.x + area.width.saturating_sub(total_text.width() as u16 + 3);
        buf.set_string(
            total_x,
            inner.y,
            &total_text,
            Style::default().fg(self.muted_color),
        );

        let content_y = inner.y + 1;
        let visible_height = inner.height.saturating_sub(1) as usize;
        let max_scroll = all_rows.len().saturating_sub(visible_height);
        let effective_scroll = scroll_offset.min(max_scroll);
        let key_col_width = 18u16;

        for (i, (is_header, col1, col2)) in all_rows
            .iter()
            .skip(effective_scroll)
            .take(visible_height)
            .enumerate()
        {
            let y = content_y + i as u16;
            if *is_header {
                buf.set_string(inner.x, y, col1, header_style);
            } else if !col1.is_empty() {
                buf.set_string(inner.x + 2, y, col1, key_style);
                buf.set_string(inner.x + key_col_width, y, col2, desc_style);
            }
        }

        // 스크롤바 (내용이 화면보다 많을 때만)
        let total_items = all_rows.len();
        if total_items > visible_height && visible_height > 0 {
            let track_height = visible_height;
            let thumb_height = (track_height * track_height / total_items).max(1);
            let thumb_pos = if max_scroll == 0 {
                0
            } else {
                effective_scroll * (track_height.saturating_sub(thumb_height)) / max_scroll
            };

            let scrollbar_x = area.x + area.width - 2;
            let track_style = Style::default().fg(self.progress_unfilled);
            let thumb_style = Style::default().fg(self.muted_color);
            for i in 0..track_height {
                let (symbol, style) = if i >= thumb_pos && i < thumb_pos + thumb_height {
                    ("┃", thumb_style)
                } else {
                    ("│", track_style)
                };
                buf.set_string(scrollbar_x, content_y + i as u16, symbol, style);
            }
        }

        let hint = i18n.tr(TextKey::DialogHelpHint);
        let hint_x = area.x + (area.width.saturating_sub(hint.width() as u16)) / 2;
        buf.set_string(
            hint_x,
            area.y + area.height - 2,
            hint,
            Style::default().fg(self.muted_color),
        );
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = self.calculate_area(area);
        if dialog_area.width < 4 || dialog_area.height < 3 {
            return;
        }

        // 배경 클리어
        Clear.render(dialog_area, buf);

        match self.kind {
            DialogKind::Input {
                title,
                prompt,
                value,
                cursor_pos,
                selected_button,
                purpose,
                completion_candidates,
                completion_index,
                ..
            } => {
                self.render_input(
                    buf,
                    dialog_area,
                    title,
                    prompt,
                    value,
                    *purpose,
                    completion_candidates,
                    *completion_index,
                    *cursor_pos,
                    *selected_button,
                );
            }
            DialogKind::Confirm {
                title,
                message,
                selected_button,
            } => {
                self.render_confirm(buf, dialog_area, title, message, *selected_button);
            }
            DialogKind::Progress {
                stage,
                subject,
                progress,
            } => {
                self.render_progress(buf, dialog_area, *stage, subject, progress);
            }
            DialogKind::Error { title, message } => {
                self.render_message(buf, dialog_area, title, message, true);
            }
            DialogKind::Message { title, message } => {
                self.render_message(buf, dialog_area, title, message, false);
            }
            DialogKind::Stats { stats } => {
                self.render_stats(buf, dialog_area, stats);
            }
            DialogKind::List {
                kind,
                items,
                selected_index,
            } => {
                self.render_list(buf, dialog_area, *kind, items, *selected_index);
            }
            DialogKind::Help { scroll_offset } => {
                self.render_help(buf, dialog_area, *scroll_offset);
            }
        }
    }
}
