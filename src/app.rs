use crate::core::actions::Action;
use crate::core::chart::{aggregate_column, ColumnChart};
use crate::core::validation::{check_columns, ColumnCheck};
use crate::models::{
    InsertProgress, InsertResponse, Issue, IssueSource, LoaderPhase, PreviewResponse, TableState,
};
use crate::system::{LoaderService, Settings};
use crate::ui::components::data_table::fit_columns;
use crate::ui::{
    DialogKind, I18n, InputPurpose, Language, LayoutManager, MessageKey, ServerIndicator,
    ThemeManager,
};
use crate::utils::error::{LoaderError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

mod controllers;
mod dialogs;
mod text_edit;
mod workflow;

use workflow::LoaderWorkerState;

/// 토스트 표시 시간 (초)
const TOAST_SECS: u64 = 3;

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 현재 설정 (CLI 덮어쓰기 반영)
    pub settings: Settings,
    /// 종료 시 저장할 설정 경로 (None이면 저장 안 함)
    settings_path: Option<PathBuf>,
    /// 적재 서버
    service: Arc<dyn LoaderService>,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    /// 테마 관리자
    pub theme_manager: ThemeManager,
    language: Language,

    // === 적재 흐름 ===
    /// 현재 단계
    pub phase: LoaderPhase,
    /// 선택한 파일
    pub source_file: Option<PathBuf>,
    /// 선택한 파일 크기 (bytes)
    pub source_size: Option<u64>,
    /// 미리보기 응답
    pub preview: Option<PreviewResponse>,
    /// 선택한 시트 (`preview.sheet_names` 인덱스)
    pub selected_sheet: Option<usize>,
    /// 편집 중인 테이블
    pub table: Option<TableState>,
    /// 이슈 패널 항목
    pub issues: Vec<Issue>,
    /// 마지막 적재 결과 (현재 시트 기준)
    pub result: Option<InsertResponse>,
    /// 적재 진행률
    pub progress: InsertProgress,
    /// 실행 중인 미리보기/적재 워커
    worker: Option<LoaderWorkerState>,
    /// 실행 중인 서버 조회 워커 (헬스체크, 통계, 이력, 레코드)
    query: Option<LoaderWorkerState>,

    // === 화면 상태 ===
    /// 현재 표시 중인 다이얼로그
    pub dialog: Option<DialogKind>,
    /// 토스트 메시지 (3초 후 자동 소멸)
    pub toast_message: Option<(String, Instant)>,
    /// 차트 대상 컬럼 인덱스
    pub chart_column: usize,
    /// 마지막 헬스체크 결과
    pub server_status: ServerIndicator,
}

impl App {
    pub fn new(
        settings: Settings,
        settings_path: Option<PathBuf>,
        service: Arc<dyn LoaderService>,
    ) -> Self {
        let mut theme_manager = ThemeManager::new();
        if let Some(themes_dir) = Self::themes_dir() {
            match theme_manager.load_themes_from_dir(&themes_dir) {
                Ok(0) => {}
                Ok(count) => info!(count, dir = %themes_dir.display(), "loaded custom themes"),
                Err(err) => warn!(error = %err, "failed to read themes directory"),
            }
        }
        if let Err(err) = theme_manager.switch_theme(&settings.theme) {
            warn!(%err, "falling back to default theme");
        }
        let language = Language::from_code(&settings.language);

        Self {
            should_quit: false,
            settings,
            settings_path,
            service,
            layout: LayoutManager::new(),
            theme_manager,
            language,
            phase: LoaderPhase::Idle,
            source_file: None,
            source_size: None,
            preview: None,
            selected_sheet: None,
            table: None,
            issues: Vec::new(),
            result: None,
            progress: InsertProgress::default(),
            worker: None,
            query: None,
            dialog: None,
            toast_message: None,
            chart_column: 0,
            server_status: ServerIndicator::Unknown,
        }
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(service: Arc<dyn LoaderService>) -> Self {
        let settings = Settings {
            progress_step_ms: 1,
            ..Settings::default()
        };
        Self {
            should_quit: false,
            settings,
            settings_path: None,
            service,
            layout: LayoutManager::new(),
            theme_manager: ThemeManager::new(),
            language: Language::English,
            phase: LoaderPhase::Idle,
            source_file: None,
            source_size: None,
            preview: None,
            selected_sheet: None,
            table: None,
            issues: Vec::new(),
            result: None,
            progress: InsertProgress::default(),
            worker: None,
            query: None,
            dialog: None,
            toast_message: None,
            chart_column: 0,
            server_status: ServerIndicator::Unknown,
        }
    }

    fn themes_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("excel-loader").join("themes"))
    }

    /// 종료 (테마/언어/마지막 디렉토리 저장)
    pub fn quit(&mut self) {
        if let Err(err) = self.save_settings() {
            warn!(error = %err, "failed to save settings");
        }
        self.should_quit = true;
    }

    /// 화면에서 바꾼 값만 파일에 반영 (CLI 덮어쓰기는 저장하지 않음)
    fn save_settings(&mut self) -> Result<()> {
        let Some(path) = self.settings_path.clone() else {
            return Ok(());
        };
        self.settings.theme = self.theme_manager.current_name().to_string();
        self.settings.language = self.language.code().to_string();

        let mut stored = Settings::load(&path);
        stored.theme = self.settings.theme.clone();
        stored.language = self.settings.language.clone();
        stored.last_directory = self.settings.last_directory.clone();
        stored.save(&path)
    }

    /// 종료 상태 확인
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn i18n(&self) -> I18n {
        I18n::new(self.language)
    }

    /// 서버 주소 (헤더 표시용)
    pub fn server_url(&self) -> &str {
        &self.settings.server_url
    }

    /// 액션 실행 (단일 진실 원천)
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::GoToTop
            | Action::GoToBottom
            | Action::PageUp
            | Action::PageDown
            | Action::NextSheet
            | Action::PrevSheet => controllers::table_controller::execute(self, action),
            Action::OpenFile
            | Action::Preview
            | Action::Insert
            | Action::EditCell
            | Action::DeleteRow
            | Action::ClearTable
            | Action::NextChartColumn
            | Action::DismissIssues => controllers::workflow_controller::execute(self, action),
            Action::CheckHealth
            | Action::ShowServerStats
            | Action::ShowUploadLogs
            | Action::ShowRecords
            | Action::ShowHelp
            | Action::CycleTheme
            | Action::ToggleLanguage => controllers::dialog_controller::execute(self, action),
        }
    }

    // === 파생 상태 ===

    /// 원격 요청 진행 중 여부 (조회 포함)
    pub fn is_busy(&self) -> bool {
        self.worker.is_some() || self.query.is_some()
    }

    /// 미리보기/적재 진행 중 여부
    ///
    /// 서버 조회는 파일 선택과 적재 흐름을 막지 않는다.
    pub fn is_workflow_busy(&self) -> bool {
        self.worker.is_some()
    }

    /// 서버 조회 진행 중 여부
    pub fn is_query_busy(&self) -> bool {
        self.query.is_some()
    }

    /// 현재 선택한 시트 이름
    pub fn selected_sheet_name(&self) -> Option<&str> {
        let preview = self.preview.as_ref()?;
        preview
            .sheet_names
            .get(self.selected_sheet?)
            .map(String::as_str)
    }

    /// 선택한 시트의 전체 행 수 (서버 기준)
    pub fn selected_sheet_total_rows(&self) -> Option<usize> {
        let name = self.selected_sheet_name()?;
        self.preview
            .as_ref()
            .and_then(|p| p.sheet(name))
            .map(|sheet| sheet.total_rows)
    }

    /// 선택한 파일 이름
    pub fn source_file_name(&self) -> Option<String> {
        self.source_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// 현재 테이블의 컬럼 검증 결과
    pub fn column_check(&self) -> Option<ColumnCheck> {
        let table = self.table.as_ref()?;
        Some(check_columns(&self.settings.expected_columns, &table.columns))
    }

    /// 차트 집계 (차트 컬럼 기준)
    pub fn chart(&self) -> Option<ColumnChart> {
        let table = self.table.as_ref()?;
        let column = table.columns.get(self.chart_column)?;
        let values = table.column_values(self.chart_column);
        Some(aggregate_column(
            column,
            &values,
            self.settings.chart_buckets,
        ))
    }

    /// 적재 요청 가능 여부 (행 있음, 요청 없음, 결과 미표시)
    pub fn can_insert(&self) -> bool {
        self.table.as_ref().is_some_and(|t| !t.is_empty())
            && !self.is_workflow_busy()
            && self.result.is_none()
            && matches!(self.phase, LoaderPhase::Previewed)
    }

    /// 미리보기 요청 가능 여부
    pub fn can_preview(&self) -> bool {
        self.source_file.is_some() && self.preview.is_none() && !self.is_workflow_busy()
    }

    /// 이슈 추가 (같은 출처·문구는 한 번만)
    pub(crate) fn push_issue(&mut self, issue: Issue) {
        if !self.issues.contains(&issue) {
            self.issues.push(issue);
        }
    }

    pub(crate) fn clear_issues_from(&mut self, source: IssueSource) {
        self.issues.retain(|issue| issue.source != source);
    }

    /// 테이블 커서 위치에 맞춰 스크롤 보정
    pub fn sync_table_viewport(&mut self) {
        let visible_rows = self.layout.table_visible_rows();
        let inner_width = self.layout.areas().table.width.saturating_sub(2);
        if let Some(table) = &mut self.table {
            table.adjust_scroll(visible_rows);
            if table.cursor_col < table.column_offset {
                table.column_offset = table.cursor_col;
            }
            while table.cursor_col
                >= table.column_offset + fit_columns(table, table.column_offset, inner_width)
            {
                table.column_offset += 1;
            }
        }
    }

    // === 다이얼로그/토스트 ===

    /// 다이얼로그 활성 여부
    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    /// 다이얼로그 닫기 (진행률 다이얼로그는 닫을 수 없음)
    pub fn close_dialog(&mut self) {
        if self.dialog.as_ref().is_some_and(DialogKind::is_blocking) {
            return;
        }
        if matches!(self.phase, LoaderPhase::Confirming) {
            self.cancel_insert();
            return;
        }
        self.dialog = None;
    }

    /// 도움말 표시 (?)
    pub fn show_help(&mut self) {
        self.dialog = Some(DialogKind::help());
    }

    /// 파일 선택 다이얼로그
    pub fn open_file_dialog(&mut self) {
        if self.is_workflow_busy() {
            self.set_toast("Another request is still running");
            return;
        }
        let base_path = self
            .settings
            .last_directory
            .clone()
            .filter(|dir| dir.is_dir())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let i18n = self.i18n();
        self.dialog = Some(DialogKind::source_file_input(
            i18n.tr(crate::ui::TextKey::DialogOpenFileTitle),
            i18n.tr(crate::ui::TextKey::DialogOpenFilePrompt),
            "",
            base_path,
        ));
        self.update_input_completion_state();
    }

    /// 셀 편집 다이얼로그 (커서 셀)
    pub fn open_edit_cell_dialog(&mut self) {
        if !self.phase.is_editable() {
            return;
        }
        let Some(table) = &self.table else {
            return;
        };
        if table.is_empty() || table.column_count() == 0 {
            return;
        }
        let (row, col) = (table.cursor_row, table.cursor_col);
        let column = table.cursor_column_name().unwrap_or_default().to_string();
        let current = table.cell_text(row, col);
        let i18n = self.i18n();
        let prompt = i18n.fmt(
            MessageKey::EditCellPrompt,
            &[("row", (row + 1).to_string()), ("column", column)],
        );
        self.dialog = Some(DialogKind::cell_edit_input(
            i18n.tr(crate::ui::TextKey::DialogEditCellTitle),
            prompt,
            current,
            row,
            col,
        ));
    }

    /// 입력 다이얼로그 확정
    pub fn confirm_input_dialog(&mut self, value: String) {
        let Some(DialogKind::Input {
            purpose, base_path, ..
        }) = &self.dialog
        else {
            return;
        };
        let purpose = *purpose;
        let base_path = base_path.clone();
        self.dialog = None;

        match purpose {
            InputPurpose::SourceFile => {
                if value.trim().is_empty() {
                    return;
                }
                let path = crate::system::source_file::resolve_input_path(&value, &base_path);
                if self.select_file(path) {
                    self.start_preview();
                }
            }
            InputPurpose::CellEdit { row, col } => self.edit_cell(row, col, &value),
        }
    }

    /// 토스트 메시지 설정 (3초 후 자동 소멸)
    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    /// 만료된 토스트 제거
    pub fn clear_expired_toast(&mut self) {
        if let Some((_, time)) = &self.toast_message {
            if time.elapsed().as_secs() >= TOAST_SECS {
                self.toast_message = None;
            }
        }
    }

    /// 토스트 메시지 가져오기 (만료 안 된 경우만)
    pub fn toast_display(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, time)| {
            if time.elapsed().as_secs() < TOAST_SECS {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    // === 테마/언어 ===

    pub(crate) fn cycle_theme(&mut self) {
        self.theme_manager.cycle_theme();
        let name = self.theme_manager.current_name().to_string();
        let text = self.i18n().fmt(MessageKey::ThemeToast, &[("name", name)]);
        self.set_toast(&text);
    }

    pub(crate) fn toggle_language(&mut self) {
        self.language = self.language.toggle();
        let text = self.i18n().fmt(
            MessageKey::LanguageToast,
            &[("name", self.language.display_name().to_string())],
        );
        self.set_toast(&text);
    }

    /// 실패 메시지 (서버 에러는 detail, 그 외는 기본 문구 + 원인)
    pub(crate) fn failure_message(fallback: &str, err: &LoaderError) -> String {
        match err {
            LoaderError::Server { detail, .. } => detail.clone(),
            other => format!("{}: {}", fallback, other),
        }
    }
}

#[cfg(test)]
mod tests;
