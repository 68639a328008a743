//! 적재 흐름 연산과 요청 워커
//!
//! 원격 요청은 한 번에 하나의 워커 스레드에서 실행된다.
//! 적재 진행률은 워커가 `thread::sleep` 간격으로 채널에 흘려보내고,
//! 메인 루프가 `process_worker_events`로 받아 다이얼로그에 반영한다.

use super::*;
use crate::models::{
    HealthStatus, InsertRequest, ProcessLogEntry, ProgressUpdate, ServerStats, StoredRecord,
};
use crate::system::api_client::{INSERT_FALLBACK, PREVIEW_FALLBACK, QUERY_FALLBACK};
use crate::system::validate_source_file;
use crate::ui::{ListKind, TextKey};
use crate::utils::formatter::{format_number_with_commas, format_server_timestamp};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// 목록 조회 개수
const LIST_LIMIT: usize = 50;
/// 레코드 목록에서 데이터 미리보기 최대 너비
const RECORD_DATA_WIDTH: usize = 60;

/// 워커 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkerKind {
    Preview,
    Insert,
    Health,
    Stats,
    Logs,
    Records,
}

impl WorkerKind {
    /// 읽기 전용 서버 조회 여부 (별도 슬롯에서 실행)
    fn is_query(self) -> bool {
        !matches!(self, WorkerKind::Preview | WorkerKind::Insert)
    }

    fn label(self) -> &'static str {
        match self {
            WorkerKind::Preview => "preview",
            WorkerKind::Insert => "insert",
            WorkerKind::Health => "health check",
            WorkerKind::Stats => "stats query",
            WorkerKind::Logs => "logs query",
            WorkerKind::Records => "records query",
        }
    }
}

/// 워커 결과
#[derive(Debug)]
pub(crate) enum WorkerOutcome {
    Preview(Result<PreviewResponse>),
    Insert(Result<InsertResponse>),
    Health(Result<HealthStatus>),
    Stats(Result<ServerStats>),
    Logs(Result<Vec<ProcessLogEntry>>),
    Records(Result<Vec<StoredRecord>>),
}

impl WorkerOutcome {
    /// 워커가 결과 없이 끝났을 때 (패닉) 종류별 실패 결과
    fn failed(kind: WorkerKind, err: LoaderError) -> Self {
        match kind {
            WorkerKind::Preview => WorkerOutcome::Preview(Err(err)),
            WorkerKind::Insert => WorkerOutcome::Insert(Err(err)),
            WorkerKind::Health => WorkerOutcome::Health(Err(err)),
            WorkerKind::Stats => WorkerOutcome::Stats(Err(err)),
            WorkerKind::Logs => WorkerOutcome::Logs(Err(err)),
            WorkerKind::Records => WorkerOutcome::Records(Err(err)),
        }
    }
}

#[derive(Debug)]
pub(crate) struct LoaderWorkerState {
    kind: WorkerKind,
    progress_rx: Receiver<ProgressUpdate>,
    join_handle: Option<JoinHandle<WorkerOutcome>>,
    progress: InsertProgress,
}

/// 적재 워커 실행
///
/// 적재 성공 시 서버가 보낸 진행률을 순서대로 `step` 간격으로 보낸 뒤 결과를 돌려준다.
pub(crate) fn spawn_insert_worker(
    service: Arc<dyn LoaderService>,
    request: InsertRequest,
    step: Duration,
) -> (Receiver<ProgressUpdate>, JoinHandle<WorkerOutcome>) {
    let (progress_tx, progress_rx) = mpsc::channel::<ProgressUpdate>();
    let handle = thread::spawn(move || {
        let result = service.insert(&request);
        if let Ok(response) = &result {
            replay_progress(response.progress_steps(), &progress_tx, step);
        }
        WorkerOutcome::Insert(result)
    });
    (progress_rx, handle)
}

fn replay_progress(steps: &[ProgressUpdate], progress_tx: &Sender<ProgressUpdate>, step: Duration) {
    for update in steps {
        if progress_tx.send(update.clone()).is_err() {
            return;
        }
        if !step.is_zero() {
            thread::sleep(step);
        }
    }
}

impl App {
    // === 워커 관리 ===

    fn spawn_worker<F>(&mut self, kind: WorkerKind, job: F)
    where
        F: FnOnce(Arc<dyn LoaderService>) -> WorkerOutcome + Send + 'static,
    {
        let (_progress_tx, progress_rx) = mpsc::channel::<ProgressUpdate>();
        let service = Arc::clone(&self.service);
        let handle = thread::spawn(move || job(service));
        debug!(kind = kind.label(), "worker started");
        let state = LoaderWorkerState {
            kind,
            progress_rx,
            join_handle: Some(handle),
            progress: InsertProgress::default(),
        };
        if kind.is_query() {
            self.query = Some(state);
        } else {
            self.worker = Some(state);
        }
    }

    /// 같은 슬롯에서 다른 요청이 진행 중이면 토스트 후 false
    fn ensure_idle_worker(&mut self, kind: WorkerKind) -> bool {
        let busy = if kind.is_query() {
            self.is_query_busy()
        } else {
            self.is_workflow_busy()
        };
        if busy {
            self.set_toast("Another request is still running");
            return false;
        }
        true
    }

    /// 워커 진행 상태 반영 (메인 루프에서 호출)
    pub fn process_worker_events(&mut self) {
        if let Some(worker) = &mut self.worker {
            while let Ok(update) = worker.progress_rx.try_recv() {
                worker.progress.apply(update.percentage, update.rows_done);
                self.progress = worker.progress.clone();
                self.dialog = Some(DialogKind::inserting(worker.progress.clone()));
            }
        }

        if let Some(mut worker) = take_finished(&mut self.worker) {
            // 종료 직전에 보낸 진행률까지 반영
            while let Ok(update) = worker.progress_rx.try_recv() {
                worker.progress.apply(update.percentage, update.rows_done);
            }
            self.progress = worker.progress.clone();
            self.join_worker(worker);
        }
        if let Some(query) = take_finished(&mut self.query) {
            self.join_worker(query);
        }
    }

    fn join_worker(&mut self, mut worker: LoaderWorkerState) {
        let Some(handle) = worker.join_handle.take() else {
            return;
        };
        let kind = worker.kind;
        match handle.join() {
            Ok(outcome) => {
                debug!(kind = kind.label(), "worker finished");
                self.finish_worker(outcome);
            }
            Err(_) => {
                let err = LoaderError::WorkerPanicked(kind.label());
                tracing::error!(kind = kind.label(), "worker panicked");
                let message = err.to_string();
                self.finish_worker(WorkerOutcome::failed(kind, err));
                // 진행 중인 미리보기/적재 다이얼로그는 조회 실패로 덮지 않음
                if kind.is_query() && self.is_workflow_busy() {
                    return;
                }
                self.dialog = Some(DialogKind::error(
                    self.i18n().tr(TextKey::DialogErrorTitle),
                    message,
                ));
            }
        }
    }

    fn finish_worker(&mut self, outcome: WorkerOutcome) {
        match outcome {
            WorkerOutcome::Preview(result) => self.finish_preview(result),
            WorkerOutcome::Insert(result) => self.finish_insert(result),
            WorkerOutcome::Health(result) => self.finish_health(result),
            WorkerOutcome::Stats(result) => match result {
                Ok(stats) => self.show_query_dialog(DialogKind::stats(stats)),
                Err(err) => self.report_query_error(&err),
            },
            WorkerOutcome::Logs(result) => match result {
                Ok(entries) => {
                    let items = entries.iter().map(format_log_entry).collect();
                    self.show_query_dialog(DialogKind::list(ListKind::UploadLogs, items));
                }
                Err(err) => self.report_query_error(&err),
            },
            WorkerOutcome::Records(result) => match result {
                Ok(records) => {
                    let items = records.iter().map(format_record).collect();
                    self.show_query_dialog(DialogKind::list(ListKind::Records, items));
                }
                Err(err) => self.report_query_error(&err),
            },
        }
    }

    /// 조회 결과 다이얼로그 (다른 다이얼로그가 열려 있으면 버림)
    fn show_query_dialog(&mut self, dialog: DialogKind) {
        if self.dialog.is_some() {
            debug!("query result dropped, another dialog is open");
            return;
        }
        self.dialog = Some(dialog);
    }

    fn report_query_error(&mut self, err: &LoaderError) {
        warn!(error = %err, "server query failed");
        self.push_issue(Issue::system(Self::failure_message(QUERY_FALLBACK, err)));
    }

    // === 적재 흐름 연산 ===

    /// 파일 선택
    ///
    /// 검증에 실패하면 시스템 이슈만 남기고 상태는 그대로 둔다.
    pub fn select_file(&mut self, path: PathBuf) -> bool {
        if self.phase.is_busy() || self.is_workflow_busy() {
            self.set_toast("Another request is still running");
            return false;
        }
        let path = match validate_source_file(&path) {
            Ok(path) => path,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "file rejected");
                self.push_issue(Issue::system(err.user_message()));
                return false;
            }
        };

        info!(file = %path.display(), "file selected");
        self.source_size = std::fs::metadata(&path).ok().map(|m| m.len());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.settings.last_directory = Some(parent.to_path_buf());
        }
        self.source_file = Some(path);
        self.preview = None;
        self.selected_sheet = None;
        self.table = None;
        self.result = None;
        self.issues.clear();
        self.progress = InsertProgress::default();
        self.chart_column = 0;
        self.phase = LoaderPhase::FileSelected;
        true
    }

    /// 미리보기 요청 (파일 선택 후, 미리보기 전)
    pub fn start_preview(&mut self) {
        let Some(path) = self.source_file.clone() else {
            self.set_toast("Select a file first");
            return;
        };
        if self.preview.is_some() || !self.ensure_idle_worker(WorkerKind::Preview) {
            return;
        }

        self.issues.clear();
        self.phase = LoaderPhase::Previewing;
        let name = self
            .source_file_name()
            .unwrap_or_else(|| path.display().to_string());
        self.dialog = Some(DialogKind::previewing(name));
        info!(file = %path.display(), "preview started");
        self.spawn_worker(WorkerKind::Preview, move |service| {
            WorkerOutcome::Preview(service.preview(&path))
        });
    }

    fn finish_preview(&mut self, result: Result<PreviewResponse>) {
        self.dialog = None;
        match result {
            Ok(preview) => {
                info!(
                    filename = %preview.filename,
                    sheets = preview.sheet_count(),
                    "preview received"
                );
                if preview.has_empty_sheets() {
                    self.push_issue(Issue::warning("Some sheets in the workbook are empty"));
                }
                let has_sheets = !preview.sheet_names.is_empty();
                self.preview = Some(preview);
                self.phase = LoaderPhase::Previewed;
                if has_sheets {
                    self.select_sheet(0);
                }
            }
            Err(err) => {
                warn!(error = %err, "preview failed");
                self.push_issue(Issue::system(Self::failure_message(PREVIEW_FALLBACK, &err)));
                self.phase = LoaderPhase::FileSelected;
            }
        }
    }

    /// 시트 선택 (인덱스)
    ///
    /// 이전 시트의 편집 내용과 적재 결과는 버린다.
    pub fn select_sheet(&mut self, index: usize) {
        if self.is_workflow_busy() {
            return;
        }
        let Some(preview) = &self.preview else {
            return;
        };
        let Some(name) = preview.sheet_names.get(index).cloned() else {
            return;
        };
        let sheet = preview.sheet(&name).cloned().unwrap_or_default();

        debug!(sheet = %name, rows = sheet.preview_data.len(), "sheet selected");
        self.selected_sheet = Some(index);
        self.table = Some(TableState::from_sheet(name, &sheet));
        self.result = None;
        self.progress = InsertProgress::default();
        self.chart_column = 0;
        self.phase = LoaderPhase::Previewed;
        self.refresh_validation_issue();
        self.sync_table_viewport();
    }

    /// 이름으로 시트 선택
    pub fn select_sheet_by_name(&mut self, name: &str) {
        let index = self
            .preview
            .as_ref()
            .and_then(|p| p.sheet_names.iter().position(|n| n == name));
        if let Some(index) = index {
            self.select_sheet(index);
        }
    }

    /// 검증 이슈 갱신 (경고/차단 결과만 표시)
    fn refresh_validation_issue(&mut self) {
        self.clear_issues_from(IssueSource::Validation);
        if let Some(text) = self.column_check().and_then(|check| check.describe()) {
            self.push_issue(Issue::validation(text));
        }
    }

    /// 커서 행 삭제
    pub fn delete_cursor_row(&mut self) {
        if !self.phase.is_editable() {
            return;
        }
        let Some(table) = &mut self.table else {
            return;
        };
        let index = table.cursor_row;
        if table.delete_cursor_row().is_some() {
            let text = self
                .i18n()
                .fmt(MessageKey::RowDeletedToast, &[("index", (index + 1).to_string())]);
            self.set_toast(&text);
            self.sync_table_viewport();
        }
    }

    /// 모든 행 삭제 (컬럼 유지)
    pub fn clear_table(&mut self) {
        if !self.phase.is_editable() {
            return;
        }
        let Some(table) = &mut self.table else {
            return;
        };
        let count = table.row_count();
        table.clear_rows();
        let text = self
            .i18n()
            .fmt(MessageKey::TableClearedToast, &[("count", count.to_string())]);
        self.set_toast(&text);
    }

    /// 셀 값 변경
    pub fn edit_cell(&mut self, row: usize, col: usize, text: &str) {
        if !self.phase.is_editable() {
            return;
        }
        let Some(table) = &mut self.table else {
            return;
        };
        let column = table.columns.get(col).cloned().unwrap_or_default();
        if table.set_cell(row, col, text) {
            let toast = self
                .i18n()
                .fmt(MessageKey::CellUpdatedToast, &[("column", column)]);
            self.set_toast(&toast);
        }
    }

    /// 적재 요청 (확인 다이얼로그 표시)
    pub fn request_insert(&mut self) {
        if !self.ensure_idle_worker(WorkerKind::Insert) {
            return;
        }
        if self.preview.is_none() {
            self.set_toast("Preview the file first");
            return;
        }
        if self.result.is_some() {
            self.set_toast("This sheet was already inserted");
            return;
        }
        let Some(table) = &self.table else {
            return;
        };
        if table.is_empty() {
            self.push_issue(Issue::warning("No data to insert. The table is empty."));
            return;
        }
        let rows = table.row_count();
        let sheet = table.sheet_name.clone();

        let check = self.column_check();
        if let Some(check) = check.as_ref().filter(|c| c.is_blocking()) {
            if let Some(text) = check.describe() {
                self.push_issue(Issue::validation(text));
            }
            warn!(sheet = %sheet, "insert blocked by column validation");
            return;
        }
        // 일부 컬럼만 일치하면 확인 문구에 누락 내용을 덧붙임
        let column_warning = check
            .filter(ColumnCheck::is_warning)
            .and_then(|c| c.describe());

        let file = self
            .preview
            .as_ref()
            .map(|p| p.filename.clone())
            .unwrap_or_default();
        let i18n = self.i18n();
        let mut message = i18n.fmt(
            MessageKey::ConfirmInsert,
            &[
                ("rows", format_number_with_commas(rows as u64)),
                ("sheet", sheet),
                ("file", file),
            ],
        );
        if let Some(text) = column_warning {
            message.push_str("\n\n");
            message.push_str(&text);
        }
        self.phase = LoaderPhase::Confirming;
        self.dialog = Some(DialogKind::confirm(
            i18n.tr(TextKey::DialogConfirmInsertTitle),
            message,
        ));
    }

    /// 적재 확정 (워커 시작)
    pub fn confirm_insert(&mut self) {
        if !matches!(self.phase, LoaderPhase::Confirming) || self.is_workflow_busy() {
            return;
        }
        let (Some(preview), Some(table)) = (&self.preview, &self.table) else {
            self.phase = LoaderPhase::Previewed;
            self.dialog = None;
            return;
        };

        let request = InsertRequest {
            filename: preview.filename.clone(),
            sheet_name: table.sheet_name.clone(),
            data: table.rows.clone(),
        };
        let progress = InsertProgress::new(&request.sheet_name, request.data.len());
        info!(
            filename = %request.filename,
            sheet = %request.sheet_name,
            rows = request.data.len(),
            "insert started"
        );

        self.issues.clear();
        self.result = None;
        self.progress = progress.clone();
        self.phase = LoaderPhase::Inserting;
        self.dialog = Some(DialogKind::inserting(progress.clone()));

        let step = Duration::from_millis(self.settings.progress_step_ms);
        let (progress_rx, handle) = spawn_insert_worker(Arc::clone(&self.service), request, step);
        self.worker = Some(LoaderWorkerState {
            kind: WorkerKind::Insert,
            progress_rx,
            join_handle: Some(handle),
            progress,
        });
    }

    /// 적재 취소 (확인 단계에서만)
    pub fn cancel_insert(&mut self) {
        if matches!(self.phase, LoaderPhase::Confirming) {
            self.phase = LoaderPhase::Previewed;
            self.dialog = None;
        }
    }

    fn finish_insert(&mut self, result: Result<InsertResponse>) {
        self.dialog = None;
        match result {
            Ok(response) => {
                if response.progress_steps().is_empty() {
                    self.progress.apply(100.0, Some(response.rows_inserted));
                }
                info!(
                    rows = response.rows_inserted,
                    batch = %response.batch_id,
                    "insert completed"
                );
                let i18n = self.i18n();
                let file = response
                    .filename
                    .clone()
                    .or_else(|| self.preview.as_ref().map(|p| p.filename.clone()))
                    .unwrap_or_default();
                let body = i18n.fmt(
                    MessageKey::ResultBody,
                    &[
                        ("rows", format_number_with_commas(response.rows_inserted as u64)),
                        ("file", file),
                        ("batch", response.batch_id.clone()),
                    ],
                );
                self.dialog = Some(DialogKind::message(i18n.tr(TextKey::DialogResultTitle), body));
                self.result = Some(response);
                self.phase = LoaderPhase::Completed;
            }
            Err(err) => {
                warn!(error = %err, "insert failed");
                self.push_issue(Issue::system(Self::failure_message(INSERT_FALLBACK, &err)));
                self.phase = LoaderPhase::Previewed;
            }
        }
    }

    // === 서버 조회 ===

    /// 헬스체크 (`GET /health`)
    pub fn check_health(&mut self) {
        if !self.ensure_idle_worker(WorkerKind::Health) {
            return;
        }
        self.spawn_worker(WorkerKind::Health, |service| {
            WorkerOutcome::Health(service.health())
        });
    }

    fn finish_health(&mut self, result: Result<HealthStatus>) {
        let i18n = self.i18n();
        match result {
            Ok(health) if health.is_healthy() => {
                self.server_status = ServerIndicator::Up;
                let database = health.database.unwrap_or_else(|| "-".to_string());
                let text = i18n.fmt(MessageKey::ServerHealthyToast, &[("database", database)]);
                self.set_toast(&text);
            }
            Ok(health) => {
                self.server_status = ServerIndicator::Down;
                let text = i18n.fmt(MessageKey::ServerStatusToast, &[("status", health.status)]);
                self.set_toast(&text);
            }
            Err(err) => {
                warn!(error = %err, "health check failed");
                self.server_status = ServerIndicator::Down;
                let text = Self::failure_message(QUERY_FALLBACK, &err);
                self.set_toast(&text);
            }
        }
    }

    /// 서버 통계 (`GET /stats`)
    pub fn show_server_stats(&mut self) {
        if !self.ensure_idle_worker(WorkerKind::Stats) {
            return;
        }
        self.spawn_worker(WorkerKind::Stats, |service| {
            WorkerOutcome::Stats(service.stats())
        });
    }

    /// 적재 이력 (`GET /logs`)
    pub fn show_upload_logs(&mut self) {
        if !self.ensure_idle_worker(WorkerKind::Logs) {
            return;
        }
        self.spawn_worker(WorkerKind::Logs, |service| {
            WorkerOutcome::Logs(service.logs(LIST_LIMIT))
        });
    }

    /// 저장된 레코드 (`GET /records`)
    pub fn show_records(&mut self) {
        if !self.ensure_idle_worker(WorkerKind::Records) {
            return;
        }
        self.spawn_worker(WorkerKind::Records, |service| {
            WorkerOutcome::Records(service.records(LIST_LIMIT))
        });
    }

    /// 시작 시 파일 인자 처리
    pub fn open_initial_file(&mut self, path: &Path) {
        if self.select_file(path.to_path_buf()) {
            self.start_preview();
        }
    }
}

/// 끝난 워커를 슬롯에서 꺼냄
fn take_finished(slot: &mut Option<LoaderWorkerState>) -> Option<LoaderWorkerState> {
    let finished = slot
        .as_ref()
        .and_then(|worker| worker.join_handle.as_ref())
        .is_some_and(JoinHandle::is_finished);
    if finished {
        slot.take()
    } else {
        None
    }
}

/// 적재 이력 한 줄
fn format_log_entry(entry: &ProcessLogEntry) -> String {
    let created = entry
        .created_at
        .as_deref()
        .map(format_server_timestamp)
        .unwrap_or_default();
    format!(
        "#{:<5} {:<9} {}/{}  {}  {}",
        entry.id,
        entry.status,
        format_number_with_commas(entry.success_rows),
        format_number_with_commas(entry.total_rows),
        created,
        entry.filename
    )
}

/// 저장 레코드 한 줄 (데이터는 JSON 한 줄로 축약)
fn format_record(record: &StoredRecord) -> String {
    let created = record
        .created_at
        .as_deref()
        .map(format_server_timestamp)
        .unwrap_or_default();
    let data = crate::utils::formatter::truncate_to_width(&record.data.to_string(), RECORD_DATA_WIDTH);
    format!(
        "#{:<6} {}  {}  [{}]  {}",
        record.id,
        created,
        record.filename,
        record.batch.as_deref().unwrap_or("-"),
        data
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_log_entry() {
        let entry = ProcessLogEntry {
            id: 7,
            filename: "ventas.xlsx".to_string(),
            status: "success".to_string(),
            total_rows: 1200,
            success_rows: 1200,
            created_at: None,
        };
        let line = format_log_entry(&entry);
        assert!(line.starts_with("#7"));
        assert!(line.contains("1,200/1,200"));
        assert!(line.ends_with("ventas.xlsx"));
    }

    #[test]
    fn test_format_record_truncates_data() {
        let record = StoredRecord {
            id: 3,
            filename: "ventas.xlsx".to_string(),
            batch: Some("a1b2c3d4".to_string()),
            data: json!({"descripcion": "x".repeat(200)}),
            created_at: None,
        };
        let line = format_record(&record);
        assert!(line.contains("[a1b2c3d4]"));
        assert!(line.ends_with('…'));
    }
}
