use super::*;
use crate::models::{
    HealthStatus, InsertRequest, ProcessLogEntry, ProgressUpdate, Row, ServerStats, SheetData,
    StoredRecord,
};
use crate::ui::ListKind;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// 테스트용 적재 서버
///
/// 응답은 미리 정해 두고, 호출과 적재 요청 본문을 기록한다.
struct FakeService {
    preview: std::result::Result<PreviewResponse, String>,
    insert: std::result::Result<InsertResponse, String>,
    health: Option<&'static str>,
    /// 미리보기 응답 전 대기 (동시 요청 테스트용)
    preview_delay: Duration,
    /// 헬스체크 응답 전 대기 (응답 없는 서버 흉내)
    health_delay: Duration,
    panic_on_records: bool,
    calls: Mutex<Vec<&'static str>>,
    inserted: Mutex<Vec<InsertRequest>>,
}

impl FakeService {
    fn new(preview: PreviewResponse) -> Self {
        Self {
            preview: Ok(preview),
            insert: Ok(insert_response(3, &[34, 67, 100])),
            health: Some("healthy"),
            preview_delay: Duration::ZERO,
            health_delay: Duration::ZERO,
            panic_on_records: false,
            calls: Mutex::new(Vec::new()),
            inserted: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn server_error(detail: &str) -> LoaderError {
        LoaderError::Server {
            status: 400,
            detail: detail.to_string(),
        }
    }
}

impl LoaderService for FakeService {
    fn preview(&self, _path: &Path) -> Result<PreviewResponse> {
        self.record("preview");
        if !self.preview_delay.is_zero() {
            std::thread::sleep(self.preview_delay);
        }
        self.preview.clone().map_err(|d| Self::server_error(&d))
    }

    fn insert(&self, request: &InsertRequest) -> Result<InsertResponse> {
        self.record("insert");
        self.inserted.lock().unwrap().push(request.clone());
        self.insert.clone().map_err(|d| Self::server_error(&d))
    }

    fn health(&self) -> Result<HealthStatus> {
        self.record("health");
        if !self.health_delay.is_zero() {
            std::thread::sleep(self.health_delay);
        }
        match self.health {
            Some(status) => Ok(HealthStatus {
                status: status.to_string(),
                service: None,
                database: Some("connected".to_string()),
            }),
            None => Err(LoaderError::Config("connection refused".to_string())),
        }
    }

    fn stats(&self) -> Result<ServerStats> {
        self.record("stats");
        Ok(ServerStats {
            total_records_stored: 10,
            total_uploads: 2,
            successful_uploads: 2,
            failed_uploads: 0,
            api_version: None,
        })
    }

    fn logs(&self, _limit: usize) -> Result<Vec<ProcessLogEntry>> {
        self.record("logs");
        Ok(vec![ProcessLogEntry {
            id: 1,
            filename: "ventas.xlsx".to_string(),
            status: "success".to_string(),
            total_rows: 3,
            success_rows: 3,
            created_at: None,
        }])
    }

    fn records(&self, _limit: usize) -> Result<Vec<StoredRecord>> {
        self.record("records");
        if self.panic_on_records {
            panic!("records backend exploded");
        }
        Ok(Vec::new())
    }
}

fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn sheet(columns: &[&str], rows: Vec<Row>) -> SheetData {
    SheetData {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        total_rows: rows.len(),
        is_empty: rows.is_empty(),
        preview_data: rows,
    }
}

/// "Ventas" (3행) + "Clientes" (1행) + "Vacía" (빈 시트)
fn sample_preview() -> PreviewResponse {
    let ventas = sheet(
        &["Producto", "Cantidad"],
        vec![
            row(&[("Producto", json!("Café")), ("Cantidad", json!(12))]),
            row(&[("Producto", json!("Té")), ("Cantidad", json!(5))]),
            row(&[("Producto", json!("Mate")), ("Cantidad", Value::Null)]),
        ],
    );
    let clientes = sheet(
        &["Nombre", "Ciudad"],
        vec![row(&[("Nombre", json!("Ana")), ("Ciudad", json!("Lima"))])],
    );
    let mut sheets_data = HashMap::new();
    sheets_data.insert("Ventas".to_string(), ventas);
    sheets_data.insert("Clientes".to_string(), clientes);
    sheets_data.insert("Vacía".to_string(), sheet(&[], Vec::new()));
    PreviewResponse {
        filename: "ventas.xlsx".to_string(),
        sheet_names: vec![
            "Ventas".to_string(),
            "Clientes".to_string(),
            "Vacía".to_string(),
        ],
        total_sheets: 3,
        sheets_data,
    }
}

fn insert_response(rows: usize, steps: &[u8]) -> InsertResponse {
    InsertResponse {
        rows_inserted: rows,
        batch_id: "b7c1e2aa".to_string(),
        filename: Some("ventas.xlsx".to_string()),
        progress_updates: Some(
            steps
                .iter()
                .map(|pct| ProgressUpdate {
                    percentage: f64::from(*pct),
                    rows_done: None,
                    timestamp: None,
                })
                .collect(),
        ),
    }
}

fn make_test_app(service: FakeService) -> (App, Arc<FakeService>) {
    let service = Arc::new(service);
    let app = App::new_for_test(Arc::clone(&service) as Arc<dyn LoaderService>);
    (app, service)
}

fn write_workbook(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, b"PK\x03\x04").unwrap();
    path
}

fn run_worker_until_done(app: &mut App) {
    let mut guard = 0usize;
    while app.is_busy() && guard < 5_000 {
        app.process_worker_events();
        std::thread::sleep(Duration::from_millis(1));
        guard += 1;
    }
    assert!(guard < 5_000, "worker loop guard exceeded");
}

/// 파일 선택 + 미리보기 완료까지
fn previewed_app(service: FakeService) -> (App, Arc<FakeService>, TempDir) {
    let temp = TempDir::new().unwrap();
    let (mut app, service) = make_test_app(service);
    let path = write_workbook(&temp, "ventas.xlsx");
    app.open_initial_file(&path);
    run_worker_until_done(&mut app);
    (app, service, temp)
}

// === 파일 선택 ===

#[test]
fn test_select_file_rejects_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let (mut app, service) = make_test_app(FakeService::new(sample_preview()));
    let path = temp.path().join("ventas.csv");
    fs::write(&path, b"a,b").unwrap();

    assert!(!app.select_file(path));
    assert_eq!(app.phase, LoaderPhase::Idle);
    assert!(app.source_file.is_none());
    assert_eq!(app.issues.len(), 1);
    assert_eq!(app.issues[0].source, IssueSource::System);
    assert!(service.calls().is_empty());
}

#[test]
fn test_select_file_resets_previous_state() {
    let (mut app, _service, temp) = previewed_app(FakeService::new(sample_preview()));
    assert!(app.preview.is_some());

    let other = write_workbook(&temp, "clientes.xls");
    assert!(app.select_file(other.clone()));
    assert_eq!(app.phase, LoaderPhase::FileSelected);
    assert_eq!(app.source_file.as_deref(), Some(other.as_path()));
    assert!(app.preview.is_none());
    assert!(app.table.is_none());
    assert!(app.selected_sheet.is_none());
    assert_eq!(app.settings.last_directory.as_deref(), Some(temp.path()));
}

// === 미리보기 ===

#[test]
fn test_preview_selects_first_sheet_and_warns_about_empty_sheet() {
    let (app, service, _temp) = previewed_app(FakeService::new(sample_preview()));

    assert_eq!(service.calls(), vec!["preview"]);
    assert_eq!(app.phase, LoaderPhase::Previewed);
    assert_eq!(app.selected_sheet_name(), Some("Ventas"));
    assert_eq!(app.table.as_ref().map(TableState::row_count), Some(3));
    assert!(app.dialog.is_none());
    assert!(app
        .issues
        .iter()
        .any(|i| i.source == IssueSource::Warning && i.message.contains("empty")));
}

#[test]
fn test_preview_failure_shows_server_detail() {
    let mut service = FakeService::new(sample_preview());
    service.preview = Err("Only Excel files are allowed".to_string());
    let (app, _service, _temp) = previewed_app(service);

    assert_eq!(app.phase, LoaderPhase::FileSelected);
    assert!(app.preview.is_none());
    assert_eq!(
        app.issues.last().map(|i| i.message.as_str()),
        Some("Only Excel files are allowed")
    );
    assert!(app.can_preview());
}

#[test]
fn test_second_request_rejected_while_busy() {
    let mut service = FakeService::new(sample_preview());
    service.preview_delay = Duration::from_millis(150);
    let temp = TempDir::new().unwrap();
    let (mut app, service) = make_test_app(service);
    app.open_initial_file(&write_workbook(&temp, "ventas.xlsx"));

    assert!(app.is_busy());
    assert_eq!(app.phase, LoaderPhase::Previewing);
    app.close_dialog();
    app.open_file_dialog();
    assert_eq!(app.toast_display(), Some("Another request is still running"));

    // 진행률 다이얼로그는 닫히지 않음
    app.close_dialog();
    assert!(app.dialog.as_ref().is_some_and(DialogKind::is_blocking));

    run_worker_until_done(&mut app);
    assert_eq!(service.calls(), vec!["preview"]);
}

#[test]
fn test_slow_health_check_does_not_block_file_selection() {
    let mut service = FakeService::new(sample_preview());
    service.health_delay = Duration::from_millis(300);
    let temp = TempDir::new().unwrap();
    let (mut app, service) = make_test_app(service);

    app.check_health();
    assert!(app.is_query_busy());
    assert!(!app.is_workflow_busy());

    assert!(app.select_file(write_workbook(&temp, "ventas.xlsx")));
    assert_eq!(app.phase, LoaderPhase::FileSelected);
    assert!(app.can_preview());
    app.start_preview();
    assert_eq!(app.phase, LoaderPhase::Previewing);

    // 헬스체크가 같은 슬롯에서 두 번 돌지는 않음
    app.check_health();
    assert_eq!(app.toast_display(), Some("Another request is still running"));

    run_worker_until_done(&mut app);
    assert_eq!(app.phase, LoaderPhase::Previewed);
    assert_eq!(app.server_status, ServerIndicator::Up);
    let mut calls = service.calls();
    calls.sort();
    assert_eq!(calls, vec!["health", "preview"]);
}

#[test]
fn test_query_result_does_not_replace_open_dialog() {
    let (mut app, _service) = make_test_app(FakeService::new(sample_preview()));
    app.show_server_stats();
    app.open_file_dialog();
    run_worker_until_done(&mut app);

    assert!(matches!(app.dialog, Some(DialogKind::Input { .. })));
}

// === 시트/테이블 편집 ===

#[test]
fn test_select_sheet_discards_edits_and_result() {
    let (mut app, _service, _temp) = previewed_app(FakeService::new(sample_preview()));
    app.execute_action(Action::DeleteRow);
    assert_eq!(app.table.as_ref().map(TableState::row_count), Some(2));
    app.result = Some(insert_response(2, &[]));

    app.select_sheet_by_name("Clientes");
    assert_eq!(app.selected_sheet, Some(1));
    assert!(app.result.is_none());
    let table = app.table.as_ref().unwrap();
    assert_eq!(table.columns, vec!["Nombre".to_string(), "Ciudad".to_string()]);
    assert_eq!(table.row_count(), 1);

    app.select_sheet(0);
    assert_eq!(app.table.as_ref().map(TableState::row_count), Some(3));
}

#[test]
fn test_next_sheet_wraps_around() {
    let (mut app, _service, _temp) = previewed_app(FakeService::new(sample_preview()));
    app.execute_action(Action::PrevSheet);
    assert_eq!(app.selected_sheet_name(), Some("Vacía"));
    app.execute_action(Action::NextSheet);
    assert_eq!(app.selected_sheet_name(), Some("Ventas"));
}

#[test]
fn test_edit_cell_keeps_number_type() {
    let (mut app, _service, _temp) = previewed_app(FakeService::new(sample_preview()));
    app.edit_cell(0, 1, "15");
    app.edit_cell(1, 0, "Té verde");

    let table = app.table.as_ref().unwrap();
    assert_eq!(table.cell_value(0, 1), Some(&json!(15)));
    assert_eq!(table.cell_text(1, 0), "Té verde");
    assert_eq!(app.toast_display(), Some("Cell updated: Producto"));
}

#[test]
fn test_edit_cell_dialog_flow() {
    let (mut app, _service, _temp) = previewed_app(FakeService::new(sample_preview()));
    app.execute_action(Action::MoveDown);
    app.execute_action(Action::EditCell);
    assert_eq!(app.get_dialog_input_value().as_deref(), Some("Té"));

    app.dialog_input_end();
    app.dialog_input_char('!');
    let value = app.get_dialog_input_value().unwrap();
    app.confirm_input_dialog(value);

    assert!(app.dialog.is_none());
    assert_eq!(app.table.as_ref().unwrap().cell_text(1, 0), "Té!");
}

#[test]
fn test_clear_table_keeps_columns() {
    let (mut app, _service, _temp) = previewed_app(FakeService::new(sample_preview()));
    app.execute_action(Action::ClearTable);
    let table = app.table.as_ref().unwrap();
    assert!(table.is_empty());
    assert_eq!(table.column_count(), 2);
    assert!(!app.can_insert());
}

// === 적재 ===

#[test]
fn test_insert_rejected_for_empty_table() {
    let (mut app, service, _temp) = previewed_app(FakeService::new(sample_preview()));
    app.clear_table();
    app.request_insert();

    assert_eq!(app.phase, LoaderPhase::Previewed);
    assert!(app.dialog.is_none());
    assert!(app
        .issues
        .iter()
        .any(|i| i.message == "No data to insert. The table is empty."));
    assert!(!service.calls().contains(&"insert"));
}

#[test]
fn test_insert_blocked_when_no_expected_column_matches() {
    let (mut app, service, _temp) = previewed_app(FakeService::new(sample_preview()));
    app.settings.expected_columns = vec!["Fecha".to_string(), "Monto".to_string()];
    app.request_insert();

    assert!(app.dialog.is_none());
    assert!(app
        .issues
        .iter()
        .any(|i| i.source == IssueSource::Validation));
    assert!(!service.calls().contains(&"insert"));
}

#[test]
fn test_insert_allowed_with_partial_column_match() {
    let (mut app, _service, _temp) = previewed_app(FakeService::new(sample_preview()));
    app.settings.expected_columns = vec!["producto ".to_string(), "Precio".to_string()];
    app.request_insert();

    assert_eq!(app.phase, LoaderPhase::Confirming);
    match &app.dialog {
        Some(DialogKind::Confirm { message, .. }) => {
            assert!(message.contains("Missing: Precio"));
        }
        other => panic!("unexpected dialog: {:?}", other),
    }
}

#[test]
fn test_cancel_insert_returns_to_preview() {
    let (mut app, service, _temp) = previewed_app(FakeService::new(sample_preview()));
    app.request_insert();
    assert_eq!(app.phase, LoaderPhase::Confirming);

    app.dialog_confirm_toggle();
    app.confirm_confirm_dialog();
    assert_eq!(app.phase, LoaderPhase::Previewed);
    assert!(app.dialog.is_none());
    assert!(!service.calls().contains(&"insert"));
}

#[test]
fn test_insert_sends_edited_rows_and_shows_result() {
    let (mut app, service, _temp) = previewed_app(FakeService::new(sample_preview()));
    if let Some(table) = app.table.as_mut() {
        table.cursor_row = 2;
    }
    app.delete_cursor_row();
    app.request_insert();
    app.confirm_confirm_dialog();
    assert_eq!(app.phase, LoaderPhase::Inserting);
    run_worker_until_done(&mut app);

    let inserted = service.inserted.lock().unwrap().clone();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].filename, "ventas.xlsx");
    assert_eq!(inserted[0].sheet_name, "Ventas");
    assert_eq!(inserted[0].data.len(), 2);

    assert_eq!(app.phase, LoaderPhase::Completed);
    assert_eq!(app.progress.percentage, 100);
    assert!(matches!(app.dialog, Some(DialogKind::Message { .. })));
    assert_eq!(app.result.as_ref().map(|r| r.rows_inserted), Some(3));
    assert_eq!(
        app.result.as_ref().map(|r| r.batch_id.as_str()),
        Some("b7c1e2aa")
    );

    // 같은 시트 재적재 불가
    app.request_insert();
    assert_eq!(app.phase, LoaderPhase::Completed);
    assert_eq!(service.inserted.lock().unwrap().len(), 1);
}

#[test]
fn test_insert_without_progress_updates_completes_at_100() {
    let mut service = FakeService::new(sample_preview());
    service.insert = Ok(InsertResponse {
        progress_updates: None,
        ..insert_response(3, &[])
    });
    let (mut app, _service, _temp) = previewed_app(service);
    app.request_insert();
    app.confirm_insert();
    run_worker_until_done(&mut app);

    assert_eq!(app.progress.percentage, 100);
    assert_eq!(app.phase, LoaderPhase::Completed);
}

#[test]
fn test_insert_failure_keeps_table() {
    let mut service = FakeService::new(sample_preview());
    service.insert = Err("Database error".to_string());
    let (mut app, _service, _temp) = previewed_app(service);
    app.request_insert();
    app.confirm_insert();
    run_worker_until_done(&mut app);

    assert_eq!(app.phase, LoaderPhase::Previewed);
    assert!(app.result.is_none());
    assert_eq!(app.table.as_ref().map(TableState::row_count), Some(3));
    assert_eq!(
        app.issues.last().map(|i| i.message.as_str()),
        Some("Database error")
    );
    assert!(app.can_insert());
}

#[test]
fn test_insert_worker_replays_progress_in_order() {
    let service: Arc<dyn LoaderService> = Arc::new(FakeService {
        insert: Ok(insert_response(10, &[10, 40, 70, 100])),
        ..FakeService::new(sample_preview())
    });
    let request = InsertRequest {
        filename: "ventas.xlsx".to_string(),
        sheet_name: "Ventas".to_string(),
        data: Vec::new(),
    };
    let (rx, handle) = workflow::spawn_insert_worker(service, request, Duration::ZERO);
    let outcome = handle.join().unwrap();
    let seen: Vec<f64> = rx.try_iter().map(|u| u.percentage).collect();

    assert_eq!(seen, vec![10.0, 40.0, 70.0, 100.0]);
    assert!(matches!(
        outcome,
        workflow::WorkerOutcome::Insert(Ok(ref r)) if r.rows_inserted == 10
    ));
}

// === 서버 조회 ===

#[test]
fn test_health_check_sets_indicator() {
    let (mut app, _service) = make_test_app(FakeService::new(sample_preview()));
    app.execute_action(Action::CheckHealth);
    run_worker_until_done(&mut app);
    assert_eq!(app.server_status, ServerIndicator::Up);

    let mut service = FakeService::new(sample_preview());
    service.health = None;
    let (mut app, _service) = make_test_app(service);
    app.check_health();
    run_worker_until_done(&mut app);
    assert_eq!(app.server_status, ServerIndicator::Down);
    assert!(app.issues.is_empty());
}

#[test]
fn test_worker_panic_shows_error_dialog() {
    let mut service = FakeService::new(sample_preview());
    service.panic_on_records = true;
    let (mut app, _service) = make_test_app(service);
    app.execute_action(Action::ShowRecords);
    run_worker_until_done(&mut app);

    assert!(!app.is_busy());
    match &app.dialog {
        Some(DialogKind::Error { title, message }) => {
            assert_eq!(title, "Error");
            assert!(message.contains("panicked"));
        }
        other => panic!("unexpected dialog: {:?}", other),
    }
}

#[test]
fn test_upload_logs_open_list_dialog() {
    let (mut app, service) = make_test_app(FakeService::new(sample_preview()));
    app.execute_action(Action::ShowUploadLogs);
    run_worker_until_done(&mut app);

    assert_eq!(service.calls(), vec!["logs"]);
    match &app.dialog {
        Some(DialogKind::List { kind, items, .. }) => {
            assert_eq!(*kind, ListKind::UploadLogs);
            assert_eq!(items.len(), 1);
        }
        other => panic!("unexpected dialog: {:?}", other),
    }
    app.dialog_list_next();
    app.close_dialog();
    assert!(app.dialog.is_none());
}

// === 입력 다이얼로그 ===

#[test]
fn test_open_file_dialog_completion_and_confirm() {
    let temp = TempDir::new().unwrap();
    write_workbook(&temp, "ventas.xlsx");
    write_workbook(&temp, "ventas_2023.xlsx");
    fs::write(temp.path().join("ventas.txt"), b"x").unwrap();

    let (mut app, service) = make_test_app(FakeService::new(sample_preview()));
    app.settings.last_directory = Some(temp.path().to_path_buf());
    app.execute_action(Action::OpenFile);
    for c in "ven".chars() {
        app.dialog_input_char(c);
    }
    assert!(app.has_input_completions());

    app.dialog_input_cycle_completion_next();
    assert_eq!(app.get_dialog_input_value().as_deref(), Some("ventas.xlsx"));
    app.dialog_input_cycle_completion_next();
    assert_eq!(
        app.get_dialog_input_value().as_deref(),
        Some("ventas_2023.xlsx")
    );
    app.dialog_input_cycle_completion_prev();
    assert_eq!(app.get_dialog_input_value().as_deref(), Some("ventas.xlsx"));

    let value = app.get_dialog_input_value().unwrap();
    app.confirm_input_dialog(value);
    run_worker_until_done(&mut app);

    assert_eq!(service.calls(), vec!["preview"]);
    assert_eq!(app.phase, LoaderPhase::Previewed);
    assert_eq!(app.source_file_name().as_deref(), Some("ventas.xlsx"));
}

#[test]
fn test_help_scroll_is_clamped() {
    let (mut app, _service) = make_test_app(FakeService::new(sample_preview()));
    app.execute_action(Action::ShowHelp);
    app.dialog_help_scroll_up();
    for _ in 0..500 {
        app.dialog_help_scroll_down();
    }
    let Some(DialogKind::Help { scroll_offset }) = app.dialog else {
        panic!("help dialog expected");
    };
    assert!(scroll_offset > 0 && scroll_offset < 500);
}

// === 이슈/설정 ===

#[test]
fn test_dismiss_issues() {
    let (mut app, _service) = make_test_app(FakeService::new(sample_preview()));
    app.push_issue(Issue::system("Error contacting server"));
    app.push_issue(Issue::system("Error contacting server"));
    assert_eq!(app.issues.len(), 1);
    app.execute_action(Action::DismissIssues);
    assert!(app.issues.is_empty());
}

#[test]
fn test_quit_saves_theme_and_language() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    let service: Arc<dyn LoaderService> = Arc::new(FakeService::new(sample_preview()));
    let mut app = App::new(Settings::default(), Some(config_path.clone()), service);

    app.execute_action(Action::ToggleLanguage);
    assert_eq!(app.language(), Language::Spanish);
    app.execute_action(Action::Quit);
    assert!(app.should_quit());

    let saved = Settings::load(&config_path);
    assert_eq!(saved.language, "es");
    assert_eq!(saved.theme, app.theme_manager.current_name());
}
