use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use excel_loader::app::App;
use excel_loader::core::actions::{find_action, generate_command_bar_items, Action};
use excel_loader::system::{HttpLoaderService, Settings};
use excel_loader::ui::{
    self, localize_runtime_text, CommandBar, DataTable, Dialog, DialogKind, HeaderBar, IssuePanel,
    LayoutMode, SheetTab, SheetTabs, StatusBar, SummaryPanel, TextKey, WarningScreen,
};
use excel_loader::utils::formatter::format_file_size;
use excel_loader::utils::logging::{default_log_path, init_file_logging};
use excel_loader::utils::path_display::display_path;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 엑셀 파일을 미리보고 편집해 적재 서버로 보내는 터미널 클라이언트
#[derive(Debug, Parser)]
#[command(name = "excel-loader", version, about)]
struct Cli {
    /// 시작하자마자 미리볼 엑셀 파일
    file: Option<PathBuf>,

    /// 적재 서버 주소 (설정 파일 값보다 우선)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// 설정 파일 경로
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// 로그 파일 경로
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// 검증용 기대 컬럼 (쉼표 구분)
    #[arg(long, value_name = "a,b,c")]
    expected_columns: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 로그는 파일로만 (실패해도 계속)
    if let Some(log_path) = cli.log_file.clone().or_else(default_log_path) {
        if let Err(err) = init_file_logging(&log_path) {
            eprintln!("warning: logging disabled ({}): {}", log_path.display(), err);
        }
    }

    let settings_path = cli.config.clone().or_else(Settings::default_path);
    let mut settings = settings_path
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(server) = &cli.server {
        settings.server_url = server.trim().to_string();
    }
    if let Some(columns) = &cli.expected_columns {
        settings.expected_columns = Settings::parse_column_list(columns);
    }

    let service = HttpLoaderService::new(
        settings.server_url.clone(),
        Duration::from_secs(settings.request_timeout_secs),
    )
    .context("failed to build HTTP client")?;
    info!(server = %settings.server_url, "starting");

    let mut app = App::new(settings, settings_path, Arc::new(service));
    match &cli.file {
        Some(path) => app.open_initial_file(path),
        None => app.check_health(),
    }

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        warn!(error = %err, "terminal loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.process_worker_events();
        app.clear_expired_toast();

        terminal.draw(|f| {
            let size = f.area();

            // 레이아웃 업데이트
            app.layout.update(size, app.issues.len());
            app.sync_table_viewport();

            match app.layout.mode() {
                LayoutMode::TooSmall => {
                    let (width, height) = app.layout.terminal_size();
                    let warning = WarningScreen::new()
                        .current_size(width, height)
                        .language(app.language())
                        .theme(app.theme_manager.current());
                    f.render_widget(warning, size);
                }
                LayoutMode::Wide | LayoutMode::Narrow => {
                    render_main_ui(f, app);
                }
            }
        })?;

        // 요청 진행 중에는 진행률 갱신을 위해 짧게 대기
        let poll_timeout = if app.is_busy() {
            Duration::from_millis(30)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.is_dialog_active() {
                        handle_dialog_keys(app, key.modifiers, key.code);
                    } else {
                        handle_normal_keys(app, key.modifiers, key.code);
                    }
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// 일반 모드 키 처리 (액션 레지스트리 기반)
fn handle_normal_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    if app.layout.is_too_small() && !matches!(find_action(modifiers, code), Some(Action::Quit)) {
        return;
    }
    if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}

/// 다이얼로그 모드 키 처리
fn handle_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    let dialog_kind = match &app.dialog {
        Some(kind) => kind.clone(),
        None => return,
    };

    match dialog_kind {
        DialogKind::Input { .. } => handle_input_dialog_keys(app, modifiers, code),
        DialogKind::Confirm { .. } => handle_confirm_dialog_keys(app, modifiers, code),
        // 진행 중인 요청은 취소할 수 없음
        DialogKind::Progress { .. } => {}
        DialogKind::Error { .. } | DialogKind::Message { .. } | DialogKind::Stats { .. } => {
            handle_message_dialog_keys(app, code)
        }
        DialogKind::List { .. } => handle_list_dialog_keys(app, code),
        DialogKind::Help { .. } => handle_help_dialog_keys(app, code),
    }
}

/// 입력 다이얼로그 키 처리
fn handle_input_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match (modifiers, code) {
        // 확인 (선택된 버튼에 따라 동작)
        (_, KeyCode::Enter) => {
            let selected_button = app.get_dialog_input_selected_button().unwrap_or(0);
            if selected_button == 0 {
                if let Some(value) = app.get_dialog_input_value() {
                    app.confirm_input_dialog(value);
                }
            } else {
                app.close_dialog();
            }
        }
        (_, KeyCode::Esc) => app.close_dialog(),
        // 추천이 있으면 순환, 없으면 버튼 전환
        (KeyModifiers::NONE, KeyCode::Tab) => {
            if app.has_input_completions() {
                app.dialog_input_cycle_completion_next();
            } else {
                app.dialog_input_toggle_button();
            }
        }
        (_, KeyCode::BackTab) => {
            if app.has_input_completions() {
                app.dialog_input_cycle_completion_prev();
            } else {
                app.dialog_input_toggle_button();
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.dialog_input_delete_prev_word(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.dialog_input_clear(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => app.dialog_input_char(c),
        (_, KeyCode::Backspace) => app.dialog_input_backspace(),
        (_, KeyCode::Delete) => app.dialog_input_delete(),
        (_, KeyCode::Left) => app.dialog_input_left(),
        (_, KeyCode::Right) => app.dialog_input_right(),
        (_, KeyCode::Home) => app.dialog_input_home(),
        (_, KeyCode::End) => app.dialog_input_end(),
        _ => {}
    }
}

/// 확인 다이얼로그 키 처리
fn handle_confirm_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match (modifiers, code) {
        (KeyModifiers::NONE, KeyCode::Tab)
        | (_, KeyCode::BackTab)
        | (_, KeyCode::Left)
        | (_, KeyCode::Right) => app.dialog_confirm_toggle(),
        (_, KeyCode::Enter) => app.confirm_confirm_dialog(),
        (_, KeyCode::Esc) => app.close_dialog(),
        _ => {}
    }
}

/// 메시지/에러/통계 다이얼로그 키 처리
fn handle_message_dialog_keys(app: &mut App, code: KeyCode) {
    if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.close_dialog();
    }
}

/// 목록 다이얼로그 키 처리
fn handle_list_dialog_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_dialog(),
        KeyCode::Char('j') | KeyCode::Down => app.dialog_list_next(),
        KeyCode::Char('k') | KeyCode::Up => app.dialog_list_prev(),
        _ => {}
    }
}

/// 도움말 다이얼로그 키 처리
fn handle_help_dialog_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => app.close_dialog(),
        KeyCode::Char('j') | KeyCode::Down => app.dialog_help_scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.dialog_help_scroll_up(),
        _ => {}
    }
}

/// 헤더 (파일 경로/크기, 서버 주소)
fn render_header(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, area: Rect) {
    let file = app
        .source_file
        .as_deref()
        .map(|path| display_path(path, (area.width / 2) as usize));
    let size = app.source_size.map(format_file_size);
    let header = HeaderBar::new()
        .file(file.as_deref(), size.as_deref())
        .server_url(app.server_url())
        .language(app.language())
        .theme(theme);
    f.render_widget(header, area);
}

/// 시트 탭 (미리보기 후에만)
fn render_sheet_tabs(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, area: Rect) {
    let tabs: Vec<SheetTab> = app
        .preview
        .as_ref()
        .map(|preview| {
            preview
                .sheet_names
                .iter()
                .map(|name| {
                    let sheet = preview.sheet(name);
                    SheetTab {
                        name: name.as_str(),
                        rows: sheet.map_or(0, |s| s.total_rows),
                        is_empty: sheet.map_or(true, |s| s.is_empty),
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    let active = app.selected_sheet.unwrap_or(0);
    let widget = SheetTabs::new(tabs, active)
        .language(app.language())
        .theme(theme);
    f.render_widget(widget, area);
}

/// 상태바 데이터 수집 + 렌더링
fn render_status_bar(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, area: Rect) {
    let i18n = app.i18n();
    let (rows, columns) = app
        .table
        .as_ref()
        .map_or((0, 0), |t| (t.row_count(), t.column_count()));
    let toast = app
        .toast_display()
        .map(|text| localize_runtime_text(app.language(), text));
    let status_bar = StatusBar::new()
        .table_info(app.selected_sheet_name(), rows, columns)
        .phase_label(i18n.phase_label(app.phase.id()))
        .server(app.server_status)
        .toast(toast.as_deref())
        .language(app.language())
        .theme(theme);
    f.render_widget(status_bar, area);
}

/// 커맨드바 (현재 단계에서 가능한 명령만 강조)
fn render_command_bar(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, area: Rect) {
    let editable = app.phase.is_editable() && app.table.is_some();
    let items = generate_command_bar_items(app.language(), |action| match action {
        Action::OpenFile => !app.is_workflow_busy(),
        Action::Preview => app.can_preview(),
        Action::Insert => app.can_insert(),
        Action::EditCell | Action::DeleteRow | Action::ClearTable => {
            editable && app.table.as_ref().is_some_and(|t| !t.is_empty())
        }
        Action::NextSheet | Action::PrevSheet => {
            app.preview.is_some() && !app.is_workflow_busy()
        }
        Action::CheckHealth
        | Action::ShowServerStats
        | Action::ShowUploadLogs
        | Action::ShowRecords => !app.is_query_busy(),
        _ => true,
    });
    let command_bar = CommandBar::new().commands(items).theme(theme);
    f.render_widget(command_bar, area);
}

/// 메인 UI 렌더링
fn render_main_ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let areas = app.layout.areas();
    let theme = app.theme_manager.current();
    let language = app.language();
    let i18n = app.i18n();

    render_header(f, app, theme, areas.header);
    render_sheet_tabs(f, app, theme, areas.sheet_tabs);

    let title = app
        .selected_sheet_name()
        .unwrap_or_else(|| i18n.tr(TextKey::PanelData));
    let table = DataTable::new()
        .title(title)
        .table(app.table.as_ref())
        .focused(!app.is_dialog_active())
        .language(language)
        .theme(theme);
    f.render_widget(table, areas.table);

    let check = app.column_check();
    let chart = app.chart();
    let summary = SummaryPanel::new()
        .table(app.table.as_ref())
        .sheet_total_rows(app.selected_sheet_total_rows())
        .check(check.as_ref())
        .chart(chart.as_ref())
        .result(app.result.as_ref())
        .language(language)
        .theme(theme);
    f.render_widget(summary, areas.summary);

    if areas.issues.height > 0 {
        let issues = IssuePanel::new(&app.issues)
            .language(language)
            .theme(theme);
        f.render_widget(issues, areas.issues);
    }

    render_status_bar(f, app, theme, areas.status_bar);
    render_command_bar(f, app, theme, areas.command_bar);

    if let Some(ref dialog_kind) = app.dialog {
        let dialog = Dialog::new(dialog_kind).language(language).theme(theme);
        f.render_widget(dialog, f.area());
    }
}
