use super::super::*;

pub(in crate::app) fn execute(app: &mut App, action: Action) {
    match action {
        Action::ShowHelp => app.show_help(),
        Action::CheckHealth => app.check_health(),
        Action::ShowServerStats => app.show_server_stats(),
        Action::ShowUploadLogs => app.show_upload_logs(),
        Action::ShowRecords => app.show_records(),
        Action::CycleTheme => app.cycle_theme(),
        Action::ToggleLanguage => app.toggle_language(),
        _ => unreachable!("non-dialog action: {:?}", action),
    }
}
