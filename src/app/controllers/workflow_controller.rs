use super::super::*;

pub(in crate::app) fn execute(app: &mut App, action: Action) {
    match action {
        Action::OpenFile => app.open_file_dialog(),
        Action::Preview => {
            if app.can_preview() {
                app.start_preview();
            }
        }
        Action::Insert => app.request_insert(),
        Action::EditCell => app.open_edit_cell_dialog(),
        Action::DeleteRow => app.delete_cursor_row(),
        Action::ClearTable => app.clear_table(),
        Action::NextChartColumn => {
            let columns = app.table.as_ref().map_or(0, |t| t.column_count());
            if columns > 0 {
                app.chart_column = (app.chart_column + 1) % columns;
            }
        }
        Action::DismissIssues => app.issues.clear(),
        _ => unreachable!("non-workflow action: {:?}", action),
    }
}
