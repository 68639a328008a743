use super::super::*;

pub(in crate::app) fn execute(app: &mut App, action: Action) {
    match action {
        Action::NextSheet => step_sheet(app, true),
        Action::PrevSheet => step_sheet(app, false),
        _ => {
            let page = app.layout.table_visible_rows().max(1);
            let Some(table) = &mut app.table else {
                return;
            };
            match action {
                Action::MoveUp => table.move_up(),
                Action::MoveDown => table.move_down(),
                Action::MoveLeft => table.move_left(),
                Action::MoveRight => table.move_right(),
                Action::GoToTop => table.move_top(),
                Action::GoToBottom => table.move_bottom(),
                Action::PageUp => table.page_up(page),
                Action::PageDown => table.page_down(page),
                _ => unreachable!("non-table action: {:?}", action),
            }
            app.sync_table_viewport();
        }
    }
}

/// 이전/다음 시트 (양 끝에서 순환)
fn step_sheet(app: &mut App, forward: bool) {
    let Some(count) = app.preview.as_ref().map(|p| p.sheet_names.len()) else {
        return;
    };
    if count == 0 {
        return;
    }
    let current = app.selected_sheet.unwrap_or(0);
    let next = if forward {
        (current + 1) % count
    } else {
        (current + count - 1) % count
    };
    if Some(next) != app.selected_sheet {
        app.select_sheet(next);
    }
}
