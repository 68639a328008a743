use super::text_edit::TextBufferEdit;
use super::*;
use crate::core::actions::generate_help_entries;
use crate::system::complete_path;

impl App {
    // === 입력 다이얼로그 ===

    /// 입력 다이얼로그: 문자 입력
    pub fn dialog_input_char(&mut self, c: char) {
        if let Some(DialogKind::Input {
            value, cursor_pos, ..
        }) = &mut self.dialog
        {
            TextBufferEdit::insert_char(value, cursor_pos, c);
        }
        self.update_input_completion_state();
    }

    /// 입력 다이얼로그: 백스페이스
    pub fn dialog_input_backspace(&mut self) {
        if let Some(DialogKind::Input {
            value, cursor_pos, ..
        }) = &mut self.dialog
        {
            TextBufferEdit::backspace(value, cursor_pos);
        }
        self.update_input_completion_state();
    }

    /// 입력 다이얼로그: 이전 단어 삭제 (Ctrl+W)
    pub fn dialog_input_delete_prev_word(&mut self) {
        if let Some(DialogKind::Input {
            value, cursor_pos, ..
        }) = &mut self.dialog
        {
            TextBufferEdit::delete_prev_word(value, cursor_pos);
        }
        self.update_input_completion_state();
    }

    /// 입력 다이얼로그: Delete
    pub fn dialog_input_delete(&mut self) {
        if let Some(DialogKind::Input {
            value, cursor_pos, ..
        }) = &mut self.dialog
        {
            TextBufferEdit::delete(value, cursor_pos);
        }
        self.update_input_completion_state();
    }

    /// 입력 다이얼로그: 전체 지우기 (Ctrl+U)
    pub fn dialog_input_clear(&mut self) {
        if let Some(DialogKind::Input {
            value, cursor_pos, ..
        }) = &mut self.dialog
        {
            TextBufferEdit::clear(value, cursor_pos);
        }
        self.update_input_completion_state();
    }

    pub fn dialog_input_left(&mut self) {
        if let Some(DialogKind::Input {
            value, cursor_pos, ..
        }) = &mut self.dialog
        {
            TextBufferEdit::left(value, cursor_pos);
        }
    }

    pub fn dialog_input_right(&mut self) {
        if let Some(DialogKind::Input {
            value, cursor_pos, ..
        }) = &mut self.dialog
        {
            TextBufferEdit::right(value, cursor_pos);
        }
    }

    pub fn dialog_input_home(&mut self) {
        if let Some(DialogKind::Input { cursor_pos, .. }) = &mut self.dialog {
            TextBufferEdit::home(cursor_pos);
        }
    }

    pub fn dialog_input_end(&mut self) {
        if let Some(DialogKind::Input {
            value, cursor_pos, ..
        }) = &mut self.dialog
        {
            TextBufferEdit::end(value, cursor_pos);
        }
    }

    /// 입력 다이얼로그: 버튼 선택 변경
    pub fn dialog_input_toggle_button(&mut self) {
        if let Some(DialogKind::Input {
            selected_button, ..
        }) = &mut self.dialog
        {
            *selected_button = if *selected_button == 0 { 1 } else { 0 };
        }
    }

    /// 입력 다이얼로그: 선택된 버튼 반환
    pub fn get_dialog_input_selected_button(&self) -> Option<usize> {
        if let Some(DialogKind::Input {
            selected_button, ..
        }) = &self.dialog
        {
            Some(*selected_button)
        } else {
            None
        }
    }

    /// 현재 다이얼로그 입력값 반환 (Input 다이얼로그용)
    pub fn get_dialog_input_value(&self) -> Option<String> {
        if let Some(DialogKind::Input { value, .. }) = &self.dialog {
            Some(value.clone())
        } else {
            None
        }
    }

    // === 경로 자동완성 ===

    /// 입력값 기준 추천 목록 갱신 (파일 경로 입력만)
    pub(super) fn update_input_completion_state(&mut self) {
        let (value, base_path, purpose) = match &self.dialog {
            Some(DialogKind::Input {
                value,
                base_path,
                purpose,
                ..
            }) => (value.clone(), base_path.clone(), *purpose),
            _ => return,
        };

        let completion_candidates = match purpose {
            InputPurpose::SourceFile => complete_path(&value, &base_path),
            InputPurpose::CellEdit { .. } => Vec::new(),
        };

        if let Some(DialogKind::Input {
            completion_candidates: candidates,
            completion_index,
            ..
        }) = &mut self.dialog
        {
            *candidates = completion_candidates;
            // 첫 Tab에서 0번 후보가 선택되도록 비워 둠
            *completion_index = None;
        }
    }

    /// 경로 입력: 다음 추천으로 순환 + 즉시 적용 (Tab)
    pub fn dialog_input_cycle_completion_next(&mut self) {
        self.cycle_completion(true);
    }

    /// 경로 입력: 이전 추천으로 순환 + 즉시 적용 (Shift+Tab)
    pub fn dialog_input_cycle_completion_prev(&mut self) {
        self.cycle_completion(false);
    }

    fn cycle_completion(&mut self, forward: bool) {
        let needs_seed = matches!(
            &self.dialog,
            Some(DialogKind::Input {
                completion_candidates,
                ..
            }) if completion_candidates.is_empty()
        );
        if needs_seed {
            self.update_input_completion_state();
        }

        if let Some(DialogKind::Input {
            completion_candidates,
            completion_index,
            value,
            cursor_pos,
            ..
        }) = &mut self.dialog
        {
            let len = completion_candidates.len();
            if len == 0 {
                return;
            }
            let next = match (*completion_index, forward) {
                (None, true) => 0,
                (None, false) => len - 1,
                (Some(idx), true) => (idx + 1) % len,
                (Some(idx), false) => (idx + len - 1) % len,
            };
            *completion_index = Some(next);
            *value = completion_candidates[next].clone();
            *cursor_pos = value.len();
        }
    }

    /// 입력 다이얼로그에 추천 후보가 있는지
    pub fn has_input_completions(&self) -> bool {
        matches!(
            &self.dialog,
            Some(DialogKind::Input {
                completion_candidates,
                ..
            }) if !completion_candidates.is_empty()
        )
    }

    // === 확인 다이얼로그 ===

    /// 확인 다이얼로그: 버튼 선택 변경
    pub fn dialog_confirm_toggle(&mut self) {
        if let Some(DialogKind::Confirm {
            selected_button, ..
        }) = &mut self.dialog
        {
            *selected_button = if *selected_button == 0 { 1 } else { 0 };
        }
    }

    /// 현재 다이얼로그 선택 버튼 반환 (Confirm 다이얼로그용)
    pub fn get_dialog_selected_button(&self) -> Option<usize> {
        if let Some(DialogKind::Confirm {
            selected_button, ..
        }) = &self.dialog
        {
            Some(*selected_button)
        } else {
            None
        }
    }

    /// 확인 다이얼로그 확정 처리 (OK: 적재 시작, Cancel: 취소)
    pub fn confirm_confirm_dialog(&mut self) {
        match self.get_dialog_selected_button() {
            Some(0) => self.confirm_insert(),
            Some(_) => self.cancel_insert(),
            None => {}
        }
    }

    // === 목록/도움말 ===

    pub fn dialog_list_next(&mut self) {
        if let Some(DialogKind::List {
            items,
            selected_index,
            ..
        }) = &mut self.dialog
        {
            if *selected_index + 1 < items.len() {
                *selected_index += 1;
            }
        }
    }

    pub fn dialog_list_prev(&mut self) {
        if let Some(DialogKind::List { selected_index, .. }) = &mut self.dialog {
            *selected_index = selected_index.saturating_sub(1);
        }
    }

    pub fn dialog_help_scroll_down(&mut self) {
        // 카테고리 제목 + 항목 + 구분 빈 줄
        let max: usize = generate_help_entries(self.language)
            .iter()
            .map(|(_, items)| items.len() + 2)
            .sum();
        if let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog {
            *scroll_offset = (*scroll_offset + 1).min(max);
        }
    }

    pub fn dialog_help_scroll_up(&mut self) {
        if let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog {
            *scroll_offset = scroll_offset.saturating_sub(1);
        }
    }
}
