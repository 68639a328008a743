use super::{DialogKind, InputPurpose, ListKind, ProgressStage};
use crate::models::{InsertProgress, ServerStats};
use std::path::PathBuf;

impl DialogKind {
    /// 파일 경로 입력 다이얼로그 생성
    pub fn source_file_input(
        title: impl Into<String>,
        prompt: impl Into<String>,
        initial: impl Into<String>,
        base_path: PathBuf,
    ) -> Self {
        let value: String = initial.into();
        let cursor_pos = value.len();
        DialogKind::Input {
            title: title.into(),
            prompt: prompt.into(),
            value,
            cursor_pos,
            selected_button: 0, // OK 기본 선택
            purpose: InputPurpose::SourceFile,
            base_path,
            completion_candidates: Vec::new(),
            completion_index: None,
        }
    }

    /// 셀 편집 다이얼로그 생성 (현재 값으로 시작)
    pub fn cell_edit_input(
        title: impl Into<String>,
        prompt: impl Into<String>,
        current: impl Into<String>,
        row: usize,
        col: usize,
    ) -> Self {
        let value: String = current.into();
        let cursor_pos = value.len();
        DialogKind::Input {
            title: title.into(),
            prompt: prompt.into(),
            value,
            cursor_pos,
            selected_button: 0,
            purpose: InputPurpose::CellEdit { row, col },
            base_path: PathBuf::new(),
            completion_candidates: Vec::new(),
            completion_index: None,
        }
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Confirm {
            title: title.into(),
            message: message.into(),
            selected_button: 0,
        }
    }

    /// 미리보기 대기 다이얼로그
    pub fn previewing(file_name: impl Into<String>) -> Self {
        DialogKind::Progress {
            stage: ProgressStage::Previewing,
            subject: file_name.into(),
            progress: InsertProgress::default(),
        }
    }

    /// 적재 진행률 다이얼로그
    pub fn inserting(progress: InsertProgress) -> Self {
        DialogKind::Progress {
            stage: ProgressStage::Inserting,
            subject: progress.sheet_name.clone(),
            progress,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Message {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn stats(stats: ServerStats) -> Self {
        DialogKind::Stats { stats }
    }

    pub fn list(kind: ListKind, items: Vec<String>) -> Self {
        DialogKind::List {
            kind,
            items,
            selected_index: 0,
        }
    }

    pub fn help() -> Self {
        DialogKind::Help { scroll_offset: 0 }
    }

    /// 사용자가 닫을 수 없는 다이얼로그인지 (진행 중)
    pub fn is_blocking(&self) -> bool {
        matches!(self, DialogKind::Progress { .. })
    }
}
