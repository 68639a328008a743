use crate::models::{InsertProgress, ServerStats};
use std::path::PathBuf;

/// 입력 다이얼로그 목적
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    /// 업로드할 엑셀 파일 경로
    SourceFile,
    /// 현재 커서 셀 값
    CellEdit { row: usize, col: usize },
}

/// 진행률 다이얼로그 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    /// 미리보기 요청 중 (진행률 없음)
    Previewing,
    /// 적재 중 (서버 진행률 재생)
    Inserting,
}

/// 목록 다이얼로그 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    UploadLogs,
    Records,
}

/// 다이얼로그 종류
#[derive(Debug, Clone)]
pub enum DialogKind {
    /// 입력 다이얼로그 (파일 경로 / 셀 편집)
    Input {
        title: String,
        prompt: String,
        value: String,
        cursor_pos: usize,
        selected_button: usize, // 0: OK, 1: Cancel
        purpose: InputPurpose,
        base_path: PathBuf,
        completion_candidates: Vec<String>,
        completion_index: Option<usize>,
    },
    /// 확인 다이얼로그 (적재 확인)
    Confirm {
        title: String,
        message: String,
        selected_button: usize, // 0: OK, 1: Cancel
    },
    /// 진행률 다이얼로그
    Progress {
        stage: ProgressStage,
        /// 파일 이름 또는 시트 이름
        subject: String,
        progress: InsertProgress,
    },
    Error {
        title: String,
        message: String,
    },
    /// 정보 다이얼로그 (적재 결과 등)
    Message {
        title: String,
        message: String,
    },
    /// 서버 통계
    Stats { stats: ServerStats },
    /// 업로드 이력 / 저장 레코드 목록
    List {
        kind: ListKind,
        items: Vec<String>,
        selected_index: usize,
    },
    /// 단축키 도움말
    Help { scroll_offset: usize },
}
