//! 적재 흐름 모델
//!
//! 파일 선택부터 적재 결과까지의 단계, 진행률, 이슈 목록 정의

/// 적재 흐름 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoaderPhase {
    /// 파일 미선택
    #[default]
    Idle,
    /// 파일 선택됨 (미리보기 전)
    FileSelected,
    /// 미리보기 요청 중
    Previewing,
    /// 미리보기 완료, 테이블 편집 가능
    Previewed,
    /// 적재 확인 대기
    Confirming,
    /// 적재 요청/진행률 재생 중
    Inserting,
    /// 적재 완료 (결과 표시)
    Completed,
}

impl LoaderPhase {
    /// 원격 요청이 진행 중인 단계
    pub fn is_busy(self) -> bool {
        matches!(self, LoaderPhase::Previewing | LoaderPhase::Inserting)
    }

    /// 테이블 편집이 가능한 단계
    pub fn is_editable(self) -> bool {
        matches!(self, LoaderPhase::Previewed | LoaderPhase::Completed)
    }

    /// i18n 키로 사용하는 식별자
    pub fn id(self) -> &'static str {
        match self {
            LoaderPhase::Idle => "idle",
            LoaderPhase::FileSelected => "file_selected",
            LoaderPhase::Previewing => "previewing",
            LoaderPhase::Previewed => "previewed",
            LoaderPhase::Confirming => "confirming",
            LoaderPhase::Inserting => "inserting",
            LoaderPhase::Completed => "completed",
        }
    }
}

/// 이슈 출처 (이슈 패널의 라벨)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSource {
    /// 경고 (빈 시트, 빈 테이블 등)
    Warning,
    /// 시스템 에러 (네트워크, 서버 응답)
    System,
    /// 컬럼 검증
    Validation,
}

/// 이슈 패널 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub source: IssueSource,
    pub message: String,
}

impl Issue {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            source: IssueSource::Warning,
            message: message.into(),
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            source: IssueSource::System,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            source: IssueSource::Validation,
            message: message.into(),
        }
    }
}

/// 적재 진행 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertProgress {
    /// 적재 대상 시트
    pub sheet_name: String,
    /// 전송한 행 수
    pub total_rows: usize,
    /// 현재 진행률 (0-100)
    pub percentage: u8,
    /// 서버가 보고한 처리 행 수
    pub rows_done: Option<usize>,
}

impl InsertProgress {
    pub fn new(sheet_name: impl Into<String>, total_rows: usize) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            total_rows,
            percentage: 0,
            rows_done: None,
        }
    }

    /// 진행률 반영 (0-100으로 제한 후 반올림)
    pub fn apply(&mut self, percentage: f64, rows_done: Option<usize>) {
        if !percentage.is_nan() {
            self.percentage = percentage.clamp(0.0, 100.0).round() as u8;
        }
        if rows_done.is_some() {
            self.rows_done = rows_done;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_busy_and_editable() {
        assert!(LoaderPhase::Previewing.is_busy());
        assert!(LoaderPhase::Inserting.is_busy());
        assert!(!LoaderPhase::Previewed.is_busy());
        assert!(LoaderPhase::Previewed.is_editable());
        assert!(!LoaderPhase::Confirming.is_editable());
        assert_eq!(LoaderPhase::default(), LoaderPhase::Idle);
    }

    #[test]
    fn test_progress_apply_clamps() {
        let mut progress = InsertProgress::new("Hoja1", 10);
        progress.apply(150.0, Some(10));
        assert_eq!(progress.percentage, 100);
        assert_eq!(progress.rows_done, Some(10));

        progress.apply(40.0, None);
        assert_eq!(progress.percentage, 40);
        assert_eq!(progress.rows_done, Some(10));

        progress.apply(66.6, None);
        assert_eq!(progress.percentage, 67);
        progress.apply(-5.0, None);
        assert_eq!(progress.percentage, 0);
    }
}
