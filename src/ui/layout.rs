// Layout system - 반응형 레이아웃
//
// 터미널 크기에 따른 모드:
// - 100+ cols: 넓은 모드 (테이블 | 요약/차트 좌우 배치)
// - 60-99 cols: 좁은 모드 (요약을 테이블 아래에 배치)
// - <60 cols 또는 <16 rows: 경고 메시지 표시

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;
pub const WIDE_MIN_WIDTH: u16 = 100;

/// 요약 패널 폭 (넓은 모드)
const SUMMARY_WIDTH: u16 = 38;
/// 메시지 패널 최대 높이 (테두리 포함)
const ISSUES_MAX_HEIGHT: u16 = 6;
/// 좁은 모드 요약 패널 높이
const NARROW_SUMMARY_HEIGHT: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Wide,
    Narrow,
    TooSmall,
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default)]
pub struct LayoutAreas {
    /// 상단 제목/파일 정보
    pub header: Rect,
    /// 시트 탭 줄
    pub sheet_tabs: Rect,
    pub table: Rect,
    /// 요약 + 검증 + 차트
    pub summary: Rect,
    /// 경고/오류 메시지 (없으면 높이 0)
    pub issues: Rect,
    pub status_bar: Rect,
    pub command_bar: Rect,
    /// TooSmall 모드 전용
    pub warning: Rect,
}

/// 레이아웃 매니저
#[derive(Debug)]
pub struct LayoutManager {
    mode: LayoutMode,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            mode: LayoutMode::Wide,
            terminal_size: (WIDE_MIN_WIDTH, 24),
            areas: LayoutAreas::default(),
        }
    }

    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else if width < WIDE_MIN_WIDTH {
            LayoutMode::Narrow
        } else {
            LayoutMode::Wide
        }
    }

    /// 터미널 크기 반영 및 영역 재계산
    ///
    /// `issue_lines`: 표시할 메시지 줄 수 (0이면 메시지 패널 숨김)
    pub fn update(&mut self, area: Rect, issue_lines: usize) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = match self.mode {
            LayoutMode::TooSmall => LayoutAreas {
                warning: area,
                ..Default::default()
            },
            LayoutMode::Wide | LayoutMode::Narrow => self.calculate_areas(area, issue_lines),
        };
    }

    fn calculate_areas(&self, area: Rect, issue_lines: usize) -> LayoutAreas {
        let issues_height = if issue_lines == 0 {
            0
        } else {
            (issue_lines as u16 + 2).min(ISSUES_MAX_HEIGHT)
        };

        // 헤더 | 시트 탭 | 본문 | 메시지 | 상태바 | 커맨드바
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(issues_height),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let body = vertical[2];
        let (table, summary) = if self.mode == LayoutMode::Wide {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(40), Constraint::Length(SUMMARY_WIDTH)])
                .split(body);
            (chunks[0], chunks[1])
        } else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(4),
                    Constraint::Length(NARROW_SUMMARY_HEIGHT),
                ])
                .split(body);
            (chunks[0], chunks[1])
        };

        LayoutAreas {
            header: vertical[0],
            sheet_tabs: vertical[1],
            table,
            summary,
            issues: vertical[3],
            status_bar: vertical[4],
            command_bar: vertical[5],
            warning: Rect::default(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn is_too_small(&self) -> bool {
        matches!(self.mode, LayoutMode::TooSmall)
    }

    /// 테이블에 보이는 데이터 행 수 (테두리 2 + 헤더 1 + 구분선 1 제외)
    pub fn table_visible_rows(&self) -> usize {
        self.areas.table.height.saturating_sub(4).max(1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_mode() {
        assert_eq!(LayoutManager::determine_mode(100, 24), LayoutMode::Wide);
        assert_eq!(LayoutManager::determine_mode(160, 40), LayoutMode::Wide);
        assert_eq!(LayoutManager::determine_mode(99, 24), LayoutMode::Narrow);
        assert_eq!(LayoutManager::determine_mode(60, 24), LayoutMode::Narrow);
        assert_eq!(LayoutManager::determine_mode(59, 24), LayoutMode::TooSmall);
        assert_eq!(LayoutManager::determine_mode(120, 15), LayoutMode::TooSmall);
    }

    #[test]
    fn test_wide_layout_places_summary_right() {
        let mut manager = LayoutManager::new();
        manager.update(Rect::new(0, 0, 120, 30), 0);
        let areas = manager.areas();
        assert_eq!(areas.header.height, 1);
        assert_eq!(areas.issues.height, 0);
        assert_eq!(areas.summary.width, SUMMARY_WIDTH);
        assert_eq!(areas.summary.y, areas.table.y);
        assert!(areas.summary.x > areas.table.x);
        assert_eq!(areas.command_bar.y, 29);
    }

    #[test]
    fn test_narrow_layout_stacks_summary() {
        let mut manager = LayoutManager::new();
        manager.update(Rect::new(0, 0, 80, 30), 2);
        let areas = manager.areas();
        assert_eq!(manager.mode(), LayoutMode::Narrow);
        assert_eq!(areas.summary.width, 80);
        assert!(areas.summary.y > areas.table.y);
        assert_eq!(areas.issues.height, 4);
    }

    #[test]
    fn test_issue_panel_height_is_capped() {
        let mut manager = LayoutManager::new();
        manager.update(Rect::new(0, 0, 120, 40), 20);
        assert_eq!(manager.areas().issues.height, ISSUES_MAX_HEIGHT);
    }

    #[test]
    fn test_too_small_uses_warning_area() {
        let mut manager = LayoutManager::new();
        let area = Rect::new(0, 0, 50, 10);
        manager.update(area, 0);
        assert!(manager.is_too_small());
        assert_eq!(manager.areas().warning, area);
        assert_eq!(manager.areas().table, Rect::default());
    }

    #[test]
    fn test_table_visible_rows() {
        let mut manager = LayoutManager::new();
        manager.update(Rect::new(0, 0, 120, 30), 0);
        // 30 - 4 (헤더/탭/상태/커맨드) = 26, 테이블 내부 26 - 4 = 22
        assert_eq!(manager.table_visible_rows(), 22);
    }
}
