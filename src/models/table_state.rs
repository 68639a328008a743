use crate::models::sheet::{cell_display, cell_from_input, Row, SheetData};
use serde_json::Value;

/// 편집 중인 시트 테이블 상태
///
/// 미리보기 응답에서 복사한 행을 보관하며, 삭제/셀 편집은 이 사본에만 반영된다.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    /// 원본 시트 이름
    pub sheet_name: String,
    /// 컬럼 이름 (표시 순서)
    pub columns: Vec<String>,
    /// 행 데이터
    pub rows: Vec<Row>,
    /// 커서 행
    pub cursor_row: usize,
    /// 커서 컬럼
    pub cursor_col: usize,
    /// 세로 스크롤 오프셋 (첫 표시 행)
    pub scroll_offset: usize,
    /// 가로 스크롤 오프셋 (첫 표시 컬럼)
    pub column_offset: usize,
}

impl TableState {
    /// 시트 데이터로 새 테이블 생성
    pub fn from_sheet(sheet_name: impl Into<String>, sheet: &SheetData) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            columns: sheet.columns.clone(),
            rows: sheet.preview_data.clone(),
            ..Default::default()
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 셀 개수 (행 × 컬럼)
    pub fn cell_count(&self) -> u64 {
        self.rows.len() as u64 * self.columns.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 셀 값 조회 (컬럼 키가 없는 행은 null 취급)
    pub fn cell_value(&self, row: usize, col: usize) -> Option<&Value> {
        let column = self.columns.get(col)?;
        let record = self.rows.get(row)?;
        Some(record.get(column).unwrap_or(&Value::Null))
    }

    /// 셀 표시 문자열
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        self.cell_value(row, col).map(cell_display).unwrap_or_default()
    }

    /// 셀 값 변경
    ///
    /// 범위를 벗어나면 false 반환
    pub fn set_cell(&mut self, row: usize, col: usize, input: &str) -> bool {
        let Some(column) = self.columns.get(col).cloned() else {
            return false;
        };
        let Some(record) = self.rows.get_mut(row) else {
            return false;
        };
        let previous = record.get(&column).cloned().unwrap_or(Value::Null);
        record.insert(column, cell_from_input(input, &previous));
        true
    }

    /// 행 삭제
    pub fn delete_row(&mut self, index: usize) -> Option<Row> {
        if index >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(index);
        self.clamp_cursor();
        Some(removed)
    }

    /// 커서 위치의 행 삭제
    pub fn delete_cursor_row(&mut self) -> Option<Row> {
        self.delete_row(self.cursor_row)
    }

    /// 모든 행 삭제 (컬럼은 유지)
    pub fn clear_rows(&mut self) {
        self.rows.clear();
        self.cursor_row = 0;
        self.scroll_offset = 0;
    }

    /// 커서 위치의 컬럼 이름
    pub fn cursor_column_name(&self) -> Option<&str> {
        self.columns.get(self.cursor_col).map(String::as_str)
    }

    /// 컬럼 하나의 값 목록
    pub fn column_values(&self, col: usize) -> Vec<&Value> {
        let Some(column) = self.columns.get(col) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .map(|row| row.get(column).unwrap_or(&Value::Null))
            .collect()
    }

    // === 커서 이동 ===

    pub fn move_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.rows.len() {
            self.cursor_row += 1;
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_col + 1 < self.columns.len() {
            self.cursor_col += 1;
        }
    }

    pub fn move_top(&mut self) {
        self.cursor_row = 0;
    }

    pub fn move_bottom(&mut self) {
        self.cursor_row = self.rows.len().saturating_sub(1);
    }

    pub fn page_up(&mut self, page: usize) {
        self.cursor_row = self.cursor_row.saturating_sub(page.max(1));
    }

    pub fn page_down(&mut self, page: usize) {
        self.cursor_row = (self.cursor_row + page.max(1)).min(self.rows.len().saturating_sub(1));
    }

    /// 커서가 범위 안에 있도록 보정
    fn clamp_cursor(&mut self) {
        let last_row = self.rows.len().saturating_sub(1);
        if self.cursor_row > last_row {
            self.cursor_row = last_row;
        }
        let last_col = self.columns.len().saturating_sub(1);
        if self.cursor_col > last_col {
            self.cursor_col = last_col;
        }
        if self.scroll_offset > self.cursor_row {
            self.scroll_offset = self.cursor_row;
        }
    }

    /// 스크롤 오프셋을 커서 위치에 맞게 조정
    pub fn adjust_scroll(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        if self.cursor_row < self.scroll_offset {
            self.scroll_offset = self.cursor_row;
        } else if self.cursor_row >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.cursor_row + 1 - visible_rows;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_sheet() -> SheetData {
        let rows = (1..=5)
            .map(|i| {
                let mut row = Row::new();
                row.insert("id".to_string(), json!(i));
                row.insert("name".to_string(), json!(format!("item{}", i)));
                row
            })
            .collect();
        SheetData {
            columns: vec!["id".to_string(), "name".to_string()],
            preview_data: rows,
            total_rows: 5,
            is_empty: false,
        }
    }

    #[test]
    fn test_from_sheet_copies_rows_and_columns() {
        let table = TableState::from_sheet("Hoja1", &sample_sheet());
        assert_eq!(table.sheet_name, "Hoja1");
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell_count(), 10);
        assert_eq!(table.cell_text(0, 1), "item1");
    }

    #[test]
    fn test_delete_row_reduces_count_by_one() {
        let mut table = TableState::from_sheet("Hoja1", &sample_sheet());
        let removed = table.delete_row(1).unwrap();
        assert_eq!(removed["id"], json!(2));
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.cell_text(1, 0), "3");
    }

    #[test]
    fn test_delete_last_row_moves_cursor_up() {
        let mut table = TableState::from_sheet("Hoja1", &sample_sheet());
        table.move_bottom();
        assert_eq!(table.cursor_row, 4);
        table.delete_cursor_row();
        assert_eq!(table.cursor_row, 3);
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut table = TableState::from_sheet("Hoja1", &sample_sheet());
        assert!(table.delete_row(99).is_none());
        assert_eq!(table.row_count(), 5);
    }

    #[test]
    fn test_clear_rows_keeps_columns() {
        let mut table = TableState::from_sheet("Hoja1", &sample_sheet());
        table.clear_rows();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell_count(), 0);
    }

    #[test]
    fn test_set_cell_keeps_type() {
        let mut table = TableState::from_sheet("Hoja1", &sample_sheet());
        assert!(table.set_cell(0, 0, "10"));
        assert_eq!(table.cell_value(0, 0), Some(&json!(10)));
        assert!(table.set_cell(0, 1, "renamed"));
        assert_eq!(table.cell_text(0, 1), "renamed");
        assert!(!table.set_cell(0, 5, "x"));
    }

    #[test]
    fn test_missing_key_reads_as_null() {
        let mut table = TableState::from_sheet("Hoja1", &sample_sheet());
        table.rows[0].remove("name");
        assert_eq!(table.cell_value(0, 1), Some(&Value::Null));
        assert_eq!(table.cell_text(0, 1), "");
    }

    #[test]
    fn test_cursor_moves_clamp() {
        let mut table = TableState::from_sheet("Hoja1", &sample_sheet());
        table.move_up();
        assert_eq!(table.cursor_row, 0);
        table.move_right();
        table.move_right();
        assert_eq!(table.cursor_col, 1);
        table.page_down(10);
        assert_eq!(table.cursor_row, 4);
        table.page_up(2);
        assert_eq!(table.cursor_row, 2);
    }

    #[test]
    fn test_adjust_scroll_follows_cursor() {
        let mut table = TableState::from_sheet("Hoja1", &sample_sheet());
        table.move_bottom();
        table.adjust_scroll(2);
        assert_eq!(table.scroll_offset, 3);
        table.move_top();
        table.adjust_scroll(2);
        assert_eq!(table.scroll_offset, 0);
    }

    #[test]
    fn test_column_values() {
        let table = TableState::from_sheet("Hoja1", &sample_sheet());
        let ids: Vec<String> = table.column_values(0).into_iter().map(cell_display).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert!(table.column_values(9).is_empty());
    }
}
