//! 미리보기 응답 모델
//!
//! `POST /preview/excel` 응답 구조와 셀 값 변환 규칙 정의

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 한 행 (컬럼 이름 → 셀 값)
pub type Row = Map<String, Value>;

/// 시트 하나의 미리보기 데이터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    /// 컬럼 이름 (표시 순서)
    ///
    /// 헤더가 숫자(연도 등)면 서버가 JSON 숫자로 보내므로 문자열로 맞춘다.
    /// 행 객체의 키는 항상 문자열이라 같은 표기로 조회된다.
    #[serde(default, deserialize_with = "deserialize_column_names")]
    pub columns: Vec<String>,
    /// 미리보기 행 (서버가 잘라서 보냄)
    #[serde(default)]
    pub preview_data: Vec<Row>,
    /// 시트 전체 행 수
    #[serde(default)]
    pub total_rows: usize,
    /// 빈 시트 여부
    #[serde(default)]
    pub is_empty: bool,
}

/// 미리보기 응답
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub filename: String,
    #[serde(default)]
    pub sheet_names: Vec<String>,
    #[serde(default)]
    pub total_sheets: usize,
    #[serde(default)]
    pub sheets_data: HashMap<String, SheetData>,
}

impl PreviewResponse {
    /// 이름으로 시트 조회
    pub fn sheet(&self, name: &str) -> Option<&SheetData> {
        self.sheets_data.get(name)
    }

    /// 첫 번째 시트 이름 (`sheet_names` 순서 기준)
    pub fn first_sheet_name(&self) -> Option<&str> {
        self.sheet_names.first().map(String::as_str)
    }

    /// 빈 시트가 하나라도 있는지
    pub fn has_empty_sheets(&self) -> bool {
        self.sheets_data.values().any(|sheet| sheet.is_empty)
    }

    /// 시트 개수 (서버 값이 0이면 이름 목록 길이 사용)
    pub fn sheet_count(&self) -> usize {
        if self.total_sheets > 0 {
            self.total_sheets
        } else {
            self.sheet_names.len()
        }
    }
}

fn deserialize_column_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw.iter().map(cell_display).collect())
}

/// 셀 값을 화면 표시용 문자열로 변환
///
/// null은 빈 문자열, 문자열은 따옴표 없이, 나머지는 JSON 표기 그대로.
pub fn cell_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// 사용자 입력을 셀 값으로 변환
///
/// 기존 값의 타입을 가능한 한 유지한다.
/// - 빈 입력 → null
/// - 기존 값이 숫자이고 입력이 숫자로 해석되면 → 숫자
/// - 기존 값이 불리언이고 입력이 true/false면 → 불리언
/// - 그 외 → 문자열
pub fn cell_from_input(input: &str, previous: &Value) -> Value {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    match previous {
        Value::Number(_) => {
            if let Ok(i) = trimmed.parse::<i64>() {
                return Value::from(i);
            }
            if let Ok(f) = trimmed.parse::<f64>() {
                if let Some(n) = serde_json::Number::from_f64(f) {
                    return Value::Number(n);
                }
            }
        }
        Value::Bool(_) => match trimmed.to_ascii_lowercase().as_str() {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        },
        _ => {}
    }

    Value::String(input.to_string())
}

/// 셀 값을 숫자로 해석 (차트 요약용)
///
/// 숫자 문자열("12.5")도 숫자로 취급한다.
pub fn cell_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preview_response_deserialize() {
        let body = json!({
            "filename": "ventas.xlsx",
            "total_sheets": 2,
            "sheet_names": ["Enero", "Vacia"],
            "sheets_data": {
                "Enero": {
                    "total_rows": 2,
                    "columns": ["Producto", "Cantidad"],
                    "preview_data": [
                        {"Producto": "Lapiz", "Cantidad": 10},
                        {"Producto": "Goma", "Cantidad": null}
                    ],
                    "is_empty": false
                },
                "Vacia": {
                    "total_rows": 0,
                    "columns": [],
                    "preview_data": [],
                    "is_empty": true
                }
            }
        });

        let preview: PreviewResponse = serde_json::from_value(body).unwrap();
        assert_eq!(preview.filename, "ventas.xlsx");
        assert_eq!(preview.first_sheet_name(), Some("Enero"));
        assert_eq!(preview.sheet_count(), 2);
        assert!(preview.has_empty_sheets());

        let sheet = preview.sheet("Enero").unwrap();
        assert_eq!(sheet.columns, vec!["Producto", "Cantidad"]);
        assert_eq!(sheet.preview_data.len(), 2);
        assert_eq!(sheet.preview_data[0]["Cantidad"], json!(10));
    }

    #[test]
    fn test_numeric_column_headers() {
        let sheet: SheetData = serde_json::from_str(
            r#"{
                "columns": ["Producto", 2023, 2024.5, true, null],
                "preview_data": [{"Producto": "Lapiz", "2023": 15, "2024.5": 7}],
                "total_rows": 1,
                "is_empty": false
            }"#,
        )
        .unwrap();
        assert_eq!(sheet.columns, vec!["Producto", "2023", "2024.5", "true", ""]);

        let table = crate::models::TableState::from_sheet("Anual", &sheet);
        assert_eq!(table.cell_text(0, 1), "15");
        assert_eq!(table.cell_text(0, 2), "7");
    }

    #[test]
    fn test_sheet_count_falls_back_to_names() {
        let preview = PreviewResponse {
            filename: "a.xlsx".to_string(),
            sheet_names: vec!["A".to_string(), "B".to_string()],
            ..Default::default()
        };
        assert_eq!(preview.sheet_count(), 2);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(cell_display(&Value::Null), "");
        assert_eq!(cell_display(&json!("texto")), "texto");
        assert_eq!(cell_display(&json!(0)), "0");
        assert_eq!(cell_display(&json!(12.5)), "12.5");
        assert_eq!(cell_display(&json!(false)), "false");
        assert_eq!(cell_display(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_cell_from_input_keeps_number_type() {
        assert_eq!(cell_from_input("42", &json!(7)), json!(42));
        assert_eq!(cell_from_input("2.5", &json!(7)), json!(2.5));
        assert_eq!(cell_from_input("n/a", &json!(7)), json!("n/a"));
    }

    #[test]
    fn test_cell_from_input_keeps_bool_type() {
        assert_eq!(cell_from_input("TRUE", &json!(false)), json!(true));
        assert_eq!(cell_from_input("maybe", &json!(false)), json!("maybe"));
    }

    #[test]
    fn test_cell_from_input_empty_is_null() {
        assert_eq!(cell_from_input("   ", &json!("x")), Value::Null);
    }

    #[test]
    fn test_cell_from_input_string_stays_string() {
        // 문자열 컬럼에 숫자를 입력해도 문자열로 유지
        assert_eq!(cell_from_input("123", &json!("abc")), json!("123"));
    }

    #[test]
    fn test_cell_as_number() {
        assert_eq!(cell_as_number(&json!(3)), Some(3.0));
        assert_eq!(cell_as_number(&json!(" 1.5 ")), Some(1.5));
        assert_eq!(cell_as_number(&json!("abc")), None);
        assert_eq!(cell_as_number(&Value::Null), None);
    }
}
