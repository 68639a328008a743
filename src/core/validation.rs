//! 컬럼 이름 검증
//!
//! 설정된 기대 컬럼과 현재 테이블 컬럼을 비교한다.
//! 비교는 앞뒤 공백 제거 후 대소문자 무시.
//! 일치 개수에 따라 경고(적재 허용) 또는 차단(적재 거부)으로 나뉜다.

/// 검증 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnCheck {
    /// 기대 컬럼이 설정되지 않음
    Skipped,
    /// 모든 기대 컬럼 존재 (추가 컬럼은 참고용)
    Passed { unexpected: Vec<String> },
    /// 일부만 존재 - 적재는 허용
    Warning {
        matched: usize,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    /// 하나도 일치하지 않음 - 적재 차단
    Blocking { missing: Vec<String> },
}

impl ColumnCheck {
    /// 적재를 막는 결과인지
    pub fn is_blocking(&self) -> bool {
        matches!(self, ColumnCheck::Blocking { .. })
    }

    /// 경고 결과인지
    pub fn is_warning(&self) -> bool {
        matches!(self, ColumnCheck::Warning { .. })
    }

    /// 이슈 패널/다이얼로그용 설명 (영문 기본 문구)
    pub fn describe(&self) -> Option<String> {
        match self {
            ColumnCheck::Skipped | ColumnCheck::Passed { .. } => None,
            ColumnCheck::Warning {
                matched,
                missing,
                unexpected,
            } => {
                let mut text = format!(
                    "{} of {} expected columns found. Missing: {}",
                    matched,
                    matched + missing.len(),
                    missing.join(", ")
                );
                if !unexpected.is_empty() {
                    text.push_str(&format!(". Unexpected: {}", unexpected.join(", ")));
                }
                Some(text)
            }
            ColumnCheck::Blocking { missing } => Some(format!(
                "None of the expected columns were found ({}). Check the selected sheet.",
                missing.join(", ")
            )),
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// 기대 컬럼과 실제 컬럼 비교
///
/// # Examples
/// ```
/// use excel_loader::core::validation::{check_columns, ColumnCheck};
///
/// let expected = vec!["Nombre".to_string(), "Edad".to_string()];
/// let actual = vec!["nombre ".to_string(), "Ciudad".to_string()];
/// assert!(check_columns(&expected, &actual).is_warning());
/// assert_eq!(check_columns(&[], &actual), ColumnCheck::Skipped);
/// ```
pub fn check_columns(expected: &[String], actual: &[String]) -> ColumnCheck {
    let expected: Vec<&String> = expected
        .iter()
        .filter(|name| !name.trim().is_empty())
        .collect();
    if expected.is_empty() {
        return ColumnCheck::Skipped;
    }

    let actual_normalized: Vec<String> = actual.iter().map(|c| normalize(c)).collect();
    let expected_normalized: Vec<String> = expected.iter().map(|c| normalize(c)).collect();

    let missing: Vec<String> = expected
        .iter()
        .zip(&expected_normalized)
        .filter(|(_, norm)| !actual_normalized.contains(norm))
        .map(|(name, _)| name.trim().to_string())
        .collect();

    let unexpected: Vec<String> = actual
        .iter()
        .zip(&actual_normalized)
        .filter(|(_, norm)| !expected_normalized.contains(norm))
        .map(|(name, _)| name.clone())
        .collect();

    let matched = expected.len() - missing.len();

    if missing.is_empty() {
        ColumnCheck::Passed { unexpected }
    } else if matched == 0 {
        ColumnCheck::Blocking { missing }
    } else {
        ColumnCheck::Warning {
            matched,
            missing,
            unexpected,
        }
    }
}
