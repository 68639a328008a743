//! 차트 집계
//!
//! 선택한 컬럼의 값 빈도를 막대로 집계하고,
//! 값이 모두 숫자면 합계/최소/최대/평균 요약을 함께 계산한다.

use crate::models::sheet::{cell_as_number, cell_display};
use serde_json::Value;
use std::collections::HashMap;

/// 기본 막대 개수
pub const DEFAULT_BUCKETS: usize = 8;

/// "기타" 막대 라벨
pub const OTHER_LABEL: &str = "Other";

/// 막대 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBucket {
    pub label: String,
    pub count: usize,
}

/// 숫자 컬럼 요약
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// 컬럼 집계 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnChart {
    pub column: String,
    pub buckets: Vec<ChartBucket>,
    /// 빈 셀 개수 (막대에서 제외)
    pub empty_count: usize,
    /// 서로 다른 값 개수 ("기타" 병합 전)
    pub distinct_count: usize,
    pub numeric: Option<NumericSummary>,
}

impl ColumnChart {
    /// 가장 큰 막대 값 (렌더링 비율 계산용)
    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

fn is_empty_cell(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// 컬럼 값 목록 집계
///
/// 막대는 개수 내림차순, 같으면 라벨 오름차순.
/// `max_buckets`를 넘는 나머지는 "Other" 막대 하나로 합친다.
pub fn aggregate_column(column: &str, values: &[&Value], max_buckets: usize) -> ColumnChart {
    let max_buckets = max_buckets.max(1);
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut empty_count = 0;
    let mut numbers: Vec<f64> = Vec::new();
    let mut all_numeric = true;

    for value in values {
        if is_empty_cell(value) {
            empty_count += 1;
            continue;
        }
        *counts.entry(cell_display(value)).or_insert(0) += 1;
        match cell_as_number(value) {
            Some(n) => numbers.push(n),
            None => all_numeric = false,
        }
    }

    let distinct_count = counts.len();
    let mut buckets: Vec<ChartBucket> = counts
        .into_iter()
        .map(|(label, count)| ChartBucket { label, count })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

    if buckets.len() > max_buckets {
        // 마지막 칸은 "Other"
        let keep = max_buckets.saturating_sub(1);
        let rest: usize = buckets[keep..].iter().map(|b| b.count).sum();
        buckets.truncate(keep);
        buckets.push(ChartBucket {
            label: OTHER_LABEL.to_string(),
            count: rest,
        });
    }

    let numeric = if all_numeric && !numbers.is_empty() {
        let sum: f64 = numbers.iter().sum();
        let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
        let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(NumericSummary {
            count: numbers.len(),
            sum,
            min,
            max,
            mean: sum / numbers.len() as f64,
        })
    } else {
        None
    };

    ColumnChart {
        column: column.to_string(),
        buckets,
        empty_count,
        distinct_count,
        numeric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart_of(values: &[Value], max: usize) -> ColumnChart {
        let refs: Vec<&Value> = values.iter().collect();
        aggregate_column("col", &refs, max)
    }

    #[test]
    fn test_buckets_sorted_by_count_then_label() {
        let values = vec![
            json!("b"),
            json!("a"),
            json!("b"),
            json!("c"),
            json!("a"),
            json!("b"),
        ];
        let chart = chart_of(&values, 8);
        let labels: Vec<(&str, usize)> = chart
            .buckets
            .iter()
            .map(|b| (b.label.as_str(), b.count))
            .collect();
        assert_eq!(labels, vec![("b", 3), ("a", 2), ("c", 1)]);
        assert_eq!(chart.max_count(), 3);
        assert_eq!(chart.distinct_count, 3);
        assert!(chart.numeric.is_none());
    }

    #[test]
    fn test_overflow_folds_into_other() {
        let values: Vec<Value> = ["a", "a", "b", "c", "d", "e"]
            .iter()
            .map(|s| json!(s))
            .collect();
        let chart = chart_of(&values, 3);
        assert_eq!(chart.buckets.len(), 3);
        assert_eq!(chart.buckets[0].label, "a");
        assert_eq!(chart.buckets[1].label, "b");
        assert_eq!(chart.buckets[2].label, OTHER_LABEL);
        assert_eq!(chart.buckets[2].count, 3);
        assert_eq!(chart.distinct_count, 5);
    }

    #[test]
    fn test_empty_cells_counted_separately() {
        let values = vec![json!(null), json!(" "), json!("x")];
        let chart = chart_of(&values, 8);
        assert_eq!(chart.empty_count, 2);
        assert_eq!(chart.buckets.len(), 1);
    }

    #[test]
    fn test_numeric_summary() {
        let values = vec![json!(2), json!(4.5), json!("3.5"), json!(null)];
        let chart = chart_of(&values, 8);
        let numeric = chart.numeric.unwrap();
        assert_eq!(numeric.count, 3);
        assert_eq!(numeric.sum, 10.0);
        assert_eq!(numeric.min, 2.0);
        assert_eq!(numeric.max, 4.5);
        assert!((numeric.mean - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_values_have_no_numeric_summary() {
        let values = vec![json!(1), json!("uno")];
        assert!(chart_of(&values, 8).numeric.is_none());
    }

    #[test]
    fn test_all_empty_column() {
        let values = vec![json!(null), json!(null)];
        let chart = chart_of(&values, 8);
        assert!(chart.buckets.is_empty());
        assert_eq!(chart.max_count(), 0);
        assert!(chart.numeric.is_none());
    }
}
