// Formatters - 행/셀 개수, 파일 크기, 서버 타임스탬프 포맷팅

use chrono::{DateTime, Local, NaiveDateTime};

/// 파일 크기를 읽기 쉬운 형식으로 포맷팅 (숫자와 단위 사이 공백)
///
/// # Examples
/// ```
/// use excel_loader::utils::formatter::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 B");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// 개수에 따라 단수/복수형 반환
///
/// # Examples
/// ```
/// use excel_loader::utils::formatter::pluralize;
///
/// assert_eq!(pluralize(1, "row", "rows"), "1 row");
/// assert_eq!(pluralize(3, "row", "rows"), "3 rows");
/// ```
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// 숫자를 천단위 콤마로 포맷팅 (통계 패널의 셀 수 표시용)
///
/// # Examples
/// ```
/// use excel_loader::utils::formatter::format_number_with_commas;
///
/// assert_eq!(format_number_with_commas(999), "999");
/// assert_eq!(format_number_with_commas(1234567), "1,234,567");
/// ```
pub fn format_number_with_commas(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(b as char);
    }
    result
}

/// 소수를 최대 2자리로 포맷팅 (불필요한 0 제거)
///
/// 차트 요약(합계/평균)에 사용
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// 서버 타임스탬프를 "YYYY-MM-DD HH:MM" 형식으로 변환
///
/// 서버는 timezone 포함(RFC 3339) 또는 미포함(ISO 8601 naive) 형식을 모두 보낼 수 있다.
/// 해석할 수 없는 값은 그대로 반환한다.
pub fn format_server_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

/// 문자열을 표시 너비에 맞게 자르고 말줄임표 추가
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for c in text.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw > max_width - 1 {
            break;
        }
        result.push(c);
        width += cw;
    }
    result.push('…');
    result
}
