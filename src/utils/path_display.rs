//! 화면 폭에 맞춘 경로/문자열 축약

use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// 문자열을 최대 너비에 맞춰 중간 생략
///
/// 자동완성 후보처럼 앞(디렉토리)과 뒤(확장자)가 모두 중요한 값에 사용.
pub fn truncate_middle(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width < 5 {
        return take_prefix_by_width(text, max_width);
    }

    let side_width = (max_width - ELLIPSIS.width()) / 2;
    let start = take_prefix_by_width(text, side_width);
    let end = take_suffix_by_width(text, side_width);
    format!("{}{}{}", start, ELLIPSIS, end)
}

/// 파일 경로 표시 (홈 디렉토리는 `~`, 넘치면 앞쪽을 생략해 파일 이름을 남김)
pub fn display_path(path: &Path, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let text = shorten_home(path);
    if text.width() <= max_width {
        return text;
    }
    if max_width <= ELLIPSIS.width() {
        return take_suffix_by_width(&text, max_width);
    }
    format!(
        "{}{}",
        ELLIPSIS,
        take_suffix_by_width(&text, max_width - ELLIPSIS.width())
    )
}

fn shorten_home(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if path == home {
            return "~".to_string();
        }
        if let Ok(rest) = path.strip_prefix(&home) {
            return format!(
                "~{}{}",
                std::path::MAIN_SEPARATOR,
                rest.to_string_lossy()
            );
        }
    }
    path.to_string_lossy().to_string()
}

fn take_prefix_by_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

fn take_suffix_by_width(text: &str, max_width: usize) -> String {
    let mut rev_chars: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        rev_chars.push(ch);
        width += ch_width;
    }
    rev_chars.into_iter().rev().collect()
}
