//! 업로드 대상 파일 확인 및 경로 자동완성

use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::{LoaderError, Result};

/// 업로드 가능한 확장자 (소문자)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm"];

/// 확장자가 지원 목록에 있는지 (대소문자 무시)
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 입력 문자열을 경로로 해석 (`~` 확장, 상대 경로는 base 기준)
pub fn resolve_input_path(input: &str, base: &Path) -> PathBuf {
    let input = input.trim();
    if input == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    let path = PathBuf::from(input);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// 업로드 대상 파일 검사
///
/// 존재하는 일반 파일이고 확장자가 `.xlsx/.xls/.xlsm`이어야 한다.
pub fn validate_source_file(path: &Path) -> Result<PathBuf> {
    let invalid = |reason: &str| LoaderError::InvalidFile {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let metadata = fs::metadata(path).map_err(|_| invalid("file not found"))?;
    if !metadata.is_file() {
        return Err(invalid("not a regular file"));
    }
    if !has_supported_extension(path) {
        return Err(invalid("only .xlsx, .xls and .xlsm files are supported"));
    }
    Ok(path.to_path_buf())
}

fn split_path_input(value: &str) -> (&str, &str) {
    if let Some((idx, _)) = value
        .char_indices()
        .rev()
        .find(|(_, c)| std::path::is_separator(*c))
    {
        (&value[..=idx], &value[idx + 1..])
    } else {
        ("", value)
    }
}

/// 경로 입력 자동완성 후보
///
/// 디렉토리(구분자 포함)와 지원 확장자 파일만 돌려준다.
/// 디렉토리가 먼저, 각 그룹은 이름순. 숨김 항목은 접두어가 `.`일 때만 포함.
pub fn complete_path(value: &str, base: &Path) -> Vec<String> {
    let (raw_parent, partial) = split_path_input(value);
    let (dir_path, display_prefix) = if value == "~" {
        match dirs::home_dir() {
            Some(home) => (home, format!("~{}", std::path::MAIN_SEPARATOR)),
            None => return Vec::new(),
        }
    } else if raw_parent.is_empty() {
        (base.to_path_buf(), String::new())
    } else {
        (resolve_input_path(raw_parent, base), raw_parent.to_string())
    };
    let partial = if value == "~" { "" } else { partial };

    let mut dirs_found: Vec<String> = Vec::new();
    let mut files_found: Vec<String> = Vec::new();

    for entry in fs::read_dir(&dir_path).into_iter().flatten().flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with(partial) {
            continue;
        }
        if name.starts_with('.') && !partial.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            dirs_found.push(format!(
                "{}{}{}",
                display_prefix,
                name,
                std::path::MAIN_SEPARATOR
            ));
        } else if has_supported_extension(&path) {
            files_found.push(format!("{}{}", display_prefix, name));
        }
    }

    dirs_found.sort_unstable();
    files_found.sort_unstable();
    dirs_found.extend(files_found);
    dirs_found
}
