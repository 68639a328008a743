//! 로그 설정
//!
//! TUI가 터미널을 점유하므로 로그는 항상 파일로 기록한다.
//! 필터는 `EXCEL_LOADER_LOG` 환경변수(EnvFilter 문법)로 조절하며 기본값은 `info`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// 로그 필터 환경변수 이름
pub const LOG_ENV_VAR: &str = "EXCEL_LOADER_LOG";

/// 기본 로그 파일 경로 (`<cache dir>/excel-loader/excel-loader.log`)
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("excel-loader").join("excel-loader.log"))
}

/// 파일 로거 초기화
///
/// 실패해도 앱 실행은 계속되어야 하므로 에러는 호출자가 무시할 수 있게 반환만 한다.
pub fn init_file_logging(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::AlreadyExists, e))
}
