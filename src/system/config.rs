//! 사용자 설정 (TOML)
//!
//! 위치: `$EXCEL_LOADER_CONFIG` 또는 `<config dir>/excel-loader/settings.toml`.
//! 파일이 없거나 해석할 수 없으면 기본값으로 시작한다.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::chart::DEFAULT_BUCKETS;
use crate::system::api_client::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS};
use crate::utils::error::{LoaderError, Result};

/// 설정 파일 경로 환경변수
pub const CONFIG_ENV_VAR: &str = "EXCEL_LOADER_CONFIG";

/// 진행률 재생 기본 간격 (ms)
pub const DEFAULT_PROGRESS_STEP_MS: u64 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    pub server_url: String,
    pub request_timeout_secs: u64,
    /// 진행률 한 단계 표시 간격
    pub progress_step_ms: u64,
    pub chart_buckets: usize,
    /// 검증용 기대 컬럼 (비어 있으면 검증 생략)
    pub expected_columns: Vec<String>,
    pub theme: String,
    /// "en" | "es"
    pub language: String,
    /// 마지막으로 파일을 고른 디렉토리
    pub last_directory: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: Self::VERSION,
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            progress_step_ms: DEFAULT_PROGRESS_STEP_MS,
            chart_buckets: DEFAULT_BUCKETS,
            expected_columns: Vec::new(),
            theme: "dark".to_string(),
            language: "en".to_string(),
            last_directory: None,
        }
    }
}

impl Settings {
    pub const VERSION: u32 = 1;

    /// 기본 설정 파일 경로
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(CONFIG_ENV_VAR) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir().map(|dir| dir.join("excel-loader").join("settings.toml"))
    }

    /// 설정 파일 읽기
    ///
    /// 파일이 없으면 기본값. 내용이 잘못됐거나 버전이 다르면 경고 로그 후 기본값.
    pub fn load(path: &Path) -> Self {
        let Ok(data) = fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::parse(&data) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring settings file");
                Self::default()
            }
        }
    }

    /// TOML 문자열 해석 + 값 보정
    pub fn parse(data: &str) -> Result<Self> {
        let mut settings: Settings =
            toml::from_str(data).map_err(|e| LoaderError::Config(e.to_string()))?;
        if settings.version != Self::VERSION {
            return Err(LoaderError::Config(format!(
                "unsupported settings version {}",
                settings.version
            )));
        }
        settings.normalize();
        Ok(settings)
    }

    /// 설정 파일 저장 (상위 디렉토리 생성 포함)
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(self).map_err(|e| LoaderError::Config(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }

    fn normalize(&mut self) {
        if self.server_url.trim().is_empty() {
            self.server_url = DEFAULT_SERVER_URL.to_string();
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        if self.chart_buckets == 0 {
            self.chart_buckets = DEFAULT_BUCKETS;
        }
        self.expected_columns = self
            .expected_columns
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
    }

    /// 쉼표 구분 컬럼 목록 (`--expected-columns a,b,c`)
    pub fn parse_column_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.toml"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server_url, "http://localhost:9200");
        assert_eq!(settings.progress_step_ms, 200);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = Settings {
            theme: "light".to_string(),
            language: "es".to_string(),
            expected_columns: vec!["Producto".to_string(), "Cantidad".to_string()],
            last_directory: Some(PathBuf::from("/data/excel")),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = Settings::parse("version = 1\nserver_url = \"http://10.0.0.5:9200\"\n").unwrap();
        assert_eq!(settings.server_url, "http://10.0.0.5:9200");
        assert_eq!(settings.chart_buckets, DEFAULT_BUCKETS);
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_normalize_fixes_zero_values() {
        let settings = Settings::parse(
            "version = 1\nchart_buckets = 0\nrequest_timeout_secs = 0\nexpected_columns = [\" a \", \"\"]\n",
        )
        .unwrap();
        assert_eq!(settings.chart_buckets, DEFAULT_BUCKETS);
        assert_eq!(settings.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(settings.expected_columns, vec!["a".to_string()]);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "this is = = not toml").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());

        fs::write(&path, "version = 99\n").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_parse_column_list() {
        assert_eq!(
            Settings::parse_column_list(" Producto, Cantidad ,,Precio"),
            vec!["Producto", "Cantidad", "Precio"]
        );
        assert!(Settings::parse_column_list("").is_empty());
    }
}
