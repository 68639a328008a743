//! 적재(insert) 요청/응답 및 서버 조회 응답 모델

use super::sheet::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /insert/excel` 요청 본문
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertRequest {
    pub filename: String,
    pub sheet_name: String,
    pub data: Vec<Row>,
}

/// 서버가 배치마다 기록한 진행 상황
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// 0-100 (서버가 소수나 범위 밖 값을 보낼 수 있음)
    pub percentage: f64,
    #[serde(default)]
    pub rows_done: Option<usize>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// `POST /insert/excel` 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertResponse {
    pub rows_inserted: usize,
    pub batch_id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub progress_updates: Option<Vec<ProgressUpdate>>,
}

impl InsertResponse {
    /// 재생할 진행률 목록 (없으면 빈 슬라이스)
    pub fn progress_steps(&self) -> &[ProgressUpdate] {
        self.progress_updates.as_deref().unwrap_or(&[])
    }
}

/// `GET /health` 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// `GET /stats` 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStats {
    #[serde(default)]
    pub total_records_stored: u64,
    #[serde(default)]
    pub total_uploads: u64,
    #[serde(default)]
    pub successful_uploads: u64,
    #[serde(default)]
    pub failed_uploads: u64,
    #[serde(default)]
    pub api_version: Option<String>,
}

/// `GET /logs` 항목 (적재 이력)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessLogEntry {
    pub id: i64,
    pub filename: String,
    pub status: String,
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub success_rows: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `GET /records` 항목 (저장된 행)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    pub filename: String,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub created_at: Option<String>,
}
