//! 적재 서버 HTTP 클라이언트
//!
//! 엑셀 파싱과 저장은 모두 원격 서비스가 담당하고, 이 모듈은 요청을 보내고
//! 응답을 모델 타입으로 디코딩하는 일만 한다.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::models::{
    HealthStatus, InsertRequest, InsertResponse, PreviewResponse, ProcessLogEntry, ServerStats,
    StoredRecord,
};
use crate::utils::error::{LoaderError, Result};

/// 기본 서버 주소
pub const DEFAULT_SERVER_URL: &str = "http://localhost:9200";

/// 기본 요청 타임아웃 (초)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// 미리보기 실패 기본 문구
pub const PREVIEW_FALLBACK: &str = "Error previewing file";

/// 적재 실패 기본 문구
pub const INSERT_FALLBACK: &str = "Error inserting data";

/// 조회 실패 기본 문구
pub const QUERY_FALLBACK: &str = "Error contacting server";

/// 적재 서버 연산
///
/// 워커 스레드에서 호출되므로 `Send + Sync`가 필요하다.
/// 테스트는 가짜 구현을 `App`에 주입한다.
pub trait LoaderService: Send + Sync {
    /// `POST /preview/excel` (multipart `file`)
    fn preview(&self, path: &Path) -> Result<PreviewResponse>;

    /// `POST /insert/excel`
    fn insert(&self, request: &InsertRequest) -> Result<InsertResponse>;

    /// `GET /health`
    fn health(&self) -> Result<HealthStatus>;

    /// `GET /stats`
    fn stats(&self) -> Result<ServerStats>;

    /// `GET /logs?limit=N`
    fn logs(&self, limit: usize) -> Result<Vec<ProcessLogEntry>>;

    /// `GET /records?limit=N`
    fn records(&self, limit: usize) -> Result<Vec<StoredRecord>>;
}

/// reqwest 기반 구현
#[derive(Debug, Clone)]
pub struct HttpLoaderService {
    base_url: String,
    client: Client,
}

impl HttpLoaderService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send()?;
        read_json(response, QUERY_FALLBACK)
    }
}

impl LoaderService for HttpLoaderService {
    fn preview(&self, path: &Path) -> Result<PreviewResponse> {
        let bytes = fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.xlsx".to_string());

        info!(file = %path.display(), size = bytes.len(), "requesting preview");
        // 길이를 아는 bytes 파트로 보내야 Content-Length가 붙는다
        let part = Part::bytes(bytes).file_name(filename);
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/preview/excel"))
            .multipart(form)
            .send()?;
        read_json(response, PREVIEW_FALLBACK)
    }

    fn insert(&self, request: &InsertRequest) -> Result<InsertResponse> {
        info!(
            filename = %request.filename,
            sheet = %request.sheet_name,
            rows = request.data.len(),
            "requesting insert"
        );
        let response = self
            .client
            .post(self.url("/insert/excel"))
            .json(request)
            .send()?;
        read_json(response, INSERT_FALLBACK)
    }

    fn health(&self) -> Result<HealthStatus> {
        self.get_json("/health")
    }

    fn stats(&self) -> Result<ServerStats> {
        self.get_json("/stats")
    }

    fn logs(&self, limit: usize) -> Result<Vec<ProcessLogEntry>> {
        self.get_json(&format!("/logs?limit={}", limit))
    }

    fn records(&self, limit: usize) -> Result<Vec<StoredRecord>> {
        self.get_json(&format!("/records?limit={}", limit))
    }
}

/// 응답 본문 디코딩 (non-OK면 `detail` 추출)
fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        let detail = extract_error_detail(&body, fallback, status.as_u16());
        debug!(status = status.as_u16(), %detail, "server rejected request");
        return Err(LoaderError::Server {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// 에러 응답에서 사용자 메시지 추출
///
/// `detail`이 문자열이면 그대로, `{msg}` 객체 목록이면 `; `로 연결한다.
/// 둘 다 아니면 기본 문구에 HTTP 상태를 붙인다.
///
/// # Examples
/// ```
/// use excel_loader::system::extract_error_detail;
///
/// let body = r#"{"detail": "Only Excel files are allowed"}"#;
/// assert_eq!(extract_error_detail(body, "Error", 400), "Only Excel files are allowed");
/// assert_eq!(extract_error_detail("oops", "Error", 502), "Error (HTTP 502)");
/// ```
pub fn extract_error_detail(body: &str, fallback: &str, status: u16) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned());

    let message = match detail {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        Some(Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    };

    message.unwrap_or_else(|| format!("{} (HTTP {})", fallback, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// 요청 하나만 받고 고정 응답을 돌려주는 로컬 서버
    ///
    /// 반환: (base url, 받은 요청 원문을 돌려주는 핸들)
    fn one_shot_server(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
                head.push_str(&line);
            }
            let mut payload = vec![0u8; content_length];
            reader.read_exact(&mut payload).unwrap();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            format!("{}\r\n{}", head, String::from_utf8_lossy(&payload))
        });
        (format!("http://{}", addr), handle)
    }

    fn service(base_url: &str) -> HttpLoaderService {
        HttpLoaderService::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_extract_detail_string() {
        let body = json!({"detail": "Sheet not found"}).to_string();
        assert_eq!(extract_error_detail(&body, "x", 404), "Sheet not found");
    }

    #[test]
    fn test_extract_detail_validation_list() {
        let body = json!({
            "detail": [
                {"loc": ["body", "data"], "msg": "field required"},
                {"loc": ["body", "sheet_name"], "msg": "str type expected"}
            ]
        })
        .to_string();
        assert_eq!(
            extract_error_detail(&body, "x", 422),
            "field required; str type expected"
        );
    }

    #[test]
    fn test_extract_detail_fallback() {
        assert_eq!(
            extract_error_detail("", INSERT_FALLBACK, 500),
            "Error inserting data (HTTP 500)"
        );
        assert_eq!(
            extract_error_detail(r#"{"detail": ""}"#, PREVIEW_FALLBACK, 400),
            "Error previewing file (HTTP 400)"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let service = service("http://localhost:9200/");
        assert_eq!(service.base_url(), "http://localhost:9200");
    }

    #[test]
    fn test_insert_posts_json_and_decodes_response() {
        let body = json!({
            "message": "Data inserted successfully",
            "rows_inserted": 2,
            "batch_id": "batch_20240101_120000",
            "filename": "ventas.xlsx",
            "progress_updates": [
                {"batch": 1, "rows_done": 1, "percentage": 50},
                {"batch": 2, "rows_done": 2, "percentage": 100}
            ]
        })
        .to_string();
        let (url, server) = one_shot_server("200 OK", body);

        let mut row = crate::models::Row::new();
        row.insert("Producto".to_string(), json!("Lapiz"));
        let request = InsertRequest {
            filename: "ventas.xlsx".to_string(),
            sheet_name: "Enero".to_string(),
            data: vec![row.clone(), row],
        };
        let response = service(&url).insert(&request).unwrap();

        assert_eq!(response.rows_inserted, 2);
        assert_eq!(response.batch_id, "batch_20240101_120000");
        let steps: Vec<f64> = response
            .progress_steps()
            .iter()
            .map(|p| p.percentage)
            .collect();
        assert_eq!(steps, vec![50.0, 100.0]);

        let raw = server.join().unwrap();
        assert!(raw.starts_with("POST /insert/excel"));
        assert!(raw.contains("\"sheet_name\":\"Enero\""));
    }

    #[test]
    fn test_preview_sends_multipart_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ventas.xlsx");
        fs::write(&path, b"fake workbook bytes").unwrap();

        let body = json!({
            "filename": "ventas.xlsx",
            "total_sheets": 1,
            "sheet_names": ["Enero"],
            "sheets_data": {
                "Enero": {
                    "total_rows": 1,
                    "columns": ["Producto"],
                    "preview_data": [{"Producto": "Lapiz"}],
                    "is_empty": false
                }
            }
        })
        .to_string();
        let (url, server) = one_shot_server("200 OK", body);

        let preview = service(&url).preview(&path).unwrap();
        assert_eq!(preview.first_sheet_name(), Some("Enero"));
        assert_eq!(preview.sheet("Enero").unwrap().total_rows, 1);

        let raw = server.join().unwrap();
        assert!(raw.starts_with("POST /preview/excel"));
        assert!(raw.contains("multipart/form-data"));
        assert!(raw.contains("name=\"file\""));
        assert!(raw.contains("filename=\"ventas.xlsx\""));
        assert!(raw.contains("fake workbook bytes"));
    }

    #[test]
    fn test_server_error_carries_detail() {
        let body = json!({"detail": "Only Excel files are allowed"}).to_string();
        let (url, server) = one_shot_server("400 Bad Request", body);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.xlsx");
        fs::write(&path, b"x").unwrap();

        let err = service(&url).preview(&path).unwrap_err();
        match err {
            LoaderError::Server { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "Only Excel files are allowed");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let (url, server) = one_shot_server("200 OK", "not json".to_string());
        let err = service(&url).health().unwrap_err();
        assert!(matches!(err, LoaderError::Decode(_)));
        server.join().unwrap();
    }

    #[test]
    fn test_logs_passes_limit() {
        let body = json!([
            {"id": 7, "filename": "ventas.xlsx", "status": "success",
             "total_rows": 10, "success_rows": 10, "created_at": "2024-01-01T12:00:00"}
        ])
        .to_string();
        let (url, server) = one_shot_server("200 OK", body);

        let logs = service(&url).logs(5).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, "success");

        let raw = server.join().unwrap();
        assert!(raw.starts_with("GET /logs?limit=5"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = service("http://127.0.0.1:9")
            .preview(Path::new("/definitely/not/here.xlsx"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::Io(_)));
    }
}
