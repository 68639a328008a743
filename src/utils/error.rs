use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 서버가 non-OK 상태로 응답한 경우 (`detail` 필드 추출 결과 포함)
    #[error("{detail}")]
    Server { status: u16, detail: String },

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid file {path}: {reason}")]
    InvalidFile { path: PathBuf, reason: String },

    #[error("Worker thread panicked during {0}")]
    WorkerPanicked(&'static str),
}

impl LoaderError {
    /// 사용자에게 표시할 메시지
    ///
    /// 서버 에러는 `detail`만, 나머지는 Display 문자열 그대로 사용한다.
    pub fn user_message(&self) -> String {
        match self {
            LoaderError::Server { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_message_is_detail_only() {
        let err = LoaderError::Server {
            status: 400,
            detail: "Only Excel files are allowed".to_string(),
        };
        assert_eq!(err.user_message(), "Only Excel files are allowed");
        assert_eq!(err.to_string(), "Only Excel files are allowed");
    }

    #[test]
    fn test_invalid_file_message_includes_path() {
        let err = LoaderError::InvalidFile {
            path: PathBuf::from("/tmp/notes.txt"),
            reason: "unsupported extension".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Invalid file /tmp/notes.txt: unsupported extension"
        );
    }
}
