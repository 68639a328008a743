//! excel-loader: 엑셀 파일 미리보기/편집/적재 터미널 클라이언트

pub mod app;
pub mod core;
pub mod models;
pub mod system;
pub mod ui;
pub mod utils;
