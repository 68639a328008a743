// System Layer
pub mod api_client;
pub mod config;
pub mod source_file;

pub use api_client::{extract_error_detail, HttpLoaderService, LoaderService, DEFAULT_SERVER_URL};
pub use config::Settings;
pub use source_file::{complete_path, validate_source_file, SUPPORTED_EXTENSIONS};
