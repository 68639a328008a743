// Data Models
pub mod insert;
pub mod sheet;
pub mod table_state;
pub mod workflow;

pub use insert::{
    HealthStatus, InsertRequest, InsertResponse, ProcessLogEntry, ProgressUpdate, ServerStats,
    StoredRecord,
};
pub use sheet::{PreviewResponse, Row, SheetData};
pub use table_state::TableState;
pub use workflow::{InsertProgress, Issue, IssueSource, LoaderPhase};
