// UI Components
pub mod command_bar;
pub mod data_table;
pub mod dialog;
pub mod header_bar;
pub mod issue_panel;
pub mod sheet_tabs;
pub mod status_bar;
pub mod summary_panel;
pub mod warning;

// Re-export components for convenience
pub use command_bar::{CommandBar, CommandItem};
pub use data_table::DataTable;
pub use dialog::{Dialog, DialogKind, InputPurpose, ListKind, ProgressStage};
pub use header_bar::HeaderBar;
pub use issue_panel::IssuePanel;
pub use sheet_tabs::{SheetTab, SheetTabs};
pub use status_bar::{ServerIndicator, StatusBar};
pub use summary_panel::SummaryPanel;
pub use warning::WarningScreen;
