// UI Layer
pub mod components;
pub mod i18n;
pub mod layout;
pub mod theme;

pub use i18n::{localize_runtime_text, I18n, Language, MessageKey, TextKey};
pub use layout::{LayoutAreas, LayoutManager, LayoutMode, MIN_HEIGHT, MIN_WIDTH};
pub use theme::{Theme, ThemeManager};

// Re-export components
pub use components::{
    CommandBar, CommandItem, DataTable, Dialog, DialogKind, HeaderBar, InputPurpose,
    IssuePanel, ListKind, ProgressStage, ServerIndicator, SheetTab, SheetTabs, StatusBar,
    SummaryPanel, WarningScreen,
};
