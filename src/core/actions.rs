//! 액션 시스템 — 단일 진실 원천 (Single Source of Truth)
//!
//! 모든 키 바인딩, 커맨드바 항목, 도움말 내용이
//! 이 모듈의 레지스트리를 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crate::ui::{I18n, Language};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,
    NextSheet,
    PrevSheet,
    // Workflow
    OpenFile,
    Preview,
    Insert,
    // Table
    EditCell,
    DeleteRow,
    ClearTable,
    NextChartColumn,
    DismissIssues,
    // Server
    CheckHealth,
    ShowServerStats,
    ShowUploadLogs,
    ShowRecords,
    // System
    ShowHelp,
    CycleTheme,
    ToggleLanguage,
    Quit,
}

/// 액션 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Workflow,
    Table,
    Server,
    System,
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub id: &'static str,
    pub label: &'static str,
    pub category: ActionCategory,
    pub shortcut_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Navigation
    ActionDef {
        action: Action::MoveUp,
        id: "move_up",
        label: "Move up/down",
        category: ActionCategory::Navigation,
        shortcut_display: Some("j / k"),
        command_bar: None,
    },
    ActionDef {
        action: Action::MoveDown,
        id: "move_down",
        label: "Move down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::MoveLeft,
        id: "move_left",
        label: "Previous/next column",
        category: ActionCategory::Navigation,
        shortcut_display: Some("h / l"),
        command_bar: None,
    },
    ActionDef {
        action: Action::MoveRight,
        id: "move_right",
        label: "Next column",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToTop,
        id: "go_top",
        label: "First row",
        category: ActionCategory::Navigation,
        shortcut_display: Some("Home"),
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToBottom,
        id: "go_bottom",
        label: "Last row",
        category: ActionCategory::Navigation,
        shortcut_display: Some("G / End"),
        command_bar: None,
    },
    ActionDef {
        action: Action::PageUp,
        id: "page_up",
        label: "Half page up/down",
        category: ActionCategory::Navigation,
        shortcut_display: Some("^U / ^D"),
        command_bar: None,
    },
    ActionDef {
        action: Action::PageDown,
        id: "page_down",
        label: "Half page down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::NextSheet,
        id: "next_sheet",
        label: "Next/previous sheet",
        category: ActionCategory::Navigation,
        shortcut_display: Some("] / ["),
        command_bar: Some(CommandBarEntry {
            key: "[/]",
            label: "Sheet",
            priority: 40,
        }),
    },
    ActionDef {
        action: Action::PrevSheet,
        id: "prev_sheet",
        label: "Previous sheet",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    // Workflow
    ActionDef {
        action: Action::OpenFile,
        id: "open_file",
        label: "Select file",
        category: ActionCategory::Workflow,
        shortcut_display: Some("o"),
        command_bar: Some(CommandBarEntry {
            key: "o",
            label: "Open",
            priority: 10,
        }),
    },
    ActionDef {
        action: Action::Preview,
        id: "preview",
        label: "Preview file",
        category: ActionCategory::Workflow,
        shortcut_display: Some("p"),
        command_bar: Some(CommandBarEntry {
            key: "p",
            label: "Preview",
            priority: 11,
        }),
    },
    ActionDef {
        action: Action::Insert,
        id: "insert",
        label: "Insert into database",
        category: ActionCategory::Workflow,
        shortcut_display: Some("i"),
        command_bar: Some(CommandBarEntry {
            key: "i",
            label: "Insert",
            priority: 12,
        }),
    },
    // Table
    ActionDef {
        action: Action::EditCell,
        id: "edit_cell",
        label: "Edit cell",
        category: ActionCategory::Table,
        shortcut_display: Some("Enter / e"),
        command_bar: Some(CommandBarEntry {
            key: "e",
            label: "Edit",
            priority: 20,
        }),
    },
    ActionDef {
        action: Action::DeleteRow,
        id: "delete_row",
        label: "Delete row",
        category: ActionCategory::Table,
        shortcut_display: Some("d / Del"),
        command_bar: Some(CommandBarEntry {
            key: "d",
            label: "DelRow",
            priority: 21,
        }),
    },
    ActionDef {
        action: Action::ClearTable,
        id: "clear_table",
        label: "Clear all rows",
        category: ActionCategory::Table,
        shortcut_display: Some("X"),
        command_bar: None,
    },
    ActionDef {
        action: Action::NextChartColumn,
        id: "chart_column",
        label: "Chart next column",
        category: ActionCategory::Table,
        shortcut_display: Some("c"),
        command_bar: Some(CommandBarEntry {
            key: "c",
            label: "Chart",
            priority: 30,
        }),
    },
    ActionDef {
        action: Action::DismissIssues,
        id: "dismiss_issues",
        label: "Dismiss messages",
        category: ActionCategory::Table,
        shortcut_display: Some("x"),
        command_bar: None,
    },
    // Server
    ActionDef {
        action: Action::CheckHealth,
        id: "check_health",
        label: "Check server",
        category: ActionCategory::Server,
        shortcut_display: Some("F5 / ^R"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ShowServerStats,
        id: "server_stats",
        label: "Server statistics",
        category: ActionCategory::Server,
        shortcut_display: Some("s"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ShowUploadLogs,
        id: "upload_logs",
        label: "Upload history",
        category: ActionCategory::Server,
        shortcut_display: Some("u"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ShowRecords,
        id: "recent_records",
        label: "Stored records",
        category: ActionCategory::Server,
        shortcut_display: Some("r"),
        command_bar: None,
    },
    // System
    ActionDef {
        action: Action::ShowHelp,
        id: "help",
        label: "Help",
        category: ActionCategory::System,
        shortcut_display: Some("?"),
        command_bar: Some(CommandBarEntry {
            key: "?",
            label: "Help",
            priority: 90,
        }),
    },
    ActionDef {
        action: Action::CycleTheme,
        id: "cycle_theme",
        label: "Switch theme",
        category: ActionCategory::System,
        shortcut_display: Some("t"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ToggleLanguage,
        id: "toggle_language",
        label: "Switch language",
        category: ActionCategory::System,
        shortcut_display: Some("^L"),
        command_bar: None,
    },
    ActionDef {
        action: Action::Quit,
        id: "quit",
        label: "Quit",
        category: ActionCategory::System,
        shortcut_display: Some("q"),
        command_bar: Some(CommandBarEntry {
            key: "q",
            label: "Quit",
            priority: 99,
        }),
    },
];

/// 키 바인딩 테이블 (modifier가 더 구체적인 항목이 먼저 와야 한다)
fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        // 종료
        KeyBinding {
            code: KeyCode::Char('q'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::F(10),
            modifiers: None,
            action: Action::Quit,
        },
        // 이동 (Vim 스타일 + 화살표)
        KeyBinding {
            code: KeyCode::Char('j'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Down,
            modifiers: None,
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Char('k'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Up,
            modifiers: None,
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Char('h'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveLeft,
        },
        KeyBinding {
            code: KeyCode::Left,
            modifiers: None,
            action: Action::MoveLeft,
        },
        KeyBinding {
            code: KeyCode::Char('l'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveRight,
        },
        KeyBinding {
            code: KeyCode::Right,
            modifiers: None,
            action: Action::MoveRight,
        },
        KeyBinding {
            code: KeyCode::Home,
            modifiers: None,
            action: Action::GoToTop,
        },
        KeyBinding {
            code: KeyCode::End,
            modifiers: None,
            action: Action::GoToBottom,
        },
        KeyBinding {
            code: KeyCode::Char('G'),
            modifiers: None,
            action: Action::GoToBottom,
        },
        KeyBinding {
            code: KeyCode::Char('u'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::PageUp,
        },
        KeyBinding {
            code: KeyCode::Char('d'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::PageDown,
        },
        KeyBinding {
            code: KeyCode::PageUp,
            modifiers: None,
            action: Action::PageUp,
        },
        KeyBinding {
            code: KeyCode::PageDown,
            modifiers: None,
            action: Action::PageDown,
        },
        // 시트 전환
        KeyBinding {
            code: KeyCode::Char(']'),
            modifiers: None,
            action: Action::NextSheet,
        },
        KeyBinding {
            code: KeyCode::Tab,
            modifiers: None,
            action: Action::NextSheet,
        },
        KeyBinding {
            code: KeyCode::Char('['),
            modifiers: None,
            action: Action::PrevSheet,
        },
        KeyBinding {
            code: KeyCode::BackTab,
            modifiers: None,
            action: Action::PrevSheet,
        },
        // 적재 흐름
        KeyBinding {
            code: KeyCode::Char('o'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::OpenFile,
        },
        KeyBinding {
            code: KeyCode::Char('p'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Preview,
        },
        KeyBinding {
            code: KeyCode::Char('i'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Insert,
        },
        // 테이블 편집
        KeyBinding {
            code: KeyCode::Enter,
            modifiers: None,
            action: Action::EditCell,
        },
        KeyBinding {
            code: KeyCode::Char('e'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::EditCell,
        },
        KeyBinding {
            code: KeyCode::Char('d'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::DeleteRow,
        },
        KeyBinding {
            code: KeyCode::Delete,
            modifiers: None,
            action: Action::DeleteRow,
        },
        KeyBinding {
            code: KeyCode::Char('X'),
            modifiers: None,
            action: Action::ClearTable,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::NextChartColumn,
        },
        KeyBinding {
            code: KeyCode::Char('x'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::DismissIssues,
        },
        // 서버 조회
        KeyBinding {
            code: KeyCode::F(5),
            modifiers: None,
            action: Action::CheckHealth,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::CheckHealth,
        },
        KeyBinding {
            code: KeyCode::Char('s'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ShowServerStats,
        },
        KeyBinding {
            code: KeyCode::Char('u'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ShowUploadLogs,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ShowRecords,
        },
        // 시스템
        KeyBinding {
            code: KeyCode::Char('?'),
            modifiers: None,
            action: Action::ShowHelp,
        },
        KeyBinding {
            code: KeyCode::F(1),
            modifiers: None,
            action: Action::ShowHelp,
        },
        KeyBinding {
            code: KeyCode::Char('t'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::CycleTheme,
        },
        KeyBinding {
            code: KeyCode::Char('l'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::ToggleLanguage,
        },
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && match binding.modifiers {
                    None => true, // any modifier
                    Some(required) => modifiers == required,
                }
        })
        .map(|binding| binding.action)
}

/// action_id 문자열로 Action 조회
impl Action {
    pub fn from_id(id: &str) -> Option<Action> {
        ACTION_DEFS.iter().find(|d| d.id == id).map(|d| d.action)
    }
}

fn localized_label(language: Language, id: &str, fallback: &'static str) -> &'static str {
    I18n::new(language).action_label(id, fallback)
}

/// 커맨드바용 항목 생성 (priority 순 정렬)
///
/// `is_enabled`가 false인 액션은 흐리게 표시된다.
pub fn generate_command_bar_items(
    language: Language,
    is_enabled: impl Fn(Action) -> bool,
) -> Vec<CommandItem> {
    let mut entries: Vec<(&CommandBarEntry, &ActionDef)> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref().map(|cb| (cb, def)))
        .collect();

    entries.sort_by_key(|(cb, _)| cb.priority);

    let i18n = I18n::new(language);
    entries
        .into_iter()
        .map(|(cb, def)| {
            CommandItem::new(cb.key, i18n.command_label(def.id, cb.label))
                .enabled(is_enabled(def.action))
        })
        .collect()
}

/// 도움말 다이얼로그용 엔트리 생성
///
/// 반환: (카테고리명, Vec<(단축키, 설명)>) 목록
pub fn generate_help_entries(
    language: Language,
) -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    let i18n = I18n::new(language);
    let categories = [
        (ActionCategory::Navigation, i18n.help_category("navigation")),
        (ActionCategory::Workflow, i18n.help_category("workflow")),
        (ActionCategory::Table, i18n.help_category("table")),
        (ActionCategory::Server, i18n.help_category("server")),
        (ActionCategory::System, i18n.help_category("system")),
    ];

    categories
        .iter()
        .map(|(cat, name)| {
            let items: Vec<(&'static str, &'static str)> = ACTION_DEFS
                .iter()
                .filter(|d| d.category == *cat)
                .filter_map(|d| {
                    d.shortcut_display
                        .map(|shortcut| (shortcut, localized_label(language, d.id, d.label)))
                })
                .collect();
            (*name, items)
        })
        .filter(|(_, items)| !items.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_id() {
        assert_eq!(Action::from_id("open_file"), Some(Action::OpenFile));
        assert_eq!(Action::from_id("insert"), Some(Action::Insert));
        assert_eq!(Action::from_id("delete_row"), Some(Action::DeleteRow));
        assert_eq!(Action::from_id("server_stats"), Some(Action::ShowServerStats));
        assert_eq!(Action::from_id("quit"), Some(Action::Quit));
        assert_eq!(Action::from_id("nonexistent"), None);
    }

    #[test]
    fn test_every_action_has_definition() {
        let all = [
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::GoToTop,
            Action::GoToBottom,
            Action::PageUp,
            Action::PageDown,
            Action::NextSheet,
            Action::PrevSheet,
            Action::OpenFile,
            Action::Preview,
            Action::Insert,
            Action::EditCell,
            Action::DeleteRow,
            Action::ClearTable,
            Action::NextChartColumn,
            Action::DismissIssues,
            Action::CheckHealth,
            Action::ShowServerStats,
            Action::ShowUploadLogs,
            Action::ShowRecords,
            Action::ShowHelp,
            Action::CycleTheme,
            Action::ToggleLanguage,
            Action::Quit,
        ];
        for action in all {
            assert!(
                ACTION_DEFS.iter().any(|d| d.action == action),
                "missing definition for {:?}",
                action
            );
        }
    }

    #[test]
    fn test_find_action_plain_keys() {
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Char('j')),
            Some(Action::MoveDown)
        );
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Char('o')),
            Some(Action::OpenFile)
        );
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Char('d')),
            Some(Action::DeleteRow)
        );
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Enter),
            Some(Action::EditCell)
        );
        assert_eq!(find_action(KeyModifiers::NONE, KeyCode::Char('z')), None);
    }

    #[test]
    fn test_find_action_ctrl_keys() {
        assert_eq!(
            find_action(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(Action::Quit)
        );
        assert_eq!(
            find_action(KeyModifiers::CONTROL, KeyCode::Char('d')),
            Some(Action::PageDown)
        );
        assert_eq!(
            find_action(KeyModifiers::CONTROL, KeyCode::Char('r')),
            Some(Action::CheckHealth)
        );
        assert_eq!(
            find_action(KeyModifiers::CONTROL, KeyCode::Char('l')),
            Some(Action::ToggleLanguage)
        );
    }

    #[test]
    fn test_find_action_shifted_keys() {
        // 대문자는 SHIFT modifier와 함께 들어온다
        assert_eq!(
            find_action(KeyModifiers::SHIFT, KeyCode::Char('X')),
            Some(Action::ClearTable)
        );
        assert_eq!(
            find_action(KeyModifiers::SHIFT, KeyCode::Char('G')),
            Some(Action::GoToBottom)
        );
        assert_eq!(
            find_action(KeyModifiers::SHIFT, KeyCode::BackTab),
            Some(Action::PrevSheet)
        );
    }

    #[test]
    fn test_generate_command_bar_items() {
        let items = generate_command_bar_items(Language::English, |a| a != Action::Insert);
        assert_eq!(items[0].key, "o");
        assert_eq!(items[0].label, "Open");
        assert!(items[0].enabled);
        assert!(items.iter().any(|i| i.key == "i" && !i.enabled));
        assert_eq!(items.last().map(|i| i.key.as_str()), Some("q"));
    }

    #[test]
    fn test_generate_help_entries() {
        let entries = generate_help_entries(Language::English);
        assert_eq!(entries[0].0, "Navigation");
        let workflow = entries
            .iter()
            .find(|(category, _)| *category == "Workflow")
            .map(|(_, items)| items)
            .expect("workflow section should exist");
        assert!(workflow.iter().any(|(k, _)| *k == "i"));
        assert!(workflow.iter().any(|(k, _)| *k == "p"));
    }

    #[test]
    fn test_help_entries_localized() {
        let entries = generate_help_entries(Language::Spanish);
        assert_eq!(entries[0].0, "Navegación");
    }
}
