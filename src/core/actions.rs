//! 액션 시스템: 단일 진실 원천 (Single Source of Truth)
//!
//! 키 바인딩, 커맨드바 항목이 모두 이 모듈의 레지스트리를 참조합니다.

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
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,
    TogglePanel,
    // Selection
    ToggleMark,
    ClearMarks,
    // Drag & Drop
    BeginDrag,
    Drop,
    DropMove,
    DropCopy,
    CancelDrag,
    // System
    Refresh,
    Save,
    CycleTheme,
    Cancel,
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
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 시퀀스 키 바인딩 정의 (예: `g` + `g`)
pub struct SequenceBinding {
    pub prefix: char,
    pub key: char,
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    ActionDef {
        action: Action::MoveUp,
        id: "move_up",
        command_bar: Some(CommandBarEntry {
            key: "j/k",
            label: "Up/Dn",
            priority: 50,
        }),
    },
    ActionDef {
        action: Action::MoveDown,
        id: "move_down",
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToTop,
        id: "go_top",
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToBottom,
        id: "go_bottom",
        command_bar: None,
    },
    ActionDef {
        action: Action::PageUp,
        id: "page_up",
        command_bar: None,
    },
    ActionDef {
        action: Action::PageDown,
        id: "page_down",
        command_bar: None,
    },
    ActionDef {
        action: Action::TogglePanel,
        id: "toggle_panel",
        command_bar: Some(CommandBarEntry {
            key: "Tab",
            label: "Pane",
            priority: 40,
        }),
    },
    ActionDef {
        action: Action::ToggleMark,
        id: "toggle_mark",
        command_bar: Some(CommandBarEntry {
            key: "Spc",
            label: "Mark",
            priority: 30,
        }),
    },
    ActionDef {
        action: Action::ClearMarks,
        id: "clear_marks",
        command_bar: None,
    },
    ActionDef {
        action: Action::BeginDrag,
        id: "begin_drag",
        command_bar: Some(CommandBarEntry {
            key: "d",
            label: "Drag",
            priority: 10,
        }),
    },
    ActionDef {
        action: Action::Drop,
        id: "drop",
        command_bar: Some(CommandBarEntry {
            key: "Enter",
            label: "Drop",
            priority: 11,
        }),
    },
    ActionDef {
        action: Action::DropMove,
        id: "drop_move",
        command_bar: Some(CommandBarEntry {
            key: "p",
            label: "Move",
            priority: 12,
        }),
    },
    ActionDef {
        action: Action::DropCopy,
        id: "drop_copy",
        command_bar: Some(CommandBarEntry {
            key: "y",
            label: "Copy",
            priority: 13,
        }),
    },
    ActionDef {
        action: Action::CancelDrag,
        id: "cancel_drag",
        command_bar: None,
    },
    ActionDef {
        action: Action::Refresh,
        id: "refresh",
        command_bar: Some(CommandBarEntry {
            key: "r",
            label: "Rescan",
            priority: 60,
        }),
    },
    ActionDef {
        action: Action::Save,
        id: "save",
        command_bar: Some(CommandBarEntry {
            key: "^s",
            label: "Save",
            priority: 70,
        }),
    },
    ActionDef {
        action: Action::CycleTheme,
        id: "cycle_theme",
        command_bar: None,
    },
    ActionDef {
        action: Action::Cancel,
        id: "cancel",
        command_bar: Some(CommandBarEntry {
            key: "q",
            label: "Cancel",
            priority: 90,
        }),
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        // 이동
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
            code: KeyCode::Char('G'),
            modifiers: Some(KeyModifiers::SHIFT),
            action: Action::GoToBottom,
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
            code: KeyCode::PageUp,
            modifiers: None,
            action: Action::PageUp,
        },
        KeyBinding {
            code: KeyCode::PageDown,
            modifiers: None,
            action: Action::PageDown,
        },
        KeyBinding {
            code: KeyCode::Tab,
            modifiers: None,
            action: Action::TogglePanel,
        },
        // 선택
        KeyBinding {
            code: KeyCode::Char(' '),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ToggleMark,
        },
        KeyBinding {
            code: KeyCode::Char('u'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ClearMarks,
        },
        // 드래그 앤 드롭
        KeyBinding {
            code: KeyCode::Char('d'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::BeginDrag,
        },
        KeyBinding {
            code: KeyCode::Char('p'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::DropMove,
        },
        KeyBinding {
            code: KeyCode::Enter,
            modifiers: None,
            action: Action::Drop,
        },
        KeyBinding {
            code: KeyCode::Char('y'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::DropCopy,
        },
        KeyBinding {
            code: KeyCode::Esc,
            modifiers: None,
            action: Action::CancelDrag,
        },
        // 시스템
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Refresh,
        },
        KeyBinding {
            code: KeyCode::Char('s'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Save,
        },
        KeyBinding {
            code: KeyCode::Char('t'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::CycleTheme,
        },
        KeyBinding {
            code: KeyCode::Char('q'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Cancel,
        },
        KeyBinding {
            code: KeyCode::F(10),
            modifiers: None,
            action: Action::Cancel,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Cancel,
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
            let mod_matches = match binding.modifiers {
                None => true,
                Some(required) => modifiers == required,
            };
            binding.code == code && mod_matches
        })
        .map(|binding| binding.action)
}

static SEQUENCE_BINDINGS: &[SequenceBinding] = &[SequenceBinding {
    prefix: 'g',
    key: 'g',
    action: Action::GoToTop,
}];

/// 시퀀스 입력(prefix + key)으로 액션 조회
pub fn find_sequence_action(prefix: char, key: char) -> Option<Action> {
    SEQUENCE_BINDINGS
        .iter()
        .find(|binding| binding.prefix == prefix && binding.key == key)
        .map(|binding| binding.action)
}

/// 시퀀스 시작 prefix 여부
pub fn is_sequence_prefix(c: char) -> bool {
    SEQUENCE_BINDINGS.iter().any(|binding| binding.prefix == c)
}

impl Action {
    /// 진행 중인 드래그가 있어야 의미 있는 액션
    pub fn requires_drag(self) -> bool {
        matches!(
            self,
            Action::Drop | Action::DropMove | Action::DropCopy | Action::CancelDrag
        )
    }
}

/// 커맨드바용 항목 생성 (priority 순 정렬)
///
/// 드래그 중이 아니면 드롭 관련 항목은 비활성으로 표시합니다.
pub fn generate_command_bar_items(language: Language, dragging: bool) -> Vec<CommandItem> {
    let i18n = I18n::new(language);
    let mut entries: Vec<(&CommandBarEntry, &ActionDef)> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref().map(|cb| (cb, def)))
        .collect();

    entries.sort_by_key(|(cb, _)| cb.priority);

    entries
        .into_iter()
        .map(|(cb, def)| {
            CommandItem::new(cb.key, i18n.action_label(def.id, cb.label))
                .enabled(dragging || !def.action.requires_drag())
        })
        .collect()
}
