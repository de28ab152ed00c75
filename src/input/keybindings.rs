use crate::config::Config;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Format a keybinding as a user-friendly string
pub fn format_keybinding(keycode: &KeyCode, modifiers: &KeyModifiers) -> String {
    let mut result = String::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        result.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        result.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        result.push_str("Shift+");
    }

    match keycode {
        KeyCode::Enter => result.push_str("Enter"),
        KeyCode::Backspace => result.push_str("Backspace"),
        KeyCode::Delete => result.push_str("Del"),
        KeyCode::Insert => result.push_str("Ins"),
        KeyCode::Tab => result.push_str("Tab"),
        KeyCode::Esc => result.push_str("Esc"),
        KeyCode::Left => result.push_str("←"),
        KeyCode::Right => result.push_str("→"),
        KeyCode::Up => result.push_str("↑"),
        KeyCode::Down => result.push_str("↓"),
        KeyCode::Home => result.push_str("Home"),
        KeyCode::End => result.push_str("End"),
        KeyCode::PageUp => result.push_str("PgUp"),
        KeyCode::PageDown => result.push_str("PgDn"),
        KeyCode::Char(' ') => result.push_str("Space"),
        KeyCode::Char(c) => result.push_str(&c.to_uppercase().to_string()),
        KeyCode::F(n) => result.push_str(&format!("F{}", n)),
        _ => return String::new(),
    }

    result
}

/// Context in which a key binding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Browsing and editing the file
    Normal,
    /// A number or data prompt is open
    Prompt,
}

impl KeyContext {
    /// Parse context from a "when" string
    pub fn from_when_clause(when: &str) -> Option<Self> {
        match when.trim() {
            "normal" => Some(KeyContext::Normal),
            "prompt" => Some(KeyContext::Prompt),
            _ => None,
        }
    }
}

/// Actions the editor can perform in response to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleEditMode,

    // Movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MovePageUp,
    MovePageDown,
    MoveDocumentStart,
    MoveDocumentEnd,
    GotoOffset,

    // Search
    Find,
    FindNext,
    FindPrevious,

    // Size-changing edits (open a number prompt)
    InsertBytes,
    RemoveBytes,
    RemoveBytesBefore,

    /// Overwrite at the cursor (hex digit or printable character)
    TypeChar(char),

    // Prompt
    PromptConfirm,
    PromptCancel,
    PromptBackspace,
    PromptToggleRadix,
    PromptInput(char),

    /// Key has no binding
    None,
}

impl Action {
    /// Parse an action from its configuration name
    pub fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "quit" => Action::Quit,
            "toggle_edit_mode" => Action::ToggleEditMode,
            "move_left" => Action::MoveLeft,
            "move_right" => Action::MoveRight,
            "move_up" => Action::MoveUp,
            "move_down" => Action::MoveDown,
            "move_page_up" => Action::MovePageUp,
            "move_page_down" => Action::MovePageDown,
            "move_document_start" => Action::MoveDocumentStart,
            "move_document_end" => Action::MoveDocumentEnd,
            "goto_offset" => Action::GotoOffset,
            "find" => Action::Find,
            "find_next" => Action::FindNext,
            "find_previous" => Action::FindPrevious,
            "insert_bytes" => Action::InsertBytes,
            "remove_bytes" => Action::RemoveBytes,
            "remove_bytes_before" => Action::RemoveBytesBefore,
            "prompt_confirm" => Action::PromptConfirm,
            "prompt_cancel" => Action::PromptCancel,
            "prompt_backspace" => Action::PromptBackspace,
            "prompt_toggle_radix" => Action::PromptToggleRadix,
            _ => return None,
        })
    }
}

/// Parse a key name from configuration ("a", "Enter", "PageDown", "F5", ...)
pub fn parse_key(key: &str) -> Option<KeyCode> {
    let lower = key.to_lowercase();
    Some(match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return Some(KeyCode::F(n));
            }
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    })
}

/// Parse modifier names from configuration
pub fn parse_modifiers(modifiers: &[String]) -> KeyModifiers {
    let mut result = KeyModifiers::NONE;
    for modifier in modifiers {
        match modifier.to_lowercase().as_str() {
            "ctrl" | "control" => result |= KeyModifiers::CONTROL,
            "shift" => result |= KeyModifiers::SHIFT,
            "alt" => result |= KeyModifiers::ALT,
            _ => tracing::warn!("Unknown key modifier in config: {}", modifier),
        }
    }
    result
}

type BindingMap = HashMap<(KeyCode, KeyModifiers), Action>;

/// Resolves key events to actions
///
/// Custom bindings from the configuration take precedence over the defaults.
#[derive(Debug, Clone)]
pub struct KeybindingResolver {
    bindings: HashMap<KeyContext, BindingMap>,
    default_bindings: HashMap<KeyContext, BindingMap>,
}

impl KeybindingResolver {
    /// Create a new resolver from configuration
    pub fn new(config: &Config) -> Self {
        let mut resolver = Self {
            bindings: HashMap::new(),
            default_bindings: Self::create_default_bindings(),
        };

        for binding in &config.keybindings {
            let context = match binding.when.as_deref() {
                Some(when) => match KeyContext::from_when_clause(when) {
                    Some(context) => context,
                    None => {
                        tracing::warn!("Ignoring keybinding with unknown context: {}", when);
                        continue;
                    }
                },
                None => KeyContext::Normal,
            };
            let (Some(code), Some(action)) =
                (parse_key(&binding.key), Action::from_str(&binding.action))
            else {
                tracing::warn!(
                    "Ignoring invalid keybinding: key={:?}, action={:?}",
                    binding.key,
                    binding.action
                );
                continue;
            };
            let modifiers = parse_modifiers(&binding.modifiers);
            resolver
                .bindings
                .entry(context)
                .or_default()
                .insert((code, modifiers), action);
        }

        resolver
    }

    /// Resolve a key event to an action in the given context
    pub fn resolve(&self, event: &KeyEvent, context: KeyContext) -> Action {
        tracing::trace!(
            "KeybindingResolver.resolve: code={:?}, modifiers={:?}, context={:?}",
            event.code,
            event.modifiers,
            context
        );

        let key = (event.code, event.modifiers);
        for source in [&self.bindings, &self.default_bindings] {
            if let Some(action) = source.get(&context).and_then(|map| map.get(&key)) {
                return *action;
            }
        }

        // Unbound plain characters are input
        match event.code {
            KeyCode::Char(c)
                if event.modifiers == KeyModifiers::NONE
                    || event.modifiers == KeyModifiers::SHIFT =>
            {
                match context {
                    KeyContext::Normal => Action::TypeChar(c),
                    KeyContext::Prompt => Action::PromptInput(c),
                }
            }
            _ => Action::None,
        }
    }

    /// First key bound to `action` in `context`, for help text
    pub fn find_keybinding_for_action(
        &self,
        action: Action,
        context: KeyContext,
    ) -> Option<String> {
        let mut keys: Vec<_> = [&self.bindings, &self.default_bindings]
            .into_iter()
            .filter_map(|source| source.get(&context))
            .flat_map(|map| map.iter())
            .filter(|(_, bound)| **bound == action)
            .map(|((code, modifiers), _)| format_keybinding(code, modifiers))
            .filter(|label| !label.is_empty())
            .collect();
        // HashMap order is arbitrary; pick a stable label
        keys.sort_by_key(|label| (label.len(), label.clone()));
        keys.into_iter().next()
    }

    fn create_default_bindings() -> HashMap<KeyContext, BindingMap> {
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        let normal: BindingMap = [
            ((KeyCode::Esc, none), Action::Quit),
            ((KeyCode::Char('c'), ctrl), Action::Quit),
            ((KeyCode::Tab, none), Action::ToggleEditMode),
            ((KeyCode::Char('g'), ctrl), Action::GotoOffset),
            ((KeyCode::Char('o'), ctrl), Action::GotoOffset),
            ((KeyCode::Home, none), Action::MoveDocumentStart),
            ((KeyCode::End, none), Action::MoveDocumentEnd),
            ((KeyCode::Left, none), Action::MoveLeft),
            ((KeyCode::Right, none), Action::MoveRight),
            ((KeyCode::Up, none), Action::MoveUp),
            ((KeyCode::Down, none), Action::MoveDown),
            ((KeyCode::PageUp, none), Action::MovePageUp),
            ((KeyCode::PageDown, none), Action::MovePageDown),
            ((KeyCode::Char('f'), ctrl), Action::Find),
            ((KeyCode::Char('s'), ctrl), Action::Find),
            ((KeyCode::Char('n'), ctrl), Action::FindNext),
            ((KeyCode::Char('p'), ctrl), Action::FindPrevious),
            ((KeyCode::Insert, none), Action::InsertBytes),
            ((KeyCode::Delete, none), Action::RemoveBytes),
            ((KeyCode::Backspace, none), Action::RemoveBytesBefore),
            // Some terminals send Ctrl+H for backspace
            ((KeyCode::Char('h'), ctrl), Action::RemoveBytesBefore),
        ]
        .into_iter()
        .collect();

        let prompt: BindingMap = [
            ((KeyCode::Esc, none), Action::PromptCancel),
            ((KeyCode::Char('q'), none), Action::PromptCancel),
            ((KeyCode::Char('c'), ctrl), Action::PromptCancel),
            ((KeyCode::Enter, none), Action::PromptConfirm),
            ((KeyCode::Backspace, none), Action::PromptBackspace),
            ((KeyCode::Char('h'), ctrl), Action::PromptBackspace),
            ((KeyCode::Tab, none), Action::PromptToggleRadix),
            ((KeyCode::Left, none), Action::PromptToggleRadix),
            ((KeyCode::Right, none), Action::PromptToggleRadix),
            ((KeyCode::Up, none), Action::PromptToggleRadix),
            ((KeyCode::Down, none), Action::PromptToggleRadix),
        ]
        .into_iter()
        .collect();

        HashMap::from([(KeyContext::Normal, normal), (KeyContext::Prompt, prompt)])
    }
}
