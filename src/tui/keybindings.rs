//! Keybinding definitions
//!
//! Defines all keyboard shortcuts for different contexts. The help dialog is
//! built from this table.

use crossterm::event::{KeyCode, KeyModifiers};

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub description: &'static str,
    pub context: KeyContext,
}

/// Context in which a keybinding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Active while the app keyboard scope is held
    Global,
    Sidebar,
    Budget,
    /// Group row menu is open
    Menu,
    /// A group is being dragged
    Drag,
    Accounts,
    /// Typing into a name field
    Editing,
    Dialog,
}

impl KeyContext {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Global => "Global Keys",
            Self::Sidebar => "Sidebar",
            Self::Budget => "Budget",
            Self::Menu => "Group Menu",
            Self::Drag => "Moving a Group",
            Self::Accounts => "Accounts",
            Self::Editing => "Editing",
            Self::Dialog => "Dialogs",
        }
    }
}

const fn kb(key: KeyCode, description: &'static str, context: KeyContext) -> Keybinding {
    Keybinding {
        key,
        modifiers: KeyModifiers::NONE,
        description,
        context,
    }
}

/// All keybindings
pub static KEYBINDINGS: &[Keybinding] = &[
    // Global
    kb(KeyCode::Char('q'), "Quit", KeyContext::Global),
    kb(KeyCode::Char('?'), "Help", KeyContext::Global),
    kb(KeyCode::Tab, "Switch panel", KeyContext::Global),
    kb(KeyCode::Char(':'), "Go to path", KeyContext::Global),
    kb(KeyCode::Char('b'), "Back", KeyContext::Global),
    kb(KeyCode::Char('s'), "Toggle sidebar", KeyContext::Global),
    kb(KeyCode::Char('x'), "Dismiss notification", KeyContext::Global),
    kb(KeyCode::Char('n'), "New transaction", KeyContext::Global),
    kb(KeyCode::Char('1'), "Budget", KeyContext::Global),
    kb(KeyCode::Char('4'), "Accounts", KeyContext::Global),
    kb(KeyCode::Char('7'), "Settings", KeyContext::Global),
    // Sidebar
    kb(KeyCode::Char('j'), "Move down", KeyContext::Sidebar),
    kb(KeyCode::Char('k'), "Move up", KeyContext::Sidebar),
    kb(KeyCode::Enter, "Open", KeyContext::Sidebar),
    // Budget
    kb(KeyCode::Char('j'), "Next group", KeyContext::Budget),
    kb(KeyCode::Char('k'), "Previous group", KeyContext::Budget),
    kb(KeyCode::Char(' '), "Collapse/expand group", KeyContext::Budget),
    kb(KeyCode::Enter, "Rename group", KeyContext::Budget),
    kb(KeyCode::Char('m'), "Group menu", KeyContext::Budget),
    kb(KeyCode::Char('N'), "Group notes", KeyContext::Budget),
    kb(KeyCode::Char('A'), "Add category group", KeyContext::Budget),
    kb(KeyCode::Char('d'), "Move group", KeyContext::Budget),
    // Menu
    kb(KeyCode::Char('j'), "Next item", KeyContext::Menu),
    kb(KeyCode::Char('k'), "Previous item", KeyContext::Menu),
    kb(KeyCode::Enter, "Choose", KeyContext::Menu),
    kb(KeyCode::Esc, "Close menu", KeyContext::Menu),
    // Drag
    kb(KeyCode::Char('j'), "Move down", KeyContext::Drag),
    kb(KeyCode::Char('k'), "Move up", KeyContext::Drag),
    kb(KeyCode::Enter, "Drop", KeyContext::Drag),
    kb(KeyCode::Esc, "Cancel", KeyContext::Drag),
    // Accounts
    kb(KeyCode::Char('j'), "Next account", KeyContext::Accounts),
    kb(KeyCode::Char('k'), "Previous account", KeyContext::Accounts),
    kb(KeyCode::Enter, "Open account", KeyContext::Accounts),
    kb(KeyCode::Char('a'), "Add account", KeyContext::Accounts),
    // Editing
    kb(KeyCode::Enter, "Save", KeyContext::Editing),
    kb(KeyCode::Esc, "Leave (group names save)", KeyContext::Editing),
    // Dialog
    kb(KeyCode::Esc, "Close dialog", KeyContext::Dialog),
    kb(KeyCode::Enter, "Confirm", KeyContext::Dialog),
];

/// Get keybindings for a specific context
pub fn get_keybindings(context: KeyContext) -> Vec<&'static Keybinding> {
    KEYBINDINGS
        .iter()
        .filter(|kb| kb.context == context)
        .collect()
}

/// Format a keybinding for display
pub fn format_keybinding(kb: &Keybinding) -> String {
    let mut parts = Vec::new();

    if kb.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if kb.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }

    let key_str = match kb.key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        _ => format!("{:?}", kb.key),
    };

    parts.push(&key_str);
    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_context_has_bindings() {
        for context in [
            KeyContext::Global,
            KeyContext::Sidebar,
            KeyContext::Budget,
            KeyContext::Menu,
            KeyContext::Drag,
            KeyContext::Accounts,
            KeyContext::Editing,
            KeyContext::Dialog,
        ] {
            assert!(!get_keybindings(context).is_empty(), "{:?}", context);
        }
    }

    #[test]
    fn test_format_space() {
        let space = get_keybindings(KeyContext::Budget)
            .into_iter()
            .find(|kb| kb.key == KeyCode::Char(' '))
            .unwrap();
        assert_eq!(format_keybinding(space), "Space");
    }
}
