//! Keybinding system for context-aware keyboard shortcuts
//!
//! One registry drives both key dispatch and what the navigation bar and
//! help overlay display, so the two can never disagree.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    Home,
    End,
    ToggleEnabled,
    SelectStarter,
    SelectPlus,
    FlipTier,
    ToggleFeatures,
    EditClient,
    EditPrice,
    SwitchColumn,
    OpenAdmin,
    OpenProposal,
    Save,
    Export,
    Back,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether a key event triggers this binding.
    ///
    /// Letters match either case; Shift is ignored for them.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let code_matches = match (self.key, event.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        let modifiers = event.modifiers.difference(KeyModifiers::SHIFT);
        code_matches && modifiers == self.modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        // Builder
        self.mode_bindings.insert(
            AppMode::Builder,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous phase"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next phase"),
                Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "First phase"),
                Keybinding::new(KeyCode::End, KeyAction::End, "End", "Last phase"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::ToggleEnabled, "Space", "Include / exclude phase"),
                Keybinding::new(KeyCode::Char('1'), KeyAction::SelectStarter, "1", "Choose Starter"),
                Keybinding::new(KeyCode::Char('2'), KeyAction::SelectPlus, "2", "Choose Standard Plus"),
                Keybinding::new(KeyCode::Tab, KeyAction::FlipTier, "Tab", "Switch tier"),
                Keybinding::new(KeyCode::Enter, KeyAction::ToggleFeatures, "Enter", "Show / hide features"),
                Keybinding::new(KeyCode::Char('c'), KeyAction::EditClient, "C", "Edit client name"),
                Keybinding::new(KeyCode::Char('a'), KeyAction::OpenAdmin, "A", "Price administration"),
                Keybinding::new(KeyCode::Char('p'), KeyAction::OpenProposal, "P", "Preview proposal"),
            ],
        );

        // Admin
        self.mode_bindings.insert(
            AppMode::Admin,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous phase"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next phase"),
                Keybinding::new(KeyCode::Left, KeyAction::SwitchColumn, "Left", "Switch tier column"),
                Keybinding::new(KeyCode::Right, KeyAction::SwitchColumn, "Right", "Switch tier column"),
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchColumn, "Tab", "Switch tier column"),
                Keybinding::new(KeyCode::Enter, KeyAction::EditPrice, "Enter", "Edit price"),
                Keybinding::new(KeyCode::Char('s'), KeyAction::Save, "S", "Save prices"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Discard and go back"),
            ],
        );

        // Proposal
        self.mode_bindings.insert(
            AppMode::Proposal,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Scroll up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Scroll down"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "Top"),
                Keybinding::new(KeyCode::End, KeyAction::End, "End", "Bottom"),
                Keybinding::new(KeyCode::Char('e'), KeyAction::Export, "E", "Export PDF"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
                Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Back"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key event to an action in the given mode
    pub fn action_for(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|binding| binding.matches(event))
            .map(|binding| binding.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::Builder => vec![
                KeyAction::NavigateUp,
                KeyAction::ToggleEnabled,
                KeyAction::FlipTier,
                KeyAction::ToggleFeatures,
                KeyAction::OpenProposal,
                KeyAction::OpenAdmin,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Admin => vec![
                KeyAction::NavigateUp,
                KeyAction::SwitchColumn,
                KeyAction::EditPrice,
                KeyAction::Save,
                KeyAction::Back,
                KeyAction::Help,
            ],
            AppMode::Proposal => vec![
                KeyAction::NavigateUp,
                KeyAction::PageDown,
                KeyAction::Export,
                KeyAction::Back,
                KeyAction::Help,
            ],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            let Some(binding) = bindings.iter().find(|b| b.action == action) else {
                continue;
            };
            // Up/Down are shown as one item
            let item = match action {
                KeyAction::NavigateUp if *mode == AppMode::Proposal => NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Scroll".to_string(),
                },
                KeyAction::NavigateUp => NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Navigate".to_string(),
                },
                _ => NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                },
            };
            items.push(item);
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let bindings = self.get_bindings(mode);

        ["Navigation", "Actions", "General"]
            .into_iter()
            .filter_map(|title| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| help_group(b.action) == title)
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Help overlay section an action is listed under
fn help_group(action: KeyAction) -> &'static str {
    match action {
        KeyAction::NavigateUp
        | KeyAction::NavigateDown
        | KeyAction::PageUp
        | KeyAction::PageDown
        | KeyAction::Home
        | KeyAction::End => "Navigation",
        KeyAction::Back | KeyAction::Help | KeyAction::Quit => "General",
        _ => "Actions",
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
