//! Input handling module
//!
//! Single-line text dialogs used by the configurator: the client name and
//! administrative price entry.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Types of input dialogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    /// Free text such as the client name
    TextInput {
        field_name: String,
        current_value: String,
        placeholder: String,
    },
    /// Price entry; only characters that can appear in a number are accepted
    PriceInput {
        field_name: String,
        current_value: String,
    },
}

/// Input dialog state
#[derive(Debug, Clone)]
pub struct InputDialog {
    /// Type of input dialog
    pub input_type: InputType,
    /// Title of the dialog
    pub title: String,
    /// Instructions for the user
    pub instructions: String,
}

impl InputDialog {
    /// Create a new input dialog
    pub fn new(input_type: InputType, title: String, instructions: String) -> Self {
        Self {
            input_type,
            title,
            instructions,
        }
    }

    /// Handle keyboard input for the dialog
    pub fn handle_input(&mut self, key_event: KeyEvent) -> InputResult {
        let numeric = matches!(self.input_type, InputType::PriceInput { .. });
        let value = match &mut self.input_type {
            InputType::TextInput { current_value, .. }
            | InputType::PriceInput { current_value, .. } => current_value,
        };
        let accepts = |c: char| {
            if numeric {
                c.is_ascii_digit() || c == '-' || c == '.'
            } else {
                !c.is_control()
            }
        };

        match key_event.code {
            KeyCode::Enter => InputResult::Confirm(value.clone()),
            KeyCode::Esc => InputResult::Cancel,
            KeyCode::Backspace => {
                value.pop();
                InputResult::Continue
            }
            KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                value.clear();
                InputResult::Continue
            }
            KeyCode::Char(c) if accepts(c) => {
                value.push(c);
                InputResult::Continue
            }
            _ => InputResult::Continue,
        }
    }

    /// Field label shown next to the value
    pub fn field_name(&self) -> &str {
        match &self.input_type {
            InputType::TextInput { field_name, .. } | InputType::PriceInput { field_name, .. } => {
                field_name
            }
        }
    }

    /// Value to display, falling back to the placeholder when empty
    pub fn get_display_value(&self) -> String {
        match &self.input_type {
            InputType::TextInput {
                current_value,
                placeholder,
                ..
            } => {
                if current_value.is_empty() {
                    placeholder.clone()
                } else {
                    current_value.clone()
                }
            }
            InputType::PriceInput { current_value, .. } => current_value.clone(),
        }
    }

    /// Whether the displayed value is the placeholder
    pub fn shows_placeholder(&self) -> bool {
        matches!(&self.input_type, InputType::TextInput { current_value, .. } if current_value.is_empty())
    }
}

/// Result of input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// User confirmed with a value
    Confirm(String),
    /// User cancelled
    Cancel,
    /// Continue processing input
    Continue,
}

/// Input handler for managing the active dialog
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Current active dialog
    pub current_dialog: Option<InputDialog>,
}

impl InputHandler {
    /// Create a new input handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Start text input for a field
    pub fn start_text_input(&mut self, field_name: &str, current_value: &str, placeholder: &str) {
        self.current_dialog = Some(InputDialog::new(
            InputType::TextInput {
                field_name: field_name.to_string(),
                current_value: current_value.to_string(),
                placeholder: placeholder.to_string(),
            },
            format!("Edit {}", field_name),
            "Type the new value, Enter to confirm, Esc to cancel".to_string(),
        ));
    }

    /// Start price input for a phase tier
    pub fn start_price_input(&mut self, field_name: &str, current_price: i64) {
        self.current_dialog = Some(InputDialog::new(
            InputType::PriceInput {
                field_name: field_name.to_string(),
                current_value: current_price.to_string(),
            },
            "Edit Price".to_string(),
            "Whole amount, Enter to stage, Esc to cancel. Invalid input counts as 0".to_string(),
        ));
    }

    /// Handle keyboard input for the current dialog
    pub fn handle_input(&mut self, key_event: KeyEvent) -> InputResult {
        let Some(dialog) = self.current_dialog.as_mut() else {
            return InputResult::Continue;
        };
        let result = dialog.handle_input(key_event);
        if !matches!(result, InputResult::Continue) {
            self.current_dialog = None;
        }
        result
    }

    /// Check if a dialog is currently active
    pub fn is_dialog_active(&self) -> bool {
        self.current_dialog.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_text_input_confirm() {
        let mut handler = InputHandler::new();
        handler.start_text_input("Client", "AC", "Client name");
        handler.handle_input(key(KeyCode::Char('M')));
        handler.handle_input(key(KeyCode::Char('E')));
        assert_eq!(
            handler.handle_input(key(KeyCode::Enter)),
            InputResult::Confirm("ACME".to_string())
        );
        assert!(!handler.is_dialog_active());
    }

    #[test]
    fn test_price_input_filters_characters() {
        let mut handler = InputHandler::new();
        handler.start_price_input("P1 Starter", 15);
        for c in ['a', '0', ' ', '.', '5'] {
            handler.handle_input(key(KeyCode::Char(c)));
        }
        assert_eq!(
            handler.handle_input(key(KeyCode::Enter)),
            InputResult::Confirm("150.5".to_string())
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut handler = InputHandler::new();
        handler.start_text_input("Client", "", "Client name");
        assert_eq!(handler.handle_input(key(KeyCode::Esc)), InputResult::Cancel);
        assert!(!handler.is_dialog_active());
    }

    #[test]
    fn test_placeholder_shown_when_empty() {
        let mut handler = InputHandler::new();
        handler.start_text_input("Client", "X", "Client name");
        handler.handle_input(key(KeyCode::Backspace));
        let dialog = handler.current_dialog.as_ref().expect("dialog");
        assert!(dialog.shows_placeholder());
        assert_eq!(dialog.get_display_value(), "Client name");
    }
}
