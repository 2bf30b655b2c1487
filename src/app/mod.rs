//! Application module
//!
//! Contains the main application logic, state management, and event handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, AdminDraft, etc.)
//! - Main module - App struct and event loop

mod state;

// Re-export state types for external use
pub use state::{
    AdminDraft, AdminRow, AppMode, AppState, EXPORT_FAILED_NOTICE, EditTarget, ProposalView,
};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::Result;
use crate::input::{InputHandler, InputResult};
use crate::theme::UiConstants;
use crate::types::Tier;
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::Duration;
use tracing::{debug, info};

/// Main application struct
///
/// The state is owned directly: the event loop is the only writer and
/// rendering borrows it between events.
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    input_handler: InputHandler,
    /// Keybinding context for dispatch and navigation hints
    keybinding_context: KeybindingContext,
}

impl App {
    /// Create a new application around an initial state
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            ui_renderer: UiRenderer::new(),
            input_handler: InputHandler::new(),
            keybinding_context: KeybindingContext::new(),
        }
    }

    /// Current application state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Keybinding registry
    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Whether an input dialog is open
    pub fn is_dialog_active(&self) -> bool {
        self.input_handler.is_dialog_active()
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            terminal.draw(|f| {
                self.ui_renderer.render(
                    f,
                    &self.state,
                    &self.input_handler,
                    &self.keybinding_context,
                )
            })?;

            if crossterm::event::poll(Duration::from_millis(50))? {
                match crossterm::event::read()? {
                    Event::Key(key_event) => {
                        if self.handle_key_event(key_event)? {
                            break; // Exit requested
                        }
                    }
                    // Next draw picks up the new size
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                    }
                    _ => {}
                }
            }
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Handle a key event. Returns `true` when the application should exit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(false);
        }

        if self.state.help_visible {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.state.help_visible = false;
            }
            return Ok(false);
        }

        if self.input_handler.is_dialog_active() {
            match self.input_handler.handle_input(key_event) {
                InputResult::Confirm(value) => {
                    if let Some(target) = self.state.editing.take() {
                        self.state.commit_edit(target, &value);
                    }
                }
                InputResult::Cancel => {
                    self.state.editing = None;
                }
                InputResult::Continue => {}
            }
            return Ok(false);
        }

        let Some(action) = self
            .keybinding_context
            .action_for(&self.state.mode, &key_event)
        else {
            return Ok(false);
        };
        debug!(?action, mode = ?self.state.mode, "Key action");

        match action {
            KeyAction::Quit => return Ok(true),
            KeyAction::Help => self.toggle_help(),
            _ => match self.state.mode {
                AppMode::Builder => self.handle_builder_action(action),
                AppMode::Admin => self.handle_admin_action(action),
                AppMode::Proposal => self.handle_proposal_action(action),
            },
        }
        Ok(false)
    }

    fn handle_builder_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::NavigateUp => self.state.move_cursor(-1),
            KeyAction::NavigateDown => self.state.move_cursor(1),
            KeyAction::Home => self.state.cursor_to(0),
            KeyAction::End => self.state.cursor_to(usize::MAX),
            KeyAction::ToggleEnabled => self.state.toggle_selected(),
            KeyAction::SelectStarter => self.state.select_tier(Tier::Starter),
            KeyAction::SelectPlus => self.state.select_tier(Tier::StandardPlus),
            KeyAction::FlipTier => self.state.flip_tier(),
            KeyAction::ToggleFeatures => self.state.toggle_expanded(),
            KeyAction::EditClient => {
                let current = self.state.selection.client_name().to_string();
                self.input_handler
                    .start_text_input("Client", &current, "Client name");
                self.state.editing = Some(EditTarget::ClientName);
            }
            KeyAction::OpenAdmin => self.state.enter_admin(),
            KeyAction::OpenProposal => self.state.open_proposal(),
            _ => {}
        }
    }

    fn handle_admin_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::NavigateUp | KeyAction::NavigateDown => {
                let delta = if action == KeyAction::NavigateUp { -1 } else { 1 };
                if let Some(admin) = self.state.admin.as_mut() {
                    admin.move_cursor(delta);
                }
            }
            KeyAction::SwitchColumn => {
                if let Some(admin) = self.state.admin.as_mut() {
                    admin.switch_column();
                }
            }
            KeyAction::EditPrice => {
                let Some(admin) = self.state.admin.as_ref() else {
                    return;
                };
                let Some(row) = admin.selected() else {
                    return;
                };
                let tier = admin.column;
                self.input_handler
                    .start_price_input(&format!("{} ({})", row.title, tier), row.price(tier));
                self.state.editing = Some(EditTarget::Price {
                    phase_id: row.phase_id.clone(),
                    tier,
                });
            }
            KeyAction::Save => self.state.admin_save(),
            KeyAction::Back => self.state.admin_cancel(),
            _ => {}
        }
    }

    fn handle_proposal_action(&mut self, action: KeyAction) {
        let page = UiConstants::PAGE_SCROLL_SIZE as isize;
        match action {
            KeyAction::NavigateUp => self.state.scroll_proposal(-1),
            KeyAction::NavigateDown => self.state.scroll_proposal(1),
            KeyAction::PageUp => self.state.scroll_proposal(-page),
            KeyAction::PageDown => self.state.scroll_proposal(page),
            KeyAction::Home => self.state.scroll_proposal_to(0),
            KeyAction::End => self.state.scroll_proposal_to(usize::MAX),
            KeyAction::Export => self.state.export(),
            KeyAction::Back => self.state.close_proposal(),
            _ => {}
        }
    }
}
