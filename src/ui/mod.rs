//! UI rendering module
//!
//! Draws the three views of the configurator. Rendering only reads
//! [`AppState`]; every change goes through the controller.
//!
//! # Module Structure
//! - `header` - Title bar, status line and navigation bar
//! - `builder` - Phase cards and the pricing summary
//! - `admin` - Price table for both tiers
//! - `proposal` - Paginated proposal preview
//! - `dialogs` - Input dialog drawn above any view

mod admin;
mod builder;
mod dialogs;
mod header;
mod proposal;

use crate::app::{AppMode, AppState};
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::input::InputHandler;
use crate::theme::UiConstants;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
};

/// Main UI renderer
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    /// Create a new UI renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the current view with its navigation bar and overlays
    pub fn render(
        &self,
        f: &mut Frame,
        state: &AppState,
        input_handler: &InputHandler,
        keybinding_ctx: &KeybindingContext,
    ) {
        let [header_area, content_area, status_area, nav_area] = Layout::vertical([
            Constraint::Length(UiConstants::HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(UiConstants::STATUS_BAR_HEIGHT),
            Constraint::Length(UiConstants::NAV_BAR_HEIGHT),
        ])
        .areas(f.area());

        header::render_header(f, header_area, state);

        match state.mode {
            AppMode::Builder => builder::render_builder(f, content_area, state),
            AppMode::Admin => admin::render_admin(f, content_area, state),
            AppMode::Proposal => proposal::render_proposal(f, content_area, state),
        }

        header::render_status(f, status_area, &state.status_message);
        header::render_nav_bar(f, nav_area, &keybinding_ctx.get_nav_items(&state.mode));

        if let Some(dialog) = input_handler.current_dialog.as_ref() {
            dialogs::render_input_dialog(f, dialog);
        }

        if state.help_visible {
            let area = f.area();
            HelpOverlay::new(&state.mode, keybinding_ctx).render(f, area);
        }
    }
}

/// Rect of the given size centered in `area`, clipped to it
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
