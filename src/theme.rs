//! Centralized theme and styling for the TUI
//!
//! Single source of truth for the colors, styles and layout constants used
//! by the views.
//!
//! # Usage
//! ```rust
//! use quotecraft::theme::{Colors, Styles, Theme};
//! use quotecraft::types::Tier;
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let badge = Theme::tier_style(Tier::StandardPlus);
//! ```

use ratatui::style::{Color, Modifier, Style};

use crate::types::Tier;

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors (backgrounds, foregrounds)
    // -------------------------------------------------------------------------

    /// Primary dark background - used for dialogs and overlays
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Summary panel background, the navy of the printed summary
    pub const BG_SUMMARY: Color = Color::Rgb(15, 23, 42);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors (branding, emphasis)
    // -------------------------------------------------------------------------

    /// Brand blue - borders, titles, highlights
    pub const PRIMARY: Color = Color::Rgb(96, 165, 250);

    /// Secondary accent color - prices and emphasis
    pub const SECONDARY: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // Semantic Colors (status, feedback)
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;

    pub const WARNING: Color = Color::Yellow;

    pub const ERROR: Color = Color::Red;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Rgb(96, 165, 250);

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Rgb(37, 99, 235);

    /// Selected item text
    pub const SELECTED_FG: Color = Color::White;

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;

    /// Starter badge
    pub const TIER_STARTER: Color = Color::Gray;

    /// Standard Plus badge
    pub const TIER_PLUS: Color = Color::Cyan;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    // -------------------------------------------------------------------------
    // Text Styles
    // -------------------------------------------------------------------------

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Muted text
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Secondary text (gray)
    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Bold text
    pub fn text_bold() -> Style {
        Style::default()
            .fg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Main title style
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Amounts
    pub fn price() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    // -------------------------------------------------------------------------
    // Border/Block Styles
    // -------------------------------------------------------------------------

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Overlay background
    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PRIMARY)
    }

    /// Summary panel background
    pub fn summary_bg() -> Style {
        Style::default().bg(Colors::BG_SUMMARY).fg(Colors::FG_PRIMARY)
    }

    // -------------------------------------------------------------------------
    // Selection Styles
    // -------------------------------------------------------------------------

    /// Selected/highlighted item
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    // -------------------------------------------------------------------------
    // Features
    // -------------------------------------------------------------------------

    /// Feature included in the current selection
    pub fn feature_included() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Exclusive feature not part of the current selection
    pub fn feature_excluded() -> Style {
        Style::default()
            .fg(Colors::FG_MUTED)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    // -------------------------------------------------------------------------
    // Status/Feedback Styles
    // -------------------------------------------------------------------------

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    /// Navigation hint (keybindings)
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }
}

// =============================================================================
// THEME CONTEXT
// =============================================================================

/// Theme context providing semantic style lookups
pub struct Theme;

impl Theme {
    /// Badge style of a tier
    pub fn tier_style(tier: Tier) -> Style {
        let color = match tier {
            Tier::Starter => Colors::TIER_STARTER,
            Tier::StandardPlus => Colors::TIER_PLUS,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Style a status message by what it reports
    pub fn status_style(message: &str) -> Style {
        let lower = message.to_lowercase();
        if lower.contains("could not") || lower.contains("failed") {
            Styles::error()
        } else if lower.contains("discarded") || lower.contains("staged") {
            Styles::warning()
        } else if lower.contains("exported") || lower.contains("saved") {
            Styles::success()
        } else {
            Styles::text_secondary()
        }
    }
}

// =============================================================================
// UI CONSTANTS
// =============================================================================

/// UI dimension and layout constants
pub struct UiConstants;

impl UiConstants {
    /// Default dialog width percentage
    pub const DIALOG_WIDTH_PCT: u16 = 60;

    /// Minimum dialog width
    pub const DIALOG_MIN_WIDTH: u16 = 40;

    /// Nav bar height
    pub const NAV_BAR_HEIGHT: u16 = 1;

    /// Header height
    pub const HEADER_HEIGHT: u16 = 3;

    /// Status bar height
    pub const STATUS_BAR_HEIGHT: u16 = 1;

    /// Width of the builder's summary column
    pub const SUMMARY_WIDTH: u16 = 40;

    /// Scroll page size (lines)
    pub const PAGE_SCROLL_SIZE: usize = 20;
}
