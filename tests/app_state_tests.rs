//! Tests for Application State Management
//!
//! These tests verify:
//! - AppState default initialization
//! - Builder, admin and proposal transitions
//! - Key dispatch through the App controller
//! - Export failure leaves the selection untouched

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quotecraft::app::{App, AppMode, AppState, EXPORT_FAILED_NOTICE, EditTarget};
use quotecraft::catalog::Catalog;
use quotecraft::config::ProposalConfig;
use quotecraft::types::Tier;
use tempfile::tempdir;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(key(code)).expect("key handled")
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

// =============================================================================
// AppState Default Tests
// =============================================================================

#[test]
fn test_app_state_default_mode_is_builder() {
    let state = AppState::default();
    assert_eq!(state.mode, AppMode::Builder);
    assert_eq!(state.phase_cursor, 0);
    assert!(state.admin.is_none());
    assert!(state.proposal.is_none());
    assert!(!state.help_visible);
}

#[test]
fn test_app_state_uses_default_client() {
    let config = ProposalConfig::default();
    let state = AppState::default();
    assert_eq!(state.selection.client_name(), config.default_client);

    let named = AppState::new(
        &Catalog::builtin(),
        config,
        Some("ACME".to_string()),
        ".".into(),
    );
    assert_eq!(named.selection.client_name(), "ACME");
}

#[test]
fn test_app_mode_titles_are_distinct() {
    let titles = [
        AppMode::Builder.title(),
        AppMode::Admin.title(),
        AppMode::Proposal.title(),
    ];
    assert_ne!(titles[0], titles[1]);
    assert_ne!(titles[1], titles[2]);
}

// =============================================================================
// Builder Transitions
// =============================================================================

#[test]
fn test_cursor_clamps_at_both_ends() {
    let mut state = AppState::default();
    state.move_cursor(-1);
    assert_eq!(state.phase_cursor, 0);
    state.cursor_to(usize::MAX);
    assert_eq!(state.phase_cursor, 5);
    state.move_cursor(1);
    assert_eq!(state.phase_cursor, 5);
}

#[test]
fn test_toggle_and_tier_act_on_cursor_phase() {
    let mut state = AppState::default();
    state.move_cursor(1);
    state.toggle_selected();
    state.flip_tier();

    let phase = state.selection.phase("p2").expect("p2");
    assert!(!phase.enabled);
    assert_eq!(phase.selected_tier, Tier::StandardPlus);
    assert!(state.selection.phase("p1").expect("p1").enabled);
}

#[test]
fn test_expand_toggles() {
    let mut state = AppState::default();
    state.toggle_expanded();
    assert!(state.is_expanded("p1"));
    state.toggle_expanded();
    assert!(!state.is_expanded("p1"));
}

// =============================================================================
// Admin Transitions
// =============================================================================

#[test]
fn test_admin_save_commits_staged_prices() {
    let mut state = AppState::default();
    state.enter_admin();
    assert_eq!(state.mode, AppMode::Admin);
    state.commit_edit(
        EditTarget::Price {
            phase_id: "p1".into(),
            tier: Tier::Starter,
        },
        "18000",
    );
    // Nothing reaches the selection before saving
    assert_eq!(state.selection.phase("p1").map(|p| p.starter.price), Some(15_000));

    state.admin_save();
    assert_eq!(state.mode, AppMode::Builder);
    assert!(state.admin.is_none());
    assert_eq!(state.selection.phase("p1").map(|p| p.starter.price), Some(18_000));
}

#[test]
fn test_admin_cancel_discards_staged_prices() {
    let mut state = AppState::default();
    let before = state.selection.totals();
    state.enter_admin();
    state.commit_edit(
        EditTarget::Price {
            phase_id: "p2".into(),
            tier: Tier::StandardPlus,
        },
        "1",
    );
    state.admin_cancel();
    assert_eq!(state.mode, AppMode::Builder);
    assert_eq!(state.selection.totals(), before);
    assert!(state.status_message.contains("discarded"));
}

#[test]
fn test_admin_non_numeric_price_stages_zero() {
    let mut state = AppState::default();
    state.enter_admin();
    state.commit_edit(
        EditTarget::Price {
            phase_id: "p1".into(),
            tier: Tier::Starter,
        },
        "abc",
    );
    state.admin_save();
    let phase = state.selection.phase("p1").expect("p1");
    assert_eq!(phase.starter.price, 0);
    assert_eq!(phase.standard_plus.price, 25_000);
}

// =============================================================================
// Proposal Transitions
// =============================================================================

#[test]
fn test_open_proposal_renders_preview() {
    let mut state = AppState::default();
    state.open_proposal();
    assert_eq!(state.mode, AppMode::Proposal);
    let view = state.proposal.as_ref().expect("preview");
    assert!(view.page_count >= 1);
    assert!(view.lines[0].contains("Page 1"));

    state.scroll_proposal(3);
    assert_eq!(state.proposal.as_ref().map(|v| v.scroll), Some(3));
    state.scroll_proposal_to(usize::MAX);
    let view = state.proposal.as_ref().expect("preview");
    assert_eq!(view.scroll, view.lines.len() - 1);

    state.close_proposal();
    assert_eq!(state.mode, AppMode::Builder);
    assert!(state.proposal.is_none());
}

#[test]
fn test_export_writes_into_out_dir() {
    let dir = tempdir().expect("temp dir");
    let mut state = AppState::new(
        &Catalog::builtin(),
        ProposalConfig::default(),
        Some("Djoudi Promotion".into()),
        dir.path().to_path_buf(),
    );
    state.open_proposal();
    state.export();
    assert!(state.status_message.starts_with("Exported"));
    assert!(dir.path().join("Offre_Osmoz_Djoudi_Promotion.pdf").exists());
}

#[test]
fn test_export_failure_leaves_selection_untouched() {
    let dir = tempdir().expect("temp dir");
    // A regular file where the output directory should be
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").expect("write");

    let mut state = AppState::new(
        &Catalog::builtin(),
        ProposalConfig::default(),
        None,
        blocker,
    );
    state.select_tier(Tier::StandardPlus);
    let before = state.selection.totals();
    let phases_before: Vec<_> = state.selection.phases().to_vec();

    state.open_proposal();
    state.export();

    assert_eq!(state.status_message, EXPORT_FAILED_NOTICE);
    assert_eq!(state.selection.totals(), before);
    assert_eq!(state.selection.phases(), phases_before.as_slice());
    assert_eq!(state.mode, AppMode::Proposal);
}

// =============================================================================
// App Key Dispatch
// =============================================================================

#[test]
fn test_quit_keys() {
    let mut app = App::new(AppState::default());
    assert!(press(&mut app, KeyCode::Char('q')));
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.handle_key_event(ctrl_c).expect("handled"));
}

#[test]
fn test_builder_keys_drive_selection() {
    let mut app = App::new(AppState::default());
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('2'));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));

    let state = app.state();
    assert_eq!(state.phase_cursor, 2);
    assert_eq!(
        state.selection.phase("p2").map(|p| p.selected_tier),
        Some(Tier::StandardPlus)
    );
    assert_eq!(state.selection.phase("p3").map(|p| p.enabled), Some(false));
    assert_eq!(state.selection.totals().total, 305_000 + 60_000 - 90_000);
}

#[test]
fn test_client_name_dialog() {
    let mut app = App::new(AppState::default());
    press(&mut app, KeyCode::Char('c'));
    assert!(app.is_dialog_active());

    // Clear the current value, then type a new one
    app.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
        .expect("handled");
    // 'q' is text here, not quit
    assert!(!press(&mut app, KeyCode::Char('q')));
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "ACME Immo");
    press(&mut app, KeyCode::Enter);

    assert!(!app.is_dialog_active());
    assert_eq!(app.state().selection.client_name(), "ACME Immo");
    assert!(app.state().editing.is_none());
}

#[test]
fn test_admin_price_dialog_round_trip() {
    let mut app = App::new(AppState::default());
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.state().mode, AppMode::Admin);

    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);
    assert!(app.is_dialog_active());
    app.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
        .expect("handled");
    type_text(&mut app, "30000");
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Char('s'));
    assert_eq!(app.state().mode, AppMode::Builder);
    assert_eq!(
        app.state().selection.phase("p1").map(|p| p.standard_plus.price),
        Some(30_000)
    );
}

#[test]
fn test_escape_in_admin_discards() {
    let mut app = App::new(AppState::default());
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "9");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().mode, AppMode::Builder);
    assert_eq!(
        app.state().selection.phase("p1").map(|p| p.starter.price),
        Some(15_000)
    );
}

#[test]
fn test_help_overlay_swallows_keys() {
    let mut app = App::new(AppState::default());
    press(&mut app, KeyCode::Char('?'));
    assert!(app.state().help_visible);
    assert!(!press(&mut app, KeyCode::Down));
    assert_eq!(app.state().phase_cursor, 0);
    press(&mut app, KeyCode::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_proposal_keys() {
    let mut app = App::new(AppState::default());
    press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.state().mode, AppMode::Proposal);
    press(&mut app, KeyCode::PageDown);
    assert!(app.state().proposal.as_ref().map(|v| v.scroll) > Some(0));
    press(&mut app, KeyCode::Home);
    assert_eq!(app.state().proposal.as_ref().map(|v| v.scroll), Some(0));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().mode, AppMode::Builder);
}
