//! Tests for the selection state
//!
//! These tests verify:
//! - Startup state from a catalog
//! - Each mutation replaces exactly one phase record
//! - Unknown ids are silent no-ops
//! - Administrative price coercion
//! - Catalog file round trips

use std::sync::Arc;

use quotecraft::catalog::Catalog;
use quotecraft::selection::{PriceEdit, SelectionState};
use quotecraft::types::Tier;
use tempfile::TempDir;

fn selection() -> SelectionState {
    SelectionState::new(&Catalog::builtin(), "Djoudi Promotion")
}

/// Indices of phases whose record is no longer the same allocation
fn replaced(before: &SelectionState, after: &SelectionState) -> Vec<usize> {
    before
        .phases()
        .iter()
        .zip(after.phases())
        .enumerate()
        .filter(|(_, (a, b))| !Arc::ptr_eq(a, b))
        .map(|(index, _)| index)
        .collect()
}

// =============================================================================
// Startup State
// =============================================================================

#[test]
fn test_startup_state_all_enabled_on_starter() {
    let mut catalog = Catalog::builtin();
    catalog.phases[2].enabled = false;
    catalog.phases[3].selected_tier = Tier::StandardPlus;

    let state = SelectionState::new(&catalog, "ACME");
    assert_eq!(state.client_name(), "ACME");
    assert!(state.phases().iter().all(|p| p.enabled));
    assert!(state.phases().iter().all(|p| p.selected_tier == Tier::Starter));
}

// =============================================================================
// Mutations
// =============================================================================

#[test]
fn test_toggle_replaces_exactly_one_record() {
    let before = selection();
    let mut after = before.clone();
    after.toggle_enabled("p3");
    assert_eq!(replaced(&before, &after), vec![2]);
    assert!(!after.phases()[2].enabled);

    after.toggle_enabled("p3");
    assert!(after.phases()[2].enabled);
}

#[test]
fn test_select_tier_replaces_exactly_one_record() {
    let before = selection();
    let mut after = before.clone();
    after.select_tier("p5", Tier::StandardPlus);
    assert_eq!(replaced(&before, &after), vec![4]);
    assert_eq!(after.totals().total - before.totals().total, 40_000);
}

#[test]
fn test_set_price_changes_only_the_price() {
    let before = selection();
    let mut after = before.clone();
    after.set_price("p1", Tier::Starter, 18_000);

    let old = &before.phases()[0];
    let new = &after.phases()[0];
    assert_eq!(new.starter.price, 18_000);
    assert_eq!(new.starter.features, old.starter.features);
    assert_eq!(new.standard_plus, old.standard_plus);
    assert_eq!(new.title, old.title);
    assert_eq!(replaced(&before, &after), vec![0]);
}

#[test]
fn test_unknown_ids_are_noops() {
    let before = selection();
    let mut after = before.clone();
    after.toggle_enabled("missing");
    after.select_tier("missing", Tier::StandardPlus);
    after.set_price("missing", Tier::Starter, 1);
    after.set_price_input("missing", Tier::Starter, "abc");
    assert!(replaced(&before, &after).is_empty());
    assert_eq!(before.totals(), after.totals());
}

#[test]
fn test_non_numeric_price_input_becomes_zero() {
    let mut state = selection();
    let plus_before = state.phases()[0].standard_plus.clone();
    state.set_price_input("p1", Tier::Starter, "fifteen thousand");
    assert_eq!(state.phases()[0].starter.price, 0);
    assert_eq!(state.phases()[0].standard_plus, plus_before);
    assert!(!state.phases()[0].starter.features.is_empty());
}

#[test]
fn test_price_input_accepts_padded_numbers() {
    let mut state = selection();
    state.set_price_input("p1", Tier::StandardPlus, "  27000 ");
    assert_eq!(state.phases()[0].standard_plus.price, 27_000);
}

#[test]
fn test_max_price_input_keeps_totals_finite() {
    let mut state = selection();
    state.set_price_input("p1", Tier::Starter, "9223372036854775807");
    assert_eq!(state.phases()[0].starter.price, i64::MAX);

    let totals = state.totals();
    assert_eq!(totals.total, i64::MAX);
    assert_eq!(totals.starter_subtotal, i64::MAX);
    assert_eq!(totals.plus_subtotal, 595_000);

    state.select_tier("p1", Tier::StandardPlus);
    assert_eq!(state.totals().total, 595_000);
}

#[test]
fn test_apply_price_edits_batch() {
    let mut state = selection();
    state.apply_price_edits(&[
        PriceEdit {
            phase_id: "p1".into(),
            tier: Tier::Starter,
            price: 10_000,
        },
        PriceEdit {
            phase_id: "p6".into(),
            tier: Tier::StandardPlus,
            price: 60_000,
        },
        PriceEdit {
            phase_id: "ghost".into(),
            tier: Tier::Starter,
            price: 1,
        },
    ]);
    assert_eq!(state.phases()[0].starter.price, 10_000);
    assert_eq!(state.phases()[5].standard_plus.price, 60_000);
    assert_eq!(state.totals().starter_subtotal, 300_000);
}

// =============================================================================
// Derived Views
// =============================================================================

#[test]
fn test_features_follow_tier_selection() {
    let mut state = selection();
    let starter = state.features("p1").expect("phase exists");
    assert!(starter.iter().any(|f| !f.included));

    state.select_tier("p1", Tier::StandardPlus);
    let plus = state.features("p1").expect("phase exists");
    assert_eq!(starter.len(), plus.len());
    assert!(plus.iter().all(|f| f.included));
}

#[test]
fn test_catalog_round_trip_through_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("catalog.json");

    let mut state = selection();
    state.set_price("p2", Tier::StandardPlus, 150_000);
    state.toggle_enabled("p4");
    state.to_catalog().save_to_file(&path).expect("save");

    let loaded = Catalog::load_from_file(&path).expect("load");
    assert_eq!(loaded.len(), 6);
    assert_eq!(loaded.get("p2").map(|p| p.standard_plus.price), Some(150_000));
    // Loading restores the startup selection
    assert!(loaded.phases.iter().all(|p| p.enabled));
}
