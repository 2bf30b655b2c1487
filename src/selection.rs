//! Selection state: which phases are enabled and which tier each uses.
//!
//! This is the single source of truth for both the on-screen summary and the
//! proposal document. It is owned by the controller and only changed through
//! the operations below. Each mutation swaps in a new `Arc<Phase>` for the
//! one affected phase; all other entries stay pointer-equal, so a caller can
//! detect changes with `Arc::ptr_eq`.
//!
//! Operations naming an unknown phase id are silent no-ops.

use std::sync::Arc;

use crate::catalog::{Catalog, Phase};
use crate::pricing::{self, FeatureLine, Totals};
use crate::types::Tier;

/// A staged administrative price change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceEdit {
    pub phase_id: String,
    pub tier: Tier,
    pub price: i64,
}

/// Current client name and per-phase selection
#[derive(Debug, Clone)]
pub struct SelectionState {
    client_name: String,
    phases: Vec<Arc<Phase>>,
}

impl SelectionState {
    /// Create the startup selection: every phase enabled on Starter
    pub fn new(catalog: &Catalog, client_name: impl Into<String>) -> Self {
        let mut catalog = catalog.clone();
        catalog.reset_selection();
        Self {
            client_name: client_name.into(),
            phases: catalog.phases.into_iter().map(Arc::new).collect(),
        }
    }

    /// Client the proposal is prepared for
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Replace the client name
    pub fn set_client_name(&mut self, name: impl Into<String>) {
        self.client_name = name.into();
    }

    /// All phases in catalog order
    pub fn phases(&self) -> &[Arc<Phase>] {
        &self.phases
    }

    /// Look up a phase by id
    pub fn phase(&self, id: &str) -> Option<&Arc<Phase>> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Enabled phases in catalog order
    pub fn enabled_phases(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter().map(Arc::as_ref).filter(|p| p.enabled)
    }

    /// Flip whether a phase is part of the quote
    pub fn toggle_enabled(&mut self, id: &str) {
        self.update(id, |phase| phase.enabled = !phase.enabled);
    }

    /// Choose the tier of a phase
    pub fn select_tier(&mut self, id: &str, tier: Tier) {
        self.update(id, |phase| phase.selected_tier = tier);
    }

    /// Administrative price change for one tier of a phase
    pub fn set_price(&mut self, id: &str, tier: Tier, price: i64) {
        self.update(id, |phase| phase.offer_mut(tier).price = price);
    }

    /// Administrative price change from raw user text.
    ///
    /// Anything that does not parse as an integer is stored as zero.
    pub fn set_price_input(&mut self, id: &str, tier: Tier, raw: &str) {
        self.set_price(id, tier, parse_price_input(raw));
    }

    /// Commit a batch of staged price edits
    pub fn apply_price_edits(&mut self, edits: &[PriceEdit]) {
        for edit in edits {
            self.set_price(&edit.phase_id, edit.tier, edit.price);
        }
    }

    /// Current totals, recomputed on every call
    pub fn totals(&self) -> Totals {
        pricing::aggregate(self.phases.iter().map(Arc::as_ref))
    }

    /// Feature inclusion list for one phase, `None` for unknown ids
    pub fn features(&self, id: &str) -> Option<Vec<FeatureLine>> {
        self.phase(id).map(|p| pricing::resolve_features(p))
    }

    /// Snapshot of the phases as a catalog
    pub fn to_catalog(&self) -> Catalog {
        Catalog {
            phases: self.phases.iter().map(|p| Phase::clone(p)).collect(),
        }
    }

    fn update(&mut self, id: &str, change: impl FnOnce(&mut Phase)) {
        if let Some(slot) = self.phases.iter_mut().find(|p| p.id == id) {
            let mut phase = Phase::clone(slot);
            change(&mut phase);
            *slot = Arc::new(phase);
        }
    }
}

/// Coerce administrative price text to an integer, defaulting to zero.
///
/// Reads the leading integer of a permissive numeric field.
///
/// Leading whitespace and one sign are accepted, then digits up to the first
/// other character (`"12abc"` is 12, `"12.9"` is 12, `"1e5"` is 1). Input
/// without leading digits becomes `0`; out-of-range digits clamp to the `i64`
/// bounds.
pub fn parse_price_input(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return 0;
    }
    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    signed
        .parse::<i64>()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SelectionState {
        SelectionState::new(&Catalog::builtin(), "Djoudi Promotion")
    }

    #[test]
    fn test_new_selection_matches_catalog() {
        let s = state();
        assert_eq!(s.phases().len(), 6);
        assert_eq!(s.client_name(), "Djoudi Promotion");
        assert_eq!(s.enabled_phases().count(), 6);
    }

    #[test]
    fn test_toggle_replaces_only_target() {
        let mut s = state();
        let before: Vec<_> = s.phases().to_vec();

        s.toggle_enabled("p2");

        for (old, new) in before.iter().zip(s.phases()) {
            if old.id == "p2" {
                assert!(!Arc::ptr_eq(old, new));
                assert!(!new.enabled);
            } else {
                assert!(Arc::ptr_eq(old, new));
            }
        }
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut s = state();
        let before: Vec<_> = s.phases().to_vec();

        s.toggle_enabled("nope");
        s.select_tier("nope", Tier::StandardPlus);
        s.set_price("nope", Tier::Starter, 1);

        assert!(before.iter().zip(s.phases()).all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn test_parse_price_input() {
        assert_eq!(parse_price_input("15000"), 15_000);
        assert_eq!(parse_price_input("  42 "), 42);
        assert_eq!(parse_price_input("12.9"), 12);
        assert_eq!(parse_price_input("-7"), -7);
        assert_eq!(parse_price_input("abc"), 0);
        assert_eq!(parse_price_input(""), 0);
        assert_eq!(parse_price_input("-"), 0);
    }

    #[test]
    fn test_parse_price_input_keeps_leading_integer() {
        assert_eq!(parse_price_input("12abc"), 12);
        assert_eq!(parse_price_input("1e5"), 1);
        assert_eq!(parse_price_input("+300 EUR"), 300);
        assert_eq!(parse_price_input("abc12"), 0);
        assert_eq!(parse_price_input("99999999999999999999"), i64::MAX);
        assert_eq!(parse_price_input("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_apply_price_edits() {
        let mut s = state();
        s.apply_price_edits(&[
            PriceEdit { phase_id: "p1".into(), tier: Tier::Starter, price: 1 },
            PriceEdit { phase_id: "p1".into(), tier: Tier::StandardPlus, price: 2 },
        ]);
        let p1 = s.phase("p1").expect("p1");
        assert_eq!((p1.starter.price, p1.standard_plus.price), (1, 2));
    }

    #[test]
    fn test_features_for_unknown_phase() {
        assert!(state().features("missing").is_none());
        assert_eq!(state().features("p1").map(|f| f.len()), Some(7));
    }
}
