//! Application state definitions
//!
//! Everything the controller owns: the selection, the active view, the
//! staged administrative price table and the rendered proposal preview.
//! Transitions live here as plain methods so they can be driven without a
//! terminal.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::config::ProposalConfig;
use crate::document::{LayoutEngine, ProposalDraft, render_text};
use crate::export::export_proposal;
use crate::selection::{PriceEdit, SelectionState, parse_price_input};
use crate::types::Tier;

/// Status shown after any failed export or preview
pub const EXPORT_FAILED_NOTICE: &str = "Could not generate the proposal. Please try again.";

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Phase cards, tier choice and the running total
    Builder,
    /// Price table for both tiers, edited on a local copy
    Admin,
    /// Paginated proposal preview and export
    Proposal,
}

impl AppMode {
    /// Display name of the view
    pub fn title(&self) -> &'static str {
        match self {
            Self::Builder => "Configurator",
            Self::Admin => "Price Administration",
            Self::Proposal => "Proposal",
        }
    }
}

/// What the open input dialog edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    ClientName,
    Price { phase_id: String, tier: Tier },
}

/// One row of the administrative price table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRow {
    pub phase_id: String,
    pub title: String,
    pub enabled: bool,
    pub starter: i64,
    pub standard_plus: i64,
}

impl AdminRow {
    pub fn price(&self, tier: Tier) -> i64 {
        match tier {
            Tier::Starter => self.starter,
            Tier::StandardPlus => self.standard_plus,
        }
    }

    fn price_mut(&mut self, tier: Tier) -> &mut i64 {
        match tier {
            Tier::Starter => &mut self.starter,
            Tier::StandardPlus => &mut self.standard_plus,
        }
    }
}

/// Local copy of the prices while the admin view is open.
///
/// Nothing reaches the selection until [`AppState::admin_save`]; leaving
/// with Esc drops the copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDraft {
    pub rows: Vec<AdminRow>,
    pub cursor: usize,
    pub column: Tier,
    original: Vec<AdminRow>,
}

impl AdminDraft {
    pub fn from_selection(selection: &SelectionState) -> Self {
        let rows: Vec<AdminRow> = selection
            .phases()
            .iter()
            .map(|phase| AdminRow {
                phase_id: phase.id.clone(),
                title: phase.title.clone(),
                enabled: phase.enabled,
                starter: phase.starter.price,
                standard_plus: phase.standard_plus.price,
            })
            .collect();
        Self {
            original: rows.clone(),
            rows,
            cursor: 0,
            column: Tier::Starter,
        }
    }

    /// Row under the cursor
    pub fn selected(&self) -> Option<&AdminRow> {
        self.rows.get(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = step(self.cursor, delta, self.rows.len());
    }

    /// Switch between the Starter and Standard Plus columns
    pub fn switch_column(&mut self) {
        self.column = self.column.other();
    }

    /// Stage a price from raw text; anything non-numeric stages zero
    pub fn set_price_input(&mut self, phase_id: &str, tier: Tier, raw: &str) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.phase_id == phase_id) {
            *row.price_mut(tier) = parse_price_input(raw);
        }
    }

    /// Whether any staged price differs from the selection
    pub fn is_dirty(&self) -> bool {
        self.rows != self.original
    }

    /// Whether the row at `index` carries a staged change
    pub fn row_changed(&self, index: usize) -> bool {
        self.rows.get(index) != self.original.get(index)
    }

    /// Staged changes as price edits
    pub fn edits(&self) -> Vec<PriceEdit> {
        let mut edits = Vec::new();
        for (row, before) in self.rows.iter().zip(&self.original) {
            for tier in [Tier::Starter, Tier::StandardPlus] {
                if row.price(tier) != before.price(tier) {
                    edits.push(PriceEdit {
                        phase_id: row.phase_id.clone(),
                        tier,
                        price: row.price(tier),
                    });
                }
            }
        }
        edits
    }
}

/// Rendered proposal preview, tied to one draft
#[derive(Debug, Clone)]
pub struct ProposalView {
    /// Snapshot shared by the preview and any export of it
    pub draft: ProposalDraft,
    pub lines: Vec<String>,
    pub page_count: usize,
    pub scroll: usize,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Single source of truth for the quote
    pub selection: SelectionState,
    /// Branding and document wording
    pub config: ProposalConfig,
    /// Phase card under the cursor in the builder
    pub phase_cursor: usize,
    /// Phases whose feature list is unfolded
    pub expanded: HashSet<String>,
    /// Staged price edits while in admin mode
    pub admin: Option<AdminDraft>,
    /// Proposal preview while in proposal mode
    pub proposal: Option<ProposalView>,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Field edited by the open input dialog
    pub editing: Option<EditTarget>,
    /// Directory exported proposals are written to
    pub out_dir: PathBuf,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            &Catalog::builtin(),
            ProposalConfig::default(),
            None,
            PathBuf::from("."),
        )
    }
}

impl AppState {
    /// Startup state: every phase enabled on Starter
    pub fn new(
        catalog: &Catalog,
        config: ProposalConfig,
        client: Option<String>,
        out_dir: PathBuf,
    ) -> Self {
        let client = client.unwrap_or_else(|| config.default_client.clone());
        Self {
            mode: AppMode::Builder,
            selection: SelectionState::new(catalog, client),
            config,
            phase_cursor: 0,
            expanded: HashSet::new(),
            admin: None,
            proposal: None,
            status_message: "Select the phases and tiers to include in the quote".to_string(),
            help_visible: false,
            editing: None,
            out_dir,
        }
    }

    // ------------------------------------------------------------------------
    // Builder
    // ------------------------------------------------------------------------

    /// Id of the phase under the cursor
    pub fn selected_phase_id(&self) -> Option<String> {
        self.selection
            .phases()
            .get(self.phase_cursor)
            .map(|phase| phase.id.clone())
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.phase_cursor = step(self.phase_cursor, delta, self.selection.phases().len());
    }

    pub fn cursor_to(&mut self, index: usize) {
        let last = self.selection.phases().len().saturating_sub(1);
        self.phase_cursor = index.min(last);
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_phase_id() {
            self.selection.toggle_enabled(&id);
        }
    }

    pub fn select_tier(&mut self, tier: Tier) {
        if let Some(id) = self.selected_phase_id() {
            self.selection.select_tier(&id, tier);
        }
    }

    pub fn flip_tier(&mut self) {
        let current = self
            .selected_phase_id()
            .and_then(|id| self.selection.phase(&id).map(|p| p.selected_tier));
        if let Some(tier) = current {
            self.select_tier(tier.other());
        }
    }

    /// Fold or unfold the feature list of the phase under the cursor
    pub fn toggle_expanded(&mut self) {
        if let Some(id) = self.selected_phase_id() {
            if !self.expanded.remove(&id) {
                self.expanded.insert(id);
            }
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    // ------------------------------------------------------------------------
    // Input dialogs
    // ------------------------------------------------------------------------

    /// Apply a confirmed input dialog value
    pub fn commit_edit(&mut self, target: EditTarget, value: &str) {
        match target {
            EditTarget::ClientName => {
                let name = value.trim();
                self.selection.set_client_name(name);
                self.status_message = format!("Client set to {}", name);
                debug!(client = name, "Client name changed");
            }
            EditTarget::Price { phase_id, tier } => {
                if let Some(admin) = self.admin.as_mut() {
                    admin.set_price_input(&phase_id, tier, value);
                    self.status_message =
                        "Price staged. Press S to save or Esc to discard".to_string();
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------------

    pub fn enter_admin(&mut self) {
        self.admin = Some(AdminDraft::from_selection(&self.selection));
        self.mode = AppMode::Admin;
        self.status_message = "Editing prices on a local copy".to_string();
        info!("Entered price administration");
    }

    /// Commit staged prices and return to the builder
    pub fn admin_save(&mut self) {
        if let Some(admin) = self.admin.take() {
            let edits = admin.edits();
            self.selection.apply_price_edits(&edits);
            self.status_message = format!("{} price change(s) saved", edits.len());
            info!(changes = edits.len(), "Price edits committed");
        }
        self.mode = AppMode::Builder;
    }

    /// Drop staged prices and return to the builder
    pub fn admin_cancel(&mut self) {
        if self.admin.take().is_some_and(|admin| admin.is_dirty()) {
            self.status_message = "Price changes discarded".to_string();
            debug!("Staged price edits discarded");
        }
        self.mode = AppMode::Builder;
    }

    // ------------------------------------------------------------------------
    // Proposal
    // ------------------------------------------------------------------------

    /// Snapshot the selection and render the paginated preview
    pub fn open_proposal(&mut self) {
        let draft = ProposalDraft::from_selection(&self.selection, &self.config);
        self.show_proposal(draft);
    }

    /// Render the preview of a given draft
    pub fn show_proposal(&mut self, draft: ProposalDraft) {
        match LayoutEngine::default().layout(&draft, &self.config) {
            Ok(document) => {
                info!(
                    reference = %draft.reference,
                    pages = document.page_count(),
                    "Proposal preview generated"
                );
                self.proposal = Some(ProposalView {
                    lines: render_text(&document),
                    page_count: document.page_count(),
                    draft,
                    scroll: 0,
                });
                self.mode = AppMode::Proposal;
                self.status_message = "Press E to export the PDF".to_string();
            }
            Err(e) => {
                error!(error = %e, "Proposal layout failed");
                self.status_message = EXPORT_FAILED_NOTICE.to_string();
            }
        }
    }

    pub fn close_proposal(&mut self) {
        self.proposal = None;
        self.mode = AppMode::Builder;
    }

    pub fn scroll_proposal(&mut self, delta: isize) {
        if let Some(view) = self.proposal.as_mut() {
            view.scroll = step(view.scroll, delta, view.lines.len());
        }
    }

    pub fn scroll_proposal_to(&mut self, line: usize) {
        if let Some(view) = self.proposal.as_mut() {
            view.scroll = line.min(view.lines.len().saturating_sub(1));
        }
    }

    /// Export the previewed draft. Failure leaves the selection untouched.
    pub fn export(&mut self) {
        let Some(view) = self.proposal.as_ref() else {
            warn!("Export requested without a proposal preview");
            return;
        };
        match export_proposal(&view.draft, &self.config, &self.out_dir) {
            Ok(path) => {
                self.status_message = format!("Exported {}", path.display());
            }
            Err(e) => {
                error!(error = %e, "Proposal export failed");
                self.status_message = EXPORT_FAILED_NOTICE.to_string();
            }
        }
    }
}

/// Move `index` by `delta` inside `0..len`, clamping at both ends
fn step(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, -1, 6), 0);
        assert_eq!(step(5, 1, 6), 5);
        assert_eq!(step(2, 3, 6), 5);
        assert_eq!(step(3, -1, 0), 0);
    }

    #[test]
    fn test_admin_edits_only_changed_prices() {
        let selection = SelectionState::new(&Catalog::builtin(), "ACME");
        let mut draft = AdminDraft::from_selection(&selection);
        assert!(!draft.is_dirty());

        draft.set_price_input("p2", Tier::StandardPlus, "150000");
        draft.set_price_input("p3", Tier::Starter, "90000");

        assert!(draft.is_dirty());
        assert_eq!(
            draft.edits(),
            vec![PriceEdit {
                phase_id: "p2".into(),
                tier: Tier::StandardPlus,
                price: 150_000
            }]
        );
    }
}
