//! QuoteCraft Library
//!
//! Core of a commercial quote configurator: a catalog of phases sold at two
//! tiers, live pricing, and a paginated proposal laid out once and rendered
//! both as a terminal preview and as a PDF.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod input;
pub mod pricing;
pub mod selection;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use catalog::{Catalog, Phase, TierOffer};
pub use config::ProposalConfig;
pub use document::{Document, LayoutEngine, LayoutError, ProposalDraft};
pub use error::{QuoteError, Result};
pub use export::{export_file_name, export_proposal};
pub use pricing::{FeatureLine, Totals, aggregate, resolve_features};
pub use selection::{PriceEdit, SelectionState};
pub use types::Tier;
