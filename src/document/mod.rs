//! Proposal document: layout engine plus PDF and text renderers
//!
//! ```text
//! SelectionState ──> ProposalDraft ──> LayoutEngine ──> Document ──┬──> render_pdf
//!                                                                  └──> render_text
//! ```

pub mod geometry;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod pdf;
pub mod preview;
pub mod reference;

pub use geometry::{PageGeometry, Rgb};
pub use layout::{CursorState, LayoutEngine, LayoutError, PhaseLine, ProposalDraft, long_date};
pub use model::{BlockKind, Document, DrawOp, LayoutEvent, Page, PlacedBlock};
pub use pdf::render_pdf;
pub use preview::render_text;
pub use reference::DocumentReference;
