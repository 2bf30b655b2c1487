//! Laid-out document: pages of drawing operations plus placement records
//!
//! Both renderers (PDF and text preview) consume this structure, so the
//! preview and the exported file always share one logical layout.

use std::fmt;

use super::geometry::{PageGeometry, Point, Rect, Rgb};
use super::metrics::FontStyle;
use super::reference::DocumentReference;

/// Horizontal anchoring of a text run relative to its `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Outline parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

/// A single drawing instruction. `y` of text is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        style: FontStyle,
        color: Rgb,
        align: Align,
    },
    Rect {
        rect: Rect,
        fill: Option<Rgb>,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    /// Check mark glyph in front of a feature
    CheckMark {
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
    },
}

/// One physical page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Kind of content block placed by the layout engine
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Header,
    Contacts,
    Introduction,
    ModulesHeading,
    /// A selected phase, by catalog id
    Phase(String),
    FinancialSummary,
    IssuerSignature,
    ClientSignature,
    /// Page furniture in the bottom margin
    Footer,
}

impl BlockKind {
    /// Footer lines sit in the margin and are not content
    pub fn is_content(&self) -> bool {
        !matches!(self, Self::Footer)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Contacts => write!(f, "contacts"),
            Self::Introduction => write!(f, "introduction"),
            Self::ModulesHeading => write!(f, "modules heading"),
            Self::Phase(id) => write!(f, "phase {}", id),
            Self::FinancialSummary => write!(f, "financial summary"),
            Self::IssuerSignature => write!(f, "issuer signature"),
            Self::ClientSignature => write!(f, "client signature"),
            Self::Footer => write!(f, "footer"),
        }
    }
}

/// Where a block ended up
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub kind: BlockKind,
    /// Zero-based page index
    pub page: usize,
    pub bounds: Rect,
}

/// Events emitted while laying out
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// A new page was started because `before` did not fit
    PageBreak { before: BlockKind, new_page: usize },
}

/// Result of a layout run
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub geometry: PageGeometry,
    pub title: String,
    pub reference: DocumentReference,
    pub pages: Vec<Page>,
    pub blocks: Vec<PlacedBlock>,
    pub events: Vec<LayoutEvent>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Blocks that must stay inside the printable area
    pub fn content_blocks(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.blocks.iter().filter(|b| b.kind.is_content())
    }

    /// Find where a block was placed
    pub fn block(&self, kind: &BlockKind) -> Option<&PlacedBlock> {
        self.blocks.iter().find(|b| &b.kind == kind)
    }

    /// Blocks that triggered a page break, in order
    pub fn page_breaks(&self) -> impl Iterator<Item = &BlockKind> {
        self.events.iter().map(|event| match event {
            LayoutEvent::PageBreak { before, .. } => before,
        })
    }
}
