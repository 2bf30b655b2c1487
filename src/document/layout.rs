//! Document Layout Engine
//!
//! Turns a [`ProposalDraft`] into a paginated [`Document`]. The engine walks
//! a single vertical cursor down fixed-size pages and places blocks in a
//! fixed order:
//!
//! | # | Block             | Height                                  |
//! |---|-------------------|-----------------------------------------|
//! | 1 | Header            | fixed                                   |
//! | 2 | Contacts          | fixed (two equal columns)               |
//! | 3 | Introduction      | heading + wrapped line count            |
//! | 4 | Modules heading   | fixed                                   |
//! | 5 | One per phase     | title + badge + two-column feature rows |
//! | 6 | Financial summary | fixed                                   |
//! | 7 | Signatures        | fixed (issuer and client side by side)  |
//! | 8 | Footer            | bottom margin of the last page          |
//!
//! # Cursor states
//!
//! ```text
//! Positioning -> PageBreakCheck -> Positioning -> ... -> Finished
//! ```
//!
//! Before every block the cursor enters `PageBreakCheck`: when the block's
//! height would cross the printable bottom, a new page starts and the cursor
//! returns to the top margin. Blocks are never split. Phase heights are
//! computed from the wrapped feature rows before anything is drawn, and the
//! drawing uses the very same rows, so the estimate is exact.
//!
//! # What This Explicitly Refuses To Do
//!
//! - Split a block across pages: a block taller than a whole printable page
//!   is reported as [`LayoutError::BlockTooTall`].
//! - Touch the selection: layout reads a draft snapshot only.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::geometry::{PageGeometry, Point, Rect, Rgb};
use super::metrics::{FontStyle, HelveticaMetrics, TextMetrics, fit_text, wrap_text};
use super::model::{Align, BlockKind, Document, DrawOp, LayoutEvent, Page, PlacedBlock, Stroke};
use super::reference::DocumentReference;
use crate::config::ProposalConfig;
use crate::pricing::{PAYMENT_SCHEDULE, format_amount, format_price};
use crate::selection::SelectionState;
use crate::types::Tier;

// ============================================================================
// Block dimensions (mm)
// ============================================================================

const HEADER_HEIGHT: f32 = 21.0;
const HEADER_GAP: f32 = 9.0;

const CONTACT_HEIGHT: f32 = 35.0;
const CONTACT_GAP: f32 = 10.0;
const CONTACT_GUTTER: f32 = 5.0;
const CONTACT_ROW: f32 = 5.0;
const CONTACT_FIRST_ROW: f32 = 16.0;

const INTRO_HEADING: f32 = 7.0;
const INTRO_LINE: f32 = 5.0;
const INTRO_GAP: f32 = 9.0;

const MODULES_HEADING_HEIGHT: f32 = 6.0;
const MODULES_HEADING_GAP: f32 = 4.0;

const PHASE_TITLE_ROW: f32 = 7.0;
const PHASE_BADGE_ROW: f32 = 8.0;
const FEATURE_LINE: f32 = 4.0;
const PHASE_TRAILER: f32 = 6.0;
const PHASE_GAP: f32 = 4.0;

const SUMMARY_HEIGHT: f32 = 40.0;
const SUMMARY_GAP: f32 = 10.0;
const TERMS_COLUMN: f32 = 40.0;

const SIGNATURE_HEIGHT: f32 = 37.0;
const SIGNATURE_LINE: f32 = 60.0;

const BREAK_EPSILON: f32 = 1e-3;

const MONTHS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];

/// Long French date (`16 octobre 2026`)
pub fn long_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

// ============================================================================
// Input
// ============================================================================

/// A selected phase as it appears in the proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseLine {
    pub id: String,
    pub title: String,
    pub tier: Tier,
    pub price: i64,
    /// The selected tier's own feature list, verbatim
    pub features: Vec<String>,
}

/// Immutable snapshot of everything the proposal shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalDraft {
    pub client_name: String,
    pub phases: Vec<PhaseLine>,
    pub total: i64,
    pub reference: DocumentReference,
    pub issued_on: NaiveDate,
}

impl ProposalDraft {
    /// Snapshot the selection with today's date and a fresh cosmetic reference
    pub fn from_selection(selection: &SelectionState, config: &ProposalConfig) -> Self {
        let today = chrono::Local::now().date_naive();
        let reference = DocumentReference::generate(config.reference_prefix.clone(), today.year());
        Self::with_reference(selection, reference, today)
    }

    /// Snapshot the selection with a known reference and date
    pub fn with_reference(
        selection: &SelectionState,
        reference: DocumentReference,
        issued_on: NaiveDate,
    ) -> Self {
        let phases = selection
            .enabled_phases()
            .map(|phase| PhaseLine {
                id: phase.id.clone(),
                title: phase.title.clone(),
                tier: phase.selected_tier,
                price: phase.selected_price(),
                features: phase.selected_offer().features.clone(),
            })
            .collect();

        Self {
            client_name: selection.client_name().to_string(),
            phases,
            total: selection.totals().total,
            reference,
            issued_on,
        }
    }
}

/// Layout failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{block} needs {height:.1} mm but a page only has {available:.1} mm")]
    BlockTooTall {
        block: BlockKind,
        height: f32,
        available: f32,
    },
}

// ============================================================================
// Engine
// ============================================================================

/// Cursor state of a layout run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Positioning,
    PageBreakCheck,
    Finished,
}

/// One row of the two-column feature grid, already wrapped
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Wrapped lines of the left and (optional) right cell
    pub cells: Vec<Vec<String>>,
    pub height: f32,
}

/// Paginating layout engine
#[derive(Debug, Clone)]
pub struct LayoutEngine<M = HelveticaMetrics> {
    geometry: PageGeometry,
    metrics: M,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(PageGeometry::A4_PORTRAIT, HelveticaMetrics)
    }
}

impl<M: TextMetrics> LayoutEngine<M> {
    pub fn new(geometry: PageGeometry, metrics: M) -> Self {
        Self { geometry, metrics }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Width of one contact box / feature column
    pub fn column_width(&self) -> f32 {
        (self.geometry.content_width() - CONTACT_GUTTER) / 2.0
    }

    fn feature_text_width(&self) -> f32 {
        self.column_width() - 8.0
    }

    fn feature_column_x(&self, column: usize) -> f32 {
        self.geometry.left() + 7.0 + column as f32 * (self.column_width() + 3.0)
    }

    /// Wrap features into rows: even index left, odd index right
    pub fn feature_rows(&self, features: &[String]) -> Vec<FeatureRow> {
        features
            .chunks(2)
            .map(|pair| {
                let cells: Vec<Vec<String>> = pair
                    .iter()
                    .map(|feature| {
                        wrap_text(
                            &self.metrics,
                            feature,
                            self.feature_text_width(),
                            8.0,
                            FontStyle::Normal,
                        )
                    })
                    .collect();
                let lines = cells.iter().map(|c| c.len().max(1)).max().unwrap_or(1);
                FeatureRow {
                    cells,
                    height: lines as f32 * FEATURE_LINE,
                }
            })
            .collect()
    }

    /// Height a phase block will occupy
    pub fn phase_block_height(&self, phase: &PhaseLine) -> f32 {
        phase_height(&self.feature_rows(&phase.features))
    }

    /// Lay out a full proposal
    pub fn layout(
        &self,
        draft: &ProposalDraft,
        config: &ProposalConfig,
    ) -> Result<Document, LayoutError> {
        let mut run = LayoutRun::new(self, config);

        run.header(draft)?;
        run.contacts(draft)?;
        run.introduction(draft)?;
        if !draft.phases.is_empty() {
            run.modules_heading()?;
            for phase in &draft.phases {
                run.phase(phase)?;
            }
        }
        run.financial_summary(draft.total)?;
        run.signatures(draft)?;
        run.footer();

        Ok(run.finish(draft))
    }
}

fn phase_height(rows: &[FeatureRow]) -> f32 {
    let features: f32 = rows.iter().map(|row| row.height).sum();
    PHASE_TITLE_ROW + PHASE_BADGE_ROW + features + PHASE_TRAILER
}

/// Font size, style and color of a text run
#[derive(Debug, Clone, Copy)]
struct Font {
    size: f32,
    style: FontStyle,
    color: Rgb,
}

impl Font {
    const fn new(size: f32, style: FontStyle, color: Rgb) -> Self {
        Self { size, style, color }
    }
}

/// Mutable state of a single layout pass
struct LayoutRun<'a, M> {
    engine: &'a LayoutEngine<M>,
    config: &'a ProposalConfig,
    primary: Rgb,
    pages: Vec<Page>,
    blocks: Vec<PlacedBlock>,
    events: Vec<LayoutEvent>,
    page: usize,
    y: f32,
    state: CursorState,
}

impl<'a, M: TextMetrics> LayoutRun<'a, M> {
    fn new(engine: &'a LayoutEngine<M>, config: &'a ProposalConfig) -> Self {
        Self {
            engine,
            config,
            primary: config.primary_rgb(),
            pages: vec![Page::default()],
            blocks: Vec::new(),
            events: Vec::new(),
            page: 0,
            y: engine.geometry.printable_top(),
            state: CursorState::Positioning,
        }
    }

    fn geometry(&self) -> PageGeometry {
        self.engine.geometry
    }

    fn width(&self, text: &str, font: Font) -> f32 {
        self.engine.metrics.text_width(text, font.size, font.style)
    }

    fn fit(&self, text: &str, max_width: f32, font: Font) -> String {
        fit_text(&self.engine.metrics, text, max_width, font.size, font.style)
    }

    /// Page-break check before a block; returns the block's top offset
    fn reserve(&mut self, kind: &BlockKind, height: f32) -> Result<f32, LayoutError> {
        debug_assert_ne!(self.state, CursorState::Finished, "layout already finished");
        let geometry = self.geometry();
        if height > geometry.printable_height() + BREAK_EPSILON {
            return Err(LayoutError::BlockTooTall {
                block: kind.clone(),
                height,
                available: geometry.printable_height(),
            });
        }

        self.state = CursorState::PageBreakCheck;
        if self.y + height > geometry.printable_bottom() + BREAK_EPSILON {
            self.pages.push(Page::default());
            self.page += 1;
            self.y = geometry.printable_top();
            self.events.push(LayoutEvent::PageBreak {
                before: kind.clone(),
                new_page: self.page,
            });
        }
        self.state = CursorState::Positioning;
        Ok(self.y)
    }

    /// Record a full-width block and advance the cursor past it
    fn commit(&mut self, kind: BlockKind, top: f32, height: f32, gap: f32) {
        let geometry = self.geometry();
        self.place(kind, Rect::new(geometry.left(), top, geometry.content_width(), height));
        self.y = top + height + gap;
    }

    fn place(&mut self, kind: BlockKind, bounds: Rect) {
        self.blocks.push(PlacedBlock {
            kind,
            page: self.page,
            bounds,
        });
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.get_mut(self.page) {
            page.ops.push(op);
        }
    }

    fn text(&mut self, x: f32, y: f32, text: impl Into<String>, font: Font, align: Align) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            x,
            y,
            text,
            size: font.size,
            style: font.style,
            color: font.color,
            align,
        });
    }

    fn fill(&mut self, rect: Rect, color: Rgb) {
        self.push(DrawOp::Rect {
            rect,
            fill: Some(color),
            stroke: None,
        });
    }

    fn rule(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        self.push(DrawOp::Line {
            from,
            to,
            stroke: Stroke { color, width },
        });
    }

    fn header(&mut self, draft: &ProposalDraft) -> Result<(), LayoutError> {
        let top = self.reserve(&BlockKind::Header, HEADER_HEIGHT)?;
        let geometry = self.geometry();
        let (left, right) = (geometry.left(), geometry.right());
        let primary = self.primary;

        // Logo square with the brand initial
        self.fill(Rect::new(left, top, 15.0, 15.0), primary);
        let initial: String = self.config.brand_name.chars().take(1).collect();
        self.text(
            left + 7.5,
            top + 10.0,
            initial,
            Font::new(20.0, FontStyle::Bold, Rgb::WHITE),
            Align::Center,
        );

        let brand_font = Font::new(24.0, FontStyle::Bold, Rgb::BLACK);
        let brand = self.fit(&self.config.brand_name, right - left - 80.0, brand_font);
        self.text(left + 20.0, top + 8.0, brand, brand_font, Align::Left);
        self.text(
            left + 20.0,
            top + 13.0,
            self.config.tagline.clone(),
            Font::new(8.0, FontStyle::Bold, primary),
            Align::Left,
        );

        self.text(
            right,
            top + 3.0,
            self.config.document_title.clone(),
            Font::new(8.0, FontStyle::Bold, primary),
            Align::Right,
        );
        self.text(
            right,
            top + 8.0,
            draft.reference.label(),
            Font::new(7.0, FontStyle::Bold, Rgb::gray(100)),
            Align::Right,
        );
        self.text(
            right,
            top + 12.0,
            long_date(draft.issued_on),
            Font::new(7.0, FontStyle::Normal, Rgb::gray(100)),
            Align::Right,
        );

        self.rule(
            Point::new(left, top + 20.0),
            Point::new(right, top + 20.0),
            primary,
            1.0,
        );

        self.commit(BlockKind::Header, top, HEADER_HEIGHT, HEADER_GAP);
        Ok(())
    }

    fn contacts(&mut self, draft: &ProposalDraft) -> Result<(), LayoutError> {
        let top = self.reserve(&BlockKind::Contacts, CONTACT_HEIGHT)?;
        let left = self.geometry().left();
        let box_width = self.engine.column_width();
        let client_x = left + box_width + CONTACT_GUTTER;
        let primary = self.primary;
        let name_font = Font::new(11.0, FontStyle::Bold, Rgb::BLACK);

        // Issuer
        self.fill(Rect::new(left, top, box_width, CONTACT_HEIGHT), Rgb::SLATE_50);
        self.text(
            left + 3.0,
            top + 5.0,
            "DE LA PART DE",
            Font::new(7.0, FontStyle::Bold, Rgb::gray(150)),
            Align::Left,
        );
        let company = self.fit(&self.config.issuer.company, box_width - 6.0, name_font);
        self.text(left + 3.0, top + 11.0, company, name_font, Align::Left);

        let detail = Font::new(8.0, FontStyle::Normal, Rgb::gray(80));
        let issuer = &self.config.issuer;
        let rows: Vec<(String, Font)> = issuer
            .address_lines
            .iter()
            .map(|line| (line.clone(), detail))
            .chain([
                (issuer.email.clone(), Font::new(8.0, FontStyle::Normal, primary)),
                (issuer.phone.clone(), detail),
            ])
            .filter(|(text, _)| !text.is_empty())
            .collect();
        let max_rows = ((CONTACT_HEIGHT - CONTACT_FIRST_ROW - 2.0) / CONTACT_ROW) as usize + 1;
        for (index, (row, font)) in rows.into_iter().take(max_rows).enumerate() {
            let row = self.fit(&row, box_width - 6.0, font);
            let y = top + CONTACT_FIRST_ROW + index as f32 * CONTACT_ROW;
            self.text(left + 3.0, y, row, font, Align::Left);
        }

        // Recipient
        self.push(DrawOp::Rect {
            rect: Rect::new(client_x, top, box_width, CONTACT_HEIGHT),
            fill: None,
            stroke: Some(Stroke {
                color: primary,
                width: 0.5,
            }),
        });
        self.text(
            client_x + 3.0,
            top + 5.0,
            "PRÉPARÉ POUR",
            Font::new(7.0, FontStyle::Bold, primary),
            Align::Left,
        );
        let client = self.fit(&draft.client_name, box_width - 6.0, name_font);
        self.text(client_x + 3.0, top + 11.0, client, name_font, Align::Left);
        let sector_font = Font::new(8.0, FontStyle::Italic, Rgb::gray(100));
        let sector = self.fit(&self.config.recipient_sector, box_width - 6.0, sector_font);
        self.text(client_x + 3.0, top + CONTACT_FIRST_ROW, sector, sector_font, Align::Left);
        self.fill(Rect::new(client_x + 3.0, top + 20.0, 12.0, 1.0), primary);

        self.commit(BlockKind::Contacts, top, CONTACT_HEIGHT, CONTACT_GAP);
        Ok(())
    }

    fn introduction(&mut self, draft: &ProposalDraft) -> Result<(), LayoutError> {
        let body_font = Font::new(9.0, FontStyle::Normal, Rgb::gray(80));
        let paragraph = self.config.introduction(&draft.client_name);
        let lines = wrap_text(
            &self.engine.metrics,
            &paragraph,
            self.geometry().content_width(),
            body_font.size,
            body_font.style,
        );
        // The one block whose height depends on its content
        let height = INTRO_HEADING + lines.len() as f32 * INTRO_LINE + 1.0;

        let top = self.reserve(&BlockKind::Introduction, height)?;
        let left = self.geometry().left();
        self.text(
            left,
            top + 5.0,
            self.config.intro_heading.clone(),
            Font::new(14.0, FontStyle::Bold, Rgb::BLACK),
            Align::Left,
        );
        for (index, line) in lines.into_iter().enumerate() {
            let y = top + INTRO_HEADING + (index + 1) as f32 * INTRO_LINE;
            self.text(left, y, line, body_font, Align::Left);
        }

        self.commit(BlockKind::Introduction, top, height, INTRO_GAP);
        Ok(())
    }

    fn modules_heading(&mut self) -> Result<(), LayoutError> {
        let top = self.reserve(&BlockKind::ModulesHeading, MODULES_HEADING_HEIGHT)?;
        self.text(
            self.geometry().left(),
            top + 5.0,
            self.config.modules_heading.clone(),
            Font::new(12.0, FontStyle::Bold, Rgb::BLACK),
            Align::Left,
        );
        self.commit(
            BlockKind::ModulesHeading,
            top,
            MODULES_HEADING_HEIGHT,
            MODULES_HEADING_GAP,
        );
        Ok(())
    }

    fn phase(&mut self, phase: &PhaseLine) -> Result<(), LayoutError> {
        let rows = self.engine.feature_rows(&phase.features);
        let height = phase_height(&rows);
        let kind = BlockKind::Phase(phase.id.clone());
        let top = self.reserve(&kind, height)?;

        let geometry = self.geometry();
        let (left, right) = (geometry.left(), geometry.right());
        let primary = self.primary;

        // Title and price share the first row
        let title_font = Font::new(11.0, FontStyle::Bold, Rgb::BLACK);
        let price = format_price(phase.price, &self.config.currency);
        let title_room = geometry.content_width() - 10.0 - self.width(&price, title_font);
        let title = self.fit(&phase.title, title_room, title_font);
        self.text(left + 5.0, top + 5.0, title, title_font, Align::Left);
        self.text(right, top + 5.0, price, title_font, Align::Right);

        // Tier badge
        let badge = phase.tier.badge_label();
        let (badge_fill, badge_text) = match phase.tier {
            Tier::Starter => (Rgb::gray(240), Rgb::gray(80)),
            Tier::StandardPlus => (primary, Rgb::WHITE),
        };
        let badge_font = Font::new(7.0, FontStyle::Bold, badge_text);
        let badge_top = top + PHASE_TITLE_ROW;
        let badge_width = self.width(&badge, badge_font) + 2.0;
        self.fill(Rect::new(left + 5.0, badge_top + 1.0, badge_width, 4.5), badge_fill);
        self.text(left + 6.0, badge_top + 4.3, badge, badge_font, Align::Left);

        // Feature grid
        let feature_font = Font::new(8.0, FontStyle::Normal, Rgb::gray(100));
        let mut row_top = badge_top + PHASE_BADGE_ROW;
        for row in rows {
            for (column, lines) in row.cells.into_iter().enumerate() {
                let x = self.engine.feature_column_x(column);
                self.push(DrawOp::CheckMark {
                    x,
                    y: row_top + 3.0,
                    size: 8.0,
                    color: primary,
                });
                for (index, line) in lines.into_iter().enumerate() {
                    let y = row_top + 3.0 + index as f32 * FEATURE_LINE;
                    self.text(x + 3.0, y, line, feature_font, Align::Left);
                }
            }
            row_top += row.height;
        }

        let rule_y = row_top + PHASE_TRAILER - 1.0;
        self.rule(
            Point::new(left, rule_y),
            Point::new(right, rule_y),
            Rgb::gray(230),
            0.3,
        );

        self.commit(kind, top, height, PHASE_GAP);
        Ok(())
    }

    fn financial_summary(&mut self, total: i64) -> Result<(), LayoutError> {
        let top = self.reserve(&BlockKind::FinancialSummary, SUMMARY_HEIGHT)?;
        let geometry = self.geometry();
        let (left, right) = (geometry.left(), geometry.right());

        self.fill(
            Rect::new(left, top, geometry.content_width(), SUMMARY_HEIGHT),
            Rgb::NAVY,
        );
        self.text(
            left + 5.0,
            top + 8.0,
            "INVESTISSEMENT GLOBAL",
            Font::new(8.0, FontStyle::Bold, Rgb::LIGHT_BLUE),
            Align::Left,
        );

        let terms_x = right - TERMS_COLUMN;
        let amount = format!(
            "{} {} {}",
            format_amount(total),
            self.config.currency,
            self.config.total_suffix
        )
        .trim_end()
        .to_string();
        let room = terms_x - left - 10.0;
        let mut total_font = Font::new(28.0, FontStyle::Bold, Rgb::WHITE);
        while self.width(&amount, total_font) > room && total_font.size > 10.0 {
            total_font.size -= 2.0;
        }
        self.text(left + 5.0, top + 20.0, amount, total_font, Align::Left);

        self.text(
            terms_x,
            top + 10.0,
            "MODALITÉS",
            Font::new(7.0, FontStyle::Bold, Rgb::gray(150)),
            Align::Left,
        );
        let label_font = Font::new(8.0, FontStyle::Normal, Rgb::gray(200));
        let percent_font = Font::new(8.0, FontStyle::Bold, Rgb::WHITE);
        for (index, installment) in PAYMENT_SCHEDULE.installments(total).iter().enumerate() {
            let y = top + 16.0 + index as f32 * 5.0;
            self.text(terms_x, y, format!("{} :", installment.label), label_font, Align::Left);
            self.text(
                terms_x + 25.0,
                y,
                format!("{}%", installment.percent),
                percent_font,
                Align::Left,
            );
        }

        self.commit(BlockKind::FinancialSummary, top, SUMMARY_HEIGHT, SUMMARY_GAP);
        Ok(())
    }

    fn signatures(&mut self, draft: &ProposalDraft) -> Result<(), LayoutError> {
        let top = self.reserve(&BlockKind::IssuerSignature, SIGNATURE_HEIGHT)?;
        let geometry = self.geometry();
        let (left, right) = (geometry.left(), geometry.right());
        let client_x = geometry.center_x() + 5.0;

        self.rule(
            Point::new(left, top),
            Point::new(right, top),
            Rgb::gray(230),
            0.3,
        );

        let label_font = Font::new(7.0, FontStyle::Bold, Rgb::gray(150));
        let caption_font = Font::new(6.0, FontStyle::Italic, Rgb::gray(180));
        let note_font = Font::new(6.0, FontStyle::Normal, Rgb::gray(150));
        let column = client_x - left - 5.0;

        let issuer_label = self.fit(&self.config.issuer_signature_label(), column, label_font);
        let client_label = self.fit(
            &self.config.client_signature_label(&draft.client_name),
            right - client_x,
            label_font,
        );
        self.text(left, top + 10.0, issuer_label, label_font, Align::Left);
        self.text(client_x, top + 10.0, client_label, label_font, Align::Left);

        for x in [left, client_x] {
            self.rule(
                Point::new(x, top + 28.0),
                Point::new(x + SIGNATURE_LINE, top + 28.0),
                Rgb::gray(200),
                0.5,
            );
        }

        self.text(left, top + 31.0, "Cachet et Signature", caption_font, Align::Left);
        self.text(
            client_x,
            top + 31.0,
            "Mention \"Bon pour accord\"",
            caption_font,
            Align::Left,
        );
        let done_at = format!("Fait à {}, le {}", self.config.city, long_date(draft.issued_on));
        self.text(left, top + 35.0, done_at, note_font, Align::Left);
        self.text(
            client_x,
            top + 35.0,
            "Nom et qualité du signataire",
            note_font,
            Align::Left,
        );

        self.place(
            BlockKind::IssuerSignature,
            Rect::new(left, top, column, SIGNATURE_HEIGHT),
        );
        self.place(
            BlockKind::ClientSignature,
            Rect::new(client_x, top, right - client_x, SIGNATURE_HEIGHT),
        );
        self.y = top + SIGNATURE_HEIGHT;
        Ok(())
    }

    /// Footer lines in the bottom margin of the current (last) page
    fn footer(&mut self) {
        let geometry = self.geometry();
        let center = geometry.center_x();
        let bottom = geometry.height;
        let width = geometry.content_width();

        let generated_font = Font::new(6.0, FontStyle::Italic, Rgb::gray(150));
        let legal_font = Font::new(6.0, FontStyle::Normal, Rgb::gray(150));
        let generated = self.fit(&self.config.generated_by_line(), width, generated_font);
        let legal = self.fit(&self.config.legal_line, width, legal_font);
        self.text(center, bottom - 10.0, generated, generated_font, Align::Center);
        self.text(center, bottom - 6.0, legal, legal_font, Align::Center);

        self.place(
            BlockKind::Footer,
            Rect::new(geometry.left(), bottom - 13.0, width, 8.0),
        );
        self.state = CursorState::Finished;
    }

    fn finish(self, draft: &ProposalDraft) -> Document {
        Document {
            geometry: self.engine.geometry,
            title: format!("{} - {}", self.config.document_title, draft.client_name),
            reference: draft.reference.clone(),
            pages: self.pages,
            blocks: self.blocks,
            events: self.events,
        }
    }
}
