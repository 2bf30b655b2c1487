//! PDF rendering of a laid-out [`Document`]
//!
//! Uses the standard 14 fonts so nothing has to be embedded: Helvetica,
//! Helvetica-Bold and Helvetica-Oblique in WinAnsi encoding for text, and
//! ZapfDingbats for the feature check marks. Layout coordinates are mm with
//! a top-left origin; PDF user space is points with a bottom-left origin.

use pdf_writer::{Content, Name, Pdf, Rect as PdfRect, Ref, Str, TextStr};

use super::geometry::{PT_PER_MM, Rgb};
use super::metrics::{FontStyle, HelveticaMetrics, TextMetrics};
use super::model::{Align, Document, DrawOp, Page};
use crate::config::ProposalConfig;
use crate::error::{QuoteError, Result};

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");
const FONT_ITALIC: Name<'static> = Name(b"F3");
const FONT_SYMBOL: Name<'static> = Name(b"F4");

/// ZapfDingbats code for a heavy check mark
const CHECK_MARK: &[u8] = b"4";

/// Render `document` into a complete PDF file in memory
pub fn render_pdf(document: &Document, config: &ProposalConfig) -> Result<Vec<u8>> {
    if document.pages.is_empty() {
        return Err(QuoteError::render("document has no pages"));
    }

    let mut next_id = 0;
    let mut alloc = || {
        next_id += 1;
        Ref::new(next_id)
    };

    let catalog_id = alloc();
    let tree_id = alloc();
    let info_id = alloc();
    let font_ids = [alloc(), alloc(), alloc(), alloc()];
    let page_ids: Vec<(Ref, Ref)> = document.pages.iter().map(|_| (alloc(), alloc())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    let faces: [&[u8]; 3] = [b"Helvetica", b"Helvetica-Bold", b"Helvetica-Oblique"];
    for (id, face) in font_ids.iter().zip(faces) {
        pdf.type1_font(*id)
            .base_font(Name(face))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
    pdf.type1_font(font_ids[3]).base_font(Name(b"ZapfDingbats"));

    let geometry = document.geometry;
    let media_box = PdfRect::new(
        0.0,
        0.0,
        geometry.width * PT_PER_MM,
        geometry.height * PT_PER_MM,
    );

    for (page, (page_id, content_id)) in document.pages.iter().zip(&page_ids) {
        {
            let mut pdf_page = pdf.page(*page_id);
            pdf_page
                .media_box(media_box)
                .parent(tree_id)
                .contents(*content_id);
            let mut resources = pdf_page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT_REGULAR, font_ids[0]);
            fonts.pair(FONT_BOLD, font_ids[1]);
            fonts.pair(FONT_ITALIC, font_ids[2]);
            fonts.pair(FONT_SYMBOL, font_ids[3]);
        }

        let content = Canvas::new(geometry.height).draw(page);
        pdf.stream(*content_id, &content);
    }

    let creator = format!("{} configurator", config.brand_name);
    pdf.document_info(info_id)
        .title(TextStr(&document.title))
        .author(TextStr(&config.issuer.company))
        .subject(TextStr(&document.reference.to_string()))
        .creator(TextStr(&creator));

    Ok(pdf.finish())
}

/// Draws one page's operations into a content stream
struct Canvas {
    content: Content,
    page_height: f32,
    metrics: HelveticaMetrics,
}

impl Canvas {
    fn new(page_height: f32) -> Self {
        Self {
            content: Content::new(),
            page_height,
            metrics: HelveticaMetrics,
        }
    }

    fn x(&self, mm: f32) -> f32 {
        mm * PT_PER_MM
    }

    fn y(&self, mm: f32) -> f32 {
        (self.page_height - mm) * PT_PER_MM
    }

    fn fill_color(&mut self, color: Rgb) {
        let (r, g, b) = color.to_unit();
        self.content.set_fill_rgb(r, g, b);
    }

    fn stroke_color(&mut self, color: Rgb) {
        let (r, g, b) = color.to_unit();
        self.content.set_stroke_rgb(r, g, b);
    }

    fn draw(mut self, page: &Page) -> Vec<u8> {
        for op in &page.ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    text,
                    size,
                    style,
                    color,
                    align,
                } => {
                    let width = self.metrics.text_width(text, *size, *style);
                    let left = match align {
                        Align::Left => *x,
                        Align::Center => x - width / 2.0,
                        Align::Right => x - width,
                    };
                    let font = match style {
                        FontStyle::Normal => FONT_REGULAR,
                        FontStyle::Bold => FONT_BOLD,
                        FontStyle::Italic => FONT_ITALIC,
                    };
                    let encoded = win_ansi(text);
                    self.fill_color(*color);
                    let (px, py) = (self.x(left), self.y(*y));
                    self.content
                        .begin_text()
                        .set_font(font, *size)
                        .next_line(px, py)
                        .show(Str(&encoded))
                        .end_text();
                }
                DrawOp::Rect { rect, fill, stroke } => {
                    if fill.is_none() && stroke.is_none() {
                        continue;
                    }
                    if let Some(color) = fill {
                        self.fill_color(*color);
                    }
                    if let Some(stroke) = stroke {
                        self.stroke_color(stroke.color);
                        self.content.set_line_width(stroke.width * PT_PER_MM);
                    }
                    let (px, py) = (self.x(rect.x), self.y(rect.bottom()));
                    self.content
                        .rect(px, py, rect.width * PT_PER_MM, rect.height * PT_PER_MM);
                    match (fill, stroke) {
                        (Some(_), Some(_)) => self.content.fill_nonzero_and_stroke(),
                        (Some(_), None) => self.content.fill_nonzero(),
                        _ => self.content.stroke(),
                    };
                }
                DrawOp::Line { from, to, stroke } => {
                    self.stroke_color(stroke.color);
                    self.content.set_line_width(stroke.width * PT_PER_MM);
                    let (x1, y1) = (self.x(from.x), self.y(from.y));
                    let (x2, y2) = (self.x(to.x), self.y(to.y));
                    self.content.move_to(x1, y1).line_to(x2, y2).stroke();
                }
                DrawOp::CheckMark { x, y, size, color } => {
                    self.fill_color(*color);
                    let (px, py) = (self.x(*x), self.y(*y));
                    self.content
                        .begin_text()
                        .set_font(FONT_SYMBOL, *size)
                        .next_line(px, py)
                        .show(Str(CHECK_MARK))
                        .end_text();
                }
            }
        }
        self.content.finish()
    }
}

/// Encode text for a WinAnsi (cp1252) simple font.
///
/// Latin-1 maps straight through; the few typographic marks the proposal
/// uses get their cp1252 codes; anything else becomes `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
            '\u{202f}' => b' ',
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::geometry::{PageGeometry, Rect};
    use crate::document::model::Stroke;
    use crate::document::reference::DocumentReference;

    fn document(pages: Vec<Page>) -> Document {
        Document {
            geometry: PageGeometry::A4_PORTRAIT,
            title: "OFFRE COMMERCIALE - ACME".into(),
            reference: DocumentReference::new("OSM", 2026, 12),
            pages,
            blocks: Vec::new(),
            events: Vec::new(),
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(win_ansi("Déjà"), vec![b'D', 0xE9, b'j', 0xE0]);
        assert_eq!(win_ansi("a • b"), vec![b'a', b' ', 0x95, b' ', b'b']);
        assert_eq!(win_ansi("→"), vec![b'?']);
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let err = render_pdf(&document(Vec::new()), &ProposalConfig::default());
        assert!(matches!(err, Err(QuoteError::Render(_))));
    }

    #[test]
    fn test_render_writes_every_page() {
        let page = Page {
            ops: vec![
                DrawOp::Text {
                    x: 20.0,
                    y: 30.0,
                    text: "Bonjour".into(),
                    size: 9.0,
                    style: FontStyle::Bold,
                    color: Rgb::BLACK,
                    align: Align::Left,
                },
                DrawOp::Rect {
                    rect: Rect::new(20.0, 40.0, 50.0, 10.0),
                    fill: Some(Rgb::NAVY),
                    stroke: Some(Stroke {
                        color: Rgb::BRAND_BLUE,
                        width: 0.5,
                    }),
                },
            ],
        };
        let bytes = render_pdf(
            &document(vec![page.clone(), page]),
            &ProposalConfig::default(),
        )
        .expect("render");

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"/Count 2"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"/ZapfDingbats"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
    }
}
