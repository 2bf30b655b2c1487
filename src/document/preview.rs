//! Plain-text preview of a laid-out [`Document`]
//!
//! Text runs are snapped to character cells: runs whose baselines are within
//! [`ROW_SNAP`] mm share a row and each run starts at the column matching its
//! left edge. Because the preview reads the same [`Document`] as the PDF
//! renderer, pagination on screen is exactly the exported pagination.

use super::geometry::PageGeometry;
use super::metrics::{HelveticaMetrics, TextMetrics};
use super::model::{Align, Document, DrawOp};

/// Horizontal size of one preview character cell
pub const MM_PER_COLUMN: f32 = 2.0;

/// Baselines closer than this share a preview row
pub const ROW_SNAP: f32 = 1.5;

struct Run {
    x: f32,
    y: f32,
    text: String,
}

/// Number of character columns the content width spans
pub fn preview_width(geometry: &PageGeometry) -> usize {
    (geometry.content_width() / MM_PER_COLUMN).round() as usize
}

/// Render every page as text lines, each page introduced by a separator
pub fn render_text(document: &Document) -> Vec<String> {
    let geometry = document.geometry;
    let width = preview_width(&geometry);
    let metrics = HelveticaMetrics;
    let mut lines = Vec::new();

    for (index, page) in document.pages.iter().enumerate() {
        lines.push(page_separator(index + 1, document.page_count(), width));

        let mut runs: Vec<Run> = page
            .ops
            .iter()
            .filter_map(|op| run_for(op, &metrics, &geometry))
            .collect();
        runs.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

        let mut rows: Vec<Vec<Run>> = Vec::new();
        for run in runs {
            match rows.last_mut() {
                Some(row) if (run.y - row[0].y).abs() <= ROW_SNAP => row.push(run),
                _ => rows.push(vec![run]),
            }
        }

        for mut row in rows {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            lines.push(compose(&row, geometry.left()));
        }
    }

    lines
}

fn page_separator(page: usize, total: usize, width: usize) -> String {
    let label = format!("── Page {} / {} ", page, total);
    let used = label.chars().count();
    format!("{}{}", label, "─".repeat(width.saturating_sub(used)))
}

fn run_for(op: &DrawOp, metrics: &HelveticaMetrics, geometry: &PageGeometry) -> Option<Run> {
    match op {
        DrawOp::Text {
            x,
            y,
            text,
            size,
            style,
            align,
            ..
        } => {
            let width = metrics.text_width(text, *size, *style);
            let left = match align {
                Align::Left => *x,
                Align::Center => x - width / 2.0,
                Align::Right => x - width,
            };
            Some(Run {
                x: left,
                y: *y,
                text: text.clone(),
            })
        }
        DrawOp::CheckMark { x, y, .. } => Some(Run {
            x: *x,
            y: *y,
            text: "✓".to_string(),
        }),
        // Only full-width horizontal rules are worth a row
        DrawOp::Line { from, to, .. }
            if (from.y - to.y).abs() < f32::EPSILON
                && (to.x - from.x).abs() >= geometry.content_width() * 0.9 =>
        {
            Some(Run {
                x: from.x.min(to.x),
                y: from.y,
                text: "─".repeat(preview_width(geometry)),
            })
        }
        DrawOp::Line { .. } | DrawOp::Rect { .. } => None,
    }
}

fn compose(row: &[Run], origin: f32) -> String {
    let mut line = String::new();
    let mut used = 0usize;

    for run in row {
        let column = ((run.x - origin) / MM_PER_COLUMN).round().max(0.0) as usize;
        if column > used {
            line.push_str(&" ".repeat(column - used));
            used = column;
        } else if used > 0 {
            line.push(' ');
            used += 1;
        }
        line.push_str(&run.text);
        used += run.text.chars().count();
    }

    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::geometry::Rgb;
    use crate::document::metrics::FontStyle;
    use crate::document::model::Page;
    use crate::document::reference::DocumentReference;

    fn text(x: f32, y: f32, content: &str, align: Align) -> DrawOp {
        DrawOp::Text {
            x,
            y,
            text: content.to_string(),
            size: 9.0,
            style: FontStyle::Normal,
            color: Rgb::BLACK,
            align,
        }
    }

    fn document(pages: Vec<Page>) -> Document {
        Document {
            geometry: PageGeometry::A4_PORTRAIT,
            title: "preview".into(),
            reference: DocumentReference::new("OSM", 2026, 1),
            pages,
            blocks: Vec::new(),
            events: Vec::new(),
        }
    }

    #[test]
    fn test_runs_on_same_baseline_share_a_row() {
        let page = Page {
            ops: vec![
                text(20.0, 30.0, "Title", Align::Left),
                text(190.0, 30.5, "15 000 DZD", Align::Right),
                text(20.0, 40.0, "Next", Align::Left),
            ],
        };
        let lines = render_text(&document(vec![page]));
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Title"));
        assert!(lines[1].ends_with("15 000 DZD"));
        assert_eq!(lines[2], "Next");
    }

    #[test]
    fn test_every_page_gets_a_separator() {
        let lines = render_text(&document(vec![Page::default(), Page::default()]));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("── Page 1 / 2"));
        assert!(lines[1].starts_with("── Page 2 / 2"));
        assert_eq!(lines[0].chars().count(), preview_width(&PageGeometry::A4_PORTRAIT));
    }

    #[test]
    fn test_overlapping_runs_stay_separated() {
        let page = Page {
            ops: vec![
                text(20.0, 30.0, "Left", Align::Left),
                text(21.0, 30.0, "Right", Align::Left),
            ],
        };
        let lines = render_text(&document(vec![page]));
        assert_eq!(lines[1], "Left Right");
    }
}
