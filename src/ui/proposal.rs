//! Proposal preview

use crate::app::AppState;
use crate::theme::Styles;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render_proposal(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(view) = state.proposal.as_ref() else {
        f.render_widget(
            Paragraph::new("No proposal generated").style(Styles::text_muted()),
            area,
        );
        return;
    };

    let lines: Vec<Line> = view
        .lines
        .iter()
        .skip(view.scroll)
        .map(|line| {
            if line.starts_with('─') {
                Line::from(Span::styled(line.as_str(), Styles::title()))
            } else {
                Line::from(Span::styled(line.as_str(), Styles::text()))
            }
        })
        .collect();

    let title = format!(
        " {} | {} page(s) | {} ",
        view.draft.reference,
        view.page_count,
        view.draft.client_name
    );

    let preview = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Styles::border_active()),
    );
    f.render_widget(preview, area);
}
