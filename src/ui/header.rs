//! Header, status line and navigation bar

use crate::app::AppState;
use crate::components::keybindings::NavBarItem;
use crate::theme::{Colors, Styles, Theme};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the title bar: brand on the left, view and client on the right
pub fn render_header(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_inactive());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);

    let brand = Line::from(vec![
        Span::styled(state.config.brand_name.clone(), Styles::title()),
        Span::raw("  "),
        Span::styled(state.config.tagline.clone(), Styles::text_muted()),
    ]);
    f.render_widget(Paragraph::new(brand), left);

    let context = Line::from(vec![
        Span::styled(state.mode.title(), Styles::text_bold()),
        Span::styled("  |  Client: ", Styles::text_muted()),
        Span::styled(
            state.selection.client_name().to_string(),
            Style::default().fg(Colors::SECONDARY),
        ),
    ]);
    f.render_widget(Paragraph::new(context).alignment(Alignment::Right), right);
}

/// Render the one-line status message
pub fn render_status(f: &mut Frame, area: Rect, message: &str) {
    let status = Paragraph::new(format!(" {}", message)).style(Theme::status_style(message));
    f.render_widget(status, area);
}

/// Render the key hints of the current view
pub fn render_nav_bar(f: &mut Frame, area: Rect, items: &[NavBarItem]) {
    let mut spans = Vec::with_capacity(items.len() * 3);
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", Styles::nav_hint()));
        }
        spans.push(Span::styled(
            format!(" {} ", item.key_display),
            Style::default().fg(Colors::PRIMARY),
        ));
        spans.push(Span::styled(item.action_label.clone(), Styles::nav_hint()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
