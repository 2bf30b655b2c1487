//! Dialog rendering

use super::centered;
use crate::input::InputDialog;
use crate::theme::{Colors, Styles, UiConstants};
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the active input dialog centered over the current view
pub fn render_input_dialog(f: &mut Frame, dialog: &InputDialog) {
    let area = f.area();
    let width = (area.width * UiConstants::DIALOG_WIDTH_PCT / 100).max(UiConstants::DIALOG_MIN_WIDTH);
    let dialog_area = centered(area, width, 8);

    let value_style = if dialog.shows_placeholder() {
        Styles::text_muted()
    } else {
        Style::default()
            .fg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled(dialog.instructions.clone(), Styles::text_secondary())),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{}: ", dialog.field_name()), Styles::title()),
            Span::styled(dialog.get_display_value(), value_style),
            Span::styled("_", Style::default().fg(Colors::PRIMARY)),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} ", dialog.title))
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::panel_bg());

    f.render_widget(Clear, dialog_area);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        dialog_area,
    );
}
