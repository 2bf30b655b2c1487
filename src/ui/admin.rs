//! Price administration view

use crate::app::{AdminDraft, AppState};
use crate::pricing::format_price;
use crate::theme::{Styles, Theme};
use crate::types::Tier;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

pub fn render_admin(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(admin) = state.admin.as_ref() else {
        f.render_widget(
            Paragraph::new("No price table open").style(Styles::text_muted()),
            area,
        );
        return;
    };

    let title = if admin.is_dirty() {
        " Prices (unsaved changes) "
    } else {
        " Prices "
    };

    let header = Row::new(vec![
        Cell::from("Phase"),
        Cell::from(Line::from("Starter").right_aligned()),
        Cell::from(Line::from("Standard Plus").right_aligned()),
        Cell::from("Status"),
    ])
    .style(Styles::title())
    .bottom_margin(1);

    let table = Table::new(
        rows(admin, &state.config.currency),
        [
            Constraint::Min(30),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .column_spacing(2)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Styles::border_active()),
    );

    let mut table_state = TableState::default().with_selected(Some(admin.cursor));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn rows<'a>(admin: &'a AdminDraft, currency: &str) -> Vec<Row<'a>> {
    admin
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let on_row = index == admin.cursor;
            let price_cell = |tier: Tier| {
                let cell = Cell::from(Line::from(format_price(row.price(tier), currency)).right_aligned());
                if on_row && admin.column == tier {
                    cell.style(Styles::selected())
                } else {
                    cell.style(Theme::tier_style(tier))
                }
            };
            let status = match (row.enabled, admin.row_changed(index)) {
                (_, true) => Cell::from("modified").style(Styles::warning()),
                (true, false) => Cell::from("enabled").style(Styles::success()),
                (false, false) => Cell::from("disabled").style(Styles::text_muted()),
            };
            let title_style = if on_row {
                Styles::text_bold()
            } else {
                Styles::text()
            };
            Row::new(vec![
                Cell::from(row.title.as_str()).style(title_style),
                price_cell(Tier::Starter),
                price_cell(Tier::StandardPlus),
                status,
            ])
        })
        .collect()
}
