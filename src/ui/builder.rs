//! Configurator view: phase cards on the left, live totals on the right

use crate::app::AppState;
use crate::catalog::Phase;
use crate::pricing::{PAYMENT_SCHEDULE, format_price, resolve_features};
use crate::theme::{Colors, Styles, Theme, UiConstants};
use crate::types::Tier;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub fn render_builder(f: &mut Frame, area: Rect, state: &AppState) {
    let [cards_area, summary_area] = Layout::horizontal([
        Constraint::Min(40),
        Constraint::Length(UiConstants::SUMMARY_WIDTH),
    ])
    .areas(area);

    render_cards(f, cards_area, state);
    render_summary(f, summary_area, state);
}

fn render_cards(f: &mut Frame, area: Rect, state: &AppState) {
    let currency = &state.config.currency;
    let items: Vec<ListItem> = state
        .selection
        .phases()
        .iter()
        .map(|phase| ListItem::new(card_lines(phase, state.is_expanded(&phase.id), currency)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Phases ")
                .borders(Borders::ALL)
                .border_style(Styles::border_active()),
        )
        .highlight_style(Style::default().bg(Colors::BG_PRIMARY))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.phase_cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}

/// Lines of one phase card
fn card_lines(phase: &Phase, expanded: bool, currency: &str) -> Vec<Line<'static>> {
    let text_style = if phase.enabled {
        Styles::text_bold()
    } else {
        Styles::text_muted()
    };
    let checkbox = if phase.enabled { "[x]" } else { "[ ]" };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", checkbox), text_style),
        Span::styled(phase.title.clone(), text_style),
        Span::raw("  "),
        Span::styled(
            phase.selected_tier.to_string(),
            Theme::tier_style(phase.selected_tier),
        ),
        Span::raw("  "),
        Span::styled(format_price(phase.selected_price(), currency), Styles::price()),
    ])];

    let upgrade = match phase.selected_tier {
        Tier::StandardPlus => format!(
            "    +{} over Starter",
            format_price(phase.upgrade_delta(), currency)
        ),
        Tier::Starter => format!(
            "    Standard Plus for +{}",
            format_price(phase.upgrade_delta(), currency)
        ),
    };
    lines.push(Line::from(Span::styled(upgrade, Styles::text_muted())));

    if expanded {
        if !phase.description.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", phase.description),
                Styles::text_secondary().add_modifier(Modifier::ITALIC),
            )));
        }
        for feature in resolve_features(phase) {
            let (mark, style) = if feature.is_excluded() {
                ("x", Styles::feature_excluded())
            } else {
                ("✓", Styles::feature_included())
            };
            lines.push(Line::from(vec![
                Span::styled(format!("      {} ", mark), style),
                Span::styled(feature.text, style),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines
}

fn render_summary(f: &mut Frame, area: Rect, state: &AppState) {
    let currency = &state.config.currency;
    let totals = state.selection.totals();
    let enabled = state.selection.enabled_phases().count();

    let mut lines = vec![
        Line::from(Span::styled("Total", Styles::text_secondary())),
        Line::from(vec![
            Span::styled(format_price(totals.total, currency), Styles::price()),
            Span::styled(format!(" {}", state.config.total_suffix), Styles::text_muted()),
        ]),
        Line::from(""),
        summary_row("Starter", format_price(totals.starter_subtotal, currency)),
        summary_row(
            "Standard Plus",
            format_price(totals.plus_subtotal, currency),
        ),
        summary_row(
            "Phases",
            format!("{} / {}", enabled, state.selection.phases().len()),
        ),
        Line::from(""),
        Line::from(Span::styled("Payment", Styles::text_secondary())),
    ];
    for installment in PAYMENT_SCHEDULE.installments(totals.total) {
        lines.push(summary_row(
            &format!("{} {}%", installment.label, installment.percent),
            format_price(installment.amount, currency),
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Valid for {} days", state.config.validity_days),
        Styles::text_muted(),
    )));

    let summary = Paragraph::new(lines).block(
        Block::default()
            .title(" Summary ")
            .borders(Borders::ALL)
            .border_style(Styles::border_inactive())
            .style(Styles::summary_bg()),
    );
    f.render_widget(summary, area);
}

fn summary_row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", label), Styles::text_secondary()),
        Span::styled(value, Styles::text()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_collapsed_card_hides_features() {
        let catalog = Catalog::builtin();
        let lines = card_lines(&catalog.phases[0], false, "DZD");
        assert_eq!(lines.len(), 3);
        assert!(text(&lines).contains("[x]"));
    }

    #[test]
    fn test_expanded_card_strikes_plus_exclusives_on_starter() {
        let catalog = Catalog::builtin();
        let phase = &catalog.phases[0];
        let lines = card_lines(phase, true, "DZD");
        let struck = lines
            .iter()
            .filter(|line| {
                line.spans
                    .iter()
                    .any(|s| s.style.add_modifier.contains(Modifier::CROSSED_OUT))
            })
            .count();
        let exclusives = phase.standard_plus.features.len() - phase.starter.features.len();
        assert_eq!(struck, exclusives);
    }

    #[test]
    fn test_plus_card_shows_delta_over_starter() {
        let mut catalog = Catalog::builtin();
        let phase = &mut catalog.phases[0];
        phase.selected_tier = Tier::StandardPlus;
        let rendered = text(&card_lines(phase, false, "DZD"));
        assert!(rendered.contains("+10 000 DZD over Starter"));
    }
}
