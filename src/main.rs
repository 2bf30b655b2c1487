use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use quotecraft::app::{App, AppState};
use quotecraft::catalog::Catalog;
use quotecraft::cli::{CatalogCommands, Cli, Commands, QuoteArgs};
use quotecraft::config::ProposalConfig;
use quotecraft::document::{LayoutEngine, ProposalDraft, render_text};
use quotecraft::error::QuoteError;
use quotecraft::export::export_proposal;
use quotecraft::pricing::format_price;
use quotecraft::selection::SelectionState;

/// Logs go to `--log-file` when given, otherwise to stderr outside the TUI.
/// The TUI owns the terminal, so without a log file nothing is installed.
fn init_tracing(is_tui: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if !is_tui {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.is_tui(), cli.log_file.as_deref())?;
    info!("QuoteCraft starting up");

    let config = ProposalConfig::load_or_default(cli.config.as_deref())
        .map_err(|e| QuoteError::config(format!("{:#}", e)))?;
    let catalog = load_catalog(cli.catalog.as_deref())?;
    debug!(phases = catalog.len(), "Catalog loaded");

    match &cli.command {
        None | Some(Commands::Tui) => run_tui(&cli, &catalog, config),
        Some(Commands::Summary { quote }) => {
            let selection = build_selection(&cli, &catalog, &config, quote);
            print_summary(&selection, &config);
            Ok(())
        }
        Some(Commands::Preview { quote }) => {
            let selection = build_selection(&cli, &catalog, &config, quote);
            let draft = ProposalDraft::from_selection(&selection, &config);
            let document = LayoutEngine::default()
                .layout(&draft, &config)
                .map_err(QuoteError::from)?;
            for line in render_text(&document) {
                println!("{}", line);
            }
            Ok(())
        }
        Some(Commands::Export { quote }) => {
            let selection = build_selection(&cli, &catalog, &config, quote);
            let draft = ProposalDraft::from_selection(&selection, &config);
            let path = export_proposal(&draft, &config, &cli.out_dir)?;
            println!("✓ Proposal written to {}", path.display());
            Ok(())
        }
        Some(Commands::Catalog { action }) => run_catalog_command(action),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    info!("Loading catalog from {}", path.display());
    let catalog = Catalog::load_from_file(path)
        .and_then(|catalog| catalog.validate().map(|()| catalog))
        .map_err(|e| QuoteError::catalog(format!("{:#}", e)))?;
    Ok(catalog)
}

fn build_selection(
    cli: &Cli,
    catalog: &Catalog,
    config: &ProposalConfig,
    quote: &QuoteArgs,
) -> SelectionState {
    let client = cli
        .client
        .clone()
        .unwrap_or_else(|| config.default_client.clone());
    let mut selection = SelectionState::new(catalog, client);
    quote.apply(&mut selection);
    selection
}

fn print_summary(selection: &SelectionState, config: &ProposalConfig) {
    let currency = &config.currency;
    println!("Client: {}", selection.client_name());
    println!();
    for phase in selection.phases() {
        let mark = if phase.enabled { "[x]" } else { "[ ]" };
        println!(
            "{} {:<48} {:<14} {:>16}",
            mark,
            phase.title,
            phase.selected_tier.to_string(),
            format_price(phase.selected_price(), currency)
        );
    }
    let totals = selection.totals();
    println!();
    println!("{:<24} {:>16}", "Total", format_price(totals.total, currency));
    println!(
        "{:<24} {:>16}",
        "Starter subtotal",
        format_price(totals.starter_subtotal, currency)
    );
    println!(
        "{:<24} {:>16}",
        "Standard Plus subtotal",
        format_price(totals.plus_subtotal, currency)
    );
}

fn run_catalog_command(action: &CatalogCommands) -> Result<()> {
    match action {
        CatalogCommands::Dump { out: Some(path) } => {
            Catalog::builtin().save_to_file(path)?;
            println!("✓ Catalog written to {}", path.display());
        }
        CatalogCommands::Dump { out: None } => {
            let json = serde_json::to_string_pretty(&Catalog::builtin()).map_err(QuoteError::from)?;
            println!("{}", json);
        }
        CatalogCommands::Validate { path } => {
            let catalog = Catalog::load_from_file(path)
                .and_then(|catalog| catalog.validate().map(|()| catalog))
                .map_err(|e| QuoteError::catalog(format!("{:#}", e)))?;
            println!("✓ Catalog is valid: {} phase(s)", catalog.len());
        }
    }
    Ok(())
}

fn run_tui(cli: &Cli, catalog: &Catalog, config: ProposalConfig) -> Result<()> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| QuoteError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| QuoteError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| QuoteError::terminal(format!("Failed to create terminal: {}", e)))?;

    let state = AppState::new(catalog, config, cli.client.clone(), cli.out_dir.clone());
    let mut app = App::new(state);
    let result = app.run(&mut terminal);

    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result.map_err(Into::into)
}
