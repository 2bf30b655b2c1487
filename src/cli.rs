use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::selection::SelectionState;
use crate::types::Tier;

/// QuoteCraft - Commercial quote configurator
#[derive(Parser, Debug)]
#[command(name = "quotecraft")]
#[command(about = "Configure phased service quotes and export them as PDF proposals")]
#[command(version)]
pub struct Cli {
    /// Catalog JSON file (defaults to the built-in catalog)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Proposal configuration JSON file (branding, issuer, wording)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Client name printed on the proposal
    #[arg(long, global = true)]
    pub client: Option<String>,

    /// Directory exported proposals are written to
    #[arg(long, global = true, default_value = ".")]
    pub out_dir: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether the interactive configurator should run
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive configurator (default)
    Tui,
    /// Print the per-phase prices and the three totals
    Summary {
        #[command(flatten)]
        quote: QuoteArgs,
    },
    /// Print a text preview of the paginated proposal
    Preview {
        #[command(flatten)]
        quote: QuoteArgs,
    },
    /// Write the proposal PDF
    Export {
        #[command(flatten)]
        quote: QuoteArgs,
    },
    /// Catalog utilities
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Write the built-in catalog as JSON
    Dump {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Validate a catalog file
    Validate {
        /// Path to the catalog file
        path: PathBuf,
    },
}

/// Selection overrides for the headless commands
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteArgs {
    /// Sell this phase at Standard Plus (repeatable)
    #[arg(long = "plus", value_name = "ID")]
    pub plus: Vec<String>,

    /// Leave this phase out of the quote (repeatable)
    #[arg(long = "disable", value_name = "ID")]
    pub disable: Vec<String>,
}

impl QuoteArgs {
    /// Apply the overrides to a fresh selection. Unknown ids are ignored.
    pub fn apply(&self, selection: &mut SelectionState) {
        for id in &self.plus {
            selection.select_tier(id, Tier::StandardPlus);
        }
        for id in &self.disable {
            if selection.phase(id).is_some_and(|phase| phase.enabled) {
                selection.toggle_enabled(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["quotecraft"]).expect("parse");
        assert!(cli.is_tui());
        assert_eq!(cli.out_dir, PathBuf::from("."));
    }

    #[test]
    fn test_repeatable_overrides() {
        let cli = Cli::try_parse_from([
            "quotecraft",
            "export",
            "--plus",
            "p1",
            "--plus",
            "p3",
            "--disable",
            "p6",
            "--client",
            "ACME Immo",
        ])
        .expect("parse");
        assert!(!cli.is_tui());
        assert_eq!(cli.client.as_deref(), Some("ACME Immo"));
        match cli.command {
            Some(Commands::Export { quote }) => {
                assert_eq!(quote.plus, vec!["p1", "p3"]);
                assert_eq!(quote.disable, vec!["p6"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_catalog_subcommands() {
        let cli = Cli::try_parse_from(["quotecraft", "catalog", "validate", "c.json"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Some(Commands::Catalog {
                action: CatalogCommands::Validate { .. }
            })
        ));
        assert!(Cli::try_parse_from(["quotecraft", "catalog"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut selection = SelectionState::new(&Catalog::builtin(), "ACME");
        let args = QuoteArgs {
            plus: vec!["p2".into(), "nope".into()],
            disable: vec!["p1".into(), "p1".into()],
        };
        args.apply(&mut selection);
        assert_eq!(
            selection.phase("p2").map(|p| p.selected_tier),
            Some(Tier::StandardPlus)
        );
        assert_eq!(selection.phase("p1").map(|p| p.enabled), Some(false));
    }
}
