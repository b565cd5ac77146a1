//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use orderscope::{Dashboard, RegionFilter};

/// Orderscope: freight and delivery outliers in e-commerce orders
#[derive(Parser)]
#[command(name = "orderscope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dashboard configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// A data file plus the states to look at.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Path to the consolidated order file (CSV/TSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Customer state to include; repeat or comma-separate for several
    /// (default: the first few states in the file)
    #[arg(
        short = 's',
        long = "state",
        value_name = "STATE",
        value_delimiter = ',',
        value_parser = parse_state
    )]
    pub states: Vec<String>,

    /// Include every state
    #[arg(long, conflicts_with = "states")]
    pub all_states: bool,
}

impl SelectionArgs {
    /// Resolve the region filter against a loaded dashboard.
    pub fn filter(&self, dashboard: &Dashboard) -> RegionFilter {
        if self.all_states {
            RegionFilter::all()
        } else if self.states.is_empty() {
            dashboard.default_filter()
        } else {
            RegionFilter::states(&self.states)
        }
    }
}

/// A state code must name something; use `--all-states` for every state.
fn parse_state(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("state must not be blank (use --all-states to include every state)".into());
    }
    Ok(value.to_string())
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show coverage, thresholds and headline metrics
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List customer states and the default pre-selection
    States {
        /// Path to the consolidated order file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the freight and delivery outlier thresholds
    Thresholds {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List orders past either outlier limit
    Outliers {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Show the detail of one outlier order
        #[arg(long, value_name = "ID")]
        order_id: Option<String>,

        /// Maximum number of rows to print
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show review scores per severity segment
    Segments {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show monthly revenue, top categories and stage lead times
    Trends {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the dashboard as a JSON API
    Serve {
        /// Path to the consolidated order file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Port for web server
        #[arg(short, long, default_value = "8501")]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_states_accept_repeats_and_commas() {
        let cli = Cli::parse_from(["orderscope", "summary", "data.csv", "-s", "SP,RJ", "-s", "MG"]);
        match cli.command {
            Commands::Summary { selection, .. } => {
                assert_eq!(selection.states, vec!["SP", "RJ", "MG"]);
                assert!(!selection.all_states);
            }
            _ => panic!("expected summary"),
        }
    }

    #[test]
    fn test_blank_state_is_rejected() {
        assert!(Cli::try_parse_from(["orderscope", "summary", "data.csv", "-s", ""]).is_err());
        assert!(Cli::try_parse_from(["orderscope", "summary", "data.csv", "-s", "SP,,RJ"]).is_err());
        assert!(Cli::try_parse_from(["orderscope", "summary", "data.csv", "-s", " SP"]).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["orderscope", "states", "data.csv", "--config", "cfg.json", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
    }
}
