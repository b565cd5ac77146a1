//! Orderscope CLI - order outlier dashboard in the terminal and over HTTP.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Summary { selection, json } => commands::summary::run(selection, json, config),

        Commands::States { file, json } => commands::states::run(file, json, config),

        Commands::Thresholds { selection, json } => {
            commands::thresholds::run(selection, json, config)
        }

        Commands::Outliers {
            selection,
            order_id,
            limit,
            json,
        } => commands::outliers::run(selection, order_id, limit, json, config),

        Commands::Segments { selection, json } => commands::segments::run(selection, json, config),

        Commands::Trends { selection, json } => commands::trends::run(selection, json, config),

        Commands::Serve { file, port } => commands::serve::run(file, port, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "orderscope=debug,orderscope_cli=debug,tower_http=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
