//! Serve command - expose the dashboard as a JSON API.

use std::path::{Path, PathBuf};

use colored::Colorize;

use super::{describe_filter, open_dashboard};
use crate::server::{app, state::AppState};

pub fn run(
    file: PathBuf,
    port: u16,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&file, config)?;
    let report = dashboard.load_report().clone();
    let default_filter = dashboard.default_filter();

    let state = AppState::new(dashboard);

    let url = format!("http://localhost:{}/api", port);
    println!();
    println!(
        "{} {}",
        "Serving order dashboard at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  File:    {}", file.display());
    println!(
        "  Orders:  {} delivered of {} rows",
        report.loaded, report.total_rows
    );
    println!("  Default: {}", describe_filter(&default_filter));
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))?;

    Ok(())
}
