//! States command - list customer states and the default pre-selection.

use std::path::{Path, PathBuf};

use colored::Colorize;

use super::open_dashboard;

pub fn run(
    file: PathBuf,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&file, config)?;
    let default_filter = dashboard.default_filter();

    let rows: Vec<(&str, usize, bool)> = dashboard
        .states()
        .into_iter()
        .map(|state| {
            let orders = dashboard
                .orders()
                .iter()
                .filter(|o| o.customer_state.as_deref() == Some(state))
                .count();
            let preselected = default_filter.selected().any(|s| s == state);
            (state, orders, preselected)
        })
        .collect();

    if json_output {
        let states: Vec<_> = rows
            .iter()
            .map(|(state, orders, preselected)| {
                serde_json::json!({
                    "state": state,
                    "orders": orders,
                    "default": preselected,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&states)?);
        return Ok(());
    }

    println!(
        "{} {} ({} states)",
        "Customer states in".cyan().bold(),
        dashboard.source().file.white(),
        rows.len()
    );
    println!();

    for (state, orders, preselected) in &rows {
        let marker = if *preselected { "*".green().bold() } else { " ".normal() };
        println!("  {} {:<4} {:>8}", marker, state, orders);
    }

    println!();
    println!("{} selected by default", "*".green().bold());

    Ok(())
}
