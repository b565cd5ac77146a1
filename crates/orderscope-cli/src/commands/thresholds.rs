//! Thresholds command - show the IQR fences for the selection.

use std::path::Path;

use colored::Colorize;
use orderscope::{Fence, OrderscopeError, ThresholdScope};

use super::{describe_filter, open_dashboard};
use crate::cli::SelectionArgs;

pub fn run(
    selection: SelectionArgs,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&selection.file, config)?;
    let filter = selection.filter(&dashboard);

    let thresholds = match dashboard.thresholds(&filter) {
        Ok(t) => t,
        Err(OrderscopeError::EmptyInput(message)) => {
            println!("{} {}", "Warning:".yellow().bold(), message);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&thresholds)?);
        return Ok(());
    }

    println!(
        "{} {} ({} scope)",
        "Thresholds for".cyan().bold(),
        describe_filter(&filter).white(),
        match dashboard.config().threshold_scope {
            ThresholdScope::Selection => "selection",
            ThresholdScope::Dataset => "dataset",
        }
    );
    println!();
    println!(
        "  {:<10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "metric", "Q1", "Q3", "IQR", "warning", "limit"
    );
    print_fence("freight", &thresholds.freight);
    print_fence("delivery", &thresholds.delivery);

    Ok(())
}

fn print_fence(name: &str, fence: &Fence) {
    println!(
        "  {:<10} {:>10.2} {:>10.2} {:>10.2} {:>10} {:>10}",
        name,
        fence.q1,
        fence.q3,
        fence.iqr(),
        format!("{:.2}", fence.warning).yellow(),
        format!("{:.2}", fence.limit).red().bold()
    );
}
