//! Trends command - monthly revenue, top categories and stage lead times.

use std::path::Path;

use colored::Colorize;

use super::{describe_filter, money, open_dashboard, view_or_warn};
use crate::cli::SelectionArgs;

const BAR_WIDTH: usize = 30;

pub fn run(
    selection: SelectionArgs,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&selection.file, config)?;
    let filter = selection.filter(&dashboard);

    let Some(view) = view_or_warn(&dashboard, &filter)? else {
        return Ok(());
    };

    if json_output {
        let trends = serde_json::json!({
            "states": view.filter,
            "monthly_revenue": view.monthly_revenue,
            "top_categories": view.top_categories,
            "lead_times": view.lead_times,
        });
        println!("{}", serde_json::to_string_pretty(&trends)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Trends for".cyan().bold(),
        describe_filter(&view.filter).white()
    );
    println!();

    println!("{}", "Monthly revenue:".yellow().bold());
    let peak = view
        .monthly_revenue
        .iter()
        .map(|m| m.revenue)
        .fold(0.0_f64, f64::max);
    for month in &view.monthly_revenue {
        println!(
            "  {} {:>18} {}",
            month.month,
            money(month.revenue),
            bar(month.revenue, peak).cyan()
        );
    }
    println!();

    println!("{}", "Top categories:".yellow().bold());
    for (rank, category) in view.top_categories.iter().enumerate() {
        println!(
            "  {:>2}. {:<36} {:>18} {:>7} orders",
            rank + 1,
            category.category,
            money(category.revenue),
            category.orders
        );
    }
    println!();

    println!("{}", "Lead time per stage (days):".yellow().bold());
    println!(
        "  {:<8} {:>8} {:>10} {:>10} {:>10} {:>8}",
        "month", "orders", "approval", "carrier", "delivery", "total"
    );
    for month in &view.lead_times {
        let s = &month.stages;
        println!(
            "  {:<8} {:>8} {:>10.2} {:>10.2} {:>10.2} {:>8.2}",
            month.month,
            month.orders,
            s.purchase_to_approval,
            s.approval_to_carrier,
            s.carrier_to_delivery,
            s.total()
        );
    }

    Ok(())
}

fn bar(value: f64, peak: f64) -> String {
    if peak <= 0.0 {
        return String::new();
    }
    let filled = ((value / peak) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(BAR_WIDTH))
}
