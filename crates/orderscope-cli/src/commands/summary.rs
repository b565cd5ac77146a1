//! Summary command - coverage, thresholds and headline metrics.

use std::path::Path;

use colored::Colorize;

use super::{describe_filter, money, open_dashboard, optional, view_or_warn};
use crate::cli::SelectionArgs;

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
        let summary = serde_json::json!({
            "file": dashboard.source().file,
            "states": view.filter,
            "coverage": view.coverage,
            "threshold_scope": view.threshold_scope,
            "thresholds": view.thresholds,
            "summary": view.summary,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Order dashboard for".cyan().bold(),
        dashboard.source().file.white()
    );
    if let Some(coverage) = view.coverage {
        println!(
            "  Coverage: {} to {}",
            coverage.first_purchase.format("%d %b %Y"),
            coverage.last_purchase.format("%d %b %Y")
        );
    }
    println!("  States:   {}", describe_filter(&view.filter));
    println!();

    let t = &view.thresholds;
    println!("{}", "Outlier thresholds:".yellow().bold());
    println!(
        "  Freight:  limit {}  warning {}",
        money(t.freight.limit).white().bold(),
        money(t.freight.warning)
    );
    println!(
        "  Delivery: limit {}  warning {}",
        format!("{:.1} days", t.delivery.limit).white().bold(),
        format!("{:.1} days", t.delivery.warning)
    );
    println!();

    let s = &view.summary;
    println!("{}", "Metrics:".yellow().bold());
    println!("  Orders:            {}", s.total_orders.to_string().white().bold());
    println!("  Revenue:           {}", money(s.total_revenue).green());
    println!("  Avg review score:  {}", optional(s.avg_review_score, 2));
    println!("  Avg delivery days: {}", optional(s.avg_delivery_days, 1));
    println!(
        "  At risk:           {}",
        s.risk_bands.at_risk.to_string().yellow()
    );
    println!(
        "  Worst case:        {}",
        s.risk_bands.worst_case.to_string().red().bold()
    );

    Ok(())
}
