//! Segments command - review score per severity segment.

use std::path::Path;

use colored::Colorize;
use orderscope::Segment;

use super::{describe_filter, open_dashboard, optional, view_or_warn};
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
        println!("{}", serde_json::to_string_pretty(&view.segments)?);
        return Ok(());
    }

    let classified: usize = view.segments.iter().map(|s| s.orders).sum();
    println!(
        "{} {} ({} of {} orders classified)",
        "Satisfaction by segment for".cyan().bold(),
        describe_filter(&view.filter).white(),
        classified,
        view.summary.total_orders
    );
    println!();
    println!("  {:<14} {:>8} {:>8} {:>12}", "segment", "orders", "share", "avg review");

    for entry in &view.segments {
        let share = if classified > 0 {
            entry.orders as f64 / classified as f64 * 100.0
        } else {
            0.0
        };
        let label = format!("{:<14}", entry.segment.label());
        let label = match entry.segment {
            Segment::Normal => label.green(),
            Segment::AtRisk => label.yellow(),
            Segment::HighFreight | Segment::Delayed => label.red(),
            Segment::WorstCase => label.red().bold(),
        };
        println!(
            "  {} {:>8} {:>7.1}% {:>12}",
            label,
            entry.orders,
            share,
            optional(entry.avg_review_score, 2)
        );
    }

    println!();
    for segment in Segment::ALL {
        println!("  {}: {}", segment.label().bold(), segment.description());
    }

    Ok(())
}
