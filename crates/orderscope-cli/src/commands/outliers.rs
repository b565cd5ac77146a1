//! Outliers command - orders past the freight or delivery limit.

use std::path::Path;

use colored::Colorize;
use orderscope::OrderscopeError;
use orderscope::report::{OutlierRow, outlier_detail, outlier_ids};

use super::{describe_filter, money, open_dashboard, optional};
use crate::cli::SelectionArgs;

pub fn run(
    selection: SelectionArgs,
    order_id: Option<String>,
    limit: usize,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = open_dashboard(&selection.file, config)?;
    let filter = selection.filter(&dashboard);

    let rows = match dashboard.outliers(&filter) {
        Ok(rows) => rows,
        Err(OrderscopeError::EmptyInput(message)) => {
            println!("{} {}", "Warning:".yellow().bold(), message);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(id) = order_id {
        let Some(row) = outlier_detail(&rows, &id) else {
            return Err(format!(
                "Order {} is not an outlier for {}",
                id,
                describe_filter(&filter)
            )
            .into());
        };
        if json_output {
            println!("{}", serde_json::to_string_pretty(row)?);
        } else {
            print_detail(row);
        }
        return Ok(());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let ids = outlier_ids(&rows);
    println!(
        "{} {} outlier rows ({} orders) for {}",
        "Found".cyan().bold(),
        rows.len().to_string().white().bold(),
        ids.len(),
        describe_filter(&filter)
    );
    println!();

    if rows.is_empty() {
        println!("{}", "No orders past either limit.".green());
        return Ok(());
    }

    println!(
        "  {:<34} {:>6} {:>12} {:<14} {:<6}",
        "order_id", "days", "freight", "segment", "state"
    );
    for row in rows.iter().take(limit) {
        let order = &row.order;
        let days = order
            .delivery_days
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let days = if row.delayed { days.red() } else { days.normal() };
        let freight = optional(order.freight_value, 2);
        let freight = if row.high_freight {
            freight.red()
        } else {
            freight.normal()
        };

        println!(
            "  {:<34} {:>6} {:>12} {:<14} {:<6}",
            order.order_id,
            days,
            freight,
            row.segment.map(|s| s.label()).unwrap_or("-"),
            order.customer_state.as_deref().unwrap_or("-")
        );
    }

    if rows.len() > limit {
        println!();
        println!(
            "... {} more. Use {} to show more or {} for one order.",
            rows.len() - limit,
            "--limit".cyan(),
            "--order-id".cyan()
        );
    }

    Ok(())
}

fn print_detail(row: &OutlierRow) {
    let order = &row.order;
    println!("{} {}", "Outlier order".cyan().bold(), order.order_id.white().bold());
    println!();
    println!(
        "  Segment:     {}",
        row.segment.map(|s| s.label()).unwrap_or("unclassified")
    );
    println!("  Delayed:     {}", flag(row.delayed));
    println!("  High freight: {}", flag(row.high_freight));
    println!();
    println!("  Price:       {}", order.price.map(money).unwrap_or_else(|| "-".into()));
    println!("  Freight:     {}", order.freight_value.map(money).unwrap_or_else(|| "-".into()));
    println!("  Review:      {}", optional(order.review_score, 0));
    println!(
        "  Category:    {}",
        order.product_category_name.as_deref().unwrap_or("-")
    );
    println!("  State:       {}", order.customer_state.as_deref().unwrap_or("-"));
    println!();
    println!("  Purchased:   {}", timestamp(order.purchase_timestamp));
    println!("  Approved:    {}", timestamp(order.approved_timestamp));
    println!("  To carrier:  {}", timestamp(order.carrier_timestamp));
    println!("  Delivered:   {}", timestamp(order.delivered_timestamp));
    println!(
        "  Delivery:    {} days",
        order
            .delivery_days
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".into())
    );
}

fn flag(value: bool) -> colored::ColoredString {
    if value { "yes".red().bold() } else { "no".normal() }
}

fn timestamp<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string())
}
