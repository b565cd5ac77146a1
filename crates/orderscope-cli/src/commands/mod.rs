//! CLI command implementations.

pub mod outliers;
pub mod segments;
pub mod serve;
pub mod states;
pub mod summary;
pub mod thresholds;
pub mod trends;

use std::path::Path;

use colored::Colorize;
use orderscope::{Dashboard, DashboardConfig, DashboardView, OrderscopeError, RegionFilter};

/// Load the configuration (or defaults) and open the data file.
pub fn open_dashboard(
    file: &Path,
    config: Option<&Path>,
) -> Result<Dashboard, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    Ok(Dashboard::open(file, config)?)
}

/// Compute the view, or print a warning and return `None` when the
/// selection has no orders.
pub fn view_or_warn(
    dashboard: &Dashboard,
    filter: &RegionFilter,
) -> Result<Option<DashboardView>, Box<dyn std::error::Error>> {
    match dashboard.view(filter) {
        Ok(view) => Ok(Some(view)),
        Err(OrderscopeError::EmptyInput(message)) => {
            println!("{} {}", "Warning:".yellow().bold(), message);
            println!("Select at least one state with orders (see `orderscope states`).");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Human-readable label for a selection.
pub fn describe_filter(filter: &RegionFilter) -> String {
    if filter.is_all() {
        "all states".to_string()
    } else {
        filter.selected().collect::<Vec<_>>().join(", ")
    }
}

/// Format a currency amount with thousands separators.
pub fn money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let (sign, cents) = if cents < 0 { ("-", -cents) } else { ("", cents) };
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}R$ {}.{:02}", sign, grouped, cents % 100)
}

/// Format an optional mean, `-` when absent.
pub fn optional(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_groups_thousands() {
        assert_eq!(money(0.0), "R$ 0.00");
        assert_eq!(money(999.5), "R$ 999.50");
        assert_eq!(money(1234567.891), "R$ 1,234,567.89");
        assert_eq!(money(-1500.0), "-R$ 1,500.00");
    }

    #[test]
    fn test_describe_filter() {
        assert_eq!(describe_filter(&RegionFilter::all()), "all states");
        assert_eq!(describe_filter(&RegionFilter::parse("SP,RJ")), "SP, RJ");
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional(Some(4.256), 2), "4.26");
        assert_eq!(optional(None, 2), "-");
    }
}
