//! Revenue trend and category ranking.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::OrderRecord;

/// Revenue for one purchase month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// Purchase month as `YYYY-MM`.
    pub month: String,
    pub revenue: f64,
    pub orders: usize,
}

/// Revenue for one product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
    pub orders: usize,
}

/// Revenue per purchase month, ascending.
///
/// Every month between the first and last purchase is present; months
/// without orders carry zero revenue.
pub fn monthly_revenue(orders: &[&OrderRecord]) -> Vec<MonthlyRevenue> {
    let mut by_month: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

    for order in orders {
        let Some(purchase) = order.purchase_timestamp else {
            continue;
        };
        let Some(month_start) = purchase.date().with_day(1) else {
            continue;
        };
        let entry = by_month.entry(month_start).or_insert((0.0, 0));
        entry.0 += order.price.unwrap_or(0.0);
        entry.1 += 1;
    }

    let (Some(&first), Some(&last)) = (by_month.keys().next(), by_month.keys().next_back()) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut month = first;
    while month <= last {
        let (revenue, count) = by_month.get(&month).copied().unwrap_or((0.0, 0));
        series.push(MonthlyRevenue {
            month: month.format("%Y-%m").to_string(),
            revenue,
            orders: count,
        });
        match month.checked_add_months(Months::new(1)) {
            Some(next) => month = next,
            None => break,
        }
    }

    series
}

/// The `limit` categories with the highest revenue.
///
/// Orders without a category are left out. Ties keep the order in which
/// categories first appear.
pub fn top_categories(orders: &[&OrderRecord], limit: usize) -> Vec<CategoryRevenue> {
    let mut totals: IndexMap<&str, (f64, usize)> = IndexMap::new();

    for order in orders {
        let Some(category) = order.product_category_name.as_deref() else {
            continue;
        };
        let entry = totals.entry(category).or_insert((0.0, 0));
        entry.0 += order.price.unwrap_or(0.0);
        entry.1 += 1;
    }

    let mut ranked: Vec<CategoryRevenue> = totals
        .into_iter()
        .map(|(category, (revenue, orders))| CategoryRevenue {
            category: category.to_string(),
            revenue,
            orders,
        })
        .collect();
    ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranked.truncate(limit);
    ranked
}
