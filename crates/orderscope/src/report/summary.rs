//! Headline metrics for the summary cards.

use serde::{Deserialize, Serialize};

use crate::engine::{RiskBandCounts, ThresholdSet, count_by_risk_band};
use crate::model::OrderRecord;

/// Headline metrics for one order collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_orders: usize,
    /// Sum of `price`; missing prices count as nothing.
    pub total_revenue: f64,
    /// Mean review score, `None` when no order has one.
    pub avg_review_score: Option<f64>,
    /// Mean whole delivery days, `None` when no order has one.
    pub avg_delivery_days: Option<f64>,
    pub risk_bands: RiskBandCounts,
}

/// Compute the headline metrics.
pub fn summarize(orders: &[&OrderRecord], thresholds: &ThresholdSet) -> SummaryMetrics {
    SummaryMetrics {
        total_orders: orders.len(),
        total_revenue: orders.iter().filter_map(|o| o.price).sum(),
        avg_review_score: mean(orders.iter().filter_map(|o| o.review_score)),
        avg_delivery_days: mean(orders.iter().filter_map(|o| o.delivery_days_f64())),
        risk_bands: count_by_risk_band(orders.iter().copied(), thresholds),
    }
}

/// Arithmetic mean, `None` for an empty iterator.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
