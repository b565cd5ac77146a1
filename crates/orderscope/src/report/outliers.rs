//! Outlier table and detail lookup.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::engine::{Segment, ThresholdSet};
use crate::model::OrderRecord;

/// One row of the outlier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRow {
    #[serde(flatten)]
    pub order: OrderRecord,
    /// Segment of the order; `None` if one of its metrics is missing.
    pub segment: Option<Segment>,
    pub delayed: bool,
    pub high_freight: bool,
}

/// Orders past the delivery limit or the freight limit, in input order.
pub fn find_outliers(orders: &[&OrderRecord], thresholds: &ThresholdSet) -> Vec<OutlierRow> {
    orders
        .iter()
        .filter_map(|order| {
            let delayed = order
                .delivery_days_f64()
                .is_some_and(|d| thresholds.delivery.exceeds_limit(d));
            let high_freight = order
                .freight_value
                .is_some_and(|f| thresholds.freight.exceeds_limit(f));

            (delayed || high_freight).then(|| OutlierRow {
                order: (*order).clone(),
                segment: thresholds.classify(order).ok(),
                delayed,
                high_freight,
            })
        })
        .collect()
}

/// Distinct order ids in the outlier table, in first-appearance order.
pub fn outlier_ids(rows: &[OutlierRow]) -> Vec<&str> {
    rows.iter()
        .map(|row| row.order.order_id.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// The first outlier row for an order id.
pub fn outlier_detail<'a>(rows: &'a [OutlierRow], order_id: &str) -> Option<&'a OutlierRow> {
    rows.iter().find(|row| row.order.order_id == order_id)
}
