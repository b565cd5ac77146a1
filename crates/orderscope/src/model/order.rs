//! The order record every engine operation works on.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// One delivered purchase from the consolidated dataset.
///
/// Every field except `order_id` may be missing in raw data. The loader
/// fills `delivery_days` from the purchase and delivery timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Opaque order identifier.
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub purchase_timestamp: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub approved_timestamp: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub carrier_timestamp: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delivered_timestamp: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub freight_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub review_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub product_category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub customer_state: Option<String>,
    /// Whole days from purchase to delivery, truncated toward zero.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delivery_days: Option<i64>,
}

impl OrderRecord {
    /// Create a record with only an identifier set.
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            purchase_timestamp: None,
            approved_timestamp: None,
            carrier_timestamp: None,
            delivered_timestamp: None,
            price: None,
            freight_value: None,
            review_score: None,
            product_category_name: None,
            customer_state: None,
            delivery_days: None,
        }
    }

    /// Set the four lifecycle timestamps and derive `delivery_days`.
    pub fn with_timeline(
        mut self,
        purchase: NaiveDateTime,
        approved: Option<NaiveDateTime>,
        carrier: Option<NaiveDateTime>,
        delivered: Option<NaiveDateTime>,
    ) -> Self {
        self.purchase_timestamp = Some(purchase);
        self.approved_timestamp = approved;
        self.carrier_timestamp = carrier;
        self.delivered_timestamp = delivered;
        self.delivery_days = whole_days_between(Some(purchase), delivered);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_freight(mut self, freight_value: f64) -> Self {
        self.freight_value = Some(freight_value);
        self
    }

    /// Set `delivery_days` directly, without timestamps.
    pub fn with_delivery_days(mut self, days: i64) -> Self {
        self.delivery_days = Some(days);
        self
    }

    pub fn with_review_score(mut self, score: f64) -> Self {
        self.review_score = Some(score);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.product_category_name = Some(category.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.customer_state = Some(state.into());
        self
    }

    /// Delivery days as a float, for threshold comparisons.
    pub fn delivery_days_f64(&self) -> Option<f64> {
        self.delivery_days.map(|d| d as f64)
    }
}

/// Whole days between two timestamps, truncated toward zero.
pub fn whole_days_between(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Option<i64> {
    Some((end? - start?).num_days())
}

/// Fractional days between two timestamps.
pub fn fractional_days(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 86_400_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_delivery_days_truncates_partial_days() {
        let order = OrderRecord::new("o1").with_timeline(ts(1, 18), None, None, Some(ts(4, 6)));
        // 2 days 12 hours
        assert_eq!(order.delivery_days, Some(2));
    }

    #[test]
    fn test_delivery_days_undefined_without_delivery() {
        let order = OrderRecord::new("o1").with_timeline(ts(1, 0), None, None, None);
        assert_eq!(order.delivery_days, None);
    }

    #[test]
    fn test_fractional_days_keeps_remainder() {
        let days = fractional_days(ts(4, 6) - ts(1, 18));
        assert!((days - 2.5).abs() < 1e-12);
    }
}
