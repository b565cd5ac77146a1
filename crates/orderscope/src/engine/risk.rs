//! Risk-band counts for the summary cards.
//!
//! These counts use their own boundaries and are not a breakdown of
//! [`Segment`](super::Segment): the at-risk band stops at the limit, and an
//! order can be counted at-risk on one metric while past the limit on the
//! other.

use serde::{Deserialize, Serialize};

use super::thresholds::ThresholdSet;
use crate::model::OrderRecord;

/// Order counts per risk band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBandCounts {
    /// Delivery days in `(warning, limit]` or freight in `(warning, limit]`.
    pub at_risk: usize,
    /// Delivery days and freight both above their limits.
    pub worst_case: usize,
}

/// Count orders per risk band. Missing values never match.
pub fn count_by_risk_band<'a, I>(orders: I, thresholds: &ThresholdSet) -> RiskBandCounts
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut counts = RiskBandCounts::default();

    for order in orders {
        let days = order.delivery_days_f64();
        let freight = order.freight_value;

        let days_band = days.is_some_and(|d| thresholds.delivery.in_warning_band(d));
        let freight_band = freight.is_some_and(|f| thresholds.freight.in_warning_band(f));
        if days_band || freight_band {
            counts.at_risk += 1;
        }

        let days_over = days.is_some_and(|d| thresholds.delivery.exceeds_limit(d));
        let freight_over = freight.is_some_and(|f| thresholds.freight.exceeds_limit(f));
        if days_over && freight_over {
            counts.worst_case += 1;
        }
    }

    counts
}

impl ThresholdSet {
    /// Count orders per risk band against these thresholds.
    pub fn count_by_risk_band<'a, I>(&self, orders: I) -> RiskBandCounts
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        count_by_risk_band(orders, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::segment::{Segment, classify};
    use crate::engine::thresholds::Fence;

    fn thresholds() -> ThresholdSet {
        ThresholdSet {
            freight: Fence {
                q1: 10.0,
                q3: 30.0,
                limit: 60.0,
                warning: 48.0,
            },
            delivery: Fence {
                q1: 5.0,
                q3: 15.0,
                limit: 30.0,
                warning: 24.0,
            },
        }
    }

    fn order(days: i64, freight: f64) -> OrderRecord {
        OrderRecord::new(format!("{days}/{freight}"))
            .with_delivery_days(days)
            .with_freight(freight)
    }

    #[test]
    fn test_band_boundaries() {
        let orders = vec![
            order(24, 10.0), // at warning: not counted
            order(30, 10.0), // at limit: counted
            order(31, 10.0), // past limit: not in band
            order(2, 60.0),  // freight at limit: counted
        ];
        let counts = count_by_risk_band(&orders, &thresholds());
        assert_eq!(counts.at_risk, 2);
        assert_eq!(counts.worst_case, 0);
    }

    #[test]
    fn test_worst_case_requires_both() {
        let orders = vec![order(31, 61.0), order(31, 10.0), order(2, 61.0)];
        let counts = thresholds().count_by_risk_band(&orders);
        assert_eq!(counts.worst_case, 1);
    }

    #[test]
    fn test_independent_of_segments() {
        // Delayed segment, yet counted at-risk through the freight band.
        let delayed_with_freight_band = order(40, 50.0);
        let t = thresholds();

        assert_eq!(classify(&delayed_with_freight_band, &t).unwrap(), Segment::Delayed);
        assert_eq!(t.count_by_risk_band([&delayed_with_freight_band]).at_risk, 1);
    }

    #[test]
    fn test_missing_values_never_match() {
        let orders = vec![OrderRecord::new("x"), OrderRecord::new("y").with_freight(55.0)];
        let counts = count_by_risk_band(&orders, &thresholds());
        assert_eq!(counts, RiskBandCounts { at_risk: 1, worst_case: 0 });
    }
}
