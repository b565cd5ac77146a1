//! Interquartile-range outlier thresholds for freight and delivery time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::quantile::Quartiles;
use crate::error::{OrderscopeError, Result};
use crate::model::OrderRecord;

/// Default Tukey fence multiplier.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;
/// Default warning level as a fraction of the limit.
pub const DEFAULT_WARNING_RATIO: f64 = 0.8;

/// Outlier limit and warning level for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fence {
    pub q1: f64,
    pub q3: f64,
    /// `q3 + multiplier * iqr`.
    pub limit: f64,
    /// `warning_ratio * limit`.
    pub warning: f64,
}

impl Fence {
    fn from_quartiles(quartiles: Quartiles, multiplier: f64, warning_ratio: f64) -> Self {
        let limit = quartiles.q3 + multiplier * quartiles.iqr();
        Self {
            q1: quartiles.q1,
            q3: quartiles.q3,
            limit,
            warning: limit * warning_ratio,
        }
    }

    /// Interquartile range the limit was derived from.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Strictly above the warning level.
    pub fn exceeds_warning(&self, value: f64) -> bool {
        value > self.warning
    }

    /// Strictly above the limit.
    pub fn exceeds_limit(&self, value: f64) -> bool {
        value > self.limit
    }

    /// Inside the half-open band `(warning, limit]`.
    pub fn in_warning_band(&self, value: f64) -> bool {
        value > self.warning && value <= self.limit
    }
}

/// Thresholds derived from one order collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub freight: Fence,
    pub delivery: Fence,
}

impl ThresholdSet {
    pub fn freight_limit(&self) -> f64 {
        self.freight.limit
    }

    pub fn freight_warning(&self) -> f64 {
        self.freight.warning
    }

    pub fn delivery_limit(&self) -> f64 {
        self.delivery.limit
    }

    pub fn delivery_warning(&self) -> f64 {
        self.delivery.warning
    }
}

/// Derives `ThresholdSet`s with a configurable fence.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdEngine {
    iqr_multiplier: f64,
    warning_ratio: f64,
}

impl ThresholdEngine {
    /// Create an engine with the standard 1.5 × IQR fence and 80% warning.
    pub fn new() -> Self {
        Self {
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            warning_ratio: DEFAULT_WARNING_RATIO,
        }
    }

    /// Create an engine with a custom fence multiplier and warning ratio.
    pub fn with_fence(iqr_multiplier: f64, warning_ratio: f64) -> Self {
        Self {
            iqr_multiplier,
            warning_ratio,
        }
    }

    /// Compute thresholds over a collection of orders.
    ///
    /// Missing values are skipped per metric. Fails with `EmptyInput` when
    /// the collection is empty or a metric has no values at all.
    pub fn compute<'a, I>(&self, orders: I) -> Result<ThresholdSet>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut total = 0usize;
        let mut freight = Vec::new();
        let mut delivery = Vec::new();

        for order in orders {
            total += 1;
            if let Some(v) = order.freight_value {
                freight.push(v);
            }
            if let Some(v) = order.delivery_days_f64() {
                delivery.push(v);
            }
        }

        if total == 0 {
            return Err(OrderscopeError::EmptyInput(
                "no orders to derive thresholds from".to_string(),
            ));
        }

        let freight_count = freight.len();
        let delivery_count = delivery.len();
        let freight_q = Quartiles::from_values(freight).ok_or_else(|| {
            OrderscopeError::EmptyInput("no freight_value values in collection".to_string())
        })?;
        let delivery_q = Quartiles::from_values(delivery).ok_or_else(|| {
            OrderscopeError::EmptyInput("no delivery_days values in collection".to_string())
        })?;

        let thresholds = ThresholdSet {
            freight: Fence::from_quartiles(freight_q, self.iqr_multiplier, self.warning_ratio),
            delivery: Fence::from_quartiles(delivery_q, self.iqr_multiplier, self.warning_ratio),
        };

        debug!(
            orders = total,
            freight_values = freight_count,
            delivery_values = delivery_count,
            freight_limit = thresholds.freight.limit,
            delivery_limit = thresholds.delivery.limit,
            "computed thresholds"
        );

        Ok(thresholds)
    }
}

impl Default for ThresholdEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute thresholds with the standard fence.
pub fn compute_thresholds<'a, I>(orders: I) -> Result<ThresholdSet>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    ThresholdEngine::new().compute(orders)
}
