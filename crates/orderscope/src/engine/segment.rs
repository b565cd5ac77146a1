//! Order segmentation by delivery and freight severity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::thresholds::ThresholdSet;
use crate::error::{OrderscopeError, Result};
use crate::model::OrderRecord;

/// Severity segment of an order relative to the current thresholds.
///
/// Variants are declared in display order, which is also the `Ord` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "At-Risk")]
    AtRisk,
    #[serde(rename = "High Freight")]
    HighFreight,
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "Worst Case")]
    WorstCase,
}

impl Segment {
    /// All segments in display order.
    pub const ALL: [Segment; 5] = [
        Segment::Normal,
        Segment::AtRisk,
        Segment::HighFreight,
        Segment::Delayed,
        Segment::WorstCase,
    ];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Normal => "Normal",
            Segment::AtRisk => "At-Risk",
            Segment::HighFreight => "High Freight",
            Segment::Delayed => "Delayed",
            Segment::WorstCase => "Worst Case",
        }
    }

    /// One-line definition of the segment.
    pub fn description(&self) -> &'static str {
        match self {
            Segment::Normal => "Delivery time and freight within the statistical normal range",
            Segment::AtRisk => "Past the warning level of a limit; needs attention",
            Segment::HighFreight => "Freight cost at outlier level",
            Segment::Delayed => "Delivery time at outlier level",
            Segment::WorstCase => "High freight and delayed delivery at the same time",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One override rule in the segmentation cascade.
struct SegmentRule {
    segment: Segment,
    applies: fn(days: f64, freight: f64, t: &ThresholdSet) -> bool,
}

/// Override rules in cascade order. A later matching rule replaces the
/// label set by an earlier one, so `WorstCase` must stay last.
const SEGMENT_RULES: [SegmentRule; 4] = [
    SegmentRule {
        segment: Segment::AtRisk,
        applies: |days, freight, t| {
            t.delivery.exceeds_warning(days) || t.freight.exceeds_warning(freight)
        },
    },
    SegmentRule {
        segment: Segment::HighFreight,
        applies: |_, freight, t| t.freight.exceeds_limit(freight),
    },
    SegmentRule {
        segment: Segment::Delayed,
        applies: |days, _, t| t.delivery.exceeds_limit(days),
    },
    SegmentRule {
        segment: Segment::WorstCase,
        applies: |days, freight, t| {
            t.delivery.exceeds_limit(days) && t.freight.exceeds_limit(freight)
        },
    },
];

/// Segment for a pair of metric values.
pub fn segment_for(delivery_days: f64, freight_value: f64, thresholds: &ThresholdSet) -> Segment {
    SEGMENT_RULES
        .iter()
        .rev()
        .find(|rule| (rule.applies)(delivery_days, freight_value, thresholds))
        .map(|rule| rule.segment)
        .unwrap_or(Segment::Normal)
}

/// Classify an order. Fails with `MissingField` when the order has no
/// freight value or delivery duration.
pub fn classify(order: &OrderRecord, thresholds: &ThresholdSet) -> Result<Segment> {
    let freight = order.freight_value.ok_or_else(|| OrderscopeError::MissingField {
        order_id: order.order_id.clone(),
        field: "freight_value",
    })?;
    let days = order.delivery_days_f64().ok_or_else(|| OrderscopeError::MissingField {
        order_id: order.order_id.clone(),
        field: "delivery_days",
    })?;

    Ok(segment_for(days, freight, thresholds))
}

impl ThresholdSet {
    /// Classify an order against these thresholds.
    pub fn classify(&self, order: &OrderRecord) -> Result<Segment> {
        classify(order, self)
    }
}
