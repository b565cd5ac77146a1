//! Review score by segment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::summary::mean;
use crate::engine::{Segment, ThresholdSet};
use crate::model::OrderRecord;

/// Review outcome for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSatisfaction {
    pub segment: Segment,
    pub orders: usize,
    /// Mean review score, `None` if no order in the segment has one.
    pub avg_review_score: Option<f64>,
}

/// Mean review score per segment, in segment order.
///
/// Only segments that occur are listed. Orders that cannot be classified
/// are left out.
pub fn segment_satisfaction(
    orders: &[&OrderRecord],
    thresholds: &ThresholdSet,
) -> Vec<SegmentSatisfaction> {
    let mut groups: BTreeMap<Segment, Vec<Option<f64>>> = BTreeMap::new();
    let mut unclassified = 0usize;

    for order in orders {
        match thresholds.classify(order) {
            Ok(segment) => groups.entry(segment).or_default().push(order.review_score),
            Err(_) => unclassified += 1,
        }
    }

    if unclassified > 0 {
        debug!(unclassified, "orders left out of segment satisfaction");
    }

    groups
        .into_iter()
        .map(|(segment, scores)| SegmentSatisfaction {
            segment,
            orders: scores.len(),
            avg_review_score: mean(scores.into_iter().flatten()),
        })
        .collect()
}
