//! Threshold and segmentation engine.
//!
//! Every function here is pure: it takes the active order collection (and,
//! where needed, a `ThresholdSet` derived from it) and returns a fresh
//! result. Callers recompute whenever the collection changes.

mod lead_time;
mod quantile;
mod risk;
mod segment;
mod thresholds;

pub use lead_time::{LeadTimeStages, MonthlyLeadTime, monthly_lead_times};
pub use quantile::{Quartiles, quantile_sorted};
pub use risk::{RiskBandCounts, count_by_risk_band};
pub use segment::{Segment, classify, segment_for};
pub use thresholds::{
    DEFAULT_IQR_MULTIPLIER, DEFAULT_WARNING_RATIO, Fence, ThresholdEngine, ThresholdSet,
    compute_thresholds,
};
