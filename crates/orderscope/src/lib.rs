//! Orderscope: outlier thresholds and order segmentation for e-commerce order data.
//!
//! Orderscope loads a pre-joined dataset of delivered orders, derives
//! interquartile-range outlier thresholds for freight cost and delivery
//! duration, and classifies every order into a severity segment. On top of
//! that engine it computes the metrics a BI dashboard shows: revenue trends,
//! category rankings, process lead times and an outlier table.
//!
//! # Core Principles
//!
//! - **Pure**: thresholds and segments are recomputed from the active
//!   collection on every call, nothing is cached or persisted
//! - **Explicit failure**: empty collections and incomplete records are
//!   reported as errors, never silently defaulted
//! - **Order-preserving**: grouped outputs come back in a deterministic order
//!
//! # Example
//!
//! ```no_run
//! use orderscope::{Dashboard, DashboardConfig, RegionFilter};
//!
//! let dashboard = Dashboard::open("olist_consolidated.csv", DashboardConfig::default()).unwrap();
//! let view = dashboard.view(&RegionFilter::states(["SP", "RJ"])).unwrap();
//!
//! println!("Freight limit: {:.2}", view.thresholds.freight.limit);
//! println!("Worst case orders: {}", view.summary.risk_bands.worst_case);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod model;
pub mod report;

mod dashboard;

pub use crate::dashboard::{Coverage, Dashboard, DashboardView};
pub use config::{DashboardConfig, ThresholdScope};
pub use engine::{
    Fence, LeadTimeStages, MonthlyLeadTime, Quartiles, RiskBandCounts, Segment, ThresholdEngine,
    ThresholdSet, classify, compute_thresholds, count_by_risk_band, monthly_lead_times,
};
pub use error::{OrderscopeError, Result};
pub use input::{ColumnMapping, DataTable, LoadReport, OrderLoader, Parser, ParserConfig, SourceMetadata};
pub use model::{OrderRecord, RegionFilter};
