//! Dashboard reports computed over the active order collection.

mod outliers;
mod revenue;
mod satisfaction;
mod summary;

pub use outliers::{OutlierRow, find_outliers, outlier_detail, outlier_ids};
pub use revenue::{CategoryRevenue, MonthlyRevenue, monthly_revenue, top_categories};
pub use satisfaction::{SegmentSatisfaction, segment_satisfaction};
pub use summary::{SummaryMetrics, summarize};
