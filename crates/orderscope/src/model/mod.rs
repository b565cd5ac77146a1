//! Order records and selections over them.

mod filter;
mod order;

pub use filter::RegionFilter;
pub use order::{OrderRecord, fractional_days, whole_days_between};
