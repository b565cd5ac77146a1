//! Input parsing, data source handling and order loading.

mod loader;
mod parser;
#[cfg(feature = "parquet")]
mod parquet;
mod source;

pub use loader::{ColumnMapping, LoadReport, OrderLoader, parse_timestamp};
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
