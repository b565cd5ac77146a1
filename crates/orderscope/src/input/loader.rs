//! Conversion of a parsed table into delivered order records.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::source::DataTable;
use crate::error::{OrderscopeError, Result};
use crate::model::{OrderRecord, whole_days_between};

/// Naive timestamp layouts tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Names of the source columns each order field is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub order_id: String,
    pub purchase_timestamp: String,
    pub approved_timestamp: String,
    pub carrier_timestamp: String,
    pub delivered_timestamp: String,
    pub price: String,
    pub freight_value: String,
    pub review_score: String,
    pub product_category_name: String,
    pub customer_state: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            order_id: "order_id".to_string(),
            purchase_timestamp: "order_purchase_timestamp".to_string(),
            approved_timestamp: "order_approved_at".to_string(),
            carrier_timestamp: "order_delivered_carrier_date".to_string(),
            delivered_timestamp: "order_delivered_customer_date".to_string(),
            price: "price".to_string(),
            freight_value: "freight_value".to_string(),
            review_score: "review_score".to_string(),
            product_category_name: "product_category_name".to_string(),
            customer_state: "customer_state".to_string(),
        }
    }
}

/// Counts from a load, for reporting what was dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Rows in the source table.
    pub total_rows: usize,
    /// Rows kept as delivered orders.
    pub loaded: usize,
    /// Rows dropped for lacking a delivered timestamp.
    pub skipped_undelivered: usize,
    /// Rows dropped for lacking a purchase timestamp.
    pub skipped_unpurchased: usize,
}

/// Resolved column positions for one table.
struct Columns {
    order_id: usize,
    purchase: usize,
    delivered: usize,
    price: usize,
    freight: usize,
    approved: Option<usize>,
    carrier: Option<usize>,
    review_score: Option<usize>,
    category: Option<usize>,
    state: Option<usize>,
}

/// Builds `OrderRecord`s from a `DataTable`.
pub struct OrderLoader {
    columns: ColumnMapping,
}

impl OrderLoader {
    /// Create a loader using the default column names.
    pub fn new() -> Self {
        Self {
            columns: ColumnMapping::default(),
        }
    }

    /// Create a loader with a custom column mapping.
    pub fn with_columns(columns: ColumnMapping) -> Self {
        Self { columns }
    }

    /// Load delivered orders from a table.
    ///
    /// Rows without a delivered or purchase timestamp are dropped and
    /// counted in the report. A malformed non-empty cell is an error.
    pub fn load(&self, table: &DataTable) -> Result<(Vec<OrderRecord>, LoadReport)> {
        let cols = self.resolve(table)?;
        let mut report = LoadReport {
            total_rows: table.row_count(),
            ..LoadReport::default()
        };
        let mut orders = Vec::with_capacity(table.row_count());

        for (row_idx, row) in table.rows.iter().enumerate() {
            let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");
            let optional = |idx: Option<usize>| idx.map(cell).unwrap_or("");

            let delivered = self.timestamp(row_idx, &self.columns.delivered_timestamp, cell(cols.delivered))?;
            let Some(delivered) = delivered else {
                report.skipped_undelivered += 1;
                continue;
            };
            let purchase = self.timestamp(row_idx, &self.columns.purchase_timestamp, cell(cols.purchase))?;
            let Some(purchase) = purchase else {
                report.skipped_unpurchased += 1;
                continue;
            };

            let order = OrderRecord {
                order_id: cell(cols.order_id).trim().to_string(),
                purchase_timestamp: Some(purchase),
                approved_timestamp: self.timestamp(
                    row_idx,
                    &self.columns.approved_timestamp,
                    optional(cols.approved),
                )?,
                carrier_timestamp: self.timestamp(
                    row_idx,
                    &self.columns.carrier_timestamp,
                    optional(cols.carrier),
                )?,
                delivered_timestamp: Some(delivered),
                price: self.number(row_idx, &self.columns.price, cell(cols.price))?,
                freight_value: self.number(row_idx, &self.columns.freight_value, cell(cols.freight))?,
                review_score: self.number(
                    row_idx,
                    &self.columns.review_score,
                    optional(cols.review_score),
                )?,
                product_category_name: text(optional(cols.category)),
                customer_state: text(optional(cols.state)),
                delivery_days: whole_days_between(Some(purchase), Some(delivered)),
            };
            orders.push(order);
        }

        report.loaded = orders.len();

        if report.skipped_undelivered > 0 || report.skipped_unpurchased > 0 {
            warn!(
                undelivered = report.skipped_undelivered,
                unpurchased = report.skipped_unpurchased,
                "dropped rows without a complete purchase/delivery timeline"
            );
        }
        debug!(loaded = report.loaded, total = report.total_rows, "loaded orders");

        Ok((orders, report))
    }

    fn resolve(&self, table: &DataTable) -> Result<Columns> {
        let required = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| OrderscopeError::MissingColumn(name.to_string()))
        };
        let optional = |name: &str| table.column_index(name);

        Ok(Columns {
            order_id: required(&self.columns.order_id)?,
            purchase: required(&self.columns.purchase_timestamp)?,
            delivered: required(&self.columns.delivered_timestamp)?,
            price: required(&self.columns.price)?,
            freight: required(&self.columns.freight_value)?,
            approved: optional(&self.columns.approved_timestamp),
            carrier: optional(&self.columns.carrier_timestamp),
            review_score: optional(&self.columns.review_score),
            category: optional(&self.columns.product_category_name),
            state: optional(&self.columns.customer_state),
        })
    }

    fn timestamp(&self, row: usize, column: &str, value: &str) -> Result<Option<NaiveDateTime>> {
        if DataTable::is_null_value(value) {
            return Ok(None);
        }
        parse_timestamp(value)
            .map(Some)
            .ok_or_else(|| OrderscopeError::Parse {
                row,
                column: column.to_string(),
                message: format!("'{}' is not a recognized timestamp", value.trim()),
            })
    }

    fn number(&self, row: usize, column: &str, value: &str) -> Result<Option<f64>> {
        if DataTable::is_null_value(value) {
            return Ok(None);
        }
        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            Ok(_) => Ok(None),
            Err(e) => Err(OrderscopeError::Parse {
                row,
                column: column.to_string(),
                message: format!("'{}' is not a number: {}", value.trim(), e),
            }),
        }
    }
}

impl Default for OrderLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn text(value: &str) -> Option<String> {
    if DataTable::is_null_value(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

/// Parse a timestamp cell.
///
/// Offsets in RFC 3339 values are dropped after conversion to UTC; a bare
/// date reads as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.naive_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn table(headers: &[&str], rows: &[&[&str]]) -> DataTable {
        DataTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    const HEADERS: &[&str] = &[
        "order_id",
        "order_purchase_timestamp",
        "order_delivered_customer_date",
        "price",
        "freight_value",
        "customer_state",
    ];

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2017-10-02 10:56:33").is_some());
        assert!(parse_timestamp("2017-10-02T10:56:33").is_some());
        assert!(parse_timestamp("2017-10-02 10:56:33.250").is_some());
        assert!(parse_timestamp("2017-10-02").is_some());
        let utc = parse_timestamp("2017-10-02T10:56:33-03:00").unwrap();
        assert_eq!(utc.hour(), 13);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_load_drops_undelivered_rows() {
        let table = table(
            HEADERS,
            &[
                &["o1", "2018-01-01 10:00:00", "2018-01-05 09:00:00", "100", "10", "SP"],
                &["o2", "2018-01-02 10:00:00", "", "50", "8", "RJ"],
            ],
        );

        let (orders, report) = OrderLoader::new().load(&table).unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(report.skipped_undelivered, 1);
        assert_eq!(orders[0].delivery_days, Some(3));
        assert_eq!(orders[0].customer_state.as_deref(), Some("SP"));
        assert_eq!(orders[0].review_score, None);
    }

    #[test]
    fn test_load_requires_freight_column() {
        let table = table(
            &["order_id", "order_purchase_timestamp", "order_delivered_customer_date", "price"],
            &[&["o1", "2018-01-01", "2018-01-02", "1"]],
        );

        let err = OrderLoader::new().load(&table).unwrap_err();
        assert!(matches!(err, OrderscopeError::MissingColumn(ref c) if c == "freight_value"));
    }

    #[test]
    fn test_load_reports_malformed_number() {
        let table = table(
            HEADERS,
            &[&["o1", "2018-01-01", "2018-01-02", "abc", "1", "SP"]],
        );

        let err = OrderLoader::new().load(&table).unwrap_err();
        match err {
            OrderscopeError::Parse { row, column, .. } => {
                assert_eq!(row, 0);
                assert_eq!(column, "price");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_with_custom_columns() {
        let table = table(
            &["id", "bought", "arrived", "amount", "shipping"],
            &[&["x", "2018-02-01", "2018-02-11", "20", "3.5"]],
        );
        let mapping = ColumnMapping {
            order_id: "id".to_string(),
            purchase_timestamp: "bought".to_string(),
            delivered_timestamp: "arrived".to_string(),
            price: "amount".to_string(),
            freight_value: "shipping".to_string(),
            ..ColumnMapping::default()
        };

        let (orders, _) = OrderLoader::with_columns(mapping).load(&table).unwrap();
        assert_eq!(orders[0].delivery_days, Some(10));
        assert_eq!(orders[0].freight_value, Some(3.5));
    }
}
