//! Parquet input, read through the row API into a text `DataTable`.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use parquet::basic::{LogicalType, TimeUnit};
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;

use super::source::DataTable;
use crate::error::{OrderscopeError, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Read a parquet file into a `DataTable`.
pub(super) fn read_table(path: &Path, max_rows: Option<usize>) -> Result<DataTable> {
    let file = File::open(path).map_err(|e| OrderscopeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = SerializedFileReader::new(file)?;

    let columns = reader.metadata().file_metadata().schema_descr().columns().to_vec();
    let headers: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    if headers.is_empty() {
        return Err(OrderscopeError::EmptyData("No columns found".to_string()));
    }

    // The row API leaves NANOS timestamps (the pandas default) as plain Long.
    let units: Vec<Option<TimeUnit>> = columns
        .iter()
        .map(|c| match c.logical_type() {
            Some(LogicalType::Timestamp { unit, .. }) => Some(unit),
            _ => None,
        })
        .collect();

    let mut rows = Vec::new();
    for (row_idx, row) in reader.get_row_iter(None)?.enumerate() {
        if max_rows.is_some_and(|max| row_idx >= max) {
            break;
        }

        let row = row?;
        let mut cells = vec![String::new(); headers.len()];
        for (name, field) in row.get_column_iter() {
            let Some(idx) = headers.iter().position(|h| h == name) else {
                continue;
            };
            cells[idx] = match field {
                Field::Long(v) => match &units[idx] {
                    Some(unit) => timestamp_text(from_epoch(unit, *v)),
                    None => v.to_string(),
                },
                other => field_to_text(other),
            };
        }
        rows.push(cells);
    }

    if rows.is_empty() {
        return Err(OrderscopeError::EmptyData("No data rows found".to_string()));
    }

    Ok(DataTable::new(headers, rows))
}

/// Render a parquet field as the text the order loader understands.
fn field_to_text(field: &Field) -> String {
    match field {
        Field::Null => String::new(),
        Field::Str(s) => s.clone(),
        Field::Double(v) => v.to_string(),
        Field::Float(v) => v.to_string(),
        Field::TimestampMillis(ms) => timestamp_text(DateTime::from_timestamp_millis(*ms)),
        Field::TimestampMicros(us) => timestamp_text(DateTime::from_timestamp_micros(*us)),
        Field::Date(days) => DateTime::from_timestamp(i64::from(*days) * 86_400, 0)
            .map(|dt| dt.date_naive().to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

fn from_epoch(unit: &TimeUnit, value: i64) -> Option<DateTime<Utc>> {
    match unit {
        TimeUnit::MILLIS(_) => DateTime::from_timestamp_millis(value),
        TimeUnit::MICROS(_) => DateTime::from_timestamp_micros(value),
        TimeUnit::NANOS(_) => Some(DateTime::from_timestamp_nanos(value)),
    }
}

fn timestamp_text(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|dt| dt.naive_utc().format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}
