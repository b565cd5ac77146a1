//! Delimited-text parser with delimiter detection.

use std::cmp::Reverse;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{DataTable, SourceMetadata};
use crate::error::{OrderscopeError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect). Must be ASCII.
    pub delimiter: Option<char>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
        }
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |e| OrderscopeError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let is_parquet = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("parquet"))
            .unwrap_or(false);

        let (data_table, format) = if is_parquet {
            (self.parse_parquet(path)?, "parquet".to_string())
        } else {
            let delimiter = match self.config.delimiter {
                Some(d) if d.is_ascii() => d as u8,
                Some(d) => {
                    return Err(OrderscopeError::Config(format!(
                        "Delimiter must be a single ASCII character, got '{}'",
                        d
                    )));
                }
                None => detect_delimiter(&contents)?,
            };

            let format = match delimiter {
                b'\t' => "tsv",
                b',' => "csv",
                b';' => "csv-semicolon",
                b'|' => "psv",
                _ => "delimited",
            }
            .to_string();

            (self.parse_bytes(&contents, delimiter)?, format)
        };

        debug!(
            file = %path.display(),
            rows = data_table.row_count(),
            columns = data_table.column_count(),
            format = %format,
            "parsed source file"
        );

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    #[cfg(feature = "parquet")]
    fn parse_parquet(&self, path: &Path) -> Result<DataTable> {
        super::parquet::read_table(path, self.config.max_rows)
    }

    #[cfg(not(feature = "parquet"))]
    fn parse_parquet(&self, _path: &Path) -> Result<DataTable> {
        Err(OrderscopeError::UnsupportedFormat(
            "Parquet support not enabled. Rebuild with --features parquet".to_string(),
        ))
    }

    /// Parse delimited bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .flexible(true)
            .from_reader(bytes);

        let mut headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.trim().to_string()).collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            if headers.is_empty() {
                headers = (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect();
            }

            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        if headers.is_empty() {
            return Err(OrderscopeError::EmptyData("No columns found".to_string()));
        }

        if rows.is_empty() {
            return Err(OrderscopeError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the delimiter that splits the header into the most fields.
/// Delimiters that split every sampled line the same way come first, and
/// earlier entries in `DELIMITERS` win ties.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = bytes
        .split(|&b| b == b'\n')
        .take(10)
        .map(|l| String::from_utf8_lossy(l).into_owned())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let Some(header) = lines.first() else {
        return Err(OrderscopeError::EmptyData("No lines to analyze".to_string()));
    };

    let best = DELIMITERS
        .iter()
        .enumerate()
        .filter_map(|(rank, &delim)| {
            let fields = unquoted_count(header, delim);
            let uniform = lines.iter().all(|l| unquoted_count(l, delim) == fields);
            (fields > 0).then_some(((uniform, fields, Reverse(rank)), delim))
        })
        .max_by_key(|(key, _)| *key);

    Ok(best.map_or(b',', |(_, delim)| delim))
}

/// Count delimiter bytes outside double quotes.
fn unquoted_count(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    line.bytes()
        .filter(|&b| {
            if b == b'"' {
                in_quotes = !in_quotes;
            }
            b == delimiter && !in_quotes
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"order_id,price\no1,10.5\no2,20.0";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"order_id\tprice\tfreight_value\no1\t10\t2\no2\t20\t3";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_commas() {
        let data = b"order_id;category\no1;\"bed, bath\"\no2;toys";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_prefers_uniform_split() {
        let data = b"order_id;city,state\no1;santos,SP\no2;curitiba";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_comma() {
        assert_eq!(detect_delimiter(b"order_id\no1\n").unwrap(), b',');
    }

    #[test]
    fn test_parse_csv_pads_short_rows() {
        let parser = Parser::new();
        let data = b"order_id,price,customer_state\no1,10.5,SP\no2,20.0";
        let table = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(table.headers, vec!["order_id", "price", "customer_state"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 2), Some("SP"));
        assert_eq!(table.get(1, 2), Some(""));
    }

    #[test]
    fn test_parse_respects_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes(b"a,b\n1,2\n3,4\n", b',').unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_parse_header_only_is_empty() {
        let parser = Parser::new();
        let err = parser.parse_bytes(b"order_id,price\n", b',').unwrap_err();
        assert!(matches!(err, OrderscopeError::EmptyData(_)));
    }

    #[test]
    fn test_is_null_value() {
        assert!(DataTable::is_null_value(""));
        assert!(DataTable::is_null_value("NA"));
        assert!(DataTable::is_null_value("N/A"));
        assert!(DataTable::is_null_value("NaN"));
        assert!(DataTable::is_null_value("NaT"));
        assert!(DataTable::is_null_value("null"));
        assert!(DataTable::is_null_value("."));
        assert!(!DataTable::is_null_value("value"));
        assert!(!DataTable::is_null_value("0"));
    }
}
