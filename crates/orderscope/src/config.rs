//! Dashboard configuration, loadable from a JSON file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{DEFAULT_IQR_MULTIPLIER, DEFAULT_WARNING_RATIO, ThresholdEngine};
use crate::error::{OrderscopeError, Result};
use crate::input::{ColumnMapping, ParserConfig};

/// Which orders thresholds are derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdScope {
    /// The orders selected by the active region filter.
    #[default]
    Selection,
    /// Every loaded order, whatever the filter.
    Dataset,
}

/// Configuration for loading and reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Source column names.
    pub columns: ColumnMapping,
    /// Tukey fence multiplier applied to the IQR.
    pub iqr_multiplier: f64,
    /// Warning level as a fraction of the limit.
    pub warning_ratio: f64,
    /// Which orders thresholds are derived from.
    pub threshold_scope: ThresholdScope,
    /// Number of states in the default region selection.
    pub default_state_count: usize,
    /// Number of categories in the revenue ranking.
    pub top_category_count: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            columns: ColumnMapping::default(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            warning_ratio: DEFAULT_WARNING_RATIO,
            threshold_scope: ThresholdScope::default(),
            default_state_count: 5,
            top_category_count: 10,
        }
    }
}

impl DashboardConfig {
    /// Load a configuration from a JSON file. Missing keys take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| OrderscopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: DashboardConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| {
                OrderscopeError::Config(format!(
                    "Failed to parse config '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier > 0.0) {
            return Err(OrderscopeError::Config(format!(
                "iqr_multiplier must be positive, got {}",
                self.iqr_multiplier
            )));
        }
        if !(self.warning_ratio > 0.0 && self.warning_ratio <= 1.0) {
            return Err(OrderscopeError::Config(format!(
                "warning_ratio must be in (0, 1], got {}",
                self.warning_ratio
            )));
        }
        if self.top_category_count == 0 {
            return Err(OrderscopeError::Config(
                "top_category_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Threshold engine with this configuration's fence.
    pub fn threshold_engine(&self) -> ThresholdEngine {
        ThresholdEngine::with_fence(self.iqr_multiplier, self.warning_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_config_takes_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"threshold_scope": "dataset", "columns": {{"order_id": "id"}}}}"#
        )
        .unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.threshold_scope, ThresholdScope::Dataset);
        assert_eq!(config.columns.order_id, "id");
        assert_eq!(config.columns.price, "price");
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.default_state_count, 5);
    }

    #[test]
    fn test_invalid_warning_ratio_rejected() {
        let config = DashboardConfig {
            warning_ratio: 1.2,
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(OrderscopeError::Config(_))));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            DashboardConfig::load(file.path()),
            Err(OrderscopeError::Config(_))
        ));
    }
}
