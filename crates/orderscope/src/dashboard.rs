//! Main Dashboard struct and public API.

use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{DashboardConfig, ThresholdScope};
use crate::engine::{MonthlyLeadTime, ThresholdSet, monthly_lead_times};
use crate::error::{OrderscopeError, Result};
use crate::input::{LoadReport, OrderLoader, Parser, SourceMetadata};
use crate::model::{OrderRecord, RegionFilter};
use crate::report::{
    CategoryRevenue, MonthlyRevenue, OutlierRow, SegmentSatisfaction, SummaryMetrics,
    find_outliers, monthly_revenue, segment_satisfaction, summarize, top_categories,
};

/// First and last purchase date in the loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub first_purchase: NaiveDate,
    pub last_purchase: NaiveDate,
}

/// Everything the dashboard shows for one region selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    /// The selection this view was computed for.
    pub filter: RegionFilter,
    /// Coverage of the whole dataset, not just the selection.
    pub coverage: Option<Coverage>,
    pub threshold_scope: ThresholdScope,
    pub thresholds: ThresholdSet,
    pub summary: SummaryMetrics,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub top_categories: Vec<CategoryRevenue>,
    pub lead_times: Vec<MonthlyLeadTime>,
    pub outliers: Vec<OutlierRow>,
    pub segments: Vec<SegmentSatisfaction>,
}

/// A loaded order dataset and the reports over it.
///
/// The dataset is immutable once loaded. Every query recomputes its
/// thresholds and reports from the selected orders.
pub struct Dashboard {
    config: DashboardConfig,
    source: SourceMetadata,
    load_report: LoadReport,
    orders: Vec<OrderRecord>,
}

impl Dashboard {
    /// Parse a data file and load its delivered orders.
    pub fn open(path: impl AsRef<Path>, config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let path = path.as_ref();

        let parser = Parser::with_config(config.parser.clone());
        let (table, source) = parser.parse_file(path)?;

        let loader = OrderLoader::with_columns(config.columns.clone());
        let (orders, load_report) = loader.load(&table)?;

        info!(
            file = %source.file,
            rows = load_report.total_rows,
            orders = load_report.loaded,
            "dataset loaded"
        );

        Ok(Self {
            config,
            source,
            load_report,
            orders,
        })
    }

    /// Build a dashboard over orders that are already in memory.
    pub fn from_orders(orders: Vec<OrderRecord>, config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let load_report = LoadReport {
            total_rows: orders.len(),
            loaded: orders.len(),
            ..LoadReport::default()
        };

        Ok(Self {
            config,
            source: SourceMetadata::in_memory(orders.len()),
            load_report,
            orders,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn source(&self) -> &SourceMetadata {
        &self.source
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// All loaded orders.
    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    /// Distinct customer states, in first-appearance order.
    pub fn states(&self) -> Vec<&str> {
        self.orders
            .iter()
            .filter_map(|o| o.customer_state.as_deref())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// The pre-selected region filter: the first few states.
    pub fn default_filter(&self) -> RegionFilter {
        RegionFilter::states(
            self.states()
                .into_iter()
                .take(self.config.default_state_count),
        )
    }

    /// First and last purchase date over the whole dataset.
    pub fn coverage(&self) -> Option<Coverage> {
        let mut dates = self
            .orders
            .iter()
            .filter_map(|o| o.purchase_timestamp.map(|ts| ts.date()));
        let first = dates.next()?;
        let (first_purchase, last_purchase) =
            dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

        Some(Coverage {
            first_purchase,
            last_purchase,
        })
    }

    /// Orders selected by a filter.
    pub fn select(&self, filter: &RegionFilter) -> Vec<&OrderRecord> {
        filter.apply(&self.orders)
    }

    /// Thresholds for a filter, honoring the configured scope.
    pub fn thresholds(&self, filter: &RegionFilter) -> Result<ThresholdSet> {
        let engine = self.config.threshold_engine();
        match self.config.threshold_scope {
            ThresholdScope::Selection => engine.compute(self.select(filter)),
            ThresholdScope::Dataset => engine.compute(&self.orders),
        }
    }

    /// Outlier rows for a filter.
    pub fn outliers(&self, filter: &RegionFilter) -> Result<Vec<OutlierRow>> {
        let selection = self.non_empty_selection(filter)?;
        let thresholds = self.thresholds(filter)?;
        Ok(find_outliers(&selection, &thresholds))
    }

    /// Monthly stage lead times for a filter. Never fails; an empty
    /// selection gives an empty series.
    pub fn lead_times(&self, filter: &RegionFilter) -> Vec<MonthlyLeadTime> {
        monthly_lead_times(self.select(filter))
    }

    /// Compute the full view for a filter.
    ///
    /// Fails with `EmptyInput` when the filter selects no orders.
    pub fn view(&self, filter: &RegionFilter) -> Result<DashboardView> {
        let selection = self.non_empty_selection(filter)?;
        let thresholds = self.thresholds(filter)?;

        debug!(
            selected = selection.len(),
            freight_limit = thresholds.freight.limit,
            delivery_limit = thresholds.delivery.limit,
            "computing dashboard view"
        );

        Ok(DashboardView {
            filter: filter.clone(),
            coverage: self.coverage(),
            threshold_scope: self.config.threshold_scope,
            thresholds,
            summary: summarize(&selection, &thresholds),
            monthly_revenue: monthly_revenue(&selection),
            top_categories: top_categories(&selection, self.config.top_category_count),
            lead_times: monthly_lead_times(selection.iter().copied()),
            outliers: find_outliers(&selection, &thresholds),
            segments: segment_satisfaction(&selection, &thresholds),
        })
    }

    fn non_empty_selection(&self, filter: &RegionFilter) -> Result<Vec<&OrderRecord>> {
        let selection = self.select(filter);
        if selection.is_empty() {
            let states: Vec<&str> = filter.selected().collect();
            return Err(OrderscopeError::EmptyInput(format!(
                "no orders match the selected states [{}]",
                states.join(", ")
            )));
        }
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "\
order_id,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,price,freight_value,review_score,product_category_name,customer_state
o1,2018-01-03 10:00:00,2018-01-03 12:00:00,2018-01-05 10:00:00,2018-01-10 10:00:00,120.0,15.0,5,toys,SP
o2,2018-01-20 08:00:00,2018-01-20 09:00:00,2018-01-22 08:00:00,2018-02-15 08:00:00,80.0,90.0,1,garden,RJ
o3,2018-02-02 14:00:00,2018-02-02 15:00:00,2018-02-04 14:00:00,2018-02-09 14:00:00,45.5,12.0,4,toys,SP
o4,2018-03-11 09:00:00,,,,60.0,11.0,,auto,MG
o5,2018-03-15 09:00:00,2018-03-15 10:00:00,2018-03-16 09:00:00,2018-03-20 09:00:00,30.0,13.0,3,,MG
";

    fn open() -> Dashboard {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        Dashboard::open(file.path(), DashboardConfig::default()).unwrap()
    }

    #[test]
    fn test_open_drops_undelivered() {
        let dashboard = open();
        assert_eq!(dashboard.orders().len(), 4);
        assert_eq!(dashboard.load_report().skipped_undelivered, 1);
        assert_eq!(dashboard.source().format, "csv");
    }

    #[test]
    fn test_states_and_default_filter() {
        let dashboard = open();
        assert_eq!(dashboard.states(), vec!["SP", "RJ", "MG"]);

        let config = DashboardConfig {
            default_state_count: 2,
            ..DashboardConfig::default()
        };
        let small = Dashboard::from_orders(dashboard.orders().to_vec(), config).unwrap();
        assert_eq!(
            small.default_filter().selected().collect::<Vec<_>>(),
            vec!["SP", "RJ"]
        );
    }

    #[test]
    fn test_coverage_spans_dataset() {
        let coverage = open().coverage().unwrap();
        assert_eq!(coverage.first_purchase, NaiveDate::from_ymd_opt(2018, 1, 3).unwrap());
        assert_eq!(coverage.last_purchase, NaiveDate::from_ymd_opt(2018, 3, 15).unwrap());
    }

    #[test]
    fn test_view_for_selection() {
        let dashboard = open();
        let view = dashboard.view(&RegionFilter::states(["SP"])).unwrap();

        assert_eq!(view.summary.total_orders, 2);
        assert_eq!(view.summary.total_revenue, 165.5);
        assert_eq!(view.monthly_revenue.len(), 2);
        assert_eq!(view.top_categories[0].category, "toys");
        assert_eq!(view.lead_times.len(), 2);
    }

    #[test]
    fn test_empty_selection_is_empty_input() {
        let dashboard = open();
        let err = dashboard.view(&RegionFilter::states(["AM"])).unwrap_err();
        assert!(matches!(err, OrderscopeError::EmptyInput(_)));
        assert!(dashboard.lead_times(&RegionFilter::states(["AM"])).is_empty());
    }

    #[test]
    fn test_threshold_scope() {
        let dashboard = open();
        let sp = RegionFilter::states(["SP"]);
        let selection = dashboard.thresholds(&sp).unwrap();

        let config = DashboardConfig {
            threshold_scope: ThresholdScope::Dataset,
            ..DashboardConfig::default()
        };
        let dataset_scoped = Dashboard::from_orders(dashboard.orders().to_vec(), config).unwrap();
        let whole = dataset_scoped.thresholds(&sp).unwrap();

        assert_eq!(whole, dashboard.thresholds(&RegionFilter::all()).unwrap());
        assert_ne!(selection, whole);
    }
}
