//! Outlier table and detail handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use orderscope::report::{OutlierRow, outlier_detail, outlier_ids};
use serde::Serialize;

use super::SelectionQuery;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for the outlier table endpoint.
#[derive(Serialize)]
pub struct OutliersResponse {
    /// Distinct outlier order ids, in table order.
    pub order_ids: Vec<String>,
    pub rows: Vec<OutlierRow>,
}

/// Orders past either limit for a selection.
pub async fn get_outliers(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<OutliersResponse>, ApiError> {
    let filter = state.filter(query.states.as_deref());
    let rows = state.dashboard.outliers(&filter)?;
    let order_ids = outlier_ids(&rows).into_iter().map(str::to_string).collect();

    Ok(Json(OutliersResponse { order_ids, rows }))
}

/// Detail of one outlier order.
pub async fn get_outlier(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<OutlierRow>, ApiError> {
    let filter = state.filter(query.states.as_deref());
    let rows = state.dashboard.outliers(&filter)?;

    outlier_detail(&rows, &order_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("order {} is not an outlier", order_id)))
}
