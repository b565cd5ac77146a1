//! Dashboard view, threshold and lead time handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use orderscope::{DashboardView, MonthlyLeadTime, ThresholdSet};

use super::SelectionQuery;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// The full dashboard view for a selection.
pub async fn get_view(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<DashboardView>, ApiError> {
    let filter = state.filter(query.states.as_deref());
    Ok(Json(state.dashboard.view(&filter)?))
}

/// Freight and delivery fences for a selection.
pub async fn get_thresholds(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<ThresholdSet>, ApiError> {
    let filter = state.filter(query.states.as_deref());
    Ok(Json(state.dashboard.thresholds(&filter)?))
}

/// Monthly stage lead times. An empty selection gives an empty list.
pub async fn get_lead_times(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Json<Vec<MonthlyLeadTime>> {
    let filter = state.filter(query.states.as_deref());
    Json(state.dashboard.lead_times(&filter))
}
