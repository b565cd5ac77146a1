//! State listing handler.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use orderscope::SourceMetadata;
use serde::Serialize;

use crate::server::state::AppState;

/// One customer state and its order count.
#[derive(Serialize)]
pub struct StateEntry {
    pub state: String,
    pub orders: usize,
    /// Whether the state is part of the default pre-selection.
    pub default: bool,
}

/// Provenance of the loaded file, without its location on the server.
#[derive(Serialize)]
pub struct SourceSummary {
    pub file: String,
    pub hash: String,
    pub size_bytes: u64,
    pub format: String,
    pub row_count: usize,
    pub loaded_at: DateTime<Utc>,
}

impl From<&SourceMetadata> for SourceSummary {
    fn from(source: &SourceMetadata) -> Self {
        Self {
            file: source.file.clone(),
            hash: source.hash.clone(),
            size_bytes: source.size_bytes,
            format: source.format.clone(),
            row_count: source.row_count,
            loaded_at: source.loaded_at,
        }
    }
}

/// Response for the states endpoint.
#[derive(Serialize)]
pub struct StatesResponse {
    pub source: SourceSummary,
    pub states: Vec<StateEntry>,
}

/// List distinct customer states in first-appearance order.
pub async fn get_states(State(state): State<AppState>) -> Json<StatesResponse> {
    let dashboard = &state.dashboard;
    let default_filter = dashboard.default_filter();

    let states = dashboard
        .states()
        .into_iter()
        .map(|name| StateEntry {
            state: name.to_string(),
            orders: dashboard
                .orders()
                .iter()
                .filter(|o| o.customer_state.as_deref() == Some(name))
                .count(),
            default: default_filter.selected().any(|s| s == name),
        })
        .collect();

    Json(StatesResponse {
        source: dashboard.source().into(),
        states,
    })
}
