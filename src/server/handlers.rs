//! HTTP request handlers for API endpoints

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use super::state::AppState;
use crate::dimension::Dimension;
use crate::druid::ResultRow;
use crate::envelope::ApiResponse;
use crate::gateway::fetch_grouped_counts;
use crate::query::impressions_by_dimension;

/// Health check endpoint
///
/// Returns a simple status response to verify the server is running
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

/// GET /api/analytics/channels - Impression counts grouped by channel
///
/// Answers HTTP 200 whether or not the engine could be queried; the
/// envelope's `success` flag carries the outcome.
pub async fn get_channel_impressions(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<ResultRow>>> {
    impressions_for(&state, Dimension::Channel).await
}

/// GET /api/analytics/regions - Impression counts grouped by region
pub async fn get_region_impressions(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<ResultRow>>> {
    impressions_for(&state, Dimension::Region).await
}

/// Shared path for every breakdown endpoint: build the fixed query for the
/// dimension, run it through the gateway, return whatever envelope falls
/// out. Handlers stay infallible because the gateway already turned every
/// error into a failure envelope.
async fn impressions_for(
    state: &AppState,
    dimension: Dimension,
) -> Json<ApiResponse<Vec<ResultRow>>> {
    let query = impressions_by_dimension(dimension);
    let envelope = fetch_grouped_counts(&state.druid, &query, dimension.entity_label()).await;
    Json(envelope)
}
