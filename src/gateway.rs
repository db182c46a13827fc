//! Query execution and envelope normalization.
//!
//! This is the boundary between the engine's native API and the public
//! envelope contract: a built query goes in, an [`ApiResponse`] comes out,
//! and no engine error of any kind escapes past it.

use crate::druid::{DruidClient, ResultRow};
use crate::envelope::{impressions_fetch_failed, impressions_fetched, ApiResponse};
use crate::query::GroupByQuery;

/// Executes `query` against the engine and wraps the outcome in the
/// uniform envelope.
///
/// On success the envelope carries the result rows (possibly an empty
/// sequence) and a count summary built from `entity_label`, the Korean
/// noun for what was grouped. An unreachable engine, an upstream error
/// status, and an undecodable body all collapse into the same fixed
/// failure envelope; the underlying cause is logged here and never
/// exposed to callers.
pub async fn fetch_grouped_counts(
    druid: &DruidClient,
    query: &GroupByQuery,
    entity_label: &str,
) -> ApiResponse<Vec<ResultRow>> {
    match druid.group_by(query).await {
        Ok(rows) => {
            tracing::debug!("Fetched {} grouped rows for {}", rows.len(), entity_label);
            let message = impressions_fetched(rows.len(), entity_label);
            ApiResponse::ok(rows, message)
        }
        Err(e) => {
            tracing::warn!("Engine query for {} failed: {}", entity_label, e);
            ApiResponse::error(impressions_fetch_failed())
        }
    }
}
