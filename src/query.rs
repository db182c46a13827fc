//! Construction of native group-by queries for the analytics engine.
//!
//! The gateway asks the engine a small set of fixed questions, so queries
//! are not assembled from user input: every knob except the grouping
//! dimension is a constant, and [`impressions_by_dimension`] is the single
//! place those constants are combined into a query.

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

/// Logical dataset in the engine that holds the ad impression events.
pub const DATA_SOURCE: &str = "ad-impressions";

/// Reporting interval applied to every query (ISO-8601, half-open).
///
/// TODO: make this configurable or switch to the engine's unbounded
/// interval form; as written, events ingested after 2025-12-31 silently
/// fall outside every report.
pub const DEFAULT_INTERVAL: &str = "2024-01-01/2025-12-31";

/// Granularity that collapses the whole interval into a single time bucket.
pub const GRANULARITY_ALL: &str = "all";

/// Query families the gateway can issue.
///
/// Only group-by is spoken today; the enum exists so the query type is a
/// closed set rather than a free-form string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryType {
    /// Bucket rows by dimension values and aggregate within each bucket
    #[serde(rename = "groupBy")]
    GroupBy,
}

/// One aggregator applied to every bucket of a group-by query.
///
/// Serializes to the engine's `{"type": ..., "name": ...}` form; `name` is
/// the key the aggregated value appears under in each result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorSpec {
    /// Aggregator kind understood by the engine (e.g. "count")
    #[serde(rename = "type")]
    pub kind: String,
    /// Output field name for the aggregated value
    pub name: String,
}

impl AggregatorSpec {
    /// Creates a row-count aggregator writing its result under `name`.
    pub fn count(name: impl Into<String>) -> Self {
        AggregatorSpec {
            kind: "count".to_string(),
            name: name.into(),
        }
    }
}

/// A group-by aggregation query in the engine's native JSON shape.
///
/// Field names serialize in camelCase to match the engine's wire format
/// exactly (`queryType`, `dataSource`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupByQuery {
    pub query_type: QueryType,
    pub data_source: String,
    pub intervals: Vec<String>,
    pub granularity: String,
    pub dimensions: Vec<String>,
    pub aggregations: Vec<AggregatorSpec>,
}

/// Builds the impression-count query grouped by `dimension`.
///
/// The resulting query always targets the [`DATA_SOURCE`] dataset over the
/// [`DEFAULT_INTERVAL`], groups on the dimension's engine column, and
/// carries a single count aggregator named `count`. Two calls with the same
/// dimension produce identical queries.
pub fn impressions_by_dimension(dimension: Dimension) -> GroupByQuery {
    GroupByQuery {
        query_type: QueryType::GroupBy,
        data_source: DATA_SOURCE.to_string(),
        intervals: vec![DEFAULT_INTERVAL.to_string()],
        granularity: GRANULARITY_ALL.to_string(),
        dimensions: vec![dimension.column().to_string()],
        aggregations: vec![AggregatorSpec::count("count")],
    }
}
