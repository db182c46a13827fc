//! HTTP client for the columnar analytics engine (Druid).
//!
//! Speaks the engine's native JSON-over-HTTP query API: queries are POSTed
//! to `/druid/v2` and answered with a JSON array of row objects. This
//! module only moves queries and rows across the wire; turning outcomes
//! into API envelopes happens in [`crate::gateway`].

use reqwest::Client;
use std::time::Duration;

use crate::query::GroupByQuery;

/// Path of the engine's native query endpoint, relative to the base URL.
const QUERY_PATH: &str = "/druid/v2";

/// Configuration for the Druid client
#[derive(Debug, Clone)]
pub struct DruidConfig {
    /// Base URL of the engine's router or broker (default: "http://localhost:8888")
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
}

impl Default for DruidConfig {
    fn default() -> Self {
        DruidConfig {
            base_url: "http://localhost:8888".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// One grouped aggregate bucket returned by the engine.
///
/// Rows are open mappings: their keys are determined by the dimensions and
/// aggregator names of the query that produced them (e.g. a channel query
/// yields rows with `channel_id` and `count`), so no fixed struct is imposed
/// here.
pub type ResultRow = serde_json::Map<String, serde_json::Value>;

/// Client for the engine's query API.
///
/// Wraps a pooled `reqwest::Client`, so cloning is cheap and clones share
/// the underlying connection pool. Construct one at startup and hand it to
/// whoever needs to query.
#[derive(Debug, Clone)]
pub struct DruidClient {
    client: Client,
    config: DruidConfig,
}

impl DruidClient {
    /// Creates a new Druid client with default configuration.
    ///
    /// # Returns
    /// Returns `Ok(DruidClient)` if successful, or an error if HTTP client creation fails.
    pub fn new() -> Result<Self, DruidError> {
        Self::with_config(DruidConfig::default())
    }

    /// Creates a new Druid client with custom configuration.
    ///
    /// # Arguments
    /// * `config` - Connection settings (base URL, timeout)
    ///
    /// # Returns
    /// Returns `Ok(DruidClient)` if successful, or an error if HTTP client creation fails.
    pub fn with_config(config: DruidConfig) -> Result<Self, DruidError> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DruidError::ClientCreation(e.to_string()))?;

        Ok(DruidClient { client, config })
    }

    /// Executes a group-by query and returns the raw result rows.
    ///
    /// The query body is sent as `application/json`; the engine answers a
    /// successful query with a JSON array of row objects, which may be
    /// empty when no events match.
    ///
    /// # Errors
    /// Returns `DruidError::Network` if the engine cannot be reached or the
    /// request times out, `DruidError::UpstreamStatus` if it answers with a
    /// non-success HTTP status, and `DruidError::Decode` if the response
    /// body is not a JSON array of objects.
    pub async fn group_by(&self, query: &GroupByQuery) -> Result<Vec<ResultRow>, DruidError> {
        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            QUERY_PATH
        );

        let response = self
            .client
            .post(&url)
            .json(query)
            .send()
            .await
            .map_err(|e| DruidError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The engine reports query errors as JSON bodies; keep the text
            // for logs even though callers never see it.
            let body = response.text().await.unwrap_or_default();
            return Err(DruidError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<ResultRow>>()
            .await
            .map_err(|e| DruidError::Decode(e.to_string()))
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &DruidConfig {
        &self.config
    }
}

/// Errors that can occur while querying the analytics engine.
///
/// These never cross the API boundary: the gateway logs the variant and
/// collapses all of them into one fixed failure envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DruidError {
    /// HTTP client creation failed
    ClientCreation(String),
    /// Engine unreachable, connection dropped, or request timed out
    Network(String),
    /// Engine answered with a non-success HTTP status
    UpstreamStatus { status: u16, body: String },
    /// Response body was not a JSON array of row objects
    Decode(String),
}

impl std::fmt::Display for DruidError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DruidError::ClientCreation(msg) => write!(f, "Client creation error: {}", msg),
            DruidError::Network(msg) => write!(f, "Network error: {}", msg),
            DruidError::UpstreamStatus { status, body } => {
                write!(f, "Engine returned HTTP {}: {}", status, body)
            }
            DruidError::Decode(msg) => write!(f, "Response decode error: {}", msg),
        }
    }
}

impl std::error::Error for DruidError {}
