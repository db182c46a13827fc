//! Shared application state for the API server

use crate::druid::DruidClient;

/// Shared application state
///
/// Holds the one engine client created at startup. The client is
/// internally pooled and carries no per-request state, so handlers share
/// it concurrently without locking.
#[derive(Clone)]
pub struct AppState {
    /// Client for the analytics engine behind every reporting endpoint
    pub druid: DruidClient,
}

impl AppState {
    /// Creates a new application state
    pub fn new(druid: DruidClient) -> Self {
        AppState { druid }
    }
}
