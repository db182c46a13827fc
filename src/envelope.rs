//! Uniform response envelope for every analytics endpoint.
//!
//! Callers of this API never see the engine's native response shape, its
//! status codes, or its error payloads. Every endpoint answers HTTP 200
//! with an [`ApiResponse`], and the `success` flag inside the body is the
//! only outcome signal.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every API payload.
///
/// Invariants:
/// - `success == true` implies `data` is present (possibly an empty
///   sequence) and `message` summarizes what was fetched.
/// - `success == false` implies `data` is absent and `message` says the
///   fetch failed.
///
/// Absent optional fields are omitted from the serialized JSON rather than
/// emitted as `null`, so a failure body contains no `data` key at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the requested data was fetched
    pub success: bool,
    /// Payload, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable summary of the outcome, in Korean
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Creates a success envelope carrying `data` and a summary message.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// Creates a failure envelope carrying only a reason message.
    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Builds the success summary for an impression fetch.
///
/// `count` is the number of result rows and `entity_label` the Korean noun
/// for what was grouped (e.g. "채널" or "지역"), giving messages like
/// "5 개 채널의 노출량을 조회했습니다.".
pub fn impressions_fetched(count: usize, entity_label: &str) -> String {
    format!("{} 개 {}의 노출량을 조회했습니다.", count, entity_label)
}

/// Returns the fixed failure message used for any impression fetch that
/// could not complete, regardless of the underlying cause.
pub fn impressions_fetch_failed() -> String {
    "노출량 조회를 실패했습니다.".to_string()
}
