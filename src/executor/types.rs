use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::parser::JsonMap;

/// Echo of the request that was actually sent, query merged into `full_url`.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEcho {
    pub query: JsonMap,
    pub body: JsonMap,
    pub headers: JsonMap,
    pub full_url: String,
}

/// What came back from the target, with timing metadata.
///
/// `duration` is wall-clock milliseconds between issuing the call and
/// receiving the response; the timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseRecord {
    pub http_status: u16,
    pub duration: i64,
    pub request_start_timestamp: i64,
    pub request_stop_timestamp: i64,
    pub response_data: Value,
}

/// Successful outcome of one parse-then-execute pipeline run.
///
/// "Successful" means a response arrived — upstream 4xx/5xx statuses are
/// data here, not errors.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub request: RequestEcho,
    pub response: ResponseRecord,
}

/// Pipeline-level transport failures. Upstream HTTP error statuses never
/// land here; only calls that produced no response at all, or could not be
/// issued in the first place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecuteError {
    #[error("No response received from server")]
    NoResponseReceived,

    #[error("Request setup error")]
    RequestSetupError,
}

impl ExecuteError {
    /// The error record shape clients receive: `{"error": true, "message": ...}`.
    pub fn to_record(&self) -> Value {
        serde_json::json!({ "error": true, "message": self.to_string() })
    }
}
