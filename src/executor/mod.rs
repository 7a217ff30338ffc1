//! Turns a validated [`RequestDescriptor`] into one outbound HTTP call and
//! a structured record of what was sent and what came back.

pub mod types;

// Re-export commonly used types
pub use types::{ExecuteError, ExecutionResult, RequestEcho, ResponseRecord};

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use url::form_urlencoded;

use crate::http::Client;
use crate::parser::{JsonMap, RequestDescriptor};

/// Executes the request a descriptor describes: merge the query into the
/// URL, issue the call, assemble the result with timing. One network call,
/// no retries.
pub async fn execute(
    client: &Client,
    descriptor: &RequestDescriptor,
) -> Result<ExecutionResult, ExecuteError> {
    let full_url = build_full_url(&descriptor.url, &descriptor.query);

    let start = Utc::now().timestamp_millis();
    let outcome = client.send(descriptor, &full_url).await;
    let stop = Utc::now().timestamp_millis();

    let response = outcome?;
    if response.is_success() {
        info!(
            method = descriptor.method.as_str(),
            status = response.status,
            duration_ms = stop - start,
            url = %full_url,
            "request executed"
        );
    } else {
        warn!(
            method = descriptor.method.as_str(),
            status = response.status,
            duration_ms = stop - start,
            url = %full_url,
            "request executed with error status"
        );
    }

    Ok(ExecutionResult {
        request: RequestEcho {
            query: descriptor.query.clone(),
            body: descriptor.body.clone(),
            headers: descriptor.headers.clone(),
            full_url,
        },
        response: ResponseRecord {
            http_status: response.status,
            duration: stop - start,
            request_start_timestamp: start,
            request_stop_timestamp: stop,
            response_data: response.data,
        },
    })
}

/// Appends the query map onto the base URL in map iteration order. An empty
/// query leaves the URL byte-identical, which makes the construction
/// idempotent; a base that already carries a query string is extended.
pub fn build_full_url(base_url: &str, query: &JsonMap) -> String {
    if query.is_empty() {
        return base_url.to_string();
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query {
        serializer.append_pair(key, &query_value_text(value));
    }
    let pairs = serializer.finish();

    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}{pairs}")
}

/// Query values come from a JSON object; strings are appended verbatim,
/// other values keep their JSON rendering.
fn query_value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
