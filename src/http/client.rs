use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::executor::ExecuteError;
use crate::http::response::Response;
use crate::parser::{Method, RequestDescriptor};

/// Fixed per-request timeout. A call that has produced nothing by then is
/// reported as "no response received".
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// HTTP transport wrapper around `reqwest`.
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Client with a non-default timeout. Tests use this to exercise the
    /// timeout path without waiting out the full ten seconds.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            inner: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Issues exactly one request described by `descriptor` against
    /// `full_url` (query already merged). Any status code that arrives is a
    /// success; failures are classified into the two transport errors.
    pub async fn send(
        &self,
        descriptor: &RequestDescriptor,
        full_url: &str,
    ) -> Result<Response, ExecuteError> {
        let url =
            reqwest::Url::parse(full_url).map_err(|_| ExecuteError::RequestSetupError)?;
        let method = match descriptor.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let headers = build_headers(descriptor)?;

        let mut request = self.inner.request(method, url).headers(headers);
        if descriptor.method == Method::Post && !descriptor.body.is_empty() {
            request = request.json(&descriptor.body);
        }

        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        debug!(status, url = full_url, "response received");

        let text = response.text().await.map_err(classify)?;
        Ok(Response::from_text(status, text))
    }
}

fn build_headers(descriptor: &RequestDescriptor) -> Result<HeaderMap, ExecuteError> {
    let mut headers = HeaderMap::new();
    for (key, value) in &descriptor.headers {
        let name =
            HeaderName::from_bytes(key.as_bytes()).map_err(|_| ExecuteError::RequestSetupError)?;
        let value = HeaderValue::from_str(&header_value_text(value))
            .map_err(|_| ExecuteError::RequestSetupError)?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Header values come from a JSON object; strings are used verbatim, other
/// values keep their JSON rendering.
fn header_value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A builder fault means the request never left the machine and could not
/// have: setup error. Everything after that point (connect, timeout, broken
/// transfer) is a call that got no usable response.
fn classify(err: reqwest::Error) -> ExecuteError {
    if err.is_builder() {
        ExecuteError::RequestSetupError
    } else {
        ExecuteError::NoResponseReceived
    }
}
