//! Route table and handlers for the reqline service.
//!
//! Status-code mapping follows one convention: 400 for anything the client
//! got wrong (bad payload, reqline syntax, transport failure on the call
//! they asked for), 200 for a completed call regardless of the upstream
//! status, 404 for unknown routes, 500 for faults of our own.

use bytes::Bytes;
use chrono::Utc;
use http::{Method, Request, Response, StatusCode, header};
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Incoming;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::executor;
use crate::http::Client;
use crate::parser;

/// Request-body cap, matching the original deployment's 10 MB limit.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub(crate) async fn dispatch(client: Client, req: Request<Incoming>) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match (method, path.as_str()) {
        (Method::OPTIONS, _) => preflight(),
        (Method::GET, "/health") => json_response(StatusCode::OK, &health_payload()),
        (Method::POST, "/") => {
            let body = match read_body(req).await {
                Ok(bytes) => bytes,
                Err(response) => return response,
            };
            let (status, payload) = handle_reqline(&client, &body).await;
            json_response(status, &payload)
        }
        _ => json_response(
            StatusCode::NOT_FOUND,
            &json!({ "error": true, "message": "Endpoint not found" }),
        ),
    }
}

async fn read_body(req: Request<Incoming>) -> Result<Bytes, Response<Full<Bytes>>> {
    match Limited::new(req.into_body(), MAX_BODY_BYTES).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(_) => Err(json_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            &json!({ "error": true, "message": "Request body too large" }),
        )),
    }
}

/// The main endpoint: parse the `reqline` field, execute it, report.
pub async fn handle_reqline(client: &Client, body: &[u8]) -> (StatusCode, Value) {
    let Some(reqline) = extract_reqline(body) else {
        return (
            StatusCode::BAD_REQUEST,
            json!({ "error": true, "message": "Missing or invalid reqline parameter" }),
        );
    };

    info!(reqline = %reqline, "parsing reqline request");

    let descriptor = match parser::parse(&reqline) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            warn!(error = %e, "reqline rejected");
            return (
                StatusCode::BAD_REQUEST,
                json!({ "error": true, "message": e.to_string() }),
            );
        }
    };

    match executor::execute(client, &descriptor).await {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(payload) => (StatusCode::OK, payload),
            Err(e) => {
                error!(error = %e, "failed to serialize execution result");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": true, "message": "Internal server error" }),
                )
            }
        },
        Err(e) => {
            warn!(error = %e, url = %descriptor.url, "request failed");
            (StatusCode::BAD_REQUEST, e.to_record())
        }
    }
}

fn extract_reqline(body: &[u8]) -> Option<String> {
    let payload: Value = serde_json::from_slice(body).ok()?;
    payload.get("reqline")?.as_str().map(str::to_owned)
}

fn health_payload() -> Value {
    json!({
        "status": "OK",
        "message": "Reqline parser is running",
        "timestamp": Utc::now().timestamp_millis(),
        "service": "reqline-parser",
        "version": env!("CARGO_PKG_VERSION"),
    })
}

fn json_response(status: StatusCode, payload: &Value) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(payload).unwrap_or_else(|_| b"{}".to_vec());
    builder_with_cors()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .expect("static response parts are valid")
}

fn preflight() -> Response<Full<Bytes>> {
    builder_with_cors()
        .status(StatusCode::NO_CONTENT)
        .body(Full::new(Bytes::new()))
        .expect("static response parts are valid")
}

// Permissive CORS, same posture as the original service.
fn builder_with_cors() -> http::response::Builder {
    Response::builder()
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "content-type")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reqline() {
        assert_eq!(
            extract_reqline(br#"{"reqline": "HTTP GET | URL https://x.dev"}"#),
            Some("HTTP GET | URL https://x.dev".to_string())
        );
        assert_eq!(extract_reqline(br#"{"reqline": 42}"#), None);
        assert_eq!(extract_reqline(br#"{"other": "x"}"#), None);
        assert_eq!(extract_reqline(b"not json"), None);
    }

    #[test]
    fn test_health_payload_shape() {
        let payload = health_payload();
        assert_eq!(payload["status"], "OK");
        assert_eq!(payload["message"], "Reqline parser is running");
        assert_eq!(payload["service"], "reqline-parser");
        assert!(payload["timestamp"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_missing_reqline_parameter() {
        let client = Client::new();
        let (status, payload) = handle_reqline(&client, br#"{"nope": true}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["error"], true);
        assert_eq!(payload["message"], "Missing or invalid reqline parameter");
    }

    #[tokio::test]
    async fn test_parse_error_maps_to_400() {
        let client = Client::new();
        let body = br#"{"reqline": "HTTP get | URL https://api.example.com"}"#;
        let (status, payload) = handle_reqline(&client, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["message"], "HTTP method must be uppercase");
    }
}
