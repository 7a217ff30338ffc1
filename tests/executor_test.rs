use std::time::Duration;

use reqline::executor::{self, ExecuteError};
use reqline::http::Client;
use reqline::parser;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_with_query_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("page", "2"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [1, 2]})))
        .mount(&mock_server)
        .await;

    let reqline = format!(
        r#"HTTP GET | URL {}/data | HEADERS {{"authorization": "Bearer token"}} | QUERY {{"page": 2}}"#,
        mock_server.uri()
    );
    let descriptor = parser::parse(&reqline).unwrap();

    let result = executor::execute(&Client::new(), &descriptor)
        .await
        .unwrap();

    assert_eq!(result.response.http_status, 200);
    assert_eq!(result.response.response_data, json!({"items": [1, 2]}));
    assert_eq!(
        result.request.full_url,
        format!("{}/data?page=2", mock_server.uri())
    );
    assert_eq!(result.request.query["page"], json!(2));
    assert!(result.response.duration >= 0);
    assert!(
        result.response.request_stop_timestamp >= result.response.request_start_timestamp
    );
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Ada"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9})))
        .mount(&mock_server)
        .await;

    let reqline = format!(
        r#"HTTP POST | URL {}/users | BODY {{"name": "Ada"}}"#,
        mock_server.uri()
    );
    let descriptor = parser::parse(&reqline).unwrap();

    let result = executor::execute(&Client::new(), &descriptor)
        .await
        .unwrap();

    assert_eq!(result.response.http_status, 201);
    assert_eq!(result.response.response_data, json!({"id": 9}));
}

#[tokio::test]
async fn test_upstream_error_status_is_data_not_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&mock_server)
        .await;

    let reqline = format!("HTTP GET | URL {}/missing", mock_server.uri());
    let descriptor = parser::parse(&reqline).unwrap();

    let result = executor::execute(&Client::new(), &descriptor)
        .await
        .unwrap();

    assert_eq!(result.response.http_status, 404);
    assert_eq!(result.response.response_data, json!({"error": "not found"}));
}

#[tokio::test]
async fn test_non_json_payload_kept_as_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&mock_server)
        .await;

    let reqline = format!("HTTP GET | URL {}", mock_server.uri());
    let descriptor = parser::parse(&reqline).unwrap();

    let result = executor::execute(&Client::new(), &descriptor)
        .await
        .unwrap();

    assert_eq!(result.response.response_data, json!("plain text"));
}

#[tokio::test]
async fn test_connection_refused_is_no_response() {
    // Port 1 is never listening.
    let descriptor = parser::parse("HTTP GET | URL http://127.0.0.1:1/x").unwrap();

    let err = executor::execute(&Client::new(), &descriptor)
        .await
        .unwrap_err();

    assert_eq!(err, ExecuteError::NoResponseReceived);
    assert_eq!(err.to_string(), "No response received from server");
}

#[tokio::test]
async fn test_timeout_is_no_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let reqline = format!("HTTP GET | URL {}", mock_server.uri());
    let descriptor = parser::parse(&reqline).unwrap();

    // Shortened timeout; the production default is 10 s with the same path.
    let client = Client::with_timeout(Duration::from_millis(200));
    let err = executor::execute(&client, &descriptor).await.unwrap_err();

    assert_eq!(err, ExecuteError::NoResponseReceived);
}

#[tokio::test]
async fn test_invalid_header_name_is_setup_error() {
    // Valid reqline, but the header name cannot be put on the wire. No
    // server involved: the failure happens before anything is sent.
    let descriptor =
        parser::parse(r#"HTTP GET | URL https://api.example.com | HEADERS {"bad name": "x"}"#)
            .unwrap();

    let err = executor::execute(&Client::new(), &descriptor)
        .await
        .unwrap_err();

    assert_eq!(err, ExecuteError::RequestSetupError);
    assert_eq!(err.to_string(), "Request setup error");
}
