mod common;

use candidate_console::services::api_client::ApiClient;
use candidate_console::storage::MemoryTokenStore;
use candidate_console::Error;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tokio_test::assert_err;

#[tokio::test]
async fn non_json_failure_falls_back_to_status() {
    let (stub, app, _) = common::signed_in().await;
    stub.respond_raw("GET /positions", 500, "<html>Internal Server Error</html>");

    let err = assert_err!(app.load_all().await);

    assert_eq!(err.to_string(), "HTTP 500");
    assert_eq!(app.snapshot().error.as_deref(), Some("HTTP 500"));
}

#[tokio::test]
async fn requests_without_a_token_send_no_credentials() {
    let stub = common::Stub::new();
    let base_url = stub.serve().await;
    let client = ApiClient::new(base_url, Arc::new(MemoryTokenStore::new())).unwrap();

    let positions: JsonValue = client.get("/positions").await.unwrap();

    assert_eq!(positions, json!([{"id": 1, "title": "Backend Engineer"}]));
    assert_eq!(stub.requests()[0].authorization, None);
}

#[tokio::test]
async fn unknown_route_reports_server_error_text() {
    let stub = common::Stub::new();
    let base_url = stub.serve().await;
    let client = ApiClient::new(base_url, Arc::new(MemoryTokenStore::with_token("t1"))).unwrap();

    let err = assert_err!(client.get::<JsonValue>("/nowhere").await);

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(stub.requests()[0].authorization.as_deref(), Some("Bearer t1"));
}
