#![allow(clippy::unwrap_used)]
// Integration tests for `ResourceClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use smartstore_api::{Error, ErrorKind, ResourceClient, RetryPolicy, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(retry: RetryPolicy) -> (MockServer, ResourceClient) {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_retry(retry);
    let client = ResourceClient::new(&format!("{}/api/products", server.uri()), &transport).unwrap();
    (server, client)
}

fn product(id: i64, name: &str, price: f64) -> Value {
    json!({ "id": id, "name": name, "description": format!("{name} description"), "price": price })
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_sends_json_headers() {
    let (server, client) = setup(RetryPolicy::none()).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product(1, "Laptop", 1299.99), product(2, "Mouse", 25.5)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let items: Vec<Value> = client.list().await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["name"], "Mouse");
}

#[tokio::test]
async fn test_get_by_id() {
    let (server, client) = setup(RetryPolicy::none()).await;

    Mock::given(method("GET"))
        .and(path("/api/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product(7, "Webcam", 49.99)))
        .mount(&server)
        .await;

    let item: Value = client.get(7).await.unwrap();
    assert_eq!(item["id"], 7);
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_posts_draft() {
    let (server, client) = setup(RetryPolicy::none()).await;
    let draft = json!({ "name": "Webcam", "description": "HD webcam", "price": 49.99 });

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(body_json(&draft))
        .respond_with(ResponseTemplate::new(201).set_body_json(product(7, "Webcam", 49.99)))
        .expect(1)
        .mount(&server)
        .await;

    let created: Value = client.create(&draft).await.unwrap();
    assert_eq!(created["id"], 7);
}

#[tokio::test]
async fn test_update_returns_entity() {
    let (server, client) = setup(RetryPolicy::none()).await;
    let draft = json!({ "name": "Mouse Pro", "description": "Wireless", "price": 35.0 });

    Mock::given(method("PUT"))
        .and(path("/api/products/2"))
        .and(body_json(&draft))
        .respond_with(ResponseTemplate::new(200).set_body_json(product(2, "Mouse Pro", 35.0)))
        .mount(&server)
        .await;

    let updated: Option<Value> = client.update(2, &draft).await.unwrap();
    assert_eq!(updated.unwrap()["name"], "Mouse Pro");
}

#[tokio::test]
async fn test_update_missing_returns_none() {
    let (server, client) = setup(RetryPolicy::none()).await;

    Mock::given(method("PUT"))
        .and(path("/api/products/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let updated: Option<Value> = client.update(99, &json!({ "name": "x" })).await.unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn test_update_empty_body_returns_none() {
    let (server, client) = setup(RetryPolicy::none()).await;

    Mock::given(method("PUT"))
        .and(path("/api/products/3"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let updated: Option<Value> = client.update(3, &json!({ "name": "x" })).await.unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn test_delete_no_content() {
    let (server, client) = setup(RetryPolicy::none()).await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.delete(4).await.unwrap());
}

#[tokio::test]
async fn test_delete_missing_returns_false() {
    let (server, client) = setup(RetryPolicy::none()).await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(!client.delete(404).await.unwrap());
}

// ── Retry ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_retry_exhaustion_surfaces_server_error() {
    let (server, client) = setup(RetryPolicy::default()).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&server)
        .await;

    let err = client.list::<Value>().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(err.status(), Some(503));
    assert_eq!(
        err.user_message(),
        "Internal server error. Please try again later."
    );
}

#[tokio::test]
async fn test_retry_recovers_from_transient_failure() {
    let (server, client) = setup(RetryPolicy::default()).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product(1, "Laptop", 1.0)])))
        .mount(&server)
        .await;

    let items: Vec<Value> = client.list().await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_create_is_retried_like_any_other_verb() {
    let (server, client) = setup(RetryPolicy::with_retries(2)).await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let result = client.create::<Value, _>(&json!({ "name": "x" })).await;
    assert!(result.is_err());
}

// ── Error classification ────────────────────────────────────────────

#[tokio::test]
async fn test_client_error_uses_payload_message() {
    let (server, client) = setup(RetryPolicy::none()).await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": 400,
            "error": "Bad Request",
            "message": "price must be greater than 0"
        })))
        .mount(&server)
        .await;

    let err = client
        .create::<Value, _>(&json!({ "name": "x", "price": 0 }))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ClientError);
    assert_eq!(err.user_message(), "price must be greater than 0");
}

#[tokio::test]
async fn test_get_missing_is_client_error() {
    let (server, client) = setup(RetryPolicy::none()).await;

    Mock::given(method("GET"))
        .and(path("/api/products/12"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.get::<Value>(12).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Resource not found");
}

#[tokio::test]
async fn test_unreachable_server_is_status_zero() {
    // Nothing listens on port 1 locally, so the connection is refused.
    let transport = TransportConfig::default().with_retry(RetryPolicy::none());
    let client = ResourceClient::new("http://127.0.0.1:1/api/products", &transport).unwrap();
    let err = client.list::<Value>().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.status(), Some(0));
    assert_eq!(err.kind(), ErrorKind::NetworkUnreachable);
}

#[tokio::test]
async fn test_malformed_body_is_unknown_error() {
    let (server, client) = setup(RetryPolicy::none()).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.list::<Value>().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
    assert_eq!(err.kind(), ErrorKind::UnknownError);
}
