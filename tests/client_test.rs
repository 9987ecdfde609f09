//! Integration tests for the request / refresh / retry contract

use std::sync::Arc;

use mockito::{Matcher, Server};
use serde_json::{json, Value};
use tourhub_api::{ApiError, Client, ClientConfig, MemoryTokenStore, RequestOptions, TokenStore};

fn client_with_tokens(
    server: &Server,
    access: Option<&str>,
    refresh: Option<&str>,
) -> (Client, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    if let Some(access) = access {
        store.set_access_token(access);
    }
    if let Some(refresh) = refresh {
        store.set_refresh_token(refresh);
    }
    let client = Client::with_store(ClientConfig::new(server.url()), store.clone());
    (client, store)
}

#[tokio::test]
async fn unauthenticated_success_returns_parsed_body() {
    //* Given
    let mut server = Server::new_async().await;

    let list_mock = server
        .mock("POST", "/tour/list")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": [{"id": "t1"}, {"id": "t2"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = Client::new(ClientConfig::new(server.url()));

    //* When
    let result: Value = client
        .post("/tour/list", &json!({}), RequestOptions::new().no_credential())
        .await
        .expect("unauthenticated call should succeed");

    //* Then
    list_mock.assert_async().await;
    assert_eq!(result, json!({"data": [{"id": "t1"}, {"id": "t2"}]}));
}

#[tokio::test]
async fn authenticated_call_without_token_makes_no_network_call() {
    //* Given
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/admin/profile")
        .expect(0)
        .create_async()
        .await;

    let (client, _store) = client_with_tokens(&server, None, None);

    //* When
    let result: Result<Value, _> = client.get("/admin/profile", RequestOptions::new()).await;

    //* Then
    mock.assert_async().await;
    assert!(matches!(result, Err(ApiError::NoCredential)));
}

#[tokio::test]
async fn empty_access_token_counts_as_no_credential() {
    //* Given
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/admin/profile")
        .expect(0)
        .create_async()
        .await;

    let (client, _store) = client_with_tokens(&server, Some(""), Some("R1"));

    //* When
    let result: Result<Value, _> = client.get("/admin/profile", RequestOptions::new()).await;

    //* Then
    mock.assert_async().await;
    assert!(matches!(result, Err(ApiError::NoCredential)));
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried_once() {
    //* Given
    let mut server = Server::new_async().await;

    let first_attempt = server
        .mock("POST", "/admin/tour/update")
        .match_header("authorization", "Bearer A1")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let refresh_mock = server
        .mock("POST", "/auth/admin/refresh")
        .match_body(Matcher::Json(json!({"refreshToken": "R1"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessToken": "A2"}"#)
        .expect(1)
        .create_async()
        .await;

    let retry_attempt = server
        .mock("POST", "/admin/tour/update")
        .match_header("authorization", "Bearer A2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "t1"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, store) = client_with_tokens(&server, Some("A1"), Some("R1"));

    //* When
    let result: Value = client
        .post("/admin/tour/update", &json!({"id": "t1"}), RequestOptions::new())
        .await
        .expect("retry after refresh should succeed");

    //* Then
    first_attempt.assert_async().await;
    refresh_mock.assert_async().await;
    retry_attempt.assert_async().await;
    assert_eq!(result, json!({"id": "t1"}));
    assert_eq!(store.access_token().as_deref(), Some("A2"));
    // Refresh token was not rotated by the server, so it stays put
    assert_eq!(store.refresh_token().as_deref(), Some("R1"));
}

#[tokio::test]
async fn refresh_rotates_both_tokens_when_server_issues_them() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/admin/profile")
        .match_header("authorization", "Bearer A1")
        .with_status(401)
        .create_async()
        .await;

    server
        .mock("POST", "/auth/admin/refresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessToken": "A2", "refreshToken": "R2"}"#)
        .expect(1)
        .create_async()
        .await;

    server
        .mock("GET", "/admin/profile")
        .match_header("authorization", "Bearer A2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let (client, store) = client_with_tokens(&server, Some("A1"), Some("R1"));

    //* When
    let _: Value = client
        .get("/admin/profile", RequestOptions::new())
        .await
        .expect("request should succeed after refresh");

    //* Then
    assert_eq!(store.access_token().as_deref(), Some("A2"));
    assert_eq!(store.refresh_token().as_deref(), Some("R2"));
}

#[tokio::test]
async fn missing_refresh_token_fails_and_clears_store() {
    //* Given
    let mut server = Server::new_async().await;

    let first_attempt = server
        .mock("GET", "/admin/profile")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let refresh_mock = server
        .mock("POST", "/auth/admin/refresh")
        .expect(0)
        .create_async()
        .await;

    let (client, store) = client_with_tokens(&server, Some("A1"), None);

    //* When
    let result: Result<Value, _> = client.get("/admin/profile", RequestOptions::new()).await;

    //* Then
    first_attempt.assert_async().await;
    refresh_mock.assert_async().await;
    assert!(matches!(result, Err(ApiError::NoRefreshToken)));
    assert_eq!(store.access_token(), None);
    assert_eq!(store.refresh_token(), None);
}

#[tokio::test]
async fn rejected_refresh_fails_without_retry_and_clears_store() {
    //* Given
    let mut server = Server::new_async().await;

    let first_attempt = server
        .mock("GET", "/admin/profile")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let refresh_mock = server
        .mock("POST", "/auth/admin/refresh")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "refresh token revoked"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, store) = client_with_tokens(&server, Some("A1"), Some("R1"));

    //* When
    let result: Result<Value, _> = client.get("/admin/profile", RequestOptions::new()).await;

    //* Then
    first_attempt.assert_async().await;
    refresh_mock.assert_async().await;
    match result {
        Err(ApiError::RefreshRejected(message)) => {
            assert_eq!(message, "refresh token revoked");
        }
        other => panic!("expected RefreshRejected, got {:?}", other.map(|_| ())),
    }
    assert_eq!(store.access_token(), None);
    assert_eq!(store.refresh_token(), None);
}

#[tokio::test]
async fn refresh_response_missing_access_token_is_rejected() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/admin/profile")
        .with_status(401)
        .create_async()
        .await;

    server
        .mock("POST", "/auth/admin/refresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected": true}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, store) = client_with_tokens(&server, Some("A1"), Some("R1"));

    //* When
    let result: Result<Value, _> = client.get("/admin/profile", RequestOptions::new()).await;

    //* Then
    assert!(matches!(result, Err(ApiError::RefreshRejected(_))));
    assert_eq!(store.access_token(), None);
    assert_eq!(store.refresh_token(), None);
}

#[tokio::test]
async fn second_401_after_refresh_is_terminal() {
    //* Given
    let mut server = Server::new_async().await;

    let attempts = server
        .mock("GET", "/admin/profile")
        .with_status(401)
        .expect(2)
        .create_async()
        .await;

    let refresh_mock = server
        .mock("POST", "/auth/admin/refresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessToken": "A2"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, _store) = client_with_tokens(&server, Some("A1"), Some("R1"));

    //* When
    let result: Result<Value, _> = client.get("/admin/profile", RequestOptions::new()).await;

    //* Then
    attempts.assert_async().await;
    refresh_mock.assert_async().await;
    assert!(matches!(result, Err(ApiError::AuthExpired)));
}

#[tokio::test]
async fn unauthenticated_401_is_a_plain_http_error() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/tour/list")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let refresh_mock = server
        .mock("POST", "/auth/admin/refresh")
        .expect(0)
        .create_async()
        .await;

    let (client, _store) = client_with_tokens(&server, Some("A1"), Some("R1"));

    //* When
    let result: Result<Value, _> = client
        .post("/tour/list", &json!({}), RequestOptions::new().no_credential())
        .await;

    //* Then
    refresh_mock.assert_async().await;
    match result {
        Err(ApiError::Http { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected Http error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn http_error_carries_server_message() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/tour/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "tour not found"}"#)
        .create_async()
        .await;

    let client = Client::new(ClientConfig::new(server.url()));

    //* When
    let result: Result<Value, _> = client
        .get("/tour/missing", RequestOptions::new().no_credential())
        .await;

    //* Then
    match result {
        Err(ApiError::Http { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "tour not found");
        }
        other => panic!("expected Http error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn http_error_without_body_falls_back_to_status_reason() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/tour/broken")
        .with_status(500)
        .create_async()
        .await;

    let client = Client::new(ClientConfig::new(server.url()));

    //* When
    let result: Result<Value, _> = client
        .get("/tour/broken", RequestOptions::new().no_credential())
        .await;

    //* Then
    match result {
        Err(ApiError::Http { status, message }) => {
            assert_eq!(status, 500);
            assert!(!message.is_empty());
        }
        other => panic!("expected Http error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn ok_response_with_invalid_json_is_malformed() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/tour/t1")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = Client::new(ClientConfig::new(server.url()));

    //* When
    let result: Result<Value, _> = client
        .get("/tour/t1", RequestOptions::new().no_credential())
        .await;

    //* Then
    assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
}

#[tokio::test]
async fn transport_failure_is_captured_as_network_error() {
    //* Given a base origin nothing listens on
    let client = Client::new(ClientConfig::new("http://127.0.0.1:9").with_timeout(2));

    //* When
    let result: Result<Value, _> = client
        .get("/tour/list", RequestOptions::new().no_credential())
        .await;

    //* Then
    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn refresh_transport_failure_clears_store() {
    //* Given an origin that answers the first request 401 and then goes away,
    //* so the refresh call hits a dead socket
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let origin = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        // Stop listening before replying: the refresh connect gets refused
        drop(listener);

        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(
                b"HTTP/1.1 401 Unauthorized\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
            )
            .await;
    });

    let store = Arc::new(MemoryTokenStore::new());
    store.set_access_token("A1");
    store.set_refresh_token("R1");
    let client = Client::with_store(
        ClientConfig::new(format!("http://{}", addr)).with_timeout(2),
        store.clone(),
    );

    //* When
    let result: Result<Value, _> = client.get("/admin/profile", RequestOptions::new()).await;
    origin.await.unwrap();

    //* Then both tokens are cleared together, same as an HTTP-level rejection
    assert!(matches!(result, Err(ApiError::Network(_))));
    assert_eq!(store.access_token(), None);
    assert_eq!(store.refresh_token(), None);
}

#[tokio::test]
async fn concurrent_401s_share_a_single_refresh() {
    //* Given
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/admin/profile")
        .match_header("authorization", "Bearer A1")
        .with_status(401)
        .expect_at_least(1)
        .create_async()
        .await;

    let refresh_mock = server
        .mock("POST", "/auth/admin/refresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessToken": "A2"}"#)
        .expect(1)
        .create_async()
        .await;

    let success = server
        .mock("GET", "/admin/profile")
        .match_header("authorization", "Bearer A2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .expect(2)
        .create_async()
        .await;

    let (client, store) = client_with_tokens(&server, Some("A1"), Some("R1"));
    let other = client.clone();

    //* When
    let (first, second) = tokio::join!(
        client.get::<Value>("/admin/profile", RequestOptions::new()),
        other.get::<Value>("/admin/profile", RequestOptions::new()),
    );

    //* Then
    refresh_mock.assert_async().await;
    success.assert_async().await;
    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(store.access_token().as_deref(), Some("A2"));
}

#[tokio::test]
async fn login_seeds_store_and_clear_tokens_logs_out() {
    //* Given
    let server = Server::new_async().await;
    let (client, store) = client_with_tokens(&server, None, None);

    //* When
    client.set_tokens("A1", "R1");

    //* Then
    assert_eq!(store.access_token().as_deref(), Some("A1"));
    assert_eq!(store.refresh_token().as_deref(), Some("R1"));

    client.clear_tokens();
    client.clear_tokens();
    assert_eq!(store.access_token(), None);
    assert_eq!(store.refresh_token(), None);
}
