// Note store initializer tests against a local stand-in for the Notion API

use attend_live_meeting::notes::NOTION_API_VERSION;
use attend_live_meeting::{AttendError, NoteStoreInitializer, NotionInitializer};
use axum::{http::HeaderMap, http::StatusCode, routing::get, Router};

/// Serve `/v1/users/me`, accepting only `Bearer good-token`
async fn spawn_notion_stub() -> String {
    async fn users_me(headers: HeaderMap) -> (StatusCode, &'static str) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let version = headers
            .get("notion-version")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        match (auth, version) {
            (_, v) if v != NOTION_API_VERSION => (StatusCode::BAD_REQUEST, "missing version"),
            ("Bearer good-token", _) => (StatusCode::OK, "{\"object\":\"user\"}"),
            ("Bearer flaky-token", _) => (StatusCode::BAD_GATEWAY, "upstream down"),
            _ => (StatusCode::UNAUTHORIZED, "{\"code\":\"unauthorized\"}"),
        }
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/v1/users/me", get(users_me));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_valid_token_builds_client() {
    let base = spawn_notion_stub().await;
    let initializer = NotionInitializer::new(base, NOTION_API_VERSION, true);

    let client = initializer
        .initialize("good-token", Some("db-1"))
        .await
        .unwrap();

    assert_eq!(client.token(), "good-token");
    assert_eq!(client.database_id(), Some("db-1"));
}

#[tokio::test]
async fn test_rejected_token() {
    let base = spawn_notion_stub().await;
    let initializer = NotionInitializer::new(base, NOTION_API_VERSION, true);

    let err = initializer.initialize("bad-token", None).await.unwrap_err();

    assert_eq!(err.code.as_deref(), Some("UNAUTHORIZED"));
    let details = err.details.clone().unwrap();
    assert_eq!(details["status"], 401);

    let err: AttendError = err.into();
    assert_eq!(err.code(), "NOTE_STORE_INIT_ERROR_UNAUTHORIZED");
    assert_eq!(err.status().as_u16(), 500);
}

#[tokio::test]
async fn test_upstream_error_status() {
    let base = spawn_notion_stub().await;
    let initializer = NotionInitializer::new(base, NOTION_API_VERSION, true);

    let err = initializer.initialize("flaky-token", None).await.unwrap_err();

    assert_eq!(err.code.as_deref(), Some("HTTP_502"));
    assert_eq!(err.details.unwrap()["body"], "upstream down");
}

#[tokio::test]
async fn test_unreachable_store() {
    // Grab a free port, then close it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let initializer = NotionInitializer::new(format!("http://{}", addr), NOTION_API_VERSION, true);

    let err = initializer.initialize("good-token", None).await.unwrap_err();

    assert_eq!(err.code.as_deref(), Some("CONNECTION"));
    assert!(err.details.unwrap()["cause"].is_string());
}

#[tokio::test]
async fn test_empty_token_rejected_without_network() {
    let initializer = NotionInitializer::new("http://127.0.0.1:9", NOTION_API_VERSION, true);

    let err = initializer.initialize("  ", None).await.unwrap_err();

    assert_eq!(err.code.as_deref(), Some("INVALID_TOKEN"));
}

#[tokio::test]
async fn test_verification_can_be_disabled() {
    let initializer = NotionInitializer::new("http://127.0.0.1:9", NOTION_API_VERSION, false);

    let client = initializer.initialize("any-token", None).await.unwrap();

    assert_eq!(client.database_id(), None);
}

#[tokio::test]
async fn test_clients_are_request_scoped() {
    let initializer = NotionInitializer::new("http://127.0.0.1:9", NOTION_API_VERSION, false);

    let first = initializer.initialize("token-one", Some("db-a")).await.unwrap();
    let second = initializer.initialize("token-two", None).await.unwrap();

    assert_eq!(first.token(), "token-one");
    assert_eq!(first.database_id(), Some("db-a"));
    assert_eq!(second.token(), "token-two");
    assert_eq!(second.database_id(), None);
}
