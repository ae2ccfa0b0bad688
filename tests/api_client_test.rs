//! REST client against a real HTTP server.

use std::sync::Arc;

use glitch::adapters::ReqwestHttpClient;
use glitch::api::GlitchApi;
use glitch::error::{GlitchError, UNKNOWN_ERROR};
use glitch::models::LoginRequest;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "wire-token";

fn api_for(server: &MockServer) -> GlitchApi {
    GlitchApi::new(server.uri(), Arc::new(ReqwestHttpClient::new()))
}

#[tokio::test]
async fn test_stream_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "alice",
            "live": true,
            "title": "Hi",
            "startedAt": "2024-05-01T18:00:00Z",
            "viewers": 42,
        })))
        .mount(&server)
        .await;

    let stream = api_for(&server)
        .stream_by_name("alice", None)
        .await
        .unwrap();

    assert_eq!(stream.username, "alice");
    assert!(stream.live);
    assert_eq!(stream.viewers, 42);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("Authorization", "Bearer wire-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "viewer",
            "createdAt": "2024-01-01T00:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = api_for(&server).current_user(TOKEN).await.unwrap();
    assert_eq!(user.username, "viewer");
}

#[tokio::test]
async fn test_login_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "username": "alice",
            "token": "issued",
        })))
        .mount(&server)
        .await;

    let auth = api_for(&server)
        .login(&LoginRequest {
            username: "alice".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(auth.token, "issued");
    assert_eq!(auth.id, 3);
}

async fn error_message_for(template: ResponseTemplate) -> String {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams/live"))
        .respond_with(template)
        .mount(&server)
        .await;

    let err = api_for(&server).live_streams(None).await.unwrap_err();
    assert!(matches!(err, GlitchError::Api(_)));
    err.user_message()
}

#[tokio::test]
async fn test_error_message_precedence() {
    let message = error_message_for(
        ResponseTemplate::new(400)
            .set_body_json(json!({"error": "Bad Request", "message": "Username taken"})),
    )
    .await;
    assert_eq!(message, "Username taken");

    let error_only = error_message_for(
        ResponseTemplate::new(500).set_body_json(json!({"error": "Internal Server Error"})),
    )
    .await;
    assert_eq!(error_only, "Internal Server Error");

    let raw = error_message_for(ResponseTemplate::new(502).set_body_string("Bad gateway")).await;
    assert_eq!(raw, "Bad gateway");

    let empty = error_message_for(ResponseTemplate::new(500)).await;
    assert_eq!(empty, UNKNOWN_ERROR);
}

#[tokio::test]
async fn test_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/nobody"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "User not found"})))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .user_by_name("nobody", None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_check_follow_not_found_means_not_following() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/follows/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let follow = api_for(&server).check_follow(TOKEN, 7).await.unwrap();
    assert!(follow.is_none());
}

#[tokio::test]
async fn test_check_follow_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/follows/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 107,
            "from": 1,
            "to": 7,
            "followedAt": "2024-03-01T12:00:00Z",
        })))
        .mount(&server)
        .await;

    let follow = api_for(&server).check_follow(TOKEN, 7).await.unwrap();
    assert_eq!(follow.unwrap().to, 7);
}

#[tokio::test]
async fn test_search_query_is_path_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/search/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let users = api_for(&server).search_users("a b", None).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_upload_sends_multipart_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "viewer",
            "createdAt": "2024-01-01T00:00:00Z",
            "profilePic": "AQID",
        })))
        .mount(&server)
        .await;

    let user = api_for(&server)
        .upload_profile_picture(TOKEN, "me.png", "image/png", vec![1, 2, 3])
        .await
        .unwrap();
    assert_eq!(user.profile_pic, Some(vec![1, 2, 3]));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_lowercase();
    assert!(body.contains(r#"name="profilepic""#));
    assert!(body.contains(r#"filename="me.png""#));
    assert!(body.contains("content-type: image/png"));
}

#[tokio::test]
async fn test_export_returns_raw_bytes() {
    let server = MockServer::start().await;
    let csv = "id,title,duration\n1,First,3600\n";
    Mock::given(method("GET"))
        .and(path("/api/vods/export"))
        .and(header("Authorization", "Bearer wire-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv))
        .mount(&server)
        .await;

    let bytes = api_for(&server).export_vods(TOKEN).await.unwrap();
    assert_eq!(&bytes[..], csv.as_bytes());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let api = GlitchApi::new(
        format!("http://127.0.0.1:{}", port),
        Arc::new(ReqwestHttpClient::new()),
    );
    let err = api.live_streams(None).await.unwrap_err();

    assert!(matches!(err, GlitchError::Network(_)));
}
