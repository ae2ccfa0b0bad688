//! Auth, profile, live, search and settings screens against the mock API.

mod common;

use std::time::Duration;

use common::*;
use glitch::view_state::{AuthState, UpdateState};
use serde_json::json;

// Auth

#[tokio::test]
async fn test_login_saves_session() {
    let harness = TestHarness::signed_out().await;
    harness.api.on_json(
        "POST",
        "/api/auth/login",
        200,
        json!({"id": 3, "username": "alice", "token": "fresh-token"}),
    );
    let view = harness.app.auth_view();

    view.login("alice", "hunter2").await;

    assert_eq!(view.state(), AuthState::Success);
    let session = harness.app.session().current();
    assert_eq!(session.token.as_deref(), Some("fresh-token"));
    assert_eq!(session.user_id, Some(3));
    assert_eq!(harness.store.get().unwrap().username.as_deref(), Some("alice"));

    let request = &harness.api.requests_to("POST", "/api/auth/login")[0];
    assert_eq!(
        request.json_body(),
        Some(json!({"username": "alice", "password": "hunter2"}))
    );
}

#[tokio::test]
async fn test_login_error_uses_server_message() {
    let harness = TestHarness::signed_out().await;
    harness.api.on_json(
        "POST",
        "/api/auth/login",
        401,
        json!({"error": "Unauthorized", "message": "Bad credentials"}),
    );
    let view = harness.app.auth_view();

    view.login("alice", "wrong").await;

    assert_eq!(view.state(), AuthState::Error("Bad credentials".to_string()));
    assert!(!harness.app.session().is_signed_in());
}

#[tokio::test]
async fn test_login_error_without_json_body() {
    let harness = TestHarness::signed_out().await;
    harness
        .api
        .on("POST", "/api/auth/register", MockResponse::text(409, "Username taken"));
    let view = harness.app.auth_view();

    view.register("alice", "pw", "a@glitch.test").await;

    assert_eq!(view.state(), AuthState::Error("Username taken".to_string()));
}

#[tokio::test]
async fn test_auth_shows_loading_while_pending() {
    let harness = TestHarness::signed_out().await;
    harness.api.once_after(
        "POST",
        "/api/auth/login",
        Duration::from_millis(100),
        MockResponse::json(200, json!({"id": 3, "username": "alice", "token": "t"})),
    );
    let view = harness.app.auth_view();

    tokio::join!(view.login("alice", "pw"), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(view.state().is_loading());
    });
    assert_eq!(view.state(), AuthState::Success);
}

#[tokio::test]
async fn test_logout_keeps_dark_mode() {
    let mut session = signed_in_session("alice", 3);
    session.dark_mode = true;
    let harness = TestHarness::with_store(InMemorySessionStore::with_session(session)).await;
    let view = harness.app.auth_view();

    view.logout().await;

    let current = harness.app.session().current();
    assert!(current.token.is_none());
    assert!(current.username.is_none());
    assert!(current.dark_mode);
    assert_eq!(view.state(), AuthState::Idle);
}

// Profile

#[tokio::test]
async fn test_profile_of_other_user_with_follow_check() {
    let harness = TestHarness::signed_in("viewer").await;
    harness
        .api
        .on_json("GET", "/api/users/bob", 200, user_json(8, "bob", 5))
        .on_json("GET", "/api/follows/8", 200, follow_json(1, 8));
    let view = harness.app.profile_view();

    view.load_by_username("bob").await;

    assert_eq!(view.user().unwrap().followers_count, 5);
    assert!(view.is_following());
    assert!(!view.is_own_profile());
}

#[tokio::test]
async fn test_own_profile() {
    let harness = TestHarness::signed_in("viewer").await;
    harness
        .api
        .on_json("GET", "/api/users", 200, user_json(1, "viewer", 0));
    let view = harness.app.profile_view();

    view.load_current().await;

    assert!(view.is_own_profile());
    assert!(view.error().is_none());
}

#[tokio::test]
async fn test_profile_load_failure_message() {
    let harness = TestHarness::signed_in("viewer").await;
    harness
        .api
        .on_json("GET", "/api/users", 500, json!({"message": "db down"}));
    let view = harness.app.profile_view();

    view.load_current().await;

    assert!(view.user().is_none());
    assert_eq!(view.error().as_deref(), Some("Failed to load profile: db down"));
}

#[tokio::test]
async fn test_profile_toggle_failure_reverts() {
    let harness = TestHarness::signed_in("viewer").await;
    harness
        .api
        .on_json("GET", "/api/users/bob", 200, user_json(8, "bob", 5))
        .on_json("GET", "/api/follows/8", 200, follow_json(1, 8))
        .on_json("POST", "/api/follows/delete", 500, json!({"error": "nope"}));
    let view = harness.app.profile_view();
    view.load_by_username("bob").await;

    view.toggle_follow().await;

    assert!(view.is_following());
    assert_eq!(view.error().as_deref(), Some("Error toggling follow: nope"));
}

#[tokio::test]
async fn test_profile_refresh_failure_after_toggle_is_reported() {
    let harness = TestHarness::signed_in("viewer").await;
    harness
        .api
        .once_after(
            "GET",
            "/api/users/bob",
            Duration::ZERO,
            MockResponse::json(200, user_json(8, "bob", 5)),
        )
        .on_json("GET", "/api/users/bob", 500, json!({"message": "db down"}))
        .on("GET", "/api/follows/8", MockResponse::empty(404))
        .on_json("POST", "/api/follows/create", 200, follow_json(1, 8));
    let view = harness.app.profile_view();
    view.load_by_username("bob").await;
    assert!(!view.is_following());

    view.toggle_follow().await;

    assert!(view.is_following());
    assert_eq!(view.user().unwrap().followers_count, 5);
    assert_eq!(view.error().as_deref(), Some("Failed to load user: db down"));
}

#[tokio::test]
async fn test_update_bio_replaces_user() {
    let harness = TestHarness::signed_in("viewer").await;
    let mut updated = user_json(1, "viewer", 0);
    updated["bio"] = json!("Speedrunner");
    harness
        .api
        .on_json("POST", "/api/users/update", 200, updated);
    let view = harness.app.profile_view();

    view.update_bio("speedrunner").await;

    assert_eq!(view.user().unwrap().bio.as_deref(), Some("Speedrunner"));
    let request = &harness.api.requests_to("POST", "/api/users/update")[0];
    assert_eq!(request.json_body(), Some(json!({"bio": "speedrunner"})));
}

#[tokio::test]
async fn test_upload_picture_missing_file() {
    let harness = TestHarness::signed_in("viewer").await;
    let view = harness.app.profile_view();

    view.upload_picture(std::path::Path::new("/no/such/picture.png"))
        .await;

    assert!(view
        .error()
        .unwrap()
        .starts_with("Failed to upload picture: "));
    assert!(harness.api.client().get_requests().is_empty());
}

// Live

#[tokio::test]
async fn test_live_view_resolves_users_and_tolerates_failures() {
    let harness = TestHarness::signed_in("viewer").await;
    let mut bob = follow_json(1, 8);
    bob["toStream"] = stream_json("bob", 12);
    let mut carol = follow_json(1, 9);
    carol["toStream"] = stream_json("carol", 3);
    harness
        .api
        .on_json("GET", "/api/follows/live", 200, json!([bob, carol]))
        .on_json("GET", "/api/users/bob", 200, user_json(8, "bob", 100))
        .on_json("GET", "/api/users/carol", 404, json!({"message": "User not found"}));
    let view = harness.app.live_view();

    view.load().await;

    assert_eq!(view.follows().len(), 2);
    let users = view.users();
    assert_eq!(users.len(), 1);
    assert_eq!(view.user_for("bob").unwrap().followers_count, 100);
    assert!(view.user_for("carol").is_none());
    assert_eq!(view.error().as_deref(), Some("Failed to load user: User not found"));
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_live_view_requires_session() {
    let harness = TestHarness::signed_out().await;
    let view = harness.app.live_view();

    view.load().await;

    assert!(view.follows().is_empty());
    assert!(view.error().is_some());
}

// Search

#[tokio::test]
async fn test_search_users() {
    let harness = TestHarness::signed_in("viewer").await;
    harness.api.on_json(
        "GET",
        "/api/users/search/al",
        200,
        json!([user_json(3, "alice", 1), user_json(4, "alan", 2)]),
    );
    let view = harness.app.search_view();

    view.search("al").await;

    assert_eq!(view.query(), "al");
    let names: Vec<_> = view.results().into_iter().map(|u| u.username).collect();
    assert_eq!(names, vec!["alice", "alan"]);
}

#[tokio::test]
async fn test_blank_search_reloads_live_streams() {
    let harness = TestHarness::signed_in("viewer").await;
    harness
        .api
        .on_json("GET", "/api/users/search/al", 200, json!([user_json(3, "alice", 1)]))
        .on_json("GET", "/api/streams/live", 200, json!([stream_json("alice", 42)]));
    let view = harness.app.search_view();
    view.search("al").await;

    view.search("   ").await;

    assert!(view.results().is_empty());
    assert_eq!(view.streams().len(), 1);
    assert_eq!(view.streams()[0].viewers, 42);
}

#[tokio::test]
async fn test_failed_search_empties_results() {
    let harness = TestHarness::signed_in("viewer").await;
    harness
        .api
        .on_json("GET", "/api/users/search/al", 200, json!([user_json(3, "alice", 1)]));
    let view = harness.app.search_view();
    view.search("al").await;
    assert_eq!(view.results().len(), 1);

    harness
        .api
        .on("GET", "/api/users/search/al", MockResponse::empty(500));
    view.search("al").await;

    assert!(view.results().is_empty());
}

// Settings

#[tokio::test]
async fn test_settings_email_and_password() {
    let harness = TestHarness::signed_in("viewer").await;
    harness
        .api
        .on_json(
            "GET",
            "/api/auth",
            200,
            json!({"id": 1, "username": "viewer", "email": "old@glitch.test"}),
        )
        .on_json(
            "POST",
            "/api/auth/email",
            200,
            json!({"id": 1, "username": "viewer", "email": "new@glitch.test"}),
        )
        .on("POST", "/api/auth/password", MockResponse::empty(200));
    let view = harness.app.settings_view();

    view.load_auth_info().await;
    assert_eq!(view.email().as_deref(), Some("old@glitch.test"));

    view.update_email("new@glitch.test").await;
    assert_eq!(view.email().as_deref(), Some("new@glitch.test"));
    assert_eq!(view.state(), UpdateState::Success("Email updated".to_string()));

    view.update_password("old", "new").await;
    assert_eq!(view.state(), UpdateState::Success("Password updated".to_string()));

    view.reset();
    assert_eq!(view.state(), UpdateState::Idle);
}

#[tokio::test]
async fn test_settings_password_rejected() {
    let harness = TestHarness::signed_in("viewer").await;
    harness
        .api
        .on_json("POST", "/api/auth/password", 400, json!({"message": "Old password is wrong"}));
    let view = harness.app.settings_view();

    view.update_password("bad", "new").await;

    assert_eq!(
        view.state(),
        UpdateState::Error("Old password is wrong".to_string())
    );
}

#[tokio::test]
async fn test_settings_dark_mode_persists() {
    let harness = TestHarness::signed_in("viewer").await;
    let view = harness.app.settings_view();

    view.toggle_dark_mode().await;

    assert!(view.dark_mode());
    assert!(harness.store.get().unwrap().dark_mode);
}

#[tokio::test]
async fn test_settings_export_vods() {
    let dir = tempfile::TempDir::new().unwrap();
    let harness = TestHarness::signed_in("viewer").await;
    harness.api.on(
        "GET",
        "/api/vods/export",
        MockResponse::text(200, "id,title,duration\n1,First,3600\n"),
    );
    let view = harness.app.settings_view();

    let path = view.export_vods(dir.path()).await.unwrap();

    assert_eq!(view.state(), UpdateState::Success("CSV downloaded".to_string()));
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "id,title,duration\n1,First,3600\n"
    );
}

#[tokio::test]
async fn test_settings_export_failure() {
    let dir = tempfile::TempDir::new().unwrap();
    let harness = TestHarness::signed_in("viewer").await;
    harness
        .api
        .on_json("GET", "/api/vods/export", 403, json!({"message": "Forbidden"}));
    let view = harness.app.settings_view();

    assert!(view.export_vods(dir.path()).await.is_none());
    assert_eq!(
        view.state(),
        UpdateState::Error("Failed to download CSV: Forbidden".to_string())
    );
}

#[tokio::test]
async fn test_delete_account_signs_out() {
    let harness = TestHarness::signed_in("viewer").await;
    harness.api.on("DELETE", "/api/auth", MockResponse::empty(200));
    let view = harness.app.settings_view();

    view.delete_account().await;

    assert!(!harness.app.session().is_signed_in());
    assert_eq!(view.state(), UpdateState::Success("Account deleted".to_string()));
}
