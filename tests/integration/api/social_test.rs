//! Posts, comments and likes integration tests
//!
//! All of these need PostgreSQL and are `#[ignore]`d by default. The
//! notification tests run a real server so the post owner can listen on
//! the gateway while another user acts on the post.

use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use social_media_api::backend::server::{create_app, AppState};

use crate::common::{create_unique_test_user, test_jwt_settings, TestApp, TestDatabase};

fn create_test_server(pool: PgPool) -> TestServer {
    let state = AppState::new(Some(pool), test_jwt_settings());
    TestServer::new(create_app(state)).unwrap()
}

async fn create_post(server: &TestServer, token: &str, content: &str) -> Value {
    let response = server
        .post("/api/v1/posts/")
        .authorization_bearer(token)
        .json(&json!({"content": content}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_post_lifecycle() {
    let db = TestDatabase::new().await;
    let server = create_test_server(db.pool().clone());
    let alice = create_unique_test_user(db.pool()).await.unwrap();

    let first = create_post(&server, &alice.token, "first").await;
    let second = create_post(&server, &alice.token, "second").await;
    assert_eq!(first["user"], alice.username.as_str());

    // Newest first
    let list: Value = server
        .get("/api/v1/posts/")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(list[0]["id"], second["id"]);
    assert_eq!(list[1]["id"], first["id"]);

    let response = server
        .patch(&format!("/api/v1/posts/{}/", first["id"]))
        .authorization_bearer(&alice.token)
        .json(&json!({"content": "edited"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["content"], "edited");

    let response = server
        .delete(&format!("/api/v1/posts/{}/", first["id"]))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .get(&format!("/api/v1/posts/{}/", first["id"]))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_other_users_posts_are_not_mutable() {
    let db = TestDatabase::new().await;
    let server = create_test_server(db.pool().clone());
    let alice = create_unique_test_user(db.pool()).await.unwrap();
    let bob = create_unique_test_user(db.pool()).await.unwrap();
    let post = create_post(&server, &alice.token, "mine").await;

    let response = server
        .put(&format!("/api/v1/posts/{}/", post["id"]))
        .authorization_bearer(&bob.token)
        .json(&json!({"content": "yours now"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server
        .delete(&format!("/api/v1/posts/{}/", post["id"]))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // Reads are still allowed
    let response = server
        .get(&format!("/api/v1/posts/{}/", post["id"]))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_likes_are_unique_per_user() {
    let db = TestDatabase::new().await;
    let server = create_test_server(db.pool().clone());
    let alice = create_unique_test_user(db.pool()).await.unwrap();
    let bob = create_unique_test_user(db.pool()).await.unwrap();
    let post = create_post(&server, &alice.token, "like me").await;

    let response = server
        .post("/api/v1/likes/")
        .authorization_bearer(&bob.token)
        .json(&json!({"post": post["id"]}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let like: Value = response.json();
    assert_eq!(like["user"], bob.username.as_str());
    assert_eq!(like["post"], post["id"]);

    let response = server
        .post("/api/v1/likes/")
        .authorization_bearer(&bob.token)
        .json(&json!({"post": post["id"]}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/v1/likes/")
        .authorization_bearer(&bob.token)
        .json(&json!({"post": 987654321}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Only the liker can remove the like
    let response = server
        .delete(&format!("/api/v1/likes/{}/", like["id"]))
        .authorization_bearer(&alice.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server
        .delete(&format!("/api/v1/likes/{}/", like["id"]))
        .authorization_bearer(&bob.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_comment_on_unknown_post_is_rejected() {
    let db = TestDatabase::new().await;
    let server = create_test_server(db.pool().clone());
    let alice = create_unique_test_user(db.pool()).await.unwrap();

    let response = server
        .post("/api/v1/comments/")
        .authorization_bearer(&alice.token)
        .json(&json!({"post": 987654321, "content": "hello?"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_like_notifies_post_owner() {
    let db = TestDatabase::new().await;
    let app = TestApp::spawn_with(Some(db.pool().clone())).await;
    let server = TestServer::new(create_app(app.state.clone())).unwrap();
    let alice = create_unique_test_user(db.pool()).await.unwrap();
    let bob = create_unique_test_user(db.pool()).await.unwrap();
    let post = create_post(&server, &alice.token, "notify me").await;

    let (mut owner_socket, _) = connect_async(app.ws_url(Some(&alice.token))).await.unwrap();
    app.wait_for_group_size(alice.id, 1).await;

    // Liking your own post stays silent
    server
        .post("/api/v1/likes/")
        .authorization_bearer(&alice.token)
        .json(&json!({"post": post["id"]}))
        .await;

    let response = server
        .post("/api/v1/likes/")
        .authorization_bearer(&bob.token)
        .json(&json!({"post": post["id"]}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let frame = tokio::time::timeout(Duration::from_secs(5), owner_socket.next())
        .await
        .expect("timed out waiting for notification")
        .unwrap()
        .unwrap();
    let Message::Text(text) = frame else {
        panic!("unexpected frame: {:?}", frame);
    };
    let body: Value = serde_json::from_str(text.as_str()).unwrap();

    assert_eq!(
        body,
        json!({"notification": {
            "type": "like",
            "user": bob.username,
            "post": post["id"],
            "message": format!("{} liked your post", bob.username),
        }})
    );
}
