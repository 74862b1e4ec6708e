//! Notification gateway integration tests
//!
//! Drives `/ws/notifications/` with a real WebSocket client against a
//! server bound to an ephemeral port.

use std::time::Duration;

use assert_matches::assert_matches;
use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::{Error, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::common::{auth_header, generate_test_token, TestApp};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect_as(app: &TestApp, user_id: i64, username: &str) -> Client {
    let token = generate_test_token(user_id, username);
    let (client, _response) = crate::assert_ok!(
        connect_async(app.ws_url(Some(&token))).await,
        "handshake failed"
    );
    client
}

/// Next data frame as JSON, skipping control frames
async fn next_json(client: &mut Client) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("receive failed");

        match frame {
            Message::Text(text) => {
                return serde_json::from_str(text.as_str()).expect("frame is not JSON");
            }
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {:?}", other),
        }
    }
}

/// Assert nothing arrives for a short while
async fn expect_silence(client: &mut Client) {
    let next = tokio::time::timeout(Duration::from_millis(200), client.next()).await;
    assert!(next.is_err(), "unexpected frame: {:?}", next);
}

async fn send_json(client: &mut Client, value: Value) {
    client
        .send(Message::Text(value.to_string().into()))
        .await
        .expect("send failed");
}

#[tokio::test]
async fn test_echo_returns_message_to_sender_only() {
    let app = TestApp::spawn().await;
    let mut sender = connect_as(&app, 7, "alice").await;
    let mut other_session = connect_as(&app, 7, "alice").await;
    app.wait_for_group_size(7, 2).await;

    send_json(&mut sender, json!({"message": "hi"})).await;

    assert_eq!(next_json(&mut sender).await, json!({"message": "hi"}));
    expect_silence(&mut other_session).await;
}

#[tokio::test]
async fn test_malformed_frames_echo_empty_message() {
    let app = TestApp::spawn().await;
    let mut client = connect_as(&app, 3, "carol").await;

    client
        .send(Message::Text("not json".into()))
        .await
        .unwrap();
    assert_eq!(next_json(&mut client).await, json!({"message": ""}));

    send_json(&mut client, json!({"message": 5})).await;
    assert_eq!(next_json(&mut client).await, json!({"message": ""}));

    send_json(&mut client, json!({"text": "hi"})).await;
    assert_eq!(next_json(&mut client).await, json!({"message": ""}));

    // Still open afterwards
    send_json(&mut client, json!({"message": "still here"})).await;
    assert_eq!(next_json(&mut client).await, json!({"message": "still here"}));
}

#[tokio::test]
async fn test_notify_reaches_connected_user() {
    let app = TestApp::spawn().await;
    let mut client = connect_as(&app, 42, "dave").await;
    app.wait_for_group_size(42, 1).await;

    app.state.notifications.notify(42, json!({"type": "like", "post": 1}));

    assert_eq!(
        next_json(&mut client).await,
        json!({"notification": {"type": "like", "post": 1}})
    );
    expect_silence(&mut client).await;
}

#[tokio::test]
async fn test_notify_fans_out_to_every_session() {
    let app = TestApp::spawn().await;
    let mut first = connect_as(&app, 7, "alice").await;
    let mut second = connect_as(&app, 7, "alice").await;
    let mut bystander = connect_as(&app, 8, "bob").await;
    app.wait_for_group_size(7, 2).await;
    app.wait_for_group_size(8, 1).await;

    app.state.notifications.notify(7, json!({"x": 1}));

    assert_eq!(next_json(&mut first).await, json!({"notification": {"x": 1}}));
    assert_eq!(next_json(&mut second).await, json!({"notification": {"x": 1}}));
    expect_silence(&mut bystander).await;
}

#[tokio::test]
async fn test_notify_without_connections_is_a_no_op() {
    let app = TestApp::spawn().await;

    app.state.notifications.notify(999, json!({"x": 1}));

    assert_eq!(app.state.notifications.connection_count(), 0);
    assert_eq!(app.state.notifications.group_count(), 0);
}

#[tokio::test]
async fn test_anonymous_handshake_is_refused() {
    let app = TestApp::spawn().await;

    let error = connect_async(app.ws_url(None)).await.unwrap_err();

    assert_matches!(error, Error::Http(response) if response.status() == 403);
    assert_eq!(app.state.notifications.connection_count(), 0);
}

#[tokio::test]
async fn test_invalid_token_is_refused() {
    let app = TestApp::spawn().await;

    let error = connect_async(app.ws_url(Some("not-a-token"))).await.unwrap_err();

    assert_matches!(error, Error::Http(response) if response.status() == 403);
    assert_eq!(app.state.notifications.connection_count(), 0);
}

#[tokio::test]
async fn test_bearer_header_authenticates_handshake() {
    let app = TestApp::spawn().await;
    let token = generate_test_token(11, "erin");

    let mut request = app.ws_url(None).into_client_request().unwrap();
    request
        .headers_mut()
        .insert(AUTHORIZATION, auth_header(&token).parse().unwrap());

    let (mut client, _response) = connect_async(request).await.unwrap();
    app.wait_for_group_size(11, 1).await;

    app.state.notifications.notify(11, json!({"hello": "erin"}));
    assert_eq!(
        next_json(&mut client).await,
        json!({"notification": {"hello": "erin"}})
    );
}

#[tokio::test]
async fn test_disconnect_releases_membership() {
    let app = TestApp::spawn().await;
    let mut client = connect_as(&app, 5, "frank").await;
    let mut other = connect_as(&app, 5, "frank").await;
    app.wait_for_group_size(5, 2).await;

    client.close(None).await.unwrap();
    app.wait_for_group_size(5, 1).await;

    // The remaining session still gets notifications
    app.state.notifications.notify(5, json!({"n": 1}));
    assert_eq!(next_json(&mut other).await, json!({"notification": {"n": 1}}));

    drop(other);
    app.wait_for_group_size(5, 0).await;
    assert_eq!(app.state.notifications.group_count(), 0);
}

#[tokio::test]
async fn test_close_all_closes_sessions() {
    let app = TestApp::spawn().await;
    let mut client = connect_as(&app, 9, "grace").await;
    app.wait_for_group_size(9, 1).await;

    assert_eq!(app.state.notifications.close_all(), 1);

    let frame = tokio::time::timeout(Duration::from_secs(5), client.next())
        .await
        .expect("timed out waiting for close")
        .expect("stream ended")
        .expect("receive failed");
    assert_matches!(frame, Message::Close(Some(close)) if close.code == CloseCode::Away);

    app.wait_for_group_size(9, 0).await;
    assert_eq!(app.state.notifications.connection_count(), 0);
}
