#![cfg(feature = "io")]

use std::sync::Arc;

use axum::body::Body;
use ed25519_dalek::{Signer, SigningKey};
use http::{Request, Response, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use minsky::handlers;
use minsky::server::{self, AppState};
use minsky::signature::{PublicKey, SIGNATURE_HEADER, TIMESTAMP_HEADER};

const TIMESTAMP: &str = "1700000000";

fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[7; 32])
}

fn app(public_key: Option<PublicKey>) -> axum::Router {
    server::app(Arc::new(AppState {
        public_key,
        router: handlers::router(),
    }))
}

fn secure_app() -> axum::Router {
    app(Some(PublicKey::from(signing_key().verifying_key())))
}

fn sign(body: &str) -> String {
    let mut message = TIMESTAMP.as_bytes().to_vec();
    message.extend_from_slice(body.as_bytes());
    hex::encode(signing_key().sign(&message).to_bytes())
}

fn post(body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/discord/interactions")
        .header("content-type", "application/json")
        .header(TIMESTAMP_HEADER, TIMESTAMP);
    if let Some(signature) = signature {
        builder = builder.header(SIGNATURE_HEADER, signature);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn verify_command() -> String {
    json!({
        "id": "1",
        "application_id": "2",
        "type": 2,
        "guild_id": "3",
        "channel_id": "4",
        "data": {"id": "5", "name": "verify", "type": 1},
        "member": {
            "user": {"id": "6", "username": "Nelly", "discriminator": "0"},
            "roles": [],
            "joined_at": "2021-06-02T17:39:59.617000+00:00",
            "deaf": false,
            "mute": false,
        },
        "token": "t",
        "version": 1,
    })
    .to_string()
}

const PING: &str = r#"{"type":1, "id":"1","application_id":"1","token":"t","version":1}"#;

#[tokio::test]
async fn signed_ping_gets_pong() {
    let response = secure_app()
        .oneshot(post(PING, Some(&sign(PING))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"type": 1}));
}

#[tokio::test]
async fn tampered_signature_is_rejected_before_decoding() {
    let mut signature = sign(PING).into_bytes();
    signature[0] = if signature[0] == b'0' { b'1' } else { b'0' };
    let signature = String::from_utf8(signature).unwrap();

    let response = secure_app()
        .oneshot(post(PING, Some(&signature)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_bytes(response).await.is_empty());

    // A body that would fail to decode still yields 401, not 400.
    let response = secure_app()
        .oneshot(post("not json", Some(&signature)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn signature_over_a_different_body_is_rejected() {
    let response = secure_app()
        .oneshot(post(PING, Some(&sign(&verify_command()))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_signature_is_rejected() {
    let response = secure_app().oneshot(post(PING, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn verify_command_gets_ephemeral_link() {
    let body = verify_command();
    let response = secure_app()
        .oneshot(post(&body, Some(&sign(&body))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply = body_json(response).await;
    assert_eq!(reply["type"], 4);
    assert_eq!(reply["data"]["flags"], 64);

    let rows = reply["data"]["components"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    let buttons = rows[0]["components"].as_array().unwrap();
    assert_eq!(buttons.len(), 1);
    assert_eq!(
        buttons[0],
        json!({"type": 2, "style": 5, "label": "Verify", "url": "https://www.reddit.com/"})
    );
}

#[tokio::test]
async fn missing_id_is_a_bad_request_naming_the_field() {
    let body = r#"{"type":1,"application_id":"1","token":"t","version":1}"#;
    let response = secure_app()
        .oneshot(post(body, Some(&sign(body))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"]["code"], "invalid_interaction");
    let message = error["error"]["message"].as_str().unwrap();
    assert!(message.contains("`id`"), "{message}");
}

#[tokio::test]
async fn unknown_command_is_a_bad_request() {
    let body = verify_command().replace(r#""name":"verify""#, r#""name":"ban""#);
    let response = secure_app()
        .oneshot(post(&body, Some(&sign(&body))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "unknown_command");
}

#[tokio::test]
async fn unhandled_interaction_type_is_a_bad_request() {
    let body = json!({
        "id": "1",
        "application_id": "2",
        "type": 3,
        "data": {"custom_id": "click", "component_type": 2},
        "user": {"id": "6", "username": "Nelly", "discriminator": "0"},
        "token": "t",
        "version": 1,
    })
    .to_string();
    let response = secure_app()
        .oneshot(post(&body, Some(&sign(&body))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "unsupported_type");
}

#[tokio::test]
async fn type_code_past_a_byte_is_an_unsupported_type() {
    let body = r#"{"id":"1","application_id":"1","type":256,"token":"t","version":1}"#;
    let response = secure_app()
        .oneshot(post(body, Some(&sign(body))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"]["code"], "unsupported_type");
    let message = error["error"]["message"].as_str().unwrap();
    assert!(message.contains("256"), "{message}");
}

#[tokio::test]
async fn type_code_past_u16_is_an_invalid_interaction() {
    let body = r#"{"id":"1","application_id":"1","type":70000,"token":"t","version":1}"#;
    let response = secure_app()
        .oneshot(post(body, Some(&sign(body))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"]["code"], "invalid_interaction");
    let message = error["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("`type`"), "{message}");
}

#[tokio::test]
async fn unknown_codes_nested_in_a_command_are_accepted() {
    let mut command: Value = serde_json::from_str(&verify_command()).unwrap();
    command["data"]["resolved"] = json!({
        "channels": {"7": {"id": "7", "type": 300, "name": "future"}},
    });
    command["data"]["options"] = json!([{"name": "where", "type": 300, "value": "7"}]);
    let body = command.to_string();

    let response = secure_app()
        .oneshot(post(&body, Some(&sign(&body))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["flags"], 64);
}

#[tokio::test]
async fn without_a_key_any_signature_is_accepted() {
    for signature in [None, Some("garbage"), Some("00")] {
        let response = app(None).oneshot(post(PING, signature)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"type": 1}));
    }

    let body = verify_command();
    let response = app(None).oneshot(post(&body, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["flags"], 64);
}

#[tokio::test]
async fn reddit_callback_is_not_implemented() {
    let response = secure_app()
        .oneshot(
            Request::builder()
                .uri("/api/reddit/callback")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}
