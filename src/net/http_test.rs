use futures::executor::block_on;

use super::*;
use crate::error::ErrorKind;
use crate::net::mock::{drain_events, test_client};
use crate::net::types::{Role, UserProfile};
use crate::session::storage::KeyValueStore as _;
use crate::session::token_store::{PROFILE_KEY, TOKEN_KEY};

// =============================================================
// Request building
// =============================================================

#[test]
fn json_sets_body_and_content_type() {
    let req = HttpRequest::post("/login").json(&serde_json::json!({ "a": 1 })).unwrap();
    assert_eq!(req.body, Body::Json(r#"{"a":1}"#.to_owned()));
    assert_eq!(req.header("content-type"), Some(JSON_CONTENT_TYPE));
}

#[test]
fn multipart_sets_multipart_content_type() {
    let req = HttpRequest::put("/product/1").multipart(vec![Part::file("imageFile", "a.png", "image/png", vec![1])]);
    assert_eq!(req.header(CONTENT_TYPE), Some(MULTIPART_CONTENT_TYPE));
}

#[test]
fn set_header_replaces_case_insensitively() {
    let mut req = HttpRequest::get("/x");
    req.set_header("authorization", "Bearer old");
    req.set_header(AUTHORIZATION, "Bearer new");
    assert_eq!(req.headers.len(), 1);
    assert_eq!(req.header(AUTHORIZATION), Some("Bearer new"));
}

#[test]
fn debug_output_hides_secrets() {
    let mut req = HttpRequest::post("/login")
        .json(&serde_json::json!({ "username": "alice", "password": "hunter2" }))
        .unwrap();
    req.set_header(AUTHORIZATION, "Bearer secret-token");
    let rendered = format!("{req:?}");
    assert!(!rendered.contains("hunter2"));
    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("Authorization"));
}

// =============================================================
// Token injection
// =============================================================

#[test]
fn execute_attaches_bearer_token_when_present() {
    let (client, _events, _storage, transport) = test_client();
    client.tokens().save("abc.def.ghi");
    transport.reply(200, "[]");
    block_on(client.execute(HttpRequest::get("/products"))).unwrap();
    let sent = transport.last_request();
    assert_eq!(sent.url, "http://backend.test/api/products");
    assert_eq!(sent.credentials, CredentialsMode::Include);
    assert_eq!(sent.request.header(AUTHORIZATION), Some("Bearer abc.def.ghi"));
}

#[test]
fn execute_without_token_sends_no_authorization() {
    let (client, _events, _storage, transport) = test_client();
    transport.reply(200, "[]");
    block_on(client.execute(HttpRequest::get("/products"))).unwrap();
    assert!(transport.last_request().request.header(AUTHORIZATION).is_none());
}

#[test]
fn execute_public_never_attaches_token() {
    let (client, _events, _storage, transport) = test_client();
    client.tokens().save("abc.def.ghi");
    transport.reply(200, "ok");
    block_on(client.execute_public(HttpRequest::post("/login"))).unwrap();
    assert!(transport.last_request().request.header(AUTHORIZATION).is_none());
}

// =============================================================
// 401 teardown
// =============================================================

#[test]
fn unauthorized_response_clears_store_and_emits_once() {
    let (client, events, storage, transport) = test_client();
    client.tokens().save("abc.def.ghi");
    client.tokens().save_profile(&UserProfile { username: "alice".to_owned(), role: Role::User });
    transport.reply(401, "");

    let err = block_on(client.execute(HttpRequest::get("/products"))).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Auth);
    assert_eq!(err.status, Some(401));
    assert!(storage.get(TOKEN_KEY).is_none());
    assert!(storage.get(PROFILE_KEY).is_none());
    assert_eq!(drain_events(client, events), vec![SessionEvent::Invalidated]);
}

#[test]
fn each_unauthorized_response_emits_its_own_event() {
    let (client, events, _storage, transport) = test_client();
    transport.reply(401, "").reply(401, "");
    let _ = block_on(client.execute(HttpRequest::get("/products")));
    let _ = block_on(client.execute(HttpRequest::get("/logout")));
    assert_eq!(drain_events(client, events).len(), 2);
}

#[test]
fn public_unauthorized_response_does_not_tear_down() {
    let (client, events, storage, transport) = test_client();
    client.tokens().save("abc.def.ghi");
    transport.reply(401, "Bad credentials");
    let err = block_on(client.execute_public(HttpRequest::post("/login"))).unwrap_err();
    assert_eq!(err.server_message.as_deref(), Some("Bad credentials"));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc.def.ghi"));
    assert!(drain_events(client, events).is_empty());
}

#[test]
fn forbidden_keeps_session() {
    let (client, events, storage, transport) = test_client();
    client.tokens().save("abc.def.ghi");
    transport.reply(403, "");
    let err = block_on(client.execute(HttpRequest::delete("/product/1"))).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc.def.ghi"));
    assert!(drain_events(client, events).is_empty());
}

#[test]
fn listener_gone_does_not_break_teardown() {
    let (client, events, storage, transport) = test_client();
    drop(events);
    client.tokens().save("abc.def.ghi");
    transport.reply(401, "");
    assert!(block_on(client.execute(HttpRequest::get("/products"))).is_err());
    assert!(storage.get(TOKEN_KEY).is_none());
}

// =============================================================
// Failure normalization
// =============================================================

#[test]
fn other_statuses_pass_through_with_server_message() {
    let (client, _events, _storage, transport) = test_client();
    transport.reply(422, r#"{"message":"name is required"}"#);
    let err = block_on(client.execute(HttpRequest::post("/product"))).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.status, Some(422));
    assert_eq!(err.message(), "name is required");
}

#[test]
fn transport_failures_map_to_connection_and_network() {
    let (client, _events, _storage, transport) = test_client();
    transport
        .fail(TransportError::Connect("refused".to_owned()))
        .fail(TransportError::NoResponse("timeout".to_owned()));
    let first = block_on(client.execute(HttpRequest::get("/products"))).unwrap_err();
    let second = block_on(client.execute(HttpRequest::get("/products"))).unwrap_err();
    assert_eq!(first.kind, ErrorKind::Connection);
    assert_eq!(second.kind, ErrorKind::Network);
    assert_eq!(second.status, None);
}

#[test]
fn response_helpers_decode_body() {
    let response = HttpResponse::new(200, r#"{"n":1}"#.as_bytes());
    assert!(response.is_success());
    assert_eq!(response.text(), r#"{"n":1}"#);
    let value: serde_json::Value = response.json().unwrap();
    assert_eq!(value["n"], 1);
    assert!(!HttpResponse::new(302, Vec::new()).is_success());
}
