use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::error::ErrorKind;
use crate::net::mock::test_client;
use crate::state::store::{Action, AppState};

#[test]
fn parse_product_id_accepts_positive_integers() {
    assert_eq!(parse_product_id("42"), Some(42));
    assert_eq!(parse_product_id(" 7 "), Some(7));
}

#[test]
fn parse_product_id_rejects_garbage() {
    assert_eq!(parse_product_id("abc"), None);
    assert_eq!(parse_product_id("0"), None);
    assert_eq!(parse_product_id("-3"), None);
    assert_eq!(parse_product_id(""), None);
}

#[derive(Default)]
struct RecordingStore {
    state: RefCell<AppState>,
}

impl Dispatch for RecordingStore {
    fn dispatch(&self, action: Action) {
        self.state.borrow_mut().apply(action);
    }
}

const LAMP: &str = r#"{"id":3,"name":"Lamp","price":12.5,"releaseDate":"2024-01-15","stockQuantity":3,"productAvailable":true}"#;

fn draft() -> ProductDraft {
    FormFields {
        name: "Lamp".to_owned(),
        price: "12.5".to_owned(),
        release_date: "2024-01-15".to_owned(),
        stock_quantity: "3".to_owned(),
        ..FormFields::default()
    }
    .validate(Some(3))
    .unwrap()
}

#[test]
fn reloads_current_product_after_update() {
    let (client, _events, _storage, transport) = test_client();
    let store = RecordingStore::default();
    transport.reply(200, "Updated").reply(200, &format!("[{LAMP}]")).reply(200, LAMP);

    block_on(save_and_reload(&store, &client, 3, draft(), None)).unwrap();

    assert_eq!(store.state.borrow().products.current.as_ref().map(|p| p.id), Some(3));
    assert_eq!(transport.last_request().request.path, "/product/3");
}

#[test]
fn reload_failure_is_reported() {
    let (client, _events, _storage, transport) = test_client();
    let store = RecordingStore::default();
    transport.reply(200, "Updated").reply(200, "[]").reply(404, "");

    let err = block_on(save_and_reload(&store, &client, 3, draft(), None)).unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(store.state.borrow().products.error.is_some());
}

#[test]
fn failed_update_skips_reload() {
    let (client, _events, _storage, transport) = test_client();
    let store = RecordingStore::default();
    transport.reply(500, "");

    assert_eq!(
        block_on(save_and_reload(&store, &client, 3, draft(), None)).unwrap_err().kind,
        ErrorKind::Server
    );
    assert_eq!(transport.requests().len(), 1);
}
