use futures::executor::block_on;

use super::*;
use crate::error::ErrorKind;
use crate::net::http::{AUTHORIZATION, Body, Method};
use crate::net::mock::{drain_events, test_client};
use crate::net::types::ProductForm;

const PRODUCT_JSON: &str = r#"{"id":7,"name":"Laptop","description":"","brand":"Acme","price":999.0,
    "category":"Laptop","releaseDate":"2024-03-01","stockQuantity":2,"productAvailable":true}"#;

fn draft() -> ProductDraft {
    ProductForm {
        name: "Laptop".to_owned(),
        price: "999".to_owned(),
        release_date: "2024-03-01".to_owned(),
        stock_quantity: "2".to_owned(),
        available: true,
        ..ProductForm::default()
    }
    .validate(None)
    .unwrap()
}

#[test]
fn paths_format_ids() {
    assert_eq!(product_path(7), "/product/7");
    assert_eq!(product_image_path(7), "/product/7/image");
}

#[test]
fn list_products_decodes_and_sends_bearer() {
    let (client, _events, _storage, transport) = test_client();
    client.tokens().save("abc.def.ghi");
    transport.reply(200, &format!("[{PRODUCT_JSON}]"));
    let products = block_on(list_products(&client)).unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 7);
    let sent = transport.last_request();
    assert_eq!(sent.url, "http://backend.test/api/products");
    assert_eq!(sent.request.header(AUTHORIZATION), Some("Bearer abc.def.ghi"));
}

#[test]
fn list_products_with_bad_body_is_an_error() {
    let (client, _events, _storage, transport) = test_client();
    transport.reply(200, "<html>");
    let err = block_on(list_products(&client)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Api);
    assert_eq!(err.message(), "Unexpected response from server");
}

#[test]
fn list_products_unauthorized_tears_down_session() {
    let (client, events, storage, transport) = test_client();
    client.tokens().save("abc.def.ghi");
    transport.reply(401, "");
    let err = block_on(list_products(&client)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Auth);
    assert!(storage.is_empty());
    assert_eq!(drain_events(client, events).len(), 1);
}

#[test]
fn get_product_targets_resource_path() {
    let (client, _events, _storage, transport) = test_client();
    transport.reply(200, PRODUCT_JSON);
    let product = block_on(get_product(&client, 7)).unwrap();
    assert_eq!(product.name, "Laptop");
    assert_eq!(transport.last_request().url, "http://backend.test/api/product/7");
}

#[test]
fn get_missing_product_is_not_found() {
    let (client, _events, _storage, transport) = test_client();
    transport.reply(404, "");
    assert_eq!(block_on(get_product(&client, 99)).unwrap_err().kind, ErrorKind::NotFound);
}

#[test]
fn create_product_sends_multipart_parts() {
    let (client, _events, _storage, transport) = test_client();
    transport.reply(201, PRODUCT_JSON);
    let image = ImageUpload::new("laptop.png", "image/png", vec![0x89, 0x50]).unwrap();
    let created = block_on(create_product(&client, &draft(), Some(&image))).unwrap();
    assert_eq!(created.map(|p| p.id), Some(7));

    let sent = transport.last_request().request;
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.path, "/product");
    let Body::Multipart(parts) = sent.body else {
        panic!("expected multipart body");
    };
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].name, PRODUCT_PART);
    assert_eq!(parts[0].content_type, "application/json");
    let product: serde_json::Value = serde_json::from_slice(&parts[0].bytes).unwrap();
    assert_eq!(product["releaseDate"], "2024-03-01");
    assert_eq!(parts[1].name, IMAGE_PART);
    assert_eq!(parts[1].file_name.as_deref(), Some("laptop.png"));
}

#[test]
fn update_product_without_image_sends_single_part() {
    let (client, _events, _storage, transport) = test_client();
    transport.reply(200, "Updated");
    let updated = block_on(update_product(&client, 7, &draft(), None)).unwrap();
    assert!(updated.is_none());
    let sent = transport.last_request().request;
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.path, "/product/7");
    assert!(matches!(sent.body, Body::Multipart(ref parts) if parts.len() == 1));
}

#[test]
fn create_forbidden_surfaces_access_denied() {
    let (client, _events, storage, transport) = test_client();
    client.tokens().save("abc.def.ghi");
    transport.reply(403, "");
    let err = block_on(create_product(&client, &draft(), None)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert!(!storage.is_empty());
}

#[test]
fn delete_product_uses_delete_verb() {
    let (client, _events, _storage, transport) = test_client();
    transport.reply(200, "Deleted");
    block_on(delete_product(&client, 7)).unwrap();
    let sent = transport.last_request().request;
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.path, "/product/7");
}

#[test]
fn fetch_product_image_returns_raw_bytes() {
    let (client, _events, _storage, transport) = test_client();
    transport.reply_bytes(200, vec![0x89, b'P', b'N', b'G']);
    assert_eq!(block_on(fetch_product_image(&client, 7)).unwrap(), vec![0x89, b'P', b'N', b'G']);
    assert_eq!(transport.last_request().request.path, "/product/7/image");
}
