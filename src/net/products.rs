//! Product endpoints.
//!
//! All product calls are authenticated and go through `ApiClient::execute`,
//! so they share the bearer-token and 401 teardown behavior of the wrapper.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use super::http::{ApiClient, HttpRequest, HttpResponse, Part, Transport};
use super::types::{ImageUpload, Product, ProductDraft};
use crate::error::ApiError;
use crate::session::storage::KeyValueStore;

/// Multipart part holding the JSON product record.
pub const PRODUCT_PART: &str = "product";
/// Multipart part holding the optional PNG image.
pub const IMAGE_PART: &str = "imageFile";

fn product_path(id: i64) -> String {
    format!("/product/{id}")
}

fn product_image_path(id: i64) -> String {
    format!("/product/{id}/image")
}

fn decode_json<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    response.json().map_err(|e| {
        log::warn!("products: unexpected response body: {e}");
        ApiError::unexpected_body(response.status)
    })
}

fn multipart(draft: &ProductDraft, image: Option<&ImageUpload>) -> Result<Vec<Part>, ApiError> {
    let product = Part::json(PRODUCT_PART, draft)
        .map_err(|e| ApiError::invalid_request(format!("could not encode product: {e}")))?;
    let mut parts = vec![product];
    if let Some(image) = image {
        parts.push(Part::file(IMAGE_PART, &image.file_name, &image.content_type, image.bytes.clone()));
    }
    Ok(parts)
}

/// Fetch every product via `GET /products`.
///
/// # Errors
///
/// Returns the normalized `ApiError` on failure.
pub async fn list_products<S: KeyValueStore, T: Transport>(client: &ApiClient<S, T>) -> Result<Vec<Product>, ApiError> {
    let response = client.execute(HttpRequest::get("/products")).await?;
    decode_json(&response)
}

/// Fetch one product via `GET /product/{id}`.
///
/// # Errors
///
/// Returns the normalized `ApiError` on failure.
pub async fn get_product<S: KeyValueStore, T: Transport>(client: &ApiClient<S, T>, id: i64) -> Result<Product, ApiError> {
    let response = client.execute(HttpRequest::get(product_path(id))).await?;
    decode_json(&response)
}

/// Create a product via multipart `POST /product`.
///
/// Returns the stored product when the server echoes one back.
///
/// # Errors
///
/// Returns the normalized `ApiError` on failure.
pub async fn create_product<S: KeyValueStore, T: Transport>(
    client: &ApiClient<S, T>,
    draft: &ProductDraft,
    image: Option<&ImageUpload>,
) -> Result<Option<Product>, ApiError> {
    let request = HttpRequest::post("/product").multipart(multipart(draft, image)?);
    let response = client.execute(request).await?;
    Ok(response.json().ok())
}

/// Replace a product via multipart `PUT /product/{id}`.
///
/// # Errors
///
/// Returns the normalized `ApiError` on failure.
pub async fn update_product<S: KeyValueStore, T: Transport>(
    client: &ApiClient<S, T>,
    id: i64,
    draft: &ProductDraft,
    image: Option<&ImageUpload>,
) -> Result<Option<Product>, ApiError> {
    let request = HttpRequest::put(product_path(id)).multipart(multipart(draft, image)?);
    let response = client.execute(request).await?;
    Ok(response.json().ok())
}

/// Delete a product via `DELETE /product/{id}`.
///
/// # Errors
///
/// Returns the normalized `ApiError` on failure.
pub async fn delete_product<S: KeyValueStore, T: Transport>(client: &ApiClient<S, T>, id: i64) -> Result<(), ApiError> {
    client.execute(HttpRequest::delete(product_path(id))).await?;
    Ok(())
}

/// Fetch the PNG bytes for a product via `GET /product/{id}/image`.
///
/// # Errors
///
/// Returns the normalized `ApiError` on failure.
pub async fn fetch_product_image<S: KeyValueStore, T: Transport>(
    client: &ApiClient<S, T>,
    id: i64,
) -> Result<Vec<u8>, ApiError> {
    let response = client.execute(HttpRequest::get(product_image_path(id))).await?;
    Ok(response.body)
}
