//! Browser blob helpers: multipart parts, image object URLs and file reads.
//!
//! TRADE-OFFS
//! ==========
//! Object URLs pin their blob until revoked, so every URL handed out here
//! must go back through `revoke_object_url` when its image unmounts. Native
//! builds have no blobs; the stubs return nothing.

#[cfg(test)]
#[path = "blob_test.rs"]
mod blob_test;

/// Wrap raw bytes in a `Blob` of the given content type.
#[cfg(feature = "csr")]
pub fn blob_from_bytes(bytes: &[u8], content_type: &str) -> Result<web_sys::Blob, wasm_bindgen::JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(content_type);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&array), &options)
}

/// Create an object URL for image bytes, for use as an `<img src>`.
pub fn object_url(bytes: &[u8], content_type: &str) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let blob = blob_from_bytes(bytes, content_type).ok()?;
        web_sys::Url::create_object_url_with_blob(&blob).ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (bytes, content_type);
        None
    }
}

/// Release an object URL created by `object_url`.
pub fn revoke_object_url(url: &str) {
    #[cfg(feature = "csr")]
    {
        let _ = web_sys::Url::revoke_object_url(url);
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = url;
    }
}

/// Read a selected `<input type=file>` entry into an upload.
///
/// Returns `Err` with a user-facing message when the file cannot be read or
/// is not a PNG.
#[cfg(feature = "csr")]
pub async fn read_upload(file: web_sys::File) -> Result<crate::net::types::ImageUpload, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read file: {e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    crate::net::types::ImageUpload::new(file.name(), &file.type_(), bytes).map_err(|e| e.to_string())
}

/// Placeholder shown when a product has no image or it failed to load.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.png";

/// Resolve the `<img src>` for fetched image bytes.
#[must_use]
pub fn image_src(bytes: Option<&[u8]>) -> String {
    bytes
        .filter(|b| !b.is_empty())
        .and_then(|b| object_url(b, crate::net::types::PNG_CONTENT_TYPE))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned())
}

/// True for URLs minted by `object_url` that need revoking.
#[must_use]
pub fn is_object_url(src: &str) -> bool {
    src.starts_with("blob:")
}
