//! Browser `fetch` transport.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: every send fails with `NoResponse`, since there is no
//! browser to talk to.

#![allow(clippy::unused_async)]

use super::http::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::config::CredentialsMode;

/// `Transport` backed by `window.fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(
        &self,
        url: String,
        credentials: CredentialsMode,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            send_fetch(&url, credentials, request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, credentials, request);
            Err(TransportError::NoResponse("not available outside the browser".to_owned()))
        }
    }
}

#[cfg(feature = "csr")]
async fn send_fetch(
    url: &str,
    credentials: CredentialsMode,
    request: HttpRequest,
) -> Result<HttpResponse, TransportError> {
    use super::http::{Body, CONTENT_TYPE, Method};
    use gloo_net::http::Request;

    let mut builder = match request.method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    };
    builder = builder.credentials(request_credentials(credentials));

    let is_multipart = matches!(request.body, Body::Multipart(_));
    for (name, value) in &request.headers {
        // The browser must generate the multipart boundary itself.
        if is_multipart && name.eq_ignore_ascii_case(CONTENT_TYPE) {
            continue;
        }
        builder = builder.header(name, value);
    }

    let prepared = match request.body {
        Body::Empty => builder.build(),
        Body::Json(raw) => builder.body(raw),
        Body::Multipart(parts) => builder.body(form_data(&parts)?),
    }
    .map_err(|e| TransportError::Build(e.to_string()))?;

    let response = prepared
        .send()
        .await
        .map_err(|e| TransportError::NoResponse(e.to_string()))?;
    let status = response.status();
    let body = response
        .binary()
        .await
        .map_err(|e| TransportError::NoResponse(e.to_string()))?;
    Ok(HttpResponse { status, body })
}

#[cfg(feature = "csr")]
fn request_credentials(mode: CredentialsMode) -> web_sys::RequestCredentials {
    match mode {
        CredentialsMode::Include => web_sys::RequestCredentials::Include,
        CredentialsMode::SameOrigin => web_sys::RequestCredentials::SameOrigin,
        CredentialsMode::Omit => web_sys::RequestCredentials::Omit,
    }
}

#[cfg(feature = "csr")]
fn form_data(parts: &[super::http::Part]) -> Result<web_sys::FormData, TransportError> {
    let build_error = |e: wasm_bindgen::JsValue| TransportError::Build(format!("{e:?}"));
    let form = web_sys::FormData::new().map_err(build_error)?;
    for part in parts {
        let blob = crate::util::blob::blob_from_bytes(&part.bytes, &part.content_type).map_err(build_error)?;
        match &part.file_name {
            Some(file_name) => form.append_with_blob_and_filename(&part.name, &blob, file_name),
            None => form.append_with_blob(&part.name, &blob),
        }
        .map_err(build_error)?;
    }
    Ok(form)
}
