//! Authenticated request wrapper around a pluggable transport.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call except login and signup flows through
//! `ApiClient::execute`, which attaches the stored bearer token and reacts to
//! 401 responses by tearing the session down. Teardown is reported on a
//! `SessionEvent` channel; the application shell owns the only receiver and
//! performs the redirect, so this module never touches navigation.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures and non-2xx statuses are normalized into `ApiError`
//! before returning. Callers never see raw fetch errors.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::fmt;
use std::sync::Arc;

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{ApiConfig, CredentialsMode};
use crate::error::ApiError;
use crate::session::storage::KeyValueStore;
use crate::session::token_store::TokenStore;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// HTTP verbs used by the storefront backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a multipart form.
#[derive(Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    /// Set for file parts.
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Part {
    /// A JSON value sent as an `application/json` blob.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn json<T: Serialize>(name: &str, value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: name.to_owned(),
            file_name: None,
            content_type: JSON_CONTENT_TYPE.to_owned(),
            bytes: serde_json::to_vec(value)?,
        })
    }

    /// A file attachment.
    #[must_use]
    pub fn file(name: &str, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_owned(),
            file_name: Some(file_name.to_owned()),
            content_type: content_type.to_owned(),
            bytes,
        }
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Request payload.
#[derive(Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    Json(String),
    Multipart(Vec<Part>),
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // JSON bodies can carry passwords, so only their size is shown.
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Json(raw) => write!(f, "Json({} bytes)", raw.len()),
            Self::Multipart(parts) => f.debug_tuple("Multipart").field(parts).finish(),
        }
    }
}

/// A backend request addressed by path relative to the API base URL.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), headers: Vec::new(), body: Body::Empty }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body and the matching content type.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Body::Json(serde_json::to_string(value)?);
        self.set_header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        Ok(self)
    }

    /// Attach a multipart body. The transport supplies the boundary.
    #[must_use]
    pub fn multipart(mut self, parts: Vec<Part>) -> Self {
        self.body = Body::Multipart(parts);
        self.set_header(CONTENT_TYPE, MULTIPART_CONTENT_TYPE);
        self
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace a header.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &header_names)
            .field("body", &self.body)
            .finish()
    }
}

/// A received response, successful or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Failure below the HTTP layer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("could not connect: {0}")]
    Connect(String),
    #[error("no response received: {0}")]
    NoResponse(String),
    #[error("could not build request: {0}")]
    Build(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connect(_) => ApiError::connection(),
            TransportError::NoResponse(_) | TransportError::Build(_) => ApiError::network(),
        }
    }
}

/// Sends a fully addressed request and returns whatever status came back.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(
        &self,
        url: String,
        credentials: CredentialsMode,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError>;
}

/// Session lifecycle notifications emitted by the wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// An authenticated call got a 401; storage has already been cleared.
    Invalidated,
}

/// Configured backend client with token injection and 401 interception.
#[derive(Clone)]
pub struct ApiClient<S, T> {
    config: Arc<ApiConfig>,
    tokens: TokenStore<S>,
    transport: T,
    events: UnboundedSender<SessionEvent>,
}

impl<S, T> fmt::Debug for ApiClient<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.config.base_url).finish_non_exhaustive()
    }
}

impl<S: KeyValueStore, T: Transport> ApiClient<S, T> {
    /// Build a client plus the receiving end of its session event channel.
    pub fn new(config: ApiConfig, storage: S, transport: T) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = unbounded();
        let client = Self { config: Arc::new(config), tokens: TokenStore::new(storage), transport, events };
        (client, receiver)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    /// Send an authenticated request.
    ///
    /// Attaches `Authorization: Bearer <token>` when a token is stored. A 401
    /// clears the token store and emits `SessionEvent::Invalidated` once.
    ///
    /// # Errors
    ///
    /// Returns the normalized `ApiError` for transport failures and non-2xx
    /// statuses.
    pub async fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(token) = self.tokens.read() {
            request.set_header(AUTHORIZATION, &bearer(&token));
        }
        let response = self.dispatch(request).await?;
        if response.status == 401 {
            self.invalidate_session();
        }
        ensure_success(response)
    }

    /// Send a request without token injection or 401 teardown.
    ///
    /// Only login and signup use this path; no session exists yet.
    ///
    /// # Errors
    ///
    /// Returns the normalized `ApiError` for transport failures and non-2xx
    /// statuses.
    pub async fn execute_public(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.dispatch(request).await?;
        ensure_success(response)
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.config.url(&request.path);
        let method = request.method;
        log::debug!("api: {method} {url}");
        match self.transport.send(url.clone(), self.config.credentials, request).await {
            Ok(response) => {
                log::debug!("api: {method} {url} -> {}", response.status);
                Ok(response)
            }
            Err(e) => {
                let detail = e.to_string();
                let error = ApiError::from(e);
                log::warn!("api: {method} {url} failed [{}]: {detail}", error.kind.code());
                Err(error)
            }
        }
    }

    fn invalidate_session(&self) {
        log::warn!("api: received 401, clearing session");
        self.tokens.clear();
        if self.events.unbounded_send(SessionEvent::Invalidated).is_err() {
            log::warn!("api: no session listener attached");
        }
    }
}

/// `Bearer <token>` header value.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn ensure_success(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    let error = ApiError::from_response(response.status, &response.text());
    log::warn!("api: request rejected [{}] with status {}", error.kind.code(), response.status);
    Err(error)
}
