//! Normalized API error taxonomy and the alert rendering contract.
//!
//! DESIGN
//! ======
//! Transport failures and non-2xx responses are folded into one `ApiError`
//! value before they leave `net`, so pages never see raw fetch errors. Every
//! error surface renders through `AlertContent`, whose title depends only on
//! the error kind.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

const CONNECTION_MESSAGE: &str = "Backend server is not running. Please start the backend server.";
const NETWORK_MESSAGE: &str = "Network error. Please check your internet connection.";
const AUTH_MESSAGE: &str = "Please log in to continue.";
const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";
const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
const SERVER_MESSAGE: &str = "Server error. Please try again later.";
const FALLBACK_MESSAGE: &str = "An error occurred";

/// Classification of a failed backend interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Backend unreachable (connect refused, or 503 from a proxy).
    Connection,
    /// Request sent but no response received.
    Network,
    /// 401: session is no longer valid.
    Auth,
    /// 403: action-level denial; the session stays intact.
    Forbidden,
    /// 404.
    NotFound,
    /// 422: server validation message is shown verbatim.
    Validation,
    /// Any other 5xx.
    Server,
    /// Any other non-2xx status.
    Api,
}

impl ErrorKind {
    /// Classify an HTTP status. Returns `None` for 2xx.
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        let kind = match status {
            200..=299 => return None,
            401 => Self::Auth,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            422 => Self::Validation,
            503 => Self::Connection,
            500..=599 => Self::Server,
            _ => Self::Api,
        };
        Some(kind)
    }

    /// Stable machine-readable code, used in logs.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Connection => "CONNECTION_ERROR",
            Self::Network => "NETWORK_ERROR",
            Self::Auth => "AUTH_ERROR",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION_ERROR",
            Self::Server => "SERVER_ERROR",
            Self::Api => "API_ERROR",
        }
    }
}

/// A backend failure normalized into the taxonomy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    /// HTTP status when a response was received.
    pub status: Option<u16>,
    /// Message supplied by the server in the response body, if any.
    pub server_message: Option<String>,
}

impl ApiError {
    /// Error for a transport that could not reach the backend at all.
    #[must_use]
    pub fn connection() -> Self {
        Self { kind: ErrorKind::Connection, status: None, server_message: None }
    }

    /// Error for a request that never produced a response.
    #[must_use]
    pub fn network() -> Self {
        Self { kind: ErrorKind::Network, status: None, server_message: None }
    }

    /// A 2xx response whose body could not be decoded.
    #[must_use]
    pub fn unexpected_body(status: u16) -> Self {
        Self {
            kind: ErrorKind::Api,
            status: Some(status),
            server_message: Some("Unexpected response from server".to_owned()),
        }
    }

    /// A request the client could not encode.
    #[must_use]
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Api, status: None, server_message: Some(detail.into()) }
    }

    /// Build from a non-2xx response. `body` is scanned for a server message.
    ///
    /// A 2xx status is classified as `Api`; callers only use this for failures.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self {
            kind: ErrorKind::from_status(status).unwrap_or(ErrorKind::Api),
            status: Some(status),
            server_message: extract_server_message(body),
        }
    }

    /// User-facing message derived from the kind and server message.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            ErrorKind::Connection => CONNECTION_MESSAGE.to_owned(),
            ErrorKind::Network => NETWORK_MESSAGE.to_owned(),
            ErrorKind::Auth => AUTH_MESSAGE.to_owned(),
            ErrorKind::Forbidden => FORBIDDEN_MESSAGE.to_owned(),
            ErrorKind::NotFound => NOT_FOUND_MESSAGE.to_owned(),
            ErrorKind::Server => SERVER_MESSAGE.to_owned(),
            ErrorKind::Validation | ErrorKind::Api => {
                self.server_message.clone().unwrap_or_else(|| FALLBACK_MESSAGE.to_owned())
            }
        }
    }

    /// True when no response was received (connect or network failure).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Connection | ErrorKind::Network)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ApiError {}

/// Pull a human-readable message out of an error body.
///
/// JSON objects contribute their `message` field; any other non-empty body
/// is used as trimmed text.
#[must_use]
pub fn extract_server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_owned),
        Ok(serde_json::Value::String(text)) => Some(text).filter(|t| !t.trim().is_empty()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_owned()),
    }
}

/// Alert severity for the rendering contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Success,
}

impl Severity {
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

/// What an alert shows: severity, title, and message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertContent {
    pub severity: Severity,
    pub title: &'static str,
    pub message: String,
}

impl AlertContent {
    /// Alert for a classified API error.
    #[must_use]
    pub fn from_error(error: &ApiError) -> Self {
        Self { severity: Severity::Error, title: title_for(Some(error.kind)), message: error.message() }
    }

    /// Alert for an unclassified message; always titled "Error".
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, title: title_for(None), message: message.into() }
    }

    /// Non-error confirmation banner.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { severity: Severity::Success, title: "Success", message: message.into() }
    }
}

/// Fixed title lookup. Kinds without an entry fall back to "Error".
#[must_use]
pub fn title_for(kind: Option<ErrorKind>) -> &'static str {
    match kind {
        Some(ErrorKind::Auth) => "Authentication Error",
        Some(ErrorKind::Network) => "Network Error",
        Some(ErrorKind::Server) => "Server Error",
        Some(ErrorKind::Validation) => "Validation Error",
        Some(ErrorKind::NotFound) => "Not Found",
        Some(ErrorKind::Forbidden) => "Access Denied",
        Some(ErrorKind::Api) => "API Error",
        Some(ErrorKind::Connection) | None => "Error",
    }
}
