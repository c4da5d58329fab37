//! Auth lifecycle: login, signup, logout, profile update and deletion.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each operation talks to the backend through `ApiClient` and keeps the
//! token store in step with the outcome. Login and signup use the public
//! path (no session exists yet); everything else is authenticated, so a 401
//! during those calls also tears the session down through the wrapper.
//!
//! ERROR HANDLING
//! ==============
//! Failures are `AuthFailure` values whose `Display` is the user-facing
//! message. Backend failures keep the underlying `ApiError` as their source.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use serde::Deserialize;

use super::storage::KeyValueStore;
use super::token::{self, TokenClaims};
use super::token_store::TokenStore;
use crate::error::{AlertContent, ApiError, title_for};
use crate::net::http::{ApiClient, HttpRequest, Transport};
use crate::net::types::{Credentials, UserProfile};

const LOGIN_PATH: &str = "/login";
const SIGNUP_PATH: &str = "/sign_up";
const LOGOUT_PATH: &str = "/logout";
const UPDATE_PATH: &str = "/update";
const DELETE_PATH: &str = "/delete";

/// Body returned by `/sign_up` for a new account.
pub const SIGNUP_SAVED: &str = "User saved";
/// Body returned by `/sign_up` when the username or password is taken.
pub const SIGNUP_DUPLICATE: &str = "There is already one user this same username or password. So change this!";

const LOGIN_REJECTED_MESSAGE: &str = "Invalid username or password";
const SIGNUP_FALLBACK_MESSAGE: &str = "Failed to sign up";
const LOGOUT_FALLBACK_MESSAGE: &str = "Logout failed";
const UPDATE_FALLBACK_MESSAGE: &str = "Profile update failed";
const DELETE_FALLBACK_MESSAGE: &str = "Profile deletion failed";

/// Why an auth operation failed. `Display` is the message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    #[error("Invalid token format")]
    InvalidToken,
    #[error("No token found")]
    MissingToken,
    #[error("Username or password already exists. Please choose different credentials.")]
    AlreadyExists,
    #[error("{0}")]
    SignupRejected(String),
    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl AuthFailure {
    /// Underlying backend error, when there was one.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Request { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Alert for this failure; backend failures are titled by their kind.
    #[must_use]
    pub fn alert(&self) -> AlertContent {
        match self {
            Self::Request { message, source } => AlertContent {
                title: title_for(Some(source.kind)),
                ..AlertContent::from_message(message.clone())
            },
            other => AlertContent::from_message(other.to_string()),
        }
    }
}

/// A signed-in session as returned by `login`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginSuccess {
    pub token: String,
    pub profile: UserProfile,
}

/// Result of a profile update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Set when the backend reissued the token.
    pub token: Option<String>,
    pub profile: UserProfile,
}

/// Session recovered from storage at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoredSession {
    pub token: String,
    pub profile: Option<UserProfile>,
}

/// Sign in and persist the issued token.
///
/// Any failure clears the token store so no stale credential survives.
///
/// # Errors
///
/// `InvalidToken` when the body is not a token, otherwise `Request`.
pub async fn login<S: KeyValueStore, T: Transport>(
    client: &ApiClient<S, T>,
    credentials: &Credentials,
) -> Result<LoginSuccess, AuthFailure> {
    let outcome = attempt_login(client, credentials).await;
    if let Err(e) = &outcome {
        log::warn!("auth: login failed: {e}");
        client.tokens().clear();
    }
    outcome
}

async fn attempt_login<S: KeyValueStore, T: Transport>(
    client: &ApiClient<S, T>,
    credentials: &Credentials,
) -> Result<LoginSuccess, AuthFailure> {
    let request = json_request(HttpRequest::post(LOGIN_PATH), credentials)?;
    let response = client.execute_public(request).await.map_err(|e| {
        let message = match (&e.server_message, e.status) {
            (Some(message), _) => message.clone(),
            (None, Some(401)) => LOGIN_REJECTED_MESSAGE.to_owned(),
            (None, _) => e.message(),
        };
        AuthFailure::Request { message, source: e }
    })?;

    let raw = token_from_body(&response.text()).ok_or(AuthFailure::InvalidToken)?;
    let decoded = token::decode(&raw).map_err(|e| {
        log::warn!("auth: rejecting issued token: {e}");
        AuthFailure::InvalidToken
    })?;
    let role = decoded.claims.as_ref().and_then(TokenClaims::role).unwrap_or_default();
    let profile = UserProfile { username: credentials.username.trim().to_owned(), role };

    client.tokens().save(&decoded.raw);
    client.tokens().save_profile(&profile);
    log::debug!("auth: signed in as {}", profile.username);
    Ok(LoginSuccess { token: decoded.raw, profile })
}

/// Register a new account.
///
/// # Errors
///
/// `AlreadyExists` for the duplicate-account reply (whatever the status),
/// `SignupRejected` for anything else that is not `User saved`.
pub async fn signup<S: KeyValueStore, T: Transport>(
    client: &ApiClient<S, T>,
    credentials: &Credentials,
) -> Result<(), AuthFailure> {
    let request = json_request(HttpRequest::post(SIGNUP_PATH), credentials)?;
    let body = match client.execute_public(request).await {
        Ok(response) => response.text(),
        Err(e) if e.is_transport() => return Err(AuthFailure::SignupRejected(e.message())),
        Err(e) => e.server_message.unwrap_or_default(),
    };
    match signup_body(&body).as_str() {
        SIGNUP_SAVED => Ok(()),
        SIGNUP_DUPLICATE => Err(AuthFailure::AlreadyExists),
        "" => Err(AuthFailure::SignupRejected(SIGNUP_FALLBACK_MESSAGE.to_owned())),
        other => Err(AuthFailure::SignupRejected(other.to_owned())),
    }
}

/// End the session. The token store is cleared whatever the backend says.
///
/// Without a stored token no request is made.
///
/// # Errors
///
/// `Request` when the backend call fails; the store is cleared regardless.
pub async fn logout<S: KeyValueStore, T: Transport>(client: &ApiClient<S, T>) -> Result<(), AuthFailure> {
    if client.tokens().read().is_none() {
        client.tokens().clear();
        return Ok(());
    }
    let outcome = client.execute(HttpRequest::get(LOGOUT_PATH)).await;
    client.tokens().clear();
    outcome.map(|_| ()).map_err(|e| request_failure(e, LOGOUT_FALLBACK_MESSAGE))
}

/// Change the username and password of the signed-in account.
///
/// # Errors
///
/// `MissingToken` when signed out, otherwise `Request`. The stored token is
/// left as it was on failure.
pub async fn update_profile<S: KeyValueStore, T: Transport>(
    client: &ApiClient<S, T>,
    credentials: &Credentials,
) -> Result<ProfileUpdate, AuthFailure> {
    if client.tokens().read().is_none() {
        return Err(AuthFailure::MissingToken);
    }
    let request = json_request(HttpRequest::put(UPDATE_PATH), credentials)?;
    let response = client
        .execute(request)
        .await
        .map_err(|e| request_failure(e, UPDATE_FALLBACK_MESSAGE))?;

    let reply = parse_update_reply(&response.text());
    if let Some(token) = &reply.token {
        client.tokens().save(token);
    }
    let role = client.tokens().read_profile().map(|p| p.role).unwrap_or_default();
    let username = reply.username.unwrap_or_else(|| credentials.username.trim().to_owned());
    let profile = UserProfile { username, role };
    client.tokens().save_profile(&profile);
    Ok(ProfileUpdate { token: reply.token, profile })
}

/// Delete the signed-in account and clear the session.
///
/// # Errors
///
/// `MissingToken` when signed out, otherwise `Request`.
pub async fn delete_profile<S: KeyValueStore, T: Transport>(client: &ApiClient<S, T>) -> Result<(), AuthFailure> {
    if client.tokens().read().is_none() {
        return Err(AuthFailure::MissingToken);
    }
    client
        .execute(HttpRequest::delete(DELETE_PATH))
        .await
        .map_err(|e| request_failure(e, DELETE_FALLBACK_MESSAGE))?;
    client.tokens().clear();
    Ok(())
}

/// Recover the stored session at startup, discarding an expired token.
pub fn restore_session<S: KeyValueStore>(tokens: &TokenStore<S>, now_unix_secs: i64) -> Option<RestoredSession> {
    let token = tokens.read()?;
    let expired = token::decode(&token)
        .ok()
        .and_then(|decoded| decoded.claims)
        .is_some_and(|claims| claims.is_expired(now_unix_secs));
    if expired {
        log::debug!("auth: stored token has expired");
        tokens.clear();
        return None;
    }
    Some(RestoredSession { token, profile: tokens.read_profile() })
}

fn json_request(request: HttpRequest, credentials: &Credentials) -> Result<HttpRequest, AuthFailure> {
    request.json(credentials).map_err(|e| {
        let source = ApiError::invalid_request(format!("could not encode credentials: {e}"));
        AuthFailure::Request { message: source.message(), source }
    })
}

fn request_failure(error: ApiError, fallback: &str) -> AuthFailure {
    let message = match &error.server_message {
        Some(message) => message.clone(),
        None if error.is_transport() => error.message(),
        None => fallback.to_owned(),
    };
    AuthFailure::Request { message, source: error }
}

/// Token carried by a login body: raw text, or a JSON string.
fn token_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    let token = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(token)) => token,
        Ok(_) => return None,
        Err(_) => trimmed.to_owned(),
    };
    Some(token.trim().to_owned()).filter(|t| !t.is_empty())
}

fn signup_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body.trim()) {
        Ok(serde_json::Value::String(text)) => text.trim().to_owned(),
        _ => body.trim().to_owned(),
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct UpdateReply {
    token: Option<String>,
    username: Option<String>,
}

#[derive(Deserialize)]
struct UpdateEnvelope {
    token: Option<String>,
    user: Option<UpdateUser>,
}

#[derive(Deserialize)]
struct UpdateUser {
    username: Option<String>,
}

/// Read a reissued token from an update reply. An envelope `token` is taken
/// as-is; a bare body only counts when it is shaped like a JWT.
fn parse_update_reply(body: &str) -> UpdateReply {
    let trimmed = body.trim();
    if let Ok(envelope) = serde_json::from_str::<UpdateEnvelope>(trimmed) {
        return UpdateReply {
            token: envelope.token.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty()),
            username: envelope
                .user
                .and_then(|u| u.username)
                .map(|u| u.trim().to_owned())
                .filter(|u| !u.is_empty()),
        };
    }
    let token = token_from_body(trimmed).filter(|t| token::decode(t).is_ok());
    UpdateReply { token, username: None }
}
