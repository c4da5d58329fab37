//! Persistent bearer token and cached profile.
//!
//! Two entries live in storage: the raw token under `token` and a JSON
//! `{username, role}` record under `userData`. Every write is a full replace,
//! so concurrent writers simply race to the last value.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use super::storage::KeyValueStore;
use crate::net::types::UserProfile;

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON profile projection.
pub const PROFILE_KEY: &str = "userData";

/// Token and profile persistence over any `KeyValueStore`.
#[derive(Clone, Debug, Default)]
pub struct TokenStore<S> {
    storage: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist `token`, replacing any previous one.
    pub fn save(&self, token: &str) {
        if let Err(e) = self.storage.set(TOKEN_KEY, token) {
            log::warn!("token store: failed to persist token: {e}");
        }
    }

    /// Current token, or `None` if absent or obviously corrupt.
    pub fn read(&self) -> Option<String> {
        let raw = self.storage.get(TOKEN_KEY)?;
        let token = raw.trim();
        if token.is_empty() || token == "undefined" || token == "null" {
            return None;
        }
        Some(token.to_owned())
    }

    /// Drop the token and the cached profile together.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(PROFILE_KEY);
    }

    /// Cache the display profile.
    pub fn save_profile(&self, profile: &UserProfile) {
        let raw = match serde_json::to_string(profile) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("token store: failed to encode profile: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(PROFILE_KEY, &raw) {
            log::warn!("token store: failed to persist profile: {e}");
        }
    }

    /// Cached profile. Malformed entries are removed and read as absent.
    pub fn read_profile(&self) -> Option<UserProfile> {
        let raw = self.storage.get(PROFILE_KEY)?;
        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) if !profile.username.trim().is_empty() => Some(profile),
            Ok(_) | Err(_) => {
                log::debug!("token store: discarding malformed cached profile");
                self.storage.remove(PROFILE_KEY);
                None
            }
        }
    }
}
