//! Backend connection settings.
//!
//! The browser has no process environment, so the base URL is baked in at
//! compile time from `STOREFRONT_API_URL` and falls back to the local
//! development backend.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Base URL used when `STOREFRONT_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// How the browser should treat cookies and credentials on API requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CredentialsMode {
    /// Send credentials on cross-origin requests (the backend runs on its own port).
    #[default]
    Include,
    /// Only send credentials to the page origin.
    SameOrigin,
    /// Never send credentials.
    Omit,
}

/// Connection settings shared by every API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub credentials: CredentialsMode,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    /// Build a config for `base_url`, dropping any trailing slash.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_owned();
        Self { base_url, credentials: CredentialsMode::default() }
    }

    /// Load from the compile-time `STOREFRONT_API_URL`, or use the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_value(option_env!("STOREFRONT_API_URL"))
    }

    fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Join `path` onto the base URL with exactly one separating slash.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return self.base_url.clone();
        }
        format!("{}/{path}", self.base_url)
    }
}
