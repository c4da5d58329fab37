//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected pages (add product, profile) apply identical unauthenticated
//! redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::app::paths;
use crate::state::auth::AuthState;
use crate::state::store::Store;

/// True when a protected page should send the visitor to `/login`.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && !state.is_authenticated()
}

/// Redirect to `/login` whenever auth has settled and no session is present.
pub fn install_unauth_redirect<F>(store: Store, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&store.auth()) {
            navigate(paths::LOGIN, NavigateOptions::default());
        }
    });
}
