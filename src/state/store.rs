//! The root store: one `AppState` behind a signal, changed only by actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `app::App` builds the store once from the restored session and provides
//! it as context. Components read slices through the signal and write only
//! through `Dispatch`.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use leptos::prelude::*;

use super::auth::{self, AuthAction, AuthState};
use super::products::{self, ProductAction, ProductState};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub products: ProductState,
}

impl AppState {
    /// Route an action to its slice reducer.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Auth(action) => auth::apply(&mut self.auth, action),
            Action::Products(action) => products::apply(&mut self.products, action),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Products(ProductAction),
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<ProductAction> for Action {
    fn from(action: ProductAction) -> Self {
        Self::Products(action)
    }
}

/// Anything that accepts actions.
pub trait Dispatch {
    fn dispatch(&self, action: Action);
}

/// Signal-backed store provided at the application root.
#[derive(Clone, Copy, Debug)]
pub struct Store {
    state: RwSignal<AppState>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self { state: RwSignal::new(initial) }
    }

    /// Read-only view for components.
    pub fn state(&self) -> ReadSignal<AppState> {
        self.state.read_only()
    }

    /// Tracked read of the auth slice.
    pub fn auth(&self) -> AuthState {
        self.state.with(|s| s.auth.clone())
    }

    /// Tracked read of the product slice.
    pub fn products(&self) -> ProductState {
        self.state.with(|s| s.products.clone())
    }
}

impl Dispatch for Store {
    fn dispatch(&self, action: Action) {
        log::debug!("store: {}", action_name(&action));
        self.state.update(|state| state.apply(action));
    }
}

/// Short label for logs; payloads can carry tokens.
fn action_name(action: &Action) -> &'static str {
    match action {
        Action::Auth(AuthAction::Login(_)) => "auth/login",
        Action::Auth(AuthAction::Signup(_)) => "auth/signup",
        Action::Auth(AuthAction::Logout(_)) => "auth/logout",
        Action::Auth(AuthAction::UpdateProfile(_)) => "auth/updateProfile",
        Action::Auth(AuthAction::DeleteProfile(_)) => "auth/deleteProfile",
        Action::Auth(AuthAction::SessionInvalidated) => "auth/sessionInvalidated",
        Action::Auth(AuthAction::ClearError) => "auth/clearError",
        Action::Products(ProductAction::FetchAll(_)) => "products/fetchAll",
        Action::Products(ProductAction::FetchOne(_)) => "products/fetchOne",
        Action::Products(ProductAction::Create(_)) => "products/create",
        Action::Products(ProductAction::Update(_)) => "products/update",
        Action::Products(ProductAction::Delete(_)) => "products/delete",
        Action::Products(ProductAction::ClearError) => "products/clearError",
        Action::Products(ProductAction::ClearNotice) => "products/clearNotice",
    }
}
