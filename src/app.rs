//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the API client and the store exactly once, restores any
//! stored session, and owns the only subscriber to session events. When an
//! authenticated call gets a 401 the subscriber resets auth state and asks
//! the router to go to `/login`.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::{ParamSegment, StaticSegment};

use crate::components::navbar::Navbar;
use crate::config::ApiConfig;
use crate::net::fetch::FetchTransport;
use crate::net::http::{ApiClient, SessionEvent};
use crate::pages::{
    add_product::AddProductPage, home::HomePage, login::LoginPage, product_detail::ProductDetailPage,
    products::ProductsPage, products::SearchPage, profile::ProfilePage, signup::SignupPage,
};
use crate::session::lifecycle::restore_session;
use crate::session::storage::BrowserStorage;
use crate::state::auth::{AuthAction, AuthState};
use crate::state::store::{AppState, Dispatch, Store};
use crate::util::clock::now_unix_secs;
use crate::util::nav::install_navigation;

/// The client every page pulls from context.
pub type BrowserClient = ApiClient<BrowserStorage, FetchTransport>;

/// Route table.
pub mod paths {
    use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

    /// Everything except RFC 3986 unreserved characters.
    const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const PRODUCTS: &str = "/products";
    pub const ADD_PRODUCT: &str = "/products/add";
    pub const PROFILE: &str = "/profile";
    pub const SEARCH: &str = "/search";

    /// Percent-encode one query value.
    #[must_use]
    pub fn encode(value: &str) -> String {
        utf8_percent_encode(value, QUERY_VALUE).to_string()
    }

    #[must_use]
    pub fn product(id: i64) -> String {
        format!("/product/{id}")
    }

    #[must_use]
    pub fn search(query: &str) -> String {
        format!("{SEARCH}?q={}", encode(query.trim()))
    }

    #[must_use]
    pub fn products_matching(keyword: &str) -> String {
        format!("{PRODUCTS}?search={}", encode(keyword.trim()))
    }
}

/// Apply a session event to the store and return where to navigate.
pub fn handle_session_event<D: Dispatch>(store: &D, event: SessionEvent) -> &'static str {
    match event {
        SessionEvent::Invalidated => {
            log::info!("session: invalidated by backend, redirecting to login");
            store.dispatch(AuthAction::SessionInvalidated.into());
            paths::LOGIN
        }
    }
}

/// Root application component.
///
/// Provides the API client and store contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (client, events): (BrowserClient, _) = ApiClient::new(ApiConfig::from_env(), BrowserStorage, FetchTransport);
    let restored = restore_session(client.tokens(), now_unix_secs());
    let store = Store::new(AppState { auth: AuthState::from_session(restored), ..AppState::default() });
    let pending_redirect = RwSignal::new(None::<String>);

    provide_context(client);
    provide_context(store);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        use futures::StreamExt as _;
        let mut events = events;
        while let Some(event) = events.next().await {
            pending_redirect.set(Some(handle_session_event(&store, event).to_owned()));
        }
    });
    #[cfg(not(feature = "csr"))]
    drop(events);

    view! {
        <Title text="Storefront"/>

        <Router>
            <SessionRedirect pending=pending_redirect/>
            <Navbar/>
            <main class="page">
                <Routes fallback=|| view! { <Redirect path=paths::HOME/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route path=StaticSegment("products") view=ProductsPage/>
                    <Route path=(StaticSegment("products"), StaticSegment("add")) view=AddProductPage/>
                    <Route path=(StaticSegment("product"), ParamSegment("id")) view=ProductDetailPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                    <Route path=StaticSegment("search") view=SearchPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Performs redirects requested from outside the router.
#[component]
fn SessionRedirect(pending: RwSignal<Option<String>>) -> impl IntoView {
    install_navigation(pending, use_navigate());
}
