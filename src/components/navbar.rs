//! Top navigation bar with product search and auth-aware actions.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::{BrowserClient, paths};
use crate::state::store::Store;
use crate::util::nav::install_navigation;

/// Listing URL for a navbar search, or `None` for a blank keyword.
#[must_use]
pub fn search_target(keyword: &str) -> Option<String> {
    let keyword = keyword.trim();
    (!keyword.is_empty()).then(|| paths::products_matching(keyword))
}

#[component]
pub fn Navbar() -> impl IntoView {
    let store = expect_context::<Store>();
    let client = expect_context::<BrowserClient>();
    let go_to = RwSignal::new(None::<String>);
    install_navigation(go_to, use_navigate());
    let query = RwSignal::new(String::new());

    let signed_in = move || store.auth().is_authenticated();
    let username = move || store.auth().display_name().unwrap_or_default().to_owned();

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(target) = search_target(&query.get()) {
            go_to.set(Some(target));
        }
    };

    let on_logout = move |_| {
        let client = client.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::state::thunks::logout(&store, &client).await {
                leptos::logging::warn!("logout failed: {e}");
            }
            go_to.set(Some(paths::LOGIN.to_owned()));
        });
    };

    view! {
        <nav class="navbar">
            <A href=paths::HOME attr:class="navbar__brand">"Storefront"</A>
            <form class="navbar__search" role="search" on:submit=on_search>
                <input
                    class="navbar__search-input"
                    type="search"
                    placeholder="Search products"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <button class="navbar__search-button" type="submit">"Search"</button>
            </form>
            <div class="navbar__links">
                <A href=paths::PRODUCTS>"Products"</A>
                <Show
                    when=signed_in
                    fallback=|| {
                        view! {
                            <A href=paths::LOGIN>"Login"</A>
                            <A href=paths::SIGNUP>"Sign up"</A>
                        }
                    }
                >
                    <A href=paths::ADD_PRODUCT>"Add product"</A>
                    <A href=paths::PROFILE>{username}</A>
                    <button class="navbar__logout" type="button" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
