//! Product listings. `/products?search=` and `/search?q=` both filter the
//! fetched catalogue locally.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::app::{BrowserClient, paths};
use crate::components::error_alert::ErrorAlert;
use crate::components::product_card::ProductCard;
use crate::error::AlertContent;
use crate::net::types::Product;
use crate::state::products::ProductAction;
use crate::state::store::{Dispatch, Store};
use crate::util::nav::install_navigation;

/// Case-insensitive match on name, description, brand or category.
#[must_use]
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|p| {
            [&p.name, &p.description, &p.brand, &p.category]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Delete a product from a listing. Failures land in the product slice.
fn listing_delete(store: Store, client: BrowserClient) -> Callback<i64> {
    Callback::new(move |id: i64| {
        let client = client.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::state::thunks::delete_product(&store, &client, id).await {
                leptos::logging::warn!("delete of product {id} failed: {e}");
            }
        });
    })
}

fn fetch_catalogue(store: Store, client: BrowserClient) {
    Effect::new(move || {
        let client = client.clone();
        leptos::task::spawn_local(async move {
            let _ = crate::state::thunks::fetch_products(&store, &client).await;
        });
    });
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let store = expect_context::<Store>();
    let client = expect_context::<BrowserClient>();
    let query = use_query_map();
    let search = move || query.read().get("search").unwrap_or_default();

    fetch_catalogue(store, client.clone());
    let on_delete = listing_delete(store, client);
    let visible = Memo::new(move |_| filter_products(&store.products().items, &search()));

    view! {
        <section class="products-page">
            <h1>
                {move || {
                    let term = search();
                    if term.is_empty() { "All Products".to_owned() } else { format!("Results for \"{term}\"") }
                }}
            </h1>
            <ListingAlerts store=store/>
            <ProductGrid
                products=visible
                loading=Signal::derive(move || store.products().loading)
                on_delete=on_delete
            />
        </section>
    }
}

#[component]
pub fn SearchPage() -> impl IntoView {
    let store = expect_context::<Store>();
    let client = expect_context::<BrowserClient>();
    let go_to = RwSignal::new(None::<String>);
    install_navigation(go_to, use_navigate());
    let query = use_query_map();
    let keyword = move || query.read().get("q").unwrap_or_default();
    let draft = RwSignal::new(keyword());

    fetch_catalogue(store, client.clone());
    let on_delete = listing_delete(store, client);
    Effect::new(move || draft.set(keyword()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let term = draft.get().trim().to_owned();
        if !term.is_empty() {
            go_to.set(Some(paths::search(&term)));
        }
    };

    let results = Memo::new(move |_| {
        let term = keyword();
        if term.trim().is_empty() { Vec::new() } else { filter_products(&store.products().items, &term) }
    });

    view! {
        <section class="products-page">
            <h1>"Search"</h1>
            <form class="search-form" role="search" on:submit=on_submit>
                <input
                    class="search-form__input"
                    type="search"
                    placeholder="Search products"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button class="search-form__button" type="submit">"Search"</button>
            </form>
            <ListingAlerts store=store/>
            <ProductGrid
                products=results
                loading=Signal::derive(move || store.products().loading)
                on_delete=on_delete
            />
        </section>
    }
}

/// Product-slice error banner.
#[component]
fn ListingAlerts(store: Store) -> impl IntoView {
    let alert = Signal::derive(move || store.products().error.map(AlertContent::from_message));
    view! {
        <ErrorAlert
            alert=alert
            on_dismiss=Callback::new(move |()| store.dispatch(ProductAction::ClearError.into()))
        />
    }
}

#[component]
fn ProductGrid(
    #[prop(into)] products: Signal<Vec<Product>>,
    loading: Signal<bool>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    view! {
        <Show when=move || !loading.get() fallback=|| view! { <p class="products-page__loading">"Loading..."</p> }>
            <Show
                when=move || !products.with(Vec::is_empty)
                fallback=|| view! { <p class="products-page__empty">"No products found."</p> }
            >
                <div class="product-grid">
                    <For
                        each=move || products.get()
                        key=|product| product.id
                        children=move |product| view! { <ProductCard product=product on_delete=on_delete/> }
                    />
                </div>
            </Show>
        </Show>
    }
}
