//! Product detail page with inline edit and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route id is fetched into `ProductState::current`. Edits and deletes
//! go through the product thunks, which refetch the list afterwards; a
//! delete also leaves the page.

#[cfg(test)]
#[path = "product_detail_test.rs"]
mod product_detail_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::app::{BrowserClient, paths};
use crate::components::error_alert::ErrorAlert;
use crate::components::product_card::{format_price, load_product_image, stock_label};
use crate::components::product_form::{ProductForm, ProductSubmission};
use crate::error::{AlertContent, ApiError};
use crate::net::http::{ApiClient, Transport};
use crate::net::types::{ImageUpload, Product, ProductDraft, ProductForm as FormFields, format_release_date};
use crate::session::storage::KeyValueStore;
use crate::state::products::ProductAction;
use crate::state::store::{Dispatch, Store};
use crate::util::blob::PLACEHOLDER_IMAGE;
use crate::util::nav::install_navigation;

/// Parse the `:id` route segment.
#[must_use]
pub fn parse_product_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Save an edit, then reload the product shown on the page.
///
/// # Errors
///
/// The update failure, or the reload failure once the update went through.
pub async fn save_and_reload<D: Dispatch, S: KeyValueStore, T: Transport>(
    store: &D,
    client: &ApiClient<S, T>,
    id: i64,
    draft: ProductDraft,
    image: Option<ImageUpload>,
) -> Result<(), ApiError> {
    crate::state::thunks::update_product(store, client, id, draft, image).await?;
    crate::state::thunks::fetch_product(store, client, id).await?;
    Ok(())
}

#[component]
pub fn ProductDetailPage() -> impl IntoView {
    let store = expect_context::<Store>();
    let client = expect_context::<BrowserClient>();
    let go_to = RwSignal::new(None::<String>);
    install_navigation(go_to, use_navigate());
    let params = use_params_map();
    let product_id = move || params.read().get("id").as_deref().and_then(parse_product_id);

    let editing = RwSignal::new(false);
    let confirm_delete = RwSignal::new(false);
    let alert = RwSignal::new(None::<AlertContent>);

    let client_fetch = client.clone();
    Effect::new(move || {
        let Some(id) = product_id() else {
            alert.set(Some(AlertContent::from_message("Invalid product id")));
            return;
        };
        editing.set(false);
        let client = client_fetch.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::state::thunks::fetch_product(&store, &client, id).await {
                alert.set(Some(AlertContent::from_error(&e)));
            }
        });
    });

    let current = Memo::new(move |_| {
        let id = product_id()?;
        store.products().current.filter(|p| p.id == id)
    });
    let signed_in = move || store.auth().is_authenticated();
    let busy = Signal::derive(move || store.products().loading);

    let client_update = client.clone();
    let on_update = Callback::new(move |(draft, image): ProductSubmission| {
        let Some(id) = product_id() else {
            return;
        };
        let client = client_update.clone();
        leptos::task::spawn_local(async move {
            match save_and_reload(&store, &client, id, draft, image).await {
                Ok(()) => editing.set(false),
                Err(e) => alert.set(Some(AlertContent::from_error(&e))),
            }
        });
    });

    let on_delete = move |_| {
        let Some(id) = product_id() else {
            return;
        };
        confirm_delete.set(false);
        let client = client.clone();
        leptos::task::spawn_local(async move {
            match crate::state::thunks::delete_product(&store, &client, id).await {
                Ok(()) => go_to.set(Some(paths::PRODUCTS.to_owned())),
                Err(e) => alert.set(Some(AlertContent::from_error(&e))),
            }
        });
    };

    let notice = Signal::derive(move || store.products().notice.map(AlertContent::success));

    view! {
        <section class="product-detail">
            <ErrorAlert alert=alert on_dismiss=Callback::new(move |()| alert.set(None))/>
            <ErrorAlert
                alert=notice
                on_dismiss=Callback::new(move |()| store.dispatch(ProductAction::ClearNotice.into()))
            />
            {move || match current.get() {
                None => view! { <p class="product-detail__loading">"Loading product..."</p> }.into_any(),
                Some(product) if editing.get() => {
                    view! {
                        <h1>"Edit product"</h1>
                        <ProductForm
                            initial=FormFields::from_product(&product)
                            product_id=product.id
                            submit_label="Save changes"
                            busy=busy
                            on_submit=on_update
                        />
                        <button class="product-detail__cancel" type="button" on:click=move |_| editing.set(false)>
                            "Cancel"
                        </button>
                    }
                        .into_any()
                }
                Some(product) => view! { <ProductSummary product=product/> }.into_any(),
            }}
            <Show when=move || signed_in() && current.with(Option::is_some) && !editing.get()>
                <div class="product-detail__actions">
                    <button class="product-detail__edit" type="button" on:click=move |_| editing.set(true)>
                        "Edit"
                    </button>
                    <button
                        class="product-detail__delete"
                        type="button"
                        on:click=move |_| confirm_delete.set(true)
                    >
                        "Delete"
                    </button>
                </div>
            </Show>
            <Show when=move || confirm_delete.get()>
                <div class="dialog" role="dialog" aria-modal="true">
                    <p>"Delete this product? This cannot be undone."</p>
                    <button type="button" on:click=move |_| confirm_delete.set(false)>"Cancel"</button>
                    <button class="dialog__danger" type="button" on:click=on_delete.clone()>
                        "Delete"
                    </button>
                </div>
            </Show>
        </section>
    }
}

#[component]
fn ProductSummary(product: Product) -> impl IntoView {
    let src = RwSignal::new(PLACEHOLDER_IMAGE.to_owned());
    load_product_image(product.id, src);
    let released = product.release_date.map(format_release_date).unwrap_or_else(|| "Unknown".to_owned());

    view! {
        <article class="product-detail__body">
            <img class="product-detail__image" src=move || src.get() alt=product.name.clone()/>
            <div class="product-detail__info">
                <h1>{product.name.clone()}</h1>
                <p class="product-detail__brand">{product.brand.clone()}</p>
                <p class="product-detail__price">{format_price(product.price)}</p>
                <p class="product-detail__description">{product.description.clone()}</p>
                <dl class="product-detail__facts">
                    <dt>"Category"</dt>
                    <dd>{product.category.clone()}</dd>
                    <dt>"Released"</dt>
                    <dd>{released}</dd>
                    <dt>"Stock"</dt>
                    <dd>{format!("{} ({})", stock_label(product.available, product.stock_quantity), product.stock_quantity)}</dd>
                </dl>
            </div>
        </article>
    }
}
