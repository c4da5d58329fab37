//! Card for one product in a listing, with a lazily loaded image.
//!
//! DESIGN
//! ======
//! Images are fetched through the authenticated client (the image endpoint
//! needs the bearer token), turned into object URLs, and revoked when the
//! card unmounts.

#[cfg(test)]
#[path = "product_card_test.rs"]
mod product_card_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::paths;
use crate::net::types::Product;
use crate::util::blob::PLACEHOLDER_IMAGE;

/// Price as shown on cards and the detail page.
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Availability badge text.
#[must_use]
pub fn stock_label(available: bool, stock_quantity: u32) -> &'static str {
    if available && stock_quantity > 0 { "In stock" } else { "Out of stock" }
}

/// Load a product's image into `src`, revoking the object URL on unmount.
pub fn load_product_image(id: i64, src: RwSignal<String>) {
    #[cfg(feature = "csr")]
    {
        let client = expect_context::<crate::app::BrowserClient>();
        leptos::task::spawn_local(async move {
            match crate::net::products::fetch_product_image(&client, id).await {
                Ok(bytes) => src.set(crate::util::blob::image_src(Some(&bytes))),
                Err(e) => leptos::logging::warn!("image for product {id} unavailable: {e}"),
            }
        });
        on_cleanup(move || {
            let current = src.get_untracked();
            if crate::util::blob::is_object_url(&current) {
                crate::util::blob::revoke_object_url(&current);
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (id, src);
    }
}

/// Listing card. `on_delete` adds a delete button that reports the product id.
#[component]
pub fn ProductCard(product: Product, #[prop(optional)] on_delete: Option<Callback<i64>>) -> impl IntoView {
    let src = RwSignal::new(PLACEHOLDER_IMAGE.to_owned());
    load_product_image(product.id, src);
    let available = product.available && product.stock_quantity > 0;
    let id = product.id;

    view! {
        <article class="product-card">
            <A href=paths::product(id) attr:class="product-card__link">
                <img class="product-card__image" src=move || src.get() alt=product.name.clone() loading="lazy"/>
                <div class="product-card__body">
                    <h3 class="product-card__name">{product.name.clone()}</h3>
                    <p class="product-card__brand">{product.brand.clone()}</p>
                    <p class="product-card__price">{format_price(product.price)}</p>
                    <span class="product-card__stock" class:product-card__stock--out=!available>
                        {stock_label(product.available, product.stock_quantity)}
                    </span>
                </div>
            </A>
            {on_delete.map(|on_delete| {
                view! {
                    <button class="product-card__delete" type="button" on:click=move |_| on_delete.run(id)>
                        "Delete"
                    </button>
                }
            })}
        </article>
    }
}
