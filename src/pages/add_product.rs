//! Add-product page. Requires a signed-in user.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::{BrowserClient, paths};
use crate::components::error_alert::ErrorAlert;
use crate::components::product_form::{ProductForm, ProductSubmission};
use crate::error::AlertContent;
use crate::net::types::ProductForm as FormFields;
use crate::state::store::Store;
use crate::util::auth::install_unauth_redirect;
use crate::util::nav::install_navigation;

#[component]
pub fn AddProductPage() -> impl IntoView {
    let store = expect_context::<Store>();
    let client = expect_context::<BrowserClient>();
    let navigate = use_navigate();
    install_unauth_redirect(store, navigate.clone());
    let go_to = RwSignal::new(None::<String>);
    install_navigation(go_to, navigate);

    let alert = RwSignal::new(None::<AlertContent>);
    let busy = Signal::derive(move || store.products().loading);

    let on_submit = Callback::new(move |(draft, image): ProductSubmission| {
        alert.set(None);
        let client = client.clone();
        leptos::task::spawn_local(async move {
            match crate::state::thunks::create_product(&store, &client, draft, image).await {
                Ok(_) => go_to.set(Some(paths::PRODUCTS.to_owned())),
                Err(e) => alert.set(Some(AlertContent::from_error(&e))),
            }
        });
    });

    view! {
        <section class="form-page">
            <h1>"Add New Product"</h1>
            <ErrorAlert alert=alert on_dismiss=Callback::new(move |()| alert.set(None))/>
            <ProductForm
                initial=FormFields { available: true, ..FormFields::default() }
                submit_label="Add Product"
                busy=busy
                on_submit=on_submit
            />
        </section>
    }
}
