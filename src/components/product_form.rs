//! Product editor shared by the add and edit flows.
//!
//! The form keeps raw text for every field and only produces a
//! `ProductDraft` on submit, so partially typed numbers and dates never leave
//! this component.

use leptos::prelude::*;

use crate::net::types::{ImageUpload, ProductDraft, ProductForm as FormFields};

/// Validated submission: the draft plus an optional PNG.
pub type ProductSubmission = (ProductDraft, Option<ImageUpload>);

#[component]
pub fn ProductForm(
    initial: FormFields,
    #[prop(optional)] product_id: Option<i64>,
    submit_label: &'static str,
    #[prop(into)] busy: Signal<bool>,
    on_submit: Callback<ProductSubmission>,
) -> impl IntoView {
    let fields = RwSignal::new(initial);
    let image = RwSignal::new(None::<ImageUpload>);
    let problem = RwSignal::new(None::<String>);

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        match fields.with_untracked(|f| f.validate(product_id)) {
            Ok(draft) => {
                problem.set(None);
                on_submit.run((draft, image.get_untracked()));
            }
            Err(e) => problem.set(Some(e.to_string())),
        }
    };

    let on_image_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                image.set(None);
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::util::blob::read_upload(file).await {
                    Ok(upload) => {
                        problem.set(None);
                        image.set(Some(upload));
                    }
                    Err(message) => {
                        image.set(None);
                        problem.set(Some(message));
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ev;
        }
    };

    view! {
        <form class="product-form" on:submit=on_form_submit>
            {move || problem.get().map(|message| view! { <p class="product-form__problem" role="alert">{message}</p> })}
            <label class="product-form__field">
                "Product name"
                <input
                    type="text"
                    required
                    prop:value=move || fields.with(|f| f.name.clone())
                    on:input=move |ev| fields.update(|f| f.name = event_target_value(&ev))
                />
            </label>
            <label class="product-form__field">
                "Description"
                <textarea
                    rows="4"
                    prop:value=move || fields.with(|f| f.description.clone())
                    on:input=move |ev| fields.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </label>
            <label class="product-form__field">
                "Brand"
                <input
                    type="text"
                    prop:value=move || fields.with(|f| f.brand.clone())
                    on:input=move |ev| fields.update(|f| f.brand = event_target_value(&ev))
                />
            </label>
            <label class="product-form__field">
                "Price"
                <input
                    type="number"
                    step="0.01"
                    min="0"
                    required
                    prop:value=move || fields.with(|f| f.price.clone())
                    on:input=move |ev| fields.update(|f| f.price = event_target_value(&ev))
                />
            </label>
            <label class="product-form__field">
                "Category"
                <input
                    type="text"
                    prop:value=move || fields.with(|f| f.category.clone())
                    on:input=move |ev| fields.update(|f| f.category = event_target_value(&ev))
                />
            </label>
            <label class="product-form__field">
                "Release date"
                <input
                    type="date"
                    required
                    prop:value=move || fields.with(|f| f.release_date.clone())
                    on:input=move |ev| fields.update(|f| f.release_date = event_target_value(&ev))
                />
            </label>
            <label class="product-form__field">
                "Stock quantity"
                <input
                    type="number"
                    min="0"
                    required
                    prop:value=move || fields.with(|f| f.stock_quantity.clone())
                    on:input=move |ev| fields.update(|f| f.stock_quantity = event_target_value(&ev))
                />
            </label>
            <label class="product-form__toggle">
                <input
                    type="checkbox"
                    prop:checked=move || fields.with(|f| f.available)
                    on:change=move |ev| fields.update(|f| f.available = event_target_checked(&ev))
                />
                "Product available"
            </label>
            <label class="product-form__field">
                "Product image (PNG)"
                <input type="file" accept="image/png" on:change=on_image_change/>
            </label>
            {move || {
                image
                    .with(|upload| upload.as_ref().map(|u| u.file_name.clone()))
                    .map(|name| view! { <p class="product-form__file">"Selected file: " {name}</p> })
            }}
            <button class="product-form__submit" type="submit" disabled=move || busy.get()>
                {submit_label}
            </button>
        </form>
    }
}
