//! Landing page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::paths;
use crate::state::store::Store;

const FEATURES: [(&str, &str); 3] = [
    ("Wide Selection", "Browse products across every category."),
    ("Fast Search", "Find what you need by name, brand or keyword."),
    ("Manage Your Catalogue", "Signed-in users can add and edit products."),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let store = expect_context::<Store>();
    let greeting = move || {
        store
            .auth()
            .display_name()
            .map(|name| format!("Welcome back, {name}"))
            .unwrap_or_else(|| "Welcome to Our E-Commerce Store".to_owned())
    };

    view! {
        <section class="home">
            <div class="home__hero">
                <h1>{greeting}</h1>
                <p class="home__tagline">"Discover amazing products at great prices"</p>
                <A href=paths::PRODUCTS attr:class="home__cta">"Browse Products"</A>
            </div>
            <div class="home__features">
                {FEATURES
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <article class="home__feature">
                                <h2>{*title}</h2>
                                <p>{*body}</p>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
